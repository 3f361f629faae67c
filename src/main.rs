mod cli;
mod error;
mod runtime;
mod syntax;

use std::io::{self, BufRead};
use std::process;

use clap::Parser;

use crate::runtime::calculate;

fn main() {
    env_logger::init();

    let cli = cli::Cli::parse();

    if cli.expression.is_empty() {
        repl();
        return;
    }

    let expression = cli.expression.join(" ");
    match calculate(&expression) {
        Ok(value) => println!("{value}"),
        Err(why) => {
            eprintln!("{why}");
            process::exit(1);
        }
    }
}

/// Reads expressions from stdin line by line until EOF or a literal `exit`,
/// printing the result or the error message and carrying on.
fn repl() {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.expect("Failed to read stdin");
        let line = line.trim();

        if line == "exit" {
            break;
        }
        if line.is_empty() {
            continue;
        }

        match calculate(line) {
            Ok(value) => println!("{value}"),
            Err(why) => println!("{why}"),
        }
    }
}

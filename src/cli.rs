#[derive(clap::Parser, Debug)]
#[clap(about, long_about = None)]
pub(crate) struct Cli {
    /// Expression to evaluate; multiple words are joined with spaces.
    /// Reads expressions from stdin when omitted (type `exit` to quit).
    pub expression: Vec<String>,
}

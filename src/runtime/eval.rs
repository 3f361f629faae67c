use log::debug;

use crate::error::{CalcError, CResult};
use crate::runtime::value::Operand;
use crate::syntax::{ops, sort, tokenize, Token};

fn pop(stack: &mut Vec<Operand>) -> CResult<Operand> {
    stack
        .pop()
        .ok_or_else(|| CalcError::MathError("order of tokens is not a postfix".to_owned()))
}

/// Evaluates a postfix token sequence with a single operand stack.
pub(crate) fn evaluate(tokens: Vec<Token>) -> CResult<f64> {
    let mut stack: Vec<Operand> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(value) => stack.push(Operand::Number(value)),
            Token::UnaryOperator(symbol) => {
                let operand = pop(&mut stack)?;
                let Operand::Number(value) = operand else {
                    return Err(CalcError::OrderError(format!(
                        "unexpected operand {operand:?}"
                    )));
                };
                let function = ops::unary_function(symbol)?;
                stack.push(Operand::Number(function(value)));
            }
            Token::BinaryOperator { symbol, .. } => {
                // Top of stack is the right operand; order matters for
                // `-` and `/`.
                let right = pop(&mut stack)?;
                let left = pop(&mut stack)?;
                let (Operand::Number(a), Operand::Number(b)) = (&left, &right) else {
                    return Err(CalcError::OrderError(format!(
                        "{left:?} or {right:?} is not a number"
                    )));
                };
                let function = ops::binary_function(symbol)?;
                stack.push(Operand::Number(function(*a, *b)));
            }
            Token::Grouper => {
                let right = pop(&mut stack)?;
                let left = pop(&mut stack)?;
                let mut values = left.into_list();
                values.extend(right.into_list());
                stack.push(Operand::List(values));
            }
            Token::Function { name, arity } => {
                let args = pop(&mut stack)?.into_list();
                if arity != -1 && arity as usize != args.len() {
                    return Err(CalcError::MathError(format!(
                        "expected {arity} parameters, found {}",
                        args.len()
                    )));
                }
                stack.push(Operand::Number(ops::apply_function(&name, &args)?));
            }
            other => {
                return Err(CalcError::MathError(format!("unexpected token {other:?}")))
            }
        }
    }

    if stack.len() != 1 {
        return Err(CalcError::MathError(
            "order of tokens is not a postfix".to_owned(),
        ));
    }
    match stack.pop() {
        Some(Operand::Number(value)) => Ok(value),
        other => Err(CalcError::OrderError(format!(
            "unexpected operand {other:?}"
        ))),
    }
}

/// Evaluates an expression string to a number truncated (toward zero) to
/// four decimal places.
pub(crate) fn calculate(expression: &str) -> CResult<f64> {
    let tokens = tokenize(expression)?;
    debug!("tokens: {tokens:?}");

    let postfix = sort(tokens)?;
    debug!("postfix: {postfix:?}");

    let value = evaluate(postfix)?;
    Ok((value * 10000.0).trunc() / 10000.0)
}

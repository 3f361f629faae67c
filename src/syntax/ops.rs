use crate::error::{CalcError, CResult};

/// Priority of a binary operator as seen by the sorter. The comma grouper
/// sits below all of these at priority 1.
pub(crate) fn binary_priority(symbol: char) -> CResult<u8> {
    match symbol {
        '+' | '-' => Ok(2),
        '*' | '/' => Ok(3),
        '^' => Ok(4),
        other => Err(CalcError::MathError(format!(
            "unexpected operator {other}"
        ))),
    }
}

pub(crate) fn binary_function(symbol: char) -> CResult<fn(f64, f64) -> f64> {
    match symbol {
        '+' => Ok(|a, b| a + b),
        '-' => Ok(|a, b| a - b),
        '*' => Ok(|a, b| a * b),
        '/' => Ok(|a, b| a / b),
        '^' => Ok(f64::powf),
        other => Err(CalcError::MathError(format!(
            "unexpected operator {other}"
        ))),
    }
}

pub(crate) fn unary_function(symbol: char) -> CResult<fn(f64) -> f64> {
    match symbol {
        '-' => Ok(|a| -a),
        other => Err(CalcError::MathError(format!(
            "unexpected operator {other}"
        ))),
    }
}

/// Required argument count for a registered function; -1 means variadic.
pub(crate) fn function_arity(name: &str) -> CResult<i8> {
    match name {
        "log" => Ok(2),
        "floor" | "round" | "ceil" => Ok(1),
        other => Err(CalcError::MathError(format!("unexpected function {other}"))),
    }
}

/// Applies a registered function to an argument list whose length has
/// already been validated against [`function_arity`].
pub(crate) fn apply_function(name: &str, args: &[f64]) -> CResult<f64> {
    match (name, args) {
        ("log", [a, b]) => Ok(a.log(*b)),
        ("floor", [a]) => Ok(a.floor()),
        ("round", [a]) => Ok(a.round()),
        ("ceil", [a]) => Ok(a.ceil()),
        (other, _) => Err(CalcError::MathError(format!("unexpected function {other}"))),
    }
}

/// True for every character that starts an operator token, the comma
/// grouper included.
pub(crate) fn is_operator_symbol(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '^' | ',')
}

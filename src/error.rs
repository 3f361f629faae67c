use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone)]
pub(crate) enum CalcError {
    /// Lexical failure: unrecognized character, malformed numeric literal.
    ParseError(String),
    /// Grammatical failure: a token where the grammar does not allow one.
    OrderError(String),
    /// Semantic failure: unknown operator/function, arity mismatch,
    /// malformed postfix sequence.
    MathError(String),
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParseError(msg) | Self::OrderError(msg) | Self::MathError(msg) => {
                write!(f, "{msg}")
            }
        }
    }
}

pub(crate) type CResult<T> = Result<T, CalcError>;

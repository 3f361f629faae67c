use std::fmt;

use crate::error::CResult;
use crate::syntax::ops;

/// A single unit of a tokenized expression. Sequences produced by the lexer
/// always begin with `Start` and end with `End`; `NumberList` only exists
/// transiently while the evaluator collects function arguments.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Start,
    End,
    Number(f64),
    NumberList(Vec<f64>),
    BinaryOperator { symbol: char, priority: u8 },
    UnaryOperator(char),
    Function { name: String, arity: i8 },
    Grouper,
    OpenBracket,
    CloseBracket,
}

impl Token {
    /// Builds a binary operator token, failing with a `MathError` when the
    /// symbol is not registered.
    pub fn binary(symbol: char) -> CResult<Self> {
        Ok(Self::BinaryOperator {
            symbol,
            priority: ops::binary_priority(symbol)?,
        })
    }

    /// Builds a unary operator token, failing with a `MathError` when the
    /// symbol has no unary registration.
    pub fn unary(symbol: char) -> CResult<Self> {
        ops::unary_function(symbol)?;
        Ok(Self::UnaryOperator(symbol))
    }

    /// Builds a function token, failing with a `MathError` when the name is
    /// not registered.
    pub fn function(name: &str) -> CResult<Self> {
        Ok(Self::Function {
            name: name.to_owned(),
            arity: ops::function_arity(name)?,
        })
    }

    pub fn is_operand(&self) -> bool {
        matches!(self, Self::Number(_) | Self::NumberList(_))
    }

    /// Sorting priority. The grouper sits below every binary operator so it
    /// is never displaced by one during reordering.
    pub fn priority(&self) -> u8 {
        match self {
            Self::BinaryOperator { priority, .. } => *priority,
            Self::Grouper => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for Token {
    /// Canonical source text of the token; sentinels serialize to nothing.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start | Self::End => Ok(()),
            Self::Number(value) => write!(f, "{value}"),
            Self::NumberList(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{value}")?;
                }
                Ok(())
            }
            Self::BinaryOperator { symbol, .. } | Self::UnaryOperator(symbol) => {
                write!(f, "{symbol}")
            }
            Self::Function { name, .. } => write!(f, "{name}"),
            Self::Grouper => write!(f, ","),
            Self::OpenBracket => write!(f, "("),
            Self::CloseBracket => write!(f, ")"),
        }
    }
}

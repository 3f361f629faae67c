mod lexer;
pub(crate) mod ops;
mod sorter;
mod token;

pub(crate) use lexer::tokenize;
pub(crate) use sorter::sort;
pub(crate) use token::Token;

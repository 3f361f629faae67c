use crate::error::{CalcError, CResult};
use crate::syntax::{ops, token::Token};

/// Class of a pending token, fixed by its first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Number,
    Function,
    Operator,
    OpenBracket,
    CloseBracket,
}

impl CharClass {
    fn of(c: char) -> CResult<Self> {
        match c {
            'a'..='z' | 'A'..='Z' => Ok(Self::Function),
            '0'..='9' => Ok(Self::Number),
            '(' => Ok(Self::OpenBracket),
            ')' => Ok(Self::CloseBracket),
            c if ops::is_operator_symbol(c) => Ok(Self::Operator),
            other => Err(CalcError::ParseError(format!(
                "unexpected symbol {other}"
            ))),
        }
    }
}

struct Lexer {
    tokens: Vec<Token>,
    buffer: String,
    class: Option<CharClass>,
    seen_decimal_point: bool,
    expecting_operand: bool,
}

impl Lexer {
    fn new() -> Self {
        Self {
            tokens: vec![Token::Start],
            buffer: String::new(),
            class: None,
            seen_decimal_point: false,
            expecting_operand: true,
        }
    }

    /// Resets the accumulation state after a token is emitted. The
    /// expecting-operand flag is managed separately by each handler.
    fn clear(&mut self) {
        self.buffer.clear();
        self.class = None;
        self.seen_decimal_point = false;
    }

    fn step(&mut self, class: CharClass, current: char, next: Option<char>) -> CResult<()> {
        match class {
            CharClass::OpenBracket => {
                self.tokens.push(Token::OpenBracket);
                self.clear();
                self.expecting_operand = true;
            }
            CharClass::CloseBracket => {
                self.tokens.push(Token::CloseBracket);
                self.clear();
                self.expecting_operand = false;
            }
            CharClass::Operator => {
                if self.expecting_operand {
                    // `1 + -2`: a minus in operand position is unary, and
                    // each of `--2`'s minuses gets its own token.
                    self.tokens.push(Token::unary(current)?);
                    self.clear();
                } else {
                    if current == ',' {
                        self.tokens.push(Token::Grouper);
                    } else {
                        self.tokens.push(Token::binary(current)?);
                    }
                    self.clear();
                    self.expecting_operand = true;
                }
            }
            CharClass::Number => {
                if !self.expecting_operand {
                    return Err(CalcError::OrderError("unexpected number".to_owned()));
                }
                self.buffer.push(current);
                if next == Some('.') {
                    if self.seen_decimal_point {
                        return Err(CalcError::ParseError(
                            "unexpected floating point".to_owned(),
                        ));
                    }
                    self.seen_decimal_point = true;
                } else if !next_continues_number(next) {
                    let value: f64 = self.buffer.parse().map_err(|_| {
                        CalcError::ParseError(format!("invalid number literal {}", self.buffer))
                    })?;
                    self.tokens.push(Token::Number(value));
                    self.clear();
                    self.expecting_operand = false;
                }
            }
            CharClass::Function => {
                self.buffer.push(current);
                if !next_continues_function(next) {
                    self.tokens.push(Token::function(&self.buffer)?);
                    self.clear();
                    self.expecting_operand = false;
                }
            }
        }
        Ok(())
    }
}

fn next_continues_number(next: Option<char>) -> bool {
    matches!(next, Some(c) if c.is_ascii_digit() || c == '.')
}

fn next_continues_function(next: Option<char>) -> bool {
    matches!(next, Some(c) if c.is_ascii_alphanumeric())
}

/// Turns an expression string into a token sequence bounded by the start and
/// end sentinels. Whitespace is insignificant; the first invalid character
/// aborts the scan.
pub(crate) fn tokenize(input: &str) -> CResult<Vec<Token>> {
    let stripped: Vec<char> = input.chars().filter(|c| !c.is_whitespace()).collect();
    let mut lexer = Lexer::new();

    for (i, &current) in stripped.iter().enumerate() {
        let next = stripped.get(i + 1).copied();
        let class = match lexer.class {
            Some(class) => class,
            None => {
                let class = CharClass::of(current)?;
                lexer.class = Some(class);
                class
            }
        };
        lexer.step(class, current, next)?;
    }

    lexer.tokens.push(Token::End);
    Ok(lexer.tokens)
}

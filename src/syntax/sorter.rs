use crate::error::{CalcError, CResult};
use crate::syntax::token::Token;

/// Action selected by the dispatch table for one (current token, stack top)
/// pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Push the current token straight to the result (numbers only).
    ToResult,
    /// Push the current token onto the inner stack.
    ToInner,
    /// Pop the inner-stack top into the result; the current token is
    /// re-examined afterwards, so one token can cascade several flushes.
    FlushTop,
    /// Drop a matched bracket pair without writing to the result.
    RemovePair,
    /// Terminal: the end sentinel met the start sentinel.
    End,
}

struct Sorter {
    result: Vec<Token>,
    inner: Vec<Token>,
    operands: usize,
    operators: usize,
    expecting_operand: bool,
    complete: bool,
    index: usize,
}

impl Sorter {
    fn new() -> Self {
        Self {
            result: Vec::new(),
            inner: Vec::new(),
            operands: 0,
            operators: 0,
            expecting_operand: true,
            complete: false,
            index: 0,
        }
    }

    /// Grammar check, run once per cursor position: may an operand/operator
    /// of this kind appear here at all?
    fn check_order(&mut self, token: &Token) -> CResult<()> {
        match token {
            Token::Number(_) | Token::NumberList(_) => {
                if !self.expecting_operand {
                    return Err(CalcError::OrderError(format!(
                        "unexpected operand {token:?}"
                    )));
                }
                self.expecting_operand = false;
            }
            Token::BinaryOperator { .. } | Token::Grouper => {
                if self.expecting_operand {
                    return Err(CalcError::OrderError(format!(
                        "unexpected operator {token:?}"
                    )));
                }
                self.expecting_operand = true;
            }
            Token::UnaryOperator(_) | Token::Function { .. } => {
                if !self.expecting_operand {
                    return Err(CalcError::OrderError(format!(
                        "unexpected operator {token:?}"
                    )));
                }
            }
            Token::OpenBracket => {
                if !self.expecting_operand {
                    return Err(CalcError::OrderError(format!(
                        "unexpected token {token:?}"
                    )));
                }
            }
            Token::CloseBracket => {
                if self.expecting_operand {
                    return Err(CalcError::OrderError(format!(
                        "unexpected token {token:?}"
                    )));
                }
            }
            Token::End => {
                if self.expecting_operand {
                    return Err(CalcError::OrderError("unexpected end".to_owned()));
                }
            }
            Token::Start => (),
        }
        Ok(())
    }

    /// Writes a token to the postfix result, keeping the running
    /// operand/operator counts consistent.
    fn push_to_result(&mut self, token: Token) -> CResult<()> {
        if token.is_operand() {
            self.result.push(token);
            self.operands += 1;
        } else {
            match token {
                Token::BinaryOperator { .. } | Token::Grouper => {
                    if self.operands < self.operators + 1 {
                        return Err(CalcError::OrderError(format!(
                            "unexpected operator {token:?}"
                        )));
                    }
                    self.result.push(token);
                    self.operators += 1;
                }
                Token::UnaryOperator(_) | Token::Function { .. } => {
                    if self.operands < 1 {
                        return Err(CalcError::OrderError(format!(
                            "unexpected operator {token:?}"
                        )));
                    }
                    self.result.push(token);
                }
                other => {
                    return Err(CalcError::OrderError(format!("forbidden token {other:?}")))
                }
            }
        }
        Ok(())
    }

    fn run(&mut self, command: Command, token: &Token) -> CResult<()> {
        match command {
            Command::ToResult => {
                self.push_to_result(token.clone())?;
                self.index += 1;
            }
            Command::ToInner => {
                self.inner.push(token.clone());
                self.index += 1;
            }
            Command::FlushTop => {
                let top = self
                    .inner
                    .pop()
                    .ok_or_else(|| CalcError::OrderError("operator stack is empty".to_owned()))?;
                self.push_to_result(top)?;
            }
            Command::RemovePair => {
                self.inner.pop();
                self.index += 1;
            }
            Command::End => {
                self.complete = true;
            }
        }
        Ok(())
    }

    /// Releases the postfix sequence; a well-formed expression reduces to
    /// exactly one value, so the counts must differ by one.
    fn into_result(self) -> CResult<Vec<Token>> {
        if self.operands != self.operators + 1 {
            return Err(CalcError::OrderError(
                "the number of operators does not match the number of operands".to_owned(),
            ));
        }
        Ok(self.result)
    }
}

/// Dispatch table keyed on the current token and the inner-stack top.
fn command_for(current: &Token, top: Option<&Token>) -> CResult<Command> {
    match current {
        Token::Start => Ok(Command::ToInner),
        Token::End => match top {
            Some(Token::Start) => Ok(Command::End),
            Some(
                Token::BinaryOperator { .. }
                | Token::Grouper
                | Token::UnaryOperator(_)
                | Token::Function { .. },
            ) => Ok(Command::FlushTop),
            _ => Err(CalcError::OrderError(format!(
                "unexpected token {current:?}"
            ))),
        },
        Token::BinaryOperator { .. } | Token::Grouper => match top {
            Some(Token::Start | Token::OpenBracket) => Ok(Command::ToInner),
            Some(Token::UnaryOperator(_) | Token::Function { .. }) => Ok(Command::FlushTop),
            Some(t @ (Token::BinaryOperator { .. } | Token::Grouper)) => {
                // Strict greater-than: an equal-priority top flushes first,
                // which keeps equal-priority chains left-associative.
                if current.priority() > t.priority() {
                    Ok(Command::ToInner)
                } else {
                    Ok(Command::FlushTop)
                }
            }
            _ => Err(CalcError::OrderError(format!(
                "unexpected token {current:?}"
            ))),
        },
        Token::UnaryOperator(_) | Token::Function { .. } => Ok(Command::ToInner),
        Token::Number(_) => Ok(Command::ToResult),
        Token::OpenBracket => Ok(Command::ToInner),
        Token::CloseBracket => match top {
            Some(
                Token::BinaryOperator { .. }
                | Token::Grouper
                | Token::UnaryOperator(_)
                | Token::Function { .. },
            ) => Ok(Command::FlushTop),
            Some(Token::OpenBracket) => Ok(Command::RemovePair),
            _ => Err(CalcError::OrderError(format!(
                "unexpected token {current:?}"
            ))),
        },
        _ => Err(CalcError::OrderError(format!(
            "unexpected token {current:?}"
        ))),
    }
}

/// Reorders an infix token sequence to postfix (reverse Polish) order,
/// validating the grammar along the way. The sentinels are consumed and do
/// not appear in the output.
pub(crate) fn sort(tokens: Vec<Token>) -> CResult<Vec<Token>> {
    if tokens.first() != Some(&Token::Start) {
        return Err(CalcError::OrderError(
            "first token is not a start sentinel".to_owned(),
        ));
    }
    if tokens.last() != Some(&Token::End) {
        return Err(CalcError::OrderError(
            "last token is not an end sentinel".to_owned(),
        ));
    }

    let mut state = Sorter::new();
    state.inner.push(Token::Start);
    state.index = 1;

    // A flush leaves the cursor in place so the same token drives the next
    // round; the grammar check must not fire again for it.
    let mut checked = 0;
    while !state.complete {
        let token = tokens
            .get(state.index)
            .ok_or_else(|| CalcError::OrderError("unexpected end of tokens".to_owned()))?;
        let command = command_for(token, state.inner.last())?;
        if checked != state.index {
            state.check_order(token)?;
            checked = state.index;
        }
        state.run(command, token)?;
    }
    state.into_result()
}

#[cfg(test)]
mod test {
    use super::sort;
    use crate::error::CalcError;
    use crate::syntax::token::Token;

    fn num(value: f64) -> Token {
        Token::Number(value)
    }

    fn bin(symbol: char) -> Token {
        Token::binary(symbol).unwrap()
    }

    #[test]
    fn binary_operators_and_unary_minus() {
        // 1 + -2 * 3 - 4
        let start = vec![
            Token::Start,
            num(1.0),
            bin('+'),
            Token::UnaryOperator('-'),
            num(2.0),
            bin('*'),
            num(3.0),
            bin('-'),
            num(4.0),
            Token::End,
        ];
        // 1 2 - 3 * + 4 -
        let expected = vec![
            num(1.0),
            num(2.0),
            Token::UnaryOperator('-'),
            num(3.0),
            bin('*'),
            bin('+'),
            num(4.0),
            bin('-'),
        ];
        assert_eq!(sort(start).unwrap(), expected);
    }

    #[test]
    fn nested_brackets_cascade() {
        // 1 + 2 * (3 + 4 - (5 + 6)) / 7 ^ 8
        let start = vec![
            Token::Start,
            num(1.0),
            bin('+'),
            num(2.0),
            bin('*'),
            Token::OpenBracket,
            num(3.0),
            bin('+'),
            num(4.0),
            bin('-'),
            Token::OpenBracket,
            num(5.0),
            bin('+'),
            num(6.0),
            Token::CloseBracket,
            Token::CloseBracket,
            bin('/'),
            num(7.0),
            bin('^'),
            num(8.0),
            Token::End,
        ];
        // 1 2 3 4 + 5 6 + - * 7 8 ^ / +
        let expected = vec![
            num(1.0),
            num(2.0),
            num(3.0),
            num(4.0),
            bin('+'),
            num(5.0),
            num(6.0),
            bin('+'),
            bin('-'),
            bin('*'),
            num(7.0),
            num(8.0),
            bin('^'),
            bin('/'),
            bin('+'),
        ];
        assert_eq!(sort(start).unwrap(), expected);
    }

    #[test]
    fn functions_follow_their_arguments() {
        // floor(1/2) + ceil(3/4)
        let start = vec![
            Token::Start,
            Token::function("floor").unwrap(),
            Token::OpenBracket,
            num(1.0),
            bin('/'),
            num(2.0),
            Token::CloseBracket,
            bin('+'),
            Token::function("ceil").unwrap(),
            Token::OpenBracket,
            num(3.0),
            bin('/'),
            num(4.0),
            Token::CloseBracket,
            Token::End,
        ];
        // 1 2 / floor 3 4 / ceil +
        let expected = vec![
            num(1.0),
            num(2.0),
            bin('/'),
            Token::function("floor").unwrap(),
            num(3.0),
            num(4.0),
            bin('/'),
            Token::function("ceil").unwrap(),
            bin('+'),
        ];
        assert_eq!(sort(start).unwrap(), expected);
    }

    #[test]
    fn grouped_function_arguments() {
        // log(1, 2)
        let start = vec![
            Token::Start,
            Token::function("log").unwrap(),
            Token::OpenBracket,
            num(1.0),
            Token::Grouper,
            num(2.0),
            Token::CloseBracket,
            Token::End,
        ];
        // 1 2 , log
        let expected = vec![
            num(1.0),
            num(2.0),
            Token::Grouper,
            Token::function("log").unwrap(),
        ];
        assert_eq!(sort(start).unwrap(), expected);
    }

    #[test]
    fn missing_start_sentinel_is_rejected() {
        let start = vec![num(1.0), bin('+'), num(1.0), Token::End];
        assert!(matches!(sort(start), Err(CalcError::OrderError(_))));
    }

    #[test]
    fn missing_end_sentinel_is_rejected() {
        let start = vec![Token::Start, num(1.0), bin('+'), num(1.0)];
        assert!(matches!(sort(start), Err(CalcError::OrderError(_))));
    }

    #[test]
    fn misplaced_binary_operators_are_rejected() {
        let sequences = vec![
            // 1 + + 1
            vec![
                Token::Start,
                num(1.0),
                bin('+'),
                bin('+'),
                num(1.0),
                Token::End,
            ],
            // + 2
            vec![Token::Start, bin('+'), num(2.0), Token::End],
            // 3 +
            vec![Token::Start, num(3.0), bin('+'), Token::End],
        ];
        for start in sequences {
            assert!(matches!(sort(start), Err(CalcError::OrderError(_))));
        }
    }

    #[test]
    fn unpaired_brackets_are_rejected() {
        // ((35 + 10)
        let missing_close = vec![
            Token::Start,
            Token::OpenBracket,
            Token::OpenBracket,
            num(35.0),
            bin('+'),
            num(10.0),
            Token::CloseBracket,
            Token::End,
        ];
        assert!(matches!(
            sort(missing_close),
            Err(CalcError::OrderError(_))
        ));

        // (24 * 54))
        let extra_close = vec![
            Token::Start,
            Token::OpenBracket,
            num(24.0),
            bin('*'),
            num(54.0),
            Token::CloseBracket,
            Token::CloseBracket,
            Token::End,
        ];
        assert!(matches!(sort(extra_close), Err(CalcError::OrderError(_))));
    }

    #[test]
    fn equal_priority_chains_stay_left_associative() {
        // 8 - 3 - 2  =>  8 3 - 2 -
        let start = vec![
            Token::Start,
            num(8.0),
            bin('-'),
            num(3.0),
            bin('-'),
            num(2.0),
            Token::End,
        ];
        let expected = vec![num(8.0), num(3.0), bin('-'), num(2.0), bin('-')];
        assert_eq!(sort(start).unwrap(), expected);
    }
}

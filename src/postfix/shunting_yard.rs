use crate::ast::{Operator, UnaryOperator};
use crate::error::{CalcError, CalcResult};
use crate::postfix::Instruction;
use crate::tokenizer::Token;
use log::trace;

#[derive(Debug, Copy, Clone)]
enum Pending {
    Binary(Operator),
    Unary(UnaryOperator),
    /// Byte offset of the `(`.
    Open(usize),
}

/// Converts infix tokens to a postfix program with the shunting-yard algorithm.
///
/// A `+` or `-` at the start, after another operator or after `(` is a prefix
/// sign. Signs bind tighter than any binary operator and nest to the right.
///
/// Tokens are checked against the operand/operator alternation as they are
/// read, so a program returned from here always leaves exactly one value on
/// the `Executor` stack. Syntax errors match the ones recursive descent reports
/// for the same tokens.
pub fn to_postfix(tokens: &[(Token, usize)]) -> CalcResult<Vec<Instruction>> {
    if tokens.is_empty() {
        return Err(CalcError::EmptyExpression);
    }

    let mut output = Vec::with_capacity(tokens.len());
    let mut pending: Vec<Pending> = Vec::new();
    let mut expect_operand = true;

    for &(token, position) in tokens {
        match token {
            Token::Number(value) if expect_operand => {
                output.push(Instruction::Push(value));
                expect_operand = false;
            }
            Token::LeftParen if expect_operand => {
                pending.push(Pending::Open(position));
            }
            Token::Number(_) | Token::LeftParen => {
                return Err(match innermost_open(&pending) {
                    Some(open) => CalcError::UnbalancedParentheses { position: open },
                    None => CalcError::TrailingTokens { token, position },
                });
            }
            Token::Operator(operator) if expect_operand => {
                let sign = UnaryOperator::try_from(operator)
                    .map_err(|_| CalcError::UnexpectedToken { token, position })?;
                pending.push(Pending::Unary(sign));
            }
            Token::Operator(operator) => {
                while let Some(&top) = pending.last() {
                    match top {
                        Pending::Unary(_) => {}
                        Pending::Binary(previous)
                            if previous.precedence() >= operator.precedence() => {}
                        _ => break,
                    }
                    pending.pop();
                    emit(top, &mut output);
                }
                pending.push(Pending::Binary(operator));
                expect_operand = true;
            }
            Token::RightParen if expect_operand => {
                return Err(CalcError::UnexpectedToken { token, position });
            }
            Token::RightParen => loop {
                match pending.pop() {
                    Some(Pending::Open(_)) => break,
                    Some(top) => emit(top, &mut output),
                    None => return Err(CalcError::UnbalancedParentheses { position }),
                }
            },
        }
    }

    if expect_operand {
        return Err(CalcError::UnexpectedEndOfExpression);
    }

    while let Some(top) = pending.pop() {
        if let Pending::Open(position) = top {
            return Err(CalcError::UnbalancedParentheses { position });
        }
        emit(top, &mut output);
    }

    trace!("Postfix program: {}", super::render(&output));
    Ok(output)
}

fn innermost_open(pending: &[Pending]) -> Option<usize> {
    pending.iter().rev().find_map(|entry| match entry {
        Pending::Open(position) => Some(*position),
        _ => None,
    })
}

fn emit(pending: Pending, output: &mut Vec<Instruction>) {
    match pending {
        Pending::Binary(operator) => output.push(Instruction::Binary(operator)),
        Pending::Unary(UnaryOperator::Minus) => output.push(Instruction::Negate),
        Pending::Unary(UnaryOperator::Plus) | Pending::Open(_) => {}
    }
}

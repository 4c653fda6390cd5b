use crate::tokenizer::Token;
use thiserror::Error;

/// Every way a `calculate` call can fail.
///
/// Positions are byte offsets into the expression string.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Empty expression")]
    EmptyExpression,

    #[error("Invalid character '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("Invalid number format '{literal}' at position {position}")]
    InvalidNumberFormat { literal: String, position: usize },

    #[error("Unbalanced parentheses at position {position}")]
    UnbalancedParentheses { position: usize },

    #[error("Unexpected token '{token}' at position {position}")]
    UnexpectedToken { token: Token, position: usize },

    #[error("Unexpected end of expression")]
    UnexpectedEndOfExpression,

    #[error("Unexpected trailing token '{token}' at position {position}")]
    TrailingTokens { token: Token, position: usize },

    #[error("Malformed expression: {details}")]
    MalformedExpression { details: String },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Expression nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}

pub type CalcResult<T> = Result<T, CalcError>;

use crate::ast::Operator;
use std::fmt;

mod lexer;

pub use lexer::{tokenize, tokenize_spanned};

/// A lexical unit of an arithmetic expression.
///
/// Numbers are never signed here; a leading `-` is a separate operator token
/// and the parsers decide whether it is unary or binary.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Operator(Operator),
    LeftParen,
    RightParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(value) => write!(f, "{}", value),
            Token::Operator(operator) => write!(f, "{}", operator),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
        }
    }
}

use crate::error::{CalcError, CalcResult};
use std::fmt;

mod evaluator;
mod parser;

pub use evaluator::{Evaluate, Evaluator};
pub use parser::{BuildAst, Parser, Reducer, DEFAULT_MAX_DEPTH};

#[derive(Debug, Clone, PartialEq)]
pub enum ASTNode {
    Number(f64),
    UnaryOperation {
        operator: UnaryOperator,
        operand: Box<ASTNode>,
    },
    BinaryOperation {
        left: Box<ASTNode>,
        operator: Operator,
        right: Box<ASTNode>,
    },
    Group(Box<ASTNode>),
}

/// Renders a parsed tree back to infix text which parses to the same tree.
impl fmt::Display for ASTNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ASTNode::Number(value) => write!(f, "{}", value),
            ASTNode::UnaryOperation { operator, operand } => write!(f, "{}{}", operator, operand),
            ASTNode::BinaryOperation {
                left,
                operator,
                right,
            } => write!(f, "{} {} {}", left, operator, right),
            ASTNode::Group(inner) => write!(f, "({})", inner),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Plus,
    Minus,
}

impl UnaryOperator {
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            UnaryOperator::Plus => value,
            UnaryOperator::Minus => -value,
        }
    }
}

impl TryFrom<Operator> for UnaryOperator {
    type Error = Operator;

    fn try_from(value: Operator) -> Result<Self, Self::Error> {
        match value {
            Operator::Add => Ok(UnaryOperator::Plus),
            Operator::Subtract => Ok(UnaryOperator::Minus),
            other => Err(other),
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOperator::Plus => write!(f, "+"),
            UnaryOperator::Minus => write!(f, "-"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Binding strength; every binary operator is left-associative.
    pub fn precedence(&self) -> u8 {
        match self {
            Operator::Add | Operator::Subtract => 1,
            Operator::Multiply | Operator::Divide => 2,
        }
    }

    pub fn apply(&self, left: f64, right: f64) -> CalcResult<f64> {
        match self {
            Operator::Add => Ok(left + right),
            Operator::Subtract => Ok(left - right),
            Operator::Multiply => Ok(left * right),
            Operator::Divide => {
                if right == 0.0 {
                    Err(CalcError::DivisionByZero)
                } else {
                    Ok(left / right)
                }
            }
        }
    }
}

impl TryFrom<char> for Operator {
    type Error = String;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '+' => Ok(Operator::Add),
            '-' => Ok(Operator::Subtract),
            '*' => Ok(Operator::Multiply),
            '/' => Ok(Operator::Divide),
            _ => Err(format!("Unknown operator: {}", value)),
        }
    }
}

impl TryFrom<&str> for Operator {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(symbol), None) => Operator::try_from(symbol),
            _ => Err(format!("Unknown operator: {}", value)),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
        };
        write!(f, "{}", symbol)
    }
}

use crate::ast::Operator;
use std::fmt;

mod compiler;
mod executor;
mod shunting_yard;

pub use compiler::Compiler;
pub use executor::Executor;
pub use shunting_yard::to_postfix;

/// One step of a postfix (reverse Polish) program.
///
/// Unary plus has no instruction of its own.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Instruction {
    Push(f64),
    Binary(Operator),
    Negate,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Push(value) => write!(f, "{}", value),
            Instruction::Binary(operator) => write!(f, "{}", operator),
            Instruction::Negate => write!(f, "neg"),
        }
    }
}

/// Space separated RPN text, e.g. `2 3 4 * +`.
pub fn render(program: &[Instruction]) -> String {
    program
        .iter()
        .map(|instruction| instruction.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

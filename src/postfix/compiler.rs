use crate::ast::{ASTNode, Parser, UnaryOperator};
use crate::error::CalcResult;
use crate::postfix::Instruction;

pub struct Compiler;

impl Compiler {
    pub fn compile(ast: &ASTNode) -> Vec<Instruction> {
        let mut instructions = Vec::new();
        Self::compile_node(ast, &mut instructions);
        instructions
    }

    pub fn compile_expression(expression: &str) -> CalcResult<Vec<Instruction>> {
        let ast = Parser::parse(expression)?;
        Ok(Self::compile(&ast))
    }

    fn compile_node(node: &ASTNode, instructions: &mut Vec<Instruction>) {
        match node {
            ASTNode::Number(value) => instructions.push(Instruction::Push(*value)),
            ASTNode::UnaryOperation { operator, operand } => {
                Self::compile_node(operand, instructions);
                if *operator == UnaryOperator::Minus {
                    instructions.push(Instruction::Negate);
                }
            }
            ASTNode::BinaryOperation {
                left,
                operator,
                right,
            } => {
                Self::compile_node(left, instructions);
                Self::compile_node(right, instructions);
                instructions.push(Instruction::Binary(*operator));
            }
            ASTNode::Group(inner) => Self::compile_node(inner, instructions),
        }
    }
}

use crate::error::{CalcError, CalcResult};
use crate::postfix::{to_postfix, Instruction};
use crate::tokenizer::tokenize_spanned;

/// Stack machine for postfix programs. The operand stack lives only for the
/// duration of one `execute` call.
#[derive(Debug, Default, Copy, Clone)]
pub struct Executor;

impl Executor {
    pub fn new() -> Self {
        Self
    }

    pub fn execute_expression(&self, expression: &str) -> CalcResult<f64> {
        let tokens = tokenize_spanned(expression)?;
        let program = to_postfix(&tokens)?;
        self.execute(&program)
    }

    pub fn execute(&self, program: &[Instruction]) -> CalcResult<f64> {
        let mut stack: Vec<f64> = Vec::with_capacity(program.len());

        for instruction in program {
            match instruction {
                Instruction::Push(value) => stack.push(*value),
                Instruction::Negate => {
                    let value = pop_operand(&mut stack, instruction)?;
                    stack.push(-value);
                }
                Instruction::Binary(operator) => {
                    let right = pop_operand(&mut stack, instruction)?;
                    let left = pop_operand(&mut stack, instruction)?;
                    stack.push(operator.apply(left, right)?);
                }
            }
        }

        match stack.as_slice() {
            [result] => Ok(*result),
            [] => Err(CalcError::MalformedExpression {
                details: "expression produced no value".to_string(),
            }),
            values => Err(CalcError::MalformedExpression {
                details: format!("{} values left without an operator", values.len()),
            }),
        }
    }
}

fn pop_operand(stack: &mut Vec<f64>, instruction: &Instruction) -> CalcResult<f64> {
    stack
        .pop()
        .ok_or_else(|| CalcError::MalformedExpression {
            details: format!("'{}' is missing an operand", instruction),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Operator;

    fn execute(expression: &str) -> CalcResult<f64> {
        Executor::new().execute_expression(expression)
    }

    #[test]
    fn test_execute_simple_arithmetic_expression() {
        assert_eq!(execute("3 + 5"), Ok(8.0));
        assert_eq!(execute("2 + 3 * 4"), Ok(14.0));
        assert_eq!(execute("10 - 2 - 3"), Ok(5.0));
        assert_eq!(execute("20 / 2 / 5"), Ok(2.0));
    }

    #[test]
    fn test_execute_nested_grouped_expression() {
        assert_eq!(execute("((3 + 2) * (4 - 1)) / 5"), Ok(3.0));
        assert_eq!(execute("(2 + 3) * 4"), Ok(20.0));
    }

    #[test]
    fn test_execute_unary_minus() {
        assert_eq!(execute("-5 + 3"), Ok(-2.0));
        assert_eq!(execute("--5"), Ok(5.0));
        assert_eq!(execute("-(2 + 3) * -2"), Ok(10.0));
    }

    #[test]
    fn test_execute_division_by_zero() {
        assert_eq!(execute("10 / 0"), Err(CalcError::DivisionByZero));
        assert_eq!(execute("1 / (3 - 3)"), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_execute_syntax_errors_from_conversion() {
        assert_eq!(execute("2 +"), Err(CalcError::UnexpectedEndOfExpression));
        assert!(matches!(
            execute("2 3 +"),
            Err(CalcError::TrailingTokens { position: 2, .. })
        ));
        assert!(matches!(
            execute("* 2 3"),
            Err(CalcError::UnexpectedToken { position: 0, .. })
        ));
    }

    #[test]
    fn test_execute_missing_operand() {
        let program = [Instruction::Push(2.0), Instruction::Binary(Operator::Add)];
        assert_eq!(
            Executor::new().execute(&program),
            Err(CalcError::MalformedExpression {
                details: "'+' is missing an operand".to_string()
            })
        );
        assert_eq!(
            Executor::new().execute(&[Instruction::Negate]),
            Err(CalcError::MalformedExpression {
                details: "'neg' is missing an operand".to_string()
            })
        );
    }

    #[test]
    fn test_execute_too_many_values() {
        let program = [Instruction::Push(2.0), Instruction::Push(3.0)];
        assert_eq!(
            Executor::new().execute(&program),
            Err(CalcError::MalformedExpression {
                details: "2 values left without an operator".to_string()
            })
        );
    }

    #[test]
    fn test_execute_no_value() {
        assert_eq!(
            Executor::new().execute(&[]),
            Err(CalcError::MalformedExpression {
                details: "expression produced no value".to_string()
            })
        );
    }

    #[test]
    fn test_execute_program_directly() {
        let program = [
            Instruction::Push(1.5),
            Instruction::Push(2.0),
            Instruction::Binary(Operator::Multiply),
            Instruction::Negate,
        ];
        assert_eq!(Executor::new().execute(&program), Ok(-3.0));
    }

    #[test]
    fn test_execute_empty_expression() {
        assert_eq!(execute(" "), Err(CalcError::EmptyExpression));
    }
}

use crate::ast::{ASTNode, Operator, Parser, Reducer, UnaryOperator, DEFAULT_MAX_DEPTH};
use crate::error::CalcResult;
use crate::tokenizer::tokenize_spanned;

/// Folds productions straight into numbers while parsing.
#[derive(Debug, Default, Copy, Clone)]
pub struct Evaluate;

impl Reducer for Evaluate {
    type Output = f64;

    fn number(&self, value: f64) -> f64 {
        value
    }

    fn unary(&self, operator: UnaryOperator, operand: f64) -> f64 {
        operator.apply(operand)
    }

    fn binary(&self, left: f64, operator: Operator, right: f64) -> CalcResult<f64> {
        operator.apply(left, right)
    }

    fn group(&self, inner: f64) -> f64 {
        inner
    }
}

/// Walks an already built `ASTNode` tree.
#[derive(Debug, Default, Copy, Clone)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluates an expression string without building a tree.
    ///
    /// # Returns
    ///
    /// * `Ok(f64)` if the expression is valid.
    /// * `Err(CalcError)` for the first lexical, syntax or arithmetic error met
    ///   while reading left to right.
    pub fn evaluate_expression(&self, expression: &str) -> CalcResult<f64> {
        let tokens = tokenize_spanned(expression)?;
        Parser::reduce(&tokens, Evaluate, Some(DEFAULT_MAX_DEPTH))
    }

    pub fn evaluate(&self, ast: &ASTNode) -> CalcResult<f64> {
        match ast {
            ASTNode::Number(value) => Ok(*value),
            ASTNode::UnaryOperation { operator, operand } => {
                Ok(operator.apply(self.evaluate(operand)?))
            }
            ASTNode::BinaryOperation {
                left,
                operator,
                right,
            } => {
                let left_value = self.evaluate(left)?;
                let right_value = self.evaluate(right)?;
                operator.apply(left_value, right_value)
            }
            ASTNode::Group(inner) => self.evaluate(inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;

    fn evaluate(expression: &str) -> CalcResult<f64> {
        Evaluator::new().evaluate_expression(expression)
    }

    fn evaluate_tree(expression: &str) -> CalcResult<f64> {
        Evaluator::new().evaluate(&Parser::parse(expression)?)
    }

    #[test]
    fn test_simple_arithmetic() {
        assert_eq!(evaluate("2 + 3"), Ok(5.0));
        assert_eq!(evaluate("10 - 5"), Ok(5.0));
        assert_eq!(evaluate("6 * 7"), Ok(42.0));
        assert_eq!(evaluate("9 / 3"), Ok(3.0));
    }

    #[test]
    fn test_complex_arithmetic() {
        assert_eq!(evaluate("2 + 3 * 4 - 5 / 5"), Ok(13.0));
        assert_eq!(evaluate("((3 + 2) * (4 - 1)) / 5"), Ok(3.0));
        assert_eq!(evaluate("((10 * (5 + 3)) / 4) - (2 * ((6 / 3) + (7 - 5)))"), Ok(12.0));
    }

    #[test]
    fn test_unary_signs() {
        assert_eq!(evaluate("-5 + 3"), Ok(-2.0));
        assert_eq!(evaluate("--5"), Ok(5.0));
        assert_eq!(evaluate("+-5"), Ok(-5.0));
        assert_eq!(evaluate("2 * -3"), Ok(-6.0));
        assert_eq!(evaluate("-(2 + 3) * 2"), Ok(-10.0));
        assert_eq!(evaluate("2 - -2"), Ok(4.0));
    }

    #[test]
    fn test_division_by_zero_is_raised_before_later_syntax_errors() {
        assert_eq!(evaluate("5 / 0"), Err(CalcError::DivisionByZero));
        assert_eq!(evaluate("5 / (2 - 2)"), Err(CalcError::DivisionByZero));
        assert_eq!(evaluate("5 / 0 +"), Err(CalcError::DivisionByZero));
        assert_eq!(evaluate("5 / 0 )"), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_tree_evaluation_checks_syntax_first() {
        assert_eq!(evaluate_tree("5 / 0"), Err(CalcError::DivisionByZero));
        assert_eq!(
            evaluate_tree("5 / 0 +"),
            Err(CalcError::UnexpectedEndOfExpression)
        );
    }

    #[test]
    fn test_tree_and_direct_evaluation_agree() {
        for expression in [
            "1.5 * 2",
            "20 / 2 / 5",
            "10 - 2 - 3",
            "(2 + 3) * 4",
            "-(-(-1)) * .5",
            "7 / 3 * 3",
        ] {
            assert_eq!(evaluate(expression), evaluate_tree(expression), "{expression}");
        }
    }

    #[test]
    fn test_direct_ast() {
        let ast = ASTNode::BinaryOperation {
            left: Box::new(ASTNode::UnaryOperation {
                operator: UnaryOperator::Minus,
                operand: Box::new(ASTNode::Number(4.0)),
            }),
            operator: Operator::Divide,
            right: Box::new(ASTNode::Group(Box::new(ASTNode::Number(8.0)))),
        };
        assert_eq!(Evaluator::new().evaluate(&ast), Ok(-0.5));
    }
}

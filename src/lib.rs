//! Infix arithmetic expression evaluation.
//!
//! Expressions use `+ - * /`, parentheses, unary signs and decimal literals,
//! and evaluate to an `f64`. Two equivalent evaluation strategies are provided:
//! recursive descent (the default) and shunting-yard to postfix.
//!
//! ```
//! assert_eq!(calcrs::calculate("2 + 3 * 4"), Ok(14.0));
//! assert!(calcrs::calculate("5 / 0").is_err());
//! ```

pub mod ast;
pub mod calculator;
pub mod error;
pub mod postfix;
pub mod tokenizer;

pub use calculator::{Calculator, CalculatorConfig, Strategy};
pub use error::{CalcError, CalcResult};

/// Evaluates `expression` with the default recursive descent calculator.
pub fn calculate(expression: &str) -> CalcResult<f64> {
    Calculator::default().calculate(expression)
}

/// Evaluates a batch of expressions in parallel, keeping the input order.
pub fn calculate_many<S>(expressions: &[S]) -> Vec<CalcResult<f64>>
where
    S: AsRef<str> + Sync,
{
    Calculator::default().calculate_many(expressions)
}

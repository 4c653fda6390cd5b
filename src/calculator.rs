use crate::ast::{ASTNode, Evaluate, Parser, DEFAULT_MAX_DEPTH};
use crate::error::CalcResult;
use crate::postfix::{to_postfix, Executor, Instruction};
use crate::tokenizer::tokenize_spanned;
use log::debug;
use rayon::prelude::*;

/// How `Calculator::calculate` turns tokens into a number.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Evaluate while parsing, one production at a time.
    #[default]
    RecursiveDescent,
    /// Convert to postfix with the shunting-yard algorithm, then run it on a stack.
    Postfix,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CalculatorConfig {
    pub strategy: Strategy,
    /// Parenthesis and sign nesting allowed in recursive descent.
    /// `None` removes the limit. Ignored by `Strategy::Postfix`, which does
    /// not recurse.
    pub max_depth: Option<usize>,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

impl CalculatorConfig {
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Evaluates arithmetic expressions.
///
/// Holds nothing but its configuration, so one instance can be shared across
/// threads and every call is independent of the ones before it.
#[derive(Debug, Default, Copy, Clone)]
pub struct Calculator {
    config: CalculatorConfig,
}

impl Calculator {
    pub fn new(config: CalculatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn calculate(&self, expression: &str) -> CalcResult<f64> {
        let result = self.evaluate(expression);
        match &result {
            Ok(value) => debug!("{:?} = {} ({:?})", expression, value, self.config.strategy),
            Err(error) => debug!("{:?} failed: {} ({:?})", expression, error, self.config.strategy),
        }
        result
    }

    /// Evaluates every expression in parallel; results keep the input order.
    pub fn calculate_many<S>(&self, expressions: &[S]) -> Vec<CalcResult<f64>>
    where
        S: AsRef<str> + Sync,
    {
        expressions
            .par_iter()
            .map(|expression| self.calculate(expression.as_ref()))
            .collect()
    }

    pub fn parse(&self, expression: &str) -> CalcResult<ASTNode> {
        let tokens = tokenize_spanned(expression)?;
        Parser::parse_tokens(&tokens, self.config.max_depth)
    }

    pub fn postfix(&self, expression: &str) -> CalcResult<Vec<Instruction>> {
        let tokens = tokenize_spanned(expression)?;
        to_postfix(&tokens)
    }

    fn evaluate(&self, expression: &str) -> CalcResult<f64> {
        let tokens = tokenize_spanned(expression)?;
        match self.config.strategy {
            Strategy::RecursiveDescent => Parser::reduce(&tokens, Evaluate, self.config.max_depth),
            Strategy::Postfix => Executor::new().execute(&to_postfix(&tokens)?),
        }
    }
}

use crate::ast::{ASTNode, Operator, UnaryOperator};
use crate::error::{CalcError, CalcResult};
use crate::tokenizer::{tokenize_spanned, Token};
use log::trace;

/// Nesting allowed by default before parsing fails with `NestingTooDeep`.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Decides what each grammar production turns into.
///
/// The recursive descent parser calls these in the order productions are
/// completed, so a reducer that evaluates eagerly sees a division by zero
/// before any later token is read.
pub trait Reducer {
    type Output;

    fn number(&self, value: f64) -> Self::Output;

    fn unary(&self, operator: UnaryOperator, operand: Self::Output) -> Self::Output;

    fn binary(
        &self,
        left: Self::Output,
        operator: Operator,
        right: Self::Output,
    ) -> CalcResult<Self::Output>;

    fn group(&self, inner: Self::Output) -> Self::Output;
}

/// Builds an `ASTNode` tree.
#[derive(Debug, Default, Copy, Clone)]
pub struct BuildAst;

impl Reducer for BuildAst {
    type Output = ASTNode;

    fn number(&self, value: f64) -> ASTNode {
        ASTNode::Number(value)
    }

    fn unary(&self, operator: UnaryOperator, operand: ASTNode) -> ASTNode {
        ASTNode::UnaryOperation {
            operator,
            operand: Box::new(operand),
        }
    }

    fn binary(&self, left: ASTNode, operator: Operator, right: ASTNode) -> CalcResult<ASTNode> {
        Ok(ASTNode::BinaryOperation {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    fn group(&self, inner: ASTNode) -> ASTNode {
        ASTNode::Group(Box::new(inner))
    }
}

/// Recursive descent parser for
///
/// ```text
/// Expression := Term { ('+' | '-') Term }*
/// Term       := Factor { ('*' | '/') Factor }*
/// Factor     := ('+' | '-') Factor | Number | '(' Expression ')'
/// ```
pub struct Parser;

impl Parser {
    /// Parses an expression string into an AST.
    pub fn parse(expression: &str) -> CalcResult<ASTNode> {
        let tokens = tokenize_spanned(expression)?;
        Self::reduce(&tokens, BuildAst, Some(DEFAULT_MAX_DEPTH))
    }

    /// Parses an already tokenized expression into an AST.
    pub fn parse_tokens(
        tokens: &[(Token, usize)],
        max_depth: Option<usize>,
    ) -> CalcResult<ASTNode> {
        Self::reduce(tokens, BuildAst, max_depth)
    }

    /// Runs the grammar over `tokens`, folding every production through `reducer`.
    ///
    /// All tokens must be consumed. `max_depth` bounds how many parentheses and
    /// unary signs may be open at once; `None` leaves it to the call stack.
    pub fn reduce<R: Reducer>(
        tokens: &[(Token, usize)],
        reducer: R,
        max_depth: Option<usize>,
    ) -> CalcResult<R::Output> {
        trace!("Parsing {} tokens", tokens.len());
        Descent {
            tokens,
            cursor: 0,
            depth: 0,
            max_depth,
            reducer,
        }
        .run()
    }
}

struct Descent<'a, R> {
    tokens: &'a [(Token, usize)],
    cursor: usize,
    depth: usize,
    max_depth: Option<usize>,
    reducer: R,
}

impl<R: Reducer> Descent<'_, R> {
    fn run(mut self) -> CalcResult<R::Output> {
        if self.tokens.is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        let result = self.parse_expression()?;

        match self.peek() {
            None => Ok(result),
            Some((Token::RightParen, position)) => {
                Err(CalcError::UnbalancedParentheses { position })
            }
            Some((token, position)) => Err(CalcError::TrailingTokens { token, position }),
        }
    }

    fn peek(&self) -> Option<(Token, usize)> {
        self.tokens.get(self.cursor).copied()
    }

    fn advance(&mut self) {
        self.cursor += 1;
    }

    fn descend(&mut self) -> CalcResult<()> {
        self.depth += 1;
        match self.max_depth {
            Some(limit) if self.depth > limit => Err(CalcError::NestingTooDeep { limit }),
            _ => Ok(()),
        }
    }

    fn ascend(&mut self) {
        self.depth -= 1;
    }

    fn parse_expression(&mut self) -> CalcResult<R::Output> {
        let mut result = self.parse_term()?;

        while let Some((Token::Operator(operator @ (Operator::Add | Operator::Subtract)), _)) =
            self.peek()
        {
            self.advance();
            let right = self.parse_term()?;
            result = self.reducer.binary(result, operator, right)?;
        }

        Ok(result)
    }

    fn parse_term(&mut self) -> CalcResult<R::Output> {
        let mut result = self.parse_factor()?;

        while let Some((Token::Operator(operator @ (Operator::Multiply | Operator::Divide)), _)) =
            self.peek()
        {
            self.advance();
            let right = self.parse_factor()?;
            result = self.reducer.binary(result, operator, right)?;
        }

        Ok(result)
    }

    fn parse_factor(&mut self) -> CalcResult<R::Output> {
        match self.peek() {
            Some((Token::Number(value), _)) => {
                self.advance();
                Ok(self.reducer.number(value))
            }
            Some((Token::Operator(operator), position)) => {
                let unary = UnaryOperator::try_from(operator).map_err(|_| {
                    CalcError::UnexpectedToken {
                        token: Token::Operator(operator),
                        position,
                    }
                })?;
                self.advance();
                self.descend()?;
                let operand = self.parse_factor()?;
                self.ascend();
                Ok(self.reducer.unary(unary, operand))
            }
            Some((Token::LeftParen, open)) => {
                self.advance();
                self.descend()?;
                let inner = self.parse_expression()?;
                self.ascend();
                match self.peek() {
                    Some((Token::RightParen, _)) => {
                        self.advance();
                        Ok(self.reducer.group(inner))
                    }
                    _ => Err(CalcError::UnbalancedParentheses { position: open }),
                }
            }
            Some((token @ Token::RightParen, position)) => {
                Err(CalcError::UnexpectedToken { token, position })
            }
            None => Err(CalcError::UnexpectedEndOfExpression),
        }
    }
}

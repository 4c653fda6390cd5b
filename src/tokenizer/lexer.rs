use crate::ast::Operator;
use crate::error::{CalcError, CalcResult};
use crate::tokenizer::Token;
use log::trace;
use pest::error::InputLocation;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "tokenizer/tokens.pest"]
struct TokenParser;

/// Splits an expression into tokens, dropping their positions.
pub fn tokenize(input: &str) -> CalcResult<Vec<Token>> {
    Ok(tokenize_spanned(input)?
        .into_iter()
        .map(|(token, _)| token)
        .collect())
}

/// Splits an expression into tokens paired with their byte offsets.
///
/// Lexemes are checked left to right, so the first bad number or unknown
/// character in the input is the one reported. Returns an empty vector for
/// empty or all-whitespace input.
pub fn tokenize_spanned(input: &str) -> CalcResult<Vec<(Token, usize)>> {
    let pairs = TokenParser::parse(Rule::tokens, input)
        .map_err(|error| invalid_character(input, &error))?;

    let mut tokens = Vec::new();
    for pair in pairs.flat_map(|pair| pair.into_inner()) {
        let position = pair.as_span().start();
        let token = match pair.as_rule() {
            Rule::number => Token::Number(parse_number(pair.as_str(), position)?),
            Rule::operator => Token::Operator(
                Operator::try_from(pair.as_str())
                    .map_err(|_| unknown_character(pair.as_str(), position))?,
            ),
            Rule::left_paren => Token::LeftParen,
            Rule::right_paren => Token::RightParen,
            Rule::unknown => return Err(unknown_character(pair.as_str(), position)),
            Rule::EOI => continue,
            rule => unreachable!("token grammar produced {:?}", rule),
        };
        tokens.push((token, position));
    }

    trace!("Tokenized {:?} into {} tokens", input, tokens.len());
    Ok(tokens)
}

/// Accepts `12`, `1.5`, `.5` and `5.`; rejects a lone `.`, more than one `.`
/// and digit runs too long to fit in an `f64`.
fn parse_number(literal: &str, position: usize) -> CalcResult<f64> {
    let invalid = || CalcError::InvalidNumberFormat {
        literal: literal.to_string(),
        position,
    };

    if literal.matches('.').count() > 1 || !literal.bytes().any(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    literal
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(invalid)
}

fn unknown_character(lexeme: &str, position: usize) -> CalcError {
    CalcError::InvalidCharacter {
        character: lexeme.chars().next().unwrap_or(char::REPLACEMENT_CHARACTER),
        position,
    }
}

// Every character matches some token rule, so this only maps pest's own
// failure onto the character it stopped at.
fn invalid_character(input: &str, error: &pest::error::Error<Rule>) -> CalcError {
    let position = match error.location {
        InputLocation::Pos(position) => position,
        InputLocation::Span((start, _)) => start,
    };
    unknown_character(input.get(position..).unwrap_or_default(), position)
}

//! Recursive-descent regex parser.
//!
//! Grammar, highest to lowest precedence:
//!
//! ```text
//! base       = symbol | "()" | "(" expression ")"
//! factor     = base [ "*" | "+" ]
//! term       = factor { factor }            (implicit concatenation)
//! expression = term { "|" term }
//! ```
//!
//! Symbols are Unicode alphanumerics; `()` is the explicit empty word.
//! Whitespace separates tokens and is discarded, it is never a symbol.

use std::fmt;

use nom::branch::alt;
use nom::character::complete::char as cchar;
use nom::character::complete::{multispace0, one_of, satisfy};
use nom::combinator::{all_consuming, cut, map, opt, value};
use nom::error::Error;
use nom::sequence::{pair, preceded, terminated};
use nom::IResult;

type NResult<'a, T> = IResult<&'a str, T>;

/// Parsed regular expression. Built once per pattern and consumed by the
/// NFA builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxTree {
    Symbol(char),
    Epsilon,
    Concat(Box<SyntaxTree>, Box<SyntaxTree>),
    Alternate(Box<SyntaxTree>, Box<SyntaxTree>),
    Star(Box<SyntaxTree>),
    Plus(Box<SyntaxTree>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    UnexpectedChar(char),
    UnexpectedEnd,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxError::UnexpectedChar(c) => {
                write!(f, "unexpected character '{c}' in regular expression")
            }
            SyntaxError::UnexpectedEnd => write!(f, "unexpected end of regular expression"),
        }
    }
}

impl std::error::Error for SyntaxError {}

/// Parses a whole pattern. No partial tree is ever returned.
pub fn parse(pattern: &str) -> Result<SyntaxTree, SyntaxError> {
    match all_consuming(terminated(expression, multispace0))(pattern) {
        Ok((_, tree)) => Ok(tree),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(offending(e.input)),
        Err(nom::Err::Incomplete(_)) => Err(SyntaxError::UnexpectedEnd),
    }
}

fn offending(rest: &str) -> SyntaxError {
    match rest.trim_start().chars().next() {
        Some(c) => SyntaxError::UnexpectedChar(c),
        None => SyntaxError::UnexpectedEnd,
    }
}

fn expression(input: &str) -> NResult<SyntaxTree> {
    let (mut rest, mut tree) = term(input)?;
    loop {
        let probe: NResult<char> = preceded(multispace0, cchar('|'))(rest);
        match probe {
            Ok((after_pipe, _)) => {
                // An operand must follow the '|'.
                let (after_term, rhs) = cut(term)(after_pipe)?;
                tree = SyntaxTree::Alternate(Box::new(tree), Box::new(rhs));
                rest = after_term;
            }
            Err(_) => break,
        }
    }
    Ok((rest, tree))
}

fn term(input: &str) -> NResult<SyntaxTree> {
    let (mut rest, mut tree) = factor(input)?;
    loop {
        let (ahead, _) = multispace0::<&str, Error<&str>>(rest)?;
        match ahead.chars().next() {
            None | Some('|') | Some(')') => break,
            Some(_) => {
                let (after_factor, rhs) = cut(factor)(ahead)?;
                tree = SyntaxTree::Concat(Box::new(tree), Box::new(rhs));
                rest = after_factor;
            }
        }
    }
    Ok((rest, tree))
}

fn factor(input: &str) -> NResult<SyntaxTree> {
    let (rest, base) = base(input)?;
    let (rest, suffix) = opt(preceded(multispace0, one_of("*+")))(rest)?;
    let tree = match suffix {
        Some('*') => SyntaxTree::Star(Box::new(base)),
        Some('+') => SyntaxTree::Plus(Box::new(base)),
        _ => base,
    };
    Ok((rest, tree))
}

fn base(input: &str) -> NResult<SyntaxTree> {
    preceded(
        multispace0,
        alt((
            value(
                SyntaxTree::Epsilon,
                pair(cchar('('), preceded(multispace0, cchar(')'))),
            ),
            preceded(
                cchar('('),
                cut(terminated(expression, preceded(multispace0, cchar(')')))),
            ),
            map(satisfy(char::is_alphanumeric), SyntaxTree::Symbol),
        )),
    )(input)
}

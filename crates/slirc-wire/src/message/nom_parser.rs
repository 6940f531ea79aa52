//! Borrowed split of one IRC line.
//!
//! ```text
//! [@tags] [:source] command [param ...] [:trailing]
//! ```
//!
//! Tags are stepped over so a tag-sending server parses cleanly, but they
//! are not kept.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till1, take_while_m_n},
    character::complete::{alpha1, char, space0},
    combinator::{eof, opt, peek},
    sequence::{preceded, terminated, tuple},
    IResult,
};
use smallvec::SmallVec;

use crate::error::MessageParseError;

/// Parameters kept per line (RFC 2812).
pub(crate) const MAX_PARAMS: usize = 15;

/// One line split into borrowed pieces.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawLine<'a> {
    pub source: Option<&'a str>,
    pub command: &'a str,
    pub params: SmallVec<[&'a str; MAX_PARAMS]>,
}

fn tags(input: &str) -> IResult<&str, &str> {
    preceded(char('@'), take_till1(|c: char| c == ' '))(input)
}

fn source(input: &str) -> IResult<&str, &str> {
    preceded(char(':'), take_till1(|c: char| c == ' '))(input)
}

/// `1*letter / 3digit`, followed by a separator or the end of the line.
fn command(input: &str) -> IResult<&str, &str> {
    terminated(
        alt((take_while_m_n(3, 3, |c: char| c.is_ascii_digit()), alpha1)),
        peek(alt((eof, tag(" "), tag("\r"), tag("\n")))),
    )(input)
}

fn params(rest: &str) -> SmallVec<[&str; MAX_PARAMS]> {
    let mut params = SmallVec::new();
    let mut rest = rest.trim_end_matches(['\r', '\n']);

    while params.len() < MAX_PARAMS {
        rest = rest.trim_start_matches(' ');
        if rest.is_empty() {
            break;
        }
        if let Some(trailing) = rest.strip_prefix(':') {
            params.push(trailing);
            break;
        }
        let (param, tail) = rest.split_once(' ').unwrap_or((rest, ""));
        params.push(param);
        rest = tail;
    }

    params
}

/// Split `input` into source, command and parameters.
pub(crate) fn split_line(input: &str) -> Result<RawLine<'_>, MessageParseError> {
    let head: IResult<&str, _> =
        tuple((opt(tags), space0, opt(source), space0, command))(input);

    match head {
        Ok((rest, (_, _, source, _, command))) => Ok(RawLine {
            source,
            command,
            params: params(rest),
        }),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => Err(MessageParseError::ParseContext {
            position: input.len() - e.input.len(),
            context: "command".to_string(),
        }),
        Err(nom::Err::Incomplete(_)) => Err(MessageParseError::ParseContext {
            position: input.len(),
            context: "end of line".to_string(),
        }),
    }
}

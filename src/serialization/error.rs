use std::fmt::Display;

use nom::{
    error::{ContextError, ErrorKind, ParseError},
    IResult, Parser,
};

/// A parse error that keeps the alternative which got the furthest into the input
#[derive(Debug)]
pub struct GreedyError<I>(Vec<(I, GreedyErrorKind)>);

#[derive(Debug)]
enum GreedyErrorKind {
    Context(&'static str),
    Nom(ErrorKind),
    Char(char),
}

pub trait Length {
    fn length(&self) -> usize;
}

impl Length for &str {
    fn length(&self) -> usize {
        self.len()
    }
}

impl Display for GreedyError<&str> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (input, error)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let near: String = input.chars().take(20).collect();
            match error {
                GreedyErrorKind::Context(context) => write!(f, "in {}", context)?,
                GreedyErrorKind::Nom(kind) => {
                    write!(f, "{} failed at `{}`", kind.description(), near)?
                }
                GreedyErrorKind::Char(c) => write!(f, "expected '{}' at `{}`", c, near)?,
            }
        }
        Ok(())
    }
}

impl<I> ParseError<I> for GreedyError<I>
where
    I: Length,
{
    fn from_error_kind(input: I, kind: ErrorKind) -> Self {
        Self(vec![(input, GreedyErrorKind::Nom(kind))])
    }

    fn append(input: I, kind: ErrorKind, mut other: Self) -> Self {
        other.0.push((input, GreedyErrorKind::Nom(kind)));
        other
    }

    fn from_char(input: I, c: char) -> Self {
        Self(vec![(input, GreedyErrorKind::Char(c))])
    }

    fn or(self, other: Self) -> Self {
        if self.0[0].0.length() < other.0[0].0.length() {
            self
        } else {
            other
        }
    }
}

impl<I> ContextError<I> for GreedyError<I> {
    fn add_context(input: I, ctx: &'static str, mut other: Self) -> Self {
        other.0.push((input, GreedyErrorKind::Context(ctx)));
        other
    }
}

/// Turns recoverable errors of `f` into failures, so that `alt` does not try other branches once
/// a command keyword was recognized
pub fn or_fail<I, O, E: ParseError<I>, F>(mut f: F) -> impl FnMut(I) -> IResult<I, O, E>
where
    F: Parser<I, O, E>,
{
    move |input| {
        f.parse(input).map_err(|error| match error {
            nom::Err::Error(e) => nom::Err::Failure(e),
            e => e,
        })
    }
}

/// A readable description of why a line could not be parsed
pub fn describe(error: nom::Err<GreedyError<&str>>) -> String {
    match error {
        nom::Err::Error(e) | nom::Err::Failure(e) => e.to_string(),
        nom::Err::Incomplete(_) => "unexpected end of line".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nom::{bytes::complete::tag, error::context, sequence::preceded};

    fn keyword(input: &str) -> IResult<&str, &str, GreedyError<&str>> {
        context("kwd", preceded(tag("kwd "), or_fail(tag("value"))))(input)
    }

    #[test]
    fn failures_are_described() {
        let error = keyword("kwd other").unwrap_err();
        assert!(matches!(error, nom::Err::Failure(_)));
        let message = describe(error);
        assert!(message.contains("`other`"), "{}", message);
        assert!(message.contains("in kwd"), "{}", message);
    }

    #[test]
    fn long_input_is_shortened() {
        let input = "kwd this line goes on for quite a while";
        let message = describe(keyword(input).unwrap_err());
        assert!(message.contains("`this line goes on fo`"), "{}", message);
    }
}

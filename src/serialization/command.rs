use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_while1},
    character::complete::{char, space0, space1},
    combinator::{all_consuming, map, opt, rest},
    error::context,
    multi::separated_list0,
    sequence::{delimited, preceded, separated_pair, tuple},
    IResult,
};

use crate::{
    error::ProofError,
    proof::{Citation, ProofStep},
    theorem::Declaration,
};

use super::error::{or_fail, GreedyError};

/// Everything about a theorem except its proof: `Key [a, b; c ~ a + b] { a + b = c }: name`
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Header {
    pub key: String,
    pub unknowns: Vec<String>,
    pub simplifications: Vec<(String, String)>,
    pub conclusion: String,
    pub name: Option<String>,
}

impl Header {
    pub fn declaration(&self) -> Result<Declaration, ProofError> {
        let unknowns: Vec<&str> = self.unknowns.iter().map(String::as_str).collect();
        let simplifications: Vec<(&str, &str)> = self
            .simplifications
            .iter()
            .map(|(name, expression)| (name.as_str(), expression.as_str()))
            .collect();
        Declaration::new(
            &self.key,
            self.name.as_deref().unwrap_or(&self.key),
            &self.conclusion,
            &unknowns,
            &simplifications,
        )
    }

    fn serialize(&self, s: &mut String) {
        s.push_str(&self.key);
        s.push_str(" [");
        s.push_str(&self.unknowns.join(", "));
        if !self.simplifications.is_empty() {
            let simplifications: Vec<String> = self
                .simplifications
                .iter()
                .map(|(name, expression)| format!("{} ~ {}", name, expression))
                .collect();
            s.push_str("; ");
            s.push_str(&simplifications.join(", "));
        }
        s.push_str("] { ");
        s.push_str(&self.conclusion);
        s.push_str(" }");
        if let Some(name) = &self.name {
            s.push_str(": ");
            s.push_str(name);
        }
    }
}

/// One line of a theorem script
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Command {
    /// `axm Key [a, b] { a + b = b + a }: name`
    Axiom(Header),
    /// `thm Key [a, b; c ~ a + b] { a + b = c }: name`, followed by its proof
    Theorem(Header),
    /// `beg a + b`, the first equality of the proof
    Begin(String),
    /// `evo new | modification | Key[p, q]`, `smp new | simplification` or `qed`
    Step(ProofStep),
}

fn key(input: &str) -> IResult<&str, &str, GreedyError<&str>> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '-')(input)
}

fn trimmed<'a>(
    excluded: &'static str,
) -> impl FnMut(&'a str) -> IResult<&'a str, String, GreedyError<&'a str>> {
    map(is_not(excluded), |s: &str| s.trim().to_owned())
}

fn list<'a, O>(
    item: impl FnMut(&'a str) -> IResult<&'a str, O, GreedyError<&'a str>>,
) -> impl FnMut(&'a str) -> IResult<&'a str, Vec<O>, GreedyError<&'a str>> {
    separated_list0(char(','), item)
}

impl Command {
    /// Parses a single line, without its line break
    pub fn parse(input: &str) -> Result<Self, nom::Err<GreedyError<&str>>> {
        let (_, command) = or_fail(all_consuming(alt((
            context("axm", |input| Self::parse_header("axm", input)),
            context("thm", |input| Self::parse_header("thm", input)),
            context("beg", Self::parse_begin),
            context("evo", Self::parse_evolve),
            context("smp", Self::parse_simplify),
            context("qed", Self::parse_conclude),
        ))))(input.trim())?;
        Ok(command)
    }

    fn parse_header<'a>(
        keyword: &'static str,
        input: &'a str,
    ) -> IResult<&'a str, Command, GreedyError<&'a str>> {
        let (input, _) = tuple((tag(keyword), space1))(input)?;
        or_fail(|input| {
            let (input, key) = key(input)?;
            let (input, _) = tuple((space0, char('[')))(input)?;
            let (input, unknowns) = list(trimmed(",;]"))(input)?;
            let (input, simplifications) = opt(preceded(
                char(';'),
                list(separated_pair(trimmed("~,]"), char('~'), trimmed(",]"))),
            ))(input)?;
            let (input, _) = tuple((char(']'), space0))(input)?;
            let (input, conclusion) = delimited(char('{'), trimmed("}"), char('}'))(input)?;
            let (input, name) = alt((
                map(preceded(tuple((space0, char(':'))), rest), |name: &str| {
                    Some(name.trim().to_owned())
                }),
                map(space0, |_| None),
            ))(input)?;
            let header = Header {
                key: key.to_owned(),
                unknowns: unknowns.into_iter().filter(|u| !u.is_empty()).collect(),
                simplifications: simplifications.unwrap_or_default(),
                conclusion,
                name,
            };
            let command = if keyword == "axm" {
                Command::Axiom(header)
            } else {
                Command::Theorem(header)
            };
            Ok((input, command))
        })(input)
    }

    fn parse_begin(input: &str) -> IResult<&str, Command, GreedyError<&str>> {
        let (input, _) = tuple((tag("beg"), space1))(input)?;
        let (input, expression) = rest(input)?;
        Ok((input, Command::Begin(expression.trim().to_owned())))
    }

    fn parse_evolve(input: &str) -> IResult<&str, Command, GreedyError<&str>> {
        let (input, _) = tuple((tag("evo"), space1))(input)?;
        or_fail(|input| {
            let (input, expression) = trimmed("|")(input)?;
            let (input, _) = char('|')(input)?;
            let (input, modification) = trimmed("|")(input)?;
            let (input, _) = tuple((char('|'), space0))(input)?;
            let (input, key) = key(input)?;
            let (input, parameters) =
                delimited(tuple((space0, char('['))), list(trimmed(",]")), char(']'))(input)?;
            let (input, _) = space0(input)?;
            let citation = Citation {
                key: key.to_owned(),
                parameters,
            };
            Ok((
                input,
                Command::Step(ProofStep::Evolve {
                    expression,
                    modification,
                    citation,
                }),
            ))
        })(input)
    }

    fn parse_simplify(input: &str) -> IResult<&str, Command, GreedyError<&str>> {
        let (input, _) = tuple((tag("smp"), space1))(input)?;
        or_fail(|input| {
            let (input, expression) = trimmed("|")(input)?;
            let (input, _) = char('|')(input)?;
            let (input, simplification) = rest(input)?;
            Ok((
                input,
                Command::Step(ProofStep::Simplify {
                    expression,
                    simplification: simplification.trim().to_owned(),
                }),
            ))
        })(input)
    }

    fn parse_conclude(input: &str) -> IResult<&str, Command, GreedyError<&str>> {
        let (input, _) = tag("qed")(input)?;
        Ok((input, Command::Step(ProofStep::Conclude)))
    }

    pub fn serialize(&self, s: &mut String) {
        match self {
            Command::Axiom(header) => {
                s.push_str("axm ");
                header.serialize(s);
            }
            Command::Theorem(header) => {
                s.push_str("thm ");
                header.serialize(s);
            }
            Command::Begin(expression) => {
                s.push_str("beg ");
                s.push_str(expression);
            }
            Command::Step(ProofStep::Evolve {
                expression,
                modification,
                citation,
            }) => {
                s.push_str(&format!(
                    "evo {} | {} | {}[{}]",
                    expression,
                    modification,
                    citation.key,
                    citation.parameters.join(", ")
                ));
            }
            Command::Step(ProofStep::Simplify {
                expression,
                simplification,
            }) => {
                s.push_str(&format!("smp {} | {}", expression, simplification));
            }
            Command::Step(ProofStep::Conclude) => s.push_str("qed"),
        }
    }
}

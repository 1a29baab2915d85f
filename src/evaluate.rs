//! Exact evaluation of simplifications
//!
//! A simplification such as `c = a + b` becomes a number once its unknowns are replaced by
//! numbers. Values are exact rationals, so `1/3*3` is `1`. Decimal literals are not accepted.

use nom::{
    branch::alt,
    character::complete::{char, digit1, one_of},
    combinator::{all_consuming, map_opt, opt},
    error::{Error, ErrorKind},
    multi::fold_many0,
    sequence::pair,
    IResult,
};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::{error::ProofError, expression::remove_spaces};

/// Exponents with a larger magnitude are refused
pub const MAX_EXPONENT: u32 = 4096;

/// Powers whose numerator or denominator would need more bits than this are refused
pub const MAX_POWER_BITS: u64 = 1 << 16;

/// How deep parentheses, signs and exponents may be nested
pub const MAX_NESTING: usize = 128;

// `None` once some operation had no result (division by zero, a fractional exponent, ...).
// Parsing goes on so that syntax errors are still found.
type Value = Option<BigRational>;

fn deeper(input: &str, depth: usize) -> Result<usize, nom::Err<Error<&str>>> {
    if depth < MAX_NESTING {
        Ok(depth + 1)
    } else {
        Err(nom::Err::Failure(Error::new(input, ErrorKind::TooLarge)))
    }
}

fn number(input: &str) -> IResult<&str, Value> {
    map_opt(digit1, |digits: &str| {
        digits
            .parse::<BigInt>()
            .ok()
            .map(|n| Some(BigRational::from_integer(n)))
    })(input)
}

fn parenthesized(input: &str, depth: usize) -> IResult<&str, Value> {
    let (input, _) = char('(')(input)?;
    let depth = deeper(input, depth)?;
    let (input, value) = sum(input, depth)?;
    let (input, _) = char(')')(input)?;
    Ok((input, value))
}

fn atom(input: &str, depth: usize) -> IResult<&str, Value> {
    alt((number, |input| parenthesized(input, depth)))(input)
}

fn raised_to(input: &str, depth: usize) -> IResult<&str, Value> {
    let (input, _) = char('^')(input)?;
    let depth = deeper(input, depth)?;
    unary(input, depth)
}

// `^` is right associative and binds tighter than a unary sign on its left
fn power(input: &str, depth: usize) -> IResult<&str, Value> {
    let (input, base) = atom(input, depth)?;
    let (input, exponent) = opt(|input| raised_to(input, depth))(input)?;
    let value = match exponent {
        Some(exponent) => base.zip(exponent).and_then(|(b, e)| raise(b, e)),
        None => base,
    };
    Ok((input, value))
}

fn unary(input: &str, depth: usize) -> IResult<&str, Value> {
    let (rest, sign) = opt(one_of::<_, _, Error<&str>>("+-"))(input)?;
    match sign {
        Some(sign) => {
            let depth = deeper(rest, depth)?;
            let (rest, value) = unary(rest, depth)?;
            let value = if sign == '-' { value.map(|v| -v) } else { value };
            Ok((rest, value))
        }
        None => power(input, depth),
    }
}

fn combine(operator: char, left: Value, right: Value) -> Value {
    let (left, right) = (left?, right?);
    match operator {
        '+' => Some(left + right),
        '-' => Some(left - right),
        '*' => Some(left * right),
        '/' if right.is_zero() => None,
        '/' => Some(left / right),
        _ => None,
    }
}

fn product(input: &str, depth: usize) -> IResult<&str, Value> {
    let (input, first) = unary(input, depth)?;
    fold_many0(
        pair(one_of("*/"), |input| unary(input, depth)),
        move || first.clone(),
        |left, (operator, right)| combine(operator, left, right),
    )(input)
}

fn sum(input: &str, depth: usize) -> IResult<&str, Value> {
    let (input, first) = product(input, depth)?;
    fold_many0(
        pair(one_of("+-"), |input| product(input, depth)),
        move || first.clone(),
        |left, (operator, right)| combine(operator, left, right),
    )(input)
}

fn raise(base: BigRational, exponent: BigRational) -> Option<BigRational> {
    if !exponent.is_integer() {
        return None;
    }
    let exponent = exponent.to_integer();
    let magnitude = exponent.abs().to_u32().filter(|m| *m <= MAX_EXPONENT)?;
    let bits = base.numer().bits().max(base.denom().bits());
    if bits.saturating_mul(u64::from(magnitude)) > MAX_POWER_BITS {
        return None;
    }
    let numer = base.numer().pow(magnitude);
    let denom = base.denom().pow(magnitude);
    if exponent.is_negative() {
        if numer.is_zero() {
            return None;
        }
        Some(BigRational::new(denom, numer))
    } else {
        Some(BigRational::new(numer, denom))
    }
}

/// Evaluates an arithmetic expression over integer literals with `+`, `-`, `*`, `/` and `^`
///
/// # Errors
/// `NonNumericSimplification` if the expression contains anything else than numbers (an unknown
/// that was not replaced, a decimal point), divides by zero, uses a fractional exponent, nests
/// deeper than [`MAX_NESTING`] or raises to a power too large to compute.
///
/// # Example
/// ```
/// use equalis::evaluate::evaluate;
/// use num_rational::BigRational;
///
/// assert_eq!(evaluate("2 + 3").unwrap(), BigRational::from_integer(5.into()));
/// assert_eq!(evaluate("2^-1").unwrap(), BigRational::new(1.into(), 2.into()));
/// assert!(evaluate("x + 1").is_err());
/// assert!(evaluate("1.5").is_err());
/// ```
pub fn evaluate(expression: &str) -> Result<BigRational, ProofError> {
    let fail = || ProofError::NonNumericSimplification(expression.to_owned());
    let text = remove_spaces(expression);
    if text.contains('.') {
        return Err(fail());
    }
    let (_, value) = all_consuming(|input| sum(input, 0))(text.as_str()).map_err(|_| fail())?;
    value.ok_or_else(fail)
}

/// Writes a value the way it is inserted into an expression: `5`, `-3` or `1/2`
pub fn numeral(value: &BigRational) -> String {
    if value.denom().is_one() {
        value.numer().to_string()
    } else {
        format!("{}/{}", value.numer(), value.denom())
    }
}

/// Shorthand for [`evaluate`] followed by [`numeral`]
pub fn evaluate_numeral(expression: &str) -> Result<String, ProofError> {
    evaluate(expression).map(|value| numeral(&value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(expression: &str) -> Option<String> {
        evaluate_numeral(expression).ok()
    }

    #[test]
    fn integers() {
        assert_eq!(eval("0+0").as_deref(), Some("0"));
        assert_eq!(eval("2+3").as_deref(), Some("5"));
        assert_eq!(eval("(1+2)*3").as_deref(), Some("9"));
        assert_eq!(eval("7-10").as_deref(), Some("-3"));
        assert_eq!(eval("2*-3").as_deref(), Some("-6"));
        assert_eq!(eval("123456789123456789*10").as_deref(), Some("1234567891234567890"));
    }

    #[test]
    fn powers() {
        assert_eq!(eval("2^10").as_deref(), Some("1024"));
        assert_eq!(eval("2^3^2").as_deref(), Some("512"));
        assert_eq!(eval("-2^2").as_deref(), Some("-4"));
        assert_eq!(eval("0^0").as_deref(), Some("1"));
        assert_eq!(eval("1^2").as_deref(), Some("1"));
        assert_eq!(eval("(2/3)^-2").as_deref(), Some("9/4"));
    }

    #[test]
    fn fractions() {
        assert_eq!(eval("4/2").as_deref(), Some("2"));
        assert_eq!(eval("1/2").as_deref(), Some("1/2"));
        assert_eq!(eval("1/3*3").as_deref(), Some("1"));
        assert_eq!(eval("2^-1").as_deref(), Some("1/2"));
    }

    #[test]
    fn not_a_number() {
        for expression in &["x+1", "1.5", "1/0", "0^-1", "2^(1/2)", "2^5000", "", "(1", "2+"] {
            assert_eq!(
                evaluate(expression),
                Err(ProofError::NonNumericSimplification(expression.to_string())),
                "{}",
                expression
            );
        }
    }

    fn nested(depth: usize) -> String {
        format!("{}1{}", "(".repeat(depth), ")".repeat(depth))
    }

    #[test]
    fn nesting() {
        assert_eq!(eval(&nested(MAX_NESTING)).as_deref(), Some("1"));
        assert_eq!(eval(&format!("{}+1", nested(MAX_NESTING))).as_deref(), Some("2"));
        for expression in &[
            nested(MAX_NESTING + 1),
            nested(100_000),
            format!("{}1", "-".repeat(100_000)),
            format!("{}2", "2^".repeat(100_000)),
        ] {
            assert!(evaluate(expression).is_err(), "{}", &expression[..10]);
        }
        assert_eq!(eval(&format!("{}1", "1+".repeat(100_000))).as_deref(), Some("100001"));
    }

    #[test]
    fn huge_powers() {
        assert!(eval("2^4096").is_some());
        assert!(eval("(2^4096)^16").is_none());
        assert!(eval("((2^4096)^4096)^4096").is_none());
        assert_eq!(eval("1^4096").as_deref(), Some("1"));
        assert_eq!(eval("(1/2)^4096*2^4096").as_deref(), Some("1"));
    }
}

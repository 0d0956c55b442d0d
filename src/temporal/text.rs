//! Text protocol literals: shape classification and parsing.
//!
//! The `is_*` predicates only tell which parser applies. They are prefix
//! matches, so a DATETIME literal also satisfies [`is_date`]; use
//! [`classify`] when the order matters.

use std::sync::LazyLock;

use regex::Regex;

use super::{Date, Time, Timestamp};
use crate::error::{Error, Result};

static INTEGER_WITH_FRACTION: LazyLock<Regex> = LazyLock::new(|| compile(r"^-?[0-9]+\.[0-9]+$"));
static DATE: LazyLock<Regex> = LazyLock::new(|| compile(r"^-?[0-9]{4}-[0-9]{2}-[0-9]{2}"));
static TIME: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^(-?)([0-9]{2}):([0-9]{2}):([0-9]{2})(\.[0-9]+)?"));
static TIMESTAMP: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^-?[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}\.?"));

// TIME literals can carry three hour digits (up to 838)
static TIME_PARTS: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^(-?)([0-9]{2,3}):([0-9]{2}):([0-9]{2})(\.[0-9]*)?$"));

#[expect(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static pattern compiles")
}

/// `-?\d+\.\d+`, a number the server rendered with a fractional part
pub fn is_integer_with_fraction(text: &str) -> bool {
    INTEGER_WITH_FRACTION.is_match(text)
}

/// Starts with `[-]YYYY-MM-DD`
pub fn is_date(text: &str) -> bool {
    DATE.is_match(text)
}

/// Starts with `[-]HH:MM:SS[.fraction]`
pub fn is_time(text: &str) -> bool {
    TIME.is_match(text)
}

/// Starts with `[-]YYYY-MM-DD HH:MM:SS`
pub fn is_timestamp(text: &str) -> bool {
    TIMESTAMP.is_match(text)
}

/// Which parser a text literal belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalShape {
    Timestamp,
    Time,
    Date,
    IntegerWithFraction,
    Unknown,
}

/// Classify `text`, checking the longer shapes first
pub fn classify(text: &str) -> TemporalShape {
    if is_timestamp(text) {
        TemporalShape::Timestamp
    } else if is_time(text) {
        TemporalShape::Time
    } else if is_date(text) {
        TemporalShape::Date
    } else if is_integer_with_fraction(text) {
        TemporalShape::IntegerWithFraction
    } else {
        TemporalShape::Unknown
    }
}

/// Sub-second part of `text` in nanoseconds.
///
/// Reads the 9 characters after the first `.`; missing characters count as
/// `0` and anything past the ninth digit is ignored. Returns 0 when there is
/// no `.`.
pub fn extract_nanos(text: &str) -> Result<i32> {
    let bytes = text.as_bytes();
    let Some(index) = bytes.iter().position(|&b| b == b'.') else {
        return Ok(0);
    };

    let mut nanos: i32 = 0;
    for i in index + 1..index + 10 {
        let digit = match bytes.get(i) {
            None => 0,
            Some(b) if b.is_ascii_digit() => (b - b'0') as i32,
            Some(_) => {
                return Err(Error::MalformedLiteral(format!(
                    "cannot parse sub-second part in timestamp string '{}'",
                    text
                )));
            }
        };
        nanos = nanos * 10 + digit;
    }
    Ok(nanos)
}

fn malformed(type_name: &str, text: &str) -> Error {
    Error::MalformedLiteral(format!("cannot parse {} value '{}'", type_name, text))
}

/// Value of a run of ASCII digits already validated by a pattern
fn ascii_number(digits: &[u8]) -> u32 {
    digits
        .iter()
        .fold(0u32, |acc, &b| acc * 10 + (b - b'0') as u32)
}

/// Parse the leading `[-]YYYY-MM-DD`, returning the date and the remaining text
fn split_date(text: &str) -> Result<(Date, &str)> {
    if !is_date(text) {
        return Err(malformed("DATE", text));
    }
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let b = unsigned.as_bytes();
    let year = ascii_number(&b[0..4]) as i32;
    let date = Date::new(
        if negative { -year } else { year },
        ascii_number(&b[5..7]) as u8,
        ascii_number(&b[8..10]) as u8,
    );
    let rest = unsigned.get(10..).unwrap_or_default();
    Ok((date, rest))
}

/// Parse a DATE literal. Trailing text after the date part is ignored.
pub fn parse_date(text: &str) -> Result<Date> {
    split_date(text).map(|(date, _)| date)
}

/// Parse a TIME literal `[-]HH[H]:MM:SS[.fraction]`
pub fn parse_time(text: &str) -> Result<Time> {
    let caps = TIME_PARTS
        .captures(text)
        .ok_or_else(|| malformed("TIME", text))?;
    let number = |i: usize| caps.get(i).map_or(0, |m| ascii_number(m.as_str().as_bytes()));
    let negative = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
    let nanos = extract_nanos(text)?;
    Ok(Time::new(
        negative,
        number(2),
        number(3) as u8,
        number(4) as u8,
        nanos as u32,
    ))
}

/// Parse a DATETIME/TIMESTAMP literal.
///
/// A bare DATE literal is accepted and read as midnight.
pub fn parse_timestamp(text: &str) -> Result<Timestamp> {
    if !is_timestamp(text) {
        let (date, rest) = split_date(text).map_err(|_| malformed("TIMESTAMP", text))?;
        if !rest.is_empty() {
            return Err(malformed("TIMESTAMP", text));
        }
        return Ok(Timestamp::from_date(date));
    }

    let (date, rest) = split_date(text)?;
    // " HH:MM:SS" is guaranteed by the timestamp pattern
    let b = rest.as_bytes();
    let hour = ascii_number(&b[1..3]) as u8;
    let minute = ascii_number(&b[4..6]) as u8;
    let second = ascii_number(&b[7..9]) as u8;
    let nanos = extract_nanos(rest)?;
    Ok(Timestamp::new(date, hour, minute, second, nanos as u32))
}

/// Parse a YEAR literal. Two-digit years map `00..=69` to 2000s and `70..=99` to 1900s.
pub fn parse_year(text: &str, two_digit: bool) -> Result<i32> {
    let year: i32 = text
        .trim()
        .parse()
        .map_err(|_| malformed("YEAR", text))?;
    Ok(expand_year(year, two_digit))
}

pub fn expand_year(year: i32, two_digit: bool) -> i32 {
    if !two_digit {
        return year;
    }
    if year <= 69 { year + 2000 } else { year + 1900 }
}

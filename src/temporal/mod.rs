//! Typed DATE, TIME and DATETIME/TIMESTAMP values.
//!
//! These hold exactly what the server sent. MySQL allows values that calendar
//! libraries reject (negative TIME, hours above 23, month 0), so conversion to
//! `chrono` or `time` types is fallible and feature gated.

use std::fmt;

#[cfg(any(feature = "with-chrono", feature = "with-time"))]
mod convert;
pub mod text;

pub use text::{TemporalShape, classify, extract_nanos};

/// DATE value. `year` is negative only for the text form `-YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl Date {
    pub fn new(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// `0000-00-00`
    pub fn is_zero(&self) -> bool {
        self.year == 0 && self.month == 0 && self.day == 0
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.year < 0 {
            write!(f, "-")?;
        }
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.year.unsigned_abs(),
            self.month,
            self.day
        )
    }
}

/// TIME value. Covers the MySQL range `-838:59:59.999999` to `838:59:59.999999`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Time {
    pub negative: bool,
    pub hours: u32,
    pub minutes: u8,
    pub seconds: u8,
    pub nanos: u32,
}

impl Time {
    pub fn new(negative: bool, hours: u32, minutes: u8, seconds: u8, nanos: u32) -> Self {
        Self {
            negative,
            hours,
            minutes,
            seconds,
            nanos,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0 && self.nanos == 0
    }

    /// Render with exactly `digits` fractional digits (0 omits the separator)
    pub fn to_string_with_precision(self, digits: u8) -> String {
        let mut out = String::new();
        if self.negative {
            out.push('-');
        }
        out.push_str(&format!(
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        ));
        push_fraction(&mut out, self.nanos, digits);
        out
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with_precision(significant_digits(self.nanos)))
    }
}

/// DATETIME/TIMESTAMP value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    pub date: Date,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub nanos: u32,
}

impl Timestamp {
    pub fn new(date: Date, hour: u8, minute: u8, second: u8, nanos: u32) -> Self {
        Self {
            date,
            hour,
            minute,
            second,
            nanos,
        }
    }

    /// Midnight of `date`
    pub fn from_date(date: Date) -> Self {
        Self::new(date, 0, 0, 0, 0)
    }

    /// `0000-00-00 00:00:00`
    pub fn is_zero(&self) -> bool {
        self.date.is_zero() && self.hour == 0 && self.minute == 0 && self.second == 0 && self.nanos == 0
    }

    pub fn time(&self) -> Time {
        Time::new(false, self.hour as u32, self.minute, self.second, self.nanos)
    }

    /// Render with exactly `digits` fractional digits (0 omits the separator)
    pub fn to_string_with_precision(self, digits: u8) -> String {
        let mut out = format!(
            "{} {:02}:{:02}:{:02}",
            self.date, self.hour, self.minute, self.second
        );
        push_fraction(&mut out, self.nanos, digits);
        out
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with_precision(significant_digits(self.nanos)))
    }
}

/// Number of fractional digits needed to show `nanos` without trailing zeros
fn significant_digits(nanos: u32) -> u8 {
    if nanos == 0 {
        return 0;
    }
    let mut digits = 9;
    let mut n = nanos;
    while n % 10 == 0 {
        n /= 10;
        digits -= 1;
    }
    digits
}

fn push_fraction(out: &mut String, nanos: u32, digits: u8) {
    if digits == 0 {
        return;
    }
    let digits = digits.min(9) as usize;
    let text = format!("{:09}", nanos);
    out.push('.');
    out.push_str(&text[..digits]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_display() {
        assert_eq!(Date::new(2024, 12, 25).to_string(), "2024-12-25");
        assert_eq!(Date::new(0, 0, 0).to_string(), "0000-00-00");
        assert_eq!(Date::new(-44, 3, 15).to_string(), "-0044-03-15");
    }

    #[test]
    fn time_display() {
        assert_eq!(Time::new(false, 12, 30, 45, 0).to_string(), "12:30:45");
        assert_eq!(Time::new(true, 838, 59, 59, 0).to_string(), "-838:59:59");
        assert_eq!(
            Time::new(false, 1, 2, 3, 120_000_000).to_string(),
            "01:02:03.12"
        );
        assert_eq!(
            Time::new(false, 1, 2, 3, 120_000_000).to_string_with_precision(6),
            "01:02:03.120000"
        );
    }

    #[test]
    fn timestamp_display() {
        let ts = Timestamp::new(Date::new(2024, 1, 2), 3, 4, 5, 6_000);
        assert_eq!(ts.to_string(), "2024-01-02 03:04:05.000006");
        assert_eq!(ts.to_string_with_precision(0), "2024-01-02 03:04:05");
        assert_eq!(ts.to_string_with_precision(3), "2024-01-02 03:04:05.000");
    }

    #[test]
    fn zero_values() {
        assert!(Date::new(0, 0, 0).is_zero());
        assert!(Timestamp::from_date(Date::new(0, 0, 0)).is_zero());
        assert!(!Timestamp::new(Date::new(0, 0, 0), 0, 0, 1, 0).is_zero());
    }
}

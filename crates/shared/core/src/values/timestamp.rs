use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when a timestamp string is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("timestamp `{0}` does not match YYYY/MM/DD HH:MM:SS[.ffffff]")]
    BadShape(String),

    #[error("timestamp `{0}` is not a valid calendar time")]
    BadCalendar(String),
}

/// An instant on the replay timeline, kept in its canonical wire form
/// `"YYYY/MM/DD HH:MM:SS[.ffffff]"`.
///
/// The format is fixed-width, so the derived lexicographic ordering on the
/// underlying string is exactly chronological ordering. Every query,
/// grouping, and clock operation in the engine relies on that equivalence,
/// which is why construction goes through [`Timestamp::parse`]: the shape is
/// checked byte-for-byte and the fields are checked against the calendar
/// before a value exists at all.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(String);

impl Timestamp {
    /// Validate and wrap a canonical timestamp string.
    ///
    /// Accepts `"YYYY/MM/DD HH:MM:SS"` with an optional fractional-seconds
    /// suffix of one to six digits.
    pub fn parse(value: impl Into<String>) -> Result<Self, TimestampError> {
        let s: String = value.into();
        if !has_canonical_shape(&s) {
            return Err(TimestampError::BadShape(s));
        }
        // Shape is already pinned; chrono checks the calendar fields
        if NaiveDateTime::parse_from_str(&s, "%Y/%m/%d %H:%M:%S%.f").is_err() {
            return Err(TimestampError::BadCalendar(s));
        }
        Ok(Timestamp(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `"HH:MM"` minute label of this instant.
    ///
    /// Fixed byte offset into the canonical form; valid because the shape
    /// was checked at construction.
    pub fn minute(&self) -> &str {
        &self.0[11..16]
    }

    /// The `"HH:MM:SS"` clock label, used for chart axes.
    pub fn clock(&self) -> &str {
        &self.0[11..19]
    }
}

/// Byte-level shape check: digits and separators at fixed offsets, plus an
/// optional `.` and 1-6 fraction digits.
fn has_canonical_shape(s: &str) -> bool {
    let b = s.as_bytes();
    if b.len() < 19 {
        return false;
    }
    for (i, &c) in b[..19].iter().enumerate() {
        let ok = match i {
            4 | 7 => c == b'/',
            10 => c == b' ',
            13 | 16 => c == b':',
            _ => c.is_ascii_digit(),
        };
        if !ok {
            return false;
        }
    }
    if b.len() == 19 {
        return true;
    }
    let frac = &b[20..];
    b[19] == b'.' && !frac.is_empty() && frac.len() <= 6 && frac.iter().all(u8::is_ascii_digit)
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timestamp::parse(s)
    }
}

impl TryFrom<String> for Timestamp {
    type Error = TimestampError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Timestamp::parse(value)
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl AsRef<str> for Timestamp {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_canonical_forms() {
        assert!(Timestamp::parse("2020/03/17 17:01:24").is_ok());
        assert!(Timestamp::parse("2020/03/17 17:01:24.884492").is_ok());
        assert!(Timestamp::parse("2020/06/01 00:00:00.5").is_ok());
    }

    #[test]
    fn rejects_non_fixed_width_forms() {
        assert!(Timestamp::parse("2020/3/17 17:01:24").is_err());
        assert!(Timestamp::parse("2020-03-17 17:01:24").is_err());
        assert!(Timestamp::parse("2020/03/17T17:01:24").is_err());
        assert!(Timestamp::parse("2020/03/17 17:01").is_err());
        assert!(Timestamp::parse("2020/03/17 17:01:24.1234567").is_err());
        assert!(Timestamp::parse("2020/03/17 17:01:24,5").is_err());
        assert!(Timestamp::parse("").is_err());
    }

    #[test]
    fn rejects_impossible_calendar_fields() {
        assert!(Timestamp::parse("2020/13/01 00:00:00").is_err());
        assert!(Timestamp::parse("2020/02/30 00:00:00").is_err());
        assert!(Timestamp::parse("2020/03/17 24:00:00").is_err());
    }

    #[test]
    fn lexicographic_order_is_chronological() {
        let a = Timestamp::parse("2020/03/17 17:01:24.884492").unwrap();
        let b = Timestamp::parse("2020/03/17 17:01:25").unwrap();
        let c = Timestamp::parse("2020/06/01 00:00:00").unwrap();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn minute_label_extraction() {
        let ts = Timestamp::parse("2020/03/17 17:01:24.884492").unwrap();
        assert_eq!(ts.minute(), "17:01");
        assert_eq!(ts.clock(), "17:01:24");
    }
}

//! Remaining-time formatting

use std::fmt;

use serde::{Deserialize, Serialize};

pub const SECONDS_IN_AN_HOUR: u64 = 3600;
pub const SECONDS_IN_A_MINUTE: u64 = 60;

/// Hours, minutes and seconds as two-digit strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedTime {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl FormattedTime {
    pub fn zero() -> Self {
        format_seconds(0)
    }
}

impl fmt::Display for FormattedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.hours, self.minutes, self.seconds)
    }
}

/// Zero-pad values below 10; larger values keep their natural expansion
pub fn two_digits(value: u64) -> String {
    format!("{:02}", value)
}

/// Split a count of seconds into formatted hours, minutes and seconds
pub fn format_seconds(total_seconds: u64) -> FormattedTime {
    let hours = total_seconds / SECONDS_IN_AN_HOUR;
    let without_hours = total_seconds % SECONDS_IN_AN_HOUR;
    let minutes = without_hours / SECONDS_IN_A_MINUTE;
    let seconds = without_hours % SECONDS_IN_A_MINUTE;

    FormattedTime {
        hours: two_digits(hours),
        minutes: two_digits(minutes),
        seconds: two_digits(seconds),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_digits() {
        assert_eq!(two_digits(0), "00");
        assert_eq!(two_digits(9), "09");
        assert_eq!(two_digits(10), "10");
        assert_eq!(two_digits(123), "123");
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(0).to_string(), "00:00:00");
        assert_eq!(format_seconds(59).to_string(), "00:00:59");
        assert_eq!(format_seconds(61).to_string(), "00:01:01");
        assert_eq!(format_seconds(3661).to_string(), "01:01:01");
        assert_eq!(format_seconds(359_999).to_string(), "99:59:59");
    }

    #[test]
    fn test_hours_past_99_are_not_clamped() {
        let time = format_seconds(100 * 3600 + 5);
        assert_eq!(time.hours, "100");
        assert_eq!(time.to_string(), "100:00:05");
    }

    #[test]
    fn test_decomposition_recomposes() {
        for t in 0..=359_999u64 {
            let time = format_seconds(t);
            let h: u64 = time.hours.parse().unwrap();
            let m: u64 = time.minutes.parse().unwrap();
            let s: u64 = time.seconds.parse().unwrap();
            assert!(m < 60 && s < 60);
            assert_eq!(h * 3600 + m * 60 + s, t);
        }
    }
}

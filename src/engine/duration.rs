//! Duration input parsing

use serde::{de, Deserialize, Deserializer, Serialize};

use super::{
    format::{SECONDS_IN_AN_HOUR, SECONDS_IN_A_MINUTE},
    DurationSource, TimerError,
};

/// Raw hours/minutes/seconds as submitted by the user.
///
/// Absent fields deserialize as zero, matching an empty form field.
/// `null` and empty strings count as zero; numbers beyond the `i64` range
/// saturate so they surface as [`TimerError::DurationOverflow`] or
/// [`TimerError::NegativeField`] instead of a decoding failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DurationInput {
    #[serde(deserialize_with = "lenient_field")]
    pub hours: i64,
    #[serde(deserialize_with = "lenient_field")]
    pub minutes: i64,
    #[serde(deserialize_with = "lenient_field")]
    pub seconds: i64,
}

impl DurationInput {
    pub fn new(hours: i64, minutes: i64, seconds: i64) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    /// Check if every field is zero
    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }

    /// Convert to a total count of seconds.
    ///
    /// An all-zero input yields `Ok(0)`; rejecting it is left to
    /// [`CountdownEngine::start`](super::CountdownEngine::start).
    pub fn to_seconds(&self) -> Result<u64, TimerError> {
        if self.is_zero() {
            return Ok(0);
        }

        let hours = non_negative("hours", self.hours)?;
        let minutes = non_negative("minutes", self.minutes)?;
        let seconds = non_negative("seconds", self.seconds)?;

        hours
            .checked_mul(SECONDS_IN_AN_HOUR)
            .and_then(|h| minutes.checked_mul(SECONDS_IN_A_MINUTE).map(|m| (h, m)))
            .and_then(|(h, m)| h.checked_add(m))
            .and_then(|hm| hm.checked_add(seconds))
            .ok_or(TimerError::DurationOverflow)
    }
}

impl DurationSource for DurationInput {
    fn read(&self) -> DurationInput {
        *self
    }
}

/// Raw JSON shapes a form field may arrive in
#[derive(Deserialize)]
#[serde(untagged)]
enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

fn lenient_field<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = match Option::<FieldValue>::deserialize(deserializer)? {
        None => return Ok(0),
        Some(FieldValue::Integer(value)) => return Ok(value),
        Some(FieldValue::Float(value)) => whole_number(value),
        Some(FieldValue::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(0);
            }
            match (text.parse::<i64>(), text.parse::<f64>()) {
                (Ok(value), _) => Ok(value),
                (Err(_), Ok(value)) => whole_number(value),
                (Err(_), Err(_)) => Err(format!("'{}' is not a number", text)),
            }
        }
    };
    value.map_err(de::Error::custom)
}

/// Float-to-int casts saturate at the `i64` bounds
fn whole_number(value: f64) -> Result<i64, String> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(format!("{} is not a whole number", value));
    }
    Ok(value as i64)
}

fn non_negative(field: &'static str, value: i64) -> Result<u64, TimerError> {
    u64::try_from(value).map_err(|_| TimerError::NegativeField { field, value })
}

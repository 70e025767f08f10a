//! Conversion of minute/second cut points to total seconds.

use crate::error::TimestampError;

/// Converts a `minutes`/`seconds` pair to total seconds.
///
/// `seconds` must be a sub-minute remainder, so `1m 75s` is rejected rather
/// than normalised to `2m 15s`.
pub fn to_total_seconds(minutes: i64, seconds: i64) -> Result<u64, TimestampError> {
    if minutes < 0 || seconds < 0 {
        return Err(TimestampError::Negative { minutes, seconds });
    }
    if seconds >= 60 {
        return Err(TimestampError::SecondsOutOfRange(seconds));
    }
    (minutes as u64)
        .checked_mul(60)
        .and_then(|total| total.checked_add(seconds as u64))
        .ok_or(TimestampError::TooLarge { minutes, seconds })
}

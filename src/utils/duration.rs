//! Parser for link lifetimes such as `"90s"`, `"1h30m"` or `"1.5h"`.
//!
//! The accepted grammar is a sequence of decimal numbers, each with an optional
//! fraction and a mandatory unit suffix, with an optional leading sign:
//! `[-+]?(digits[.digits]unit)+`. Units are `ns`, `us` (or `µs`), `ms`, `s`,
//! `m` and `h`. The bare string `"0"` is also accepted.

use chrono::TimeDelta;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;
const NANOS_PER_MINUTE: u128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MINUTE;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum DurationParseError {
    #[error("duration is empty")]
    Empty,

    #[error("invalid duration '{0}'")]
    Invalid(String),

    #[error("missing unit in duration '{0}'")]
    MissingUnit(String),

    #[error("unknown unit '{unit}' in duration '{input}'")]
    UnknownUnit { unit: String, input: String },

    #[error("duration '{0}' is out of range")]
    Overflow(String),
}

/// Parses a duration string into a signed [`TimeDelta`].
///
/// # Errors
///
/// Returns [`DurationParseError`] when the input does not follow the grammar
/// or does not fit into a `TimeDelta`.
pub fn parse_duration(input: &str) -> Result<TimeDelta, DurationParseError> {
    let original = input;
    let mut rest = input.trim();

    if rest.is_empty() {
        return Err(DurationParseError::Empty);
    }

    let negative = if let Some(stripped) = rest.strip_prefix('-') {
        rest = stripped;
        true
    } else {
        rest = rest.strip_prefix('+').unwrap_or(rest);
        false
    };

    if rest == "0" {
        return Ok(TimeDelta::zero());
    }
    if rest.is_empty() {
        return Err(DurationParseError::Invalid(original.to_string()));
    }

    let mut total: u128 = 0;

    while !rest.is_empty() {
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (int_part, after_int) = rest.split_at(int_len);

        let (frac_part, after_number) = match after_int.strip_prefix('.') {
            Some(after_dot) => {
                let frac_len = after_dot.bytes().take_while(u8::is_ascii_digit).count();
                after_dot.split_at(frac_len)
            }
            None => ("", after_int),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(DurationParseError::Invalid(original.to_string()));
        }

        let unit_len = after_number
            .char_indices()
            .find(|&(_, c)| c == '.' || c.is_ascii_digit())
            .map_or(after_number.len(), |(i, _)| i);
        let (unit, remainder) = after_number.split_at(unit_len);

        if unit.is_empty() {
            return Err(DurationParseError::MissingUnit(original.to_string()));
        }

        let scale = unit_scale(unit).ok_or_else(|| DurationParseError::UnknownUnit {
            unit: unit.to_string(),
            input: original.to_string(),
        })?;

        let overflow = || DurationParseError::Overflow(original.to_string());

        let whole: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| overflow())?
        };

        let mut nanos = whole.checked_mul(scale).ok_or_else(overflow)?;

        // Fractional digits beyond the unit's nanosecond resolution are truncated.
        let mut place = scale;
        for digit in frac_part.bytes() {
            place /= 10;
            if place == 0 {
                break;
            }
            nanos += u128::from(digit - b'0') * place;
        }

        total = total.checked_add(nanos).ok_or_else(overflow)?;
        rest = remainder;
    }

    let total =
        i64::try_from(total).map_err(|_| DurationParseError::Overflow(original.to_string()))?;
    let delta = TimeDelta::nanoseconds(total);

    Ok(if negative { -delta } else { delta })
}

fn unit_scale(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SECOND),
        "m" => Some(NANOS_PER_MINUTE),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

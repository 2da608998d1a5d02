//! Zeek `time` values: decimal seconds since the Unix epoch.

const MICROS_PER_SECOND: i64 = 1_000_000;
const FRACTION_DIGITS: usize = 6;

/// Parse `seconds[.fraction]` into microseconds since the epoch.
///
/// The fraction is handled as exact decimal digits, so `1234567890.123456`
/// does not pick up binary floating point error. Digits past microseconds
/// are truncated. Forms with an exponent fall back to float parsing.
pub fn parse_epoch_micros(text: &str) -> Option<i64> {
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !is_digits(whole) || !is_digits(fraction) {
        return parse_float_seconds(text);
    }

    let seconds: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };

    let mut micros: i64 = 0;
    for i in 0..FRACTION_DIGITS {
        let digit = fraction.as_bytes().get(i).map_or(0, |b| i64::from(b - b'0'));
        micros = micros * 10 + digit;
    }

    let total = seconds
        .checked_mul(MICROS_PER_SECOND)?
        .checked_add(micros)?;
    Some(if negative { -total } else { total })
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_float_seconds(text: &str) -> Option<i64> {
    let seconds: f64 = text.parse().ok()?;
    let micros = (seconds * MICROS_PER_SECOND as f64).round();
    if micros.is_finite() && micros >= i64::MIN as f64 && micros <= i64::MAX as f64 {
        Some(micros as i64)
    } else {
        None
    }
}

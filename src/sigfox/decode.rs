use chrono::{DateTime, FixedOffset, Utc};

use crate::error::FormatError;

const HEX_FLOAT_LEN: usize = 8;

/// Char offset of the temperature field inside a Sigfox frame.
const TEMPERATURE_OFFSET: usize = 4;

const JST_OFFSET_SECONDS: i32 = 9 * 60 * 60;

/// UTC+9, fixed. No tz database and no daylight saving.
pub const JST: FixedOffset = match FixedOffset::east_opt(JST_OFFSET_SECONDS) {
    Some(offset) => offset,
    None => panic!("UTC+9 is out of range"),
};

pub const DEFAULT_EPOCH_SECONDS: i64 = 0;

/// Reinterprets 8 big-endian hex digits as the bits of an IEEE-754 `f32`.
pub fn decode_hex_float(hex: &str) -> Result<f32, FormatError> {
    if hex.len() != HEX_FLOAT_LEN {
        return Err(FormatError::HexLength {
            expected: HEX_FLOAT_LEN,
            actual: hex.chars().count(),
        });
    }

    // from_str_radix alone would accept a leading sign
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(FormatError::HexDigit(hex.to_owned()));
    }

    let bits = u32::from_str_radix(hex, 16).map_err(|_| FormatError::HexDigit(hex.to_owned()))?;

    Ok(f32::from_bits(bits))
}

/// Returns the 8 hex characters holding the temperature.
pub fn sensor_hex(data: &str) -> Result<&str, FormatError> {
    let end = TEMPERATURE_OFFSET + HEX_FLOAT_LEN;

    if data.len() < end {
        return Err(FormatError::DataTooShort {
            expected: end,
            actual: data.len(),
        });
    }

    // a multibyte char straddling the field can only be a bad digit
    data.get(TEMPERATURE_OFFSET..end)
        .ok_or_else(|| FormatError::HexDigit(data.to_owned()))
}

pub fn parse_epoch_seconds(text: &str) -> Result<i64, FormatError> {
    text.trim()
        .parse()
        .map_err(|_| FormatError::EpochSeconds(text.to_owned()))
}

/// Shows the instant `epoch_seconds` at UTC+9.
///
/// Inputs beyond the range chrono can represent are clamped to it, so every
/// `i64` maps to a timestamp.
pub fn convert_unix_to_local(epoch_seconds: i64) -> DateTime<FixedOffset> {
    let offset = i64::from(JST_OFFSET_SECONDS);
    let min = DateTime::<Utc>::MIN_UTC.timestamp() + offset;
    let max = DateTime::<Utc>::MAX_UTC.timestamp() - offset;

    DateTime::from_timestamp(epoch_seconds.clamp(min, max), 0)
        .unwrap_or_default()
        .with_timezone(&JST)
}

use crate::error::{ProcessingError, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a station identifier, accepting integral decimal text such as `7.0`.
pub fn parse_station_id(raw: &str, row: u64) -> Result<u32> {
    let text = raw.trim();
    if let Ok(id) = text.parse::<u32>() {
        return Ok(id);
    }

    Decimal::from_str(text)
        .ok()
        .filter(|d| d.fract().is_zero() && !d.is_sign_negative())
        .and_then(|d| d.to_u32())
        .ok_or_else(|| ProcessingError::malformed(row, format!("invalid station_id '{}'", raw)))
}

/// Parse a measured value as an exact decimal; negative values are rejected.
pub fn parse_value(raw: &str, row: u64) -> Result<Decimal> {
    let text = raw.trim();
    let value = Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| ProcessingError::malformed(row, format!("invalid value '{}'", raw)))?;

    if value.is_sign_negative() && !value.is_zero() {
        return Err(ProcessingError::malformed(
            row,
            format!("negative value '{}'", raw),
        ));
    }

    Ok(value)
}

use rust_decimal::{Decimal, RoundingStrategy};

/// Round half away from zero to `dp` decimal places.
///
/// Values are already exact decimals, so no binary floating-point artifacts
/// leak into the result (`0.145` stays `0.145` before rounding).
///
/// # Examples
/// ```
/// use pm10_processor::utils::round_half_up;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_half_up(Decimal::new(25, 1), 0), Decimal::from(3));
/// assert_eq!(round_half_up(Decimal::new(-25, 1), 0), Decimal::from(-3));
/// ```
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Round to the precision used for every reported statistic.
pub fn round_report(value: Decimal) -> Decimal {
    round_half_up(value, crate::utils::constants::REPORT_DECIMAL_PLACES)
}

/// Arithmetic mean of a non-empty slice.
pub fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let sum: Decimal = values.iter().sum();
    Some(sum / Decimal::from(values.len()))
}

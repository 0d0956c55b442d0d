use crate::col::ColumnDefinition;
use crate::error::{OutOfRange, Result};

/// Fail with [`OutOfRange`] when `value` is outside `min..=max`.
///
/// Used before narrowing a decoded value into a smaller integer type.
pub fn range_check(
    type_name: &str,
    min: i64,
    max: i64,
    value: i64,
    col: &ColumnDefinition,
) -> Result<()> {
    if !(min..=max).contains(&value) {
        return Err(OutOfRange::new(col.name(), value, type_name).into());
    }
    Ok(())
}

/// [`range_check`] for values that only exist as fixed-point decimals.
#[cfg(feature = "with-rust-decimal")]
pub fn range_check_decimal(
    type_name: &str,
    min: i64,
    max: i64,
    value: &rust_decimal::Decimal,
    col: &ColumnDefinition,
) -> Result<()> {
    use rust_decimal::Decimal;

    if *value < Decimal::from(min) || *value > Decimal::from(max) {
        return Err(OutOfRange::new(col.name(), value.normalize(), type_name).into());
    }
    Ok(())
}

//! Typed accessors over the fields of one result row.
//!
//! [`TextRowDecoder`] reads text protocol rows and [`BinaryRowDecoder`] reads
//! binary protocol rows. Both share the accessor surface of [`RowDecoder`]:
//! every `get_internal_*` call moves the cursor onto a field, records its NULL
//! status, and returns `Ok(None)` for NULL or a zero date.

mod binary;
mod text;

pub use binary::BinaryRowDecoder;
pub use text::TextRowDecoder;

use crate::col::ColumnDefinition;
use crate::constant::ColumnType;
use crate::cursor::{Field, NullStatus, RowCursor};
use crate::error::{Error, OutOfRange, Result};
use crate::opts::Opts;
use crate::range::range_check;
use crate::temporal::text::{expand_year, is_integer_with_fraction};
use crate::temporal::{Date, Time, Timestamp};
use crate::value::Value;

pub trait RowDecoder {
    fn cursor(&self) -> &RowCursor;

    fn cursor_mut(&mut self) -> &mut RowCursor;

    fn opts(&self) -> &Opts;

    /// Replace the active row. Returns the previous row so its buffers can be reused.
    fn reset_row(&mut self, fields: Vec<Field>) -> Option<Vec<Field>> {
        self.cursor_mut().reset_row(fields)
    }

    /// Move onto field `index`; `true` if it is NULL
    fn set_position(&mut self, index: usize) -> Result<bool> {
        self.cursor_mut().set_position(index)
    }

    fn status(&self) -> NullStatus {
        self.cursor().status()
    }

    /// The last value read was NULL or a zero date
    fn was_null(&self) -> bool {
        self.cursor().was_null()
    }

    /// The last value read was a real NULL
    fn last_value_was_null(&self) -> bool {
        self.cursor().last_value_was_null()
    }

    fn get_internal_string(&mut self, index: usize, col: &ColumnDefinition)
    -> Result<Option<String>>;

    fn get_internal_i64(&mut self, index: usize, col: &ColumnDefinition) -> Result<Option<i64>>;

    fn get_internal_u64(&mut self, index: usize, col: &ColumnDefinition) -> Result<Option<u64>>;

    fn get_internal_f32(&mut self, index: usize, col: &ColumnDefinition) -> Result<Option<f32>>;

    fn get_internal_f64(&mut self, index: usize, col: &ColumnDefinition) -> Result<Option<f64>>;

    fn get_internal_bool(&mut self, index: usize, col: &ColumnDefinition)
    -> Result<Option<bool>>;

    /// Exact decimal text of a numeric column
    fn get_internal_decimal(
        &mut self,
        index: usize,
        col: &ColumnDefinition,
    ) -> Result<Option<String>>;

    fn get_internal_date(&mut self, index: usize, col: &ColumnDefinition)
    -> Result<Option<Date>>;

    fn get_internal_time(&mut self, index: usize, col: &ColumnDefinition)
    -> Result<Option<Time>>;

    fn get_internal_timestamp(
        &mut self,
        index: usize,
        col: &ColumnDefinition,
    ) -> Result<Option<Timestamp>>;

    fn get_internal_i32(&mut self, index: usize, col: &ColumnDefinition) -> Result<Option<i32>> {
        let value = self.get_internal_i64(index, col)?;
        Ok(narrow(value, "INTEGER", i32::MIN.into(), i32::MAX.into(), col)?.map(|v| v as i32))
    }

    fn get_internal_i16(&mut self, index: usize, col: &ColumnDefinition) -> Result<Option<i16>> {
        let value = self.get_internal_i64(index, col)?;
        Ok(narrow(value, "SMALLINT", i16::MIN.into(), i16::MAX.into(), col)?.map(|v| v as i16))
    }

    fn get_internal_i8(&mut self, index: usize, col: &ColumnDefinition) -> Result<Option<i8>> {
        let value = self.get_internal_i64(index, col)?;
        Ok(narrow(value, "TINYINT", i8::MIN.into(), i8::MAX.into(), col)?.map(|v| v as i8))
    }

    /// BIT(n) value, big-endian packed
    fn get_internal_bit(&mut self, index: usize) -> Result<Option<i64>> {
        if self.set_position(index)? {
            return Ok(None);
        }
        self.cursor().decode_bit().map(Some)
    }

    /// Field bytes after the truncation ceiling
    fn get_internal_bytes(&mut self, index: usize) -> Result<Option<Vec<u8>>> {
        if self.set_position(index)? {
            return Ok(None);
        }
        Ok(Some(self.cursor().field_bytes()?.to_vec()))
    }

    /// YEAR value as a number, two-digit years expanded
    fn get_internal_year(&mut self, index: usize, col: &ColumnDefinition) -> Result<Option<i32>> {
        if col.column_type != ColumnType::MYSQL_TYPE_YEAR {
            return Err(unsupported(col, "YEAR"));
        }
        let value = self.get_internal_i64(index, col)?;
        let two_digit = col.column_length == 2;
        Ok(narrow(value, "YEAR", 0, 9999, col)?.map(|y| expand_year(y as i32, two_digit)))
    }

    #[cfg(feature = "with-rust-decimal")]
    fn get_internal_rust_decimal(
        &mut self,
        index: usize,
        col: &ColumnDefinition,
    ) -> Result<Option<rust_decimal::Decimal>> {
        use std::str::FromStr;

        let Some(text) = self.get_internal_decimal(index, col)? else {
            return Ok(None);
        };
        rust_decimal::Decimal::from_str(&text)
            .or_else(|_| rust_decimal::Decimal::from_scientific(&text))
            .map(Some)
            .map_err(|e| Error::MalformedLiteral(format!("cannot parse DECIMAL value '{}': {}", text, e)))
    }

    /// Column reported as a boolean: BIT(1), or TINYINT(1) with `TINYINT1_IS_BIT`
    fn is_bit_like(&self, col: &ColumnDefinition) -> bool {
        match col.column_type {
            ColumnType::MYSQL_TYPE_BIT => col.column_length == 1,
            ColumnType::MYSQL_TYPE_TINY => col.column_length == 1 && self.opts().tinyint1_is_bit(),
            _ => false,
        }
    }

    /// Decode a field into the [`Value`] its column metadata calls for
    fn get_internal_object(&mut self, index: usize, col: &ColumnDefinition) -> Result<Value> {
        let value = match col.column_type {
            ColumnType::MYSQL_TYPE_NULL => {
                self.set_position(index)?;
                None
            }
            _ if self.is_bit_like(col) => self.get_internal_bool(index, col)?.map(Value::Bool),
            ColumnType::MYSQL_TYPE_BIT => self.get_internal_bytes(index)?.map(Value::Bytes),
            ColumnType::MYSQL_TYPE_TINY
            | ColumnType::MYSQL_TYPE_SHORT
            | ColumnType::MYSQL_TYPE_INT24
            | ColumnType::MYSQL_TYPE_LONG
            | ColumnType::MYSQL_TYPE_LONGLONG => {
                if col.is_signed() {
                    self.get_internal_i64(index, col)?.map(Value::SignedInt)
                } else {
                    self.get_internal_u64(index, col)?.map(Value::UnsignedInt)
                }
            }
            ColumnType::MYSQL_TYPE_YEAR => {
                if self.opts().year_is_date_type() {
                    self.get_internal_date(index, col)?.map(Value::Date)
                } else {
                    self.get_internal_year(index, col)?
                        .map(|y| Value::SignedInt(y as i64))
                }
            }
            ColumnType::MYSQL_TYPE_FLOAT => self.get_internal_f32(index, col)?.map(Value::Float),
            ColumnType::MYSQL_TYPE_DOUBLE => self.get_internal_f64(index, col)?.map(Value::Double),
            ColumnType::MYSQL_TYPE_DECIMAL | ColumnType::MYSQL_TYPE_NEWDECIMAL => {
                self.get_internal_decimal(index, col)?.map(Value::Decimal)
            }
            ColumnType::MYSQL_TYPE_DATE | ColumnType::MYSQL_TYPE_NEWDATE => {
                self.get_internal_date(index, col)?.map(Value::Date)
            }
            ColumnType::MYSQL_TYPE_TIME | ColumnType::MYSQL_TYPE_TIME2 => {
                self.get_internal_time(index, col)?.map(Value::Time)
            }
            ColumnType::MYSQL_TYPE_DATETIME
            | ColumnType::MYSQL_TYPE_DATETIME2
            | ColumnType::MYSQL_TYPE_TIMESTAMP
            | ColumnType::MYSQL_TYPE_TIMESTAMP2 => {
                self.get_internal_timestamp(index, col)?.map(Value::Timestamp)
            }
            ColumnType::MYSQL_TYPE_GEOMETRY
            | ColumnType::MYSQL_TYPE_TINY_BLOB
            | ColumnType::MYSQL_TYPE_MEDIUM_BLOB
            | ColumnType::MYSQL_TYPE_LONG_BLOB
            | ColumnType::MYSQL_TYPE_BLOB
            | ColumnType::MYSQL_TYPE_VARCHAR
            | ColumnType::MYSQL_TYPE_VAR_STRING
            | ColumnType::MYSQL_TYPE_STRING
            | ColumnType::MYSQL_TYPE_JSON
            | ColumnType::MYSQL_TYPE_ENUM
            | ColumnType::MYSQL_TYPE_SET
            | ColumnType::MYSQL_TYPE_TYPED_ARRAY => {
                if col.is_binary() {
                    self.get_internal_bytes(index)?.map(Value::Bytes)
                } else {
                    self.get_internal_string(index, col)?.map(Value::Str)
                }
            }
        };
        Ok(value.into())
    }
}

fn narrow(
    value: Option<i64>,
    type_name: &str,
    min: i64,
    max: i64,
    col: &ColumnDefinition,
) -> Result<Option<i64>> {
    if let Some(value) = value {
        range_check(type_name, min, max, value, col)?;
    }
    Ok(value)
}

pub(crate) fn unsupported(col: &ColumnDefinition, target: &str) -> Error {
    Error::BadUsageError(format!(
        "Cannot decode MySQL type {} to {}",
        col.column_type.sql_name(),
        target
    ))
}

/// Field text of the current position.
///
/// A field cut by the truncation ceiling may end inside a multi-byte
/// character; the partial character is dropped.
pub(crate) fn field_text(cursor: &RowCursor) -> Result<&str> {
    let bytes = cursor.field_bytes()?;
    match simdutf8::compat::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) if e.error_len().is_none() && cursor.effective_length() < cursor.length() => {
            tracing::debug!(index = cursor.index(), "dropping partial character after truncation");
            let valid = &bytes[..e.valid_up_to()];
            simdutf8::basic::from_utf8(valid).map_err(Error::from_debug)
        }
        Err(e) => Err(Error::MalformedLiteral(format!(
            "invalid UTF-8 in column {}: {}",
            cursor.index(),
            e
        ))),
    }
}

/// Parse a signed integer literal. `12.7` reads as `12`; anything else that
/// is not an integer is out of range.
pub(crate) fn parse_i64(text: &str, col: &ColumnDefinition) -> Result<i64> {
    if let Ok(v) = text.parse::<i64>() {
        return Ok(v);
    }
    if is_integer_with_fraction(text)
        && let Some(v) = text.split('.').next().and_then(|int| int.parse::<i64>().ok())
    {
        return Ok(v);
    }
    Err(OutOfRange::new(col.name(), text, "BIGINT").into())
}

pub(crate) fn parse_u64(text: &str, col: &ColumnDefinition) -> Result<u64> {
    if let Ok(v) = text.parse::<u64>() {
        return Ok(v);
    }
    if is_integer_with_fraction(text)
        && let Some(v) = text.split('.').next().and_then(|int| int.parse::<u64>().ok())
    {
        return Ok(v);
    }
    Err(OutOfRange::new(col.name(), text, "BIGINT UNSIGNED").into())
}

pub(crate) fn parse_f64(text: &str, col: &ColumnDefinition) -> Result<f64> {
    text.trim().parse::<f64>().map_err(|_| {
        Error::MalformedLiteral(format!(
            "cannot parse '{}' as DOUBLE for column '{}'",
            text,
            col.name()
        ))
    })
}

/// `""`, `"0"` and `"false"` are false; numbers are compared against zero;
/// any other text is true.
pub(crate) fn parse_bool(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() || text == "0" || text.eq_ignore_ascii_case("false") {
        return false;
    }
    !matches!(text.parse::<f64>(), Ok(v) if v == 0.0)
}

/// Truncate toward zero, failing when the value does not fit `i64`
pub(crate) fn f64_to_i64(value: f64, col: &ColumnDefinition) -> Result<i64> {
    // i64::MAX as f64 rounds up to 2^63
    if value.is_nan() || !(i64::MIN as f64..i64::MAX as f64).contains(&value) {
        return Err(OutOfRange::new(col.name(), value, "BIGINT").into());
    }
    Ok(value as i64)
}

pub(crate) fn f64_to_u64(value: f64, col: &ColumnDefinition) -> Result<u64> {
    if value.is_nan() || value <= -1.0 || value >= u64::MAX as f64 {
        return Err(OutOfRange::new(col.name(), value, "BIGINT UNSIGNED").into());
    }
    Ok(value as u64)
}

/// Time of day as a timestamp on 1970-01-01
pub(crate) fn time_to_timestamp(time: Time, col: &ColumnDefinition) -> Result<Timestamp> {
    if time.negative || time.hours > 23 {
        return Err(Error::BadUsageError(format!(
            "TIME value {} of column '{}' is not a time of day",
            time,
            col.name()
        )));
    }
    Ok(Timestamp::new(
        Date::new(1970, 1, 1),
        time.hours as u8,
        time.minutes,
        time.seconds,
        time.nanos,
    ))
}

/// Fractional-second digits to render for a temporal column
pub(crate) fn temporal_precision(col: &ColumnDefinition, nanos: u32) -> u8 {
    // 31 (0x1f) is "not fixed"
    if col.decimals <= 6 {
        col.decimals
    } else if nanos == 0 {
        0
    } else {
        6
    }
}

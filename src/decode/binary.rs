use super::*;
use crate::format::zero_fill_if_needed;
use crate::protocol::primitive::*;
use crate::protocol::value::{BinaryDatetime, BinaryTime};
use crate::temporal::text::{parse_date, parse_time, parse_timestamp};

/// Integer read from its fixed-width wire encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WireInt {
    Signed(i64),
    Unsigned(u64),
}

/// Decoder for binary protocol rows.
///
/// Fields are expected in the form [`crate::protocol::BinaryRowPayload::fields`]
/// produces: fixed-width little-endian numbers, temporal structs without their
/// length prefix, and strings without their length prefix.
#[derive(Debug, Default)]
pub struct BinaryRowDecoder {
    cursor: RowCursor,
    opts: Opts,
}

impl BinaryRowDecoder {
    pub fn new(opts: Opts) -> Self {
        Self {
            cursor: RowCursor::new(opts.max_field_size),
            opts,
        }
    }

    fn text(&self) -> Result<&str> {
        field_text(&self.cursor)
    }

    /// Integer columns, including YEAR. `None` for any other column type.
    // Fixed-width values are never truncated by the field ceiling
    fn wire_int(&self, col: &ColumnDefinition) -> Result<Option<WireInt>> {
        let data = self.cursor.raw_field()?;
        let signed = col.is_signed();
        let value = match col.column_type {
            ColumnType::MYSQL_TYPE_TINY => {
                let (v, _) = read_int_1(data)?;
                if signed {
                    WireInt::Signed(v as i8 as i64)
                } else {
                    WireInt::Unsigned(v as u64)
                }
            }
            ColumnType::MYSQL_TYPE_SHORT | ColumnType::MYSQL_TYPE_YEAR => {
                let (v, _) = read_int_2(data)?;
                if signed {
                    WireInt::Signed(v as i16 as i64)
                } else {
                    WireInt::Unsigned(v as u64)
                }
            }
            ColumnType::MYSQL_TYPE_INT24 | ColumnType::MYSQL_TYPE_LONG => {
                let (v, _) = read_int_4(data)?;
                if signed {
                    WireInt::Signed(v as i32 as i64)
                } else {
                    WireInt::Unsigned(v as u64)
                }
            }
            ColumnType::MYSQL_TYPE_LONGLONG => {
                let (v, _) = read_int_8(data)?;
                if signed {
                    WireInt::Signed(v as i64)
                } else {
                    WireInt::Unsigned(v)
                }
            }
            _ => return Ok(None),
        };
        Ok(Some(value))
    }

    fn wire_f32(&self) -> Result<f32> {
        let (v, _) = read_int_4(self.cursor.raw_field()?)?;
        Ok(f32::from_bits(v))
    }

    fn wire_f64(&self) -> Result<f64> {
        let (v, _) = read_int_8(self.cursor.raw_field()?)?;
        Ok(f64::from_bits(v))
    }

    /// FLOAT/DOUBLE columns widened to `f64`
    fn wire_float(&self, col: &ColumnDefinition) -> Result<Option<f64>> {
        match col.column_type {
            ColumnType::MYSQL_TYPE_FLOAT => Ok(Some(self.wire_f32()? as f64)),
            ColumnType::MYSQL_TYPE_DOUBLE => Ok(Some(self.wire_f64()?)),
            _ => Ok(None),
        }
    }

    fn is_textual(col: &ColumnDefinition) -> bool {
        matches!(
            col.column_type,
            ColumnType::MYSQL_TYPE_DECIMAL
                | ColumnType::MYSQL_TYPE_NEWDECIMAL
                | ColumnType::MYSQL_TYPE_VARCHAR
                | ColumnType::MYSQL_TYPE_VAR_STRING
                | ColumnType::MYSQL_TYPE_STRING
                | ColumnType::MYSQL_TYPE_BLOB
                | ColumnType::MYSQL_TYPE_TINY_BLOB
                | ColumnType::MYSQL_TYPE_MEDIUM_BLOB
                | ColumnType::MYSQL_TYPE_LONG_BLOB
                | ColumnType::MYSQL_TYPE_JSON
                | ColumnType::MYSQL_TYPE_ENUM
                | ColumnType::MYSQL_TYPE_SET
        )
    }

    fn is_datetime(col: &ColumnDefinition) -> bool {
        col.column_type.is_temporal()
            && !matches!(
                col.column_type,
                ColumnType::MYSQL_TYPE_TIME | ColumnType::MYSQL_TYPE_TIME2
            )
    }

    /// Timestamp of the current non-NULL field, `None` for a zero date
    fn read_timestamp(&mut self, col: &ColumnDefinition) -> Result<Option<Timestamp>> {
        let ts = match col.column_type {
            ColumnType::MYSQL_TYPE_TIME | ColumnType::MYSQL_TYPE_TIME2 => {
                let time = BinaryTime::parse(self.cursor.raw_field()?)?.to_time()?;
                return time_to_timestamp(time, col).map(Some);
            }
            ColumnType::MYSQL_TYPE_YEAR => {
                return Ok(self.read_year_date(col)?.map(Timestamp::from_date));
            }
            _ if Self::is_datetime(col) => {
                BinaryDatetime::parse(self.cursor.raw_field()?)?.to_timestamp()?
            }
            _ if Self::is_textual(col) => {
                let ts = parse_timestamp(self.text()?)?;
                (!ts.is_zero()).then_some(ts)
            }
            _ => return Err(unsupported(col, "TIMESTAMP")),
        };
        if ts.is_none() {
            self.cursor.mark_zero_date();
        }
        Ok(ts)
    }

    fn read_year_date(&mut self, col: &ColumnDefinition) -> Result<Option<Date>> {
        if !self.opts.year_is_date_type() {
            return Err(unsupported(col, "DATE"));
        }
        let (year, _) = read_int_2(self.cursor.raw_field()?)?;
        if year == 0 {
            self.cursor.mark_zero_date();
            return Ok(None);
        }
        let year = expand_year(year as i32, col.column_length == 2);
        Ok(Some(Date::new(year, 1, 1)))
    }
}

impl RowDecoder for BinaryRowDecoder {
    fn cursor(&self) -> &RowCursor {
        &self.cursor
    }

    fn cursor_mut(&mut self) -> &mut RowCursor {
        &mut self.cursor
    }

    fn opts(&self) -> &Opts {
        &self.opts
    }

    fn get_internal_string(
        &mut self,
        index: usize,
        col: &ColumnDefinition,
    ) -> Result<Option<String>> {
        if self.set_position(index)? {
            return Ok(None);
        }
        if col.column_type == ColumnType::MYSQL_TYPE_YEAR && self.opts.year_is_date_type() {
            return Ok(self.read_year_date(col)?.map(|d| d.to_string()));
        }
        if let Some(v) = self.wire_int(col)? {
            let text = match v {
                WireInt::Signed(v) => v.to_string(),
                WireInt::Unsigned(v) => v.to_string(),
            };
            return Ok(Some(zero_fill_if_needed(text, col)));
        }
        match col.column_type {
            ColumnType::MYSQL_TYPE_BIT => Ok(Some(self.cursor.decode_bit()?.to_string())),
            ColumnType::MYSQL_TYPE_FLOAT => {
                Ok(Some(zero_fill_if_needed(self.wire_f32()?.to_string(), col)))
            }
            ColumnType::MYSQL_TYPE_DOUBLE => {
                Ok(Some(zero_fill_if_needed(self.wire_f64()?.to_string(), col)))
            }
            ColumnType::MYSQL_TYPE_DECIMAL | ColumnType::MYSQL_TYPE_NEWDECIMAL => {
                Ok(Some(zero_fill_if_needed(self.text()?.to_owned(), col)))
            }
            ColumnType::MYSQL_TYPE_DATE | ColumnType::MYSQL_TYPE_NEWDATE => {
                Ok(self.read_timestamp(col)?.map(|ts| ts.date.to_string()))
            }
            ColumnType::MYSQL_TYPE_DATETIME
            | ColumnType::MYSQL_TYPE_DATETIME2
            | ColumnType::MYSQL_TYPE_TIMESTAMP
            | ColumnType::MYSQL_TYPE_TIMESTAMP2 => Ok(self
                .read_timestamp(col)?
                .map(|ts| ts.to_string_with_precision(temporal_precision(col, ts.nanos)))),
            ColumnType::MYSQL_TYPE_TIME | ColumnType::MYSQL_TYPE_TIME2 => {
                let time = BinaryTime::parse(self.cursor.raw_field()?)?.to_time()?;
                let digits = temporal_precision(col, time.nanos);
                Ok(Some(time.to_string_with_precision(digits)))
            }
            _ if col.is_binary() => {
                let bytes = self.cursor.field_bytes()?;
                Ok(Some(String::from_utf8_lossy(bytes).into_owned()))
            }
            _ => Ok(Some(self.text()?.to_owned())),
        }
    }

    fn get_internal_i64(&mut self, index: usize, col: &ColumnDefinition) -> Result<Option<i64>> {
        if self.set_position(index)? {
            return Ok(None);
        }
        match self.wire_int(col)? {
            Some(WireInt::Signed(v)) => return Ok(Some(v)),
            Some(WireInt::Unsigned(v)) => {
                return i64::try_from(v)
                    .map(Some)
                    .map_err(|_| OutOfRange::new(col.name(), v, "BIGINT").into());
            }
            None => {}
        }
        if let Some(v) = self.wire_float(col)? {
            return f64_to_i64(v, col).map(Some);
        }
        match col.column_type {
            ColumnType::MYSQL_TYPE_BIT => self.cursor.decode_bit().map(Some),
            _ if Self::is_textual(col) => parse_i64(self.text()?, col).map(Some),
            _ => Err(unsupported(col, "BIGINT")),
        }
    }

    fn get_internal_u64(&mut self, index: usize, col: &ColumnDefinition) -> Result<Option<u64>> {
        if self.set_position(index)? {
            return Ok(None);
        }
        match self.wire_int(col)? {
            Some(WireInt::Unsigned(v)) => return Ok(Some(v)),
            Some(WireInt::Signed(v)) => {
                return u64::try_from(v)
                    .map(Some)
                    .map_err(|_| OutOfRange::new(col.name(), v, "BIGINT UNSIGNED").into());
            }
            None => {}
        }
        if let Some(v) = self.wire_float(col)? {
            return f64_to_u64(v, col).map(Some);
        }
        match col.column_type {
            ColumnType::MYSQL_TYPE_BIT => Ok(Some(self.cursor.decode_bit()? as u64)),
            _ if Self::is_textual(col) => parse_u64(self.text()?, col).map(Some),
            _ => Err(unsupported(col, "BIGINT UNSIGNED")),
        }
    }

    fn get_internal_f32(&mut self, index: usize, col: &ColumnDefinition) -> Result<Option<f32>> {
        if col.column_type == ColumnType::MYSQL_TYPE_FLOAT {
            if self.set_position(index)? {
                return Ok(None);
            }
            return self.wire_f32().map(Some);
        }
        Ok(self.get_internal_f64(index, col)?.map(|v| v as f32))
    }

    fn get_internal_f64(&mut self, index: usize, col: &ColumnDefinition) -> Result<Option<f64>> {
        if self.set_position(index)? {
            return Ok(None);
        }
        match self.wire_int(col)? {
            Some(WireInt::Signed(v)) => return Ok(Some(v as f64)),
            Some(WireInt::Unsigned(v)) => return Ok(Some(v as f64)),
            None => {}
        }
        if let Some(v) = self.wire_float(col)? {
            return Ok(Some(v));
        }
        match col.column_type {
            ColumnType::MYSQL_TYPE_BIT => Ok(Some(self.cursor.decode_bit()? as f64)),
            _ if Self::is_textual(col) => parse_f64(self.text()?, col).map(Some),
            _ => Err(unsupported(col, "DOUBLE")),
        }
    }

    fn get_internal_bool(
        &mut self,
        index: usize,
        col: &ColumnDefinition,
    ) -> Result<Option<bool>> {
        if self.set_position(index)? {
            return Ok(None);
        }
        match self.wire_int(col)? {
            Some(WireInt::Signed(v)) => return Ok(Some(v != 0)),
            Some(WireInt::Unsigned(v)) => return Ok(Some(v != 0)),
            None => {}
        }
        if let Some(v) = self.wire_float(col)? {
            return Ok(Some(v != 0.0));
        }
        match col.column_type {
            ColumnType::MYSQL_TYPE_BIT => Ok(Some(self.cursor.decode_bit()? != 0)),
            _ if Self::is_textual(col) => Ok(Some(parse_bool(self.text()?))),
            _ => Err(unsupported(col, "BOOLEAN")),
        }
    }

    fn get_internal_decimal(
        &mut self,
        index: usize,
        col: &ColumnDefinition,
    ) -> Result<Option<String>> {
        if self.set_position(index)? {
            return Ok(None);
        }
        if let Some(v) = self.wire_int(col)? {
            let text = match v {
                WireInt::Signed(v) => v.to_string(),
                WireInt::Unsigned(v) => v.to_string(),
            };
            return Ok(Some(zero_fill_if_needed(text, col)));
        }
        match col.column_type {
            ColumnType::MYSQL_TYPE_FLOAT => {
                Ok(Some(zero_fill_if_needed(self.wire_f32()?.to_string(), col)))
            }
            ColumnType::MYSQL_TYPE_DOUBLE => {
                Ok(Some(zero_fill_if_needed(self.wire_f64()?.to_string(), col)))
            }
            ColumnType::MYSQL_TYPE_BIT => Ok(Some(self.cursor.decode_bit()?.to_string())),
            _ if Self::is_textual(col) => {
                let text = self.text()?;
                parse_f64(text, col)?;
                Ok(Some(zero_fill_if_needed(text.trim().to_owned(), col)))
            }
            _ => Err(unsupported(col, "DECIMAL")),
        }
    }

    fn get_internal_date(
        &mut self,
        index: usize,
        col: &ColumnDefinition,
    ) -> Result<Option<Date>> {
        if self.set_position(index)? {
            return Ok(None);
        }
        match col.column_type {
            ColumnType::MYSQL_TYPE_TIME | ColumnType::MYSQL_TYPE_TIME2 => {
                Err(Error::BadUsageError(format!(
                    "Cannot read DATE using a TIME column '{}'",
                    col.name()
                )))
            }
            ColumnType::MYSQL_TYPE_YEAR => self.read_year_date(col),
            _ if Self::is_textual(col) => {
                let date = parse_date(self.text()?)?;
                if date.is_zero() {
                    self.cursor.mark_zero_date();
                    return Ok(None);
                }
                Ok(Some(date))
            }
            _ => Ok(self.read_timestamp(col)?.map(|ts| ts.date)),
        }
    }

    fn get_internal_time(
        &mut self,
        index: usize,
        col: &ColumnDefinition,
    ) -> Result<Option<Time>> {
        if self.set_position(index)? {
            return Ok(None);
        }
        match col.column_type {
            ColumnType::MYSQL_TYPE_DATE | ColumnType::MYSQL_TYPE_NEWDATE => {
                Err(Error::BadUsageError(format!(
                    "Cannot read TIME using a DATE column '{}'",
                    col.name()
                )))
            }
            ColumnType::MYSQL_TYPE_TIME | ColumnType::MYSQL_TYPE_TIME2 => {
                Ok(Some(BinaryTime::parse(self.cursor.raw_field()?)?.to_time()?))
            }
            _ if Self::is_textual(col) => parse_time(self.text()?).map(Some),
            _ => Ok(self.read_timestamp(col)?.map(|ts| ts.time())),
        }
    }

    fn get_internal_timestamp(
        &mut self,
        index: usize,
        col: &ColumnDefinition,
    ) -> Result<Option<Timestamp>> {
        if self.set_position(index)? {
            return Ok(None);
        }
        self.read_timestamp(col)
    }
}

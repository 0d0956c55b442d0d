use super::*;
use crate::format::zero_fill_if_needed;
use crate::temporal::text::{parse_date, parse_time, parse_timestamp, parse_year};

/// Decoder for text protocol rows, where every field is its SQL literal.
#[derive(Debug, Default)]
pub struct TextRowDecoder {
    cursor: RowCursor,
    opts: Opts,
}

impl TextRowDecoder {
    pub fn new(opts: Opts) -> Self {
        Self {
            cursor: RowCursor::new(opts.max_field_size),
            opts,
        }
    }

    fn text(&self) -> Result<&str> {
        field_text(&self.cursor)
    }

    /// Date of the current non-NULL field, `None` for a zero date
    fn read_date(&mut self, col: &ColumnDefinition) -> Result<Option<Date>> {
        let date = match col.column_type {
            ColumnType::MYSQL_TYPE_TIME | ColumnType::MYSQL_TYPE_TIME2 => {
                return Err(Error::BadUsageError(format!(
                    "Cannot read DATE using a TIME column '{}'",
                    col.name()
                )));
            }
            ColumnType::MYSQL_TYPE_YEAR => {
                if !self.opts.year_is_date_type() {
                    return Err(unsupported(col, "DATE"));
                }
                let year = parse_year(self.text()?, col.column_length == 2)?;
                if year == 0 {
                    Date::new(0, 0, 0)
                } else {
                    Date::new(year, 1, 1)
                }
            }
            _ => parse_date(self.text()?)?,
        };
        if date.is_zero() {
            self.cursor.mark_zero_date();
            return Ok(None);
        }
        Ok(Some(date))
    }

    /// Timestamp of the current non-NULL field, `None` for a zero date
    fn read_timestamp(&mut self, col: &ColumnDefinition) -> Result<Option<Timestamp>> {
        match col.column_type {
            ColumnType::MYSQL_TYPE_TIME | ColumnType::MYSQL_TYPE_TIME2 => {
                let time = parse_time(self.text()?)?;
                time_to_timestamp(time, col).map(Some)
            }
            ColumnType::MYSQL_TYPE_DATE
            | ColumnType::MYSQL_TYPE_NEWDATE
            | ColumnType::MYSQL_TYPE_YEAR => Ok(self.read_date(col)?.map(Timestamp::from_date)),
            _ => {
                let ts = parse_timestamp(self.text()?)?;
                if ts.is_zero() {
                    self.cursor.mark_zero_date();
                    return Ok(None);
                }
                Ok(Some(ts))
            }
        }
    }
}

impl RowDecoder for TextRowDecoder {
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
        match col.column_type {
            ColumnType::MYSQL_TYPE_BIT => Ok(Some(self.cursor.decode_bit()?.to_string())),
            ColumnType::MYSQL_TYPE_TINY
            | ColumnType::MYSQL_TYPE_SHORT
            | ColumnType::MYSQL_TYPE_INT24
            | ColumnType::MYSQL_TYPE_LONG
            | ColumnType::MYSQL_TYPE_LONGLONG
            | ColumnType::MYSQL_TYPE_FLOAT
            | ColumnType::MYSQL_TYPE_DOUBLE
            | ColumnType::MYSQL_TYPE_DECIMAL
            | ColumnType::MYSQL_TYPE_NEWDECIMAL => {
                Ok(Some(zero_fill_if_needed(self.text()?.to_owned(), col)))
            }
            ColumnType::MYSQL_TYPE_YEAR if self.opts.year_is_date_type() => {
                Ok(self.read_date(col)?.map(|d| d.to_string()))
            }
            ColumnType::MYSQL_TYPE_DATE
            | ColumnType::MYSQL_TYPE_NEWDATE
            | ColumnType::MYSQL_TYPE_DATETIME
            | ColumnType::MYSQL_TYPE_DATETIME2
            | ColumnType::MYSQL_TYPE_TIMESTAMP
            | ColumnType::MYSQL_TYPE_TIMESTAMP2 => {
                let text = self.text()?.to_owned();
                let ts = parse_timestamp(&text)?;
                if ts.is_zero() {
                    self.cursor.mark_zero_date();
                    return Ok(None);
                }
                Ok(Some(text))
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
        match col.column_type {
            ColumnType::MYSQL_TYPE_BIT => self.cursor.decode_bit().map(Some),
            ColumnType::MYSQL_TYPE_FLOAT | ColumnType::MYSQL_TYPE_DOUBLE => {
                let value = parse_f64(self.text()?, col)?;
                f64_to_i64(value, col).map(Some)
            }
            _ => parse_i64(self.text()?, col).map(Some),
        }
    }

    fn get_internal_u64(&mut self, index: usize, col: &ColumnDefinition) -> Result<Option<u64>> {
        if self.set_position(index)? {
            return Ok(None);
        }
        match col.column_type {
            ColumnType::MYSQL_TYPE_BIT => Ok(Some(self.cursor.decode_bit()? as u64)),
            ColumnType::MYSQL_TYPE_FLOAT | ColumnType::MYSQL_TYPE_DOUBLE => {
                let value = parse_f64(self.text()?, col)?;
                f64_to_u64(value, col).map(Some)
            }
            _ => parse_u64(self.text()?, col).map(Some),
        }
    }

    fn get_internal_f32(&mut self, index: usize, col: &ColumnDefinition) -> Result<Option<f32>> {
        if self.set_position(index)? {
            return Ok(None);
        }
        match col.column_type {
            ColumnType::MYSQL_TYPE_BIT => Ok(Some(self.cursor.decode_bit()? as f32)),
            _ => {
                let text = self.text()?;
                text.trim().parse::<f32>().map(Some).map_err(|_| {
                    Error::MalformedLiteral(format!(
                        "cannot parse '{}' as FLOAT for column '{}'",
                        text,
                        col.name()
                    ))
                })
            }
        }
    }

    fn get_internal_f64(&mut self, index: usize, col: &ColumnDefinition) -> Result<Option<f64>> {
        if self.set_position(index)? {
            return Ok(None);
        }
        match col.column_type {
            ColumnType::MYSQL_TYPE_BIT => Ok(Some(self.cursor.decode_bit()? as f64)),
            _ => parse_f64(self.text()?, col).map(Some),
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
        match col.column_type {
            ColumnType::MYSQL_TYPE_BIT => Ok(Some(self.cursor.decode_bit()? != 0)),
            _ => Ok(Some(parse_bool(self.text()?))),
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
        if col.column_type == ColumnType::MYSQL_TYPE_BIT {
            return Ok(Some(self.cursor.decode_bit()?.to_string()));
        }
        let text = self.text()?;
        parse_f64(text, col)?;
        Ok(Some(zero_fill_if_needed(text.trim().to_owned(), col)))
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
            ColumnType::MYSQL_TYPE_DATETIME
            | ColumnType::MYSQL_TYPE_DATETIME2
            | ColumnType::MYSQL_TYPE_TIMESTAMP
            | ColumnType::MYSQL_TYPE_TIMESTAMP2 => Ok(self.read_timestamp(col)?.map(|ts| ts.date)),
            _ => self.read_date(col),
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
            ColumnType::MYSQL_TYPE_DATETIME
            | ColumnType::MYSQL_TYPE_DATETIME2
            | ColumnType::MYSQL_TYPE_TIMESTAMP
            | ColumnType::MYSQL_TYPE_TIMESTAMP2 => Ok(self.read_timestamp(col)?.map(|ts| ts.time())),
            _ => parse_time(self.text()?).map(Some),
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

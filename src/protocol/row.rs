use crate::col::ColumnDefinition;
use crate::constant::{ColumnType, NULL_LENGTH_MARKER};
use crate::cursor::Field;
use crate::error::{Error, Result};
use crate::protocol::primitive::*;
use crate::protocol::value::NullBitmap;

/// The payload part of a binary protocol row packet.
#[derive(Debug, Clone)]
pub struct BinaryRowPayload<'a> {
    pub(crate) null_bitmap: NullBitmap<'a>,
    pub(crate) values: &'a [u8],
    pub(crate) num_columns: usize,
}

impl<'a> BinaryRowPayload<'a> {
    /// Split a row packet payload (`0x00`, NULL bitmap, values)
    pub fn parse(payload: &'a [u8], num_columns: usize) -> Result<Self> {
        let (header, rest) = read_int_1(payload)?;
        if header != 0x00 {
            return Err(Error::InvalidPacket);
        }
        let (bitmap, values) =
            read_string_fix(rest, NullBitmap::len_for_result_set(num_columns))?;
        Ok(Self {
            null_bitmap: NullBitmap::for_result_set(bitmap),
            values,
            num_columns,
        })
    }

    pub fn null_bitmap(&self) -> NullBitmap<'_> {
        self.null_bitmap
    }

    pub fn values(&self) -> &[u8] {
        self.values
    }

    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    /// Cut the values into one field per column.
    ///
    /// Fixed-width numbers keep their little-endian bytes; temporal values and
    /// strings lose their length prefix.
    #[tracing::instrument(skip_all)]
    pub fn fields(&self, cols: &[ColumnDefinition]) -> Result<Vec<Field>> {
        if cols.len() != self.num_columns {
            return Err(Error::BadUsageError(format!(
                "row has {} columns but {} column definitions were given",
                self.num_columns,
                cols.len()
            )));
        }

        let mut data = self.values;
        let mut fields = Vec::with_capacity(self.num_columns);
        for (idx, col) in cols.iter().enumerate() {
            if self.null_bitmap.is_null(idx) {
                fields.push(None);
                continue;
            }
            let (value, rest) = split_binary_value(col.column_type, data)?;
            fields.push(Some(value.to_vec()));
            data = rest;
        }
        if !data.is_empty() {
            tracing::debug!(trailing = data.len(), "trailing bytes after binary row");
        }
        Ok(fields)
    }
}

fn split_binary_value(column_type: ColumnType, data: &[u8]) -> Result<(&[u8], &[u8])> {
    match column_type {
        ColumnType::MYSQL_TYPE_NULL => Ok((&[], data)),

        ColumnType::MYSQL_TYPE_TINY => read_string_fix(data, 1),

        ColumnType::MYSQL_TYPE_SHORT | ColumnType::MYSQL_TYPE_YEAR => read_string_fix(data, 2),

        ColumnType::MYSQL_TYPE_INT24 | ColumnType::MYSQL_TYPE_LONG | ColumnType::MYSQL_TYPE_FLOAT => {
            read_string_fix(data, 4)
        }

        ColumnType::MYSQL_TYPE_LONGLONG | ColumnType::MYSQL_TYPE_DOUBLE => read_string_fix(data, 8),

        ColumnType::MYSQL_TYPE_DATE
        | ColumnType::MYSQL_TYPE_NEWDATE
        | ColumnType::MYSQL_TYPE_DATETIME
        | ColumnType::MYSQL_TYPE_DATETIME2
        | ColumnType::MYSQL_TYPE_TIMESTAMP
        | ColumnType::MYSQL_TYPE_TIMESTAMP2
        | ColumnType::MYSQL_TYPE_TIME
        | ColumnType::MYSQL_TYPE_TIME2 => {
            let (len, rest) = read_int_1(data)?;
            read_string_fix(rest, len as usize)
        }

        ColumnType::MYSQL_TYPE_DECIMAL
        | ColumnType::MYSQL_TYPE_NEWDECIMAL
        | ColumnType::MYSQL_TYPE_VARCHAR
        | ColumnType::MYSQL_TYPE_VAR_STRING
        | ColumnType::MYSQL_TYPE_STRING
        | ColumnType::MYSQL_TYPE_BLOB
        | ColumnType::MYSQL_TYPE_TINY_BLOB
        | ColumnType::MYSQL_TYPE_MEDIUM_BLOB
        | ColumnType::MYSQL_TYPE_LONG_BLOB
        | ColumnType::MYSQL_TYPE_GEOMETRY
        | ColumnType::MYSQL_TYPE_JSON
        | ColumnType::MYSQL_TYPE_ENUM
        | ColumnType::MYSQL_TYPE_SET
        | ColumnType::MYSQL_TYPE_BIT
        | ColumnType::MYSQL_TYPE_TYPED_ARRAY => read_string_lenenc(data),
    }
}

/// The payload part of a text protocol row packet.
///
/// Every column is a length-encoded string, or `0xFB` for NULL.
#[derive(Debug, Clone)]
pub struct TextRowPayload<'a>(pub &'a [u8]);

impl TextRowPayload<'_> {
    #[tracing::instrument(skip_all)]
    pub fn fields(&self, num_columns: usize) -> Result<Vec<Field>> {
        let mut data = self.0;
        let mut fields = Vec::with_capacity(num_columns);
        for _ in 0..num_columns {
            if data.first() == Some(&NULL_LENGTH_MARKER) {
                fields.push(None);
                data = &data[1..];
                continue;
            }
            let (value, rest) = read_string_lenenc(data)?;
            fields.push(Some(value.to_vec()));
            data = rest;
        }
        if !data.is_empty() {
            return Err(Error::InvalidPacket);
        }
        Ok(fields)
    }
}

//! Row buffer and field cursor shared by the text and binary decoders.
//!
//! A [`RowCursor`] owns the fields of exactly one row. Decoders move it onto a
//! field with [`RowCursor::set_position`], which also records whether that
//! field is NULL, and then read the field through [`RowCursor::field`].

use crate::col::ColumnDefinition;
use crate::error::{Error, Result};

/// Raw bytes of one column of one row, `None` for SQL NULL
pub type Field = Option<Vec<u8>>;

/// Outcome of the last decode attempt.
///
/// `ZeroDate` is an all-zero date or time literal (`0000-00-00`). It is not
/// NULL on the wire, but applications see it as NULL through
/// [`NullStatus::was_null`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullStatus {
    #[default]
    NotNull,
    Null,
    ZeroDate,
}

impl NullStatus {
    /// NULL as seen by the application: a real NULL or a zero date
    pub fn was_null(self) -> bool {
        matches!(self, NullStatus::Null | NullStatus::ZeroDate)
    }

    /// Only a real NULL
    pub fn is_null(self) -> bool {
        self == NullStatus::Null
    }
}

#[derive(Debug, Default)]
pub struct RowCursor {
    max_field_size: usize,
    row: Option<Vec<Field>>,
    index: usize,
    length: usize,
    status: NullStatus,
}

impl RowCursor {
    pub fn new(max_field_size: u32) -> Self {
        Self {
            max_field_size: max_field_size as usize,
            ..Default::default()
        }
    }

    /// Replace the active row. Returns the previous row so its buffers can be reused.
    pub fn reset_row(&mut self, fields: Vec<Field>) -> Option<Vec<Field>> {
        tracing::trace!(num_fields = fields.len(), "reset row");
        self.index = 0;
        self.length = 0;
        self.status = NullStatus::NotNull;
        self.row.replace(fields)
    }

    /// Number of fields in the active row
    pub fn num_fields(&self) -> usize {
        self.row.as_ref().map_or(0, Vec::len)
    }

    /// Move onto the field at `index` and record its NULL status.
    ///
    /// Returns `true` if the field is NULL.
    pub fn set_position(&mut self, index: usize) -> Result<bool> {
        let row = self
            .row
            .as_ref()
            .ok_or_else(|| Error::BadUsageError("no row to decode, call reset_row first".into()))?;
        let field = row.get(index).ok_or_else(|| {
            Error::BadUsageError(format!(
                "column index {} out of bounds for a row of {} fields",
                index,
                row.len()
            ))
        })?;
        self.index = index;
        match field {
            Some(bytes) => {
                self.length = bytes.len();
                self.status = NullStatus::NotNull;
                Ok(false)
            }
            None => {
                self.length = 0;
                self.status = NullStatus::Null;
                Ok(true)
            }
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Untruncated byte length of the current field
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn max_field_size(&self) -> usize {
        self.max_field_size
    }

    /// Length of the current field after the truncation ceiling
    pub fn effective_length(&self) -> usize {
        if self.max_field_size != 0 && self.max_field_size < self.length {
            self.max_field_size
        } else {
            self.length
        }
    }

    /// Current field truncated to [`Self::effective_length`]
    pub fn field_bytes(&self) -> Result<&[u8]> {
        self.raw_field().map(|bytes| &bytes[..self.effective_length()])
    }

    /// Current field without truncation, for fixed-width binary encodings
    pub fn raw_field(&self) -> Result<&[u8]> {
        let row = self
            .row
            .as_ref()
            .ok_or_else(|| Error::BadUsageError("no row to decode, call reset_row first".into()))?;
        match row.get(self.index) {
            Some(Some(bytes)) => Ok(bytes.as_slice()),
            Some(None) => Ok(&[]),
            None => Err(Error::BadUsageError(format!(
                "column index {} out of bounds for a row of {} fields",
                self.index,
                row.len()
            ))),
        }
    }

    pub fn status(&self) -> NullStatus {
        self.status
    }

    /// Record that the current field holds a zero date
    pub fn mark_zero_date(&mut self) {
        tracing::trace!(index = self.index, "zero date");
        self.status = NullStatus::ZeroDate;
    }

    pub fn was_null(&self) -> bool {
        self.status.was_null()
    }

    pub fn last_value_was_null(&self) -> bool {
        self.status.is_null()
    }

    /// Decode the current field as a packed big-endian integer of its effective length.
    ///
    /// The column's UNSIGNED flag decides whether the value is sign-extended.
    /// A NULL field decodes as 0.
    pub fn decode_integer(&self, col: &ColumnDefinition) -> Result<i64> {
        if self.status.is_null() {
            return Ok(0);
        }
        Ok(decode_packed(self.field_bytes()?, col.is_signed()))
    }

    pub fn decode_tiny_int(&self, col: &ColumnDefinition) -> Result<i64> {
        self.decode_integer(col)
    }

    pub fn decode_small_int(&self, col: &ColumnDefinition) -> Result<i64> {
        self.decode_integer(col)
    }

    pub fn decode_medium_int(&self, col: &ColumnDefinition) -> Result<i64> {
        self.decode_integer(col)
    }

    pub fn decode_int(&self, col: &ColumnDefinition) -> Result<i64> {
        self.decode_integer(col)
    }

    pub fn decode_big_int(&self, col: &ColumnDefinition) -> Result<i64> {
        self.decode_integer(col)
    }

    /// Decode the current BIT(n) field. Never sign-extended.
    pub fn decode_bit(&self) -> Result<i64> {
        if self.status.is_null() {
            return Ok(0);
        }
        Ok(decode_packed(self.field_bytes()?, false))
    }
}

/// Big-endian accumulation of up to 8 bytes: `sum(b[i] << 8 * (n - 1 - i))`.
///
/// With `signed`, the result is sign-extended from bit `8 * n - 1`.
pub fn decode_packed(bytes: &[u8], signed: bool) -> i64 {
    let len = bytes.len().min(8);
    let bytes = &bytes[bytes.len() - len..];
    if len == 1 {
        return if signed {
            bytes[0] as i8 as i64
        } else {
            bytes[0] as i64
        };
    }

    let mut value: u64 = 0;
    for (i, &b) in bytes.iter().enumerate() {
        value |= (b as u64) << (8 * (len - 1 - i));
    }
    if signed && len > 0 && len < 8 {
        let shift = 64 - 8 * len as u32;
        ((value << shift) as i64) >> shift
    } else {
        value as i64
    }
}

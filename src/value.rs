use crate::temporal::{Date, Time, Timestamp};

/// A decoded column value, typed by the column metadata.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// NULL, or a zero date
    Null,
    /// BIT(1), or TINYINT(1) when `TINYINT1_IS_BIT` is set
    Bool(bool),
    /// Signed integer (TINYINT, SMALLINT, MEDIUMINT, INT, BIGINT, YEAR)
    SignedInt(i64),
    /// Unsigned integer (TINYINT UNSIGNED, ..., BIGINT UNSIGNED)
    UnsignedInt(u64),
    /// FLOAT - 4-byte floating point
    Float(f32),
    /// DOUBLE - 8-byte floating point
    Double(f64),
    /// DECIMAL as its exact text form
    Decimal(String),
    /// DATE, and YEAR when `YEAR_IS_DATE_TYPE` is set
    Date(Date),
    Time(Time),
    /// DATETIME/TIMESTAMP
    Timestamp(Timestamp),
    /// Text columns
    Str(String),
    /// BIT(n > 1), BLOB, and text columns with the binary charset
    Bytes(Vec<u8>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<Option<Value>> for Value {
    fn from(value: Option<Value>) -> Self {
        value.unwrap_or(Value::Null)
    }
}

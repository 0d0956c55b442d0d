use crate::constant::{BINARY_CHARSET, ColumnFlags, ColumnType};

/// Column metadata consumed by the row decoders.
///
/// Built by whoever reads the result-set column definitions; the decoders
/// never mutate it.
#[derive(Debug, Clone)]
pub struct ColumnDefinition {
    pub name: String,
    pub charset: u16,
    /// Declared display width (e.g. 5 for `INT(5) ZEROFILL`)
    pub column_length: u32,
    pub column_type: ColumnType,
    pub flags: ColumnFlags,
    /// Scale for DECIMAL, fractional-second precision for temporal columns
    pub decimals: u8,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            charset: 33,
            column_length: 0,
            column_type,
            flags: ColumnFlags::empty(),
            decimals: 0,
        }
    }

    pub fn with_length(mut self, column_length: u32) -> Self {
        self.column_length = column_length;
        self
    }

    pub fn with_flags(mut self, flags: ColumnFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_decimals(mut self, decimals: u8) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn with_charset(mut self, charset: u16) -> Self {
        self.charset = charset;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_signed(&self) -> bool {
        !self.flags.contains(ColumnFlags::UNSIGNED_FLAG)
    }

    pub fn is_zero_fill(&self) -> bool {
        self.flags.contains(ColumnFlags::ZEROFILL_FLAG)
    }

    pub fn is_binary(&self) -> bool {
        self.charset == BINARY_CHARSET
    }

    pub fn display_size(&self) -> usize {
        self.column_length as usize
    }
}

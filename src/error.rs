pub use color_eyre::eyre::eyre;
use thiserror::Error;

/// SQLSTATE for numeric values that do not fit the requested type.
pub const SQL_STATE_OUT_OF_RANGE: &str = "22003";

/// Server error number `ER_WARN_DATA_OUT_OF_RANGE`.
pub const ER_WARN_DATA_OUT_OF_RANGE: u16 = 1264;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    OutOfRange(#[from] OutOfRange),

    #[error("{0}")]
    MalformedLiteral(String),

    #[error("Bad usage error: {0}")]
    BadUsageError(String),

    #[error("Bad config error: {0}")]
    BadConfigError(String),

    #[error("Invalid packet")]
    InvalidPacket,

    #[error("Unexpected EOF")]
    UnexpectedEof,

    #[error("Library bug: {0}")]
    LibraryBug(color_eyre::Report),
}

impl Error {
    /// Wrap a value that only implements `Debug` (e.g. zerocopy cast errors)
    pub fn from_debug(err: impl std::fmt::Debug) -> Self {
        Error::LibraryBug(eyre!("{:?}", err))
    }

    /// The SQLSTATE reported to the application, if this error carries one
    pub fn sql_state(&self) -> Option<&str> {
        match self {
            Error::OutOfRange(_) => Some(SQL_STATE_OUT_OF_RANGE),
            _ => None,
        }
    }

    /// The vendor error number, if this error carries one
    pub fn error_code(&self) -> Option<u16> {
        match self {
            Error::OutOfRange(_) => Some(ER_WARN_DATA_OUT_OF_RANGE),
            _ => None,
        }
    }
}

/// A value does not fit the type it is being read as.
///
/// Always reported with SQLSTATE `22003` and error number `1264`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Out of range value for column '{column}' : value {value} is not in {type_name} range")]
pub struct OutOfRange {
    pub column: String,
    pub value: String,
    pub type_name: String,
}

impl OutOfRange {
    pub fn new(column: &str, value: impl ToString, type_name: &str) -> Self {
        Self {
            column: column.to_owned(),
            value: value.to_string(),
            type_name: type_name.to_owned(),
        }
    }

    pub fn sql_state(&self) -> &'static str {
        SQL_STATE_OUT_OF_RANGE
    }

    pub fn error_code(&self) -> u16 {
        ER_WARN_DATA_OUT_OF_RANGE
    }
}

impl From<std::convert::Infallible> for Error {
    fn from(err: std::convert::Infallible) -> Self {
        match err {}
    }
}

pub type Result<T> = std::result::Result<T, Error>;

use smart_default::SmartDefault;

use crate::constant::TypeMapping;
use crate::error::Error;

/// Decoder configuration, fixed for the lifetime of a result set
///
/// ```rs
/// let mut opts1 = Opts::default();
/// opts1.max_field_size = 64;
///
/// let opts2 = Opts::try_from("mysql://localhost/db?maxFieldSize=64&tinyInt1isBit=true");
/// ```
#[derive(Debug, Clone, Copy, SmartDefault)]
pub struct Opts {
    /// Truncation ceiling applied to every field, 0 disables truncation
    pub max_field_size: u32,

    /// Legacy type mapping behavior
    #[default(TypeMapping::TINYINT1_IS_BIT | TypeMapping::YEAR_IS_DATE_TYPE)]
    pub type_mapping: TypeMapping,
}

impl Opts {
    pub fn tinyint1_is_bit(&self) -> bool {
        self.type_mapping.contains(TypeMapping::TINYINT1_IS_BIT)
    }

    pub fn year_is_date_type(&self) -> bool {
        self.type_mapping.contains(TypeMapping::YEAR_IS_DATE_TYPE)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, Error> {
    match value {
        "1" | "true" | "True" | "TRUE" => Ok(true),
        "0" | "false" | "False" | "FALSE" => Ok(false),
        _ => Err(Error::BadConfigError(format!(
            "Invalid boolean value '{}' for '{}'",
            value, key
        ))),
    }
}

impl TryFrom<&str> for Opts {
    type Error = Error;

    fn try_from(url: &str) -> Result<Self, Self::Error> {
        let parsed = url::Url::parse(url)
            .map_err(|e| Error::BadConfigError(format!("Failed to parse MySQL URL: {}", e)))?;

        if parsed.scheme() != "mysql" && parsed.scheme() != "mariadb" {
            return Err(Error::BadConfigError(format!(
                "Invalid URL scheme '{}', expected 'mysql'",
                parsed.scheme()
            )));
        }

        let mut opts = Self::default();
        for (key, value) in parsed.query_pairs() {
            match key.as_ref() {
                "maxFieldSize" => {
                    opts.max_field_size = value.parse().map_err(|e| {
                        Error::BadConfigError(format!("Invalid maxFieldSize '{}': {}", value, e))
                    })?;
                }
                "tinyInt1isBit" => {
                    opts.type_mapping
                        .set(TypeMapping::TINYINT1_IS_BIT, parse_bool(&key, &value)?);
                }
                "yearIsDateType" => {
                    opts.type_mapping
                        .set(TypeMapping::YEAR_IS_DATE_TYPE, parse_bool(&key, &value)?);
                }
                _ => {
                    tracing::debug!(key = %key, "ignoring unknown connection option");
                }
            }
        }
        Ok(opts)
    }
}

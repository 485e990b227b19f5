//! Database driver detection
//!
//! Introspection relies on `MySQL`'s `information_schema` columns
//! (`COLUMN_TYPE`, `KEY_COLUMN_USAGE.REFERENCED_*`), so only
//! `MySQL`-compatible servers are supported.

use crate::error::{HoloFormError, Result};

/// Drivers whose schemas can be introspected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    /// `MySQL` or `MariaDB`
    MySql,
}

impl Driver {
    /// Driver names accepted in connection URLs
    pub const SUPPORTED: &'static [&'static str] = &["mysql"];

    /// Detect the driver from a connection URL scheme
    ///
    /// # Errors
    ///
    /// Returns [`HoloFormError::Config`] if the URL has no scheme and
    /// [`HoloFormError::UnsupportedDriver`] for any scheme other than
    /// `mysql` or `mariadb`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use holoform::schema::Driver;
    ///
    /// assert_eq!(Driver::from_url("mysql://localhost/app").unwrap(), Driver::MySql);
    /// assert!(Driver::from_url("postgres://localhost/app").is_err());
    /// ```
    pub fn from_url(url: &str) -> Result<Self> {
        let Some((scheme, _)) = url.split_once("://") else {
            return Err(HoloFormError::Config(format!(
                "Database URL has no scheme: '{url}'"
            )));
        };

        match scheme.to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Self::MySql),
            other => Err(HoloFormError::UnsupportedDriver {
                driver: other.to_string(),
                supported: Self::SUPPORTED.iter().map(ToString::to_string).collect(),
            }),
        }
    }

    /// Driver name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MySql => "mysql",
        }
    }
}

impl std::fmt::Display for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

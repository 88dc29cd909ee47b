//! Build mode.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Whether the build targets production.
///
/// Production builds hide drafts from every derived artifact and listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    #[default]
    Development,
    Production,
}

impl BuildMode {
    /// Environment variable consulted by [`BuildMode::from_env`].
    pub const ENV_VAR: &'static str = "QUIRE_ENV";

    /// Read the mode from `QUIRE_ENV`; anything but `production` is development.
    pub fn from_env() -> Self {
        match std::env::var(Self::ENV_VAR) {
            Ok(value) if value.eq_ignore_ascii_case("production") => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == Self::Production
    }
}

impl FromStr for BuildMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" => Ok(Self::Development),
            other => Err(format!(
                "unknown build mode `{}` (expected production or development)",
                other
            )),
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => f.write_str("development"),
            Self::Production => f.write_str("production"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mode_names() {
        assert_eq!("production".parse::<BuildMode>(), Ok(BuildMode::Production));
        assert_eq!("Prod".parse::<BuildMode>(), Ok(BuildMode::Production));
        assert_eq!("dev".parse::<BuildMode>(), Ok(BuildMode::Development));
        assert!("staging".parse::<BuildMode>().is_err());
    }

    #[test]
    fn default_is_development() {
        assert!(!BuildMode::default().is_production());
    }
}

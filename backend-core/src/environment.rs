use std::fmt;

use serde::{Serialize, Serializer};

/// Deployment mode the service runs under.
///
/// Only [`Environment::Development`] exposes failure details to clients.
/// Unrecognised names are kept verbatim so they can be reported back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum Environment {
    /// Local development: verbose error messages.
    #[default]
    Development,
    /// Production deployment.
    Production,
    /// Automated test runs.
    Test,
    /// Any other deployment name.
    Other(String),
}

impl Environment {
    /// Parses a deployment name. An empty name means development.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "" | "development" => Self::Development,
            "production" => Self::Production,
            "test" => Self::Test,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Returns the deployment name as configured.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
            Self::Other(name) => name,
        }
    }

    /// Returns `true` when failure details may be shown to clients.
    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Environment {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl Serialize for Environment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

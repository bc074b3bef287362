use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Represents the different deployment environments available for the CLI.
#[derive(Clone, Default, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    /// Local development environment.
    Local,
    /// Staging environment for pre-production testing.
    Staging,
    /// Production environment.
    #[default]
    Production,
}

impl Environment {
    /// Returns the wallet-auth service URL associated with the environment.
    pub fn auth_base_url(&self) -> String {
        match self {
            Environment::Local => "http://localhost:7070".to_string(),
            Environment::Staging => "https://staging.auth.chaincms.app".to_string(),
            Environment::Production => "https://auth.chaincms.app".to_string(),
        }
    }

    /// Returns the search-index service URL associated with the environment.
    pub fn search_base_url(&self) -> String {
        match self {
            Environment::Local => "http://localhost:7700".to_string(),
            Environment::Staging => "https://staging.search.chaincms.app".to_string(),
            Environment::Production => "https://search.chaincms.app".to_string(),
        }
    }

    /// Name of the index holding content items in this environment.
    pub fn content_index(&self) -> &'static str {
        match self {
            Environment::Local | Environment::Staging => "content_items_staging",
            Environment::Production => "content_items",
        }
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            _ => Err(()),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Staging => write!(f, "Staging"),
            Environment::Production => write!(f, "Production"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, Auth URL: {}", self, self.auth_base_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Environment parsing should be case-insensitive.
    fn parses_known_environments() {
        assert_eq!("local".parse::<Environment>(), Ok(Environment::Local));
        assert_eq!("Staging".parse::<Environment>(), Ok(Environment::Staging));
        assert_eq!(
            "PRODUCTION".parse::<Environment>(),
            Ok(Environment::Production)
        );
    }

    #[test]
    fn rejects_unknown_environment() {
        assert!("devnet".parse::<Environment>().is_err());
    }
}

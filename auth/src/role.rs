use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Coarse permission tier carried by every identity and token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    Guest,
    Owner,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown role: {0}")]
pub struct UnknownRoleError(pub String);

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "GUEST",
            Role::Owner => "OWNER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GUEST" => Ok(Role::Guest),
            "OWNER" => Ok(Role::Owner),
            _ => Err(UnknownRoleError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_guest() {
        assert_eq!(Role::default(), Role::Guest);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("owner".parse::<Role>(), Ok(Role::Owner));
        assert_eq!("GUEST".parse::<Role>(), Ok(Role::Guest));
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_serde_representation() {
        assert_eq!(serde_json::to_string(&Role::Owner).unwrap(), "\"OWNER\"");
        let role: Role = serde_json::from_str("\"GUEST\"").unwrap();
        assert_eq!(role, Role::Guest);
        assert!(serde_json::from_str::<Role>("\"ADMIN\"").is_err());
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role. Returned at login so the client can gate features; the
/// server itself does not enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Technical lead
    #[serde(rename = "RT")]
    Rt,
    /// Agent manager
    #[serde(rename = "RA")]
    Ra,
    #[serde(rename = "Agent")]
    Agent,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Rt => "RT",
            Role::Ra => "RA",
            Role::Agent => "Agent",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role '{}', expected one of RT, RA, Agent", self.0)
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RT" => Ok(Role::Rt),
            "RA" => Ok(Role::Ra),
            "Agent" => Ok(Role::Agent),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub login: String,
    /// Stored form of the secret, as produced by the configured `SecretScheme`.
    pub secret: String,
    pub display_name: String,
    pub role: Role,
}

/// Validated input for creating an account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub login: String,
    pub secret: String,
    pub display_name: String,
    pub role: Role,
}

/// What a successful authentication hands back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub display_name: String,
    pub role: Role,
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            display_name: user.display_name.clone(),
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parses_exact_names() {
        assert_eq!("RT".parse::<Role>().unwrap(), Role::Rt);
        assert_eq!("RA".parse::<Role>().unwrap(), Role::Ra);
        assert_eq!("Agent".parse::<Role>().unwrap(), Role::Agent);
    }

    #[test]
    fn test_role_rejects_other_spellings() {
        assert!("rt".parse::<Role>().is_err());
        assert!("agent".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serializes_to_wire_name() {
        assert_eq!(serde_json::to_string(&Role::Rt).unwrap(), "\"RT\"");
        assert_eq!(serde_json::to_string(&Role::Agent).unwrap(), "\"Agent\"");
        let role: Role = serde_json::from_str("\"RA\"").unwrap();
        assert_eq!(role, Role::Ra);
    }
}

use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Asha,
    Leader,
    Admin,
    /// Any role this service grants no privileges to.
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Asha => "asha",
            Role::Leader => "leader",
            Role::Admin => "admin",
            Role::Other(role) => role,
        }
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "asha" => Role::Asha,
            "leader" => Role::Leader,
            "admin" => Role::Admin,
            other => Role::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A leader as seen by the alert fan-out: who to alert in-app, and where to
/// text them.
#[derive(Debug, Clone, FromRow)]
pub struct LeaderContact {
    pub id: Uuid,
    pub number: Option<String>,
}

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use taskgate_core::AppError;

/// Session-wide role of a user across the whole system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GlobalRole {
    /// System administrator; observes every team but does not author content.
    Admin,
    /// Regular account whose access comes from team memberships.
    Basic,
}

impl GlobalRole {
    /// Returns the stable transport value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Basic => "BASIC",
        }
    }

    /// Parses a transport value into a global role.
    pub fn from_transport(value: &str) -> Result<Self, AppError> {
        Self::from_str(value)
    }
}

impl FromStr for GlobalRole {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ADMIN" => Ok(Self::Admin),
            "BASIC" => Ok(Self::Basic),
            _ => Err(AppError::Validation(format!(
                "unknown global role value '{value}'"
            ))),
        }
    }
}

/// Role of a user within one specific team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeamRole {
    /// Administers the team itself: membership and settings.
    Admin,
    /// Runs the team's projects and tasks.
    Leader,
    /// Contributes tasks to the team's projects.
    Member,
}

impl TeamRole {
    /// Returns the stable transport value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Leader => "LEADER",
            Self::Member => "MEMBER",
        }
    }

    /// Returns all known team roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[TeamRole] = &[TeamRole::Admin, TeamRole::Leader, TeamRole::Member];

        ALL
    }

    /// Parses a transport value into a team role.
    pub fn from_transport(value: &str) -> Result<Self, AppError> {
        Self::from_str(value)
    }

    /// Parses an optional transport value, mapping absent or unknown roles to `None`.
    #[must_use]
    pub fn from_transport_lenient(value: Option<&str>) -> Option<Self> {
        value.and_then(|value| Self::from_str(value).ok())
    }
}

impl FromStr for TeamRole {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ADMIN" => Ok(Self::Admin),
            "LEADER" => Ok(Self::Leader),
            "MEMBER" => Ok(Self::Member),
            _ => Err(AppError::Validation(format!(
                "unknown team role value '{value}'"
            ))),
        }
    }
}

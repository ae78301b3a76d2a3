use std::str::FromStr;

use serde::{Deserialize, Serialize};
use taskgate_core::AppError;

use crate::TeamRole;

/// Capabilities checked against a user's roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    /// Allows managing team membership and settings.
    ManageTeam,
    /// Allows creating, editing and archiving projects.
    ManageProject,
    /// Allows assigning, reassigning and deleting any task.
    ManageTask,
    /// Allows reading team details and rosters.
    ViewTeam,
    /// Allows reading projects and boards.
    ViewProject,
    /// Allows reading tasks.
    ViewTask,
    /// Allows creating tasks.
    CreateTask,
    /// Allows editing task content and status.
    UpdateTask,
}

impl Permission {
    /// Returns a stable transport value for this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ManageTeam => "MANAGE_TEAM",
            Self::ManageProject => "MANAGE_PROJECT",
            Self::ManageTask => "MANAGE_TASK",
            Self::ViewTeam => "VIEW_TEAM",
            Self::ViewProject => "VIEW_PROJECT",
            Self::ViewTask => "VIEW_TASK",
            Self::CreateTask => "CREATE_TASK",
            Self::UpdateTask => "UPDATE_TASK",
        }
    }

    /// Returns all known permissions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Permission] = &[
            Permission::ManageTeam,
            Permission::ManageProject,
            Permission::ManageTask,
            Permission::ViewTeam,
            Permission::ViewProject,
            Permission::ViewTask,
            Permission::CreateTask,
            Permission::UpdateTask,
        ];

        ALL
    }

    /// Parses a transport value into a permission.
    pub fn from_transport(value: &str) -> Result<Self, AppError> {
        Self::from_str(value)
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "MANAGE_TEAM" => Ok(Self::ManageTeam),
            "MANAGE_PROJECT" => Ok(Self::ManageProject),
            "MANAGE_TASK" => Ok(Self::ManageTask),
            "VIEW_TEAM" => Ok(Self::ViewTeam),
            "VIEW_PROJECT" => Ok(Self::ViewProject),
            "VIEW_TASK" => Ok(Self::ViewTask),
            "CREATE_TASK" => Ok(Self::CreateTask),
            "UPDATE_TASK" => Ok(Self::UpdateTask),
            _ => Err(AppError::Validation(format!(
                "unknown permission value '{value}'"
            ))),
        }
    }
}

/// Fixed table mapping each team role to the permissions it grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionMatrix;

impl PermissionMatrix {
    /// Returns the permission set granted by a team role.
    #[must_use]
    pub const fn permissions_for(role: TeamRole) -> &'static [Permission] {
        match role {
            TeamRole::Admin => &[
                Permission::ManageTeam,
                Permission::ViewTeam,
                Permission::ViewProject,
                Permission::ViewTask,
            ],
            TeamRole::Leader => &[
                Permission::ManageProject,
                Permission::ViewProject,
                Permission::ManageTask,
                Permission::ViewTask,
                Permission::CreateTask,
                Permission::UpdateTask,
            ],
            TeamRole::Member => &[
                Permission::ViewProject,
                Permission::ViewTask,
                Permission::CreateTask,
                Permission::UpdateTask,
            ],
        }
    }

    /// Returns whether the role's permission set contains the permission.
    #[must_use]
    pub fn grants(role: TeamRole, permission: Permission) -> bool {
        Self::permissions_for(role).contains(&permission)
    }
}

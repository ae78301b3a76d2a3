use async_trait::async_trait;
use taskgate_core::{AppResult, SessionToken, TaskId, TeamId, UserId};
use taskgate_domain::GlobalRole;

/// Request-scoped snapshot of the authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    /// Stable user id.
    pub id: UserId,
    /// Global role at the time of the fetch.
    pub global_role: GlobalRole,
}

/// One row of a team's member list as reported by the back-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMember {
    /// Member user id.
    pub user_id: UserId,
    /// Raw team role transport value; unknown values fail closed.
    pub role: String,
}

/// Access record for the current user in one team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamAccess {
    /// Whether the user holds a membership in the team.
    pub has_access: bool,
    /// Raw team role transport value, when reported.
    pub role: Option<String>,
}

impl TeamAccess {
    /// Access record for a user outside the team.
    #[must_use]
    pub fn none() -> Self {
        Self {
            has_access: false,
            role: None,
        }
    }

    /// Access record for a member holding `role`.
    #[must_use]
    pub fn member(role: impl Into<String>) -> Self {
        Self {
            has_access: true,
            role: Some(role.into()),
        }
    }
}

/// Port resolving the user behind a session.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Fetches the current user snapshot for a session.
    async fn current_user(&self, session: &SessionToken) -> AppResult<CurrentUser>;

    /// Returns the session's user id without a round trip, when known.
    ///
    /// The value is unverified; guards only use it to cross-check the user
    /// returned by [`SessionProvider::current_user`].
    fn cached_user_id(&self, session: &SessionToken) -> Option<UserId>;
}

/// Port for team membership lookups.
#[async_trait]
pub trait TeamMembershipProvider: Send + Sync {
    /// Lists the members of a team.
    async fn team_members(
        &self,
        session: &SessionToken,
        team_id: TeamId,
    ) -> AppResult<Vec<TeamMember>>;

    /// Returns the session user's access record for a team.
    async fn validate_team_access(
        &self,
        session: &SessionToken,
        team_id: TeamId,
    ) -> AppResult<TeamAccess>;
}

/// Port resolving who owns a task.
#[async_trait]
pub trait TaskOwnershipProvider: Send + Sync {
    /// Returns the owner of a task, or `None` when the task has no owner or does not exist.
    async fn task_owner(&self, session: &SessionToken, task_id: TaskId)
    -> AppResult<Option<UserId>>;
}

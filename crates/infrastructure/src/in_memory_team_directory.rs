use std::collections::HashMap;

use async_trait::async_trait;
use taskgate_application::{
    CurrentUser, SessionProvider, TaskOwnershipProvider, TeamAccess, TeamMember,
    TeamMembershipProvider,
};
use taskgate_core::{AppError, AppResult, SessionToken, TaskId, TeamId, UserId};
use taskgate_domain::{TeamMembership, TeamRole, TeamRoster};
use tokio::sync::RwLock;

/// In-memory adapter for sessions, team rosters and task ownership.
#[derive(Default)]
pub struct InMemoryTeamDirectory {
    sessions: RwLock<HashMap<SessionToken, CurrentUser>>,
    rosters: RwLock<HashMap<TeamId, TeamRoster>>,
    task_owners: RwLock<HashMap<TaskId, UserId>>,
}

impl InMemoryTeamDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an authenticated session for a user.
    pub async fn register_session(&self, session: SessionToken, user: CurrentUser) {
        self.sessions.write().await.insert(session, user);
    }

    /// Ends a session.
    pub async fn revoke_session(&self, session: &SessionToken) {
        self.sessions.write().await.remove(session);
    }

    /// Adds a user to a team, creating the team roster on first use.
    pub async fn add_member(
        &self,
        team_id: TeamId,
        user_id: UserId,
        role: TeamRole,
    ) -> AppResult<TeamMembership> {
        self.rosters
            .write()
            .await
            .entry(team_id)
            .or_insert_with(|| TeamRoster::new(team_id))
            .add_member(user_id, role)
    }

    /// Replaces a member's role.
    pub async fn change_role(
        &self,
        team_id: TeamId,
        user_id: UserId,
        role: TeamRole,
    ) -> AppResult<TeamMembership> {
        self.rosters
            .write()
            .await
            .get_mut(&team_id)
            .ok_or_else(|| AppError::NotFound(format!("team '{team_id}' does not exist")))?
            .change_role(user_id, role)
    }

    /// Removes a member from a team.
    pub async fn remove_member(&self, team_id: TeamId, user_id: UserId) -> AppResult<TeamMembership> {
        self.rosters
            .write()
            .await
            .get_mut(&team_id)
            .ok_or_else(|| AppError::NotFound(format!("team '{team_id}' does not exist")))?
            .remove_member(user_id)
    }

    /// Records the owner of a task.
    pub async fn assign_task_owner(&self, task_id: TaskId, owner_id: UserId) {
        self.task_owners.write().await.insert(task_id, owner_id);
    }

    async fn session_user(&self, session: &SessionToken) -> AppResult<CurrentUser> {
        self.sessions
            .read()
            .await
            .get(session)
            .copied()
            .ok_or_else(|| AppError::Unauthorized("session is not recognized".to_owned()))
    }
}

#[async_trait]
impl SessionProvider for InMemoryTeamDirectory {
    async fn current_user(&self, session: &SessionToken) -> AppResult<CurrentUser> {
        self.session_user(session).await
    }

    fn cached_user_id(&self, session: &SessionToken) -> Option<UserId> {
        // Best-effort: a writer holding the lock means "unknown", not "blocked".
        self.sessions
            .try_read()
            .ok()
            .and_then(|sessions| sessions.get(session).map(|user| user.id))
    }
}

#[async_trait]
impl TeamMembershipProvider for InMemoryTeamDirectory {
    async fn team_members(
        &self,
        session: &SessionToken,
        team_id: TeamId,
    ) -> AppResult<Vec<TeamMember>> {
        self.session_user(session).await?;

        let rosters = self.rosters.read().await;
        let roster = rosters
            .get(&team_id)
            .ok_or_else(|| AppError::NotFound(format!("team '{team_id}' does not exist")))?;

        Ok(roster
            .memberships()
            .into_iter()
            .map(|membership| TeamMember {
                user_id: membership.user_id(),
                role: membership.role().as_str().to_owned(),
            })
            .collect())
    }

    async fn validate_team_access(
        &self,
        session: &SessionToken,
        team_id: TeamId,
    ) -> AppResult<TeamAccess> {
        let user = self.session_user(session).await?;

        Ok(self
            .rosters
            .read()
            .await
            .get(&team_id)
            .and_then(|roster| roster.role_of(user.id))
            .map(|role| TeamAccess::member(role.as_str()))
            .unwrap_or_else(TeamAccess::none))
    }
}

#[async_trait]
impl TaskOwnershipProvider for InMemoryTeamDirectory {
    async fn task_owner(
        &self,
        session: &SessionToken,
        task_id: TaskId,
    ) -> AppResult<Option<UserId>> {
        self.session_user(session).await?;
        Ok(self.task_owners.read().await.get(&task_id).copied())
    }
}

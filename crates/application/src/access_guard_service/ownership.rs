use taskgate_core::TaskId;
use taskgate_domain::Permission;

use super::*;

impl AccessGuardService {
    /// Allows the owner of a task, otherwise requires `permission` in the team.
    ///
    /// Ownership short-circuits regardless of team role, but only for a user
    /// the back-end has confirmed. A session whose cached id disagrees with the
    /// confirmed user is treated as unauthorized.
    pub async fn require_ownership_or_permission(
        &self,
        session: &SessionToken,
        task_id: Option<TaskId>,
        team_id: Option<TeamId>,
        permission: Permission,
    ) -> AccessDecision {
        let Some(task_id) = task_id else {
            return missing_context("task_id");
        };
        let Some(team_id) = team_id else {
            return missing_context("team_id");
        };

        let user = match self.current_user(session).await {
            Ok(user) => user,
            Err(decision) => return decision,
        };

        if let Some(cached_id) = self.session_provider.cached_user_id(session)
            && cached_id != user.id
        {
            warn!(%cached_id, user_id = %user.id, "session claims a different user than the back-end");
            return AccessDecision::deny_to_dashboard(DenialReason::UnauthorizedAccess);
        }

        match self.ownership_provider.task_owner(session, task_id).await {
            Ok(Some(owner_id)) if owner_id == user.id => {
                debug!(user_id = %user.id, %task_id, "task owner allowed");
                AccessDecision::Allow
            }
            Ok(_) => {
                self.require_permission_for_user(session, &user, permission, team_id)
                    .await
            }
            Err(error) => {
                warn!(%task_id, %error, "task ownership lookup failed during access check");
                AccessDecision::deny(DenialReason::AccessCheckFailed)
            }
        }
    }
}

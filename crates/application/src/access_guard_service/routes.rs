use taskgate_domain::{RouteParams, RouteRequirement};

use super::*;

impl AccessGuardService {
    /// Runs the guard matching a registered route requirement.
    pub async fn evaluate_route(
        &self,
        session: &SessionToken,
        requirement: &RouteRequirement,
        params: &RouteParams,
    ) -> AccessDecision {
        match requirement {
            RouteRequirement::GlobalRole { role } => {
                self.require_global_role(session, *role).await
            }
            RouteRequirement::Permission {
                permission,
                team_param,
            } => {
                self.require_permission(session, *permission, params.team_id(team_param))
                    .await
            }
            RouteRequirement::Ownership {
                permission,
                team_param,
                task_param,
            } => {
                self.require_ownership_or_permission(
                    session,
                    params.task_id(task_param),
                    params.team_id(team_param),
                    *permission,
                )
                .await
            }
        }
    }
}

use taskgate_domain::GlobalRole;

use super::*;

impl AccessGuardService {
    /// Requires the session user's global role to equal `required`.
    ///
    /// Denials send the user back to the dashboard.
    pub async fn require_global_role(
        &self,
        session: &SessionToken,
        required: GlobalRole,
    ) -> AccessDecision {
        let user = match self.current_user(session).await {
            Ok(user) => user,
            Err(decision) => return decision,
        };

        if user.global_role == required {
            return AccessDecision::Allow;
        }

        debug!(
            user_id = %user.id,
            required = required.as_str(),
            actual = user.global_role.as_str(),
            "global role check denied"
        );
        AccessDecision::deny_to_dashboard(DenialReason::UnauthorizedAccess)
    }
}

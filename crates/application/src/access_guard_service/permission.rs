use taskgate_core::AppResult;
use taskgate_domain::{OverrideDecision, Permission, TeamRole, compose, resolve_global_override};

use super::*;

impl AccessGuardService {
    /// Requires `permission` in the team identified by `team_id`.
    ///
    /// A missing team id denies before any lookup. A global override settles
    /// the check without consulting membership.
    pub async fn require_permission(
        &self,
        session: &SessionToken,
        permission: Permission,
        team_id: Option<TeamId>,
    ) -> AccessDecision {
        let Some(team_id) = team_id else {
            return missing_context("team_id");
        };

        let user = match self.current_user(session).await {
            Ok(user) => user,
            Err(decision) => return decision,
        };

        self.require_permission_for_user(session, &user, permission, team_id)
            .await
    }

    pub(super) async fn require_permission_for_user(
        &self,
        session: &SessionToken,
        user: &CurrentUser,
        permission: Permission,
        team_id: TeamId,
    ) -> AccessDecision {
        match resolve_global_override(user.global_role, permission) {
            OverrideDecision::Allow => return AccessDecision::Allow,
            OverrideDecision::Deny => {
                debug!(
                    user_id = %user.id,
                    permission = permission.as_str(),
                    "global role denies permission"
                );
                return AccessDecision::deny(DenialReason::TeamPermissionDenied);
            }
            OverrideDecision::NotApplicable => {}
        }

        let standing = match self.team_standing(session, user, team_id).await {
            Ok(standing) => standing,
            Err(error) => {
                log_membership_failure(team_id, &error);
                return AccessDecision::deny(DenialReason::AccessCheckFailed);
            }
        };

        let decision = match standing {
            TeamStanding::NotMember => AccessDecision::deny(DenialReason::TeamAccessDenied),
            TeamStanding::MemberWithoutRole => AccessDecision::deny(DenialReason::TeamAccessError),
            TeamStanding::Member(role)
                if compose(
                    user.global_role,
                    TeamRole::from_transport_lenient(Some(role.as_str())),
                    permission,
                ) =>
            {
                AccessDecision::Allow
            }
            TeamStanding::Member(_) => AccessDecision::deny(DenialReason::TeamPermissionDenied),
        };

        debug!(
            user_id = %user.id,
            %team_id,
            permission = permission.as_str(),
            allowed = decision.is_allowed(),
            "team permission check resolved"
        );
        decision
    }

    async fn team_standing(
        &self,
        session: &SessionToken,
        user: &CurrentUser,
        team_id: TeamId,
    ) -> AppResult<TeamStanding> {
        match self.membership_lookup {
            MembershipLookup::AccessRecord => {
                let access = self
                    .membership_provider
                    .validate_team_access(session, team_id)
                    .await?;

                Ok(match (access.has_access, access.role) {
                    (false, _) => TeamStanding::NotMember,
                    (true, None) => TeamStanding::MemberWithoutRole,
                    (true, Some(role)) => TeamStanding::Member(role),
                })
            }
            MembershipLookup::MemberList => {
                // An unknown team has no members, same as a missing access record.
                let members = match self
                    .membership_provider
                    .team_members(session, team_id)
                    .await
                {
                    Ok(members) => members,
                    Err(AppError::NotFound(_)) => return Ok(TeamStanding::NotMember),
                    Err(error) => return Err(error),
                };

                Ok(members
                    .into_iter()
                    .find(|member| member.user_id == user.id)
                    .map(|member| TeamStanding::Member(member.role))
                    .unwrap_or(TeamStanding::NotMember))
            }
        }
    }
}

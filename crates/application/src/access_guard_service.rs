use std::sync::Arc;

use taskgate_core::{AppError, SessionToken, TeamId};
use taskgate_domain::{AccessDecision, DenialReason};
use tracing::{debug, warn};

use crate::access_ports::{
    CurrentUser, SessionProvider, TaskOwnershipProvider, TeamMembershipProvider,
};

mod global_role;
mod ownership;
mod permission;
mod routes;

/// How the permission guard obtains the user's role in a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MembershipLookup {
    /// Ask the back-end for the session user's access record.
    #[default]
    AccessRecord,
    /// Fetch the team's member list and find the session user in it.
    MemberList,
}

/// Application service gating navigations and actions.
///
/// Every check fetches its own user and membership snapshot and resolves to an
/// [`AccessDecision`]. Lookup failures are logged and turned into denials; no
/// check ever returns an error.
#[derive(Clone)]
pub struct AccessGuardService {
    session_provider: Arc<dyn SessionProvider>,
    membership_provider: Arc<dyn TeamMembershipProvider>,
    ownership_provider: Arc<dyn TaskOwnershipProvider>,
    membership_lookup: MembershipLookup,
}

impl AccessGuardService {
    /// Creates a guard service from collaborator ports.
    #[must_use]
    pub fn new(
        session_provider: Arc<dyn SessionProvider>,
        membership_provider: Arc<dyn TeamMembershipProvider>,
        ownership_provider: Arc<dyn TaskOwnershipProvider>,
    ) -> Self {
        Self {
            session_provider,
            membership_provider,
            ownership_provider,
            membership_lookup: MembershipLookup::default(),
        }
    }

    /// Selects how team roles are looked up.
    #[must_use]
    pub fn with_membership_lookup(mut self, membership_lookup: MembershipLookup) -> Self {
        self.membership_lookup = membership_lookup;
        self
    }

    async fn current_user(&self, session: &SessionToken) -> Result<CurrentUser, AccessDecision> {
        match self.session_provider.current_user(session).await {
            Ok(user) => Ok(user),
            Err(AppError::Unauthorized(detail)) => {
                debug!(%detail, "session rejected during access check");
                Err(AccessDecision::deny_to_dashboard(
                    DenialReason::UnauthorizedAccess,
                ))
            }
            Err(error) => {
                warn!(%error, "current user lookup failed during access check");
                Err(AccessDecision::deny(DenialReason::AccessCheckFailed))
            }
        }
    }
}

/// Result of looking up the session user's standing in one team.
enum TeamStanding {
    NotMember,
    MemberWithoutRole,
    Member(String),
}

fn missing_context(parameter: &str) -> AccessDecision {
    debug!(parameter, "access check is missing a required route parameter");
    AccessDecision::deny(DenialReason::MissingContext)
}

fn log_membership_failure(team_id: TeamId, error: &AppError) {
    warn!(%team_id, %error, "team membership lookup failed during access check");
}

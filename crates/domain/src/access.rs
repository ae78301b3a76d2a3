use serde::{Deserialize, Serialize};

/// Machine-readable reason attached to every denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DenialReason {
    /// The guard ran without a route parameter it requires.
    MissingContext,
    /// A user or membership lookup failed in transport.
    AccessCheckFailed,
    /// No authenticated session, or the global role is insufficient.
    UnauthorizedAccess,
    /// The user holds no membership in the target team.
    TeamAccessDenied,
    /// The user's role does not grant the permission.
    TeamPermissionDenied,
    /// The membership record was inconsistent and could not be evaluated.
    TeamAccessError,
}

impl DenialReason {
    /// Returns the stable reason code used in redirect query parameters.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingContext => "MissingContext",
            Self::AccessCheckFailed => "AccessCheckFailed",
            Self::UnauthorizedAccess => "UnauthorizedAccess",
            Self::TeamAccessDenied => "TeamAccessDenied",
            Self::TeamPermissionDenied => "TeamPermissionDenied",
            Self::TeamAccessError => "TeamAccessError",
        }
    }

    /// Returns the user-visible notification text for this reason.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingContext => "This page could not determine which team it belongs to.",
            Self::AccessCheckFailed => "We could not verify your access. Please try again.",
            Self::UnauthorizedAccess => "You are not authorized to access this page.",
            Self::TeamAccessDenied => "You are not a member of this team.",
            Self::TeamPermissionDenied => "Your role in this team does not allow this action.",
            Self::TeamAccessError => "Your team access could not be determined.",
        }
    }
}

/// Where the router should send a denied navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectTarget {
    /// The default authenticated landing location.
    Dashboard,
    /// The dedicated error page, carrying the reason code.
    ErrorPage,
}

/// Details of a refused navigation or action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Denial {
    reason: DenialReason,
    redirect: RedirectTarget,
    message: String,
}

impl Denial {
    /// Creates a denial with an explicit redirect target.
    #[must_use]
    pub fn new(reason: DenialReason, redirect: RedirectTarget) -> Self {
        Self {
            reason,
            redirect,
            message: reason.user_message().to_owned(),
        }
    }

    /// Replaces the default user-visible message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Returns the reason code.
    #[must_use]
    pub fn reason(&self) -> DenialReason {
        self.reason
    }

    /// Returns the redirect target.
    #[must_use]
    pub fn redirect(&self) -> RedirectTarget {
        self.redirect
    }

    /// Returns the user-visible message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Terminal outcome of one access check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AccessDecision {
    /// Navigation or action may proceed.
    Allow,
    /// Navigation must redirect.
    Deny(Denial),
}

impl AccessDecision {
    /// Denies with a redirect to the error page.
    #[must_use]
    pub fn deny(reason: DenialReason) -> Self {
        Self::Deny(Denial::new(reason, RedirectTarget::ErrorPage))
    }

    /// Denies with a redirect to the dashboard.
    #[must_use]
    pub fn deny_to_dashboard(reason: DenialReason) -> Self {
        Self::Deny(Denial::new(reason, RedirectTarget::Dashboard))
    }

    /// Returns whether the decision allows the navigation.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Returns the denial reason, if denied.
    #[must_use]
    pub fn reason(&self) -> Option<DenialReason> {
        match self {
            Self::Allow => None,
            Self::Deny(denial) => Some(denial.reason()),
        }
    }

    /// Returns the denial details, if denied.
    #[must_use]
    pub fn denial(&self) -> Option<&Denial> {
        match self {
            Self::Allow => None,
            Self::Deny(denial) => Some(denial),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AccessDecision, DenialReason, RedirectTarget};

    #[test]
    fn reason_codes_are_stable() {
        assert_eq!(DenialReason::TeamAccessDenied.as_str(), "TeamAccessDenied");
        assert_eq!(DenialReason::MissingContext.as_str(), "MissingContext");
    }

    #[test]
    fn deny_defaults_to_error_page_with_reason_message() {
        let decision = AccessDecision::deny(DenialReason::TeamPermissionDenied);
        let denial = decision.denial();
        assert!(denial.is_some_and(|denial| denial.redirect() == RedirectTarget::ErrorPage));
        assert!(denial.is_some_and(|denial| {
            denial.message() == DenialReason::TeamPermissionDenied.user_message()
        }));
        assert!(!decision.is_allowed());
    }

    #[test]
    fn allow_carries_no_reason() {
        assert_eq!(AccessDecision::Allow.reason(), None);
    }
}

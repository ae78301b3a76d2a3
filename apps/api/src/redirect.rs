use taskgate_domain::{Denial, RedirectTarget};
use url::form_urlencoded;

use crate::api_config::RedirectPaths;

/// Renders the front-end location a denied navigation is sent to.
pub fn render_redirect(paths: &RedirectPaths, denial: &Denial) -> String {
    match denial.redirect() {
        RedirectTarget::Dashboard => paths.dashboard.clone(),
        RedirectTarget::ErrorPage => {
            let query = form_urlencoded::Serializer::new(String::new())
                .append_pair("reason", denial.reason().as_str())
                .finish();
            format!("{}?{query}", paths.error)
        }
    }
}

#[cfg(test)]
mod tests {
    use taskgate_domain::{AccessDecision, DenialReason};

    use super::render_redirect;
    use crate::api_config::RedirectPaths;

    fn paths() -> RedirectPaths {
        RedirectPaths {
            dashboard: "/dashboard".to_owned(),
            error: "/error".to_owned(),
        }
    }

    #[test]
    fn error_page_carries_reason_code() {
        let decision = AccessDecision::deny(DenialReason::TeamPermissionDenied);
        let Some(denial) = decision.denial() else {
            panic!("decision should be a denial");
        };

        assert_eq!(
            render_redirect(&paths(), denial),
            "/error?reason=TeamPermissionDenied"
        );
    }

    #[test]
    fn dashboard_redirect_has_no_query() {
        let decision = AccessDecision::deny_to_dashboard(DenialReason::UnauthorizedAccess);
        let Some(denial) = decision.denial() else {
            panic!("decision should be a denial");
        };

        assert_eq!(render_redirect(&paths(), denial), "/dashboard");
    }
}

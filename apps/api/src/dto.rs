use serde::{Deserialize, Serialize};
use taskgate_domain::{AccessDecision, RegisteredRoute, RouteRequirement};
use ts_rs::TS;

use crate::api_config::RedirectPaths;
use crate::redirect::render_redirect;

/// Liveness payload with the gate's wiring.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
    pub backend_mode: &'static str,
    pub guarded_routes: usize,
}

/// Incoming payload for a navigation check.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/check-route-request.ts"
)]
pub struct CheckRouteRequest {
    pub path: String,
}

/// Incoming payload for a pre-mutation permission check.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/check-permission-request.ts"
)]
pub struct CheckPermissionRequest {
    pub permission: String,
    pub team_id: Option<String>,
    pub task_id: Option<String>,
}

/// Outcome of an access check, ready for the front-end router.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/access-decision-response.ts"
)]
pub struct AccessDecisionResponse {
    pub allowed: bool,
    pub reason: Option<String>,
    pub redirect: Option<String>,
    pub message: Option<String>,
}

impl AccessDecisionResponse {
    pub fn from_decision(decision: &AccessDecision, paths: &RedirectPaths) -> Self {
        match decision.denial() {
            None => Self {
                allowed: true,
                reason: None,
                redirect: None,
                message: None,
            },
            Some(denial) => Self {
                allowed: false,
                reason: Some(denial.reason().as_str().to_owned()),
                redirect: Some(render_redirect(paths, denial)),
                message: Some(denial.message().to_owned()),
            },
        }
    }
}

/// API representation of one guarded front-end route.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/guarded-route-response.ts"
)]
pub struct GuardedRouteResponse {
    pub pattern: String,
    pub kind: String,
    pub global_role: Option<String>,
    pub permission: Option<String>,
}

impl From<&RegisteredRoute> for GuardedRouteResponse {
    fn from(value: &RegisteredRoute) -> Self {
        let pattern = value.pattern().as_str().to_owned();
        match value.requirement() {
            RouteRequirement::GlobalRole { role } => Self {
                pattern,
                kind: "global_role".to_owned(),
                global_role: Some(role.as_str().to_owned()),
                permission: None,
            },
            RouteRequirement::Permission { permission, .. } => Self {
                pattern,
                kind: "permission".to_owned(),
                global_role: None,
                permission: Some(permission.as_str().to_owned()),
            },
            RouteRequirement::Ownership { permission, .. } => Self {
                pattern,
                kind: "ownership".to_owned(),
                global_role: None,
                permission: Some(permission.as_str().to_owned()),
            },
        }
    }
}

use std::str::FromStr;

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use taskgate_application::NavigationOutcome;
use taskgate_core::{AppError, SessionToken, TaskId, TeamId};
use taskgate_domain::{AccessDecision, DenialReason, Permission};
use tracing::{debug, info};

use crate::dto::{
    AccessDecisionResponse, CheckPermissionRequest, CheckRouteRequest, GuardedRouteResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_guarded_routes_handler(
    State(state): State<AppState>,
) -> Json<Vec<GuardedRouteResponse>> {
    Json(
        state
            .route_table
            .routes()
            .iter()
            .map(GuardedRouteResponse::from)
            .collect(),
    )
}

/// Gates one front-end navigation.
///
/// The check runs under the session's navigation gate: a later navigation from
/// the same session abandons this one, which then answers with a conflict.
pub async fn check_route_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CheckRouteRequest>,
) -> ApiResult<Json<AccessDecisionResponse>> {
    let route_match = state.route_table.resolve(payload.path.as_str()).ok_or_else(|| {
        AppError::NotFound(format!("no guarded route matches '{}'", payload.path))
    })?;

    let Some(session) = session_from_headers(&headers) else {
        return Ok(Json(AccessDecisionResponse::from_decision(
            &AccessDecision::deny_to_dashboard(DenialReason::UnauthorizedAccess),
            &state.redirect_paths,
        )));
    };

    let gate = state.navigation_gates.gate_for(&session).await;
    let ticket = gate.begin();
    let navigation_id = ticket.id();
    let outcome = ticket
        .run(state.access_guard_service.evaluate_route(
            &session,
            route_match.route.requirement(),
            &route_match.params,
        ))
        .await;
    state.navigation_gates.release(&session, gate).await;

    match outcome {
        NavigationOutcome::Completed(decision) => {
            log_decision(payload.path.as_str(), &decision);
            Ok(Json(AccessDecisionResponse::from_decision(
                &decision,
                &state.redirect_paths,
            )))
        }
        NavigationOutcome::Superseded => {
            debug!(path = %payload.path, navigation_id, "navigation superseded");
            Err(AppError::Conflict(format!(
                "navigation to '{}' was superseded by a newer navigation",
                payload.path
            ))
            .into())
        }
    }
}

/// Checks a single permission before a mutation, outside navigation gating.
pub async fn check_permission_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CheckPermissionRequest>,
) -> ApiResult<Json<AccessDecisionResponse>> {
    let permission = Permission::from_transport(payload.permission.as_str())?;

    let Some(session) = session_from_headers(&headers) else {
        return Ok(Json(AccessDecisionResponse::from_decision(
            &AccessDecision::deny_to_dashboard(DenialReason::UnauthorizedAccess),
            &state.redirect_paths,
        )));
    };

    let team_id = parse_optional_id::<TeamId>(payload.team_id.as_deref());
    let decision = match payload.task_id.as_deref() {
        Some(task_id) => {
            state
                .access_guard_service
                .require_ownership_or_permission(
                    &session,
                    parse_optional_id::<TaskId>(Some(task_id)),
                    team_id,
                    permission,
                )
                .await
        }
        None => {
            state
                .access_guard_service
                .require_permission(&session, permission, team_id)
                .await
        }
    };

    log_decision(permission.as_str(), &decision);
    Ok(Json(AccessDecisionResponse::from_decision(
        &decision,
        &state.redirect_paths,
    )))
}

fn session_from_headers(headers: &HeaderMap) -> Option<SessionToken> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    SessionToken::from_authorization_header(value).ok()
}

// Malformed ids count as absent so the guard reports missing context.
fn parse_optional_id<T: FromStr>(value: Option<&str>) -> Option<T> {
    value.and_then(|value| value.parse::<T>().ok())
}

fn log_decision(subject: &str, decision: &AccessDecision) {
    match decision.reason() {
        None => debug!(subject, "access allowed"),
        Some(reason) => info!(subject, reason = reason.as_str(), "access denied"),
    }
}

#[cfg(test)]
mod tests;

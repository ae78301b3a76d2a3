use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, header};
use taskgate_application::{AccessGuardService, CurrentUser};
use taskgate_core::{AppError, SessionToken, TaskId, TeamId, UserId};
use taskgate_domain::{GlobalRole, TeamRole};
use taskgate_infrastructure::InMemoryTeamDirectory;

use super::{check_permission_handler, check_route_handler, list_guarded_routes_handler};
use crate::api_config::RedirectPaths;
use crate::dto::{AccessDecisionResponse, CheckPermissionRequest, CheckRouteRequest};
use crate::error::ApiError;
use crate::route_catalog::build_route_table;
use crate::state::{AppState, NavigationGates};

struct Fixture {
    state: AppState,
    team_id: TeamId,
    task_id: TaskId,
}

async fn fixture() -> Fixture {
    let directory = Arc::new(InMemoryTeamDirectory::new());
    let team_id = TeamId::new();
    let task_id = TaskId::new();
    let admin_id = UserId::new();
    let member_id = UserId::new();
    let outsider_id = UserId::new();

    register(&directory, "admin", admin_id, GlobalRole::Admin).await;
    register(&directory, "member", member_id, GlobalRole::Basic).await;
    register(&directory, "outsider", outsider_id, GlobalRole::Basic).await;
    assert!(
        directory
            .add_member(team_id, member_id, TeamRole::Member)
            .await
            .is_ok()
    );
    directory.assign_task_owner(task_id, member_id).await;

    let Ok(route_table) = build_route_table() else {
        panic!("route catalog should register");
    };

    Fixture {
        state: AppState {
            access_guard_service: AccessGuardService::new(
                directory.clone(),
                directory.clone(),
                directory,
            ),
            route_table: Arc::new(route_table),
            navigation_gates: NavigationGates::default(),
            redirect_paths: Arc::new(RedirectPaths {
                dashboard: "/dashboard".to_owned(),
                error: "/error".to_owned(),
            }),
            backend_mode: "in_memory",
        },
        team_id,
        task_id,
    }
}

async fn register(
    directory: &InMemoryTeamDirectory,
    token: &str,
    id: UserId,
    global_role: GlobalRole,
) {
    let Ok(session) = SessionToken::new(token) else {
        panic!("token should be valid");
    };
    directory
        .register_session(session, CurrentUser { id, global_role })
        .await;
}

fn bearer(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let Ok(value) = HeaderValue::from_str(&format!("Bearer {token}")) else {
        panic!("header should be valid");
    };
    headers.insert(header::AUTHORIZATION, value);
    headers
}

async fn check_route(
    state: &AppState,
    headers: HeaderMap,
    path: String,
) -> Result<AccessDecisionResponse, ApiError> {
    check_route_handler(State(state.clone()), headers, Json(CheckRouteRequest { path }))
        .await
        .map(|Json(response)| response)
}

#[tokio::test]
async fn member_may_open_team_tasks() {
    let fixture = fixture().await;

    let response = check_route(
        &fixture.state,
        bearer("member"),
        format!("/teams/{}/tasks", fixture.team_id),
    )
    .await;

    assert!(matches!(response, Ok(ref response) if response.allowed && response.redirect.is_none()));
}

#[tokio::test]
async fn member_is_sent_to_error_page_for_team_settings() {
    let fixture = fixture().await;

    let response = check_route(
        &fixture.state,
        bearer("member"),
        format!("/teams/{}/settings", fixture.team_id),
    )
    .await;

    assert!(matches!(
        response,
        Ok(ref response)
            if !response.allowed
                && response.reason.as_deref() == Some("TeamPermissionDenied")
                && response.redirect.as_deref() == Some("/error?reason=TeamPermissionDenied")
    ));
}

#[tokio::test]
async fn outsider_is_denied_team_access() {
    let fixture = fixture().await;

    let response = check_route(
        &fixture.state,
        bearer("outsider"),
        format!("/teams/{}", fixture.team_id),
    )
    .await;

    assert!(matches!(
        response,
        Ok(ref response) if response.reason.as_deref() == Some("TeamAccessDenied")
    ));
}

#[tokio::test]
async fn global_admin_may_view_but_not_edit_tasks() {
    let fixture = fixture().await;

    let view = check_route(
        &fixture.state,
        bearer("admin"),
        format!("/teams/{}/tasks/{}", fixture.team_id, fixture.task_id),
    )
    .await;
    let edit = check_route(
        &fixture.state,
        bearer("admin"),
        format!("/teams/{}/tasks/{}/edit", fixture.team_id, fixture.task_id),
    )
    .await;

    assert!(matches!(view, Ok(ref response) if response.allowed));
    assert!(matches!(
        edit,
        Ok(ref response) if response.reason.as_deref() == Some("TeamPermissionDenied")
    ));
}

#[tokio::test]
async fn basic_user_is_sent_to_dashboard_from_admin_area() {
    let fixture = fixture().await;

    let response = check_route(&fixture.state, bearer("member"), "/admin/users".to_owned()).await;

    assert!(matches!(
        response,
        Ok(ref response)
            if response.reason.as_deref() == Some("UnauthorizedAccess")
                && response.redirect.as_deref() == Some("/dashboard")
    ));
}

#[tokio::test]
async fn missing_session_is_sent_to_dashboard() {
    let fixture = fixture().await;

    let response = check_route(
        &fixture.state,
        HeaderMap::new(),
        format!("/teams/{}", fixture.team_id),
    )
    .await;

    assert!(matches!(
        response,
        Ok(ref response) if response.redirect.as_deref() == Some("/dashboard")
    ));
}

#[tokio::test]
async fn unguarded_path_is_not_found() {
    let fixture = fixture().await;

    let response = check_route(&fixture.state, bearer("member"), "/nowhere".to_owned()).await;

    assert!(matches!(response, Err(ApiError(AppError::NotFound(_)))));
}

#[tokio::test]
async fn malformed_team_id_reports_missing_context() {
    let fixture = fixture().await;

    let response = check_route(
        &fixture.state,
        bearer("member"),
        "/teams/not-a-uuid/tasks".to_owned(),
    )
    .await;

    assert!(matches!(
        response,
        Ok(ref response) if response.reason.as_deref() == Some("MissingContext")
    ));
}

#[tokio::test]
async fn completed_checks_release_their_gate() {
    let fixture = fixture().await;

    let _ = check_route(
        &fixture.state,
        bearer("member"),
        format!("/teams/{}", fixture.team_id),
    )
    .await;

    assert_eq!(fixture.state.navigation_gates.tracked_sessions().await, 0);
}

#[tokio::test]
async fn task_owner_passes_management_check() {
    let fixture = fixture().await;

    let response = check_permission_handler(
        State(fixture.state.clone()),
        bearer("member"),
        Json(CheckPermissionRequest {
            permission: "MANAGE_TASK".to_owned(),
            team_id: Some(fixture.team_id.to_string()),
            task_id: Some(fixture.task_id.to_string()),
        }),
    )
    .await;

    assert!(matches!(response, Ok(Json(ref response)) if response.allowed));
}

#[tokio::test]
async fn permission_check_without_team_reports_missing_context() {
    let fixture = fixture().await;

    let response = check_permission_handler(
        State(fixture.state.clone()),
        bearer("member"),
        Json(CheckPermissionRequest {
            permission: "CREATE_TASK".to_owned(),
            team_id: None,
            task_id: None,
        }),
    )
    .await;

    assert!(matches!(
        response,
        Ok(Json(ref response)) if response.reason.as_deref() == Some("MissingContext")
    ));
}

#[tokio::test]
async fn unknown_permission_is_rejected() {
    let fixture = fixture().await;

    let response = check_permission_handler(
        State(fixture.state.clone()),
        bearer("member"),
        Json(CheckPermissionRequest {
            permission: "DELETE_EVERYTHING".to_owned(),
            team_id: Some(fixture.team_id.to_string()),
            task_id: None,
        }),
    )
    .await;

    assert!(matches!(response, Err(ApiError(AppError::Validation(_)))));
}

#[tokio::test]
async fn guarded_routes_are_listed() {
    let fixture = fixture().await;

    let Json(routes) = list_guarded_routes_handler(State(fixture.state.clone())).await;

    assert!(routes.iter().any(|route| {
        route.pattern == "/teams/{team_id}/tasks/{task_id}/manage"
            && route.kind == "ownership"
            && route.permission.as_deref() == Some("MANAGE_TASK")
    }));
}

#[tokio::test]
async fn health_reports_backend_and_route_count() {
    let fixture = fixture().await;
    let expected_routes = fixture.state.route_table.routes().len();

    let axum::Json(health) =
        crate::handlers::health::health_handler(State(fixture.state.clone())).await;

    assert_eq!(health.status, "ok");
    assert_eq!(health.backend_mode, "in_memory");
    assert_eq!(health.guarded_routes, expected_routes);
}

use taskgate_core::AppResult;
use taskgate_domain::{GlobalRole, Permission, RouteRequirement, RouteTable};

/// Guarded front-end routes of the tracking application.
///
/// Literal segments are registered before parameter segments at the same
/// depth because the first matching route wins.
pub fn build_route_table() -> AppResult<RouteTable> {
    RouteTable::new()
        .with_route(
            "/admin/users",
            RouteRequirement::global_role(GlobalRole::Admin),
        )?
        .with_route(
            "/admin/teams",
            RouteRequirement::global_role(GlobalRole::Admin),
        )?
        .with_route(
            "/teams/{team_id}",
            RouteRequirement::permission(Permission::ViewTeam, "team_id"),
        )?
        .with_route(
            "/teams/{team_id}/settings",
            RouteRequirement::permission(Permission::ManageTeam, "team_id"),
        )?
        .with_route(
            "/teams/{team_id}/members",
            RouteRequirement::permission(Permission::ManageTeam, "team_id"),
        )?
        .with_route(
            "/teams/{team_id}/projects",
            RouteRequirement::permission(Permission::ViewProject, "team_id"),
        )?
        .with_route(
            "/teams/{team_id}/projects/new",
            RouteRequirement::permission(Permission::ManageProject, "team_id"),
        )?
        .with_route(
            "/teams/{team_id}/projects/{project_id}",
            RouteRequirement::permission(Permission::ViewProject, "team_id"),
        )?
        .with_route(
            "/teams/{team_id}/projects/{project_id}/edit",
            RouteRequirement::permission(Permission::ManageProject, "team_id"),
        )?
        .with_route(
            "/teams/{team_id}/tasks",
            RouteRequirement::permission(Permission::ViewTask, "team_id"),
        )?
        .with_route(
            "/teams/{team_id}/tasks/new",
            RouteRequirement::permission(Permission::CreateTask, "team_id"),
        )?
        .with_route(
            "/teams/{team_id}/tasks/{task_id}",
            RouteRequirement::permission(Permission::ViewTask, "team_id"),
        )?
        .with_route(
            "/teams/{team_id}/tasks/{task_id}/edit",
            RouteRequirement::permission(Permission::UpdateTask, "team_id"),
        )?
        .with_route(
            "/teams/{team_id}/tasks/{task_id}/manage",
            RouteRequirement::ownership(Permission::ManageTask, "team_id", "task_id"),
        )
}

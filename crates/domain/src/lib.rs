//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod access;
mod membership;
mod resolver;
mod role;
mod route;
mod security;

pub use access::{AccessDecision, Denial, DenialReason, RedirectTarget};
pub use membership::{TeamMembership, TeamRoster};
pub use resolver::{OverrideDecision, compose, resolve_global_override, resolve_team_role};
pub use role::{GlobalRole, TeamRole};
pub use route::{
    RegisteredRoute, RouteMatch, RouteParams, RoutePattern, RouteRequirement, RouteTable,
};
pub use security::{Permission, PermissionMatrix};

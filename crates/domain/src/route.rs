//! Typed route access metadata.
//!
//! Guarded routes are registered once at start-up. Registration rejects
//! malformed patterns and requirements that name a parameter the pattern does
//! not capture, so a misconfigured route fails at boot rather than denying
//! every navigation at runtime.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use taskgate_core::{AppError, AppResult, TaskId, TeamId};

use crate::{GlobalRole, Permission};

/// Access requirement attached to a guarded route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteRequirement {
    /// The user's global role must equal `role`.
    GlobalRole {
        /// Required global role.
        role: GlobalRole,
    },
    /// The user must hold `permission` in the team captured by `team_param`.
    Permission {
        /// Required permission.
        permission: Permission,
        /// Pattern parameter carrying the team id.
        team_param: String,
    },
    /// The user must own the task captured by `task_param`, or hold
    /// `permission` in the team captured by `team_param`.
    Ownership {
        /// Management permission used when the user is not the owner.
        permission: Permission,
        /// Pattern parameter carrying the team id.
        team_param: String,
        /// Pattern parameter carrying the task id.
        task_param: String,
    },
}

impl RouteRequirement {
    /// Requires a global role.
    #[must_use]
    pub fn global_role(role: GlobalRole) -> Self {
        Self::GlobalRole { role }
    }

    /// Requires a team-scoped permission.
    #[must_use]
    pub fn permission(permission: Permission, team_param: impl Into<String>) -> Self {
        Self::Permission {
            permission,
            team_param: team_param.into(),
        }
    }

    /// Requires task ownership or a team-scoped management permission.
    #[must_use]
    pub fn ownership(
        permission: Permission,
        team_param: impl Into<String>,
        task_param: impl Into<String>,
    ) -> Self {
        Self::Ownership {
            permission,
            team_param: team_param.into(),
            task_param: task_param.into(),
        }
    }

    fn referenced_params(&self) -> Vec<&str> {
        match self {
            Self::GlobalRole { .. } => Vec::new(),
            Self::Permission { team_param, .. } => vec![team_param.as_str()],
            Self::Ownership {
                team_param,
                task_param,
                ..
            } => vec![team_param.as_str(), task_param.as_str()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// Parsed route pattern such as `/teams/{team_id}/projects`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parses and validates a route pattern.
    pub fn parse(value: &str) -> AppResult<Self> {
        let raw = value.trim();
        if !raw.starts_with('/') {
            return Err(AppError::Validation(format!(
                "route pattern '{raw}' must start with '/'"
            )));
        }

        let mut segments = Vec::new();
        for part in split_path(raw) {
            let segment = match part.strip_prefix('{').and_then(|rest| rest.strip_suffix('}')) {
                Some(name) if is_valid_param_name(name) => Segment::Param(name.to_owned()),
                Some(name) => {
                    return Err(AppError::Validation(format!(
                        "route pattern '{raw}' has invalid parameter name '{name}'"
                    )));
                }
                None if part.contains(['{', '}']) => {
                    return Err(AppError::Validation(format!(
                        "route pattern '{raw}' has malformed segment '{part}'"
                    )));
                }
                None => Segment::Literal(part.to_owned()),
            };

            if let Segment::Param(name) = &segment {
                let duplicate = segments
                    .iter()
                    .any(|existing| matches!(existing, Segment::Param(other) if other == name));
                if duplicate {
                    return Err(AppError::Validation(format!(
                        "route pattern '{raw}' captures parameter '{name}' twice"
                    )));
                }
            }

            segments.push(segment);
        }

        Ok(Self {
            raw: raw.to_owned(),
            segments,
        })
    }

    /// Returns the pattern text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.raw.as_str()
    }

    /// Returns whether the pattern captures a parameter with this name.
    #[must_use]
    pub fn captures(&self, name: &str) -> bool {
        self.segments
            .iter()
            .any(|segment| matches!(segment, Segment::Param(param) if param == name))
    }

    /// Matches a concrete path, returning captured parameters.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<RouteParams> {
        let parts: Vec<&str> = split_path(path.split(['?', '#']).next().unwrap_or_default());
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = RouteParams::default();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => params.insert(name.clone(), part.to_owned()),
            }
        }

        Some(params)
    }
}

fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|part| !part.is_empty()).collect()
}

fn is_valid_param_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|character| character.is_ascii_alphanumeric() || character == '_')
}

/// Parameters captured from a concrete path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    values: HashMap<String, String>,
}

impl RouteParams {
    /// Records a captured parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Returns a raw parameter value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Returns a parameter parsed as a team id; malformed values read as absent.
    #[must_use]
    pub fn team_id(&self, name: &str) -> Option<TeamId> {
        self.get(name)
            .and_then(|value| TeamId::from_str(value).ok())
    }

    /// Returns a parameter parsed as a task id; malformed values read as absent.
    #[must_use]
    pub fn task_id(&self, name: &str) -> Option<TaskId> {
        self.get(name)
            .and_then(|value| TaskId::from_str(value).ok())
    }
}

/// One registered guarded route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredRoute {
    pattern: RoutePattern,
    requirement: RouteRequirement,
}

impl RegisteredRoute {
    /// Returns the route pattern.
    #[must_use]
    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    /// Returns the route's access requirement.
    #[must_use]
    pub fn requirement(&self) -> &RouteRequirement {
        &self.requirement
    }
}

/// A concrete path resolved against the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    /// Route that matched.
    pub route: &'a RegisteredRoute,
    /// Parameters captured from the path.
    pub params: RouteParams,
}

/// Registry of guarded routes, validated on registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<RegisteredRoute>,
}

impl RouteTable {
    /// Creates an empty route table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a guarded route.
    pub fn register(&mut self, pattern: &str, requirement: RouteRequirement) -> AppResult<()> {
        let pattern = RoutePattern::parse(pattern)?;

        if self
            .routes
            .iter()
            .any(|route| route.pattern.segments == pattern.segments)
        {
            return Err(AppError::Conflict(format!(
                "route pattern '{}' is already registered",
                pattern.as_str()
            )));
        }

        if let Some(missing) = requirement
            .referenced_params()
            .into_iter()
            .find(|name| !pattern.captures(name))
        {
            return Err(AppError::Validation(format!(
                "route '{}' requires parameter '{missing}' which the pattern does not capture",
                pattern.as_str()
            )));
        }

        self.routes.push(RegisteredRoute {
            pattern,
            requirement,
        });
        Ok(())
    }

    /// Registers a guarded route, returning the table for chaining.
    pub fn with_route(mut self, pattern: &str, requirement: RouteRequirement) -> AppResult<Self> {
        self.register(pattern, requirement)?;
        Ok(self)
    }

    /// Resolves a concrete path to the first registered route matching it.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<RouteMatch<'_>> {
        self.routes.iter().find_map(|route| {
            route
                .pattern
                .match_path(path)
                .map(|params| RouteMatch { route, params })
        })
    }

    /// Lists registered routes in registration order.
    #[must_use]
    pub fn routes(&self) -> &[RegisteredRoute] {
        &self.routes
    }
}

#[cfg(test)]
mod tests {
    use taskgate_core::{AppError, TeamId};

    use super::{RoutePattern, RouteRequirement, RouteTable};
    use crate::{GlobalRole, Permission};

    #[test]
    fn pattern_captures_parameters() {
        let pattern = RoutePattern::parse("/teams/{team_id}/projects");
        assert!(pattern.is_ok());
        let Ok(pattern) = pattern else { return };

        let team_id = TeamId::new();
        let params = pattern.match_path(&format!("/teams/{team_id}/projects?tab=board"));
        assert_eq!(params.and_then(|params| params.team_id("team_id")), Some(team_id));
        assert!(pattern.match_path("/teams/projects").is_none());
    }

    #[test]
    fn malformed_patterns_are_rejected() {
        assert!(RoutePattern::parse("teams").is_err());
        assert!(RoutePattern::parse("/teams/{team-id}").is_err());
        assert!(RoutePattern::parse("/teams/{id}/tasks/{id}").is_err());
        assert!(RoutePattern::parse("/teams/x{id}").is_err());
    }

    #[test]
    fn requirement_must_reference_captured_parameters() {
        let mut table = RouteTable::new();
        let result = table.register(
            "/teams/{id}/settings",
            RouteRequirement::permission(Permission::ManageTeam, "team_id"),
        );
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn duplicate_patterns_conflict() {
        let table = RouteTable::new().with_route(
            "/admin/users",
            RouteRequirement::global_role(GlobalRole::Admin),
        );
        assert!(table.is_ok());
        let Ok(mut table) = table else { return };

        let result = table.register(
            "/admin/users/",
            RouteRequirement::global_role(GlobalRole::Basic),
        );
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[test]
    fn malformed_ids_read_as_absent() {
        let table = RouteTable::new().with_route(
            "/teams/{team_id}",
            RouteRequirement::permission(Permission::ViewTeam, "team_id"),
        );
        let Ok(table) = table else { return };

        let matched = table.resolve("/teams/not-a-uuid");
        assert!(matched.is_some_and(|matched| matched.params.team_id("team_id").is_none()));
        assert!(table.resolve("/projects").is_none());
    }
}

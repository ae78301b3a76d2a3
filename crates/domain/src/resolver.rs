//! Pure permission resolution over global and team roles.
//!
//! Resolution happens in two stages. The global role is consulted first and
//! may settle the question outright; only when it does not apply is the
//! user's role in the specific team looked up in [`PermissionMatrix`].

use serde::{Deserialize, Serialize};

use crate::{GlobalRole, Permission, PermissionMatrix, TeamRole};

/// Outcome of the global-role stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverrideDecision {
    /// The global role grants the permission; no team lookup is needed.
    Allow,
    /// The global role refuses the permission; no team lookup may override it.
    Deny,
    /// The global role has no say; fall through to the team role.
    NotApplicable,
}

impl OverrideDecision {
    /// Returns whether this stage settles the check.
    #[must_use]
    pub fn is_final(&self) -> bool {
        !matches!(self, Self::NotApplicable)
    }
}

/// Permissions a global administrator holds in every team.
///
/// Administrators observe everything but never author team content: any
/// permission outside this set is an explicit denial.
const GLOBAL_ADMIN_GRANTS: &[Permission] = &[
    Permission::ManageTeam,
    Permission::ViewTeam,
    Permission::ViewProject,
    Permission::ViewTask,
];

/// Resolves the global-role stage for one permission.
#[must_use]
pub fn resolve_global_override(role: GlobalRole, permission: Permission) -> OverrideDecision {
    match role {
        GlobalRole::Admin if GLOBAL_ADMIN_GRANTS.contains(&permission) => OverrideDecision::Allow,
        GlobalRole::Admin => OverrideDecision::Deny,
        GlobalRole::Basic => OverrideDecision::NotApplicable,
    }
}

/// Resolves the team-role stage for one permission.
#[must_use]
pub fn resolve_team_role(role: TeamRole, permission: Permission) -> bool {
    PermissionMatrix::grants(role, permission)
}

/// Composes both stages: a final override wins, otherwise the team role decides.
///
/// `team_role` is `None` when the user holds no membership in the team or
/// the reported role is not recognised.
#[must_use]
pub fn compose(
    global_role: GlobalRole,
    team_role: Option<TeamRole>,
    permission: Permission,
) -> bool {
    match resolve_global_override(global_role, permission) {
        OverrideDecision::Allow => true,
        OverrideDecision::Deny => false,
        OverrideDecision::NotApplicable => {
            team_role.is_some_and(|role| resolve_team_role(role, permission))
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{OverrideDecision, compose, resolve_global_override, resolve_team_role};
    use crate::{GlobalRole, Permission, TeamRole};

    const MATRIX: &[(Permission, bool, bool, bool)] = &[
        (Permission::ManageTeam, true, false, false),
        (Permission::ViewTeam, true, false, false),
        (Permission::ManageProject, false, true, false),
        (Permission::ViewProject, true, true, true),
        (Permission::ManageTask, false, true, false),
        (Permission::ViewTask, true, true, true),
        (Permission::CreateTask, false, true, true),
        (Permission::UpdateTask, false, true, true),
    ];

    #[test]
    fn team_roles_match_the_reference_matrix() {
        for (permission, admin, leader, member) in MATRIX {
            assert_eq!(resolve_team_role(TeamRole::Admin, *permission), *admin);
            assert_eq!(resolve_team_role(TeamRole::Leader, *permission), *leader);
            assert_eq!(resolve_team_role(TeamRole::Member, *permission), *member);
        }
    }

    #[test]
    fn reference_matrix_covers_every_permission() {
        assert_eq!(MATRIX.len(), Permission::all().len());
    }

    #[test]
    fn global_admin_observes_but_does_not_author() {
        let expected = [
            (Permission::ManageTeam, OverrideDecision::Allow),
            (Permission::ViewTeam, OverrideDecision::Allow),
            (Permission::ViewProject, OverrideDecision::Allow),
            (Permission::ViewTask, OverrideDecision::Allow),
            (Permission::ManageProject, OverrideDecision::Deny),
            (Permission::ManageTask, OverrideDecision::Deny),
            (Permission::CreateTask, OverrideDecision::Deny),
            (Permission::UpdateTask, OverrideDecision::Deny),
        ];

        for (permission, decision) in expected {
            assert_eq!(
                resolve_global_override(GlobalRole::Admin, permission),
                decision
            );
        }
    }

    #[test]
    fn basic_users_never_receive_an_override() {
        for permission in Permission::all() {
            assert_eq!(
                resolve_global_override(GlobalRole::Basic, *permission),
                OverrideDecision::NotApplicable
            );
        }
    }

    #[test]
    fn unknown_team_role_values_fail_closed() {
        let compose_raw = |role: Option<&str>| {
            compose(
                GlobalRole::Basic,
                TeamRole::from_transport_lenient(role),
                Permission::ViewTask,
            )
        };

        assert!(!compose_raw(Some("OWNER")));
        assert!(!compose_raw(None));
        assert!(compose_raw(Some("MEMBER")));
    }

    #[test]
    fn missing_membership_denies_basic_users() {
        assert!(!compose(GlobalRole::Basic, None, Permission::ViewProject));
    }

    #[test]
    fn member_in_one_team_and_leader_in_another() {
        let team_one = Some(TeamRole::Member);
        let team_two = Some(TeamRole::Leader);

        assert!(compose(GlobalRole::Basic, team_one, Permission::CreateTask));
        assert!(!compose(GlobalRole::Basic, team_one, Permission::ManageProject));
        assert!(compose(GlobalRole::Basic, team_two, Permission::ManageProject));
    }

    fn any_permission() -> impl Strategy<Value = Permission> {
        prop::sample::select(Permission::all())
    }

    fn any_team_role() -> impl Strategy<Value = Option<TeamRole>> {
        prop::option::of(prop::sample::select(TeamRole::all()))
    }

    proptest! {
        #[test]
        fn global_admin_ignores_team_role(
            permission in any_permission(),
            team_role in any_team_role(),
        ) {
            let expected = resolve_global_override(GlobalRole::Admin, permission)
                == OverrideDecision::Allow;
            prop_assert_eq!(compose(GlobalRole::Admin, team_role, permission), expected);
        }

        #[test]
        fn resolution_is_idempotent(
            permission in any_permission(),
            team_role in any_team_role(),
            admin in any::<bool>(),
        ) {
            let global_role = if admin { GlobalRole::Admin } else { GlobalRole::Basic };
            let first = compose(global_role, team_role, permission);
            let second = compose(global_role, team_role, permission);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn admin_override_is_never_not_applicable(permission in any_permission()) {
            prop_assert!(resolve_global_override(GlobalRole::Admin, permission).is_final());
        }
    }
}

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use taskgate_core::{AppError, AppResult, TeamId, UserId};

use crate::TeamRole;

/// One user's membership in one team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMembership {
    user_id: UserId,
    team_id: TeamId,
    role: TeamRole,
}

impl TeamMembership {
    /// Creates a membership record.
    #[must_use]
    pub fn new(user_id: UserId, team_id: TeamId, role: TeamRole) -> Self {
        Self {
            user_id,
            team_id,
            role,
        }
    }

    /// Returns the member.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the team.
    #[must_use]
    pub fn team_id(&self) -> TeamId {
        self.team_id
    }

    /// Returns the member's role in the team.
    #[must_use]
    pub fn role(&self) -> TeamRole {
        self.role
    }
}

/// Membership set of one team, holding at most one role per user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRoster {
    team_id: TeamId,
    members: HashMap<UserId, TeamRole>,
}

impl TeamRoster {
    /// Creates an empty roster for a team.
    #[must_use]
    pub fn new(team_id: TeamId) -> Self {
        Self {
            team_id,
            members: HashMap::new(),
        }
    }

    /// Returns the team this roster belongs to.
    #[must_use]
    pub fn team_id(&self) -> TeamId {
        self.team_id
    }

    /// Adds a user to the team.
    pub fn add_member(&mut self, user_id: UserId, role: TeamRole) -> AppResult<TeamMembership> {
        if self.members.contains_key(&user_id) {
            return Err(AppError::Conflict(format!(
                "user '{user_id}' is already a member of team '{}'",
                self.team_id
            )));
        }

        self.members.insert(user_id, role);
        Ok(TeamMembership::new(user_id, self.team_id, role))
    }

    /// Replaces the role of an existing member.
    pub fn change_role(&mut self, user_id: UserId, role: TeamRole) -> AppResult<TeamMembership> {
        let current = self.members.get_mut(&user_id).ok_or_else(|| {
            AppError::NotFound(format!(
                "user '{user_id}' is not a member of team '{}'",
                self.team_id
            ))
        })?;

        *current = role;
        Ok(TeamMembership::new(user_id, self.team_id, role))
    }

    /// Removes a member from the team.
    pub fn remove_member(&mut self, user_id: UserId) -> AppResult<TeamMembership> {
        let role = self.members.remove(&user_id).ok_or_else(|| {
            AppError::NotFound(format!(
                "user '{user_id}' is not a member of team '{}'",
                self.team_id
            ))
        })?;

        Ok(TeamMembership::new(user_id, self.team_id, role))
    }

    /// Returns the role a user holds in the team, if any.
    #[must_use]
    pub fn role_of(&self, user_id: UserId) -> Option<TeamRole> {
        self.members.get(&user_id).copied()
    }

    /// Lists current memberships.
    #[must_use]
    pub fn memberships(&self) -> Vec<TeamMembership> {
        self.members
            .iter()
            .map(|(user_id, role)| TeamMembership::new(*user_id, self.team_id, *role))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use taskgate_core::{AppError, TeamId, UserId};

    use super::TeamRoster;
    use crate::TeamRole;

    #[test]
    fn role_change_replaces_existing_role() {
        let user_id = UserId::new();
        let mut roster = TeamRoster::new(TeamId::new());
        assert!(roster.add_member(user_id, TeamRole::Member).is_ok());
        assert!(roster.change_role(user_id, TeamRole::Leader).is_ok());

        assert_eq!(roster.role_of(user_id), Some(TeamRole::Leader));
        assert_eq!(roster.memberships().len(), 1);
    }

    #[test]
    fn duplicate_membership_is_a_conflict() {
        let user_id = UserId::new();
        let mut roster = TeamRoster::new(TeamId::new());
        assert!(roster.add_member(user_id, TeamRole::Member).is_ok());

        let result = roster.add_member(user_id, TeamRole::Admin);
        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(roster.role_of(user_id), Some(TeamRole::Member));
    }

    #[test]
    fn removing_a_member_ends_the_membership() {
        let user_id = UserId::new();
        let mut roster = TeamRoster::new(TeamId::new());
        assert!(roster.add_member(user_id, TeamRole::Admin).is_ok());
        assert!(roster.remove_member(user_id).is_ok());

        assert_eq!(roster.role_of(user_id), None);
        assert!(matches!(
            roster.remove_member(user_id),
            Err(AppError::NotFound(_))
        ));
    }
}

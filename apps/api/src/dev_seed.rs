use taskgate_application::CurrentUser;
use taskgate_core::{AppResult, SessionToken, TaskId, TeamId, UserId};
use taskgate_domain::{GlobalRole, TeamRole};
use taskgate_infrastructure::InMemoryTeamDirectory;
use tracing::info;

const DEV_SEED_TEAM_ID: &str = "11111111-1111-1111-1111-111111111111";
const DEV_SEED_TASK_ID: &str = "22222222-2222-2222-2222-222222222222";

const DEV_SEED_ADMIN_USER_ID: &str = "a2c8ea5f-4f39-4724-97f5-932f97f54f76";
const DEV_SEED_ADMIN_TOKEN: &str = "dev-admin-token";

const DEV_SEED_LEADER_USER_ID: &str = "5be0f0d4-6c3a-4c4e-9a55-0d7f4d1f3a21";
const DEV_SEED_LEADER_TOKEN: &str = "dev-leader-token";

const DEV_SEED_MEMBER_USER_ID: &str = "96d11e90-7403-4654-9727-cb1043f8bd31";
const DEV_SEED_MEMBER_TOKEN: &str = "dev-member-token";

/// Seeds one team with a leader and a member, plus a global admin outside it.
///
/// The member owns the seeded task.
pub async fn run(directory: &InMemoryTeamDirectory) -> AppResult<()> {
    let team_id = DEV_SEED_TEAM_ID.parse::<TeamId>()?;
    let task_id = DEV_SEED_TASK_ID.parse::<TaskId>()?;
    let admin_id = DEV_SEED_ADMIN_USER_ID.parse::<UserId>()?;
    let leader_id = DEV_SEED_LEADER_USER_ID.parse::<UserId>()?;
    let member_id = DEV_SEED_MEMBER_USER_ID.parse::<UserId>()?;

    seed_session(directory, DEV_SEED_ADMIN_TOKEN, admin_id, GlobalRole::Admin).await?;
    seed_session(directory, DEV_SEED_LEADER_TOKEN, leader_id, GlobalRole::Basic).await?;
    seed_session(directory, DEV_SEED_MEMBER_TOKEN, member_id, GlobalRole::Basic).await?;

    directory
        .add_member(team_id, leader_id, TeamRole::Leader)
        .await?;
    directory
        .add_member(team_id, member_id, TeamRole::Member)
        .await?;
    directory.assign_task_owner(task_id, member_id).await;

    info!(
        %team_id,
        %task_id,
        admin_token = DEV_SEED_ADMIN_TOKEN,
        leader_token = DEV_SEED_LEADER_TOKEN,
        member_token = DEV_SEED_MEMBER_TOKEN,
        "seeded in-memory team directory"
    );

    Ok(())
}

async fn seed_session(
    directory: &InMemoryTeamDirectory,
    token: &str,
    id: UserId,
    global_role: GlobalRole,
) -> AppResult<()> {
    directory
        .register_session(SessionToken::new(token)?, CurrentUser { id, global_role })
        .await;
    Ok(())
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use taskgate_application::{
    CurrentUser, SessionProvider, TaskOwnershipProvider, TeamAccess, TeamMember,
    TeamMembershipProvider,
};
use taskgate_core::{AppError, AppResult, SessionToken, TaskId, TeamId, UserId};
use taskgate_domain::GlobalRole;
use tracing::debug;
use url::Url;

use crate::jwt_claims::peek_subject;

/// REST back-end adapter for session, membership and ownership lookups.
///
/// Requests carry the caller's bearer token; the client's timeout is the
/// only timeout applied to access checks.
#[derive(Clone)]
pub struct HttpBackendClient {
    http_client: reqwest::Client,
    base_url: Url,
}

#[derive(Deserialize)]
struct CurrentUserDto {
    id: UserId,
    role: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamMemberDto {
    user_id: UserId,
    role: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamAccessDto {
    has_access: bool,
    role: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskDto {
    owner_id: Option<UserId>,
}

impl HttpBackendClient {
    /// Creates a client for the back-end rooted at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let mut base_url = Url::parse(base_url).map_err(|error| {
            AppError::Validation(format!("invalid back-end url '{base_url}': {error}"))
        })?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(path.as_str());
        }

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| AppError::Internal(format!("failed to build http client: {error}")))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    fn endpoint(&self, path: &str) -> AppResult<Url> {
        self.base_url.join(path).map_err(|error| {
            AppError::Internal(format!("invalid back-end endpoint '{path}': {error}"))
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        session: &SessionToken,
        path: &str,
    ) -> AppResult<Option<T>> {
        let url = self.endpoint(path)?;
        let response = self
            .http_client
            .get(url)
            .bearer_auth(session.expose())
            .send()
            .await
            .map_err(|error| AppError::Upstream(format!("GET {path} failed: {error}")))?;

        let status = response.status();
        debug!(path, %status, "back-end lookup completed");

        match status {
            StatusCode::NOT_FOUND => return Ok(None),
            StatusCode::UNAUTHORIZED => {
                return Err(AppError::Unauthorized(format!(
                    "back-end rejected session for GET {path}"
                )));
            }
            status if !status.is_success() => {
                return Err(AppError::Upstream(format!(
                    "GET {path} returned status {status}"
                )));
            }
            _ => {}
        }

        response
            .json::<T>()
            .await
            .map(Some)
            .map_err(|error| {
                AppError::Upstream(format!("GET {path} returned invalid body: {error}"))
            })
    }
}

#[async_trait]
impl SessionProvider for HttpBackendClient {
    async fn current_user(&self, session: &SessionToken) -> AppResult<CurrentUser> {
        let user = self
            .get_json::<CurrentUserDto>(session, "users/me")
            .await?
            .ok_or_else(|| AppError::Unauthorized("session user does not exist".to_owned()))?;

        Ok(CurrentUser {
            id: user.id,
            global_role: GlobalRole::from_transport(user.role.as_str())?,
        })
    }

    fn cached_user_id(&self, session: &SessionToken) -> Option<UserId> {
        peek_subject(session.expose())
    }
}

#[async_trait]
impl TeamMembershipProvider for HttpBackendClient {
    async fn team_members(
        &self,
        session: &SessionToken,
        team_id: TeamId,
    ) -> AppResult<Vec<TeamMember>> {
        let members = self
            .get_json::<Vec<TeamMemberDto>>(session, &format!("teams/{team_id}/members"))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("team '{team_id}' does not exist")))?;

        Ok(members
            .into_iter()
            .map(|member| TeamMember {
                user_id: member.user_id,
                role: member.role,
            })
            .collect())
    }

    async fn validate_team_access(
        &self,
        session: &SessionToken,
        team_id: TeamId,
    ) -> AppResult<TeamAccess> {
        let access = self
            .get_json::<TeamAccessDto>(session, &format!("teams/{team_id}/access"))
            .await?;

        Ok(access
            .map(|access| TeamAccess {
                has_access: access.has_access,
                role: access.role,
            })
            .unwrap_or_else(TeamAccess::none))
    }
}

#[async_trait]
impl TaskOwnershipProvider for HttpBackendClient {
    async fn task_owner(
        &self,
        session: &SessionToken,
        task_id: TaskId,
    ) -> AppResult<Option<UserId>> {
        Ok(self
            .get_json::<TaskDto>(session, &format!("tasks/{task_id}"))
            .await?
            .and_then(|task| task.owner_id))
    }
}

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use taskgate_application::MembershipLookup;
use taskgate_core::AppError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub enum BackendConfig {
    Http { base_url: String, timeout: Duration },
    InMemory,
}

impl BackendConfig {
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Http { .. } => "http",
            Self::InMemory => "in_memory",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RedirectPaths {
    pub dashboard: String,
    pub error: String,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_host: String,
    pub api_port: u16,
    pub frontend_url: String,
    pub backend: BackendConfig,
    pub membership_lookup: MembershipLookup,
    pub redirect_paths: RedirectPaths,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3002);
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());

        let backend = match env::var("BACKEND_MODE")
            .unwrap_or_else(|_| "http".to_owned())
            .as_str()
        {
            "http" => {
                let timeout_seconds = match env::var("BACKEND_TIMEOUT_SECONDS") {
                    Ok(value) => value.parse::<u64>().map_err(|error| {
                        AppError::Validation(format!("invalid BACKEND_TIMEOUT_SECONDS: {error}"))
                    })?,
                    Err(_) => 10,
                };
                BackendConfig::Http {
                    base_url: required_non_empty_env("BACKEND_URL")?,
                    timeout: Duration::from_secs(timeout_seconds.max(1)),
                }
            }
            "in_memory" => BackendConfig::InMemory,
            other => {
                return Err(AppError::Validation(format!(
                    "BACKEND_MODE must be either 'http' or 'in_memory', got '{other}'"
                )));
            }
        };

        let membership_lookup = match env::var("MEMBERSHIP_LOOKUP")
            .unwrap_or_else(|_| "access".to_owned())
            .as_str()
        {
            "access" => MembershipLookup::AccessRecord,
            "members" => MembershipLookup::MemberList,
            other => {
                return Err(AppError::Validation(format!(
                    "MEMBERSHIP_LOOKUP must be either 'access' or 'members', got '{other}'"
                )));
            }
        };

        let redirect_paths = RedirectPaths {
            dashboard: path_env("DASHBOARD_PATH", "/dashboard")?,
            error: path_env("ERROR_PATH", "/error")?,
        };

        Ok(Self {
            api_host,
            api_port,
            frontend_url,
            backend,
            membership_lookup,
            redirect_paths,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

fn path_env(name: &str, default: &str) -> Result<String, AppError> {
    let value = env::var(name).unwrap_or_else(|_| default.to_owned());
    if !value.starts_with('/') {
        return Err(AppError::Validation(format!(
            "{name} must be an absolute path, got '{value}'"
        )));
    }

    Ok(value)
}

use std::sync::Arc;

use taskgate_application::AccessGuardService;
use taskgate_core::AppResult;
use taskgate_infrastructure::{HttpBackendClient, InMemoryTeamDirectory};
use tracing::info;

use crate::api_config::{ApiConfig, BackendConfig};
use crate::dev_seed;
use crate::route_catalog::build_route_table;
use crate::state::{AppState, NavigationGates};

pub async fn build_app_state(config: &ApiConfig) -> AppResult<AppState> {
    let access_guard_service = match &config.backend {
        BackendConfig::Http { base_url, timeout } => {
            info!(%base_url, "using http back-end for access lookups");
            let client = Arc::new(HttpBackendClient::new(base_url, *timeout)?);
            AccessGuardService::new(client.clone(), client.clone(), client)
        }
        BackendConfig::InMemory => {
            info!("using seeded in-memory directory for access lookups");
            let directory = Arc::new(InMemoryTeamDirectory::new());
            dev_seed::run(&directory).await?;
            AccessGuardService::new(directory.clone(), directory.clone(), directory)
        }
    }
    .with_membership_lookup(config.membership_lookup);

    Ok(AppState {
        access_guard_service,
        route_table: Arc::new(build_route_table()?),
        navigation_gates: NavigationGates::default(),
        redirect_paths: Arc::new(config.redirect_paths.clone()),
        backend_mode: config.backend.mode(),
    })
}

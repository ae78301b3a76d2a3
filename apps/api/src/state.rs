use std::collections::HashMap;
use std::sync::Arc;

use taskgate_application::{AccessGuardService, NavigationGate};
use taskgate_core::SessionToken;
use taskgate_domain::RouteTable;
use tokio::sync::RwLock;

use crate::api_config::RedirectPaths;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub access_guard_service: AccessGuardService,
    pub route_table: Arc<RouteTable>,
    pub navigation_gates: NavigationGates,
    pub redirect_paths: Arc<RedirectPaths>,
    pub backend_mode: &'static str,
}

/// One navigation gate per session, so a session's newer navigation
/// abandons its own older checks without touching other sessions.
#[derive(Clone, Default)]
pub struct NavigationGates {
    gates: Arc<RwLock<HashMap<SessionToken, Arc<NavigationGate>>>>,
}

impl NavigationGates {
    pub async fn gate_for(&self, session: &SessionToken) -> Arc<NavigationGate> {
        if let Some(gate) = self.gates.read().await.get(session) {
            return gate.clone();
        }

        self.gates
            .write()
            .await
            .entry(session.clone())
            .or_default()
            .clone()
    }

    /// Drops the session's gate once no check holds it anymore.
    pub async fn release(&self, session: &SessionToken, gate: Arc<NavigationGate>) {
        drop(gate);

        let mut gates = self.gates.write().await;
        if gates
            .get(session)
            .is_some_and(|gate| Arc::strong_count(gate) == 1)
        {
            gates.remove(session);
        }
    }

    #[cfg(test)]
    pub async fn tracked_sessions(&self) -> usize {
        self.gates.read().await.len()
    }
}

//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod http_backend_client;
mod in_memory_team_directory;
mod jwt_claims;

pub use http_backend_client::HttpBackendClient;
pub use in_memory_team_directory::InMemoryTeamDirectory;

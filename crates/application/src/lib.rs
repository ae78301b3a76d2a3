//! Application services and ports.

#![forbid(unsafe_code)]

mod access_guard_service;
mod access_ports;
mod navigation;

pub use access_guard_service::{AccessGuardService, MembershipLookup};
pub use access_ports::{
    CurrentUser, SessionProvider, TaskOwnershipProvider, TeamAccess, TeamMember,
    TeamMembershipProvider,
};
pub use navigation::{NavigationGate, NavigationOutcome, NavigationTicket};

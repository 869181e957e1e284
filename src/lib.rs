//! muhurta — astrological trading-timing advisor.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in
//! [`ports`], concrete implementations in [`adapters`], the host-side
//! evaluation loop in [`advisor`].

pub mod adapters;
pub mod advisor;
pub mod cli;
pub mod domain;
pub mod ports;

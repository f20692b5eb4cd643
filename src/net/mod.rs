//! Networking boundaries for the two identity sources.
//!
//! SYSTEM CONTEXT
//! ==============
//! `identity` wraps the federated identity provider, `api` the application
//! backend session endpoints, and `types` the shared DTOs.

pub mod api;
pub mod identity;
pub mod types;

//! Client-side auth state.
//!
//! DESIGN
//! ======
//! `auth` is the observable snapshot, `sync` the state machine that owns it,
//! and `provider` the Leptos wiring that publishes it through context.

pub mod auth;
pub mod provider;
pub mod sync;

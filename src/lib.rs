//! # dashboard-auth
//!
//! Leptos + WASM authentication layer for the dashboard. Reconciles the
//! federated identity provider with the application backend and exposes the
//! resulting `(user, profile, loading)` state plus `logout()` to the UI.
//!
//! The state machine lives in [`state::sync`] and is generic over its three
//! collaborators ([`net::identity::IdentityProvider`],
//! [`net::api::BackendSession`], [`util::token_store::TokenStore`]) so it runs
//! natively under test; the `hydrate` feature supplies the browser
//! implementations.

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entrypoint: install console logging and hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}

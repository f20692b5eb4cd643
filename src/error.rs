//! Error taxonomy for the auth synchronization core.
//!
//! ERROR HANDLING
//! ==============
//! None of these errors reach the UI. Mint, login, and token-store failures
//! collapse the session to unauthenticated; sign-out and backend logout
//! failures are logged and swallowed after local state is already cleared.

/// Failure raised by one of the auth collaborators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The federated identity could not mint a bearer token.
    #[error("token mint failed: {0}")]
    Mint(String),
    /// The backend login request failed at the transport, status, or decode level.
    #[error("backend login failed: {0}")]
    BackendLogin(String),
    /// The backend answered the login with a falsy or empty profile.
    #[error("backend returned empty profile")]
    EmptyProfile,
    /// The backend logout request failed.
    #[error("backend logout failed: {0}")]
    BackendLogout(String),
    /// The identity provider failed to sign out.
    #[error("identity sign-out failed: {0}")]
    SignOut(String),
    /// The token could not be written to the token store.
    #[error("token store write failed: {0}")]
    Storage(String),
    /// The browser identity bridge is missing or malformed.
    #[error("identity bridge unavailable: {0}")]
    Bridge(String),
}

/// Best-effort human-readable message for a thrown JS value.
#[cfg(feature = "hydrate")]
pub(crate) fn js_error_message(value: &wasm_bindgen::JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    js_sys::Reflect::get(value, &wasm_bindgen::JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}

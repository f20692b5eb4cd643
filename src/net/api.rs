//! Backend session client.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Native builds: stubs returning errors since these endpoints are only
//! meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every transport, status, and decode failure is returned as an
//! [`AuthError`]; a falsy login payload decodes to `Ok(None)` so the core can
//! treat it exactly like a failure.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::future::Future;

use super::types::BackendProfile;
use crate::config::AuthConfig;
use crate::error::AuthError;

/// Request/response channel to the application backend.
pub trait BackendSession {
    /// Exchange a federated bearer token for the backend profile.
    ///
    /// `Ok(None)` means the backend answered with a falsy payload.
    fn login(&self, token: &str) -> impl Future<Output = Result<Option<BackendProfile>, AuthError>>;

    /// End the backend session.
    fn logout(&self) -> impl Future<Output = Result<(), AuthError>>;
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

#[cfg(any(test, feature = "hydrate"))]
fn login_body(token: &str) -> serde_json::Value {
    serde_json::json!({ "idToken": token })
}

#[cfg(any(test, feature = "hydrate"))]
fn login_failed_message(status: u16) -> String {
    format!("login request failed: {status}")
}

#[cfg(any(test, feature = "hydrate"))]
fn logout_failed_message(status: u16) -> String {
    format!("logout request failed: {status}")
}

/// True for JSON values a JS caller would treat as falsy.
#[cfg(any(test, feature = "hydrate"))]
fn is_falsy(value: &serde_json::Value) -> bool {
    use serde_json::Value;
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_none_or(|f| f == 0.0 || f.is_nan()),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Decode a login response body into a profile, mapping falsy payloads to `None`.
///
/// Only a JSON object is a profile; any other truthy body is a decode error.
#[cfg(any(test, feature = "hydrate"))]
fn parse_login_payload(value: serde_json::Value) -> Result<Option<BackendProfile>, AuthError> {
    if is_falsy(&value) {
        return Ok(None);
    }
    if !value.is_object() {
        return Err(AuthError::BackendLogin("login response is not an object".to_owned()));
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| AuthError::BackendLogin(e.to_string()))
}

/// HTTP implementation of [`BackendSession`].
#[derive(Clone, Debug)]
pub struct HttpBackend {
    login_endpoint: String,
    logout_endpoint: String,
}

impl HttpBackend {
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            login_endpoint: config.login_endpoint.clone(),
            logout_endpoint: config.logout_endpoint.clone(),
        }
    }
}

impl BackendSession for HttpBackend {
    /// `POST {login_endpoint}` with the token as bearer credential and body.
    async fn login(&self, token: &str) -> Result<Option<BackendProfile>, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::post(&self.login_endpoint)
                .header("Authorization", &bearer_header(token))
                .json(&login_body(token))
                .map_err(|e| AuthError::BackendLogin(e.to_string()))?
                .send()
                .await
                .map_err(|e| AuthError::BackendLogin(e.to_string()))?;
            if !resp.ok() {
                return Err(AuthError::BackendLogin(login_failed_message(resp.status())));
            }
            let body: serde_json::Value = resp
                .json()
                .await
                .map_err(|e| AuthError::BackendLogin(e.to_string()))?;
            parse_login_payload(body)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&self.login_endpoint, token);
            Err(AuthError::BackendLogin("not available on server".to_owned()))
        }
    }

    /// `POST {logout_endpoint}`.
    async fn logout(&self) -> Result<(), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::post(&self.logout_endpoint)
                .send()
                .await
                .map_err(|e| AuthError::BackendLogout(e.to_string()))?;
            if !resp.ok() {
                return Err(AuthError::BackendLogout(logout_failed_message(resp.status())));
            }
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = &self.logout_endpoint;
            Err(AuthError::BackendLogout("not available on server".to_owned()))
        }
    }
}

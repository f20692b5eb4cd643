//! Auth client configuration.
//!
//! The WASM bundle has no runtime environment, so overrides are read at build
//! time through `option_env!` and parsed by the same pure helpers the tests use.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_TOKEN_KEY: &str = "auth_token";
pub const DEFAULT_LOGIN_PATH: &str = "/api/auth/login";
pub const DEFAULT_LOGOUT_PATH: &str = "/api/auth/logout";
pub const DEFAULT_BRIDGE_GLOBAL: &str = "identityBridge";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// `localStorage` key holding the session token.
    pub token_key: String,
    /// Absolute or origin-relative URL of the backend login endpoint.
    pub login_endpoint: String,
    /// Absolute or origin-relative URL of the backend logout endpoint.
    pub logout_endpoint: String,
    /// Name of the `window` global exposing the identity provider bridge.
    pub bridge_global: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::from_parts(None, None, None)
    }
}

impl AuthConfig {
    /// Build config from compile-time environment overrides.
    ///
    /// Optional:
    /// - `DASHBOARD_AUTH_TOKEN_KEY`: default `auth_token`
    /// - `DASHBOARD_API_BASE`: prefix for backend endpoints, default same-origin
    /// - `DASHBOARD_IDENTITY_BRIDGE`: default `identityBridge`
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::from_parts(
            option_env!("DASHBOARD_AUTH_TOKEN_KEY"),
            option_env!("DASHBOARD_API_BASE"),
            option_env!("DASHBOARD_IDENTITY_BRIDGE"),
        )
    }

    fn from_parts(token_key: Option<&str>, api_base: Option<&str>, bridge: Option<&str>) -> Self {
        let base = parse_api_base(api_base);
        Self {
            token_key: non_blank(token_key).unwrap_or(DEFAULT_TOKEN_KEY).to_owned(),
            login_endpoint: join_endpoint(&base, DEFAULT_LOGIN_PATH),
            logout_endpoint: join_endpoint(&base, DEFAULT_LOGOUT_PATH),
            bridge_global: non_blank(bridge).unwrap_or(DEFAULT_BRIDGE_GLOBAL).to_owned(),
        }
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_api_base(raw: Option<&str>) -> String {
    non_blank(raw).unwrap_or_default().trim_end_matches('/').to_owned()
}

fn join_endpoint(base: &str, path: &str) -> String {
    format!("{base}{path}")
}

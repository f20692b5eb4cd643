use super::*;

#[test]
fn defaults_use_same_origin_endpoints() {
    let cfg = AuthConfig::default();
    assert_eq!(cfg.token_key, "auth_token");
    assert_eq!(cfg.login_endpoint, "/api/auth/login");
    assert_eq!(cfg.logout_endpoint, "/api/auth/logout");
    assert_eq!(cfg.bridge_global, "identityBridge");
}

#[test]
fn api_base_trailing_slash_is_trimmed() {
    let cfg = AuthConfig::from_parts(None, Some("https://api.example.com/"), None);
    assert_eq!(cfg.login_endpoint, "https://api.example.com/api/auth/login");
    assert_eq!(cfg.logout_endpoint, "https://api.example.com/api/auth/logout");
}

#[test]
fn blank_overrides_fall_back_to_defaults() {
    let cfg = AuthConfig::from_parts(Some("  "), Some(""), Some(" "));
    assert_eq!(cfg, AuthConfig::default());
}

#[test]
fn token_key_override_is_trimmed() {
    let cfg = AuthConfig::from_parts(Some(" dash_token "), None, Some("fb"));
    assert_eq!(cfg.token_key, "dash_token");
    assert_eq!(cfg.bridge_global, "fb");
}

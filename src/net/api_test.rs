use super::*;

#[test]
fn bearer_header_formats_token() {
    assert_eq!(bearer_header("abc.def"), "Bearer abc.def");
}

#[test]
fn login_body_carries_id_token() {
    assert_eq!(login_body("t-1"), serde_json::json!({ "idToken": "t-1" }));
}

#[test]
fn failure_messages_format_status() {
    assert_eq!(login_failed_message(401), "login request failed: 401");
    assert_eq!(logout_failed_message(503), "logout request failed: 503");
}

#[test]
fn falsy_payloads_decode_to_none() {
    for value in [
        serde_json::Value::Null,
        serde_json::json!(false),
        serde_json::json!(0),
        serde_json::json!(""),
    ] {
        assert_eq!(parse_login_payload(value).unwrap(), None);
    }
}

#[test]
fn truthy_profile_payload_decodes() {
    let profile = parse_login_payload(serde_json::json!({ "displayName": "Ada", "role": "ADMIN" }))
        .unwrap()
        .expect("profile");
    assert_eq!(profile.display_name.as_deref(), Some("Ada"));
}

#[test]
fn empty_object_payload_decodes_to_empty_profile() {
    let profile = parse_login_payload(serde_json::json!({})).unwrap().expect("profile");
    assert!(profile.is_empty());
}

#[test]
fn non_object_truthy_payload_is_a_decode_error() {
    let err = parse_login_payload(serde_json::json!("ok")).unwrap_err();
    assert!(matches!(err, AuthError::BackendLogin(_)));
}

#[test]
fn array_payload_is_not_decoded_as_profile() {
    for body in [serde_json::json!([]), serde_json::json!(["Ada"]), serde_json::json!(["Ada", "ada@example.com"])] {
        let err = parse_login_payload(body).unwrap_err();
        assert!(matches!(err, AuthError::BackendLogin(_)));
    }
}

#[test]
fn numeric_truthy_payload_is_a_decode_error() {
    assert!(parse_login_payload(serde_json::json!(1)).is_err());
    assert!(parse_login_payload(serde_json::json!(true)).is_err());
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn native_backend_login_is_unavailable() {
    let backend = HttpBackend::new(&AuthConfig::default());
    let err = futures::executor::block_on(backend.login("t")).unwrap_err();
    assert_eq!(err, AuthError::BackendLogin("not available on server".to_owned()));
}

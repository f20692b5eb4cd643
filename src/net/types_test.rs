use super::*;

fn profile(display_name: Option<&str>, email: Option<&str>) -> BackendProfile {
    BackendProfile {
        display_name: display_name.map(str::to_owned),
        email: email.map(str::to_owned),
        ..BackendProfile::default()
    }
}

// =============================================================
// Decoding
// =============================================================

#[test]
fn backend_profile_decodes_camel_case_fields() {
    let json = serde_json::json!({
        "displayName": "Ada Lovelace",
        "email": "ada@example.com",
        "role": "ADMIN",
        "subscription": "explorer",
        "photoUrl": "https://img.example.com/ada.png"
    });
    let parsed: BackendProfile = serde_json::from_value(json).unwrap();
    assert_eq!(parsed.display_name.as_deref(), Some("Ada Lovelace"));
    assert_eq!(parsed.role.as_deref(), Some("ADMIN"));
    assert_eq!(parsed.photo_url.as_deref(), Some("https://img.example.com/ada.png"));
}

#[test]
fn backend_profile_ignores_unknown_fields() {
    let json = serde_json::json!({ "email": "a@b.c", "uid": "u-1", "limits": {} });
    let parsed: BackendProfile = serde_json::from_value(json).unwrap();
    assert_eq!(parsed.email.as_deref(), Some("a@b.c"));
    assert!(!parsed.is_empty());
}

#[test]
fn backend_profile_empty_object_is_empty() {
    let parsed: BackendProfile = serde_json::from_value(serde_json::json!({})).unwrap();
    assert!(parsed.is_empty());
}

#[test]
fn backend_profile_blank_fields_are_empty() {
    assert!(profile(Some("  "), Some("")).is_empty());
}

// =============================================================
// Presentation helpers
// =============================================================

#[test]
fn display_name_prefers_profile_name() {
    assert_eq!(profile(Some("Ada"), Some("x@y.z")).display_name_or_default(), "Ada");
}

#[test]
fn display_name_falls_back_to_email_local_part() {
    assert_eq!(profile(None, Some("grace@navy.mil")).display_name_or_default(), "grace");
}

#[test]
fn display_name_falls_back_to_user() {
    assert_eq!(profile(None, None).display_name_or_default(), "User");
}

#[test]
fn initials_take_first_two_words() {
    assert_eq!(profile(Some("ada byron lovelace"), None).initials(), "AB");
    assert_eq!(profile(Some("grace"), None).initials(), "G");
}

#[test]
fn plan_is_uppercased_with_anonymous_default() {
    let mut p = BackendProfile::default();
    assert_eq!(p.plan(), "ANONYMOUS");
    p.subscription = Some("challenger".to_owned());
    assert_eq!(p.plan(), "CHALLENGER");
}

#[test]
fn role_defaults_to_user() {
    assert_eq!(BackendProfile::default().role_or_default(), "User");
}

use super::*;

fn profile() -> BackendProfile {
    BackendProfile { display_name: Some("Ada".to_owned()), ..BackendProfile::default() }
}

// =============================================================
// AuthState defaults
// =============================================================

#[test]
fn auth_state_default_no_user() {
    let state = AuthState::default();
    assert!(state.user().is_none());
    assert!(state.profile().is_none());
}

#[test]
fn auth_state_default_is_loading() {
    let state = AuthState::default();
    assert!(state.loading());
    assert_eq!(state.phase(), &AuthPhase::Initializing);
}

// =============================================================
// Transitions
// =============================================================

#[test]
fn authenticate_sets_user_and_profile_together() {
    let mut state = AuthState::default();
    state.begin_sync("u-1");
    assert_eq!(state.phase(), &AuthPhase::Syncing { uid: "u-1".to_owned() });
    assert!(state.loading());

    state.authenticate(FederatedUser::new("u-1"), profile());
    assert_eq!(state.user().map(|u| u.uid.as_str()), Some("u-1"));
    assert_eq!(state.profile(), Some(&profile()));
    assert!(!state.loading());
    assert!(state.is_authenticated());
}

#[test]
fn refresh_user_without_session_is_rejected() {
    let mut state = AuthState::default();
    assert!(!state.refresh_user(FederatedUser::new("u-1")));
    assert!(state.user().is_none());
    assert!(state.loading());
}

#[test]
fn refresh_user_keeps_profile() {
    let mut state = AuthState::default();
    state.authenticate(FederatedUser::new("u-1"), profile());
    let mut refreshed = FederatedUser::new("u-1");
    refreshed.email = Some("ada@example.com".to_owned());
    assert!(state.refresh_user(refreshed.clone()));
    assert_eq!(state.user(), Some(&refreshed));
    assert_eq!(state.profile(), Some(&profile()));
}

#[test]
fn clear_drops_session_and_stops_loading() {
    let mut state = AuthState::default();
    state.authenticate(FederatedUser::new("u-1"), profile());
    state.clear();
    assert!(state.session().is_none());
    assert_eq!(state.phase(), &AuthPhase::Unauthenticated);
    assert!(!state.loading());
}

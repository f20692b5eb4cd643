//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Published through context as `RwSignal<AuthState>`; loading gates and
//! user-aware components read it, only [`crate::state::sync::AuthSync`]
//! writes it.
//!
//! INVARIANTS
//! ==========
//! The federated user and the backend profile live together in one
//! [`AuthSession`], so a user without a profile (or the reverse) cannot be
//! represented.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::{BackendProfile, FederatedUser};

/// Where the synchronization state machine currently is.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthPhase {
    /// Subscribed, waiting for the first identity event to resolve.
    #[default]
    Initializing,
    /// Exchanging a token for this identity with the backend.
    Syncing { uid: String },
    /// Both providers agree on the current session.
    Authenticated,
    /// No trusted session.
    Unauthenticated,
}

/// A backend-confirmed federated session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthSession {
    pub user: FederatedUser,
    pub profile: BackendProfile,
}

/// Observable authentication state: `(user, profile, loading)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    phase: AuthPhase,
    session: Option<AuthSession>,
    loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { phase: AuthPhase::Initializing, session: None, loading: true }
    }
}

impl AuthState {
    #[must_use]
    pub fn user(&self) -> Option<&FederatedUser> {
        self.session.as_ref().map(|s| &s.user)
    }

    #[must_use]
    pub fn profile(&self) -> Option<&BackendProfile> {
        self.session.as_ref().map(|s| &s.profile)
    }

    #[must_use]
    pub fn session(&self) -> Option<&AuthSession> {
        self.session.as_ref()
    }

    /// True only until the first identity event has been fully processed.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn phase(&self) -> &AuthPhase {
        &self.phase
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub(crate) fn begin_sync(&mut self, uid: &str) {
        self.phase = AuthPhase::Syncing { uid: uid.to_owned() };
    }

    pub(crate) fn authenticate(&mut self, user: FederatedUser, profile: BackendProfile) {
        self.session = Some(AuthSession { user, profile });
        self.phase = AuthPhase::Authenticated;
        self.loading = false;
    }

    /// Swap in a fresh identity snapshot, keeping the confirmed profile.
    ///
    /// Returns `false` (and changes nothing) when there is no session to refresh.
    pub(crate) fn refresh_user(&mut self, user: FederatedUser) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.user = user;
        self.phase = AuthPhase::Authenticated;
        self.loading = false;
        true
    }

    pub(crate) fn clear(&mut self) {
        self.session = None;
        self.phase = AuthPhase::Unauthenticated;
        self.loading = false;
    }
}

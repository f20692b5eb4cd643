//! Dual-provider authentication synchronization core.
//!
//! ARCHITECTURE
//! ============
//! `AuthSync` consumes identity-provider events, exchanges minted tokens with
//! the backend, and owns the observable [`AuthState`]. A federated identity
//! is surfaced only after the backend confirms it; any disagreement between
//! the two providers collapses to unauthenticated and signs the identity out.
//!
//! ```text
//! INITIALIZING ──► SYNCING(uid) ──► AUTHENTICATED(uid, profile)
//!       │               │                    │
//!       └───────────────┴──────► UNAUTHENTICATED ◄── logout / watchers
//! ```
//!
//! CONCURRENCY
//! ===========
//! Everything runs on the tab's single-threaded executor. Identity events are
//! processed one at a time by [`AuthSync::run`]; the provider is assumed to
//! deliver them serially. `logout()` and the watchers can interleave with a
//! pending mint or login, so every transition bumps an epoch and async
//! results are applied only if their epoch is still current. No `RefCell`
//! borrow is held across an await.

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

use std::cell::RefCell;
use std::rc::Rc;

use futures::{Stream, StreamExt};

use super::auth::{AuthPhase, AuthState};
use crate::error::AuthError;
use crate::net::api::BackendSession;
use crate::net::identity::{FederatedIdentity, IdentityProvider};
use crate::net::types::{BackendProfile, FederatedUser};
use crate::util::token_store::{StorageChange, TokenStore};

/// The identity last successfully exchanged for a backend profile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncWatermark(Option<String>);

impl SyncWatermark {
    #[must_use]
    pub fn matches(&self, uid: &str) -> bool {
        self.0.as_deref() == Some(uid)
    }

    fn mark(&mut self, uid: &str) {
        self.0 = Some(uid.to_owned());
    }

    fn clear(&mut self) {
        self.0 = None;
    }
}

struct Core {
    state: AuthState,
    watermark: SyncWatermark,
    epoch: u64,
}

impl Core {
    fn begin_sync(&mut self, uid: &str) -> u64 {
        self.epoch += 1;
        self.state.begin_sync(uid);
        self.epoch
    }

    fn authenticate(&mut self, user: FederatedUser, profile: BackendProfile) {
        self.watermark.mark(&user.uid);
        self.state.authenticate(user, profile);
    }

    fn clear(&mut self) {
        self.epoch += 1;
        self.watermark.clear();
        self.state.clear();
    }
}

type Observer = Rc<dyn Fn(&AuthState)>;

struct Inner<P, B, S> {
    provider: P,
    backend: B,
    store: S,
    core: RefCell<Core>,
    observers: RefCell<Vec<Observer>>,
}

/// Shared handle to the synchronization state machine.
///
/// Cloning is cheap; all clones drive the same state.
pub struct AuthSync<P, B, S> {
    inner: Rc<Inner<P, B, S>>,
}

impl<P, B, S> Clone for AuthSync<P, B, S> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<P, B, S> AuthSync<P, B, S>
where
    P: IdentityProvider,
    B: BackendSession,
    S: TokenStore,
{
    pub fn new(provider: P, backend: B, store: S) -> Self {
        let core = Core { state: AuthState::default(), watermark: SyncWatermark::default(), epoch: 0 };
        Self {
            inner: Rc::new(Inner {
                provider,
                backend,
                store,
                core: RefCell::new(core),
                observers: RefCell::new(Vec::new()),
            }),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> AuthState {
        self.inner.core.borrow().state.clone()
    }

    #[must_use]
    pub fn watermark(&self) -> SyncWatermark {
        self.inner.core.borrow().watermark.clone()
    }

    pub fn provider(&self) -> &P {
        &self.inner.provider
    }

    pub fn backend(&self) -> &B {
        &self.inner.backend
    }

    pub fn store(&self) -> &S {
        &self.inner.store
    }

    /// Register a callback invoked with the new state after every transition.
    pub fn on_change(&self, observer: impl Fn(&AuthState) + 'static) {
        self.inner.observers.borrow_mut().push(Rc::new(observer));
    }

    /// Subscribe to the identity provider and process events until the stream ends.
    ///
    /// Dropping the returned future unsubscribes.
    pub async fn run(&self) {
        let mut events = self.inner.provider.subscribe();
        while let Some(identity) = events.next().await {
            self.handle_identity(identity).await;
        }
    }

    /// Apply one identity-provider event.
    pub async fn handle_identity(&self, identity: Option<P::Identity>) {
        match identity {
            Some(identity) => self.sync_identity(identity).await,
            None => {
                self.inner.store.remove();
                self.transition(Core::clear);
            }
        }
    }

    async fn sync_identity(&self, identity: P::Identity) {
        let user = identity.user();
        let epoch = self.transition(|core| core.begin_sync(&user.uid));

        let minted = identity.mint_token().await;
        if !self.is_current(epoch) {
            leptos::logging::log!("auth: discarding stale token for {}", user.uid);
            return;
        }
        let token = match minted {
            Ok(token) => token,
            Err(e) => {
                leptos::logging::warn!("auth: {e}; signing out {}", user.uid);
                self.reject().await;
                return;
            }
        };
        if let Err(e) = self.inner.store.set(&token) {
            leptos::logging::warn!("auth: {e}; signing out {}", user.uid);
            self.reject().await;
            return;
        }

        let already_synced = {
            let core = self.inner.core.borrow();
            core.watermark.matches(&user.uid) && core.state.is_authenticated()
        };
        if already_synced {
            self.transition(|core| core.state.refresh_user(user));
            return;
        }

        let response = self.inner.backend.login(&token).await;
        if !self.is_current(epoch) {
            leptos::logging::log!("auth: discarding stale backend response for {}", user.uid);
            return;
        }
        let confirmed = response.and_then(|reply| reply.filter(|p| !p.is_empty()).ok_or(AuthError::EmptyProfile));
        match confirmed {
            Ok(profile) => {
                self.transition(|core| core.authenticate(user, profile));
            }
            Err(e) => {
                leptos::logging::warn!("auth: {e}; signing out {}", user.uid);
                self.reject().await;
            }
        }
    }

    /// Log out of both providers. Safe to call repeatedly.
    ///
    /// Local state is cleared first; remote failures are logged and swallowed.
    pub async fn logout(&self) {
        let (was_signed_out, had_backend_session) = {
            let core = self.inner.core.borrow();
            (core.state.phase() == &AuthPhase::Unauthenticated, core.state.is_authenticated())
        };
        self.inner.store.remove();
        self.transition(Core::clear);
        if was_signed_out {
            return;
        }

        if had_backend_session {
            if let Err(e) = self.inner.backend.logout().await {
                leptos::logging::warn!("auth: {e}");
            }
        }
        self.sign_out_provider().await;
    }

    /// Cross-tab watcher: react to a token-store change made elsewhere.
    pub async fn on_storage_change(&self, change: &StorageChange) {
        if !change.is_token_removal(self.inner.store.key()) || !self.snapshot().is_authenticated() {
            return;
        }
        leptos::logging::log!("auth: token removed in another tab, logging out");
        self.force_sign_out().await;
    }

    /// Visibility watcher: re-check the token store when the tab becomes visible.
    pub async fn on_visibility_change(&self, visible: bool) {
        if !visible || !self.snapshot().is_authenticated() {
            return;
        }
        if self.inner.store.get().is_some() {
            return;
        }
        leptos::logging::log!("auth: token missing on tab focus, logging out");
        self.force_sign_out().await;
    }

    /// Drop a session the two providers do not agree on.
    async fn reject(&self) {
        self.inner.store.remove();
        self.transition(Core::clear);
        self.sign_out_provider().await;
    }

    async fn force_sign_out(&self) {
        self.transition(Core::clear);
        self.sign_out_provider().await;
    }

    async fn sign_out_provider(&self) {
        if let Err(e) = self.inner.provider.sign_out().await {
            leptos::logging::warn!("auth: {e}");
        }
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.inner.core.borrow().epoch == epoch
    }

    fn transition<R>(&self, apply: impl FnOnce(&mut Core) -> R) -> R {
        let (result, snapshot) = {
            let mut core = self.inner.core.borrow_mut();
            let result = apply(&mut core);
            (result, core.state.clone())
        };
        let observers = self.inner.observers.borrow().clone();
        for observer in observers {
            observer(&snapshot);
        }
        result
    }
}

/// Feed token-store changes from other tabs into the cross-tab watcher.
pub async fn watch_storage<P, B, S, C>(sync: AuthSync<P, B, S>, mut changes: C)
where
    P: IdentityProvider,
    B: BackendSession,
    S: TokenStore,
    C: Stream<Item = StorageChange> + Unpin,
{
    while let Some(change) = changes.next().await {
        sync.on_storage_change(&change).await;
    }
}

//! Wires the sync core into the Leptos reactive graph.
//!
//! `AuthActions::install` builds the browser `AuthSync`, mirrors every state
//! transition into the shared `RwSignal<AuthState>`, installs the cross-tab
//! and visibility watchers, and spawns the identity event loop. Outside the
//! browser it does nothing and the state stays in its loading default.

use leptos::prelude::*;

use super::auth::AuthState;
#[cfg(feature = "hydrate")]
use super::sync::AuthSync;
#[cfg(feature = "hydrate")]
use crate::net::{api::HttpBackend, identity::BridgeIdentityProvider};
#[cfg(feature = "hydrate")]
use crate::util::token_store::BrowserTokenStore;

/// The sync core as assembled for the browser.
#[cfg(feature = "hydrate")]
pub type BrowserAuthSync = AuthSync<BridgeIdentityProvider, HttpBackend, BrowserTokenStore>;

/// Imperative auth operations for UI collaborators, provided via context.
#[derive(Clone, Copy)]
pub struct AuthActions {
    #[cfg(feature = "hydrate")]
    sync: StoredValue<Option<BrowserAuthSync>, LocalStorage>,
}

impl AuthActions {
    /// Start auth synchronization and publish transitions into `auth`.
    pub fn install(auth: RwSignal<AuthState>) -> Self {
        #[cfg(feature = "hydrate")]
        {
            let config = crate::config::AuthConfig::from_build_env();
            let sync = match BridgeIdentityProvider::from_window(&config.bridge_global) {
                Ok(provider) => {
                    let sync = AuthSync::new(
                        provider,
                        HttpBackend::new(&config),
                        BrowserTokenStore::new(&config.token_key),
                    );
                    sync.on_change(move |state| auth.set(state.clone()));
                    crate::util::watchers::install_storage_watcher(sync.clone());
                    crate::util::watchers::install_visibility_watcher(sync.clone());
                    let runner = sync.clone();
                    leptos::task::spawn_local(async move { runner.run().await });
                    Some(sync)
                }
                Err(e) => {
                    log::error!("auth disabled: {e}");
                    auth.update(AuthState::clear);
                    None
                }
            };
            Self { sync: StoredValue::new_local(sync) }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = auth;
            Self {}
        }
    }

    /// Log out of the identity provider and the backend. Idempotent.
    pub fn logout(self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(sync) = self.sync.try_get_value().flatten() {
                leptos::task::spawn_local(async move { sync.logout().await });
            }
        }
    }
}

//! Federated identity provider boundary.
//!
//! The provider is an external collaborator: the core only consumes its
//! identity-change stream, mints tokens from the identities it reports, and
//! asks it to sign out. In the browser the provider is reached through a JS
//! bridge object on `window` (by default `window.identityBridge`) with this
//! shape:
//!
//! ```text
//! onChange(callback: (identity | null) => void) -> unsubscribe()
//! signOut() -> Promise<void>
//! identity.uid, identity.email, identity.displayName
//! identity.getIdToken() -> Promise<string>
//! ```
//!
//! All bridge bindings are gated behind `#[cfg(feature = "hydrate")]`.

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use futures::channel::mpsc;

use super::types::FederatedUser;
use crate::error::AuthError;

/// A principal as reported by the identity provider.
pub trait FederatedIdentity {
    /// Plain-data snapshot surfaced to the rest of the application.
    fn user(&self) -> FederatedUser;

    /// Mint a fresh bearer token for this identity.
    fn mint_token(&self) -> impl Future<Output = Result<String, AuthError>>;
}

/// Source of identity-change events plus sign-out.
pub trait IdentityProvider {
    type Identity: FederatedIdentity;

    /// Subscribe to identity changes. Dropping the subscription unsubscribes.
    fn subscribe(&self) -> IdentitySubscription<Self::Identity>;

    /// Sign the current identity out of the provider.
    fn sign_out(&self) -> impl Future<Output = Result<(), AuthError>>;
}

/// Cancellable stream of "current identity or none" events.
pub struct IdentitySubscription<I> {
    events: mpsc::UnboundedReceiver<Option<I>>,
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl<I> IdentitySubscription<I> {
    /// Wrap an event receiver with the teardown to run on drop.
    pub fn new(events: mpsc::UnboundedReceiver<Option<I>>, unsubscribe: impl FnOnce() + 'static) -> Self {
        Self { events, unsubscribe: Some(Box::new(unsubscribe)) }
    }

    /// Wrap an event receiver that needs no teardown.
    #[must_use]
    pub fn detached(events: mpsc::UnboundedReceiver<Option<I>>) -> Self {
        Self { events, unsubscribe: None }
    }
}

impl<I> Stream for IdentitySubscription<I> {
    type Item = Option<I>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.get_mut().events).poll_next(cx)
    }
}

impl<I> Drop for IdentitySubscription<I> {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

#[cfg(feature = "hydrate")]
pub use self::bridge::{BridgeIdentityProvider, JsIdentity};

#[cfg(feature = "hydrate")]
mod bridge {
    use futures::channel::mpsc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;

    use super::{FederatedIdentity, IdentityProvider, IdentitySubscription};
    use crate::error::{AuthError, js_error_message};
    use crate::net::types::FederatedUser;

    #[wasm_bindgen]
    extern "C" {
        /// Identity object handed out by the JS bridge.
        #[derive(Clone, Debug)]
        pub type JsIdentity;

        #[wasm_bindgen(method, getter)]
        fn uid(this: &JsIdentity) -> String;

        #[wasm_bindgen(method, getter)]
        fn email(this: &JsIdentity) -> Option<String>;

        #[wasm_bindgen(method, getter, js_name = displayName)]
        fn display_name(this: &JsIdentity) -> Option<String>;

        #[wasm_bindgen(method, catch, js_name = getIdToken)]
        fn get_id_token(this: &JsIdentity) -> Result<js_sys::Promise, JsValue>;

        #[derive(Clone, Debug)]
        type JsBridge;

        #[wasm_bindgen(method, catch, js_name = onChange)]
        fn on_change(this: &JsBridge, callback: &js_sys::Function) -> Result<js_sys::Function, JsValue>;

        #[wasm_bindgen(method, catch, js_name = signOut)]
        fn sign_out(this: &JsBridge) -> Result<js_sys::Promise, JsValue>;
    }

    impl FederatedIdentity for JsIdentity {
        fn user(&self) -> FederatedUser {
            FederatedUser { uid: self.uid(), email: self.email(), display_name: self.display_name() }
        }

        async fn mint_token(&self) -> Result<String, AuthError> {
            let promise = self.get_id_token().map_err(|e| AuthError::Mint(js_error_message(&e)))?;
            let value = JsFuture::from(promise)
                .await
                .map_err(|e| AuthError::Mint(js_error_message(&e)))?;
            value
                .as_string()
                .filter(|token| !token.is_empty())
                .ok_or_else(|| AuthError::Mint("token was not a non-empty string".to_owned()))
        }
    }

    /// Identity provider backed by the `window` bridge global.
    #[derive(Clone, Debug)]
    pub struct BridgeIdentityProvider {
        bridge: JsBridge,
    }

    impl BridgeIdentityProvider {
        /// Resolve `window[global]` as the identity bridge.
        ///
        /// # Errors
        ///
        /// Returns [`AuthError::Bridge`] when there is no window or the global is missing.
        pub fn from_window(global: &str) -> Result<Self, AuthError> {
            let window = web_sys::window().ok_or_else(|| AuthError::Bridge("no window".to_owned()))?;
            let value = js_sys::Reflect::get(&window, &JsValue::from_str(global))
                .map_err(|e| AuthError::Bridge(js_error_message(&e)))?;
            if value.is_undefined() || value.is_null() {
                return Err(AuthError::Bridge(format!("window.{global} is not defined")));
            }
            Ok(Self { bridge: value.unchecked_into() })
        }
    }

    impl IdentityProvider for BridgeIdentityProvider {
        type Identity = JsIdentity;

        fn subscribe(&self) -> IdentitySubscription<JsIdentity> {
            let (tx, rx) = mpsc::unbounded();
            let fallback = tx.clone();
            let callback = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
                let identity = if value.is_null() || value.is_undefined() {
                    None
                } else {
                    Some(value.unchecked_into::<JsIdentity>())
                };
                let _ = tx.unbounded_send(identity);
            });

            match self.bridge.on_change(callback.as_ref().unchecked_ref()) {
                Ok(unsubscribe) => IdentitySubscription::new(rx, move || {
                    let _ = unsubscribe.call0(&JsValue::NULL);
                    drop(callback);
                }),
                Err(e) => {
                    log::error!("identity bridge subscribe failed: {}", js_error_message(&e));
                    // Resolve the initial load as signed out instead of hanging.
                    let _ = fallback.unbounded_send(None);
                    IdentitySubscription::new(rx, move || drop(callback))
                }
            }
        }

        async fn sign_out(&self) -> Result<(), AuthError> {
            let promise = self.bridge.sign_out().map_err(|e| AuthError::SignOut(js_error_message(&e)))?;
            JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|e| AuthError::SignOut(js_error_message(&e)))
        }
    }
}

//! Browser triggers that can force the auth core back to unauthenticated.
//!
//! SYSTEM CONTEXT
//! ==============
//! The `storage` event reports token removal from other tabs (only
//! `localStorage` events count); the `visibilitychange` event re-checks the
//! token when this tab returns to the foreground in case a `storage` event
//! was missed while suspended. Both
//! listeners only translate DOM events into calls on [`AuthSync`]; the
//! decisions live there.
//!
//! Requires a browser environment (hydrate only).

#[cfg(feature = "hydrate")]
use wasm_bindgen::{JsCast, closure::Closure};

#[cfg(feature = "hydrate")]
use crate::net::api::BackendSession;
#[cfg(feature = "hydrate")]
use crate::net::identity::IdentityProvider;
#[cfg(feature = "hydrate")]
use crate::state::sync::AuthSync;
#[cfg(feature = "hydrate")]
use crate::util::token_store::{StorageArea, StorageChange, TokenStore};

#[cfg(feature = "hydrate")]
fn storage_change_from_event(window: &web_sys::Window, event: &web_sys::StorageEvent) -> StorageChange {
    let local = window.local_storage().ok().flatten();
    let area = match (event.storage_area(), local) {
        (Some(area), Some(local)) if js_sys::Object::is(&area, &local) => StorageArea::Local,
        _ => StorageArea::Session,
    };
    StorageChange { area, key: event.key(), old_value: event.old_value(), new_value: event.new_value() }
}

/// Listen for token-store changes made by other tabs.
#[cfg(feature = "hydrate")]
pub fn install_storage_watcher<P, B, S>(sync: AuthSync<P, B, S>)
where
    P: IdentityProvider + 'static,
    B: BackendSession + 'static,
    S: TokenStore + 'static,
{
    let Some(window) = web_sys::window() else {
        return;
    };
    let target = window.clone();
    let callback = Closure::<dyn FnMut(web_sys::StorageEvent)>::new(move |event: web_sys::StorageEvent| {
        let change = storage_change_from_event(&target, &event);
        let sync = sync.clone();
        leptos::task::spawn_local(async move { sync.on_storage_change(&change).await });
    });
    match window.add_event_listener_with_callback("storage", callback.as_ref().unchecked_ref()) {
        // Listener stays registered for the lifetime of the page.
        Ok(()) => callback.forget(),
        Err(e) => log::warn!("storage listener failed: {}", crate::error::js_error_message(&e)),
    }
}

/// Re-check the token store whenever this tab becomes visible.
#[cfg(feature = "hydrate")]
pub fn install_visibility_watcher<P, B, S>(sync: AuthSync<P, B, S>)
where
    P: IdentityProvider + 'static,
    B: BackendSession + 'static,
    S: TokenStore + 'static,
{
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let target = document.clone();
    let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
        let visible = document.visibility_state() == web_sys::VisibilityState::Visible;
        let sync = sync.clone();
        leptos::task::spawn_local(async move { sync.on_visibility_change(visible).await });
    });
    match target.add_event_listener_with_callback("visibilitychange", callback.as_ref().unchecked_ref()) {
        Ok(()) => callback.forget(),
        Err(e) => log::warn!("visibility listener failed: {}", crate::error::js_error_message(&e)),
    }
}

//! Session token slot shared across browser tabs.
//!
//! SYSTEM CONTEXT
//! ==============
//! The sync core writes the token here after minting and removes it on any
//! logout; the watchers read it. Removal of the value is the cross-tab
//! "log me out" signal, so there is exactly one well-known key.
//!
//! `BrowserTokenStore` is backed by `localStorage` (hydrate only).
//! `MemoryTokenStore` gives native builds and tests the same semantics: every
//! handle opened with [`MemoryTokenStore::open_tab`] shares one slot and
//! receives change notifications for writes made by the other handles, the
//! way a `storage` event is only delivered to other tabs.

#[cfg(test)]
#[path = "token_store_test.rs"]
mod token_store_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::channel::mpsc;

use crate::error::AuthError;

/// Single-key persistent token slot.
pub trait TokenStore {
    /// The well-known key the token lives under.
    fn key(&self) -> &str;

    fn get(&self) -> Option<String>;

    /// # Errors
    ///
    /// Returns [`AuthError::Storage`] when the backing store rejects the write.
    fn set(&self, token: &str) -> Result<(), AuthError>;

    fn remove(&self);
}

/// Web storage area a change happened in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageArea {
    /// `localStorage`, where the token lives.
    Local,
    Session,
}

/// A change to the shared store observed from another execution context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageChange {
    pub area: StorageArea,
    /// Changed key, or `None` when the whole store was cleared.
    pub key: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

impl StorageChange {
    /// True when the token under `token_key` went from present to absent.
    ///
    /// A whole-store clear counts as a removal; insertions and overwrites never do.
    /// Changes outside `localStorage` never count.
    #[must_use]
    pub fn is_token_removal(&self, token_key: &str) -> bool {
        if self.area != StorageArea::Local {
            return false;
        }
        match self.key.as_deref() {
            None => true,
            Some(key) => key == token_key && self.old_value.is_some() && self.new_value.is_none(),
        }
    }
}

struct SharedSlot {
    value: RefCell<Option<String>>,
    watchers: RefCell<Vec<(usize, mpsc::UnboundedSender<StorageChange>)>>,
    next_tab: Cell<usize>,
}

/// In-memory token slot with cross-handle change notification.
#[derive(Clone)]
pub struct MemoryTokenStore {
    key: Rc<str>,
    slot: Rc<SharedSlot>,
    tab: usize,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new(key: &str) -> Self {
        let slot = SharedSlot { value: RefCell::new(None), watchers: RefCell::new(Vec::new()), next_tab: Cell::new(1) };
        Self { key: Rc::from(key), slot: Rc::new(slot), tab: 0 }
    }

    /// Open another context (tab) onto the same slot.
    #[must_use]
    pub fn open_tab(&self) -> Self {
        let tab = self.slot.next_tab.get();
        self.slot.next_tab.set(tab + 1);
        Self { key: Rc::clone(&self.key), slot: Rc::clone(&self.slot), tab }
    }

    /// Receive changes made to the slot by other tabs.
    #[must_use]
    pub fn watch(&self) -> mpsc::UnboundedReceiver<StorageChange> {
        let (tx, rx) = mpsc::unbounded();
        self.slot.watchers.borrow_mut().push((self.tab, tx));
        rx
    }

    fn write(&self, new_value: Option<String>) {
        let old_value = self.slot.value.replace(new_value.clone());
        if old_value == new_value {
            return;
        }
        let change = StorageChange { area: StorageArea::Local, key: Some(self.key.to_string()), old_value, new_value };
        self.slot.watchers.borrow_mut().retain(|(tab, tx)| {
            if *tab == self.tab {
                return !tx.is_closed();
            }
            tx.unbounded_send(change.clone()).is_ok()
        });
    }
}

impl TokenStore for MemoryTokenStore {
    fn key(&self) -> &str {
        &self.key
    }

    fn get(&self) -> Option<String> {
        self.slot.value.borrow().clone()
    }

    fn set(&self, token: &str) -> Result<(), AuthError> {
        self.write(Some(token.to_owned()));
        Ok(())
    }

    fn remove(&self) {
        self.write(None);
    }
}

/// `localStorage`-backed token slot.
#[cfg(feature = "hydrate")]
#[derive(Clone, Debug)]
pub struct BrowserTokenStore {
    key: String,
}

#[cfg(feature = "hydrate")]
impl BrowserTokenStore {
    #[must_use]
    pub fn new(key: &str) -> Self {
        Self { key: key.to_owned() }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

#[cfg(feature = "hydrate")]
impl TokenStore for BrowserTokenStore {
    fn key(&self) -> &str {
        &self.key
    }

    fn get(&self) -> Option<String> {
        Self::storage()?.get_item(&self.key).ok().flatten()
    }

    fn set(&self, token: &str) -> Result<(), AuthError> {
        let storage = Self::storage().ok_or_else(|| AuthError::Storage("localStorage unavailable".to_owned()))?;
        storage
            .set_item(&self.key, token)
            .map_err(|e| AuthError::Storage(crate::error::js_error_message(&e)))
    }

    fn remove(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(&self.key);
        }
    }
}

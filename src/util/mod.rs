//! Browser helpers shared by the auth core.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate `localStorage` and DOM event glue from the state
//! machine so the machine can be tested natively.

pub mod token_store;
pub mod watchers;

//! Key-value lookup used to resolve token names into token values.
//!
//! # Design
//! Token persistence belongs to the host (browser storage, keychain, env...).
//! The client only ever reads through `TokenStore::get_item`, once per call,
//! so a token rotated in the store is picked up by the next request.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Read access to a host-owned key-value store.
pub trait TokenStore: std::fmt::Debug + Send + Sync {
    fn get_item(&self, name: &str) -> Option<String>;
}

/// Store with no entries. Lookup names then act as literal tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTokenStore;

impl TokenStore for NoTokenStore {
    fn get_item(&self, _name: &str) -> Option<String> {
        None
    }
}

/// In-memory store, shareable between the host and the client.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_item(&self, name: impl Into<String>, value: impl Into<String>) {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), value.into());
    }

    pub fn remove_item(&self, name: &str) {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name);
    }

    pub fn clear(&self) {
        self.items.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl TokenStore for MemoryTokenStore {
    fn get_item(&self, name: &str) -> Option<String> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }
}

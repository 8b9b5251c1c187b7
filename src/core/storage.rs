//! Storage port over the browser's localStorage.
//!
//! Both the account list and the current-session record live under fixed
//! keys in a single shared localStorage region. The port is injected so
//! the core can run against an in-memory fake in tests. Every read
//! failure degrades to "no data"; writes are best-effort.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Key the full account list is persisted under.
pub const ACCOUNTS_KEY: &str = "gridfall_accounts";

/// Key the current-session record is persisted under.
pub const SESSION_KEY: &str = "gridfall_session";

/// Minimal get/set/remove surface of a string key-value store.
///
/// `Send + Sync` so the handle can sit inside reactive context values;
/// the client itself is single-threaded.
pub trait StoragePort: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Shared handle to a storage port.
pub type SharedStorage = Arc<dyn StoragePort>;

/// localStorage-backed port. Storage being disabled (private browsing,
/// quota, no window) reads as empty and swallows writes.
#[derive(Clone, Copy, Default)]
pub struct BrowserStorage;

#[cfg(target_arch = "wasm32")]
impl StoragePort for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        let storage = web_sys::window()?.local_storage().ok()??;
        storage.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(window) = web_sys::window() {
            if let Ok(Some(storage)) = window.local_storage() {
                let _ = storage.set_item(key, value);
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(window) = web_sys::window() {
            if let Ok(Some(storage)) = window.local_storage() {
                let _ = storage.remove_item(key);
            }
        }
    }
}

// Outside the browser there is nothing to persist to.
#[cfg(not(target_arch = "wasm32"))]
impl StoragePort for BrowserStorage {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) {}

    fn remove(&self, _key: &str) {}
}

/// In-memory port for tests and scratch sessions.
#[derive(Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoragePort for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.remove(key);
        }
    }
}

//! Durable key/value storage and the global presentation marker.
//!
//! The backing store is compile-time dispatched:
//! - native → `FileStore`, a small JSON file (native.rs)
//! - `wasm` feature → browser `localStorage` (wasm.rs)
//!
//! `MemoryStore` and `SharedMarker` work everywhere and back the tests.

#[cfg(not(target_arch = "wasm32"))]
pub mod native;

#[cfg(feature = "wasm")]
pub mod wasm;

use crate::domain::theme::Theme;
use crate::error::StorageError;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};

#[cfg(not(target_arch = "wasm32"))]
pub use native::FileStore;

/// String key/value storage that survives process restarts.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Process-wide presentation state that renderers read to pick colours.
///
/// In a browser this is the `dark` class on `<html>`.
pub trait PresentationMarker {
    fn apply(&self, theme: Theme);

    /// The marker's current state, `None` when it cannot be observed.
    fn current(&self) -> Option<Theme>;
}

// ─── MemoryStore ─────────────────────────────────────────────────────────────

/// In-process store. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ─── SharedMarker ────────────────────────────────────────────────────────────

const MARKER_UNSET: u8 = 0;
const MARKER_LIGHT: u8 = 1;
const MARKER_DARK: u8 = 2;

/// In-process marker; clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct SharedMarker {
    state: Arc<AtomicU8>,
}

impl SharedMarker {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PresentationMarker for SharedMarker {
    fn apply(&self, theme: Theme) {
        let value = if theme.is_dark() { MARKER_DARK } else { MARKER_LIGHT };
        self.state.store(value, Ordering::SeqCst);
    }

    fn current(&self) -> Option<Theme> {
        match self.state.load(Ordering::SeqCst) {
            MARKER_DARK => Some(Theme::Dark),
            MARKER_LIGHT => Some(Theme::Light),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_get_set() {
        let store = MemoryStore::new();
        assert_eq!(store.get("theme").unwrap(), None);
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
        store.set("theme", "light").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_arc_store_shares_contents() {
        let store = Arc::new(MemoryStore::with_entry("theme", "dark"));
        let other = Arc::clone(&store);
        other.set("theme", "light").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_shared_marker_clones_observe_same_state() {
        let marker = SharedMarker::new();
        assert_eq!(marker.current(), None);
        let observer = marker.clone();
        marker.apply(Theme::Dark);
        assert_eq!(observer.current(), Some(Theme::Dark));
        observer.apply(Theme::Light);
        assert_eq!(marker.current(), Some(Theme::Light));
    }
}

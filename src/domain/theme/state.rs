//! Theme state containers. The app owns them, the SDK provides update logic.

use super::{Theme, THEME_STORAGE_KEY};
use crate::error::StorageError;
use crate::storage::{KeyValueStore, PresentationMarker};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

type Listener = Box<dyn Fn(Theme) + Send + Sync>;

/// Handle returned by [`ThemeFlag::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// The persisted light/dark flag.
///
/// Durable storage is the source of truth across restarts; the presentation
/// marker and subscribers are told about every change.
pub struct ThemeFlag<K, M> {
    theme: Theme,
    store: K,
    marker: M,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl<K: KeyValueStore, M: PresentationMarker> ThemeFlag<K, M> {
    /// Read the stored flag (light when absent or unreadable), write it back
    /// in canonical form and apply it.
    ///
    /// A failed write is logged and otherwise ignored.
    pub fn load(store: K, marker: M) -> Self {
        let theme = match store.get(THEME_STORAGE_KEY) {
            Ok(stored) => Theme::from_stored(stored.as_deref()),
            Err(e) => {
                tracing::warn!("Could not read stored theme, using light: {}", e);
                Theme::Light
            }
        };
        if let Err(e) = store.set(THEME_STORAGE_KEY, theme.as_str()) {
            tracing::warn!(%theme, "Could not persist loaded theme: {}", e);
        }
        marker.apply(theme);
        tracing::debug!(%theme, "Theme loaded");

        Self {
            theme,
            store,
            marker,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }

    /// Flip the flag. See [`ThemeFlag::set`].
    pub fn toggle(&mut self) -> Result<Theme, StorageError> {
        self.set(self.theme.toggled())
    }

    /// Persist `theme`, then apply the marker and notify subscribers.
    ///
    /// On a storage failure nothing changes and the error is returned.
    pub fn set(&mut self, theme: Theme) -> Result<Theme, StorageError> {
        self.store.set(THEME_STORAGE_KEY, theme.as_str())?;
        self.theme = theme;
        self.marker.apply(theme);
        tracing::info!(%theme, "Theme changed");

        for (_, listener) in &self.listeners {
            listener(theme);
        }
        Ok(theme)
    }

    /// Register a change callback. It is not called for the current value.
    pub fn subscribe(&mut self, listener: impl Fn(Theme) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        before != self.listeners.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    pub fn marker(&self) -> &M {
        &self.marker
    }
}

/// Read-only mirror of the theme, kept in sync by change notifications.
///
/// Not a second source of truth: [`ThemeMirror::resync`] re-reads the
/// presentation marker when it may have changed out of band.
#[derive(Debug, Clone)]
pub struct ThemeMirror {
    dark: Arc<AtomicBool>,
}

impl ThemeMirror {
    pub fn attach<K: KeyValueStore, M: PresentationMarker>(flag: &mut ThemeFlag<K, M>) -> Self {
        let dark = Arc::new(AtomicBool::new(flag.is_dark()));
        let sink = Arc::clone(&dark);
        flag.subscribe(move |theme| sink.store(theme.is_dark(), Ordering::SeqCst));
        Self { dark }
    }

    pub fn theme(&self) -> Theme {
        if self.dark.load(Ordering::SeqCst) {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn resync(&self, marker: &impl PresentationMarker) -> Theme {
        if let Some(theme) = marker.current() {
            self.dark.store(theme.is_dark(), Ordering::SeqCst);
        }
        self.theme()
    }
}

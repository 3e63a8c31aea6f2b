//! Browser storage using `web-sys`: `localStorage` and the `<html>` class list.
//!
//! Both types are unit structs that look the window up on every call; all
//! browser state stays in the browser.

use super::{KeyValueStore, PresentationMarker};
use crate::domain::theme::{Theme, DARK_CLASS};
use crate::error::StorageError;

use wasm_bindgen::JsValue;
use web_sys::{Element, Storage};

fn extract_js_error(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

fn local_storage() -> Result<Storage, StorageError> {
    let window = web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".into()))?;
    window
        .local_storage()
        .map_err(|e| StorageError::Unavailable(extract_js_error(&e)))?
        .ok_or_else(|| StorageError::Unavailable("localStorage disabled".into()))
}

fn document_root() -> Option<Element> {
    web_sys::window()?.document()?.document_element()
}

/// `window.localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        local_storage()?
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(extract_js_error(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        local_storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Unavailable(extract_js_error(&e)))
    }
}

/// The `dark` class on `document.documentElement`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentClassMarker;

impl PresentationMarker for DocumentClassMarker {
    fn apply(&self, theme: Theme) {
        let Some(root) = document_root() else {
            tracing::warn!("No document root; theme class not applied");
            return;
        };
        let classes = root.class_list();
        let result = if theme.is_dark() {
            classes.add_1(DARK_CLASS)
        } else {
            classes.remove_1(DARK_CLASS)
        };
        if let Err(e) = result {
            tracing::error!("Failed to update theme class: {}", extract_js_error(&e));
        }
    }

    fn current(&self) -> Option<Theme> {
        let root = document_root()?;
        if root.class_list().contains(DARK_CLASS) {
            Some(Theme::Dark)
        } else {
            Some(Theme::Light)
        }
    }
}

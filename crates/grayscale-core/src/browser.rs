//! Browser bindings for the document and storage traits.
//!
//! Compiled with the `browser` feature for `wasm32` hosts that drive the
//! effect from Rust instead of the emitted inline script.

use web_sys::{Document, Element, Storage};

use crate::config::{Configuration, RenderContext};
use crate::document::{ControlDisplay, DocumentRoot, MissingElement};
use crate::effect::{EffectApplier, EffectOutcome};
use crate::preference::PreferenceStore;
use crate::storage::{KeyValueStore, StorageError};

/// `document.documentElement` of the current page.
pub struct WebDocument {
    document: Document,
    root: Element,
}

impl WebDocument {
    /// The current page, or `None` outside a browser window.
    pub fn current() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let root = document.document_element()?;
        Some(Self { document, root })
    }
}

impl DocumentRoot for WebDocument {
    fn has_class(&self, class: &str) -> bool {
        self.root.class_list().contains(class)
    }

    fn add_class(&mut self, class: &str) {
        if let Err(e) = self.root.class_list().add_1(class) {
            tracing::debug!(?e, class, "classList.add failed");
        }
    }

    fn remove_class(&mut self, class: &str) {
        if let Err(e) = self.root.class_list().remove_1(class) {
            tracing::debug!(?e, class, "classList.remove failed");
        }
    }

    fn has_style(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn declare_style(&mut self, id: &str, css: &str) {
        let style = match self.document.get_element_by_id(id) {
            Some(existing) => existing,
            None => {
                let Ok(created) = self.document.create_element("style") else {
                    return;
                };
                created.set_id(id);
                let appended = match self.document.head() {
                    Some(head) => head.append_child(&created),
                    None => self.root.append_child(&created),
                };
                if let Err(e) = appended {
                    tracing::debug!(?e, id, "Could not attach style block");
                    return;
                }
                created
            }
        };
        style.set_text_content(Some(css));
    }

    fn has_element(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn sync_control(&mut self, id: &str, display: &ControlDisplay) -> Result<(), MissingElement> {
        let element = self
            .document
            .get_element_by_id(id)
            .ok_or_else(|| MissingElement(id.to_string()))?;
        let pressed = if display.pressed { "true" } else { "false" };
        for (name, value) in [("aria-pressed", pressed), ("title", display.title)] {
            if let Err(e) = element.set_attribute(name, value) {
                tracing::debug!(?e, id, name, "setAttribute failed");
            }
        }
        Ok(())
    }
}

/// `window.localStorage`, which may be missing or blocked.
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    pub fn current() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        Self { storage }
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        storage.get_item(key).map_err(|_| StorageError::Denied)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|_| StorageError::QuotaExceeded)
    }
}

/// Install the effect on the current page.
pub fn apply_to_current_page(config: &Configuration, context: RenderContext) -> EffectOutcome {
    let Some(mut document) = WebDocument::current() else {
        return EffectOutcome::Skipped;
    };
    let preference = PreferenceStore::new(LocalStorage::current());
    EffectApplier::apply(config, context, &mut document, &preference)
}

//! The document the effect is applied to.
//!
//! The core only ever touches three things on a page: the class list of the
//! root element, global style blocks (by id), and the pressed/title state of
//! control elements. [`DocumentRoot`] captures exactly that;
//! [`MemoryDocument`] implements it in memory.

use std::collections::BTreeMap;

/// A control element targeted by a trigger surface was not on the page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("element #{0} not found")]
pub struct MissingElement(pub String);

/// Accessible state shown by a control element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlDisplay {
    /// Value of `aria-pressed`
    pub pressed: bool,
    /// Value of `title`
    pub title: &'static str,
}

/// The parts of a page the core reads and mutates.
pub trait DocumentRoot {
    /// Whether the root element carries `class`.
    fn has_class(&self, class: &str) -> bool;

    /// Add `class` to the root element. Adding a present class is a no-op.
    fn add_class(&mut self, class: &str);

    /// Remove `class` from the root element.
    fn remove_class(&mut self, class: &str);

    /// Flip `class` on the root element, returning whether it is now present.
    fn toggle_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.add_class(class);
            true
        }
    }

    /// Whether a style block with `id` has been declared.
    fn has_style(&self, id: &str) -> bool;

    /// Declare a global style block. A block with the same id is replaced.
    fn declare_style(&mut self, id: &str, css: &str);

    /// Whether an element with `id` exists.
    fn has_element(&self, id: &str) -> bool;

    /// Show `display` on the control element `id`.
    fn sync_control(&mut self, id: &str, display: &ControlDisplay) -> Result<(), MissingElement>;
}

/// State of a control element in a [`MemoryDocument`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlElement {
    pub pressed: bool,
    pub title: Option<String>,
}

/// In-memory page: a root class list, style blocks and control elements.
///
/// A fresh `MemoryDocument` stands for one page load. Build a new one to
/// simulate a reload.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    classes: Vec<String>,
    styles: Vec<(String, String)>,
    controls: BTreeMap<String, ControlElement>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a control element the way server-rendered markup would.
    pub fn with_control(mut self, id: &str) -> Self {
        self.controls.insert(id.to_string(), ControlElement::default());
        self
    }

    /// Remove a control element, e.g. a script deleting it after load.
    pub fn remove_control(&mut self, id: &str) {
        self.controls.remove(id);
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// How many times `class` appears on the root element.
    pub fn class_count(&self, class: &str) -> usize {
        self.classes.iter().filter(|c| c.as_str() == class).count()
    }

    /// Declared style blocks in declaration order, as `(id, css)`.
    pub fn styles(&self) -> &[(String, String)] {
        &self.styles
    }

    pub fn style(&self, id: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(style_id, _)| style_id == id)
            .map(|(_, css)| css.as_str())
    }

    pub fn control(&self, id: &str) -> Option<&ControlElement> {
        self.controls.get(id)
    }
}

impl DocumentRoot for MemoryDocument {
    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    fn has_style(&self, id: &str) -> bool {
        self.style(id).is_some()
    }

    fn declare_style(&mut self, id: &str, css: &str) {
        match self.styles.iter_mut().find(|(style_id, _)| style_id == id) {
            Some((_, existing)) => *existing = css.to_string(),
            None => self.styles.push((id.to_string(), css.to_string())),
        }
    }

    fn has_element(&self, id: &str) -> bool {
        self.controls.contains_key(id)
    }

    fn sync_control(&mut self, id: &str, display: &ControlDisplay) -> Result<(), MissingElement> {
        let control = self
            .controls
            .get_mut(id)
            .ok_or_else(|| MissingElement(id.to_string()))?;
        control.pressed = display.pressed;
        control.title = Some(display.title.to_string());
        Ok(())
    }
}

//! Resolved per-render configuration.
//!
//! [`Configuration`] is the validated snapshot a host hands to the core for
//! one render. The core never writes it back and never fetches it itself.

use serde::Serialize;
use std::fmt;

/// Label used when the host supplies none.
pub const DEFAULT_BUTTON_LABEL: &str = "Toggle grayscale";

/// Filter strength as a percentage, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Intensity(u8);

impl Intensity {
    pub const MIN: Intensity = Intensity(0);
    pub const MAX: Intensity = Intensity(100);

    /// Clamp any integer into range. Out-of-range input is never an error.
    pub fn clamped(value: i64) -> Self {
        Intensity(value.clamp(0, 100) as u8)
    }

    /// Percentage value in `0..=100`.
    pub fn percent(self) -> u8 {
        self.0
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Intensity::MAX
    }
}

impl From<i64> for Intensity {
    fn from(value: i64) -> Self {
        Intensity::clamped(value)
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Where the page is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderContext {
    /// The public site
    Public,
    /// The administrative dashboard
    Admin,
}

impl RenderContext {
    /// Parse a context name (`public` or `admin`), case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" | "front" | "site" => Some(RenderContext::Public),
            "admin" | "dashboard" => Some(RenderContext::Admin),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RenderContext::Public => "public",
            RenderContext::Admin => "admin",
        }
    }
}

impl fmt::Display for RenderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable settings snapshot for one render.
///
/// `button_label` must already be sanitized plain text; the core inserts it
/// into markup only through escaping renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    /// Master switch for the public site
    pub enabled: bool,
    pub intensity: Intensity,
    /// Whether the filter also applies on the administrative surface
    pub apply_to_admin: bool,
    /// Whether any trigger surface renders at all
    pub allow_visitor_toggle: bool,
    /// Whether the host-chrome entry point is offered to privileged viewers
    pub show_in_host_chrome: bool,
    pub button_label: String,
}

impl Configuration {
    /// Whether the filter is switched on for `context`, ignoring any
    /// visitor preference.
    pub fn enabled_for(&self, context: RenderContext) -> bool {
        match context {
            RenderContext::Public => self.enabled,
            RenderContext::Admin => self.apply_to_admin,
        }
    }

    /// Whether trigger surfaces may mount in `context`.
    pub fn surfaces_allowed(&self, context: RenderContext) -> bool {
        self.allow_visitor_toggle && self.enabled_for(context)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            enabled: true,
            intensity: Intensity::default(),
            apply_to_admin: false,
            allow_visitor_toggle: true,
            show_in_host_chrome: true,
            button_label: DEFAULT_BUTTON_LABEL.to_string(),
        }
    }
}

//! Trigger surfaces: controls that let a visitor turn the effect off and on.
//!
//! All surfaces share one behavior. Activation flips [`USER_OFF_CLASS`] on
//! the root element, persists the new membership, then re-reads the class to
//! decide what the control shows. The display therefore always matches what
//! is on screen, even when persistence silently failed.
//!
//! Surfaces do not observe each other. Two surfaces on one page each show
//! the state as of their own last activation; the stored preference is what
//! keeps them consistent on the next load.

use std::fmt;

use crate::config::{Configuration, RenderContext};
use crate::document::{ControlDisplay, DocumentRoot};
use crate::effect::USER_OFF_CLASS;
use crate::preference::PreferenceStore;
use crate::storage::KeyValueStore;

/// Mount id of the floating button.
pub const FLOATING_ID: &str = "sgmToggleBtn";

/// Mount id of the first inline (shortcode) button.
pub const INLINE_ID: &str = "sgmToggleInline";

/// Mount id of the host-chrome menu item.
pub const HOST_CHROME_ID: &str = "sgm-toggle";

/// Title shown while grayscale is visible.
pub const TITLE_ON: &str = "Grayscale is ON";

/// Title shown while the visitor has it turned off.
pub const TITLE_OFF: &str = "Grayscale is OFF";

/// The kinds of entry point a page can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// Fixed-position button in the page footer
    Floating,
    /// Button embedded in content by a shortcode
    Inline,
    /// Menu item in the host's toolbar, privileged viewers only
    HostChrome,
}

impl SurfaceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SurfaceKind::Floating => "floating",
            SurfaceKind::Inline => "inline",
            SurfaceKind::HostChrome => "host-chrome",
        }
    }

    /// Whether this kind of surface appears at all in `context`.
    ///
    /// Buttons live in public page content; the toolbar exists everywhere.
    pub fn offered_in(self, context: RenderContext) -> bool {
        match self {
            SurfaceKind::Floating | SurfaceKind::Inline => context == RenderContext::Public,
            SurfaceKind::HostChrome => true,
        }
    }

    /// Whether the host must authorize the viewer before rendering.
    pub fn requires_privilege(self) -> bool {
        matches!(self, SurfaceKind::HostChrome)
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host-owned authorization check for privileged surfaces.
pub trait Authorizer {
    /// Whether the current viewer may see a surface of `kind`.
    fn authorize(&self, kind: SurfaceKind) -> bool;
}

impl<F> Authorizer for F
where
    F: Fn(SurfaceKind) -> bool,
{
    fn authorize(&self, kind: SurfaceKind) -> bool {
        self(kind)
    }
}

/// Display state of one surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceState {
    /// Grayscale active, control not pressed
    OffShown,
    /// Grayscale suppressed by the visitor, control pressed
    OnShown,
}

impl SurfaceState {
    /// Derive the state from the root element's current classes.
    pub fn observe<D: DocumentRoot>(document: &D) -> Self {
        if document.has_class(USER_OFF_CLASS) {
            SurfaceState::OnShown
        } else {
            SurfaceState::OffShown
        }
    }

    pub fn pressed(self) -> bool {
        self == SurfaceState::OnShown
    }

    pub fn title(self) -> &'static str {
        match self {
            SurfaceState::OffShown => TITLE_ON,
            SurfaceState::OnShown => TITLE_OFF,
        }
    }

    pub fn display(self) -> ControlDisplay {
        ControlDisplay {
            pressed: self.pressed(),
            title: self.title(),
        }
    }
}

/// An entry point that can be rendered and mounted on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerSurface {
    kind: SurfaceKind,
    mount_id: String,
}

impl TriggerSurface {
    pub fn new(kind: SurfaceKind, mount_id: impl Into<String>) -> Self {
        Self {
            kind,
            mount_id: mount_id.into(),
        }
    }

    pub fn floating() -> Self {
        Self::new(SurfaceKind::Floating, FLOATING_ID)
    }

    /// The `ordinal`-th inline button on a page, counting from 1.
    ///
    /// The first keeps the bare id; later ones get a numeric suffix so every
    /// control on the page has a distinct mount point.
    pub fn inline(ordinal: usize) -> Self {
        let mount_id = if ordinal <= 1 {
            INLINE_ID.to_string()
        } else {
            format!("{INLINE_ID}-{ordinal}")
        };
        Self::new(SurfaceKind::Inline, mount_id)
    }

    pub fn host_chrome() -> Self {
        Self::new(SurfaceKind::HostChrome, HOST_CHROME_ID)
    }

    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }

    pub fn mount_id(&self) -> &str {
        &self.mount_id
    }

    /// Whether this surface renders for `config` in `context`.
    ///
    /// Every surface re-checks the toggle switch and that the filter is
    /// installed at all. The host-chrome item also needs
    /// `show_in_host_chrome` and the host's approval of the viewer.
    pub fn should_render<A>(
        &self,
        config: &Configuration,
        context: RenderContext,
        authorizer: &A,
    ) -> bool
    where
        A: Authorizer + ?Sized,
    {
        if !self.kind.offered_in(context) || !config.surfaces_allowed(context) {
            return false;
        }
        if self.kind == SurfaceKind::HostChrome && !config.show_in_host_chrome {
            return false;
        }
        !self.kind.requires_privilege() || authorizer.authorize(self.kind)
    }

    /// Attach to the control element on a loaded page.
    ///
    /// Restores a stored "forced off" preference onto the root, then shows
    /// the observed state. Returns `None` without touching the page when the
    /// control element is missing.
    pub fn mount<D, S>(
        &self,
        document: &mut D,
        preference: &PreferenceStore<S>,
    ) -> Option<MountedSurface>
    where
        D: DocumentRoot,
        S: KeyValueStore,
    {
        if !document.has_element(&self.mount_id) {
            tracing::debug!(
                surface = %self.kind,
                id = %self.mount_id,
                "Control element missing, surface not mounted"
            );
            return None;
        }

        if preference.read() {
            document.add_class(USER_OFF_CLASS);
        }

        let mut mounted = MountedSurface {
            surface: self.clone(),
            state: SurfaceState::OffShown,
        };
        mounted.resync(document);
        Some(mounted)
    }
}

/// A surface attached to a live control element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountedSurface {
    surface: TriggerSurface,
    state: SurfaceState,
}

impl MountedSurface {
    pub fn surface(&self) -> &TriggerSurface {
        &self.surface
    }

    /// State as of this surface's last mount or activation.
    pub fn state(&self) -> SurfaceState {
        self.state
    }

    /// Handle one click: flip the effect, persist, re-sync this control.
    pub fn activate<D, S>(
        &mut self,
        document: &mut D,
        preference: &mut PreferenceStore<S>,
    ) -> SurfaceState
    where
        D: DocumentRoot,
        S: KeyValueStore,
    {
        let forced_off = document.toggle_class(USER_OFF_CLASS);
        preference.write(forced_off);
        self.resync(document);

        tracing::debug!(
            surface = %self.surface.kind,
            id = %self.surface.mount_id,
            state = ?self.state,
            "Grayscale toggled"
        );

        self.state
    }

    fn resync<D: DocumentRoot>(&mut self, document: &mut D) {
        self.state = SurfaceState::observe(document);
        if let Err(e) = document.sync_control(&self.surface.mount_id, &self.state.display()) {
            tracing::debug!(error = %e, "Control vanished, display not updated");
        }
    }
}

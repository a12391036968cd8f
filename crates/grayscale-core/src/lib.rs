//! grayscale-core: site-wide grayscale with a per-browser visitor opt-out
//!
//! The crate is the logic behind a grayscale "mode" for a site: which pages
//! get the filter, how a visitor's choice to turn it off is stored and
//! restored, and how any number of toggle controls share that choice.
//!
//! # Pieces
//!
//! - [`Configuration`]: the validated settings snapshot a host supplies for
//!   one render. Intensity is clamped into `0..=100` on construction.
//! - [`PreferenceStore`]: the single "forced off" boolean, persisted
//!   best-effort through any [`KeyValueStore`].
//! - [`EffectApplier`]: declares the filter rules and marks the root element
//!   of a [`DocumentRoot`].
//! - [`TriggerSurface`]: one abstraction for the floating button, inline
//!   shortcode buttons and the host toolbar item.
//!
//! # Example
//!
//! ```
//! use grayscale_core::{
//!     Configuration, DocumentRoot, EffectApplier, MemoryDocument, MemoryStorage,
//!     PreferenceStore, RenderContext, SurfaceState, TriggerSurface, USER_OFF_CLASS,
//! };
//!
//! let config = Configuration::default();
//! let mut prefs = PreferenceStore::new(MemoryStorage::new());
//! let mut page = MemoryDocument::new().with_control("sgmToggleBtn");
//!
//! EffectApplier::apply(&config, RenderContext::Public, &mut page, &prefs);
//! let mut button = TriggerSurface::floating().mount(&mut page, &prefs).unwrap();
//!
//! assert_eq!(button.activate(&mut page, &mut prefs), SurfaceState::OnShown);
//! assert!(page.has_class(USER_OFF_CLASS));
//! assert!(prefs.read());
//! ```
//!
//! # Failure model
//!
//! Nothing in the core fails visibly. Storage errors read as "not forced
//! off" and writes are dropped; a missing control element only disables
//! that one surface.

pub mod config;
pub mod document;
pub mod effect;
pub mod preference;
pub mod storage;
pub mod surface;

#[cfg(feature = "browser")]
pub mod browser;


pub use config::{Configuration, Intensity, RenderContext, DEFAULT_BUTTON_LABEL};
pub use document::{ControlDisplay, ControlElement, DocumentRoot, MemoryDocument, MissingElement};
pub use effect::{
    EffectApplier, EffectOutcome, FilterRules, Media, BODY_CLASS, OPT_OUT_CLASS, ROOT_CLASS,
    STYLE_ID, USER_OFF_CLASS,
};
pub use preference::{PreferenceStore, FORCED_OFF, NOT_FORCED_OFF, PREFERENCE_KEY};
pub use storage::{KeyValueStore, MemoryStorage, StorageError};
pub use surface::{
    Authorizer, MountedSurface, SurfaceKind, SurfaceState, TriggerSurface, FLOATING_ID,
    HOST_CHROME_ID, INLINE_ID, TITLE_OFF, TITLE_ON,
};

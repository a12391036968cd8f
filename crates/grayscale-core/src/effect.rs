//! Installing the grayscale filter on a page.
//!
//! The filter is driven entirely by classes on the root element: a marker
//! class scopes the `grayscale()` rule, an off-override class cancels it, and
//! an opt-out class exempts page-author chosen subtrees. Every trigger
//! surface flips the same off-override class, so none of them touch inline
//! styles.

use crate::config::{Configuration, Intensity, RenderContext};
use crate::document::DocumentRoot;
use crate::preference::PreferenceStore;
use crate::storage::KeyValueStore;

/// Marker class on the root element that scopes the filter rule.
pub const ROOT_CLASS: &str = "sgm-grayscale-root";

/// Root class set when the visitor has forced the effect off.
pub const USER_OFF_CLASS: &str = "sgm-user-off";

/// Class page authors put on elements that must never be filtered.
pub const OPT_OUT_CLASS: &str = "no-grayscale";

/// Helper class hosts add to `<body>` while the effect is enabled.
pub const BODY_CLASS: &str = "sgm-grayscale";

/// Id of the single style block holding every rule.
pub const STYLE_ID: &str = "sgm-grayscale-style";

/// Output medium, for the print override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Media {
    Screen,
    Print,
}

/// The rule set declared for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterRules {
    intensity: Intensity,
}

impl FilterRules {
    pub fn new(intensity: Intensity) -> Self {
        Self { intensity }
    }

    pub fn intensity(&self) -> Intensity {
        self.intensity
    }

    /// CSS text for the style block.
    ///
    /// Holds the marker-class filter, the opt-out escape, the print override
    /// and the off-override, in that order.
    pub fn stylesheet(&self) -> String {
        let pct = self.intensity.percent();
        format!(
            "html.{ROOT_CLASS} {{\n  \
               -webkit-filter: grayscale({pct}%);\n  \
               filter: grayscale({pct}%);\n\
             }}\n\
             .{OPT_OUT_CLASS}, .{OPT_OUT_CLASS} * {{\n  \
               -webkit-filter: none !important;\n  \
               filter: none !important;\n\
             }}\n\
             @media print {{\n  \
               html.{ROOT_CLASS} {{\n    \
                 -webkit-filter: none !important;\n    \
                 filter: none !important;\n  \
               }}\n\
             }}\n\
             html.{USER_OFF_CLASS} {{\n  \
               -webkit-filter: none !important;\n  \
               filter: none !important;\n\
             }}\n"
        )
    }

    /// The grayscale strength an element actually renders with.
    ///
    /// `lineage` lists the class lists of the element and each of its
    /// ancestors below the root. `None` means unfiltered.
    ///
    /// Opt-out elements count as unfiltered here because the stylesheet
    /// sets `filter: none` on them. In a browser that rule cannot cancel a
    /// filter inherited from the `html` element: the root filter still
    /// applies to the rendered subtree. This models the declared rules, not
    /// the compositor.
    pub fn effective_filter<D: DocumentRoot>(
        &self,
        document: &D,
        lineage: &[&[&str]],
        media: Media,
    ) -> Option<Intensity> {
        if media == Media::Print
            || !document.has_style(STYLE_ID)
            || !document.has_class(ROOT_CLASS)
            || document.has_class(USER_OFF_CLASS)
        {
            return None;
        }
        if lineage
            .iter()
            .any(|classes| classes.contains(&OPT_OUT_CLASS))
        {
            return None;
        }
        Some(self.intensity)
    }
}

/// What [`EffectApplier::apply`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectOutcome {
    /// The effect is not enabled for this context; the page was untouched
    Skipped,
    /// Rules declared and the marker class set
    Installed {
        rules: FilterRules,
        /// Whether the stored preference restored the off-override
        forced_off: bool,
    },
}

impl EffectOutcome {
    pub fn is_installed(&self) -> bool {
        matches!(self, EffectOutcome::Installed { .. })
    }

    /// Whether the filter is visible on the page right now.
    pub fn is_visible(&self) -> bool {
        matches!(
            self,
            EffectOutcome::Installed {
                forced_off: false,
                ..
            }
        )
    }
}

/// Decides whether a page gets the filter and installs it.
#[derive(Debug, Clone, Copy, Default)]
pub struct EffectApplier;

impl EffectApplier {
    /// The rules to declare for `context`, or `None` when the effect is off.
    pub fn plan(config: &Configuration, context: RenderContext) -> Option<FilterRules> {
        config
            .enabled_for(context)
            .then(|| FilterRules::new(config.intensity))
    }

    /// Install the filter on `document` and restore the visitor preference.
    ///
    /// Safe to call repeatedly: classes and the style block are keyed, so a
    /// second call changes nothing. Storage failures only skip the restore.
    pub fn apply<D, S>(
        config: &Configuration,
        context: RenderContext,
        document: &mut D,
        preference: &PreferenceStore<S>,
    ) -> EffectOutcome
    where
        D: DocumentRoot,
        S: KeyValueStore,
    {
        let Some(rules) = Self::plan(config, context) else {
            tracing::debug!(%context, "Grayscale disabled for context, leaving page untouched");
            return EffectOutcome::Skipped;
        };

        document.declare_style(STYLE_ID, &rules.stylesheet());
        document.add_class(ROOT_CLASS);

        let forced_off = preference.read();
        if forced_off {
            document.add_class(USER_OFF_CLASS);
        }

        tracing::debug!(
            %context,
            intensity = rules.intensity().percent(),
            forced_off,
            "Grayscale installed"
        );

        EffectOutcome::Installed { rules, forced_off }
    }
}

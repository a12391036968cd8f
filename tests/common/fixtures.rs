//! Test fixtures and constants.

/// Element selectors for the grayscale layer
pub mod selectors {
    pub const HEAD: &str = "script[data-sgm-head]";
    pub const FLOATING: &str = "button#sgmToggleBtn";
    pub const INLINE: &str = "button.sgm-toggle-btn--inline";
    pub const TOOLBAR_ITEM: &str = "#sgm-toolbar a#sgm-toggle";
    pub const BODY: &str = "body";
}

/// Settings with every option on, including the dashboard filter
pub const ALL_ON: &str = r#"
grayscale:
  enabled: true
  intensity: 100
  apply_admin: true
  allow_toggle: true
  show_adminbar: true
site:
  title: "Fixture"
  pages:
    - slug: home
      title: "Home"
      content: "<p>[grayscale_toggle]</p><p>[grayscale_toggle /]</p><p>[[grayscale_toggle]]</p>"
    - slug: plain
      title: "Plain"
      content: "<p>No buttons here.</p>"
"#;

/// Settings with the public filter switched off
pub const DISABLED: &str = r#"
grayscale:
  enabled: 0
site:
  pages:
    - slug: home
      title: "Home"
      content: "[grayscale_toggle]"
"#;

/// Filter on, visitor toggle off
pub const NO_TOGGLE: &str = r#"
grayscale:
  enabled: "on"
  allow_toggle: "off"
site:
  pages:
    - slug: home
      title: "Home"
      content: "[grayscale_toggle]"
"#;

/// Out-of-range and messy values
pub const MESSY: &str = r#"
grayscale:
  intensity: "250"
  button_label: "  <b>Colour</b>\n   please  "
"#;

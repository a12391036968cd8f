//! Grayscale options as stored in the settings file, and their resolution
//! into a core [`Configuration`].
//!
//! Parsing is deliberately forgiving: settings exported from other tools
//! store flags as `1`/`0` or `"on"`, and intensity as a string. Nothing here
//! rejects a value; bad input is coerced, clamped or defaulted, and each
//! coercion is reported as an [`Adjustment`].

use grayscale_core::{Configuration, Intensity, DEFAULT_BUTTON_LABEL};
use regex::Regex;
use serde::Deserialize;
use std::fmt;
use std::sync::OnceLock;

/// A checkbox-style option.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Flag {
    /// Whether the flag counts as checked.
    pub fn is_set(&self) -> bool {
        match self {
            Flag::Bool(b) => *b,
            Flag::Int(i) => *i != 0,
            Flag::Float(f) => *f != 0.0,
            Flag::Text(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "1" | "on" | "yes" | "true"
            ),
        }
    }
}

/// A numeric option that may arrive as text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawNumber {
    /// Integer value: floats truncate, text uses its leading integer (or 0).
    pub fn to_int(&self) -> i64 {
        match self {
            RawNumber::Int(i) => *i,
            // `as` saturates and maps NaN to 0
            RawNumber::Float(f) => *f as i64,
            RawNumber::Text(s) => leading_int(s),
        }
    }
}

fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(b - b'0');
        value = match value.checked_mul(10).and_then(|v| v.checked_add(digit)) {
            Some(v) => v,
            None => return if negative { i64::MIN } else { i64::MAX },
        };
    }
    if negative {
        -value
    } else {
        value
    }
}

/// The `grayscale:` section of the settings file.
///
/// Missing fields fall back to the defaults of [`Configuration`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GrayscaleOptions {
    pub enabled: Option<Flag>,
    pub intensity: Option<RawNumber>,
    pub apply_admin: Option<Flag>,
    pub allow_toggle: Option<Flag>,
    pub show_adminbar: Option<Flag>,
    pub button_label: Option<String>,
}

/// A change made to a stored value while resolving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Adjustment {
    IntensityClamped { from: i64, to: u8 },
    LabelSanitized { from: String, to: String },
    LabelDefaulted { from: String },
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Adjustment::IntensityClamped { from, to } => {
                write!(f, "intensity {from} clamped to {to}")
            }
            Adjustment::LabelSanitized { from, to } => {
                write!(f, "button_label {from:?} sanitized to {to:?}")
            }
            Adjustment::LabelDefaulted { from } => {
                write!(
                    f,
                    "button_label {from:?} is empty after sanitizing, using {DEFAULT_BUTTON_LABEL:?}"
                )
            }
        }
    }
}

/// A resolved configuration plus what had to be changed to get there.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptions {
    pub config: Configuration,
    pub adjustments: Vec<Adjustment>,
}

impl GrayscaleOptions {
    /// Resolve into a validated [`Configuration`].
    pub fn resolve(&self) -> ResolvedOptions {
        let defaults = Configuration::default();
        let mut adjustments = Vec::new();

        let flag = |value: &Option<Flag>, default: bool| value.as_ref().map_or(default, Flag::is_set);

        let intensity = match &self.intensity {
            Some(raw) => {
                let value = raw.to_int();
                let clamped = Intensity::clamped(value);
                if i64::from(clamped.percent()) != value {
                    adjustments.push(Adjustment::IntensityClamped {
                        from: value,
                        to: clamped.percent(),
                    });
                }
                clamped
            }
            None => defaults.intensity,
        };

        let button_label = match &self.button_label {
            Some(raw) => {
                let clean = sanitize_text_field(raw);
                if clean.is_empty() {
                    adjustments.push(Adjustment::LabelDefaulted { from: raw.clone() });
                    DEFAULT_BUTTON_LABEL.to_string()
                } else {
                    if &clean != raw {
                        adjustments.push(Adjustment::LabelSanitized {
                            from: raw.clone(),
                            to: clean.clone(),
                        });
                    }
                    clean
                }
            }
            None => defaults.button_label,
        };

        let config = Configuration {
            enabled: flag(&self.enabled, defaults.enabled),
            intensity,
            apply_to_admin: flag(&self.apply_admin, defaults.apply_to_admin),
            allow_visitor_toggle: flag(&self.allow_toggle, defaults.allow_visitor_toggle),
            show_in_host_chrome: flag(&self.show_adminbar, defaults.show_in_host_chrome),
            button_label,
        };

        ResolvedOptions {
            config,
            adjustments,
        }
    }
}

fn script_style_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>")
            .expect("valid regex")
    })
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[a-zA-Z/!?][^>]*>?").expect("valid regex"))
}

fn octet_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"%[a-fA-F0-9]{2}").expect("valid regex"))
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

/// Reduce free text to a single line of plain text.
///
/// Drops script/style blocks and every tag, removes percent-encoded octets,
/// collapses whitespace (including line breaks and tabs) and trims.
pub fn sanitize_text_field(input: &str) -> String {
    let text = script_style_re().replace_all(input, "");
    let text = tag_re().replace_all(&text, "");
    let mut text = text.into_owned();
    // Removing one octet can expose another ("%%4141"), so repeat until stable
    while octet_re().is_match(&text) {
        text = octet_re().replace_all(&text, "").into_owned();
    }
    whitespace_re().replace_all(&text, " ").trim().to_string()
}

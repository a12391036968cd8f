//! Expansion of the `[grayscale_toggle]` shortcode in page content.

use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Name of the shortcode
pub const TOGGLE_SHORTCODE: &str = "grayscale_toggle";

fn shortcode_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // [grayscale_toggle], [grayscale_toggle /], [grayscale_toggle any="attr"],
        // and [[grayscale_toggle]] as the literal escape
        Regex::new(r"\[(\[?)grayscale_toggle(?:\s[^\]]*?)?\s*/?\](\]?)").expect("valid regex")
    })
}

fn is_escaped(caps: &Captures<'_>) -> bool {
    !caps[1].is_empty() && !caps[2].is_empty()
}

/// Replace every toggle shortcode in `content` with the output of `render`.
///
/// `render` receives the 1-based ordinal of the occurrence. Escaped
/// shortcodes (`[[grayscale_toggle]]`) are emitted as literal text without
/// the outer brackets and do not consume an ordinal.
pub fn expand_toggles<F, E>(content: &str, mut render: F) -> Result<String, E>
where
    F: FnMut(usize) -> Result<String, E>,
{
    let mut out = String::with_capacity(content.len());
    let mut last = 0;
    let mut ordinal = 0;

    for caps in shortcode_re().captures_iter(content) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&content[last..whole.start()]);
        last = whole.end();

        if is_escaped(&caps) {
            let text = whole.as_str();
            out.push_str(&text[1..text.len() - 1]);
            continue;
        }

        // A lone extra bracket on either side is plain text
        out.push_str(&caps[1]);
        ordinal += 1;
        out.push_str(&render(ordinal)?);
        out.push_str(&caps[2]);
    }

    out.push_str(&content[last..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    fn expand(content: &str) -> String {
        expand_toggles::<_, Infallible>(content, |n| Ok(format!("<B{n}>"))).unwrap()
    }

    #[test]
    fn test_plain_shortcode() {
        assert_eq!(expand("a [grayscale_toggle] b"), "a <B1> b");
    }

    #[test]
    fn test_variants() {
        assert_eq!(expand("[grayscale_toggle /]"), "<B1>");
        assert_eq!(expand("[grayscale_toggle/]"), "<B1>");
        assert_eq!(expand(r#"[grayscale_toggle label="x"]"#), "<B1>");
    }

    #[test]
    fn test_multiple_occurrences_get_distinct_ordinals() {
        assert_eq!(
            expand("[grayscale_toggle]\n[grayscale_toggle]\n[grayscale_toggle]"),
            "<B1>\n<B2>\n<B3>"
        );
    }

    #[test]
    fn test_escaped_shortcode_is_literal() {
        assert_eq!(
            expand("[[grayscale_toggle]] then [grayscale_toggle]"),
            "[grayscale_toggle] then <B1>"
        );
        assert_eq!(expand("[[grayscale_toggle]]"), "[grayscale_toggle]");
    }

    #[test]
    fn test_other_shortcodes_untouched() {
        let content = "[grayscale_toggles] [gallery] [grayscale]";
        assert_eq!(expand(content), content);
    }

    #[test]
    fn test_empty_replacement() {
        let out =
            expand_toggles::<_, Infallible>("x[grayscale_toggle]y", |_| Ok(String::new())).unwrap();
        assert_eq!(out, "xy");
    }

    #[test]
    fn test_render_error_propagates() {
        let result = expand_toggles("[grayscale_toggle]", |_| Err("boom"));
        assert_eq!(result, Err("boom"));
    }
}

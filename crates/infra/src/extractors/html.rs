//! Tolerant HTML field scanning
//!
//! The scraped profile pages carry no stable API, so extraction looks for
//! known class names and reads the element's immediate text. Prefer local,
//! case-insensitive scanning over full-document structure assumptions;
//! selector drift degrades to missing fields rather than parse failures.

use regex::Regex;

/// Immediate text of every element whose `class` attribute contains `class_name`
/// as a whole word, in document order.
pub(crate) fn texts_by_class(html: &str, class_name: &str) -> Vec<String> {
    let pattern = format!(
        r#"(?is)<[^>]*class\s*=\s*"[^"]*\b{}\b[^"]*"[^>]*>([^<]*)"#,
        regex::escape(class_name)
    );
    let Ok(re) = Regex::new(&pattern) else {
        return Vec::new();
    };

    re.captures_iter(html).map(|caps| normalize_text(&caps[1])).collect()
}

/// First non-empty text for a class, if any.
pub(crate) fn first_text_by_class(html: &str, class_name: &str) -> Option<String> {
    texts_by_class(html, class_name).into_iter().find(|text| !text.is_empty())
}

/// Pair up value and label elements by document position.
///
/// Returns `(label_lowercase, value_text)` tuples; the page is expected to
/// render one label per value in the same order.
pub(crate) fn labeled_stats(
    html: &str,
    value_class: &str,
    label_class: &str,
) -> Vec<(String, String)> {
    let values = texts_by_class(html, value_class);
    let labels = texts_by_class(html, label_class);

    labels
        .into_iter()
        .zip(values)
        .map(|(label, value)| (label.to_lowercase(), value))
        .collect()
}

/// Collapse runs of whitespace and trim.
fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

//! Text normalization shared by heading indexing and link resolution.
//!
//! Both sides go through [`normalize_text`] so a table-of-contents entry such
//! as `3. 🚀 环境准备` meets its heading `## 🚀 环境准备` on equal terms.
use std::sync::OnceLock;

use itertools::Itertools;
use regex::Regex;

static TAG_RE: OnceLock<Regex> = OnceLock::new();
fn tag_re() -> &'static Regex {
    TAG_RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("static tag pattern is valid"))
}

static ENUMERATION_RE: OnceLock<Regex> = OnceLock::new();
fn enumeration_re() -> &'static Regex {
    // `3. `, `1.2. `, `3、`, `3)` and runs of them.
    ENUMERATION_RE.get_or_init(|| {
        Regex::new(r"^(?:\d+(?:\.\d+)*[.．、)）]\s*)+")
            .expect("static enumeration pattern is valid")
    })
}

/// Whether `ch` is one of the decorative glyphs headings get dressed up with.
pub fn is_decorative(ch: char) -> bool {
    matches!(
        ch,
        '\u{1F000}'..='\u{1FAFF}'
            | '\u{2600}'..='\u{27BF}'
            | '\u{2B00}'..='\u{2BFF}'
            | '\u{2190}'..='\u{21FF}'
            | '\u{2300}'..='\u{23FF}'
            | '\u{25A0}'..='\u{25FF}'
            | '\u{FE00}'..='\u{FE0F}'
            | '\u{200D}'
            | '\u{20E3}'
            | '\u{E0020}'..='\u{E007F}'
            | '¶'
            | '§'
    )
}

pub fn strip_decorative(text: &str) -> String {
    text.chars().filter(|&ch| !is_decorative(ch)).collect()
}

/// Remove anything that looks like a tag, repeating until nothing does.
pub fn strip_tags(text: &str) -> String {
    let mut current = text.to_string();
    while tag_re().is_match(&current) {
        current = tag_re().replace_all(&current, "").into_owned();
    }
    current
}

pub fn strip_enumeration(text: &str) -> &str {
    match enumeration_re().find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

/// Canonical form used as a heading index key and for link display text.
///
/// Runs glyphs, tags, whitespace collapse, enumeration, then trim. Dropping a
/// glyph between `<` and `>` could otherwise assemble a new tag after tag
/// stripping, which would break idempotence.
pub fn normalize_text(text: &str) -> String {
    let without_glyphs = strip_decorative(text);
    let without_tags = strip_tags(&without_glyphs);
    let collapsed = without_tags.split_whitespace().join(" ");
    strip_enumeration(&collapsed).trim().to_string()
}

/// Whether the heading text contains one of the table-of-contents marker words.
pub fn contains_marker(text: &str, markers: &[String]) -> bool {
    let haystack = normalize_text(text).to_lowercase();
    markers
        .iter()
        .any(|m| !m.is_empty() && haystack.contains(&m.to_lowercase()))
}

#[cfg(test)]
mod tests;

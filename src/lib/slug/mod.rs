//! Identifier derivation for heading anchors.
//!
//! The primary slugifier only keeps ASCII word characters, which turns a
//! heading such as `3. 环境准备` into `3` or nothing at all. Anything shorter
//! than the configured minimum is replaced by a fallback derivation so every
//! heading still gets a usable, deterministic anchor.
use sha2::{Digest, Sha256};

use crate::{
    config::{AnchorOptions, FallbackPolicy, HASH_HEX_LEN, SECTION_MARKER, SlugMode},
    normalize::strip_decorative,
    types::Identifier,
};

/// Lowercase `input`, keep `[a-z0-9_]`, and turn whitespace and dashes into
/// single separators.
pub fn primary_slug(input: &str, options: &AnchorOptions) -> String {
    let visible = strip_decorative(input);
    let source = match options.mode {
        SlugMode::Strip => visible,
        SlugMode::Transliterate => deunicode::deunicode(&visible),
    };

    let sep = options.separator;
    let mut out = String::with_capacity(source.len());
    let mut prev_sep = true;

    for ch in source.chars() {
        if ch.is_ascii_alphanumeric() || (ch == '_' && sep != '_') {
            out.push(ch.to_ascii_lowercase());
            prev_sep = false;
        } else if (ch.is_whitespace() || ch == '-' || ch == sep) && !prev_sep {
            out.push(sep);
            prev_sep = true;
        }
    }

    while out.ends_with(sep) {
        out.pop();
    }
    out
}

/// `u<hex>` per non-ASCII code point, ASCII alphanumerics kept, tokens joined
/// by the separator.
pub fn code_point_slug(input: &str, options: &AnchorOptions) -> String {
    let sep = options.separator;
    let mut out = String::new();

    let push_sep = |out: &mut String| {
        if !out.is_empty() && !out.ends_with(sep) {
            out.push(sep);
        }
    };

    for ch in strip_decorative(input).chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !ch.is_ascii() && !ch.is_whitespace() {
            push_sep(&mut out);
            out.push_str(&format!("u{:x}", ch as u32));
            push_sep(&mut out);
        } else if ch.is_whitespace() || ch == '-' || ch == '_' || ch == sep {
            push_sep(&mut out);
        }
    }

    while out.ends_with(sep) {
        out.pop();
    }
    out
}

/// `section-<hex>` over the text with decorative glyphs removed, or over the
/// raw text when nothing else is left.
pub fn hash_slug(input: &str, options: &AnchorOptions) -> String {
    let visible = strip_decorative(input);
    let hashed = if visible.trim().is_empty() { input } else { visible.as_str() };
    let digest = Sha256::digest(hashed.as_bytes());
    let hex = hex::encode(digest);
    format!(
        "{SECTION_MARKER}{}{}",
        options.separator,
        &hex[..HASH_HEX_LEN]
    )
}

fn fallback_slug(input: &str, options: &AnchorOptions) -> String {
    match options.fallback {
        FallbackPolicy::Hash => hash_slug(input, options),
        FallbackPolicy::CodePoint => {
            let encoded = code_point_slug(input, options);
            if encoded.is_empty() {
                hash_slug(input, options)
            } else {
                encoded
            }
        }
    }
}

/// Derive the anchor identifier for a heading (or link) text.
pub fn derive_identifier(text: &str, options: &AnchorOptions) -> Identifier {
    let primary = primary_slug(text, options);
    let mut slug = if primary.len() < options.min_len.max(1) {
        fallback_slug(text, options)
    } else {
        primary
    };

    if slug.starts_with(|c: char| c.is_ascii_digit()) {
        slug = format!("{SECTION_MARKER}{}{slug}", options.separator);
    }

    Identifier::new_unchecked(truncate(slug, options.max_len, options.separator))
}

/// Cut `slug` to at most `max_len` bytes, dropping any dangling separator.
///
/// Slugs are pure ASCII by construction so every byte index is a char boundary.
pub(crate) fn truncate(mut slug: String, max_len: usize, separator: char) -> String {
    let max_len = max_len.max(1);
    if slug.len() > max_len {
        slug.truncate(max_len);
        while slug.len() > 1 && slug.ends_with(separator) {
            slug.pop();
        }
    }
    slug
}

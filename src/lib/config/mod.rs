pub const INPUT_FILE: &str = "学习笔记.md";
pub const OUTPUT_EXTENSION: &str = "html";
pub const PAGE_LANG: &str = "zh-CN";

// Anchor identifiers.
pub const DEFAULT_MAX_ID_LEN: usize = 50;
pub const DEFAULT_MIN_ID_LEN: usize = 3;
pub const DEFAULT_SEPARATOR: char = '-';
/// Prefix for identifiers that would otherwise start with a digit, and for
/// hashed fallbacks.
pub const SECTION_MARKER: &str = "section";
/// Number of hex characters kept from the content hash.
pub const HASH_HEX_LEN: usize = 8;

// Table of contents.
pub const DEFAULT_TOC_DEPTH: u8 = 3;
pub const TOC_PLACEHOLDER: &str = "[TOC]";
pub const TOC_MARKER_WORDS: &[&str] = &["目录", "table of contents", "contents"];

/// How the primary slugifier treats characters outside ASCII.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SlugMode {
    /// Drop them.
    #[default]
    Strip,
    /// Transliterate them to ASCII first (`环境` becomes `huan-jing`).
    Transliterate,
}

/// What to use when the primary slug is empty or too short.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// `section-<8 hex chars>` over a SHA-256 of the heading text.
    #[default]
    Hash,
    /// One `u<hex>` token per non-ASCII code point.
    CodePoint,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnchorOptions {
    pub separator: char,
    pub min_len: usize,
    pub max_len: usize,
    pub mode: SlugMode,
    pub fallback: FallbackPolicy,
}

impl Default for AnchorOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            min_len: DEFAULT_MIN_ID_LEN,
            max_len: DEFAULT_MAX_ID_LEN,
            mode: SlugMode::default(),
            fallback: FallbackPolicy::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkOptions {
    /// Words that mark a heading as the start of a table of contents.
    /// ASCII is compared case-insensitively.
    pub toc_markers: Vec<String>,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            toc_markers: TOC_MARKER_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

/// Everything a single conversion run needs.
#[derive(Clone, Debug)]
pub struct ConvertOptions {
    pub anchors: AnchorOptions,
    pub links: LinkOptions,
    /// Deepest heading level listed by a generated `[TOC]`.
    pub toc_depth: u8,
    /// Append a `¶` permalink to every heading.
    pub permalink: bool,
    /// Overrides the title taken from the first `<h1>`.
    pub title: Option<String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            anchors: AnchorOptions::default(),
            links: LinkOptions::default(),
            toc_depth: DEFAULT_TOC_DEPTH,
            permalink: true,
            title: None,
        }
    }
}

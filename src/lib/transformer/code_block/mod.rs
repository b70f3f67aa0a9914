//! Fenced and indented code blocks, highlighted with syntect.
//!
//! A block renders as
//! `<div class="highlight language-rust"><pre><code>…</code></pre></div>`:
//! the language class sits on the wrapper, and the token spans inside carry
//! syntect's class names so [`highlight_css`] can colour them.
use std::sync::OnceLock;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Tag, TagEnd};
use syntect::{
    highlighting::{Theme, ThemeSet},
    html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style},
    parsing::{SyntaxReference, SyntaxSet},
    util::LinesWithEndings,
};

use crate::{
    transformer::Transformer,
    utils::{escape_attr, escape_text},
};

const THEME_NAME: &str = "base16-ocean.dark";
const WRAPPER_CLASS: &str = "highlight";

/// One code block's source and the language named in its info string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeBlock {
    pub language: Option<String>,
    pub source: String,
}

impl CodeBlock {
    pub fn new(kind: &CodeBlockKind<'_>) -> Self {
        Self {
            language: info_language(kind),
            source: String::new(),
        }
    }

    /// Highlighted markup, or escaped plain text when syntect gives up.
    pub fn render(&self) -> String {
        self.highlighted().unwrap_or_else(|| self.plain())
    }

    pub fn plain(&self) -> String {
        let mut out = self.open();
        out.push_str(&escape_text(&self.source));
        close(&mut out);
        out
    }

    fn highlighted(&self) -> Option<String> {
        let syntaxes = syntax_set();
        let syntax: &SyntaxReference = self
            .language
            .as_deref()
            .and_then(|lang| syntaxes.find_syntax_by_token(lang))
            .unwrap_or_else(|| syntaxes.find_syntax_plain_text());

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, syntaxes, ClassStyle::Spaced);
        for line in LinesWithEndings::from(&self.source) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .ok()?;
        }

        let mut out = self.open();
        out.push_str(&generator.finalize());
        close(&mut out);
        Some(out)
    }

    fn open(&self) -> String {
        let mut out = String::with_capacity(self.source.len() * 2 + 64);
        out.push_str("<div class=\"");
        out.push_str(WRAPPER_CLASS);
        if let Some(lang) = &self.language {
            out.push_str(" language-");
            out.push_str(&escape_attr(lang));
        }
        out.push_str("\"><pre><code>");
        out
    }
}

fn close(out: &mut String) {
    out.push_str("</code></pre></div>\n");
}

/// First word of a fenced block's info string, minus `{.lang}` and `.lang`
/// decoration. Indented blocks have no language.
fn info_language(kind: &CodeBlockKind<'_>) -> Option<String> {
    let CodeBlockKind::Fenced(info) = kind else {
        return None;
    };
    let word = info.split_whitespace().next()?;
    let lang = word.trim_start_matches('{').trim_start_matches('.').trim_end_matches('}');
    (!lang.is_empty()).then(|| lang.to_ascii_lowercase())
}

/// Collapses each code block into a single HTML event.
pub struct CodeHighlightTransformer<I> {
    inner: I,
    /// The block being collected, if inside one.
    current: Option<CodeBlock>,
}

impl<'a, I> Iterator for CodeHighlightTransformer<I>
where
    I: Iterator<Item = Event<'a>>,
{
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let event = self.inner.next()?;
            let Some(block) = self.current.as_mut() else {
                match event {
                    Event::Start(Tag::CodeBlock(kind)) => {
                        self.current = Some(CodeBlock::new(&kind));
                        continue;
                    }
                    other => return Some(other),
                }
            };

            match event {
                Event::End(TagEnd::CodeBlock) => {
                    let rendered = block.render();
                    self.current = None;
                    return Some(Event::Html(CowStr::from(rendered)));
                }
                Event::Text(text) | Event::Code(text) | Event::Html(text) | Event::InlineHtml(text) => {
                    block.source.push_str(&text);
                }
                Event::SoftBreak | Event::HardBreak => block.source.push('\n'),
                _ => {}
            }
        }
    }
}

impl<'a, I> Transformer<'a, I> for CodeHighlightTransformer<I>
where
    I: Iterator<Item = Event<'a>>,
{
    fn transform(inner: I) -> Self {
        Self {
            inner,
            current: None,
        }
    }
}

static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
fn syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

static THEME: OnceLock<Theme> = OnceLock::new();
fn theme() -> &'static Theme {
    THEME.get_or_init(|| {
        ThemeSet::load_defaults()
            .themes
            .remove(THEME_NAME)
            .unwrap_or_default()
    })
}

static HIGHLIGHT_CSS: OnceLock<String> = OnceLock::new();
/// Token colours for the class names syntect emits.
pub fn highlight_css() -> &'static str {
    HIGHLIGHT_CSS.get_or_init(|| {
        css_for_theme_with_class_style(theme(), ClassStyle::Spaced).unwrap_or_default()
    })
}

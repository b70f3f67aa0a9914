//! Markdown to HTML fragment rendering.
use pulldown_cmark::{Event, Options, Parser};

use crate::transformer::{
    WithTransformer,
    code_block::CodeHighlightTransformer,
    line_break::LineBreakTransformer,
    toc::{TocSettings, TocTransformer},
};

pub fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Render `source` to a body fragment. Headings come out without `id`s; the
/// anchor pass assigns them afterwards.
pub fn render_markdown(source: &str, toc: TocSettings) -> String {
    let events: Vec<Event<'_>> = Parser::new_ext(source, parser_options()).collect();

    let transformed = events
        .into_iter()
        .with_transformer::<CodeHighlightTransformer<_>>()
        .with_transformer::<LineBreakTransformer<_>>()
        .with_configured_transformer::<TocTransformer<'_>>(toc);

    let mut rendered = String::with_capacity(source.len() * 3 / 2);
    pulldown_cmark::html::push_html(&mut rendered, transformed);
    rendered
}

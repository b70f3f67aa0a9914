use color_eyre::eyre::eyre;
use lightningcss::{
    printer::PrinterOptions,
    stylesheet::{MinifyOptions, ParserOptions, StyleSheet},
};
use tracing::warn;

use crate::transformer::code_block::highlight_css;

const PAGE_STYLE: &str = include_str!("../../../assets/style.css");

pub fn minify_css(raw: &str, filename: &str) -> color_eyre::Result<String> {
    let mut stylesheet = StyleSheet::parse(
        raw,
        ParserOptions {
            filename: filename.to_string(),
            ..Default::default()
        },
    )
    .map_err(|e| eyre!(e.to_string()))?;

    stylesheet
        .minify(MinifyOptions::default())
        .map_err(|e| eyre!(e.to_string()))?;

    let res = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..Default::default()
        })
        .map_err(|e| eyre!(e.to_string()))?;

    Ok(res.code)
}

/// Page stylesheet plus the syntax highlighting theme, minified.
///
/// Falls back to the unminified text if lightningcss rejects it.
pub fn page_css() -> String {
    let raw = format!("{PAGE_STYLE}\n{}", highlight_css());
    minify_css(&raw, "style.css").unwrap_or_else(|e| {
        warn!(error = %e, "could not minify page stylesheet");
        raw
    })
}

#[cfg(test)]
mod tests;

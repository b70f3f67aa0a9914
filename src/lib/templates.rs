use crate::{config::PAGE_LANG, utils::escape_text};

const SCROLL_SCRIPT: &str = include_str!("../../assets/scroll.js");

/// Self-contained page: inline stylesheet, the body fragment inside a
/// `.container`, and the smooth-scroll script.
pub fn page_shell(title: &str, css: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="{PAGE_LANG}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{}</title>
<style>{css}</style>
</head>
<body>
<div class="container">
{body}
</div>
<script>
{SCROLL_SCRIPT}</script>
</body>
</html>
"#,
        escape_text(title)
    )
}

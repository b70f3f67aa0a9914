use super::{minify_css, page_css};

#[test]
fn minify_strips_whitespace() {
    let css = minify_css("body {\n    color: #ff0000;\n}\n", "test.css").expect("valid css");
    assert!(!css.contains('\n'));
    assert!(css.contains("body{"));
}

#[test]
fn page_css_carries_layout_and_highlight_rules() {
    let css = page_css();
    assert!(css.contains(".container"));
    assert!(css.contains(".toc"));
    assert!(css.contains(".headerlink"));
    assert!(css.contains(".highlight pre"));
}

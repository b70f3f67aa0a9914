use super::{Fragment, Node};

const SAMPLE: &str = "<h1>Notes &amp; Tips</h1>\n<h2>3. <em>环境</em>准备</h2>\n<p>See <a href=\"#x\" title=\"t\">there</a><br />next</p>\n";

fn headings(fragment: &mut Fragment) -> Vec<(u8, String)> {
    let mut out = Vec::new();
    fragment.walk_mut(&mut |el| {
        if let Some(level) = el.heading_level() {
            out.push((level, el.text_content()));
        }
    });
    out
}

#[test]
fn parse_finds_headings_in_document_order() {
    let mut fragment = Fragment::parse(SAMPLE).expect("parses");
    assert_eq!(
        headings(&mut fragment),
        vec![(1, "Notes & Tips".to_string()), (2, "3. 环境准备".to_string())]
    );
}

#[test]
fn untouched_fragment_keeps_content() {
    let fragment = Fragment::parse(SAMPLE).expect("parses");
    let html = fragment.to_html();
    assert!(html.contains("<h1>Notes &amp; Tips</h1>"));
    assert!(html.contains("<h2>3. <em>环境</em>准备</h2>"));
    assert!(html.contains("there</a><br />next"));
    assert!(html.contains("href=\"#x\""));
    assert!(html.contains("title=\"t\""));
}

#[test]
fn set_attr_adds_and_replaces() {
    let mut fragment = Fragment::parse(SAMPLE).expect("parses");
    fragment.walk_mut(&mut |el| {
        if el.heading_level() == Some(1) {
            el.set_attr("id", "notes-tips");
        }
        if el.name == "a" {
            el.set_attr("href", "#y");
        }
    });
    let html = fragment.to_html();
    assert!(html.contains("<h1 id=\"notes-tips\">"));
    assert!(html.contains("href=\"#y\""));
    assert!(!html.contains("href=\"#x\""));
    assert!(html.contains("title=\"t\""));
}

#[test]
fn blank_nodes_are_recognised() {
    assert!(Node::Text("\n  ".into()).is_blank());
    assert!(!Node::Text("x".into()).is_blank());
}

#[test]
fn single_quoted_values_are_requoted_safely() {
    let fragment =
        Fragment::parse("<p><a href=\"#x\" title='say \"hi\"'>there</a></p>").expect("parses");
    let html = fragment.to_html();
    assert!(html.contains("title=\"say &quot;hi&quot;\""), "{html}");
    assert!(!html.contains("\"hi\"\""));

    let reparsed = Fragment::parse(&html).expect("reparses");
    assert_eq!(reparsed.to_html(), html);
}

#[test]
fn attributes_keep_source_order() {
    let mut fragment =
        Fragment::parse("<h2 class=\"x\" id=\"old\" data-k=v>Title</h2>").expect("parses");
    fragment.walk_mut(&mut |el| {
        if el.heading_level().is_some() {
            el.set_attr("id", "title");
        }
    });
    assert_eq!(
        fragment.to_html(),
        "<h2 class=\"x\" id=\"title\" data-k=\"v\">Title</h2>"
    );
}

#[test]
fn attribute_names_skip_quoted_values() {
    assert_eq!(
        super::attribute_names("<a title='x > y' href=\"#a b\" hidden data-n=1>"),
        vec!["title", "href", "hidden", "data-n"]
    );
}

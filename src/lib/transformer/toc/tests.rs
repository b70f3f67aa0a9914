use proptest::{
    prelude::*,
    test_runner::{Config, TestRunner},
};
use pulldown_cmark::{CowStr, Event, HeadingLevel, Tag, TagEnd};

use crate::{
    config::AnchorOptions,
    slug::derive_identifier,
    transformer::{
        WithTransformer,
        toc::{TocSettings, TocTransformer, insert_toc},
    },
};

fn settings(depth: u8) -> TocSettings {
    let options = AnchorOptions::default();
    TocSettings {
        depth,
        slug: Box::new(move |text| derive_identifier(text, &options).into_string()),
    }
}

fn heading<'a>(level: HeadingLevel, title: &'a str) -> Vec<Event<'a>> {
    vec![
        Event::Start(Tag::Heading {
            level,
            id: None,
            classes: vec![],
            attrs: vec![],
        }),
        Event::Text(CowStr::from(title)),
        Event::End(TagEnd::Heading(level)),
    ]
}

fn placeholder<'a>() -> Vec<Event<'a>> {
    vec![
        Event::Start(Tag::Paragraph),
        Event::Text(CowStr::from("[")),
        Event::Text(CowStr::from("TOC]")),
        Event::End(TagEnd::Paragraph),
    ]
}

fn toc_html(out: &[Event<'_>]) -> String {
    out.iter()
        .find_map(|e| match e {
            Event::Html(h) if h.starts_with("<div class=\"toc\">") => Some(h.to_string()),
            _ => None,
        })
        .expect("toc present")
}

#[test]
fn placeholder_becomes_nested_list() {
    let mut events = placeholder();
    events.extend(heading(HeadingLevel::H2, "Getting Started"));
    events.extend(heading(HeadingLevel::H3, "Install Guide"));
    events.extend(heading(HeadingLevel::H3, "First Run"));
    events.extend(heading(HeadingLevel::H2, "Reference"));
    events.extend(heading(HeadingLevel::H4, "Too Deep"));

    let out: Vec<_> = events
        .into_iter()
        .with_configured_transformer::<TocTransformer<'_>>(settings(3))
        .collect();

    assert_eq!(
        toc_html(&out),
        concat!(
            "<div class=\"toc\"><ul>",
            "<li><a href=\"#getting-started\">Getting Started</a>",
            "<ul><li><a href=\"#install-guide\">Install Guide</a></li>",
            "<li><a href=\"#first-run\">First Run</a></li></ul></li>",
            "<li><a href=\"#reference\">Reference</a></li></ul></div>\n"
        )
    );
    assert!(!out.iter().any(|e| matches!(e, Event::Text(t) if t.as_ref() == "TOC]")));
}

#[test]
fn documents_without_placeholder_are_untouched() {
    let events = heading(HeadingLevel::H2, "Only Heading");
    let out = insert_toc(events.clone(), &settings(3));
    assert_eq!(out, events);
}

#[test]
fn generated_list_is_balanced() {
    let mut runner = TestRunner::new(Config {
        cases: 64,
        failure_persistence: None,
        ..Config::default()
    });
    let level = prop_oneof![
        Just(HeadingLevel::H1),
        Just(HeadingLevel::H2),
        Just(HeadingLevel::H3),
        Just(HeadingLevel::H4),
    ];

    runner
        .run(&proptest::collection::vec(level, 0..10), |levels| {
            let mut events = placeholder();
            for level in &levels {
                events.extend(heading(*level, "Some Title"));
            }
            let out = insert_toc(events, &settings(6));
            let html = toc_html(&out);

            prop_assert_eq!(html.matches("<ul>").count(), html.matches("</ul>").count());
            prop_assert_eq!(html.matches("<li>").count(), html.matches("</li>").count());
            prop_assert_eq!(html.matches("<li>").count(), levels.len());
            Ok(())
        })
        .unwrap();
}

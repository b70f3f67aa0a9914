use pulldown_cmark::{CowStr, Event, HeadingLevel, Tag, TagEnd};

use crate::{
    config::TOC_PLACEHOLDER,
    transformer::ConfiguredTransformer,
    utils::{escape_attr, escape_text},
};

/// Turns heading text into an anchor; the same derivation the anchor pass uses.
pub type SlugFn = Box<dyn Fn(&str) -> String>;

pub struct TocSettings {
    /// Deepest heading level to list (1 lists only `h1`).
    pub depth: u8,
    pub slug: SlugFn,
}

/// Replaces a `[TOC]` paragraph with a nested list of the document's headings.
pub struct TocTransformer<'a> {
    inner: std::vec::IntoIter<Event<'a>>,
}

impl<'a> Iterator for TocTransformer<'a> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<'a, I> ConfiguredTransformer<'a, I> for TocTransformer<'a>
where
    I: Iterator<Item = Event<'a>>,
{
    type Config = TocSettings;

    fn transform_with(inner: I, config: Self::Config) -> Self {
        let events: Vec<Event<'a>> = inner.collect();
        let rewritten = insert_toc(events, &config);
        Self {
            inner: rewritten.into_iter(),
        }
    }
}

#[derive(Debug)]
struct HeadingEntry {
    level: u8,
    title: String,
}

/// Replace every `[TOC]` paragraph in `events` with the generated list.
pub fn insert_toc<'a>(events: Vec<Event<'a>>, settings: &TocSettings) -> Vec<Event<'a>> {
    let placeholders = find_placeholders(&events);
    if placeholders.is_empty() {
        return events;
    }

    let headings = collect_headings(&events, settings.depth);
    let toc_html = build_toc_html(&headings, &settings.slug);

    let mut out = Vec::with_capacity(events.len());
    let mut pending = placeholders.into_iter().peekable();
    for (i, ev) in events.into_iter().enumerate() {
        match pending.peek().copied() {
            Some((start, end)) if (start..=end).contains(&i) => {
                if i == start {
                    out.push(Event::Html(CowStr::from(toc_html.clone())));
                }
                if i == end {
                    pending.next();
                }
            }
            _ => out.push(ev),
        }
    }
    out
}

/// Index ranges (inclusive) of paragraphs whose only content is `[TOC]`.
///
/// The brackets usually arrive as separate text events, so the paragraph text
/// is joined before comparing.
fn find_placeholders(events: &[Event<'_>]) -> Vec<(usize, usize)> {
    let mut found = Vec::new();
    let mut i = 0;
    while i < events.len() {
        if !matches!(events[i], Event::Start(Tag::Paragraph)) {
            i += 1;
            continue;
        }

        let mut text = String::new();
        let mut end = None;
        for (j, ev) in events.iter().enumerate().skip(i + 1) {
            match ev {
                Event::Text(t) => text.push_str(t),
                Event::End(TagEnd::Paragraph) => {
                    end = Some(j);
                    break;
                }
                _ => break,
            }
        }

        match end {
            Some(end) if text.trim() == TOC_PLACEHOLDER => {
                found.push((i, end));
                i = end + 1;
            }
            _ => i += 1,
        }
    }
    found
}

fn collect_headings(events: &[Event<'_>], depth: u8) -> Vec<HeadingEntry> {
    let mut headings = Vec::new();
    let mut current: Option<(u8, String)> = None;

    for ev in events {
        match (&mut current, ev) {
            (None, Event::Start(Tag::Heading { level, .. })) => {
                current = Some((level_number(*level), String::new()));
            }
            (Some((_, title)), Event::Text(t) | Event::Code(t)) => title.push_str(t),
            (Some((level, title)), Event::End(TagEnd::Heading(_))) => {
                if *level <= depth {
                    headings.push(HeadingEntry {
                        level: *level,
                        title: title.trim().to_string(),
                    });
                }
                current = None;
            }
            _ => {}
        }
    }
    headings
}

fn level_number(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn build_toc_html(headings: &[HeadingEntry], slug: &SlugFn) -> String {
    let mut s = String::from(r#"<div class="toc">"#);
    // Levels of the currently open lists, outermost first.
    let mut open: Vec<u8> = Vec::new();

    for entry in headings {
        match open.last().copied() {
            None => {
                s.push_str("<ul>");
                open.push(entry.level);
            }
            Some(top) if entry.level > top => {
                s.push_str("<ul>");
                open.push(entry.level);
            }
            Some(_) => {
                while open.len() > 1 && open.last().is_some_and(|&top| entry.level < top) {
                    s.push_str("</li></ul>");
                    open.pop();
                }
                s.push_str("</li>");
            }
        }

        s.push_str(r##"<li><a href="#"##);
        s.push_str(&escape_attr(&slug(&entry.title)));
        s.push_str(r#"">"#);
        s.push_str(&escape_text(&entry.title));
        s.push_str("</a>");
    }

    while open.pop().is_some() {
        s.push_str("</li></ul>");
    }
    s.push_str("</div>\n");
    s
}

#[cfg(test)]
mod tests;

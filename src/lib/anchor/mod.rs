//! Anchor assignment: give every heading in a fragment a unique `id`.
use std::collections::HashSet;

use tracing::debug;

use crate::{
    config::AnchorOptions,
    fragment::{Element, Fragment, Node},
    slug::{derive_identifier, truncate},
    types::{HeadingRecord, Identifier},
};

/// Assign identifiers to every `<h1>`–`<h6>` in document order.
///
/// An existing `id` is replaced; no other attribute or content is altered.
/// Identifiers that collide get `-2`, `-3`, … appended, cut so the result
/// still fits `max_len`.
pub fn assign_anchors(fragment: &mut Fragment, options: &AnchorOptions) -> Vec<HeadingRecord> {
    let mut used: HashSet<String> = HashSet::new();
    let mut records = Vec::new();

    fragment.walk_mut(&mut |el| {
        let Some(level) = el.heading_level() else {
            return;
        };

        let raw_text = el.text_content();
        let base = derive_identifier(&raw_text, options);
        let identifier = uniquify(base, &mut used, options);

        debug!(level, text = %raw_text, id = %identifier, "assigned heading anchor");
        el.set_attr("id", identifier.as_str());

        records.push(HeadingRecord {
            level,
            raw_text,
            identifier,
        });
    });

    records
}

fn uniquify(base: Identifier, used: &mut HashSet<String>, options: &AnchorOptions) -> Identifier {
    if used.insert(base.as_str().to_string()) {
        return base;
    }

    let sep = options.separator;
    let mut n: usize = 2;
    loop {
        let suffix = format!("{sep}{n}");
        let room = options.max_len.max(1).saturating_sub(suffix.len()).max(1);
        let stem = truncate(base.as_str().to_string(), room, sep);
        let candidate = format!("{stem}{suffix}");
        if used.insert(candidate.clone()) {
            return Identifier::new_unchecked(candidate);
        }
        n += 1;
    }
}

/// Append a `¶` permalink to every heading that carries an `id`.
pub fn insert_permalinks(fragment: &mut Fragment) {
    fragment.walk_mut(&mut |el| {
        if el.heading_level().is_none() || el.children.iter().any(is_permalink) {
            return;
        }
        let Some(id) = el.attr("id").map(str::to_owned) else {
            return;
        };

        let mut link = Element::new("a");
        link.set_attr("class", "headerlink");
        link.set_attr("href", &format!("#{id}"));
        link.set_attr("title", "Permanent link");
        link.children.push(Node::Text("¶".to_string()));
        el.children.push(Node::Element(link));
    });
}

fn is_permalink(node: &Node) -> bool {
    node.as_element()
        .is_some_and(|e| e.name == "a" && e.has_class("headerlink"))
}

//! Table-of-contents link repair.
//!
//! Hand-written tables of contents point at anchors such as `#环境准备` that no
//! slugifier will ever produce. The linker rebuilds those targets from the
//! link's display text and the identifiers the anchor pass actually assigned.
use std::collections::HashSet;

use indexmap::IndexMap;
use percent_encoding::percent_decode_str;
use tracing::debug;

use crate::{
    config::{AnchorOptions, LinkOptions},
    fragment::{Element, Fragment, Node, walk_nodes_mut},
    normalize::{contains_marker, normalize_text},
    slug::derive_identifier,
    types::{HeadingRecord, Identifier},
    utils::decode_entities,
};

/// Heading text to identifier, in the order headings were indexed.
#[derive(Debug, Default)]
pub struct HeadingIndex {
    entries: IndexMap<String, Identifier>,
    assigned: HashSet<String>,
}

/// How a link target was resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The link already pointed at an assigned identifier.
    Existing(Identifier),
    Exact(Identifier),
    Fuzzy(Identifier),
    /// Nothing matched; the identifier was derived from the display text and
    /// may not name any heading.
    Derived(Identifier),
}

impl Resolution {
    pub fn identifier(&self) -> &Identifier {
        match self {
            Resolution::Existing(id)
            | Resolution::Exact(id)
            | Resolution::Fuzzy(id)
            | Resolution::Derived(id) => id,
        }
    }
}

impl HeadingIndex {
    /// Index every heading under its normalized text and its raw text.
    /// A later heading with the same key wins.
    pub fn build(headings: &[HeadingRecord]) -> Self {
        let mut index = Self::default();
        for heading in headings {
            for key in [normalize_text(&heading.raw_text), heading.raw_text.clone()] {
                if !key.trim().is_empty() {
                    index.entries.insert(key, heading.identifier.clone());
                }
            }
            index.assigned.insert(heading.identifier.as_str().to_string());
        }
        index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Identifier> {
        self.entries.get(key)
    }

    /// First entry, in index order, whose key contains `text` or is contained by it.
    pub fn fuzzy(&self, text: &str) -> Option<&Identifier> {
        if text.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|(key, _)| text.contains(key.as_str()) || key.contains(text))
            .map(|(_, id)| id)
    }

    pub fn is_assigned(&self, id: &str) -> bool {
        self.assigned.contains(id)
    }

    /// Resolve a link from its display text.
    pub fn resolve(&self, display_text: &str, options: &AnchorOptions) -> Resolution {
        self.resolve_link(display_text, None, options)
    }

    /// Resolve a link from its display text and the target it currently has.
    ///
    /// An exact match on the text always wins. A target that already names an
    /// assigned identifier is kept ahead of fuzzy matching.
    pub fn resolve_link(
        &self,
        display_text: &str,
        current_target: Option<&str>,
        options: &AnchorOptions,
    ) -> Resolution {
        let normalized = normalize_text(display_text);

        if let Some(id) = self.get(&normalized) {
            return Resolution::Exact(id.clone());
        }
        if let Some(id) = current_target
            .filter(|t| self.is_assigned(t))
            .and_then(|t| Identifier::parse(t, options.separator))
        {
            return Resolution::Existing(id);
        }
        if let Some(id) = self.fuzzy(&normalized) {
            return Resolution::Fuzzy(id.clone());
        }
        Resolution::Derived(derive_identifier(&normalized, options))
    }
}

/// Counters for one linking run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkReport {
    /// Links rewritten inside a table-of-contents region.
    pub toc_links: usize,
    /// Links rewritten by the whole-document sweep.
    pub swept_links: usize,
    pub exact: usize,
    pub fuzzy: usize,
    pub existing: usize,
    pub unresolved: usize,
}

impl LinkReport {
    fn record(&mut self, resolution: &Resolution) {
        match resolution {
            Resolution::Existing(_) => self.existing += 1,
            Resolution::Exact(_) => self.exact += 1,
            Resolution::Fuzzy(_) => self.fuzzy += 1,
            Resolution::Derived(_) => self.unresolved += 1,
        }
    }
}

struct Linker<'o> {
    index: HeadingIndex,
    anchors: &'o AnchorOptions,
    links: &'o LinkOptions,
    report: LinkReport,
}

/// Rewrite in-page links so they resolve to assigned heading identifiers.
///
/// Links inside a table-of-contents region are handled first, then every
/// remaining `#…` link in the fragment.
pub fn link_fragment(
    fragment: &mut Fragment,
    headings: &[HeadingRecord],
    anchors: &AnchorOptions,
    links: &LinkOptions,
) -> LinkReport {
    let mut linker = Linker {
        index: HeadingIndex::build(headings),
        anchors,
        links,
        report: LinkReport::default(),
    };

    linker.strict_pass(&mut fragment.nodes);
    let swept = linker.sweep(&mut fragment.nodes);
    linker.report.swept_links = swept;
    linker.report
}

impl Linker<'_> {
    /// Rewrite links inside `<ol>` blocks introduced by a marker heading, and
    /// inside generated `<div class="toc">` blocks.
    fn strict_pass(&mut self, nodes: &mut [Node]) {
        let mut after_marker = false;

        for node in nodes.iter_mut() {
            if node.is_blank() {
                continue;
            }
            let Some(el) = node.as_element_mut() else {
                after_marker = false;
                continue;
            };

            if el.heading_level().is_some() {
                after_marker = contains_marker(&el.text_content(), &self.links.toc_markers);
                continue;
            }

            if (after_marker && el.name == "ol") || (el.name == "div" && el.has_class("toc")) {
                let rewritten = self.rewrite_links(&mut el.children);
                self.report.toc_links += rewritten;
            } else {
                self.strict_pass(&mut el.children);
            }
            after_marker = false;
        }
    }

    fn sweep(&mut self, nodes: &mut [Node]) -> usize {
        self.rewrite_links(nodes)
    }

    fn rewrite_links(&mut self, nodes: &mut [Node]) -> usize {
        let mut count = 0;
        walk_nodes_mut(nodes, &mut |el| {
            if el.name == "a" && !el.resolved && self.rewrite(el) {
                count += 1;
            }
        });
        count
    }

    /// Returns whether `el` was an in-page link.
    fn rewrite(&mut self, el: &mut Element) -> bool {
        let Some(target) = el.attr("href").and_then(|h| h.strip_prefix('#')) else {
            return false;
        };
        let target = percent_decode_str(&decode_entities(target))
            .decode_utf8_lossy()
            .into_owned();

        let display_text = el.text_content();
        let resolution = self
            .index
            .resolve_link(&display_text, Some(&target), self.anchors);

        debug!(text = %display_text, from = %target, to = %resolution.identifier(), ?resolution, "resolved link");
        self.report.record(&resolution);

        el.set_attr("href", &format!("#{}", resolution.identifier()));
        el.resolved = true;
        true
    }
}

//! A small owned tree over a rendered HTML fragment.
//!
//! The fragment is parsed once with `tl`, converted to [`Node`]s that can be
//! mutated freely, and written back out with [`Fragment::to_html`]. Text and
//! attribute values are kept as they appeared in the source, and attributes
//! keep their source order. Every value is written back double-quoted.
use std::{
    borrow::Cow,
    fmt::{self, Write as _},
};

use crate::utils::{decode_entities, escape_attr};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Raw (still escaped) character data.
    Text(String),
    Comment(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    /// Attribute values are stored escaped, as they appear in markup.
    attrs: Vec<(String, Option<String>)>,
    pub children: Vec<Node>,
    /// Set once the linker has rewritten this element's target.
    pub(crate) resolved: bool,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
            resolved: false,
        }
    }

    /// The raw value of attribute `name`.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .and_then(|(_, v)| v.as_deref())
    }

    /// Set attribute `name` to the unescaped `value`, keeping its position if present.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let escaped = escape_attr(value);
        match self
            .attrs
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            Some((_, v)) => *v = Some(escaped),
            None => self.attrs.push((name.to_string(), Some(escaped))),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    /// `Some(1..=6)` for `<h1>` through `<h6>`.
    pub fn heading_level(&self) -> Option<u8> {
        match self.name.as_str() {
            "h1" => Some(1),
            "h2" => Some(2),
            "h3" => Some(3),
            "h4" => Some(4),
            "h5" => Some(5),
            "h6" => Some(6),
            _ => None,
        }
    }

    pub fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.name.as_str())
    }

    /// Concatenated, entity-decoded text of every descendant.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        decode_entities(&out)
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attrs {
            out.push(' ');
            out.push_str(key);
            if let Some(value) = value {
                // Values may come from single-quoted source, so a bare `"` is
                // re-escaped before requoting. `write!` into a String cannot fail.
                let _ = write!(out, "=\"{}\"", value.replace('"', "&quot;"));
            }
        }
        if self.is_void() {
            out.push_str(" />");
            return;
        }
        out.push('>');
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Whitespace-only text, which carries no structure.
    pub fn is_blank(&self) -> bool {
        match self {
            Node::Text(t) => t.trim().is_empty(),
            Node::Comment(_) => true,
            Node::Element(_) => false,
        }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Element(e) => e.write_html(out),
            Node::Text(t) => out.push_str(t),
            Node::Comment(c) if c.starts_with("<!--") => out.push_str(c),
            Node::Comment(c) => {
                out.push_str("<!--");
                out.push_str(c);
                out.push_str("-->");
            }
        }
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) => collect_text(&e.children, out),
            Node::Comment(_) => {}
        }
    }
}

pub(crate) fn walk_nodes_mut(nodes: &mut [Node], f: &mut dyn FnMut(&mut Element)) {
    for node in nodes {
        if let Node::Element(e) = node {
            f(e);
            walk_nodes_mut(&mut e.children, f);
        }
    }
}

/// An owned, mutable HTML fragment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fragment {
    pub nodes: Vec<Node>,
}

impl Fragment {
    /// Parse `html`. Returns `None` only if `tl` rejects the input outright.
    pub fn parse(html: &str) -> Option<Self> {
        let Ok(dom) = tl::parse(html, tl::ParserOptions::default()) else {
            return None;
        };

        let parser = dom.parser();
        let nodes = dom
            .children()
            .iter()
            .filter_map(|handle| convert(*handle, parser))
            .collect();
        Some(Self { nodes })
    }

    /// Visit every element in document order, parents before children.
    pub fn walk_mut(&mut self, f: &mut dyn FnMut(&mut Element)) {
        walk_nodes_mut(&mut self.nodes, f);
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.write_html(&mut out);
        }
        out
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

fn convert(handle: tl::NodeHandle, parser: &tl::Parser) -> Option<Node> {
    let node = handle.get(parser)?;

    match node {
        tl::Node::Tag(tag) => {
            let mut element = Element::new(tag.name().as_utf8_str().to_lowercase());

            let order = attribute_names(&tag.raw().as_utf8_str());
            for (key, value) in tag.attributes().iter() {
                element
                    .attrs
                    .push((key.into_owned(), value.map(Cow::into_owned)));
            }
            // tl keeps attributes in a map; restore the order they were written in.
            element.attrs.sort_by_key(|(key, _)| {
                order
                    .iter()
                    .position(|name| name.eq_ignore_ascii_case(key))
                    .unwrap_or(usize::MAX)
            });

            element.children = tag
                .children()
                .top()
                .iter()
                .filter_map(|child| convert(*child, parser))
                .collect();

            Some(Node::Element(element))
        }
        tl::Node::Raw(bytes) => Some(Node::Text(bytes.as_utf8_str().to_string())),
        tl::Node::Comment(bytes) => Some(Node::Comment(bytes.as_utf8_str().to_string())),
    }
}

/// Attribute names of the opening tag at the start of `raw`, in source order.
fn attribute_names(raw: &str) -> Vec<String> {
    let bytes = raw.as_bytes();
    let name_end = |b: u8| b.is_ascii_whitespace() || matches!(b, b'>' | b'/' | b'=');

    let mut names = Vec::new();
    // Skip `<` and the tag name.
    let mut i = 1;
    while i < bytes.len() && !name_end(bytes[i]) {
        i += 1;
    }

    loop {
        while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            i += 1;
        }
        if i >= bytes.len() || bytes[i] == b'>' {
            break;
        }

        let start = i;
        while i < bytes.len() && !name_end(bytes[i]) {
            i += 1;
        }
        if i > start {
            names.push(raw[start..i].to_ascii_lowercase());
        }

        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if bytes.get(i) != Some(&b'=') {
            continue;
        }
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        match bytes.get(i) {
            Some(&quote @ (b'"' | b'\'')) => {
                i += 1;
                while i < bytes.len() && bytes[i] != quote {
                    i += 1;
                }
                i += 1;
            }
            _ => {
                while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                    i += 1;
                }
            }
        }
    }
    names
}

#[cfg(test)]
mod tests;

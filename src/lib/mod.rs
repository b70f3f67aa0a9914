//! Convert one Markdown document into a self-contained HTML page whose
//! headings carry stable anchors and whose table of contents actually
//! resolves, including for headings written in non-Latin scripts.
pub mod anchor;
pub mod config;
pub mod css;
pub mod fragment;
pub mod linker;
pub mod markdown;
pub mod normalize;
pub mod pipeline;
pub mod slug;
pub mod templates;
pub mod transformer;
pub mod types;
pub mod utils;

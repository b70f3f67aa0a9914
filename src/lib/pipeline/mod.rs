use std::{
    fs,
    path::{Path, PathBuf},
};

use color_eyre::{Section, eyre::eyre};
use tracing::{info, warn};

use crate::{
    anchor::{assign_anchors, insert_permalinks},
    config::{AnchorOptions, ConvertOptions, INPUT_FILE, OUTPUT_EXTENSION},
    css::page_css,
    fragment::Fragment,
    linker::{LinkReport, link_fragment},
    markdown::render_markdown,
    slug::derive_identifier,
    templates::page_shell,
    transformer::toc::TocSettings,
    types::HeadingRecord,
};

/// A body fragment after anchors and links have been fixed up.
#[derive(Clone, Debug, Default)]
pub struct ProcessedFragment {
    pub html: String,
    pub headings: Vec<HeadingRecord>,
    pub report: LinkReport,
}

impl ProcessedFragment {
    /// Text of the first `<h1>`.
    pub fn first_title(&self) -> Option<&str> {
        self.headings
            .iter()
            .find(|h| h.level == 1)
            .map(|h| h.raw_text.trim())
            .filter(|t| !t.is_empty())
    }
}

/// Assign heading anchors, repair in-page links, then add permalinks.
///
/// A fragment `tl` cannot parse is passed through untouched.
pub fn process_fragment(html: &str, options: &ConvertOptions) -> ProcessedFragment {
    let Some(mut fragment) = Fragment::parse(html) else {
        warn!("could not parse rendered fragment, leaving it unchanged");
        return ProcessedFragment {
            html: html.to_string(),
            ..Default::default()
        };
    };

    let headings = assign_anchors(&mut fragment, &options.anchors);
    let report = link_fragment(&mut fragment, &headings, &options.anchors, &options.links);
    if options.permalink {
        insert_permalinks(&mut fragment);
    }

    ProcessedFragment {
        html: fragment.to_html(),
        headings,
        report,
    }
}

/// Slug callback for the `[TOC]` generator, so generated links start out
/// pointing where the anchor pass will put identifiers.
pub fn toc_settings(options: &ConvertOptions) -> TocSettings {
    let anchors: AnchorOptions = options.anchors.clone();
    TocSettings {
        depth: options.toc_depth,
        slug: Box::new(move |text| derive_identifier(text, &anchors).into_string()),
    }
}

#[derive(Clone, Debug)]
pub struct ConvertedPage {
    pub title: String,
    pub html: String,
    pub headings: Vec<HeadingRecord>,
    pub report: LinkReport,
}

/// Convert a Markdown document into a complete page.
///
/// `fallback_title` is used when there is neither a title override nor an
/// `<h1>`.
pub fn convert(markdown: &str, options: &ConvertOptions, fallback_title: &str) -> ConvertedPage {
    let ctx = ConvertCtx {
        options: options.clone(),
        fallback_title: fallback_title.to_string(),
    };
    Pipeline::with_source(ctx, markdown.to_string())
        .render()
        .link()
        .assemble()
}

fn page_title(options: &ConvertOptions, processed: &ProcessedFragment, fallback: &str) -> String {
    options
        .title
        .clone()
        .or_else(|| processed.first_title().map(ToOwned::to_owned))
        .unwrap_or_else(|| fallback.to_string())
}

/// Output path next to `input`, with the page extension.
pub fn default_output(input: &Path) -> PathBuf {
    input.with_extension(OUTPUT_EXTENSION)
}

/// `input` if given, else the default input file.
pub fn default_input(input: Option<PathBuf>) -> PathBuf {
    input.unwrap_or_else(|| PathBuf::from(INPUT_FILE))
}

/// Read `input`, convert it, and write the page to `output`.
pub fn convert_file(
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
) -> color_eyre::Result<ConvertedPage> {
    let source = load(input)?;
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let page = convert(&source, options, &stem);
    emit(&page, output)?;
    Ok(page)
}

fn load(input: &Path) -> color_eyre::Result<String> {
    if !input.is_file() {
        return Err(eyre!("Input file {} not found", input.display()));
    }
    let source = fs::read_to_string(input)
        .with_note(|| format!("While reading {}", input.display()))?;
    info!(input = %input.display(), bytes = source.len(), "loaded markdown");
    Ok(source)
}

fn emit(page: &ConvertedPage, output: &Path) -> color_eyre::Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_note(|| format!("While creating {}", parent.display()))?;
    }
    fs::write(output, &page.html).with_note(|| format!("While writing {}", output.display()))?;
    info!(output = %output.display(), bytes = page.html.len(), "wrote page");
    Ok(())
}

struct ConvertCtx {
    options: ConvertOptions,
    fallback_title: String,
}

trait PipelineStage {}
/// Pipeline typestate driver
struct Pipeline<S: PipelineStage> {
    ctx: ConvertCtx,
    state: S,
}

struct Loaded(String);
impl PipelineStage for Loaded {}
struct Rendered(String);
impl PipelineStage for Rendered {}
struct Linked(ProcessedFragment);
impl PipelineStage for Linked {}

impl Pipeline<Loaded> {
    fn with_source(ctx: ConvertCtx, source: String) -> Self {
        Self {
            ctx,
            state: Loaded(source),
        }
    }

    fn render(self) -> Pipeline<Rendered> {
        let body = render_markdown(&self.state.0, toc_settings(&self.ctx.options));
        Pipeline {
            ctx: self.ctx,
            state: Rendered(body),
        }
    }
}

impl Pipeline<Rendered> {
    fn link(self) -> Pipeline<Linked> {
        let processed = process_fragment(&self.state.0, &self.ctx.options);
        info!(
            headings = processed.headings.len(),
            toc_links = processed.report.toc_links,
            swept_links = processed.report.swept_links,
            unresolved = processed.report.unresolved,
            "linked fragment"
        );
        Pipeline {
            ctx: self.ctx,
            state: Linked(processed),
        }
    }
}

impl Pipeline<Linked> {
    /// Wrap the processed body in the page shell.
    fn assemble(self) -> ConvertedPage {
        let processed = self.state.0;
        let title = page_title(&self.ctx.options, &processed, &self.ctx.fallback_title);
        let html = page_shell(&title, &page_css(), &processed.html);

        ConvertedPage {
            title,
            html,
            headings: processed.headings,
            report: processed.report,
        }
    }
}

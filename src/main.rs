use std::{env, path::PathBuf};

use color_eyre::Section;
use libmdpage::{
    config::ConvertOptions,
    pipeline::{convert_file, default_input, default_output},
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();

    let mut args = env::args_os().skip(1).map(PathBuf::from);
    let input = default_input(args.next());
    let output = args.next().unwrap_or_else(|| default_output(&input));

    let page = convert_file(&input, &output, &ConvertOptions::default())
        .with_note(|| "Usage: mdpage [INPUT] [OUTPUT]")?;

    println!(
        "Converted {} -> {} ({} headings, {} links)",
        input.display(),
        output.display(),
        page.headings.len(),
        page.report.toc_links + page.report.swept_links,
    );

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(fmt::layer())
        .init();
}

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use feeslip_extract::{
    PageSource, PipelineOutput, ReceiptPipeline, ReceiptTemplate, StaticPages, TextFiles,
};
use tracing_subscriber::EnvFilter;

/// Extract student details and the transport fee from fee receipt text
#[derive(Parser)]
#[command(name = "feeslip")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Page text files in page order. Omit, or pass `-`, to read a single page from stdin
    pages: Vec<PathBuf>,

    /// TOML file overriding the receipt template defaults
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Pretty-print the JSON result
    #[arg(long)]
    pretty: bool,

    /// Also print the normalized text to stderr
    #[arg(long)]
    normalized: bool,

    /// Enable verbose logging (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let template = match &cli.template {
        Some(path) => ReceiptTemplate::load(path)
            .with_context(|| format!("Failed to load template {}", path.display()))?,
        None => ReceiptTemplate::default(),
    };
    tracing::debug!(template = ?cli.template, artifacts = template.artifacts.len(), "template ready");

    let output = if reads_stdin(&cli.pages) {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read receipt text from stdin")?;
        run(StaticPages::new([text]), &template)?
    } else {
        run(TextFiles::new(cli.pages.clone()), &template)?
    };

    if cli.normalized {
        eprintln!("{}", output.normalized_text);
    }

    let json = if cli.pretty {
        serde_json::to_string_pretty(&output.analysis)?
    } else {
        serde_json::to_string(&output.analysis)?
    };
    println!("{json}");
    Ok(())
}

fn run<S: PageSource>(source: S, template: &ReceiptTemplate) -> anyhow::Result<PipelineOutput> {
    let output = ReceiptPipeline::new(source, template)
        .run()
        .context("Failed to analyse receipt")?;
    Ok(output)
}

fn reads_stdin(pages: &[PathBuf]) -> bool {
    match pages {
        [] => true,
        [only] => only == Path::new("-"),
        _ => false,
    }
}

/// Logs go to stderr so stdout stays a single JSON document.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stdin_when_no_pages_or_dash() {
        assert!(reads_stdin(&[]));
        assert!(reads_stdin(&[PathBuf::from("-")]));
        assert!(!reads_stdin(&[PathBuf::from("page1.txt")]));
        assert!(!reads_stdin(&[PathBuf::from("-"), PathBuf::from("page2.txt")]));
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

//! Export command: write a density workbook without touching the word list.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use mitsudo_core::config::Config;
use mitsudo_core::density;
use mitsudo_core::export;
use mitsudo_core::word_list::WordListStore;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use super::{load_segmenter, open_word_store, read_input_file};

/// Arguments for the `export` subcommand.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Text file to analyze, or `-` for standard input.
    pub file: Utf8PathBuf,

    /// Keywords to measure (comma-separated). Spaces around each keyword are
    /// trimmed and blank entries are skipped.
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub keywords: Vec<String>,

    /// Title used to name the workbook. Defaults to the keywords.
    #[arg(long)]
    pub title: Option<String>,

    /// Directory to write the workbook into.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_dir: Utf8PathBuf,
}

/// Analyze a file with the stored word list and write the workbook.
#[instrument(name = "cmd_export", skip_all, fields(file = %args.file, dir = %args.output_dir))]
pub fn cmd_export(
    args: ExportArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, keywords = args.keywords.len(), "executing export command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let options = config.analysis_options()?;
    let user_words = open_word_store(config)?
        .load()
        .context("failed to load user-defined words")?;
    let segmenter = load_segmenter()?;

    let report = density::analyze(&segmenter, &content, &args.keywords, &user_words, &options)
        .with_context(|| format!("failed to analyze {}", args.file))?;

    let today = chrono::Local::now().date_naive();
    let title = args.title.as_deref().unwrap_or_default();
    let path = export::export_to_dir(&report, &args.output_dir, title, &args.keywords, today)
        .with_context(|| format!("failed to export workbook to {}", args.output_dir))?;

    if global_json {
        let output = serde_json::json!({ "path": path });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{} {}", "Exported:".green(), path);
    }

    Ok(())
}

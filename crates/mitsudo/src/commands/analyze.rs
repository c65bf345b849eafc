//! Analyze command: keyword density of a text.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use mitsudo_core::config::Config;
use mitsudo_core::density::{self, AnalysisOptions, DensityFlag, DensityReport};
use mitsudo_core::export;
use mitsudo_core::segmenter::Segmenter;
use mitsudo_core::word_list::WordListStore;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use super::{load_segmenter, open_word_store, read_input_file};

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Text file to analyze, or `-` for standard input.
    pub file: Utf8PathBuf,

    /// Keywords to measure (comma-separated). Spaces around each keyword are
    /// trimmed and blank entries are skipped.
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub keywords: Vec<String>,

    /// Words to add to the user-defined list first (comma-separated).
    #[arg(short = 'w', long, value_delimiter = ',')]
    pub add_words: Vec<String>,

    /// Title used to name the exported workbook.
    #[arg(long)]
    pub title: Option<String>,

    /// Also write an .xlsx workbook into this directory.
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<Utf8PathBuf>,
}

#[derive(Serialize)]
struct AnalyzeOutput<'a> {
    #[serde(flatten)]
    report: &'a DensityReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    export_path: Option<&'a Utf8Path>,
}

/// Save `additions`, reload the list, and analyze `text` against it.
///
/// The reload means the analysis always sees what was persisted, including
/// words other callers added.
pub fn analyze_with_store<S, W>(
    segmenter: &S,
    store: &W,
    text: &str,
    keywords: &[String],
    additions: &[String],
    options: &AnalysisOptions,
) -> anyhow::Result<DensityReport>
where
    S: Segmenter + ?Sized,
    W: WordListStore + ?Sized,
{
    if additions.iter().any(|w| !w.trim().is_empty()) {
        store
            .save(additions)
            .context("failed to save user-defined words")?;
    }
    let user_words = store
        .load()
        .context("failed to load user-defined words")?;

    density::analyze(segmenter, text, keywords, &user_words, options)
        .context("keyword density analysis failed")
}

/// Analyze a file and print the report.
#[instrument(name = "cmd_analyze", skip_all, fields(file = %args.file))]
pub fn cmd_analyze(
    args: AnalyzeArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(
        file = %args.file,
        keywords = args.keywords.len(),
        additions = args.add_words.len(),
        "executing analyze command"
    );

    let content = read_input_file(&args.file, max_input_bytes)?;
    let options = config.analysis_options()?;
    let store = open_word_store(config)?;
    let segmenter = load_segmenter()?;

    let report = analyze_with_store(
        &segmenter,
        &store,
        &content,
        &args.keywords,
        &args.add_words,
        &options,
    )
    .with_context(|| format!("failed to analyze {}", args.file))?;

    let export_path = match args.export_dir {
        Some(ref dir) => {
            let today = chrono::Local::now().date_naive();
            let title = args.title.as_deref().unwrap_or_default();
            let path = export::export_to_dir(&report, dir, title, &args.keywords, today)
                .with_context(|| format!("failed to export workbook to {dir}"))?;
            Some(path)
        }
        None => None,
    };

    if global_json {
        let output = AnalyzeOutput {
            report: &report,
            export_path: export_path.as_deref(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", args.file.bold());
    print_report(&report);
    if let Some(path) = export_path {
        println!("\n{} {}", "Exported:".green(), path);
    }

    Ok(())
}

/// Print a report as text.
pub fn print_report(report: &DensityReport) {
    println!(
        "\n  {} {} (band {:.1}% to {:.1}%)",
        "Independent words:".cyan(),
        report.total_independent_words,
        report.band.lower,
        report.band.upper,
    );

    println!("\n  {}", "Keywords".bold().underline());
    if report.keyword_stats.is_empty() {
        println!("    {}", "(none)".dimmed());
    }
    for stat in &report.keyword_stats {
        let advice = match stat.flag {
            DensityFlag::InBand => format!("{}", "ok".green()),
            DensityFlag::Below => format!("{} 追加 {}", "BELOW".red(), stat.deficit),
            DensityFlag::Above => format!("{} 削除 {}", "ABOVE".red(), stat.excess),
        };
        println!(
            "    {}  {} ({:.2}%)  {advice}",
            stat.keyword.bold(),
            stat.count,
            stat.rate,
        );
    }

    println!("\n  {}", "Top words".bold().underline());
    if report.top_words.is_empty() {
        println!("    {}", "(none)".dimmed());
    }
    for (rank, top) in report.top_words.iter().enumerate() {
        println!(
            "    {:>2}. {}  {} ({:.2}%)",
            rank + 1,
            top.word,
            top.count,
            top.rate,
        );
    }
}

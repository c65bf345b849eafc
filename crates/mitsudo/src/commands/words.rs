//! Words command: inspect and extend the user-defined word list.

use anyhow::Context;
use clap::{Args, Subcommand};
use mitsudo_core::config::Config;
use mitsudo_core::word_list::WordListStore;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use super::open_word_store;

/// Arguments for the `words` subcommand.
#[derive(Args, Debug)]
pub struct WordsArgs {
    /// Action to perform on the list.
    #[command(subcommand)]
    pub action: WordsAction,
}

/// Word-list actions.
#[derive(Subcommand, Debug)]
pub enum WordsAction {
    /// Print every user-defined word
    List,
    /// Add words to the list (blanks and duplicates are ignored)
    Add {
        /// Words to add.
        #[arg(required = true)]
        words: Vec<String>,
    },
}

#[derive(Serialize)]
struct WordsOutput<'a> {
    path: &'a str,
    independent_words: &'a [String],
}

/// Run a word-list action.
#[instrument(name = "cmd_words", skip_all)]
pub fn cmd_words(args: WordsArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let store = open_word_store(config)?;
    debug!(path = %store.path(), action = ?args.action, "executing words command");

    let (words, added) = match args.action {
        WordsAction::List => (
            store.load().context("failed to load user-defined words")?,
            None,
        ),
        WordsAction::Add { words } => {
            let before = store
                .load()
                .context("failed to load user-defined words")?
                .len();
            let merged = store
                .save(&words)
                .with_context(|| format!("failed to save words to {}", store.path()))?;
            let added = merged.len().saturating_sub(before);
            (merged, Some(added))
        }
    };

    if global_json {
        let output = WordsOutput {
            path: store.path().as_str(),
            independent_words: &words,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if let Some(added) = added {
        println!(
            "{} {added} added, {} total ({})",
            "Saved:".green(),
            words.len(),
            store.path().dimmed()
        );
        return Ok(());
    }

    if words.is_empty() {
        println!("{}", "(no user-defined words)".dimmed());
    }
    for word in &words {
        println!("{word}");
    }
    Ok(())
}

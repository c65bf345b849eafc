//! Command implementations.

use std::io::Read;

use anyhow::Context;
use camino::Utf8Path;
use mitsudo_core::config::Config;
use mitsudo_core::segmenter::LinderaSegmenter;
use mitsudo_core::word_list::JsonFileStore;

pub mod analyze;
pub mod export;
pub mod info;
#[cfg(feature = "mcp")]
pub mod serve;
pub mod words;

/// Path that means "read standard input".
pub const STDIN_PATH: &str = "-";

/// Read a file (or stdin for `-`) and validate its size against the limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    if path.as_str() == STDIN_PATH {
        return read_stdin(max_bytes);
    }

    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

fn read_stdin(max_bytes: Option<usize>) -> anyhow::Result<String> {
    let mut bytes = Vec::new();
    match max_bytes {
        Some(max) => {
            // One byte past the limit is enough to know it was exceeded.
            let cap = u64::try_from(max).unwrap_or(u64::MAX).saturating_add(1);
            std::io::stdin()
                .lock()
                .take(cap)
                .read_to_end(&mut bytes)
                .context("failed to read standard input")?;
            if bytes.len() > max {
                anyhow::bail!("input too large: standard input exceeds {max} bytes");
            }
        }
        None => {
            std::io::stdin()
                .lock()
                .read_to_end(&mut bytes)
                .context("failed to read standard input")?;
        }
    }
    String::from_utf8(bytes).context("standard input is not valid UTF-8")
}

/// Open the word-list store the configuration points at.
pub fn open_word_store(config: &Config) -> anyhow::Result<JsonFileStore> {
    let path = config
        .word_list_path()
        .context("cannot locate the user data directory; set `word_list` in the config")?;
    Ok(JsonFileStore::new(path))
}

/// Load the morphological analyzer.
pub fn load_segmenter() -> anyhow::Result<LinderaSegmenter> {
    LinderaSegmenter::new().context("failed to load the ipadic dictionary")
}

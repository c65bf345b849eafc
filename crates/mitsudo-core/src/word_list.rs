//! Persistence of the user-defined word list.
//!
//! The list is a single JSON record:
//!
//! ```json
//! { "independent_words": ["東京タワー", "ラーメン"] }
//! ```
//!
//! Files written under the legacy `自立語` key are still read. A missing or
//! malformed file loads as an empty list. Saving merges additions into the
//! stored list and replaces the file atomically.
//!
//! Stores serialize their load-merge-save sequence behind a mutex, so
//! concurrent callers sharing one store cannot lose each other's additions.

use std::collections::HashSet;
use std::io::{BufWriter, Write};
use std::sync::Mutex;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::{WordListError, WordListResult};

/// File name used when no explicit word-list path is configured.
pub const DEFAULT_FILE_NAME: &str = "user_defined_words.json";

/// Source of user-defined words.
pub trait WordListStore {
    /// Return the current list. Absent or malformed data yields an empty list.
    fn load(&self) -> WordListResult<Vec<String>>;

    /// Merge `additions` into the stored list and return the merged list.
    ///
    /// Additions are trimmed; blanks and words already present are dropped.
    fn save(&self, additions: &[String]) -> WordListResult<Vec<String>>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct WordListRecord {
    #[serde(default, alias = "自立語")]
    independent_words: Vec<String>,
}

/// Append trimmed, non-blank, unseen `additions` to `existing`.
///
/// Existing order is kept and new words follow in the order given. Matching
/// priority during extraction follows list order, so this keeps it stable
/// across saves.
pub fn merge_words(existing: Vec<String>, additions: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(existing.len() + additions.len());
    let mut merged = Vec::with_capacity(existing.len() + additions.len());

    let candidates = existing
        .into_iter()
        .chain(additions.iter().map(|w| w.trim().to_string()));
    for word in candidates {
        if word.trim().is_empty() {
            continue;
        }
        if seen.insert(word.clone()) {
            merged.push(word);
        }
    }

    merged
}

/// Word list persisted as a JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: Utf8PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Create a store backed by `path`. The file need not exist yet.
    pub fn new<P: AsRef<Utf8Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    /// Store at `<user data dir>/user_defined_words.json`.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn in_user_data_dir() -> Option<Self> {
        crate::config::user_data_dir().map(|dir| Self::new(dir.join(DEFAULT_FILE_NAME)))
    }

    /// The backing file.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn read(&self) -> WordListResult<Vec<String>> {
        let contents = match std::fs::read_to_string(self.path.as_std_path()) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path, "word list not found; starting empty");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(WordListError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        match serde_json::from_str::<WordListRecord>(&contents) {
            Ok(record) => Ok(record.independent_words),
            Err(e) => {
                tracing::warn!(path = %self.path, error = %e, "malformed word list; treating as empty");
                Ok(Vec::new())
            }
        }
    }

    fn write(&self, words: &[String]) -> WordListResult<()> {
        let io_err = |source| WordListError::Io {
            path: self.path.clone(),
            source,
        };

        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        std::fs::create_dir_all(parent.as_std_path()).map_err(io_err)?;

        let record = WordListRecord {
            independent_words: words.to_vec(),
        };

        let temp = tempfile::NamedTempFile::new_in(parent.as_std_path()).map_err(io_err)?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            serde_json::to_writer_pretty(&mut writer, &record)?;
            writer.write_all(b"\n").map_err(io_err)?;
            writer.flush().map_err(io_err)?;
        }
        temp.persist(self.path.as_std_path()).map_err(|e| io_err(e.error))?;
        Ok(())
    }
}

impl WordListStore for JsonFileStore {
    #[tracing::instrument(skip(self), fields(path = %self.path))]
    fn load(&self) -> WordListResult<Vec<String>> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        self.read()
    }

    #[tracing::instrument(skip(self, additions), fields(path = %self.path, additions = additions.len()))]
    fn save(&self, additions: &[String]) -> WordListResult<Vec<String>> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let existing = self.read()?;
        let before = existing.len();
        let merged = merge_words(existing, additions);
        self.write(&merged)?;
        tracing::info!(
            added = merged.len().saturating_sub(before),
            total = merged.len(),
            "word list saved"
        );
        Ok(merged)
    }
}

/// In-memory word list, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    words: Mutex<Vec<String>>,
}

impl MemoryStore {
    /// Create a store seeded with `words` (merged, so blanks and duplicates drop).
    pub fn with_words(words: &[String]) -> Self {
        Self {
            words: Mutex::new(merge_words(Vec::new(), words)),
        }
    }
}

impl WordListStore for MemoryStore {
    fn load(&self) -> WordListResult<Vec<String>> {
        Ok(self.words.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save(&self, additions: &[String]) -> WordListResult<Vec<String>> {
        let mut words = self.words.lock().unwrap_or_else(|e| e.into_inner());
        let merged = merge_words(std::mem::take(&mut *words), additions);
        *words = merged.clone();
        Ok(merged)
    }
}

//! Core library for mitsudo.
//!
//! Measures how densely keywords occur in Japanese text, relative to the
//! number of independent (content) words, and flags rates outside an
//! acceptable band.
//!
//! # Modules
//!
//! - [`density`] - The analysis engine: extraction, keyword stats, ranking
//! - [`segmenter`] - Morphological tokenization behind a trait
//! - [`word_list`] - Persistence of user-defined words
//! - [`export`] - Spreadsheet export of reports
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use mitsudo_core::density::{self, AnalysisOptions};
//! use mitsudo_core::segmenter::LinderaSegmenter;
//!
//! let segmenter = LinderaSegmenter::new().expect("dictionary should load");
//! let report = density::analyze(
//!     &segmenter,
//!     "猫が猫を見た",
//!     &["猫".to_string()],
//!     &[],
//!     &AnalysisOptions::default(),
//! )
//! .expect("analysis should succeed");
//!
//! println!("{} independent words", report.total_independent_words);
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod density;
pub mod error;
pub mod export;
pub mod segmenter;
pub mod word_list;

pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use density::{AnalysisOptions, DensityBand, DensityFlag, DensityReport, analyze};
pub use error::{ConfigError, ConfigResult, DensityError, DensityResult};
pub use word_list::{JsonFileStore, MemoryStore, WordListStore};

/// Default maximum input size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

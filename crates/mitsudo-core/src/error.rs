//! Error types for mitsudo-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// The configured density band cannot be used for analysis.
    #[error("invalid density band: {0}")]
    InvalidBand(#[source] DensityError),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur during density analysis.
#[derive(Error, Debug)]
pub enum DensityError {
    /// The segmenter could not be initialized (dictionary load failure).
    #[error("segmenter initialization failed: {0}")]
    SegmenterInit(String),

    /// The segmenter failed while tokenizing input.
    #[error("segmentation failed: {0}")]
    Segmenter(String),

    /// Band bounds are not finite, negative, or inverted.
    #[error("lower bound {lower}% must not exceed upper bound {upper}% (both finite, >= 0)")]
    InvalidBand {
        /// Requested lower bound in percent.
        lower: f64,
        /// Requested upper bound in percent.
        upper: f64,
    },
}

/// Result type alias using [`DensityError`].
pub type DensityResult<T> = Result<T, DensityError>;

/// Errors that can occur while persisting the user-defined word list.
#[derive(Error, Debug)]
pub enum WordListError {
    /// Reading or replacing the word-list file failed.
    #[error("failed to access word list {path}: {source}")]
    Io {
        /// The word-list file involved.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The word list could not be serialized.
    #[error("failed to serialize word list: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias using [`WordListError`].
pub type WordListResult<T> = Result<T, WordListError>;

/// Errors that can occur while exporting a report as a workbook.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The workbook writer rejected a cell, sheet, or save.
    #[error("workbook error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// The output directory could not be prepared.
    #[error("failed to prepare {path}: {source}")]
    Io {
        /// The directory or file involved.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`ExportError`].
pub type ExportResult<T> = Result<T, ExportError>;

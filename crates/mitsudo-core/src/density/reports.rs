//! Report structs for keyword-density analysis.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for
//! use in CLI JSON output, MCP tool responses, and workbook export.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{DensityError, DensityResult};

/// Default lower bound of the acceptable keyword rate, in percent.
pub const DEFAULT_LOWER_PERCENT: f64 = 3.0;

/// Default upper bound of the acceptable keyword rate, in percent.
pub const DEFAULT_UPPER_PERCENT: f64 = 8.0;

/// Default number of entries in the top-word ranking.
pub const DEFAULT_TOP_LIMIT: usize = 10;

/// Inclusive range of acceptable keyword rates, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DensityBand {
    /// Rates strictly below this are flagged.
    pub lower: f64,
    /// Rates strictly above this are flagged.
    pub upper: f64,
}

impl Default for DensityBand {
    fn default() -> Self {
        Self {
            lower: DEFAULT_LOWER_PERCENT,
            upper: DEFAULT_UPPER_PERCENT,
        }
    }
}

impl DensityBand {
    /// Build a band, rejecting non-finite, negative, or inverted bounds.
    pub fn new(lower: f64, upper: f64) -> DensityResult<Self> {
        let valid = lower.is_finite() && upper.is_finite() && lower >= 0.0 && lower <= upper;
        if !valid {
            return Err(DensityError::InvalidBand { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Classify a rate against this band.
    pub fn classify(&self, rate: f64) -> DensityFlag {
        if rate < self.lower {
            DensityFlag::Below
        } else if rate > self.upper {
            DensityFlag::Above
        } else {
            DensityFlag::InBand
        }
    }
}

/// Where a keyword's rate falls relative to the band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DensityFlag {
    /// Within `[lower, upper]`.
    InBand,
    /// Under the lower bound; add occurrences.
    Below,
    /// Over the upper bound; remove occurrences.
    Above,
}

impl DensityFlag {
    /// True for [`Below`](Self::Below) and [`Above`](Self::Above).
    pub const fn is_out_of_band(self) -> bool {
        !matches!(self, Self::InBand)
    }
}

/// Per-keyword counts, rate, and distance to the band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeywordStat {
    /// The keyword exactly as requested.
    pub keyword: String,
    /// Substring hits in the segmented text plus exact hits among
    /// independent words.
    pub count: usize,
    /// Percentage of the independent-word total, rounded to 2 decimals.
    pub rate: f64,
    /// Band classification of `rate`.
    pub flag: DensityFlag,
    /// Additional occurrences needed to reach the lower bound.
    pub deficit: usize,
    /// Occurrences over the upper bound.
    pub excess: usize,
}

/// One row of the frequency ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TopWord {
    /// The independent word.
    pub word: String,
    /// Occurrences among independent words.
    pub count: usize,
    /// Percentage of the independent-word total, rounded to 2 decimals.
    pub rate: f64,
}

/// Result of a full density analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DensityReport {
    /// Number of independent words, duplicates included.
    pub total_independent_words: usize,
    /// Independent words in discovery order.
    pub independent_words: Vec<String>,
    /// One entry per distinct keyword, in first-request order.
    pub keyword_stats: Vec<KeywordStat>,
    /// Most frequent independent words, descending.
    pub top_words: Vec<TopWord>,
    /// Band the flags were computed against.
    pub band: DensityBand,
}

impl DensityReport {
    /// Look up the stat for a keyword.
    pub fn keyword(&self, keyword: &str) -> Option<&KeywordStat> {
        self.keyword_stats.iter().find(|s| s.keyword == keyword)
    }

    /// Number of keywords whose rate falls outside the band.
    pub fn out_of_band_count(&self) -> usize {
        self.keyword_stats
            .iter()
            .filter(|s| s.flag.is_out_of_band())
            .count()
    }
}

/// Percentage of `count` in `total`, rounded to 2 decimals; 0 when `total` is 0.
pub(crate) fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(count as f64 / total as f64 * 100.0)
}

/// Round to two decimals. Exact ties go to the even neighbour.
fn round2(v: f64) -> f64 {
    (v * 100.0).round_ties_even() / 100.0
}

//! Keyword-density analysis.
//!
//! Decomposes the analysis into three pure steps, orchestrated by
//! [`analyze`]:
//!
//! - [`extract`] - independent words from user-defined terms and tokens
//! - [`keywords`] - per-keyword counts, rates, and band flags
//! - [`ranking`] - most frequent independent words
//!
//! Callers can also invoke the steps individually.

pub mod extract;
pub mod keywords;
pub mod ranking;
pub mod reports;

pub use reports::{DensityBand, DensityFlag, DensityReport, KeywordStat, TopWord};

use crate::error::DensityResult;
use crate::segmenter::Segmenter;

/// Tunables for [`analyze`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisOptions {
    /// Acceptable keyword-rate band.
    pub band: DensityBand,
    /// Maximum number of top-word entries.
    pub top_limit: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            band: DensityBand::default(),
            top_limit: reports::DEFAULT_TOP_LIMIT,
        }
    }
}

/// Run a full keyword-density analysis.
///
/// # Arguments
///
/// * `segmenter` - Morphological tokenizer.
/// * `text` - The text to analyze.
/// * `keywords` - Keywords to measure, in display order. Trimmed; blanks are skipped.
/// * `user_defined_words` - Terms always treated as independent words.
/// * `options` - Band and ranking size.
///
/// # Errors
///
/// Returns [`DensityError::Segmenter`](crate::error::DensityError::Segmenter)
/// if tokenization fails. Empty text is not an error: every rate is 0.
#[tracing::instrument(
    skip_all,
    fields(text_len = text.len(), keywords = keywords.len(), user_words = user_defined_words.len())
)]
pub fn analyze<S: Segmenter + ?Sized>(
    segmenter: &S,
    text: &str,
    keywords: &[String],
    user_defined_words: &[String],
    options: &AnalysisOptions,
) -> DensityResult<DensityReport> {
    let extraction = extract::extract_independent_words(segmenter, text, user_defined_words)?;
    let total = extraction.independent_words.len();

    let keyword_stats = keywords::compute_keyword_stats(
        &extraction.normalized_text,
        &extraction.independent_words,
        keywords,
        total,
        &options.band,
    );
    let top_words = ranking::rank_top_words(&extraction.independent_words, total, options.top_limit);

    let report = DensityReport {
        total_independent_words: total,
        independent_words: extraction.independent_words,
        keyword_stats,
        top_words,
        band: options.band,
    };

    tracing::info!(
        total_independent_words = report.total_independent_words,
        out_of_band = report.out_of_band_count(),
        "density analysis complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmenter::scripted::{FailingSegmenter, ScriptedSegmenter};

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| (*w).to_string()).collect()
    }

    #[test]
    fn repeated_noun_scenario() {
        let seg = ScriptedSegmenter::japanese();
        let report = analyze(
            &seg,
            "猫が猫を見た",
            &words(&["猫"]),
            &[],
            &AnalysisOptions::default(),
        )
        .unwrap();

        assert_eq!(report.total_independent_words, 3);
        let cat = report.keyword("猫").unwrap();
        assert_eq!(cat.count, 4);
        assert_eq!(cat.rate, 133.33);
        assert_eq!(cat.flag, DensityFlag::Above);
        assert!(cat.excess > 0);
    }

    #[test]
    fn user_defined_word_scenario() {
        let seg = ScriptedSegmenter::japanese();
        let report = analyze(
            &seg,
            "猫が鳴く",
            &words(&["猫"]),
            &words(&["猫"]),
            &AnalysisOptions::default(),
        )
        .unwrap();

        assert_eq!(report.independent_words, words(&["猫", "鳴く"]));
        assert_eq!(report.total_independent_words, 2);
        let cat = report.keyword("猫").unwrap();
        assert_eq!(cat.count, 1);
        assert_eq!(cat.rate, 50.0);
    }

    #[test]
    fn empty_text_scenario() {
        let seg = ScriptedSegmenter::japanese();
        let report = analyze(
            &seg,
            "",
            &words(&["猫", "犬"]),
            &words(&["猫"]),
            &AnalysisOptions::default(),
        )
        .unwrap();

        assert_eq!(report.total_independent_words, 0);
        assert!(report.independent_words.is_empty());
        assert!(report.top_words.is_empty());
        assert_eq!(report.keyword_stats.len(), 2);
        for stat in &report.keyword_stats {
            assert_eq!(stat.rate, 0.0);
            assert_eq!(stat.deficit, 0);
            assert_eq!(stat.excess, 0);
            assert_eq!(stat.flag, DensityFlag::Below);
        }
        assert_eq!(report.out_of_band_count(), 2);
    }

    #[test]
    fn total_matches_independent_word_count() {
        let seg = ScriptedSegmenter::japanese();
        for text in ["", "猫", "猫が犬を見た", "東京は静かだ。美しい猫が鳴く", "がをに"] {
            let report =
                analyze(&seg, text, &[], &words(&["犬"]), &AnalysisOptions::default()).unwrap();
            assert_eq!(
                report.total_independent_words,
                report.independent_words.len(),
                "text {text:?}"
            );
        }
    }

    #[test]
    fn top_words_respect_limit_option() {
        let seg = ScriptedSegmenter::japanese();
        let options = AnalysisOptions {
            top_limit: 1,
            ..AnalysisOptions::default()
        };
        let report = analyze(&seg, "猫が犬を見た猫", &[], &[], &options).unwrap();
        assert_eq!(report.top_words.len(), 1);
        assert_eq!(report.top_words[0].word, "猫");
        assert_eq!(report.top_words[0].count, 2);
    }

    #[test]
    fn report_serializes_to_json() {
        let seg = ScriptedSegmenter::japanese();
        let report = analyze(
            &seg,
            "猫が鳴く",
            &words(&["猫"]),
            &[],
            &AnalysisOptions::default(),
        )
        .unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["total_independent_words"], 2);
        assert_eq!(json["keyword_stats"][0]["keyword"], "猫");
        assert_eq!(json["keyword_stats"][0]["flag"], "above");
        assert_eq!(json["band"]["lower"], 3.0);
    }

    #[test]
    fn segmenter_errors_propagate() {
        let result = analyze(
            &FailingSegmenter,
            "猫",
            &words(&["猫"]),
            &[],
            &AnalysisOptions::default(),
        );
        assert!(result.is_err());
    }

    #[cfg(feature = "ipadic")]
    #[test]
    fn repeated_noun_scenario_with_ipadic() {
        let seg = crate::segmenter::LinderaSegmenter::new().unwrap();
        let report = analyze(
            &seg,
            "猫が猫を見た",
            &words(&["猫"]),
            &[],
            &AnalysisOptions::default(),
        )
        .unwrap();

        assert!(report.total_independent_words >= 3);
        let cat = report.keyword("猫").unwrap();
        assert_eq!(cat.count, 4);
        assert_eq!(cat.flag, DensityFlag::Above);
    }
}

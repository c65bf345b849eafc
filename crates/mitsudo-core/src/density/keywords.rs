//! Keyword occurrence counting and band checks.
//!
//! A keyword's count is the sum of two independent tallies:
//!
//! 1. non-overlapping substring hits in the segmented text, and
//! 2. exact matches among the independent words.
//!
//! The tallies are not deduplicated. A keyword that is itself a content word
//! is therefore weighted double, which is the intended scoring.
//! User-defined matches were removed from the text before segmentation, so
//! they contribute only through the second tally.

use super::reports::{DensityBand, KeywordStat, percentage};

/// Compute per-keyword statistics.
///
/// Keywords are processed in request order. A repeated keyword keeps the
/// position of its first request and the values of its last. Surrounding
/// whitespace is trimmed before matching, and blank keywords are skipped.
#[tracing::instrument(skip_all, fields(keywords = keywords.len(), total))]
pub fn compute_keyword_stats(
    normalized_text: &str,
    independent_words: &[String],
    keywords: &[String],
    total: usize,
    band: &DensityBand,
) -> Vec<KeywordStat> {
    let mut stats: Vec<KeywordStat> = Vec::with_capacity(keywords.len());

    for keyword in keywords {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            tracing::debug!("skipping blank keyword");
            continue;
        }

        let stat = keyword_stat(normalized_text, independent_words, keyword, total, band);
        match stats.iter_mut().find(|s| s.keyword == keyword) {
            Some(existing) => *existing = stat,
            None => stats.push(stat),
        }
    }

    stats
}

fn keyword_stat(
    normalized_text: &str,
    independent_words: &[String],
    keyword: &str,
    total: usize,
    band: &DensityBand,
) -> KeywordStat {
    let substring_hits = normalized_text.matches(keyword).count();
    let word_hits = independent_words.iter().filter(|w| *w == keyword).count();
    let count = substring_hits + word_hits;
    let rate = percentage(count, total);

    KeywordStat {
        keyword: keyword.to_string(),
        count,
        rate,
        flag: band.classify(rate),
        deficit: deficit(count, total, band.lower),
        excess: excess(count, total, band.upper),
    }
}

/// Occurrences still needed to reach `lower` percent, truncated toward zero.
fn deficit(count: usize, total: usize, lower: f64) -> usize {
    truncate_non_negative(lower * total as f64 / 100.0 - count as f64)
}

/// Occurrences above `upper` percent, truncated toward zero.
fn excess(count: usize, total: usize, upper: f64) -> usize {
    truncate_non_negative(count as f64 - upper * total as f64 / 100.0)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn truncate_non_negative(v: f64) -> usize {
    v.trunc().max(0.0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::density::reports::DensityFlag;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| (*w).to_string()).collect()
    }

    #[test]
    fn content_keywords_count_twice() {
        let independent = words(&["猫", "猫", "見"]);
        let stats = compute_keyword_stats(
            "猫が猫を見た",
            &independent,
            &words(&["猫"]),
            3,
            &DensityBand::default(),
        );
        let cat = &stats[0];
        assert_eq!(cat.count, 4);
        assert_eq!(cat.rate, 133.33);
        assert_eq!(cat.flag, DensityFlag::Above);
        assert_eq!(cat.deficit, 0);
        // 4 - 8% of 3 = 3.76 -> 3
        assert_eq!(cat.excess, 3);
    }

    #[test]
    fn substring_hits_are_non_overlapping() {
        let stats = compute_keyword_stats(
            "ああああ",
            &[],
            &words(&["ああ"]),
            100,
            &DensityBand::default(),
        );
        assert_eq!(stats[0].count, 2);
    }

    #[test]
    fn particles_match_as_substrings_only() {
        let stats = compute_keyword_stats(
            "猫が猫を見た",
            &words(&["猫", "猫", "見"]),
            &words(&["が"]),
            3,
            &DensityBand::default(),
        );
        assert_eq!(stats[0].count, 1);
    }

    #[test]
    fn absent_keyword_is_below_band() {
        let stats = compute_keyword_stats(
            "猫が鳴く",
            &words(&["猫", "鳴く"]),
            &words(&["犬"]),
            2,
            &DensityBand::default(),
        );
        let dog = &stats[0];
        assert_eq!(dog.count, 0);
        assert_eq!(dog.rate, 0.0);
        assert_eq!(dog.flag, DensityFlag::Below);
    }

    #[test]
    fn deficit_is_truncated() {
        // 3% of 250 = 7.5; 7.5 - 2 = 5.5 -> 5
        let independent: Vec<String> = (0..250).map(|i| format!("w{i}")).collect();
        let stats = compute_keyword_stats(
            "kk",
            &independent,
            &words(&["k"]),
            250,
            &DensityBand::default(),
        );
        assert_eq!(stats[0].count, 2);
        assert_eq!(stats[0].rate, 0.8);
        assert_eq!(stats[0].deficit, 5);
        assert_eq!(stats[0].excess, 0);
    }

    #[test]
    fn in_band_keyword_has_no_deficit_or_excess() {
        // 5 of 100 = 5%
        let stats = compute_keyword_stats(
            "kkkkk",
            &[],
            &words(&["k"]),
            100,
            &DensityBand::default(),
        );
        assert_eq!(stats[0].rate, 5.0);
        assert_eq!(stats[0].flag, DensityFlag::InBand);
        assert_eq!(stats[0].deficit, 0);
        assert_eq!(stats[0].excess, 0);
    }

    #[test]
    fn zero_total_gives_zero_everything() {
        let stats = compute_keyword_stats(
            "",
            &[],
            &words(&["猫", "犬"]),
            0,
            &DensityBand::default(),
        );
        assert_eq!(stats.len(), 2);
        for stat in &stats {
            assert_eq!(stat.rate, 0.0);
            assert_eq!(stat.deficit, 0);
            assert_eq!(stat.excess, 0);
            assert_eq!(stat.flag, DensityFlag::Below);
        }
    }

    #[test]
    fn duplicate_keywords_collapse_to_first_position() {
        let stats = compute_keyword_stats(
            "猫犬",
            &words(&["猫", "犬"]),
            &words(&["猫", "犬", "猫"]),
            2,
            &DensityBand::default(),
        );
        let order: Vec<&str> = stats.iter().map(|s| s.keyword.as_str()).collect();
        assert_eq!(order, vec!["猫", "犬"]);
    }

    #[test]
    fn blank_keywords_are_skipped() {
        let stats = compute_keyword_stats(
            "猫",
            &words(&["猫"]),
            &words(&["", " ", "猫"]),
            1,
            &DensityBand::default(),
        );
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].keyword, "猫");
    }

    #[test]
    fn keywords_are_trimmed_before_matching() {
        let stats = compute_keyword_stats(
            "猫と犬",
            &words(&["猫", "犬"]),
            &words(&["猫", " 犬 ", "猫\t"]),
            2,
            &DensityBand::default(),
        );
        let order: Vec<&str> = stats.iter().map(|s| s.keyword.as_str()).collect();
        assert_eq!(order, vec!["猫", "犬"]);
        assert_eq!(stats[1].count, 2);
    }

    #[test]
    fn rate_never_decreases_as_count_grows() {
        let band = DensityBand::default();
        let mut previous = -1.0;
        for n in 0..40 {
            let text = "k".repeat(n);
            let stats = compute_keyword_stats(&text, &[], &words(&["k"]), 37, &band);
            assert!(stats[0].rate >= previous);
            previous = stats[0].rate;
        }
    }

    #[test]
    fn custom_band_moves_thresholds() {
        let band = DensityBand::new(1.0, 2.0).unwrap();
        // 3 of 100 = 3%, above a 2% ceiling; 3 - 2 = 1 excess
        let stats = compute_keyword_stats("kkk", &[], &words(&["k"]), 100, &band);
        assert_eq!(stats[0].flag, DensityFlag::Above);
        assert_eq!(stats[0].excess, 1);
    }
}

//! Frequency ranking of independent words.

use std::collections::HashMap;

use super::reports::{TopWord, percentage};

/// Rank the `limit` most frequent independent words.
///
/// Sorted by descending count; ties keep first-occurrence order. Rates are
/// percentages of `total` and fall back to 0 when `total` is 0.
#[tracing::instrument(skip(independent_words), fields(words = independent_words.len()))]
pub fn rank_top_words(independent_words: &[String], total: usize, limit: usize) -> Vec<TopWord> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for word in independent_words {
        match index.get(word.as_str()) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(word.as_str(), counts.len());
                counts.push((word.as_str(), 1));
            }
        }
    }

    // Stable sort keeps discovery order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .take(limit)
        .map(|(word, count)| TopWord {
            word: word.to_string(),
            count,
            rate: percentage(count, total),
        })
        .collect()
}

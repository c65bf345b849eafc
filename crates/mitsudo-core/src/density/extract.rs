//! Independent-word extraction.
//!
//! User-defined words are consumed from the text first, in list order, so a
//! term the dictionary would split (or misclassify) still counts as one
//! independent word. Whatever text remains goes through the segmenter, and
//! tokens whose coarse part of speech is independent are appended.

use crate::error::DensityResult;
use crate::segmenter::Segmenter;

/// Output of [`extract_independent_words`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Input text after every user-defined word was consumed.
    pub remaining_text: String,
    /// Token surfaces of `remaining_text`, concatenated in order.
    pub normalized_text: String,
    /// User-defined matches first, then independent token surfaces.
    pub independent_words: Vec<String>,
    /// How many entries of `independent_words` came from user-defined words.
    pub user_matches: usize,
}

/// Consume every occurrence of each user-defined word from `text`.
///
/// Words are processed in list order and each is exhausted before the next
/// is tried, so overlapping terms resolve by list priority. The first
/// remaining occurrence is removed repeatedly until none is left, which also
/// consumes occurrences formed by joining the text around an earlier removal.
/// Blank words are skipped.
///
/// Returns the residual text and the matched words, one entry per occurrence.
pub fn consume_user_words(text: &str, user_defined_words: &[String]) -> (String, Vec<String>) {
    let mut remaining = text.to_owned();
    let mut matched = Vec::new();

    for word in user_defined_words {
        if word.trim().is_empty() {
            tracing::debug!("skipping blank user-defined word");
            continue;
        }

        let (rest, hits) = consume_all(&remaining, word);
        if hits > 0 {
            tracing::trace!(word = %word, hits, "user-defined word consumed");
        }
        matched.extend(std::iter::repeat_n(word.clone(), hits));
        remaining = rest;
    }

    (remaining, matched)
}

/// Remove the first occurrence of `word` from `text` until none is left.
///
/// After a removal at `start`, any new occurrence must begin within
/// `word.len() - 1` bytes before it, so the search resumes there.
/// `word` must be non-empty; every removal shortens the text, so the loop ends.
fn consume_all(text: &str, word: &str) -> (String, usize) {
    let mut current = text.to_owned();
    let mut consumed = 0;
    let mut from = 0;

    while let Some(offset) = current[from..].find(word) {
        let start = from + offset;
        current.replace_range(start..start + word.len(), "");
        consumed += 1;

        from = start.saturating_sub(word.len() - 1);
        while !current.is_char_boundary(from) {
            from -= 1;
        }
    }

    (current, consumed)
}

/// Split `text` into independent words.
///
/// # Arguments
///
/// * `segmenter` - Tokenizer for the text left after user-word consumption.
/// * `text` - The text to analyze.
/// * `user_defined_words` - Terms treated as independent regardless of how
///   the segmenter would classify them. Order sets matching priority.
///
/// # Errors
///
/// Propagates segmenter failures unchanged.
#[tracing::instrument(skip_all, fields(text_len = text.len(), user_words = user_defined_words.len()))]
pub fn extract_independent_words<S: Segmenter + ?Sized>(
    segmenter: &S,
    text: &str,
    user_defined_words: &[String],
) -> DensityResult<Extraction> {
    let (remaining_text, mut independent_words) = consume_user_words(text, user_defined_words);
    let user_matches = independent_words.len();

    let tokens = segmenter.tokenize(&remaining_text)?;
    let mut normalized_text = String::with_capacity(remaining_text.len());

    for token in tokens {
        normalized_text.push_str(&token.surface);
        if token.coarse_pos().is_independent() {
            independent_words.push(token.surface);
        }
    }

    tracing::debug!(
        user_matches,
        independent = independent_words.len(),
        "independent words extracted"
    );

    Ok(Extraction {
        remaining_text,
        normalized_text,
        independent_words,
        user_matches,
    })
}

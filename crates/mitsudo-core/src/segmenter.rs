//! Morphological segmentation of Japanese text.
//!
//! The analysis engine only needs a surface form and a coarse part of speech
//! per token, so segmentation sits behind the [`Segmenter`] trait. The
//! production implementation, [`LinderaSegmenter`], uses lindera with the
//! embedded IPADIC dictionary (feature `ipadic`, on by default).
//!
//! Part-of-speech tags arrive as comma-delimited hierarchies
//! (`名詞,一般,*,*,*,*,猫,ネコ,ネコ`). Only the first field matters here; it is
//! mapped onto [`PartOfSpeech`] so the engine never depends on a
//! dictionary's full taxonomy.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::DensityResult;

/// Coarse part-of-speech category derived from the first tag field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum PartOfSpeech {
    /// 名詞
    Noun,
    /// 動詞
    Verb,
    /// 形容詞
    Adjective,
    /// 形容動詞
    AdjectivalNoun,
    /// Particles, auxiliaries, symbols, and everything else.
    Other,
}

impl PartOfSpeech {
    /// Map a (possibly hierarchical) tag string to its coarse category.
    pub fn from_tag(tag: &str) -> Self {
        match tag.split(',').next().unwrap_or_default().trim() {
            "名詞" => Self::Noun,
            "動詞" => Self::Verb,
            "形容詞" => Self::Adjective,
            "形容動詞" => Self::AdjectivalNoun,
            _ => Self::Other,
        }
    }

    /// Whether tokens of this category count as independent (content) words.
    pub const fn is_independent(self) -> bool {
        !matches!(self, Self::Other)
    }

    /// Returns the category as a kebab-case string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Noun => "noun",
            Self::Verb => "verb",
            Self::Adjective => "adjective",
            Self::AdjectivalNoun => "adjectival-noun",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single morphological token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The text span exactly as it appears in the input.
    pub surface: String,
    /// The segmenter's full part-of-speech tag.
    pub part_of_speech: String,
}

impl Token {
    /// Create a token from a surface form and tag.
    pub fn new(surface: impl Into<String>, part_of_speech: impl Into<String>) -> Self {
        Self {
            surface: surface.into(),
            part_of_speech: part_of_speech.into(),
        }
    }

    /// The coarse category of this token's tag.
    pub fn coarse_pos(&self) -> PartOfSpeech {
        PartOfSpeech::from_tag(&self.part_of_speech)
    }
}

/// Splits text into morphological tokens.
///
/// Implementations must return tokens whose surfaces, concatenated in
/// order, cover the input they were given.
pub trait Segmenter {
    /// Tokenize `text` into surface/part-of-speech pairs.
    fn tokenize(&self, text: &str) -> DensityResult<Vec<Token>>;
}

impl<S: Segmenter + ?Sized> Segmenter for &S {
    fn tokenize(&self, text: &str) -> DensityResult<Vec<Token>> {
        (**self).tokenize(text)
    }
}

impl<S: Segmenter + ?Sized> Segmenter for std::sync::Arc<S> {
    fn tokenize(&self, text: &str) -> DensityResult<Vec<Token>> {
        (**self).tokenize(text)
    }
}

#[cfg(feature = "ipadic")]
pub use self::lindera_backend::LinderaSegmenter;

#[cfg(feature = "ipadic")]
mod lindera_backend {
    use lindera::dictionary::{DictionaryKind, load_embedded_dictionary};
    use lindera::mode::Mode;
    use lindera::segmenter::Segmenter as DictionarySegmenter;
    use lindera::tokenizer::Tokenizer;

    use super::{Segmenter, Token};
    use crate::error::{DensityError, DensityResult};

    /// Segmenter backed by lindera and the embedded IPADIC dictionary.
    ///
    /// Loading the dictionary is the expensive part; build one instance and
    /// share it across analyses.
    pub struct LinderaSegmenter {
        tokenizer: Tokenizer,
    }

    impl std::fmt::Debug for LinderaSegmenter {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("LinderaSegmenter")
                .field("dictionary", &"ipadic")
                .finish()
        }
    }

    impl LinderaSegmenter {
        /// Load the embedded IPADIC dictionary in normal mode.
        #[tracing::instrument]
        pub fn new() -> DensityResult<Self> {
            let dictionary = load_embedded_dictionary(DictionaryKind::IPADIC)
                .map_err(|e| DensityError::SegmenterInit(e.to_string()))?;
            let segmenter = DictionarySegmenter::new(Mode::Normal, dictionary, None);
            tracing::debug!("ipadic dictionary loaded");
            Ok(Self {
                tokenizer: Tokenizer::new(segmenter),
            })
        }
    }

    impl Segmenter for LinderaSegmenter {
        #[tracing::instrument(skip_all, fields(text_len = text.len()))]
        fn tokenize(&self, text: &str) -> DensityResult<Vec<Token>> {
            if text.is_empty() {
                return Ok(Vec::new());
            }

            let mut raw = self
                .tokenizer
                .tokenize(text)
                .map_err(|e| DensityError::Segmenter(e.to_string()))?;

            let tokens = raw
                .iter_mut()
                .map(|token| {
                    let surface = token.surface.to_string();
                    let part_of_speech = token.details().join(",");
                    Token {
                        surface,
                        part_of_speech,
                    }
                })
                .collect::<Vec<_>>();

            tracing::debug!(token_count = tokens.len(), "text segmented");
            Ok(tokens)
        }
    }
}

#[cfg(test)]
pub(crate) mod scripted {
    //! Deterministic segmenters for exercising the engine without a dictionary.

    use super::{Segmenter, Token};
    use crate::error::{DensityError, DensityResult};

    /// Greedy longest-match segmenter over a fixed lexicon.
    ///
    /// Characters not covered by the lexicon become single-character
    /// `記号` tokens, so surfaces always cover the input.
    pub struct ScriptedSegmenter {
        lexicon: Vec<(String, String)>,
    }

    impl ScriptedSegmenter {
        pub fn new(entries: &[(&str, &str)]) -> Self {
            let mut lexicon: Vec<(String, String)> = entries
                .iter()
                .map(|(surface, tag)| ((*surface).to_string(), (*tag).to_string()))
                .collect();
            lexicon.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
            Self { lexicon }
        }

        /// A small IPADIC-shaped lexicon.
        pub fn japanese() -> Self {
            Self::new(&[
                ("猫", "名詞,一般"),
                ("犬", "名詞,一般"),
                ("東京", "名詞,固有名詞,地域"),
                ("見", "動詞,自立"),
                ("鳴く", "動詞,自立"),
                ("行き", "動詞,自立"),
                ("美しい", "形容詞,自立"),
                ("静か", "形容動詞"),
                ("が", "助詞,格助詞"),
                ("を", "助詞,格助詞"),
                ("は", "助詞,係助詞"),
                ("に", "助詞,格助詞"),
                ("た", "助動詞"),
                ("ます", "助動詞"),
                ("だ", "助動詞"),
            ])
        }
    }

    impl Segmenter for ScriptedSegmenter {
        fn tokenize(&self, text: &str) -> DensityResult<Vec<Token>> {
            let mut tokens = Vec::new();
            let mut rest = text;
            while let Some(ch) = rest.chars().next() {
                let hit = self
                    .lexicon
                    .iter()
                    .find(|(surface, _)| rest.starts_with(surface.as_str()));
                let (surface, tag) = match hit {
                    Some((surface, tag)) => (surface.clone(), tag.clone()),
                    None => (ch.to_string(), "記号,一般".to_string()),
                };
                rest = &rest[surface.len()..];
                tokens.push(Token::new(surface, tag));
            }
            Ok(tokens)
        }
    }

    /// Always fails, for error-propagation tests.
    pub struct FailingSegmenter;

    impl Segmenter for FailingSegmenter {
        fn tokenize(&self, _text: &str) -> DensityResult<Vec<Token>> {
            Err(DensityError::Segmenter("dictionary unavailable".to_string()))
        }
    }
}

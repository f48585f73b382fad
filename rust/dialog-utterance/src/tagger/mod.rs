//! Part-of-speech tagging.
//!
//! Two independent taggers label every token: the primary sequence drives
//! grammar extension, the alternative one cross-checks it and resolves the
//! `'s` clitic during normalization. Disagreements are logged but left
//! alone. A couple of fixed overrides patch errors the primary tagger is
//! known to make on conversational input.
//!
//! Any backend can be plugged in through [`PosTagger`]. The crate ships a
//! lexicon-driven [`LexiconTagger`] and a context-sensitive
//! [`HeuristicTagger`].

mod heuristic;
mod lexicon;

use std::sync::Arc;

use tracing::debug;

pub use heuristic::HeuristicTagger;
pub use lexicon::LexiconTagger;

use crate::error::TaggerError;

/// A part-of-speech tagger producing one Penn Treebank tag per token.
pub trait PosTagger: Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &str;

    fn tag(&self, tokens: &[String]) -> Result<Vec<String>, TaggerError>;
}

/// Tags from both taggers, aligned with the input tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPair {
    pub primary: Vec<String>,
    pub alternative: Vec<String>,
}

#[derive(Clone)]
pub struct TaggerAdapter {
    primary: Arc<dyn PosTagger>,
    alternative: Arc<dyn PosTagger>,
}

impl std::fmt::Debug for TaggerAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaggerAdapter")
            .field("primary", &self.primary.name())
            .field("alternative", &self.alternative.name())
            .finish()
    }
}

impl TaggerAdapter {
    pub fn new(primary: Arc<dyn PosTagger>, alternative: Arc<dyn PosTagger>) -> Self {
        TaggerAdapter { primary, alternative }
    }

    pub fn primary(&self) -> &dyn PosTagger {
        self.primary.as_ref()
    }

    pub fn alternative(&self) -> &dyn PosTagger {
        self.alternative.as_ref()
    }

    /// Tag `tokens` with both taggers and apply the primary overrides.
    pub fn tag(&self, tokens: &[String]) -> Result<TagPair, TaggerError> {
        let mut primary = aligned(self.primary(), tokens)?;
        let alternative = aligned(self.alternative(), tokens)?;

        if primary != alternative {
            debug!(?tokens, ?primary, ?alternative, "taggers disagree");
        }

        apply_overrides(tokens, &mut primary);
        Ok(TagPair { primary, alternative })
    }
}

fn aligned(tagger: &dyn PosTagger, tokens: &[String]) -> Result<Vec<String>, TaggerError> {
    let tags = tagger.tag(tokens)?;
    if tags.len() != tokens.len() {
        return Err(TaggerError::Misaligned {
            tagger: tagger.name().to_string(),
            tokens: tokens.len(),
            tags: tags.len(),
        });
    }
    Ok(tags)
}

/// Known mistakes of taggers trained on written text: `like` read as a
/// preposition, and sentence-initial `Does` read as a noun.
fn apply_overrides(tokens: &[String], tags: &mut [String]) {
    for (token, tag) in tokens.iter().zip(tags.iter_mut()) {
        if token == "like" {
            *tag = "VB".to_string();
        }
    }
    if tokens.first().is_some_and(|token| token == "Does") {
        if let Some(first) = tags.first_mut() {
            *first = "VBD".to_string();
        }
    }
}

/// Guess a tag from the shape of an unknown word.
pub(crate) fn guess_tag(word: &str) -> &'static str {
    let lower = word.to_lowercase();
    let long = |min: usize| lower.chars().count() > min;

    if word.is_empty() || !word.chars().any(char::is_alphanumeric) {
        "."
    } else if word.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
        "CD"
    } else if word.chars().next().is_some_and(char::is_uppercase) {
        "NNP"
    } else if lower.ends_with("ing") && long(4) {
        "VBG"
    } else if lower.ends_with("ed") && long(3) {
        "VBD"
    } else if lower.ends_with("ly") && long(3) {
        "RB"
    } else if ["ous", "ful", "ive", "able", "ible", "less", "ic", "al"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
        && long(3)
    {
        "JJ"
    } else if lower.ends_with('s') && !["ss", "us", "is"].iter().any(|suffix| lower.ends_with(suffix)) && long(2)
    {
        "NNS"
    } else {
        "NN"
    }
}

/// Strip the punctuation speech transcripts attach to the last word.
pub(crate) fn lookup_form(token: &str) -> &str {
    let trimmed = token.trim_end_matches(['?', '!', '.', ',']);
    if trimmed.is_empty() { token } else { trimmed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Constant(&'static str);

    impl PosTagger for Constant {
        fn name(&self) -> &str {
            "constant"
        }

        fn tag(&self, tokens: &[String]) -> Result<Vec<String>, TaggerError> {
            Ok(vec![self.0.to_string(); tokens.len()])
        }
    }

    struct Short;

    impl PosTagger for Short {
        fn name(&self) -> &str {
            "short"
        }

        fn tag(&self, _tokens: &[String]) -> Result<Vec<String>, TaggerError> {
            Ok(vec!["NN".to_string()])
        }
    }

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|word| word.to_string()).collect()
    }

    fn adapter(primary: impl PosTagger + 'static, alternative: impl PosTagger + 'static) -> TaggerAdapter {
        TaggerAdapter::new(Arc::new(primary), Arc::new(alternative))
    }

    #[test]
    fn overrides_touch_only_the_primary_sequence() {
        let adapter = adapter(Constant("NN"), Constant("NN"));
        let pair = adapter.tag(&tokens(&["Does", "she", "like", "it"])).unwrap();
        assert_eq!(pair.primary, vec!["VBD", "NN", "VB", "NN"]);
        assert_eq!(pair.alternative, vec!["NN"; 4]);
    }

    #[test]
    fn lowercase_does_is_not_overridden() {
        let adapter = adapter(Constant("VBZ"), Constant("VBZ"));
        let pair = adapter.tag(&tokens(&["does", "it"])).unwrap();
        assert_eq!(pair.primary, vec!["VBZ", "VBZ"]);
    }

    #[test]
    fn misaligned_output_is_an_error() {
        let adapter = adapter(Constant("NN"), Short);
        let error = adapter.tag(&tokens(&["two", "words"])).unwrap_err();
        assert_eq!(
            error,
            TaggerError::Misaligned {
                tagger: "short".into(),
                tokens: 2,
                tags: 1
            }
        );
    }

    #[test]
    fn empty_input_tags_to_nothing() {
        let adapter = adapter(Constant("NN"), Constant("NN"));
        let pair = adapter.tag(&[]).unwrap();
        assert!(pair.primary.is_empty() && pair.alternative.is_empty());
    }

    #[test]
    fn guesses_follow_word_shape() {
        assert_eq!(guess_tag("Amsterdam"), "NNP");
        assert_eq!(guess_tag("42"), "CD");
        assert_eq!(guess_tag("running"), "VBG");
        assert_eq!(guess_tag("walked"), "VBD");
        assert_eq!(guess_tag("quickly"), "RB");
        assert_eq!(guess_tag("wonderful"), "JJ");
        assert_eq!(guess_tag("apples"), "NNS");
        assert_eq!(guess_tag("glass"), "NN");
        assert_eq!(guess_tag("apple"), "NN");
        assert_eq!(guess_tag("?"), ".");
    }

    #[test]
    fn lookup_form_drops_trailing_punctuation() {
        assert_eq!(lookup_form("dogs?"), "dogs");
        assert_eq!(lookup_form("well,"), "well");
        assert_eq!(lookup_form("?"), "?");
    }
}

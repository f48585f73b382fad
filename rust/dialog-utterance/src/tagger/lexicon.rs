use std::collections::HashMap;

use crate::error::TaggerError;

use super::{PosTagger, guess_tag, lookup_form};

/// Tags words from a fixed lexicon, guessing from word shape when a word is
/// not listed.
///
/// The lexicon is plain text, one `word<TAB>tag` pair per line. Blank lines
/// and lines starting with `#` are skipped; the first entry for a word wins.
#[derive(Debug, Clone, Default)]
pub struct LexiconTagger {
    entries: HashMap<String, String>,
}

impl LexiconTagger {
    pub fn parse(text: &str) -> Result<Self, TaggerError> {
        let mut entries = HashMap::new();

        for (index, line) in text.lines().enumerate() {
            let line = line.trim_end();
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let malformed = |reason: &str| TaggerError::Lexicon {
                line: index + 1,
                reason: reason.to_string(),
            };
            let (word, tag) = line
                .split_once('\t')
                .ok_or_else(|| malformed("expected `word<TAB>tag`"))?;
            let (word, tag) = (word.trim(), tag.trim());
            if word.is_empty() || word.contains(char::is_whitespace) {
                return Err(malformed("word must be a single token"));
            }
            if tag.is_empty() || tag.contains(char::is_whitespace) {
                return Err(malformed("tag must be a single token"));
            }

            entries.entry(word.to_string()).or_insert_with(|| tag.to_string());
        }

        Ok(LexiconTagger { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tag of a single word, from the lexicon or by guessing.
    pub fn lookup(&self, token: &str) -> &str {
        let word = lookup_form(token);
        self.entries
            .get(word)
            .or_else(|| self.entries.get(&word.to_lowercase()))
            .map(String::as_str)
            .unwrap_or_else(|| guess_tag(word))
    }
}

impl PosTagger for LexiconTagger {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn tag(&self, tokens: &[String]) -> Result<Vec<String>, TaggerError> {
        Ok(tokens.iter().map(|token| self.lookup(token).to_string()).collect())
    }
}

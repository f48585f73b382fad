//! Data bundled into the crate: the structural base grammar, the lexicon of
//! the primary tagger and the list of known names.

/// Structural productions every utterance grammar starts from.
pub const GRAMMAR: &str = include_str!("../resources/grammar.cfg");

/// `word<TAB>tag` lexicon read by [`crate::tagger::LexiconTagger`].
pub const LEXICON: &str = include_str!("../resources/lexicon.tsv");

const NAMES: &str = include_str!("../resources/names.txt");

/// Names misrecognized transcripts are corrected towards.
pub fn names() -> Vec<String> {
    NAMES
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialog_grammar::Grammar;

    #[test]
    fn bundled_grammar_compiles_with_sentence_start() {
        let grammar = Grammar::compile(GRAMMAR).unwrap();
        assert_eq!(grammar.start(), "S");
    }

    #[test]
    fn bundled_names_skip_comments() {
        let names = names();
        assert_eq!(names.first().map(String::as_str), Some("Leolani"));
        assert!(names.iter().all(|name| !name.starts_with('#')));
    }
}

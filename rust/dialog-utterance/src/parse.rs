//! The parse stage: compile the grown grammar, parse, extract constituents.
//!
//! Nothing in here fails. A grammar that does not compile, a word the
//! grammar cannot reach or a search that runs out of budget all become
//! [`ParseOutcome::Failed`], which reads as an empty forest downstream.

use dialog_grammar::{Grammar, ParseLimits, RecursiveDescentParser, Tree};
use tracing::debug;

use crate::constituent::{ConstituentMap, extract_constituents};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The search completed. `forest` may still be empty.
    Parsed {
        forest: Vec<Tree>,
        constituents: ConstituentMap,
    },
    Failed {
        reason: String,
    },
}

impl ParseOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, ParseOutcome::Failed { .. })
    }

    /// Forest and constituents, both empty for a failed parse.
    pub fn into_parts(self) -> (Vec<Tree>, ConstituentMap) {
        match self {
            ParseOutcome::Parsed { forest, constituents } => (forest, constituents),
            ParseOutcome::Failed { .. } => (Vec::new(), ConstituentMap::new()),
        }
    }
}

/// Parse `tokens` with the grammar in `grammar_text`.
///
/// A `?` ending the last token is removed in place before parsing, so the
/// caller's tokens match the words the grammar was extended with.
pub fn parse_tokens(tokens: &mut [String], grammar_text: &str, limits: ParseLimits) -> ParseOutcome {
    if let Some(last) = tokens.last_mut() {
        if let Some(stripped) = last.strip_suffix('?') {
            *last = stripped.to_string();
        }
    }

    let grammar = match Grammar::compile(grammar_text) {
        Ok(grammar) => grammar,
        Err(error) => {
            debug!(%error, "grammar does not compile");
            return ParseOutcome::Failed {
                reason: error.to_string(),
            };
        }
    };

    let parser = RecursiveDescentParser::new(&grammar).with_limits(limits);
    match parser.parse(tokens) {
        Ok(forest) => {
            match forest.len() {
                0 => debug!(?tokens, "no parse"),
                1 => {}
                count => debug!(count, "ambiguity in grammar, keeping the first tree"),
            }
            let constituents = extract_constituents(&forest);
            ParseOutcome::Parsed { forest, constituents }
        }
        Err(error) => {
            debug!(%error, ?tokens, "parse failed");
            ParseOutcome::Failed {
                reason: error.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const GRAMMAR: &str = "\
S -> NP VP
NP -> NNP | NNS
VP -> VBZ NP
NNP -> 'Thomas'
VBZ -> 'likes'
NNS -> 'dogs'
";

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|word| word.to_string()).collect()
    }

    #[test]
    fn parsed_sentence_has_constituents() {
        let mut words = tokens(&["Thomas", "likes", "dogs"]);
        let (forest, constituents) = parse_tokens(&mut words, GRAMMAR, ParseLimits::default()).into_parts();

        assert_eq!(forest.len(), 1);
        let raws: Vec<&str> = constituents.values().map(|c| c.raw.as_str()).collect();
        assert_eq!(raws, vec!["Thomas", "likes", "dogs"]);
    }

    #[test]
    fn trailing_question_mark_is_stripped_in_place() {
        let mut words = tokens(&["Thomas", "likes", "dogs?"]);
        let outcome = parse_tokens(&mut words, GRAMMAR, ParseLimits::default());
        assert!(!outcome.is_failed());
        assert_eq!(words, tokens(&["Thomas", "likes", "dogs"]));
    }

    #[test]
    fn malformed_grammar_fails_softly() {
        let mut words = tokens(&["Thomas"]);
        let outcome = parse_tokens(&mut words, "S -> -> NP", ParseLimits::default());
        assert!(outcome.is_failed());
        assert_eq!(outcome.into_parts(), (Vec::new(), ConstituentMap::new()));
    }

    #[test]
    fn uncovered_word_fails_softly() {
        let mut words = tokens(&["Thomas", "likes", "cats"]);
        let outcome = parse_tokens(&mut words, GRAMMAR, ParseLimits::default());
        let ParseOutcome::Failed { reason } = outcome else {
            panic!("expected a failed parse");
        };
        assert!(reason.contains("cats"));
    }

    #[test]
    fn no_derivation_is_an_empty_parse() {
        let mut words = tokens(&["dogs", "likes", "Thomas", "Thomas"]);
        let outcome = parse_tokens(&mut words, GRAMMAR, ParseLimits::default());
        assert_eq!(
            outcome,
            ParseOutcome::Parsed {
                forest: Vec::new(),
                constituents: ConstituentMap::new()
            }
        );
    }

    #[test]
    fn exhausted_budget_fails_softly() {
        let mut words = tokens(&["Thomas", "likes", "dogs"]);
        let limits = ParseLimits::default().with_max_steps(1);
        assert!(parse_tokens(&mut words, GRAMMAR, limits).is_failed());
    }

    #[test]
    fn empty_token_sequence_is_handled() {
        let outcome = parse_tokens(&mut [], GRAMMAR, ParseLimits::default());
        assert_eq!(outcome.into_parts().0, Vec::<Tree>::new());
    }
}

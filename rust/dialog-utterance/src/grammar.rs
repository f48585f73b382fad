//! Growing the grammar from tagged tokens.
//!
//! The base grammar only knows part-of-speech tags. Before each parse, every
//! token contributes the lexical rule `TAG -> 'word'` so the parser can reach
//! it. Rules accumulate in the shared [`RuleStore`] and are never removed, so
//! later utterances parse against everything seen before.

use dialog_grammar::tokenizer::{Token, tokenize_line};
use dialog_grammar::{LexicalRule, RuleStore};
use tracing::{trace, warn};

/// Possessive tags such as `PRP$` cannot name a nonterminal as they are.
const POSSESSIVE_MARKER: char = '$';
const POSSESSIVE_SUFFIX: &str = "POS";

/// Rewrite a possessive tag to a valid nonterminal name: `PRP$` becomes
/// `PRPPOS`. Other tags are returned unchanged.
pub fn grammar_tag(tag: &str) -> String {
    match tag.strip_suffix(POSSESSIVE_MARKER) {
        Some(base) => format!("{base}{POSSESSIVE_SUFFIX}"),
        None => tag.to_string(),
    }
}

/// The word a token contributes to the grammar, without a trailing `?`.
pub fn grammar_word(token: &str) -> &str {
    token.strip_suffix('?').unwrap_or(token)
}

/// Whether `rule` renders to a line that reads back as the same tag and word.
fn reads_back(rule: &LexicalRule) -> bool {
    match tokenize_line(&rule.to_string(), 0).as_deref() {
        Ok([Token::Nonterminal(tag), Token::Arrow, Token::Terminal(word)]) => {
            *tag == rule.tag && *word == rule.word
        }
        _ => false,
    }
}

/// Add one lexical rule per token to `store`.
///
/// `tags` is rewritten in place so possessive tags match the rules added for
/// them. Tags that cannot be written as a nonterminal (punctuation tags such
/// as `.`) and tokens that are empty once `?` is removed add nothing. Returns
/// the number of rules that were new.
pub fn extend_rules(store: &mut RuleStore, tokens: &[String], tags: &mut [String]) -> usize {
    let mut added = 0;

    for (token, tag) in tokens.iter().zip(tags.iter_mut()) {
        *tag = grammar_tag(tag);

        let word = grammar_word(token);
        let rule = LexicalRule::new(tag.as_str(), word);
        if word.is_empty() || !reads_back(&rule) {
            warn!(%token, %tag, "token cannot be written as a lexical rule");
            continue;
        }

        if !store.contains(&rule) {
            trace!(%rule, "adding lexical rule");
            store.insert(rule);
            added += 1;
        }
    }

    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialog_grammar::Grammar;
    use pretty_assertions::assert_eq;

    fn strings(words: &[&str]) -> Vec<String> {
        words.iter().map(|word| word.to_string()).collect()
    }

    #[test]
    fn adds_one_rule_per_new_pair() {
        let mut store = RuleStore::new("S -> NNP VBZ NNS");
        let mut tags = strings(&["NNP", "VBZ", "NNS"]);

        let added = extend_rules(&mut store, &strings(&["Thomas", "likes", "dogs"]), &mut tags);

        assert_eq!(added, 3);
        assert_eq!(
            store.text(),
            "S -> NNP VBZ NNS\nNNP -> 'Thomas'\nVBZ -> 'likes'\nNNS -> 'dogs'\n"
        );
    }

    #[test]
    fn repeated_pairs_add_nothing() {
        let mut store = RuleStore::new("S -> NN");
        let tokens = strings(&["dog", "dog"]);
        assert_eq!(extend_rules(&mut store, &tokens, &mut strings(&["NN", "NN"])), 1);
        assert_eq!(extend_rules(&mut store, &tokens, &mut strings(&["NN", "NN"])), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn possessive_tags_are_rewritten_in_rule_and_sequence() {
        let mut store = RuleStore::new("S -> POSS NN\nPOSS -> PRPPOS | WPPOS");
        let mut tags = strings(&["PRP$", "NN"]);

        extend_rules(&mut store, &strings(&["my", "book"]), &mut tags);

        assert_eq!(tags, strings(&["PRPPOS", "NN"]));
        assert!(store.contains(&LexicalRule::new("PRPPOS", "my")));
        assert_eq!(grammar_tag("WP$"), "WPPOS");
    }

    #[test]
    fn question_mark_is_stripped_from_words() {
        let mut store = RuleStore::new("S -> NNS");
        extend_rules(&mut store, &strings(&["dogs?"]), &mut strings(&["NNS"]));
        assert!(store.contains(&LexicalRule::new("NNS", "dogs")));
        assert!(!store.contains(&LexicalRule::new("NNS", "dogs?")));
    }

    #[test]
    fn punctuation_tags_are_skipped() {
        let mut store = RuleStore::new("S -> NN");
        let added = extend_rules(&mut store, &strings(&["?", "!"]), &mut strings(&[".", "."]));
        assert_eq!(added, 0);
        assert!(Grammar::compile(&store.text()).is_ok());
    }

    #[test]
    fn words_with_quotes_still_compile() {
        let mut store = RuleStore::new("S -> NN");
        extend_rules(&mut store, &strings(&["rock'n'roll"]), &mut strings(&["NN"]));
        let grammar = Grammar::compile(&store.text()).unwrap();
        assert!(grammar.covers("rock'n'roll"));
    }

    #[test]
    fn words_with_backslashes_keep_the_store_compilable() {
        let mut store = RuleStore::new("S -> NN");
        let tokens = strings(&["C:\\", "a\\b", "dogs\\"]);

        let added = extend_rules(&mut store, &tokens, &mut strings(&["NN", "NN", "NN"]));

        assert_eq!(added, 3);
        let grammar = Grammar::compile(&store.text()).unwrap();
        assert!(grammar.uncovered(&tokens).is_empty());
    }

    #[test]
    fn tags_that_do_not_read_back_are_skipped() {
        let mut store = RuleStore::new("S -> NN");
        let added = extend_rules(
            &mut store,
            &strings(&["(", "dog"]),
            &mut strings(&["-LRB-", "NN VB"]),
        );
        assert_eq!(added, 0);
        assert!(store.is_empty());
    }
}

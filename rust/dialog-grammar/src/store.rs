//! The append-only rule store.
//!
//! A [`RuleStore`] holds a fixed block of structural grammar text and a
//! growing, deduplicated set of lexical rules `TAG -> 'word'`. Lexical rules
//! are identified by their `(tag, word)` pair, compared case-sensitively, and
//! are never removed. [`RuleStore::text`] renders the base text followed by
//! every lexical rule in insertion order, ready for [`crate::Grammar::compile`].

use std::fmt;

use indexmap::IndexSet;

use crate::grammar::quote;

/// A terminal production `tag -> 'word'`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LexicalRule {
    pub tag: String,
    pub word: String,
}

impl LexicalRule {
    pub fn new(tag: impl Into<String>, word: impl Into<String>) -> Self {
        LexicalRule {
            tag: tag.into(),
            word: word.into(),
        }
    }
}

impl fmt::Display for LexicalRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.tag, quote(&self.word))
    }
}

#[derive(Debug, Clone, Default)]
pub struct RuleStore {
    base: String,
    lexical: IndexSet<LexicalRule>,
}

impl RuleStore {
    /// Create a store over the given structural grammar text.
    pub fn new(base: impl Into<String>) -> Self {
        RuleStore {
            base: base.into(),
            lexical: IndexSet::new(),
        }
    }

    /// Add a lexical rule. Returns `false` when the rule was already present.
    pub fn insert(&mut self, rule: LexicalRule) -> bool {
        self.lexical.insert(rule)
    }

    pub fn contains(&self, rule: &LexicalRule) -> bool {
        self.lexical.contains(rule)
    }

    /// Number of lexical rules.
    pub fn len(&self) -> usize {
        self.lexical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexical.is_empty()
    }

    /// Render the full grammar text: base text, then one line per lexical
    /// rule.
    pub fn text(&self) -> String {
        let mut text = String::with_capacity(self.base.len() + self.lexical.len() * 16);
        text.push_str(&self.base);
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        for rule in &self.lexical {
            text.push_str(&rule.to_string());
            text.push('\n');
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Grammar;
    use pretty_assertions::assert_eq;

    #[test]
    fn insert_deduplicates_by_tag_and_word() {
        let mut store = RuleStore::new("S -> NN");
        assert!(store.insert(LexicalRule::new("NN", "dog")));
        assert!(!store.insert(LexicalRule::new("NN", "dog")));
        assert!(store.insert(LexicalRule::new("VB", "dog")));
        assert!(store.insert(LexicalRule::new("NN", "Dog")));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn text_appends_rules_after_base() {
        let mut store = RuleStore::new("S -> NP VP");
        store.insert(LexicalRule::new("NP", "Thomas"));
        store.insert(LexicalRule::new("VP", "runs"));
        assert_eq!(store.text(), "S -> NP VP\nNP -> 'Thomas'\nVP -> 'runs'\n");
    }

    #[test]
    fn rendered_text_compiles() {
        let mut store = RuleStore::new("S -> NN\n");
        store.insert(LexicalRule::new("NN", "don't"));
        let grammar = Grammar::compile(&store.text()).unwrap();
        assert!(grammar.covers("don't"));
    }

    #[test]
    fn rendered_text_with_backslashes_compiles() {
        let mut store = RuleStore::new("S -> NN\n");
        store.insert(LexicalRule::new("NN", "C:\\"));
        store.insert(LexicalRule::new("NN", "dog"));
        let grammar = Grammar::compile(&store.text()).unwrap();
        assert!(grammar.covers("C:\\"));
        assert!(grammar.covers("dog"));
    }

    #[test]
    fn empty_store_renders_nothing() {
        assert_eq!(RuleStore::default().text(), "");
        assert!(RuleStore::default().is_empty());
    }
}

//! # dialog-grammar
//!
//! Context-free grammar machinery for utterance parsing: a compiler for
//! grammar text, an append-only store of lexical rules that grows as new
//! words are seen, and an exhaustive recursive-descent parser with explicit
//! resource bounds.
//!
//! ## Grammar text
//!
//! ```text
//! S -> NP VP
//! NP -> NNP | DT NN
//! VP -> VBZ | VBZ NP
//! NNP -> 'Thomas'
//! ```
//!
//! Nonterminals are bare names, terminals are quoted words, `|` separates
//! alternatives and the first left-hand side is the start symbol.
//!
//! ## Example
//!
//! ```
//! use dialog_grammar::{Grammar, LexicalRule, RecursiveDescentParser, RuleStore};
//!
//! let mut store = RuleStore::new("S -> NP VP\nNP -> NNP | NNS\nVP -> VBZ NP");
//! store.insert(LexicalRule::new("NNP", "Thomas"));
//! store.insert(LexicalRule::new("VBZ", "likes"));
//! store.insert(LexicalRule::new("NNS", "dogs"));
//!
//! let grammar = Grammar::compile(&store.text()).unwrap();
//! let forest = RecursiveDescentParser::new(&grammar)
//!     .parse(&["Thomas", "likes", "dogs"])
//!     .unwrap();
//!
//! assert_eq!(forest.len(), 1);
//! assert_eq!(
//!     forest[0].to_string(),
//!     "(S (NP (NNP Thomas)) (VP (VBZ likes) (NP (NNS dogs))))"
//! );
//! ```

pub mod error;
pub mod grammar;
pub mod parser;
pub mod store;
pub mod tokenizer;
pub mod tree;

pub use error::{GrammarError, ParseError};
pub use grammar::{Grammar, Production, Symbol};
pub use parser::{ParseLimits, RecursiveDescentParser};
pub use store::{LexicalRule, RuleStore};
pub use tree::{Node, Tree};

//! # dialog-utterance
//!
//! Turns what a speaker said into a syntactic analysis that a semantic
//! extractor can read subject, predicate and object from.
//!
//! Recognizers, taggers and hand-written grammars are all unreliable in
//! their own way. The pipeline reconciles them instead of trusting any one:
//! names are corrected across competing transcripts, two taggers label every
//! token, and the grammar grows a lexical rule for each tagged word before
//! the parse. Whatever goes wrong after a transcript is chosen degrades to
//! an empty parse rather than an error.
//!
//! ## Pipeline
//!
//! ```text
//! Chat::add_utterance(hypotheses)
//!   → choose_hypothesis    (name correction, reweighting, argmax)
//!     → normalize          (openers, contractions, 's)
//!       → TaggerAdapter    (primary + alternative tags, overrides)
//!         → extend_rules   (TAG -> 'word' into the shared RuleStore)
//!           → parse_tokens (compile, recursive descent, first tree)
//!             → extract_constituents
//! ```
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use dialog_utterance::{AnalyzerConfig, Chat, Context, Hypothesis};
//!
//! let context = Arc::new(Context::new(AnalyzerConfig::default())?);
//! let mut chat = Chat::new("Lenka", context);
//!
//! let utterance = chat.add_utterance(vec![
//!     Hypothesis::new("Tomas likes dogs", 0.8),
//!     Hypothesis::new("Thomas likes dog", 0.6),
//! ])?;
//!
//! assert_eq!(utterance.tokens(), ["Thomas", "likes", "dogs"]);
//! let raws: Vec<&str> = utterance.constituents().values().map(|c| c.raw.as_str()).collect();
//! assert_eq!(raws, ["Thomas", "likes", "dogs"]);
//! # Ok::<(), dialog_utterance::UtteranceError>(())
//! ```

pub mod chat;
pub mod config;
pub mod constituent;
pub mod context;
pub mod error;
pub mod grammar;
pub mod hypothesis;
pub mod normalize;
pub mod parse;
pub mod resources;
pub mod tagger;
pub mod utterance;

pub use chat::Chat;
pub use config::{AnalyzerConfig, Source};
pub use constituent::{Constituent, ConstituentMap, extract_constituents};
pub use context::Context;
pub use error::{Result, TaggerError, UtteranceError};
pub use hypothesis::{Hypothesis, choose_hypothesis};
pub use normalize::normalize;
pub use parse::{ParseOutcome, parse_tokens};
pub use tagger::{HeuristicTagger, LexiconTagger, PosTagger, TagPair, TaggerAdapter};
pub use utterance::{Stage, Utterance};

pub use dialog_grammar::{ParseLimits, Tree};

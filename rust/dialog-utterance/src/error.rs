//! Error types for the utterance pipeline.
//!
//! Only input-contract violations and resource initialization failures are
//! surfaced. Everything that goes wrong while tagging or parsing a single
//! utterance is recorded on the utterance as a degraded result instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UtteranceError {
    #[error("no transcription hypotheses were supplied")]
    NoHypotheses,

    #[error("selected transcript is empty")]
    EmptyTranscript,

    #[error(transparent)]
    Tagger(#[from] TaggerError),

    #[error("could not load {resource}: {reason}")]
    Resource { resource: String, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl UtteranceError {
    pub(crate) fn resource(resource: impl Into<String>, reason: impl ToString) -> Self {
        UtteranceError::Resource {
            resource: resource.into(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaggerError {
    #[error("{tagger} tagger failed: {reason}")]
    Backend { tagger: String, reason: String },

    #[error("{tagger} tagger returned {tags} tags for {tokens} tokens")]
    Misaligned {
        tagger: String,
        tokens: usize,
        tags: usize,
    },

    #[error("lexicon line {line}: {reason}")]
    Lexicon { line: usize, reason: String },
}

pub type Result<T, E = UtteranceError> = std::result::Result<T, E>;

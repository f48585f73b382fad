//! One analyzed turn of a conversation.

use std::fmt;

use chrono::{DateTime, Utc};
use dialog_grammar::Tree;
use tracing::{debug, debug_span};

use crate::constituent::ConstituentMap;
use crate::context::Context;
use crate::error::Result;
use crate::hypothesis::{Hypothesis, choose_hypothesis};
use crate::normalize::normalize;
use crate::parse::{ParseOutcome, parse_tokens};

/// How far analysis of an utterance got. Stages only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Created,
    Normalized,
    Tagged,
    GrammarExtended,
    Parsed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Created => "created",
            Stage::Normalized => "normalized",
            Stage::Tagged => "tagged",
            Stage::GrammarExtended => "grammar extended",
            Stage::Parsed => "parsed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct Utterance {
    speaker: String,
    turn: usize,
    datetime: DateTime<Utc>,
    hypothesis: Hypothesis,
    tokens: Vec<String>,
    tags: Vec<String>,
    forest: Vec<Tree>,
    constituents: ConstituentMap,
    failure: Option<String>,
    stage: Stage,
}

impl Utterance {
    /// Choose a transcript among `hypotheses` and analyze it.
    ///
    /// Fails only when no usable transcript was given or the taggers cannot
    /// be initialized. Tagging and parsing problems leave an utterance with
    /// an empty forest and the reason in [`Utterance::failure`].
    pub fn analyze(
        context: &Context,
        speaker: impl Into<String>,
        turn: usize,
        hypotheses: Vec<Hypothesis>,
    ) -> Result<Self> {
        let config = context.config();
        let hypothesis = choose_hypothesis(hypotheses, &config.names, config.max_name_distance)?;
        let taggers = context.taggers()?;

        let mut utterance = Utterance {
            speaker: speaker.into(),
            turn,
            datetime: Utc::now(),
            hypothesis,
            tokens: Vec::new(),
            tags: Vec::new(),
            forest: Vec::new(),
            constituents: ConstituentMap::new(),
            failure: None,
            stage: Stage::Created,
        };
        let _span = debug_span!("utterance", turn, speaker = %utterance.speaker).entered();

        utterance.tokens = normalize(&utterance.hypothesis.transcript, taggers.alternative());
        utterance.advance(Stage::Normalized);

        let outcome = match taggers.tag(&utterance.tokens) {
            Ok(pair) => {
                utterance.tags = pair.primary;
                utterance.advance(Stage::Tagged);

                let grammar = context.extend_grammar(&utterance.tokens, &mut utterance.tags);
                utterance.advance(Stage::GrammarExtended);

                parse_tokens(&mut utterance.tokens, &grammar, config.limits)
            }
            Err(error) => ParseOutcome::Failed {
                reason: error.to_string(),
            },
        };

        if let ParseOutcome::Failed { reason } = &outcome {
            debug!(%reason, "analysis degraded to an empty parse");
            utterance.failure = Some(reason.clone());
        }
        (utterance.forest, utterance.constituents) = outcome.into_parts();
        utterance.advance(Stage::Parsed);

        Ok(utterance)
    }

    fn advance(&mut self, stage: Stage) {
        debug_assert!(stage > self.stage);
        debug!(from = %self.stage, to = %stage, "stage");
        self.stage = stage;
    }

    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    /// Position of this utterance in its chat, starting at zero.
    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn datetime(&self) -> DateTime<Utc> {
        self.datetime
    }

    pub fn hypothesis(&self) -> &Hypothesis {
        &self.hypothesis
    }

    pub fn transcript(&self) -> &str {
        &self.hypothesis.transcript
    }

    pub fn confidence(&self) -> f64 {
        self.hypothesis.confidence
    }

    /// Normalized tokens, as parsed.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Primary tags, possessives rewritten as in the grammar. Empty when
    /// tagging failed.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Every parse found. Empty when the utterance could not be parsed.
    pub fn forest(&self) -> &[Tree] {
        &self.forest
    }

    pub fn constituents(&self) -> &ConstituentMap {
        &self.constituents
    }

    /// Why the parse degraded to an empty forest, if it did for a reason
    /// other than the grammar deriving nothing.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }
}

impl fmt::Display for Utterance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>10} ({:>3}): \"{}\"",
            self.speaker, self.turn, self.hypothesis.transcript
        )
    }
}

//! A conversation with one speaker.

use std::fmt;
use std::sync::Arc;

use tracing::info;
use ulid::Ulid;

use crate::context::Context;
use crate::error::Result;
use crate::hypothesis::Hypothesis;
use crate::utterance::Utterance;

/// The ordered, append-only log of a conversation's utterances.
#[derive(Debug)]
pub struct Chat {
    id: Ulid,
    speaker: String,
    context: Arc<Context>,
    utterances: Vec<Utterance>,
}

impl Chat {
    pub fn new(speaker: impl Into<String>, context: Arc<Context>) -> Self {
        let speaker = speaker.into();
        let id = Ulid::new();
        info!(%id, %speaker, "<< start of chat >>");
        Chat {
            id,
            speaker,
            context,
            utterances: Vec::new(),
        }
    }

    pub fn id(&self) -> Ulid {
        self.id
    }

    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    pub fn context(&self) -> &Arc<Context> {
        &self.context
    }

    /// Utterances in the order they were added.
    pub fn utterances(&self) -> &[Utterance] {
        &self.utterances
    }

    pub fn last_utterance(&self) -> Option<&Utterance> {
        self.utterances.last()
    }

    /// Analyze the speaker's next turn and append it to the log.
    ///
    /// Nothing is appended when an error is returned.
    pub fn add_utterance(&mut self, hypotheses: Vec<Hypothesis>) -> Result<&Utterance> {
        let turn = self.utterances.len();
        let utterance = Utterance::analyze(&self.context, self.speaker.as_str(), turn, hypotheses)?;
        info!(chat = %self.id, "{utterance}");

        self.utterances.push(utterance);
        Ok(&self.utterances[turn])
    }
}

impl fmt::Display for Chat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for utterance in &self.utterances {
            writeln!(f, "{utterance}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyzerConfig;
    use crate::error::UtteranceError;

    fn chat() -> Chat {
        let context = Context::new(AnalyzerConfig::default()).unwrap();
        Chat::new("Lenka", Arc::new(context))
    }

    #[test]
    fn turns_follow_insertion_order() {
        let mut chat = chat();
        chat.add_utterance(vec![Hypothesis::new("I like dogs", 0.8)]).unwrap();
        chat.add_utterance(vec![Hypothesis::new("Thomas likes cats", 0.8)]).unwrap();

        for (index, utterance) in chat.utterances().iter().enumerate() {
            assert_eq!(utterance.turn(), index);
            assert_eq!(utterance.speaker(), "Lenka");
        }
        assert_eq!(chat.last_utterance().map(Utterance::transcript), Some("Thomas likes cats"));
    }

    #[test]
    fn rejected_input_appends_nothing() {
        let mut chat = chat();
        let error = chat.add_utterance(Vec::new()).unwrap_err();
        assert!(matches!(error, UtteranceError::NoHypotheses));
        assert!(chat.utterances().is_empty());
        assert!(chat.last_utterance().is_none());
    }

    #[test]
    fn chats_have_distinct_ids() {
        let context = Arc::new(Context::new(AnalyzerConfig::default()).unwrap());
        let first = Chat::new("Lenka", context.clone());
        let second = Chat::new("Lenka", context);
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn display_lists_turns() {
        let mut chat = chat();
        chat.add_utterance(vec![Hypothesis::new("I like dogs", 0.8)]).unwrap();
        assert_eq!(chat.to_string(), "     Lenka (  0): \"I like dogs\"\n");
    }
}

//! Error types for grammar compilation and parsing.

use thiserror::Error;

/// Errors raised while compiling grammar text into a [`crate::Grammar`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// A line could not be read as a production.
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// The text contained no productions at all.
    #[error("grammar defines no productions")]
    Empty,
}

impl GrammarError {
    pub(crate) fn syntax(line: usize, message: impl Into<String>) -> Self {
        GrammarError::Syntax {
            line,
            message: message.into(),
        }
    }
}

/// Errors raised while deriving parses of a token sequence.
///
/// None of these mean the grammar is wrong; they mean this input could not
/// be analysed within the configured bounds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Some input words are not produced by any terminal rule.
    #[error("grammar does not cover some of the input words: {words:?}")]
    Uncovered { words: Vec<String> },

    /// The derivation nested deeper than the configured limit.
    #[error("recursion depth limit of {limit} exceeded")]
    DepthExceeded { limit: usize },

    /// The search expanded more sequences than the configured budget.
    #[error("step budget of {limit} expansions exhausted")]
    BudgetExhausted { limit: usize },
}

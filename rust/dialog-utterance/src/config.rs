//! Analyzer configuration.
//!
//! ```json
//! {
//!   "names": ["Leolani", "Thomas"],
//!   "max_name_distance": 2,
//!   "grammar": { "file": "grammar.cfg" },
//!   "lexicon": "bundled",
//!   "limits": { "max_depth": 256, "max_steps": 200000 }
//! }
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use dialog_grammar::ParseLimits;
use serde::{Deserialize, Serialize};

use crate::error::{Result, UtteranceError};
use crate::resources;

/// Where a text resource comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// The copy compiled into the crate.
    #[default]
    Bundled,
    /// A file read when the resource is first needed.
    File(PathBuf),
    /// Text given directly.
    Inline(String),
}

impl Source {
    pub fn file(path: impl AsRef<Path>) -> Self {
        Source::File(path.as_ref().to_path_buf())
    }

    pub fn inline(text: impl Into<String>) -> Self {
        Source::Inline(text.into())
    }

    /// Resolve the text, using `bundled` for [`Source::Bundled`].
    pub(crate) fn load(&self, resource: &str, bundled: &'static str) -> Result<Cow<'static, str>> {
        match self {
            Source::Bundled => Ok(Cow::Borrowed(bundled)),
            Source::File(path) => std::fs::read_to_string(path).map(Cow::Owned).map_err(|error| {
                UtteranceError::resource(format!("{resource} from {}", path.display()), error)
            }),
            Source::Inline(text) => Ok(Cow::Owned(text.clone())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Canonical spellings of names the recognizer tends to garble.
    pub names: Vec<String>,
    /// Largest edit distance at which a capitalized word is read as a name.
    pub max_name_distance: usize,
    /// Structural base grammar.
    pub grammar: Source,
    /// Lexicon of the primary tagger.
    pub lexicon: Source,
    pub limits: ParseLimits,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            names: resources::names(),
            max_name_distance: 2,
            grammar: Source::Bundled,
            lexicon: Source::Bundled,
            limits: ParseLimits::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Read a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|error| UtteranceError::Config(error.to_string()))
    }

    /// Read a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|error| UtteranceError::resource(format!("configuration {}", path.display()), error))?;
        Self::from_json(&json)
    }

    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_name_distance(mut self, distance: usize) -> Self {
        self.max_name_distance = distance;
        self
    }

    pub fn with_grammar(mut self, grammar: Source) -> Self {
        self.grammar = grammar;
        self
    }

    pub fn with_lexicon(mut self, lexicon: Source) -> Self {
        self.lexicon = lexicon;
        self
    }

    pub fn with_limits(mut self, limits: ParseLimits) -> Self {
        self.limits = limits;
        self
    }

    pub(crate) fn load_grammar(&self) -> Result<Cow<'static, str>> {
        self.grammar.load("base grammar", resources::GRAMMAR)
    }

    pub(crate) fn load_lexicon(&self) -> Result<Cow<'static, str>> {
        self.lexicon.load("lexicon", resources::LEXICON)
    }
}

//! State shared by every chat: configuration, taggers and the growing rule
//! store.
//!
//! A [`Context`] is created once and handed to chats behind an `Arc`. Taggers
//! are expensive to build, so they are created on first use (or eagerly via
//! [`Context::warm_up`]) and reused afterwards. The rule store is guarded by a
//! mutex so that extending it is serialized across chats.

use std::fmt;
use std::sync::{Arc, OnceLock};

use dialog_grammar::RuleStore;
use parking_lot::Mutex;
use tracing::info;

use crate::config::AnalyzerConfig;
use crate::error::{Result, UtteranceError};
use crate::grammar::extend_rules;
use crate::tagger::{HeuristicTagger, LexiconTagger, PosTagger, TaggerAdapter};

type TaggerFactory = Box<dyn Fn(&AnalyzerConfig) -> Result<TaggerAdapter> + Send + Sync>;

pub struct Context {
    config: AnalyzerConfig,
    rules: Mutex<RuleStore>,
    taggers: OnceLock<TaggerAdapter>,
    factory: TaggerFactory,
    building: Mutex<()>,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("lexical_rules", &self.rules.lock().len())
            .field("taggers", &self.taggers.get())
            .finish_non_exhaustive()
    }
}

impl Context {
    /// Create a context using the built-in taggers. The base grammar is read
    /// now; the lexicon is read when tagging first happens.
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        Self::with_factory(config, default_taggers)
    }

    /// Create a context that builds its taggers with `factory` on first use.
    pub fn with_factory<F>(config: AnalyzerConfig, factory: F) -> Result<Self>
    where
        F: Fn(&AnalyzerConfig) -> Result<TaggerAdapter> + Send + Sync + 'static,
    {
        let base = config.load_grammar()?;
        Ok(Context {
            rules: Mutex::new(RuleStore::new(base.into_owned())),
            config,
            taggers: OnceLock::new(),
            factory: Box::new(factory),
            building: Mutex::new(()),
        })
    }

    /// Create a context around already constructed taggers.
    pub fn with_taggers(
        config: AnalyzerConfig,
        primary: Arc<dyn PosTagger>,
        alternative: Arc<dyn PosTagger>,
    ) -> Result<Self> {
        let context = Self::with_factory(config, |_| {
            Err(UtteranceError::Config("taggers were supplied up front".into()))
        })?;
        let _ = context.taggers.set(TaggerAdapter::new(primary, alternative));
        Ok(context)
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// The taggers, building them on first call.
    ///
    /// Concurrent first calls run the factory once; the others wait for it.
    /// A failed build leaves the cell empty so a later call can retry.
    pub fn taggers(&self) -> Result<&TaggerAdapter> {
        if let Some(taggers) = self.taggers.get() {
            return Ok(taggers);
        }

        let _building = self.building.lock();
        if let Some(taggers) = self.taggers.get() {
            return Ok(taggers);
        }

        let taggers = (self.factory)(&self.config)?;
        info!(
            primary = taggers.primary().name(),
            alternative = taggers.alternative().name(),
            "taggers ready"
        );
        Ok(self.taggers.get_or_init(|| taggers))
    }

    /// Build the taggers now instead of on the first utterance.
    pub fn warm_up(&self) -> Result<()> {
        self.taggers().map(|_| ())
    }

    /// Add lexical rules for `tokens` and return the grammar text to parse
    /// them with. Possessive tags in `tags` are rewritten in place.
    pub fn extend_grammar(&self, tokens: &[String], tags: &mut [String]) -> String {
        let mut rules = self.rules.lock();
        extend_rules(&mut rules, tokens, tags);
        rules.text()
    }

    /// The current grammar text.
    pub fn grammar_text(&self) -> String {
        self.rules.lock().text()
    }

    /// Number of lexical rules learned so far.
    pub fn lexical_rule_count(&self) -> usize {
        self.rules.lock().len()
    }
}

fn default_taggers(config: &AnalyzerConfig) -> Result<TaggerAdapter> {
    let lexicon = LexiconTagger::parse(&config.load_lexicon()?)?;
    Ok(TaggerAdapter::new(Arc::new(lexicon), Arc::new(HeuristicTagger::new())))
}

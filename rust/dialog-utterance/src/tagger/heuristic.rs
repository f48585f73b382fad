use crate::error::TaggerError;

use super::{PosTagger, guess_tag, lookup_form};

const CLOSED_CLASS: &[(&str, &str)] = &[
    ("i", "PRP"),
    ("me", "PRP"),
    ("you", "PRP"),
    ("he", "PRP"),
    ("him", "PRP"),
    ("she", "PRP"),
    ("it", "PRP"),
    ("we", "PRP"),
    ("us", "PRP"),
    ("they", "PRP"),
    ("them", "PRP"),
    ("my", "PRP$"),
    ("your", "PRP$"),
    ("his", "PRP$"),
    ("her", "PRP$"),
    ("its", "PRP$"),
    ("our", "PRP$"),
    ("their", "PRP$"),
    ("there", "EX"),
    ("a", "DT"),
    ("an", "DT"),
    ("the", "DT"),
    ("this", "DT"),
    ("that", "DT"),
    ("these", "DT"),
    ("those", "DT"),
    ("some", "DT"),
    ("any", "DT"),
    ("every", "DT"),
    ("no", "DT"),
    ("what", "WP"),
    ("who", "WP"),
    ("whose", "WP$"),
    ("which", "WDT"),
    ("where", "WRB"),
    ("when", "WRB"),
    ("why", "WRB"),
    ("how", "WRB"),
    ("in", "IN"),
    ("on", "IN"),
    ("at", "IN"),
    ("of", "IN"),
    ("from", "IN"),
    ("with", "IN"),
    ("about", "IN"),
    ("for", "IN"),
    ("by", "IN"),
    ("like", "IN"),
    ("to", "TO"),
    ("and", "CC"),
    ("or", "CC"),
    ("but", "CC"),
    ("not", "RB"),
    ("very", "RB"),
    ("really", "RB"),
    ("also", "RB"),
    ("am", "VBP"),
    ("is", "VBZ"),
    ("are", "VBP"),
    ("was", "VBD"),
    ("were", "VBD"),
    ("be", "VB"),
    ("been", "VBN"),
    ("do", "VBP"),
    ("does", "VBZ"),
    ("did", "VBD"),
    ("have", "VBP"),
    ("has", "VBZ"),
    ("had", "VBD"),
    ("can", "MD"),
    ("could", "MD"),
    ("will", "MD"),
    ("would", "MD"),
    ("should", "MD"),
    ("may", "MD"),
    ("might", "MD"),
    ("must", "MD"),
    ("good", "JJ"),
    ("bad", "JJ"),
    ("nice", "JJ"),
    ("happy", "JJ"),
    ("sad", "JJ"),
    ("big", "JJ"),
    ("small", "JJ"),
    ("new", "JJ"),
    ("old", "JJ"),
    ("great", "JJ"),
];

/// Tags from a table of function words and word shape, corrected by the tag
/// of the preceding word.
///
/// Tags each token from left to right. Open-class words are guessed from
/// their suffixes and then adjusted: after a determiner or possessive a verb
/// form becomes a noun, after `to` or a modal a noun becomes a base verb, and
/// after a pronoun or proper noun a plural noun becomes a third-person verb
/// and a singular one a present-tense verb.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTagger;

impl HeuristicTagger {
    pub fn new() -> Self {
        HeuristicTagger
    }

    fn closed_class(word: &str) -> Option<&'static str> {
        let lower = word.to_lowercase();
        CLOSED_CLASS
            .iter()
            .find(|(entry, _)| *entry == lower)
            .map(|(_, tag)| *tag)
    }

    fn tag_in_context(word: &str, previous: Option<&str>) -> &'static str {
        if let Some(tag) = Self::closed_class(word) {
            return tag;
        }

        let guess = guess_tag(word);
        match (previous, guess) {
            (Some("DT" | "PRP$" | "WP$" | "JJ"), tag) if tag.starts_with("VB") => "NN",
            (Some("TO" | "MD"), "NN" | "NNS") => "VB",
            (Some("PRP" | "NNP"), "NNS") => "VBZ",
            (Some("PRP"), "NN") => "VBP",
            (_, tag) => tag,
        }
    }
}

impl PosTagger for HeuristicTagger {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn tag(&self, tokens: &[String]) -> Result<Vec<String>, TaggerError> {
        let mut tags: Vec<String> = Vec::with_capacity(tokens.len());
        for token in tokens {
            let previous = tags.last().map(String::as_str);
            let tag = Self::tag_in_context(lookup_form(token), previous);
            tags.push(tag.to_string());
        }
        Ok(tags)
    }
}

//! Turning a transcript into clean tokens.
//!
//! ```text
//! "Hey, I'm sure it's Lenka's book"
//!   strip openers      "I'm sure it's Lenka's book"
//!   split apostrophes  [I, m, sure, it, s, Lenka, s, book]
//!   contractions       [I, am, sure, it, s, Lenka, s, book]
//!   resolve 's         [I, am, sure, it, Lenka, book]
//! ```

use std::slice;

use tracing::{debug, trace};

use crate::tagger::PosTagger;

/// Phrases that open a turn without carrying content.
const OPENERS: [&str; 6] = ["Leolani", "Sorry", "Excuse me", "Hey", "Hello", "Hi"];

/// Phrases that wrap a question, dropped when a question word follows.
const INTRODUCTIONS: [&str; 4] = [
    "Can you tell me",
    "Do you know",
    "Please tell me",
    "Do you maybe know",
];

const QUESTION_WORDS: [&str; 6] = ["what", "that", "who", "when", "where", "which"];

const CONTRACTIONS: [(&str, &str); 3] = [("m", "am"), ("re", "are"), ("ll", "will")];

const NEGATED_AUXILIARIES: [(&str, &str); 7] = [
    ("won", "will"),
    ("don", "do"),
    ("doesn", "does"),
    ("didn", "did"),
    ("haven", "have"),
    ("wouldn", "would"),
    ("aren", "are"),
];

/// Normalize `transcript` into tokens. `tagger` decides whether each `'s`
/// is a copula or a possessive.
pub fn normalize(transcript: &str, tagger: &dyn PosTagger) -> Vec<String> {
    let text = strip_openers(transcript);
    let mut tokens = split_tokens(text);
    expand_contractions(&mut tokens);
    resolve_clitic_s(&mut tokens, tagger);
    trace!(?tokens, "normalized");
    tokens
}

/// Remove leading openers and question introductions.
pub fn strip_openers(transcript: &str) -> &str {
    let mut text = transcript;

    for opener in OPENERS {
        for candidate in [opener.to_string(), opener.to_lowercase()] {
            if let Some(rest) = strip_phrase(text, &candidate) {
                text = rest.trim_start_matches(|c: char| c.is_whitespace() || c == ',');
            }
        }
    }

    for introduction in INTRODUCTIONS {
        for candidate in [introduction.to_string(), introduction.to_lowercase()] {
            let Some(rest) = strip_phrase(text, &candidate) else {
                continue;
            };
            let asks = rest.split_whitespace().next().is_some_and(|word| {
                let word = word.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase();
                QUESTION_WORDS.contains(&word.as_str())
            });
            if asks {
                text = rest.trim_start();
            }
        }
    }

    text
}

/// `phrase` at the start of `text`, ending on a word boundary.
fn strip_phrase<'a>(text: &'a str, phrase: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(phrase)?;
    match rest.chars().next() {
        Some(next) if next.is_alphanumeric() => None,
        _ => Some(rest),
    }
}

fn split_tokens(text: &str) -> Vec<String> {
    text.replace(['\'', '\u{2019}'], " ")
        .split_whitespace()
        .map(String::from)
        .collect()
}

fn replace_all(tokens: &mut [String], from: &str, to: &str) {
    for token in tokens.iter_mut().filter(|token| token.as_str() == from) {
        *token = to.to_string();
    }
}

fn expand_contractions(tokens: &mut [String]) {
    for (from, to) in CONTRACTIONS {
        replace_all(tokens, from, to);
    }

    if tokens.iter().any(|token| token == "t") {
        replace_all(tokens, "t", "not");
        for (from, to) in NEGATED_AUXILIARIES {
            replace_all(tokens, from, to);
        }
    }
}

/// A bare `s` left over from `'s` is `is` when the next word reads as a
/// determiner, adjective, preposition or verb, and a possessive marker to
/// drop otherwise.
fn resolve_clitic_s(tokens: &mut Vec<String>, tagger: &dyn PosTagger) {
    let mut index = 0;
    while index < tokens.len() {
        if tokens[index] != "s" {
            index += 1;
            continue;
        }

        let copula = tokens.get(index + 1).is_some_and(|next| {
            match tagger.tag(slice::from_ref(next)) {
                Ok(tags) => tags.first().is_some_and(|tag| marks_copula(tag)),
                Err(error) => {
                    debug!(%error, word = %next, "could not tag word after 's");
                    false
                }
            }
        });

        if copula {
            tokens[index] = "is".to_string();
            index += 1;
        } else {
            tokens.remove(index);
        }
    }
}

fn marks_copula(tag: &str) -> bool {
    matches!(tag, "DT" | "JJ" | "IN") || tag.starts_with('V')
}

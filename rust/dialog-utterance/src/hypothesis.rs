//! Choosing one transcript among the recognizer's alternatives.
//!
//! Speech recognition tends to garble proper names, and it garbles them
//! differently across alternatives. Before picking the most confident
//! alternative, every capitalized word that lies within a small edit distance
//! of a known name is rewritten to that name, and alternatives are reweighted
//! by how many of them agree on each name they mention.

use std::fmt;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{Result, UtteranceError};

/// One candidate transcript with the recognizer's confidence in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Hypothesis {
    pub transcript: String,
    pub confidence: f64,
}

impl Hypothesis {
    pub fn new(transcript: impl Into<String>, confidence: f64) -> Self {
        Hypothesis {
            transcript: transcript.into(),
            confidence,
        }
    }
}

impl fmt::Display for Hypothesis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<'{}' [{:.2}%]>", self.transcript, self.confidence * 100.0)
    }
}

/// Edit distance with unit costs for insertion, deletion and substitution,
/// counted in characters.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != *cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// The known name a capitalized `word` most plausibly stands for.
///
/// Words that do not start with an uppercase letter never match. Among
/// equally close names the one listed first wins.
pub fn closest_name<'n>(word: &str, names: &'n [String], max_distance: usize) -> Option<&'n str> {
    if !word.chars().next().is_some_and(char::is_uppercase) {
        return None;
    }

    let (name, distance) = names
        .iter()
        .map(|name| (name, levenshtein(name, word)))
        .min_by_key(|(_, distance)| *distance)?;

    (distance <= max_distance).then_some(name.as_str())
}

/// Rewrite names in every transcript and reweight confidences by how often
/// each matched name occurs across all hypotheses.
pub fn patch_names(hypotheses: &mut [Hypothesis], names: &[String], max_distance: usize) {
    let mut counts: IndexMap<String, usize> = IndexMap::new();

    for hypothesis in hypotheses.iter_mut() {
        let words: Vec<&str> = hypothesis
            .transcript
            .split_whitespace()
            .map(|word| match closest_name(word, names, max_distance) {
                Some(name) => {
                    *counts.entry(name.to_string()).or_default() += 1;
                    name
                }
                None => word,
            })
            .collect();
        hypothesis.transcript = words.join(" ");
    }

    let Some(most) = counts.values().copied().max() else {
        return;
    };

    for hypothesis in hypotheses.iter_mut() {
        for (name, count) in &counts {
            if hypothesis.transcript.contains(name.as_str()) {
                hypothesis.confidence *= *count as f64 / most as f64;
            }
        }
    }
}

/// Pick the hypothesis to analyze.
///
/// Names are patched first, then the most confident hypothesis wins, with
/// ties going to the earliest one.
pub fn choose_hypothesis(
    mut hypotheses: Vec<Hypothesis>,
    names: &[String],
    max_distance: usize,
) -> Result<Hypothesis> {
    if hypotheses.is_empty() {
        return Err(UtteranceError::NoHypotheses);
    }

    patch_names(&mut hypotheses, names, max_distance);

    let chosen = hypotheses
        .into_iter()
        .reduce(|best, candidate| {
            if candidate.confidence > best.confidence {
                candidate
            } else {
                best
            }
        })
        .ok_or(UtteranceError::NoHypotheses)?;

    if chosen.transcript.trim().is_empty() {
        return Err(UtteranceError::EmptyTranscript);
    }

    debug!(hypothesis = %chosen, "chose hypothesis");
    Ok(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names() -> Vec<String> {
        ["Leolani", "Thomas", "Lenka", "Piek"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn levenshtein_counts_edits() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("Thomas", "Tomas"), 1);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("", "abc"), 3);
    }

    #[test]
    fn closest_name_requires_capital() {
        assert_eq!(closest_name("Tomas", &names(), 2), Some("Thomas"));
        assert_eq!(closest_name("tomas", &names(), 2), None);
        assert_eq!(closest_name("Tomato", &names(), 1), None);
        assert_eq!(closest_name("Thomas", &[], 2), None);
    }

    #[test]
    fn closest_name_prefers_first_listed_on_tie() {
        let names = vec!["Ann".to_string(), "Anne".to_string()];
        // One edit from either.
        assert_eq!(closest_name("Annx", &names, 2), Some("Ann"));
    }

    #[test]
    fn misheard_names_are_rewritten() {
        let chosen = choose_hypothesis(vec![Hypothesis::new("Tomas  likes dogs", 0.9)], &names(), 2).unwrap();
        assert_eq!(chosen.transcript, "Thomas likes dogs");
        assert_eq!(chosen.confidence, 0.9);
    }

    #[test]
    fn agreement_on_a_name_outweighs_raw_confidence() {
        let hypotheses = vec![
            Hypothesis::new("Lenka likes dogs", 0.5),
            Hypothesis::new("Lenka likes frogs", 0.4),
            Hypothesis::new("Piek likes dogs", 0.6),
        ];

        let chosen = choose_hypothesis(hypotheses, &names(), 2).unwrap();

        assert_eq!(chosen, Hypothesis::new("Lenka likes dogs", 0.5));
    }

    #[test]
    fn reweighting_scales_by_relative_frequency() {
        let mut hypotheses = vec![
            Hypothesis::new("Lenka sings", 0.5),
            Hypothesis::new("Lenka sings", 0.5),
            Hypothesis::new("Piek sings", 0.8),
        ];
        patch_names(&mut hypotheses, &names(), 2);
        assert_eq!(hypotheses[0].confidence, 0.5);
        assert_eq!(hypotheses[2].confidence, 0.4);
    }

    #[test]
    fn ties_go_to_the_earliest_hypothesis() {
        let hypotheses = vec![Hypothesis::new("first", 0.7), Hypothesis::new("second", 0.7)];
        let chosen = choose_hypothesis(hypotheses, &names(), 2).unwrap();
        assert_eq!(chosen.transcript, "first");
    }

    #[test]
    fn lowercase_transcripts_are_untouched() {
        let mut hypotheses = vec![Hypothesis::new("tomas likes dogs", 0.3)];
        patch_names(&mut hypotheses, &names(), 2);
        assert_eq!(hypotheses[0], Hypothesis::new("tomas likes dogs", 0.3));
    }

    #[test]
    fn empty_input_is_rejected() {
        let error = choose_hypothesis(Vec::new(), &names(), 2).unwrap_err();
        assert!(matches!(error, UtteranceError::NoHypotheses));
    }

    #[test]
    fn blank_winner_is_rejected() {
        let error = choose_hypothesis(vec![Hypothesis::new("   ", 1.0)], &names(), 2).unwrap_err();
        assert!(matches!(error, UtteranceError::EmptyTranscript));
    }

    #[test]
    fn display_shows_percentage() {
        assert_eq!(Hypothesis::new("hi there", 0.95).to_string(), "<'hi there' [95.00%]>");
    }
}

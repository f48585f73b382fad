//! Exhaustive recursive-descent parsing.
//!
//! The parser expands the start symbol top-down, trying every production of
//! a nonterminal in declaration order and every split of the input among the
//! symbols of a right-hand side, backtracking on dead ends. All complete
//! derivations are returned in the order the search finds them, so the
//! first tree is the one whose choices come earliest in the grammar.
//!
//! ```text
//! expand(A, i, room)    = for each A -> X1 .. Xn:  sequence([X1 .. Xn], i, room)
//! sequence([], i, _)    = { ([], i) }
//! sequence([X, ..], i, room)
//!                       = for (node, j) in expand(X, i, room - minyield(rest)):
//!                           for (tail, k) in sequence(rest, j, room - (j - i)):
//!                             yield ([node, tail..], k)
//! ```
//!
//! `room` is the number of words a symbol may still claim. Because the rest
//! of a sequence reserves its minimum yield, a left-recursive rule such as
//! `NP -> NP PP` sees strictly less room on every recursive step and the
//! search terminates. Grammars with empty productions can still cycle; the
//! depth and step limits in [`ParseLimits`] cut those off.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::grammar::{Grammar, Symbol};
use crate::tree::{Node, Tree};

/// Resource bounds for a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseLimits {
    /// Deepest nesting of nonterminal expansions.
    pub max_depth: usize,
    /// Most right-hand-side expansions attempted before giving up.
    pub max_steps: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        ParseLimits {
            max_depth: 256,
            max_steps: 200_000,
        }
    }
}

impl ParseLimits {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }
}

/// A backtracking parser bound to a grammar.
#[derive(Debug, Clone)]
pub struct RecursiveDescentParser<'g> {
    grammar: &'g Grammar,
    limits: ParseLimits,
}

impl<'g> RecursiveDescentParser<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        RecursiveDescentParser {
            grammar,
            limits: ParseLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: ParseLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Derive every parse of `words` from the start symbol.
    ///
    /// An empty vector means the grammar derives no tree for the input.
    pub fn parse<T: AsRef<str>>(&self, words: &[T]) -> Result<Vec<Tree>, ParseError> {
        let uncovered = self.grammar.uncovered(words);
        if !uncovered.is_empty() {
            return Err(ParseError::Uncovered { words: uncovered });
        }

        let words: Vec<&str> = words.iter().map(AsRef::as_ref).collect();
        let mut search = Search {
            grammar: self.grammar,
            words: &words,
            limits: self.limits,
            steps: 0,
        };

        let start = Symbol::Nonterminal(self.grammar.start().to_string());
        let trees = search
            .expand(&start, 0, words.len(), 0)?
            .into_iter()
            .filter(|(_, end)| *end == words.len())
            .filter_map(|(node, _)| match node {
                Node::Tree(tree) => Some(tree),
                Node::Leaf(_) => None,
            })
            .collect();

        Ok(trees)
    }
}

struct Search<'a> {
    grammar: &'a Grammar,
    words: &'a [&'a str],
    limits: ParseLimits,
    steps: usize,
}

type Partial = (Vec<Node>, usize);

impl Search<'_> {
    /// Every way `symbol` can derive a prefix of `words[start..]` no longer
    /// than `room`, paired with the position just after it.
    fn expand(
        &mut self,
        symbol: &Symbol,
        start: usize,
        room: usize,
        depth: usize,
    ) -> Result<Vec<(Node, usize)>, ParseError> {
        match symbol {
            Symbol::Terminal(word) => {
                let matched = room >= 1 && self.words.get(start).is_some_and(|w| *w == word.as_str());
                Ok(if matched {
                    vec![(Node::Leaf(word.clone()), start + 1)]
                } else {
                    Vec::new()
                })
            }
            Symbol::Nonterminal(label) => {
                if depth >= self.limits.max_depth {
                    return Err(ParseError::DepthExceeded {
                        limit: self.limits.max_depth,
                    });
                }

                let grammar = self.grammar;
                let mut results = Vec::new();
                for production in grammar.productions_for(label) {
                    for (children, end) in self.sequence(&production.rhs, start, room, depth + 1)? {
                        results.push((Node::Tree(Tree::new(label.clone(), children)), end));
                    }
                }
                Ok(results)
            }
        }
    }

    /// Every way the symbols of `rhs` can derive consecutive spans starting
    /// at `start`, claiming at most `room` words together.
    fn sequence(
        &mut self,
        rhs: &[Symbol],
        start: usize,
        room: usize,
        depth: usize,
    ) -> Result<Vec<Partial>, ParseError> {
        self.steps += 1;
        if self.steps > self.limits.max_steps {
            return Err(ParseError::BudgetExhausted {
                limit: self.limits.max_steps,
            });
        }

        let Some((head, rest)) = rhs.split_first() else {
            return Ok(vec![(Vec::new(), start)]);
        };

        let Some(reserved) = self.min_yield_of(rest) else {
            return Ok(Vec::new());
        };
        let head_min = match self.grammar.min_yield(head) {
            Some(min) => min,
            None => return Ok(Vec::new()),
        };
        if head_min + reserved > room {
            return Ok(Vec::new());
        }

        let mut results = Vec::new();
        for (node, middle) in self.expand(head, start, room - reserved, depth)? {
            let consumed = middle - start;
            for (tail, end) in self.sequence(rest, middle, room - consumed, depth)? {
                let mut children = Vec::with_capacity(tail.len() + 1);
                children.push(node.clone());
                children.extend(tail);
                results.push((children, end));
            }
        }
        Ok(results)
    }

    fn min_yield_of(&self, symbols: &[Symbol]) -> Option<usize> {
        symbols
            .iter()
            .try_fold(0usize, |sum, symbol| Some(sum + self.grammar.min_yield(symbol)?))
    }
}

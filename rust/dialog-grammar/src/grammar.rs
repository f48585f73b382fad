//! Context-free grammar types and the grammar text compiler.
//!
//! Grammar text uses the conventional production notation:
//!
//! ```text
//! # structural rules
//! S -> NP VP | VP
//! NP -> DT NN
//! # lexical rules
//! DT -> 'the'
//! NN -> 'dog' | "dog's"
//! ```
//!
//! The left-hand side of the first production is the start symbol. Lines
//! starting with `#` are comments, a trailing `\` continues a production on
//! the next line, and an empty alternative denotes the empty production.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::error::GrammarError;
use crate::tokenizer::{Token, tokenize_line};

/// A grammar symbol: either a nonterminal name or a literal word.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Nonterminal(String),
    Terminal(String),
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Nonterminal(name) => write!(f, "{name}"),
            Symbol::Terminal(word) => write!(f, "{}", quote(word)),
        }
    }
}

/// Quote a word as a terminal literal, escaping as needed so the result
/// reads back through [`tokenize_line`] unchanged.
///
/// A backslash always escapes the next character inside a literal, so it is
/// doubled whichever quote character is chosen.
pub fn quote(word: &str) -> String {
    let escaped = word.replace('\\', "\\\\");
    if !word.contains('\'') {
        format!("'{escaped}'")
    } else if !word.contains('"') {
        format!("\"{escaped}\"")
    } else {
        format!("'{}'", escaped.replace('\'', "\\'"))
    }
}

/// A single production `lhs -> rhs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    pub lhs: String,
    pub rhs: Vec<Symbol>,
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->", self.lhs)?;
        for symbol in &self.rhs {
            write!(f, " {symbol}")?;
        }
        Ok(())
    }
}

/// A compiled context-free grammar.
#[derive(Debug, Clone)]
pub struct Grammar {
    start: String,
    productions: Vec<Production>,
    by_lhs: HashMap<String, Vec<usize>>,
    min_yield: HashMap<String, usize>,
    terminals: HashSet<String>,
}

impl Grammar {
    /// Build a grammar from productions. The first production's left-hand
    /// side becomes the start symbol.
    pub fn new(productions: Vec<Production>) -> Result<Self, GrammarError> {
        let start = productions
            .first()
            .map(|production| production.lhs.clone())
            .ok_or(GrammarError::Empty)?;

        let mut by_lhs: HashMap<String, Vec<usize>> = HashMap::new();
        let mut terminals = HashSet::new();
        for (index, production) in productions.iter().enumerate() {
            by_lhs.entry(production.lhs.clone()).or_default().push(index);
            for symbol in &production.rhs {
                if let Symbol::Terminal(word) = symbol {
                    terminals.insert(word.clone());
                }
            }
        }

        let min_yield = minimum_yields(&productions);

        Ok(Grammar {
            start,
            productions,
            by_lhs,
            min_yield,
            terminals,
        })
    }

    /// Compile grammar text.
    pub fn compile(text: &str) -> Result<Self, GrammarError> {
        let mut productions = Vec::new();
        let mut pending = String::new();
        let mut pending_line = 0;

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            if pending.is_empty() {
                pending_line = line;
            }
            pending.push_str(raw.trim());

            if let Some(stripped) = pending.strip_suffix('\\') {
                pending = format!("{} ", stripped.trim_end());
                continue;
            }

            let logical = std::mem::take(&mut pending);
            if logical.is_empty() || logical.starts_with('#') {
                continue;
            }
            productions.extend(read_production(&logical, pending_line)?);
        }

        if !pending.trim().is_empty() {
            productions.extend(read_production(pending.trim(), pending_line)?);
        }

        Grammar::new(productions)
    }

    /// The start symbol.
    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    /// Productions expanding `lhs`, in the order they were declared.
    pub fn productions_for<'a>(&'a self, lhs: &str) -> impl Iterator<Item = &'a Production> + 'a {
        self.by_lhs
            .get(lhs)
            .into_iter()
            .flatten()
            .map(|index| &self.productions[*index])
    }

    /// The fewest words `symbol` can derive, or `None` when it derives no
    /// finite string (for example an undefined nonterminal).
    pub fn min_yield(&self, symbol: &Symbol) -> Option<usize> {
        match symbol {
            Symbol::Terminal(_) => Some(1),
            Symbol::Nonterminal(name) => self.min_yield.get(name).copied(),
        }
    }

    /// Whether some production emits `word` as a terminal.
    pub fn covers(&self, word: &str) -> bool {
        self.terminals.contains(word)
    }

    /// The input words no terminal produces, in input order, without
    /// repeats.
    pub fn uncovered<T: AsRef<str>>(&self, words: &[T]) -> Vec<String> {
        let mut seen = HashSet::new();
        words
            .iter()
            .map(AsRef::as_ref)
            .filter(|word| !self.covers(word))
            .filter(|word| seen.insert(*word))
            .map(str::to_string)
            .collect()
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, production) in self.productions.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{production}")?;
        }
        Ok(())
    }
}

/// Read one logical line into the productions it declares.
fn read_production(text: &str, line: usize) -> Result<Vec<Production>, GrammarError> {
    let mut tokens = tokenize_line(text, line)?.into_iter();

    let lhs = match tokens.next() {
        Some(Token::Nonterminal(name)) => name,
        Some(other) => {
            return Err(GrammarError::syntax(
                line,
                format!("expected a nonterminal, found {other}"),
            ));
        }
        None => return Err(GrammarError::syntax(line, "expected a production")),
    };

    match tokens.next() {
        Some(Token::Arrow) => {}
        Some(other) => {
            return Err(GrammarError::syntax(
                line,
                format!("expected ->, found {other}"),
            ));
        }
        None => return Err(GrammarError::syntax(line, "expected -> after left-hand side")),
    }

    let mut productions = Vec::new();
    let mut rhs = Vec::new();
    for token in tokens {
        match token {
            Token::Nonterminal(name) => rhs.push(Symbol::Nonterminal(name)),
            Token::Terminal(word) => rhs.push(Symbol::Terminal(word)),
            Token::Bar => productions.push(Production {
                lhs: lhs.clone(),
                rhs: std::mem::take(&mut rhs),
            }),
            Token::Arrow => return Err(GrammarError::syntax(line, "unexpected -> in right-hand side")),
        }
    }
    productions.push(Production { lhs, rhs });

    Ok(productions)
}

/// Least number of terminals each nonterminal can derive, computed as a
/// fixpoint. Nonterminals that derive nothing finite are absent.
fn minimum_yields(productions: &[Production]) -> HashMap<String, usize> {
    let mut min: HashMap<String, usize> = HashMap::new();

    loop {
        let mut changed = false;
        for production in productions {
            let mut total = Some(0usize);
            for symbol in &production.rhs {
                let cost = match symbol {
                    Symbol::Terminal(_) => Some(1),
                    Symbol::Nonterminal(name) => min.get(name).copied(),
                };
                total = match (total, cost) {
                    (Some(sum), Some(cost)) => Some(sum + cost),
                    _ => None,
                };
                if total.is_none() {
                    break;
                }
            }

            if let Some(total) = total {
                let current = min.get(&production.lhs).copied();
                if current.is_none_or(|current| total < current) {
                    min.insert(production.lhs.clone(), total);
                    changed = true;
                }
            }
        }
        if !changed {
            return min;
        }
    }
}

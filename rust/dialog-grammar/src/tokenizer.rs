//! Tokenizer for grammar text.
//!
//! Grammar text is line oriented. Each production line is split into a
//! stream of classified tokens before the compiler in [`crate::grammar`]
//! assembles productions from them.
//!
//! Token types:
//! - **Nonterminal**: a bare symbol name (`S`, `NP`, `PRPPOS`, `V-BE`)
//! - **Terminal**: a quoted literal (`'dogs'` or `"don't"`)
//! - **Arrow**: `->`
//! - **Bar**: `|`

use std::fmt;

use crate::error::GrammarError;

/// A classified token of a grammar line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A nonterminal symbol name.
    Nonterminal(String),
    /// A quoted terminal, with quotes removed and escapes resolved.
    Terminal(String),
    /// `->`
    Arrow,
    /// `|`
    Bar,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Nonterminal(name) => write!(f, "{name}"),
            Token::Terminal(word) => write!(f, "{word:?}"),
            Token::Arrow => write!(f, "->"),
            Token::Bar => write!(f, "|"),
        }
    }
}

fn is_symbol_start(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '/'
}

fn is_symbol_char(ch: char) -> bool {
    is_symbol_start(ch) || matches!(ch, '^' | '<' | '>' | '-' | '$')
}

/// Tokenize a single logical grammar line.
///
/// `line` is the 1-based line number used in error reports.
pub fn tokenize_line(input: &str, line: usize) -> Result<Vec<Token>, GrammarError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = input.chars().collect();
    let len = chars.len();
    let mut i = 0;

    while i < len {
        let ch = chars[i];

        if ch.is_whitespace() {
            i += 1;
            continue;
        }

        // `->`
        if ch == '-' && i + 1 < len && chars[i + 1] == '>' {
            tokens.push(Token::Arrow);
            i += 2;
            continue;
        }

        // `|`
        if ch == '|' {
            tokens.push(Token::Bar);
            i += 1;
            continue;
        }

        // Quoted terminal
        if ch == '\'' || ch == '"' {
            let quote = ch;
            i += 1;
            let mut word = String::new();
            let mut closed = false;
            while i < len {
                match chars[i] {
                    '\\' if i + 1 < len => {
                        word.push(chars[i + 1]);
                        i += 2;
                    }
                    c if c == quote => {
                        closed = true;
                        i += 1;
                        break;
                    }
                    c => {
                        word.push(c);
                        i += 1;
                    }
                }
            }
            if !closed {
                return Err(GrammarError::syntax(line, "unterminated terminal literal"));
            }
            tokens.push(Token::Terminal(word));
            continue;
        }

        // Nonterminal name. `-` is allowed inside a name, but not when it
        // opens an arrow.
        if is_symbol_start(ch) {
            let start = i;
            i += 1;
            while i < len
                && is_symbol_char(chars[i])
                && !(chars[i] == '-' && i + 1 < len && chars[i + 1] == '>')
            {
                i += 1;
            }
            let name: String = chars[start..i].iter().collect();
            tokens.push(Token::Nonterminal(name));
            continue;
        }

        return Err(GrammarError::syntax(
            line,
            format!("unexpected character {ch:?}"),
        ));
    }

    Ok(tokens)
}

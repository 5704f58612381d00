use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, ErrorKind, Result};

/// How to deal with malformed input.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[non_exhaustive]
pub enum Mode {
    /// unterminated statements, blocks and strings are errors.
    Strict,
    /// incomplete input is dropped without an error.
    Lenient,
}

impl Default for Mode {
    fn default() -> Mode {
        Mode::Strict
    }
}

/// A lexical unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Semi,
    LcBrace,
    RcBrace,
    /// `"` or `'`. Only seen inside the tokenizer, the string
    /// reassembly pass folds these into `QuotedString`.
    Quote(char),
    Word(String),
    /// A quoted run, including its delimiting quote characters.
    QuotedString(String),
}

impl Token {
    fn reserved(c: char) -> Option<Token> {
        match c {
            ';' => Some(Token::Semi),
            '{' => Some(Token::LcBrace),
            '}' => Some(Token::RcBrace),
            '"' | '\'' => Some(Token::Quote(c)),
            _ => None,
        }
    }

    /// Source text of the token.
    pub fn as_str(&self) -> &str {
        match self {
            Token::Semi => ";",
            Token::LcBrace => "{",
            Token::RcBrace => "}",
            Token::Quote('"') => "\"",
            Token::Quote(_) => "'",
            Token::Word(s) | Token::QuotedString(s) => s.as_str(),
        }
    }

    pub fn is_punct(&self) -> bool {
        match self {
            Token::Word(_) | Token::QuotedString(_) => false,
            _ => true,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static RE_SPACES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s\s+").expect("could not compile RE_SPACES regexp")
});

/// Split text into logical lines.
///
/// Everything from the first `#` on a line is a comment, even inside
/// quotes. Runs of whitespace collapse to one space, lines are trimmed,
/// and lines that end up empty are dropped.
pub fn normalize(text: &str) -> Vec<String> {
    text.split('\n')
        .filter_map(|line| {
            let line = match line.find('#') {
                Some(idx) => &line[..idx],
                None => line,
            };
            let line = RE_SPACES.replace_all(line, " ");
            let line = line.trim();
            if line.is_empty() {
                None
            } else {
                Some(line.to_string())
            }
        })
        .collect()
}

#[derive(Debug)]
pub(crate) struct Tokenizer {
    mode: Mode,
}

impl Tokenizer {
    pub fn new(mode: Mode) -> Tokenizer {
        Tokenizer { mode }
    }

    /// Tokenize a whole configuration text.
    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        for line in normalize(text) {
            let line_tokens = self.tokenize_line(&line)?;
            debug!("line {:?}: {} tokens", line, line_tokens.len());
            tokens.extend(line_tokens);
        }
        Ok(tokens)
    }

    /// Tokenize one logical line.
    pub fn tokenize_line(&self, line: &str) -> Result<Vec<Token>> {
        self.join_strings(scan(line))
    }

    // Fold every quoted run into a single QuotedString token.
    fn join_strings(&self, tokens: Vec<Token>) -> Result<Vec<Token>> {
        let mut out = Vec::with_capacity(tokens.len());
        let mut run: Vec<Token> = Vec::new();
        let mut marker: Option<char> = None;

        for token in tokens {
            match marker {
                None => {
                    if let Token::Quote(q) = token {
                        marker = Some(q);
                        run.push(token);
                    } else {
                        out.push(token);
                    }
                }
                Some(m) => {
                    let closes = token == Token::Quote(m);
                    run.push(token);
                    if closes {
                        out.push(Token::QuotedString(quote_join(&run)));
                        run.clear();
                        marker = None;
                    }
                }
            }
        }

        if let Some(m) = marker {
            let text = run.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(" ");
            match self.mode {
                Mode::Strict => {
                    return Err(Error::new(
                        ErrorKind::UnterminatedString,
                        format!("missing closing {}", m),
                    ));
                }
                _ => warn!("dropping unterminated string: {}", text),
            }
        }

        Ok(out)
    }
}

// Reserved characters become their own token, whitespace separates words.
fn scan(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word = String::new();

    for c in line.chars() {
        if let Some(token) = Token::reserved(c) {
            flush(&mut word, &mut tokens);
            tokens.push(token);
        } else if c.is_whitespace() {
            flush(&mut word, &mut tokens);
        } else {
            word.push(c);
        }
    }
    flush(&mut word, &mut tokens);

    tokens
}

fn flush(word: &mut String, tokens: &mut Vec<Token>) {
    if !word.is_empty() {
        tokens.push(Token::Word(std::mem::take(word)));
    }
}

// Rejoin the tokens of a quoted run with single spaces. There is never
// a space next to a quote character, except after a nested run closes.
fn quote_join(run: &[Token]) -> String {
    let mut stack: Vec<char> = Vec::new();
    let mut s = String::new();

    for (idx, token) in run.iter().enumerate() {
        let next = run.get(idx + 1);
        let next_is_quote = matches!(next, Some(Token::Quote(_)));
        match *token {
            Token::Quote(q) => {
                let closing = stack.last() == Some(&q);
                if closing {
                    stack.pop();
                } else {
                    stack.push(q);
                }
                s.push(q);
                if closing && next.is_some() && !next_is_quote {
                    s.push(' ');
                }
            }
            ref other => {
                s.push_str(other.as_str());
                if !next_is_quote {
                    s.push(' ');
                }
            }
        }
    }
    s
}

use crate::entry::{ConfigEntry, SyntaxTree, Value};
use crate::error::{Error, ErrorKind, Result};
use crate::tokenizer::{Mode, Token};

/// Default limit on block nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

// Where we are in the current statement.
enum State {
    // No entry open, the next token is a directive.
    NoStatement,
    // Entry open, collecting arguments.
    InStatement(ConfigEntry),
    // Entry open, skipping over its block. `start` is the index of the
    // first token inside the block, `depth` the current brace depth.
    InBlockCapture {
        entry: ConfigEntry,
        start: usize,
        depth: usize,
    },
}

/// Builds the entry tree from a flat token sequence.
#[derive(Debug)]
pub(crate) struct Parser {
    mode: Mode,
    max_depth: usize,
}

impl Parser {
    pub fn new(mode: Mode, max_depth: usize) -> Parser {
        Parser { mode, max_depth }
    }

    pub fn parse(&self, tokens: &[Token]) -> Result<SyntaxTree> {
        self.parse_block(tokens, 0)
    }

    // Parse a sequence of statements. `level` is the nesting level of
    // `tokens`; block interiors are parsed by recursing on their slice
    // once the closing brace has been found.
    fn parse_block(&self, tokens: &[Token], level: usize) -> Result<SyntaxTree> {
        let mut entries = Vec::new();
        let mut state = State::NoStatement;

        for (idx, token) in tokens.iter().enumerate() {
            state = match state {
                State::NoStatement => {
                    if token.is_punct() && self.mode == Mode::Strict {
                        return Err(unexpected(token, "expected directive"));
                    }
                    State::InStatement(ConfigEntry::new(token.as_str()))
                }
                State::InStatement(entry) => match token {
                    Token::LcBrace => State::InBlockCapture {
                        entry,
                        start: idx + 1,
                        depth: 1,
                    },
                    Token::Semi => {
                        debug!("entry {:?} at level {}", entry.directive, level);
                        entries.push(entry);
                        State::NoStatement
                    }
                    Token::RcBrace if self.mode == Mode::Strict => {
                        return Err(unexpected(token, "expected argument, ';' or '{'"));
                    }
                    _ => {
                        let mut entry = entry;
                        entry.arguments.push(Value::from_token(token.clone()));
                        State::InStatement(entry)
                    }
                },
                State::InBlockCapture { mut entry, start, depth } => match token {
                    Token::LcBrace => State::InBlockCapture {
                        entry,
                        start,
                        depth: depth + 1,
                    },
                    Token::RcBrace if depth == 1 => {
                        if level + 1 > self.max_depth {
                            return Err(Error::new(
                                ErrorKind::TooDeep,
                                format!("more than {} levels", self.max_depth),
                            ));
                        }
                        debug!("block {:?}: tokens {}..{}", entry.directive, start, idx);
                        entry.block = self.parse_block(&tokens[start..idx], level + 1)?;
                        debug!("entry {:?} at level {}", entry.directive, level);
                        entries.push(entry);
                        State::NoStatement
                    }
                    Token::RcBrace => State::InBlockCapture {
                        entry,
                        start,
                        depth: depth - 1,
                    },
                    _ => State::InBlockCapture { entry, start, depth },
                },
            };
        }

        match state {
            State::NoStatement => {}
            State::InStatement(entry) => {
                self.truncated(ErrorKind::UnterminatedStatement, &entry)?;
            }
            State::InBlockCapture { entry, .. } => {
                self.truncated(ErrorKind::UnbalancedBraces, &entry)?;
            }
        }

        Ok(entries)
    }

    // Input ran out with an entry still open.
    fn truncated(&self, kind: ErrorKind, entry: &ConfigEntry) -> Result<()> {
        match self.mode {
            Mode::Strict => Err(Error::new(kind, format!("in {:?}", entry.directive))),
            _ => {
                warn!("dropping incomplete entry {:?}: {}", entry.directive, kind.as_str());
                Ok(())
            }
        }
    }
}

fn unexpected(token: &Token, what: &str) -> Error {
    Error::new(ErrorKind::UnexpectedToken, format!("{}, got '{}'", what, token))
}

use std::fmt;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// What went wrong.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[non_exhaustive]
pub enum ErrorKind {
    /// input ended while a statement was still open.
    UnterminatedStatement,
    /// input ended inside a `{ ... }` block.
    UnbalancedBraces,
    /// a line ended with a quoted string still open.
    UnterminatedString,
    /// punctuation where a directive or argument was expected.
    UnexpectedToken,
    /// blocks nested deeper than the configured maximum.
    TooDeep,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match *self {
            ErrorKind::UnterminatedStatement => "unterminated statement",
            ErrorKind::UnbalancedBraces => "unbalanced braces",
            ErrorKind::UnterminatedString => "unterminated string literal",
            ErrorKind::UnexpectedToken => "unexpected token",
            ErrorKind::TooDeep => "blocks nested too deep",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,
    pub msg: String,
}

impl Error {
    pub fn new(kind: ErrorKind, msg: impl Into<String>) -> Error {
        Error {
            kind,
            msg: msg.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.msg.is_empty() {
            write!(f, "config-text: {}", self.kind.as_str())
        } else {
            write!(f, "config-text: {}: {}", self.kind.as_str(), self.msg)
        }
    }
}

impl std::error::Error for Error {}

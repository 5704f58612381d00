use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tokenizer::Token;

/// The parsed configuration: top-level entries in source order.
pub type SyntaxTree = Vec<ConfigEntry>;

/// Argument value.
///
/// A bare word whose entire text is a base-10 integer becomes an
/// `Integer`, everything else stays a `String`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    String(String),
}

impl Value {
    pub(crate) fn from_token(token: Token) -> Value {
        match token {
            Token::Word(word) => match word.parse::<i64>() {
                Ok(n) => Value::Integer(n),
                Err(_) => Value::String(word),
            },
            Token::QuotedString(s) => Value::String(s),
            other => Value::String(other.as_str().to_string()),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            Value::Integer(_) => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match *self {
            Value::Integer(n) => Some(n),
            Value::String(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Value {
        Value::Integer(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::String(s)
    }
}

/// One statement: `directive arg arg ...;` or `directive arg ... { block }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub directive: String,
    pub arguments: Vec<Value>,
    pub block: Vec<ConfigEntry>,
}

impl ConfigEntry {
    pub fn new(directive: impl Into<String>) -> ConfigEntry {
        ConfigEntry {
            directive: directive.into(),
            arguments: Vec::new(),
            block: Vec::new(),
        }
    }

    pub fn with_args<I, V>(mut self, args: I) -> ConfigEntry
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.arguments.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn with_block(mut self, block: Vec<ConfigEntry>) -> ConfigEntry {
        self.block = block;
        self
    }

    /// True if this entry carries a non-empty block.
    pub fn is_block(&self) -> bool {
        !self.block.is_empty()
    }

    /// First entry in the block with this directive.
    pub fn find(&self, directive: &str) -> Option<&ConfigEntry> {
        self.block.iter().find(|e| e.directive == directive)
    }

    /// All entries in the block with this directive, in source order.
    pub fn find_all<'a>(&'a self, directive: &'a str) -> impl Iterator<Item = &'a ConfigEntry> + 'a {
        self.block.iter().filter(move |e| e.directive == directive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coercion() {
        assert_eq!(Value::from_token(Token::Word("80".into())), Value::Integer(80));
        assert_eq!(Value::from_token(Token::Word("-3".into())), Value::Integer(-3));
        assert_eq!(Value::from_token(Token::Word("1.5".into())), Value::from("1.5"));
        assert_eq!(Value::from_token(Token::Word("0x10".into())), Value::from("0x10"));
        assert_eq!(Value::from_token(Token::Word("10m".into())), Value::from("10m"));
        // does not fit in an i64.
        assert_eq!(
            Value::from_token(Token::Word("99999999999999999999".into())),
            Value::from("99999999999999999999")
        );
        assert_eq!(Value::from_token(Token::QuotedString("\"42\"".into())), Value::from("\"42\""));
    }

    #[test]
    fn test_find() {
        let http = ConfigEntry::new("http").with_block(vec![
            ConfigEntry::new("server").with_args(vec!["a"]),
            ConfigEntry::new("gzip").with_args(vec!["on"]),
            ConfigEntry::new("server").with_args(vec!["b"]),
        ]);
        assert!(http.is_block());
        assert_eq!(http.find("gzip").unwrap().arguments, vec![Value::from("on")]);
        assert!(http.find("listen").is_none());
        let names: Vec<String> = http
            .find_all("server")
            .map(|e| e.arguments[0].to_string())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_serialize_shape() {
        let entry = ConfigEntry::new("listen").with_args(vec![Value::from(80i64), Value::from("ssl")]);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "directive": "listen", "arguments": [80, "ssl"], "block": [] })
        );
        let back: ConfigEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }
}

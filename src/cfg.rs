use crate::entry::SyntaxTree;
use crate::error::Result;
use crate::parser::{Parser, DEFAULT_MAX_DEPTH};
use crate::tokenizer::{Mode, Token, Tokenizer};

/// Parse configuration text.
///
/// Incomplete input (a statement without `;`, a block without its
/// closing `}`, an unclosed quote) is an error. Use [`parse_lenient`]
/// or a [`Builder`] to drop incomplete entries instead.
pub fn parse(text: &str) -> Result<SyntaxTree> {
    Builder::new().parse(text)
}

/// Parse configuration text, silently dropping incomplete entries.
pub fn parse_lenient(text: &str) -> Result<SyntaxTree> {
    Builder::new().mode(Mode::Lenient).parse(text)
}

/// Parser configuration.
///
/// ```
/// use nginxconf::{Builder, Mode};
///
/// let tree = Builder::new()
///     .mode(Mode::Lenient)
///     .max_depth(8)
///     .parse("events { worker_connections 1024; }")
///     .unwrap();
/// assert_eq!(tree[0].block[0].directive, "worker_connections");
/// ```
#[derive(Debug, Clone)]
pub struct Builder {
    mode: Mode,
    max_depth: usize,
}

impl Default for Builder {
    fn default() -> Builder {
        Builder {
            mode: Mode::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Builder {
    /// Create a new builder, strict mode, default depth limit.
    pub fn new() -> Builder {
        Builder::default()
    }

    /// Set the mode.
    pub fn mode(mut self, mode: Mode) -> Builder {
        self.mode = mode;
        self
    }

    /// Maximum nesting of blocks. Deeper input fails with
    /// [`ErrorKind::TooDeep`](crate::ErrorKind::TooDeep) in either mode.
    pub fn max_depth(mut self, max_depth: usize) -> Builder {
        self.max_depth = max_depth;
        self
    }

    /// Split text into tokens, with quoted runs already joined.
    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        Tokenizer::new(self.mode).tokenize(text)
    }

    /// Parse text into a syntax tree.
    pub fn parse(&self, text: &str) -> Result<SyntaxTree> {
        let tokens = self.tokenize(text)?;
        debug!("parse: {} tokens, mode {:?}", tokens.len(), self.mode);
        Parser::new(self.mode, self.max_depth).parse(&tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{ConfigEntry, Value};
    use crate::error::ErrorKind;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_integer_argument() {
        init();
        assert_eq!(
            parse("worker_processes 4;").unwrap(),
            vec![ConfigEntry {
                directive: "worker_processes".to_string(),
                arguments: vec![Value::Integer(4)],
                block: vec![],
            }]
        );
    }

    #[test]
    fn test_string_argument() {
        init();
        assert_eq!(
            parse("server_name example.com;").unwrap(),
            vec![ConfigEntry::new("server_name").with_args(vec!["example.com"])]
        );
    }

    #[test]
    fn test_nested() {
        init();
        let tree = parse("http { server { listen 80; } }").unwrap();
        assert_eq!(tree.len(), 1);
        let http = &tree[0];
        assert_eq!(http.directive, "http");
        assert!(http.arguments.is_empty());
        assert_eq!(http.block.len(), 1);
        let server = &http.block[0];
        assert_eq!(server.directive, "server");
        assert_eq!(
            server.block,
            vec![ConfigEntry::new("listen").with_args(vec![80i64])]
        );
    }

    #[test]
    fn test_quoted_argument() {
        init();
        let tree = parse("log_format main \"$remote_addr - $remote_user\";").unwrap();
        assert_eq!(
            tree[0].arguments,
            vec![
                Value::from("main"),
                Value::from("\"$remote_addr - $remote_user\""),
            ]
        );
    }

    #[test]
    fn test_comment() {
        init();
        assert_eq!(
            parse("foo bar; # trailing comment").unwrap(),
            vec![ConfigEntry::new("foo").with_args(vec!["bar"])]
        );
    }

    #[test]
    fn test_unbalanced() {
        init();
        let err = parse("server { listen 80;").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnbalancedBraces);
        assert!(parse_lenient("server { listen 80;").unwrap().is_empty());
    }

    #[test]
    fn test_deterministic() {
        init();
        let text = r#"
            # main config
            user  www-data;
            events { worker_connections 768; }
            http {
                log_format main '$remote_addr "$request"';
                server {
                    listen 443 ssl;
                    server_name example.com www.example.com;
                    location /api { proxy_pass http://127.0.0.1:8080; }
                }
            }
        "#;
        let a = parse(text).unwrap();
        let b = parse(text).unwrap();
        assert_eq!(a, b);

        let http = &a[2];
        let server = http.find("server").unwrap();
        assert_eq!(
            server.find("listen").unwrap().arguments,
            vec![Value::from(443i64), Value::from("ssl")]
        );
        assert_eq!(
            http.find("log_format").unwrap().arguments[1],
            Value::from("'$remote_addr\"$request\"'")
        );
        let location = server.find("location").unwrap();
        assert_eq!(location.arguments, vec![Value::from("/api")]);
        assert_eq!(
            location.block[0].arguments,
            vec![Value::from("http://127.0.0.1:8080")]
        );
    }

    #[test]
    fn test_depth_limit() {
        init();
        let deep = "a { ".repeat(10) + "x;" + &" }".repeat(10);
        assert!(Builder::new().max_depth(10).parse(&deep).is_ok());
        let err = Builder::new().max_depth(9).parse(&deep).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TooDeep);
    }

    #[test]
    fn test_error_display() {
        let err = parse("user nginx").unwrap_err();
        assert_eq!(err.to_string(), "config-text: unterminated statement: in \"user\"");
    }
}

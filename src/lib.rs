//! Parser for NGINX-style configuration text.
//!
//! The text is split into logical lines (comments and surplus whitespace
//! removed), each line is tokenized, and the token stream is folded into
//! a tree of [`ConfigEntry`] values: a directive, its arguments, and an
//! optional nested block.
//!
//! ```
//! let tree = nginxconf::parse("http { server { listen 80; } }").unwrap();
//! let listen = &tree[0].block[0].block[0];
//! assert_eq!(listen.directive, "listen");
//! assert_eq!(listen.arguments[0].as_integer(), Some(80));
//! ```
#[macro_use]
extern crate log;

mod cfg;
mod entry;
mod error;
mod parser;
mod tokenizer;

pub use cfg::{parse, parse_lenient, Builder};
pub use entry::{ConfigEntry, SyntaxTree, Value};
pub use error::{Error, ErrorKind, Result};
pub use parser::DEFAULT_MAX_DEPTH;
pub use tokenizer::{normalize, Mode, Token};

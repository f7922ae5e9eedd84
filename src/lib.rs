//! jsonette - a small recursive-descent JSON parser.
//!
//! Converts a complete in-memory JSON document into a value tree, or
//! fails with an error carrying the byte offset of the first offending
//! character. Parsing is single-shot and synchronous; independent parses
//! share no state and may run on separate threads.
//!
//! # Architecture
//!
//! - [`lexer`] - Tokenizer with whitespace, escape, and number handling
//! - [`parser`] - Recursive descent over the token stream
//! - [`value`] - The parsed value tree
//! - [`limits`] - Nesting-depth guard configuration
//! - [`error`] - Offset-tracked parse errors
//!
//! # Example
//!
//! ```
//! use jsonette::{parse, Value};
//!
//! let value = parse(r#"{"name": "ivan", "ages": [21, 23]}"#).unwrap();
//! assert_eq!(value.get("name").and_then(Value::as_str), Some("ivan"));
//! assert_eq!(
//!     value.get("ages").and_then(|a| a.get_index(1)),
//!     Some(&Value::Number(23.0))
//! );
//! ```

// Library code must avoid unwrap/expect/panic; errors propagate as
// ParseError. Tests are checked separately with `cargo test`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod error;
pub mod lexer;
pub mod limits;
pub mod parser;
pub mod value;

// Re-export commonly used items
pub use error::{ErrorKind, ParseError, ParseResult};
pub use limits::Limits;
pub use parser::{parse, parse_with_limits};
pub use value::Value;

//! Line Protocol Implementation
//!
//! This module defines the command vocabulary, the structured form of a
//! request, the response envelope, and the parser between raw lines and
//! commands.
//!
//! ## Modules
//!
//! - `types`: `CommandKind`, `Command` and `Response`
//! - `parser`: whitespace tokenizer and command parser
//!
//! ## Example
//!
//! ```
//! use linekv::protocol::{parse_line, Response};
//! use bytes::Bytes;
//!
//! // Parsing an incoming line
//! let cmd = parse_line(b"GET name").unwrap();
//! assert_eq!(cmd.key(), &Bytes::from("name"));
//!
//! // Rendering a response
//! let response = Response::value(Bytes::from("Ariz"));
//! assert_eq!(response.render(), b"Ariz");
//! ```

pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use parser::{parse_line, parse_tokens};
pub use types::{Command, CommandKind, Response};

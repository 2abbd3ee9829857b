//! Centralized error handling for jsonwrap.
//!
//! Every failure the engine can produce is a [`WrapError`] returned through the
//! [`Result`] alias. Nothing in the library panics: allocation refusals, malformed
//! text and (in strict mode) mistyped documents all come back as values the caller
//! decides how to surface.
//!
//! ## Error Categories
//!
//! - **Allocation** ([`WrapError::Alloc`]): the allocate hook refused a request, or the
//!   platform allocator could not reserve the owned buffer.
//! - **Parse** ([`WrapError::Parse`]): the JSON text was not a valid document.
//! - **Type** ([`WrapError::Type`]): a strict-mode decode met a node of the wrong shape.
//!   The error carries the field path, e.g. `sons[1].age`.
//! - **Serialization** ([`WrapError::Serialization`]): the document printer failed.
//! - **I/O** ([`WrapError::Io`]): reading or writing a record file.
//!
//! ## Partial Mutation
//!
//! Decode and copy stop at the first failure. The destination record keeps whatever
//! was written up to that point and still owns it, so recycling it afterwards
//! releases everything correctly.
//!
//! ```rust
//! use jsonwrap::{JsonWrap, WrapError, record, Text};
//!
//! record! {
//!     pub struct Tag { label: obj(Text) }
//! }
//!
//! let cx = JsonWrap::default();
//! let mut tag = Tag::default();
//! match cx.from_json("{not json", &mut tag) {
//!     Err(WrapError::Parse(msg)) => eprintln!("bad input: {msg}"),
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

use serde_json::Value;
use std::fmt;
use std::io;
use std::sync::Arc;

/// A specialized `Result` type for jsonwrap operations.
pub type Result<T> = std::result::Result<T, WrapError>;

/// The error enum covering every failure domain of the engine.
///
/// The type is `Clone` so a failed decode can be stored next to the record it was
/// decoding into. I/O errors are wrapped in `Arc` for that reason.
#[derive(Debug, Clone)]
pub enum WrapError {
    /// An owned buffer could not be obtained.
    ///
    /// Raised when the installed allocate hook refuses the request or when the
    /// platform allocator fails to reserve the memory. `requested` is the size in
    /// bytes the engine asked for (Text buffers count their terminator).
    Alloc {
        /// Bytes requested from the allocator hook.
        requested: usize,
    },

    /// The input text is not a well-formed JSON document.
    Parse(String),

    /// A node had the wrong shape for the field it was decoded into.
    ///
    /// Only produced when strict decoding is enabled; lenient decoding converts or
    /// skips instead.
    Type {
        /// Dotted/indexed path of the offending field (`son.name`, `sons[1].age`).
        /// Empty when the root node itself was rejected.
        path: String,
        /// The node kind the field accepts.
        expected: &'static str,
        /// The node kind that was found.
        found: &'static str,
    },

    /// The document printer failed to produce text.
    Serialization(String),

    /// File-level I/O failure while saving or loading a record.
    Io(Arc<io::Error>),
}

impl WrapError {
    /// Builds a type error for `node` with an empty path.
    pub(crate) fn mismatch(expected: &'static str, node: &Value) -> Self {
        Self::Type {
            path: String::new(),
            expected,
            found: node_kind(node),
        }
    }

    /// Builds a type error for a numeric node that is not representable.
    pub(crate) fn out_of_range(expected: &'static str) -> Self {
        Self::Type {
            path: String::new(),
            expected,
            found: "out-of-range number",
        }
    }

    /// Prefixes the path of a type error with a named field segment.
    ///
    /// Other variants pass through unchanged.
    #[must_use]
    pub fn at_field(self, name: &str) -> Self {
        match self {
            Self::Type {
                path,
                expected,
                found,
            } => {
                let path = if path.is_empty() {
                    name.to_string()
                } else if path.starts_with('[') {
                    format!("{name}{path}")
                } else {
                    format!("{name}.{path}")
                };
                Self::Type {
                    path,
                    expected,
                    found,
                }
            }
            other => other,
        }
    }

    /// Prefixes the path of a type error with an array index segment.
    #[must_use]
    pub fn at_index(self, index: usize) -> Self {
        match self {
            Self::Type {
                path,
                expected,
                found,
            } => {
                let path = if path.is_empty() || path.starts_with('[') {
                    format!("[{index}]{path}")
                } else {
                    format!("[{index}].{path}")
                };
                Self::Type {
                    path,
                    expected,
                    found,
                }
            }
            other => other,
        }
    }
}

/// Names the kind of a document node for diagnostics.
pub(crate) fn node_kind(node: &Value) -> &'static str {
    match node {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl fmt::Display for WrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alloc { requested } => {
                write!(f, "Allocation Error: could not obtain {requested} bytes")
            }
            Self::Parse(s) => write!(f, "Parse Error: {s}"),
            Self::Type {
                path,
                expected,
                found,
            } if path.is_empty() => {
                write!(f, "Type Error at root: expected {expected}, found {found}")
            }
            Self::Type {
                path,
                expected,
                found,
            } => write!(f, "Type Error at '{path}': expected {expected}, found {found}"),
            Self::Serialization(s) => write!(f, "Serialization Error: {s}"),
            Self::Io(e) => write!(f, "I/O Error: {e}"),
        }
    }
}

impl std::error::Error for WrapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for WrapError {
    fn from(err: io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}

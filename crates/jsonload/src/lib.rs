//! Strict, whole-document JSON parsing over pull-based byte sources.
//!
//! `jsonload` reads JSON text from a byte source, validates it against
//! the strict grammar, and builds an in-memory [`Value`] tree. Parsing
//! is all-or-nothing: the first syntax error aborts with a diagnostic
//! carrying the 1-based line and the raw text near the failure, and no
//! partial tree is ever returned.
//!
//! ```
//! use jsonload::{Value, load_str};
//!
//! let v = load_str(r#"{"name": "jsonload", "major": 0}"#).unwrap();
//! assert_eq!(v.get("major"), Some(&Value::Integer(0)));
//!
//! let err = load_str("{\n  \"a\": }").unwrap_err();
//! assert_eq!(err.to_string(), "unexpected token near '}'");
//! assert_eq!(err.line, Some(2));
//! ```
//!
//! A document must root at an object or an array; a bare scalar is
//! rejected. Object member order is preserved exactly as written, and a
//! repeated key keeps the last value. `\uXXXX` escapes are recognized
//! syntactically but not decoded and fail the parse.
//!
//! Construction can be redirected into a caller-supplied value model by
//! implementing [`ValueFactory`] and parsing with [`load_source_with`].
//!
//! Nesting depth is bounded only by the call stack: each nested
//! container costs one stack frame, so adversarial deeply-nested input
//! can overflow it. Callers that must survive such input should impose
//! their own depth check before parsing.

#![no_std]
extern crate alloc;

#[cfg(any(feature = "std", test))]
extern crate std;

mod error;
mod factory;
mod lexer;
mod parser;
mod stream;
mod value;

#[cfg(test)]
mod tests;

pub use error::ParseError;
pub use factory::{StdFactory, ValueFactory};
#[cfg(feature = "std")]
pub use stream::ReadSource;
pub use stream::{ByteSource, SliceSource};
pub use value::{Array, Map, Value};

use parser::Parser;

/// Parses a complete JSON document from a string.
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first syntax error.
pub fn load_str(input: &str) -> Result<Value, ParseError> {
    load_slice(input.as_bytes())
}

/// Parses a complete JSON document from a byte slice.
///
/// The bytes must be UTF-8; malformed sequences fail the parse as
/// invalid tokens.
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first syntax error.
pub fn load_slice(input: &[u8]) -> Result<Value, ParseError> {
    load_source(SliceSource::new(input))
}

/// Parses a complete JSON document from any [`ByteSource`].
///
/// This is the primitive the other entry points are built on, using the
/// default value model.
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first syntax error.
pub fn load_source<S: ByteSource>(source: S) -> Result<Value, ParseError> {
    load_source_with(source, &StdFactory)
}

/// Parses a complete JSON document, building the tree through `factory`.
///
/// On success, ownership of the completed tree transfers to the caller.
/// On failure, everything the factory produced has been dropped.
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first syntax error.
pub fn load_source_with<S: ByteSource, F: ValueFactory>(
    source: S,
    factory: &F,
) -> Result<F::Value, ParseError> {
    Parser::new(source, factory).document()
}

/// Parses a complete JSON document from the file at `path`.
///
/// # Errors
///
/// A file that cannot be opened yields a positionless [`ParseError`]
/// wrapping the operating-system error text; anything else is a syntax
/// error as with the other entry points.
#[cfg(feature = "std")]
pub fn load_file<P: AsRef<std::path::Path>>(path: P) -> Result<Value, ParseError> {
    use alloc::format;

    let path = path.as_ref();
    match std::fs::File::open(path) {
        Ok(file) => load_reader(std::io::BufReader::new(file)),
        Err(e) => Err(ParseError::without_position(format!(
            "unable to open {}: {e}",
            path.display()
        ))),
    }
}

/// Parses a complete JSON document from any [`std::io::Read`].
///
/// The reader is pulled a byte at a time; wrap slow readers in a
/// [`std::io::BufReader`].
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first syntax error.
#[cfg(feature = "std")]
pub fn load_reader<R: std::io::Read>(reader: R) -> Result<Value, ParseError> {
    load_source(ReadSource::new(reader))
}

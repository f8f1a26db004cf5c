use alloc::{format, string::String};

/// Upper bound on the formatted diagnostic text, in bytes.
const ERROR_TEXT_LENGTH: usize = 160;

/// A parse failure: what went wrong and where.
///
/// `line` is 1-based and counts every newline consumed before the failure,
/// including newlines inside skipped whitespace. It is `None` only when the
/// failure happened before any input was read, such as a file that could
/// not be opened. `column` is reserved and never populated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{msg}")]
pub struct ParseError {
    msg: String,
    /// 1-based line of the failure, or `None` when no position exists.
    pub line: Option<usize>,
    /// Reserved; never populated.
    pub column: Option<usize>,
}

impl ParseError {
    /// A diagnostic anchored to lexer state: the failing token's raw text
    /// is appended as context, or "near end of file" when nothing remains.
    pub(crate) fn at(line: usize, raw_text: &str, msg: &str) -> Self {
        let text = if raw_text.is_empty() {
            format!("{msg} near end of file")
        } else {
            format!("{msg} near '{raw_text}'")
        };
        Self {
            msg: bounded(text),
            line: Some(line),
            column: None,
        }
    }

    /// A diagnostic with no position, used before any token exists.
    pub(crate) fn without_position(msg: String) -> Self {
        Self {
            msg: bounded(msg),
            line: None,
            column: None,
        }
    }

    /// The formatted diagnostic message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.msg
    }
}

/// Truncates `text` to [`ERROR_TEXT_LENGTH`] bytes on a character boundary.
fn bounded(mut text: String) -> String {
    if text.len() > ERROR_TEXT_LENGTH {
        let mut end = ERROR_TEXT_LENGTH;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
    }
    text
}

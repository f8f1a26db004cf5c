//! Tokenizer for the JSON grammar.
//!
//! [`Lexer::scan`] classifies the next run of input into a [`Token`],
//! keeping the exact raw text consumed for it. The raw text backs the
//! "near '...'" context in diagnostics; it is cleared at the start of
//! every scan and always mirrors the characters of the current token.

use alloc::string::String;

use crate::stream::{ByteSource, ByteStream, StreamChar};

/// A classified unit of lexical input.
///
/// Scalar kinds carry their decoded payload. The payload lives until the
/// next `scan` replaces the token, so callers copy out what they need
/// before scanning again.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Colon,
    Comma,
    String(String),
    Integer(i64),
    Real(f64),
    True,
    False,
    Null,
    Invalid,
    Eof,
}

/// States of the number scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberState {
    /// After a leading `-`.
    Sign,
    /// After a leading `0`; another digit here breaks the leading-zero
    /// rule.
    Zero,
    /// Inside the integer digit run.
    Integer,
    /// After `.`; a digit is mandatory.
    DecimalPoint,
    /// Inside the fraction digit run.
    Fraction,
    /// After `e`/`E`; a sign or digit is mandatory.
    ExponentMark,
    /// After the exponent sign; a digit is mandatory.
    ExponentSign,
    /// Inside the exponent digit run.
    Exponent,
}

pub(crate) struct Lexer<S> {
    stream: ByteStream<S>,
    pub(crate) token: Token,
    saved_text: String,
    /// 1-based, incremented on every newline consumed.
    pub(crate) line: usize,
}

impl<S: ByteSource> Lexer<S> {
    pub(crate) fn new(source: S) -> Self {
        Self {
            stream: ByteStream::new(source),
            token: Token::Invalid,
            saved_text: String::new(),
            line: 1,
        }
    }

    /// The raw source text of the current token.
    pub(crate) fn raw_text(&self) -> &str {
        &self.saved_text
    }

    fn save(&mut self, c: StreamChar) {
        match c {
            StreamChar::Char(ch) => self.saved_text.push(ch),
            // No character survives a malformed sequence; keep a visible
            // stand-in so diagnostics show where the scan stopped.
            StreamChar::Invalid => self.saved_text.push(char::REPLACEMENT_CHARACTER),
            StreamChar::EndOfInput => {}
        }
    }

    fn get_save(&mut self) -> StreamChar {
        let c = self.stream.next();
        self.save(c);
        c
    }

    /// Pushes `c` back to the stream and drops it from the saved text.
    fn unget_unsave(&mut self, c: StreamChar) {
        self.stream.unget(c);
        let expected = match c {
            StreamChar::Char(ch) => ch,
            StreamChar::Invalid => char::REPLACEMENT_CHARACTER,
            StreamChar::EndOfInput => return,
        };
        let popped = self.saved_text.pop();
        debug_assert_eq!(popped, Some(expected), "unsaved a character that was not saved");
    }

    /// Produces the next token.
    ///
    /// Replacing the current token here also drops the previous token's
    /// decoded payload.
    pub(crate) fn scan(&mut self) -> &Token {
        self.saved_text.clear();
        self.token = Token::Invalid;

        let mut c = self.stream.next();
        loop {
            match c {
                StreamChar::Char('\n') => {
                    self.line += 1;
                    c = self.stream.next();
                }
                StreamChar::Char(' ' | '\t' | '\r') => c = self.stream.next(),
                _ => break,
            }
        }

        if c == StreamChar::EndOfInput {
            self.token = Token::Eof;
            return &self.token;
        }

        self.save(c);

        match c {
            StreamChar::Char('{') => self.token = Token::LeftBrace,
            StreamChar::Char('}') => self.token = Token::RightBrace,
            StreamChar::Char('[') => self.token = Token::LeftBracket,
            StreamChar::Char(']') => self.token = Token::RightBracket,
            StreamChar::Char(':') => self.token = Token::Colon,
            StreamChar::Char(',') => self.token = Token::Comma,
            StreamChar::Char('"') => self.scan_string(),
            StreamChar::Char(ch) if ch == '-' || ch.is_ascii_digit() => self.scan_number(ch),
            StreamChar::Char(ch) if ch.is_ascii_alphabetic() => self.scan_keyword(),
            // Anything else, malformed sequences included, is invalid.
            _ => {}
        }
        &self.token
    }

    /// Scans the rest of a string, the opening quote already saved.
    ///
    /// The raw pass collects characters up to the closing quote, shape-
    /// checking escapes as it goes; the decode pass then rewrites the raw
    /// text into the payload. An unescaped control character or a
    /// malformed sequence is pushed back before the scan stops, so the
    /// caller can tell a bad string from a truncated one.
    fn scan_string(&mut self) {
        let mut c = self.get_save();
        loop {
            match c {
                StreamChar::Char('"') => break,
                // Truncated string.
                StreamChar::EndOfInput => return,
                StreamChar::Invalid => {
                    self.unget_unsave(c);
                    return;
                }
                StreamChar::Char(ch) if (ch as u32) < 0x20 => {
                    self.unget_unsave(c);
                    return;
                }
                StreamChar::Char('\\') => {
                    c = self.get_save();
                    match c {
                        StreamChar::Char('u') => {
                            // Shape check only: exactly four hex digits.
                            // The decode pass rejects the escape anyway.
                            c = self.get_save();
                            for _ in 0..4 {
                                match c {
                                    StreamChar::Char(h) if h.is_ascii_hexdigit() => {
                                        c = self.get_save();
                                    }
                                    StreamChar::EndOfInput => return,
                                    _ => {
                                        self.unget_unsave(c);
                                        return;
                                    }
                                }
                            }
                        }
                        StreamChar::Char('"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't') => {
                            c = self.get_save();
                        }
                        StreamChar::EndOfInput => return,
                        _ => {
                            self.unget_unsave(c);
                            return;
                        }
                    }
                }
                StreamChar::Char(_) => {
                    c = self.get_save();
                }
            }
        }
        self.token = decode_string(&self.saved_text);
    }

    /// Scans a number, `first` already saved.
    ///
    /// Explicit state machine so the leading-zero rule and the mandatory
    /// digits after a decimal point and an exponent sign each have their
    /// own transition.
    fn scan_number(&mut self, first: char) {
        let mut state = match first {
            '-' => NumberState::Sign,
            '0' => NumberState::Zero,
            _ => NumberState::Integer,
        };

        loop {
            // The character after a decimal point is only kept once it
            // proves to be a digit.
            let c = if state == NumberState::DecimalPoint {
                self.stream.next()
            } else {
                self.get_save()
            };
            let ch = match c {
                StreamChar::Char(ch) => Some(ch),
                _ => None,
            };

            state = match state {
                NumberState::Sign => match ch {
                    Some('0') => NumberState::Zero,
                    Some('1'..='9') => NumberState::Integer,
                    _ => {
                        self.unget_unsave(c);
                        return;
                    }
                },
                NumberState::Zero => match ch {
                    Some('0'..='9') => {
                        // Leading zero: stop at a clean token boundary.
                        self.unget_unsave(c);
                        return;
                    }
                    Some('.') => NumberState::DecimalPoint,
                    Some('e' | 'E') => NumberState::ExponentMark,
                    _ => {
                        self.unget_unsave(c);
                        self.finish_integer();
                        return;
                    }
                },
                NumberState::Integer => match ch {
                    Some('0'..='9') => NumberState::Integer,
                    Some('.') => NumberState::DecimalPoint,
                    Some('e' | 'E') => NumberState::ExponentMark,
                    _ => {
                        self.unget_unsave(c);
                        self.finish_integer();
                        return;
                    }
                },
                NumberState::DecimalPoint => match ch {
                    Some('0'..='9') => {
                        self.save(c);
                        NumberState::Fraction
                    }
                    // A dot with no digit after it invalidates the token;
                    // the offending character goes with it.
                    _ => return,
                },
                NumberState::Fraction => match ch {
                    Some('0'..='9') => NumberState::Fraction,
                    Some('e' | 'E') => NumberState::ExponentMark,
                    _ => {
                        self.unget_unsave(c);
                        self.finish_real();
                        return;
                    }
                },
                NumberState::ExponentMark => match ch {
                    Some('+' | '-') => NumberState::ExponentSign,
                    Some('0'..='9') => NumberState::Exponent,
                    _ => {
                        self.unget_unsave(c);
                        return;
                    }
                },
                NumberState::ExponentSign => match ch {
                    Some('0'..='9') => NumberState::Exponent,
                    _ => {
                        self.unget_unsave(c);
                        return;
                    }
                },
                NumberState::Exponent => match ch {
                    Some('0'..='9') => NumberState::Exponent,
                    _ => {
                        self.unget_unsave(c);
                        self.finish_real();
                        return;
                    }
                },
            };
        }
    }

    /// Converts the saved text once the terminator has been pushed back.
    fn finish_integer(&mut self) {
        match self.saved_text.parse::<i64>() {
            Ok(n) => self.token = Token::Integer(n),
            // Magnitude beyond i64: widen rather than refuse.
            Err(_) => self.finish_real(),
        }
    }

    fn finish_real(&mut self) {
        if let Ok(n) = self.saved_text.parse::<f64>() {
            self.token = Token::Real(n);
        } else {
            // The scanner only admits text f64 can parse.
            debug_assert!(false, "number scan saved unparseable text");
        }
    }

    /// Consumes the whole letter run so the diagnostic shows the full
    /// identifier rather than its first character.
    fn scan_keyword(&mut self) {
        loop {
            match self.get_save() {
                StreamChar::Char(ch) if ch.is_ascii_alphabetic() => {}
                c => {
                    self.unget_unsave(c);
                    break;
                }
            }
        }
        self.token = match self.saved_text.as_str() {
            "true" => Token::True,
            "false" => Token::False,
            "null" => Token::Null,
            _ => Token::Invalid,
        };
    }
}

/// Rewrites a raw string scan, quotes included, into the decoded payload.
///
/// Returns [`Token::Invalid`] for any `\u` escape: Unicode escapes pass
/// the raw scan's shape check but are not supported, and the partially
/// decoded payload is dropped.
fn decode_string(raw: &str) -> Token {
    // Every escape shrinks or keeps length, so the raw text bounds the
    // decoded value.
    let inner = &raw[1..raw.len() - 1];
    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            value.push(ch);
            continue;
        }
        match chars.next() {
            Some('u') => return Token::Invalid,
            Some('"') => value.push('"'),
            Some('\\') => value.push('\\'),
            Some('/') => value.push('/'),
            Some('b') => value.push('\u{0008}'),
            Some('f') => value.push('\u{000C}'),
            Some('n') => value.push('\n'),
            Some('r') => value.push('\r'),
            Some('t') => value.push('\t'),
            _ => {
                debug_assert!(false, "unknown escape survived the raw scan");
                return Token::Invalid;
            }
        }
    }
    Token::String(value)
}

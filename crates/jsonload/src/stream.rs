//! Pull-based byte sources and the character layer above them.
//!
//! Every entry point bottoms out in a [`ByteSource`]: a callback-style
//! supplier of raw bytes with a separate exhaustion query. [`ByteStream`]
//! sits on top, assembling and validating one UTF-8 sequence at a time
//! and offering a single level of pushback to the lexer.

/// A pull source of raw bytes.
///
/// The contract is deliberately two-step: [`next_byte`] hands out bytes
/// until it returns `None`, and [`exhausted`] reports whether the end of
/// the input has truly been reached. A source may answer `None` while
/// `exhausted()` is still `false` — a reader that hit an I/O error
/// mid-stream, for example — and the stream layer treats that as an
/// invalid character rather than a clean end of input.
///
/// [`next_byte`]: ByteSource::next_byte
/// [`exhausted`]: ByteSource::exhausted
pub trait ByteSource {
    /// Returns the next raw byte, or `None` when the source cannot
    /// produce one.
    fn next_byte(&mut self) -> Option<u8>;

    /// Returns `true` once the end of the input has been reached.
    fn exhausted(&mut self) -> bool;
}

/// In-memory source over a byte slice.
#[derive(Debug)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    /// Creates a source reading `bytes` from the beginning.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }
}

impl ByteSource for SliceSource<'_> {
    fn next_byte(&mut self) -> Option<u8> {
        let b = self.bytes.get(self.pos).copied();
        if b.is_some() {
            self.pos += 1;
        }
        b
    }

    fn exhausted(&mut self) -> bool {
        self.pos >= self.bytes.len()
    }
}

/// Source pulling single bytes from any [`std::io::Read`].
///
/// Reads are not buffered here; wrap slow readers in a
/// [`std::io::BufReader`]. A read error mid-stream leaves the source
/// unexhausted with no byte to give, which the lexer rejects as an
/// invalid token.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct ReadSource<R> {
    reader: R,
    at_end: bool,
}

#[cfg(feature = "std")]
impl<R: std::io::Read> ReadSource<R> {
    /// Creates a source over `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            at_end: false,
        }
    }
}

#[cfg(feature = "std")]
impl<R: std::io::Read> ByteSource for ReadSource<R> {
    fn next_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => {
                    self.at_end = true;
                    return None;
                }
                Ok(_) => return Some(byte[0]),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(_) => return None,
            }
        }
    }

    fn exhausted(&mut self) -> bool {
        self.at_end
    }
}

/// One decoded unit handed up to the lexer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StreamChar {
    /// A validated character, multi-byte sequences included.
    Char(char),
    /// A malformed byte sequence, or a byte the source could not produce.
    Invalid,
    /// The source is exhausted.
    EndOfInput,
}

/// Expected sequence length for a UTF-8 leading byte.
///
/// Continuation bytes and bytes that can only start an overlong (`C0`,
/// `C1`) or out-of-range (`F5`..) sequence have no length.
fn sequence_length(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

/// Character reader over a [`ByteSource`] with one level of pushback.
///
/// Multi-byte sequences are read in full and validated as a unit before
/// anything is returned; overlong encodings, surrogate code points, and
/// truncated sequences come back as [`StreamChar::Invalid`], never as a
/// partial decode.
#[derive(Debug)]
pub(crate) struct ByteStream<S> {
    source: S,
    pushback: Option<StreamChar>,
    last: Option<StreamChar>,
}

impl<S: ByteSource> ByteStream<S> {
    pub(crate) fn new(source: S) -> Self {
        Self {
            source,
            pushback: None,
            last: None,
        }
    }

    /// Returns the next character, an invalid unit, or end of input.
    pub(crate) fn next(&mut self) -> StreamChar {
        let c = match self.pushback.take() {
            Some(c) => c,
            None => self.decode_next(),
        };
        self.last = Some(c);
        c
    }

    /// Pushes back the most recently returned unit.
    ///
    /// At most one unit can be pending, and `c` must be the value the
    /// last `next` call returned.
    pub(crate) fn unget(&mut self, c: StreamChar) {
        debug_assert!(self.pushback.is_none(), "double pushback");
        debug_assert_eq!(self.last, Some(c), "pushback of a unit that was not read");
        self.pushback = Some(c);
    }

    fn decode_next(&mut self) -> StreamChar {
        let Some(lead) = self.source.next_byte() else {
            return if self.source.exhausted() {
                StreamChar::EndOfInput
            } else {
                // The source claims more data exists but cannot produce
                // it; there is nothing valid to decode.
                StreamChar::Invalid
            };
        };

        let Some(len) = sequence_length(lead) else {
            return StreamChar::Invalid;
        };

        let mut buf = [lead, 0, 0, 0];
        for slot in &mut buf[1..len] {
            match self.source.next_byte() {
                Some(b) => *slot = b,
                // Truncated sequence.
                None => return StreamChar::Invalid,
            }
        }

        // from_utf8 applies the full well-formedness rules: overlong
        // encodings, surrogates, and values above U+10FFFF are rejected
        // even when the length marker was plausible.
        match core::str::from_utf8(&buf[..len]) {
            Ok(s) => s.chars().next().map_or(StreamChar::Invalid, StreamChar::Char),
            Err(_) => StreamChar::Invalid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(bytes: &[u8]) -> ByteStream<SliceSource<'_>> {
        ByteStream::new(SliceSource::new(bytes))
    }

    #[test]
    fn ascii_then_end() {
        let mut s = stream(b"ab");
        assert_eq!(s.next(), StreamChar::Char('a'));
        assert_eq!(s.next(), StreamChar::Char('b'));
        assert_eq!(s.next(), StreamChar::EndOfInput);
        assert_eq!(s.next(), StreamChar::EndOfInput);
    }

    #[test]
    fn multibyte_sequences_decode_as_units() {
        let mut s = stream("é€🎵".as_bytes());
        assert_eq!(s.next(), StreamChar::Char('é'));
        assert_eq!(s.next(), StreamChar::Char('€'));
        assert_eq!(s.next(), StreamChar::Char('🎵'));
        assert_eq!(s.next(), StreamChar::EndOfInput);
    }

    #[test]
    fn overlong_encoding_is_invalid() {
        // 0xC0 0xAF would be '/' encoded in two bytes.
        let mut s = stream(&[0xC0, 0xAF]);
        assert_eq!(s.next(), StreamChar::Invalid);
    }

    #[test]
    fn surrogate_range_is_invalid() {
        // 0xED 0xA0 0x80 encodes U+D800.
        let mut s = stream(&[0xED, 0xA0, 0x80]);
        assert_eq!(s.next(), StreamChar::Invalid);
    }

    #[test]
    fn truncated_sequence_is_invalid() {
        let mut s = stream(&[0xE2, 0x82]);
        assert_eq!(s.next(), StreamChar::Invalid);
    }

    #[test]
    fn stray_continuation_byte_is_invalid() {
        let mut s = stream(&[0x80, b'a']);
        assert_eq!(s.next(), StreamChar::Invalid);
        assert_eq!(s.next(), StreamChar::Char('a'));
    }

    #[test]
    fn out_of_range_lead_is_invalid() {
        let mut s = stream(&[0xF5, 0x80, 0x80, 0x80]);
        assert_eq!(s.next(), StreamChar::Invalid);
    }

    #[test]
    fn unget_replays_one_unit() {
        let mut s = stream(b"xy");
        let c = s.next();
        assert_eq!(c, StreamChar::Char('x'));
        s.unget(c);
        assert_eq!(s.next(), StreamChar::Char('x'));
        assert_eq!(s.next(), StreamChar::Char('y'));
    }

    #[test]
    fn unget_works_at_end_of_input() {
        let mut s = stream(b"");
        let c = s.next();
        assert_eq!(c, StreamChar::EndOfInput);
        s.unget(c);
        assert_eq!(s.next(), StreamChar::EndOfInput);
    }

    #[test]
    #[should_panic(expected = "double pushback")]
    fn double_unget_is_a_contract_violation() {
        let mut s = stream(b"ab");
        let c = s.next();
        s.unget(c);
        s.unget(c);
    }

    /// A source that runs dry without admitting exhaustion, like a
    /// reader whose underlying descriptor started failing.
    struct Failing {
        remaining: usize,
    }

    impl ByteSource for Failing {
        fn next_byte(&mut self) -> Option<u8> {
            if self.remaining > 0 {
                self.remaining -= 1;
                Some(b'1')
            } else {
                None
            }
        }

        fn exhausted(&mut self) -> bool {
            false
        }
    }

    #[test]
    fn unproduced_byte_is_invalid_not_end() {
        let mut s = ByteStream::new(Failing { remaining: 1 });
        assert_eq!(s.next(), StreamChar::Char('1'));
        assert_eq!(s.next(), StreamChar::Invalid);
    }
}

use alloc::{format, string::String, string::ToString, vec::Vec};

use quickcheck::{Arbitrary, Gen, QuickCheck};
use quickcheck_macros::quickcheck;

use crate::{Map, Value, load_slice, load_str};

/// A generated document whose serialized form round-trips exactly:
/// strings stay inside a safe alphabet, and reals always carry a
/// fractional part so they cannot re-parse as integers.
#[derive(Clone, Debug)]
struct Doc(Value);

fn safe_string(g: &mut Gen) -> String {
    let alphabet = ['a', 'b', 'z', 'A', 'Z', '0', '9', ' ', '_', 'é', '🎵'];
    let len = usize::arbitrary(g) % 8;
    (0..len).map(|_| *g.choose(&alphabet).unwrap()).collect()
}

fn arbitrary_scalar(g: &mut Gen) -> Value {
    match u8::arbitrary(g) % 5 {
        0 => Value::Null,
        1 => Value::Boolean(bool::arbitrary(g)),
        2 => Value::Integer(i64::arbitrary(g)),
        3 => Value::Real(f64::from(i16::arbitrary(g)) + 0.5),
        _ => Value::String(safe_string(g)),
    }
}

fn arbitrary_value(g: &mut Gen, depth: usize) -> Value {
    if depth == 0 || u8::arbitrary(g) % 3 == 0 {
        return arbitrary_scalar(g);
    }
    if bool::arbitrary(g) {
        let len = usize::arbitrary(g) % 4;
        Value::Array((0..len).map(|_| arbitrary_value(g, depth - 1)).collect())
    } else {
        let len = usize::arbitrary(g) % 4;
        let mut map = Map::new();
        for i in 0..len {
            // The index suffix keeps generated keys distinct.
            map.insert(format!("{}{i}", safe_string(g)), arbitrary_value(g, depth - 1));
        }
        Value::Object(map)
    }
}

impl Arbitrary for Doc {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 5;
        let root = if bool::arbitrary(g) {
            Value::Array((0..len).map(|_| arbitrary_value(g, 3)).collect())
        } else {
            let mut map = Map::new();
            for i in 0..len {
                map.insert(format!("{}{i}", safe_string(g)), arbitrary_value(g, 3));
            }
            Value::Object(map)
        };
        Doc(root)
    }
}

/// Serializing any generated document and parsing it back must
/// reproduce the tree exactly, member and element order included.
#[test]
fn document_roundtrip_quickcheck() {
    fn prop(doc: Doc) -> bool {
        let src = doc.0.to_string();
        load_str(&src) == Ok(doc.0)
    }

    QuickCheck::new()
        .tests(1_000)
        .quickcheck(prop as fn(Doc) -> bool);
}

/// Feeding arbitrary bytes must produce a value or an error, never a
/// panic.
#[quickcheck]
fn arbitrary_bytes_never_panic(bytes: Vec<u8>) -> bool {
    let _ = load_slice(&bytes);
    true
}

/// Whatever whitespace separates the tokens, the result is the same.
#[quickcheck]
fn whitespace_between_tokens_is_insignificant(pad: usize) -> bool {
    let ws = [" ", "\n", "\t", "\r\n"][pad % 4].repeat(pad % 5);
    let src = format!("{ws}{{{ws}\"a\"{ws}:{ws}[{ws}1{ws},{ws}2{ws}]{ws}}}{ws}");
    load_str(&src) == load_str(r#"{"a":[1,2]}"#)
}

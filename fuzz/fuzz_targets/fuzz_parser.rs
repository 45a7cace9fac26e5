#![no_main]

use arbitrary::Arbitrary;
use jsonpull::{ParseStatus, Parser, ParserOptions};
use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value};

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let node_type = u.choose_index(21)?;
        let value = match node_type {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3..=10 => Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            16..=20 => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
            _ => return Err(arbitrary::Error::IncorrectFormat),
        };
        Ok(ArbitraryValue(value))
    }
}

/// Splits `serialized` into boundary-safe chunks, using `split_seed` to pick
/// each chunk's length.
fn split_into_safe_chunks(serialized: &str, split_seed: u64) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let len = serialized.len();

    while start < len {
        let remaining = len - start;
        let mut size = (split_seed as usize % remaining) + 1;

        while start + size < len && !serialized.is_char_boundary(start + size) {
            size += 1;
        }

        chunks.push(&serialized[start..start + size]);
        start += size;
    }

    chunks
}

fn run(data: &[u8]) {
    if data.len() < 8 {
        return;
    }
    let split_seed = u64::from_le_bytes(data[..8].try_into().unwrap());
    let rest = &data[8..];

    let value = match ArbitraryValue::arbitrary(&mut arbitrary::Unstructured::new(rest)) {
        Ok(value) => value.0,
        Err(_) => return,
    };
    let Ok(serialized) = serde_json::to_string(&value) else {
        return;
    };

    let mut parser = Parser::new(ParserOptions::default());
    for chunk in split_into_safe_chunks(&serialized, split_seed) {
        if parser.feed(chunk.as_bytes()).is_err() {
            return;
        }
    }
    parser.finish();

    loop {
        match parser.next() {
            Ok(ParseStatus::Token(_)) => {}
            Ok(ParseStatus::Complete | ParseStatus::MoreData) | Err(_) => break,
        }
    }
}

fuzz_target!(|data: &[u8]| run(data));

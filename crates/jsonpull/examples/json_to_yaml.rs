//! Reads a JSON document from stdin and writes it back out as YAML.
//!
//! The read buffer size can be overridden with the `BUFFSIZE` environment
//! variable (default 64 bytes — deliberately tiny, to exercise the
//! incremental feeding path rather than to be efficient).
//!
//! Exit code is 0 on success, the numeric [`jsonpull::ErrorKind`] discriminant
//! on a parser error, or 255 for an I/O error unrelated to parsing.
//!
//! ```bash
//! echo '{"a":[1,2.5,null]}' | cargo run -p jsonpull --example json_to_yaml
//! ```

use std::io::Read;
use std::process::ExitCode;

use jsonpull::{ParseStatus, Parser, ParserOptions, TokenKind};
use serde_yaml::Value;

const DEFAULT_BUFFSIZE: usize = 64;

/// One partially-built container frame: the value under construction, plus
/// the pending object key waiting for its value (if we're inside an object).
enum Frame {
    Array(Vec<Value>),
    Object(Vec<(Value, Value)>, Option<String>),
}

fn push_value(stack: &mut Vec<Frame>, root: &mut Option<Value>, value: Value) {
    match stack.last_mut() {
        Some(Frame::Array(items)) => items.push(value),
        Some(Frame::Object(entries, pending_key)) => {
            let key = pending_key.take().expect("value follows a key");
            entries.push((Value::String(key), value));
        }
        None => *root = Some(value),
    }
}

fn run() -> Result<Value, jsonpull::ParserError> {
    let buffsize = std::env::var("BUFFSIZE")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_BUFFSIZE);

    let mut parser = Parser::new(ParserOptions::default());
    let mut stdin = std::io::stdin().lock();
    let mut buffer = vec![0u8; buffsize];

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<Value> = None;

    loop {
        let status = match parser.next() {
            Ok(status) => status,
            Err(err) if err.kind == jsonpull::ErrorKind::IncompleteData => {
                // `finish()` below lets an ambiguous trailing token (a bare
                // top-level number with no following delimiter) resolve;
                // `IncompleteData` is the only error `next()` can report
                // once `finished`, so it means a premature end of stream
                // rather than an ordinary parse error.
                eprintln!("error: premature end of stream");
                std::process::exit(255);
            }
            Err(err) => return Err(err),
        };
        match status {
            ParseStatus::Complete => break,
            ParseStatus::MoreData => {
                let read = stdin.read(&mut buffer).unwrap_or(0);
                if read == 0 {
                    parser.finish();
                } else {
                    parser.feed(buffer[..read].to_vec())?;
                }
            }
            ParseStatus::Token(kind) => match kind {
                TokenKind::ArrayStart => stack.push(Frame::Array(Vec::new())),
                TokenKind::ObjectStart => stack.push(Frame::Object(Vec::new(), None)),
                TokenKind::ArrayEnd => {
                    let Some(Frame::Array(items)) = stack.pop() else {
                        unreachable!("array end without a matching array frame")
                    };
                    push_value(&mut stack, &mut root, Value::Sequence(items));
                }
                TokenKind::ObjectEnd => {
                    let Some(Frame::Object(entries, _)) = stack.pop() else {
                        unreachable!("object end without a matching object frame")
                    };
                    push_value(
                        &mut stack,
                        &mut root,
                        Value::Mapping(entries.into_iter().collect()),
                    );
                }
                TokenKind::ObjectKey => {
                    let key = parser.as_string()?;
                    match stack.last_mut() {
                        Some(Frame::Object(_, pending_key)) => *pending_key = Some(key),
                        _ => unreachable!("object key outside an object frame"),
                    }
                }
                TokenKind::Null => push_value(&mut stack, &mut root, Value::Null),
                TokenKind::True => push_value(&mut stack, &mut root, Value::Bool(true)),
                TokenKind::False => push_value(&mut stack, &mut root, Value::Bool(false)),
                TokenKind::Integer => {
                    let value = match parser.as_integer() {
                        Ok(n) => Value::Number(n.into()),
                        // Out of i64 range: fall back to the literal digits.
                        Err(_) => Value::String(parser.as_str()?.to_string()),
                    };
                    push_value(&mut stack, &mut root, value);
                }
                TokenKind::Float => {
                    let value = Value::Number(parser.as_float()?.into());
                    push_value(&mut stack, &mut root, value);
                }
                TokenKind::String => {
                    let value = Value::String(parser.as_string()?);
                    push_value(&mut stack, &mut root, value);
                }
                TokenKind::None => {}
            },
        }
    }

    Ok(root.unwrap_or(Value::Null))
}

fn main() -> ExitCode {
    match run() {
        Ok(value) => match serde_yaml::to_writer(std::io::stdout(), &value) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("error: failed to write YAML: {err}");
                ExitCode::from(255)
            }
        },
        Err(err) => {
            eprintln!("parser error [{:?}]: {err}", err.kind);
            ExitCode::from(err.kind as u8)
        }
    }
}

//! A small JSON validator built on top of `jsonpull`.
//!
//! Reads a document from a file argument (or stdin when omitted), feeds it
//! to the parser in `BUFFSIZE`-byte chunks, and drains tokens until the
//! document completes or an error is found.

use std::fs::File;
use std::io::{Read, Stdin};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as ClapParser;
use jsonpull::{ParseStatus, Parser, ParserOptions};
use tracing::{debug, info, warn};

const DEFAULT_BUFFSIZE: usize = 4096;

/// Validate a JSON document read from a file or stdin.
#[derive(ClapParser)]
#[command(name = "jsonpull", version, about)]
struct Cli {
    /// Path to the JSON document to validate. Reads stdin when omitted.
    path: Option<PathBuf>,
}

enum Input {
    File(File),
    Stdin(Stdin),
}

impl Read for Input {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            Input::File(file) => file.read(buf),
            Input::Stdin(stdin) => stdin.read(buf),
        }
    }
}

fn env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .filter(|&n| n > 0)
        .unwrap_or(default)
}

fn run(cli: Cli) -> Result<(), jsonpull::ParserError> {
    let buffsize = env_usize("BUFFSIZE", DEFAULT_BUFFSIZE);
    let max_depth = env_usize("MAXDEPTH", ParserOptions::default().max_depth);
    debug!(buffsize, max_depth, "starting validation");

    let mut input = match &cli.path {
        Some(path) => {
            let file = File::open(path).unwrap_or_else(|err| {
                eprintln!("error: failed to open {}: {err}", path.display());
                std::process::exit(255);
            });
            Input::File(file)
        }
        None => Input::Stdin(std::io::stdin()),
    };

    let mut parser = Parser::new(ParserOptions { max_depth });
    let mut buffer = vec![0u8; buffsize];
    let mut tokens = 0u64;

    loop {
        match parser.next() {
            Ok(ParseStatus::Complete) => {
                info!(tokens, "document complete");
                return Ok(());
            }
            Ok(ParseStatus::Token(_)) => {
                tokens += 1;
            }
            Ok(ParseStatus::MoreData) => {
                let read = input.read(&mut buffer).unwrap_or_else(|err| {
                    eprintln!("error: failed to read input: {err}");
                    std::process::exit(255);
                });
                if read == 0 {
                    // Lets an ambiguous trailing token (a bare top-level
                    // number with no following delimiter) resolve on the
                    // next call; `IncompleteData`, the only error `next()`
                    // can report once `finished`, is caught below and
                    // treated as a premature end of stream rather than a
                    // generic parse error.
                    parser.finish();
                } else {
                    parser.feed(buffer[..read].to_vec())?;
                }
            }
            Err(err) if err.kind == jsonpull::ErrorKind::IncompleteData => {
                warn!("premature end of stream");
                eprintln!("error: premature end of stream");
                std::process::exit(255);
            }
            Err(err) => return Err(err),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            warn!(kind = ?err.kind, offset = err.offset, "parse error: {err}");
            eprintln!("{err}");
            ExitCode::from(err.kind as u8)
        }
    }
}

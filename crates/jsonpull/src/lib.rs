//! A streaming, incremental JSON pull-parser.
//!
//! The caller drives the parser by repeatedly calling [`Parser::next`]; the
//! parser yields one token at a time and signals [`ParseStatus::MoreData`]
//! when the fed input has been exhausted mid-document. No DOM tree is ever
//! built internally: scalar values are materialized lazily, on demand, from
//! [`Parser::as_integer`], [`Parser::as_float`], [`Parser::as_str`], and
//! [`Parser::as_string`].
//!
//! ```
//! use jsonpull::{ParseStatus, Parser, ParserOptions, TokenKind};
//!
//! let mut parser = Parser::new(ParserOptions::default());
//! parser.feed(br#"{"a":1}"#.as_slice()).unwrap();
//! parser.finish();
//!
//! loop {
//!     match parser.next().unwrap() {
//!         ParseStatus::Token(TokenKind::Integer) => {
//!             assert_eq!(parser.as_integer().unwrap(), 1);
//!         }
//!         ParseStatus::Complete => break,
//!         ParseStatus::MoreData => panic!("unexpected end of input"),
//!         ParseStatus::Token(_) => {}
//!     }
//! }
//! ```
#![no_std]
#![allow(missing_docs)]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod alloc_observer;
mod chunk;
mod error;
mod lexer;
mod mask;
mod options;
mod parser;
mod stack;
mod token;

#[cfg(test)]
mod tests;

pub use alloc_observer::{AllocObserver, NullAllocObserver};
pub use chunk::Chunk;
pub use error::{ErrorKind, ParserError};
pub use options::ParserOptions;
pub use parser::{ParseStatus, Parser};
pub use token::{ContainerKind, TokenKind};

//! The grammar driver (component E) and the public [`Parser`] handle.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::alloc_observer::{AllocObserver, NullAllocObserver};
use crate::chunk::{Chunk, ChunkChain};
use crate::error::{ErrorKind, ParserError};
use crate::lexer::literal::LiteralLexer;
use crate::lexer::number::{NumberLexer, NumberStep};
use crate::lexer::string::StringLexer;
use crate::lexer::Step;
use crate::mask::Expect;
use crate::options::ParserOptions;
use crate::stack::NestingStack;
use crate::token::{ContainerKind, TokenKind};

/// The outcome of a single [`Parser::next`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStatus {
    /// A token was produced; inspect it via [`Parser::token_kind`] and the
    /// value accessors.
    Token(TokenKind),
    /// The fed input was exhausted mid-document; feed more and call
    /// [`Parser::next`] again.
    MoreData,
    /// A complete, structurally balanced top-level value has been emitted
    /// and nothing but trailing whitespace remains in the chunk chain.
    Complete,
}

/// State retained across a suspended token, so the next `next()` call can
/// resume exactly where the previous one stopped rather than restart.
enum Resume {
    Literal(LiteralLexer),
    String { lexer: StringLexer, is_key: bool },
    Number(NumberLexer),
}

/// A streaming, incremental JSON pull-parser.
///
/// See the crate-level documentation for the driving loop.
pub struct Parser {
    chain: ChunkChain,
    stack: NestingStack,
    expect: Expect,
    token_kind: TokenKind,
    token_buffer: Vec<u8>,
    resume: Option<Resume>,
    finished: bool,
    emitted_top_level: bool,
    alloc_observer: Box<dyn AllocObserver + Send>,
}

impl Parser {
    /// Creates a parser with no allocation instrumentation.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self::with_alloc_observer(options, NullAllocObserver)
    }

    /// Creates a parser that reports buffer growth to `observer`.
    #[must_use]
    pub fn with_alloc_observer(options: ParserOptions, observer: impl AllocObserver + Send + 'static) -> Self {
        Self {
            chain: ChunkChain::new(),
            stack: NestingStack::new(options.max_depth),
            expect: Expect::VALUE_START,
            token_kind: TokenKind::None,
            token_buffer: Vec::new(),
            resume: None,
            finished: false,
            emitted_top_level: false,
            alloc_observer: Box::new(observer),
        }
    }

    /// Appends a chunk of input to the tail of the chunk chain.
    ///
    /// Feeding an owned `Vec<u8>`/`Box<[u8]>` is zero-copy; feeding a
    /// borrowed `&[u8]` copies it into a freshly owned chunk.
    pub fn feed(&mut self, chunk: impl Into<Chunk>) -> Result<(), ParserError> {
        self.chain.push(chunk.into());
        Ok(())
    }

    /// Marks the input as complete: no further `feed` calls are meaningful,
    /// and the parser may now report [`ParseStatus::Complete`] or an
    /// incomplete-document error instead of perpetually asking for more
    /// data.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    /// The kind of the most recently produced token, or `TokenKind::None`
    /// before the first token / after the document completes.
    #[must_use]
    pub fn token_kind(&self) -> TokenKind {
        self.token_kind
    }

    /// The current nesting depth (0 at the top level).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// The kind of container currently open at the current depth.
    #[must_use]
    pub fn container(&self) -> ContainerKind {
        self.stack.top()
    }

    /// Produces the next token, or signals that more input is needed or the
    /// document is complete.
    pub fn next(&mut self) -> Result<ParseStatus, ParserError> {
        if let Some(resume) = self.resume.take() {
            return match resume {
                Resume::Literal(lexer) => self.drive_literal(lexer),
                Resume::String { lexer, is_key } => self.drive_string(lexer, is_key),
                Resume::Number(lexer) => self.drive_number(lexer),
            };
        }

        loop {
            self.skip_whitespace();
            match self.chain.peek() {
                Some(byte) => {
                    if let Some(status) = self.dispatch(byte)? {
                        return Ok(status);
                    }
                    // A `,` or `:` was consumed; it never yields a token of
                    // its own, so loop back for the real next token.
                }
                None => {
                    return if self.stack.depth() == 0 && self.emitted_top_level {
                        Ok(ParseStatus::Complete)
                    } else if self.finished {
                        Err(ParserError::new(
                            ErrorKind::IncompleteData,
                            "input ended before the document was complete",
                            self.chain.consumed(),
                        ))
                    } else {
                        Ok(ParseStatus::MoreData)
                    };
                }
            }
        }
    }

    /// Parses the current token's raw bytes as a signed base-10 integer.
    pub fn as_integer(&self) -> Result<i64, ParserError> {
        if self.token_kind != TokenKind::Integer {
            return Err(self.no_value_error());
        }
        self.token_text()
            .parse::<i64>()
            .map_err(|_| ParserError::new(ErrorKind::OutOfRange, "integer value out of range", self.chain.consumed()))
    }

    /// Parses the current token's raw bytes as an IEEE-754 double.
    pub fn as_float(&self) -> Result<f64, ParserError> {
        if !matches!(self.token_kind, TokenKind::Integer | TokenKind::Float) {
            return Err(self.no_value_error());
        }
        let value: f64 = self.token_text().parse().map_err(|_| {
            ParserError::new(
                ErrorKind::OutOfRange,
                "value is not representable as a floating point number",
                self.chain.consumed(),
            )
        })?;
        if value.is_infinite() {
            return Err(ParserError::new(ErrorKind::OutOfRange, "float value out of range", self.chain.consumed()));
        }
        Ok(value)
    }

    /// Borrows the current token's raw text: the decoded string value for
    /// `String`/`ObjectKey` tokens, or the literal source digits for
    /// `Integer`/`Float` tokens (the fallback for a value that overflowed
    /// `as_integer`/`as_float`). Valid until the next call to
    /// [`Parser::next`].
    pub fn as_str(&self) -> Result<&str, ParserError> {
        if !matches!(
            self.token_kind,
            TokenKind::String | TokenKind::ObjectKey | TokenKind::Integer | TokenKind::Float
        ) {
            return Err(self.no_value_error());
        }
        Ok(self.token_text())
    }

    /// Returns an owned copy of [`Parser::as_str`]'s value.
    pub fn as_string(&self) -> Result<String, ParserError> {
        self.as_str().map(String::from)
    }

    fn token_text(&self) -> &str {
        core::str::from_utf8(&self.token_buffer).expect("token buffer always holds valid UTF-8")
    }

    fn no_value_error(&self) -> ParserError {
        ParserError::new(
            ErrorKind::NoValue,
            "no value is available for the current token",
            self.chain.consumed(),
        )
    }

    fn skip_whitespace(&mut self) {
        while let Some(byte) = self.chain.peek() {
            if matches!(byte, b' ' | b'\t' | b'\r' | b'\n') {
                self.chain.advance();
            } else {
                break;
            }
        }
    }

    /// Classifies one byte and drives the matching recognizer. Returns
    /// `Ok(None)` for structural punctuation (`,` / `:`) that updates
    /// expectation without itself yielding a token.
    fn dispatch(&mut self, byte: u8) -> Result<Option<ParseStatus>, ParserError> {
        let offset = self.chain.consumed();
        match byte {
            b'{' => self.open(ContainerKind::Object, TokenKind::ObjectStart, offset).map(Some),
            b'[' => self.open(ContainerKind::Array, TokenKind::ArrayStart, offset).map(Some),
            b'}' => self.close(ContainerKind::Object, TokenKind::ObjectEnd, offset).map(Some),
            b']' => self.close(ContainerKind::Array, TokenKind::ArrayEnd, offset).map(Some),
            b'"' => self.begin_string(offset),
            b',' => self.comma(offset),
            b':' => self.colon(offset),
            b't' => self.begin_literal(TokenKind::True, offset),
            b'f' => self.begin_literal(TokenKind::False, offset),
            b'n' => self.begin_literal(TokenKind::Null, offset),
            b'0'..=b'9' | b'+' | b'-' => self.begin_number(byte, offset),
            _ => Err(unexpected_at(offset)),
        }
    }

    fn open(&mut self, kind: ContainerKind, token: TokenKind, offset: usize) -> Result<ParseStatus, ParserError> {
        if !self.expect.contains(token.bit()) {
            return Err(unexpected_at(offset));
        }
        self.chain.advance();
        self.stack.push(kind, offset)?;
        self.expect = match kind {
            ContainerKind::Object => Expect::OBJECT_KEY | Expect::OBJECT_END,
            ContainerKind::Array => Expect::VALUE_START | Expect::ARRAY_END,
            ContainerKind::None => unreachable!("open() is only called with Array/Object"),
        };
        self.set_current_token(token);
        Ok(ParseStatus::Token(token))
    }

    fn close(&mut self, kind: ContainerKind, token: TokenKind, offset: usize) -> Result<ParseStatus, ParserError> {
        if !self.expect.contains(token.bit()) || self.stack.top() != kind {
            return Err(unexpected_at(offset));
        }
        self.chain.advance();
        self.stack.pop();
        self.finish_token(token, offset)
    }

    fn comma(&mut self, offset: usize) -> Result<Option<ParseStatus>, ParserError> {
        if !self.expect.contains(Expect::COMMA) {
            return Err(unexpected_at(offset));
        }
        self.chain.advance();
        self.expect = match self.stack.top() {
            ContainerKind::Object => Expect::OBJECT_KEY,
            ContainerKind::Array => Expect::VALUE_START,
            ContainerKind::None => return Err(internal_error(offset)),
        };
        Ok(None)
    }

    fn colon(&mut self, offset: usize) -> Result<Option<ParseStatus>, ParserError> {
        if !self.expect.contains(Expect::COLON) || self.stack.top() != ContainerKind::Object {
            return Err(unexpected_at(offset));
        }
        self.chain.advance();
        self.expect = Expect::VALUE_START;
        Ok(None)
    }

    fn begin_string(&mut self, offset: usize) -> Result<Option<ParseStatus>, ParserError> {
        let is_key = self.expect.contains(Expect::OBJECT_KEY) && self.stack.top() == ContainerKind::Object;
        let required = if is_key { Expect::OBJECT_KEY } else { Expect::STRING };
        if !self.expect.contains(required) {
            return Err(unexpected_at(offset));
        }
        self.chain.advance();
        self.token_buffer.clear();
        self.drive_string(StringLexer::new(), is_key).map(Some)
    }

    fn begin_literal(&mut self, kind: TokenKind, offset: usize) -> Result<Option<ParseStatus>, ParserError> {
        if !self.expect.contains(kind.bit()) {
            return Err(unexpected_at(offset));
        }
        self.drive_literal(LiteralLexer::new(kind)).map(Some)
    }

    fn begin_number(&mut self, first: u8, offset: usize) -> Result<Option<ParseStatus>, ParserError> {
        if !self.expect.contains(Expect::NUMBER) {
            return Err(unexpected_at(offset));
        }
        self.token_buffer.clear();
        self.chain.advance();
        let lexer = NumberLexer::new(first, offset, &mut self.token_buffer)?;
        self.drive_number(lexer).map(Some)
    }

    fn drive_literal(&mut self, mut lexer: LiteralLexer) -> Result<ParseStatus, ParserError> {
        loop {
            let Some(byte) = self.chain.peek() else {
                if self.finished {
                    return Err(ParserError::new(
                        ErrorKind::UnexpectedInput,
                        "input ended in the middle of a literal keyword",
                        self.chain.consumed(),
                    ));
                }
                self.resume = Some(Resume::Literal(lexer));
                return Ok(ParseStatus::MoreData);
            };
            let offset = self.chain.consumed();
            let step = lexer.step(byte, offset)?;
            self.chain.advance();
            if step == Step::Done {
                let kind = lexer.kind();
                return self.finish_token(kind, offset);
            }
        }
    }

    fn drive_string(&mut self, mut lexer: StringLexer, is_key: bool) -> Result<ParseStatus, ParserError> {
        loop {
            let Some(byte) = self.chain.peek() else {
                if self.finished {
                    return Err(ParserError::new(
                        ErrorKind::UnexpectedInput,
                        "input ended in the middle of a string",
                        self.chain.consumed(),
                    ));
                }
                self.resume = Some(Resume::String { lexer, is_key });
                return Ok(ParseStatus::MoreData);
            };
            let offset = self.chain.consumed();
            let cap_before = self.token_buffer.capacity();
            let step = lexer.step(byte, offset, &mut self.token_buffer)?;
            self.note_growth(cap_before);
            self.chain.advance();
            if step == Step::Done {
                let kind = if is_key { TokenKind::ObjectKey } else { TokenKind::String };
                return self.finish_token(kind, offset);
            }
        }
    }

    fn drive_number(&mut self, mut lexer: NumberLexer) -> Result<ParseStatus, ParserError> {
        loop {
            let Some(byte) = self.chain.peek() else {
                let offset = self.chain.consumed();
                if !self.finished {
                    self.resume = Some(Resume::Number(lexer));
                    return Ok(ParseStatus::MoreData);
                }
                if !lexer.is_terminable() {
                    return Err(ParserError::new(
                        ErrorKind::UnexpectedInput,
                        "input ended with a dangling sign, dot, or exponent marker",
                        offset,
                    ));
                }
                let kind = if lexer.is_float() { TokenKind::Float } else { TokenKind::Integer };
                return self.finish_token(kind, offset);
            };
            let offset = self.chain.consumed();
            let cap_before = self.token_buffer.capacity();
            let outcome = lexer.step(byte, offset, &mut self.token_buffer)?;
            self.note_growth(cap_before);
            match outcome {
                NumberStep::Continue => self.chain.advance(),
                NumberStep::Terminated => {
                    let kind = if lexer.is_float() { TokenKind::Float } else { TokenKind::Integer };
                    return self.finish_token(kind, offset);
                }
            }
        }
    }

    fn note_growth(&self, cap_before: usize) {
        let cap_after = self.token_buffer.capacity();
        if cap_after > cap_before {
            self.alloc_observer.on_grow(cap_after - cap_before);
        }
    }

    /// Common tail of every recognizer: recomputes expectation for the token
    /// just produced and records it as current. `ObjectKey` expects a colon
    /// next rather than closing out a value position; every other token
    /// kind reaching here is value-producing, so it runs through
    /// [`Parser::after_value`].
    fn finish_token(&mut self, kind: TokenKind, offset: usize) -> Result<ParseStatus, ParserError> {
        if kind == TokenKind::ObjectKey {
            self.expect = Expect::COLON;
        } else {
            #[cfg(any(test, feature = "fuzzing"))]
            assert!(kind.is_value_producing(), "every non-key token reaching finish_token closes a value");
            self.after_value(offset)?;
        }
        self.set_current_token(kind);
        Ok(ParseStatus::Token(kind))
    }

    /// Recomputes the expectation mask after a value-producing token,
    /// following invariants 4/5 of the nesting model, and marks the
    /// top-level document complete once depth returns to 0.
    fn after_value(&mut self, offset: usize) -> Result<(), ParserError> {
        if self.stack.depth() == 0 {
            self.emitted_top_level = true;
            self.expect = Expect::NONE;
            return Ok(());
        }
        self.expect = match self.stack.top() {
            ContainerKind::Object => Expect::COMMA | Expect::OBJECT_END,
            ContainerKind::Array => Expect::COMMA | Expect::ARRAY_END,
            ContainerKind::None => return Err(internal_error(offset)),
        };
        Ok(())
    }

    fn set_current_token(&mut self, kind: TokenKind) {
        self.token_kind = kind;
        if !matches!(kind, TokenKind::Integer | TokenKind::Float | TokenKind::String | TokenKind::ObjectKey) {
            self.token_buffer.clear();
        }
    }
}

fn unexpected_at(offset: usize) -> ParserError {
    ParserError::new(ErrorKind::UnexpectedInput, "byte is not legal in the current grammar position", offset)
}

fn internal_error(offset: usize) -> ParserError {
    ParserError::new(ErrorKind::Internal, "nesting stack and expectation mask disagree", offset)
}

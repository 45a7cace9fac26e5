//! Number recognizer: integer vs float classification and exponent/sign
//! handling, using the expectation submask to track which punctuation is
//! still legal.

use alloc::vec::Vec;

use crate::error::{ErrorKind, ParserError};
use crate::mask::Expect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LastAccepted {
    Digit,
    Dot,
    Exp,
    Sign,
}

/// Outcome of offering one byte to a [`NumberLexer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberStep {
    /// The byte belongs to the number; it has been consumed.
    Continue,
    /// The byte does not belong to the number. It has NOT been consumed;
    /// the caller must re-peek it as the start of the next token.
    Terminated,
}

/// Resumable number-body recognizer.
///
/// Tracks a local submask over `{Dot, Sign, Exp}`, narrowed exactly as
/// digits, `.`, `e`/`E`, and `+`/`-` are accepted, plus the kind of the last
/// accepted byte (needed to tell a clean terminator from a dangling
/// exponent/sign/dot).
#[derive(Debug)]
pub(crate) struct NumberLexer {
    local_mask: Expect,
    last: LastAccepted,
    is_float: bool,
}

impl NumberLexer {
    /// `first` is the byte that triggered number recognition (a digit, `+`,
    /// or `-`); it is folded into the lexer's initial state exactly like any
    /// other accepted byte.
    pub(crate) fn new(first: u8, offset: usize, out: &mut Vec<u8>) -> Result<Self, ParserError> {
        let mut lexer = Self {
            local_mask: Expect::DOT | Expect::SIGN | Expect::EXP,
            // Placeholder; immediately overwritten by the first `step`.
            last: LastAccepted::Sign,
            is_float: false,
        };
        match lexer.step(first, offset, out)? {
            NumberStep::Continue => Ok(lexer),
            NumberStep::Terminated => Err(ParserError::new(
                ErrorKind::UnexpectedInput,
                "number must start with a digit or sign",
                offset,
            )),
        }
    }

    pub(crate) fn is_float(&self) -> bool {
        self.is_float
    }

    /// `true` if the number accumulated so far would be valid if the input
    /// ended right now (i.e. the last accepted byte was a digit, not a
    /// dangling sign/dot/exponent marker). Only numbers have no required
    /// closing delimiter, so this is consulted when `finish()` has been
    /// called and the chunk chain runs dry mid-number.
    pub(crate) fn is_terminable(&self) -> bool {
        self.last == LastAccepted::Digit
    }

    pub(crate) fn step(
        &mut self,
        byte: u8,
        offset: usize,
        out: &mut Vec<u8>,
    ) -> Result<NumberStep, ParserError> {
        match byte {
            b'0'..=b'9' => {
                out.push(byte);
                self.local_mask = self.local_mask.remove(Expect::SIGN);
                self.last = LastAccepted::Digit;
                Ok(NumberStep::Continue)
            }
            b'.' if self.local_mask.contains(Expect::DOT) && self.last == LastAccepted::Digit => {
                out.push(byte);
                self.local_mask = self.local_mask.remove(Expect::DOT);
                self.is_float = true;
                self.last = LastAccepted::Dot;
                Ok(NumberStep::Continue)
            }
            b'e' | b'E'
                if self.local_mask.contains(Expect::EXP) && self.last == LastAccepted::Digit =>
            {
                out.push(b'e');
                self.local_mask = self.local_mask.remove(Expect::EXP).remove(Expect::DOT) | Expect::SIGN;
                self.is_float = true;
                self.last = LastAccepted::Exp;
                Ok(NumberStep::Continue)
            }
            b'+' | b'-' if self.local_mask.contains(Expect::SIGN) => {
                out.push(byte);
                self.local_mask = self.local_mask.remove(Expect::SIGN);
                self.last = LastAccepted::Sign;
                Ok(NumberStep::Continue)
            }
            _ => {
                if self.last == LastAccepted::Digit {
                    Ok(NumberStep::Terminated)
                } else {
                    Err(ParserError::new(
                        ErrorKind::UnexpectedInput,
                        "number ended with a dangling sign, dot, or exponent marker",
                        offset,
                    ))
                }
            }
        }
    }
}

//! The expectation mask (component C): a compact bitset recording which
//! lexical items are legal as the very next thing in the stream.
//!
//! This never appears in the public API; it is the grammar driver's and
//! number lexer's internal bookkeeping.

use core::ops::{BitAnd, BitOr};

/// A bitset over token kinds plus five auxiliary, non-token markers used by
/// the number lexer (`Comma`, `Colon`, `Dot`, `Sign`, `Exp`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Expect(u16);

impl Expect {
    pub(crate) const NONE: Self = Self(0);

    pub(crate) const NULL: Self = Self(1 << 0);
    pub(crate) const FALSE: Self = Self(1 << 1);
    pub(crate) const TRUE: Self = Self(1 << 2);
    /// Covers both `Integer` and `Float` tokens: which one results is
    /// decided purely by the syntax the number lexer consumes.
    pub(crate) const NUMBER: Self = Self(1 << 3);
    pub(crate) const STRING: Self = Self(1 << 4);
    pub(crate) const ARRAY_START: Self = Self(1 << 5);
    pub(crate) const ARRAY_END: Self = Self(1 << 6);
    pub(crate) const OBJECT_START: Self = Self(1 << 7);
    pub(crate) const OBJECT_KEY: Self = Self(1 << 8);
    pub(crate) const OBJECT_END: Self = Self(1 << 9);

    pub(crate) const COMMA: Self = Self(1 << 10);
    pub(crate) const COLON: Self = Self(1 << 11);
    pub(crate) const DOT: Self = Self(1 << 12);
    pub(crate) const SIGN: Self = Self(1 << 13);
    pub(crate) const EXP: Self = Self(1 << 14);

    /// Anything that may start a JSON value: a literal, a number, a string,
    /// or a nested array/object.
    pub(crate) const VALUE_START: Self = Self(
        Self::NULL.0
            | Self::FALSE.0
            | Self::TRUE.0
            | Self::NUMBER.0
            | Self::STRING.0
            | Self::ARRAY_START.0
            | Self::OBJECT_START.0,
    );

    pub(crate) const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub(crate) const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub(crate) const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub(crate) const fn remove(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl BitOr for Expect {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for Expect {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Expect;

    #[test]
    fn union_and_containment() {
        let mask = Expect::COMMA | Expect::OBJECT_END;
        assert!(mask.contains(Expect::COMMA));
        assert!(mask.contains(Expect::OBJECT_END));
        assert!(!mask.contains(Expect::COLON));
    }

    #[test]
    fn remove_clears_only_named_bit() {
        let mask = Expect::SIGN | Expect::DOT | Expect::EXP;
        let narrowed = mask.remove(Expect::SIGN);
        assert!(!narrowed.contains(Expect::SIGN));
        assert!(narrowed.contains(Expect::DOT));
        assert!(narrowed.contains(Expect::EXP));
    }

    #[test]
    fn value_start_excludes_closers_and_structural_punctuation() {
        assert!(!Expect::VALUE_START.contains(Expect::ARRAY_END));
        assert!(!Expect::VALUE_START.contains(Expect::COMMA));
        assert!(!Expect::VALUE_START.contains(Expect::OBJECT_KEY));
    }
}

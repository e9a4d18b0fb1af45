//! The gap alphabet.

use crate::alphabet::{Alphabet, Semialphabet};

/// The alphabet consisting of a single gap letter `-`.
///
/// Mostly useful as the second alternative of [`Gapped`](crate::composite::Gapped).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Gap;

impl Semialphabet for Gap {
    type Rank = u8;
    const SIZE: u64 = 1;

    #[inline(always)]
    fn to_rank(self) -> u8 {
        0
    }

    #[inline(always)]
    fn assign_rank(&mut self, rank: u8) -> &mut Self {
        debug_assert_eq!(rank, 0);
        self
    }
}

impl Alphabet for Gap {
    #[inline(always)]
    fn to_char(self) -> char {
        '-'
    }

    #[inline(always)]
    fn assign_char(&mut self, _: char) -> &mut Self {
        self
    }

    fn char_is_valid(chr: char) -> bool {
        chr == '-'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn everything_is_a_gap() {
        assert_eq!(Gap::from_char('A'), Gap);
        assert_eq!(Gap.to_char(), '-');
        assert!(Gap::from_char_strictly('A').is_err());
        assert!(Gap::from_char_strictly('-').is_ok());
    }
}

//! Quality score alphabets.

use crate::alphabet::{Alphabet, Semialphabet};

/// Phred quality scores from 0 to 41, written with the Sanger offset `!`.
///
/// Characters below `!` are clamped to score 0 and characters above `J` to score 41.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Phred42(u8);

impl Phred42 {
    /// Character of score 0.
    pub const OFFSET_CHAR: char = '!';
    /// The largest representable score.
    pub const MAX_SCORE: u8 = 41;

    /// Returns the Phred score.
    #[inline(always)]
    pub const fn phred(self) -> u8 {
        self.0
    }

    /// Sets the Phred score, clamping it to [`Self::MAX_SCORE`].
    pub fn assign_phred(&mut self, score: u8) -> &mut Self {
        self.0 = score.min(Self::MAX_SCORE);
        self
    }

    /// Creates a letter from a Phred score, clamping it to [`Self::MAX_SCORE`].
    pub fn from_phred(score: u8) -> Self {
        let mut letter = Self::default();
        letter.assign_phred(score);
        letter
    }
}

impl Semialphabet for Phred42 {
    type Rank = u8;
    const SIZE: u64 = Self::MAX_SCORE as u64 + 1;

    #[inline(always)]
    fn to_rank(self) -> u8 {
        self.0
    }

    #[inline(always)]
    fn assign_rank(&mut self, rank: u8) -> &mut Self {
        debug_assert!(rank <= Self::MAX_SCORE);
        self.0 = rank;
        self
    }
}

impl Alphabet for Phred42 {
    #[inline(always)]
    fn to_char(self) -> char {
        char::from(Self::OFFSET_CHAR as u8 + self.0)
    }

    fn assign_char(&mut self, chr: char) -> &mut Self {
        let offset = Self::OFFSET_CHAR as u32;
        let score = (chr as u32).saturating_sub(offset);
        self.0 = score.min(Self::MAX_SCORE as u32) as u8;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chars_use_sanger_offset() {
        assert_eq!(Phred42::from_rank(0).to_char(), '!');
        assert_eq!(Phred42::from_rank(41).to_char(), 'J');
        assert_eq!(Phred42::from_char('I').phred(), 40);
    }

    #[test]
    fn out_of_range_chars_are_clamped() {
        assert_eq!(Phred42::from_char(' ').phred(), 0);
        assert_eq!(Phred42::from_char('~').phred(), 41);
        assert!(!Phred42::char_is_valid('~'));
        assert!(Phred42::from_char_strictly('K').is_err());
        assert_eq!(Phred42::from_phred(60).phred(), 41);
    }
}

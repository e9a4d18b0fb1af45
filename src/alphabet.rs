//! Top module for alphabets.
//!
//! # Introduction
//!
//! An *alphabet* is a small value type with a fixed number of distinct letters.
//! Every letter has a dense *rank* in $`[0, \sigma)`$ where $`\sigma`$ is the alphabet size,
//! and most alphabets also have a character representation.
//!
//! - [`Semialphabet`] covers the rank side: [`SIZE`](Semialphabet::SIZE),
//!   [`to_rank`](Semialphabet::to_rank) and [`assign_rank`](Semialphabet::assign_rank).
//! - [`Alphabet`] adds characters: [`to_char`](Alphabet::to_char),
//!   [`assign_char`](Alphabet::assign_char) and the strict
//!   [`assign_char_strictly`](Alphabet::assign_char_strictly).
//! - [`NucleotideAlphabet`] adds [`complement`](NucleotideAlphabet::complement).
//!
//! Equality and ordering of letters always follow their ranks.
//!
//! # Letters
//!
//! | Alphabet | Size | Characters |
//! | --- | :-: | --- |
//! | [`Dna4`] | 4 | `ACGT` |
//! | [`Dna5`] | 5 | `ACGNT` |
//! | [`Rna4`] | 4 | `ACGU` |
//! | [`Gap`] | 1 | `-` |
//! | [`Mask`] | 2 | -- |
//! | [`Phred42`] | 42 | `!` to `J` |
//! | [`CigarOp`] | 9 | `MIDNSHP=X` |
//! | [`Cigar`] | $`9 \cdot 2^{28}`$ | -- |
//!
//! Composite letters built from these are found in [`crate::composite`].
//!
//! # Examples
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use seqpack::alphabet::{prelude::*, Dna4};
//!
//! let mut letter = Dna4::default();
//! assert_eq!(letter.assign_char('g').to_rank(), 2);
//! assert_eq!(letter.to_char(), 'G');
//!
//! // Unknown characters are mapped to a fallback letter...
//! assert_eq!(Dna4::from_char('!'), Dna4::A);
//! // ...unless the strict entry point is used.
//! assert!(letter.assign_char_strictly('!').is_err());
//! # Ok(())
//! # }
//! ```
pub mod cigar;
pub mod gap;
pub mod mask;
pub mod nucleotide;
pub mod quality;

pub mod prelude;

pub use cigar::{Cigar, CigarOp};
pub use gap::Gap;
pub use mask::Mask;
pub use nucleotide::{Dna4, Dna5, Rna4};
pub use quality::Phred42;

use std::fmt::{Debug, Display};
use std::hash::Hash;

use num_traits::{PrimInt, Unsigned};

use crate::error::{Error, Result};

/// Unsigned integer types usable as ranks.
pub trait RankInt: PrimInt + Unsigned + Hash + Default + Debug + Display + Send + Sync + 'static {
    /// Converts `value` into the rank type, dropping bits that do not fit.
    fn from_u64_truncating(value: u64) -> Self;

    /// Widens the rank into a [`u64`].
    fn into_u64(self) -> u64;
}

macro_rules! impl_rank_int {
    ($($t:ty),+) => {
        $(
            impl RankInt for $t {
                #[inline(always)]
                fn from_u64_truncating(value: u64) -> Self {
                    value as $t
                }

                #[inline(always)]
                fn into_u64(self) -> u64 {
                    self as u64
                }
            }
        )+
    };
}

impl_rank_int!(u8, u16, u32, u64);

/// Interface for values with a dense rank representation.
pub trait Semialphabet: Copy + Default + Eq + Ord + Hash + Debug {
    /// Type used to report ranks.
    type Rank: RankInt;

    /// The number of distinct values, i.e., the alphabet size.
    const SIZE: u64;

    /// Returns the rank of the letter, which is in `0..Self::SIZE`.
    fn to_rank(self) -> Self::Rank;

    /// Sets the letter to the one with the given `rank`.
    ///
    /// `rank` must be smaller than [`Self::SIZE`]; this is only checked in debug builds.
    fn assign_rank(&mut self, rank: Self::Rank) -> &mut Self;

    /// Creates the letter with the given `rank`.
    #[inline(always)]
    fn from_rank(rank: Self::Rank) -> Self {
        let mut letter = Self::default();
        letter.assign_rank(rank);
        letter
    }

    /// Returns the rank widened into a [`u64`].
    #[inline(always)]
    fn to_rank_u64(self) -> u64 {
        self.to_rank().into_u64()
    }

    /// Creates the letter with the given `rank` passed as a [`u64`].
    #[inline(always)]
    fn from_rank_u64(rank: u64) -> Self {
        debug_assert!(rank < Self::SIZE);
        Self::from_rank(Self::Rank::from_u64_truncating(rank))
    }
}

/// Interface for semialphabets that also have a character representation.
pub trait Alphabet: Semialphabet {
    /// Returns the character representation.
    fn to_char(self) -> char;

    /// Sets the letter from a character.
    ///
    /// Every character is accepted; characters without a lossless mapping
    /// are converted into a fallback letter chosen by the alphabet.
    fn assign_char(&mut self, chr: char) -> &mut Self;

    /// Creates a letter from a character with the same mapping as [`Self::assign_char`].
    #[inline(always)]
    fn from_char(chr: char) -> Self {
        let mut letter = Self::default();
        letter.assign_char(chr);
        letter
    }

    /// Checks whether `chr` survives `assign_char` followed by `to_char`.
    fn char_is_valid(chr: char) -> bool {
        Self::from_char(chr).to_char() == chr
    }

    /// Sets the letter from a character, rejecting characters that are not valid.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidCharAssignment`] is returned if [`Self::char_is_valid`] fails for `chr`.
    fn assign_char_strictly(&mut self, chr: char) -> Result<&mut Self> {
        if !Self::char_is_valid(chr) {
            return Err(Error::invalid_char::<Self>(chr));
        }
        Ok(self.assign_char(chr))
    }

    /// Creates a letter from a character, rejecting characters that are not valid.
    ///
    /// # Errors
    ///
    /// See [`Self::assign_char_strictly`].
    fn from_char_strictly(chr: char) -> Result<Self> {
        let mut letter = Self::default();
        letter.assign_char_strictly(chr)?;
        Ok(letter)
    }
}

/// Interface for nucleotide alphabets.
pub trait NucleotideAlphabet: Alphabet {
    /// Returns the Watson-Crick complement.
    fn complement(self) -> Self;
}

/// Returns the alphabet size of `A`.
pub const fn alphabet_size<A: Semialphabet>() -> u64 {
    A::SIZE
}

/// Returns the rank of `letter`.
#[inline(always)]
pub fn to_rank<A: Semialphabet>(letter: A) -> A::Rank {
    letter.to_rank()
}

/// Returns the character of `letter`.
#[inline(always)]
pub fn to_char<A: Alphabet>(letter: A) -> char {
    letter.to_char()
}

/// Assigns `rank` to `letter`.
#[inline(always)]
pub fn assign_rank_to<A: Semialphabet>(rank: A::Rank, letter: &mut A) -> &mut A {
    letter.assign_rank(rank)
}

/// Assigns `chr` to `letter`, mapping invalid characters to a fallback letter.
#[inline(always)]
pub fn assign_char_to<A: Alphabet>(chr: char, letter: &mut A) -> &mut A {
    letter.assign_char(chr)
}

/// Assigns `chr` to `letter`.
///
/// # Errors
///
/// See [`Alphabet::assign_char_strictly`].
pub fn assign_char_strictly_to<A: Alphabet>(chr: char, letter: &mut A) -> Result<&mut A> {
    letter.assign_char_strictly(chr)
}

/// Checks whether `chr` can be assigned to `A` without information loss.
#[inline(always)]
pub fn char_is_valid_for<A: Alphabet>(chr: char) -> bool {
    A::char_is_valid(chr)
}

/// Converts a string into letters, mapping invalid characters to fallbacks.
pub fn letters_from_str<A: Alphabet>(text: &str) -> Vec<A> {
    text.chars().map(A::from_char).collect()
}

/// Converts a string into letters.
///
/// # Errors
///
/// [`Error::InvalidCharAssignment`] is returned for the first character
/// that is not valid for `A`.
pub fn letters_from_str_strictly<A: Alphabet>(text: &str) -> Result<Vec<A>> {
    text.chars().map(A::from_char_strictly).collect()
}

/// Converts letters into a string.
pub fn letters_to_string<A, I>(letters: I) -> String
where
    A: Alphabet,
    I: IntoIterator<Item = A>,
{
    letters.into_iter().map(A::to_char).collect()
}

//! Variant alphabets holding a letter of one of several alternatives.
//!
//! The rank space of a variant is the concatenation of its alternatives' rank spaces:
//! ranks in $`[0, \sigma_A)`$ hold an `A`, ranks in $`[\sigma_A, \sigma_A + \sigma_B)`$ hold a `B`.
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::alphabet::{Alphabet, Gap, Semialphabet};
use crate::composite::Pos;

/// Interface for variants that can hold a `T` as the alternative at `Idx`.
///
/// As with [`Has`](crate::composite::Has), leaving `Idx` to inference only
/// compiles when `T` is a single alternative.
pub trait Alternative<T, Idx> {
    /// Wraps `value` into the variant.
    fn wrap(value: T) -> Self;

    /// Returns the held letter if it is of this alternative.
    fn unwrap_alternative(&self) -> Option<T>;
}

/// Variant alphabet of two alternatives.
///
/// # Examples
///
/// ```
/// use seqpack::alphabet::{Dna4, Gap, prelude::*};
/// use seqpack::composite::Gapped;
///
/// let letters: Vec<Gapped<Dna4>> = "AC-T".chars().map(Gapped::from_char).collect();
/// assert_eq!(letters[2], Gapped::<Dna4>::from_alternative(Gap));
/// assert!(letters[2].holds_alternative::<Gap, _>());
/// assert_eq!(letters[3].convert_to::<Dna4, _>(), Some(Dna4::T));
/// assert_eq!(letters[3].to_rank(), 3);
/// assert_eq!(letters[2].to_rank(), 4);
/// ```
pub struct Variant2<A, B> {
    rank: u64,
    _alternatives: PhantomData<(A, B)>,
}

/// A letter of `A` or a [`Gap`].
pub type Gapped<A> = Variant2<A, Gap>;

impl<A: Semialphabet, B: Semialphabet> Variant2<A, B> {
    const fn from_combined(rank: u64) -> Self {
        Self {
            rank,
            _alternatives: PhantomData,
        }
    }

    /// Creates a variant holding `value`.
    pub fn from_alternative<T, Idx>(value: T) -> Self
    where
        Self: Alternative<T, Idx>,
    {
        <Self as Alternative<T, Idx>>::wrap(value)
    }

    /// Checks whether the variant holds a `T`.
    pub fn holds_alternative<T, Idx>(&self) -> bool
    where
        Self: Alternative<T, Idx>,
    {
        <Self as Alternative<T, Idx>>::unwrap_alternative(self).is_some()
    }

    /// Returns the held letter as a `T`, or [`None`] if another alternative is held.
    pub fn convert_to<T, Idx>(&self) -> Option<T>
    where
        Self: Alternative<T, Idx>,
    {
        <Self as Alternative<T, Idx>>::unwrap_alternative(self)
    }

    /// Returns the index of the held alternative.
    pub fn index(&self) -> usize {
        if self.rank < A::SIZE {
            0
        } else {
            1
        }
    }
}

impl<A: Semialphabet, B: Semialphabet> Alternative<A, Pos<0>> for Variant2<A, B> {
    fn wrap(value: A) -> Self {
        Self::from_combined(value.to_rank_u64())
    }

    fn unwrap_alternative(&self) -> Option<A> {
        (self.rank < A::SIZE).then(|| A::from_rank_u64(self.rank))
    }
}

impl<A: Semialphabet, B: Semialphabet> Alternative<B, Pos<1>> for Variant2<A, B> {
    fn wrap(value: B) -> Self {
        Self::from_combined(A::SIZE + value.to_rank_u64())
    }

    fn unwrap_alternative(&self) -> Option<B> {
        (self.rank >= A::SIZE).then(|| B::from_rank_u64(self.rank - A::SIZE))
    }
}

impl<A: Semialphabet, B: Semialphabet> Semialphabet for Variant2<A, B> {
    type Rank = u64;
    const SIZE: u64 = A::SIZE + B::SIZE;

    #[inline(always)]
    fn to_rank(self) -> u64 {
        self.rank
    }

    #[inline(always)]
    fn assign_rank(&mut self, rank: u64) -> &mut Self {
        debug_assert!(rank < Self::SIZE);
        self.rank = rank;
        self
    }
}

impl<A: Alphabet, B: Alphabet> Alphabet for Variant2<A, B> {
    fn to_char(self) -> char {
        if self.rank < A::SIZE {
            A::from_rank_u64(self.rank).to_char()
        } else {
            B::from_rank_u64(self.rank - A::SIZE).to_char()
        }
    }

    /// Assigns to the first alternative for which `chr` is valid,
    /// falling back to the first alternative's conversion.
    fn assign_char(&mut self, chr: char) -> &mut Self {
        self.rank = if !A::char_is_valid(chr) && B::char_is_valid(chr) {
            A::SIZE + B::from_char(chr).to_rank_u64()
        } else {
            A::from_char(chr).to_rank_u64()
        };
        self
    }

    fn char_is_valid(chr: char) -> bool {
        A::char_is_valid(chr) || B::char_is_valid(chr)
    }
}

impl<A: Semialphabet, B: Semialphabet> Default for Variant2<A, B> {
    fn default() -> Self {
        Self::from_combined(0)
    }
}

impl<A: Semialphabet, B: Semialphabet> Clone for Variant2<A, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: Semialphabet, B: Semialphabet> Copy for Variant2<A, B> {}

impl<A: Semialphabet, B: Semialphabet> PartialEq for Variant2<A, B> {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank
    }
}

impl<A: Semialphabet, B: Semialphabet> Eq for Variant2<A, B> {}

impl<A: Semialphabet, B: Semialphabet> PartialOrd for Variant2<A, B> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A: Semialphabet, B: Semialphabet> Ord for Variant2<A, B> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank.cmp(&other.rank)
    }
}

impl<A: Semialphabet, B: Semialphabet> Hash for Variant2<A, B> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank.hash(state);
    }
}

impl<A: Semialphabet, B: Semialphabet> fmt::Debug for Variant2<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rank < A::SIZE {
            f.debug_tuple("Variant2")
                .field(&A::from_rank_u64(self.rank))
                .finish()
        } else {
            f.debug_tuple("Variant2")
                .field(&B::from_rank_u64(self.rank - A::SIZE))
                .finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::{Dna4, Dna5, Phred42};

    #[test]
    fn ranks_concatenate() {
        type V = Variant2<Dna4, Phred42>;
        assert_eq!(V::SIZE, 46);
        assert_eq!(V::from_alternative(Dna4::T).to_rank(), 3);
        assert_eq!(V::from_alternative(Phred42::from_phred(0)).to_rank(), 4);
        assert_eq!(V::from_rank(45).convert_to::<Phred42, _>(), Some(Phred42::from_phred(41)));
        assert_eq!(V::from_rank(45).convert_to::<Dna4, _>(), None);
        assert_eq!(V::from_rank(45).index(), 1);
    }

    #[test]
    fn char_assignment_prefers_first_valid_alternative() {
        type V = Gapped<Dna5>;
        assert_eq!(V::from_char('-').convert_to::<Gap, _>(), Some(Gap));
        assert_eq!(V::from_char('c').convert_to::<Dna5, _>(), Some(Dna5::C));
        // Invalid for both: the first alternative's fallback.
        assert_eq!(V::from_char('?').convert_to::<Dna5, _>(), Some(Dna5::N));
        assert!(V::from_char_strictly('?').is_err());
        assert_eq!(V::from_char_strictly('-').unwrap().to_char(), '-');
    }

    #[test]
    fn char_roundtrip() {
        type V = Gapped<Dna4>;
        for rank in 0..V::SIZE {
            let letter = V::from_rank(rank);
            assert_eq!(V::from_char(letter.to_char()), letter);
        }
    }

    #[test]
    fn assign_rank_is_idempotent() {
        type V = Variant2<Dna4, Phred42>;
        for rank in [2, 4, 45] {
            let mut v = V::default();
            v.assign_rank(rank);
            let once = v;
            v.assign_rank(rank);
            assert_eq!(v, once);
            assert_eq!(v.to_rank(), rank);
        }
    }

    #[test]
    fn debug_shows_held_letter() {
        assert_eq!(format!("{:?}", Gapped::<Dna4>::from_alternative(Gap)), "Variant2(Gap)");
    }
}

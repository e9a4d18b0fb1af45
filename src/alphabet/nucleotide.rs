//! Nucleotide alphabets.
//!
//! Nucleotides accept lower-case characters, and the DNA alphabets read `U` as `T`
//! (and [`Rna4`] reads `T` as `U`), so these are also considered valid characters.

use crate::alphabet::{Alphabet, NucleotideAlphabet, Semialphabet};

macro_rules! nucleotide_alphabet {
    (
        $(#[$meta:meta])*
        $name:ident, fallback = $fallback:ident,
        [$($letter:ident = $chr:literal => $complement:ident),+ $(,)?]
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u8)]
        pub enum $name {
            $(
                #[doc = concat!("The nucleotide `", $chr, "`.")]
                $letter,
            )+
        }

        impl $name {
            const LETTERS: &'static [$name] = &[$($name::$letter),+];
            const CHARS: &'static [char] = &[$($chr),+];
        }

        impl Default for $name {
            fn default() -> Self {
                Self::LETTERS[0]
            }
        }

        impl Semialphabet for $name {
            type Rank = u8;
            const SIZE: u64 = Self::LETTERS.len() as u64;

            #[inline(always)]
            fn to_rank(self) -> u8 {
                self as u8
            }

            #[inline(always)]
            fn assign_rank(&mut self, rank: u8) -> &mut Self {
                debug_assert!((rank as u64) < Self::SIZE);
                *self = Self::LETTERS[rank as usize];
                self
            }
        }

        impl Alphabet for $name {
            #[inline(always)]
            fn to_char(self) -> char {
                Self::CHARS[self as usize]
            }

            fn assign_char(&mut self, chr: char) -> &mut Self {
                *self = match Self::canonical(chr) {
                    $($chr => $name::$letter,)+
                    _ => $name::$fallback,
                };
                self
            }

            fn char_is_valid(chr: char) -> bool {
                Self::CHARS.contains(&Self::canonical(chr))
            }
        }

        impl NucleotideAlphabet for $name {
            fn complement(self) -> Self {
                match self {
                    $($name::$letter => $name::$complement,)+
                }
            }
        }
    };
}

nucleotide_alphabet! {
    /// The four-letter DNA alphabet.
    ///
    /// Characters other than `ACGTU` (in either case) are converted into `A`.
    Dna4, fallback = A,
    [A = 'A' => T, C = 'C' => G, G = 'G' => C, T = 'T' => A]
}

nucleotide_alphabet! {
    /// The four-letter DNA alphabet with the unknown base `N`.
    ///
    /// Characters other than `ACGNTU` (in either case) are converted into `N`.
    Dna5, fallback = N,
    [A = 'A' => T, C = 'C' => G, G = 'G' => C, N = 'N' => N, T = 'T' => A]
}

nucleotide_alphabet! {
    /// The four-letter RNA alphabet.
    ///
    /// Characters other than `ACGUT` (in either case) are converted into `A`.
    Rna4, fallback = A,
    [A = 'A' => U, C = 'C' => G, G = 'G' => C, U = 'U' => A]
}

impl Dna4 {
    fn canonical(chr: char) -> char {
        match chr.to_ascii_uppercase() {
            'U' => 'T',
            c => c,
        }
    }
}

impl Dna5 {
    fn canonical(chr: char) -> char {
        match chr.to_ascii_uppercase() {
            'U' => 'T',
            c => c,
        }
    }
}

impl Rna4 {
    fn canonical(chr: char) -> char {
        match chr.to_ascii_uppercase() {
            'T' => 'U',
            c => c,
        }
    }
}

impl From<Rna4> for Dna4 {
    fn from(letter: Rna4) -> Self {
        Dna4::from_rank(letter.to_rank())
    }
}

impl From<Dna4> for Rna4 {
    fn from(letter: Dna4) -> Self {
        Rna4::from_rank(letter.to_rank())
    }
}

impl From<Dna4> for Dna5 {
    fn from(letter: Dna4) -> Self {
        match letter {
            Dna4::A => Dna5::A,
            Dna4::C => Dna5::C,
            Dna4::G => Dna5::G,
            Dna4::T => Dna5::T,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::{letters_from_str, letters_to_string};

    #[test]
    fn dna4_fallback_and_case() {
        let seq: Vec<Dna4> = letters_from_str("acgtuN?");
        assert_eq!(letters_to_string(seq), "ACGTTAA");
    }

    #[test]
    fn dna5_fallback_is_n() {
        assert_eq!(Dna5::from_char('R'), Dna5::N);
        assert_eq!(Dna5::from_char('u'), Dna5::T);
        assert_eq!(Dna5::N.to_rank(), 3);
    }

    #[test]
    fn validity_includes_case_and_u() {
        assert!(Dna4::char_is_valid('a'));
        assert!(Dna4::char_is_valid('U'));
        assert!(!Dna4::char_is_valid('N'));
        assert!(Dna5::char_is_valid('n'));
        assert!(Rna4::char_is_valid('T'));
        assert!(!Rna4::char_is_valid('-'));
    }

    #[test]
    fn complement_is_involution() {
        for r in 0..Dna5::SIZE as u8 {
            let letter = Dna5::from_rank(r);
            assert_eq!(letter.complement().complement(), letter);
        }
        assert_eq!(Dna4::A.complement(), Dna4::T);
        assert_eq!(Rna4::G.complement(), Rna4::C);
        assert_eq!(Dna5::N.complement(), Dna5::N);
    }

    #[test]
    fn conversions_keep_the_base() {
        assert_eq!(Dna4::from(Rna4::U), Dna4::T);
        assert_eq!(Rna4::from(Dna4::C), Rna4::C);
        assert_eq!(Dna5::from(Dna4::T), Dna5::T);
    }
}

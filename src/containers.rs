//! Top module for bit-packed containers.
//!
//! # Introduction
//!
//! Alphabet letters need only $`\lceil \lg \sigma \rceil`$ bits, far less than a byte
//! for most biological alphabets. The containers in this module store letters
//! packed into 64-bit words.
//!
//! | Implementation | Element | Access | Push/Pop | Insert/Erase | Memory (bits) |
//! | --- | --- | :-: | :-: | :-: | :-: |
//! | [`BitcompressedVector`] | any [`Semialphabet`](crate::alphabet::Semialphabet) | $`O(1)`$ | $`O(1)`$ amortized | $`O(n)`$ | $`64 \lceil n / \lfloor 64 / b \rfloor \rceil`$ |
//! | [`DynamicBitset`] | bits | $`O(1)`$ | $`O(1)`$ | $`O(1)`$ | $`64`$ |
//!
//! Here $`b = \max(1, \lceil \lg \sigma \rceil)`$ is the number of bits per letter.
//! Letters never straddle a word boundary, so up to $`63`$ bits per word stay unused
//! when $`b`$ does not divide $`64`$.
//!
//! # Element handles
//!
//! Packed elements cannot be borrowed as `&mut A`. Mutable access instead yields
//! handles ([`Reference`], [`BitRef`]) that perform a read-modify-write on the word
//! holding the element. Handles borrow their container, so they never outlive it nor
//! survive a reallocation. They are built on [`Cell`](std::cell::Cell), which makes
//! them `!Sync`: two handles on letters sharing a word can coexist on one thread
//! but can never race from different threads.
//!
//! # Examples
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use seqpack::alphabet::{prelude::*, Dna4};
//! use seqpack::containers::BitcompressedVector;
//!
//! let mut seq: BitcompressedVector<Dna4> = "ACGT".parse()?;
//! seq.at_mut(1)?.assign_char('T');
//! seq.push(Dna4::G);
//!
//! assert_eq!(seq.to_string(), "ATGTG");
//! assert_eq!(seq.words().len(), 1);
//! # Ok(())
//! # }
//! ```
pub mod bitcompressed_vector;
pub mod dynamic_bitset;

pub use bitcompressed_vector::{BitcompressedVector, BitcompressedVectorMeta, Reference};
pub use dynamic_bitset::{BitRef, DynamicBitset};

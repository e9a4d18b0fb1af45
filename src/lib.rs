//! # Compact biological alphabets in Rust
//!
//! Seqpack provides the letter types sequence analysis is built on and
//! containers that store them in a minimal number of bits.
//!
//! ## Design policy
//!
//! - **Ranks first:**
//!   Every letter is a small value type with a dense *rank* in $`[0, \sigma)`$.
//!   Characters, composite letters and packed storage are all defined on top of ranks.
//!
//! - **Static dispatch:**
//!   Shared behavior comes from the [`Semialphabet`](alphabet::Semialphabet) and
//!   [`Alphabet`](alphabet::Alphabet) traits; no letter carries a vtable.
//!
//! - **Compile-time layout:**
//!   Alphabet sizes, mixed-radix weights, digit tables, bit widths and bitset
//!   capacities are constants, checked when the program is compiled.
//!
//! - **Ensure safety:**
//!   Packed element handles are built on [`Cell`](std::cell::Cell) and borrow
//!   their container, so no unsafe code is needed.
//!
//! ## Modules
//!
//! - [Alphabets](crate::alphabet): nucleotides, gaps, masks, Phred scores and CIGAR elements.
//! - [Composite alphabets](crate::composite): mixed-radix tuples and variants.
//! - [Containers](crate::containers): bit-packed vectors and a one-word bitset.
//!
//! Throughout this document, we write $`\log_2`$ with $`\lg`$.
//!
//! ## Serialization
//!
//! Packed vectors export their raw words through [`serialization::Serializable`]
//! as [`anybytes::Bytes`] with `zerocopy` metadata.
//!
//! ## Logging
//!
//! Structural events such as reallocation and rejected metadata are reported
//! through [`tracing`]. No subscriber is installed by this crate.
//!
//! ## Limitation
//!
//! This library is designed to run on 64-bit machines.
#![deny(missing_docs)]

#[cfg(not(target_pointer_width = "64"))]
compile_error!("`target_pointer_width` must be 64");

pub mod alphabet;
pub mod composite;
pub mod containers;
pub mod error;
pub mod serialization;
pub mod utils;

pub use alphabet::{Alphabet, NucleotideAlphabet, Semialphabet};
pub use containers::{BitcompressedVector, DynamicBitset};
pub use error::{Error, Result};

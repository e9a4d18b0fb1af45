//! The prelude for alphabets.
//!
//! The purpose of this module is to alleviate imports of many common traits:
//!
//! ```
//! # #![allow(unused_imports)]
//! use seqpack::alphabet::prelude::*;
//! ```
pub use crate::alphabet::{Alphabet, NucleotideAlphabet, RankInt, Semialphabet};

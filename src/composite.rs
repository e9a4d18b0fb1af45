//! Top module for composite alphabets.
//!
//! # Introduction
//!
//! Composite alphabets combine several component alphabets into one letter.
//!
//! - A *tuple* ([`Tuple2`], [`Tuple3`]) holds one letter of every component.
//!   Its rank space is the Cartesian product of the component rank spaces,
//!   encoded in mixed radix with the first component as the most significant digit:
//!
//!   $`r = \sum_i r_i w_i`$ with $`w_i = \prod_{j > i} \sigma_j`$.
//!
//!   Comparing combined ranks therefore compares the components lexicographically.
//!
//! - A *variant* ([`Variant2`]) holds a letter of exactly one alternative.
//!   Its rank space is the concatenation of the alternatives' rank spaces.
//!
//! # Component access
//!
//! Components are addressed either by position with [`Component`] or by type with [`Has`].
//! Access by type only compiles when the type occurs exactly once among the components,
//! since the position marker [`Pos`] can then be inferred:
//!
//! ```
//! use seqpack::alphabet::{Dna4, Phred42, prelude::*};
//! use seqpack::composite::Tuple2;
//!
//! let mut letter = Tuple2::new(Dna4::C, Phred42::from_phred(30));
//! assert_eq!(letter.get::<0>(), Dna4::C);
//! assert_eq!(letter.get_by::<Phred42, _>().phred(), 30);
//!
//! // Mutable access goes through a handle that rewrites one digit of the combined rank.
//! letter.get_mut::<0>().set(Dna4::T);
//! assert_eq!(letter.to_rank(), 3 * 42 + 30);
//! ```
pub mod mixed_radix;
pub mod tuple;
pub mod variant;

pub use tuple::{Masked, Qualified, Tuple2, Tuple3};
pub use variant::{Alternative, Gapped, Variant2};

use std::fmt;
use std::marker::PhantomData;

use crate::alphabet::{Alphabet, Semialphabet};
use crate::error::Result;

/// Type-level marker for the component at position `I`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Pos<const I: usize>;

/// Interface for accessing the `I`-th component of a composite value.
pub trait Component<const I: usize> {
    /// Type of the component.
    type Output: Copy;

    /// Returns the component.
    fn component(&self) -> Self::Output;

    /// Replaces the component, leaving all other components untouched.
    fn set_component(&mut self, value: Self::Output);
}

/// Interface for accessing the component of type `T` located at `Idx`.
///
/// `Idx` is a [`Pos`] marker. Leaving it to inference only succeeds when `T`
/// is found at a single position.
pub trait Has<T, Idx> {
    /// Returns the component of type `T`.
    fn pluck(&self) -> T;

    /// Replaces the component of type `T`, leaving all other components untouched.
    fn put(&mut self, value: T);
}

/// Interface for composite values that accept a `V` into the component at `Idx`.
///
/// A value is accepted by a component when it converts into that component
/// through [`Into`]. If `V` converts into several components, the position is
/// ambiguous and calls relying on inference do not compile. This includes a
/// component type that also converts into another component, e.g. [`Dna4`] in
/// `Tuple2<Dna5, Dna4>`; such values go through [`Has`] instead, which only
/// matches the exact type.
///
/// [`Dna4`]: crate::alphabet::Dna4
pub trait AcceptsValue<V, Idx> {
    /// Type of the receiving component.
    type Target: Copy + Ord;

    /// Converts `value` into the receiving component type.
    fn convert(value: V) -> Self::Target;

    /// Returns the receiving component.
    fn target(&self) -> Self::Target;

    /// Replaces the receiving component.
    fn set_target(&mut self, value: Self::Target);
}

/// Mutable handle on one component of a composite value.
///
/// Writes through the handle update only that component's digit of the parent.
/// The handle borrows the parent mutably, so it cannot outlive it.
pub struct ComponentMut<'a, S, T, Idx>
where
    S: Has<T, Idx>,
{
    parent: &'a mut S,
    _component: PhantomData<fn() -> (T, Idx)>,
}

impl<'a, S, T, Idx> ComponentMut<'a, S, T, Idx>
where
    S: Has<T, Idx>,
{
    pub(crate) fn new(parent: &'a mut S) -> Self {
        Self {
            parent,
            _component: PhantomData,
        }
    }

    /// Returns the current component value.
    #[inline(always)]
    pub fn get(&self) -> T {
        <S as Has<T, Idx>>::pluck(self.parent)
    }

    /// Replaces the component value.
    #[inline(always)]
    pub fn set(&mut self, value: T) -> &mut Self {
        <S as Has<T, Idx>>::put(self.parent, value);
        self
    }

    /// Replaces the component value with `f` applied to it.
    pub fn update<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(T) -> T,
    {
        let value = f(self.get());
        self.set(value)
    }
}

impl<S, T, Idx> ComponentMut<'_, S, T, Idx>
where
    S: Has<T, Idx>,
    T: Semialphabet,
{
    /// Returns the rank of the component.
    pub fn to_rank(&self) -> T::Rank {
        self.get().to_rank()
    }

    /// Sets the component by rank.
    pub fn assign_rank(&mut self, rank: T::Rank) -> &mut Self {
        self.set(T::from_rank(rank))
    }
}

impl<S, T, Idx> ComponentMut<'_, S, T, Idx>
where
    S: Has<T, Idx>,
    T: Alphabet,
{
    /// Returns the character of the component.
    pub fn to_char(&self) -> char {
        self.get().to_char()
    }

    /// Sets the component from a character.
    pub fn assign_char(&mut self, chr: char) -> &mut Self {
        self.set(T::from_char(chr))
    }

    /// Sets the component from a character, rejecting invalid characters.
    ///
    /// # Errors
    ///
    /// See [`Alphabet::assign_char_strictly`].
    pub fn assign_char_strictly(&mut self, chr: char) -> Result<&mut Self> {
        let letter = T::from_char_strictly(chr)?;
        Ok(self.set(letter))
    }
}

impl<S, T, Idx> fmt::Debug for ComponentMut<'_, S, T, Idx>
where
    S: Has<T, Idx>,
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ComponentMut").field(&self.get()).finish()
    }
}

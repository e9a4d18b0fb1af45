//! Tuple alphabets combining one letter of every component.
//!
//! A tuple stores only its combined mixed-radix rank (see [`mixed_radix`]).
//! Components are decoded on access: tuples whose combined size is below
//! [`TABLE_THRESHOLD`] look their digits up in a per-type table computed at compile time,
//! larger tuples divide.
//!
//! If the first component is an [`Alphabet`], the tuple is an [`Alphabet`] as well
//! and uses the first component's characters. This is how quality-annotated
//! letters ([`Qualified`]) and masked letters ([`Masked`]) print.
//!
//! # Comparing against component values
//!
//! Tuples compare with each other by combined rank, i.e., lexicographically.
//! [`Tuple2::eq_component`] and [`Tuple2::cmp_component`] instead compare the component
//! of the value's exact type, and [`Tuple2::eq_value`] and [`Tuple2::cmp_value`] the
//! single component the value converts into (see [`AcceptsValue`]). All other components
//! are ignored. Prefer the `*_component` methods whenever the value already has a
//! component's type: a type that also converts into another component is ambiguous
//! for the `*_value` methods.
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::alphabet::{Alphabet, Mask, Semialphabet};
use crate::composite::mixed_radix::{self, DigitTable, TABLE_THRESHOLD};
use crate::composite::{AcceptsValue, Component, ComponentMut, Has, Pos};

macro_rules! alphabet_tuple {
    (
        $(#[$meta:meta])*
        $name:ident, $n:literal,
        [$idx0:tt $arg0:ident: $G0:ident $(, $idx:tt $arg:ident: $G:ident)*]
    ) => {
        $(#[$meta])*
        pub struct $name<$G0, $($G),*> {
            rank: u64,
            _components: PhantomData<($G0, $($G,)*)>,
        }

        impl<$G0: Semialphabet, $($G: Semialphabet),*> $name<$G0, $($G),*> {
            const SIZES: [u64; $n] = [$G0::SIZE, $($G::SIZE),*];
            const WEIGHTS: [u64; $n] = mixed_radix::weights(Self::SIZES);
            const TABLE: &'static DigitTable<$n> =
                &mixed_radix::digit_table(Self::SIZES, Self::WEIGHTS);

            /// Creates a tuple from all of its components.
            pub fn new($arg0: $G0, $($arg: $G),*) -> Self {
                let digits = [$arg0.to_rank_u64(), $($arg.to_rank_u64()),*];
                Self::from_combined(mixed_radix::encode(digits, Self::WEIGHTS))
            }

            const fn from_combined(rank: u64) -> Self {
                Self {
                    rank,
                    _components: PhantomData,
                }
            }

            /// Returns all components.
            pub fn components(&self) -> ($G0, $($G,)*) {
                (
                    $G0::from_rank_u64(self.digit($idx0)),
                    $($G::from_rank_u64(self.digit($idx)),)*
                )
            }

            #[inline(always)]
            fn digit(&self, i: usize) -> u64 {
                if <Self as Semialphabet>::SIZE < TABLE_THRESHOLD {
                    Self::TABLE[self.rank as usize][i] as u64
                } else {
                    mixed_radix::decode_digit(self.rank, Self::WEIGHTS[i], Self::SIZES[i])
                }
            }

            #[inline(always)]
            fn set_digit(&mut self, i: usize, digit: u64) {
                debug_assert!(digit < Self::SIZES[i]);
                let old = self.digit(i);
                self.rank = mixed_radix::replace_digit(self.rank, Self::WEIGHTS[i], old, digit);
            }

            /// Returns the `I`-th component.
            pub fn get<const I: usize>(&self) -> <Self as Component<I>>::Output
            where
                Self: Component<I>,
            {
                <Self as Component<I>>::component(self)
            }

            /// Returns a mutable handle on the `I`-th component.
            pub fn get_mut<const I: usize>(
                &mut self,
            ) -> ComponentMut<'_, Self, <Self as Component<I>>::Output, Pos<I>>
            where
                Self: Component<I> + Has<<Self as Component<I>>::Output, Pos<I>>,
            {
                ComponentMut::new(self)
            }

            /// Returns the component of type `T`.
            ///
            /// Only compiles if `T` occurs exactly once among the components.
            pub fn get_by<T, Idx>(&self) -> T
            where
                Self: Has<T, Idx>,
            {
                <Self as Has<T, Idx>>::pluck(self)
            }

            /// Returns a mutable handle on the component of type `T`.
            ///
            /// Only compiles if `T` occurs exactly once among the components.
            pub fn get_mut_by<T, Idx>(&mut self) -> ComponentMut<'_, Self, T, Idx>
            where
                Self: Has<T, Idx>,
            {
                ComponentMut::new(self)
            }

            /// Creates a tuple in which the component of type `T` is `value`
            /// and every other component has rank 0.
            ///
            /// Only compiles if `T` occurs exactly once among the components.
            /// Unlike [`from_value`](Self::from_value), conversions into other
            /// components are never considered.
            pub fn from_component<T, Idx>(value: T) -> Self
            where
                Self: Has<T, Idx>,
            {
                let mut letter = Self::default();
                letter.assign_component(value);
                letter
            }

            /// Sets the component of type `T` to `value`.
            pub fn assign_component<T, Idx>(&mut self, value: T) -> &mut Self
            where
                Self: Has<T, Idx>,
            {
                <Self as Has<T, Idx>>::put(self, value);
                self
            }

            /// Compares the component of type `T` with `value`.
            pub fn eq_component<T: Ord, Idx>(&self, value: T) -> bool
            where
                Self: Has<T, Idx>,
            {
                self.cmp_component(value) == Ordering::Equal
            }

            /// Orders the component of type `T` against `value`,
            /// ignoring all other components.
            pub fn cmp_component<T: Ord, Idx>(&self, value: T) -> Ordering
            where
                Self: Has<T, Idx>,
            {
                <Self as Has<T, Idx>>::pluck(self).cmp(&value)
            }

            /// Creates a tuple in which the component accepting `value` is set from it
            /// and every other component has rank 0.
            pub fn from_value<V, Idx>(value: V) -> Self
            where
                Self: AcceptsValue<V, Idx>,
            {
                let mut letter = Self::default();
                letter.assign_value(value);
                letter
            }

            /// Sets the component accepting `value` from it.
            ///
            /// Only that component's digit changes.
            pub fn assign_value<V, Idx>(&mut self, value: V) -> &mut Self
            where
                Self: AcceptsValue<V, Idx>,
            {
                let converted = <Self as AcceptsValue<V, Idx>>::convert(value);
                <Self as AcceptsValue<V, Idx>>::set_target(self, converted);
                self
            }

            /// Compares the component accepting `value` with it.
            pub fn eq_value<V, Idx>(&self, value: V) -> bool
            where
                Self: AcceptsValue<V, Idx>,
            {
                self.cmp_value(value) == Ordering::Equal
            }

            /// Orders the component accepting `value` against it.
            ///
            /// This is not a lexicographic comparison of the tuple:
            /// components other than the accepting one are ignored.
            pub fn cmp_value<V, Idx>(&self, value: V) -> Ordering
            where
                Self: AcceptsValue<V, Idx>,
            {
                let converted = <Self as AcceptsValue<V, Idx>>::convert(value);
                <Self as AcceptsValue<V, Idx>>::target(self).cmp(&converted)
            }
        }

        impl<$G0: Semialphabet, $($G: Semialphabet),*> Semialphabet for $name<$G0, $($G),*> {
            type Rank = u64;
            const SIZE: u64 = mixed_radix::product(Self::SIZES);

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

        impl<$G0: Alphabet, $($G: Semialphabet),*> Alphabet for $name<$G0, $($G),*> {
            fn to_char(self) -> char {
                self.get::<$idx0>().to_char()
            }

            fn assign_char(&mut self, chr: char) -> &mut Self {
                <Self as Component<$idx0>>::set_component(self, $G0::from_char(chr));
                self
            }

            fn char_is_valid(chr: char) -> bool {
                $G0::char_is_valid(chr)
            }
        }

        impl<$G0: Semialphabet, $($G: Semialphabet),*> Default for $name<$G0, $($G),*> {
            fn default() -> Self {
                Self::from_combined(0)
            }
        }

        impl<$G0: Semialphabet, $($G: Semialphabet),*> Clone for $name<$G0, $($G),*> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<$G0: Semialphabet, $($G: Semialphabet),*> Copy for $name<$G0, $($G),*> {}

        impl<$G0: Semialphabet, $($G: Semialphabet),*> PartialEq for $name<$G0, $($G),*> {
            fn eq(&self, other: &Self) -> bool {
                self.rank == other.rank
            }
        }

        impl<$G0: Semialphabet, $($G: Semialphabet),*> Eq for $name<$G0, $($G),*> {}

        impl<$G0: Semialphabet, $($G: Semialphabet),*> PartialOrd for $name<$G0, $($G),*> {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl<$G0: Semialphabet, $($G: Semialphabet),*> Ord for $name<$G0, $($G),*> {
            fn cmp(&self, other: &Self) -> Ordering {
                self.rank.cmp(&other.rank)
            }
        }

        impl<$G0: Semialphabet, $($G: Semialphabet),*> Hash for $name<$G0, $($G),*> {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.rank.hash(state);
            }
        }

        impl<$G0: Semialphabet, $($G: Semialphabet),*> fmt::Debug for $name<$G0, $($G),*> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name))
                    .field(&self.get::<$idx0>())
                    $(.field(&self.get::<$idx>()))*
                    .finish()
            }
        }

        impl<$G0: Semialphabet, $($G: Semialphabet),*> From<($G0, $($G,)*)>
            for $name<$G0, $($G),*>
        {
            fn from(($arg0, $($arg,)*): ($G0, $($G,)*)) -> Self {
                Self::new($arg0, $($arg),*)
            }
        }
    };
}

macro_rules! tuple_component {
    ($name:ident [$($G:ident),+] $idx:tt => $T:ident) => {
        impl<$($G: Semialphabet),+> Component<$idx> for $name<$($G),+> {
            type Output = $T;

            #[inline(always)]
            fn component(&self) -> $T {
                $T::from_rank_u64(self.digit($idx))
            }

            #[inline(always)]
            fn set_component(&mut self, value: $T) {
                self.set_digit($idx, value.to_rank_u64());
            }
        }

        impl<$($G: Semialphabet),+> Has<$T, Pos<$idx>> for $name<$($G),+> {
            fn pluck(&self) -> $T {
                <Self as Component<$idx>>::component(self)
            }

            fn put(&mut self, value: $T) {
                <Self as Component<$idx>>::set_component(self, value);
            }
        }

        impl<$($G: Semialphabet),+, V: Into<$T>> AcceptsValue<V, Pos<$idx>> for $name<$($G),+> {
            type Target = $T;

            fn convert(value: V) -> $T {
                value.into()
            }

            fn target(&self) -> $T {
                <Self as Component<$idx>>::component(self)
            }

            fn set_target(&mut self, value: $T) {
                <Self as Component<$idx>>::set_component(self, value);
            }
        }
    };
}

alphabet_tuple! {
    /// Tuple alphabet of two components.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqpack::alphabet::{Dna4, Dna5, prelude::*};
    /// use seqpack::composite::Tuple2;
    ///
    /// let a = Tuple2::new(Dna4::A, Dna5::T);
    /// let b = Tuple2::new(Dna4::C, Dna5::A);
    /// // The first component is the most significant one.
    /// assert!(a < b);
    /// assert_eq!(b.to_rank(), 1 * 5 + 0);
    /// assert_eq!(b.components(), (Dna4::C, Dna5::A));
    /// ```
    Tuple2, 2, [0 first: A, 1 second: B]
}

alphabet_tuple! {
    /// Tuple alphabet of three components.
    Tuple3, 3, [0 first: A, 1 second: B, 2 third: C]
}

tuple_component!(Tuple2 [A, B] 0 => A);
tuple_component!(Tuple2 [A, B] 1 => B);
tuple_component!(Tuple3 [A, B, C] 0 => A);
tuple_component!(Tuple3 [A, B, C] 1 => B);
tuple_component!(Tuple3 [A, B, C] 2 => C);

/// A sequence letter annotated with a quality letter.
pub type Qualified<S, Q> = Tuple2<S, Q>;

/// A sequence letter annotated with a [`Mask`].
pub type Masked<S> = Tuple2<S, Mask>;

impl<S: Semialphabet, Q: Semialphabet> Tuple2<S, Q> {
    /// Returns the first component, the sequence letter of a [`Qualified`] letter.
    pub fn sequence(&self) -> S {
        self.get::<0>()
    }

    /// Returns the second component, the quality letter of a [`Qualified`] letter.
    pub fn quality(&self) -> Q {
        self.get::<1>()
    }
}

impl<S: Semialphabet> Tuple2<S, Mask> {
    /// Returns `true` if the letter is masked.
    pub fn is_masked(&self) -> bool {
        self.get::<1>().is_masked()
    }
}

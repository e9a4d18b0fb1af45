//! Bitset of runtime size and fixed capacity, stored in a single word.
use std::cell::Cell;
use std::ffi::{c_ulong, c_ulonglong};
use std::fmt;
use std::iter::{ExactSizeIterator, FusedIterator};
use std::ops::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Shl, ShlAssign, Shr,
    ShrAssign,
};
use std::str::FromStr;

use num_traits::NumCast;

use crate::error::{Error, Result};
use crate::utils;

/// Number of bits available for the payload.
pub const PAYLOAD_BITS: usize = 58;

const SIZE_SHIFT: usize = PAYLOAD_BITS;
const PAYLOAD_MASK: u64 = utils::low_mask(PAYLOAD_BITS);

/// Bitset holding up to `CAP` bits, where `CAP <= 58`.
///
/// The bits and the current size share one [`u64`]: bits `[0, 58)` hold the payload
/// and bits `[58, 64)` hold the size. Bits at positions not less than [`len()`](Self::len)
/// are always zero. A capacity above 58 is rejected at compile time.
///
/// Text conversions write the bit at the highest position first,
/// so `"110"` has bit 0 unset and converts to 6.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use seqpack::containers::DynamicBitset;
///
/// let mut bs: DynamicBitset<58> = "101".parse()?;
/// assert_eq!(bs.len(), 3);
/// assert_eq!(bs.to_ulong()?, 5);
///
/// bs.push(true);
/// bs.flip(0)?;
/// assert_eq!(bs.to_string(), "1100");
/// assert_eq!(bs.count(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DynamicBitset<const CAP: usize = PAYLOAD_BITS> {
    data: u64,
}

impl<const CAP: usize> DynamicBitset<CAP> {
    const CAPACITY_FITS: () = assert!(
        CAP <= PAYLOAD_BITS,
        "DynamicBitset capacity must not exceed 58 bits"
    );

    #[inline(always)]
    const fn from_parts(bits: u64, len: usize) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::CAPACITY_FITS;
        Self {
            data: ((len as u64) << SIZE_SHIFT) | (bits & PAYLOAD_MASK),
        }
    }

    /// Creates an empty bitset.
    pub const fn new() -> Self {
        Self::from_parts(0, 0)
    }

    /// Creates a bitset holding the bits of `value`, with as many bits as `value` is wide.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] is returned if a bit at position `CAP` or above is set.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use seqpack::containers::DynamicBitset;
    ///
    /// let bs = DynamicBitset::<58>::from_u64(0b1011)?;
    /// assert_eq!(bs.len(), 4);
    /// assert!(DynamicBitset::<58>::from_u64(1 << 58).is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_u64(value: u64) -> Result<Self> {
        if CAP < utils::WORD_LEN && value >> CAP != 0 {
            return Err(Error::invalid_argument(format!(
                "value must fit in {CAP} bits, but got {value}."
            )));
        }
        let width = (u64::BITS - value.leading_zeros()) as usize;
        Ok(Self::from_parts(value, width))
    }

    /// Creates a bitset from a string of `'0'` and `'1'`, highest position first.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] is returned if `text` contains another character
    /// or is longer than `CAP`.
    pub fn from_bits_str(text: &str) -> Result<Self> {
        let mut bits = 0u64;
        let mut len = 0usize;
        for chr in text.chars() {
            if len == CAP {
                return Err(Error::invalid_argument(format!(
                    "bit string must have at most {CAP} characters, but got {}.",
                    text.chars().count()
                )));
            }
            let bit = match chr {
                '0' => 0,
                '1' => 1,
                _ => {
                    return Err(Error::invalid_argument(format!(
                        "bit string must only contain '0' and '1', but got {chr:?}."
                    )))
                }
            };
            bits = (bits << 1) | bit;
            len += 1;
        }
        Ok(Self::from_parts(bits, len))
    }

    /// Gets the number of bits.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        (self.data >> SIZE_SHIFT) as usize
    }

    /// Checks if the bitset is empty.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of bits.
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        CAP
    }

    /// Returns the payload, bit `i` holding position `i`.
    #[inline(always)]
    pub const fn bits(&self) -> u64 {
        self.data & PAYLOAD_MASK
    }

    #[inline(always)]
    fn set_bits(&mut self, bits: u64) {
        *self = Self::from_parts(bits & utils::low_mask(self.len()), self.len());
    }

    #[inline(always)]
    const fn len_mask(&self) -> u64 {
        utils::low_mask(self.len())
    }

    fn check_index(&self, pos: usize) -> Result<()> {
        if pos < self.len() {
            Ok(())
        } else {
            Err(Error::out_of_range(pos, self.len()))
        }
    }

    /// Returns the `pos`-th bit without bounds checking.
    #[inline(always)]
    pub const fn bit(&self, pos: usize) -> bool {
        debug_assert!(pos < self.len());
        (self.data >> pos) & 1 == 1
    }

    /// Returns the `pos`-th bit.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] is returned if `pos` is not less than [`len()`](Self::len).
    pub fn test(&self, pos: usize) -> Result<bool> {
        self.check_index(pos)?;
        Ok(self.bit(pos))
    }

    /// Returns the `pos`-th bit; same as [`test()`](Self::test).
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] is returned if `pos` is not less than [`len()`](Self::len).
    pub fn at(&self, pos: usize) -> Result<bool> {
        self.test(pos)
    }

    /// Returns a handle on the `pos`-th bit without bounds checking.
    pub fn bit_mut(&mut self, pos: usize) -> BitRef<'_> {
        debug_assert!(pos < self.len());
        BitRef {
            word: Cell::from_mut(&mut self.data),
            pos,
        }
    }

    /// Returns a handle on the `pos`-th bit.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] is returned if `pos` is not less than [`len()`](Self::len).
    pub fn at_mut(&mut self, pos: usize) -> Result<BitRef<'_>> {
        self.check_index(pos)?;
        Ok(self.bit_mut(pos))
    }

    /// Sets the `pos`-th bit.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] is returned if `pos` is not less than [`len()`](Self::len).
    pub fn set(&mut self, pos: usize) -> Result<&mut Self> {
        self.check_index(pos)?;
        self.data |= 1 << pos;
        Ok(self)
    }

    /// Clears the `pos`-th bit.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] is returned if `pos` is not less than [`len()`](Self::len).
    pub fn reset(&mut self, pos: usize) -> Result<&mut Self> {
        self.check_index(pos)?;
        self.data &= !(1 << pos);
        Ok(self)
    }

    /// Toggles the `pos`-th bit.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] is returned if `pos` is not less than [`len()`](Self::len).
    pub fn flip(&mut self, pos: usize) -> Result<&mut Self> {
        self.check_index(pos)?;
        self.data ^= 1 << pos;
        Ok(self)
    }

    /// Sets all bits.
    pub fn set_all(&mut self) -> &mut Self {
        self.data |= self.len_mask();
        self
    }

    /// Clears all bits.
    pub fn reset_all(&mut self) -> &mut Self {
        self.data &= !PAYLOAD_MASK;
        self
    }

    /// Toggles all bits.
    pub fn flip_all(&mut self) -> &mut Self {
        self.data ^= self.len_mask();
        self
    }

    /// Checks if all bits are set; `true` when empty.
    pub const fn all(&self) -> bool {
        self.bits() == self.len_mask()
    }

    /// Checks if any bit is set.
    pub const fn any(&self) -> bool {
        self.bits() != 0
    }

    /// Checks if no bit is set.
    pub const fn none(&self) -> bool {
        self.bits() == 0
    }

    /// Gets the number of set bits.
    pub const fn count(&self) -> usize {
        self.bits().count_ones() as usize
    }

    /// Resizes the bitset to `count` bits, filling new bits with `value`.
    ///
    /// # Panics
    ///
    /// Panics if `count` exceeds `CAP`.
    pub fn resize(&mut self, count: usize, value: bool) {
        assert!(
            count <= CAP,
            "count must be no greater than capacity {CAP}, but got {count}."
        );
        let old = self.len();
        let mut bits = self.bits() & utils::low_mask(count);
        if value && count > old {
            bits |= utils::low_mask(count) & !utils::low_mask(old);
        }
        *self = Self::from_parts(bits, count);
    }

    /// Appends `bit` at the highest position.
    ///
    /// # Panics
    ///
    /// Panics if the bitset is full.
    pub fn push(&mut self, bit: bool) {
        let len = self.len();
        assert!(len < CAP, "DynamicBitset is full with {CAP} bits.");
        *self = Self::from_parts(self.bits() | ((bit as u64) << len), len + 1);
    }

    /// Removes the bit at the highest position and returns it, or [`None`] if empty.
    pub fn pop(&mut self) -> Option<bool> {
        let len = self.len().checked_sub(1)?;
        let bit = self.bit(len);
        *self = Self::from_parts(self.bits() & utils::low_mask(len), len);
        Some(bit)
    }

    /// Inserts `bit` at `pos`, moving the bits at and above it up by one.
    ///
    /// # Errors
    ///
    /// An error is returned if `pos` is greater than [`len()`](Self::len)
    /// or the bitset is full.
    pub fn insert(&mut self, pos: usize, bit: bool) -> Result<()> {
        let len = self.len();
        if pos > len {
            return Err(Error::out_of_range(pos, len + 1));
        }
        if len == CAP {
            return Err(Error::invalid_argument(format!(
                "DynamicBitset is full with {CAP} bits."
            )));
        }
        let low = self.bits() & utils::low_mask(pos);
        let high = (self.bits() & !utils::low_mask(pos)) << 1;
        *self = Self::from_parts(low | ((bit as u64) << pos) | high, len + 1);
        Ok(())
    }

    /// Removes and returns the bit at `pos`, moving the bits above it down by one.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] is returned if `pos` is not less than [`len()`](Self::len).
    pub fn remove(&mut self, pos: usize) -> Result<bool> {
        let bit = self.test(pos)?;
        let low = self.bits() & utils::low_mask(pos);
        let high = (self.bits() >> 1) & !utils::low_mask(pos);
        *self = Self::from_parts(low | high, self.len() - 1);
        Ok(bit)
    }

    /// Removes all bits.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Converts the payload into `T`.
    ///
    /// # Errors
    ///
    /// [`Error::Overflow`] is returned if the value does not fit in `T`.
    pub fn to_uint<T: NumCast>(&self) -> Result<T> {
        <T as NumCast>::from(self.bits()).ok_or_else(|| {
            Error::overflow(format!(
                "value {} does not fit in {}.",
                self.bits(),
                std::any::type_name::<T>()
            ))
        })
    }

    /// Converts the payload into [`c_ulong`].
    ///
    /// # Errors
    ///
    /// [`Error::Overflow`] is returned on targets where [`c_ulong`] is narrower than
    /// 58 bits and the value does not fit.
    pub fn to_ulong(&self) -> Result<c_ulong> {
        self.to_uint()
    }

    /// Converts the payload into [`c_ulonglong`].
    ///
    /// # Errors
    ///
    /// Never fails in practice, since [`c_ulonglong`] has at least 64 bits.
    pub fn to_ullong(&self) -> Result<c_ulonglong> {
        self.to_uint()
    }

    /// Converts the payload into [`u32`].
    ///
    /// # Errors
    ///
    /// [`Error::Overflow`] is returned if the value does not fit.
    pub fn to_u32(&self) -> Result<u32> {
        self.to_uint()
    }

    /// Renders the bits with `zero` and `one`, highest position first.
    pub fn to_string_with(&self, zero: char, one: char) -> String {
        (0..self.len())
            .rev()
            .map(|i| if self.bit(i) { one } else { zero })
            .collect()
    }

    /// Creates an iterator over the bits from position 0 upwards.
    pub const fn iter(&self) -> Iter<CAP> {
        Iter {
            bits: *self,
            pos: 0,
            end: self.len(),
        }
    }
}

impl<const CAP: usize> Default for DynamicBitset<CAP> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const CAP: usize> FromStr for DynamicBitset<CAP> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_bits_str(s)
    }
}

impl<const CAP: usize> fmt::Display for DynamicBitset<CAP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with('0', '1'))
    }
}

impl<const CAP: usize> fmt::Debug for DynamicBitset<CAP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DynamicBitset({self})")
    }
}

macro_rules! bitwise_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl<const CAP: usize> $assign_trait for DynamicBitset<CAP> {
            fn $assign_method(&mut self, rhs: Self) {
                debug_assert_eq!(self.len(), rhs.len(), "operands must have equal sizes");
                self.set_bits(self.bits() $op rhs.bits());
            }
        }

        impl<const CAP: usize> $trait for DynamicBitset<CAP> {
            type Output = Self;

            fn $method(mut self, rhs: Self) -> Self {
                self.$assign_method(rhs);
                self
            }
        }
    };
}

bitwise_op!(BitAnd, bitand, BitAndAssign, bitand_assign, &);
bitwise_op!(BitOr, bitor, BitOrAssign, bitor_assign, |);
bitwise_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, ^);

impl<const CAP: usize> Not for DynamicBitset<CAP> {
    type Output = Self;

    fn not(mut self) -> Self {
        self.flip_all();
        self
    }
}

impl<const CAP: usize> ShlAssign<usize> for DynamicBitset<CAP> {
    /// Moves every bit `shift` positions up; bits shifted past the size are dropped.
    fn shl_assign(&mut self, shift: usize) {
        debug_assert!(shift < self.len(), "shift must be less than the size");
        self.set_bits(self.bits() << shift);
    }
}

impl<const CAP: usize> ShrAssign<usize> for DynamicBitset<CAP> {
    fn shr_assign(&mut self, shift: usize) {
        debug_assert!(shift < self.len(), "shift must be less than the size");
        self.set_bits(self.bits() >> shift);
    }
}

impl<const CAP: usize> Shl<usize> for DynamicBitset<CAP> {
    type Output = Self;

    fn shl(mut self, shift: usize) -> Self {
        self <<= shift;
        self
    }
}

impl<const CAP: usize> Shr<usize> for DynamicBitset<CAP> {
    type Output = Self;

    fn shr(mut self, shift: usize) -> Self {
        self >>= shift;
        self
    }
}

/// Handle on one bit of a [`DynamicBitset`].
pub struct BitRef<'a> {
    word: &'a Cell<u64>,
    pos: usize,
}

impl BitRef<'_> {
    /// Returns the bit.
    #[inline(always)]
    pub fn get(&self) -> bool {
        (self.word.get() >> self.pos) & 1 == 1
    }

    /// Replaces the bit.
    #[inline(always)]
    pub fn set(&self, bit: bool) -> &Self {
        let mask = 1 << self.pos;
        let word = self.word.get();
        self.word.set(if bit { word | mask } else { word & !mask });
        self
    }

    /// Toggles the bit.
    pub fn flip(&self) -> &Self {
        self.word.set(self.word.get() ^ (1 << self.pos));
        self
    }
}

impl fmt::Debug for BitRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitRef")
            .field("pos", &self.pos)
            .field("bit", &self.get())
            .finish()
    }
}

/// Iterator over the bits of a [`DynamicBitset`], created by [`DynamicBitset::iter()`].
pub struct Iter<const CAP: usize> {
    bits: DynamicBitset<CAP>,
    pos: usize,
    end: usize,
}

impl<const CAP: usize> Iterator for Iter<CAP> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.pos < self.end {
            let bit = self.bits.bit(self.pos);
            self.pos += 1;
            Some(bit)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.pos;
        (n, Some(n))
    }
}

impl<const CAP: usize> DoubleEndedIterator for Iter<CAP> {
    fn next_back(&mut self) -> Option<bool> {
        if self.pos < self.end {
            self.end -= 1;
            Some(self.bits.bit(self.end))
        } else {
            None
        }
    }
}

impl<const CAP: usize> ExactSizeIterator for Iter<CAP> {}

impl<const CAP: usize> FusedIterator for Iter<CAP> {}

impl<const CAP: usize> IntoIterator for &DynamicBitset<CAP> {
    type Item = bool;
    type IntoIter = Iter<CAP>;

    fn into_iter(self) -> Iter<CAP> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Bitset = DynamicBitset<58>;

    #[test]
    fn single_word() {
        assert_eq!(std::mem::size_of::<Bitset>(), 8);
        let bs = Bitset::from_u64(PAYLOAD_MASK).unwrap();
        assert_eq!(bs.len(), 58);
        assert!(bs.all());
    }

    #[test]
    fn string_is_msb_first() {
        let bs: Bitset = "101".parse().unwrap();
        assert_eq!(bs.len(), 3);
        assert_eq!(bs.iter().collect::<Vec<_>>(), [true, false, true]);
        assert_eq!(bs.to_ulong().unwrap(), 5);

        let bs: Bitset = "110".parse().unwrap();
        assert!(!bs.bit(0));
        assert_eq!(bs.to_ullong().unwrap(), 6);
        assert_eq!(bs.to_string(), "110");
        assert_eq!(bs.to_string_with('.', '#'), "##.");
    }

    #[test]
    fn invalid_strings() {
        let e = "10a1".parse::<Bitset>();
        assert_eq!(
            e.err().map(|x| x.to_string()),
            Some("bit string must only contain '0' and '1', but got 'a'.".to_string())
        );
        let e = "11111".parse::<DynamicBitset<4>>();
        assert_eq!(
            e.err().map(|x| x.to_string()),
            Some("bit string must have at most 4 characters, but got 5.".to_string())
        );
        assert!("".parse::<Bitset>().unwrap().is_empty());
    }

    #[test]
    fn integers_beyond_capacity() {
        assert!(matches!(
            Bitset::from_u64(1 << 58),
            Err(Error::InvalidArgument(_))
        ));
        assert!(Bitset::from_u64(u64::MAX).is_err());
        assert!(DynamicBitset::<8>::from_u64(0x100).is_err());
        assert_eq!(DynamicBitset::<8>::from_u64(0xFF).unwrap().len(), 8);
        assert_eq!(Bitset::from_u64(0).unwrap().len(), 0);
    }

    #[test]
    fn checked_single_bit_operations() {
        let mut bs = Bitset::new();
        bs.resize(4, false);
        bs.set(1).unwrap().set(3).unwrap();
        assert_eq!(bs.to_string(), "1010");
        bs.flip(3).unwrap().reset(1).unwrap();
        assert!(bs.none());
        assert_eq!(
            bs.set(4).err().map(|x| x.to_string()),
            Some("index must be less than len()=4, but got 4.".to_string())
        );
        assert!(bs.test(4).is_err());
        assert!(bs.at(3).is_ok());
    }

    #[test]
    fn whole_set_operations() {
        let mut bs: Bitset = "0110".parse().unwrap();
        assert!(bs.any() && !bs.all() && !bs.none());
        assert_eq!(bs.count(), 2);
        bs.flip_all();
        assert_eq!(bs.to_string(), "1001");
        bs.set_all();
        assert!(bs.all());
        assert_eq!(bs.bits(), 0xF);
        bs.reset_all();
        assert_eq!((bs.len(), bs.bits()), (4, 0));
    }

    #[test]
    fn resize_fills_and_clears() {
        let mut bs: Bitset = "11".parse().unwrap();
        bs.resize(5, true);
        assert_eq!(bs.to_string(), "11111");
        bs.resize(1, false);
        assert_eq!(bs.bits(), 1);
        bs.resize(3, false);
        assert_eq!(bs.to_string(), "001");
    }

    #[test]
    #[should_panic]
    fn resize_beyond_capacity() {
        DynamicBitset::<3>::new().resize(4, false);
    }

    #[test]
    fn push_pop_insert_remove() {
        let mut bs = Bitset::new();
        bs.push(true);
        bs.push(false);
        bs.push(true);
        assert_eq!(bs.to_string(), "101");
        bs.insert(1, true).unwrap();
        assert_eq!(bs.to_string(), "1011");
        assert_eq!(bs.remove(0).unwrap(), true);
        assert_eq!(bs.to_string(), "101");
        assert_eq!(bs.pop(), Some(true));
        assert_eq!(bs.pop(), Some(false));
        assert_eq!(bs.pop(), Some(true));
        assert_eq!(bs.pop(), None);
        assert!(bs.insert(1, true).is_err());

        let mut full = DynamicBitset::<2>::from_u64(0b11).unwrap();
        assert!(full.insert(0, false).is_err());
        full.clear();
        assert!(full.is_empty());
        assert_eq!(full.capacity(), 2);
    }

    #[test]
    fn bitwise_operators() {
        let a: Bitset = "1100".parse().unwrap();
        let b: Bitset = "1010".parse().unwrap();
        assert_eq!((a & b).to_string(), "1000");
        assert_eq!((a | b).to_string(), "1110");
        assert_eq!((a ^ b).to_string(), "0110");
        assert_eq!((!a).to_string(), "0011");
        assert_eq!((a << 1).to_string(), "1000");
        assert_eq!((a >> 2).to_string(), "0011");
        let mut c = a;
        c ^= b;
        c <<= 3;
        assert_eq!(c.to_string(), "0000");
        assert_eq!((!a).len(), 4);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "shift must be less than the size")]
    fn shift_left_by_size() {
        let a: Bitset = "1100".parse().unwrap();
        let _ = a << 4;
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "shift must be less than the size")]
    fn shift_right_by_size() {
        let mut a: Bitset = "1100".parse().unwrap();
        a >>= 4;
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "operands must have equal sizes")]
    fn bitwise_on_different_sizes() {
        let a: Bitset = "1100".parse().unwrap();
        let b: Bitset = "10".parse().unwrap();
        let _ = a & b;
    }

    #[test]
    fn integer_conversions() {
        let bs = Bitset::from_u64(1 << 40).unwrap();
        assert_eq!(bs.to_ullong().unwrap(), 1 << 40);
        assert_eq!(bs.to_uint::<u64>().unwrap(), 1 << 40);
        assert!(matches!(bs.to_u32(), Err(Error::Overflow(_))));
        assert_eq!(
            bs.to_uint::<u8>().err().map(|x| x.to_string()),
            Some("value 1099511627776 does not fit in u8.".to_string())
        );
        assert_eq!(Bitset::from_u64(200).unwrap().to_uint::<u8>().unwrap(), 200);
    }

    #[test]
    fn handles() {
        let mut bs: Bitset = "000".parse().unwrap();
        bs.bit_mut(0).set(true);
        bs.at_mut(2).unwrap().flip();
        assert!(bs.at_mut(3).is_err());
        assert_eq!(bs.to_string(), "101");
        let r = bs.bit_mut(1);
        assert!(!r.get());
        r.set(true).set(false);
        assert_eq!(bs.len(), 3);
        assert_eq!(bs.to_string(), "101");
    }

    #[test]
    fn ordering_and_debug() {
        let a: Bitset = "1".parse().unwrap();
        let b: Bitset = "00".parse().unwrap();
        assert!(a < b);
        assert_eq!(format!("{a:?}"), "DynamicBitset(1)");
        assert_eq!((&b).into_iter().len(), 2);
    }
}

//! Growable vector storing alphabet letters in the minimum number of bits.
#![cfg(target_pointer_width = "64")]

use std::cell::Cell;
use std::cmp::Ordering;
use std::fmt;
use std::iter::{ExactSizeIterator, FusedIterator};
use std::marker::PhantomData;
use std::ops::Range;
use std::str::FromStr;

use anybytes::Bytes;

use crate::alphabet::{Alphabet, RankInt, Semialphabet};
use crate::error::{Error, Result};
use crate::serialization::Serializable;
use crate::utils;

/// Growable vector storing letters of `A` in
/// $`b = \max(1, \lceil \lg \sigma \rceil)`$ bits each.
///
/// Letter `i` lives in word `i / LETTERS_PER_WORD` at bit offset
/// `(i % LETTERS_PER_WORD) * BITS_PER_LETTER`. Bits past [`len()`](Self::len)
/// in the last word are always zero.
///
/// Insertions and removals at arbitrary positions always rebuild the word array
/// from scratch and swap it in, so a failing call leaves the vector untouched.
///
/// # Memory usage
///
/// $`64 \lceil n / \lfloor 64 / b \rfloor \rceil`$ bits for $`n`$ letters.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use seqpack::alphabet::{prelude::*, Dna4};
/// use seqpack::containers::BitcompressedVector;
///
/// let mut seq = BitcompressedVector::new();
/// seq.extend([Dna4::A, Dna4::C, Dna4::G]);
/// seq.insert(1, Dna4::T)?;
///
/// assert_eq!(seq.len(), 4);
/// assert_eq!(seq.get(1), Some(Dna4::T));
/// assert_eq!(seq.at(4).err().map(|e| e.to_string()),
///            Some("index must be less than len()=4, but got 4.".to_string()));
///
/// seq.letter_mut(0).set(Dna4::G);
/// assert_eq!(seq.to_string(), "GTCG");
/// # Ok(())
/// # }
/// ```
pub struct BitcompressedVector<A> {
    words: Vec<u64>,
    len: usize,
    _alphabet: PhantomData<A>,
}

/// Metadata describing the words of a [`BitcompressedVector`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    zerocopy::FromBytes,
    zerocopy::IntoBytes,
    zerocopy::KnownLayout,
    zerocopy::Immutable,
)]
#[repr(C)]
pub struct BitcompressedVectorMeta {
    /// Number of letters stored.
    pub len: u64,
    /// Number of bits used by a letter.
    pub bits_per_letter: u64,
}

#[inline(always)]
const fn read_field(word: u64, offset: usize, mask: u64) -> u64 {
    (word >> offset) & mask
}

#[inline(always)]
const fn write_field(word: u64, offset: usize, mask: u64, value: u64) -> u64 {
    (word & !(mask << offset)) | ((value & mask) << offset)
}

impl<A: Semialphabet> BitcompressedVector<A> {
    /// Number of bits used by a letter.
    pub const BITS_PER_LETTER: usize = utils::bits_for_size(A::SIZE);

    /// Number of letters held by a word.
    pub const LETTERS_PER_WORD: usize = utils::WORD_LEN / Self::BITS_PER_LETTER;

    const LETTER_MASK: u64 = utils::low_mask(Self::BITS_PER_LETTER);

    /// Creates an empty vector.
    pub const fn new() -> Self {
        Self {
            words: Vec::new(),
            len: 0,
            _alphabet: PhantomData,
        }
    }

    /// Creates an empty vector with space for at least `capa` letters.
    pub fn with_capacity(capa: usize) -> Self {
        Self {
            words: Vec::with_capacity(Self::words_for(capa)),
            len: 0,
            _alphabet: PhantomData,
        }
    }

    /// Creates a vector holding `len` copies of `letter`.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqpack::alphabet::Dna5;
    /// use seqpack::containers::BitcompressedVector;
    ///
    /// let seq = BitcompressedVector::from_elem(Dna5::N, 3);
    /// assert_eq!(seq.to_string(), "NNN");
    /// ```
    pub fn from_elem(letter: A, len: usize) -> Self {
        let mut v = Self::with_capacity(len);
        v.resize(len, letter);
        v
    }

    /// Rebuilds a vector from raw words as returned by [`words()`](Self::words).
    ///
    /// # Errors
    ///
    /// An error is returned if
    ///
    ///  - `words.len()` differs from the number of words needed for `len` letters,
    ///  - a letter's rank is not smaller than the alphabet size, or
    ///  - bits past `len` in the last word are set.
    pub fn from_raw_parts(words: Vec<u64>, len: usize) -> Result<Self> {
        let num_words = Self::words_for(len);
        if words.len() != num_words {
            return Err(Error::invalid_argument(format!(
                "{len} letters of {} bits need {num_words} words, but got {}.",
                Self::BITS_PER_LETTER,
                words.len()
            )));
        }
        let v = Self {
            words,
            len,
            _alphabet: PhantomData,
        };
        if let Some(pos) = (0..len).find(|&i| v.rank_at(i) >= A::SIZE) {
            return Err(Error::invalid_argument(format!(
                "rank at position {pos} must be less than the alphabet size {}, but got {}.",
                A::SIZE,
                v.rank_at(pos)
            )));
        }
        if v.trailing_bits() != 0 {
            return Err(Error::invalid_argument("bits past the last letter must be zero."));
        }
        Ok(v)
    }

    /// Returns the raw words.
    #[inline(always)]
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Consumes the vector, returning its raw words and length.
    pub fn into_raw_parts(self) -> (Vec<u64>, usize) {
        (self.words, self.len)
    }

    /// Gets the number of letters.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Checks if the vector is empty.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of letters the vector can hold without reallocating.
    ///
    /// Capacity is managed in whole words, so it grows in steps of
    /// [`LETTERS_PER_WORD`](Self::LETTERS_PER_WORD).
    pub fn capacity(&self) -> usize {
        self.words.capacity() * Self::LETTERS_PER_WORD
    }

    /// Reserves capacity for at least `additional` more letters.
    pub fn reserve(&mut self, additional: usize) {
        let needed = Self::words_for(self.len.saturating_add(additional));
        self.words.reserve(needed.saturating_sub(self.words.len()));
    }

    /// Shrinks the capacity as much as possible.
    pub fn shrink_to_fit(&mut self) {
        let before = self.words.capacity();
        self.words.shrink_to_fit();
        tracing::debug!(
            before,
            after = self.words.capacity(),
            "shrunk packed word storage"
        );
    }

    /// Returns the `pos`-th letter, or [`None`] if out of bounds.
    ///
    /// # Complexity
    ///
    /// Constant
    #[inline(always)]
    pub fn get(&self, pos: usize) -> Option<A> {
        (pos < self.len).then(|| self.letter(pos))
    }

    /// Returns the `pos`-th letter.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] is returned if `pos` is not less than [`len()`](Self::len).
    pub fn at(&self, pos: usize) -> Result<A> {
        self.check_index(pos)?;
        Ok(self.letter(pos))
    }

    /// Returns the `pos`-th letter without bounds checking.
    ///
    /// `pos < self.len()` is only checked in debug builds; out-of-bounds reads
    /// within the word array return an unspecified letter and reads past it panic.
    #[inline(always)]
    pub fn letter(&self, pos: usize) -> A {
        debug_assert!(pos < self.len);
        A::from_rank(A::Rank::from_u64_truncating(self.rank_at(pos)))
    }

    /// Returns a handle on the `pos`-th letter.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] is returned if `pos` is not less than [`len()`](Self::len).
    pub fn at_mut(&mut self, pos: usize) -> Result<Reference<'_, A>> {
        self.check_index(pos)?;
        Ok(self.letter_mut(pos))
    }

    /// Returns a handle on the `pos`-th letter without bounds checking.
    #[inline(always)]
    pub fn letter_mut(&mut self, pos: usize) -> Reference<'_, A> {
        debug_assert!(pos < self.len);
        Reference::new(self.cells(), pos)
    }

    /// Sets the `pos`-th letter.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] is returned if `pos` is not less than [`len()`](Self::len).
    pub fn set(&mut self, pos: usize, letter: A) -> Result<()> {
        self.check_index(pos)?;
        self.write_rank(pos, letter.to_rank_u64());
        Ok(())
    }

    /// Returns the first letter, or [`None`] if empty.
    pub fn first(&self) -> Option<A> {
        self.get(0)
    }

    /// Returns the last letter, or [`None`] if empty.
    pub fn last(&self) -> Option<A> {
        self.len.checked_sub(1).map(|pos| self.letter(pos))
    }

    /// Appends `letter` at the end.
    ///
    /// A word is added exactly when the current length is a multiple of
    /// [`LETTERS_PER_WORD`](Self::LETTERS_PER_WORD).
    ///
    /// # Complexity
    ///
    /// Constant (amortized)
    pub fn push(&mut self, letter: A) {
        if self.len % Self::LETTERS_PER_WORD == 0 {
            self.words.push(0);
        }
        self.len += 1;
        self.write_rank(self.len - 1, letter.to_rank_u64());
    }

    /// Removes the last letter and returns it, or [`None`] if empty.
    ///
    /// The last word is dropped exactly when it held only the removed letter;
    /// otherwise the vacated bits are cleared.
    pub fn pop(&mut self) -> Option<A> {
        let last = self.last()?;
        self.len -= 1;
        if self.len % Self::LETTERS_PER_WORD == 0 {
            self.words.pop();
        } else {
            self.write_rank(self.len, 0);
        }
        Some(last)
    }

    /// Inserts `letter` at `pos`, shifting all letters after it to the right.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] is returned if `pos` is greater than [`len()`](Self::len).
    ///
    /// # Complexity
    ///
    /// $`O(n)`$ regardless of `pos`; the word array is always rebuilt.
    pub fn insert(&mut self, pos: usize, letter: A) -> Result<()> {
        self.insert_n(pos, 1, letter)
    }

    /// Inserts `count` copies of `letter` at `pos`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] is returned if `pos` is greater than [`len()`](Self::len).
    pub fn insert_n(&mut self, pos: usize, count: usize, letter: A) -> Result<()> {
        self.insert_iter(pos, std::iter::repeat(letter).take(count))
    }

    /// Inserts all letters of `letters` at `pos`, keeping their order.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] is returned if `pos` is greater than [`len()`](Self::len).
    pub fn insert_iter<I>(&mut self, pos: usize, letters: I) -> Result<()>
    where
        I: IntoIterator<Item = A>,
    {
        if pos > self.len {
            return Err(Error::out_of_range(pos, self.len + 1));
        }
        let letters = letters.into_iter();
        let mut fresh = Self::with_capacity(self.len + letters.size_hint().0);
        fresh.extend(self.iter().take(pos));
        fresh.extend(letters);
        fresh.extend(self.iter().skip(pos));
        self.replace_with(fresh);
        Ok(())
    }

    /// Removes and returns the letter at `pos`, shifting all letters after it to the left.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] is returned if `pos` is not less than [`len()`](Self::len).
    pub fn remove(&mut self, pos: usize) -> Result<A> {
        let letter = self.at(pos)?;
        self.erase_range(pos..pos + 1)?;
        Ok(letter)
    }

    /// Removes the letters in `range`.
    ///
    /// # Errors
    ///
    /// An error is returned if `range` is decreasing or ends past [`len()`](Self::len).
    pub fn erase_range(&mut self, range: Range<usize>) -> Result<()> {
        if range.start > range.end {
            return Err(Error::invalid_argument(format!(
                "range must not be decreasing, but got {}..{}.",
                range.start, range.end
            )));
        }
        if range.end > self.len {
            return Err(Error::invalid_argument(format!(
                "range end must be no greater than self.len()={}, but got {}.",
                self.len, range.end
            )));
        }
        let mut fresh = Self::with_capacity(self.len - range.len());
        fresh.extend(self.iter().take(range.start));
        fresh.extend(self.iter().skip(range.end));
        self.replace_with(fresh);
        Ok(())
    }

    /// Resizes the vector to `new_len` letters, appending copies of `letter` when growing.
    pub fn resize(&mut self, new_len: usize, letter: A) {
        if new_len <= self.len {
            self.truncate(new_len);
        } else {
            self.reserve(new_len - self.len);
            let rank = letter.to_rank_u64();
            while self.len < new_len {
                if self.len % Self::LETTERS_PER_WORD == 0 {
                    self.words.push(0);
                }
                self.len += 1;
                self.write_rank(self.len - 1, rank);
            }
        }
    }

    /// Shortens the vector to `new_len` letters, clearing all bits past it.
    ///
    /// Has no effect if `new_len` is not less than the current length.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        self.len = new_len;
        self.words.truncate(Self::words_for(new_len));
        let used = (new_len % Self::LETTERS_PER_WORD) * Self::BITS_PER_LETTER;
        if used != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= utils::low_mask(used);
            }
        }
    }

    /// Removes all letters, keeping the allocated capacity.
    pub fn clear(&mut self) {
        self.words.clear();
        self.len = 0;
    }

    /// Swaps the letters at `i` and `j`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] is returned if either position is out of bounds.
    pub fn swap_elements(&mut self, i: usize, j: usize) -> Result<()> {
        self.check_index(i)?;
        self.check_index(j)?;
        let (ri, rj) = (self.rank_at(i), self.rank_at(j));
        self.write_rank(i, rj);
        self.write_rank(j, ri);
        Ok(())
    }

    /// Creates an iterator over the letters.
    pub const fn iter(&self) -> Iter<'_, A> {
        Iter::new(self)
    }

    /// Creates an iterator over handles on the letters.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqpack::alphabet::{Dna4, NucleotideAlphabet};
    /// use seqpack::containers::BitcompressedVector;
    ///
    /// let mut seq: BitcompressedVector<Dna4> = [Dna4::A, Dna4::C].into_iter().collect();
    /// for r in seq.iter_mut() {
    ///     r.set(r.get().complement());
    /// }
    /// assert_eq!(seq.to_string(), "TG");
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, A> {
        let len = self.len;
        IterMut {
            words: self.cells(),
            pos: 0,
            end: len,
            _alphabet: PhantomData,
        }
    }

    /// Collects all letters into a [`Vec`].
    pub fn to_vec(&self) -> Vec<A> {
        self.iter().collect()
    }

    #[inline(always)]
    const fn words_for(len: usize) -> usize {
        utils::ceiled_divide(len, Self::LETTERS_PER_WORD)
    }

    #[inline(always)]
    const fn locate(pos: usize) -> (usize, usize) {
        (
            pos / Self::LETTERS_PER_WORD,
            (pos % Self::LETTERS_PER_WORD) * Self::BITS_PER_LETTER,
        )
    }

    #[inline(always)]
    fn rank_at(&self, pos: usize) -> u64 {
        let (block, offset) = Self::locate(pos);
        read_field(self.words[block], offset, Self::LETTER_MASK)
    }

    #[inline(always)]
    fn write_rank(&mut self, pos: usize, rank: u64) {
        let (block, offset) = Self::locate(pos);
        self.words[block] = write_field(self.words[block], offset, Self::LETTER_MASK, rank);
    }

    fn trailing_bits(&self) -> u64 {
        let used = (self.len % Self::LETTERS_PER_WORD) * Self::BITS_PER_LETTER;
        match self.words.last() {
            Some(&last) if used != 0 => last & !utils::low_mask(used),
            Some(&last) if self.len % Self::LETTERS_PER_WORD == 0 => {
                // A full last word may still carry padding bits above the last letter.
                last & !utils::low_mask(Self::LETTERS_PER_WORD * Self::BITS_PER_LETTER)
            }
            _ => 0,
        }
    }

    fn cells(&mut self) -> &[Cell<u64>] {
        Cell::from_mut(self.words.as_mut_slice()).as_slice_of_cells()
    }

    fn check_index(&self, pos: usize) -> Result<()> {
        if pos < self.len {
            Ok(())
        } else {
            Err(Error::out_of_range(pos, self.len))
        }
    }

    fn replace_with(&mut self, fresh: Self) {
        tracing::trace!(
            old_len = self.len,
            new_len = fresh.len,
            words = fresh.words.len(),
            "rebuilt packed word storage"
        );
        *self = fresh;
    }
}

/// Handle on one letter of a [`BitcompressedVector`].
///
/// The handle borrows the vector's words, so the vector cannot be resized or
/// reallocated while it is alive. Several handles may coexist; since they share
/// words through [`Cell`], they cannot be sent to or shared with other threads.
pub struct Reference<'a, A> {
    words: &'a [Cell<u64>],
    pos: usize,
    _alphabet: PhantomData<A>,
}

impl<'a, A: Semialphabet> Reference<'a, A> {
    fn new(words: &'a [Cell<u64>], pos: usize) -> Self {
        Self {
            words,
            pos,
            _alphabet: PhantomData,
        }
    }

    /// Returns the position of the letter.
    pub const fn index(&self) -> usize {
        self.pos
    }

    /// Returns the rank of the letter.
    #[inline(always)]
    pub fn to_rank(&self) -> A::Rank {
        let (block, offset) = BitcompressedVector::<A>::locate(self.pos);
        let rank = read_field(
            self.words[block].get(),
            offset,
            BitcompressedVector::<A>::LETTER_MASK,
        );
        A::Rank::from_u64_truncating(rank)
    }

    /// Sets the letter by rank.
    #[inline(always)]
    pub fn assign_rank(&self, rank: A::Rank) -> &Self {
        debug_assert!(rank.into_u64() < A::SIZE);
        let (block, offset) = BitcompressedVector::<A>::locate(self.pos);
        let cell = &self.words[block];
        cell.set(write_field(
            cell.get(),
            offset,
            BitcompressedVector::<A>::LETTER_MASK,
            rank.into_u64(),
        ));
        self
    }

    /// Returns the letter.
    #[inline(always)]
    pub fn get(&self) -> A {
        A::from_rank(self.to_rank())
    }

    /// Replaces the letter.
    #[inline(always)]
    pub fn set(&self, letter: A) -> &Self {
        self.assign_rank(letter.to_rank())
    }
}

impl<A: Alphabet> Reference<'_, A> {
    /// Returns the character of the letter.
    pub fn to_char(&self) -> char {
        self.get().to_char()
    }

    /// Sets the letter from a character, mapping invalid characters to a fallback.
    pub fn assign_char(&self, chr: char) -> &Self {
        self.set(A::from_char(chr))
    }

    /// Sets the letter from a character.
    ///
    /// # Errors
    ///
    /// See [`Alphabet::assign_char_strictly`].
    pub fn assign_char_strictly(&self, chr: char) -> Result<&Self> {
        let letter = A::from_char_strictly(chr)?;
        Ok(self.set(letter))
    }
}

impl<A: Semialphabet> fmt::Debug for Reference<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reference")
            .field("pos", &self.pos)
            .field("letter", &self.get())
            .finish()
    }
}

/// Iterator for enumerating letters, created by [`BitcompressedVector::iter()`].
pub struct Iter<'a, A> {
    vec: &'a BitcompressedVector<A>,
    pos: usize,
    end: usize,
}

impl<'a, A: Semialphabet> Iter<'a, A> {
    /// Creates a new iterator.
    pub const fn new(vec: &'a BitcompressedVector<A>) -> Self {
        Self {
            vec,
            pos: 0,
            end: vec.len(),
        }
    }
}

impl<A: Semialphabet> Iterator for Iter<'_, A> {
    type Item = A;

    #[inline(always)]
    fn next(&mut self) -> Option<A> {
        if self.pos < self.end {
            let x = self.vec.letter(self.pos);
            self.pos += 1;
            Some(x)
        } else {
            None
        }
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.pos;
        (n, Some(n))
    }

    fn nth(&mut self, n: usize) -> Option<A> {
        self.pos = self.pos.saturating_add(n).min(self.end);
        self.next()
    }
}

impl<A: Semialphabet> DoubleEndedIterator for Iter<'_, A> {
    fn next_back(&mut self) -> Option<A> {
        if self.pos < self.end {
            self.end -= 1;
            Some(self.vec.letter(self.end))
        } else {
            None
        }
    }
}

impl<A: Semialphabet> ExactSizeIterator for Iter<'_, A> {}

impl<A: Semialphabet> FusedIterator for Iter<'_, A> {}

/// Iterator over letter handles, created by [`BitcompressedVector::iter_mut()`].
pub struct IterMut<'a, A> {
    words: &'a [Cell<u64>],
    pos: usize,
    end: usize,
    _alphabet: PhantomData<A>,
}

impl<'a, A: Semialphabet> Iterator for IterMut<'a, A> {
    type Item = Reference<'a, A>;

    fn next(&mut self) -> Option<Reference<'a, A>> {
        if self.pos < self.end {
            let r = Reference::new(self.words, self.pos);
            self.pos += 1;
            Some(r)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.pos;
        (n, Some(n))
    }
}

impl<A: Semialphabet> DoubleEndedIterator for IterMut<'_, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.pos < self.end {
            self.end -= 1;
            Some(Reference::new(self.words, self.end))
        } else {
            None
        }
    }
}

impl<A: Semialphabet> ExactSizeIterator for IterMut<'_, A> {}

impl<'a, A: Semialphabet> IntoIterator for &'a BitcompressedVector<A> {
    type Item = A;
    type IntoIter = Iter<'a, A>;

    fn into_iter(self) -> Iter<'a, A> {
        self.iter()
    }
}

impl<'a, A: Semialphabet> IntoIterator for &'a mut BitcompressedVector<A> {
    type Item = Reference<'a, A>;
    type IntoIter = IterMut<'a, A>;

    fn into_iter(self) -> IterMut<'a, A> {
        self.iter_mut()
    }
}

impl<A: Semialphabet> FromIterator<A> for BitcompressedVector<A> {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        let mut v = Self::new();
        v.extend(iter);
        v
    }
}

impl<A: Semialphabet> Extend<A> for BitcompressedVector<A> {
    fn extend<I: IntoIterator<Item = A>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for letter in iter {
            self.push(letter);
        }
    }
}

impl<A: Alphabet> FromStr for BitcompressedVector<A> {
    type Err = Error;

    /// Converts characters strictly.
    fn from_str(s: &str) -> Result<Self> {
        s.chars().map(A::from_char_strictly).collect()
    }
}

impl<A> Default for BitcompressedVector<A> {
    fn default() -> Self {
        Self {
            words: Vec::new(),
            len: 0,
            _alphabet: PhantomData,
        }
    }
}

impl<A> Clone for BitcompressedVector<A> {
    fn clone(&self) -> Self {
        Self {
            words: self.words.clone(),
            len: self.len,
            _alphabet: PhantomData,
        }
    }
}

impl<A> PartialEq for BitcompressedVector<A> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.words == other.words
    }
}

impl<A> Eq for BitcompressedVector<A> {}

impl<A> std::hash::Hash for BitcompressedVector<A> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        self.words.hash(state);
    }
}

impl<A: Semialphabet> PartialOrd for BitcompressedVector<A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Lexicographic by letter.
impl<A: Semialphabet> Ord for BitcompressedVector<A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<A: Semialphabet> fmt::Debug for BitcompressedVector<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<A: Alphabet> fmt::Display for BitcompressedVector<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.iter()
            .try_for_each(|letter| fmt::Write::write_char(f, letter.to_char()))
    }
}

impl<A: Semialphabet> Serializable for BitcompressedVector<A> {
    type Meta = BitcompressedVectorMeta;

    fn metadata(&self) -> Self::Meta {
        BitcompressedVectorMeta {
            len: self.len as u64,
            bits_per_letter: Self::BITS_PER_LETTER as u64,
        }
    }

    fn to_bytes(&self) -> Bytes {
        Bytes::from_source(self.words.clone())
    }

    /// Copies the words into a fresh, growable vector.
    fn from_bytes(meta: Self::Meta, bytes: Bytes) -> Result<Self> {
        if meta.bits_per_letter != Self::BITS_PER_LETTER as u64 {
            tracing::debug!(
                expected = Self::BITS_PER_LETTER,
                got = meta.bits_per_letter,
                "rejected packed vector metadata"
            );
            return Err(Error::invalid_metadata(format!(
                "bits_per_letter must be {}, but got {}.",
                Self::BITS_PER_LETTER,
                meta.bits_per_letter
            )));
        }
        let len = usize::try_from(meta.len)
            .map_err(|_| Error::invalid_metadata("len does not fit in usize"))?;
        let words = bytes.view::<[u64]>()?;
        let words: &[u64] = words.as_ref();
        if words.len() != Self::words_for(len) {
            tracing::debug!(len, words = words.len(), "rejected packed vector bytes");
            return Err(Error::invalid_metadata(format!(
                "{len} letters need {} words, but got {}.",
                Self::words_for(len),
                words.len()
            )));
        }
        Self::from_raw_parts(words.to_vec(), len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::{Cigar, CigarOp, Dna4, Dna5, Phred42};
    use crate::composite::Qualified;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaChaRng;

    #[test]
    fn layout_constants() {
        assert_eq!(BitcompressedVector::<Dna4>::BITS_PER_LETTER, 2);
        assert_eq!(BitcompressedVector::<Dna4>::LETTERS_PER_WORD, 32);
        assert_eq!(BitcompressedVector::<Dna5>::BITS_PER_LETTER, 3);
        assert_eq!(BitcompressedVector::<Dna5>::LETTERS_PER_WORD, 21);
        assert_eq!(BitcompressedVector::<Phred42>::BITS_PER_LETTER, 6);
        assert_eq!(BitcompressedVector::<Cigar>::BITS_PER_LETTER, 32);
        assert_eq!(BitcompressedVector::<Qualified<Dna4, Phred42>>::BITS_PER_LETTER, 8);
    }

    #[test]
    fn push_pop_word_granularity() {
        let mut v = BitcompressedVector::new();
        for i in 0..33u8 {
            v.push(Dna4::from_rank(i % 4));
        }
        assert_eq!(v.len(), 33);
        assert_eq!(v.words().len(), 2);
        assert_eq!(v.pop(), Some(Dna4::A));
        assert_eq!(v.len(), 32);
        assert_eq!(v.words().len(), 1);
        assert_eq!(v.pop(), Some(Dna4::T));
        assert_eq!(v.words().len(), 1);
        assert_eq!(v.words()[0] >> 62, 0);
    }

    #[test]
    fn pop_empty() {
        let mut v = BitcompressedVector::<Dna4>::new();
        assert_eq!(v.pop(), None);
        assert!(v.words().is_empty());
    }

    #[test]
    fn write_then_read_back() {
        let mut v = BitcompressedVector::from_elem(Dna5::A, 50);
        for i in 0..50 {
            v.letter_mut(i).set(Dna5::from_rank((i * 7 % 5) as u8));
        }
        for i in 0..50 {
            assert_eq!(v.letter(i), Dna5::from_rank((i * 7 % 5) as u8));
        }
        v.set(49, Dna5::N).unwrap();
        assert_eq!(v.last(), Some(Dna5::N));
    }

    #[test]
    fn shrinking_resize_clears_trailing_bits() {
        let mut v: BitcompressedVector<Dna4> = std::iter::repeat(Dna4::T).take(40).collect();
        assert_eq!(v.words(), &[u64::MAX, 0xFFFF]);
        v.resize(5, Dna4::A);
        assert_eq!(v.words(), &[0x3FF]);
        v.resize(8, Dna4::C);
        assert_eq!(v.words(), &[0x3FF | (0x15 << 10)]);
        v.truncate(0);
        assert!(v.words().is_empty());
    }

    #[test]
    fn trailing_bits_with_padding() {
        // 21 letters of 3 bits use 63 bits of a word.
        let v: BitcompressedVector<Dna5> = std::iter::repeat(Dna5::T).take(21).collect();
        assert_eq!(v.words()[0] >> 63, 0);
        let (words, len) = v.clone().into_raw_parts();
        assert_eq!(BitcompressedVector::from_raw_parts(words, len).unwrap(), v);
        let e = BitcompressedVector::<Dna5>::from_raw_parts(vec![1 << 63], 21);
        assert_eq!(
            e.err().map(|x| x.to_string()),
            Some("bits past the last letter must be zero.".to_string())
        );
    }

    #[test]
    fn raw_parts_validation() {
        let e = BitcompressedVector::<Dna4>::from_raw_parts(vec![0, 0], 3);
        assert_eq!(
            e.err().map(|x| x.to_string()),
            Some("3 letters of 2 bits need 1 words, but got 2.".to_string())
        );
        // Rank 7 is not a Dna5 letter.
        let e = BitcompressedVector::<Dna5>::from_raw_parts(vec![0b111_000], 2);
        assert!(matches!(e, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn checked_access() {
        let mut v: BitcompressedVector<Dna4> = "ACG".parse().unwrap();
        assert_eq!(v.at(2).unwrap(), Dna4::G);
        assert_eq!(
            v.at(3).err().map(|x| x.to_string()),
            Some("index must be less than len()=3, but got 3.".to_string())
        );
        assert!(v.at_mut(3).is_err());
        assert!(v.set(3, Dna4::A).is_err());
        assert_eq!(v.get(3), None);
        assert!("ACGN".parse::<BitcompressedVector<Dna4>>().is_err());
    }

    #[test]
    fn handles_write_through() {
        let mut v: BitcompressedVector<Dna4> = "AAAA".parse().unwrap();
        {
            let mut it = v.iter_mut();
            let a = it.next().unwrap();
            let b = it.next().unwrap();
            a.assign_char('G');
            b.assign_rank(1);
            assert_eq!(a.to_char(), 'G');
            assert!(b.assign_char_strictly('N').is_err());
        }
        v.at_mut(3).unwrap().assign_char('t');
        assert_eq!(v.to_string(), "GCAT");
        for r in &mut v {
            r.set(Dna4::A);
        }
        assert_eq!(v.to_string(), "AAAA");
    }

    #[test]
    fn insert_and_erase() {
        let mut v: BitcompressedVector<Dna4> = "ACGT".parse().unwrap();
        v.insert(0, Dna4::T).unwrap();
        v.insert(5, Dna4::A).unwrap();
        assert_eq!(v.to_string(), "TACGTA");
        v.insert_n(2, 3, Dna4::G).unwrap();
        assert_eq!(v.to_string(), "TAGGGCGTA");
        v.insert_iter(1, [Dna4::C, Dna4::C]).unwrap();
        assert_eq!(v.to_string(), "TCCAGGGCGTA");
        assert_eq!(v.remove(0).unwrap(), Dna4::T);
        v.erase_range(2..5).unwrap();
        assert_eq!(v.to_string(), "CCGCGTA");
        assert!(v.insert(8, Dna4::A).is_err());
        assert!(v.erase_range(3..9).is_err());
        assert!(v.remove(7).is_err());
        assert_eq!(v.to_string(), "CCGCGTA");
    }

    #[test]
    fn capacity_in_word_steps() {
        let mut v = BitcompressedVector::<Dna4>::with_capacity(33);
        assert!(v.capacity() >= 64);
        assert_eq!(v.capacity() % 32, 0);
        v.push(Dna4::A);
        v.shrink_to_fit();
        assert!(v.capacity() >= 32);
        v.reserve(100);
        assert!(v.capacity() >= 101);
        v.clear();
        assert!(v.is_empty());
    }

    #[test]
    fn swap_and_order() {
        let mut v: BitcompressedVector<Dna4> = "ACGT".parse().unwrap();
        v.swap_elements(0, 3).unwrap();
        assert_eq!(v.to_string(), "TCGA");
        assert!(v.swap_elements(0, 4).is_err());
        let a: BitcompressedVector<Dna4> = "ACG".parse().unwrap();
        let b: BitcompressedVector<Dna4> = "AG".parse().unwrap();
        let c: BitcompressedVector<Dna4> = "ACGA".parse().unwrap();
        assert!(a < b);
        assert!(a < c);
        assert_eq!(format!("{:?}", b), "[A, G]");
    }

    #[test]
    fn iterators() {
        let v: BitcompressedVector<Dna4> = "ACGTT".parse().unwrap();
        assert_eq!(v.iter().len(), 5);
        assert_eq!(
            v.iter().rev().collect::<Vec<_>>(),
            v.to_vec().into_iter().rev().collect::<Vec<_>>()
        );
        assert_eq!(v.iter().nth(2), Some(Dna4::G));
        assert_eq!(v.iter().nth(9), None);
        assert_eq!(v.first(), Some(Dna4::A));
    }

    #[test]
    fn wide_letters() {
        let mut v = BitcompressedVector::new();
        v.push(Cigar::new(5, CigarOp::SoftClip));
        v.push(Cigar::new(100, CigarOp::Match));
        v.push(Cigar::new(3, CigarOp::Deletion));
        assert_eq!(v.words().len(), 2);
        assert_eq!(v.letter(1).to_string(), "100M");
        assert_eq!(v.pop().map(|c| c.to_string()), Some("3D".to_string()));
        assert_eq!(v.words().len(), 1);
    }

    #[test]
    fn reference_assign_rank_is_idempotent() {
        let mut v: BitcompressedVector<Dna5> = "ACGTN".parse().unwrap();
        let words = v.words().to_vec();
        let r = v.letter_mut(2);
        r.assign_rank(4).assign_rank(4);
        assert_eq!(r.to_rank(), 4);
        assert_eq!(v.to_string(), "ACTTN");
        let r = v.letter_mut(2);
        r.assign_rank(2);
        r.assign_rank(2);
        assert_eq!(v.words(), &words[..]);
    }

    #[test]
    fn serialization_roundtrip() {
        let v: BitcompressedVector<Dna5> = "ACGTNNACGTNACGTNACGTNACG".parse().unwrap();
        let meta = v.metadata();
        let bytes = v.to_bytes();
        let other = BitcompressedVector::<Dna5>::from_bytes(meta, bytes.clone()).unwrap();
        assert_eq!(v, other);

        let e = BitcompressedVector::<Dna4>::from_bytes(meta, bytes.clone());
        assert_eq!(
            e.err().map(|x| x.to_string()),
            Some("bits_per_letter must be 2, but got 3.".to_string())
        );
        let bad = BitcompressedVectorMeta { len: 100, ..meta };
        assert!(matches!(
            BitcompressedVector::<Dna5>::from_bytes(bad, bytes),
            Err(Error::InvalidMetadata(_))
        ));
    }

    #[test]
    fn random_operations_match_vec() {
        let mut rng = ChaChaRng::seed_from_u64(13);
        let mut v = BitcompressedVector::<Dna5>::new();
        let mut model: Vec<Dna5> = Vec::new();
        for _ in 0..2000 {
            let letter = Dna5::from_rank(rng.gen_range(0..5));
            match rng.gen_range(0..6) {
                0 | 1 => {
                    v.push(letter);
                    model.push(letter);
                }
                2 => assert_eq!(v.pop(), model.pop()),
                3 => {
                    let pos = rng.gen_range(0..=model.len());
                    v.insert(pos, letter).unwrap();
                    model.insert(pos, letter);
                }
                4 if !model.is_empty() => {
                    let pos = rng.gen_range(0..model.len());
                    assert_eq!(v.remove(pos).unwrap(), model.remove(pos));
                }
                _ => {
                    let new_len = rng.gen_range(0..model.len() + 10);
                    v.resize(new_len, letter);
                    model.resize(new_len, letter);
                }
            }
            assert_eq!(v.len(), model.len());
            assert_eq!(v.words().len(), model.len().div_ceil(21));
        }
        assert_eq!(v.to_vec(), model);
        let (words, len) = v.into_raw_parts();
        assert!(BitcompressedVector::<Dna5>::from_raw_parts(words, len).is_ok());
    }
}

//! CIGAR operations and run-length CIGAR elements.
//!
//! A [`Cigar`] packs a count and a [`CigarOp`] into 32 bits exactly as BAM stores
//! a CIGAR element: the count in bits `[4, 32)` and the operation code in bits `[0, 4)`.
//! On little-endian targets the in-memory representation of a `&[Cigar]` therefore
//! equals the BAM byte encoding.
//!
//! The textual form follows the SAM grammar for a single element, `\d+[MIDNSHP=X]`.
use std::fmt;
use std::str::FromStr;

use zerocopy::{Immutable, IntoBytes, KnownLayout};

use crate::alphabet::{Alphabet, Semialphabet};
use crate::composite::{Component, ComponentMut, Has, Pos};
use crate::error::{Error, Result};

/// Bits reserved for the operation code.
pub const OP_BITS: u32 = 4;

/// Counts must be smaller than this bound to fit the packed layout.
pub const MAX_COUNT: u32 = 1 << (32 - OP_BITS);

/// Counts parsed by [`Cigar::assign_string`] must not exceed this bound.
///
/// This is `2 << 28`, twice [`MAX_COUNT`]: parsed counts in `MAX_COUNT..=PARSE_COUNT_BOUND`
/// are accepted and keep only their low 28 bits.
pub const PARSE_COUNT_BOUND: u64 = 2 << 28;

/// Minimum buffer length for [`Cigar::write_to`]: nine digits and one operation.
pub const CIGAR_STRING_CAPACITY: usize = 10;

/// An alignment operation as used in SAM/BAM CIGAR strings.
///
/// Ranks equal the BAM operation codes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum CigarOp {
    /// `M`: alignment match (sequence match or mismatch).
    #[default]
    Match,
    /// `I`: insertion to the reference.
    Insertion,
    /// `D`: deletion from the reference.
    Deletion,
    /// `N`: skipped region from the reference.
    Skip,
    /// `S`: soft clipping.
    SoftClip,
    /// `H`: hard clipping.
    HardClip,
    /// `P`: padding.
    Padding,
    /// `=`: sequence match.
    SequenceMatch,
    /// `X`: sequence mismatch.
    SequenceMismatch,
}

impl CigarOp {
    const LETTERS: [CigarOp; 9] = [
        CigarOp::Match,
        CigarOp::Insertion,
        CigarOp::Deletion,
        CigarOp::Skip,
        CigarOp::SoftClip,
        CigarOp::HardClip,
        CigarOp::Padding,
        CigarOp::SequenceMatch,
        CigarOp::SequenceMismatch,
    ];
    const CHARS: [char; 9] = ['M', 'I', 'D', 'N', 'S', 'H', 'P', '=', 'X'];

    /// Returns `true` if the operation consumes query bases.
    pub const fn consumes_query(self) -> bool {
        matches!(
            self,
            CigarOp::Match
                | CigarOp::Insertion
                | CigarOp::SoftClip
                | CigarOp::SequenceMatch
                | CigarOp::SequenceMismatch
        )
    }

    /// Returns `true` if the operation consumes reference bases.
    pub const fn consumes_reference(self) -> bool {
        matches!(
            self,
            CigarOp::Match
                | CigarOp::Deletion
                | CigarOp::Skip
                | CigarOp::SequenceMatch
                | CigarOp::SequenceMismatch
        )
    }

    fn from_code(code: u32) -> Option<Self> {
        Self::LETTERS.get(code as usize).copied()
    }
}

impl Semialphabet for CigarOp {
    type Rank = u8;
    const SIZE: u64 = 9;

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

impl Alphabet for CigarOp {
    #[inline(always)]
    fn to_char(self) -> char {
        Self::CHARS[self as usize]
    }

    /// Unknown characters, including lower-case operations, become [`CigarOp::Match`].
    fn assign_char(&mut self, chr: char) -> &mut Self {
        *self = Self::CHARS
            .iter()
            .position(|&c| c == chr)
            .map_or(CigarOp::Match, |i| Self::LETTERS[i]);
        self
    }
}

/// A CIGAR element: an operation and how many times it repeats.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use seqpack::alphabet::{Cigar, CigarOp};
///
/// let mut c = Cigar::new(223, CigarOp::Match);
/// assert_eq!(c.to_string(), "223M");
/// assert_eq!(c.to_bam(), (223 << 4) | 0);
///
/// c.assign_string("17S")?;
/// assert_eq!((c.count(), c.operation()), (17, CigarOp::SoftClip));
/// # Ok(())
/// # }
/// ```
#[derive(
    Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, IntoBytes, Immutable, KnownLayout,
)]
#[repr(transparent)]
pub struct Cigar(u32);

const _: () = assert!(std::mem::size_of::<Cigar>() == 4);

impl Cigar {
    /// Creates an element from a count and an operation.
    ///
    /// `count` must be smaller than [`MAX_COUNT`]; this is only checked in debug builds.
    #[inline(always)]
    pub const fn new(count: u32, op: CigarOp) -> Self {
        debug_assert!(count < MAX_COUNT);
        Self((count << OP_BITS) | op as u32)
    }

    /// Returns the count.
    #[inline(always)]
    pub const fn count(self) -> u32 {
        self.0 >> OP_BITS
    }

    /// Returns the operation.
    #[inline(always)]
    pub fn operation(self) -> CigarOp {
        CigarOp::LETTERS[(self.0 & 0xF) as usize]
    }

    /// Replaces the count, leaving the operation untouched.
    pub fn set_count(&mut self, count: u32) -> &mut Self {
        debug_assert!(count < MAX_COUNT);
        self.0 = (count << OP_BITS) | (self.0 & 0xF);
        self
    }

    /// Replaces the operation, leaving the count untouched.
    pub fn set_operation(&mut self, op: CigarOp) -> &mut Self {
        self.0 = (self.0 & !0xF) | op as u32;
        self
    }

    /// Returns the `I`-th component: `0` is the count, `1` the operation.
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

    /// Returns the component of type `T`, i.e., the count for [`u32`]
    /// and the operation for [`CigarOp`].
    pub fn get_by<T, Idx>(&self) -> T
    where
        Self: Has<T, Idx>,
    {
        <Self as Has<T, Idx>>::pluck(self)
    }

    /// Returns a mutable handle on the component of type `T`.
    pub fn get_mut_by<T, Idx>(&mut self) -> ComponentMut<'_, Self, T, Idx>
    where
        Self: Has<T, Idx>,
    {
        ComponentMut::new(self)
    }

    /// Sets the element from its SAM text form, e.g. `"223M"`.
    ///
    /// On error the element is left unchanged.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if the text before the last character is not a
    ///   non-empty run of decimal digits, or if the count exceeds [`PARSE_COUNT_BOUND`].
    /// - [`Error::InvalidCharAssignment`] if the last character is not one of `MIDNSHP=X`.
    pub fn assign_string(&mut self, text: &str) -> Result<&mut Self> {
        let Some(op_char) = text.chars().last() else {
            return Err(Error::invalid_argument("CIGAR element must not be empty."));
        };
        if op_char.is_ascii_digit() {
            return Err(Error::invalid_argument(format!(
                "CIGAR element {text:?} lacks an operation."
            )));
        }
        let digits = &text[..text.len() - op_char.len_utf8()];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::invalid_argument(format!(
                "Illegal count {digits:?} in CIGAR element {text:?}."
            )));
        }
        let count = match digits.parse::<u64>() {
            Ok(count) if count <= PARSE_COUNT_BOUND => count,
            _ => {
                return Err(Error::invalid_argument(format!(
                    "Count {digits} in CIGAR element {text:?} must not exceed {PARSE_COUNT_BOUND}."
                )))
            }
        };
        let op = CigarOp::from_char_strictly(op_char)?;
        self.0 = ((count as u32) << OP_BITS) | op as u32;
        Ok(self)
    }

    /// Writes the SAM text form into `buffer` and returns it as a string slice.
    ///
    /// No terminator is written.
    pub fn write_to<'b>(&self, buffer: &'b mut [u8; CIGAR_STRING_CAPACITY]) -> &'b str {
        let mut count = self.count();
        let mut digits = [0u8; CIGAR_STRING_CAPACITY - 1];
        let mut num_digits = 0;
        loop {
            digits[num_digits] = b'0' + (count % 10) as u8;
            num_digits += 1;
            count /= 10;
            if count == 0 {
                break;
            }
        }
        for (dst, &src) in buffer.iter_mut().zip(digits[..num_digits].iter().rev()) {
            *dst = src;
        }
        buffer[num_digits] = self.operation().to_char() as u8;
        // Only ASCII digits and operation characters were written.
        std::str::from_utf8(&buffer[..=num_digits]).unwrap_or_default()
    }

    /// Returns the SAM text form in a fixed-capacity buffer.
    pub fn to_small_string(&self) -> SmallString {
        let mut buf = [0u8; CIGAR_STRING_CAPACITY];
        let len = self.write_to(&mut buf).len();
        SmallString { buf, len }
    }

    /// Returns the BAM encoding.
    #[inline(always)]
    pub const fn to_bam(self) -> u32 {
        self.0
    }

    /// Creates an element from its BAM encoding.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] is returned if the operation code is not in `0..9`.
    pub fn from_bam(raw: u32) -> Result<Self> {
        match CigarOp::from_code(raw & 0xF) {
            Some(_) => Ok(Self(raw)),
            None => Err(Error::invalid_argument(format!(
                "BAM CIGAR operation code must be in 0..9, but got {}.",
                raw & 0xF
            ))),
        }
    }

    /// Returns the BAM bytes (little endian).
    pub const fn to_bam_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }
}

/// Decodes a BAM CIGAR array.
///
/// # Errors
///
/// [`Error::InvalidArgument`] is returned if `bytes` is not a multiple of four bytes long
/// or contains an invalid operation code.
pub fn cigars_from_bam_bytes(bytes: &[u8]) -> Result<Vec<Cigar>> {
    if bytes.len() % 4 != 0 {
        return Err(Error::invalid_argument(format!(
            "BAM CIGAR array length must be a multiple of 4, but got {}.",
            bytes.len()
        )));
    }
    bytes
        .chunks_exact(4)
        .map(|chunk| Cigar::from_bam(u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])))
        .collect()
}

/// Encodes elements as a BAM CIGAR array.
pub fn cigars_to_bam_bytes(cigars: &[Cigar]) -> Vec<u8> {
    if cfg!(target_endian = "little") {
        cigars.as_bytes().to_vec()
    } else {
        cigars.iter().flat_map(|c| c.to_bam_bytes()).collect()
    }
}

impl Semialphabet for Cigar {
    type Rank = u32;
    const SIZE: u64 = MAX_COUNT as u64 * CigarOp::SIZE;

    /// Returns `count * 9 + operation`, so that the twelve unused operation codes
    /// of the packed layout never appear among the ranks.
    #[inline(always)]
    fn to_rank(self) -> u32 {
        self.count() * CigarOp::SIZE as u32 + self.operation() as u32
    }

    #[inline(always)]
    fn assign_rank(&mut self, rank: u32) -> &mut Self {
        debug_assert!((rank as u64) < Self::SIZE);
        let ops = CigarOp::SIZE as u32;
        self.0 = ((rank / ops) << OP_BITS) | (rank % ops);
        self
    }
}

impl Component<0> for Cigar {
    type Output = u32;

    fn component(&self) -> u32 {
        self.count()
    }

    fn set_component(&mut self, value: u32) {
        self.set_count(value);
    }
}

impl Component<1> for Cigar {
    type Output = CigarOp;

    fn component(&self) -> CigarOp {
        self.operation()
    }

    fn set_component(&mut self, value: CigarOp) {
        self.set_operation(value);
    }
}

impl Has<u32, Pos<0>> for Cigar {
    fn pluck(&self) -> u32 {
        self.count()
    }

    fn put(&mut self, value: u32) {
        self.set_count(value);
    }
}

impl Has<CigarOp, Pos<1>> for Cigar {
    fn pluck(&self) -> CigarOp {
        self.operation()
    }

    fn put(&mut self, value: CigarOp) {
        self.set_operation(value);
    }
}

impl From<CigarOp> for Cigar {
    fn from(op: CigarOp) -> Self {
        Self::new(0, op)
    }
}

impl FromStr for Cigar {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut c = Self::default();
        c.assign_string(s)?;
        Ok(c)
    }
}

impl fmt::Display for Cigar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count(), self.operation().to_char())
    }
}

impl fmt::Debug for Cigar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cigar({self})")
    }
}

/// Owned fixed-capacity text form of a [`Cigar`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SmallString {
    buf: [u8; CIGAR_STRING_CAPACITY],
    len: usize,
}

impl SmallString {
    /// Returns the text.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.buf[..self.len]).unwrap_or_default()
    }
}

impl std::ops::Deref for SmallString {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SmallString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for SmallString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_bam() {
        assert_eq!(std::mem::size_of::<Cigar>(), 4);
        let c = Cigar::new(223, CigarOp::Match);
        assert_eq!(c.to_bam(), 223 << 4);
        assert_eq!(c.to_bam_bytes(), [0xF0, 0x0D, 0x00, 0x00]);
        assert_eq!(Cigar::new(5, CigarOp::SequenceMismatch).to_bam(), 0x58);
    }

    #[test]
    fn bam_byte_arrays() {
        // 5S 100M 2I 3D from a BAM record.
        let bytes = [
            0x54, 0x00, 0x00, 0x00, 0x40, 0x06, 0x00, 0x00, 0x21, 0x00, 0x00, 0x00, 0x32, 0x00,
            0x00, 0x00,
        ];
        let cigars = cigars_from_bam_bytes(&bytes).unwrap();
        let text: Vec<String> = cigars.iter().map(|c| c.to_string()).collect();
        assert_eq!(text, ["5S", "100M", "2I", "3D"]);
        assert_eq!(cigars_to_bam_bytes(&cigars), bytes);
    }

    #[test]
    fn bam_rejects_invalid_codes() {
        let e = Cigar::from_bam(0x19);
        assert_eq!(
            e.err().map(|x| x.to_string()),
            Some("BAM CIGAR operation code must be in 0..9, but got 9.".to_string())
        );
        assert!(cigars_from_bam_bytes(&[0, 0, 0]).is_err());
    }

    #[test]
    fn to_string_and_back() {
        let c = Cigar::new(223, CigarOp::Match);
        assert_eq!(c.to_string(), "223M");
        assert_eq!(c.to_small_string().as_str(), "223M");
        let mut buf = [0u8; CIGAR_STRING_CAPACITY];
        assert_eq!(c.write_to(&mut buf), "223M");
        assert_eq!(Cigar::new(0, CigarOp::Padding).to_string(), "0P");
        let max = Cigar::new(MAX_COUNT - 1, CigarOp::SequenceMatch);
        assert_eq!(max.write_to(&mut buf), "268435455=");

        let mut parsed = Cigar::default();
        parsed.assign_string("223M").unwrap();
        assert_eq!(parsed.count(), 223);
        assert_eq!(parsed.operation(), CigarOp::Match);
        assert_eq!("42=".parse::<Cigar>().unwrap(), Cigar::new(42, CigarOp::SequenceMatch));
    }

    #[test]
    fn missing_operation_is_malformed() {
        let e = Cigar::default().assign_string("223").err();
        assert!(matches!(e, Some(Error::InvalidArgument(_))));
    }

    #[test]
    fn unknown_operation_is_rejected() {
        let e = Cigar::default().assign_string("223L").err();
        assert!(matches!(
            e,
            Some(Error::InvalidCharAssignment { character: 'L', .. })
        ));
        let e = Cigar::default().assign_string("223m").err();
        assert!(matches!(
            e,
            Some(Error::InvalidCharAssignment { character: 'm', .. })
        ));
    }

    #[test]
    fn malformed_counts() {
        for text in ["5000000000M", "M", "", "+5M", "1 M", "-3M", "12a4M"] {
            let e = Cigar::default().assign_string(text).err();
            assert!(
                matches!(e, Some(Error::InvalidArgument(_))),
                "{text:?} should be malformed"
            );
        }
    }

    #[test]
    fn failed_parse_leaves_value_unchanged() {
        let mut c = Cigar::new(7, CigarOp::Deletion);
        assert!(c.assign_string("9Q").is_err());
        assert_eq!(c, Cigar::new(7, CigarOp::Deletion));
    }

    #[test]
    fn parse_bound_is_twice_the_packed_width() {
        // Counts up to 2 << 28 pass the parser although only 28 bits are stored.
        let mut c = Cigar::default();
        c.assign_string("268435456M").unwrap();
        assert_eq!(c.count(), 0);
        c.assign_string("268435457I").unwrap();
        assert_eq!((c.count(), c.operation()), (1, CigarOp::Insertion));
        assert!(c.assign_string("536870912M").is_ok());
        assert!(c.assign_string("536870913M").is_err());
    }

    #[test]
    fn components() {
        let mut c = Cigar::new(10, CigarOp::Insertion);
        assert_eq!(c.get::<0>(), 10);
        assert_eq!(c.get::<1>(), CigarOp::Insertion);
        assert_eq!(c.get_by::<u32, _>(), 10);
        c.get_mut::<0>().set(11);
        c.get_mut_by::<CigarOp, _>().assign_char('D');
        assert_eq!(c, Cigar::new(11, CigarOp::Deletion));
        c.get_mut::<1>().update(|_| CigarOp::HardClip);
        assert_eq!(c.to_string(), "11H");
    }

    #[test]
    fn ranks_are_dense() {
        assert_eq!(Cigar::SIZE, 9 << 28);
        let c = Cigar::new(3, CigarOp::Skip);
        assert_eq!(c.to_rank(), 3 * 9 + 3);
        assert_eq!(Cigar::from_rank(30), c);
        for rank in (0..2000u32).chain((Cigar::SIZE as u32 - 20)..Cigar::SIZE as u32) {
            assert_eq!(Cigar::from_rank(rank).to_rank(), rank);
        }
        assert!(Cigar::new(2, CigarOp::SequenceMismatch) < Cigar::new(3, CigarOp::Match));
    }

    #[test]
    fn assign_rank_is_idempotent() {
        let mut c = Cigar::new(5, CigarOp::Padding);
        c.assign_rank(1234);
        let once = c;
        c.assign_rank(1234);
        assert_eq!(c, once);
        assert_eq!((c.count(), c.operation()), (137, CigarOp::Insertion));
        assert_eq!(c.to_bam(), (137 << 4) | 1);
    }

    #[test]
    fn operation_queries() {
        assert!(CigarOp::Match.consumes_query() && CigarOp::Match.consumes_reference());
        assert!(CigarOp::Insertion.consumes_query() && !CigarOp::Insertion.consumes_reference());
        assert!(!CigarOp::Deletion.consumes_query() && CigarOp::Deletion.consumes_reference());
        assert!(!CigarOp::HardClip.consumes_query() && !CigarOp::HardClip.consumes_reference());
    }
}

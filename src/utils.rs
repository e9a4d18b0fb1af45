//! Utilities for bit-width arithmetic.

/// The number of bits in a storage word.
pub const WORD_LEN: usize = u64::BITS as usize;

/// Gets the number of bits needed to represent `x`, which is at least one.
///
/// # Examples
///
/// ```
/// use seqpack::utils::needed_bits;
///
/// assert_eq!(needed_bits(0), 1);
/// assert_eq!(needed_bits(3), 2);
/// assert_eq!(needed_bits(4), 3);
/// ```
pub const fn needed_bits(x: u64) -> usize {
    if x == 0 {
        1
    } else {
        (u64::BITS - x.leading_zeros()) as usize
    }
}

/// Gets the number of bits a letter of an alphabet with `size` values occupies,
/// i.e., $`\max(1, \lceil \lg \textrm{size} \rceil)`$.
pub const fn bits_for_size(size: u64) -> usize {
    needed_bits(size.saturating_sub(1))
}

/// Computes the ceiling of `x / y`.
pub const fn ceiled_divide(x: usize, y: usize) -> usize {
    if x == 0 {
        0
    } else {
        (x - 1) / y + 1
    }
}

/// Returns a mask with the lowest `len` bits set.
#[inline(always)]
pub const fn low_mask(len: usize) -> u64 {
    if len >= WORD_LEN {
        u64::MAX
    } else {
        (1 << len) - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_for_alphabet_sizes() {
        assert_eq!(bits_for_size(1), 1);
        assert_eq!(bits_for_size(2), 1);
        assert_eq!(bits_for_size(4), 2);
        assert_eq!(bits_for_size(5), 3);
        assert_eq!(bits_for_size(42), 6);
        assert_eq!(bits_for_size(1 << 32), 32);
    }

    #[test]
    fn ceiled_divide_rounds_up() {
        assert_eq!(ceiled_divide(0, 32), 0);
        assert_eq!(ceiled_divide(32, 32), 1);
        assert_eq!(ceiled_divide(33, 32), 2);
    }

    #[test]
    fn low_mask_edges() {
        assert_eq!(low_mask(0), 0);
        assert_eq!(low_mask(2), 0b11);
        assert_eq!(low_mask(64), u64::MAX);
    }
}

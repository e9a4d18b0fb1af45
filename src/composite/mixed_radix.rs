//! Mixed-radix arithmetic shared by composite alphabets.
//!
//! Given component sizes $`\sigma_0, \dots, \sigma_{n-1}`$, a vector of digits
//! $`(r_0, \dots, r_{n-1})`$ with $`r_i < \sigma_i`$ is encoded as
//! $`\sum_i r_i w_i`$ with weights $`w_i = \prod_{j > i} \sigma_j`$.
//! All helpers are `const fn` so that weights and lookup tables are computed at compile time.

/// Combined sizes below this bound decode digits through a precomputed table.
pub const TABLE_THRESHOLD: u64 = 1024;

/// Table mapping every combined rank below [`TABLE_THRESHOLD`] to its digits.
pub type DigitTable<const N: usize> = [[u16; N]; TABLE_THRESHOLD as usize];

/// Returns the product of `sizes`.
///
/// # Panics
///
/// Panics (at compile time when used in a constant) if the product overflows [`u64`].
pub const fn product<const N: usize>(sizes: [u64; N]) -> u64 {
    let mut acc = 1u64;
    let mut i = 0;
    while i < N {
        acc = match acc.checked_mul(sizes[i]) {
            Some(x) => x,
            None => panic!("combined alphabet size overflows u64"),
        };
        i += 1;
    }
    acc
}

/// Returns the weight of every digit, i.e., the reverse cumulative products of `sizes`.
pub const fn weights<const N: usize>(sizes: [u64; N]) -> [u64; N] {
    let mut w = [1u64; N];
    let mut i = N;
    while i > 1 {
        i -= 1;
        w[i - 1] = match w[i].checked_mul(sizes[i]) {
            Some(x) => x,
            None => panic!("combined alphabet size overflows u64"),
        };
    }
    w
}

/// Builds the rank-to-digits table.
///
/// The table is only filled when the combined size is below [`TABLE_THRESHOLD`];
/// otherwise it stays zeroed and must not be consulted.
pub const fn digit_table<const N: usize>(sizes: [u64; N], weights: [u64; N]) -> DigitTable<N> {
    let mut table = [[0u16; N]; TABLE_THRESHOLD as usize];
    let total = product(sizes);
    if total >= TABLE_THRESHOLD {
        return table;
    }
    let mut rank = 0;
    while rank < total {
        let mut i = 0;
        while i < N {
            table[rank as usize][i] = ((rank / weights[i]) % sizes[i]) as u16;
            i += 1;
        }
        rank += 1;
    }
    table
}

/// Encodes `digits` with the given `weights`.
#[inline(always)]
pub fn encode<const N: usize>(digits: [u64; N], weights: [u64; N]) -> u64 {
    digits.iter().zip(weights.iter()).map(|(d, w)| d * w).sum()
}

/// Extracts the digit with `weight` and `size` from `rank` by division.
#[inline(always)]
pub const fn decode_digit(rank: u64, weight: u64, size: u64) -> u64 {
    (rank / weight) % size
}

/// Replaces the digit with `weight` in `rank`, given its current value `old`.
///
/// Only that digit's contribution changes: the old one is subtracted and the new one added.
#[inline(always)]
pub const fn replace_digit(rank: u64, weight: u64, old: u64, new: u64) -> u64 {
    rank - old * weight + new * weight
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_are_reverse_products() {
        assert_eq!(weights([4, 5]), [5, 1]);
        assert_eq!(weights([42, 42, 5]), [210, 5, 1]);
        assert_eq!(weights([7]), [1]);
    }

    #[test]
    fn encode_decode_roundtrip() {
        let sizes = [4, 5, 3];
        let w = weights(sizes);
        for rank in 0..product(sizes) {
            let digits = [
                decode_digit(rank, w[0], sizes[0]),
                decode_digit(rank, w[1], sizes[1]),
                decode_digit(rank, w[2], sizes[2]),
            ];
            assert_eq!(encode(digits, w), rank);
        }
    }

    #[test]
    fn table_matches_division() {
        const SIZES: [u64; 2] = [4, 5];
        const W: [u64; 2] = weights(SIZES);
        const TABLE: DigitTable<2> = digit_table(SIZES, W);
        for rank in 0..20u64 {
            assert_eq!(TABLE[rank as usize][0] as u64, decode_digit(rank, W[0], 4));
            assert_eq!(TABLE[rank as usize][1] as u64, decode_digit(rank, W[1], 5));
        }
    }

    #[test]
    fn replace_only_touches_one_digit() {
        let w = weights([4, 5]);
        let rank = encode([1, 3], w);
        assert_eq!(replace_digit(rank, w[0], 1, 2), encode([2, 3], w));
        assert_eq!(replace_digit(rank, w[1], 3, 0), encode([1, 0], w));
    }
}

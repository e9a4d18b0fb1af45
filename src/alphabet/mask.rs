//! The mask semialphabet.

use crate::alphabet::Semialphabet;

/// Marks a letter as masked or unmasked.
///
/// This is a semialphabet without characters; see [`Masked`](crate::composite::Masked)
/// for pairing it with a sequence letter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Mask {
    /// The letter is not masked.
    #[default]
    Unmasked,
    /// The letter is masked.
    Masked,
}

impl Mask {
    /// Returns `true` for [`Mask::Masked`].
    pub const fn is_masked(self) -> bool {
        matches!(self, Mask::Masked)
    }
}

impl From<bool> for Mask {
    fn from(masked: bool) -> Self {
        if masked {
            Mask::Masked
        } else {
            Mask::Unmasked
        }
    }
}

impl Semialphabet for Mask {
    type Rank = u8;
    const SIZE: u64 = 2;

    #[inline(always)]
    fn to_rank(self) -> u8 {
        self as u8
    }

    #[inline(always)]
    fn assign_rank(&mut self, rank: u8) -> &mut Self {
        debug_assert!(rank < 2);
        *self = Mask::from(rank != 0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks() {
        assert_eq!(Mask::Unmasked.to_rank(), 0);
        assert_eq!(Mask::from_rank(1), Mask::Masked);
        assert!(Mask::from(true).is_masked());
    }
}

//! Fixed-width set of button slots.

use crate::MAX_BUTTONS;

/// A set of button slots, one bit per registered slot.
///
/// Slot `n` maps to bit `n`. Only the low [`MAX_BUTTONS`] bits are ever set;
/// operations on out-of-range slots are no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonMask(u16);

impl ButtonMask {
    /// The empty set.
    pub const EMPTY: Self = ButtonMask(0);

    const VALID: u16 = ((1u32 << MAX_BUTTONS) - 1) as u16;

    /// Creates a mask from raw bits, discarding bits beyond [`MAX_BUTTONS`].
    #[inline]
    pub const fn from_bits(bits: u16) -> Self {
        ButtonMask(bits & Self::VALID)
    }

    /// Creates a mask containing only `slot`.
    #[inline]
    pub const fn single(slot: usize) -> Self {
        if slot < MAX_BUTTONS {
            ButtonMask(1 << slot)
        } else {
            Self::EMPTY
        }
    }

    /// Returns the raw bits.
    #[inline]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Adds `slot` to the set.
    #[inline]
    pub fn insert(&mut self, slot: usize) {
        self.0 |= Self::single(slot).0;
    }

    /// Removes `slot` from the set.
    #[inline]
    pub fn remove(&mut self, slot: usize) {
        self.0 &= !Self::single(slot).0;
    }

    /// Returns true if `slot` is in the set.
    #[inline]
    pub const fn contains(self, slot: usize) -> bool {
        slot < MAX_BUTTONS && self.0 & (1 << slot) != 0
    }

    /// Number of slots in the set.
    #[inline]
    pub const fn count(self) -> u8 {
        self.0.count_ones() as u8
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        ButtonMask(self.0 | other.0)
    }

    /// Returns true if every slot of `self` is also in `other`.
    #[inline]
    pub const fn is_subset(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    /// Lowest slot in the set, if any.
    #[inline]
    pub fn first(self) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(self.0.trailing_zeros() as usize)
        }
    }

    /// Iterates set slots in ascending order.
    pub fn iter(self) -> impl Iterator<Item = usize> {
        (0..MAX_BUTTONS).filter(move |&slot| self.contains(slot))
    }
}

impl From<ButtonMask> for u16 {
    fn from(mask: ButtonMask) -> Self {
        mask.0
    }
}

impl core::ops::BitOr for ButtonMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl core::ops::BitOrAssign for ButtonMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

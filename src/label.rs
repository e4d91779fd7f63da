//! Human-readable report labels.

use crate::mask::ButtonMask;
use crate::pins::PinRegistry;
use crate::types::Role;

/// Projection of a button mask onto the three role slots.
///
/// Bit 0 is left, bit 1 right, bit 2 bottom. Buttons without a role do not
/// appear in the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RoleCode(u8);

impl RoleCode {
    pub const NONE: RoleCode = RoleCode(0);

    /// Builds a code from raw bits, keeping only the three role bits.
    pub const fn from_bits(bits: u8) -> Self {
        RoleCode(bits & 0b111)
    }

    /// Projects `mask` onto the role slots known to `registry`.
    pub fn project(mask: ButtonMask, registry: &PinRegistry) -> Self {
        let bits = Role::ALL
            .into_iter()
            .filter(|&role| registry.role_slot(role).is_some_and(|slot| mask.contains(slot)))
            .fold(0, |acc, role| acc | role.code_bit());
        RoleCode(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }
}

/// Text attached to every [`Report`](crate::Report).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Label {
    LeftIn,
    LeftOut,
    RightIn,
    RightOut,
    BottomIn,
    BottomOut,
    LeftShort,
    LeftLong,
    RightShort,
    RightLong,
    BottomShort,
    BottomLong,
    LeftRightShort,
    LeftRightLong,
    LeftBottomShort,
    LeftBottomLong,
    RightBottomShort,
    RightBottomLong,
    LeftRightBottomShort,
    LeftRightBottomLong,
    /// The mask contains no role button.
    Unknown,
}

impl Label {
    /// Label for a confirmed press (`-in`) or release (`-out`) of a role button.
    pub const fn edge(role: Role, pressed: bool) -> Self {
        match (role, pressed) {
            (Role::Left, true) => Label::LeftIn,
            (Role::Left, false) => Label::LeftOut,
            (Role::Right, true) => Label::RightIn,
            (Role::Right, false) => Label::RightOut,
            (Role::Bottom, true) => Label::BottomIn,
            (Role::Bottom, false) => Label::BottomOut,
        }
    }

    /// Label for a long-press or session report covering the roles in `code`.
    pub const fn combo(code: RoleCode, long: bool) -> Self {
        match (code.bits(), long) {
            (0b001, false) => Label::LeftShort,
            (0b001, true) => Label::LeftLong,
            (0b010, false) => Label::RightShort,
            (0b010, true) => Label::RightLong,
            (0b100, false) => Label::BottomShort,
            (0b100, true) => Label::BottomLong,
            (0b011, false) => Label::LeftRightShort,
            (0b011, true) => Label::LeftRightLong,
            (0b101, false) => Label::LeftBottomShort,
            (0b101, true) => Label::LeftBottomLong,
            (0b110, false) => Label::RightBottomShort,
            (0b110, true) => Label::RightBottomLong,
            (0b111, false) => Label::LeftRightBottomShort,
            (0b111, true) => Label::LeftRightBottomLong,
            _ => Label::Unknown,
        }
    }

    /// Label for `mask` using the role bindings in `registry`.
    pub fn for_mask(mask: ButtonMask, long: bool, registry: &PinRegistry) -> Self {
        Self::combo(RoleCode::project(mask, registry), long)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Label::LeftIn => "left-in",
            Label::LeftOut => "left-out",
            Label::RightIn => "right-in",
            Label::RightOut => "right-out",
            Label::BottomIn => "bottom-in",
            Label::BottomOut => "bottom-out",
            Label::LeftShort => "left-short",
            Label::LeftLong => "left-long",
            Label::RightShort => "right-short",
            Label::RightLong => "right-long",
            Label::BottomShort => "bottom-short",
            Label::BottomLong => "bottom-long",
            Label::LeftRightShort => "left-right-short",
            Label::LeftRightLong => "left-right-long",
            Label::LeftBottomShort => "left-bottom-short",
            Label::LeftBottomLong => "left-bottom-long",
            Label::RightBottomShort => "right-bottom-short",
            Label::RightBottomLong => "right-bottom-long",
            Label::LeftRightBottomShort => "left-right-bottom-short",
            Label::LeftRightBottomLong => "left-right-bottom-long",
            Label::Unknown => "unknown",
        }
    }

    /// True for `-in`/`-out` labels.
    pub const fn is_edge(self) -> bool {
        matches!(
            self,
            Label::LeftIn
                | Label::LeftOut
                | Label::RightIn
                | Label::RightOut
                | Label::BottomIn
                | Label::BottomOut
        )
    }
}

impl core::fmt::Display for Label {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pins::PinId;

    fn registry() -> PinRegistry {
        let mut registry = PinRegistry::new();
        registry.register(PinId(5)).unwrap();
        registry.set_role(Role::Left, PinId(21)).unwrap();
        registry.set_role(Role::Right, PinId(26)).unwrap();
        registry.set_role(Role::Bottom, PinId(33)).unwrap();
        registry
    }

    #[test]
    fn projection_ignores_non_role_slots() {
        let registry = registry();
        // slot 0 has no role, slots 1..=3 are left, right, bottom
        assert_eq!(RoleCode::project(ButtonMask::single(0), &registry), RoleCode::NONE);
        assert_eq!(
            RoleCode::project(ButtonMask::from_bits(0b0011), &registry),
            RoleCode::from_bits(0b001)
        );
        assert_eq!(
            RoleCode::project(ButtonMask::from_bits(0b1110), &registry),
            RoleCode::from_bits(0b111)
        );
    }

    #[test]
    fn every_combination_has_its_own_label() {
        let expected_short = [
            "unknown",
            "left-short",
            "right-short",
            "left-right-short",
            "bottom-short",
            "left-bottom-short",
            "right-bottom-short",
            "left-right-bottom-short",
        ];
        for (bits, text) in expected_short.iter().enumerate() {
            assert_eq!(Label::combo(RoleCode::from_bits(bits as u8), false).as_str(), *text);
        }
        assert_eq!(Label::combo(RoleCode::from_bits(0b101), true).as_str(), "left-bottom-long");
        assert_eq!(Label::combo(RoleCode::NONE, true), Label::Unknown);
    }

    #[test]
    fn for_mask_uses_registry_roles() {
        let registry = registry();
        assert_eq!(
            Label::for_mask(ButtonMask::from_bits(0b0110), false, &registry),
            Label::LeftRightShort
        );
        assert_eq!(
            Label::for_mask(ButtonMask::single(3), true, &registry),
            Label::BottomLong
        );
    }

    #[test]
    fn edge_labels() {
        assert_eq!(Label::edge(Role::Left, true).as_str(), "left-in");
        assert_eq!(Label::edge(Role::Bottom, false).as_str(), "bottom-out");
        assert!(Label::RightIn.is_edge());
        assert!(!Label::RightShort.is_edge());
    }
}

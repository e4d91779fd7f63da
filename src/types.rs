//! Core types shared by the registry and the engine.

/// Semantic position of a button, used to build report labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Role {
    Left,
    Right,
    Bottom,
}

impl Role {
    /// All roles, in the order used to resolve a pin bound to several roles.
    pub const ALL: [Role; 3] = [Role::Left, Role::Right, Role::Bottom];

    /// Bit of this role in a [`RoleCode`](crate::label::RoleCode).
    #[inline]
    pub const fn code_bit(self) -> u8 {
        match self {
            Role::Left => 1,
            Role::Right => 2,
            Role::Bottom => 4,
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        match self {
            Role::Left => 0,
            Role::Right => 1,
            Role::Bottom => 2,
        }
    }
}

/// Timing thresholds for a button group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GroupConfig {
    /// Minimum time a raw level must hold before it is confirmed.
    pub debounce_ms: u32,

    /// Minimum hold time of a lone button before a long press is reported.
    pub long_press_ms: u32,
}

impl GroupConfig {
    pub const DEFAULT_DEBOUNCE_MS: u32 = 50;
    pub const DEFAULT_LONG_PRESS_MS: u32 = 1000;

    /// Creates a config with explicit thresholds.
    #[inline]
    pub const fn new(debounce_ms: u32, long_press_ms: u32) -> Self {
        Self {
            debounce_ms,
            long_press_ms,
        }
    }

    pub const fn with_debounce_ms(mut self, debounce_ms: u32) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    pub const fn with_long_press_ms(mut self, long_press_ms: u32) -> Self {
        self.long_press_ms = long_press_ms;
        self
    }
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DEBOUNCE_MS, Self::DEFAULT_LONG_PRESS_MS)
    }
}

/// Pin registration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// Pin number zero is reserved as "no pin".
    NullPin,

    /// Pin is already registered at `slot`.
    AlreadyRegistered { slot: usize },

    /// All slots are in use.
    Full,
}

impl core::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RegistryError::NullPin => write!(f, "pin 0 is reserved as the null pin"),
            RegistryError::AlreadyRegistered { slot } => {
                write!(f, "pin already registered at slot {}", slot)
            }
            RegistryError::Full => {
                write!(f, "registry is full, cannot add more than {} pins", crate::MAX_BUTTONS)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RegistryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_documented_thresholds() {
        let config = GroupConfig::default();
        assert_eq!(config.debounce_ms, 50);
        assert_eq!(config.long_press_ms, 1000);
    }

    #[test]
    fn builder_overrides_single_field() {
        let config = GroupConfig::default().with_long_press_ms(600);
        assert_eq!(config, GroupConfig::new(50, 600));
        assert_eq!(config.with_debounce_ms(20).debounce_ms, 20);
    }

    #[test]
    fn role_code_bits_are_distinct() {
        let combined = Role::ALL.iter().fold(0u8, |acc, r| acc | r.code_bit());
        assert_eq!(combined, 0b111);
    }
}

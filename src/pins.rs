//! Pin registration and hardware access traits.
//!
//! Provides [`PinRegistry`], which assigns each distinct pin a stable slot index
//! and binds up to three pins to a [`Role`]. Also defines the [`PinLevels`] and
//! [`PinControl`] traits the engine uses to reach the GPIO hardware.

use crate::MAX_BUTTONS;
use crate::types::{RegistryError, Role};
use embedded_hal::digital::InputPin;
use heapless::Vec;

/// A GPIO pin number.
///
/// Pin `0` is the null pin and is never registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId(pub u8);

impl PinId {
    /// The null pin.
    pub const NONE: PinId = PinId(0);

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl From<u8> for PinId {
    fn from(pin: u8) -> Self {
        PinId(pin)
    }
}

impl From<PinId> for u8 {
    fn from(pin: PinId) -> Self {
        pin.0
    }
}

/// Trait for reading pin levels from interrupt context.
///
/// Implementations must not block or allocate.
pub trait PinLevels {
    /// Returns true if `pin` currently reads logic low (pressed, with pull-up wiring).
    fn is_low(&mut self, pin: PinId) -> bool;
}

/// Trait for configuring button pins at `begin`/`end`.
pub trait PinControl {
    /// Configures `pin` as an input with the internal pull-up enabled.
    fn configure_pull_up(&mut self, pin: PinId);

    /// Attaches the edge interrupt for `pin` on both edges.
    ///
    /// Returns false if the pin has no interrupt line; such a pin is still
    /// sampled whenever another registered pin fires.
    fn attach_edge_interrupt(&mut self, pin: PinId) -> bool;

    /// Detaches the edge interrupt previously attached for `pin`.
    fn detach_edge_interrupt(&mut self, pin: PinId);
}

/// Assigns slot indices to pins and tracks role bindings.
#[derive(Debug, Clone)]
pub struct PinRegistry {
    pins: Vec<PinId, MAX_BUTTONS>,
    roles: [PinId; 3],
}

impl PinRegistry {
    /// Creates an empty registry.
    pub const fn new() -> Self {
        Self {
            pins: Vec::new(),
            roles: [PinId::NONE; 3],
        }
    }

    /// Registers `pin` in the next free slot.
    ///
    /// # Errors
    /// * `NullPin` - `pin` is pin 0
    /// * `AlreadyRegistered` - `pin` already has a slot
    /// * `Full` - all [`MAX_BUTTONS`] slots are in use
    pub fn register(&mut self, pin: PinId) -> Result<usize, RegistryError> {
        if pin.is_none() {
            return Err(RegistryError::NullPin);
        }

        if let Some(slot) = self.slot_of(pin) {
            return Err(RegistryError::AlreadyRegistered { slot });
        }

        let slot = self.pins.len();
        self.pins.push(pin).map_err(|_| RegistryError::Full)?;
        Ok(slot)
    }

    /// Binds `role` to `pin` and registers the pin.
    ///
    /// The role binding is kept even if registration fails; such a role simply
    /// never matches a slot.
    pub fn set_role(&mut self, role: Role, pin: PinId) -> Result<usize, RegistryError> {
        self.roles[role.index()] = pin;
        self.register(pin)
    }

    /// Returns the slot of `pin`, if registered.
    pub fn slot_of(&self, pin: PinId) -> Option<usize> {
        self.pins.iter().position(|&p| p == pin)
    }

    /// Returns the pin registered at `slot`.
    pub fn pin_at(&self, slot: usize) -> Option<PinId> {
        self.pins.get(slot).copied()
    }

    /// Returns the pin bound to `role`, if any.
    pub fn role_pin(&self, role: Role) -> Option<PinId> {
        let pin = self.roles[role.index()];
        if pin.is_none() { None } else { Some(pin) }
    }

    /// Returns the slot of the pin bound to `role`, if that pin is registered.
    pub fn role_slot(&self, role: Role) -> Option<usize> {
        self.role_pin(role).and_then(|pin| self.slot_of(pin))
    }

    /// Returns the role carried by the pin at `slot`.
    ///
    /// Roles are checked Left, Right, Bottom; the first match wins.
    pub fn role_of_slot(&self, slot: usize) -> Option<Role> {
        let pin = self.pin_at(slot)?;
        Role::ALL
            .into_iter()
            .find(|&role| self.role_pin(role) == Some(pin))
    }

    /// Registered pins, in slot order.
    pub fn pins(&self) -> &[PinId] {
        &self.pins
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}

impl Default for PinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// [`PinLevels`] over `embedded-hal` input pins keyed by [`PinId`].
///
/// A pin that fails to read, or is not in the bank, counts as not low.
pub struct InputBank<P, const N: usize> {
    inputs: Vec<(PinId, P), N>,
}

impl<P: InputPin, const N: usize> InputBank<P, N> {
    pub const fn new() -> Self {
        Self { inputs: Vec::new() }
    }

    /// Adds an input for `pin`. Returns the input back if the bank is full.
    pub fn add(&mut self, pin: PinId, input: P) -> Result<(), P> {
        self.inputs.push((pin, input)).map_err(|(_, input)| input)
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

impl<P: InputPin, const N: usize> Default for InputBank<P, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: InputPin, const N: usize> PinLevels for InputBank<P, N> {
    fn is_low(&mut self, pin: PinId) -> bool {
        self.inputs
            .iter_mut()
            .find(|(id, _)| *id == pin)
            .is_some_and(|(_, input)| input.is_low().unwrap_or(false))
    }
}

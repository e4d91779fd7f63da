//! Interrupt-side pin sampling.
//!
//! The interrupt handler and the polling loop share exactly two values: the
//! latest pressed-pin snapshot and a dirty flag. Both live in an
//! [`IsrSnapshot`] behind a `critical_section::Mutex`.
//!
//! Interrupt handlers cannot carry a reference to the engine, so the live
//! engine's [`InterruptSampler`] is parked in a single static slot by
//! [`ButtonGroup::begin`](crate::ButtonGroup::begin). [`on_pin_edge`] is the
//! only code that reads that slot.

use crate::MAX_BUTTONS;
use crate::mask::ButtonMask;
use crate::pins::{PinId, PinLevels};
use core::cell::{Cell, RefCell};
use critical_section::{CriticalSection, Mutex};
use heapless::Vec;

#[derive(Debug, Clone, Copy, Default)]
struct Snapshot {
    mask: ButtonMask,
    changed: bool,
}

/// Pressed-pin snapshot shared between interrupt and polling context.
///
/// Declare one per engine as a `static`:
///
/// ```
/// use button_group::IsrSnapshot;
/// static SNAPSHOT: IsrSnapshot = IsrSnapshot::new();
/// ```
pub struct IsrSnapshot {
    state: Mutex<Cell<Snapshot>>,
}

impl IsrSnapshot {
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(Cell::new(Snapshot {
                mask: ButtonMask::EMPTY,
                changed: false,
            })),
        }
    }

    /// Stores a new snapshot and raises the dirty flag, overwriting any unread one.
    pub fn publish(&self, mask: ButtonMask) {
        critical_section::with(|cs| self.store(cs, mask));
    }

    pub(crate) fn store(&self, cs: CriticalSection<'_>, mask: ButtonMask) {
        self.state.borrow(cs).set(Snapshot {
            mask,
            changed: true,
        });
    }

    /// Reads the latest snapshot and clears the dirty flag.
    ///
    /// Returns the mask together with whether it changed since the last take.
    /// The mask itself is kept.
    pub fn take(&self) -> (ButtonMask, bool) {
        critical_section::with(|cs| {
            let cell = self.state.borrow(cs);
            let snapshot = cell.get();
            cell.set(Snapshot {
                changed: false,
                ..snapshot
            });
            (snapshot.mask, snapshot.changed)
        })
    }

    /// Returns true if a snapshot is waiting to be taken.
    pub fn is_dirty(&self) -> bool {
        critical_section::with(|cs| self.state.borrow(cs).get().changed)
    }
}

impl Default for IsrSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads all registered pins into one snapshot.
#[derive(Clone)]
pub struct InterruptSampler {
    pins: Vec<PinId, MAX_BUTTONS>,
    snapshot: &'static IsrSnapshot,
}

impl InterruptSampler {
    /// Creates a sampler over `pins` (in slot order) publishing into `snapshot`.
    pub fn new(pins: &[PinId], snapshot: &'static IsrSnapshot) -> Self {
        let mut list = Vec::new();
        for &pin in pins.iter().take(MAX_BUTTONS) {
            let _ = list.push(pin);
        }
        Self {
            pins: list,
            snapshot,
        }
    }

    /// Reads every registered pin. Slot `n` is set if its pin reads low.
    pub fn sample<P: PinLevels>(&self, levels: &mut P) -> ButtonMask {
        let mut mask = ButtonMask::EMPTY;
        for (slot, &pin) in self.pins.iter().enumerate() {
            if !pin.is_none() && levels.is_low(pin) {
                mask.insert(slot);
            }
        }
        mask
    }

    /// Returns true if this sampler publishes into `snapshot`.
    pub fn targets(&self, snapshot: &IsrSnapshot) -> bool {
        core::ptr::eq(self.snapshot, snapshot)
    }
}

static CURRENT: Mutex<RefCell<Option<InterruptSampler>>> = Mutex::new(RefCell::new(None));

/// Makes `sampler` the one reached by [`on_pin_edge`].
pub(crate) fn install(sampler: InterruptSampler) {
    critical_section::with(|cs| {
        CURRENT.borrow_ref_mut(cs).replace(sampler);
    });
}

/// Clears the current sampler if it publishes into `snapshot`.
///
/// Returns true if a sampler was removed.
pub(crate) fn uninstall(snapshot: &IsrSnapshot) -> bool {
    critical_section::with(|cs| {
        let mut current = CURRENT.borrow_ref_mut(cs);
        if current.as_ref().is_some_and(|s| s.targets(snapshot)) {
            *current = None;
            true
        } else {
            false
        }
    })
}

/// Returns true if the current sampler publishes into `snapshot`.
pub(crate) fn is_installed(snapshot: &IsrSnapshot) -> bool {
    critical_section::with(|cs| {
        CURRENT
            .borrow_ref(cs)
            .as_ref()
            .is_some_and(|s| s.targets(snapshot))
    })
}

/// Interrupt entry point. Call from the GPIO edge handler of any button pin.
///
/// Samples every registered pin of the live engine and publishes the result.
/// Does nothing if no engine has been started.
pub fn on_pin_edge<P: PinLevels>(levels: &mut P) {
    critical_section::with(|cs| {
        if let Some(sampler) = CURRENT.borrow_ref(cs).as_ref() {
            let mask = sampler.sample(levels);
            sampler.snapshot.store(cs, mask);
        }
    });
}

//! Per-slot debounce state machine.
//!
//! Each slot is either stable, or pending with the raw level and the time it
//! was first seen. A pending level that holds for the debounce window becomes
//! the new stable level.

use crate::MAX_BUTTONS;
use crate::mask::ButtonMask;
use crate::time::TimeInstant;
use heapless::Vec;

/// Timing state of one registered button.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ButtonSlot<I> {
    /// Last sampled level, true when the pin reads pressed.
    pub raw_pressed: bool,
    /// When `raw_pressed` last changed without being confirmed yet.
    pub last_raw_change: Option<I>,
    /// When the current stable press was confirmed.
    pub press_start: Option<I>,
    /// Set once a long press has been reported for the current hold.
    pub long_registered: bool,
}

impl<I> ButtonSlot<I> {
    pub const fn new() -> Self {
        Self {
            raw_pressed: false,
            last_raw_change: None,
            press_start: None,
            long_registered: false,
        }
    }
}

/// A debounced press or release of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub slot: usize,
    pub pressed: bool,
}

/// Confirmed transitions of one service cycle, in slot order.
pub(crate) type Transitions = Vec<Transition, MAX_BUTTONS>;

pub(crate) struct DebounceEngine<I> {
    slots: [ButtonSlot<I>; MAX_BUTTONS],
    stable: ButtonMask,
    debounce_ms: u32,
}

impl<I: TimeInstant> DebounceEngine<I> {
    pub fn new(debounce_ms: u32) -> Self {
        Self {
            slots: core::array::from_fn(|_| ButtonSlot::new()),
            stable: ButtonMask::EMPTY,
            debounce_ms,
        }
    }

    /// Confirmed pressed slots.
    pub fn stable(&self) -> ButtonMask {
        self.stable
    }

    pub fn slots_mut(&mut self) -> &mut [ButtonSlot<I>] {
        &mut self.slots
    }

    #[cfg(test)]
    pub fn slot(&self, slot: usize) -> Option<&ButtonSlot<I>> {
        self.slots.get(slot)
    }

    /// Records a fresh raw sample for the first `count` slots.
    ///
    /// A slot whose raw level differs from its last sample starts a new
    /// pending window at `now`.
    pub fn sample(&mut self, raw: ButtonMask, count: usize, now: I) {
        for (i, slot) in self.slots.iter_mut().take(count).enumerate() {
            let pressed = raw.contains(i);
            if pressed != slot.raw_pressed {
                slot.raw_pressed = pressed;
                slot.last_raw_change = Some(now);
            }
        }
    }

    /// Confirms every pending level that has held for the debounce window.
    ///
    /// Runs on every cycle, whether or not a new sample arrived. A confirmed
    /// press records its start time; a confirmed release clears it.
    pub fn confirm(&mut self, count: usize, now: I) -> Transitions {
        let mut confirmed = Transitions::new();

        for (i, slot) in self.slots.iter_mut().take(count).enumerate() {
            let stable = self.stable.contains(i);
            if slot.raw_pressed == stable {
                continue;
            }

            let Some(changed_at) = slot.last_raw_change else {
                continue;
            };

            if !now.has_elapsed(changed_at, self.debounce_ms) {
                continue;
            }

            if slot.raw_pressed {
                self.stable.insert(i);
                slot.press_start = Some(now);
                slot.long_registered = false;
            } else {
                self.stable.remove(i);
                slot.press_start = None;
            }
            slot.last_raw_change = None;

            // At most MAX_BUTTONS slots exist, so this never overflows.
            let _ = confirmed.push(Transition {
                slot: i,
                pressed: slot.raw_pressed,
            });
        }

        confirmed
    }
}

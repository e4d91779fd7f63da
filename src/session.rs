//! Press sessions: long-press detection and the end-of-session aggregate.
//!
//! A session starts with the first confirmed press and ends when no button is
//! held any more. While it runs, every button that was pressed is latched.

use crate::debounce::ButtonSlot;
use crate::mask::ButtonMask;
use crate::time::TimeInstant;

/// Outcome of a finished session that should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SessionSummary {
    /// Every button pressed during the session.
    pub latched: ButtonMask,
    /// True if any long press fired during the session.
    pub has_long: bool,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SessionTracker {
    active: bool,
    latched: ButtonMask,
    has_long: bool,
    emitted_long: ButtonMask,
}

impl SessionTracker {
    pub const fn new() -> Self {
        Self {
            active: false,
            latched: ButtonMask::EMPTY,
            has_long: false,
            emitted_long: ButtonMask::EMPTY,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn latched(&self) -> ButtonMask {
        self.latched
    }

    #[cfg(test)]
    pub fn emitted_long(&self) -> ButtonMask {
        self.emitted_long
    }

    /// Latches a newly confirmed press and opens the session if needed.
    pub fn on_press(&mut self, slot: usize) {
        let before = self.latched;
        self.latched.insert(slot);
        debug_assert!(before.is_subset(self.latched));
        self.active = true;
    }

    /// Fires a long press if exactly one button is held and has been held for
    /// at least `long_press_ms`.
    ///
    /// Returns the slot that fired. Each hold fires at most once; sessions with
    /// more than one button held never fire.
    pub fn check_long_press<I: TimeInstant>(
        &mut self,
        stable: ButtonMask,
        slots: &mut [ButtonSlot<I>],
        now: I,
        long_press_ms: u32,
    ) -> Option<usize> {
        if !self.active || stable.count() != 1 {
            return None;
        }

        let index = stable.first()?;
        let slot = slots.get_mut(index)?;
        if slot.long_registered {
            return None;
        }

        let start = slot.press_start?;
        if !now.has_elapsed(start, long_press_ms) {
            return None;
        }

        slot.long_registered = true;
        self.has_long = true;
        self.emitted_long.insert(index);
        Some(index)
    }

    /// Closes the session once the stable mask is empty again.
    ///
    /// Returns the summary to report, or `None` if the session was not active
    /// or consisted only of buttons already reported as long presses. Always
    /// resets the session and the per-slot hold state when it closes.
    pub fn finish<I: TimeInstant>(
        &mut self,
        stable: ButtonMask,
        slots: &mut [ButtonSlot<I>],
    ) -> Option<SessionSummary> {
        if !self.active || !stable.is_empty() {
            return None;
        }

        let already_reported =
            self.has_long && !self.emitted_long.is_empty() && self.emitted_long == self.latched;

        let summary = SessionSummary {
            latched: self.latched,
            has_long: self.has_long,
        };

        *self = Self::new();
        for slot in slots.iter_mut() {
            slot.press_start = None;
            slot.long_registered = false;
        }

        if already_reported { None } else { Some(summary) }
    }
}

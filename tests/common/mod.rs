//! Shared test infrastructure for button-group integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use button_group::{
    ButtonGroup, ButtonMask, GroupConfig, IsrSnapshot, Millis, PinControl, PinId, PinLevels,
    Report, TimeSource,
};

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<Millis>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub fn starting_at(millis: u32) -> Self {
        Self {
            current_time: core::cell::Cell::new(Millis(millis)),
        }
    }

    /// Advance time by the given number of milliseconds, wrapping like a hardware counter
    pub fn advance(&self, millis: u32) {
        let current = self.current_time.get();
        self.current_time.set(Millis(current.0.wrapping_add(millis)));
    }

    pub fn set_time(&self, millis: u32) {
        self.current_time.set(Millis(millis));
    }

    pub fn millis(&self) -> u32 {
        self.current_time.get().0
    }
}

impl TimeSource<Millis> for MockTimeSource {
    fn now(&self) -> Millis {
        self.current_time.get()
    }
}

// ============================================================================
// Mock GPIO
// ============================================================================

/// Mock GPIO bank that records configuration calls and serves pin levels
#[derive(Default)]
pub struct MockPins {
    low: Vec<PinId>,
    without_interrupt: Vec<PinId>,
    pub pull_ups: Vec<PinId>,
    pub attached: Vec<PinId>,
    pub detached: Vec<PinId>,
}

impl MockPins {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `pin` as having no interrupt line.
    pub fn without_interrupt(mut self, pin: PinId) -> Self {
        self.without_interrupt.push(pin);
        self
    }

    /// Drives `pin` low (pressed) or releases it.
    pub fn set_low(&mut self, pin: PinId, low: bool) {
        self.low.retain(|&p| p != pin);
        if low {
            self.low.push(pin);
        }
    }
}

impl PinLevels for MockPins {
    fn is_low(&mut self, pin: PinId) -> bool {
        self.low.contains(&pin)
    }
}

impl PinControl for MockPins {
    fn configure_pull_up(&mut self, pin: PinId) {
        self.pull_ups.push(pin);
    }

    fn attach_edge_interrupt(&mut self, pin: PinId) -> bool {
        if self.without_interrupt.contains(&pin) {
            return false;
        }
        self.attached.push(pin);
        true
    }

    fn detach_edge_interrupt(&mut self, pin: PinId) {
        self.detached.push(pin);
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub const LEFT_PIN: PinId = PinId(21);
pub const RIGHT_PIN: PinId = PinId(26);
pub const BOTTOM_PIN: PinId = PinId(33);

/// Slot masks for a group built by [`three_button_group`].
pub const LEFT: ButtonMask = ButtonMask::single(0);
pub const RIGHT: ButtonMask = ButtonMask::single(1);
pub const BOTTOM: ButtonMask = ButtonMask::single(2);
pub const NONE: ButtonMask = ButtonMask::EMPTY;

/// Gap between two service calls in [`hold`].
pub const POLL_INTERVAL_MS: u32 = 10;

pub type TestGroup<'t> = ButtonGroup<'t, Millis, MockTimeSource>;

/// Each test gets its own snapshot so tests can run in parallel.
pub fn leak_snapshot() -> &'static IsrSnapshot {
    Box::leak(Box::new(IsrSnapshot::new()))
}

/// Group with left, right and bottom roles in slots 0, 1 and 2.
pub fn three_button_group(timer: &MockTimeSource) -> (TestGroup<'_>, &'static IsrSnapshot) {
    let snapshot = leak_snapshot();
    let mut group = ButtonGroup::new(GroupConfig::default(), timer, snapshot);
    group.set_left_pin(LEFT_PIN);
    group.set_right_pin(RIGHT_PIN);
    group.set_bottom_pin(BOTTOM_PIN);
    (group, snapshot)
}

/// Publishes `pressed` as the raw pin state, then keeps servicing every
/// [`POLL_INTERVAL_MS`] until `duration_ms` has passed.
pub fn hold(
    group: &mut TestGroup<'_>,
    snapshot: &IsrSnapshot,
    timer: &MockTimeSource,
    pressed: ButtonMask,
    duration_ms: u32,
) {
    snapshot.publish(pressed);
    group.service();

    let mut elapsed = 0;
    while elapsed < duration_ms {
        let step = POLL_INTERVAL_MS.min(duration_ms - elapsed);
        timer.advance(step);
        group.service();
        elapsed += step;
    }
}

/// Polls every queued report.
pub fn drain(group: &mut TestGroup<'_>) -> Vec<Report> {
    group.drain().collect()
}

pub fn texts(reports: &[Report]) -> Vec<&'static str> {
    reports.iter().map(|r| r.text.as_str()).collect()
}

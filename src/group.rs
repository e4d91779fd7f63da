//! Button group engine tying sampling, debouncing, sessions and reporting together.
//!
//! Provides [`ButtonGroup`], which owns the pin registry, per-button timing,
//! session state and report queue. The interrupt side only publishes pin
//! snapshots into the group's [`IsrSnapshot`]; everything else runs in
//! [`ButtonGroup::service`], called from the main loop.

use crate::debounce::DebounceEngine;
use crate::label::Label;
use crate::mask::ButtonMask;
use crate::pins::{PinControl, PinId, PinRegistry};
use crate::report::{Report, ReportQueue};
use crate::sampler::{self, InterruptSampler, IsrSnapshot};
use crate::session::SessionTracker;
use crate::time::{TimeInstant, TimeSource};
use crate::types::{GroupConfig, RegistryError, Role};

/// Debounces a set of buttons and turns their activity into [`Report`]s.
///
/// Each call to [`service`](Self::service) consumes the latest interrupt
/// snapshot, confirms transitions that held for the debounce window, and queues:
///
/// 1. an immediate `-in`/`-out` report per confirmed transition of a role button,
/// 2. a long-press report when a lone button is held past the threshold,
/// 3. a session report when the last held button is released, unless the
///    session consisted only of buttons already reported as long presses.
///
/// Reports are queued in that order within one call, and by slot order across
/// buttons confirmed in the same call.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
pub struct ButtonGroup<'t, I: TimeInstant, T: TimeSource<I>> {
    time_source: &'t T,
    snapshot: &'static IsrSnapshot,
    config: GroupConfig,
    registry: PinRegistry,
    debounce: DebounceEngine<I>,
    session: SessionTracker,
    queue: ReportQueue,
    attached: ButtonMask,
    started: bool,
}

impl<'t, I: TimeInstant, T: TimeSource<I>> ButtonGroup<'t, I, T> {
    /// Creates an empty group.
    ///
    /// # Arguments
    /// * `config` - Debounce and long-press thresholds
    /// * `time_source` - Millisecond clock read once per service call
    /// * `snapshot` - Interrupt snapshot owned by this group
    pub fn new(config: GroupConfig, time_source: &'t T, snapshot: &'static IsrSnapshot) -> Self {
        Self {
            time_source,
            snapshot,
            config,
            registry: PinRegistry::new(),
            debounce: DebounceEngine::new(config.debounce_ms),
            session: SessionTracker::new(),
            queue: ReportQueue::new(),
            attached: ButtonMask::EMPTY,
            started: false,
        }
    }

    /// Registers a button pin without a role.
    ///
    /// Null pins, duplicates, and pins beyond [`MAX_BUTTONS`](crate::MAX_BUTTONS)
    /// are ignored.
    pub fn add_pin(&mut self, pin: PinId) {
        let result = self.registry.register(pin);
        self.after_register(pin, result);
    }

    /// Binds `role` to `pin` and registers the pin.
    pub fn set_role_pin(&mut self, role: Role, pin: PinId) {
        let result = self.registry.set_role(role, pin);
        self.after_register(pin, result);
    }

    /// Binds the left role to `pin`.
    pub fn set_left_pin(&mut self, pin: PinId) {
        self.set_role_pin(Role::Left, pin);
    }

    /// Binds the right role to `pin`.
    pub fn set_right_pin(&mut self, pin: PinId) {
        self.set_role_pin(Role::Right, pin);
    }

    /// Binds the bottom role to `pin`.
    pub fn set_bottom_pin(&mut self, pin: PinId) {
        self.set_role_pin(Role::Bottom, pin);
    }

    #[cfg_attr(not(feature = "defmt"), allow(unused_variables))]
    fn after_register(&mut self, pin: PinId, result: Result<usize, RegistryError>) {
        match result {
            Ok(slot) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("button pin {} registered at slot {}", pin, slot);

                // Keep the interrupt side in step with pins added after begin(),
                // unless another group has taken it over since.
                if self.started && sampler::is_installed(self.snapshot) {
                    sampler::install(self.sampler());
                }
            }
            Err(err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("button pin {} ignored: {}", pin, err);
            }
        }
    }

    fn sampler(&self) -> InterruptSampler {
        InterruptSampler::new(self.registry.pins(), self.snapshot)
    }

    /// Configures every registered pin as a pull-up input, attaches its edge
    /// interrupt where available, and makes this group the one served by
    /// [`on_pin_edge`](crate::on_pin_edge).
    pub fn begin<H: PinControl>(&mut self, hw: &mut H) {
        sampler::install(self.sampler());
        self.started = true;

        for (slot, &pin) in self.registry.pins().iter().enumerate() {
            hw.configure_pull_up(pin);
            if hw.attach_edge_interrupt(pin) {
                self.attached.insert(slot);
            }
        }

        #[cfg(feature = "defmt")]
        defmt::info!(
            "button group started: {} pins, {} with interrupts",
            self.registry.len(),
            self.attached.count()
        );
    }

    /// Detaches the interrupts attached by [`begin`](Self::begin) and stops
    /// serving [`on_pin_edge`](crate::on_pin_edge) if this group still owns it.
    pub fn end<H: PinControl>(&mut self, hw: &mut H) {
        sampler::uninstall(self.snapshot);
        self.started = false;

        for slot in self.attached.iter() {
            if let Some(pin) = self.registry.pin_at(slot) {
                hw.detach_edge_interrupt(pin);
            }
        }
        self.attached = ButtonMask::EMPTY;

        #[cfg(feature = "defmt")]
        defmt::info!("button group stopped");
    }

    /// Runs one debounce and classification cycle.
    ///
    /// Call on every main-loop iteration; transitions shorter than the gap
    /// between two calls are not seen.
    pub fn service(&mut self) {
        let (raw, changed) = self.snapshot.take();
        let now = self.time_source.now();
        let count = self.registry.len();

        if changed {
            self.debounce.sample(raw, count, now);
        }

        let transitions = self.debounce.confirm(count, now);

        for transition in &transitions {
            #[cfg(feature = "defmt")]
            defmt::debug!("button transition: {}", transition);

            if let Some(role) = self.registry.role_of_slot(transition.slot) {
                let text = Label::edge(role, transition.pressed);
                self.enqueue(Report::edge(transition.slot, text));
            }

            if transition.pressed {
                self.session.on_press(transition.slot);
            }
        }

        let stable = self.debounce.stable();
        let long_press_ms = self.config.long_press_ms;
        if let Some(slot) =
            self.session
                .check_long_press(stable, self.debounce.slots_mut(), now, long_press_ms)
        {
            let text = Label::for_mask(ButtonMask::single(slot), true, &self.registry);
            self.enqueue(Report::long_press(slot, text));
        }

        if !transitions.is_empty() {
            if let Some(summary) = self.session.finish(stable, self.debounce.slots_mut()) {
                let text = Label::for_mask(summary.latched, summary.has_long, &self.registry);
                self.enqueue(Report::session(summary.latched, summary.has_long, text));
            }
        }
    }

    fn enqueue(&mut self, report: Report) {
        if self.queue.push(report) {
            #[cfg(feature = "defmt")]
            defmt::debug!("button report: {}", report);
        } else {
            #[cfg(feature = "defmt")]
            defmt::warn!("report queue full, dropped {}", report.text);
        }
    }

    /// Removes the oldest queued report.
    pub fn poll(&mut self) -> Option<Report> {
        self.queue.pop()
    }

    /// Iterates and removes all queued reports, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = Report> + '_ {
        core::iter::from_fn(move || self.queue.pop())
    }

    /// Number of reports waiting to be polled.
    pub fn pending_reports(&self) -> usize {
        self.queue.len()
    }

    /// Debounced pressed buttons.
    pub fn stable_mask(&self) -> ButtonMask {
        self.debounce.stable()
    }

    /// Buttons pressed at any point in the current session.
    pub fn latched_mask(&self) -> ButtonMask {
        self.session.latched()
    }

    /// Returns true while at least one press of the current session is unresolved.
    pub fn is_session_active(&self) -> bool {
        self.session.is_active()
    }

    /// Returns true between [`begin`](Self::begin) and [`end`](Self::end).
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Returns true if [`on_pin_edge`](crate::on_pin_edge) currently feeds this group.
    pub fn is_interrupt_owner(&self) -> bool {
        sampler::is_installed(self.snapshot)
    }

    /// Registered pins and their role bindings.
    pub fn registry(&self) -> &PinRegistry {
        &self.registry
    }

    /// Thresholds this group was created with.
    pub fn config(&self) -> GroupConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Millis;
    use core::cell::Cell;
    extern crate std;

    struct MockTimeSource {
        current_time: Cell<Millis>,
    }

    impl MockTimeSource {
        fn new() -> Self {
            Self {
                current_time: Cell::new(Millis(0)),
            }
        }

        fn set(&self, millis: u32) {
            self.current_time.set(Millis(millis));
        }
    }

    impl TimeSource<Millis> for MockTimeSource {
        fn now(&self) -> Millis {
            self.current_time.get()
        }
    }

    fn snapshot() -> &'static IsrSnapshot {
        std::boxed::Box::leak(std::boxed::Box::new(IsrSnapshot::new()))
    }

    #[test]
    fn registration_ignores_invalid_pins() {
        let timer = MockTimeSource::new();
        let mut group = ButtonGroup::new(GroupConfig::default(), &timer, snapshot());
        group.add_pin(PinId::NONE);
        group.set_left_pin(PinId(21));
        group.add_pin(PinId(21));
        assert_eq!(group.registry().len(), 1);
    }

    #[test]
    fn non_role_button_gets_session_report_only() {
        let timer = MockTimeSource::new();
        let snap = snapshot();
        let mut group = ButtonGroup::new(GroupConfig::default(), &timer, snap);
        group.add_pin(PinId(5));

        snap.publish(ButtonMask::single(0));
        group.service();
        timer.set(50);
        group.service();
        assert!(group.is_session_active());
        assert_eq!(group.pending_reports(), 0);

        timer.set(200);
        snap.publish(ButtonMask::EMPTY);
        group.service();
        timer.set(250);
        group.service();

        let report = group.poll().unwrap();
        assert_eq!(report.text, Label::Unknown);
        assert_eq!(report.mask, ButtonMask::single(0));
        assert_eq!(report.count, 1);
        assert_eq!(group.poll(), None);
    }
}

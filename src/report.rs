//! Discrete button reports and the bounded queue that carries them.

use crate::label::Label;
use crate::mask::ButtonMask;
use core::cell::RefCell;
use critical_section::Mutex;
use heapless::Deque;

/// Maximum number of undelivered reports.
pub const REPORT_QUEUE_CAPACITY: usize = 8;

/// One event delivered to the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Report {
    /// Slots the report covers.
    pub mask: ButtonMask,

    /// Number of slots in `mask`.
    pub count: u8,

    /// True for long-press reports and for sessions that contained one.
    pub long_press: bool,

    pub text: Label,
}

impl Report {
    /// Immediate report for a confirmed press or release of a role button.
    pub fn edge(slot: usize, text: Label) -> Self {
        Self {
            mask: ButtonMask::single(slot),
            count: 1,
            long_press: false,
            text,
        }
    }

    /// Report for a lone button held past the long-press threshold.
    pub fn long_press(slot: usize, text: Label) -> Self {
        Self {
            mask: ButtonMask::single(slot),
            count: 1,
            long_press: true,
            text,
        }
    }

    /// Aggregate report emitted when a session ends.
    pub fn session(mask: ButtonMask, long_press: bool, text: Label) -> Self {
        Self {
            mask,
            count: mask.count(),
            long_press,
            text,
        }
    }

    pub fn is_edge(&self) -> bool {
        self.text.is_edge()
    }
}

/// Fixed-capacity FIFO of reports.
///
/// A push onto a full queue drops the new report; queued reports are never
/// overwritten. Push and pop run inside a critical section.
pub struct ReportQueue {
    reports: Mutex<RefCell<Deque<Report, REPORT_QUEUE_CAPACITY>>>,
}

impl ReportQueue {
    pub const fn new() -> Self {
        Self {
            reports: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Appends `report`. Returns false if the queue was full and it was dropped.
    pub fn push(&mut self, report: Report) -> bool {
        critical_section::with(|cs| self.reports.borrow_ref_mut(cs).push_back(report).is_ok())
    }

    /// Removes the oldest report.
    pub fn pop(&mut self) -> Option<Report> {
        critical_section::with(|cs| self.reports.borrow_ref_mut(cs).pop_front())
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.reports.borrow_ref(cs).len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() == REPORT_QUEUE_CAPACITY
    }

    /// Discards every queued report.
    pub fn clear(&mut self) {
        critical_section::with(|cs| self.reports.borrow_ref_mut(cs).clear());
    }
}

impl Default for ReportQueue {
    fn default() -> Self {
        Self::new()
    }
}

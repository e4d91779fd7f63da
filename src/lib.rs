#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`ButtonGroup`**: Debounces up to [`MAX_BUTTONS`] buttons and queues [`Report`]s
//! - **`IsrSnapshot`**: The only state shared between the GPIO interrupt and the main loop
//! - **`on_pin_edge`**: Interrupt entry point that samples every registered pin
//! - **`PinRegistry`**: Assigns slots to pins and binds left/right/bottom roles
//! - **`PinLevels`** / **`PinControl`**: Traits to implement for your GPIO hardware
//! - **`TimeSource`**: Trait to implement for your millisecond clock
//! - **`Report`** / **`Label`**: One discrete event and its text
//! - **`ButtonMask`**: Set of button slots
//!
//! A report is produced for every confirmed press or release of a role button,
//! for a lone button held past the long-press threshold, and once per session
//! when the last held button is released.

pub mod debounce;
pub mod group;
pub mod label;
pub mod mask;
pub mod pins;
pub mod report;
pub mod sampler;
pub mod session;
pub mod time;
pub mod types;

pub use debounce::Transition;
pub use group::ButtonGroup;
pub use label::{Label, RoleCode};
pub use mask::ButtonMask;
pub use pins::{InputBank, PinControl, PinId, PinLevels, PinRegistry};
pub use report::{REPORT_QUEUE_CAPACITY, Report, ReportQueue};
pub use sampler::{InterruptSampler, IsrSnapshot, on_pin_edge};
pub use session::SessionSummary;
pub use time::{Millis, MillisDuration, TimeDuration, TimeInstant, TimeSource};
pub use types::{GroupConfig, RegistryError, Role};

/// Maximum number of buttons in one group.
pub const MAX_BUTTONS: usize = 12;

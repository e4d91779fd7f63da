//! Time abstraction traits for platform-agnostic timing.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;

    /// Returns true if at least `millis` have passed since `earlier`.
    #[inline]
    fn has_elapsed(&self, earlier: Self, millis: u32) -> bool {
        self.duration_since(earlier).as_millis() >= u64::from(millis)
    }
}

/// Duration in milliseconds, as produced by [`Millis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MillisDuration(pub u32);

impl TimeDuration for MillisDuration {
    fn as_millis(&self) -> u64 {
        u64::from(self.0)
    }
}

/// Instant read from a free-running 32-bit millisecond counter.
///
/// The counter wraps after ~49.7 days. Durations are computed with wrapping
/// subtraction, so a rollover between two instants still yields the right
/// elapsed time as long as the real gap is below the wrap period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Millis(pub u32);

impl Millis {
    /// Returns the raw counter value.
    pub fn as_millis(&self) -> u32 {
        self.0
    }
}

impl TimeInstant for Millis {
    type Duration = MillisDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        MillisDuration(self.0.wrapping_sub(earlier.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_since_is_plain_difference() {
        assert_eq!(Millis(1500).duration_since(Millis(1000)), MillisDuration(500));
    }

    #[test]
    fn duration_since_survives_counter_wrap() {
        let before = Millis(u32::MAX - 9);
        let after = Millis(20);
        assert_eq!(after.duration_since(before), MillisDuration(30));
        assert!(after.has_elapsed(before, 30));
        assert!(!after.has_elapsed(before, 31));
    }

    #[test]
    fn has_elapsed_is_inclusive() {
        assert!(Millis(50).has_elapsed(Millis(0), 50));
        assert!(!Millis(49).has_elapsed(Millis(0), 50));
    }
}

//! Free-running cycle counter
//!
//! Settle delays and the sensor polling period are both measured against
//! a counter that only ever counts up (and wraps). There is no calendar
//! clock and no scheduler.

/// Free-running hardware counter
pub trait CycleCounter {
    /// Current counter value
    ///
    /// Takes `&self`; mocks that advance on every read use interior
    /// mutability.
    fn now(&self) -> u32;

    /// Counter ticks per microsecond
    fn ticks_per_us(&self) -> u32;

    /// Busy-wait until at least `us` microseconds have passed
    fn delay_us(&mut self, us: u32) {
        let watch = Stopwatch::start(self);
        watch.wait_us(self, us);
    }

    /// Busy-wait until at least `ms` milliseconds have passed
    fn delay_ms(&mut self, ms: u32) {
        self.delay_us(ms.saturating_mul(1_000));
    }
}

/// Start mark on a [`CycleCounter`]
///
/// Equivalent to "reset the counter to zero, then poll until it reaches a
/// threshold", without actually resetting shared hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Stopwatch {
    start: u32,
}

impl Stopwatch {
    /// Mark the current counter value
    pub fn start<C: CycleCounter + ?Sized>(counter: &C) -> Self {
        Self {
            start: counter.now(),
        }
    }

    /// Ticks elapsed since the mark (wrap-safe)
    pub fn elapsed_ticks<C: CycleCounter + ?Sized>(&self, counter: &C) -> u32 {
        counter.now().wrapping_sub(self.start)
    }

    /// True once `us` microseconds have passed since the mark
    pub fn has_elapsed_us<C: CycleCounter + ?Sized>(&self, counter: &C, us: u32) -> bool {
        self.elapsed_ticks(counter) >= us.saturating_mul(counter.ticks_per_us())
    }

    /// Spin until `us` microseconds have passed since the mark
    pub fn wait_us<C: CycleCounter + ?Sized>(&self, counter: &C, us: u32) {
        while !self.has_elapsed_us(counter, us) {
            core::hint::spin_loop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    /// Counter that advances by `step` on every read
    struct Stepping {
        value: Cell<u32>,
        step: u32,
    }

    impl CycleCounter for Stepping {
        fn now(&self) -> u32 {
            let v = self.value.get();
            self.value.set(v.wrapping_add(self.step));
            v
        }

        fn ticks_per_us(&self) -> u32 {
            24
        }
    }

    #[test]
    fn test_delay_waits_full_duration() {
        let mut counter = Stepping {
            value: Cell::new(0),
            step: 10,
        };
        counter.delay_us(100);
        // 100us at 24 ticks/us = 2400 ticks
        assert!(counter.value.get() >= 2400);
    }

    #[test]
    fn test_stopwatch_wraps() {
        let counter = Stepping {
            value: Cell::new(u32::MAX - 5),
            step: 1,
        };
        let watch = Stopwatch::start(&counter);
        for _ in 0..9 {
            counter.now();
        }
        assert_eq!(watch.elapsed_ticks(&counter), 10);
    }

    #[test]
    fn test_has_elapsed() {
        let counter = Stepping {
            value: Cell::new(0),
            step: 24,
        };
        let watch = Stopwatch::start(&counter);
        assert!(!watch.has_elapsed_us(&counter, 5));
        counter.value.set(24 * 5);
        assert!(watch.has_elapsed_us(&counter, 5));
    }
}

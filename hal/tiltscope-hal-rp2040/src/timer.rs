//! Cycle counter backed by the embassy time driver
//!
//! The RP2040 timer is a free-running 64-bit microsecond counter; its low
//! 32 bits wrap after ~71 minutes, which [`tiltscope_hal::Stopwatch`]
//! handles.

use embassy_time::{block_for, Duration, Instant, TICK_HZ};
use tiltscope_hal::CycleCounter;

/// Free-running counter over `embassy_time::Instant`
#[derive(Debug, Clone, Copy, Default)]
pub struct TickCounter;

impl TickCounter {
    /// Create a counter handle
    pub const fn new() -> Self {
        Self
    }
}

impl CycleCounter for TickCounter {
    fn now(&self) -> u32 {
        Instant::now().as_ticks() as u32
    }

    fn ticks_per_us(&self) -> u32 {
        ((TICK_HZ / 1_000_000) as u32).max(1)
    }

    fn delay_us(&mut self, us: u32) {
        // Exact even when the tick rate is below 1 MHz
        block_for(Duration::from_micros(us as u64));
    }
}

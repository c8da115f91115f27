//! GPIO pin abstractions
//!
//! Provides traits for digital input and output pins that can be implemented
//! by chip-specific HALs, plus adapters for infallible `embedded-hal` pins.

use core::convert::Infallible;

use embedded_hal::digital as eh;

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Toggle the pin state
    fn toggle(&mut self) {
        if self.is_set_high() {
            self.set_low();
        } else {
            self.set_high();
        }
    }

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
///
/// Takes `&mut self` because sampling a shared open-drain line may touch
/// peripheral state.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&mut self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }
}

/// Pin that can be used for both input and output
///
/// Open-drain bus lines (I2C SDA/SCL) need this: setting the pin high
/// releases the line, and reading it returns what the bus actually shows.
pub trait IoPin: OutputPin + InputPin {}

// Blanket implementation for types that implement both traits
impl<T: OutputPin + InputPin> IoPin for T {}

/// Push-pull output adapter for `embedded-hal` pins that cannot fail
pub struct EhOutput<P> {
    pin: P,
    high: bool,
}

impl<P> EhOutput<P>
where
    P: eh::OutputPin + eh::ErrorType<Error = Infallible>,
{
    /// Wrap a pin and drive it to `initial_high`
    pub fn new(mut pin: P, initial_high: bool) -> Self {
        let _ = pin.set_state(initial_high.into());
        Self {
            pin,
            high: initial_high,
        }
    }

    /// Release the wrapped pin
    pub fn free(self) -> P {
        self.pin
    }
}

impl<P> OutputPin for EhOutput<P>
where
    P: eh::OutputPin + eh::ErrorType<Error = Infallible>,
{
    fn set_high(&mut self) {
        let _ = self.pin.set_high();
        self.high = true;
    }

    fn set_low(&mut self) {
        let _ = self.pin.set_low();
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Open-drain adapter: `set_high` releases the line, `is_high` samples it
pub struct EhOpenDrain<P> {
    pin: P,
    released: bool,
}

impl<P> EhOpenDrain<P>
where
    P: eh::OutputPin + eh::InputPin + eh::ErrorType<Error = Infallible>,
{
    /// Wrap a pin and release the line
    pub fn new(mut pin: P) -> Self {
        let _ = pin.set_high();
        Self {
            pin,
            released: true,
        }
    }

    /// Release the wrapped pin
    pub fn free(self) -> P {
        self.pin
    }
}

impl<P> OutputPin for EhOpenDrain<P>
where
    P: eh::OutputPin + eh::InputPin + eh::ErrorType<Error = Infallible>,
{
    fn set_high(&mut self) {
        let _ = self.pin.set_high();
        self.released = true;
    }

    fn set_low(&mut self) {
        let _ = self.pin.set_low();
        self.released = false;
    }

    fn is_set_high(&self) -> bool {
        self.released
    }
}

impl<P> InputPin for EhOpenDrain<P>
where
    P: eh::OutputPin + eh::InputPin + eh::ErrorType<Error = Infallible>,
{
    fn is_high(&mut self) -> bool {
        matches!(self.pin.is_high(), Ok(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakePin {
        level: bool,
        writes: u32,
    }

    impl eh::ErrorType for FakePin {
        type Error = Infallible;
    }

    impl eh::OutputPin for FakePin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.level = false;
            self.writes += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.level = true;
            self.writes += 1;
            Ok(())
        }
    }

    impl eh::InputPin for FakePin {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.level)
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.level)
        }
    }

    #[test]
    fn test_output_adapter_tracks_state() {
        let mut pin = EhOutput::new(
            FakePin {
                level: false,
                writes: 0,
            },
            true,
        );
        assert!(pin.is_set_high());

        pin.toggle();
        assert!(pin.is_set_low());

        pin.set_state(true);
        let raw = pin.free();
        assert!(raw.level);
        assert_eq!(raw.writes, 3);
    }

    #[test]
    fn test_open_drain_reads_line() {
        let mut pin = EhOpenDrain::new(FakePin {
            level: false,
            writes: 0,
        });
        assert!(pin.is_set_high());
        assert!(pin.is_high());

        pin.set_low();
        assert!(pin.is_low());
    }
}

//! Recording test doubles for the bus traits

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use tiltscope_core::traits::PixelWriter;
use tiltscope_core::Rgb565;
use tiltscope_hal::{Ack, CycleCounter, I2cMaster, OutputPin, SpiBus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

/// One primitive I2C operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum I2cCall {
    Start,
    Restart,
    Send(u8),
    Recv,
    Ack(Ack),
    Stop,
}

/// I2C master that records every call and answers from a queue
#[derive(Default)]
pub struct MockI2c {
    pub calls: Vec<I2cCall>,
    /// Bytes handed out by `recv`, an empty queue fails the call
    pub rx: VecDeque<u8>,
    /// Sent bytes the slave refuses to acknowledge
    pub nack_bytes: Vec<u8>,
    pub fail_on_start: bool,
}

impl MockI2c {
    pub fn new() -> Self {
        Self::default()
    }
}

impl I2cMaster for MockI2c {
    type Error = MockError;

    fn start(&mut self) -> Result<(), MockError> {
        if self.fail_on_start {
            return Err(MockError);
        }
        self.calls.push(I2cCall::Start);
        Ok(())
    }

    fn restart(&mut self) -> Result<(), MockError> {
        self.calls.push(I2cCall::Restart);
        Ok(())
    }

    fn send(&mut self, byte: u8) -> Result<Ack, MockError> {
        self.calls.push(I2cCall::Send(byte));
        if self.nack_bytes.contains(&byte) {
            Ok(Ack::Nack)
        } else {
            Ok(Ack::Ack)
        }
    }

    fn recv(&mut self) -> Result<u8, MockError> {
        self.calls.push(I2cCall::Recv);
        self.rx.pop_front().ok_or(MockError)
    }

    fn ack(&mut self, ack: Ack) -> Result<(), MockError> {
        self.calls.push(I2cCall::Ack(ack));
        Ok(())
    }

    fn stop(&mut self) -> Result<(), MockError> {
        self.calls.push(I2cCall::Stop);
        Ok(())
    }
}

/// Raw events on the display wires, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireEvent {
    Cs(bool),
    Dc(bool),
    Byte(u8),
    Delay(u32),
}

pub type WireLog = Rc<RefCell<Vec<WireEvent>>>;

pub fn wire_log() -> WireLog {
    Rc::new(RefCell::new(Vec::new()))
}

pub struct MockSpi {
    pub log: WireLog,
    /// Number of transfers before every further one fails
    pub fail_after: Option<usize>,
}

impl MockSpi {
    pub fn new(log: &WireLog) -> Self {
        Self {
            log: log.clone(),
            fail_after: None,
        }
    }
}

impl SpiBus for MockSpi {
    type Error = MockError;

    fn transfer(&mut self, byte: u8) -> Result<u8, MockError> {
        if let Some(left) = self.fail_after.as_mut() {
            if *left == 0 {
                return Err(MockError);
            }
            *left -= 1;
        }
        self.log.borrow_mut().push(WireEvent::Byte(byte));
        Ok(0)
    }
}

#[derive(Clone, Copy)]
pub enum Line {
    Cs,
    Dc,
}

pub struct MockPin {
    log: WireLog,
    line: Line,
    high: bool,
}

impl MockPin {
    pub fn new(log: &WireLog, line: Line) -> Self {
        Self {
            log: log.clone(),
            line,
            high: false,
        }
    }

    fn record(&mut self, high: bool) {
        self.high = high;
        let event = match self.line {
            Line::Cs => WireEvent::Cs(high),
            Line::Dc => WireEvent::Dc(high),
        };
        self.log.borrow_mut().push(event);
    }
}

impl OutputPin for MockPin {
    fn set_high(&mut self) {
        self.record(true);
    }

    fn set_low(&mut self) {
        self.record(false);
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Counter that logs requested delays instead of spinning
pub struct MockClock {
    log: WireLog,
    ticks: Cell<u32>,
}

impl MockClock {
    pub fn new(log: &WireLog) -> Self {
        Self {
            log: log.clone(),
            ticks: Cell::new(0),
        }
    }
}

impl CycleCounter for MockClock {
    fn now(&self) -> u32 {
        let t = self.ticks.get();
        self.ticks.set(t.wrapping_add(1));
        t
    }

    fn ticks_per_us(&self) -> u32 {
        1
    }

    fn delay_us(&mut self, us: u32) {
        self.log.borrow_mut().push(WireEvent::Delay(us));
    }
}

/// Decoded display traffic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wire {
    Command(u8),
    Data(u8),
    Delay(u32),
}

/// Turn raw wire events into command/data bytes
///
/// Panics if a byte moves while chip-select is high.
pub fn decode(log: &WireLog) -> Vec<Wire> {
    let mut cs_low = false;
    let mut dc_high = false;
    let mut out = Vec::new();
    for event in log.borrow().iter() {
        match *event {
            WireEvent::Cs(high) => cs_low = !high,
            WireEvent::Dc(high) => dc_high = high,
            WireEvent::Byte(b) => {
                assert!(cs_low, "byte {:#04x} sent without chip-select", b);
                out.push(if dc_high { Wire::Data(b) } else { Wire::Command(b) });
            }
            WireEvent::Delay(us) => out.push(Wire::Delay(us)),
        }
    }
    out
}

/// Pixel sink that remembers every write
pub struct Canvas {
    pub width: u16,
    pub height: u16,
    pub writes: Vec<(u16, u16, Rgb565)>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            writes: Vec::new(),
        }
    }
}

impl PixelWriter for Canvas {
    type Error = MockError;

    fn write_pixel(&mut self, x: u16, y: u16, color: Rgb565) -> Result<(), MockError> {
        self.writes.push((x, y, color));
        Ok(())
    }

    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }
}

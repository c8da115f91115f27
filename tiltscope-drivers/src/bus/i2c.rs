//! I2C transaction sequencer
//!
//! Wraps a bit-level [`I2cMaster`] and tracks where the current
//! transaction is, so the primitive operations can only be issued in a
//! legal order:
//!
//! ```text
//! Idle/Stopped --start--> Started --send(addr)--> Addressed
//!     Addressed --send/recv--> Transferring --ack/send/recv--> Transferring
//!     Addressed/Transferring --restart--> Started
//!     Started/Addressed/Transferring --stop--> Stopped
//! ```
//!
//! On top of that it builds the three transactions the sensor needs:
//! single register write, single register read and burst read.

use tiltscope_core::config::AckPolicy;
use tiltscope_hal::i2c::{read_address, write_address, Ack, I2cMaster};

/// Where the current transaction is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusState {
    /// Nothing issued yet
    Idle,
    /// Start or restart issued, next byte is an address
    Started,
    /// Address byte sent
    Addressed,
    /// At least one data byte moved
    Transferring,
    /// Stop issued
    Stopped,
}

/// Primitive bus operations, for reporting sequencing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusOp {
    Start,
    Restart,
    Send,
    Recv,
    Ack,
    Stop,
}

/// Which byte of a transaction was not acknowledged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NackStage {
    /// Address with the write bit
    WriteAddress,
    /// Register pointer
    Register,
    /// Data byte of a register write
    Data,
    /// Address with the read bit, after the restart
    ReadAddress,
}

/// I2C transaction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cError<E> {
    /// Underlying bus driver failed
    Bus(E),
    /// Slave did not acknowledge (only with [`AckPolicy::Abort`])
    Nack(NackStage),
    /// Operation is not valid in the current transaction state
    Sequence { op: BusOp, state: BusState },
    /// Burst length is zero or larger than the buffer
    Length { requested: usize, capacity: usize },
}

impl<E> From<E> for I2cError<E> {
    fn from(e: E) -> Self {
        I2cError::Bus(e)
    }
}

/// Number of bytes a burst read clocks in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadLength {
    /// Exactly `n` receives
    Exact(usize),
    /// `n + 1` receives, matching a `0..=n` loop bound
    Inclusive(usize),
}

impl ReadLength {
    /// Receive operations this length stands for
    pub const fn count(self) -> usize {
        match self {
            ReadLength::Exact(n) => n,
            ReadLength::Inclusive(n) => n + 1,
        }
    }
}

/// Checked I2C master
pub struct I2cSequencer<B> {
    bus: B,
    state: BusState,
    ack_policy: AckPolicy,
    nacks: u32,
}

impl<B: I2cMaster> I2cSequencer<B> {
    pub fn new(bus: B, ack_policy: AckPolicy) -> Self {
        Self {
            bus,
            state: BusState::Idle,
            ack_policy,
            nacks: 0,
        }
    }

    /// Release the underlying bus
    pub fn free(self) -> B {
        self.bus
    }

    pub fn state(&self) -> BusState {
        self.state
    }

    pub fn ack_policy(&self) -> AckPolicy {
        self.ack_policy
    }

    /// Missing acknowledgments seen while running with [`AckPolicy::Ignore`]
    pub fn nack_count(&self) -> u32 {
        self.nacks
    }

    fn check(&self, op: BusOp, allowed: &[BusState]) -> Result<(), I2cError<B::Error>> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(I2cError::Sequence {
                op,
                state: self.state,
            })
        }
    }

    pub fn start(&mut self) -> Result<(), I2cError<B::Error>> {
        self.check(BusOp::Start, &[BusState::Idle, BusState::Stopped])?;
        self.bus.start()?;
        self.state = BusState::Started;
        Ok(())
    }

    pub fn restart(&mut self) -> Result<(), I2cError<B::Error>> {
        self.check(BusOp::Restart, &[BusState::Addressed, BusState::Transferring])?;
        self.bus.restart()?;
        self.state = BusState::Started;
        Ok(())
    }

    /// Send one byte and return what the slave answered
    pub fn send(&mut self, byte: u8) -> Result<Ack, I2cError<B::Error>> {
        self.check(
            BusOp::Send,
            &[BusState::Started, BusState::Addressed, BusState::Transferring],
        )?;
        let ack = self.bus.send(byte)?;
        self.state = match self.state {
            BusState::Started => BusState::Addressed,
            _ => BusState::Transferring,
        };
        Ok(ack)
    }

    pub fn recv(&mut self) -> Result<u8, I2cError<B::Error>> {
        self.check(BusOp::Recv, &[BusState::Addressed, BusState::Transferring])?;
        let byte = self.bus.recv()?;
        self.state = BusState::Transferring;
        Ok(byte)
    }

    pub fn ack(&mut self, ack: Ack) -> Result<(), I2cError<B::Error>> {
        self.check(BusOp::Ack, &[BusState::Transferring])?;
        self.bus.ack(ack)?;
        Ok(())
    }

    pub fn stop(&mut self) -> Result<(), I2cError<B::Error>> {
        self.check(
            BusOp::Stop,
            &[BusState::Started, BusState::Addressed, BusState::Transferring],
        )?;
        self.bus.stop()?;
        self.state = BusState::Stopped;
        Ok(())
    }

    /// Send a byte and apply the acknowledgment policy
    fn send_expecting_ack(&mut self, byte: u8, stage: NackStage) -> Result<(), I2cError<B::Error>> {
        if self.send(byte)?.is_ack() {
            return Ok(());
        }

        match self.ack_policy {
            AckPolicy::Ignore => {
                self.nacks = self.nacks.wrapping_add(1);
                #[cfg(feature = "defmt")]
                defmt::warn!("i2c: no ack for {=u8:#x} at {}", byte, stage);
                Ok(())
            }
            AckPolicy::Abort => {
                self.stop()?;
                Err(I2cError::Nack(stage))
            }
        }
    }

    /// Start a transaction and point the device at `register`
    fn select(&mut self, address: u8, register: u8) -> Result<(), I2cError<B::Error>> {
        self.start()?;
        self.send_expecting_ack(write_address(address), NackStage::WriteAddress)?;
        self.send_expecting_ack(register, NackStage::Register)
    }

    /// Write one register: start, address|W, register, value, stop
    pub fn write_register(
        &mut self,
        address: u8,
        register: u8,
        value: u8,
    ) -> Result<(), I2cError<B::Error>> {
        let result = self
            .select(address, register)
            .and_then(|_| self.send_expecting_ack(value, NackStage::Data))
            .and_then(|_| self.stop());
        self.release_on_error(result)
    }

    /// Read one register: start, address|W, register, restart, address|R,
    /// recv, nack, stop
    pub fn read_register(&mut self, address: u8, register: u8) -> Result<u8, I2cError<B::Error>> {
        let mut byte = [0u8; 1];
        self.burst_read(address, register, &mut byte, ReadLength::Exact(1))?;
        Ok(byte[0])
    }

    /// Read consecutive registers starting at `register` into `buf`
    ///
    /// Every byte but the last is acknowledged; the last gets a NACK so
    /// the slave releases SDA before the stop. Returns the number of
    /// bytes read.
    pub fn burst_read(
        &mut self,
        address: u8,
        register: u8,
        buf: &mut [u8],
        length: ReadLength,
    ) -> Result<usize, I2cError<B::Error>> {
        let count = length.count();
        if count == 0 || count > buf.len() {
            return Err(I2cError::Length {
                requested: count,
                capacity: buf.len(),
            });
        }

        let result = self.read_into(address, register, &mut buf[..count]);
        self.release_on_error(result).map(|_| count)
    }

    fn read_into(&mut self, address: u8, register: u8, buf: &mut [u8]) -> Result<(), I2cError<B::Error>> {
        self.select(address, register)?;
        self.restart()?;
        self.send_expecting_ack(read_address(address), NackStage::ReadAddress)?;

        let last = buf.len() - 1;
        for (i, slot) in buf.iter_mut().enumerate() {
            *slot = self.recv()?;
            self.ack(if i == last { Ack::Nack } else { Ack::Ack })?;
        }

        self.stop()
    }

    /// Issue a best-effort stop if a transaction failed half way, so the
    /// next one can start
    fn release_on_error<T>(&mut self, result: Result<T, I2cError<B::Error>>) -> Result<T, I2cError<B::Error>> {
        if result.is_err()
            && matches!(
                self.state,
                BusState::Started | BusState::Addressed | BusState::Transferring
            )
        {
            let _ = self.bus.stop();
            self.state = BusState::Stopped;
        }
        result
    }
}

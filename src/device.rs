//! Capability traits consumed by the control core
//!
//! The core does not talk to hardware directly. Everything timing- or
//! transport-specific is pulled in through three narrow capabilities:
//!
//! - [`RadioDevice`]: the SPI radio driver primitives (mode changes, send,
//!   raw register access)
//! - [`SleepTimer`]: the low-power sleep primitive, one bounded step per call
//! - [`Console`]: line-oriented serial I/O for operator interaction
//!
//! Firmware binds these to a real driver, sleep controller and UART; tests
//! substitute in-memory fakes. The core owns exactly one implementation of
//! each, so no locking is required anywhere.

/// Radio driver primitives used by the control core.
///
/// This is a thin hardware-facing surface: a failed bus transaction is not
/// detectable at this layer, and no call here retries. The two operations
/// that can meaningfully fail (`init`, `send`) report success as a `bool`;
/// everything else is assumed reliable within scope.
///
/// # Important Notes
/// - `set_mode_idle` must be called before `send` (driver requirement)
/// - `read_register`/`write_register` perform exactly one bus transaction
///   each, with no address validation
/// - Register values read from the device are authoritative; the core never
///   caches them as a source of truth
pub trait RadioDevice {
    /// Initializes the radio. Returns `false` if the device did not come up.
    fn init(&mut self) -> bool;

    /// Sets the carrier frequency in MHz.
    fn set_frequency(&mut self, mhz: f32);

    /// Sets the transmit power in dBm, optionally routed through the
    /// high-power PA_BOOST output.
    fn set_tx_power(&mut self, dbm: i8, high_power: bool);

    /// Places the radio in idle/standby mode.
    fn set_mode_idle(&mut self);

    /// Transmits a payload. Returns `false` if the send did not complete.
    fn send(&mut self, payload: &[u8]) -> bool;

    /// Places the radio in its low-power sleep mode.
    fn sleep(&mut self);

    /// Reads a single configuration register.
    fn read_register(&mut self, addr: u8) -> u8;

    /// Writes a single configuration register.
    fn write_register(&mut self, addr: u8, value: u8);
}

/// Duration classes supported by the low-power sleep primitive.
///
/// The underlying timer only guarantees accuracy within one bounded step, so
/// longer sleep intervals are composed from repeated short steps rather than
/// requested in one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerStep {
    Ms15,
    Ms30,
    Ms60,
    Ms120,
    Ms250,
    Ms500,
    Ms1000,
    Ms2000,
    Ms4000,
    Ms8000,
}

impl PowerStep {
    /// Nominal duration of this step in milliseconds.
    pub fn duration_ms(self) -> u32 {
        match self {
            Self::Ms15 => 15,
            Self::Ms30 => 30,
            Self::Ms60 => 60,
            Self::Ms120 => 120,
            Self::Ms250 => 250,
            Self::Ms500 => 500,
            Self::Ms1000 => 1000,
            Self::Ms2000 => 2000,
            Self::Ms4000 => 4000,
            Self::Ms8000 => 8000,
        }
    }
}

/// Low-power sleep capability.
pub trait SleepTimer {
    /// Blocks in a low-power state for one bounded step.
    fn power_down_step(&mut self, step: PowerStep);
}

/// Line-oriented serial console capability.
///
/// Lines are newline-terminated on the wire; the terminator is not included
/// in the bytes handed back. A line longer than the caller's buffer is
/// truncated to fit and the remainder discarded, so over-long input fails
/// command matching and is ignored rather than smearing into the next line.
pub trait Console {
    /// Returns a complete line if one is available, without blocking.
    ///
    /// Consumes at most one line per call and returns the number of bytes
    /// copied into `buf`.
    fn poll_line(&mut self, buf: &mut [u8]) -> Option<usize>;

    /// Blocks until a complete line is available and returns the number of
    /// bytes copied into `buf`.
    fn read_line(&mut self, buf: &mut [u8]) -> usize;

    /// Writes a string to the console.
    fn write_str(&mut self, s: &str);
}

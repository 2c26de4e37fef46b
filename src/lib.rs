#![cfg_attr(not(test), no_std)]
//! Control core for a low-power SX1276/RFM95 LoRa beacon node
//!
//! This crate implements the configuration and power-state sequencing logic
//! of a battery-powered LoRa node that periodically transmits a fixed
//! 8-byte payload, accepts run-time tuning of bandwidth and spreading
//! factor over a serial console, and cuts power to the radio through an
//! external load switch between transmissions.
//!
//! # Architecture
//! The crate is organized into several modules:
//!
//! - [`device`]: Capability traits the core consumes
//!   - [`RadioDevice`]: the SPI radio driver primitives
//!   - [`SleepTimer`]: the bounded low-power sleep primitive
//!   - [`Console`]: line-oriented serial I/O
//!
//! - [`registers`]: Typed SX1276 register definitions and the
//!   read-modify-write helpers every field update goes through
//!
//! - [`modem`]: Bandwidth / spreading factor / CRC configuration with
//!   range validation
//!
//! - [`power`]: Load switch and status indicator control
//!
//! - [`console`]: Pause/resume command polling and validated startup input
//!
//! - [`node`]: The Idle/Transmitting/Sleeping state machine and the outer
//!   cycle tying everything together
//!
//! # Usage
//! Bind the three capability traits to your hardware, hand the pieces to
//! [`Node`], and call [`Node::run`]:
//!
//! ```ignore
//! let power = PowerGate::new(load_switch_pin, led_pin);
//! let node = Node::new(radio, reset_pin, power, delay, sleep_timer, uart);
//! node.run(); // reads config from the console, then cycles forever
//! ```
//!
//! # Important Notes
//! - Everything is synchronous and single-threaded; the sleep interval
//!   blocks command polling until it completes
//! - Configuration registers share bytes with fields this crate does not
//!   own, so all updates are read-modify-write; sibling bits are never
//!   disturbed
//! - Transmissions are fire-and-forget: no retries, acknowledgments, or
//!   collision avoidance
//! - A radio that fails to initialize is fatal; the run loop halts rather
//!   than operate without a working radio

pub mod console;
pub mod device;
pub mod modem;
pub mod node;
pub mod power;
pub mod registers;

#[cfg(test)]
pub(crate) mod testutil;

pub use console::{read_config, Command, CommandLoop};
pub use device::{Console, PowerStep, RadioDevice, SleepTimer};
pub use modem::{RadioConfig, PREAMBLE_LENGTH};
pub use node::{Node, RadioState, PAYLOAD};
pub use power::PowerGate;
pub use registers::{Bandwidth, SpreadingFactor};

/// Errors surfaced by the control core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A configuration parameter was outside its allowed range. The caller
    /// re-prompts and retries; no hardware state was modified.
    OutOfRange,
    /// The radio failed to initialize after reset. Fatal: there is no
    /// functional fallback without a working radio.
    InitFailed,
    /// A digital output line could not be driven.
    Pin,
}

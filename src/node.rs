//! Node lifecycle: reset sequencing, transmit cycle and sleep intervals
//!
//! [`Node`] owns the radio device handle and both output lines, and drives
//! the three-state machine the whole system revolves around:
//!
//! ```text
//! Idle --begin_transmit--> Transmitting --complete_cycle--> Sleeping
//!  ^                                                            |
//!  +----------------------sleep_interval-----------------------+
//! ```
//!
//! Exactly one state is active at any time, and the load switch level is a
//! pure function of it: high while Transmitting, low otherwise.
//!
//! Transmissions are fire-and-forget. A failed send is reported on the
//! console, skips the counter increment and the indicator pulse, and the
//! cycle proceeds to sleep identically; the periodic cycle itself is the
//! only retry mechanism in the system.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::console::{read_config, CommandLoop};
use crate::device::{Console, PowerStep, RadioDevice, SleepTimer};
use crate::modem::{self, RadioConfig};
use crate::power::PowerGate;
use crate::Error;

/// Fixed payload transmitted every cycle, constant for the process lifetime.
pub const PAYLOAD: [u8; 8] = *b"PING0001";

/// Carrier frequency in MHz.
pub const FREQUENCY_MHZ: f32 = 915.0;

/// Transmit power in dBm (RFO output, PA_BOOST not used).
pub const TX_POWER_DBM: i8 = 13;

/// How long the reset line is held low.
pub const RESET_HOLD_MS: u32 = 10;

/// Settle time after releasing the reset line, before `init`.
pub const RESET_SETTLE_MS: u32 = 10;

/// Delay between energizing the load switch and handing the payload to the
/// radio, letting the supply settle.
pub const TX_SETTLE_MS: u32 = 1000;

/// Indicator pulse duration after a successful send.
pub const INDICATOR_PULSE_MS: u32 = 500;

/// Number of power-down steps composing one sleep interval.
pub const SLEEP_STEPS: u32 = 12;

/// Duration class of each power-down step. 12 x 250ms = 3s per interval.
const SLEEP_STEP: PowerStep = PowerStep::Ms250;

/// Radio power state. Exactly one is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioState {
    /// Powered but not transmitting; initial state after reset.
    Idle,
    /// Load switch closed, payload being sent.
    Transmitting,
    /// Radio and load switch powered down between cycles.
    Sleeping,
}

/// The beacon node control core.
///
/// Composes the capability implementations and sequences them through the
/// transmit/sleep cycle. Single-threaded and cooperative: the only
/// suspension point is the explicit sleep interval, which blocks everything
/// including command polling until it completes.
pub struct Node<D, RST, SW, LED, DELAY, SLP, IO> {
    device: D,
    reset_pin: RST,
    power: PowerGate<SW, LED>,
    delay: DELAY,
    sleep_timer: SLP,
    console: IO,
    commands: CommandLoop,
    state: RadioState,
    packet_count: u32,
}

impl<D, RST, SW, LED, DELAY, SLP, IO> Node<D, RST, SW, LED, DELAY, SLP, IO>
where
    D: RadioDevice,
    RST: OutputPin,
    SW: OutputPin,
    LED: OutputPin,
    DELAY: DelayNs,
    SLP: SleepTimer,
    IO: Console,
{
    /// Creates a node over the supplied capabilities. The radio is not
    /// touched until [`Node::reset`].
    pub fn new(
        device: D,
        reset_pin: RST,
        power: PowerGate<SW, LED>,
        delay: DELAY,
        sleep_timer: SLP,
        console: IO,
    ) -> Self {
        Self {
            device,
            reset_pin,
            power,
            delay,
            sleep_timer,
            console,
            commands: CommandLoop::new(),
            state: RadioState::Idle,
            packet_count: 0,
        }
    }

    /// Current state machine position.
    pub fn state(&self) -> RadioState {
        self.state
    }

    /// Packets successfully sent since reset. Monotonic, never reset.
    pub fn packet_count(&self) -> u32 {
        self.packet_count
    }

    /// Whether the operator has paused transmissions.
    pub fn is_paused(&self) -> bool {
        self.commands.is_paused()
    }

    /// Pulses the reset line and initializes the radio.
    ///
    /// The line is asserted low for [`RESET_HOLD_MS`], released, and the
    /// device given [`RESET_SETTLE_MS`] to come up before `init` is called.
    ///
    /// # Errors
    /// * `Error::InitFailed` - the radio did not initialize. There is no
    ///   functional fallback without a working radio; [`Node::run`] halts
    ///   permanently on this.
    /// * `Error::Pin` - the reset line could not be driven
    pub fn reset(&mut self) -> Result<(), Error> {
        self.reset_pin.set_low().map_err(|_| Error::Pin)?;
        self.delay.delay_ms(RESET_HOLD_MS);
        self.reset_pin.set_high().map_err(|_| Error::Pin)?;
        self.delay.delay_ms(RESET_SETTLE_MS);

        if self.device.init() {
            self.state = RadioState::Idle;
            Ok(())
        } else {
            Err(Error::InitFailed)
        }
    }

    /// Programs frequency, TX power and the modem configuration.
    pub fn configure(&mut self, config: &RadioConfig) {
        self.device.set_frequency(FREQUENCY_MHZ);
        self.device.set_tx_power(TX_POWER_DBM, false);
        modem::apply(&mut self.device, config);
    }

    /// Idle -> Transmitting. Returns whether the payload was sent.
    ///
    /// The radio is put in idle/standby first (driver requirement before a
    /// send), the load switch closed, and the supply given [`TX_SETTLE_MS`]
    /// to settle before the payload is handed over.
    ///
    /// # Errors
    /// * `Error::Pin` - the load switch line could not be driven
    pub fn begin_transmit(&mut self) -> Result<bool, Error> {
        self.device.set_mode_idle();
        self.state = RadioState::Transmitting;
        self.power.energize()?;
        self.delay.delay_ms(TX_SETTLE_MS);
        Ok(self.device.send(&PAYLOAD))
    }

    /// Transmitting -> Sleeping, unconditionally.
    ///
    /// On success the packet counter is incremented and the indicator
    /// pulsed for [`INDICATOR_PULSE_MS`]; on failure neither happens. The
    /// state transition is identical in both cases.
    ///
    /// # Errors
    /// * `Error::Pin` - the indicator line could not be driven
    pub fn complete_cycle(&mut self, success: bool) -> Result<(), Error> {
        self.state = RadioState::Sleeping;
        if success {
            self.packet_count += 1;
            self.power
                .pulse_indicator(&mut self.delay, INDICATOR_PULSE_MS)?;
        }
        Ok(())
    }

    /// Sleeping -> Idle after one full sleep interval.
    ///
    /// Puts the radio to sleep, opens the load switch, extinguishes the
    /// indicator, then blocks for [`SLEEP_STEPS`] power-down steps. The
    /// interval cannot be cancelled once started; commands are not observed
    /// until it completes.
    ///
    /// # Errors
    /// * `Error::Pin` - an output line could not be driven
    pub fn sleep_interval(&mut self) -> Result<(), Error> {
        self.device.sleep();
        self.power.deenergize()?;
        self.power.indicator_off()?;
        for _ in 0..SLEEP_STEPS {
            self.sleep_timer.power_down_step(SLEEP_STEP);
        }
        self.state = RadioState::Idle;
        Ok(())
    }

    /// Runs one outer cycle: command poll, then (unless paused) one
    /// transmit/sleep sequence.
    ///
    /// The command check always precedes the transmit/sleep sequence, and
    /// the transmit always precedes its associated sleep.
    ///
    /// # Errors
    /// * `Error::Pin` - an output line could not be driven
    pub fn run_cycle(&mut self) -> Result<(), Error> {
        self.commands.poll(&mut self.console);
        if self.commands.is_paused() {
            return Ok(());
        }

        let sent = self.begin_transmit()?;
        if !sent {
            self.console.write_str("send failed\r\n");
        }
        self.complete_cycle(sent)?;
        self.sleep_interval()
    }

    /// Full startup and main loop: read the modem configuration from the
    /// console, reset and configure the radio, then cycle forever.
    ///
    /// If the radio fails to initialize the node reports it and halts
    /// permanently; without a working radio the device has no purpose.
    pub fn run(mut self) -> ! {
        let config = read_config(&mut self.console);

        if self.reset().is_err() {
            self.console.write_str("radio init failed\r\n");
            loop {}
        }
        self.configure(&config);

        loop {
            if self.run_cycle().is_err() {
                self.console.write_str("output line fault\r\n");
            }
        }
    }

    /// Releases the underlying capabilities.
    ///
    /// This method consumes the node and returns the wrapped parts.
    pub fn free(self) -> (D, RST, PowerGate<SW, LED>, DELAY, SLP, IO) {
        (
            self.device,
            self.reset_pin,
            self.power,
            self.delay,
            self.sleep_timer,
            self.console,
        )
    }
}

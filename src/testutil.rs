//! In-memory capability fakes shared by the unit tests.

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use crate::device::{Console, PowerStep, RadioDevice, SleepTimer};

/// Fake radio holding a register file and recording every call.
///
/// Register power-on defaults match the SX1276 datasheet for the registers
/// the core touches.
pub struct MockRadio {
    pub regs: [u8; 0x80],
    pub reads: Vec<u8>,
    pub writes: Vec<(u8, u8)>,
    pub init_result: bool,
    pub init_calls: u32,
    pub send_result: bool,
    pub sent: Vec<Vec<u8>>,
    pub idle_calls: u32,
    pub sleep_calls: u32,
    pub frequency: Option<f32>,
    pub tx_power: Option<(i8, bool)>,
}

impl Default for MockRadio {
    fn default() -> Self {
        let mut regs = [0u8; 0x80];
        regs[0x1D] = 0x72;
        regs[0x1E] = 0x70;
        regs[0x20] = 0x00;
        regs[0x21] = 0x08;
        Self {
            regs,
            reads: Vec::new(),
            writes: Vec::new(),
            init_result: true,
            init_calls: 0,
            send_result: true,
            sent: Vec::new(),
            idle_calls: 0,
            sleep_calls: 0,
            frequency: None,
            tx_power: None,
        }
    }
}

impl RadioDevice for MockRadio {
    fn init(&mut self) -> bool {
        self.init_calls += 1;
        self.init_result
    }

    fn set_frequency(&mut self, mhz: f32) {
        self.frequency = Some(mhz);
    }

    fn set_tx_power(&mut self, dbm: i8, high_power: bool) {
        self.tx_power = Some((dbm, high_power));
    }

    fn set_mode_idle(&mut self) {
        self.idle_calls += 1;
    }

    fn send(&mut self, payload: &[u8]) -> bool {
        self.sent.push(payload.to_vec());
        self.send_result
    }

    fn sleep(&mut self) {
        self.sleep_calls += 1;
    }

    fn read_register(&mut self, addr: u8) -> u8 {
        self.reads.push(addr);
        self.regs[addr as usize]
    }

    fn write_register(&mut self, addr: u8, value: u8) {
        self.writes.push((addr, value));
        self.regs[addr as usize] = value;
    }
}

/// Fake sleep timer recording each requested step.
#[derive(Default)]
pub struct MockSleep {
    pub steps: Vec<PowerStep>,
}

impl SleepTimer for MockSleep {
    fn power_down_step(&mut self, step: PowerStep) {
        self.steps.push(step);
    }
}

/// Fake console with a queue of input lines and captured output.
#[derive(Default)]
pub struct MockConsole {
    pub lines: VecDeque<String>,
    pub output: String,
}

impl MockConsole {
    pub fn with_lines(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|line| line.to_string()).collect(),
            output: String::new(),
        }
    }

    fn pop_into(&mut self, buf: &mut [u8]) -> Option<usize> {
        let line = self.lines.pop_front()?;
        let bytes = line.as_bytes();
        let len = bytes.len().min(buf.len());
        buf[..len].copy_from_slice(&bytes[..len]);
        Some(len)
    }
}

impl Console for MockConsole {
    fn poll_line(&mut self, buf: &mut [u8]) -> Option<usize> {
        self.pop_into(buf)
    }

    fn read_line(&mut self, buf: &mut [u8]) -> usize {
        self.pop_into(buf)
            .expect("blocking read with no queued input")
    }

    fn write_str(&mut self, s: &str) {
        self.output.push_str(s);
    }
}

/// Fake output pin recording every driven level.
#[derive(Default)]
pub struct FakePin {
    pub states: Vec<bool>,
}

impl ErrorType for FakePin {
    type Error = core::convert::Infallible;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.states.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.states.push(true);
        Ok(())
    }
}

/// Fake delay recording millisecond waits instead of blocking.
#[derive(Default)]
pub struct FakeDelay {
    pub delays_ms: Vec<u32>,
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.delays_ms.push(ms);
    }
}

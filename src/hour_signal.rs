//! Top-of-hour serial signal
//!
//! A separate listener (the hourly light show) watches a serial line that
//! carries one byte per minute poll: `0x01` during the first minute of the
//! hour, `0x00` otherwise.

use embassy_time::Duration;

#[cfg(feature = "log")]
use log::info;

use crate::error::HardwareError;

/// Byte sent during the top-of-hour minute
pub const TOP_OF_HOUR: u8 = 0x01;
/// Byte sent during every other minute
pub const OFF_HOUR: u8 = 0x00;

/// Time between two polls of the wall clock
pub const POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Byte for the given minute of the hour
pub const fn signal_byte(minute: u8) -> u8 {
    if minute == 0 { TOP_OF_HOUR } else { OFF_HOUR }
}

/// Byte sink, e.g. a USB serial device
pub trait SerialLine {
    fn write_byte(&mut self, byte: u8) -> Result<(), HardwareError>;
}

pub struct HourSignal<S: SerialLine> {
    line: S,
    last: Option<u8>,
}

impl<S: SerialLine> HourSignal<S> {
    pub const fn new(line: S) -> Self {
        Self { line, last: None }
    }

    /// Write the byte for `minute`; exactly one byte per call
    pub fn poll(&mut self, minute: u8) -> Result<u8, HardwareError> {
        let byte = signal_byte(minute);
        self.line.write_byte(byte)?;

        #[cfg(feature = "log")]
        if self.last != Some(byte) {
            info!("hour signal now {:#04x}", byte);
        }
        self.last = Some(byte);

        Ok(byte)
    }

    /// Last byte written
    pub const fn last(&self) -> Option<u8> {
        self.last
    }

    pub fn line(&self) -> &S {
        &self.line
    }
}

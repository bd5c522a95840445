//! Top-of-hour signal for the hourly light show
//!
//! Writes one byte per minute to a serial device at 9600 baud: `0x01`
//! during the first minute of the hour, `0x00` otherwise. The device path
//! defaults to `/dev/ttyACM0` and can be given as the first argument.

use std::io::Write;
use std::time::Duration as StdDuration;
use std::{env, process, thread};

use chrono::{Local, Timelike};
use log::{error, info};
use serialport::SerialPort;
use showrunner::hour_signal::POLL_INTERVAL;
use showrunner::{HardwareError, HourSignal, SerialLine};

const DEFAULT_DEVICE: &str = "/dev/ttyACM0";
const BAUD_RATE: u32 = 9_600;
const WRITE_TIMEOUT: StdDuration = StdDuration::from_secs(1);

struct PortLine(Box<dyn SerialPort>);

impl SerialLine for PortLine {
    fn write_byte(&mut self, byte: u8) -> Result<(), HardwareError> {
        self.0
            .write_all(&[byte])
            .and_then(|()| self.0.flush())
            .map_err(|err| {
                error!("serial write failed: {err}");
                HardwareError::SerialWrite
            })
    }
}

/// Open `device` as an 8N1 line at [`BAUD_RATE`]
fn open_line(device: &str) -> serialport::Result<PortLine> {
    serialport::new(device, BAUD_RATE)
        .timeout(WRITE_TIMEOUT)
        .open()
        .map(PortLine)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let device = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DEVICE.to_owned());
    let line = match open_line(&device) {
        Ok(line) => line,
        Err(err) => {
            error!("cannot open {device}: {err}");
            process::exit(1);
        }
    };
    info!("signalling the top of the hour on {device} at {BAUD_RATE} baud");

    let mut signal = HourSignal::new(line);
    let interval = StdDuration::from_secs(POLL_INTERVAL.as_secs());
    loop {
        #[allow(clippy::cast_possible_truncation)]
        let minute = Local::now().minute() as u8;
        if let Err(err) = signal.poll(minute) {
            error!("{err}");
            process::exit(1);
        }
        thread::sleep(interval);
    }
}

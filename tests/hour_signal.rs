mod tests {
    use showrunner::hour_signal::{OFF_HOUR, POLL_INTERVAL, TOP_OF_HOUR};
    use showrunner::{Duration, HardwareError, HourSignal, SerialLine, signal_byte};

    #[derive(Default)]
    struct Line {
        bytes: Vec<u8>,
        unplugged: bool,
    }

    impl SerialLine for Line {
        fn write_byte(&mut self, byte: u8) -> Result<(), HardwareError> {
            if self.unplugged {
                return Err(HardwareError::SerialWrite);
            }
            self.bytes.push(byte);
            Ok(())
        }
    }

    #[test]
    fn test_signal_byte() {
        assert_eq!(signal_byte(0), TOP_OF_HOUR);
        for minute in 1..60 {
            assert_eq!(signal_byte(minute), OFF_HOUR);
        }
    }

    #[test]
    fn test_one_byte_per_poll() {
        let mut signal = HourSignal::new(Line::default());
        assert_eq!(signal.last(), None);

        for minute in [58, 59, 0, 1] {
            signal.poll(minute).expect("write");
        }

        assert_eq!(signal.line().bytes, [0x00, 0x00, 0x01, 0x00]);
        assert_eq!(signal.last(), Some(OFF_HOUR));
    }

    #[test]
    fn test_write_failure_keeps_last_byte() {
        let mut signal = HourSignal::new(Line {
            unplugged: true,
            ..Line::default()
        });
        assert_eq!(signal.poll(0), Err(HardwareError::SerialWrite));
        assert_eq!(signal.last(), None);
    }

    #[test]
    fn test_polls_once_a_minute() {
        assert_eq!(POLL_INTERVAL, Duration::from_secs(60));
    }
}

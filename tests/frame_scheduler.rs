mod tests {
    use embassy_time::{Duration, Instant};
    use showrunner::FrameScheduler;

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn test_keeps_steady_rate() {
        let mut scheduler = FrameScheduler::new(Duration::from_millis(5));

        let frame = scheduler.tick(at(0));
        assert_eq!(frame.next_deadline, at(5));
        assert_eq!(frame.sleep_duration, Duration::from_millis(5));

        let frame = scheduler.tick(at(7));
        assert_eq!(frame.next_deadline, at(10));
        assert_eq!(frame.sleep_duration, Duration::from_millis(3));
    }

    #[test]
    fn test_no_sleep_when_slightly_behind() {
        let mut scheduler = FrameScheduler::new(Duration::from_millis(5));
        scheduler.tick(at(0));

        let frame = scheduler.tick(at(14));
        assert_eq!(frame.next_deadline, at(10));
        assert_eq!(frame.sleep_duration, Duration::from_millis(0));
    }

    #[test]
    fn test_resets_after_long_stall() {
        let mut scheduler = FrameScheduler::new(Duration::from_millis(5));
        scheduler.tick(at(0));

        let frame = scheduler.tick(at(1_000));
        assert_eq!(frame.next_deadline, at(1_005));
        assert_eq!(frame.sleep_duration, Duration::from_millis(5));
    }

    #[test]
    fn test_default_poll_interval() {
        assert_eq!(
            FrameScheduler::default().frame_duration(),
            Duration::from_millis(5)
        );
    }
}

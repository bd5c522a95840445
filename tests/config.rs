mod tests {
    use showrunner::{
        Answer, ConfigError, Duration, Input, MotorPair, Output, PinMap, ShowConfig, ShowTimings,
        ShowTracks, StripLayout, TimingWindow,
    };

    #[test]
    fn test_default_show() {
        let config = ShowConfig::default();
        assert_eq!(config.question_count(), 9);
        for (index, question) in config.questions.iter().enumerate() {
            assert_eq!(usize::from(question.number), index + 1);
            assert_eq!(question.indicator, index);
            assert_eq!(question.track.name(), format!("q{}", index + 1));
        }
        assert_eq!(config.validate(StripLayout::DEFAULT.indicators.count()), Ok(()));
    }

    #[test]
    fn test_default_timings() {
        let timings = ShowTimings::default();
        assert_eq!(timings.window(), TimingWindow::DEFAULT);
        assert_eq!(timings.motor_run, Duration::from_secs(5));
        assert_eq!(timings.poll_interval, Duration::from_millis(5));
        assert_eq!(timings.input_bounce, Duration::from_secs(5));
    }

    #[test]
    fn test_default_tracks() {
        let tracks = ShowTracks::default();
        assert_eq!(tracks.start_chime.name(), "buttonpress");
        assert_eq!(tracks.intro.name(), "intro");
        assert_eq!(tracks.warning.name(), "inactivitywarning");
        assert_eq!(tracks.finale.name(), "finale");
    }

    #[test]
    fn test_indicators_must_fit_strip() {
        let config = ShowConfig::default();
        assert_eq!(
            config.validate(8),
            Err(ConfigError::IndicatorOutOfRange {
                question: 9,
                index: 8,
                available: 8,
            })
        );
    }

    #[test]
    fn test_warning_equal_to_timeout_is_rejected() {
        let mut config = ShowConfig::default();
        config.timings.warning_threshold = config.timings.hard_timeout;
        assert_eq!(config.validate(10), Err(ConfigError::WarningAfterTimeout));
    }

    #[test]
    fn test_zero_poll_interval_is_rejected() {
        let mut config = ShowConfig::default();
        config.timings.poll_interval = Duration::from_ticks(0);
        assert_eq!(config.validate(10), Err(ConfigError::ZeroPollInterval));
    }

    #[test]
    fn test_pin_map() {
        let pins = PinMap::default();
        assert_eq!(pins.input(Input::Start), 16);
        assert_eq!(pins.input(Input::Yes), 19);
        assert_eq!(pins.input(Input::No), 13);
        assert_eq!(pins.output(Output::StartLight), 20);
        assert_eq!(pins.output(Output::MotorInteriorYes), 6);
        assert_eq!(pins.output(Output::MotorExteriorNo), 7);
    }

    #[test]
    fn test_motor_polarity() {
        assert_eq!(
            MotorPair::for_answer(Answer::Yes),
            MotorPair {
                interior: Output::MotorInteriorYes,
                exterior: Output::MotorExteriorYes,
            }
        );
        assert_eq!(
            MotorPair::for_answer(Answer::No),
            MotorPair {
                interior: Output::MotorInteriorNo,
                exterior: Output::MotorExteriorNo,
            }
        );
    }

    #[test]
    fn test_strip_layout() {
        let layout = StripLayout::DEFAULT;
        assert_eq!(layout.total(), 110);
        assert_eq!(layout.strand.count(), 100);
        assert_eq!(layout.indicator_pixel(9), Some(9));
        assert_eq!(layout.indicator_pixel(10), None);
    }
}

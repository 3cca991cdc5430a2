#[cfg(test)]
mod tests {
    use crate::audio::tones::{alert_tone, ALERT_TONE_NAME};
    use crate::audio::{
        export_alert_sounds, write_tone_wav, AlertType, ToneSource, Waveform, MIN_EXPONENTIAL_VALUE,
    };

    const VOLUME: f32 = 0.7;

    #[test]
    fn test_alert_keys_resolve_to_matching_descriptor() {
        for alert in AlertType::ALL {
            assert_eq!(AlertType::resolve(alert.key()), alert);
            assert_eq!(alert.descriptor().alert_type, alert);
            assert_eq!(alert.descriptor().name(), alert.key());
        }
    }

    #[test]
    fn test_unknown_keys_fall_back_to_medium_risk() {
        for key in ["", "HIGH_RISK", "critical", "medium-risk", "high_risk "] {
            assert_eq!(AlertType::from_key(key), None);
            assert_eq!(AlertType::resolve(key), AlertType::MediumRisk);
        }
    }

    #[test]
    fn test_default_durations() {
        let durations: Vec<f64> = AlertType::ALL
            .iter()
            .map(|alert| alert.descriptor().default_duration)
            .collect();
        assert_eq!(durations, vec![1.5, 1.0, 0.8, 1.2, 0.6, 0.5]);
    }

    #[test]
    fn test_every_envelope_starts_and_ends_silent() {
        for alert in AlertType::ALL {
            let tone = alert.descriptor().tone(2.0, None, VOLUME);
            assert!(!tone.voices.is_empty(), "{} has no voices", alert);

            for voice in &tone.voices {
                assert_eq!(voice.gain.value_at(voice.start), 0.0, "{} starts with a click", alert);
                assert!(
                    voice.gain.value_at(voice.stop) <= MIN_EXPONENTIAL_VALUE,
                    "{} ends with a click",
                    alert
                );
                assert!(voice.start >= 2.0);
            }
        }
    }

    #[test]
    fn test_high_risk_is_two_siren_voices_sharing_an_envelope() {
        let tone = AlertType::HighRisk.descriptor().tone(0.0, None, VOLUME);
        assert_eq!(tone.voices.len(), 2);

        let (first, second) = (&tone.voices[0], &tone.voices[1]);
        assert_eq!(first.gain, second.gain);
        assert_eq!(first.stop, 1.5);

        assert!((first.frequency.value_at(0.0) - 800.0).abs() < 0.01);
        assert!((first.frequency.value_at(0.5) - 1200.0).abs() < 0.01);
        assert!((first.frequency.value_at(1.0) - 800.0).abs() < 0.01);
        assert!((second.frequency.value_at(0.5) - 1000.0).abs() < 0.01);

        // Holds at 80% before the release
        assert!((first.gain.value_at(1.4) - VOLUME * 0.8).abs() < 1e-4);
    }

    #[test]
    fn test_medium_risk_is_three_square_beeps() {
        let tone = AlertType::MediumRisk.descriptor().tone(0.0, None, VOLUME);
        assert_eq!(tone.voices.len(), 3);

        for (index, voice) in tone.voices.iter().enumerate() {
            assert_eq!(voice.waveform, Waveform::Square);
            assert!((voice.start - index as f64 * 0.25).abs() < 1e-9);
            assert!((voice.stop - voice.start - 0.15).abs() < 1e-9);
            assert_eq!(voice.frequency.value_at(voice.start + 0.05), 750.0);
            assert!((voice.gain.value_at(voice.start + 0.02) - VOLUME * 0.7).abs() < 1e-4);
        }
    }

    #[test]
    fn test_daily_summary_chord_is_staggered() {
        let tone = AlertType::DailySummary.descriptor().tone(1.0, None, VOLUME);
        let frequencies: Vec<f32> = tone.voices.iter().map(|voice| voice.frequency.value_at(voice.start)).collect();
        assert_eq!(frequencies, vec![523.25, 659.25, 783.99]);

        let starts: Vec<f64> = tone.voices.iter().map(|voice| voice.start).collect();
        assert!((starts[1] - starts[0] - 0.1).abs() < 1e-9);
        assert!((starts[2] - starts[0] - 0.2).abs() < 1e-9);
        assert!((tone.voices[0].gain.value_at(1.1) - VOLUME * 0.3).abs() < 1e-4);
    }

    #[test]
    fn test_success_rises_and_error_falls() {
        let success = AlertType::Success.descriptor().tone(0.0, None, VOLUME);
        let voice = &success.voices[0];
        assert_eq!(voice.waveform, Waveform::Sine);
        assert!(voice.frequency.value_at(0.3) > voice.frequency.value_at(0.0));

        let error = AlertType::Error.descriptor().tone(0.0, None, VOLUME);
        let voice = &error.voices[0];
        assert_eq!(voice.waveform, Waveform::Sawtooth);
        assert_eq!(voice.frequency.value_at(0.0), 200.0);
        assert!((voice.frequency.value_at(0.5) - 150.0).abs() < 0.01);
    }

    #[test]
    fn test_duration_override_stretches_the_tone() {
        let tone = AlertType::LowRisk.descriptor().tone(0.0, Some(3.0), VOLUME);
        assert_eq!(tone.stop(), Some(3.0));
        assert!((tone.voices[0].frequency.value_at(1.5) - 550.0).abs() < 0.01);

        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let tone = AlertType::LowRisk.descriptor().tone(0.0, Some(bad), VOLUME);
            assert_eq!(tone.stop(), Some(0.8));
        }
    }

    #[test]
    fn test_volume_scales_peak_gain() {
        let quiet = AlertType::Error.descriptor().tone(0.0, None, 0.0);
        assert_eq!(quiet.voices[0].gain.value_at(0.05), 0.0);

        let loud = AlertType::Error.descriptor().tone(0.0, None, 1.0);
        assert!((loud.voices[0].gain.value_at(0.05) - 0.6).abs() < 1e-4);
    }

    #[test]
    fn test_alert_tone_chirps_up_and_back() {
        let tone = alert_tone(600.0, 0.0, 1.0);
        assert_eq!(tone.name, ALERT_TONE_NAME);
        assert_eq!(tone.voices.len(), 1);

        let voice = &tone.voices[0];
        assert!((voice.frequency.value_at(0.1) - 900.0).abs() < 0.01);
        assert!((voice.frequency.value_at(0.2) - 600.0).abs() < 0.01);
        assert!((voice.gain.value_at(0.01) - 0.3).abs() < 1e-4);
        assert!((voice.gain.value_at(1.0) - 0.01).abs() < 1e-4);
    }

    #[test]
    fn test_tone_source_renders_whole_tone() {
        let tone = AlertType::Success.descriptor().tone(5.0, None, VOLUME);
        let source = ToneSource::new(&tone, 8_000);
        assert_eq!(source.total_samples(), 4_800);

        let samples: Vec<f32> = source.collect();
        assert_eq!(samples.len(), 4_800);
        assert_eq!(samples[0], 0.0);
        assert!(samples.iter().all(|sample| (-1.0..=1.0).contains(sample)));
        assert!(samples.iter().any(|sample| sample.abs() > 0.1));
    }

    #[test]
    fn test_tone_source_pads_leading_silence() {
        let tone = AlertType::Error.descriptor().tone(1.0, None, VOLUME);
        let samples: Vec<f32> = ToneSource::starting_at(&tone, 0.0, 1_000).collect();
        assert_eq!(samples.len(), 1_500);
        assert!(samples[..1_000].iter().all(|sample| *sample == 0.0));
    }

    #[test]
    fn test_write_tone_wav_produces_readable_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("error.wav");
        let tone = AlertType::Error.descriptor().tone(0.0, None, VOLUME);

        write_tone_wav(&path, &tone, 16_000).expect("Failed to write WAV");

        let reader = hound::WavReader::open(&path).expect("Failed to open WAV");
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 16_000);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(reader.duration(), 8_000);
    }

    #[test]
    fn test_export_alert_sounds_writes_every_sound() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let output_dir = dir.path().join("sounds");

        let written = export_alert_sounds(&output_dir, 0.5, 8_000).expect("Failed to export sounds");
        assert_eq!(written.len(), 7);
        for alert in AlertType::ALL {
            assert!(output_dir.join(format!("{}.wav", alert.key())).exists());
        }
        assert!(output_dir.join(format!("{}.wav", ALERT_TONE_NAME)).exists());
    }
}

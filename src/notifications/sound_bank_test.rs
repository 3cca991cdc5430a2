#[cfg(test)]
mod tests {

    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use crate::audio::{AlertType, RecordingContext, SharedRecording};
    use crate::core::{MemoryStore, PreferenceStore, SoundPreferences, StoreError, PREFERENCES_KEY};
    use crate::gui::control_panel::PanelEvent;
    use crate::notifications::NotificationSoundBank;

    /// Store a test can keep reading after the bank takes ownership.
    #[derive(Clone, Default)]
    struct SharedStore(Rc<RefCell<MemoryStore>>);

    impl PreferenceStore for SharedStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.0.borrow().get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            self.0.borrow_mut().set(key, value)
        }
    }

    fn create_test_bank() -> (NotificationSoundBank, SharedRecording, SharedStore) {
        let recording = SharedRecording::default();
        let store = SharedStore::default();
        let bank = NotificationSoundBank::new(Ok(recording.boxed()), Box::new(store.clone()));
        (bank, recording, store)
    }

    #[test]
    fn test_new_bank_uses_default_preferences() {
        let (bank, _, _) = create_test_bank();
        assert_eq!(bank.volume(), 0.7);
        assert!(bank.is_enabled());
        assert!(bank.is_available());
    }

    #[test]
    fn test_new_bank_loads_stored_preferences() {
        let store = MemoryStore::with_entry(PREFERENCES_KEY, r#"{"volume": 0.2, "enabled": false}"#);
        let bank = NotificationSoundBank::new(Ok(SharedRecording::default().boxed()), Box::new(store));
        assert_eq!(bank.volume(), 0.2);
        assert!(!bank.is_enabled());
    }

    #[test]
    fn test_set_volume_clamps_and_persists() {
        let (mut bank, _, store) = create_test_bank();

        for (input, expected) in [(0.5, 0.5), (1.7, 1.0), (-0.3, 0.0), (0.0, 0.0), (1.0, 1.0), (f32::INFINITY, 1.0)] {
            bank.set_volume(input);
            assert_eq!(bank.volume(), expected);
            assert_eq!(SoundPreferences::load(&store).volume, expected);
        }
    }

    #[test]
    fn test_set_volume_ignores_nan() {
        let (mut bank, _, _) = create_test_bank();
        bank.set_volume(0.4);
        bank.set_volume(f32::NAN);
        assert_eq!(bank.volume(), 0.4);
    }

    #[test]
    fn test_set_enabled_persists() {
        let (mut bank, _, store) = create_test_bank();
        bank.set_enabled(false);
        assert!(!SoundPreferences::load(&store).enabled);

        // A fresh bank over the same storage picks the setting up
        let reopened = NotificationSoundBank::new(Ok(SharedRecording::default().boxed()), Box::new(store.clone()));
        assert!(!reopened.is_enabled());
    }

    #[test]
    fn test_play_selects_matching_descriptor() {
        let (mut bank, recording, _) = create_test_bank();
        for alert in AlertType::ALL {
            bank.play(alert.key(), None);
        }
        let expected: Vec<&str> = AlertType::ALL.iter().map(|alert| alert.key()).collect();
        assert_eq!(recording.borrow().tone_names(), expected);
    }

    #[test]
    fn test_play_unknown_key_uses_medium_risk() {
        let (mut bank, recording, _) = create_test_bank();
        bank.play("tsunami", None);
        bank.play("", None);
        assert_eq!(recording.borrow().tone_names(), vec!["medium_risk", "medium_risk"]);
    }

    #[test]
    fn test_disabled_bank_schedules_nothing() {
        let (mut bank, recording, _) = create_test_bank();
        bank.set_enabled(false);

        for alert in AlertType::ALL {
            bank.play(alert.key(), None);
        }
        bank.play("unknown", Some(2.0));
        bank.test_all();
        bank.advance_by(Duration::from_secs(10));

        assert!(recording.borrow().tones().is_empty());
        assert_eq!(recording.borrow().resume_calls(), 0);
    }

    #[test]
    fn test_unavailable_output_disables_playback() {
        let mut bank = NotificationSoundBank::new(
            Err(anyhow::anyhow!("no audio device")),
            Box::new(MemoryStore::new()),
        );
        assert!(!bank.is_available());

        // Must not panic
        bank.play("high_risk", None);
        bank.test_all();
        bank.advance_by(Duration::from_secs(10));
        bank.set_volume(0.3);
        assert_eq!(bank.volume(), 0.3);
    }

    #[test]
    fn test_suspended_output_is_resumed_before_playing() {
        let recording = SharedRecording::new(RecordingContext::suspended());
        let mut bank = NotificationSoundBank::new(Ok(recording.boxed()), Box::new(MemoryStore::new()));

        bank.play("success", None);
        bank.play("success", None);

        assert_eq!(recording.borrow().resume_calls(), 1);
        assert_eq!(recording.borrow().tones().len(), 2);
    }

    #[test]
    fn test_tones_start_at_context_time() {
        let (mut bank, recording, _) = create_test_bank();
        recording.borrow_mut().set_time(3.0);
        bank.play("error", None);
        assert_eq!(recording.borrow().tones()[0].start(), Some(3.0));
    }

    #[test]
    fn test_duration_override_reaches_the_tone() {
        let (mut bank, recording, _) = create_test_bank();
        bank.play("low_risk", Some(2.0));
        bank.play("low_risk", None);

        let recording = recording.borrow();
        assert_eq!(recording.tones()[0].stop(), Some(2.0));
        assert_eq!(recording.tones()[1].stop(), Some(0.8));
    }

    #[test]
    fn test_volume_reaches_the_tone() {
        let (mut bank, recording, _) = create_test_bank();
        bank.set_volume(0.5);
        bank.play("error", None);

        let recording = recording.borrow();
        let voice = &recording.tones()[0].voices[0];
        assert!((voice.gain.value_at(0.05) - 0.3).abs() < 1e-4);
    }

    #[test]
    fn test_test_all_plays_sequence_in_order() {
        let (mut bank, recording, _) = create_test_bank();
        bank.test_all();
        assert!(recording.borrow().tones().is_empty());

        bank.advance_by(Duration::ZERO);
        assert_eq!(recording.borrow().tone_names(), vec!["success"]);

        bank.advance_to(Duration::from_millis(2600));
        assert_eq!(recording.borrow().tone_names(), vec!["success", "low_risk", "medium_risk"]);

        bank.advance_to(Duration::from_millis(8000));
        assert_eq!(
            recording.borrow().tone_names(),
            vec!["success", "low_risk", "medium_risk", "high_risk", "daily_summary", "error"]
        );
        assert_eq!(bank.pending_tasks().count(), 0);
    }

    #[test]
    fn test_test_all_checks_enabled_when_each_sound_fires() {
        let (mut bank, recording, _) = create_test_bank();
        bank.test_all();
        bank.advance_to(Duration::from_millis(1000));
        bank.set_enabled(false);
        bank.advance_to(Duration::from_millis(9000));

        assert_eq!(recording.borrow().tone_names(), vec!["success", "low_risk"]);
    }

    #[test]
    fn test_control_panel_reflects_preferences() {
        let (mut bank, _, _) = create_test_bank();
        bank.set_volume(0.25);
        bank.set_enabled(false);
        bank.advance_to(Duration::from_secs(5));

        let panel = bank.show_control_panel();
        assert_eq!(panel.volume_percent(), 25);
        assert!(!panel.enabled());
        assert!(panel.is_open());
        assert!(!panel.is_expired(Duration::from_secs(34)));
        assert!(panel.is_expired(Duration::from_secs(35)));
    }

    #[test]
    fn test_panel_events_update_the_bank() {
        let (mut bank, recording, store) = create_test_bank();

        bank.handle_panel_event(&PanelEvent::SetVolume(0.9));
        bank.handle_panel_event(&PanelEvent::SetEnabled(false));
        assert_eq!(SoundPreferences::load(&store), SoundPreferences { volume: 0.9, enabled: false });

        bank.handle_panel_event(&PanelEvent::SetEnabled(true));
        bank.handle_panel_event(&PanelEvent::TestAll);
        bank.handle_panel_event(&PanelEvent::Close);
        bank.advance_by(Duration::from_secs(9));
        assert_eq!(recording.borrow().tones().len(), 6);
    }
}

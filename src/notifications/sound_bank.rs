use crate::audio::{AlertType, AudioContext, ContextState};
use crate::core::{PreferenceStore, Scheduler, SoundPreferences};
use crate::gui::control_panel::{ControlPanel, PanelEvent};
use std::time::Duration;

/// Order and start offsets (ms) used when auditioning every alert sound.
/// Offsets leave room for each sound to finish before the next starts.
pub const TEST_SEQUENCE: [(AlertType, u64); 6] = [
    (AlertType::Success, 0),
    (AlertType::LowRisk, 1000),
    (AlertType::MediumRisk, 2500),
    (AlertType::HighRisk, 4000),
    (AlertType::DailySummary, 6000),
    (AlertType::Error, 8000),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BankTask {
    Play(AlertType),
}

/// Severity-keyed notification sounds with a persisted volume and on/off
/// switch.
///
/// Built once by the host and handed to whatever raises notifications. If the
/// audio output couldn't be created the bank stays silent for its lifetime.
pub struct NotificationSoundBank {
    context: Option<Box<dyn AudioContext>>,
    store: Box<dyn PreferenceStore>,
    preferences: SoundPreferences,
    scheduler: Scheduler<BankTask>,
}

impl NotificationSoundBank {
    pub fn new(context: anyhow::Result<Box<dyn AudioContext>>, store: Box<dyn PreferenceStore>) -> Self {
        let context = match context {
            Ok(context) => {
                log::info!("Audio output initialized for earthquake notifications");
                Some(context)
            }
            Err(e) => {
                log::warn!("Audio output unavailable, notification sounds disabled: {}", e);
                None
            }
        };

        let preferences = SoundPreferences::load(&*store);

        Self {
            context,
            store,
            preferences,
            scheduler: Scheduler::new(),
        }
    }

    /// Plays the sound for `alert_key`. Unknown keys play the medium-risk
    /// sound. `duration_override` is in seconds.
    pub fn play(&mut self, alert_key: &str, duration_override: Option<f64>) {
        self.play_alert(AlertType::resolve(alert_key), duration_override);
    }

    pub fn play_alert(&mut self, alert: AlertType, duration_override: Option<f64>) {
        if !self.preferences.enabled {
            log::debug!("Notification sounds disabled, skipping {}", alert);
            return;
        }

        let Some(context) = self.context.as_mut() else {
            log::debug!("No audio output, skipping {}", alert);
            return;
        };

        if context.state() == ContextState::Suspended {
            if let Err(e) = context.resume() {
                log::warn!("Failed to resume audio output: {}", e);
            }
        }

        let tone = alert.descriptor().tone(context.current_time(), duration_override, self.preferences.volume);
        log::info!("Playing {} notification sound", alert);
        if let Err(e) = context.play_tone(tone) {
            log::warn!("Failed to play {} notification sound: {}", alert, e);
        }
    }

    /// Sets the volume, clamped to `0.0..=1.0`, and saves it. NaN is ignored.
    pub fn set_volume(&mut self, volume: f32) {
        if volume.is_nan() {
            log::warn!("Ignoring volume that is not a number");
            return;
        }
        self.preferences.volume = volume.clamp(0.0, 1.0);
        self.preferences.save(&mut *self.store);
        log::info!("Volume set to {}%", self.preferences.volume_percent());
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.preferences.enabled = enabled;
        self.preferences.save(&mut *self.store);
        log::info!("Earthquake sounds {}", if enabled { "enabled" } else { "disabled" });
    }

    /// Queues every alert sound one after another for a listening check.
    pub fn test_all(&mut self) {
        log::info!("Testing all earthquake notification sounds");
        for (alert, offset_ms) in TEST_SEQUENCE {
            self.scheduler.schedule(Duration::from_millis(offset_ms), BankTask::Play(alert));
        }
    }

    /// Runs every queued task due by `target` on the bank's clock.
    pub fn advance_to(&mut self, target: Duration) {
        while let Some(task) = self.scheduler.pop_due(target) {
            match task {
                BankTask::Play(alert) => {
                    log::debug!("Testing: {}", alert.label());
                    self.play_alert(alert, None);
                }
            }
        }
        self.scheduler.settle(target);
    }

    pub fn advance_by(&mut self, delta: Duration) {
        self.advance_to(self.scheduler.now() + delta);
    }

    /// Builds a settings panel showing the current preferences.
    pub fn show_control_panel(&self) -> ControlPanel {
        ControlPanel::builder(&self.preferences)
            .opened_at(self.scheduler.now())
            .build()
    }

    /// Applies a change coming back from a [`ControlPanel`].
    pub fn handle_panel_event(&mut self, event: &PanelEvent) {
        match *event {
            PanelEvent::SetEnabled(enabled) => self.set_enabled(enabled),
            PanelEvent::SetVolume(volume) => self.set_volume(volume),
            PanelEvent::TestAll => self.test_all(),
            PanelEvent::Close => log::debug!("Audio control panel closed"),
        }
    }

    pub fn volume(&self) -> f32 {
        self.preferences.volume
    }

    pub fn is_enabled(&self) -> bool {
        self.preferences.enabled
    }

    /// Whether an audio output exists at all.
    pub fn is_available(&self) -> bool {
        self.context.is_some()
    }

    pub fn preferences(&self) -> SoundPreferences {
        self.preferences
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn pending_tasks(&self) -> impl Iterator<Item = &BankTask> {
        self.scheduler.pending_tasks()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.scheduler.next_due()
    }
}

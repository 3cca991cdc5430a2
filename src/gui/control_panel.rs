use eframe::egui;
use std::time::Duration;
use crate::core::SoundPreferences;

pub const DEFAULT_PANEL_TIMEOUT: Duration = Duration::from_secs(30);

/// Change requested by the user through a [`ControlPanel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelEvent {
    SetEnabled(bool),
    /// Fraction in `0.0..=1.0`.
    SetVolume(f32),
    TestAll,
    Close,
}

pub struct ControlPanelBuilder {
    volume: f32,
    enabled: bool,
    opened_at: Duration,
    timeout: Duration,
}

impl ControlPanelBuilder {
    pub fn opened_at(mut self, now: Duration) -> Self {
        self.opened_at = now;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> ControlPanel {
        ControlPanel {
            volume_percent: (self.volume.clamp(0.0, 1.0) * 100.0).round() as u32,
            enabled: self.enabled,
            expires_at: self.opened_at + self.timeout,
            open: true,
        }
    }
}

/// Transient audio settings overlay.
///
/// The panel only holds a copy of the preferences for display; every change
/// goes back to the owner as a [`PanelEvent`]. It closes itself on the Close
/// button and is considered expired once its timeout passes.
pub struct ControlPanel {
    volume_percent: u32,
    enabled: bool,
    expires_at: Duration,
    open: bool,
}

impl ControlPanel {
    pub fn builder(preferences: &SoundPreferences) -> ControlPanelBuilder {
        ControlPanelBuilder {
            volume: preferences.volume,
            enabled: preferences.enabled,
            opened_at: Duration::ZERO,
            timeout: DEFAULT_PANEL_TIMEOUT,
        }
    }

    pub fn volume_percent(&self) -> u32 {
        self.volume_percent
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_expired(&self, now: Duration) -> bool {
        now >= self.expires_at
    }

    /// Whether the host should keep showing the panel at `now`.
    pub fn is_visible(&self, now: Duration) -> bool {
        self.open && !self.is_expired(now)
    }

    /// Applies an event to the panel's own copy of the state.
    pub fn apply(&mut self, event: &PanelEvent) {
        match *event {
            PanelEvent::SetEnabled(enabled) => self.enabled = enabled,
            PanelEvent::SetVolume(volume) => {
                self.volume_percent = (volume.clamp(0.0, 1.0) * 100.0).round() as u32;
            }
            PanelEvent::TestAll => {}
            PanelEvent::Close => self.open = false,
        }
    }

    pub fn show(&mut self, ctx: &egui::Context) -> Vec<PanelEvent> {
        let mut events = Vec::new();
        if !self.open {
            return events;
        }

        egui::Window::new("🔊 Earthquake Audio Controls")
            .anchor(egui::Align2::RIGHT_TOP, [-20.0, 20.0])
            .collapsible(false)
            .resizable(false)
            .min_width(250.0)
            .show(ctx, |ui| {
                let mut enabled = self.enabled;
                if ui.checkbox(&mut enabled, "Enable Notification Sounds").changed() {
                    events.push(PanelEvent::SetEnabled(enabled));
                }

                ui.add_space(5.0);
                ui.label(format!("Volume: {}%", self.volume_percent));
                let mut percent = self.volume_percent;
                if ui.add(egui::Slider::new(&mut percent, 0..=100).show_value(false)).changed() {
                    events.push(PanelEvent::SetVolume(percent as f32 / 100.0));
                }

                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui.button("🎵 Test Sounds").clicked() {
                        events.push(PanelEvent::TestAll);
                    }
                    if ui.button("✕ Close").clicked() {
                        events.push(PanelEvent::Close);
                    }
                });
            });

        for event in &events {
            self.apply(event);
        }
        events
    }
}

use eframe::egui;
use std::time::{Duration, Instant};
use crate::audio::{export_alert_sounds, list_output_devices, AlertType, AudioContext, RodioContext};
use crate::core::{AppConfig, JsonFileStore};
use crate::gui::control_panel::ControlPanel;
use crate::notifications::{play_earthquake_alert, NotificationSoundBank, SimpleAlertPlayer};

/// Demo host: buttons standing in for the dashboard's alert sources, plus
/// the audio settings panel.
pub struct DashboardApp {
    pub config: AppConfig,
    pub sound_bank: NotificationSoundBank,
    pub alert_player: SimpleAlertPlayer,
    pub control_panel: Option<ControlPanel>,
    pub magnitude: f64,
    pub status_message: String,
    started: Instant,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> anyhow::Result<Self> {
        let mut visuals = egui::Visuals::dark();
        visuals.override_text_color = Some(egui::Color32::WHITE);
        cc.egui_ctx.set_visuals(visuals);

        let config = AppConfig::load()?;
        Ok(Self::with_config(config))
    }

    pub fn with_config(config: AppConfig) -> Self {
        let device_name = config.output_device_name.clone();
        let sample_rate = config.sample_rate;

        if let Some(wanted) = device_name.as_deref() {
            match list_output_devices() {
                Ok(devices) if !devices.iter().any(|device| device.name == wanted) => {
                    log::warn!("Configured audio device '{}' is not connected", wanted);
                }
                Ok(_) => {}
                Err(e) => log::warn!("Could not check configured audio device: {}", e),
            }
        }

        let bank_output = RodioContext::open(device_name.as_deref(), sample_rate)
            .map(|context| Box::new(context) as Box<dyn AudioContext>);
        let sound_bank = NotificationSoundBank::new(bank_output, Box::new(JsonFileStore::in_config_dir()));

        let alert_player = SimpleAlertPlayer::new(move || {
            RodioContext::open(device_name.as_deref(), sample_rate)
                .map(|context| Box::new(context) as Box<dyn AudioContext>)
        });

        Self {
            config,
            sound_bank,
            alert_player,
            control_panel: None,
            magnitude: 5.0,
            status_message: String::new(),
            started: Instant::now(),
        }
    }

    fn tick(&mut self) {
        let elapsed = self.started.elapsed();
        self.sound_bank.advance_to(elapsed);
        self.alert_player.advance_to(elapsed);
    }

    /// How long until either component has work queued, if at all.
    fn next_wakeup(&self) -> Option<Duration> {
        let elapsed = self.started.elapsed();
        [self.sound_bank.next_due(), self.alert_player.next_due()]
            .into_iter()
            .flatten()
            .min()
            .map(|due| due.saturating_sub(elapsed))
    }

    fn export_sounds(&mut self) {
        match export_alert_sounds(&self.config.export_directory, self.sound_bank.volume(), self.config.sample_rate) {
            Ok(paths) => {
                self.status_message = format!("Exported {} sounds to {}", paths.len(), self.config.export_directory.display());
            }
            Err(e) => {
                log::error!("Failed to export alert sounds: {}", e);
                self.status_message = format!("Export failed: {}", e);
            }
        }
    }

    fn show_alert_buttons(&mut self, ui: &mut egui::Ui) {
        ui.heading("Notification sounds");
        ui.add_space(5.0);

        egui::Grid::new("alert_buttons").num_columns(3).spacing([8.0, 8.0]).show(ui, |ui| {
            for (index, alert) in AlertType::ALL.into_iter().enumerate() {
                if ui.button(alert.label()).clicked() {
                    self.sound_bank.play_alert(alert, None);
                    self.status_message = format!("Played {}", alert.key());
                }
                if index % 3 == 2 {
                    ui.end_row();
                }
            }
        });

        ui.add_space(15.0);
        ui.heading("Earthquake alert");
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.label("Magnitude:");
            ui.add(egui::Slider::new(&mut self.magnitude, 0.0..=10.0).step_by(0.1));
            if ui.button("🚨 Play Earthquake Alert").clicked() {
                play_earthquake_alert(&mut self.alert_player, self.magnitude);
                self.status_message = format!("Earthquake alert for magnitude {:.1}", self.magnitude);
            }
        });
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.tick();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Audio", |ui| {
                    if ui.button("🔊 Audio Controls").clicked() {
                        self.control_panel = Some(self.sound_bank.show_control_panel());
                        ui.close_menu();
                    }
                    if ui.button("🎵 Test All Sounds").clicked() {
                        self.sound_bank.test_all();
                        ui.close_menu();
                    }
                    if ui.button("💾 Export Sounds as WAV").clicked() {
                        self.export_sounds();
                        ui.close_menu();
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if !self.sound_bank.is_available() {
                        ui.label("❌ No audio output");
                    } else if self.sound_bank.is_enabled() {
                        ui.label(format!("🔊 {}%", self.sound_bank.preferences().volume_percent()));
                    } else {
                        ui.label("🔇 Muted");
                    }
                });
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Status:");
                if self.status_message.is_empty() {
                    ui.label("Ready");
                } else {
                    ui.label(&self.status_message);
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_alert_buttons(ui);
        });

        let now = self.sound_bank.now();
        if let Some(panel) = self.control_panel.as_mut() {
            for event in panel.show(ctx) {
                self.sound_bank.handle_panel_event(&event);
            }
        }
        if self.control_panel.as_ref().is_some_and(|panel| !panel.is_visible(now)) {
            log::debug!("Removing audio control panel");
            self.control_panel = None;
        }

        // Keep ticking while timers are pending or the panel can still expire
        if let Some(wait) = self.next_wakeup() {
            ctx.request_repaint_after(wait);
        } else if self.control_panel.is_some() {
            ctx.request_repaint_after(Duration::from_secs(1));
        }
    }
}

//! Audible earthquake alerts: severity-keyed notification tones with
//! persisted volume, and magnitude-keyed alert bursts.
//!
//! Hosts build one [`NotificationSoundBank`] and/or one [`SimpleAlertPlayer`]
//! and drive their timers by calling `advance_to` with elapsed time.

pub mod audio;
pub mod core;
pub mod gui;
pub mod notifications;

pub use crate::audio::{AlertType, AudioContext, RodioContext};
pub use crate::core::{AppConfig, JsonFileStore, MemoryStore, PreferenceStore, SoundPreferences};
pub use crate::gui::{ControlPanel, DashboardApp, PanelEvent};
pub use crate::notifications::{play_earthquake_alert, NotificationSoundBank, SimpleAlertPlayer};

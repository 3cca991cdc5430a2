pub mod alert_player;
pub mod sound_bank;

#[cfg(test)]
mod sound_bank_test;

pub use alert_player::{play_earthquake_alert, ContextFactory, SimpleAlertPlayer};
pub use sound_bank::{NotificationSoundBank, TEST_SEQUENCE};

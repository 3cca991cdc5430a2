use crate::audio::{alert_tone, AudioContext};
use crate::core::Scheduler;
use std::time::Duration;

pub const DEFAULT_TONE_FREQUENCY: f32 = 800.0;
pub const DEFAULT_TONE_DURATION: Duration = Duration::from_millis(2000);

/// Magnitude at and above which the multi-burst emergency alert plays.
pub const EMERGENCY_MAGNITUDE: f64 = 6.0;
pub const MAX_EMERGENCY_BURSTS: usize = 8;
const BURST_INTERVAL: Duration = Duration::from_millis(600);
const BURST_LENGTH: Duration = Duration::from_millis(500);

const SIMPLE_ALERT_FREQUENCY: f32 = 600.0;
const SIMPLE_ALERT_DURATION: Duration = Duration::from_millis(1000);

pub type ContextFactory = Box<dyn FnMut() -> anyhow::Result<Box<dyn AudioContext>>>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerTask {
    Tone { frequency: f32, duration: Duration },
    ClearBusy,
}

/// Number of bursts an emergency alert plays for `magnitude`.
pub fn emergency_burst_count(magnitude: f64) -> usize {
    if !magnitude.is_finite() || magnitude < 1.0 {
        return 0;
    }
    (magnitude.floor() as usize).min(MAX_EMERGENCY_BURSTS)
}

/// Magnitude-keyed alert tones, one at a time.
///
/// The audio output is created on the first tone. While a tone is playing,
/// further tone requests are dropped rather than queued.
pub struct SimpleAlertPlayer {
    factory: ContextFactory,
    context: Option<Box<dyn AudioContext>>,
    is_playing: bool,
    scheduler: Scheduler<PlayerTask>,
}

impl SimpleAlertPlayer {
    pub fn new(factory: impl FnMut() -> anyhow::Result<Box<dyn AudioContext>> + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            context: None,
            is_playing: false,
            scheduler: Scheduler::new(),
        }
    }

    fn ensure_context(&mut self) -> Option<&mut Box<dyn AudioContext>> {
        if self.context.is_none() {
            match (self.factory)() {
                Ok(context) => {
                    log::debug!("Alert player audio output initialized");
                    self.context = Some(context);
                }
                Err(e) => {
                    log::warn!("Audio output not available for alert tones: {}", e);
                }
            }
        }
        self.context.as_mut()
    }

    pub fn create_alert_tone(&mut self, frequency: f32, duration: Duration) {
        if self.is_playing {
            log::debug!("Alert tone already playing, dropping {} Hz request", frequency);
            return;
        }

        let Some(context) = self.ensure_context() else {
            return;
        };

        let tone = alert_tone(frequency, context.current_time(), duration.as_secs_f64());
        if let Err(e) = context.play_tone(tone) {
            log::warn!("Failed to play {} Hz alert tone: {}", frequency, e);
            return;
        }

        self.is_playing = true;
        self.scheduler.schedule(duration, PlayerTask::ClearBusy);
    }

    /// Plays one burst per whole unit of magnitude, up to
    /// [`MAX_EMERGENCY_BURSTS`], each a little higher than the last.
    pub fn play_emergency_alert(&mut self, magnitude: f64) {
        let bursts = emergency_burst_count(magnitude);
        log::info!("Emergency alert for magnitude {:.1}: {} bursts", magnitude, bursts);

        for index in 0..bursts {
            self.scheduler.schedule(
                BURST_INTERVAL * index as u32,
                PlayerTask::Tone {
                    frequency: DEFAULT_TONE_FREQUENCY + 100.0 * index as f32,
                    duration: BURST_LENGTH,
                },
            );
        }
    }

    pub fn play_simple_alert(&mut self) {
        self.create_alert_tone(SIMPLE_ALERT_FREQUENCY, SIMPLE_ALERT_DURATION);
    }

    pub fn advance_to(&mut self, target: Duration) {
        while let Some(task) = self.scheduler.pop_due(target) {
            match task {
                PlayerTask::Tone { frequency, duration } => self.create_alert_tone(frequency, duration),
                PlayerTask::ClearBusy => self.is_playing = false,
            }
        }
        self.scheduler.settle(target);
    }

    pub fn advance_by(&mut self, delta: Duration) {
        self.advance_to(self.scheduler.now() + delta);
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Bursts queued but not yet played.
    pub fn pending_bursts(&self) -> usize {
        self.scheduler
            .pending_tasks()
            .filter(|task| matches!(task, PlayerTask::Tone { .. }))
            .count()
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.scheduler.next_due()
    }
}

/// Plays the emergency alert for strong quakes and a single tone otherwise.
pub fn play_earthquake_alert(player: &mut SimpleAlertPlayer, magnitude: f64) {
    if magnitude >= EMERGENCY_MAGNITUDE {
        player.play_emergency_alert(magnitude);
    } else {
        player.play_simple_alert();
    }
}

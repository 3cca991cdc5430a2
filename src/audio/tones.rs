use crate::audio::context::{Tone, Voice, Waveform};
use crate::audio::automation::{Automation, MIN_EXPONENTIAL_VALUE};

/// Severity tag selecting which tone pattern a notification plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertType {
    HighRisk,
    MediumRisk,
    LowRisk,
    DailySummary,
    Success,
    Error,
}

impl AlertType {
    pub const ALL: [AlertType; 6] = [
        AlertType::HighRisk,
        AlertType::MediumRisk,
        AlertType::LowRisk,
        AlertType::DailySummary,
        AlertType::Success,
        AlertType::Error,
    ];

    /// Alert used for keys nobody recognizes.
    pub const FALLBACK: AlertType = AlertType::MediumRisk;

    pub fn key(self) -> &'static str {
        match self {
            AlertType::HighRisk => "high_risk",
            AlertType::MediumRisk => "medium_risk",
            AlertType::LowRisk => "low_risk",
            AlertType::DailySummary => "daily_summary",
            AlertType::Success => "success",
            AlertType::Error => "error",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AlertType::HighRisk => "High Risk (Urgent)",
            AlertType::MediumRisk => "Medium Risk",
            AlertType::LowRisk => "Low Risk",
            AlertType::DailySummary => "Daily Summary",
            AlertType::Success => "Success",
            AlertType::Error => "Error",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|alert| alert.key() == key)
    }

    /// Like [`AlertType::from_key`], but unknown keys map to [`AlertType::FALLBACK`].
    pub fn resolve(key: &str) -> Self {
        Self::from_key(key).unwrap_or_else(|| {
            log::warn!("Unknown alert type '{}', using {}", key, Self::FALLBACK.key());
            Self::FALLBACK
        })
    }

    pub fn descriptor(self) -> &'static ToneDescriptor {
        match self {
            AlertType::HighRisk => &HIGH_RISK,
            AlertType::MediumRisk => &MEDIUM_RISK,
            AlertType::LowRisk => &LOW_RISK,
            AlertType::DailySummary => &DAILY_SUMMARY,
            AlertType::Success => &SUCCESS,
            AlertType::Error => &ERROR,
        }
    }
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// How one alert type sounds: a pure function from (start time, duration,
/// volume) to the voices to schedule.
pub struct ToneDescriptor {
    pub alert_type: AlertType,
    /// Seconds.
    pub default_duration: f64,
    synthesize: fn(start: f64, duration: f64, volume: f32) -> Vec<Voice>,
}

impl ToneDescriptor {
    pub fn name(&self) -> &'static str {
        self.alert_type.key()
    }

    /// Builds the tone starting at `start`. `duration` replaces the default
    /// when it's a positive, finite number of seconds.
    pub fn tone(&self, start: f64, duration: Option<f64>, volume: f32) -> Tone {
        let duration = match duration {
            Some(duration) if duration.is_finite() && duration > 0.0 => duration,
            _ => self.default_duration,
        };
        Tone {
            name: self.name(),
            voices: (self.synthesize)(start, duration, volume),
        }
    }
}

impl std::fmt::Debug for ToneDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToneDescriptor")
            .field("alert_type", &self.alert_type)
            .field("default_duration", &self.default_duration)
            .finish()
    }
}

pub static HIGH_RISK: ToneDescriptor = ToneDescriptor {
    alert_type: AlertType::HighRisk,
    default_duration: 1.5,
    synthesize: urgent_siren,
};

pub static MEDIUM_RISK: ToneDescriptor = ToneDescriptor {
    alert_type: AlertType::MediumRisk,
    default_duration: 1.0,
    synthesize: warning_beeps,
};

pub static LOW_RISK: ToneDescriptor = ToneDescriptor {
    alert_type: AlertType::LowRisk,
    default_duration: 0.8,
    synthesize: gentle_sweep,
};

pub static DAILY_SUMMARY: ToneDescriptor = ToneDescriptor {
    alert_type: AlertType::DailySummary,
    default_duration: 1.2,
    synthesize: soft_chime,
};

pub static SUCCESS: ToneDescriptor = ToneDescriptor {
    alert_type: AlertType::Success,
    default_duration: 0.6,
    synthesize: rising_confirmation,
};

pub static ERROR: ToneDescriptor = ToneDescriptor {
    alert_type: AlertType::Error,
    default_duration: 0.5,
    synthesize: falling_buzz,
};

const WARNING_BEEP_COUNT: usize = 3;
const WARNING_BEEP_LENGTH: f64 = 0.15;
const WARNING_BEEP_INTERVAL: f64 = 0.25;

/// C5, E5, G5.
const CHIME_CHORD: [f32; 3] = [523.25, 659.25, 783.99];
const CHIME_STAGGER: f64 = 0.1;

/// Two sines sweeping up and back down together, sharing one envelope.
fn urgent_siren(start: f64, duration: f64, volume: f32) -> Vec<Voice> {
    let stop = start + duration;
    let peak = start + duration / 3.0;
    let back = start + duration * 2.0 / 3.0;

    let mut gain = Automation::new(1.0);
    gain.set_value_at(0.0, start)
        .linear_ramp_to(volume, start + 0.1)
        .linear_ramp_to(volume * 0.8, stop - 0.1)
        .linear_ramp_to(0.0, stop);

    [(800.0, 1200.0), (600.0, 1000.0)]
        .into_iter()
        .map(|(low, high)| {
            let mut voice = Voice::new(Waveform::Sine, start, stop);
            voice.frequency
                .set_value_at(low, start)
                .exponential_ramp_to(high, peak)
                .exponential_ramp_to(low, back);
            voice.gain = gain.clone();
            voice
        })
        .collect()
}

/// Three short square-wave beeps. The beep pattern has a fixed length.
fn warning_beeps(start: f64, _duration: f64, volume: f32) -> Vec<Voice> {
    (0..WARNING_BEEP_COUNT)
        .map(|index| {
            let beep_start = start + index as f64 * WARNING_BEEP_INTERVAL;
            let beep_stop = beep_start + WARNING_BEEP_LENGTH;

            let mut voice = Voice::new(Waveform::Square, beep_start, beep_stop);
            voice.frequency.set_value_at(750.0, beep_start);
            voice.gain
                .set_value_at(0.0, beep_start)
                .linear_ramp_to(volume * 0.7, beep_start + 0.02)
                .linear_ramp_to(0.0, beep_stop);
            voice
        })
        .collect()
}

fn gentle_sweep(start: f64, duration: f64, volume: f32) -> Vec<Voice> {
    let stop = start + duration;

    let mut voice = Voice::new(Waveform::Sine, start, stop);
    voice.frequency
        .set_value_at(440.0, start)
        .exponential_ramp_to(550.0, start + duration / 2.0)
        .exponential_ramp_to(440.0, stop);
    voice.gain
        .set_value_at(0.0, start)
        .linear_ramp_to(volume * 0.4, start + 0.1)
        .linear_ramp_to(0.0, stop);
    vec![voice]
}

fn soft_chime(start: f64, duration: f64, volume: f32) -> Vec<Voice> {
    CHIME_CHORD
        .into_iter()
        .enumerate()
        .map(|(index, frequency)| {
            let note_start = start + index as f64 * CHIME_STAGGER;
            let note_stop = note_start + duration;

            let mut voice = Voice::new(Waveform::Sine, note_start, note_stop);
            voice.frequency.set_value_at(frequency, note_start);
            voice.gain
                .set_value_at(0.0, note_start)
                .linear_ramp_to(volume * 0.3, note_start + 0.1)
                .exponential_ramp_to(MIN_EXPONENTIAL_VALUE, note_stop);
            voice
        })
        .collect()
}

fn rising_confirmation(start: f64, duration: f64, volume: f32) -> Vec<Voice> {
    let stop = start + duration;

    let mut voice = Voice::new(Waveform::Sine, start, stop);
    voice.frequency
        .set_value_at(523.25, start)
        .linear_ramp_to(783.99, start + duration / 2.0);
    voice.gain
        .set_value_at(0.0, start)
        .linear_ramp_to(volume * 0.5, start + 0.05)
        .exponential_ramp_to(MIN_EXPONENTIAL_VALUE, stop);
    vec![voice]
}

fn falling_buzz(start: f64, duration: f64, volume: f32) -> Vec<Voice> {
    let stop = start + duration;

    let mut voice = Voice::new(Waveform::Sawtooth, start, stop);
    voice.frequency
        .set_value_at(200.0, start)
        .linear_ramp_to(150.0, stop);
    voice.gain
        .set_value_at(0.0, start)
        .linear_ramp_to(volume * 0.6, start + 0.05)
        .linear_ramp_to(0.0, stop);
    vec![voice]
}

/// Name reported for tones from the magnitude-keyed alert player.
pub const ALERT_TONE_NAME: &str = "alert_tone";

/// Emergency-style chirp: the pitch jumps up by half and back within the
/// first 0.2s, while the gain decays over the whole duration.
pub fn alert_tone(frequency: f32, start: f64, duration: f64) -> Tone {
    let stop = start + duration;

    let mut voice = Voice::new(Waveform::Sine, start, stop);
    voice.frequency
        .set_value_at(frequency, start)
        .exponential_ramp_to(frequency * 1.5, start + 0.1)
        .exponential_ramp_to(frequency, start + 0.2);
    voice.gain
        .set_value_at(0.0, start)
        .linear_ramp_to(0.3, start + 0.01)
        .exponential_ramp_to(0.01, stop);

    Tone {
        name: ALERT_TONE_NAME,
        voices: vec![voice],
    }
}

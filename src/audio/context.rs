use crate::audio::automation::Automation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    /// One sample of the waveform at `phase` cycles (only the fractional
    /// part matters).
    pub fn sample(self, phase: f64) -> f32 {
        let cycle = phase.fract();
        let value = match self {
            Waveform::Sine => (cycle * std::f64::consts::TAU).sin(),
            Waveform::Square => {
                if cycle < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * cycle - 1.0,
            Waveform::Triangle => 1.0 - 4.0 * (cycle - 0.5).abs(),
        };
        value as f32
    }
}

/// One oscillator feeding its own gain stage into the default output.
#[derive(Debug, Clone, PartialEq)]
pub struct Voice {
    pub waveform: Waveform,
    pub frequency: Automation,
    pub gain: Automation,
    /// Context time (seconds) the oscillator starts.
    pub start: f64,
    /// Context time (seconds) the oscillator stops.
    pub stop: f64,
}

impl Voice {
    pub fn new(waveform: Waveform, start: f64, stop: f64) -> Self {
        Self {
            waveform,
            frequency: Automation::new(440.0),
            gain: Automation::new(1.0),
            start,
            stop,
        }
    }

    pub fn is_sounding_at(&self, time: f64) -> bool {
        time >= self.start && time < self.stop
    }
}

/// A named group of voices scheduled together.
#[derive(Debug, Clone, PartialEq)]
pub struct Tone {
    pub name: &'static str,
    pub voices: Vec<Voice>,
}

impl Tone {
    pub fn start(&self) -> Option<f64> {
        self.voices.iter().map(|voice| voice.start).reduce(f64::min)
    }

    pub fn stop(&self) -> Option<f64> {
        self.voices.iter().map(|voice| voice.stop).reduce(f64::max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    Running,
    /// Output is held until resumed, e.g. until the user interacts with the host.
    Suspended,
}

/// Host-provided audio output.
///
/// Times are seconds on a monotonic clock owned by the context. Every played
/// tone is independent; nothing stops a tone early.
pub trait AudioContext {
    fn current_time(&self) -> f64;
    fn state(&self) -> ContextState;
    fn resume(&mut self) -> anyhow::Result<()>;
    fn play_tone(&mut self, tone: Tone) -> anyhow::Result<()>;
}

pub mod automation;
pub mod context;
pub mod output;
pub mod recording;
pub mod renderer;
pub mod tones;

#[cfg(test)]
mod tests;

pub use automation::{Automation, MIN_EXPONENTIAL_VALUE};
pub use context::{AudioContext, ContextState, Tone, Voice, Waveform};
pub use output::{list_output_devices, OutputDeviceInfo, RodioContext};
pub use recording::{RecordingContext, SharedRecording};
pub use renderer::{export_alert_sounds, write_tone_wav, ToneSource};
pub use tones::{alert_tone, AlertType, ToneDescriptor};

use crate::audio::context::{AudioContext, ContextState, Tone};
use crate::audio::renderer::ToneSource;
use cpal::traits::{DeviceTrait, HostTrait};
use cpal::Device;
use rodio::{OutputStream, OutputStreamHandle, Sink};
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct OutputDeviceInfo {
    pub name: String,
    pub is_default: bool,
}

/// Lists the output devices of the default host.
pub fn list_output_devices() -> anyhow::Result<Vec<OutputDeviceInfo>> {
    let host = cpal::default_host();
    let default_name = host.default_output_device()
        .and_then(|device| device.name().ok());

    let devices = host.output_devices()
        .map_err(|e| {
            log::error!("Failed to enumerate output devices: {}", e);
            anyhow::anyhow!("Failed to enumerate output devices: {}", e)
        })?;

    let mut found = Vec::new();
    for device in devices {
        match device.name() {
            Ok(name) => {
                let is_default = default_name.as_ref() == Some(&name);
                log::debug!("Found audio device: {} (default: {})", name, is_default);
                found.push(OutputDeviceInfo { name, is_default });
            }
            Err(e) => log::warn!("Failed to get device name: {}", e),
        }
    }

    log::info!("Enumerated {} audio output devices", found.len());
    Ok(found)
}

/// Picks the named output device, falling back to the default one.
fn select_output_device(device_name: Option<&str>) -> anyhow::Result<Device> {
    let host = cpal::default_host();

    if let Some(wanted) = device_name {
        match host.output_devices() {
            Ok(mut devices) => {
                if let Some(device) = devices.find(|device| device.name().map(|name| name == wanted).unwrap_or(false)) {
                    log::debug!("Using configured audio device: {}", wanted);
                    return Ok(device);
                }
                log::warn!("Audio device '{}' not found, falling back to default", wanted);
            }
            Err(e) => log::warn!("Failed to enumerate devices when searching for '{}': {}", wanted, e),
        }
    }

    host.default_output_device()
        .ok_or_else(|| {
            log::error!("No default audio output device available");
            anyhow::anyhow!("No default audio output device available")
        })
}

/// Audio context backed by a real output device.
///
/// Each tone gets its own sink so tones overlap freely. Sinks are kept until
/// they run dry so that suspending can pause everything still playing.
pub struct RodioContext {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    sinks: Vec<Sink>,
    started: Instant,
    state: ContextState,
    sample_rate: u32,
}

impl RodioContext {
    pub fn open(device_name: Option<&str>, sample_rate: u32) -> anyhow::Result<Self> {
        let device = select_output_device(device_name)?;
        let (stream, stream_handle) = OutputStream::try_from_device(&device)
            .map_err(|e| {
                log::error!("Failed to create output stream: {}", e);
                anyhow::anyhow!("Failed to create output stream: {}", e)
            })?;

        log::info!(
            "Audio output ready on '{}' at {} Hz",
            device.name().unwrap_or_else(|_| "unknown device".to_string()),
            sample_rate
        );

        Ok(Self {
            _stream: stream,
            stream_handle,
            sinks: Vec::new(),
            started: Instant::now(),
            state: ContextState::Running,
            sample_rate,
        })
    }

    /// Pauses every tone still playing. New tones queue silently until
    /// [`AudioContext::resume`] is called.
    pub fn suspend(&mut self) {
        if self.state == ContextState::Suspended {
            return;
        }
        for sink in &self.sinks {
            sink.pause();
        }
        self.state = ContextState::Suspended;
        log::debug!("Audio output suspended ({} live tones)", self.sinks.len());
    }

    fn prune_finished(&mut self) {
        self.sinks.retain(|sink| !sink.empty());
    }
}

impl AudioContext for RodioContext {
    fn current_time(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    fn state(&self) -> ContextState {
        self.state
    }

    fn resume(&mut self) -> anyhow::Result<()> {
        if self.state == ContextState::Running {
            return Ok(());
        }
        for sink in &self.sinks {
            sink.play();
        }
        self.state = ContextState::Running;
        log::debug!("Audio output resumed");
        Ok(())
    }

    fn play_tone(&mut self, tone: Tone) -> anyhow::Result<()> {
        self.prune_finished();

        let origin = tone.start().map_or(self.current_time(), |start| start.min(self.current_time()));
        let source = ToneSource::starting_at(&tone, origin, self.sample_rate);

        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| {
                log::error!("Failed to create audio sink: {}", e);
                anyhow::anyhow!("Failed to create audio sink: {}", e)
            })?;
        if self.state == ContextState::Suspended {
            sink.pause();
        }
        sink.append(source);
        self.sinks.push(sink);

        log::debug!("Started {} tone ({} voices)", tone.name, tone.voices.len());
        Ok(())
    }
}

use crate::audio::context::{Tone, Voice};
use crate::audio::tones::{alert_tone, AlertType, ALERT_TONE_NAME};
use hound::{SampleFormat, WavSpec, WavWriter};
use rodio::Source;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Mono sample stream synthesized on the fly from a tone's voices.
///
/// Sample 0 corresponds to context time `origin`. Each voice keeps its own
/// phase, advanced by the instantaneous frequency, so pitch sweeps stay
/// continuous.
pub struct ToneSource {
    voices: Vec<Voice>,
    phases: Vec<f64>,
    sample_rate: u32,
    origin: f64,
    position: u64,
    total_samples: u64,
}

impl ToneSource {
    /// Renders `tone` from its earliest voice onwards.
    pub fn new(tone: &Tone, sample_rate: u32) -> Self {
        Self::starting_at(tone, tone.start().unwrap_or(0.0), sample_rate)
    }

    /// Renders `tone` from context time `origin`, producing leading silence
    /// when the tone starts later.
    pub fn starting_at(tone: &Tone, origin: f64, sample_rate: u32) -> Self {
        let sample_rate = sample_rate.max(1);
        let stop = tone.stop().unwrap_or(origin);
        let total_samples = ((stop - origin).max(0.0) * sample_rate as f64).ceil() as u64;

        Self {
            voices: tone.voices.clone(),
            phases: vec![0.0; tone.voices.len()],
            sample_rate,
            origin,
            position: 0,
            total_samples,
        }
    }

    pub fn total_samples(&self) -> u64 {
        self.total_samples
    }
}

impl Iterator for ToneSource {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.total_samples {
            return None;
        }

        let rate = self.sample_rate as f64;
        let time = self.origin + self.position as f64 / rate;
        let mut mixed = 0.0f32;

        for (voice, phase) in self.voices.iter().zip(self.phases.iter_mut()) {
            if !voice.is_sounding_at(time) {
                continue;
            }
            mixed += voice.waveform.sample(*phase) * voice.gain.value_at(time);
            *phase = (*phase + voice.frequency.value_at(time) as f64 / rate).fract();
        }

        self.position += 1;
        Some(mixed.clamp(-1.0, 1.0))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total_samples - self.position) as usize;
        (remaining, Some(remaining))
    }
}

impl Source for ToneSource {
    fn current_frame_len(&self) -> Option<usize> {
        Some((self.total_samples - self.position) as usize)
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs_f64(self.total_samples as f64 / self.sample_rate as f64))
    }
}

/// Writes `tone` to a 16-bit mono WAV file.
pub fn write_tone_wav(output_path: &Path, tone: &Tone, sample_rate: u32) -> anyhow::Result<()> {
    let source = ToneSource::new(tone, sample_rate);
    let spec = WavSpec {
        channels: 1,
        sample_rate: source.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(output_path, spec)
        .map_err(|e| {
            log::error!("Failed to create WAV writer for {}: {}", output_path.display(), e);
            anyhow::anyhow!("Failed to create WAV writer: {}", e)
        })?;

    for sample in source {
        writer.write_sample((sample * i16::MAX as f32) as i16)
            .map_err(|e| {
                log::error!("Failed to write sample for {}: {}", tone.name, e);
                anyhow::anyhow!("Failed to write sample: {}", e)
            })?;
    }

    writer.finalize()
        .map_err(|e| {
            log::error!("Failed to finalize WAV file {}: {}", output_path.display(), e);
            anyhow::anyhow!("Failed to finalize WAV file: {}", e)
        })?;

    log::debug!("Wrote {} tone to {}", tone.name, output_path.display());
    Ok(())
}

/// Renders every alert sound at its default duration into `output_dir`,
/// one `<name>.wav` per sound. Returns the written paths.
pub fn export_alert_sounds(output_dir: &Path, volume: f32, sample_rate: u32) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)
        .map_err(|e| {
            log::error!("Failed to create export directory {}: {}", output_dir.display(), e);
            anyhow::anyhow!("Failed to create export directory: {}", e)
        })?;

    let volume = volume.clamp(0.0, 1.0);
    let mut tones: Vec<Tone> = AlertType::ALL
        .into_iter()
        .map(|alert| alert.descriptor().tone(0.0, None, volume))
        .collect();
    tones.push(alert_tone(800.0, 0.0, 2.0));

    let mut written = Vec::with_capacity(tones.len());
    for tone in &tones {
        let path = output_dir.join(format!("{}.wav", tone.name));
        write_tone_wav(&path, tone, sample_rate)?;
        written.push(path);
    }

    log::info!("Exported {} alert sounds (including {}) to {}", written.len(), ALERT_TONE_NAME, output_dir.display());
    Ok(written)
}

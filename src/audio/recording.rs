use crate::audio::context::{AudioContext, ContextState, Tone};
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

/// Audio context that keeps every played tone in memory instead of making
/// sound. Its clock only moves when told to.
#[derive(Debug, Clone)]
pub struct RecordingContext {
    now: f64,
    state: ContextState,
    tones: Vec<Tone>,
    resume_calls: usize,
}

impl Default for RecordingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingContext {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            state: ContextState::Running,
            tones: Vec::new(),
            resume_calls: 0,
        }
    }

    pub fn suspended() -> Self {
        Self {
            state: ContextState::Suspended,
            ..Self::new()
        }
    }

    pub fn set_time(&mut self, now: f64) {
        self.now = now;
    }

    pub fn tones(&self) -> &[Tone] {
        &self.tones
    }

    pub fn tone_names(&self) -> Vec<&'static str> {
        self.tones.iter().map(|tone| tone.name).collect()
    }

    pub fn voice_count(&self) -> usize {
        self.tones.iter().map(|tone| tone.voices.len()).sum()
    }

    pub fn resume_calls(&self) -> usize {
        self.resume_calls
    }

    pub fn clear(&mut self) {
        self.tones.clear();
    }
}

impl AudioContext for RecordingContext {
    fn current_time(&self) -> f64 {
        self.now
    }

    fn state(&self) -> ContextState {
        self.state
    }

    fn resume(&mut self) -> anyhow::Result<()> {
        self.resume_calls += 1;
        self.state = ContextState::Running;
        Ok(())
    }

    fn play_tone(&mut self, tone: Tone) -> anyhow::Result<()> {
        self.tones.push(tone);
        Ok(())
    }
}

/// Handle that lets a test keep inspecting a [`RecordingContext`] after
/// handing it to a component as a boxed [`AudioContext`].
#[derive(Debug, Clone, Default)]
pub struct SharedRecording(Rc<RefCell<RecordingContext>>);

impl SharedRecording {
    pub fn new(context: RecordingContext) -> Self {
        Self(Rc::new(RefCell::new(context)))
    }

    pub fn boxed(&self) -> Box<dyn AudioContext> {
        Box::new(self.clone())
    }

    pub fn borrow(&self) -> Ref<'_, RecordingContext> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, RecordingContext> {
        self.0.borrow_mut()
    }
}

impl AudioContext for SharedRecording {
    fn current_time(&self) -> f64 {
        self.0.borrow().current_time()
    }

    fn state(&self) -> ContextState {
        self.0.borrow().state()
    }

    fn resume(&mut self) -> anyhow::Result<()> {
        self.0.borrow_mut().resume()
    }

    fn play_tone(&mut self, tone: Tone) -> anyhow::Result<()> {
        self.0.borrow_mut().play_tone(tone)
    }
}

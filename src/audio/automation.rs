/// Smallest value an exponential ramp may target. Geometric interpolation is
/// undefined at zero, so envelopes "fade to silence" by ramping here instead.
pub const MIN_EXPONENTIAL_VALUE: f32 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampKind {
    /// Jump to the value at the event time.
    Step,
    /// Interpolate linearly from the previous event.
    Linear,
    /// Interpolate geometrically from the previous event.
    Exponential,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutomationEvent {
    pub kind: RampKind,
    pub value: f32,
    /// Context time in seconds.
    pub time: f64,
}

/// Time-varying value of a single parameter (a frequency or a gain).
///
/// Events are kept sorted by time; an event inserted at the same time as an
/// existing one goes after it. Evaluating between two events applies the
/// later event's ramp kind, starting from the earlier event's value.
#[derive(Debug, Clone, PartialEq)]
pub struct Automation {
    default_value: f32,
    events: Vec<AutomationEvent>,
}

impl Automation {
    pub fn new(default_value: f32) -> Self {
        Self {
            default_value,
            events: Vec::new(),
        }
    }

    pub fn set_value_at(&mut self, value: f32, time: f64) -> &mut Self {
        self.insert(RampKind::Step, value, time)
    }

    pub fn linear_ramp_to(&mut self, value: f32, time: f64) -> &mut Self {
        self.insert(RampKind::Linear, value, time)
    }

    /// Non-positive targets are raised to [`MIN_EXPONENTIAL_VALUE`].
    pub fn exponential_ramp_to(&mut self, value: f32, time: f64) -> &mut Self {
        let value = if value > MIN_EXPONENTIAL_VALUE { value } else { MIN_EXPONENTIAL_VALUE };
        self.insert(RampKind::Exponential, value, time)
    }

    pub fn events(&self) -> &[AutomationEvent] {
        &self.events
    }

    pub fn default_value(&self) -> f32 {
        self.default_value
    }

    /// Time of the last event, if any.
    pub fn end_time(&self) -> Option<f64> {
        self.events.last().map(|event| event.time)
    }

    pub fn value_at(&self, time: f64) -> f32 {
        let reached = self.events.partition_point(|event| event.time <= time);
        if reached == 0 {
            return self.default_value;
        }

        let previous = self.events[reached - 1];
        let Some(next) = self.events.get(reached) else {
            return previous.value;
        };

        let span = next.time - previous.time;
        let progress = ((time - previous.time) / span) as f32;

        match next.kind {
            RampKind::Step => previous.value,
            RampKind::Linear => previous.value + (next.value - previous.value) * progress,
            RampKind::Exponential => {
                if previous.value > 0.0 && next.value > 0.0 {
                    previous.value * (next.value / previous.value).powf(progress)
                } else {
                    previous.value
                }
            }
        }
    }

    fn insert(&mut self, kind: RampKind, value: f32, time: f64) -> &mut Self {
        let index = self.events.partition_point(|event| event.time <= time);
        self.events.insert(index, AutomationEvent { kind, value, time });
        self
    }
}

use std::time::Duration;

fn normalized_progress(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }

    let elapsed = elapsed.as_secs_f32();
    let total = duration.as_secs_f32();
    (elapsed / total).clamp(0.0, 1.0)
}

#[must_use]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimPhase {
    Running { progress: f32 },
    Completed,
}

/// How a visual property moves toward a new target value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transition {
    /// Jump straight to the target (1:1 finger tracking).
    #[default]
    None,
    EaseOut(Duration),
}

impl Transition {
    #[must_use]
    pub const fn ease_out_ms(ms: u64) -> Self {
        Self::EaseOut(Duration::from_millis(ms))
    }

    #[must_use]
    pub fn duration(self) -> Duration {
        match self {
            Self::None => Duration::ZERO,
            Self::EaseOut(duration) => duration,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EffectTimer {
    elapsed: Duration,
    duration: Duration,
}

impl EffectTimer {
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration,
        }
    }

    pub fn advance(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta);
    }

    #[must_use]
    pub fn progress(&self) -> f32 {
        normalized_progress(self.elapsed, self.duration)
    }

    #[must_use]
    pub fn phase(&self) -> AnimPhase {
        if self.is_finished() {
            AnimPhase::Completed
        } else {
            AnimPhase::Running {
                progress: self.progress(),
            }
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

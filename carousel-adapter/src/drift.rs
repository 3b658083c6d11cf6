use carousel::ScrollDirection;

/// A small tween over an `f64` range.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: f64, to: f64, start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(1),
            easing,
        }
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    pub fn sample(&self, now_ms: u64) -> f64 {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        let t = (elapsed as f64 / self.duration_ms as f64).clamp(0.0, 1.0);
        let eased = self.easing.sample(t);
        self.from + (self.to - self.from) * eased
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    SmoothStep,
    EaseInOutCubic,
}

impl Easing {
    pub fn sample(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - (u * u * u) / 2.0
                }
            }
        }
    }
}

/// A periodic offset driver: every `interval_ms` the offset moves by `step`, tweened over the
/// interval.
///
/// `tick` returns deltas rather than absolute offsets, so a carousel can shift the shared
/// offset to compensate for a trimmed item without the driver undoing it on the next frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drift {
    step: f64,
    interval_ms: u64,
    easing: Easing,
    paused: bool,
    last_fire_ms: Option<u64>,
    tween: Option<Tween>,
    sampled: f64,
}

impl Drift {
    /// Moves by `step` every `interval_ms`. Negative steps move toward the leading edge.
    pub fn new(step: f64, interval_ms: u64) -> Self {
        Self {
            step,
            interval_ms: interval_ms.max(1),
            easing: Easing::Linear,
            paused: false,
            last_fire_ms: None,
            tween: None,
            sampled: 0.0,
        }
    }

    /// Moves `speed` units per interval in `direction`.
    pub fn toward(direction: ScrollDirection, speed: f64, interval_ms: u64) -> Self {
        Self::new(direction.signed(speed), interval_ms)
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stops emitting deltas. The movement in flight is dropped.
    pub fn pause(&mut self) {
        self.paused = true;
        self.last_fire_ms = None;
        self.tween = None;
        self.sampled = 0.0;
    }

    /// Resumes; the next `tick` fires a new step immediately.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Advances the driver to `now_ms` and returns the offset change since the previous tick.
    pub fn tick(&mut self, now_ms: u64) -> f64 {
        if self.paused {
            return 0.0;
        }

        let mut delta = 0.0;
        let mut next_fire = match self.last_fire_ms {
            Some(last) => last.saturating_add(self.interval_ms),
            None => now_ms,
        };
        while now_ms >= next_fire {
            if let Some(tween) = self.tween.take() {
                delta += tween.to - self.sampled;
            }
            self.tween = Some(Tween::new(
                0.0,
                self.step,
                next_fire,
                self.interval_ms,
                self.easing,
            ));
            self.sampled = 0.0;
            self.last_fire_ms = Some(next_fire);
            if next_fire == u64::MAX {
                break;
            }
            next_fire = next_fire.saturating_add(self.interval_ms);
        }

        if let Some(tween) = self.tween {
            let value = tween.sample(now_ms);
            delta += value - self.sampled;
            self.sampled = value;
            if tween.is_done(now_ms) {
                self.tween = None;
            }
        }
        delta
    }
}

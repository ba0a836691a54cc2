use serde::{Deserialize, Serialize};

/// Upper bound on fixed steps run for a single host frame.
const MAX_STEPS_PER_FRAME: u32 = 10;

/// Treat negative, NaN and infinite deltas as "no time passed".
fn sanitize(dt: f64) -> f64 {
    if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        0.0
    }
}

/// Monotonic elapsed-time source. Advanced once per update pass.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    elapsed: f64,
    ticks: u64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `dt` seconds. Invalid deltas still count as a tick but
    /// add no time.
    pub fn advance(&mut self, dt: f64) {
        self.elapsed += sanitize(dt);
        self.ticks += 1;
    }

    /// Seconds since the clock started.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Number of update passes so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// Fixed timestep accumulator.
/// Lets animation run at a consistent rate regardless of frame time.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f64,
    /// Accumulated time from variable frame deltas.
    accumulator: f64,
}

impl FixedTimestep {
    pub fn new(dt: f64) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f64) -> u32 {
        self.accumulator += sanitize(frame_dt);
        // Cap to prevent spiral of death
        self.accumulator = self.accumulator.min(self.dt * MAX_STEPS_PER_FRAME as f64);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f64 * self.dt;
        steps
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }
}

/// How host frames map onto update passes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum StepMode {
    /// One update pass per host frame. Rotation speed follows the host's
    /// frame rate, matching the page's cadence.
    #[default]
    PerInvocation,
    /// One update pass per `dt` seconds of accumulated frame time.
    Fixed { dt: f64 },
}

/// Update passes to run for one host frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePlan {
    pub steps: u32,
    pub step_dt: f64,
}

/// Turns host frame deltas into update passes according to a [`StepMode`].
#[derive(Debug, Clone)]
pub struct FrameDriver {
    mode: StepMode,
    timestep: Option<FixedTimestep>,
}

impl FrameDriver {
    pub fn new(mode: StepMode) -> Self {
        let timestep = match mode {
            StepMode::PerInvocation => None,
            StepMode::Fixed { dt } => Some(FixedTimestep::new(dt)),
        };
        Self { mode, timestep }
    }

    pub fn mode(&self) -> StepMode {
        self.mode
    }

    pub fn plan(&mut self, frame_dt: f64) -> FramePlan {
        match self.timestep.as_mut() {
            None => FramePlan {
                steps: 1,
                step_dt: sanitize(frame_dt),
            },
            Some(ts) => FramePlan {
                steps: ts.accumulate(frame_dt),
                step_dt: ts.dt(),
            },
        }
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new(StepMode::default())
    }
}

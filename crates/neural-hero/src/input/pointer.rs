use crate::input::queue::InputEvent;

/// Normalized pointer position, both axes in [-1, 1], y up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub x: f64,
    pub y: f64,
}

impl PointerState {
    /// Clamp into [-1, 1]. Non-finite input yields the centered default.
    pub fn new(x: f64, y: f64) -> Self {
        if !(x.is_finite() && y.is_finite()) {
            return Self::default();
        }
        Self {
            x: x.clamp(-1.0, 1.0),
            y: y.clamp(-1.0, 1.0),
        }
    }
}

/// Turns raw pointer events into a [`PointerState`].
///
/// Last write wins. Anything unusable (no viewport yet, non-finite
/// coordinates, degenerate viewport) resets to (0, 0) instead of failing.
#[derive(Debug, Clone, Default)]
pub struct PointerSampler {
    state: PointerState,
    viewport: Option<(f64, f64)>,
}

impl PointerSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size of the canvas the client coordinates are relative to.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            self.viewport = Some((width, height));
        } else {
            log::debug!("pointer: ignoring degenerate viewport {}x{}", width, height);
            self.viewport = None;
        }
    }

    /// Record a pointer position in canvas pixels (origin top-left, y down).
    pub fn sample_client(&mut self, px: f64, py: f64) -> PointerState {
        self.state = match self.viewport {
            Some((w, h)) => PointerState::new(px / w * 2.0 - 1.0, -(py / h * 2.0 - 1.0)),
            None => PointerState::default(),
        };
        self.state
    }

    /// Record a position the host already normalized.
    pub fn sample_normalized(&mut self, x: f64, y: f64) -> PointerState {
        self.state = PointerState::new(x, y);
        self.state
    }

    /// Pointer left the canvas.
    pub fn clear(&mut self) {
        self.state = PointerState::default();
    }

    pub fn current(&self) -> PointerState {
        self.state
    }

    /// Fold one queued input event into the sampler.
    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerMove { x, y } => {
                self.sample_client(x as f64, y as f64);
            }
            InputEvent::PointerNormalized { x, y } => {
                self.sample_normalized(x as f64, y as f64);
            }
            InputEvent::PointerLeave => self.clear(),
            InputEvent::Resize { width, height } => self.set_viewport(width as f64, height as f64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_center() {
        let sampler = PointerSampler::new();
        assert_eq!(sampler.current(), PointerState { x: 0.0, y: 0.0 });
    }

    #[test]
    fn normalizes_client_coordinates() {
        let mut sampler = PointerSampler::new();
        sampler.set_viewport(800.0, 400.0);
        assert_eq!(sampler.sample_client(0.0, 0.0), PointerState::new(-1.0, 1.0));
        assert_eq!(sampler.sample_client(800.0, 400.0), PointerState::new(1.0, -1.0));
        assert_eq!(sampler.sample_client(400.0, 200.0), PointerState::new(0.0, 0.0));
        assert_eq!(sampler.sample_client(600.0, 100.0), PointerState::new(0.5, 0.5));
    }

    #[test]
    fn clamps_outside_canvas() {
        let mut sampler = PointerSampler::new();
        sampler.set_viewport(100.0, 100.0);
        let s = sampler.sample_client(-500.0, 900.0);
        assert_eq!(s, PointerState::new(-1.0, -1.0));
    }

    #[test]
    fn invalid_input_resets_to_center() {
        let mut sampler = PointerSampler::new();
        sampler.set_viewport(100.0, 100.0);
        sampler.sample_client(75.0, 25.0);
        assert_ne!(sampler.current(), PointerState::default());
        sampler.sample_normalized(f64::NAN, 0.3);
        assert_eq!(sampler.current(), PointerState::default());
    }

    #[test]
    fn no_viewport_means_center() {
        let mut sampler = PointerSampler::new();
        assert_eq!(sampler.sample_client(50.0, 50.0), PointerState::default());
        sampler.set_viewport(0.0, 100.0);
        assert_eq!(sampler.sample_client(50.0, 50.0), PointerState::default());
    }

    #[test]
    fn last_write_wins() {
        let mut sampler = PointerSampler::new();
        for event in [
            InputEvent::Resize { width: 200.0, height: 200.0 },
            InputEvent::PointerMove { x: 200.0, y: 0.0 },
            InputEvent::PointerNormalized { x: -0.25, y: 0.75 },
        ] {
            sampler.apply(&event);
        }
        assert_eq!(sampler.current(), PointerState::new(-0.25, 0.75));
        sampler.apply(&InputEvent::PointerLeave);
        assert_eq!(sampler.current(), PointerState::default());
    }
}

use neural_hero::{ConfigError, HeroScene, InputEvent, ProtocolLayout, SceneConfig};

/// Absorbs float noise when host deltas sum to a whole millisecond.
const TIMER_EPSILON_MS: f64 = 1e-6;

/// Drives a [`HeroScene`] for the browser and packs each frame into a flat
/// buffer the host reads through a raw pointer.
///
/// `lib.rs` keeps one runner in a `thread_local!` and exports free functions
/// via `#[wasm_bindgen]`, because wasm-bindgen cannot export the scene directly.
pub struct SceneRunner {
    hero: HeroScene,
    layout: ProtocolLayout,
    frame_buffer: Vec<f32>,
    frame_counter: u32,
    /// Sub-millisecond time not yet handed to the scene's timers.
    timer_remainder_ms: f64,
}

impl SceneRunner {
    pub fn new(config: SceneConfig) -> Result<Self, ConfigError> {
        let layout = ProtocolLayout::from_config(&config);
        let hero = HeroScene::new(config)?;
        Ok(Self {
            hero,
            frame_buffer: Vec::with_capacity(layout.buffer_total_floats),
            layout,
            frame_counter: 0,
            timer_remainder_ms: 0.0,
        })
    }

    /// Build from an optional JSON document. `seed` overrides the document's.
    pub fn from_json(seed: u64, json: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match json {
            Some(text) if !text.trim().is_empty() => SceneConfig::from_json(text)?,
            _ => SceneConfig::hero(),
        };
        config.seed = seed;
        Self::new(config)
    }

    /// Mount the scene and write the first frame.
    pub fn init(&mut self) {
        if self.hero.mount() {
            self.write_frame();
        }
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.hero.push_input(event);
    }

    /// Run one host frame and repack the frame buffer.
    pub fn tick(&mut self, dt: f32) {
        self.hero.frame(dt as f64);
        self.write_frame();
    }

    /// Advance overlay and chat timers.
    ///
    /// Only whole milliseconds reach the scene; the fraction carries over to
    /// the next call, so the timer clock tracks the summed host deltas.
    pub fn advance_timers(&mut self, dt_ms: f64) -> u32 {
        if !dt_ms.is_finite() || dt_ms <= 0.0 {
            return 0;
        }
        self.timer_remainder_ms += dt_ms;
        let whole = (self.timer_remainder_ms + TIMER_EPSILON_MS).floor();
        self.timer_remainder_ms = (self.timer_remainder_ms - whole).max(0.0);
        if whole < 1.0 {
            return 0;
        }
        let handled = self.hero.advance_timers(whole as u64);
        if handled > 0 {
            self.write_frame();
        }
        handled as u32
    }

    fn write_frame(&mut self) {
        self.frame_counter = self.frame_counter.wrapping_add(1);
        self.layout.write_frame(&self.hero, self.frame_counter, &mut self.frame_buffer);
    }

    pub fn teardown(&mut self) {
        self.hero.teardown();
        self.write_frame();
    }

    pub fn hero(&self) -> &HeroScene {
        &self.hero
    }

    pub fn hero_mut(&mut self) -> &mut HeroScene {
        &mut self.hero
    }

    // ---- Pointer accessors for shared buffer reads ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame_buffer.as_ptr()
    }

    pub fn frame_len(&self) -> u32 {
        self.frame_buffer.len() as u32
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.hero.draw_buffer().instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.hero.draw_buffer().instance_count() as u32
    }

    pub fn polyline_ptr(&self) -> *const f32 {
        self.hero.draw_buffer().polyline_ptr()
    }

    pub fn polyline_vertex_count(&self) -> u32 {
        self.hero.draw_buffer().vertex_count() as u32
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }
}

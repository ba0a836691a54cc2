use glam::DVec3;
use crate::api::config::SceneConfig;
use crate::api::error::ConfigError;
use crate::api::types::Lifecycle;
use crate::components::mesh::{Geometry, Material};
use crate::components::node::{NodeKind, SceneNode, Transform};
use crate::core::scene::Scene;
use crate::core::time::{Clock, FrameDriver};
use crate::input::pointer::{PointerSampler, PointerState};
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::camera::CameraRig;
use crate::renderer::instance::DrawBuffer;
use crate::systems::chat::ChatWidget;
use crate::systems::compose::{DrawItem, SceneComposer};
use crate::systems::lighting::LightState;
use crate::systems::overlay::{OverlayScheduler, OverlaySnapshot};
use crate::systems::particles::ParticleField;
use crate::systems::rng::SceneRng;
use crate::systems::sphere::{SphereController, SphereState};

const PARTICLE_STREAM: u64 = 1;
const OVERLAY_STREAM: u64 = 2;

/// The whole hero section: sphere, particle network, overlay and chat.
///
/// The host drives two independent channels: [`frame`](Self::frame) once per
/// displayed frame, and [`advance_timers`](Self::advance_timers) with wall
/// clock milliseconds for the overlay and chat timers.
pub struct HeroScene {
    config: SceneConfig,
    lifecycle: Lifecycle,
    scene: Scene,
    clock: Clock,
    driver: FrameDriver,
    input: InputQueue,
    pointer: PointerSampler,
    particles: ParticleField,
    positions: Vec<DVec3>,
    sphere: Option<SphereController>,
    overlay: Option<OverlayScheduler>,
    chat: Option<ChatWidget>,
    lights: LightState,
    camera: CameraRig,
    composer: SceneComposer,
    draw: DrawBuffer,
}

impl HeroScene {
    /// Validate `config` and build an unmounted scene.
    pub fn new(config: SceneConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Parse, validate and build.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(Self::build(SceneConfig::from_json(json)?))
    }

    fn build(config: SceneConfig) -> Self {
        let root = SceneRng::new(config.seed);
        let mut particle_rng = root.fork(PARTICLE_STREAM);
        let particles = ParticleField::from_config(&config.particles, &mut particle_rng);
        let count = particles.len();

        Self {
            lifecycle: Lifecycle::Created,
            scene: Scene::with_capacity(count + 1),
            clock: Clock::new(),
            driver: FrameDriver::new(config.step_mode),
            input: InputQueue::new(),
            pointer: PointerSampler::new(),
            particles,
            positions: Vec::with_capacity(count),
            sphere: config.sphere.clone().map(SphereController::new),
            overlay: config
                .overlay
                .clone()
                .map(|o| OverlayScheduler::new(o, root.fork(OVERLAY_STREAM))),
            chat: config.chat.clone().map(ChatWidget::new),
            lights: LightState::from_config(&config.lights),
            camera: CameraRig::from_config(&config.camera),
            composer: SceneComposer::new(config.particles.connect),
            draw: DrawBuffer::with_capacity(count + 1),
            config,
        }
    }

    /// Register the sphere and particle nodes and start the overlay timer.
    /// Only the first call does anything; returns whether it did.
    pub fn mount(&mut self) -> bool {
        if self.lifecycle != Lifecycle::Created {
            return false;
        }

        if let Some(sphere) = self.sphere.as_mut() {
            let cfg = sphere.config();
            let material = Material::new(cfg.color)
                .with_emissive(cfg.color, cfg.emissive_intensity)
                .with_wireframe(cfg.wireframe);
            let id = self.scene.next_id();
            let node = SceneNode::new(id, NodeKind::Sphere, Geometry::sphere(cfg.radius, cfg.segments), material)
                .with_tag("sphere")
                .with_transform(sphere.state().transform());
            sphere.attach(self.scene.spawn(node));
        }

        let p = &self.config.particles;
        let geometry = Geometry::sphere(p.radius, p.segments);
        let material = Material::new(p.color).with_emissive(p.color, p.emissive_intensity);
        self.particles.update_into(self.clock.elapsed(), &mut self.positions);
        for (i, pos) in self.positions.iter().enumerate() {
            let id = self.scene.next_id();
            let node = SceneNode::new(id, NodeKind::Particle, geometry, material)
                .with_tag(format!("particle.{}", i))
                .with_transform(Transform::at(*pos));
            self.scene.spawn(node);
        }

        if let Some(overlay) = self.overlay.as_mut() {
            overlay.start();
        }

        self.lifecycle = Lifecycle::Mounted;
        self.composer.compose(&self.scene, &self.lights, &mut self.draw);
        log::info!(
            "hero: mounted {} node(s), seed {}",
            self.scene.len(),
            self.config.seed
        );
        true
    }

    /// Queue an input event for the next frame.
    pub fn push_input(&mut self, event: InputEvent) {
        if self.lifecycle == Lifecycle::TornDown {
            return;
        }
        self.input.push(event);
    }

    /// Run the update passes for one host frame and rebuild the draw list.
    /// Does nothing unless mounted.
    pub fn frame(&mut self, dt_secs: f64) {
        if self.lifecycle != Lifecycle::Mounted {
            return;
        }

        for event in self.input.drain() {
            self.pointer.apply(&event);
            if let InputEvent::Resize { width, height } = event {
                self.camera.resize(width, height);
            }
        }
        let pointer = self.pointer.current();

        let plan = self.driver.plan(dt_secs);
        for _ in 0..plan.steps {
            self.clock.advance(plan.step_dt);
            let t = self.clock.elapsed();

            if let Some(sphere) = self.sphere.as_mut() {
                let state = sphere.update(pointer, t);
                if let Some(node) = sphere.node() {
                    self.scene.set_transform(node, state.transform());
                }
            }

            // Particle nodes were spawned in field order, so one zipped pass
            // lines them up with the positions.
            self.particles.update_into(t, &mut self.positions);
            for (node, pos) in self.scene.iter_kind_mut(NodeKind::Particle).zip(&self.positions) {
                node.transform = Transform::at(*pos);
            }
        }

        self.camera.orbit(dt_secs as f32);
        self.composer.compose(&self.scene, &self.lights, &mut self.draw);
    }

    /// Advance the overlay and chat timers by `dt_ms` wall-clock milliseconds.
    /// Returns the number of timer events handled.
    pub fn advance_timers(&mut self, dt_ms: u64) -> usize {
        if self.lifecycle != Lifecycle::Mounted {
            return 0;
        }
        let mut handled = 0;
        if let Some(overlay) = self.overlay.as_mut() {
            handled += overlay.advance(dt_ms);
        }
        if let Some(chat) = self.chat.as_mut() {
            if chat.advance(dt_ms) {
                handled += 1;
            }
        }
        handled
    }

    /// Stop every timer and release all nodes. Safe to call more than once.
    /// Returns how many pending timers were cancelled.
    pub fn teardown(&mut self) -> usize {
        if self.lifecycle == Lifecycle::TornDown {
            return 0;
        }
        let mut cancelled = 0;
        if let Some(overlay) = self.overlay.as_mut() {
            cancelled += overlay.stop();
        }
        if let Some(chat) = self.chat.as_mut() {
            cancelled += chat.stop();
        }
        if let Some(sphere) = self.sphere.as_mut() {
            sphere.detach();
        }
        self.scene.clear();
        self.input.clear();
        self.draw.clear();
        self.lifecycle = Lifecycle::TornDown;
        log::info!("hero: torn down, cancelled {} timer(s)", cancelled);
        cancelled
    }

    /// Teardown for an unmount the host never announced. Returns the
    /// timers cancelled; 0 unless the scene was still mounted.
    fn release(&mut self) -> usize {
        if self.lifecycle != Lifecycle::Mounted {
            return 0;
        }
        let cancelled = self.teardown();
        if cancelled > 0 {
            log::warn!("hero: dropped while mounted, cancelled {} timer(s)", cancelled);
        }
        cancelled
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Seconds of simulated time.
    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    /// Update passes run so far.
    pub fn ticks(&self) -> u64 {
        self.clock.ticks()
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer.current()
    }

    pub fn sphere_state(&self) -> Option<SphereState> {
        self.sphere.as_ref().map(|s| s.state())
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    /// Particle positions from the last update pass.
    pub fn particle_positions(&self) -> &[DVec3] {
        &self.positions
    }

    pub fn overlay(&self) -> Option<&OverlayScheduler> {
        self.overlay.as_ref()
    }

    pub fn overlay_snapshot(&self) -> Option<OverlaySnapshot> {
        self.overlay.as_ref().map(|o| o.snapshot())
    }

    pub fn chat(&self) -> Option<&ChatWidget> {
        self.chat.as_ref()
    }

    pub fn chat_mut(&mut self) -> Option<&mut ChatWidget> {
        self.chat.as_mut()
    }

    pub fn lights(&self) -> &LightState {
        &self.lights
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn draw_buffer(&self) -> &DrawBuffer {
        &self.draw
    }

    pub fn draw_list(&self) -> &[DrawItem] {
        self.composer.items()
    }
}

impl Default for HeroScene {
    fn default() -> Self {
        Self::build(SceneConfig::hero())
    }
}

impl Drop for HeroScene {
    fn drop(&mut self) {
        self.release();
    }
}

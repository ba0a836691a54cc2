pub mod runner;

pub use runner::SceneRunner;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use neural_hero::{InputEvent, BOOKING_URL};

thread_local! {
    static RUNNER: RefCell<Option<SceneRunner>> = RefCell::new(None);
}

/// Run `f` against the live runner. Calls made before `hero_init` (or after
/// a failed init) return `fallback`.
fn with_runner<R>(fallback: R, f: impl FnOnce(&mut SceneRunner) -> R) -> R {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => f(runner),
        None => fallback,
    })
}

/// Build and mount the scene. `config_json` may be empty to use the hero
/// preset. Returns false if the config is rejected.
#[wasm_bindgen]
pub fn hero_init(seed: u32, config_json: Option<String>) -> bool {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let mut runner = match SceneRunner::from_json(seed as u64, config_json.as_deref()) {
        Ok(runner) => runner,
        Err(err) => {
            log::error!("neural-hero: {}", err);
            return false;
        }
    };
    runner.init();

    RUNNER.with(|cell| {
        // Replacing a previous runner drops it, which tears it down.
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("neural-hero: initialized");
    true
}

#[wasm_bindgen]
pub fn hero_frame(dt: f32) {
    with_runner((), |r| r.tick(dt));
}

#[wasm_bindgen]
pub fn hero_timers(dt_ms: f64) -> u32 {
    with_runner(0, |r| r.advance_timers(dt_ms))
}

#[wasm_bindgen]
pub fn hero_pointer_move(x: f32, y: f32) {
    with_runner((), |r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn hero_pointer_normalized(x: f32, y: f32) {
    with_runner((), |r| r.push_input(InputEvent::PointerNormalized { x, y }));
}

#[wasm_bindgen]
pub fn hero_pointer_leave() {
    with_runner((), |r| r.push_input(InputEvent::PointerLeave));
}

#[wasm_bindgen]
pub fn hero_resize(width: f32, height: f32) {
    with_runner((), |r| r.push_input(InputEvent::Resize { width, height }));
}

#[wasm_bindgen]
pub fn hero_teardown() {
    with_runner((), |r| r.teardown());
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_frame_ptr() -> *const f32 {
    with_runner(std::ptr::null(), |r| r.frame_ptr())
}

#[wasm_bindgen]
pub fn get_frame_len() -> u32 {
    with_runner(0, |r| r.frame_len())
}

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    with_runner(std::ptr::null(), |r| r.instances_ptr())
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(0, |r| r.instance_count())
}

#[wasm_bindgen]
pub fn get_polyline_ptr() -> *const f32 {
    with_runner(std::ptr::null(), |r| r.polyline_ptr())
}

#[wasm_bindgen]
pub fn get_polyline_vertex_count() -> u32 {
    with_runner(0, |r| r.polyline_vertex_count())
}

// ---- Overlay accessors ----

#[wasm_bindgen]
pub fn overlay_visible() -> bool {
    with_runner(false, |r| r.hero().overlay_snapshot().is_some_and(|s| s.visible))
}

/// 0 = left, 1 = right.
#[wasm_bindgen]
pub fn overlay_side() -> u32 {
    with_runner(0, |r| r.hero().overlay_snapshot().map_or(0, |s| s.side.as_u32()))
}

#[wasm_bindgen]
pub fn overlay_vertical_percent() -> u32 {
    with_runner(50, |r| r.hero().overlay_snapshot().map_or(50, |s| s.vertical_percent))
}

#[wasm_bindgen]
pub fn overlay_cycle_id() -> f64 {
    with_runner(0.0, |r| r.hero().overlay_snapshot().map_or(0.0, |s| s.cycle_id as f64))
}

#[wasm_bindgen]
pub fn overlay_phase() -> u32 {
    with_runner(0, |r| r.hero().overlay_snapshot().map_or(0, |s| s.phase.as_u32()))
}

#[wasm_bindgen]
pub fn overlay_offset_x() -> f32 {
    with_runner(0.0, |r| r.hero().overlay_snapshot().map_or(0.0, |s| s.offset_x))
}

#[wasm_bindgen]
pub fn overlay_opacity() -> f32 {
    with_runner(0.0, |r| r.hero().overlay_snapshot().map_or(0.0, |s| s.opacity))
}

// ---- Chat widget ----

#[wasm_bindgen]
pub fn chat_toggle() -> bool {
    with_runner(false, |r| r.hero_mut().chat_mut().is_some_and(|c| c.toggle()))
}

#[wasm_bindgen]
pub fn chat_submit(text: &str) -> bool {
    with_runner(false, |r| r.hero_mut().chat_mut().is_some_and(|c| c.submit(text)))
}

#[wasm_bindgen]
pub fn chat_reply() -> String {
    with_runner(String::new(), |r| {
        r.hero().chat().map(|c| c.reply().to_string()).unwrap_or_default()
    })
}

#[wasm_bindgen]
pub fn booking_url() -> String {
    BOOKING_URL.to_string()
}

//! Peeking overlay scheduler.
//!
//! Every `period_ms` the overlay is forced hidden, given a new side and
//! vertical position, revealed `reveal_delay_ms` later, and hidden again
//! `visible_ms` after the reveal. Entry and exit are eased horizontal
//! slides of `slide_offset` units lasting `slide_ms`.
//!
//! Runs on its own [`TimerService`], independent of the render loop.
//!
//! ```text
//!  cycle ──► Hidden ──reveal──► Appearing ──slide──► Visible
//!              ▲                                        │
//!              └──slide── Disappearing ◄────hide────────┘
//! ```

use crate::api::config::OverlayConfig;
use crate::api::types::{Lifecycle, Side};
use crate::core::timer::{Fired, TimerService};
use crate::extensions::easing::ease;
use crate::systems::rng::SceneRng;

const TIMER_CYCLE: &str = "overlay.cycle";
const TIMER_REVEAL: &str = "overlay.reveal";
const TIMER_HIDE: &str = "overlay.hide";
const TIMER_SLIDE: &str = "overlay.slide";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OverlayEvent {
    Cycle,
    Reveal,
    Hide,
    SlideDone,
}

/// Presentation phase of the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayPhase {
    #[default]
    Hidden,
    Appearing,
    Visible,
    Disappearing,
}

impl OverlayPhase {
    pub fn as_u32(self) -> u32 {
        match self {
            OverlayPhase::Hidden => 0,
            OverlayPhase::Appearing => 1,
            OverlayPhase::Visible => 2,
            OverlayPhase::Disappearing => 3,
        }
    }
}

/// Logical overlay state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverlayState {
    pub visible: bool,
    pub side: Side,
    /// Vertical position, percent of the viewport height.
    pub vertical_percent: u32,
    /// Incremented on every reveal so the host restarts its animation.
    pub cycle_id: u64,
}

/// What the rendering layer reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlaySnapshot {
    pub visible: bool,
    pub side: Side,
    pub vertical_percent: u32,
    pub cycle_id: u64,
    pub phase: OverlayPhase,
    /// Horizontal slide offset; 0 when fully in.
    pub offset_x: f32,
    pub opacity: f32,
}

/// Periodic appear/disappear state machine.
pub struct OverlayScheduler {
    config: OverlayConfig,
    rng: SceneRng,
    timers: TimerService<OverlayEvent>,
    state: OverlayState,
    phase: OverlayPhase,
    phase_started_ms: u64,
    lifecycle: Lifecycle,
}

impl OverlayScheduler {
    pub fn new(config: OverlayConfig, rng: SceneRng) -> Self {
        let state = OverlayState {
            vertical_percent: 50,
            ..OverlayState::default()
        };
        Self {
            config,
            rng,
            timers: TimerService::new(),
            state,
            phase: OverlayPhase::Hidden,
            phase_started_ms: 0,
            lifecycle: Lifecycle::Created,
        }
    }

    /// Arm the repeating cycle timer. The first re-spawn happens one full
    /// period after start. Starting twice, or after [`stop`](Self::stop),
    /// does nothing.
    pub fn start(&mut self) {
        if self.lifecycle != Lifecycle::Created {
            return;
        }
        self.timers
            .schedule_repeating(TIMER_CYCLE, self.config.period_ms, OverlayEvent::Cycle);
        self.lifecycle = Lifecycle::Mounted;
        log::debug!("overlay: started, period {} ms", self.config.period_ms);
    }

    /// Cancel the cycle timer and any pending sub-timers. Only the first
    /// call cancels anything; it returns how many timers were live.
    pub fn stop(&mut self) -> usize {
        if self.lifecycle == Lifecycle::TornDown {
            return 0;
        }
        let cancelled = self.timers.cancel_all();
        self.lifecycle = Lifecycle::TornDown;
        log::debug!("overlay: stopped, cancelled {} timer(s)", cancelled);
        cancelled
    }

    /// [`stop`](Self::stop) for a scheduler going away without an explicit
    /// stop. Warns when it had to cancel live timers.
    fn release(&mut self) -> usize {
        let cancelled = self.stop();
        if cancelled > 0 {
            log::warn!("overlay: dropped while running, cancelled {} timer(s)", cancelled);
        }
        cancelled
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Mounted
    }

    /// Live timers, including the repeating cycle timer.
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Milliseconds since start.
    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    /// Advance the scheduler's clock by `dt_ms`, firing every timer that
    /// comes due in order. Returns the number of timers fired. Does nothing
    /// unless running.
    pub fn advance(&mut self, dt_ms: u64) -> usize {
        if !self.is_running() {
            return 0;
        }
        let until = self.timers.now_ms().saturating_add(dt_ms);
        let mut fired = 0;
        while let Some(timer) = self.timers.poll(until) {
            self.handle(timer);
            fired += 1;
        }
        self.timers.settle(until);
        fired
    }

    fn handle(&mut self, timer: Fired<OverlayEvent>) {
        let now = timer.at_ms;
        match timer.event {
            OverlayEvent::Cycle => {
                let side = if self.rng.coin() { Side::Left } else { Side::Right };
                let vertical = self
                    .rng
                    .range_u32(self.config.vertical_min, self.config.vertical_max);

                // A new cycle overrides whatever the previous one left pending.
                for name in [TIMER_REVEAL, TIMER_HIDE, TIMER_SLIDE] {
                    self.timers.cancel_named(name);
                }

                self.state.side = side;
                self.state.vertical_percent = vertical;
                self.state.visible = false;
                self.set_phase(OverlayPhase::Hidden, now);

                self.timers
                    .schedule_once(TIMER_REVEAL, self.config.reveal_delay_ms, OverlayEvent::Reveal);
            }
            OverlayEvent::Reveal => {
                self.state.cycle_id += 1;
                self.state.visible = true;
                self.set_phase(OverlayPhase::Appearing, now);
                self.timers
                    .schedule_once(TIMER_SLIDE, self.config.slide_ms, OverlayEvent::SlideDone);
                self.timers
                    .schedule_once(TIMER_HIDE, self.config.visible_ms, OverlayEvent::Hide);
                log::debug!(
                    "overlay: cycle {} revealed on {:?} at {}%",
                    self.state.cycle_id,
                    self.state.side,
                    self.state.vertical_percent
                );
            }
            OverlayEvent::Hide => {
                self.state.visible = false;
                self.timers.cancel_named(TIMER_SLIDE);
                self.set_phase(OverlayPhase::Disappearing, now);
                self.timers
                    .schedule_once(TIMER_SLIDE, self.config.slide_ms, OverlayEvent::SlideDone);
            }
            OverlayEvent::SlideDone => match self.phase {
                OverlayPhase::Appearing => self.set_phase(OverlayPhase::Visible, now),
                OverlayPhase::Disappearing => self.set_phase(OverlayPhase::Hidden, now),
                OverlayPhase::Hidden | OverlayPhase::Visible => {}
            },
        }
    }

    fn set_phase(&mut self, phase: OverlayPhase, now_ms: u64) {
        self.phase = phase;
        self.phase_started_ms = now_ms;
    }

    /// Slide progress in [0, 1] for the current phase.
    fn slide_progress(&self) -> f32 {
        if self.config.slide_ms == 0 {
            return 1.0;
        }
        let elapsed = self.timers.now_ms().saturating_sub(self.phase_started_ms);
        (elapsed as f32 / self.config.slide_ms as f32).min(1.0)
    }

    pub fn snapshot(&self) -> OverlaySnapshot {
        let off = self.state.side.sign() * self.config.slide_offset;
        let easing = self.config.easing;
        let (offset_x, opacity) = match self.phase {
            OverlayPhase::Hidden => (off, 0.0),
            OverlayPhase::Visible => (0.0, 1.0),
            OverlayPhase::Appearing => {
                let p = self.slide_progress();
                (ease(off, 0.0, p, easing), ease(0.0, 1.0, p, easing))
            }
            OverlayPhase::Disappearing => {
                let p = self.slide_progress();
                (ease(0.0, off, p, easing), ease(1.0, 0.0, p, easing))
            }
        };
        OverlaySnapshot {
            visible: self.state.visible,
            side: self.state.side,
            vertical_percent: self.state.vertical_percent,
            cycle_id: self.state.cycle_id,
            phase: self.phase,
            offset_x,
            opacity,
        }
    }
}

impl Drop for OverlayScheduler {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extensions::easing::Easing;

    fn running(seed: u64) -> OverlayScheduler {
        let mut s = OverlayScheduler::new(OverlayConfig::default(), SceneRng::new(seed));
        s.start();
        s
    }

    /// Step 1 ms at a time, returning (time, visible) at each change.
    fn visibility_edges(s: &mut OverlayScheduler, until_ms: u64) -> Vec<(u64, bool)> {
        let mut edges = Vec::new();
        let mut last = s.state().visible;
        while s.now_ms() < until_ms {
            s.advance(1);
            let v = s.state().visible;
            if v != last {
                edges.push((s.now_ms(), v));
                last = v;
            }
        }
        edges
    }

    #[test]
    fn hidden_until_first_period() {
        let mut s = running(1);
        s.advance(6_999);
        assert!(!s.state().visible);
        assert_eq!(s.state().cycle_id, 0);
        assert_eq!(s.phase(), OverlayPhase::Hidden);
    }

    #[test]
    fn cycle_timing_is_exact() {
        let mut s = running(1);
        let edges = visibility_edges(&mut s, 21_500);
        assert_eq!(
            edges,
            vec![
                (7_100, true),
                (12_100, false),
                (14_100, true),
                (19_100, false),
                (21_100, true),
            ]
        );
    }

    #[test]
    fn visible_for_5000_after_100_gap() {
        let mut s = running(8);
        s.advance(7_000);
        assert!(!s.state().visible);
        s.advance(99);
        assert!(!s.state().visible);
        s.advance(1);
        assert!(s.state().visible);
        assert_eq!(s.state().cycle_id, 1);
        s.advance(4_999);
        assert!(s.state().visible);
        s.advance(1);
        assert!(!s.state().visible);
    }

    #[test]
    fn large_step_fires_everything_in_order() {
        let mut a = running(5);
        let mut b = running(5);
        a.advance(70_000 + 100);
        for _ in 0..701 {
            b.advance(100);
        }
        assert_eq!(a.state(), b.state());
        assert_eq!(a.state().cycle_id, 10);
        assert!(a.state().visible);
    }

    #[test]
    fn phases_follow_slide() {
        let mut s = running(3);
        s.advance(7_100);
        assert_eq!(s.phase(), OverlayPhase::Appearing);
        let snap = s.snapshot();
        assert_eq!(snap.opacity, 0.0);
        assert_eq!(snap.offset_x, snap.side.sign() * 160.0);

        s.advance(1_000);
        let mid = s.snapshot();
        assert_eq!(mid.phase, OverlayPhase::Appearing);
        assert!(mid.offset_x.abs() < 160.0 && mid.offset_x.abs() > 0.0);
        assert!(mid.opacity > 0.0 && mid.opacity < 1.0);

        s.advance(1_000);
        assert_eq!(s.phase(), OverlayPhase::Visible);
        assert_eq!(s.snapshot().offset_x, 0.0);
        assert_eq!(s.snapshot().opacity, 1.0);

        s.advance(3_000);
        assert_eq!(s.phase(), OverlayPhase::Disappearing);
        s.advance(1_000);
        let leaving = s.snapshot();
        assert!(!leaving.visible);
        assert!(leaving.opacity > 0.0 && leaving.opacity < 1.0);

        // The next cycle lands before the exit slide ends and snaps to hidden.
        s.advance(900);
        assert_eq!(s.phase(), OverlayPhase::Hidden);
        assert_eq!(s.snapshot().opacity, 0.0);
        assert_eq!(s.state().cycle_id, 1);
    }

    #[test]
    fn slide_direction_matches_side() {
        let mut cfg = OverlayConfig::default();
        cfg.easing = Easing::Linear;
        for seed in 0..16 {
            let mut s = OverlayScheduler::new(cfg.clone(), SceneRng::new(seed));
            s.start();
            s.advance(7_100 + 500);
            let snap = s.snapshot();
            let expected = snap.side.sign() * 160.0 * 0.75;
            assert!((snap.offset_x - expected).abs() < 1e-3, "{} vs {}", snap.offset_x, expected);
        }
    }

    #[test]
    fn stop_mid_cycle_freezes_state() {
        let mut s = running(4);
        s.advance(7_050);
        let before = s.state();
        assert!(s.stop() > 0);
        assert_eq!(s.pending_timers(), 0);
        for _ in 0..100 {
            s.advance(7_000);
        }
        assert_eq!(s.state(), before);
        assert_eq!(s.state().cycle_id, 0);
    }

    #[test]
    fn stop_cancels_exactly_once() {
        let mut s = running(4);
        s.advance(7_100);
        // cycle + slide + hide
        assert_eq!(s.pending_timers(), 3);
        assert_eq!(s.stop(), 3);
        assert_eq!(s.stop(), 0);
        assert_eq!(s.lifecycle(), Lifecycle::TornDown);
        s.start();
        assert!(!s.is_running());
    }

    #[test]
    fn not_started_means_no_transitions() {
        let mut s = OverlayScheduler::new(OverlayConfig::default(), SceneRng::new(1));
        assert_eq!(s.advance(100_000), 0);
        assert_eq!(s.state().cycle_id, 0);
    }

    #[test]
    fn new_cycle_overrides_stale_sub_timers() {
        // Visible window longer than the period, so the previous hide is
        // still pending when the next cycle fires.
        let cfg = OverlayConfig {
            period_ms: 1_000,
            reveal_delay_ms: 100,
            visible_ms: 1_500,
            slide_ms: 0,
            ..OverlayConfig::default()
        };
        let mut s = OverlayScheduler::new(cfg, SceneRng::new(2));
        s.start();
        s.advance(1_100);
        assert!(s.state().visible);

        s.advance(1_100);
        assert!(s.state().visible);
        assert_eq!(s.state().cycle_id, 2);
        // cycle + the new hide; the hide from cycle 1 is gone.
        assert_eq!(s.pending_timers(), 2);

        // 2_600 was the stale hide.
        s.advance(500);
        assert!(s.state().visible);
    }

    #[test]
    fn side_and_height_are_uniform() {
        let mut s = running(2024);
        let mut left = 0u32;
        let mut bands = [0u32; 3];
        let mut min = u32::MAX;
        let mut max = 0u32;

        s.advance(7_100);
        for _ in 0..1_000 {
            let st = s.state();
            assert!(st.visible);
            if st.side == Side::Left {
                left += 1;
            }
            let v = st.vertical_percent;
            assert!((20..80).contains(&v), "vertical {}", v);
            bands[((v - 20) / 20) as usize] += 1;
            min = min.min(v);
            max = max.max(v);
            s.advance(7_000);
        }

        assert!((430..=570).contains(&left), "left = {}", left);
        for count in bands {
            assert!((250..=420).contains(&count), "bands = {:?}", bands);
        }
        assert_eq!(min, 20);
        assert_eq!(max, 79);
    }

    #[test]
    fn release_cancels_live_timers_once() {
        let mut s = running(1);
        s.advance(7_100);
        let before = s.state();

        assert_eq!(s.release(), 3);
        assert!(!s.is_running());
        assert_eq!(s.pending_timers(), 0);
        assert_eq!(s.release(), 0);

        assert_eq!(s.advance(20_000), 0);
        assert_eq!(s.state(), before);
    }

    #[test]
    fn release_of_stopped_scheduler_is_silent() {
        let mut s = running(1);
        s.stop();
        assert_eq!(s.release(), 0);
    }
}

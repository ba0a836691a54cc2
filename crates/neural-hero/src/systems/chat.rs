//! Floating chat widget with a canned reply.
//!
//! Nothing leaves the page: a submission shows the thinking line and a
//! timer swaps in the fixed reply.

use crate::api::config::ChatConfig;
use crate::api::types::Lifecycle;
use crate::core::timer::{TimerId, TimerService};

const TIMER_REPLY: &str = "chat.reply";

pub struct ChatWidget {
    config: ChatConfig,
    timers: TimerService<()>,
    open: bool,
    reply: String,
    pending: Option<TimerId>,
    submissions: u32,
    lifecycle: Lifecycle,
}

impl ChatWidget {
    pub fn new(config: ChatConfig) -> Self {
        let reply = config.greeting.clone();
        Self {
            config,
            timers: TimerService::new(),
            open: false,
            reply,
            pending: None,
            submissions: 0,
            lifecycle: Lifecycle::Mounted,
        }
    }

    /// Open or close the panel. Returns the new open state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Submit a message. Empty input is ignored and returns false.
    ///
    /// A submission while a reply is pending restarts the delay.
    pub fn submit(&mut self, text: &str) -> bool {
        if self.lifecycle == Lifecycle::TornDown || text.is_empty() {
            return false;
        }
        if let Some(id) = self.pending.take() {
            self.timers.cancel(id);
        }
        self.reply = self.config.thinking.clone();
        self.pending = Some(self.timers.schedule_once(TIMER_REPLY, self.config.reply_delay_ms, ()));
        self.submissions += 1;
        log::debug!("chat: message {} submitted", self.submissions);
        true
    }

    /// Advance the widget's clock. Returns true if the reply landed.
    pub fn advance(&mut self, dt_ms: u64) -> bool {
        if self.lifecycle == Lifecycle::TornDown {
            return false;
        }
        let until = self.timers.now_ms().saturating_add(dt_ms);
        let mut landed = false;
        while let Some(fired) = self.timers.poll(until) {
            if self.pending == Some(fired.id) {
                self.pending = None;
                self.reply = self.config.reply.clone();
                landed = true;
            }
        }
        self.timers.settle(until);
        landed
    }

    /// Text currently shown in the reply line.
    pub fn reply(&self) -> &str {
        &self.reply
    }

    pub fn is_thinking(&self) -> bool {
        self.pending.is_some()
    }

    pub fn submissions(&self) -> u32 {
        self.submissions
    }

    /// Cancel any pending reply. Idempotent; returns the timers cancelled.
    pub fn stop(&mut self) -> usize {
        if self.lifecycle == Lifecycle::TornDown {
            return 0;
        }
        self.lifecycle = Lifecycle::TornDown;
        self.pending = None;
        self.timers.cancel_all()
    }
}

impl Drop for ChatWidget {
    fn drop(&mut self) {
        self.stop();
    }
}

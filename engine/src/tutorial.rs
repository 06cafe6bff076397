//! Idle "swipe to navigate" hint.
//!
//! Reveals are scheduled at fixed offsets from mount. Each one only fires if
//! the user has been idle for (almost) the whole delay, so any interaction
//! after mount quietly cancels every reveal still ahead of it.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::timers::{TimerId, TimerQueue};

/// When and for how long the hint is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorialSchedule {
    pub enabled: bool,
    pub first_delay: Duration,
    pub first_duration: Duration,
    /// Further reveals, measured from mount.
    pub reveal_delays: Vec<Duration>,
    pub reveal_duration: Duration,
    /// Slack allowed between the last interaction and a reveal's delay.
    pub staleness_buffer: Duration,
}

impl Default for TutorialSchedule {
    fn default() -> Self {
        Self {
            enabled: true,
            first_delay: Duration::from_millis(500),
            first_duration: Duration::from_millis(3000),
            reveal_delays: vec![Duration::from_secs(10), Duration::from_secs(30)],
            reveal_duration: Duration::from_millis(4000),
            staleness_buffer: Duration::from_millis(100),
        }
    }
}

impl TutorialSchedule {
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TutorialTimer {
    Reveal { delay: Duration, lasts: Duration },
    Hide,
}

#[derive(Debug)]
pub struct TutorialScheduler {
    schedule: TutorialSchedule,
    timers: TimerQueue<TutorialTimer>,
    hide_timer: Option<TimerId>,
    last_interaction: Option<Instant>,
    visible: bool,
}

impl TutorialScheduler {
    #[must_use]
    pub fn new(schedule: TutorialSchedule) -> Self {
        Self {
            schedule,
            timers: TimerQueue::new(),
            hide_timer: None,
            last_interaction: None,
            visible: false,
        }
    }

    /// Start a fresh schedule from `now`, discarding anything pending.
    ///
    /// Returns true if a visible hint was hidden.
    pub fn mount(&mut self, now: Instant) -> bool {
        let was_visible = self.unmount();
        self.last_interaction = Some(now);

        if !self.schedule.enabled {
            return was_visible;
        }

        self.timers.schedule(
            now,
            self.schedule.first_delay,
            TutorialTimer::Reveal {
                delay: self.schedule.first_delay,
                lasts: self.schedule.first_duration,
            },
        );
        for &delay in &self.schedule.reveal_delays {
            self.timers.schedule(
                now,
                delay,
                TutorialTimer::Reveal {
                    delay,
                    lasts: self.schedule.reveal_duration,
                },
            );
        }
        debug!(pending = self.timers.len(), "Tutorial schedule mounted");
        was_visible
    }

    /// Cancel everything pending and hide the hint.
    ///
    /// Returns true if a visible hint was hidden.
    pub fn unmount(&mut self) -> bool {
        self.timers.clear();
        self.hide_timer = None;
        std::mem::replace(&mut self.visible, false)
    }

    /// Returns true if a visible hint was hidden.
    pub fn record_interaction(&mut self, now: Instant) -> bool {
        self.last_interaction = Some(now);
        if !self.visible {
            return false;
        }
        self.visible = false;
        if let Some(id) = self.hide_timer.take() {
            self.timers.cancel(id);
        }
        true
    }

    /// Fire due timers, reporting each visibility change in order.
    pub fn tick(&mut self, now: Instant, mut on_change: impl FnMut(bool)) {
        while let Some(fired) = self.timers.pop_due(now) {
            match fired.key {
                TutorialTimer::Reveal { delay, lasts } => {
                    if !self.is_idle_for(fired.deadline, delay) {
                        debug!(?delay, "Tutorial reveal skipped after recent interaction");
                        continue;
                    }
                    if let Some(id) = self.hide_timer.take() {
                        self.timers.cancel(id);
                    }
                    self.hide_timer =
                        Some(self.timers.schedule(fired.deadline, lasts, TutorialTimer::Hide));
                    if !self.visible {
                        self.visible = true;
                        on_change(true);
                    }
                }
                TutorialTimer::Hide => {
                    self.hide_timer = None;
                    if self.visible {
                        self.visible = false;
                        on_change(false);
                    }
                }
            }
        }
    }

    fn is_idle_for(&self, at: Instant, delay: Duration) -> bool {
        let Some(last) = self.last_interaction else {
            return true;
        };
        at.saturating_duration_since(last) >= delay.saturating_sub(self.schedule.staleness_buffer)
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    #[must_use]
    pub fn last_interaction(&self) -> Option<Instant> {
        self.last_interaction
    }
}

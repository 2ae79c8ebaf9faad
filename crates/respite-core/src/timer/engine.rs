//! Work/break timer state machine.
//!
//! The engine is a pure state machine. It does not use internal threads or
//! timers -- the caller invokes `tick()` once per elapsed second while the
//! countdown is running.
//!
//! ## Mode transitions
//!
//! ```text
//! Work -> BreakPrompt -> Break -> Work -> ...
//! ```
//!
//! A finished work interval parks the machine in `BreakPrompt` until the
//! user acknowledges it; `confirm_break()` is the only transition that
//! starts a countdown by itself.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Work,
    BreakPrompt,
    Break,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Work => "WORK",
            Mode::BreakPrompt => "BREAK_PROMPT",
            Mode::Break => "BREAK",
        }
    }
}

/// Configured work and break interval lengths, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    pub work_secs: u64,
    pub break_secs: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_secs: 25 * 60,
            break_secs: 10 * 60,
        }
    }
}

/// Work/break countdown state machine.
///
/// None of its operations can fail: invalid calls are silently ignored and
/// out-of-range input is clamped, never rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    config: TimerConfig,
    mode: Mode,
    remaining_secs: u64,
    running: bool,
    /// Display name used when prompting for a break.
    user_name: String,
}

impl TimerEngine {
    /// Create an engine in Work mode, paused at the configured work duration.
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            mode: Mode::Work,
            remaining_secs: config.work_secs,
            running: false,
            user_name: String::new(),
        }
    }

    pub fn with_user_name(mut self, name: impl Into<String>) -> Self {
        self.user_name = name.into();
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn config(&self) -> TimerConfig {
        self.config
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            running: self.running,
            work_secs: self.config.work_secs,
            break_secs: self.config.break_secs,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Edit the work duration. Only honored while stopped in Work mode;
    /// negative input is clamped to zero.
    pub fn configure(&mut self, minutes: i64, seconds: i64) -> Option<Event> {
        if self.running || self.mode != Mode::Work {
            return None;
        }
        let minutes = minutes.max(0) as u64;
        let seconds = seconds.max(0) as u64;
        self.config.work_secs = minutes.saturating_mul(60).saturating_add(seconds);
        self.remaining_secs = self.config.work_secs;
        Some(Event::TimerConfigured {
            work_secs: self.config.work_secs,
            at: Utc::now(),
        })
    }

    /// Start or pause the countdown.
    ///
    /// Starting recaptures `remaining` from the configured duration for the
    /// current mode and refuses to start a zero-length interval. The break
    /// prompt cannot be started past -- it must be confirmed explicitly.
    pub fn toggle(&mut self) -> Option<Event> {
        if self.running {
            self.running = false;
            return Some(Event::TimerPaused {
                remaining_secs: self.remaining_secs,
                at: Utc::now(),
            });
        }
        self.remaining_secs = match self.mode {
            Mode::Work => self.config.work_secs,
            Mode::Break => self.config.break_secs,
            Mode::BreakPrompt => return None,
        };
        if self.remaining_secs == 0 {
            return None;
        }
        self.running = true;
        Some(Event::TimerStarted {
            mode: self.mode,
            duration_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// One elapsed second. No-op unless running; fires the interval-end
    /// transition exactly once when the countdown reaches zero.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }
        // Stop before notifying so a late tick cannot re-fire the transition.
        self.running = false;
        let event = match self.mode {
            Mode::Work => {
                self.mode = Mode::BreakPrompt;
                Event::BreakPrompted {
                    user_name: self.user_name.clone(),
                    at: Utc::now(),
                }
            }
            // `running` is never set in BreakPrompt, so this arm is Break.
            _ => {
                self.mode = Mode::Work;
                self.remaining_secs = self.config.work_secs;
                Event::BreakEnded { at: Utc::now() }
            }
        };
        Some(event)
    }

    /// Acknowledge the break prompt and start the break countdown -- the one
    /// auto-starting transition in the machine.
    pub fn confirm_break(&mut self) -> Option<Event> {
        if self.mode != Mode::BreakPrompt {
            return None;
        }
        self.mode = Mode::Break;
        self.remaining_secs = self.config.break_secs;
        if self.remaining_secs > 0 {
            self.running = true;
        }
        Some(Event::BreakStarted {
            duration_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn engine(work_secs: u64, break_secs: u64) -> TimerEngine {
        TimerEngine::new(TimerConfig {
            work_secs,
            break_secs,
        })
    }

    #[test]
    fn starts_paused_in_work_mode() {
        let e = engine(25 * 60, 10 * 60);
        assert_eq!(e.mode(), Mode::Work);
        assert_eq!(e.remaining_secs(), 25 * 60);
        assert!(!e.is_running());
    }

    #[test]
    fn toggle_starts_and_pauses() {
        let mut e = engine(60, 30);
        assert!(matches!(e.toggle(), Some(Event::TimerStarted { .. })));
        assert!(e.is_running());
        assert!(matches!(e.toggle(), Some(Event::TimerPaused { .. })));
        assert!(!e.is_running());
    }

    #[test]
    fn toggle_refuses_zero_length_interval() {
        let mut e = engine(0, 30);
        assert!(e.toggle().is_none());
        assert!(!e.is_running());

        let mut e = engine(60, 30);
        e.configure(0, 0);
        assert!(e.toggle().is_none());
        assert!(!e.is_running());
    }

    #[test]
    fn toggle_is_ignored_in_break_prompt() {
        let mut e = engine(1, 30);
        e.toggle();
        e.tick();
        assert_eq!(e.mode(), Mode::BreakPrompt);
        assert!(e.toggle().is_none());
        assert!(!e.is_running());
    }

    #[test]
    fn configure_clamps_negative_input() {
        let mut e = engine(60, 30);
        e.configure(-5, -10);
        assert_eq!(e.remaining_secs(), 0);
        e.configure(-1, 30);
        assert_eq!(e.remaining_secs(), 30);
    }

    #[test]
    fn configure_is_ignored_while_running_or_outside_work() {
        let mut e = engine(60, 30);
        e.toggle();
        assert!(e.configure(5, 0).is_none());
        assert_eq!(e.remaining_secs(), 60);

        let mut e = engine(1, 30);
        e.toggle();
        e.tick();
        assert_eq!(e.mode(), Mode::BreakPrompt);
        assert!(e.configure(5, 0).is_none());
    }

    #[test]
    fn work_interval_ends_in_break_prompt() {
        // Scenario: configure work to 0m01s, start, let one tick elapse.
        let mut e = engine(25 * 60, 600);
        e.configure(0, 1);
        e.toggle();
        let event = e.tick();
        assert!(matches!(event, Some(Event::BreakPrompted { .. })));
        assert_eq!(e.mode(), Mode::BreakPrompt);
        assert!(!e.is_running());
    }

    #[test]
    fn interval_end_fires_exactly_once() {
        let mut e = engine(1, 30);
        e.toggle();
        assert!(e.tick().is_some());
        // Late ticks after the zero-crossing are no-ops.
        assert!(e.tick().is_none());
        assert!(e.tick().is_none());
        assert_eq!(e.mode(), Mode::BreakPrompt);
    }

    #[test]
    fn confirm_break_auto_starts() {
        // Scenario: in BreakPrompt, confirm with a 10m break.
        let mut e = engine(1, 600);
        e.toggle();
        e.tick();
        let event = e.confirm_break();
        assert!(matches!(
            event,
            Some(Event::BreakStarted {
                duration_secs: 600,
                ..
            })
        ));
        assert_eq!(e.mode(), Mode::Break);
        assert_eq!(e.remaining_secs(), 600);
        assert!(e.is_running());
    }

    #[test]
    fn confirm_break_is_ignored_outside_prompt() {
        let mut e = engine(60, 30);
        assert!(e.confirm_break().is_none());
        assert_eq!(e.mode(), Mode::Work);
    }

    #[test]
    fn zero_length_break_changes_mode_without_starting() {
        let mut e = engine(1, 0);
        e.toggle();
        e.tick();
        e.confirm_break();
        assert_eq!(e.mode(), Mode::Break);
        assert!(!e.is_running());
    }

    #[test]
    fn break_end_returns_to_work_paused() {
        let mut e = engine(2, 1);
        e.toggle();
        e.tick();
        e.tick();
        e.confirm_break();
        let event = e.tick();
        assert!(matches!(event, Some(Event::BreakEnded { .. })));
        assert_eq!(e.mode(), Mode::Work);
        assert_eq!(e.remaining_secs(), 2);
        assert!(!e.is_running());
    }

    #[test]
    fn full_cycle_mode_sequence() {
        let mut e = engine(1, 1);
        assert_eq!(e.mode(), Mode::Work);
        e.toggle();
        e.tick();
        assert_eq!(e.mode(), Mode::BreakPrompt);
        assert!(!e.is_running());
        e.confirm_break();
        assert_eq!(e.mode(), Mode::Break);
        assert!(e.is_running());
        e.tick();
        assert_eq!(e.mode(), Mode::Work);
        assert!(!e.is_running());
    }

    #[test]
    fn break_prompt_carries_user_name() {
        let mut e = engine(1, 30).with_user_name("Dana");
        e.toggle();
        match e.tick() {
            Some(Event::BreakPrompted { user_name, .. }) => assert_eq!(user_name, "Dana"),
            other => panic!("expected BreakPrompted, got {other:?}"),
        }
    }

    proptest! {
        #[test]
        fn configure_yields_exact_seconds(m in 0i64..1_000, s in 0i64..10_000) {
            let mut e = engine(60, 30);
            e.configure(m, s);
            prop_assert_eq!(e.remaining_secs(), (m * 60 + s) as u64);
        }
    }
}

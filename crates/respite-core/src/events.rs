use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::playback::PlaybackSnapshot;
use crate::tasks::Task;
use crate::timer::Mode;

/// Every state change in the system produces an Event.
/// The presentation layer consumes these; it never reaches into the
/// components directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: Mode,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// The work duration was edited while the countdown was stopped.
    TimerConfigured {
        work_secs: u64,
        at: DateTime<Utc>,
    },
    /// A work interval finished; the break must be acknowledged before it
    /// begins. Carries the display name so the prompt can address the user.
    BreakPrompted {
        user_name: String,
        at: DateTime<Utc>,
    },
    /// The break prompt was acknowledged and the break countdown started.
    BreakStarted {
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// A break finished; back to work, paused at the configured duration.
    BreakEnded {
        at: DateTime<Utc>,
    },
    PlaybackUpdated {
        snapshot: PlaybackSnapshot,
        at: DateTime<Utc>,
    },
    TasksUpdated {
        tasks: Vec<Task>,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: Mode,
        remaining_secs: u64,
        running: bool,
        work_secs: u64,
        break_secs: u64,
        at: DateTime<Utc>,
    },
}

mod engine;

pub use engine::{Mode, TimerConfig, TimerEngine};

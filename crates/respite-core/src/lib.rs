//! # Respite Core Library
//!
//! Core logic for Respite, a personal productivity timer that alternates
//! focused work intervals with enforced breaks, keeps an ad-hoc task list,
//! and remote-controls Spotify playback while you work. All operations are
//! available through this library; the CLI binary is a thin presentation
//! layer over it.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a pure work/break state machine with no internal
//!   threads -- the caller invokes `tick()` once per elapsed second
//! - **Playback**: implicit-grant credential handling and a polled
//!   currently-playing snapshot with transport controls
//! - **Storage**: SQLite key-value store for profile and tasks, TOML-based
//!   configuration for the interval durations
//! - **Runtime**: a single-threaded session loop interleaving timer ticks,
//!   playback polls and user intents
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: work/break countdown state machine
//! - [`PlaybackController`]: credential lifecycle and transport commands
//! - [`Store`] / [`Config`]: persistence
//! - [`Session`]: the cooperative event loop

pub mod error;
pub mod events;
pub mod integrations;
pub mod playback;
pub mod runtime;
pub mod storage;
pub mod tasks;
pub mod timer;

pub use error::{AuthError, ConfigError, CoreError, PlaybackError, StoreError};
pub use events::Event;
pub use playback::{PlaybackController, PlaybackSnapshot, SkipDirection, POLL_INTERVAL};
pub use runtime::{Intent, Session};
pub use storage::{Config, Store};
pub use tasks::{Task, TaskList};
pub use timer::{Mode, TimerConfig, TimerEngine};

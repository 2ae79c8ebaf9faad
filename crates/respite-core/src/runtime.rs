//! Cooperative session loop driving the timer and the playback poll.
//!
//! Everything runs on one task: the one-second countdown tick, the playback
//! poll and inbound user intents interleave through a single `select!` loop,
//! so each handler runs to completion (persistence writes included) before
//! the next one starts. The timer never waits on the network; only playback
//! calls suspend.

use tokio::sync::mpsc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::warn;

use crate::events::Event;
use crate::playback::{PlaybackController, SkipDirection, POLL_INTERVAL};
use crate::storage::{Config, Store};
use crate::tasks::TaskList;
use crate::timer::TimerEngine;

/// A user intention forwarded from the presentation layer.
#[derive(Debug, Clone)]
pub enum Intent {
    ToggleTimer,
    ConfirmBreak,
    Configure { minutes: i64, seconds: i64 },
    TogglePlayback,
    Skip(SkipDirection),
    AddTask(String),
    ToggleTask(usize),
    DeleteTask(usize),
    Quit,
}

/// One interactive session: owns the engine, the playback controller and
/// the task list, and runs until the user quits.
pub struct Session {
    engine: TimerEngine,
    playback: PlaybackController,
    tasks: TaskList,
    store: Store,
    config: Config,
    intents: mpsc::Receiver<Intent>,
    events: mpsc::Sender<Event>,
}

impl Session {
    pub fn new(
        engine: TimerEngine,
        playback: PlaybackController,
        tasks: TaskList,
        store: Store,
        config: Config,
        intents: mpsc::Receiver<Intent>,
        events: mpsc::Sender<Event>,
    ) -> Self {
        Self {
            engine,
            playback,
            tasks,
            store,
            config,
            intents,
            events,
        }
    }

    /// Drive the session until a `Quit` intent arrives or the intent channel
    /// closes.
    pub async fn run(mut self) {
        let mut tick = interval(Duration::from_secs(1));
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut poll = interval(POLL_INTERVAL);
        poll.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // Initial paint for the presentation layer.
        self.emit(self.engine.snapshot()).await;
        self.emit_tasks().await;

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    let was_running = self.engine.is_running();
                    if let Some(event) = self.engine.tick() {
                        self.emit(event).await;
                    }
                    if was_running {
                        self.emit(self.engine.snapshot()).await;
                    }
                }
                _ = poll.tick() => {
                    // Polling stops implicitly with the credential.
                    if self.playback.is_authorized() {
                        let snapshot = self.playback.refresh_snapshot().await.clone();
                        self.emit(Event::PlaybackUpdated {
                            snapshot,
                            at: chrono::Utc::now(),
                        })
                        .await;
                    }
                }
                intent = self.intents.recv() => {
                    match intent {
                        Some(Intent::Quit) | None => break,
                        Some(intent) => self.handle_intent(intent).await,
                    }
                }
            }
        }
    }

    async fn handle_intent(&mut self, intent: Intent) {
        match intent {
            Intent::ToggleTimer => {
                if let Some(event) = self.engine.toggle() {
                    self.emit(event).await;
                }
            }
            Intent::ConfirmBreak => {
                if let Some(event) = self.engine.confirm_break() {
                    self.emit(event).await;
                }
            }
            Intent::Configure { minutes, seconds } => {
                if let Some(event) = self.engine.configure(minutes, seconds) {
                    // Committed durations survive restarts.
                    self.config.set_work_duration(self.engine.config().work_secs);
                    if let Err(e) = self.config.save() {
                        warn!("failed to persist timer config: {e}");
                    }
                    self.emit(event).await;
                }
            }
            Intent::TogglePlayback => {
                self.playback.toggle_play_pause().await;
                self.emit_playback().await;
            }
            Intent::Skip(direction) => {
                self.playback.skip(direction).await;
                self.emit_playback().await;
            }
            Intent::AddTask(text) => {
                match self.tasks.add(&self.store, &text) {
                    Ok(true) => self.emit_tasks().await,
                    Ok(false) => {}
                    Err(e) => warn!("failed to persist task list: {e}"),
                }
            }
            Intent::ToggleTask(index) => {
                match self.tasks.toggle(&self.store, index) {
                    Ok(true) => self.emit_tasks().await,
                    Ok(false) => {}
                    Err(e) => warn!("failed to persist task list: {e}"),
                }
            }
            Intent::DeleteTask(index) => {
                match self.tasks.delete(&self.store, index) {
                    Ok(true) => self.emit_tasks().await,
                    Ok(false) => {}
                    Err(e) => warn!("failed to persist task list: {e}"),
                }
            }
            // Handled by the loop.
            Intent::Quit => {}
        }
    }

    async fn emit(&self, event: Event) {
        // A closed event channel means the presentation side is gone; the
        // loop will wind down on the next intent-channel close.
        let _ = self.events.send(event).await;
    }

    async fn emit_playback(&self) {
        let snapshot = self.playback.snapshot().clone();
        self.emit(Event::PlaybackUpdated {
            snapshot,
            at: chrono::Utc::now(),
        })
        .await;
    }

    async fn emit_tasks(&self) {
        self.emit(Event::TasksUpdated {
            tasks: self.tasks.tasks().to_vec(),
            at: chrono::Utc::now(),
        })
        .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrations::MemoryTokenStore;
    use crate::timer::{Mode, TimerConfig};

    fn spawn_session(
        config: TimerConfig,
    ) -> (mpsc::Sender<Intent>, mpsc::Receiver<Event>) {
        let store = Store::open_memory().unwrap();
        let tasks = TaskList::load(&store).unwrap();
        let engine = TimerEngine::new(config).with_user_name("Dana");
        let playback = PlaybackController::new(Box::<MemoryTokenStore>::default());
        let (intent_tx, intent_rx) = mpsc::channel(16);
        let (event_tx, event_rx) = mpsc::channel(64);
        let session = Session::new(
            engine,
            playback,
            tasks,
            store,
            Config::default(),
            intent_rx,
            event_tx,
        );
        tokio::spawn(session.run());
        (intent_tx, event_rx)
    }

    async fn next_event(events: &mut mpsc::Receiver<Event>) -> Event {
        events.recv().await.expect("event channel closed")
    }

    #[tokio::test(start_paused = true)]
    async fn one_second_work_interval_prompts_for_break() {
        let (intents, mut events) = spawn_session(TimerConfig {
            work_secs: 1,
            break_secs: 600,
        });

        intents.send(Intent::ToggleTimer).await.unwrap();

        loop {
            match next_event(&mut events).await {
                Event::BreakPrompted { user_name, .. } => {
                    assert_eq!(user_name, "Dana");
                    break;
                }
                Event::StateSnapshot { mode, .. } => {
                    assert_ne!(mode, Mode::Break);
                }
                _ => {}
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn confirmed_break_runs_and_returns_to_work() {
        let (intents, mut events) = spawn_session(TimerConfig {
            work_secs: 1,
            break_secs: 2,
        });

        intents.send(Intent::ToggleTimer).await.unwrap();
        loop {
            if matches!(next_event(&mut events).await, Event::BreakPrompted { .. }) {
                break;
            }
        }

        intents.send(Intent::ConfirmBreak).await.unwrap();
        loop {
            match next_event(&mut events).await {
                Event::BreakStarted { duration_secs, .. } => {
                    assert_eq!(duration_secs, 2);
                    break;
                }
                _ => {}
            }
        }
        loop {
            if matches!(next_event(&mut events).await, Event::BreakEnded { .. }) {
                break;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn task_mutations_emit_updates() {
        let (intents, mut events) = spawn_session(TimerConfig::default());

        intents
            .send(Intent::AddTask("Write report".into()))
            .await
            .unwrap();

        loop {
            if let Event::TasksUpdated { tasks, .. } = next_event(&mut events).await {
                if !tasks.is_empty() {
                    assert_eq!(tasks[0].text, "Write report");
                    assert!(!tasks[0].completed);
                    break;
                }
            }
        }

        intents.send(Intent::ToggleTask(0)).await.unwrap();
        loop {
            if let Event::TasksUpdated { tasks, .. } = next_event(&mut events).await {
                if tasks.first().is_some_and(|t| t.completed) {
                    break;
                }
            }
        }
    }
}

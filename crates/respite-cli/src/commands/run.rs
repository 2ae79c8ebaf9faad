//! Interactive session: countdown display, break prompts, task list and
//! playback panel, driven by line-based commands on stdin.

use std::io::Write;

use respite_core::events::Event;
use respite_core::integrations::KeyringTokenStore;
use respite_core::playback::{PlaybackController, SkipDirection};
use respite_core::runtime::{Intent, Session};
use respite_core::storage::{Config, Store};
use respite_core::tasks::TaskList;
use respite_core::timer::{Mode, TimerEngine};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use super::{playback, profile};

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let user_name = profile::ensure(&store)?;

    let config = Config::load_or_default();
    let engine = TimerEngine::new(config.timer_config()).with_user_name(&user_name);
    let controller = PlaybackController::new(Box::new(KeyringTokenStore));
    if !controller.is_authorized() {
        println!("playback: not connected (run `respite-cli auth login` to link Spotify)");
    }
    let tasks = TaskList::load(&store)?;

    let (intent_tx, intent_rx) = mpsc::channel(32);
    let (event_tx, mut event_rx) = mpsc::channel(64);
    let session = Session::new(
        engine,
        controller,
        tasks,
        store,
        config,
        intent_rx,
        event_tx,
    );
    let session_task = tokio::spawn(session.run());

    println!("hello {user_name}.");
    println!(
        "commands: start/pause (s) | break (b) | set <min> <sec> | play (p) | \
         next (n) | prev (v) | task add <text> | task done <i> | task del <i> | quit (q)"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            event = event_rx.recv() => {
                match event {
                    Some(event) => render(&event),
                    None => break,
                }
            }
            line = lines.next_line() => {
                let Ok(Some(line)) = line else {
                    let _ = intent_tx.send(Intent::Quit).await;
                    break;
                };
                let Some(intent) = parse_intent(&line) else {
                    if !line.trim().is_empty() {
                        println!("unrecognized command: {}", line.trim());
                    }
                    continue;
                };
                let quitting = matches!(intent, Intent::Quit);
                if intent_tx.send(intent).await.is_err() {
                    break;
                }
                if quitting {
                    break;
                }
            }
        }
    }

    let _ = session_task.await;
    Ok(())
}

/// Map a line of input onto a session intent.
fn parse_intent(line: &str) -> Option<Intent> {
    let mut parts = line.split_whitespace();
    match parts.next()? {
        "s" | "start" | "pause" => Some(Intent::ToggleTimer),
        "b" | "break" => Some(Intent::ConfirmBreak),
        // Countdown inputs: non-numeric or missing fields coerce to zero.
        "set" => {
            let minutes = parts.next().and_then(|v| v.parse().ok()).unwrap_or(0);
            let seconds = parts.next().and_then(|v| v.parse().ok()).unwrap_or(0);
            Some(Intent::Configure { minutes, seconds })
        }
        "p" | "play" => Some(Intent::TogglePlayback),
        "n" | "next" => Some(Intent::Skip(SkipDirection::Next)),
        "v" | "prev" => Some(Intent::Skip(SkipDirection::Previous)),
        "task" => match parts.next()? {
            "add" => {
                let text = parts.collect::<Vec<_>>().join(" ");
                Some(Intent::AddTask(text))
            }
            "done" | "toggle" => Some(Intent::ToggleTask(parts.next()?.parse().ok()?)),
            "del" | "delete" => Some(Intent::DeleteTask(parts.next()?.parse().ok()?)),
            _ => None,
        },
        "q" | "quit" => Some(Intent::Quit),
        _ => None,
    }
}

fn render(event: &Event) {
    match event {
        Event::StateSnapshot {
            mode,
            remaining_secs,
            running,
            ..
        } => {
            let marker = if *running { ">" } else { "=" };
            print!(
                "\r[{}] {:02}:{:02} {marker} ",
                mode.label(),
                remaining_secs / 60,
                remaining_secs % 60
            );
            let _ = std::io::stdout().flush();
        }
        Event::TimerStarted { mode, .. } => match mode {
            Mode::Work => println!("focus started."),
            _ => println!("break started."),
        },
        Event::TimerPaused { remaining_secs, .. } => {
            println!(
                "\npaused at {:02}:{:02}. durations are editable again.",
                remaining_secs / 60,
                remaining_secs % 60
            );
        }
        Event::TimerConfigured { work_secs, .. } => {
            println!(
                "work duration set to {:02}:{:02}",
                work_secs / 60,
                work_secs % 60
            );
        }
        Event::BreakPrompted { user_name, .. } => {
            println!("\nTAKE A BREAK {}", user_name.to_uppercase());
            println!("press 'b' when you are ready to start it.");
        }
        Event::BreakStarted { duration_secs, .. } => {
            println!(
                "break running: {:02}:{:02}",
                duration_secs / 60,
                duration_secs % 60
            );
        }
        Event::BreakEnded { .. } => {
            println!("\nbreak over -- back to work. press 's' to start focusing.");
        }
        Event::PlaybackUpdated { snapshot, .. } => {
            println!("\n{}", playback::describe(snapshot));
        }
        Event::TasksUpdated { tasks, .. } => {
            println!();
            if tasks.is_empty() {
                println!("tasks: none");
            } else {
                for (index, task) in tasks.iter().enumerate() {
                    let mark = if task.completed { "x" } else { " " };
                    println!("{index:>3} [{mark}] {}", task.text);
                }
            }
        }
    }
}

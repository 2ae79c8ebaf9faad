use clap::Subcommand;
use respite_core::error::AuthError;
use respite_core::integrations::KeyringTokenStore;
use respite_core::playback::{PlaybackController, PlaybackSnapshot, SkipDirection};

#[derive(Subcommand)]
pub enum PlaybackAction {
    /// Show what is currently playing
    Status,
    /// Toggle play/pause
    Toggle,
    /// Skip to the next item
    Next,
    /// Skip to the previous item
    Prev,
}

pub async fn run(action: PlaybackAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut controller = PlaybackController::new(Box::new(KeyringTokenStore));
    if !controller.is_authorized() {
        return Err(AuthError::NotAuthorized.into());
    }

    match action {
        PlaybackAction::Status => {
            controller.refresh_snapshot().await;
        }
        PlaybackAction::Toggle => {
            // Seed the snapshot first so the toggle acts on current state.
            controller.refresh_snapshot().await;
            controller.toggle_play_pause().await;
        }
        PlaybackAction::Next => controller.skip(SkipDirection::Next).await,
        PlaybackAction::Prev => controller.skip(SkipDirection::Previous).await,
    }

    println!("{}", describe(controller.snapshot()));
    Ok(())
}

/// One-line rendering of a playback snapshot.
pub fn describe(snapshot: &PlaybackSnapshot) -> String {
    match snapshot {
        PlaybackSnapshot::Disconnected => {
            "not connected -- run `respite-cli auth login`".to_string()
        }
        PlaybackSnapshot::SessionExpired => {
            "session expired -- please log in again".to_string()
        }
        PlaybackSnapshot::Idle => "no song playing".to_string(),
        PlaybackSnapshot::Track {
            name,
            artists,
            playing,
        } => {
            let state = if *playing { "playing" } else { "paused" };
            format!("{name} -- {} [{state}]", artists.join(", "))
        }
    }
}

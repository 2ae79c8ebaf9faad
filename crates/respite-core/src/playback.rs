//! Remote playback control, loosely coupled to the timer.
//!
//! The controller owns the bearer credential for the streaming service,
//! keeps the most recently polled snapshot of what is playing, and issues
//! transport commands. Failures never escape this module: a rejected
//! credential surfaces as a `SessionExpired` snapshot and transient
//! transport failures leave the previous snapshot in place until the next
//! poll retries naturally.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{AuthError, PlaybackError};
use crate::integrations::auth::{self, AuthConfig};
use crate::integrations::spotify::{PlayerApi, PlayerReading};
use crate::integrations::TokenStore;

/// How often the currently-playing snapshot is refreshed while authorized.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Grace period before re-reading state after a transport command; the
/// remote service applies commands asynchronously.
const COMMAND_SETTLE_DELAY: Duration = Duration::from_millis(500);

/// The most recently observed playback state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PlaybackSnapshot {
    /// No credential held; playback controls are inert.
    Disconnected,
    /// The remote service rejected the credential; the user must
    /// re-authorize from scratch.
    SessionExpired,
    /// Authorized, but nothing is currently playing.
    Idle,
    Track {
        name: String,
        artists: Vec<String>,
        playing: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipDirection {
    Next,
    Previous,
}

/// Credential lifecycle: UNAUTHENTICATED -> (authorization completes) ->
/// AUTHENTICATED -> (remote rejects) -> UNAUTHENTICATED. Nothing else moves
/// it.
pub struct PlaybackController {
    api: PlayerApi,
    tokens: Box<dyn TokenStore>,
    token: Option<String>,
    snapshot: PlaybackSnapshot,
}

impl PlaybackController {
    /// Load any persisted credential and start with a disconnected snapshot;
    /// the first poll fills it in.
    pub fn new(tokens: Box<dyn TokenStore>) -> Self {
        Self::with_api(PlayerApi::new(), tokens)
    }

    pub fn with_api(api: PlayerApi, tokens: Box<dyn TokenStore>) -> Self {
        let token = tokens.load();
        Self {
            api,
            tokens,
            token,
            snapshot: PlaybackSnapshot::Disconnected,
        }
    }

    pub fn is_authorized(&self) -> bool {
        self.token.is_some()
    }

    pub fn snapshot(&self) -> &PlaybackSnapshot {
        &self.snapshot
    }

    /// Open the remote authorization page in the user's browser.
    pub fn begin_authorization(&self, client_id: &str) -> Result<(), AuthError> {
        auth::begin_authorization(&AuthConfig::new(client_id))
    }

    /// Accept the redirect result handed over by the host environment and
    /// store the access token it carries. No state change when the token is
    /// absent. Returns whether a token was stored.
    pub fn complete_authorization(&mut self, redirect: &str) -> bool {
        let Some(token) = auth::token_from_redirect(redirect) else {
            return false;
        };
        if let Err(e) = self.tokens.save(&token) {
            warn!("failed to persist access token: {e}");
        }
        self.token = Some(token);
        true
    }

    /// Drop the credential without contacting the service.
    pub fn disconnect(&mut self) {
        self.token = None;
        self.snapshot = PlaybackSnapshot::Disconnected;
        if let Err(e) = self.tokens.clear() {
            warn!("failed to clear stored access token: {e}");
        }
    }

    /// Poll the currently playing item and update the snapshot.
    pub async fn refresh_snapshot(&mut self) -> &PlaybackSnapshot {
        let Some(token) = self.token.clone() else {
            self.snapshot = PlaybackSnapshot::Disconnected;
            return &self.snapshot;
        };
        match self.api.currently_playing(&token).await {
            Ok(PlayerReading::Track {
                name,
                artists,
                playing,
            }) => {
                self.snapshot = PlaybackSnapshot::Track {
                    name,
                    artists,
                    playing,
                };
            }
            Ok(PlayerReading::Nothing) => {
                self.snapshot = PlaybackSnapshot::Idle;
            }
            Err(PlaybackError::Unauthorized) => self.invalidate_credential(),
            Err(e) => {
                // Stale-but-available: keep the previous snapshot and let
                // the next scheduled poll retry.
                debug!("playback poll failed: {e}");
            }
        }
        &self.snapshot
    }

    /// Pause if the snapshot says something is playing, play otherwise.
    pub async fn toggle_play_pause(&mut self) {
        let Some(token) = self.token.clone() else {
            return;
        };
        let playing = matches!(
            self.snapshot,
            PlaybackSnapshot::Track { playing: true, .. }
        );
        let result = if playing {
            self.api.pause(&token).await
        } else {
            self.api.play(&token).await
        };
        self.settle_after_command(result).await;
    }

    /// Skip to the next or previous item.
    pub async fn skip(&mut self, direction: SkipDirection) {
        let Some(token) = self.token.clone() else {
            return;
        };
        let result = match direction {
            SkipDirection::Next => self.api.next(&token).await,
            SkipDirection::Previous => self.api.previous(&token).await,
        };
        self.settle_after_command(result).await;
    }

    async fn settle_after_command(&mut self, result: Result<(), PlaybackError>) {
        match result {
            Ok(()) => {}
            Err(PlaybackError::Unauthorized) => {
                self.invalidate_credential();
                return;
            }
            Err(e) => debug!("transport command failed: {e}"),
        }
        tokio::time::sleep(COMMAND_SETTLE_DELAY).await;
        self.refresh_snapshot().await;
    }

    /// The service rejected the token: it is gone for good. Clear it
    /// everywhere and stop pretending to be connected; polling is skipped
    /// from here on until a fresh authorization.
    fn invalidate_credential(&mut self) {
        self.token = None;
        self.snapshot = PlaybackSnapshot::SessionExpired;
        if let Err(e) = self.tokens.clear() {
            warn!("failed to clear stored access token: {e}");
        }
    }
}

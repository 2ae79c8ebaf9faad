//! Spotify Web API player client.
//!
//! A thin wrapper over the five player endpoints the timer uses: read the
//! currently playing item and issue transport commands. Authorization is a
//! bearer token obtained through the implicit-grant flow in
//! [`super::auth`]; the client itself holds no credential state.

use reqwest::{Client, Method, StatusCode};
use serde_json::Value;

use crate::error::PlaybackError;

const API_BASE: &str = "https://api.spotify.com/v1";

/// What the player reported for the currently playing item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerReading {
    /// Nothing is playing (204, or a body without an item).
    Nothing,
    Track {
        name: String,
        artists: Vec<String>,
        playing: bool,
    },
}

pub struct PlayerApi {
    http: Client,
    base_url: String,
}

impl Default for PlayerApi {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerApi {
    pub fn new() -> Self {
        Self::with_base_url(API_BASE)
    }

    /// Point the client at a different base URL (tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// `GET /me/player/currently-playing`.
    pub async fn currently_playing(&self, token: &str) -> Result<PlayerReading, PlaybackError> {
        let resp = self
            .http
            .get(format!("{}/me/player/currently-playing", self.base_url))
            .bearer_auth(token)
            .send()
            .await?;
        match resp.status() {
            StatusCode::UNAUTHORIZED => Err(PlaybackError::Unauthorized),
            StatusCode::NO_CONTENT => Ok(PlayerReading::Nothing),
            StatusCode::OK => {
                let body: Value = resp.json().await?;
                Ok(parse_currently_playing(&body))
            }
            other => Err(PlaybackError::UnexpectedStatus(other.as_u16())),
        }
    }

    pub async fn play(&self, token: &str) -> Result<(), PlaybackError> {
        self.command(Method::PUT, "/me/player/play", token).await
    }

    pub async fn pause(&self, token: &str) -> Result<(), PlaybackError> {
        self.command(Method::PUT, "/me/player/pause", token).await
    }

    pub async fn next(&self, token: &str) -> Result<(), PlaybackError> {
        self.command(Method::POST, "/me/player/next", token).await
    }

    pub async fn previous(&self, token: &str) -> Result<(), PlaybackError> {
        self.command(Method::POST, "/me/player/previous", token).await
    }

    async fn command(
        &self,
        method: Method,
        path: &str,
        token: &str,
    ) -> Result<(), PlaybackError> {
        let resp = self
            .http
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(token)
            .send()
            .await?;
        match resp.status() {
            StatusCode::UNAUTHORIZED => Err(PlaybackError::Unauthorized),
            // 204 is the usual answer; 200 counts as success too.
            status if status.is_success() => Ok(()),
            other => Err(PlaybackError::UnexpectedStatus(other.as_u16())),
        }
    }
}

/// Pull track name, artist list and play state out of the player response.
fn parse_currently_playing(body: &Value) -> PlayerReading {
    let item = &body["item"];
    if item.is_null() {
        return PlayerReading::Nothing;
    }
    let name = item["name"].as_str().unwrap_or_default().to_string();
    let artists = item["artists"]
        .as_array()
        .map(|artists| {
            artists
                .iter()
                .filter_map(|artist| artist["name"].as_str())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();
    let playing = body["is_playing"].as_bool().unwrap_or(false);
    PlayerReading::Track {
        name,
        artists,
        playing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_track_with_ordered_artists() {
        let body = json!({
            "is_playing": true,
            "item": {
                "name": "Holiday",
                "artists": [{"name": "Green Day"}, {"name": "Someone Else"}],
            }
        });
        assert_eq!(
            parse_currently_playing(&body),
            PlayerReading::Track {
                name: "Holiday".into(),
                artists: vec!["Green Day".into(), "Someone Else".into()],
                playing: true,
            }
        );
    }

    #[test]
    fn body_without_item_is_nothing_playing() {
        assert_eq!(
            parse_currently_playing(&json!({"is_playing": false})),
            PlayerReading::Nothing
        );
        assert_eq!(
            parse_currently_playing(&json!({"is_playing": false, "item": null})),
            PlayerReading::Nothing
        );
    }

    #[test]
    fn missing_play_flag_defaults_to_paused() {
        let body = json!({"item": {"name": "x", "artists": []}});
        match parse_currently_playing(&body) {
            PlayerReading::Track { playing, .. } => assert!(!playing),
            other => panic!("expected a track, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn currently_playing_maps_statuses() {
        let mut server = mockito::Server::new_async().await;
        let api = PlayerApi::with_base_url(server.url());

        let unauthorized = server
            .mock("GET", "/me/player/currently-playing")
            .with_status(401)
            .create_async()
            .await;
        assert!(matches!(
            api.currently_playing("tok").await,
            Err(PlaybackError::Unauthorized)
        ));
        unauthorized.assert_async().await;

        server.reset_async().await;
        let empty = server
            .mock("GET", "/me/player/currently-playing")
            .with_status(204)
            .create_async()
            .await;
        assert_eq!(
            api.currently_playing("tok").await.unwrap(),
            PlayerReading::Nothing
        );
        empty.assert_async().await;
    }

    #[tokio::test]
    async fn transport_command_accepts_no_content() {
        let mut server = mockito::Server::new_async().await;
        let api = PlayerApi::with_base_url(server.url());

        let pause = server
            .mock("PUT", "/me/player/pause")
            .match_header("authorization", "Bearer tok")
            .with_status(204)
            .create_async()
            .await;
        api.pause("tok").await.unwrap();
        pause.assert_async().await;

        server.reset_async().await;
        let next = server
            .mock("POST", "/me/player/next")
            .with_status(502)
            .create_async()
            .await;
        assert!(matches!(
            api.next("tok").await,
            Err(PlaybackError::UnexpectedStatus(502))
        ));
        next.assert_async().await;
    }
}

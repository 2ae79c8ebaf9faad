//! Implicit-grant authorization against the Spotify accounts service.
//!
//! The flow never sees a client secret: the user's browser is sent to the
//! authorization endpoint and the service hands the access token back in the
//! URL fragment of the redirect target. There is no refresh token -- when
//! the credential expires, the whole flow restarts from the beginning.

use crate::error::AuthError;

const ACCOUNTS_AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";

/// Registered redirect target. Must match the app settings on the service
/// side exactly, trailing slash included.
const REDIRECT_URI: &str = "http://127.0.0.1:1420/";

const SCOPES: [&str; 3] = [
    "user-read-playback-state",
    "user-modify-playback-state",
    "user-read-currently-playing",
];

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub client_id: String,
}

impl AuthConfig {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
        }
    }

    /// Full authorization URL the browser is sent to.
    pub fn authorize_url(&self) -> String {
        format!(
            "{ACCOUNTS_AUTHORIZE_URL}?client_id={}&response_type=token&redirect_uri={}&scope={}",
            urlencoding::encode(&self.client_id),
            urlencoding::encode(REDIRECT_URI),
            urlencoding::encode(&SCOPES.join(" ")),
        )
    }
}

/// Open the authorization page in the user's browser. The token comes back
/// out-of-band, via the redirect the user pastes into `complete_authorization`.
pub fn begin_authorization(config: &AuthConfig) -> Result<(), AuthError> {
    open::that(config.authorize_url()).map_err(|e| AuthError::BrowserLaunch(e.to_string()))
}

/// Extract the access token from a redirect result.
///
/// Accepts either the full redirect URL
/// (`http://127.0.0.1:1420/#access_token=...&token_type=Bearer`) or the bare
/// fragment, with or without the leading `#`.
pub fn token_from_redirect(raw: &str) -> Option<String> {
    let fragment = match raw.rsplit_once('#') {
        Some((_, fragment)) => fragment,
        None => raw,
    };
    url::form_urlencoded::parse(fragment.as_bytes())
        .find(|(key, _)| key == "access_token")
        .map(|(_, value)| value.into_owned())
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorize_url_carries_fixed_flow_parameters() {
        let url = AuthConfig::new("client-123").authorize_url();
        assert!(url.starts_with("https://accounts.spotify.com/authorize?"));
        assert!(url.contains("client_id=client-123"));
        assert!(url.contains("response_type=token"));
        assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A1420%2F"));
        assert!(url.contains(
            "scope=user-read-playback-state%20user-modify-playback-state%20user-read-currently-playing"
        ));
    }

    #[test]
    fn token_from_full_redirect_url() {
        let raw = "http://127.0.0.1:1420/#access_token=abc123&token_type=Bearer&expires_in=3600";
        assert_eq!(token_from_redirect(raw).as_deref(), Some("abc123"));
    }

    #[test]
    fn token_from_bare_fragment() {
        assert_eq!(
            token_from_redirect("access_token=xyz&expires_in=3600").as_deref(),
            Some("xyz")
        );
        assert_eq!(
            token_from_redirect("#access_token=xyz").as_deref(),
            Some("xyz")
        );
    }

    #[test]
    fn missing_or_empty_token_yields_none() {
        assert!(token_from_redirect("http://127.0.0.1:1420/").is_none());
        assert!(token_from_redirect("state=abc&token_type=Bearer").is_none());
        assert!(token_from_redirect("access_token=&token_type=Bearer").is_none());
    }
}

//! Lobby server API: the five GET endpoints the lobby screen consumes.

use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument};

use crate::{Game, GameId, LobbyError};

/// Calls the lobby screen makes against the game server.
///
/// The server resolves the player from the session cookie, so none of the
/// calls carry an explicit player identity.
#[async_trait::async_trait]
pub trait LobbyApi: Send + Sync {
    /// `GET /create-game/{name}`.
    async fn create_game(&self, name: &str) -> Result<Game, LobbyError>;

    /// `GET /list-games`.
    async fn list_games(&self) -> Result<Vec<Game>, LobbyError>;

    /// `GET /get-player-game`. `None` when the player is not in a game.
    async fn player_game(&self) -> Result<Option<Game>, LobbyError>;

    /// `GET /join-game/{id}`.
    async fn join_game(&self, id: &GameId) -> Result<Game, LobbyError>;

    /// `GET /leave-game`. The response body is ignored.
    async fn leave_game(&self) -> Result<(), LobbyError>;
}

/// reqwest-backed lobby API client.
#[derive(Debug, Clone)]
pub struct HttpLobbyApi {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpLobbyApi {
    /// Creates a client for the server at `base_url`.
    ///
    /// The client keeps cookies between calls so the server sees one session.
    #[instrument(skip_all, fields(base_url = %base_url, timeout = ?timeout))]
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LobbyError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            error!(error = %e, "Invalid lobby server URL");
            LobbyError::endpoint(format!("{}: {}", base_url, e))
        })?;

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(|e| LobbyError::transport(format!("Failed to build HTTP client: {}", e)))?;

        info!("Created lobby API client");
        Ok(Self { base_url, client })
    }

    /// Returns the server base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds an endpoint URL, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, LobbyError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LobbyError::endpoint(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a GET and fails on non-success statuses.
    async fn get(&self, url: Url) -> Result<reqwest::Response, LobbyError> {
        debug!(url = %url, "Sending lobby request");
        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            debug!(error = %e, url = %url, "Lobby request failed to send");
            LobbyError::transport(e.to_string())
        })?;

        let status = response.status();
        debug!(status = %status, url = %url, "Lobby response received");
        if !status.is_success() {
            return Err(LobbyError::request(status.as_u16()));
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, LobbyError> {
        let response = self.get(url).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| LobbyError::decode(e.to_string()))
    }
}

#[async_trait::async_trait]
impl LobbyApi for HttpLobbyApi {
    #[instrument(skip(self))]
    async fn create_game(&self, name: &str) -> Result<Game, LobbyError> {
        let url = self.endpoint(&["create-game", name])?;
        self.get_json(url).await
    }

    #[instrument(skip(self))]
    async fn list_games(&self) -> Result<Vec<Game>, LobbyError> {
        let url = self.endpoint(&["list-games"])?;
        let games: Vec<Game> = self.get_json(url).await?;
        debug!(count = games.len(), "Listed games");
        Ok(games)
    }

    #[instrument(skip(self))]
    async fn player_game(&self) -> Result<Option<Game>, LobbyError> {
        let url = self.endpoint(&["get-player-game"])?;
        let body = self
            .get(url)
            .await?
            .text()
            .await
            .map_err(|e| LobbyError::transport(e.to_string()))?;

        // An empty body means the same as `null`.
        if body.trim().is_empty() {
            return Ok(None);
        }
        Ok(serde_json::from_str(&body)?)
    }

    #[instrument(skip(self), fields(game_id = %id))]
    async fn join_game(&self, id: &GameId) -> Result<Game, LobbyError> {
        let url = self.endpoint(&["join-game", id.as_str()])?;
        self.get_json(url).await
    }

    #[instrument(skip(self))]
    async fn leave_game(&self) -> Result<(), LobbyError> {
        let url = self.endpoint(&["leave-game"])?;
        self.get(url).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpLobbyApi {
        HttpLobbyApi::new(base, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn game_name_is_percent_encoded_as_one_segment() {
        let url = api("http://localhost:3000")
            .endpoint(&["create-game", "Friday night / 4 players?"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/create-game/Friday%20night%20%2F%204%20players%3F"
        );
    }

    #[test]
    fn endpoints_extend_a_base_path() {
        let url = api("http://example.com/lobby/").endpoint(&["list-games"]).unwrap();
        assert_eq!(url.as_str(), "http://example.com/lobby/list-games");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = HttpLobbyApi::new("not a url", Duration::from_secs(1));
        assert!(result.is_err());
    }
}

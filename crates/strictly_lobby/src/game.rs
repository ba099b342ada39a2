//! Game snapshot as reported by the lobby server.

use derive_getters::Getters;
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// Opaque game identifier.
///
/// Servers send either a string or any JSON number; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, From, Serialize, Deserialize)]
#[serde(from = "RawGameId", into = "String")]
pub struct GameId(String);

impl GameId {
    /// Creates an identifier from its textual form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GameId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<GameId> for String {
    fn from(id: GameId) -> Self {
        id.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawGameId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawGameId> for GameId {
    fn from(raw: RawGameId) -> Self {
        match raw {
            RawGameId::Text(text) => Self(text),
            RawGameId::Number(n) => Self(n.to_string()),
        }
    }
}

/// Read-only snapshot of one game, refreshed on every poll.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Game {
    /// Server-assigned identifier.
    id: GameId,
    /// Display name chosen at creation.
    name: String,
    /// Players currently seated.
    player_count: u32,
    /// Seat limit.
    max_players: u32,
    /// Server-defined state label (e.g. `waiting`, `in_progress`).
    status: String,
}

impl Game {
    /// Creates a game snapshot.
    pub fn new(
        id: impl Into<GameId>,
        name: impl Into<String>,
        player_count: u32,
        max_players: u32,
        status: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            player_count,
            max_players,
            status: status.into(),
        }
    }

    /// Seat occupancy as `player_count/max_players`.
    pub fn occupancy(&self) -> String {
        format!("{}/{}", self.player_count, self.max_players)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_string_and_numeric_ids() {
        let text: Game = serde_json::from_str(
            r#"{"id":"g1","name":"Foo","player_count":2,"max_players":4,"status":"waiting"}"#,
        )
        .unwrap();
        assert_eq!(text.id().as_str(), "g1");

        let numeric: Game = serde_json::from_str(
            r#"{"id":17,"name":"Bar","player_count":0,"max_players":2,"status":"waiting"}"#,
        )
        .unwrap();
        assert_eq!(numeric.id().as_str(), "17");
    }

    #[test]
    fn large_and_fractional_numeric_ids_are_kept_as_text() {
        let games: Vec<Game> = serde_json::from_str(
            r#"[{"id":18446744073709551615,"name":"Big","player_count":0,"max_players":2,"status":"waiting"},
                {"id":1.5,"name":"Half","player_count":0,"max_players":2,"status":"waiting"}]"#,
        )
        .unwrap();
        assert_eq!(games[0].id().as_str(), "18446744073709551615");
        assert_eq!(games[1].id().as_str(), "1.5");
    }

    #[test]
    fn missing_field_is_rejected() {
        let result = serde_json::from_str::<Game>(r#"{"id":"g1","name":"Foo"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn occupancy_formats_counts() {
        let game = Game::new("g1", "Foo", 2, 4, "waiting");
        assert_eq!(game.occupancy(), "2/4");
    }
}

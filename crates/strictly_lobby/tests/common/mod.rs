//! In-memory lobby server shared by the controller and screen tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use strictly_lobby::{Game, GameId, LobbyApi, LobbyError};

/// How a fake call should fail.
#[derive(Debug, Clone, Copy)]
pub enum Failure {
    /// Respond with this HTTP status.
    Status(u16),
    /// Never reach the server.
    Offline,
}

impl Failure {
    fn to_error(self) -> LobbyError {
        match self {
            Self::Status(code) => LobbyError::request(code),
            Self::Offline => LobbyError::transport("connection refused"),
        }
    }
}

#[derive(Debug, Default)]
struct FakeState {
    games: Vec<Game>,
    current: Option<GameId>,
    calls: Vec<String>,
    failures: HashMap<&'static str, Failure>,
    stalled: HashSet<&'static str>,
    next_id: u32,
}

/// Cloneable handle to an in-memory lobby; clones share state so a test can
/// keep one handle while the controller owns another.
#[derive(Debug, Clone, Default)]
pub struct FakeLobbyApi {
    state: Arc<Mutex<FakeState>>,
}

impl FakeLobbyApi {
    /// Creates a lobby with the given games and no current game.
    pub fn with_games(games: Vec<Game>) -> Self {
        let api = Self::default();
        api.state.lock().unwrap().games = games;
        api
    }

    /// Marks the player as seated in `id`.
    pub fn set_current(&self, id: Option<&str>) {
        self.state.lock().unwrap().current = id.map(GameId::from);
    }

    /// Replaces the game list.
    pub fn set_games(&self, games: Vec<Game>) {
        self.state.lock().unwrap().games = games;
    }

    /// Makes `call` (e.g. `"join-game"`) fail until cleared.
    pub fn fail(&self, call: &'static str, failure: Failure) {
        self.state.lock().unwrap().failures.insert(call, failure);
    }

    /// Lets `call` succeed again.
    pub fn recover(&self, call: &'static str) {
        self.state.lock().unwrap().failures.remove(call);
    }

    /// Makes `call` hang forever, like a server that never answers. A hung
    /// call is never recorded.
    pub fn stall(&self, call: &'static str) {
        self.state.lock().unwrap().stalled.insert(call);
    }

    async fn wait_if_stalled(&self, call: &'static str) {
        let stalled = self.state.lock().unwrap().stalled.contains(call);
        if stalled {
            std::future::pending::<()>().await;
        }
    }

    /// Every call made so far, in order, e.g. `"create-game:Foo"`.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Forgets recorded calls.
    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    /// Number of recorded calls to `call`.
    pub fn count(&self, call: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.split(':').next() == Some(call))
            .count()
    }

    fn record(&self, call: &'static str, arg: Option<&str>) -> Result<(), LobbyError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(match arg {
            Some(arg) => format!("{}:{}", call, arg),
            None => call.to_string(),
        });
        match state.failures.get(call) {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl LobbyApi for FakeLobbyApi {
    async fn create_game(&self, name: &str) -> Result<Game, LobbyError> {
        self.wait_if_stalled("create-game").await;
        self.record("create-game", Some(name))?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let game = Game::new(format!("new{}", state.next_id), name, 1, 4, "waiting");
        state.current = Some(game.id().clone());
        state.games.push(game.clone());
        Ok(game)
    }

    async fn list_games(&self) -> Result<Vec<Game>, LobbyError> {
        self.wait_if_stalled("list-games").await;
        self.record("list-games", None)?;
        Ok(self.state.lock().unwrap().games.clone())
    }

    async fn player_game(&self) -> Result<Option<Game>, LobbyError> {
        self.wait_if_stalled("get-player-game").await;
        self.record("get-player-game", None)?;
        let state = self.state.lock().unwrap();
        Ok(state
            .current
            .as_ref()
            .and_then(|id| state.games.iter().find(|g| g.id() == id).cloned()))
    }

    async fn join_game(&self, id: &GameId) -> Result<Game, LobbyError> {
        self.wait_if_stalled("join-game").await;
        self.record("join-game", Some(id.as_str()))?;
        let mut state = self.state.lock().unwrap();
        let position = state
            .games
            .iter()
            .position(|g| g.id() == id)
            .ok_or_else(|| LobbyError::request(404))?;
        let old = state.games[position].clone();
        let joined = Game::new(
            old.id().clone(),
            old.name().clone(),
            old.player_count() + 1,
            *old.max_players(),
            old.status().clone(),
        );
        state.games[position] = joined.clone();
        state.current = Some(id.clone());
        Ok(joined)
    }

    async fn leave_game(&self) -> Result<(), LobbyError> {
        self.wait_if_stalled("leave-game").await;
        self.record("leave-game", None)?;
        self.state.lock().unwrap().current = None;
        Ok(())
    }
}

/// The game from the lobby examples: `g1`, "Foo", 2/4, waiting.
pub fn foo_game() -> Game {
    Game::new("g1", "Foo", 2, 4, "waiting")
}

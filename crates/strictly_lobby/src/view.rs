//! Lobby view models derived from the latest server snapshot.
//!
//! Every render is a pure function of its input and replaces the previous
//! view wholesale.

use derive_getters::Getters;
use tracing::instrument;

use crate::{Game, GameId};

/// Shown instead of the list when the server has no games.
pub const EMPTY_LIST_PLACEHOLDER: &str = "No games available. Create one!";

/// Shown instead of the list when the list could not be loaded.
pub const LIST_LOAD_ERROR: &str = "Error loading games";

/// One joinable game in the list.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct GameRow {
    /// Target of the row's join action.
    id: GameId,
    /// Game name.
    name: String,
    /// `player_count/max_players`.
    players: String,
    /// Server status label.
    status: String,
}

impl GameRow {
    #[instrument(skip(game), fields(game_id = %game.id()))]
    fn from_game(game: &Game) -> Self {
        Self {
            id: game.id().clone(),
            name: game.name().clone(),
            players: game.occupancy(),
            status: game.status().clone(),
        }
    }

    /// `Players: 2/4 • Status: waiting`.
    pub fn summary(&self) -> String {
        format!("Players: {} • Status: {}", self.players, self.status)
    }
}

/// Contents of the game list container.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GameListView {
    /// Nothing loaded yet.
    #[default]
    Loading,
    /// The server returned an empty list.
    Empty,
    /// One row per game, in server order.
    Rows(Vec<GameRow>),
    /// The last load failed.
    Failed,
}

impl GameListView {
    /// Rows to render; empty for the placeholder states.
    pub fn rows(&self) -> &[GameRow] {
        match self {
            Self::Rows(rows) => rows,
            _ => &[],
        }
    }

    /// Inline message shown in place of rows, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Loading => Some("Loading games..."),
            Self::Empty => Some(EMPTY_LIST_PLACEHOLDER),
            Self::Rows(_) => None,
            Self::Failed => Some(LIST_LOAD_ERROR),
        }
    }
}

/// The highlighted "current game" row.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct CurrentGameRow {
    /// Target of the enter action.
    id: GameId,
    /// Game name.
    name: String,
    /// `player_count/max_players`.
    players: String,
    /// Server status label.
    status: String,
}

impl CurrentGameRow {
    /// `Current Game: Foo`.
    pub fn title(&self) -> String {
        format!("Current Game: {}", self.name)
    }

    /// `Players: 2/4 • Status: waiting`.
    pub fn summary(&self) -> String {
        format!("Players: {} • Status: {}", self.players, self.status)
    }

    /// Label of the enter action.
    pub fn action_label(&self) -> &'static str {
        "Enter Game"
    }
}

/// Current-game panel: empty when the player is not in a game.
pub type CurrentGameView = Option<CurrentGameRow>;

/// Renders the game list container.
#[instrument(skip(games), fields(count = games.len()))]
pub fn render_game_list(games: &[Game]) -> GameListView {
    if games.is_empty() {
        return GameListView::Empty;
    }
    GameListView::Rows(games.iter().map(GameRow::from_game).collect())
}

/// Renders the current-game panel.
#[instrument(skip(game))]
pub fn render_current_game(game: Option<&Game>) -> CurrentGameView {
    game.map(|game| CurrentGameRow {
        id: game.id().clone(),
        name: game.name().clone(),
        players: game.occupancy(),
        status: game.status().clone(),
    })
}

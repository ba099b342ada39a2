//! Lobby controller - keeps the lobby views in step with the server and turns
//! user gestures into API calls.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use derive_getters::Getters;
use tokio::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use crate::lobby::navigation::Navigation;
use crate::view::{CurrentGameView, GameListView, render_current_game, render_game_list};
use crate::{Game, GameId, LobbyApi, LobbyError, Notice, NoticeBoard};

/// Whether a failed call surfaces as a notice or only in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallPolicy {
    /// Show an error notice when the call fails.
    pub notify_on_failure: bool,
}

impl CallPolicy {
    /// User-initiated actions: failures are shown.
    pub const NOTIFY: Self = Self {
        notify_on_failure: true,
    };
    /// Background polling: failures are not shown as notices, so a dead
    /// server does not raise one every poll interval.
    pub const SILENT: Self = Self {
        notify_on_failure: false,
    };
}

/// A user action that talks to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LobbyAction {
    Create,
    Join,
    Leave,
}

impl LobbyAction {
    /// Message for a failed action. Bad statuses read "Failed to ...",
    /// everything else "Error ...".
    fn failure_message(self, err: &LobbyError) -> &'static str {
        match (self, err.is_request_failure()) {
            (Self::Create, true) => "Failed to create game",
            (Self::Create, false) => "Error creating game",
            (Self::Join, true) => "Failed to join game",
            (Self::Join, false) => "Error joining game",
            (Self::Leave, true) => "Failed to leave game",
            (Self::Leave, false) => "Error leaving game",
        }
    }
}

/// Outcome of a server call, applied with [`LobbyController::apply`] in the
/// order results arrive.
#[derive(Debug)]
pub enum LobbyEvent {
    /// Both fetches of a refresh finished.
    Refreshed {
        /// `GET /list-games` result.
        games: Result<Vec<Game>, LobbyError>,
        /// `GET /get-player-game` result.
        current: Result<Option<Game>, LobbyError>,
    },
    /// `GET /create-game/{name}` finished.
    Created(Result<Game, LobbyError>),
    /// `GET /join-game/{id}` finished.
    Joined(Result<Game, LobbyError>),
    /// `GET /leave-game` finished.
    Left(Result<(), LobbyError>),
}

/// A server call detached from the controller, ready to spawn.
pub type LobbyTask = Pin<Box<dyn Future<Output = LobbyEvent> + Send + 'static>>;

/// Controller state for one mounted lobby view.
///
/// Construct it when the lobby is shown, call [`LobbyController::mount`] for
/// the initial load and [`LobbyController::refresh`] on every poll tick.
#[derive(Debug, Getters)]
pub struct LobbyController<A> {
    #[getter(skip)]
    api: Arc<A>,
    /// Game the local player is in, as of the last successful load.
    current_game_id: Option<GameId>,
    /// Rendered game list.
    games_view: GameListView,
    /// Rendered current-game panel.
    current_game_view: CurrentGameView,
    notices: NoticeBoard,
    /// Text typed into the create-game form.
    name_input: String,
    /// Set once the user enters a game; the host tears the lobby down.
    navigation: Option<Navigation>,
}

impl<A: LobbyApi + 'static> LobbyController<A> {
    /// Creates a controller with notices that hide after `notice_duration`.
    #[instrument(skip(api))]
    pub fn new(api: A, notice_duration: Duration) -> Self {
        info!("Creating LobbyController");
        Self {
            api: Arc::new(api),
            current_game_id: None,
            games_view: GameListView::default(),
            current_game_view: None,
            notices: NoticeBoard::new(notice_duration),
            name_input: String::new(),
            navigation: None,
        }
    }

    /// Returns the API client.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Mutable access to the create-game input.
    pub fn name_input_mut(&mut self) -> &mut String {
        &mut self.name_input
    }

    /// Both refresh fetches, run concurrently.
    #[instrument(skip(self))]
    pub fn refresh_task(&self) -> LobbyTask {
        debug!("Refreshing lobby");
        let api = Arc::clone(&self.api);
        Box::pin(async move {
            let (games, current) = tokio::join!(api.list_games(), api.player_game());
            LobbyEvent::Refreshed { games, current }
        })
    }

    /// Create request for the current name input; `None` when it is empty.
    #[instrument(skip(self), fields(name = %self.name_input))]
    pub fn create_task(&self) -> Option<LobbyTask> {
        if self.name_input.is_empty() {
            debug!("Ignoring create with empty name");
            return None;
        }
        let name = self.name_input.clone();
        info!("Creating game");
        let api = Arc::clone(&self.api);
        Some(Box::pin(async move {
            LobbyEvent::Created(api.create_game(&name).await)
        }))
    }

    /// Join request for game `id`.
    #[instrument(skip(self), fields(game_id = %id))]
    pub fn join_task(&self, id: &GameId) -> LobbyTask {
        info!("Joining game");
        let api = Arc::clone(&self.api);
        let id = id.clone();
        Box::pin(async move { LobbyEvent::Joined(api.join_game(&id).await) })
    }

    /// Leave request.
    #[instrument(skip(self))]
    pub fn leave_task(&self) -> LobbyTask {
        info!("Leaving game");
        let api = Arc::clone(&self.api);
        Box::pin(async move { LobbyEvent::Left(api.leave_game().await) })
    }

    /// Applies a finished call. Returns true when both views should be
    /// refreshed next (a successful create, join, or leave).
    #[instrument(skip(self, event))]
    pub fn apply(&mut self, event: LobbyEvent) -> bool {
        match event {
            LobbyEvent::Refreshed { games, current } => {
                self.apply_games(games);
                self.apply_current_game(current);
                false
            }
            LobbyEvent::Created(Ok(game)) => {
                info!(game_id = %game.id(), "Game created");
                self.notices.show(Notice::success(format!(
                    "Game '{}' created successfully!",
                    game.name()
                )));
                self.name_input.clear();
                true
            }
            LobbyEvent::Joined(Ok(game)) => {
                info!(game_id = %game.id(), "Joined game");
                self.notices
                    .show(Notice::success(format!("Joined game '{}'!", game.name())));
                true
            }
            LobbyEvent::Left(Ok(())) => {
                self.notices.show(Notice::success("Left game successfully"));
                true
            }
            LobbyEvent::Created(Err(e)) => self.action_failed(LobbyAction::Create, &e),
            LobbyEvent::Joined(Err(e)) => self.action_failed(LobbyAction::Join, &e),
            // A failed leave does not refresh; the next poll reconciles.
            LobbyEvent::Left(Err(e)) => self.action_failed(LobbyAction::Leave, &e),
        }
    }

    /// Initial load when the lobby is shown.
    #[instrument(skip(self))]
    pub async fn mount(&mut self) {
        info!("Mounting lobby");
        self.refresh().await;
    }

    /// Re-fetches the game list and the current game and re-renders both.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) {
        let event = self.refresh_task().await;
        self.apply(event);
    }

    /// Fetches and renders the game list alone.
    #[instrument(skip(self))]
    pub async fn load_games(&mut self) {
        let games = self.api.list_games().await;
        self.apply_games(games);
    }

    /// Fetches and renders the current game alone.
    #[instrument(skip(self))]
    pub async fn load_current_game(&mut self) {
        let current = self.api.player_game().await;
        self.apply_current_game(current);
    }

    /// Submits the create-game form.
    ///
    /// An empty input sends nothing. On success the input is cleared and
    /// both views are refreshed.
    pub async fn create_game(&mut self) {
        if let Some(task) = self.create_task() {
            self.finish(task).await;
        }
    }

    /// Joins the game with `id`.
    pub async fn join_game(&mut self, id: &GameId) {
        let task = self.join_task(id);
        self.finish(task).await;
    }

    /// Leaves whatever game the server has the player in.
    pub async fn leave_game(&mut self) {
        let task = self.leave_task();
        self.finish(task).await;
    }

    async fn finish(&mut self, task: LobbyTask) {
        let event = task.await;
        if self.apply(event) {
            self.refresh().await;
        }
    }

    /// Navigates to the game page for `id`. No server call is made.
    #[instrument(skip(self), fields(game_id = %id))]
    pub fn enter_game(&mut self, id: &GameId) -> &Navigation {
        let navigation = Navigation::to_game(id);
        info!(path = %navigation.path(), "Entering game");
        self.navigation.insert(navigation)
    }

    fn apply_games(&mut self, result: Result<Vec<Game>, LobbyError>) {
        match result {
            Ok(games) => {
                debug!(count = games.len(), "Rendering game list");
                self.games_view = render_game_list(&games);
            }
            Err(e) => {
                self.report_failure(CallPolicy::SILENT, "Error loading games", &e);
                self.games_view = GameListView::Failed;
            }
        }
    }

    fn apply_current_game(&mut self, result: Result<Option<Game>, LobbyError>) {
        match result {
            Ok(game) => {
                self.current_game_id = game.as_ref().map(|g| g.id().clone());
                self.current_game_view = render_current_game(game.as_ref());
                debug!(current_game_id = ?self.current_game_id, "Rendered current game");
            }
            Err(e) => {
                // Views keep their previous content; the next tick retries.
                error!(error = %e, "Error loading current player game");
            }
        }
    }

    fn action_failed(&mut self, action: LobbyAction, err: &LobbyError) -> bool {
        self.report_failure(CallPolicy::NOTIFY, action.failure_message(err), err);
        false
    }

    fn report_failure(&mut self, policy: CallPolicy, message: &str, err: &LobbyError) {
        if policy.notify_on_failure {
            warn!(error = %err, notice = message, "Lobby action failed");
            self.notices.show(Notice::error(message));
        } else {
            warn!(error = %err, context = message, "Background lobby load failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_messages_split_on_request_vs_transport() {
        let status = LobbyError::request(500);
        let offline = LobbyError::transport("connection refused");
        assert_eq!(
            LobbyAction::Create.failure_message(&status),
            "Failed to create game"
        );
        assert_eq!(
            LobbyAction::Create.failure_message(&offline),
            "Error creating game"
        );
        assert_eq!(LobbyAction::Leave.failure_message(&offline), "Error leaving game");
    }

    #[test]
    fn call_policies() {
        assert!(CallPolicy::NOTIFY.notify_on_failure);
        assert!(!CallPolicy::SILENT.notify_on_failure);
    }
}

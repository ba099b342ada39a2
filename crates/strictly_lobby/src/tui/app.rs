//! Application state and key handling for the lobby screen.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::Backend};
use tokio::sync::mpsc;
use tokio::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use super::ui;
use crate::view::GameRow;
use crate::{
    LobbyApi, LobbyController, LobbyEvent, LobbyTask, Navigation, OsThemeProbe, PreferenceStore,
    ThemeController,
};

/// What the keyboard currently drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Arrow keys move through the game list; letters trigger actions.
    #[default]
    Browse,
    /// Keystrokes go into the new-game name field.
    EditingName,
}

/// Why the lobby screen closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppExit {
    /// The user quit.
    Quit,
    /// The user entered a game; the host should open this page.
    EnterGame(Navigation),
}

/// Lobby screen state: both controllers plus list selection and input mode.
///
/// Server calls run as spawned tasks and report back over a channel, so the
/// screen keeps drawing and taking keys while requests are in flight.
#[derive(Debug)]
pub struct App<A, S, P> {
    lobby: LobbyController<A>,
    theme: ThemeController<S>,
    probe: P,
    poll_interval: Duration,
    next_poll: Instant,
    selected: usize,
    input_mode: InputMode,
    events_tx: mpsc::UnboundedSender<LobbyEvent>,
    events_rx: mpsc::UnboundedReceiver<LobbyEvent>,
    in_flight: usize,
}

impl<A, S, P> App<A, S, P>
where
    A: LobbyApi + 'static,
    S: PreferenceStore,
    P: OsThemeProbe,
{
    /// Creates the screen state. Nothing is fetched until [`App::mount`]
    /// (or [`App::run`]); the first poll is due one `poll_interval` from now.
    #[instrument(skip(lobby, theme, probe))]
    pub fn new(
        lobby: LobbyController<A>,
        theme: ThemeController<S>,
        probe: P,
        poll_interval: Duration,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            lobby,
            theme,
            probe,
            poll_interval,
            next_poll: Instant::now() + poll_interval,
            selected: 0,
            input_mode: InputMode::Browse,
            events_tx,
            events_rx,
            in_flight: 0,
        }
    }

    /// Lobby controller.
    pub fn lobby(&self) -> &LobbyController<A> {
        &self.lobby
    }

    /// Theme controller.
    pub fn theme(&self) -> &ThemeController<S> {
        &self.theme
    }

    /// Index of the highlighted game row.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Current input mode.
    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    /// Server calls spawned but not yet applied.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// The highlighted game row, if the list has rows.
    pub fn selected_game(&self) -> Option<&GameRow> {
        self.lobby.games_view().rows().get(self.selected)
    }

    /// Starts the initial load.
    #[instrument(skip(self))]
    pub fn mount(&mut self) {
        info!("Mounting lobby screen");
        let task = self.lobby.refresh_task();
        self.spawn(task);
    }

    /// One poll: re-probe the OS theme and start a refresh.
    #[instrument(skip(self))]
    pub fn tick(&mut self) {
        self.theme.observe_os_preference(self.probe.probe());
        let task = self.lobby.refresh_task();
        self.spawn(task);
    }

    /// Returns true when the poll deadline has passed at `now`.
    pub fn poll_due(&self, now: Instant) -> bool {
        now >= self.next_poll
    }

    /// Ticks if the poll deadline has passed and schedules the next one.
    /// Returns whether a tick ran.
    pub fn maybe_tick(&mut self) -> bool {
        let now = Instant::now();
        if !self.poll_due(now) {
            return false;
        }
        self.tick();
        self.next_poll = now + self.poll_interval;
        true
    }

    fn spawn(&mut self, task: LobbyTask) {
        self.in_flight += 1;
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            if tx.send(task.await).is_err() {
                debug!("Lobby screen closed before call finished");
            }
        });
    }

    fn receive(&mut self, event: LobbyEvent) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if self.lobby.apply(event) {
            let task = self.lobby.refresh_task();
            self.spawn(task);
        }
        self.clamp_selection();
    }

    /// Applies every result that has already arrived, in arrival order.
    /// Returns how many were applied.
    pub fn drain_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.receive(event);
            applied += 1;
        }
        applied
    }

    /// Waits until every spawned call, including follow-up refreshes, has
    /// been applied.
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            match self.events_rx.recv().await {
                Some(event) => self.receive(event),
                None => break,
            }
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.lobby.games_view().rows().len();
        if count == 0 {
            self.selected = 0;
        } else if self.selected >= count {
            self.selected = count - 1;
        }
    }

    fn select_previous(&mut self) {
        let count = self.lobby.games_view().rows().len();
        if count == 0 {
            return;
        }
        self.selected = match self.selected {
            0 => count - 1,
            i => i - 1,
        };
    }

    fn select_next(&mut self) {
        let count = self.lobby.games_view().rows().len();
        if count == 0 {
            return;
        }
        self.selected = (self.selected + 1) % count;
    }

    /// Handles one key press. Returns `Some` when the screen should close.
    ///
    /// Server calls are started here and applied later by
    /// [`App::drain_events`] or [`App::settle`].
    #[instrument(skip(self, key), fields(code = ?key.code, mode = ?self.input_mode))]
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<AppExit> {
        match self.input_mode {
            InputMode::Browse => self.handle_browse_key(key),
            InputMode::EditingName => {
                self.handle_editing_key(key);
                None
            }
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> Option<AppExit> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(AppExit::Quit);
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                info!("Lobby quitting");
                return Some(AppExit::Quit);
            }
            KeyCode::Up => self.select_previous(),
            KeyCode::Down => self.select_next(),
            KeyCode::Enter | KeyCode::Char('j') => {
                if let Some(id) = self.selected_game().map(|row| row.id().clone()) {
                    let task = self.lobby.join_task(&id);
                    self.spawn(task);
                }
            }
            KeyCode::Char('n') => {
                debug!("Editing new game name");
                self.input_mode = InputMode::EditingName;
            }
            KeyCode::Char('l') => {
                let task = self.lobby.leave_task();
                self.spawn(task);
            }
            KeyCode::Char('e') => {
                let target = self
                    .lobby
                    .current_game_view()
                    .as_ref()
                    .map(|row| row.id().clone());
                if let Some(id) = target {
                    let navigation = self.lobby.enter_game(&id).clone();
                    return Some(AppExit::EnterGame(navigation));
                }
            }
            KeyCode::Char('r') => {
                info!("Manual refresh");
                let task = self.lobby.refresh_task();
                self.spawn(task);
            }
            KeyCode::Char('t') => match self.theme.toggle() {
                Ok(theme) => info!(theme = %theme, "Toggled theme"),
                Err(e) => warn!(error = %e, "Failed to persist theme choice"),
            },
            _ => {}
        }
        None
    }

    fn handle_editing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.input_mode = InputMode::Browse;
                if let Some(task) = self.lobby.create_task() {
                    self.spawn(task);
                }
            }
            KeyCode::Esc => self.input_mode = InputMode::Browse,
            KeyCode::Backspace => {
                self.lobby.name_input_mut().pop();
            }
            KeyCode::Char(c) => self.lobby.name_input_mut().push(c),
            _ => {}
        }
    }

    /// Runs the lobby event loop until the user quits or enters a game.
    #[instrument(skip(self, terminal))]
    pub async fn run<B>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<AppExit>
    where
        B: Backend,
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!("Starting lobby event loop");
        self.mount();

        loop {
            self.drain_events();
            terminal.draw(|f| ui::draw(f, self))?;

            // Poll for input with short timeout so results and the refresh
            // timer keep flowing.
            if event::poll(std::time::Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
                && key.kind != KeyEventKind::Release
                && let Some(exit) = self.handle_key(key)
            {
                return Ok(exit);
            }

            self.maybe_tick();
            tokio::task::yield_now().await;
        }
    }
}

//! UI rendering for the lobby screen.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::app::{App, InputMode};
use crate::view::GameListView;
use crate::{LobbyApi, OsThemeProbe, PreferenceStore, Severity, Theme};

/// Colours for one theme.
#[derive(Debug, Clone, Copy)]
struct Palette {
    background: Color,
    text: Color,
    muted: Color,
    accent: Color,
    highlight: Color,
    success: Color,
    error: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                background: Color::Black,
                text: Color::White,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                highlight: Color::Yellow,
                success: Color::Green,
                error: Color::Red,
            },
            Theme::Light => Self {
                background: Color::White,
                text: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
                highlight: Color::Magenta,
                success: Color::Green,
                error: Color::Red,
            },
        }
    }
}

/// Draws the whole lobby screen.
pub fn draw<A, S, P>(frame: &mut Frame, app: &App<A, S, P>)
where
    A: LobbyApi + 'static,
    S: PreferenceStore,
    P: OsThemeProbe,
{
    let theme = app.theme().applied();
    let palette = Palette::for_theme(theme);
    let area = frame.area();

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    let title = Paragraph::new(format!("Strictly Games - Lobby   [{}]", theme.class_name()))
        .style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    draw_notice(frame, app, palette, chunks[1]);
    draw_current_game(frame, app, palette, chunks[2]);
    draw_game_list(frame, app, palette, chunks[3]);
    draw_name_input(frame, app, palette, chunks[4]);

    let help_text = match app.input_mode() {
        InputMode::Browse => {
            "↑↓: Select | Enter/j: Join | n: New game | l: Leave | e: Enter | r: Refresh | t: Theme | q: Quit"
        }
        InputMode::EditingName => "Type a name | Enter: Create | Esc: Cancel",
    };
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(palette.muted))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[5]);
}

fn draw_notice<A, S, P>(frame: &mut Frame, app: &App<A, S, P>, palette: Palette, area: Rect)
where
    A: LobbyApi + 'static,
    S: PreferenceStore,
    P: OsThemeProbe,
{
    let paragraph = match app.lobby().notices().visible() {
        Some(notice) => {
            let color = match notice.severity() {
                Severity::Success => palette.success,
                Severity::Error => palette.error,
            };
            Paragraph::new(notice.message().as_str())
                .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        }
        None => Paragraph::new(""),
    };
    frame.render_widget(
        paragraph
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Status")),
        area,
    );
}

fn draw_current_game<A, S, P>(frame: &mut Frame, app: &App<A, S, P>, palette: Palette, area: Rect)
where
    A: LobbyApi + 'static,
    S: PreferenceStore,
    P: OsThemeProbe,
{
    let block = Block::default().borders(Borders::ALL).title("Current Game");
    let lines = match app.lobby().current_game_view() {
        Some(row) => vec![
            Line::from(vec![
                Span::styled(
                    row.title(),
                    Style::default()
                        .fg(palette.highlight)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("   "),
                Span::styled(
                    format!("[e] {}", row.action_label()),
                    Style::default().fg(palette.accent),
                ),
            ]),
            Line::from(Span::styled(row.summary(), Style::default().fg(palette.text))),
        ],
        None => Vec::new(),
    };
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_game_list<A, S, P>(frame: &mut Frame, app: &App<A, S, P>, palette: Palette, area: Rect)
where
    A: LobbyApi + 'static,
    S: PreferenceStore,
    P: OsThemeProbe,
{
    let view = app.lobby().games_view();
    let block = Block::default().borders(Borders::ALL).title("Games");

    if let Some(message) = view.message() {
        let color = match view {
            GameListView::Failed => palette.error,
            _ => palette.muted,
        };
        frame.render_widget(
            Paragraph::new(message)
                .style(Style::default().fg(color))
                .block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = view
        .rows()
        .iter()
        .map(|row| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    row.name().clone(),
                    Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(row.summary(), Style::default().fg(palette.muted)),
                Span::raw("  "),
                Span::styled("[Join]", Style::default().fg(palette.accent)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(palette.highlight)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default().with_selected(Some(app.selected()));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_name_input<A, S, P>(frame: &mut Frame, app: &App<A, S, P>, palette: Palette, area: Rect)
where
    A: LobbyApi + 'static,
    S: PreferenceStore,
    P: OsThemeProbe,
{
    let editing = app.input_mode() == InputMode::EditingName;
    let mut text = app.lobby().name_input().clone();
    if editing {
        text.push('_');
    }
    let border = if editing { palette.highlight } else { palette.muted };
    let input = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title("New game name (n)"),
    );
    frame.render_widget(input, area);
}

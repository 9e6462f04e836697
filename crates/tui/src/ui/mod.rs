pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::app::{AppState, Screen, TrackerFocus};

use components::hints::{KeyHint, common, hint_separator, hints_to_spans};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::default();
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background).fg(theme.text)),
        area,
    );

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    let screens = Screen::available(state.tracker.session_state());
    components::tabs::render_tabs(frame, layout[1], screens, state.screen, &theme);

    let content = layout[2];
    match state.screen {
        Screen::Tracker => screens::tracker::render(frame, content, state, &theme),
        Screen::Login => {
            screens::login::render(frame, content, Screen::Login.label(), &state.login, &theme);
        }
        Screen::Register => screens::login::render(
            frame,
            content,
            Screen::Register.label(),
            &state.register,
            &theme,
        ),
        Screen::Account => screens::account::render(frame, content, state, &theme),
    }

    render_bottom_bar(frame, layout[3], state, &theme);
    components::confirm::render(frame, area, state.confirm.as_ref(), &theme);
    components::toast::render(frame, area, state.toast.as_ref(), &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let user = state.user.as_deref().unwrap_or("niezalogowany (demo)");
    let summary = state.tracker.summary();
    let (status, status_style) = if state.pending > 0 {
        ("łączenie…", Style::default().fg(theme.warning))
    } else {
        ("gotowe", Style::default().fg(theme.positive))
    };

    let line = Line::from(vec![
        Span::styled("Użytkownik", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {user}  ")),
        Span::styled("API", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.base_url)),
        Span::styled("Wydatki", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", summary.count)),
        Span::styled(status, status_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = hints_to_spans(&context_hints(state), theme);
    parts.push(hint_separator(theme));
    parts.extend(hints_to_spans(&[KeyHint::new("Ctrl+C", "wyjście")], theme));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

/// Hints for whatever currently receives keystrokes.
fn context_hints(state: &AppState) -> Vec<KeyHint> {
    if state.confirm.is_some() {
        return common::confirm();
    }

    let authenticated = state.tracker.is_authenticated();
    match state.screen {
        Screen::Tracker => match state.focus {
            TrackerFocus::List if authenticated => vec![
                KeyHint::new("↑↓", "wybór"),
                KeyHint::new("a", "dodaj"),
                KeyHint::new("e", "edytuj"),
                KeyHint::new("d", "usuń"),
                KeyHint::new("b", "budżet"),
                KeyHint::new("r", "odśwież"),
                KeyHint::new("m", "konto"),
                KeyHint::new("o", "wyloguj"),
                KeyHint::new("q", "wyjście"),
            ],
            TrackerFocus::List => vec![
                KeyHint::new("↑↓", "wybór"),
                KeyHint::new("l", "zaloguj"),
                KeyHint::new("g", "rejestracja"),
                KeyHint::new("q", "wyjście"),
            ],
            TrackerFocus::Form(_) => common::form_editing(),
            TrackerFocus::Budget => vec![
                KeyHint::new("Enter", "zapisz"),
                KeyHint::new("Esc", "anuluj"),
            ],
        },
        Screen::Login | Screen::Register => vec![
            KeyHint::new("Tab", "następne pole"),
            KeyHint::new("Enter", "wyślij"),
            KeyHint::new("Esc", "wróć"),
        ],
        Screen::Account => vec![
            KeyHint::new("d", "usuń dane"),
            KeyHint::new("x", "usuń konto"),
            KeyHint::new("o", "wyloguj"),
            KeyHint::new("Esc", "wróć"),
        ],
    }
}

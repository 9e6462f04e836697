use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::AppState,
    ui::{
        components::{card::Card, centered_box, money::format_amount},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let summary = state.tracker.summary();
    let user = state.user.as_deref().unwrap_or("-");

    let label = |text: &'static str| Span::styled(text, Style::default().fg(theme.text_muted));
    let lines = vec![
        Line::from(vec![label("Email:    "), Span::raw(user.to_string())]),
        Line::from(vec![
            label("Wydatki:  "),
            Span::raw(summary.count.to_string()),
        ]),
        Line::from(vec![
            label("Budżet:   "),
            Span::raw(format_amount(summary.budget, &state.currency)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("d", Style::default().fg(theme.accent)),
            Span::raw(" usuń wszystkie wydatki"),
        ]),
        Line::from(vec![
            Span::styled("x", Style::default().fg(theme.error)),
            Span::styled(
                " usuń konto",
                Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let rect = centered_box(48, 8, area);
    Card::new("Moje konto", theme).render_with(frame, rect, Paragraph::new(lines));
}

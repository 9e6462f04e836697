use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::Confirm,
    ui::{
        components::{
            centered_box,
            hints::{common, hints_to_spans},
        },
        theme::Theme,
    },
};

/// Yes/no prompt drawn over the current screen.
pub fn render(frame: &mut Frame<'_>, area: Rect, confirm: Option<&Confirm>, theme: &Theme) {
    let Some(confirm) = confirm else {
        return;
    };

    let question = confirm.question();
    let width = (question.chars().count() as u16).saturating_add(6).max(30);
    let rect = centered_box(width, 5, area);
    frame.render_widget(Clear, rect);

    let block = Block::default()
        .title(Span::styled(
            " Potwierdź ",
            Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.error))
        .style(Style::default().bg(theme.panel));

    let lines = vec![
        Line::from(Span::styled(question, Style::default().fg(theme.text))),
        Line::from(""),
        Line::from(hints_to_spans(&common::confirm(), theme)),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        rect,
    );
}

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{LoginField, LoginState},
    ui::{components::centered_box, theme::Theme},
};

/// Email and password box, used by both the login and the register screen.
pub fn render(frame: &mut Frame<'_>, area: Rect, title: &str, form: &LoginState, theme: &Theme) {
    let card_area = centered_box(40, 7, area);
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Email
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Password
        ])
        .margin(1)
        .split(inner);

    render_input(
        frame,
        rows[0],
        "email",
        &form.email,
        false,
        form.focus == LoginField::Email,
        theme,
    );
    render_input(
        frame,
        rows[2],
        "hasło",
        &form.password,
        true,
        form.focus == LoginField::Password,
        theme,
    );
}

fn render_input(
    frame: &mut Frame<'_>,
    area: Rect,
    label: &str,
    value: &str,
    is_password: bool,
    focused: bool,
    theme: &Theme,
) {
    let cursor = if focused { "│" } else { "" };
    let shown = if is_password {
        mask_password(value)
    } else {
        value.to_string()
    };

    let style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text)
    };

    let line = Line::from(vec![
        Span::styled(format!("{label:<7}"), Style::default().fg(theme.text_muted)),
        Span::styled(format!("{shown}{cursor}"), style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// One bullet per character.
fn mask_password(password: &str) -> String {
    "•".repeat(password.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_mask_counts_characters() {
        assert_eq!(mask_password(""), "");
        assert_eq!(mask_password("zółw"), "••••");
    }
}

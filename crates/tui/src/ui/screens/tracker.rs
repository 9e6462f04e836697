use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};
use tracker::{DraftField, DraftMode, Summary, by_category};

use crate::{
    app::{AppState, TrackerFocus},
    ui::{
        components::{
            card::Card,
            money::{budget_gauge, format_amount, styled_amount, styled_amount_bold},
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Summary cards
            Constraint::Length(1), // Budget gauge
            Constraint::Min(0),    // List and form
        ])
        .split(area);

    let summary = state.tracker.summary();
    render_summary(frame, layout[0], state, &summary, theme);
    render_gauge(frame, layout[1], &summary, theme);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(layout[2]);
    render_list(frame, body[0], state, theme);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(body[1]);
    render_form(frame, side[0], state, theme);
    render_categories(frame, side[1], state, theme);
}

fn render_summary(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    summary: &Summary,
    theme: &Theme,
) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let editing_budget = state.focus == TrackerFocus::Budget;
    let budget = if editing_budget {
        Line::from(Span::styled(
            format!("{}│", state.budget_input),
            Style::default().fg(theme.accent),
        ))
    } else {
        Line::from(styled_amount_bold(summary.budget, &state.currency, theme))
    };
    Card::new("Budżet", theme)
        .focused(editing_budget)
        .render_with(frame, cards[0], Paragraph::new(budget));

    let spent = Line::from(vec![
        styled_amount_bold(summary.total, &state.currency, theme),
        Span::styled(
            format!("  ({} szt.)", summary.count),
            Style::default().fg(theme.text_muted),
        ),
    ]);
    Card::new("Wydano", theme).render_with(frame, cards[1], Paragraph::new(spent));

    let remaining_style = if summary.is_over_budget() {
        Style::default()
            .fg(theme.negative)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(theme.positive)
            .add_modifier(Modifier::BOLD)
    };
    let remaining = Line::from(Span::styled(
        format_amount(summary.remaining, &state.currency),
        remaining_style,
    ));
    Card::new("Pozostało", theme).render_with(frame, cards[2], Paragraph::new(remaining));
}

fn render_gauge(frame: &mut Frame<'_>, area: Rect, summary: &Summary, theme: &Theme) {
    match budget_gauge(summary.total, summary.budget, theme) {
        Some(gauge) => frame.render_widget(gauge, area),
        None => frame.render_widget(
            Paragraph::new(Span::styled(
                " Brak ustawionego budżetu",
                Style::default().fg(theme.text_muted),
            )),
            area,
        ),
    }
}

fn render_list(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let title = if state.tracker.is_authenticated() {
        "Wydatki"
    } else {
        "Wydatki (demo)"
    };
    let card = Card::new(title, theme).focused(state.focus == TrackerFocus::List);
    let inner = card.inner(area);
    frame.render_widget(card.block(), area);

    let expenses = state.tracker.expenses();
    if expenses.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Brak wydatków. Naciśnij a, aby dodać.",
                Style::default().fg(theme.text_muted),
            )),
            inner,
        );
        return;
    }

    let header = Row::new(["Data", "Kwota", "Opis", "Kategoria"])
        .style(Style::default().fg(theme.text_muted));
    let rows = expenses.iter().map(|expense| {
        Row::new(vec![
            Cell::from(expense.day().format("%Y-%m-%d").to_string()),
            Cell::from(styled_amount(expense.amount, &state.currency, theme)),
            Cell::from(expense.description.clone().unwrap_or_default()),
            Cell::from(expense.category.clone().unwrap_or_else(|| "-".to_string())),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(14),
            Constraint::Min(10),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .column_spacing(2)
    .row_highlight_style(
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("› ");

    let mut table_state = TableState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(table, inner, &mut table_state);
}

fn render_form(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let draft = state.tracker.draft();
    let title = match draft.mode() {
        DraftMode::Editing(_) => "Edycja wydatku",
        DraftMode::Creating | DraftMode::Idle => "Nowy wydatek",
    };
    let focused_field = match state.focus {
        TrackerFocus::Form(field) => Some(field),
        _ => None,
    };

    let lines: Vec<Line<'_>> = DraftField::ALL
        .iter()
        .map(|&field| {
            let focused = focused_field == Some(field);
            let cursor = if focused { "│" } else { "" };
            let value_style = if draft.is_locked() {
                Style::default().fg(theme.text_muted)
            } else if focused {
                Style::default().fg(theme.accent)
            } else {
                Style::default().fg(theme.text)
            };
            Line::from(vec![
                Span::styled(
                    format!("{:<10}", field_label(field)),
                    Style::default().fg(theme.text_muted),
                ),
                Span::styled(format!("{}{cursor}", draft.value(field)), value_style),
            ])
        })
        .collect();

    Card::new(title, theme)
        .focused(focused_field.is_some())
        .render_with(frame, area, Paragraph::new(lines));
}

fn render_categories(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let lines: Vec<Line<'_>> = by_category(state.tracker.expenses())
        .into_iter()
        .map(|(category, total)| {
            Line::from(vec![
                Span::styled(
                    format!("{:<14}", category.unwrap_or_else(|| "bez kategorii".to_string())),
                    Style::default().fg(theme.text_muted),
                ),
                styled_amount(total, &state.currency, theme),
            ])
        })
        .collect();

    Card::new("Kategorie", theme).render_with(frame, area, Paragraph::new(lines));
}

fn field_label(field: DraftField) -> &'static str {
    match field {
        DraftField::Amount => "Kwota",
        DraftField::Description => "Opis",
        DraftField::Category => "Kategoria",
        DraftField::Date => "Data",
    }
}

use ratatui::{
    style::{Modifier, Style},
    text::Span,
    widgets::LineGauge,
};
use tracker::Amount;

use crate::ui::theme::Theme;

pub fn format_amount(amount: Amount, currency: &str) -> String {
    format!("{amount} {currency}")
}

/// Amount with semantic coloring: negative red, zero muted.
#[must_use]
pub fn styled_amount(amount: Amount, currency: &str, theme: &Theme) -> Span<'static> {
    let color = if amount.is_negative() {
        theme.negative
    } else if amount.is_zero() {
        theme.text_muted
    } else {
        theme.text
    };
    Span::styled(format_amount(amount, currency), Style::default().fg(color))
}

#[must_use]
pub fn styled_amount_bold(amount: Amount, currency: &str, theme: &Theme) -> Span<'static> {
    let span = styled_amount(amount, currency, theme);
    let style = span.style.add_modifier(Modifier::BOLD);
    span.style(style)
}

/// Share of the budget already spent, clamped to `0.0..=1.0`.
///
/// Returns `None` without a positive budget.
pub fn budget_ratio(spent: Amount, budget: Amount) -> Option<f64> {
    if budget.minor() <= 0 {
        return None;
    }
    Some((spent.minor() as f64 / budget.minor() as f64).clamp(0.0, 1.0))
}

/// Line gauge of budget usage: green below 70%, yellow below 90%, red above.
#[must_use]
pub fn budget_gauge(spent: Amount, budget: Amount, theme: &Theme) -> Option<LineGauge<'static>> {
    let ratio = budget_ratio(spent, budget)?;

    let gauge_color = if ratio < 0.7 {
        theme.positive
    } else if ratio < 0.9 {
        theme.warning
    } else {
        theme.negative
    };

    Some(
        LineGauge::default()
            .filled_style(Style::default().fg(gauge_color))
            .label(format!("{:.0}%", ratio * 100.0))
            .ratio(ratio),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_carries_currency_label() {
        assert_eq!(format_amount(Amount::new(4599), "PLN"), "45.99 PLN");
        assert_eq!(format_amount(Amount::new(-150), "EUR"), "-1.50 EUR");
    }

    #[test]
    fn ratio_needs_a_positive_budget() {
        assert_eq!(budget_ratio(Amount::new(500), Amount::ZERO), None);
        assert_eq!(budget_ratio(Amount::new(500), Amount::new(1000)), Some(0.5));
        assert_eq!(budget_ratio(Amount::new(5000), Amount::new(1000)), Some(1.0));
        assert_eq!(budget_ratio(Amount::new(-5), Amount::new(1000)), Some(0.0));
    }
}

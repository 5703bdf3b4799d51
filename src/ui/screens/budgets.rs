use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::budget::BudgetStatus;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_budget, format_money, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let title = format!(" Budgets for {} {} ", app.month.name(), app.month.year());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(title, theme::title_style()));

    if app.budgets.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No active categories", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Create one with :category <name> [budget]",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let items: Vec<ListItem> = app
        .budgets
        .iter()
        .enumerate()
        .skip(app.budget_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, status)| {
            let name_style = if i == app.budget_index {
                theme::selected_style()
            } else if i % 2 == 0 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            let mut spans = vec![Span::styled(
                format!("{:<18}", truncate(&status.category, 17)),
                name_style,
            )];
            spans.extend(usage_spans(status));
            ListItem::new(Line::from(spans))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

/// Spent/ceiling, a bar and the verdict for one category.
fn usage_spans(status: &BudgetStatus) -> Vec<Span<'static>> {
    let figures = format!(
        "{:>12} / {:<12}",
        format_money(status.spent),
        format_budget(status.budget)
    );

    let Some(limit) = status.budget else {
        return vec![
            Span::styled(figures, theme::dim_style()),
            Span::styled(" no ceiling", theme::dim_style()),
        ];
    };

    let ratio = status
        .percent_used()
        .and_then(|p| p.to_f64())
        .map_or(if status.is_over_budget { 1.0 } else { 0.0 }, |p| p / 100.0);
    let color = theme::budget_color(ratio, status.is_over_budget);

    let verdict = match status.remaining {
        Some(left) if left < Decimal::ZERO => format!(" over by {}", format_money(-left)),
        Some(left) if limit > Decimal::ZERO => {
            format!(" {:.0}% | {} left", ratio * 100.0, format_money(left))
        }
        _ => " nothing allowed".to_string(),
    };

    vec![
        Span::styled(figures, Style::default().fg(color)),
        Span::styled(create_progress_bar(ratio.min(1.0), 20), Style::default().fg(color)),
        Span::styled(verdict, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ]
}

fn create_progress_bar(ratio: f64, width: usize) -> String {
    let filled = (ratio.clamp(0.0, 1.0) * width as f64) as usize;
    let empty = width.saturating_sub(filled);
    format!(" [{}{}]", "█".repeat(filled), "░".repeat(empty))
}

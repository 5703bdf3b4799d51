use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_money, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let monthly: Decimal = app
        .recurring
        .iter()
        .filter(|t| t.active)
        .map(|t| t.amount)
        .sum();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(
                " Recurring ({}) {} / month ",
                app.recurring.len(),
                format_money(monthly)
            ),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    if app.recurring.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No recurring expenses", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Add one with :recur <day> <amount> <category> [description]",
                theme::dim_style(),
            )),
            Line::from(Span::styled(
                "e.g. :recur 1 1200 Rent Monthly rent",
                Style::default().fg(theme::ACCENT),
            )),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let header_cells = ["Day", "Amount", "Category", "Payment", "Description", "Due", "Status"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .recurring
        .iter()
        .enumerate()
        .skip(app.recurring_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, t)| {
            let style = if i == app.recurring_index {
                theme::selected_style()
            } else if !t.active {
                theme::inactive_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(format!("{:>3}", t.day_of_month)),
                Cell::from(format!("{:>12}", format_money(t.amount))),
                Cell::from(truncate(&t.category, 16)),
                Cell::from(truncate(&t.payment_method, 12)),
                Cell::from(truncate(&t.description, 30)),
                // clamped, e.g. day 31 falls on the 30th in April
                Cell::from(app.month.day(t.day_of_month).to_string()),
                Cell::from(if t.active { "active" } else { "paused" }),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Length(14),
        Constraint::Length(16),
        Constraint::Length(12),
        Constraint::Min(16),
        Constraint::Length(11),
        Constraint::Length(7),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_budget, format_money, plural, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Summary cards
            Constraint::Min(8),    // Category chart + budgets
            Constraint::Length(9), // Trend
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);
    render_spending_chart(f, middle[0], app);
    render_budget_summary(f, middle[1], app);

    render_trend_chart(f, chunks[2], app);
}

fn panel(title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(title, theme::title_style()))
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let dash = &app.dashboard;
    let previous = dash.month.offset(-1);

    render_card(
        f,
        cards[0],
        &format!("{} {}", dash.month.name(), dash.month.year()),
        format_money(dash.total),
        theme::PEACH,
        plural(dash.expense_count, "expense"),
    );
    render_card(
        f,
        cards[1],
        previous.name(),
        format_money(dash.previous_total),
        theme::TEXT,
        format!("{}", previous.year()),
    );

    // Spending more than last month is bad news
    let change_color = if dash.change > Decimal::ZERO {
        theme::RED
    } else {
        theme::GREEN
    };
    let sign = if dash.change > Decimal::ZERO { "+" } else { "" };
    render_card(
        f,
        cards[2],
        "Change",
        format!("{sign}{}", format_money(dash.change)),
        change_color,
        dash.change_percent()
            .map(|pct| format!("{sign}{pct}%"))
            .unwrap_or_else(|| "no prior spending".into()),
    );

    let over = dash.over_budget_count();
    let capped = dash.budgets.iter().filter(|b| b.budget.is_some()).count();
    render_card(
        f,
        cards[3],
        "Budgets",
        if over == 0 {
            "On track".into()
        } else {
            format!("{over} over")
        },
        if over == 0 { theme::GREEN } else { theme::RED },
        format!("{capped} with a ceiling"),
    );
}

fn render_card(f: &mut Frame, area: Rect, title: &str, value: String, color: Color, subtitle: String) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, theme::dim_style())),
    ])
    .centered()
    .block(panel(format!(" {title} ")));

    f.render_widget(text, area);
}

fn render_spending_chart(f: &mut Frame, area: Rect, app: &App) {
    let by_category = &app.dashboard.by_category;
    if by_category.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No expenses this month",
                theme::dim_style(),
            )),
            Line::from(Span::styled(
                "Add one with :add 12.50 Food Lunch",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(panel(" Spending by Category ".into()));
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = by_category
        .iter()
        .take(10)
        .map(|(name, amt)| {
            let val = amt.round().to_u64().unwrap_or(0);
            Bar::default()
                .value(val)
                .text_value(format_money(*amt))
                .label(Line::from(truncate(name, 10)))
                .style(Style::default().fg(theme::ACCENT))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(panel(" Spending by Category ".into()))
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme::ACCENT));

    f.render_widget(chart, area);
}

fn render_budget_summary(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .dashboard
        .budgets
        .iter()
        .filter(|b| b.budget.is_some() || b.spent > Decimal::ZERO)
        .take(area.height.saturating_sub(2) as usize)
        .map(|status| {
            let ratio = status
                .percent_used()
                .and_then(|p| p.to_f64())
                .map_or(0.0, |p| p / 100.0);
            let color = if status.budget.is_some() {
                theme::budget_color(ratio, status.is_over_budget)
            } else {
                theme::TEXT_DIM
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<14}", truncate(&status.category, 13)),
                    theme::normal_style(),
                ),
                Span::styled(
                    format!(
                        "{} / {}",
                        format_money(status.spent),
                        format_budget(status.budget)
                    ),
                    Style::default().fg(color),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(panel(" Budgets ".into()));
    f.render_widget(list, area);
}

fn render_trend_chart(f: &mut Frame, area: Rect, app: &App) {
    let trend = &app.dashboard.trend;
    let bars: Vec<Bar> = trend
        .iter()
        .map(|point| {
            let current = point.month == app.dashboard.month;
            let color = if current { theme::YELLOW } else { theme::OVERLAY };
            Bar::default()
                .value(point.total.round().to_u64().unwrap_or(0))
                .text_value(format_money(point.total))
                .label(Line::from(format!(
                    "{} '{:02}",
                    point.name.chars().take(3).collect::<String>(),
                    point.year % 100
                )))
                .style(Style::default().fg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(panel(format!(" Last {} Months ", trend.len())))
        .data(BarGroup::default().bars(&bars))
        .bar_width(12)
        .bar_gap(2)
        .max(app.dashboard.trend_max.round().to_u64().unwrap_or(0).max(1))
        .value_style(Style::default().fg(theme::TEXT));

    f.render_widget(chart, area);
}

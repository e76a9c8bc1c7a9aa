use duedeck_app::{Clock, TaskStore};
use duedeck_core::Priority;
use duedeck_core::date::format_long_date;
use duedeck_core::views::{CategoryStats, category_stats, split_due};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph},
};

use super::super::constants::{CATEGORY_CARD_HEIGHT, LIST_HIGHLIGHT_SYMBOL};
use super::super::view::Ui;
use super::util::checkbox;

impl<S: TaskStore, C: Clock> Ui<S, C> {
    pub(in crate::tui) fn draw_dashboard(&self, f: &mut Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(CATEGORY_CARD_HEIGHT * 2),
                Constraint::Min(3),
            ])
            .split(area);

        self.draw_dashboard_header(f, rows[0]);
        self.draw_category_cards(f, rows[1]);
        self.draw_todays_focus(f, rows[2]);
    }

    fn draw_dashboard_header(&self, f: &mut Frame<'_>, area: Rect) {
        let today = self.repo.clock().today();
        let overdue = split_due(self.repo.tasks(), today).overdue.len();

        let date_line = Line::from(Span::styled(
            format_long_date(today),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        let banner = if overdue > 0 {
            Line::from(Span::styled(
                format!("⚠ {overdue} Overdue Tasks"),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(Span::styled(
                "Nothing overdue",
                Style::default().fg(Color::DarkGray),
            ))
        };

        let header = Paragraph::new(vec![date_line, banner])
            .block(Block::default().title("Summary").borders(Borders::ALL));
        f.render_widget(header, area);
    }

    fn draw_category_cards(&self, f: &mut Frame<'_>, area: Rect) {
        let stats = category_stats(self.repo.tasks());
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(CATEGORY_CARD_HEIGHT); 2])
            .split(area);

        for (row, pair) in rows.iter().zip(stats.chunks(2)) {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50); 2])
                .split(*row);
            for (cell, stat) in cells.iter().zip(pair) {
                f.render_widget(category_card(stat), *cell);
            }
        }
    }

    fn draw_todays_focus(&self, f: &mut Frame<'_>, area: Rect) {
        let focus = self.focus_tasks();
        let block = Block::default().title("Today's Focus").borders(Borders::ALL);

        if focus.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                "No tasks for today. You're all caught up!",
                Style::default().fg(Color::DarkGray),
            )))
            .block(block);
            f.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem<'_>> = focus
            .iter()
            .map(|task| {
                let mut spans = vec![
                    Span::raw(checkbox(task.completed)),
                    Span::styled(task.title.as_str(), Style::default().add_modifier(Modifier::BOLD)),
                ];
                if task.priority == Priority::High {
                    spans.push(Span::styled(
                        "  Urgent",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ));
                }
                spans.push(Span::styled(
                    format!("  {}", task.classification()),
                    Style::default().fg(Color::DarkGray),
                ));
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol(LIST_HIGHLIGHT_SYMBOL);
        let mut state = ListState::default();
        state.select(Some(self.dashboard_selected));
        f.render_stateful_widget(list, area, &mut state);
    }
}

fn category_card(stat: &CategoryStats) -> Gauge<'static> {
    let title = format!("{} · {} tasks", stat.category.short_label(), stat.total);
    Gauge::default()
        .block(Block::default().title(title).borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(stat.ratio().clamp(0.0, 1.0))
        .label(format!(
            "{}/{} done ({:.0}%)",
            stat.completed,
            stat.total,
            stat.percentage()
        ))
}

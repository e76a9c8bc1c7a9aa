use duedeck_app::{Clock, TaskStore};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Tabs},
};

use super::super::view::{ActiveView, Ui};

impl<S: TaskStore, C: Clock> Ui<S, C> {
    pub(in crate::tui) fn draw_tab_bar(&self, f: &mut Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(10)])
            .split(area);

        let tabs = Tabs::new(ActiveView::ALL.iter().map(|view| view.tab_label()))
            .block(Block::default().borders(Borders::ALL))
            .select(self.active_view.index())
            .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
        f.render_widget(tabs, columns[0]);

        let new_task = Paragraph::new("+ New")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(new_task, columns[1]);
    }
}

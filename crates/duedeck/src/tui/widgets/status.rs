use duedeck_app::{Clock, TaskStore};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::super::view::{ActiveView, Ui};
use crate::config::ViewType;

impl<S: TaskStore, C: Clock> Ui<S, C> {
    pub(in crate::tui) fn draw_status(&self, f: &mut Frame<'_>, area: Rect) {
        let message = self.message.as_ref().map_or_else(Line::default, |msg| {
            Line::from(Span::styled(msg.text.as_str(), msg.style()))
        });
        let help = Line::from(Span::styled(
            self.help_text(),
            Style::default().fg(Color::DarkGray),
        ));

        let status = Paragraph::new(vec![message, help])
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(status, area);
    }

    fn help_text(&self) -> String {
        if self.editor.is_open() {
            return self.keybindings.generate_help_text(ViewType::Editor);
        }
        match self.active_view {
            ActiveView::Tasks if self.task_list.is_searching() => {
                "type to search  ↵:done  Esc:clear".to_owned()
            }
            ActiveView::Dashboard => self.keybindings.generate_help_text(ViewType::Dashboard),
            ActiveView::Tasks => self.keybindings.generate_help_text(ViewType::TaskList),
            ActiveView::Calendar | ActiveView::Settings => {
                self.keybindings.generate_help_text(ViewType::Global)
            }
        }
    }
}

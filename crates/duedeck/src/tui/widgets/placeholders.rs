use duedeck_app::{Clock, TaskStore};
use duedeck_store_fs::STORAGE_VERSION;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::super::view::Ui;

impl<S: TaskStore, C: Clock> Ui<S, C> {
    pub(in crate::tui) fn draw_calendar(&self, f: &mut Frame<'_>, area: Rect) {
        let placeholder = Paragraph::new(Line::from(Span::styled(
            "Calendar view implementation coming soon.",
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().title("Events").borders(Borders::ALL));
        f.render_widget(placeholder, area);
    }

    /// Read-only facts about where things live; nothing here is editable.
    pub(in crate::tui) fn draw_settings(&self, f: &mut Frame<'_>, area: Rect) {
        let data_file = self
            .repo
            .store()
            .location()
            .map_or_else(|| "(in memory)".to_owned(), |path| path.display().to_string());
        let config_file = self
            .config_path
            .as_ref()
            .map_or_else(|| "(none)".to_owned(), |path| path.display().to_string());
        let completed = self.repo.tasks().iter().filter(|task| task.completed).count();

        let lines = vec![
            setting_line("Data file", data_file),
            setting_line("Config file", config_file),
            setting_line("Storage format", format!("version {STORAGE_VERSION}")),
            setting_line(
                "Tasks",
                format!("{} ({completed} completed)", self.repo.len()),
            ),
            Line::default(),
            Line::from(Span::styled(
                "Run `duedeck config init` to write a configuration file with every key binding.",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let panel = Paragraph::new(lines)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(panel, area);
    }
}

fn setting_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label:<16}"),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(value),
    ])
}

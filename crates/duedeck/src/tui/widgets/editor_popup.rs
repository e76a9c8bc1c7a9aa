use duedeck_app::{Clock, TaskStore};
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::super::constants::{EDITOR_POPUP_HEIGHT, EDITOR_POPUP_MIN_WIDTH, EDITOR_POPUP_WIDTH_PERCENT};
use super::super::editor::{FormField, TaskForm};
use super::super::view::{EditorState, Ui};
use super::util::centered_rect;

const LABEL_WIDTH: usize = 13;

impl<S: TaskStore, C: Clock> Ui<S, C> {
    pub(in crate::tui) fn draw_editor_popup(&self, f: &mut Frame<'_>, form: &TaskForm) {
        let area = f.area();
        let width = (area.width.saturating_mul(EDITOR_POPUP_WIDTH_PERCENT) / 100).max(EDITOR_POPUP_MIN_WIDTH);
        let popup_area = centered_rect(area, width, EDITOR_POPUP_HEIGHT);

        let title = match self.editor {
            EditorState::Editing { .. } => "Edit Task",
            EditorState::Adding(_) | EditorState::Closed => "New Task",
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let mut lines: Vec<Line<'_>> = FormField::ALL
            .iter()
            .map(|field| field_line(form, *field))
            .collect();
        lines.push(Line::default());
        lines.push(save_control(form.can_submit()));

        f.render_widget(Clear, popup_area);
        f.render_widget(Paragraph::new(lines).block(block), popup_area);
    }
}

fn field_line(form: &TaskForm, field: FormField) -> Line<'static> {
    let focused = form.focus == field;
    let marker = if focused { "▶ " } else { "  " };
    let label_style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let value = form.value_of(field);
    let value_text = match (focused, field.accepts_text()) {
        (true, true) => format!("{value}▏"),
        (true, false) => format!("◀ {value} ▶"),
        (false, _) => value,
    };
    let value_style = if field == FormField::DueDate && form.due_date().is_none() {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::raw(marker),
        Span::styled(format!("{:<LABEL_WIDTH$}", field.label()), label_style),
        Span::styled(value_text, value_style),
    ])
}

fn save_control(enabled: bool) -> Line<'static> {
    if enabled {
        Line::from(Span::styled(
            "  [ Save ]",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(vec![
            Span::styled("  [ Save ]", Style::default().fg(Color::DarkGray)),
            Span::styled(
                "  title and YYYY-MM-DD due date required",
                Style::default().fg(Color::DarkGray),
            ),
        ])
    }
}

use duedeck_app::{Clock, TaskStore};
use duedeck_core::date::format_date;
use duedeck_core::{CategoryFilter, Task};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs},
};

use super::super::constants::{DESCRIPTION_PREVIEW_GRAPHEMES, LIST_HIGHLIGHT_SYMBOL};
use super::super::view::Ui;
use super::util::{checkbox, priority_style, truncate_with_ellipsis};

impl<S: TaskStore, C: Clock> Ui<S, C> {
    pub(in crate::tui) fn draw_task_list(&self, f: &mut Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(3),
            ])
            .split(area);

        self.draw_search_bar(f, rows[0]);
        self.draw_filter_pills(f, rows[1]);
        self.draw_task_rows(f, rows[2]);
    }

    fn draw_search_bar(&self, f: &mut Frame<'_>, area: Rect) {
        let search = &self.task_list.filter().search;
        let searching = self.task_list.is_searching();

        let line = if search.is_empty() && !searching {
            Line::from(Span::styled(
                "Search tasks...",
                Style::default().fg(Color::DarkGray),
            ))
        } else if searching {
            Line::from(format!("{search}▏"))
        } else {
            Line::from(search.as_str())
        };
        let border = if searching {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        let bar = Paragraph::new(line).block(
            Block::default()
                .title("Search")
                .borders(Borders::ALL)
                .border_style(border),
        );
        f.render_widget(bar, area);
    }

    fn draw_filter_pills(&self, f: &mut Frame<'_>, area: Rect) {
        let options = CategoryFilter::options();
        let selected = options
            .iter()
            .position(|option| *option == self.task_list.category())
            .unwrap_or(0);
        let pills = Tabs::new(options.iter().map(|option| option.label()))
            .block(Block::default().borders(Borders::ALL))
            .select(selected)
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(pills, area);
    }

    fn draw_task_rows(&self, f: &mut Frame<'_>, area: Rect) {
        let groups = self.task_list.rows(self.repo.tasks());
        let block = Block::default().title("Tasks").borders(Borders::ALL);

        if groups.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                "No tasks found in this category.",
                Style::default().fg(Color::DarkGray),
            )))
            .block(block);
            f.render_widget(empty, area);
            return;
        }

        let mut items = Vec::with_capacity(groups.len() + 2);
        if !groups.pending.is_empty() {
            items.push(section_header("In Progress", groups.pending.len()));
            items.extend(groups.pending.iter().copied().map(|task| self.task_row(task)));
        }
        if !groups.completed.is_empty() {
            items.push(section_header("Completed", groups.completed.len()));
            items.extend(groups.completed.iter().copied().map(|task| self.task_row(task)));
        }

        // Section headers shift row positions in the rendered list.
        let selected = self.task_list.selected_index();
        let display_index = if selected < groups.pending.len() {
            selected + 1
        } else {
            selected + usize::from(!groups.pending.is_empty()) + 1
        };

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol(LIST_HIGHLIGHT_SYMBOL);
        let mut state = ListState::default();
        state.select(Some(display_index));
        f.render_stateful_widget(list, area, &mut state);
    }

    fn task_row<'a>(&self, task: &'a Task) -> ListItem<'a> {
        let title_style = if task.completed {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };

        let mut first = vec![
            Span::raw(checkbox(task.completed)),
            Span::styled(task.title.as_str(), title_style),
            Span::raw("  "),
            Span::styled(task.priority.label(), priority_style(task.priority)),
        ];
        if self.task_list.is_revealed(&task.id) {
            first.push(Span::raw("  "));
            first.push(Span::styled(
                " Delete ",
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        let mut meta = format!(
            "    due {} · {}",
            format_date(task.due_date),
            task.classification()
        );
        if !task.description.is_empty() {
            meta.push_str(" · ");
            meta.push_str(&truncate_with_ellipsis(
                &task.description,
                DESCRIPTION_PREVIEW_GRAPHEMES,
            ));
        }
        let second = Line::from(Span::styled(meta, Style::default().fg(Color::DarkGray)));

        ListItem::new(vec![Line::from(first), second])
    }
}

fn section_header(label: &str, count: usize) -> ListItem<'static> {
    ListItem::new(Line::from(Span::styled(
        format!("{label} ({count})"),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    )))
}

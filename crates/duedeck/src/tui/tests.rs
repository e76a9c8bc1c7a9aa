use super::editor::FormField;
use super::view::*;
use super::*;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use duedeck_app::{FixedClock, MemoryStore};
use duedeck_core::{Category, CategoryFilter, Priority, TaskId};
use ratatui::backend::TestBackend;
use std::fmt::Display;
use std::result::Result as StdResult;
use time::Date;
use time::macros::date;

const TODAY: Date = date!(2025 - 04 - 15);

type TestUi = Ui<MemoryStore, FixedClock>;

fn expect_ok<T, E: Display>(result: StdResult<T, E>, ctx: &str) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{ctx}: {err}"),
    }
}

fn expect_some<T>(value: Option<T>, ctx: &str) -> T {
    value.map_or_else(|| panic!("{ctx}"), |inner| inner)
}

fn ui_with_store(store: MemoryStore, start_view: StartView) -> TestUi {
    let repo = expect_ok(
        TaskRepository::load(store, FixedClock::new(TODAY, 1_000)),
        "load repository",
    );
    let options = TuiOptions {
        start_view,
        config_path: None,
    };
    Ui::new(repo, KeyBindingsConfig::default(), options)
}

fn seeded_ui(start_view: StartView) -> TestUi {
    ui_with_store(MemoryStore::new(), start_view)
}

fn press(ui: &mut TestUi, code: KeyCode) -> Option<UiAction> {
    ui.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_text(ui: &mut TestUi, text: &str) {
    for ch in text.chars() {
        press(ui, KeyCode::Char(ch));
    }
}

fn open_form(ui: &TestUi) -> &super::editor::TaskForm {
    expect_some(ui.editor.form(), "editor should be open")
}

fn focus_field(ui: &mut TestUi, field: FormField) {
    for _ in 0..FormField::ALL.len() {
        if open_form(ui).focus == field {
            return;
        }
        press(ui, KeyCode::Tab);
    }
    panic!("field {field:?} never focused");
}

fn render(ui: &TestUi) -> String {
    let mut terminal = expect_ok(Terminal::new(TestBackend::new(100, 40)), "test terminal");
    expect_ok(terminal.draw(|f| ui.draw(f)), "draw");
    let buffer = terminal.backend().buffer().clone();
    buffer
        .content()
        .chunks(usize::from(buffer.area.width))
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn start_view_comes_from_options() {
    let ui = seeded_ui(StartView::Tasks);
    assert_eq!(ui.active_view, ActiveView::Tasks);
    assert!(ui.message.is_none());
}

#[test]
fn tab_keys_cycle_views() {
    let mut ui = seeded_ui(StartView::Dashboard);
    press(&mut ui, KeyCode::Tab);
    assert_eq!(ui.active_view, ActiveView::Tasks);
    press(&mut ui, KeyCode::BackTab);
    press(&mut ui, KeyCode::BackTab);
    assert_eq!(ui.active_view, ActiveView::Settings);
    press(&mut ui, KeyCode::Char('3'));
    assert_eq!(ui.active_view, ActiveView::Calendar);
}

#[test]
fn quit_key_sets_flag() {
    let mut ui = seeded_ui(StartView::Dashboard);
    press(&mut ui, KeyCode::Char('q'));
    assert!(ui.should_quit);
}

#[test]
fn key_release_is_ignored() {
    let mut ui = seeded_ui(StartView::Dashboard);
    let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
    key.kind = KeyEventKind::Release;
    assert!(ui.handle_key(key).is_none());
    assert!(!ui.should_quit);
}

#[test]
fn new_task_key_opens_blank_form() {
    let mut ui = seeded_ui(StartView::Dashboard);
    press(&mut ui, KeyCode::Char('n'));

    let form = open_form(&ui);
    assert!(matches!(ui.editor, EditorState::Adding(_)));
    assert!(form.title.is_empty());
    assert_eq!(form.category, Category::Personal);
    assert_eq!(form.priority, Priority::Medium);
    assert_eq!(form.due_date(), Some(TODAY));
}

#[test]
fn submitting_form_adds_task_and_closes_editor() {
    let mut ui = seeded_ui(StartView::Tasks);
    press(&mut ui, KeyCode::Char('n'));
    type_text(&mut ui, "Pay internet");
    focus_field(&mut ui, FormField::Category);
    press(&mut ui, KeyCode::Right);
    press(&mut ui, KeyCode::Right);
    press(&mut ui, KeyCode::Enter);

    assert!(!ui.editor.is_open());
    assert_eq!(ui.repo.len(), 4);
    let added = &ui.repo.tasks()[0];
    assert_eq!(added.title, "Pay internet");
    assert_eq!(added.category, Category::Bills);
    assert_eq!(added.sub_category.as_deref(), Some("Electricity"));
    assert!(!added.completed);
    assert_eq!(ui.repo.store().save_count(), 1);
    assert_eq!(ui.selected_list_task_id(), Some(added.id.clone()));
}

#[test]
fn blank_title_submission_is_silently_blocked() {
    let mut ui = seeded_ui(StartView::Dashboard);
    press(&mut ui, KeyCode::Char('n'));
    type_text(&mut ui, "   ");
    press(&mut ui, KeyCode::Enter);

    assert!(ui.editor.is_open());
    assert_eq!(ui.repo.len(), 3);
    assert!(ui.message.is_none());
    assert_eq!(ui.repo.store().save_count(), 0);
}

#[test]
fn cancel_discards_changes() {
    let mut ui = seeded_ui(StartView::Dashboard);
    press(&mut ui, KeyCode::Char('n'));
    type_text(&mut ui, "Throwaway");
    press(&mut ui, KeyCode::Esc);

    assert!(!ui.editor.is_open());
    assert_eq!(ui.repo.len(), 3);
}

#[test]
fn typing_in_editor_does_not_trigger_global_keys() {
    let mut ui = seeded_ui(StartView::Dashboard);
    press(&mut ui, KeyCode::Char('n'));
    type_text(&mut ui, "q2 n+");

    assert!(!ui.should_quit);
    assert_eq!(ui.active_view, ActiveView::Dashboard);
    assert_eq!(open_form(&ui).title, "q2 n+");
}

#[test]
fn editing_keeps_identity_and_completion() {
    let mut ui = seeded_ui(StartView::Tasks);
    let id = TaskId::from("3");
    ui.dispatch(Intent::OpenEditor(EditorRequest::Edit(id.clone())));
    assert!(matches!(ui.editor, EditorState::Editing { .. }));

    press(&mut ui, KeyCode::Backspace);
    press(&mut ui, KeyCode::Backspace);
    press(&mut ui, KeyCode::Backspace);
    press(&mut ui, KeyCode::Backspace);
    type_text(&mut ui, "Call");
    focus_field(&mut ui, FormField::Priority);
    press(&mut ui, KeyCode::Right);
    press(&mut ui, KeyCode::Enter);

    let task = expect_some(ui.repo.get(&id), "task still present");
    assert_eq!(task.title, "Weekly Team Call");
    assert_eq!(task.priority, Priority::High);
    assert!(task.completed);
    assert_eq!(task.created_at, 1_000);
    assert!(!ui.editor.is_open());
}

#[test]
fn failed_save_keeps_editor_open_and_reports_error() {
    let mut ui = seeded_ui(StartView::Dashboard);
    ui.repo.store().fail_saves(true);
    press(&mut ui, KeyCode::Char('n'));
    type_text(&mut ui, "Renew permit");
    press(&mut ui, KeyCode::Enter);

    assert!(ui.editor.is_open());
    assert_eq!(ui.repo.len(), 3);
    let message = expect_some(ui.message.as_ref(), "error message");
    assert_eq!(message.level, MessageLevel::Error);
}

#[test]
fn opening_editor_twice_keeps_last_request() {
    let mut ui = seeded_ui(StartView::Dashboard);
    ui.dispatch(Intent::OpenEditor(EditorRequest::New));
    ui.dispatch(Intent::OpenEditor(EditorRequest::Edit(TaskId::from("2"))));
    match &ui.editor {
        EditorState::Editing { task, .. } => assert_eq!(task.id.as_str(), "2"),
        other => panic!("expected editing state, got {other:?}"),
    }

    ui.dispatch(Intent::OpenEditor(EditorRequest::New));
    assert!(matches!(ui.editor, EditorState::Adding(_)));
}

#[test]
fn editing_unknown_task_is_a_no_op() {
    let mut ui = seeded_ui(StartView::Dashboard);
    ui.dispatch(Intent::OpenEditor(EditorRequest::Edit(TaskId::from("missing"))));
    assert!(!ui.editor.is_open());
}

#[test]
fn toggle_on_task_list_flips_selected_task() {
    let mut ui = seeded_ui(StartView::Tasks);
    let id = expect_some(ui.selected_list_task_id(), "selected task");
    press(&mut ui, KeyCode::Char(' '));
    assert_eq!(ui.repo.get(&id).map(|task| task.completed), Some(true));

    ui.dispatch(Intent::ToggleTask(id.clone()));
    assert_eq!(ui.repo.get(&id).map(|task| task.completed), Some(false));
}

#[test]
fn delete_requires_revealed_row() {
    let mut ui = seeded_ui(StartView::Tasks);
    let id = expect_some(ui.selected_list_task_id(), "selected task");

    press(&mut ui, KeyCode::Char('d'));
    assert_eq!(ui.repo.len(), 3);

    press(&mut ui, KeyCode::Char('h'));
    assert!(ui.task_list.is_revealed(&id));
    press(&mut ui, KeyCode::Char('l'));
    assert!(!ui.task_list.is_revealed(&id));
    press(&mut ui, KeyCode::Char('d'));
    assert_eq!(ui.repo.len(), 3);

    press(&mut ui, KeyCode::Char('h'));
    press(&mut ui, KeyCode::Char('d'));
    assert_eq!(ui.repo.len(), 2);
    assert!(ui.repo.get(&id).is_none());
    assert!(!ui.task_list.is_revealed(&id));
}

#[test]
fn search_filters_case_insensitively() {
    let mut ui = seeded_ui(StartView::Tasks);
    press(&mut ui, KeyCode::Char('/'));
    type_text(&mut ui, "bir");
    assert!(ui.task_list.is_searching());

    let rows = ui.task_list.rows(ui.repo.tasks());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows.pending[0].title, "Quarterly BIR Filing");

    press(&mut ui, KeyCode::Enter);
    assert!(!ui.task_list.is_searching());
    assert_eq!(ui.task_list.filter().search, "bir");

    press(&mut ui, KeyCode::Char('/'));
    press(&mut ui, KeyCode::Esc);
    assert!(ui.task_list.filter().search.is_empty());
}

#[test]
fn filter_pills_cycle_categories() {
    let mut ui = seeded_ui(StartView::Tasks);
    press(&mut ui, KeyCode::Char(']'));
    assert_eq!(ui.task_list.category(), CategoryFilter::Only(Category::Personal));
    assert!(ui.task_list.rows(ui.repo.tasks()).is_empty());
    press(&mut ui, KeyCode::Char('['));
    press(&mut ui, KeyCode::Char('['));
    assert_eq!(ui.task_list.category(), CategoryFilter::Only(Category::Custom));
}

#[test]
fn dashboard_toggle_removes_task_from_focus() {
    let mut ui = seeded_ui(StartView::Dashboard);
    assert_eq!(ui.focus_tasks().len(), 1);
    press(&mut ui, KeyCode::Char('x'));
    assert!(ui.focus_tasks().is_empty());
    assert_eq!(ui.dashboard_selected, 0);
}

#[test]
fn recovered_storage_is_reported() {
    let ui = ui_with_store(MemoryStore::unreadable("expected value at line 1"), StartView::Dashboard);
    assert_eq!(ui.repo.len(), 3);
    let message = expect_some(ui.message.as_ref(), "recovery message");
    assert_eq!(message.level, MessageLevel::Error);
    assert!(message.text.contains("unreadable"));
}

#[test]
fn external_editor_key_requests_description_edit() {
    let mut ui = seeded_ui(StartView::Dashboard);
    press(&mut ui, KeyCode::Char('n'));
    let action = ui.handle_key(KeyEvent::new(KeyCode::Char('e'), KeyModifiers::CONTROL));
    assert_eq!(action, Some(UiAction::EditDescription));

    ui.apply_description_input("Line one\nLine two\n");
    assert_eq!(open_form(&ui).description, "Line one\nLine two");
}

#[test]
fn dashboard_renders_summary_sections() {
    let ui = seeded_ui(StartView::Dashboard);
    let screen = render(&ui);
    assert!(screen.contains("Tuesday, April 15"));
    assert!(screen.contains("Today's Focus"));
    assert!(screen.contains("Quarterly BIR Filing"));
    assert!(screen.contains("Urgent"));
    assert!(screen.contains("Summary"));
}

#[test]
fn task_list_renders_sections_and_empty_message() {
    let mut ui = seeded_ui(StartView::Tasks);
    let screen = render(&ui);
    assert!(screen.contains("In Progress (2)"));
    assert!(screen.contains("Completed (1)"));

    press(&mut ui, KeyCode::Char(']'));
    let screen = render(&ui);
    assert!(screen.contains("No tasks found in this category."));
}

#[test]
fn calendar_placeholder_renders() {
    let ui = seeded_ui(StartView::Calendar);
    assert!(render(&ui).contains("Calendar view implementation coming soon."));
}

#[test]
fn editor_popup_renders_over_view() {
    let mut ui = seeded_ui(StartView::Dashboard);
    press(&mut ui, KeyCode::Char('n'));
    let screen = render(&ui);
    assert!(screen.contains("New Task"));
    assert!(screen.contains("title and YYYY-MM-DD due date required"));
}

#[test]
fn truncate_with_ellipsis_limits_graphemes() {
    assert_eq!(widgets::truncate_with_ellipsis("Meralco", 10), "Meralco");
    assert_eq!(widgets::truncate_with_ellipsis("Meralco account", 10), "Meralco...");
    assert_eq!(widgets::truncate_with_ellipsis("ééééé", 2), "éé");
}

pub(super) mod dashboard;
pub(super) mod editor_popup;
pub(super) mod placeholders;
pub(super) mod status;
pub(super) mod tab_bar;
pub(super) mod task_list;
pub(super) mod util;

#[cfg(test)]
pub(super) fn truncate_with_ellipsis(input: &str, max_graphemes: usize) -> std::borrow::Cow<'_, str> {
    util::truncate_with_ellipsis(input, max_graphemes)
}

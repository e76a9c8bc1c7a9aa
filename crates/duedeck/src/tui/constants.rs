//! Shared constants for the TUI to keep layout and timing in sync.

/// Interval in milliseconds between UI ticks/redraws.
pub const TUI_TICK_RATE_MS: u64 = 200;
/// Time-to-live in seconds for transient status messages.
pub const UI_MESSAGE_TTL_SECS: u64 = 5;
/// Highlight symbol shown beside selected list entries.
pub const LIST_HIGHLIGHT_SYMBOL: &str = "▶ ";
/// Width percentage of the task editor popup before clamping.
pub const EDITOR_POPUP_WIDTH_PERCENT: u16 = 60;
/// Minimum width of the task editor popup.
pub const EDITOR_POPUP_MIN_WIDTH: u16 = 50;
/// Fixed height of the task editor popup: seven fields, save control, borders.
pub const EDITOR_POPUP_HEIGHT: u16 = 12;
/// Height of one dashboard category card.
pub const CATEGORY_CARD_HEIGHT: u16 = 3;
/// Description preview length in the task list, in graphemes.
pub const DESCRIPTION_PREVIEW_GRAPHEMES: usize = 60;

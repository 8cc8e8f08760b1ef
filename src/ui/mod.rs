//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`menu`]: The Open/Save/Close menu bar and its hit-testing
//! - text area and status rows
//! - modal overlays: confirmation prompt, file dialog, help

pub mod menu;

mod overlays;
mod render;
mod status;

pub use overlays::{
    confirm_button_at, confirm_popup_rect, file_dialog_list_area, file_dialog_list_rows,
    file_dialog_rect,
};
pub use render::{ScreenLayout, char_col_at, display_width, line_number_width, render};

/// Display columns a tab character occupies.
pub const TAB_WIDTH: usize = 4;

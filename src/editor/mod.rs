//! The text buffer edited in the main pane.
//!
//! Provides a rope-backed buffer with a single cursor, designed for
//! integration into the TEA architecture.

mod buffer;

pub use buffer::{Motion, Position, TextBuffer};

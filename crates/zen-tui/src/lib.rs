//! Terminal surface for Zen List.
//!
//! Draws [`zen_triage::SessionView`] snapshots with `ratatui` and turns
//! `crossterm` key and mouse events into session input. Holds no triage state
//! of its own beyond the drag origin and last frame's card rectangles.

pub mod input;
pub mod theme;
pub mod view;

pub use input::{translate, DragTracker, UiAction};
pub use theme::Theme;
pub use view::{draw, HitMap};

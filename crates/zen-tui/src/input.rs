//! Translation of terminal events into session input.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use zen_triage::keymap::{Command, Key, KeyMap};
use zen_triage::session::InputEvent;

use crate::view::HitMap;

/// What the host loop should do with a terminal event.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    Input(InputEvent),
    Quit,
}

/// Column where the current mouse drag started.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragTracker {
    origin: Option<u16>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.origin.is_some()
    }

    pub fn begin(&mut self, column: u16) {
        self.origin = Some(column);
    }

    /// Signed gesture offset for the pointer at `column`.
    pub fn offset(&self, column: u16, units_per_column: f64) -> Option<f64> {
        self.origin
            .map(|origin| (f64::from(column) - f64::from(origin)) * units_per_column)
    }

    pub fn end(&mut self) {
        self.origin = None;
    }
}

/// Map a crossterm key press onto a backend-independent key.
pub fn key_from_event(event: &KeyEvent) -> Option<Key> {
    if event.kind != KeyEventKind::Press {
        return None;
    }
    match event.code {
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Esc => Some(Key::Esc),
        KeyCode::Char(c) if event.modifiers.contains(KeyModifiers::CONTROL) => Some(Key::Ctrl(c)),
        KeyCode::Char(c) => Some(Key::Char(c)),
        _ => None,
    }
}

/// Translate one terminal event.
pub fn translate(
    event: &Event,
    hits: &HitMap,
    drag: &mut DragTracker,
    keymap: &KeyMap,
    units_per_column: f64,
) -> Option<UiAction> {
    match event {
        Event::Key(key) => {
            let command = keymap.resolve(key_from_event(key)?)?;
            Some(match command {
                Command::Quit => UiAction::Quit,
                other => UiAction::Input(InputEvent::Command(other)),
            })
        }
        Event::Mouse(mouse) => translate_mouse(mouse, hits, drag, units_per_column),
        _ => None,
    }
}

fn translate_mouse(
    mouse: &MouseEvent,
    hits: &HitMap,
    drag: &mut DragTracker,
    units_per_column: f64,
) -> Option<UiAction> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let target = hits.hit(mouse.column, mouse.row)?.clone();
            drag.begin(mouse.column);
            Some(UiAction::Input(InputEvent::DragStart { target }))
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            let offset = drag.offset(mouse.column, units_per_column)?;
            Some(UiAction::Input(InputEvent::DragMove { offset }))
        }
        MouseEventKind::Up(MouseButton::Left) => {
            // Terminals may merge or drop the last motion report; the release cell wins
            let offset = drag.offset(mouse.column, units_per_column)?;
            drag.end();
            tracing::trace!(offset, "Drag released");
            Some(UiAction::Input(InputEvent::DragEnd {
                offset: Some(offset),
            }))
        }
        _ => None,
    }
}

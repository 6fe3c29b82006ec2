//! Drawing of a session snapshot.
//!
//! Layout: a sidebar with the navigation and status indicator on the left,
//! and the header, card stack, toast and key hints on the right. Card
//! rectangles are recorded in a [`HitMap`] so mouse presses can be mapped
//! back to items.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame,
};
use zen_core::types::{DecisionKind, Item, ItemId};
use zen_triage::keymap::KeyMap;
use zen_triage::motion::CardMotion;
use zen_triage::session::SessionView;
use zen_triage::stack::{self, CardSlot, ExitFrame};
use zen_triage::status::StatusDescriptor;

use crate::theme::{source_icon, Theme};

const SIDEBAR_WIDTH: u16 = 30;
const CARD_MAX_WIDTH: u16 = 64;
const CARD_MAX_HEIGHT: u16 = 16;
/// Gesture units per row of stack depth offset.
const UNITS_PER_ROW: f64 = 10.0;
/// Below this opacity a card is drawn dimmed.
const DIM_OPACITY: f64 = 0.75;

/// Screen rectangles of the cards drawn in the last frame.
#[derive(Debug, Clone)]
pub struct HitMap {
    units_per_column: f64,
    cards: Vec<(ItemId, Rect)>,
}

impl Default for HitMap {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl HitMap {
    pub fn new(units_per_column: f64) -> Self {
        Self {
            units_per_column,
            cards: Vec::new(),
        }
    }

    pub fn units_per_column(&self) -> f64 {
        self.units_per_column
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Record a card. Later records sit above earlier ones.
    pub fn record(&mut self, id: ItemId, rect: Rect) {
        self.cards.push((id, rect));
    }

    /// The topmost card under a cell.
    pub fn hit(&self, column: u16, row: u16) -> Option<&ItemId> {
        self.cards
            .iter()
            .rev()
            .find(|(_, r)| {
                column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height
            })
            .map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Whole terminal columns for a gesture offset.
    fn columns(&self, offset: f64) -> i32 {
        if self.units_per_column <= 0.0 {
            return 0;
        }
        (offset / self.units_per_column).round() as i32
    }
}

/// Draw one frame.
pub fn draw(frame: &mut Frame, view: &SessionView, theme: &Theme, hits: &mut HitMap) {
    hits.clear();

    let area = frame.area();
    frame.render_widget(Block::default().style(theme.base_style()), area);

    let [sidebar, main] =
        Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)]).areas(area);

    render_sidebar(frame, view, theme, sidebar);

    let [header, stack_area, toast, footer] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Min(8),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(main);

    render_header(frame, view, theme, header);

    if view.all_clear {
        render_all_clear(frame, theme, stack_area);
    } else {
        render_stack(frame, view, theme, stack_area, hits);
    }
    render_exits(frame, &view.exits, theme, stack_area, hits);

    render_toast(frame, view, theme, toast);
    render_footer(frame, theme, footer);

    if view.help_visible {
        render_help_overlay(frame, theme);
    }
}

// =============================================================================
// Sidebar
// =============================================================================

fn render_sidebar(frame: &mut Frame, view: &SessionView, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(theme.border_style(false));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [logo, nav, status] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(4),
        Constraint::Length(6),
    ])
    .areas(inner.inner(Margin::new(1, 0)));

    let logo_line = Line::from(vec![
        Span::styled(" ✦ ", theme.accent_style().add_modifier(Modifier::BOLD)),
        Span::styled("Neo OS", theme.title_style()),
    ]);
    frame.render_widget(Paragraph::new(logo_line), logo);

    let nav_lines = vec![
        Line::from(vec![
            Span::styled("▸ Zen List ", theme.title_style()),
            Span::styled(format!("[{}]", view.remaining), theme.accent_style()),
        ]),
        Line::from(Span::styled("  Tasks", theme.muted_style())),
        Line::from(Span::styled("  Contacts", theme.muted_style())),
        Line::from(Span::styled("  Memory", theme.muted_style())),
    ];
    frame.render_widget(Paragraph::new(nav_lines), nav);

    render_status(frame, &view.status, theme, status);
}

fn render_status(frame: &mut Frame, status: &StatusDescriptor, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style(false));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [head, label, bar, more] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let head_line = Line::from(vec![
        Span::styled(format!("{} ", status.glyph), theme.accent_style()),
        Span::styled("Neo ", theme.title_style()),
        Span::styled(
            format!("[{}]", status.badge),
            theme.accent_style().add_modifier(Modifier::ITALIC),
        ),
    ]);
    frame.render_widget(Paragraph::new(head_line), head);
    frame.render_widget(
        Paragraph::new(Span::styled(status.label.as_str(), theme.secondary_style())),
        label,
    );

    if let Some(percent) = status.progress {
        let gauge = Gauge::default()
            .gauge_style(theme.accent_style())
            .percent(u16::from(percent))
            .label("");
        frame.render_widget(gauge, bar);
    }
    if let Some(more_label) = status.more_label() {
        frame.render_widget(
            Paragraph::new(Span::styled(more_label, theme.muted_style())).alignment(Alignment::Right),
            more,
        );
    }
}

// =============================================================================
// Header, toast, footer
// =============================================================================

fn render_header(frame: &mut Frame, view: &SessionView, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(theme.border_style(false));
    let inner = block.inner(area).inner(Margin::new(1, 0));
    frame.render_widget(block, area);

    let [left, right] =
        Layout::horizontal([Constraint::Min(20), Constraint::Length(24)]).areas(inner);

    let title = vec![
        Line::from(Span::styled("Zen List", theme.title_style())),
        Line::from(Span::styled(view.header(), theme.muted_style())),
    ];
    frame.render_widget(Paragraph::new(title), left);

    let counters = Line::from(vec![
        Span::styled(
            format!("✓ {}", view.counters.approved),
            theme.decision_style(DecisionKind::Approve),
        ),
        Span::styled(" | ", theme.muted_style()),
        Span::styled(
            format!("✗ {}", view.counters.dismissed),
            theme.decision_style(DecisionKind::Dismiss),
        ),
        Span::styled(" today", theme.muted_style()),
    ]);
    frame.render_widget(Paragraph::new(counters).alignment(Alignment::Right), right);
}

fn render_toast(frame: &mut Frame, view: &SessionView, theme: &Theme, area: Rect) {
    let Some(toast) = &view.toast else {
        return;
    };
    let icon = match toast.kind {
        DecisionKind::Approve => "✓",
        DecisionKind::Dismiss => "✗",
    };
    let line = Line::from(Span::styled(
        format!("{} {}", icon, toast.message),
        theme.decision_style(toast.kind).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_footer(frame: &mut Frame, theme: &Theme, area: Rect) {
    let line = Line::from(vec![
        Span::styled(" ←/h ", theme.decision_style(DecisionKind::Dismiss)),
        Span::styled("dismiss  ", theme.muted_style()),
        Span::styled("→/l ", theme.decision_style(DecisionKind::Approve)),
        Span::styled("approve  ", theme.muted_style()),
        Span::styled("? ", theme.accent_style()),
        Span::styled("help  ", theme.muted_style()),
        Span::styled("q ", theme.accent_style()),
        Span::styled("quit", theme.muted_style()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

// =============================================================================
// Card stack
// =============================================================================

/// Resting rectangle of the top card.
fn base_card_rect(area: Rect) -> Rect {
    let width = area.width.saturating_sub(4).min(CARD_MAX_WIDTH);
    let height = area.height.saturating_sub(3).min(CARD_MAX_HEIGHT);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + 1,
        width,
        height,
    }
}

/// Shrink a rectangle horizontally around its centre.
fn scaled(rect: Rect, scale: f64) -> Rect {
    let width = ((f64::from(rect.width) * scale).round() as u16).min(rect.width);
    Rect {
        x: rect.x + (rect.width - width) / 2,
        width,
        ..rect
    }
}

/// Move a rectangle by whole cells and clip it to `bounds`.
fn shifted(rect: Rect, dx: i32, dy: i32, bounds: Rect) -> Option<Rect> {
    let x = i32::from(rect.x) + dx;
    let y = i32::from(rect.y) + dy;
    let left = x.max(i32::from(bounds.x));
    let top = y.max(i32::from(bounds.y));
    let right = (x + i32::from(rect.width)).min(i32::from(bounds.x + bounds.width));
    let bottom = (y + i32::from(rect.height)).min(i32::from(bounds.y + bounds.height));
    if right <= left || bottom <= top {
        return None;
    }
    Some(Rect {
        x: left as u16,
        y: top as u16,
        width: (right - left) as u16,
        height: (bottom - top) as u16,
    })
}

fn render_stack(frame: &mut Frame, view: &SessionView, theme: &Theme, area: Rect, hits: &mut HitMap) {
    let base = base_card_rect(area);

    for slot in stack::draw_order(&view.cards) {
        let rows = (slot.presentation.y_offset / UNITS_PER_ROW).round() as i32;
        let motion = if slot.is_top {
            view.top_motion
        } else {
            CardMotion::resting()
        };
        let columns = hits.columns(motion.offset);

        let Some(rect) = shifted(scaled(base, slot.presentation.scale), columns, rows, area) else {
            continue;
        };
        hits.record(slot.item.id.clone(), rect);
        render_card(frame, slot, &motion, theme, rect);
    }
}

fn render_card(frame: &mut Frame, slot: &CardSlot, motion: &CardMotion, theme: &Theme, rect: Rect) {
    frame.render_widget(Clear, rect);

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style(slot.is_top))
        .style(theme.card_style());

    if slot.is_top {
        if let Some(marker) = lean_marker(motion.rotation_deg) {
            let title = Line::from(Span::styled(marker, theme.muted_style()));
            block = if motion.rotation_deg > 0.0 {
                block.title(title.right_aligned())
            } else {
                block.title(title.left_aligned())
            };
        }
        if motion.left_intensity > 0.2 {
            block = block.title_bottom(
                indicator_line(DecisionKind::Dismiss, motion.left_intensity, theme).left_aligned(),
            );
        }
        if motion.right_intensity > 0.2 {
            block = block.title_bottom(
                indicator_line(DecisionKind::Approve, motion.right_intensity, theme)
                    .right_aligned(),
            );
        }
    }

    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let mut lines = card_lines(&slot.item, theme);
    if slot.is_top {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("✗ Swipe left to dismiss", theme.muted_style()),
            Span::raw("   "),
            Span::styled("Swipe right to approve ✓", theme.muted_style()),
        ]));
    }

    let mut body = Paragraph::new(lines).wrap(Wrap { trim: true });
    if motion.opacity < DIM_OPACITY || !slot.is_top {
        body = body.style(Style::default().add_modifier(Modifier::DIM));
    }
    frame.render_widget(body, inner.inner(Margin::new(1, 0)));
}

/// Text contents of a card.
fn card_lines<'a>(item: &'a Item, theme: &Theme) -> Vec<Line<'a>> {
    let mut meta = vec![
        Span::styled(
            format!("{} {}", source_icon(item.source), item.source),
            theme.source_style(item.source),
        ),
        Span::raw("  "),
        Span::styled(item.priority.label(), theme.priority_style(item.priority)),
    ];
    if let Some(time) = &item.time_label {
        meta.push(Span::styled(format!("  · {time}"), theme.muted_style()));
    }

    let mut lines = vec![
        Line::from(meta),
        Line::from(Span::styled(item.title.as_str(), theme.title_style())),
    ];
    if let Some(sender) = &item.sender {
        lines.push(Line::from(Span::styled(
            format!("from {sender}"),
            theme.secondary_style(),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(item.body.as_str(), theme.secondary_style())));

    if let Some(action) = &item.proposed_action {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "✦ Neo suggests",
            theme.accent_style().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(action.as_str(), theme.accent_style())));
    }
    lines
}

/// Border marker approximating the card tilt.
fn lean_marker(rotation_deg: f64) -> Option<&'static str> {
    match rotation_deg {
        r if r >= 10.0 => Some(" ⟩⟩ "),
        r if r >= 3.0 => Some(" ⟩ "),
        r if r <= -10.0 => Some(" ⟨⟨ "),
        r if r <= -3.0 => Some(" ⟨ "),
        _ => None,
    }
}

fn indicator_line(kind: DecisionKind, intensity: f64, theme: &Theme) -> Line<'static> {
    let text = match kind {
        DecisionKind::Approve => " ✓ APPROVE ",
        DecisionKind::Dismiss => " ✗ DISMISS ",
    };
    let mut style = theme.decision_style(kind);
    if intensity >= 1.0 {
        style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
    } else if intensity < 0.6 {
        style = style.add_modifier(Modifier::DIM);
    }
    Line::from(Span::styled(text, style))
}

fn render_exits(frame: &mut Frame, exits: &[ExitFrame], theme: &Theme, area: Rect, hits: &HitMap) {
    let base = base_card_rect(area);
    for exit in exits {
        let Some(rect) = shifted(base, hits.columns(exit.x_offset), 0, area) else {
            continue;
        };
        frame.render_widget(Clear, rect);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.decision_style(exit.kind))
            .style(theme.card_style());
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let mut body = Paragraph::new(card_lines(&exit.item, theme)).wrap(Wrap { trim: true });
        if exit.opacity < DIM_OPACITY {
            body = body.style(Style::default().add_modifier(Modifier::DIM));
        }
        frame.render_widget(body, inner.inner(Margin::new(1, 0)));
    }
}

fn render_all_clear(frame: &mut Frame, theme: &Theme, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "✓",
            theme.accent_style().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("All clear!", theme.title_style())),
        Line::from(Span::styled(
            "You've handled everything. Go build something.",
            theme.muted_style(),
        )),
    ];
    let height = lines.len() as u16;
    let y = area.y + area.height.saturating_sub(height) / 2;
    let rect = Rect {
        y,
        height: height.min(area.height),
        ..area
    };
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), rect);
}

// =============================================================================
// Help overlay
// =============================================================================

fn render_help_overlay(frame: &mut Frame, theme: &Theme) {
    let area = frame.area();
    let bindings = KeyMap::new().bindings();

    let width = 48.min(area.width.saturating_sub(4));
    let height = (bindings.len() as u16 + 4).min(area.height.saturating_sub(2));
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
    frame.render_widget(Clear, popup);

    let mut lines = vec![Line::from("")];
    for (keys, command) in bindings {
        lines.push(Line::from(vec![
            Span::styled(format!(" {keys:<18}"), theme.accent_style()),
            Span::styled(command.description(), theme.secondary_style()),
        ]));
    }

    let help = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(" Keyboard Shortcuts ", theme.title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border_style(true))
            .style(theme.card_style()),
    );
    frame.render_widget(help, popup);
}

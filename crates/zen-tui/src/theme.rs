//! Colours and styles for the Zen List terminal UI.

use ratatui::style::{Color, Modifier, Style};
use zen_core::types::{DecisionKind, Priority, SourceCategory};

/// Colour palette used by every view.
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub card_bg: Color,

    pub accent: Color,
    pub approve: Color,
    pub dismiss: Color,
    pub warning: Color,
    pub info: Color,

    pub border: Color,
    pub border_active: Color,

    pub text_secondary: Color,
    pub text_muted: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(10, 10, 12),
            fg: Color::Rgb(235, 235, 240),
            card_bg: Color::Rgb(24, 24, 30),

            accent: Color::Rgb(16, 185, 129),  // Emerald
            approve: Color::Rgb(52, 211, 153),
            dismiss: Color::Rgb(248, 113, 113),
            warning: Color::Rgb(251, 191, 36),
            info: Color::Rgb(96, 165, 250),

            border: Color::Rgb(55, 55, 65),
            border_active: Color::Rgb(16, 185, 129),

            text_secondary: Color::Rgb(170, 170, 180),
            text_muted: Color::Rgb(110, 110, 120),
        }
    }

    pub fn base_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn card_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.card_bg)
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.fg).add_modifier(Modifier::BOLD)
    }

    pub fn secondary_style(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn decision_style(&self, kind: DecisionKind) -> Style {
        match kind {
            DecisionKind::Approve => Style::default().fg(self.approve),
            DecisionKind::Dismiss => Style::default().fg(self.dismiss),
        }
    }

    /// Badge colour by urgency.
    pub fn priority_style(&self, priority: Priority) -> Style {
        let color = match priority.value() {
            1 => self.dismiss,
            2 => self.warning,
            3 => self.info,
            _ => self.text_muted,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    pub fn source_style(&self, source: SourceCategory) -> Style {
        let color = match source {
            SourceCategory::Email => self.info,
            SourceCategory::Chat => Color::Rgb(192, 132, 252),
            SourceCategory::Task => self.warning,
            SourceCategory::Calendar => Color::Rgb(251, 146, 60),
            SourceCategory::System => self.accent,
        };
        Style::default().fg(color)
    }

    pub fn border_style(&self, active: bool) -> Style {
        if active {
            Style::default().fg(self.border_active)
        } else {
            Style::default().fg(self.border)
        }
    }
}

/// Single-column glyph for a source category.
pub fn source_icon(source: SourceCategory) -> &'static str {
    match source {
        SourceCategory::Email => "✉",
        SourceCategory::Chat => "#",
        SourceCategory::Task => "☐",
        SourceCategory::Calendar => "◷",
        SourceCategory::System => "✦",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_styles_differ() {
        let theme = Theme::default();
        assert_ne!(
            theme.decision_style(DecisionKind::Approve),
            theme.decision_style(DecisionKind::Dismiss)
        );
    }

    #[test]
    fn test_every_source_has_icon() {
        for source in SourceCategory::ALL {
            assert!(!source_icon(source).is_empty());
        }
    }

    #[test]
    fn test_low_priorities_share_muted_colour() {
        let theme = Theme::default();
        let low = theme.priority_style(Priority::new(4).unwrap());
        assert_eq!(low, theme.priority_style(Priority::FYI));
        assert_ne!(low, theme.priority_style(Priority::CRITICAL));
    }
}

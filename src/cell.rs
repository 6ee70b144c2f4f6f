use crate::day::Day;
use crate::theme::cell::{
    BYLINE_STYLE, DOOR_STYLE, FOCUS_BORDER_STYLE, HEADING_STYLE, LOCKED_STYLE, LOGO_STYLE,
    OPENED_STYLE, SHAKE_BORDER_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{HorizontalAlignment, Margin, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, BorderType, Paragraph, Widget, Wrap},
};

const LOCK_GLYPH: &str = "🔒";

/// Cells smaller than this in either dimension are drawn without a border
const MIN_BORDERED_WIDTH: u16 = 5;
const MIN_BORDERED_HEIGHT: u16 = 3;

/// A single door of the calendar, drawn purely from its flags
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DayCell<'a> {
    pub(crate) number: Day,
    pub(crate) is_open: bool,
    pub(crate) is_locked: bool,
    pub(crate) is_shaking: bool,
    pub(crate) is_focused: bool,
    /// Text shown once the door is open
    pub(crate) content: &'a str,
}

impl DayCell<'_> {
    fn style(&self) -> Style {
        if self.is_open {
            OPENED_STYLE
        } else if self.is_locked {
            LOCKED_STYLE
        } else {
            DOOR_STYLE
        }
    }
}

impl Widget for DayCell<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let style = self.style();
        buf.set_style(area, style);
        let inner = if area.width >= MIN_BORDERED_WIDTH && area.height >= MIN_BORDERED_HEIGHT {
            let mut block = Block::bordered().style(style);
            if self.is_focused {
                block = block
                    .border_type(BorderType::Thick)
                    .border_style(FOCUS_BORDER_STYLE);
            } else if self.is_shaking {
                block = block.border_style(SHAKE_BORDER_STYLE);
            }
            block.render(area, buf);
            area.inner(Margin::new(1, 1))
        } else {
            if self.is_focused {
                buf.set_style(area, FOCUS_BORDER_STYLE.bg(style.bg.unwrap_or_default()));
            }
            area
        };
        if self.is_open {
            Paragraph::new(self.content)
                .alignment(HorizontalAlignment::Center)
                .wrap(Wrap { trim: true })
                .render(inner, buf);
        } else {
            let middle = Rect {
                y: inner.y + inner.height.saturating_sub(1) / 2,
                height: inner.height.min(1),
                ..inner
            };
            Line::from(self.number.to_string())
                .centered()
                .render(middle, buf);
            if self.is_locked && inner.width >= 6 {
                let corner = Rect {
                    x: inner.right() - 2,
                    y: inner.y,
                    width: 2,
                    height: inner.height.min(1),
                };
                Line::from(LOCK_GLYPH).render(corner, buf);
            }
        }
    }
}

/// The decorative cell carrying the calendar's heading
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct LogoCell<'a> {
    pub(crate) heading: &'a str,
    pub(crate) byline: &'a str,
}

impl Widget for LogoCell<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        buf.set_style(area, LOGO_STYLE);
        let inner = if area.width >= MIN_BORDERED_WIDTH && area.height >= MIN_BORDERED_HEIGHT {
            Block::bordered()
                .border_type(BorderType::Rounded)
                .style(LOGO_STYLE)
                .render(area, buf);
            area.inner(Margin::new(1, 1))
        } else {
            area
        };
        let mut lines = vec![Line::styled(self.heading, HEADING_STYLE)];
        if inner.height > 1 {
            lines.push(Line::styled(self.byline, BYLINE_STYLE));
        }
        let text = Text::from(lines).centered();
        let height = u16::try_from(text.height()).unwrap_or(u16::MAX);
        let top = Rect {
            y: inner.y + inner.height.saturating_sub(height) / 2,
            height: inner.height.min(height),
            ..inner
        };
        text.render(top, buf);
    }
}

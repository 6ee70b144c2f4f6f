use crate::popup;
use ratatui::{
    buffer::Buffer,
    layout::{HorizontalAlignment, Margin, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Paragraph, Widget},
};

static TEXT: &[&str] = &[
    "ARROWS, hjkl    Move between doors",
    "ENTER, SPACE    Open the selected door",
    "CLICK           Open a door",
    "g               Type a door number to open",
    "t               Toggle test mode",
    "?               Show this help",
    "q, ESC          Quit",
    "",
    "Doors open on their day of December.",
    "Press the Any Key to dismiss.",
];

/// Key-binding overlay, drawn in the given style
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from_iter(TEXT.iter().map(|&s| Line::raw(s)));
        // Border plus a column of padding on either side
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .saturating_add(4);
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .saturating_add(2);
        let outer_area = popup::centered(area, width, height);
        popup::blank(outer_area, self.0, buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(HorizontalAlignment::Center),
            )
            .style(self.0)
            .render(outer_area.inner(Margin::new(1, 0)), buf);
    }
}

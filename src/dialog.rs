use crate::content::ContentTable;
use crate::day::Day;
use crate::popup;
use crate::theme::{
    dialog::{HINT_STYLE, IMAGE_STYLE, TITLE_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, HorizontalAlignment, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Paragraph, Widget, Wrap},
};

const MAX_WIDTH: u16 = 64;
const MAX_HEIGHT: u16 = 14;

/// Modal panel showing what is behind an opened door
#[derive(Clone, Copy, Debug)]
pub(crate) struct DetailDialog<'a> {
    pub(crate) day: Day,
    pub(crate) content: &'a ContentTable,
}

impl DetailDialog<'_> {
    /// The screen region covered by the dialog when drawn over `area`
    pub(crate) fn area(area: Rect) -> Rect {
        popup::centered(area, MAX_WIDTH, MAX_HEIGHT)
    }

    /*
     * .................................
     * .┌──────── First Day ─────────┐.
     * .│ [image] placeholder.svg    │.
     * .│                            │.
     * .│ Day 1: Welcome to your ... │.
     * .│                            │.
     * .│   Press ESC to close.      │.
     * .└────────────────────────────┘.
     * .................................
     */

    fn body(&self) -> Text<'_> {
        let mut caption = Line::from_iter([
            Span::styled("[image] ", IMAGE_STYLE),
            Span::styled(self.content.image(self.day), IMAGE_STYLE),
        ]);
        if let Some(alt) = self.content.alt(self.day) {
            caption.push_span(Span::styled(format!(" ({alt})"), IMAGE_STYLE));
        }
        Text::from_iter([
            caption,
            Line::styled("", BASE_STYLE),
            Line::styled(self.content.message(self.day), BASE_STYLE),
        ])
    }
}

impl Widget for DetailDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let outer_area = DetailDialog::area(area);
        popup::blank(outer_area, BASE_STYLE, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        let title = format!(" {} ", self.content.title(self.day));
        let block = Block::bordered()
            .title(Span::styled(title, TITLE_STYLE))
            .title_alignment(HorizontalAlignment::Center)
            .style(BASE_STYLE);
        let inner = block.inner(block_area).inner(Margin::new(1, 0));
        block.render(block_area, buf);
        let [body_area, hint_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);
        Paragraph::new(self.body())
            .wrap(Wrap { trim: true })
            .render(body_area, buf);
        Line::styled("Press ESC to close.", HINT_STYLE)
            .centered()
            .render(hint_area, buf);
    }
}

use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    widgets::{Block, Clear, Widget},
};

/// Returns the `width` by `height` region in the middle of `area`, shrunk to
/// fit if `area` is too small
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [outer] = Layout::horizontal([width.min(area.width)])
        .flex(Flex::Center)
        .areas(area);
    let [outer] = Layout::vertical([height.min(area.height)])
        .flex(Flex::Center)
        .areas(outer);
    outer
}

/// Wipes whatever is drawn under a popup and paints its background
pub(crate) fn blank(outer: Rect, style: Style, buf: &mut Buffer) {
    Clear.render(outer, buf);
    Block::new().style(style).render(outer, buf);
}

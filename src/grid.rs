use crate::cell::{DayCell, LogoCell};
use crate::content::ContentTable;
use crate::controller::DayFlagTable;
use crate::day::Day;
use crate::layout::{Grid, GridItem};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

/// Draws every placed layout entry into its share of the area.  Holds no
/// state of its own; the flags come from the controller.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CalendarGrid<'a> {
    pub(crate) grid: &'a Grid,
    pub(crate) content: &'a ContentTable,
    pub(crate) flags: &'a DayFlagTable,
    pub(crate) focus: Option<Day>,
}

impl Widget for CalendarGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (placement, cell_area) in self.grid.cell_areas(area) {
            match placement.item {
                GridItem::Logo => LogoCell {
                    heading: self.content.heading(),
                    byline: self.content.byline(),
                }
                .render(cell_area, buf),
                GridItem::Day(day) => {
                    let flags = self.flags.get(day);
                    let message = self.content.cell_message(day);
                    let cell_area = match flags.shake_offset {
                        Some(offset) => shift(cell_area, offset, area),
                        None => cell_area,
                    };
                    DayCell {
                        number: day,
                        is_open: flags.is_open(),
                        is_locked: flags.is_locked(),
                        is_shaking: flags.is_shaking(),
                        is_focused: self.focus == Some(day),
                        content: &message,
                    }
                    .render(cell_area, buf);
                }
            }
        }
    }
}

/// Moves `rect` `offset` columns sideways, unless that would take it outside
/// of `bounds`
fn shift(rect: Rect, offset: i16, bounds: Rect) -> Rect {
    let x = rect.x.saturating_add_signed(offset);
    if x < bounds.left() || x.saturating_add(rect.width) > bounds.right() {
        rect
    } else {
        Rect { x, ..rect }
    }
}

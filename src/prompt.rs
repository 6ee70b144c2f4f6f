use crate::day::Day;
use crate::popup;
use crate::theme::{
    prompt::{READY_ENTER_STYLE, UNFILLED_CELL_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{HorizontalAlignment, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, StatefulWidget, Widget},
};

const OUTER_WIDTH: u16 = 17;
const OUTER_HEIGHT: u16 = 8;
const DIGITS: usize = 2;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DayPrompt;

impl StatefulWidget for DayPrompt {
    type State = DayPromptState;

    /*
     * .................
     * .┌ Open Door… ─┐.
     * .│             │.
     * .│     DD      │.
     * .│             │.
     * .│   [ENTER]   │.
     * .└─────────────┘.
     * .................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let outer_area = popup::centered(area, OUTER_WIDTH, OUTER_HEIGHT);
        popup::blank(outer_area, BASE_STYLE, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(" Open Door… ")
            .title_alignment(HorizontalAlignment::Center)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(1, 1));
        state.to_text().render(text_area, buf);
    }
}

/// A day number being typed in, one digit at a time
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct DayPromptState {
    digits: [Option<u8>; DIGITS],
    pos: usize,
}

impl DayPromptState {
    pub(crate) fn new() -> DayPromptState {
        DayPromptState::default()
    }

    fn value(self) -> Option<Day> {
        let n = self.digits[..self.pos]
            .iter()
            .flatten()
            .fold(0u8, |acc, &d| acc * 10 + d);
        Day::new(n)
    }

    fn to_text(self) -> Text<'static> {
        Text::from_iter([
            Line::styled("", BASE_STYLE),
            self.to_line(),
            Line::styled("", BASE_STYLE),
            Line::from(Span::styled(
                "[ENTER]",
                if self.value().is_some() {
                    READY_ENTER_STYLE
                } else {
                    BASE_STYLE
                },
            )),
        ])
        .centered()
    }

    fn to_line(self) -> Line<'static> {
        Line::from_iter(self.digits.iter().map(|dg| match dg {
            Some(d) => Span::styled(format!("{d}"), BASE_STYLE),
            None => Span::styled("D", UNFILLED_CELL_STYLE),
        }))
    }

    pub(crate) fn handle_input(&mut self, input: DayPromptInput) -> DayPromptOutput {
        match (input, self.pos) {
            (DayPromptInput::Digit(d), 0..DIGITS) if d < 10 => {
                self.digits[self.pos] = Some(d);
                self.pos += 1;
                DayPromptOutput::Ok
            }
            (DayPromptInput::Backspace, 1..) => {
                self.pos -= 1;
                self.digits[self.pos] = None;
                DayPromptOutput::Ok
            }
            (DayPromptInput::Enter, 1..) => match self.value() {
                Some(day) => DayPromptOutput::Open(day),
                None => DayPromptOutput::Invalid,
            },
            _ => DayPromptOutput::Invalid,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum DayPromptInput {
    Digit(u8),
    Backspace,
    Enter,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum DayPromptOutput {
    Ok,
    Invalid,
    Open(Day),
}

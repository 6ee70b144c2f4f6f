use crate::clock::Clock;
use crate::content::ContentTable;
use crate::controller::{CalendarController, ClickOutcome, DayState};
use crate::day::Day;
use crate::dialog::DetailDialog;
use crate::grid::CalendarGrid;
use crate::help::Help;
use crate::layout::{Direction, Grid, GridItem};
use crate::prompt::{DayPrompt, DayPromptInput, DayPromptOutput, DayPromptState};
use crate::theme::{BASE_STYLE, CHECKBOX_STYLE, STATUS_STYLE};
use crossterm::event::{
    poll, read, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect},
    text::Line,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use time::Month;

/// How often to redraw while a door is shaking
const FRAME_INTERVAL: Duration = Duration::from_millis(30);

/// How long to wait for input before redrawing anyway, so that doors unlock
/// at midnight without a keypress
const IDLE_INTERVAL: Duration = Duration::from_secs(1);

const CHECKBOX_WIDTH: u16 = 17;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App<C> {
    controller: CalendarController<C>,
    grid: Grid,
    content: ContentTable,
    focus: Day,
    state: AppState,
    /// Area of the most recent frame, for mapping mouse clicks to cells
    area: Rect,
    now: Instant,
}

impl<C: Clock> App<C> {
    pub(crate) fn new(controller: CalendarController<C>, content: ContentTable) -> App<C> {
        let today = controller.today();
        let focus = if today.month() == Month::December {
            Day::new(today.day()).unwrap_or(Day::LAST)
        } else {
            Day::FIRST
        };
        App {
            controller,
            grid: Grid::default(),
            content,
            focus,
            state: AppState::Calendar,
            area: Rect::default(),
            now: Instant::now(),
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        while !self.quitting() {
            self.now = Instant::now();
            self.controller.tick(self.now);
            self.draw(&mut terminal)?;
            let timeout = if self.controller.is_animating() {
                FRAME_INTERVAL
            } else {
                IDLE_INTERVAL
            };
            if poll(timeout)? {
                self.handle_event(read()?)?;
            }
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> io::Result<()> {
        self.now = Instant::now();
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = event.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        } else if let Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) = event
        {
            self.handle_click(column, row);
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Calendar if self.controller.selected_day().is_some() => match key {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q' | ' ') => {
                    self.controller.close_dialog();
                    true
                }
                _ => false,
            },
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.move_focus(Direction::Left),
                KeyCode::Char('l') | KeyCode::Right => self.move_focus(Direction::Right),
                KeyCode::Char('k') | KeyCode::Up => self.move_focus(Direction::Up),
                KeyCode::Char('j') | KeyCode::Down => self.move_focus(Direction::Down),
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.open(self.focus);
                    true
                }
                KeyCode::Char('t') => {
                    self.controller.toggle_test_mode();
                    true
                }
                KeyCode::Char('g') => {
                    self.state = AppState::Prompting(DayPromptState::new());
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Prompting(state) => {
                if matches!(key, KeyCode::Char('q' | 'g') | KeyCode::Esc) {
                    self.state = AppState::Calendar;
                    true
                } else {
                    let output = match key {
                        KeyCode::Char(c) => {
                            match c.to_digit(10).and_then(|d| u8::try_from(d).ok()) {
                                Some(d) => state.handle_input(DayPromptInput::Digit(d)),
                                None => DayPromptOutput::Invalid,
                            }
                        }
                        KeyCode::Backspace | KeyCode::Delete => {
                            state.handle_input(DayPromptInput::Backspace)
                        }
                        KeyCode::Enter => state.handle_input(DayPromptInput::Enter),
                        _ => DayPromptOutput::Invalid,
                    };
                    match output {
                        DayPromptOutput::Ok => true,
                        DayPromptOutput::Invalid => false,
                        DayPromptOutput::Open(day) => {
                            self.state = AppState::Calendar;
                            self.open(day);
                            true
                        }
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn handle_click(&mut self, x: u16, y: u16) {
        let pos = Position::new(x, y);
        match self.state {
            AppState::Calendar => {
                if self.controller.selected_day().is_some() {
                    if !DetailDialog::area(self.area).contains(pos) {
                        self.controller.close_dialog();
                    }
                    return;
                }
                let (status_area, grid_area) = split(self.area);
                if checkbox_area(status_area).contains(pos) {
                    self.controller.toggle_test_mode();
                } else if let Some(GridItem::Day(day)) = self.grid.item_at(grid_area, x, y) {
                    self.open(day);
                }
            }
            AppState::Helping | AppState::Prompting(_) => self.state = AppState::Calendar,
            AppState::Quitting => (),
        }
    }

    fn open(&mut self, day: Day) -> ClickOutcome {
        self.focus = day;
        self.controller.handle_day_click(day, self.now)
    }

    fn move_focus(&mut self, direction: Direction) -> bool {
        if let Some(day) = self.grid.neighbor(self.focus, direction) {
            self.focus = day;
            true
        } else {
            false
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn status_line(&self) -> Line<'static> {
        let hint = if let Some(day) = self.controller.shaking_day() {
            format!("door {day} stays shut until December {day}")
        } else if self.controller.day_state(self.focus) == DayState::Locked {
            format!("door {} is locked · press ? for help", self.focus)
        } else {
            String::from("press ? for help")
        };
        Line::styled(
            format!(
                " {}/24 doors opened · {hint}",
                self.controller.open_days().count()
            ),
            STATUS_STYLE,
        )
    }

    fn checkbox(&self) -> Line<'static> {
        let label = if self.controller.test_mode() {
            "[x] Test Mode ON "
        } else {
            "[ ] Test Mode OFF"
        };
        Line::styled(label, CHECKBOX_STYLE)
    }
}

impl<C: Clock> Widget for &mut App<C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.area = area;
        buf.set_style(area, BASE_STYLE);
        let (status_area, grid_area) = split(area);
        self.status_line().render(status_area, buf);
        self.checkbox().render(checkbox_area(status_area), buf);
        let flags = self.controller.day_flags(self.now);
        let dialog_day = self.controller.selected_day();
        CalendarGrid {
            grid: &self.grid,
            content: &self.content,
            flags: &flags,
            focus: (dialog_day.is_none() && self.state == AppState::Calendar)
                .then_some(self.focus),
        }
        .render(grid_area, buf);
        if let Some(day) = dialog_day {
            DetailDialog {
                day,
                content: &self.content,
            }
            .render(area, buf);
        }
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        } else if let AppState::Prompting(ref mut state) = self.state {
            DayPrompt.render(area, buf, state);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Prompting(DayPromptState),
    Quitting,
}

/// Splits the screen into the status line and the calendar grid
fn split(area: Rect) -> (Rect, Rect) {
    let [status_area, grid_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
    (status_area, grid_area)
}

fn checkbox_area(status_area: Rect) -> Rect {
    let width = CHECKBOX_WIDTH.min(status_area.width);
    Rect {
        x: status_area.right() - width,
        width,
        ..status_area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use time::{macros::date, Date};

    fn day(n: u8) -> Day {
        Day::new(n).unwrap()
    }

    fn app(today: Date) -> App<FixedClock> {
        App::new(
            CalendarController::new(FixedClock(today)),
            ContentTable::builtin(),
        )
    }

    fn render(app: &mut App<FixedClock>) -> Buffer {
        let area = Rect::new(0, 0, 80, 31);
        let mut buf = Buffer::empty(area);
        app.render(area, &mut buf);
        buf
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_owned())
            .collect()
    }

    /// Screen position of the middle of a day's cell in an 80x31 frame
    fn center_of(app: &App<FixedClock>, d: Day) -> (u16, u16) {
        let (_, grid_area) = split(Rect::new(0, 0, 80, 31));
        let (_, r) = app
            .grid
            .cell_areas(grid_area)
            .find(|(p, _)| p.item == GridItem::Day(d))
            .unwrap();
        (r.x + r.width / 2, r.y + r.height / 2)
    }

    #[test]
    fn test_initial_focus() {
        assert_eq!(app(date!(2024 - 12 - 07)).focus, day(7));
        assert_eq!(app(date!(2024 - 12 - 28)).focus, day(24));
        assert_eq!(app(date!(2024 - 10 - 17)).focus, day(1));
    }

    #[test]
    fn test_status_line() {
        let mut app = app(date!(2024 - 12 - 07));
        let buf = render(&mut app);
        assert!(row(&buf, 0).starts_with(" 0/24 doors opened · press ? for help"));
        assert!(row(&buf, 0).ends_with("[ ] Test Mode OFF"));
        app.handle_key(KeyCode::Right);
        let buf = render(&mut app);
        assert!(row(&buf, 0).starts_with(" 0/24 doors opened · door 13 is locked"));
        app.handle_key(KeyCode::Enter);
        let buf = render(&mut app);
        assert!(row(&buf, 0).contains("door 13 stays shut until December 13"));
        app.handle_key(KeyCode::Char('t'));
        app.handle_key(KeyCode::Enter);
        let buf = render(&mut app);
        assert!(row(&buf, 0).starts_with(" 1/24 doors opened"));
        assert!(row(&buf, 0).ends_with("[x] Test Mode ON "));
    }

    #[test]
    fn test_keyboard_open_and_close() {
        let mut app = app(date!(2024 - 12 - 07));
        assert!(app.handle_key(KeyCode::Enter));
        assert_eq!(app.controller.selected_day(), Some(day(7)));
        // The dialog swallows navigation
        assert!(!app.handle_key(KeyCode::Right));
        assert_eq!(app.focus, day(7));
        let buf = render(&mut app);
        assert!((0..31).any(|y| row(&buf, y).contains(" Day 7 ")));
        assert!(app.handle_key(KeyCode::Esc));
        assert_eq!(app.controller.selected_day(), None);
        assert!(app.controller.is_open(day(7)));
        assert!(!app.quitting());
    }

    #[test]
    fn test_keyboard_locked_door_shakes() {
        let mut app = app(date!(2024 - 12 - 07));
        assert!(app.handle_key(KeyCode::Right));
        assert_eq!(app.focus, day(13));
        assert!(app.handle_key(KeyCode::Char(' ')));
        assert_eq!(app.controller.shaking_day(), Some(day(13)));
        assert_eq!(app.controller.selected_day(), None);
    }

    #[test]
    fn test_navigation_stops_at_edges() {
        let mut app = app(date!(2024 - 12 - 07));
        assert!(!app.handle_key(KeyCode::Up));
        assert!(!app.handle_key(KeyCode::Char('h')));
        assert!(app.handle_key(KeyCode::Char('j')));
        assert_eq!(app.focus, day(8));
    }

    #[test]
    fn test_mouse_click_opens_door() {
        let mut app = app(date!(2024 - 12 - 24));
        render(&mut app);
        let (x, y) = center_of(&app, day(15));
        app.handle_click(x, y);
        assert_eq!(app.controller.selected_day(), Some(day(15)));
        assert_eq!(app.focus, day(15));
        // Clicking inside the dialog leaves it open
        app.handle_click(40, 15);
        assert_eq!(app.controller.selected_day(), Some(day(15)));
        // Clicking outside closes it
        app.handle_click(0, 0);
        assert_eq!(app.controller.selected_day(), None);
    }

    #[test]
    fn test_mouse_click_locked_door() {
        let mut app = app(date!(2024 - 11 - 30));
        render(&mut app);
        let (x, y) = center_of(&app, day(1));
        app.handle_click(x, y);
        assert_eq!(app.controller.shaking_day(), Some(day(1)));
        assert!(!app.controller.is_open(day(1)));
    }

    #[test]
    fn test_mouse_toggles_test_mode() {
        let mut app = app(date!(2024 - 11 - 30));
        render(&mut app);
        app.handle_click(70, 0);
        assert!(app.controller.test_mode());
        let (x, y) = center_of(&app, day(24));
        app.handle_click(x, y);
        assert!(app.controller.is_open(day(24)));
        app.handle_click(0, 0);
        app.handle_click(70, 0);
        assert!(!app.controller.test_mode());
    }

    #[test]
    fn test_prompt() {
        let mut app = app(date!(2024 - 12 - 24));
        assert!(app.handle_key(KeyCode::Char('g')));
        assert!(app.handle_key(KeyCode::Char('2')));
        assert!(app.handle_key(KeyCode::Char('1')));
        assert!(!app.handle_key(KeyCode::Char('x')));
        assert!(app.handle_key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Calendar);
        assert_eq!(app.focus, day(21));
        assert_eq!(app.controller.selected_day(), Some(day(21)));
    }

    #[test]
    fn test_prompt_cancel() {
        let mut app = app(date!(2024 - 12 - 24));
        app.handle_key(KeyCode::Char('g'));
        app.handle_key(KeyCode::Char('5'));
        assert!(app.handle_key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Calendar);
        assert_eq!(app.controller.selected_day(), None);
    }

    #[test]
    fn test_help() {
        let mut app = app(date!(2024 - 12 - 24));
        assert!(app.handle_key(KeyCode::Char('?')));
        let buf = render(&mut app);
        assert!((0..31).any(|y| row(&buf, y).contains(" Commands ")));
        assert!(app.handle_key(KeyCode::Char('z')));
        assert_eq!(app.state, AppState::Calendar);
    }

    #[test]
    fn test_quit() {
        let mut app = app(date!(2024 - 12 - 24));
        assert!(app.handle_key(KeyCode::Char('q')));
        assert!(app.quitting());
        assert!(!app.handle_key(KeyCode::Enter));
    }

    #[test]
    fn test_render_grid() {
        let mut app = app(date!(2024 - 12 - 01));
        let buf = render(&mut app);
        // Logo cell in the top left of the grid
        assert!(row(&buf, 2).contains("Advent Calendar"));
        let (x, y) = center_of(&app, day(24));
        assert!(buf[(x, y)].modifier.contains(ratatui::style::Modifier::DIM));
    }
}

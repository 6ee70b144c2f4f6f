use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const STATUS_STYLE: Style = BASE_STYLE.fg(Color::Gray);

pub(crate) const CHECKBOX_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) mod cell {
    use super::*;

    pub(crate) const DOOR_STYLE: Style = Style::new()
        .fg(Color::White)
        .bg(Color::Red)
        .add_modifier(Modifier::BOLD);

    pub(crate) const LOCKED_STYLE: Style = DOOR_STYLE.add_modifier(Modifier::DIM);

    pub(crate) const OPENED_STYLE: Style = Style::new().fg(Color::White).bg(Color::Indexed(23));

    pub(crate) const FOCUS_BORDER_STYLE: Style = Style::new()
        .fg(Color::LightYellow)
        .add_modifier(Modifier::BOLD);

    pub(crate) const SHAKE_BORDER_STYLE: Style = Style::new().fg(Color::LightRed);

    pub(crate) const LOGO_STYLE: Style = BASE_STYLE;

    pub(crate) const HEADING_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

    pub(crate) const BYLINE_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);
}

pub(crate) mod dialog {
    use super::*;

    pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

    pub(crate) const IMAGE_STYLE: Style = BASE_STYLE
        .fg(Color::LightBlue)
        .add_modifier(Modifier::ITALIC);

    pub(crate) const HINT_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);
}

pub(crate) mod prompt {
    use super::*;

    pub(crate) const UNFILLED_CELL_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const READY_ENTER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);
}

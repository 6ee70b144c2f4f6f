mod app;
mod cell;
mod clock;
mod content;
mod controller;
mod day;
mod dialog;
mod grid;
mod help;
mod layout;
mod popup;
mod prompt;
mod theme;
use crate::app::App;
use crate::clock::{Clock, RunClock};
use crate::content::ContentTable;
use crate::controller::CalendarController;
use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use time::{format_description::BorrowedFormatItem, macros::format_description, Date, UtcOffset};
use tracing::info;
use tracing_subscriber::EnvFilter;

static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct RunOptions {
    date: Option<Date>,
    test_mode: bool,
    content: Option<PathBuf>,
    log_file: Option<PathBuf>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunOptions),
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = RunOptions::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('d') | Arg::Long("date") => {
                    let value = parser.value()?.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => opts.date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                Arg::Short('t') | Arg::Long("test-mode") => opts.test_mode = true,
                Arg::Short('c') | Arg::Long("content") => {
                    opts.content = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log-file") => opts.log_file = Some(PathBuf::from(parser.value()?)),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                // Must be determined while the process is still single-threaded
                let clock = RunClock::new(opts.date, UtcOffset::current_local_offset)
                    .context("failed to determine local time zone")?;
                if let Some(path) = &opts.log_file {
                    init_logging(path)?;
                }
                let content = match &opts.content {
                    Some(path) => ContentTable::load(path)?,
                    None => ContentTable::builtin(),
                };
                run_calendar(clock, content, opts.test_mode)
            }
            Command::Help => {
                println!("Usage: advent [<options>]");
                println!();
                println!("Terminal advent calendar with date-gated doors");
                println!();
                println!("Options:");
                println!("  -d, --date YYYY-MM-DD   Pretend that today is the given date");
                println!("  -t, --test-mode         Start with date checks turned off");
                println!("  -c, --content FILE      Read door contents from a TOML file");
                println!("      --log-file FILE     Write debug logs to FILE");
                println!("  -h, --help              Display this help message and exit");
                println!("  -V, --version           Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn run_calendar<C: Clock>(clock: C, content: ContentTable, test_mode: bool) -> anyhow::Result<()> {
    let mut controller = CalendarController::new(clock);
    if test_mode {
        controller.set_test_mode(true);
    }
    info!(today = %controller.today(), test_mode, "starting advent calendar");
    with_terminal(|mut terminal| {
        terminal.hide_cursor().context("failed to hide cursor")?;
        App::new(controller, content).run(terminal)?;
        Ok(())
    })
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("advent=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = execute!(io::stdout(), EnableMouseCapture)
        .context("failed to enable mouse capture")
        .and_then(|()| func(terminal));
    // Best effort; the terminal is being torn down regardless
    let _ = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();
    r
}

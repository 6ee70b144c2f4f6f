use crate::day::{Day, DayRangeError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub(crate) const PLACEHOLDER_IMAGE: &str = "placeholder.svg";

const FALLBACK_MESSAGE: &str = "Nothing has been hidden behind this door yet, \
    but every day of December still deserves a little surprise.";

/// What's behind a door.  Each field may be left out, in which case a
/// placeholder is shown in its place.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct DayContent {
    pub(crate) title: Option<String>,
    pub(crate) image: Option<String>,
    /// Description of the image, shown next to its reference
    pub(crate) alt: Option<String>,
    pub(crate) message: Option<String>,
}

/// Lookup table from doors to their contents, plus the text of the logo cell
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ContentTable {
    heading: String,
    byline: String,
    days: BTreeMap<Day, DayContent>,
}

impl ContentTable {
    pub(crate) fn builtin() -> ContentTable {
        let mut days = BTreeMap::new();
        days.insert(
            Day::FIRST,
            DayContent {
                title: Some(String::from("First Day of December")),
                image: Some(String::from(PLACEHOLDER_IMAGE)),
                alt: None,
                message: Some(String::from(
                    "Day 1: Welcome to your advent calendar journey!",
                )),
            },
        );
        if let Some(second) = Day::new(2) {
            days.insert(
                second,
                DayContent {
                    title: Some(String::from("Second Day of December")),
                    image: Some(String::from(PLACEHOLDER_IMAGE)),
                    alt: None,
                    message: Some(String::from("Day 2: The journey continues!")),
                },
            );
        }
        ContentTable {
            heading: String::from("Advent Calendar"),
            byline: String::from("MyAdvent"),
            days,
        }
    }

    /// Reads a TOML content file and lays its entries over the built-in
    /// table
    pub(crate) fn load(path: &Path) -> Result<ContentTable, ContentError> {
        let src = fs::read_to_string(path).map_err(|source| ContentError::Read {
            path: path.to_owned(),
            source,
        })?;
        ContentTable::builtin().merge_toml(path, &src)
    }

    fn merge_toml(mut self, path: &Path, src: &str) -> Result<ContentTable, ContentError> {
        let raw =
            toml::from_str::<RawContentFile>(src).map_err(|source| ContentError::Parse {
                path: path.to_owned(),
                source,
            })?;
        if let Some(heading) = raw.heading {
            self.heading = heading;
        }
        if let Some(byline) = raw.byline {
            self.byline = byline;
        }
        for (key, content) in raw.day {
            let day = match key.trim().parse::<u8>() {
                Ok(n) => {
                    Day::try_from(n).map_err(|source| ContentError::DayRange { key, source })?
                }
                Err(source) => return Err(ContentError::DayKey { key, source }),
            };
            self.days.insert(day, content);
        }
        Ok(self)
    }

    pub(crate) fn heading(&self) -> &str {
        &self.heading
    }

    pub(crate) fn byline(&self) -> &str {
        &self.byline
    }

    pub(crate) fn get(&self, day: Day) -> Option<&DayContent> {
        self.days.get(&day)
    }

    pub(crate) fn title(&self, day: Day) -> String {
        self.get(day)
            .and_then(|c| c.title.clone())
            .unwrap_or_else(|| format!("Day {day}"))
    }

    pub(crate) fn image(&self, day: Day) -> &str {
        self.get(day)
            .and_then(|c| c.image.as_deref())
            .unwrap_or(PLACEHOLDER_IMAGE)
    }

    pub(crate) fn alt(&self, day: Day) -> Option<&str> {
        self.get(day).and_then(|c| c.alt.as_deref())
    }

    pub(crate) fn message(&self, day: Day) -> &str {
        self.get(day)
            .and_then(|c| c.message.as_deref())
            .unwrap_or(FALLBACK_MESSAGE)
    }

    /// Text shown on the face of an opened door
    pub(crate) fn cell_message(&self, day: Day) -> String {
        self.get(day)
            .and_then(|c| c.message.clone())
            .unwrap_or_else(|| format!("Content for day {day}"))
    }
}

impl Default for ContentTable {
    fn default() -> ContentTable {
        ContentTable::builtin()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawContentFile {
    heading: Option<String>,
    byline: Option<String>,
    #[serde(default)]
    day: BTreeMap<String, DayContent>,
}

#[derive(Debug, Error)]
pub(crate) enum ContentError {
    #[error("failed to read content file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse content file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("content file has an entry for {key:?}, which is not a day number")]
    DayKey {
        key: String,
        #[source]
        source: ParseIntError,
    },
    #[error("content file has an entry for day {key:?}")]
    DayRange {
        key: String,
        #[source]
        source: DayRangeError,
    },
}

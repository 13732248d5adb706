//! Textual page events for scripted simulation.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::carousel::AUTO_ADVANCE_REGION;
use crate::tabs::TabId;

/// Something that happens to the page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// A tab control was clicked
    Tab(TabId),
    /// Next-slide arrow of a carousel region
    Next(String),
    /// Previous-slide arrow of a carousel region
    Prev(String),
    /// Indicator click (any index; out of range wraps)
    GoTo(String, isize),
    /// Virtual time passes
    Wait(Duration),
    ScrollLeft,
    ScrollRight,
    /// Window resize giving the strip a new width
    Resize(f64),
}

/// Error parsing a [`PageEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventParseError {
    Empty,
    UnknownKind(String),
    MissingArgument(&'static str),
    InvalidArgument { event: &'static str, value: String },
}

impl fmt::Display for EventParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty event"),
            Self::UnknownKind(kind) => write!(f, "unknown event '{}'", kind),
            Self::MissingArgument(event) => write!(f, "'{}' needs an argument", event),
            Self::InvalidArgument { event, value } => {
                write!(f, "invalid argument '{}' for '{}'", value, event)
            }
        }
    }
}

impl std::error::Error for EventParseError {}

fn region(arg: Option<&str>) -> String {
    arg.filter(|s| !s.is_empty())
        .unwrap_or(AUTO_ADVANCE_REGION)
        .to_string()
}

fn invalid(event: &'static str, value: &str) -> EventParseError {
    EventParseError::InvalidArgument {
        event,
        value: value.to_string(),
    }
}

impl FromStr for PageEvent {
    type Err = EventParseError;

    /// Parse `kind[:arg[:arg]]`, e.g. `tab:task2`, `goto:outcome:-1`, `wait:5000`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EventParseError::Empty);
        }
        let mut parts = s.splitn(3, ':');
        let kind = parts.next().unwrap_or_default();
        let first = parts.next();
        let second = parts.next();

        match kind {
            "tab" => {
                let arg = first.ok_or(EventParseError::MissingArgument("tab"))?;
                arg.parse().map(PageEvent::Tab).map_err(|_| invalid("tab", arg))
            }
            "next" => Ok(PageEvent::Next(region(first))),
            "prev" => Ok(PageEvent::Prev(region(first))),
            "goto" => {
                // `goto:<n>` targets the default region
                let (region_arg, index) = match (first, second) {
                    (Some(r), Some(n)) => (Some(r), n),
                    (Some(n), None) => (None, n),
                    _ => return Err(EventParseError::MissingArgument("goto")),
                };
                let n = index.parse().map_err(|_| invalid("goto", index))?;
                Ok(PageEvent::GoTo(region(region_arg), n))
            }
            "wait" => {
                let arg = first.ok_or(EventParseError::MissingArgument("wait"))?;
                let ms: u64 = arg.parse().map_err(|_| invalid("wait", arg))?;
                Ok(PageEvent::Wait(Duration::from_millis(ms)))
            }
            "scroll" => match first {
                Some("left") => Ok(PageEvent::ScrollLeft),
                Some("right") => Ok(PageEvent::ScrollRight),
                Some(other) => Err(invalid("scroll", other)),
                None => Err(EventParseError::MissingArgument("scroll")),
            },
            "resize" => {
                let arg = first.ok_or(EventParseError::MissingArgument("resize"))?;
                let width: f64 = arg.parse().map_err(|_| invalid("resize", arg))?;
                if !width.is_finite() || width < 0.0 {
                    return Err(invalid("resize", arg));
                }
                Ok(PageEvent::Resize(width))
            }
            other => Err(EventParseError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for PageEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tab(tab) => write!(f, "tab:{}", tab),
            Self::Next(region) => write!(f, "next:{}", region),
            Self::Prev(region) => write!(f, "prev:{}", region),
            Self::GoTo(region, n) => write!(f, "goto:{}:{}", region, n),
            Self::Wait(by) => write!(f, "wait:{}", by.as_millis()),
            Self::ScrollLeft => write!(f, "scroll:left"),
            Self::ScrollRight => write!(f, "scroll:right"),
            Self::Resize(width) => write!(f, "resize:{}", width),
        }
    }
}

/// Parse a script: one event per line, `#` starts a comment.
pub fn parse_script(script: &str) -> Result<Vec<PageEvent>, (usize, EventParseError)> {
    script
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.split('#').next().unwrap_or_default().trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(number, line)| line.parse().map_err(|e| (number, e)))
        .collect()
}

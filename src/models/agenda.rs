use serde::{Deserialize, Serialize};

use crate::error::MalformedDuration;

/// An agenda entry as scraped from the meeting page, before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawAgendaEntry {
    /// Full title text with whitespace collapsed. Empty when the page markup
    /// lacked a title button; the normalizer drops such entries.
    pub title: String,
    /// Numbering prefix as printed ("3." for top-level items, "3.1" for
    /// sub-items), when the page exposes one.
    pub prefix: Option<String>,
    /// Declared duration as printed, already stripped of the "tijdsduur:"
    /// label and surrounding whitespace.
    pub raw_duration: Option<String>,
}

/// A normalized agenda item in authoritative meeting order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgendaItem {
    pub title: String,
    /// Declared duration in seconds. `None` when the page declared no
    /// duration or the declared one did not parse; such items stay in the
    /// sequence but are excluded from alignment windowing.
    pub declared_duration: Option<u64>,
}

impl AgendaItem {
    pub fn timed(title: impl Into<String>, seconds: u64) -> Self {
        Self {
            title: title.into(),
            declared_duration: Some(seconds),
        }
    }

    pub fn untimed(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            declared_duration: None,
        }
    }
}

/// Parse an `H:MM:SS` / `HH:MM:SS` duration string into total seconds.
pub fn parse_duration(raw: &str) -> Result<u64, MalformedDuration> {
    let mut fields = raw.split(':');
    let (hours, minutes, seconds) = match (fields.next(), fields.next(), fields.next(), fields.next())
    {
        (Some(h), Some(m), Some(s), None) => (h, m, s),
        _ => return Err(MalformedDuration(raw.to_string())),
    };

    let parse_field = |field: &str| {
        field
            .trim()
            .parse::<u64>()
            .map_err(|_| MalformedDuration(raw.to_string()))
    };

    Ok(parse_field(hours)? * 3600 + parse_field(minutes)? * 60 + parse_field(seconds)?)
}

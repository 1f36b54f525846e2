use tracing::warn;

use crate::models::{AgendaItem, RawAgendaEntry, parse_duration};

/// Opt-in predicate narrowing which raw entries become agenda items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AgendaFilter {
    /// Keep every titled entry, sub-items included.
    #[default]
    All,
    /// Keep only top-level numbered items. The platform prints top-level
    /// prefixes with a trailing dot ("3.") and sub-items without ("3.1").
    TopLevelOnly,
}

impl AgendaFilter {
    fn keeps(self, entry: &RawAgendaEntry) -> bool {
        match self {
            Self::All => true,
            Self::TopLevelOnly => entry
                .prefix
                .as_deref()
                .is_some_and(|p| p.trim().ends_with('.')),
        }
    }
}

/// Convert raw scraped entries into normalized agenda items.
///
/// Order is preserved and entries are never merged. Untitled entries are
/// dropped as soft anomalies; a duration that does not parse degrades the
/// item to "no declared duration" instead of failing the whole agenda.
pub fn normalize_agenda(entries: &[RawAgendaEntry], filter: AgendaFilter) -> Vec<AgendaItem> {
    let mut items = Vec::with_capacity(entries.len());

    for entry in entries {
        if entry.title.trim().is_empty() {
            warn!("Dropping agenda entry without a title");
            continue;
        }
        if !filter.keeps(entry) {
            continue;
        }

        let declared_duration = match entry.raw_duration.as_deref() {
            None => None,
            Some(raw) => match parse_duration(raw) {
                Ok(seconds) => Some(seconds),
                Err(err) => {
                    warn!("Agenda item {:?}: {}, keeping as undated", entry.title, err);
                    None
                }
            },
        };

        items.push(AgendaItem {
            title: entry.title.clone(),
            declared_duration,
        });
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, prefix: Option<&str>, duration: Option<&str>) -> RawAgendaEntry {
        RawAgendaEntry {
            title: title.to_string(),
            prefix: prefix.map(str::to_string),
            raw_duration: duration.map(str::to_string),
        }
    }

    #[test]
    fn test_normalize_keeps_order_and_sub_items() {
        let entries = vec![
            entry("1. Opening", Some("1."), Some("00:05:00")),
            entry("1.1 Spreekrecht", Some("1.1"), None),
            entry("2. Sluiting", Some("2."), Some("00:01:00")),
        ];

        let items = normalize_agenda(&entries, AgendaFilter::All);

        assert_eq!(items.len(), 3);
        assert_eq!(items[0], AgendaItem::timed("1. Opening", 300));
        assert_eq!(items[1], AgendaItem::untimed("1.1 Spreekrecht"));
        assert_eq!(items[2], AgendaItem::timed("2. Sluiting", 60));
    }

    #[test]
    fn test_untitled_entries_are_dropped() {
        let entries = vec![
            entry("", None, Some("00:10:00")),
            entry("   ", None, None),
            entry("1. Opening", None, None),
        ];

        let items = normalize_agenda(&entries, AgendaFilter::All);
        assert_eq!(items, vec![AgendaItem::untimed("1. Opening")]);
    }

    #[test]
    fn test_malformed_duration_degrades_to_undated() {
        let entries = vec![entry("1. Opening", None, Some("vijf minuten"))];

        let items = normalize_agenda(&entries, AgendaFilter::All);
        assert_eq!(items, vec![AgendaItem::untimed("1. Opening")]);
    }

    #[test]
    fn test_top_level_filter() {
        let entries = vec![
            entry("1. Opening", Some("1."), Some("00:05:00")),
            entry("1.1 Spreekrecht", Some("1.1"), Some("00:02:00")),
            entry("Hamerstuk", None, None),
            entry("2. Sluiting", Some("2."), None),
        ];

        let items = normalize_agenda(&entries, AgendaFilter::TopLevelOnly);
        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["1. Opening", "2. Sluiting"]);
    }
}

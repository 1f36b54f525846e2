use serde::{Deserialize, Serialize};

/// Final mapping of one agenda item to its reconstructed transcript excerpt.
///
/// Serialized into the `{id}_final.json` artifact as an array of these
/// records, in agenda order. The wire field name for the title is
/// `agendapunt`, matching the published artifact format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgendaAlignment {
    #[serde(rename = "agendapunt")]
    pub agenda_item: String,
    /// Window start, seconds from media start.
    pub start: u64,
    /// Window end, seconds from media start.
    pub end: u64,
    /// Concatenated text of every segment falling in the window, ellipsis
    /// runs stripped, no separator.
    pub text: String,
}

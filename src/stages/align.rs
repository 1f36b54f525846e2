use crate::models::{AgendaAlignment, AgendaItem, TranscriptSegment};

/// How a segment landing exactly on a shared window boundary is attributed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// Inclusive on both ends: a segment on the boundary between two
    /// contiguous windows is attributed to both.
    #[default]
    Inclusive,
    /// Half-open `[start, end)` for every timed item except the last, so
    /// each segment lands in exactly one window.
    HalfOpen,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlignConfig {
    pub boundary: BoundaryPolicy,
}

/// Map each timed agenda item to the transcript text spoken inside its
/// reconstructed time window.
///
/// The platform publishes declared durations, not actual start times, so
/// windows are rebuilt by running a cumulative cursor from 0: the meeting is
/// treated as a gapless concatenation of its timed items. Drift accumulates
/// additively when an item runs over, but no better mapping exists without a
/// ground-truth chapter stream.
///
/// Items without a declared duration emit no alignment and do not advance
/// the cursor. Selected segment text is concatenated in the given order with
/// no separator, after stripping literal `"..."` runs. An empty segment list
/// yields empty-text alignments, not an error.
pub fn align(
    items: &[AgendaItem],
    segments: &[TranscriptSegment],
    config: &AlignConfig,
) -> Vec<AgendaAlignment> {
    let timed = items
        .iter()
        .filter(|i| i.declared_duration.is_some())
        .count();

    let mut alignments = Vec::with_capacity(timed);
    let mut cursor = 0u64;

    for item in items {
        let Some(duration) = item.declared_duration else {
            continue;
        };
        let start = cursor;
        let end = cursor + duration;

        // The final timed window stays closed on both ends under either
        // policy; there is no next window to hand the boundary segment to.
        let end_inclusive = match config.boundary {
            BoundaryPolicy::Inclusive => true,
            BoundaryPolicy::HalfOpen => alignments.len() + 1 == timed,
        };

        let mut text = String::new();
        for segment in segments {
            let offset = segment.start;
            let before_end = if end_inclusive {
                offset <= end as f64
            } else {
                offset < end as f64
            };
            if offset >= start as f64 && before_end {
                text.push_str(&segment.text.replace("...", ""));
            }
        }

        alignments.push(AgendaAlignment {
            agenda_item: item.title.clone(),
            start,
            end,
            text,
        });
        cursor = end;
    }

    alignments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(start: f64, text: &str) -> TranscriptSegment {
        TranscriptSegment::new(start, text)
    }

    #[test]
    fn test_windows_are_contiguous_from_zero() {
        let items = vec![
            AgendaItem::timed("A", 60),
            AgendaItem::timed("B", 120),
            AgendaItem::timed("C", 30),
        ];

        let result = align(&items, &[], &AlignConfig::default());

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].start, 0);
        for pair in result.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(result[2].end, 210);
    }

    #[test]
    fn test_undated_items_are_excluded_and_do_not_advance_cursor() {
        let items = vec![
            AgendaItem::untimed("A"),
            AgendaItem::timed("B", 60),
            AgendaItem::untimed("C"),
            AgendaItem::timed("D", 120),
        ];

        let result = align(&items, &[], &AlignConfig::default());

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].agenda_item, "B");
        assert_eq!((result[0].start, result[0].end), (0, 60));
        assert_eq!(result[1].agenda_item, "D");
        assert_eq!((result[1].start, result[1].end), (60, 180));
    }

    #[test]
    fn test_inclusive_boundary_counts_segment_twice() {
        let items = vec![AgendaItem::timed("A", 60), AgendaItem::timed("B", 60)];
        let segments = vec![seg(59.0, "x"), seg(60.0, "y"), seg(61.0, "z")];

        let result = align(&items, &segments, &AlignConfig::default());

        assert_eq!(result[0].text, "xy");
        assert_eq!(result[1].text, "yz");
    }

    #[test]
    fn test_half_open_boundary_counts_segment_once() {
        let items = vec![AgendaItem::timed("A", 60), AgendaItem::timed("B", 60)];
        let segments = vec![seg(59.0, "x"), seg(60.0, "y"), seg(61.0, "z")];
        let config = AlignConfig {
            boundary: BoundaryPolicy::HalfOpen,
        };

        let result = align(&items, &segments, &config);

        assert_eq!(result[0].text, "x");
        assert_eq!(result[1].text, "yz");
    }

    #[test]
    fn test_half_open_final_window_keeps_closing_segment() {
        let items = vec![AgendaItem::timed("A", 60)];
        let segments = vec![seg(60.0, "end")];
        let config = AlignConfig {
            boundary: BoundaryPolicy::HalfOpen,
        };

        let result = align(&items, &segments, &config);
        assert_eq!(result[0].text, "end");
    }

    #[test]
    fn test_ellipsis_runs_are_stripped_before_concatenation() {
        let items = vec![AgendaItem::timed("A", 60)];
        let segments = vec![seg(1.0, "He"), seg(2.0, "llo...")];

        let result = align(&items, &segments, &AlignConfig::default());
        assert_eq!(result[0].text, "Hello");
    }

    #[test]
    fn test_segments_selected_in_given_order_even_if_unsorted() {
        let items = vec![AgendaItem::timed("A", 60)];
        let segments = vec![seg(30.0, "later "), seg(5.0, "earlier")];

        let result = align(&items, &segments, &AlignConfig::default());
        assert_eq!(result[0].text, "later earlier");
    }

    #[test]
    fn test_empty_segments_yield_empty_text() {
        let items = vec![AgendaItem::timed("A", 60)];
        let result = align(&items, &[], &AlignConfig::default());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].text, "");
    }

    #[test]
    fn test_empty_agenda_yields_empty_result() {
        let result = align(&[], &[seg(0.0, "x")], &AlignConfig::default());
        assert!(result.is_empty());
    }

    #[test]
    fn test_zero_duration_window_is_valid() {
        let items = vec![AgendaItem::timed("A", 0), AgendaItem::timed("B", 60)];
        let segments = vec![seg(0.0, "x")];

        let result = align(&items, &segments, &AlignConfig::default());

        assert_eq!((result[0].start, result[0].end), (0, 0));
        assert_eq!(result[0].text, "x");
        assert_eq!((result[1].start, result[1].end), (0, 60));
    }
}

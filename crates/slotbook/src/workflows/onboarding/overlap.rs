use super::domain::TimeRange;

/// The first pair of intersecting ranges found within one weekday, in start
/// order, kept so callers can name both windows in the error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapConflict {
    pub first: TimeRange,
    pub second: TimeRange,
}

/// Scan one weekday's ranges for an intersection.
///
/// Ranges are sorted by start minute and adjacent pairs compared; a conflict
/// exists when the earlier range is still open at the later one's start.
/// Exact back-to-back boundaries (`first.end == second.start`) are allowed.
/// Assumes every range is well-formed (`start < end`); submission validation
/// enforces that before calling in here.
pub fn find_conflict(ranges: &[TimeRange]) -> Option<OverlapConflict> {
    if ranges.len() < 2 {
        return None;
    }

    let mut sorted = ranges.to_vec();
    sorted.sort_by_key(|range| (range.start_minutes(), range.end_minutes()));

    sorted
        .windows(2)
        .find(|pair| pair[0].end_minutes() > pair[1].start_minutes())
        .map(|pair| OverlapConflict {
            first: pair[0],
            second: pair[1],
        })
}

/// Sort ranges into the canonical order used for persistence and responses.
pub fn sort_by_start(ranges: &mut [TimeRange]) {
    ranges.sort_by_key(|range| (range.start_minutes(), range.end_minutes()));
}

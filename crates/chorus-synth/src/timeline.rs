//! Annotation builder: turn placed intervals into a contiguous covering tier

use chorus_core::{Interval, IntervalTier, SILENCE_LABEL};

/// Tier name used for every generated annotation.
pub(crate) const TIER_NAME: &str = "vocalizations";

/// Tolerance for float comparison when deciding whether a gap exists.
const GAP_EPSILON: f64 = 1e-9;

/// Build a sorted, contiguous, non-overlapping tier spanning `[0, duration]`.
///
/// Placed intervals are kept as-is; unclaimed time before, between, and after
/// them is filled with silence intervals. The scheduler's cursor already
/// guarantees the placed intervals are sorted and disjoint, but interior gaps
/// are filled here regardless so the covering invariant never depends on it.
pub fn cover_timeline(placed: &[Interval], duration: f64) -> IntervalTier {
    let mut tier = IntervalTier::new(TIER_NAME, duration);

    if placed.is_empty() {
        tier.push(Interval::new(0.0, duration, SILENCE_LABEL));
        return tier;
    }

    let mut cursor = 0.0;
    for interval in placed {
        if interval.start > cursor + GAP_EPSILON {
            tier.push(Interval::new(cursor, interval.start, SILENCE_LABEL));
        }
        tier.push(interval.clone());
        cursor = interval.end;
    }
    if cursor < duration - GAP_EPSILON {
        tier.push(Interval::new(cursor, duration, SILENCE_LABEL));
    }

    tier
}

#[cfg(test)]
mod tests {
    use super::*;
    use chorus_core::OVERLAP_LABEL;

    fn assert_covers(tier: &IntervalTier, duration: f64) {
        assert!(!tier.is_empty());
        assert_eq!(tier.intervals[0].start, 0.0);
        assert!((tier.intervals.last().unwrap().end - duration).abs() < 1e-9);
        for pair in tier.intervals.windows(2) {
            assert!(
                (pair[0].end - pair[1].start).abs() < 1e-9,
                "gap between {:?} and {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn empty_input_yields_one_silence_interval() {
        let tier = cover_timeline(&[], 5.0);
        assert_eq!(tier.len(), 1);
        assert_eq!(tier.intervals[0].label, SILENCE_LABEL);
        assert_covers(&tier, 5.0);
    }

    #[test]
    fn leading_and_trailing_gaps_are_filled() {
        let placed = vec![Interval::new(1.0, 2.0, OVERLAP_LABEL)];
        let tier = cover_timeline(&placed, 5.0);
        assert_eq!(tier.len(), 3);
        assert_eq!(tier.intervals[0].label, SILENCE_LABEL);
        assert_eq!(tier.intervals[1].label, OVERLAP_LABEL);
        assert_eq!(tier.intervals[2].label, SILENCE_LABEL);
        assert_covers(&tier, 5.0);
    }

    #[test]
    fn interior_gaps_are_filled_defensively() {
        let placed = vec![
            Interval::new(0.0, 1.0, OVERLAP_LABEL),
            Interval::new(2.5, 3.0, OVERLAP_LABEL),
        ];
        let tier = cover_timeline(&placed, 4.0);
        assert_eq!(tier.len(), 4);
        assert_eq!(tier.intervals[1].label, SILENCE_LABEL);
        assert_eq!(tier.intervals[1].start, 1.0);
        assert_eq!(tier.intervals[1].end, 2.5);
        assert_covers(&tier, 4.0);
    }

    #[test]
    fn touching_intervals_need_no_filler() {
        let placed = vec![
            Interval::new(0.0, 2.0, OVERLAP_LABEL),
            Interval::new(2.0, 4.0, OVERLAP_LABEL),
        ];
        let tier = cover_timeline(&placed, 4.0);
        assert_eq!(tier.len(), 2);
        assert_covers(&tier, 4.0);
    }
}

//! Plain-text to source-document offset mappings.
//!
//! Every query here works in character offsets, never bytes, because the
//! editor highlight surface and the markup parser both report character
//! positions.

/// Records that the half-open plain-text range `[plain_start, plain_end)`
/// was produced verbatim, character for character, from the source range
/// `[source_start, source_end)`.
///
/// Entries in one map are sorted by `plain_start` and non-overlapping in
/// plain-text space. Equal plain/source lengths are NOT guaranteed: entries
/// clipped during chunk splitting carry interpolated source ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetMapping {
    pub plain_start: usize,
    pub plain_end: usize,
    pub source_start: usize,
    pub source_end: usize,
}

impl OffsetMapping {
    pub fn new(plain_start: usize, plain_end: usize, source_start: usize, source_end: usize) -> Self {
        Self {
            plain_start,
            plain_end,
            source_start,
            source_end,
        }
    }

    /// Whether this entry overlaps the plain-text range `[start, end)`.
    pub(crate) fn overlaps(&self, start: usize, end: usize) -> bool {
        self.plain_start < end && self.plain_end > start
    }

    /// Source position for a plain position inside this entry, by linear
    /// offset. Clamped into the entry's source range so clipped entries
    /// with mismatched lengths can never produce an out-of-range position.
    fn project(&self, plain_pos: usize) -> usize {
        let delta = plain_pos.saturating_sub(self.plain_start);
        self.source_start.saturating_add(delta).min(self.source_end)
    }

    /// Source position for a plain position inside this entry, scaled
    /// proportionally. Used when clipping an entry: markup density is not
    /// uniform across an entry, so this is deliberately approximate.
    fn interpolate(&self, plain_pos: usize) -> usize {
        let plain_len = self.plain_end.saturating_sub(self.plain_start);
        if plain_len == 0 {
            return self.source_start;
        }
        let source_len = self.source_end.saturating_sub(self.source_start);
        let delta = plain_pos.saturating_sub(self.plain_start).min(plain_len);
        self.source_start + (delta * source_len + plain_len / 2) / plain_len
    }
}

/// Map a plain-text range back to the minimal source range covering every
/// offset-map entry it overlaps.
///
/// A query fully inside one entry resolves by linear offset. A query
/// spanning several entries resolves to the union, which intentionally
/// includes any markup characters lying between the mapped spans (so a
/// multi-word highlight covers the `**`/`_` markers between words). A query
/// overlapping no entry is returned unchanged.
pub fn plain_offset_to_source(start: usize, end: usize, map: &[OffsetMapping]) -> (usize, usize) {
    let mut first: Option<&OffsetMapping> = None;
    let mut last: Option<&OffsetMapping> = None;

    for entry in map {
        if entry.overlaps(start, end) {
            if first.is_none() {
                first = Some(entry);
            }
            last = Some(entry);
        }
    }

    match (first, last) {
        (Some(first), Some(last)) => {
            let from = first.project(start.max(first.plain_start));
            let to = last.project(end.min(last.plain_end));
            (from, to.max(from))
        }
        _ => (start, end),
    }
}

/// Slice a map down to the plain range `[start, end)`, rebasing plain
/// offsets so they are relative to the range start. Source offsets stay
/// absolute.
///
/// Entries outside the range are dropped. Entries fully inside keep their
/// source range exactly; partially overlapping entries are clipped with the
/// source boundary interpolated proportionally (rounded).
pub fn slice_for_range(map: &[OffsetMapping], start: usize, end: usize) -> Vec<OffsetMapping> {
    let mut sliced = Vec::new();
    if start >= end {
        return sliced;
    }

    for entry in map {
        if !entry.overlaps(start, end) {
            continue;
        }

        let clip_start = entry.plain_start.max(start);
        let clip_end = entry.plain_end.min(end);
        if clip_start >= clip_end {
            continue;
        }

        let (source_start, source_end) =
            if clip_start == entry.plain_start && clip_end == entry.plain_end {
                (entry.source_start, entry.source_end)
            } else {
                (entry.interpolate(clip_start), entry.interpolate(clip_end))
            };

        sliced.push(OffsetMapping {
            plain_start: clip_start - start,
            plain_end: clip_end - start,
            source_start,
            source_end: source_end.max(source_start),
        });
    }

    sliced
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_query_inside_single_entry() {
        let map = vec![OffsetMapping::new(0, 10, 100, 110)];
        assert_eq!(plain_offset_to_source(3, 7, &map), (103, 107));
    }

    #[test]
    fn test_query_spanning_entries_includes_gap() {
        // "see" at source 0..3, "here" at source 10..14, markup between.
        let map = vec![
            OffsetMapping::new(0, 3, 0, 3),
            OffsetMapping::new(4, 8, 10, 14),
        ];
        assert_eq!(plain_offset_to_source(0, 8, &map), (0, 14));
    }

    #[test]
    fn test_query_with_no_overlap_is_identity() {
        let map = vec![OffsetMapping::new(10, 20, 50, 60)];
        assert_eq!(plain_offset_to_source(0, 5, &map), (0, 5));
        assert_eq!(plain_offset_to_source(25, 30, &map), (25, 30));
    }

    #[test]
    fn test_query_on_empty_map_is_identity() {
        assert_eq!(plain_offset_to_source(3, 9, &[]), (3, 9));
    }

    #[test]
    fn test_query_partially_overlapping_entry() {
        let map = vec![OffsetMapping::new(5, 10, 105, 110)];
        // Query starts before the entry: the start clamps to the entry.
        assert_eq!(plain_offset_to_source(2, 8, &map), (105, 108));
    }

    #[test]
    fn test_projection_clamped_for_short_source_entry() {
        // Clipped entry whose source range is shorter than its plain range.
        let map = vec![OffsetMapping::new(0, 10, 100, 104)];
        let (from, to) = plain_offset_to_source(8, 10, &map);
        assert!(from <= to);
        assert!(to <= 104);
    }

    #[test]
    fn test_slice_drops_disjoint_entries() {
        let map = vec![
            OffsetMapping::new(0, 5, 0, 5),
            OffsetMapping::new(20, 25, 40, 45),
        ];
        let sliced = slice_for_range(&map, 0, 10);
        assert_eq!(sliced, vec![OffsetMapping::new(0, 5, 0, 5)]);
    }

    #[test]
    fn test_slice_rebases_contained_entry() {
        let map = vec![OffsetMapping::new(20, 25, 40, 45)];
        let sliced = slice_for_range(&map, 18, 30);
        assert_eq!(sliced, vec![OffsetMapping::new(2, 7, 40, 45)]);
    }

    #[test]
    fn test_slice_interpolates_clipped_entry() {
        // Entry covering plain [0,10) -> source [100,200), clipped to [0,5)
        // yields source [100,150): proportional.
        let map = vec![OffsetMapping::new(0, 10, 100, 200)];
        let sliced = slice_for_range(&map, 0, 5);
        assert_eq!(sliced, vec![OffsetMapping::new(0, 5, 100, 150)]);
    }

    #[test]
    fn test_slice_interpolates_both_boundaries() {
        let map = vec![OffsetMapping::new(0, 10, 100, 200)];
        let sliced = slice_for_range(&map, 2, 8);
        assert_eq!(sliced, vec![OffsetMapping::new(0, 6, 120, 180)]);
    }

    #[test]
    fn test_slice_empty_range() {
        let map = vec![OffsetMapping::new(0, 10, 0, 10)];
        assert!(slice_for_range(&map, 4, 4).is_empty());
    }

    proptest! {
        // Containment roundtrip: any sub-range of a 1:1 entry maps to a
        // source range of the same length at the same relative position.
        #[test]
        fn prop_containment_roundtrip(
            plain_start in 0usize..1000,
            len in 1usize..200,
            a_off in 0usize..200,
            b_off in 0usize..200,
            source_start in 0usize..10_000,
        ) {
            let a_off = a_off % len;
            let b_off = a_off + (b_off % (len - a_off)) + 1;
            prop_assume!(b_off <= len);

            let entry = OffsetMapping::new(
                plain_start,
                plain_start + len,
                source_start,
                source_start + len,
            );
            let a = plain_start + a_off;
            let b = plain_start + b_off;

            let (from, to) = plain_offset_to_source(a, b, &[entry]);
            prop_assert_eq!(to - from, b - a);
            prop_assert_eq!(from - source_start, a - plain_start);
        }

        // Slicing never produces an entry outside the requested range and
        // never inverts a source range, whatever the entry shape.
        #[test]
        fn prop_slice_stays_in_bounds(
            plain_start in 0usize..100,
            plain_len in 0usize..50,
            source_start in 0usize..100,
            source_len in 0usize..80,
            range_start in 0usize..120,
            range_len in 0usize..60,
        ) {
            let entry = OffsetMapping::new(
                plain_start,
                plain_start + plain_len,
                source_start,
                source_start + source_len,
            );
            let sliced = slice_for_range(&[entry], range_start, range_start + range_len);
            for e in &sliced {
                prop_assert!(e.plain_end <= range_len);
                prop_assert!(e.plain_start <= e.plain_end);
                prop_assert!(e.source_start <= e.source_end);
            }
        }
    }
}

//! Frame-to-segment resolution.

use crate::index::SegmentIndex;

/// Frames this close to the tail of a fragment also pull in the following
/// fragment, absorbing frames whose decode dependency crosses the boundary.
/// The value is load-bearing: changing it changes which frames are
/// retrievable without an error.
pub const FRAGMENT_BOUNDARY_SLACK: u64 = 5;

/// Minimal ordered set of arena positions needed to decode `frame`.
///
/// The header (position 0) is always included. A frame before the first
/// fragment's coverage resolves to the header plus the first fragment pair.
/// A frame at or past the end of the indexed coverage resolves to the empty
/// set; callers treat that as a skip for batched frame lists, not an error.
pub fn resolve_frame(index: &SegmentIndex, frame: u64) -> Vec<usize> {
    let fragments = index.fragments();
    let last = match fragments.last() {
        Some(last) => last,
        None => return Vec::new(),
    };
    if frame >= last.frame_end() {
        return Vec::new();
    }

    let first = &fragments[0];
    if frame < first.frame_start {
        return vec![0, first.meta, first.data()];
    }

    // Owning fragment: the last one whose frame_start is at or below `frame`.
    let k = fragments.partition_point(|f| f.frame_start <= frame) - 1;
    let owner = &fragments[k];
    let mut picks = vec![0, owner.meta, owner.data()];
    if frame - owner.frame_start > owner.frame_samples.saturating_sub(FRAGMENT_BOUNDARY_SLACK) {
        if let Some(next) = fragments.get(k + 1) {
            picks.push(next.meta);
            picks.push(next.data());
        }
    }
    picks
}

/// Arena positions covering the inclusive frame range `[start, end]`.
///
/// Both endpoints are resolved independently; the result is the header plus
/// every position between the lowest and highest fragment segment touched by
/// either endpoint, so fragments lying fully inside the span are included
/// too, not merely the endpoint sets.
pub fn resolve_range(index: &SegmentIndex, start: u64, end: u64) -> Vec<usize> {
    let mut touched = resolve_frame(index, start);
    touched.extend(resolve_frame(index, end));

    let lo = touched.iter().copied().filter(|&p| p != 0).min();
    let hi = touched.iter().copied().max();
    match (lo, hi) {
        (Some(lo), Some(hi)) => {
            let mut picks = Vec::with_capacity(hi - lo + 2);
            picks.push(0);
            picks.extend(lo..=hi);
            picks
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{Manifest, ManifestSegment, SegmentKind};

    fn fragment_index(coverage: &[(u64, u64)], first_offset: u64) -> SegmentIndex {
        let mut segments = vec![ManifestSegment {
            name: SegmentKind::Header,
            offset: 0,
            size: first_offset,
            frame_start: None,
            frame_samples: None,
        }];
        let mut offset = first_offset;
        for &(frame_start, frame_samples) in coverage {
            segments.push(ManifestSegment {
                name: SegmentKind::FragmentMeta,
                offset,
                size: 20,
                frame_start: Some(frame_start),
                frame_samples: Some(frame_samples),
            });
            segments.push(ManifestSegment {
                name: SegmentKind::FragmentData,
                offset: offset + 20,
                size: 5000,
                frame_start: None,
                frame_samples: None,
            });
            offset += 5020;
        }
        SegmentIndex::from_manifest(Manifest { segments }).unwrap()
    }

    /// The worked scenario: header(0,100), two 30-frame fragments.
    fn scenario_index() -> SegmentIndex {
        fragment_index(&[(0, 30), (30, 30)], 100)
    }

    #[test]
    fn mid_fragment_frame_resolves_to_one_pair() {
        let index = scenario_index();
        assert_eq!(resolve_frame(&index, 10), vec![0, 1, 2]);
    }

    #[test]
    fn boundary_frame_pulls_in_next_fragment() {
        let index = scenario_index();
        // Frame 28 is within the slack of fragment 0's boundary at 30.
        assert_eq!(resolve_frame(&index, 28), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn boundary_slack_is_exact() {
        let index = scenario_index();
        assert_eq!(resolve_frame(&index, 25), vec![0, 1, 2]);
        assert_eq!(resolve_frame(&index, 26), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn tail_of_last_fragment_has_no_next() {
        let index = scenario_index();
        assert_eq!(resolve_frame(&index, 59), vec![0, 3, 4]);
    }

    #[test]
    fn frame_past_coverage_resolves_to_nothing() {
        let index = scenario_index();
        assert!(resolve_frame(&index, 60).is_empty());
        assert!(resolve_frame(&index, 10_000).is_empty());
    }

    #[test]
    fn frame_before_first_fragment_gets_header_and_first_pair() {
        let index = fragment_index(&[(10, 30), (40, 30)], 100);
        assert_eq!(resolve_frame(&index, 3), vec![0, 1, 2]);
    }

    #[test]
    fn every_covered_frame_resolves_with_header_and_owner() {
        let index = fragment_index(&[(0, 30), (30, 30), (60, 25)], 100);
        for frame in 0..85 {
            let picks = resolve_frame(&index, frame);
            assert!(!picks.is_empty(), "frame {frame} resolved to nothing");
            assert_eq!(picks[0], 0, "frame {frame} is missing the header");
            let owner = index
                .fragments()
                .iter()
                .find(|f| f.frame_start <= frame && frame < f.frame_end())
                .unwrap();
            assert!(
                picks.contains(&owner.meta) && picks.contains(&owner.data()),
                "frame {frame} is missing its owning pair"
            );
            // Ordered, as the extractor expects.
            assert!(picks.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn range_fills_interior_fragments() {
        let index = fragment_index(&[(0, 30), (30, 30), (60, 30), (90, 30)], 100);
        // Endpoints own fragments 0 and 3; fragments 1 and 2 lie inside.
        let picks = resolve_range(&index, 5, 95);
        assert_eq!(picks, vec![0, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn range_is_superset_of_endpoint_resolutions() {
        let index = fragment_index(&[(0, 30), (30, 30), (60, 25)], 100);
        let (a, b) = (12, 70);
        let picks = resolve_range(&index, a, b);
        for p in resolve_frame(&index, a)
            .into_iter()
            .chain(resolve_frame(&index, b))
        {
            assert!(picks.contains(&p));
        }
    }

    #[test]
    fn range_fully_past_coverage_is_empty() {
        let index = scenario_index();
        assert!(resolve_range(&index, 100, 200).is_empty());
    }

    #[test]
    fn range_with_tail_past_coverage_still_resolves_head() {
        let index = scenario_index();
        // End frame resolves to nothing; the span still covers the start.
        let picks = resolve_range(&index, 10, 10_000);
        assert_eq!(picks, vec![0, 1, 2]);
    }
}

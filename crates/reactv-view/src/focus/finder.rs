//! Geometry of directional focus search.
//!
//! A candidate must lie in the search direction. Candidates overlapping the
//! source's beam (its extent perpendicular to the direction) beat those
//! outside it; ties are broken by `13 * major² + minor²`, where the major
//! axis runs along the direction and the minor axis between centers across
//! it.

use reactv_core::Rect;

use super::FocusDirection;

/// Returns `true` if `candidate` should replace `best` as the next focus
/// from `source`.
pub(crate) fn is_better_candidate(
    direction: FocusDirection,
    source: &Rect,
    candidate: &Rect,
    best: &Rect,
) -> bool {
    if !is_candidate(source, candidate, direction) {
        return false;
    }
    if !is_candidate(source, best, direction) {
        return true;
    }
    if beam_beats(direction, source, candidate, best) {
        return true;
    }
    if beam_beats(direction, source, best, candidate) {
        return false;
    }
    weighted_distance(direction, source, candidate) < weighted_distance(direction, source, best)
}

/// Returns `true` if `dest` lies at least partly in `direction` from `src`.
pub(crate) fn is_candidate(src: &Rect, dest: &Rect, direction: FocusDirection) -> bool {
    match direction {
        FocusDirection::Left => {
            (src.right > dest.right || src.left >= dest.right) && src.left > dest.left
        }
        FocusDirection::Right => {
            (src.left < dest.left || src.right <= dest.left) && src.right < dest.right
        }
        FocusDirection::Up => {
            (src.bottom > dest.bottom || src.top >= dest.bottom) && src.top > dest.top
        }
        FocusDirection::Down => {
            (src.top < dest.top || src.bottom <= dest.top) && src.bottom < dest.bottom
        }
        FocusDirection::Forward | FocusDirection::Backward => false,
    }
}

fn beam_beats(direction: FocusDirection, source: &Rect, rect1: &Rect, rect2: &Rect) -> bool {
    let rect1_in_beam = beams_overlap(direction, source, rect1);
    let rect2_in_beam = beams_overlap(direction, source, rect2);
    if rect2_in_beam || !rect1_in_beam {
        return false;
    }
    if !is_to_direction_of(direction, source, rect2) {
        return true;
    }
    // Sideways, being in the beam always wins.
    if matches!(direction, FocusDirection::Left | FocusDirection::Right) {
        return true;
    }
    major_axis_distance(direction, source, rect1) < major_axis_distance_to_far_edge(direction, source, rect2)
}

fn beams_overlap(direction: FocusDirection, r1: &Rect, r2: &Rect) -> bool {
    match direction {
        FocusDirection::Left | FocusDirection::Right => r2.bottom > r1.top && r2.top < r1.bottom,
        _ => r2.right > r1.left && r2.left < r1.right,
    }
}

fn is_to_direction_of(direction: FocusDirection, src: &Rect, dest: &Rect) -> bool {
    match direction {
        FocusDirection::Left => src.left >= dest.right,
        FocusDirection::Right => src.right <= dest.left,
        FocusDirection::Up => src.top >= dest.bottom,
        FocusDirection::Down => src.bottom <= dest.top,
        FocusDirection::Forward | FocusDirection::Backward => false,
    }
}

fn major_axis_distance(direction: FocusDirection, src: &Rect, dest: &Rect) -> i64 {
    let raw = match direction {
        FocusDirection::Left => src.left - dest.right,
        FocusDirection::Right => dest.left - src.right,
        FocusDirection::Up => src.top - dest.bottom,
        FocusDirection::Down => dest.top - src.bottom,
        FocusDirection::Forward | FocusDirection::Backward => 0,
    };
    i64::from(raw.max(0))
}

fn major_axis_distance_to_far_edge(direction: FocusDirection, src: &Rect, dest: &Rect) -> i64 {
    let raw = match direction {
        FocusDirection::Left => src.left - dest.left,
        FocusDirection::Right => dest.right - src.right,
        FocusDirection::Up => src.top - dest.top,
        FocusDirection::Down => dest.bottom - src.bottom,
        FocusDirection::Forward | FocusDirection::Backward => 1,
    };
    i64::from(raw.max(1))
}

fn minor_axis_distance(direction: FocusDirection, src: &Rect, dest: &Rect) -> i64 {
    let (a, b) = match direction {
        FocusDirection::Left | FocusDirection::Right => (
            src.top + src.height() / 2,
            dest.top + dest.height() / 2,
        ),
        _ => (
            src.left + src.width() / 2,
            dest.left + dest.width() / 2,
        ),
    };
    (i64::from(a) - i64::from(b)).abs()
}

fn weighted_distance(direction: FocusDirection, src: &Rect, dest: &Rect) -> i64 {
    let major = major_axis_distance(direction, src, dest);
    let minor = minor_axis_distance(direction, src, dest);
    13 * major * major + minor * minor
}

/// The rectangle every real candidate beats: `source` moved just past itself
/// against `direction`.
pub(crate) fn initial_best(direction: FocusDirection, source: &Rect) -> Rect {
    match direction {
        FocusDirection::Left => source.offset(source.width() + 1, 0),
        FocusDirection::Right => source.offset(-(source.width() + 1), 0),
        FocusDirection::Up => source.offset(0, source.height() + 1),
        FocusDirection::Down => source.offset(0, -(source.height() + 1)),
        FocusDirection::Forward | FocusDirection::Backward => *source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: i32, y: i32, w: i32, h: i32) -> Rect {
        Rect::from_origin_size(x, y, w, h)
    }

    #[test]
    fn test_candidates_must_lie_in_direction() {
        let src = rect(100, 100, 50, 50);
        assert!(is_candidate(&src, &rect(100, 200, 50, 50), FocusDirection::Down));
        assert!(!is_candidate(&src, &rect(100, 0, 50, 50), FocusDirection::Down));
        assert!(is_candidate(&src, &rect(0, 100, 50, 50), FocusDirection::Left));
        assert!(!is_candidate(&src, &src, FocusDirection::Right));
    }

    #[test]
    fn test_initial_best_is_never_a_candidate() {
        let src = rect(10, 10, 20, 20);
        for direction in FocusDirection::DIRECTIONAL {
            assert!(!is_candidate(&src, &initial_best(direction, &src), direction));
        }
    }

    #[test]
    fn test_beam_beats_nearer_offbeam_rect() {
        let src = rect(0, 0, 100, 50);
        let in_beam = rect(0, 100, 100, 50);
        let off_beam = rect(200, 60, 100, 50);
        assert!(is_better_candidate(FocusDirection::Down, &src, &in_beam, &off_beam));
        assert!(!is_better_candidate(FocusDirection::Down, &src, &off_beam, &in_beam));
    }

    #[test]
    fn test_weighted_distance_prefers_aligned() {
        let src = rect(100, 0, 50, 50);
        let aligned = rect(100, 100, 50, 50);
        let shifted = rect(130, 100, 50, 50);
        assert!(is_better_candidate(FocusDirection::Down, &src, &aligned, &shifted));
        assert_eq!(weighted_distance(FocusDirection::Down, &src, &aligned), 13 * 50 * 50);
    }
}

//! Set overlap between two ranked lists at a given depth, corrected for ties.
//!
//! A tied rank contributes all of its members to the cumulative set at once,
//! so with ties the set at depth `d` can hold more than `d` items. Counting
//! the raw intersection would then let a tie look like more agreement than
//! the same number of untied ranks could ever produce. The corrected overlap
//! pro-rates shared items by ranks consumed over items revealed, and never
//! exceeds the ranks either list actually has at that depth.
use std::collections::HashSet;
use std::hash::Hash;

use crate::types::{RankItem, RawOverlap};

/// Union of all items in the first `depth` ranks of `list`.
///
/// Depth past the end of the list simply stops growing the set.
pub fn set_at_depth<T: Eq + Hash>(list: &[RankItem<T>], depth: usize) -> HashSet<&T> {
    list.iter().take(depth).flat_map(RankItem::iter).collect()
}

/// Intersection size of the cumulative sets at `depth`, without tie correction.
pub fn raw_overlap<T: Eq + Hash>(
    list_a: &[RankItem<T>],
    list_b: &[RankItem<T>],
    depth: usize,
) -> RawOverlap {
    let set_a = set_at_depth(list_a, depth);
    let set_b = set_at_depth(list_b, depth);
    RawOverlap {
        shared: set_a.intersection(&set_b).count(),
        len_a: set_a.len(),
        len_b: set_b.len(),
    }
}

/// Tie-corrected overlap of `list_a` and `list_b` at `depth`.
///
/// Equals the plain intersection size when neither prefix contains a tie.
/// Returns 0.0 for depth 0 or when either prefix is empty.
pub fn overlap<T: Eq + Hash>(list_a: &[RankItem<T>], list_b: &[RankItem<T>], depth: usize) -> f64 {
    let raw = raw_overlap(list_a, list_b, depth);
    tie_corrected(
        &raw,
        list_a.len().min(depth),
        list_b.len().min(depth),
    )
}

/// Scale the raw intersection by ranks consumed (`ranks_a + ranks_b`) over
/// items revealed (`len_a + len_b`), capped by the ranks of either list.
///
/// With equal rank counts this is `2 * shared / (len_a + len_b) * depth`.
pub(crate) fn tie_corrected(raw: &RawOverlap, ranks_a: usize, ranks_b: usize) -> f64 {
    if raw.len_a == 0 || raw.len_b == 0 {
        return 0.0;
    }
    let scaled = (raw.shared * (ranks_a + ranks_b)) as f64 / (raw.len_a + raw.len_b) as f64;
    scaled.min(ranks_a.min(ranks_b) as f64)
}

//! Agreement (overlap ratio) at a depth and the per-depth overlap curve.
use std::collections::HashSet;
use std::hash::Hash;

use crate::error::{Result, check_depth};
use crate::overlap::{overlap, tie_corrected};
use crate::types::{RankItem, RawOverlap};

/// Proportion of shared items at `depth`: `overlap / depth`, in [0, 1].
pub fn agreement<T: Eq + Hash>(
    list_a: &[RankItem<T>],
    list_b: &[RankItem<T>],
    depth: usize,
) -> Result<f64> {
    check_depth(Some(depth))?;
    Ok(overlap(list_a, list_b, depth) / depth as f64)
}

/// Unweighted mean of `agreement(d)` for `d = 1..=depth`.
///
/// `depth` defaults to the shorter list's length. Independent of `p`; useful
/// as a sanity check next to the weighted estimates. Two lists with no
/// evaluable depth (either one empty, default depth) average to 0.0.
/// Depths past both lists cost nothing extra: the overlap is fixed there.
pub fn average_overlap<T: Eq + Hash>(
    list_a: &[RankItem<T>],
    list_b: &[RankItem<T>],
    depth: Option<usize>,
) -> Result<f64> {
    check_depth(depth)?;
    let depth = depth.unwrap_or_else(|| list_a.len().min(list_b.len()));
    if depth == 0 {
        return Ok(0.0);
    }

    let curve = OverlapCurve::new(list_a, list_b);
    let observed = curve.observed_depth().min(depth);
    let mut total: f64 = (1..=observed).map(|d| curve.agreement(d)).sum();
    if depth > observed {
        total += curve.at(observed) * (harmonic(depth) - harmonic(observed));
    }
    Ok(total / depth as f64)
}

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// `H(n) = 1 + 1/2 + ... + 1/n`, summed directly for small `n` and
/// from the asymptotic expansion otherwise.
fn harmonic(n: usize) -> f64 {
    if n < 64 {
        return (1..=n).map(|d| 1.0 / d as f64).sum();
    }
    let n = n as f64;
    let inv2 = 1.0 / (n * n);
    n.ln() + EULER_GAMMA + 0.5 / n - inv2 / 12.0 + inv2 * inv2 / 120.0
}

/// Tie-corrected overlaps `X_1..X_m`, built in one pass, where `m` is the
/// longer list's length.
///
/// Both cumulative sets grow one rank at a time and the shared count is
/// updated as items arrive, so the whole curve costs one walk over the items.
/// Past `m` neither set grows, so `at(d)` answers any depth from the last
/// stored value. `at(d)` matches `overlap(list_a, list_b, d)` for every `d`.
pub(crate) struct OverlapCurve {
    overlaps: Vec<f64>,
}

impl OverlapCurve {
    pub fn new<T: Eq + Hash>(list_a: &[RankItem<T>], list_b: &[RankItem<T>]) -> Self {
        let observed = list_a.len().max(list_b.len());
        let mut seen_a: HashSet<&T> = HashSet::new();
        let mut seen_b: HashSet<&T> = HashSet::new();
        let mut shared = 0usize;
        let mut overlaps = Vec::with_capacity(observed);

        for d in 1..=observed {
            if let Some(rank) = list_a.get(d - 1) {
                for item in rank {
                    if seen_a.insert(item) && seen_b.contains(item) {
                        shared += 1;
                    }
                }
            }
            if let Some(rank) = list_b.get(d - 1) {
                for item in rank {
                    if seen_b.insert(item) && seen_a.contains(item) {
                        shared += 1;
                    }
                }
            }

            let raw = RawOverlap { shared, len_a: seen_a.len(), len_b: seen_b.len() };
            overlaps.push(tie_corrected(&raw, list_a.len().min(d), list_b.len().min(d)));
        }

        OverlapCurve { overlaps }
    }

    /// Deepest rank at which either set still grows.
    pub fn observed_depth(&self) -> usize {
        self.overlaps.len()
    }

    /// Overlap at depth `d` (1-based). Zero at depth 0 or when both lists are empty.
    pub fn at(&self, d: usize) -> f64 {
        match d.min(self.overlaps.len()) {
            0 => 0.0,
            d => self.overlaps[d - 1],
        }
    }

    /// Agreement at depth `d` (1-based).
    pub fn agreement(&self, d: usize) -> f64 {
        self.at(d) / d as f64
    }
}

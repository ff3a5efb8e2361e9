//! Rank-biased overlap estimates: lower bound, residual, extrapolation.
//!
//! Formulas follow Webber, Moffat & Zobel, "A Similarity Measure for
//! Indefinite Rankings" (TOIS 2010): equation (11) for the lower bound
//! generalized to uneven lists, (30) for the residual and (32) for the
//! extrapolated estimate. Overlap at each depth is the tie-corrected overlap
//! from `overlap.rs`; without ties every formula reduces to the paper's.
//!
//! Geometric weights are accumulated term by term rather than through
//! closed-form series sums, which would divide by `1 - p`. Precision still
//! degrades as `p` approaches 1; that is a known limitation, not an error.
use std::hash::Hash;

use crate::agreement::OverlapCurve;
use crate::error::{Result, check_depth, check_persistence};
use crate::types::{RankItem, RboResult};

/// Both lists cut to the evaluation depth, shorter first, with their overlap curve.
struct Evaluation {
    /// Length of the shorter (truncated) list, `s`.
    short_len: usize,
    /// Length of the longer (truncated) list, `l`.
    long_len: usize,
    curve: OverlapCurve,
}

impl Evaluation {
    /// Validate arguments and build the overlap curve up to the longer list's length.
    ///
    /// Returns `None` when either list is empty at the evaluation depth.
    fn prepare<T: Eq + Hash>(
        list_a: &[RankItem<T>],
        list_b: &[RankItem<T>],
        p: f64,
        depth: Option<usize>,
    ) -> Result<Option<Self>> {
        check_persistence(p)?;
        check_depth(depth)?;

        let depth = depth.unwrap_or_else(|| list_a.len().min(list_b.len()));
        let list_a = &list_a[..list_a.len().min(depth)];
        let list_b = &list_b[..list_b.len().min(depth)];
        let (short, long) = if list_a.len() <= list_b.len() {
            (list_a, list_b)
        } else {
            (list_b, list_a)
        };

        if short.is_empty() {
            return Ok(None);
        }

        Ok(Some(Evaluation {
            short_len: short.len(),
            long_len: long.len(),
            curve: OverlapCurve::new(short, long),
        }))
    }

    /// Overlap once all of the shorter list has been seen, `X_s`.
    fn short_overlap(&self) -> f64 {
        self.curve.at(self.short_len)
    }

    /// Overlap over everything observed, `X_l`.
    fn long_overlap(&self) -> f64 {
        self.curve.at(self.long_len)
    }

    fn min(&self, p: f64) -> f64 {
        let x_l = self.long_overlap();
        let mut sum = 0.0;
        let mut weight = 1.0;
        for d in 1..=self.long_len {
            weight *= p;
            sum += weight / d as f64 * (self.curve.at(d) - x_l);
        }
        (1.0 - p) / p * (sum - x_l * (-p).ln_1p())
    }

    fn res(&self, p: f64) -> f64 {
        let s = self.short_len;
        let l = self.long_len;
        let x_l = self.long_overlap();

        // Past depth `l + s - x_l` every unseen item could agree, so the gap
        // between best and worst case is `d - x_l` from there on.
        let crossover = ((l + s) as f64 - x_l).ceil() as usize;
        let horizon = crossover.max(l);

        let mut gap_sum = 0.0;
        let mut harmonic = 0.0;
        let mut weight = 1.0;
        for d in 1..=horizon {
            weight *= p;
            harmonic += weight / d as f64;
            if d > s {
                let best_case = ((d - s) + d.saturating_sub(l)) as f64;
                let gap = best_case.min(d as f64 - x_l);
                gap_sum += weight * gap / d as f64;
            }
        }

        // Tail beyond the horizon: sum of p^d * (d - x_l) / d for d > horizon.
        let log_tail = -(-p).ln_1p() - harmonic;
        (1.0 - p) / p * (gap_sum - x_l * log_tail) + weight
    }

    fn ext(&self, p: f64) -> f64 {
        let s = self.short_len;
        let l = self.long_len;
        let x_s = self.short_overlap();
        let x_l = self.long_overlap();

        let mut observed = 0.0;
        let mut extrapolated = 0.0;
        let mut weight = 1.0;
        for d in 1..=l {
            weight *= p;
            observed += weight * self.curve.agreement(d);
            if d > s {
                extrapolated += weight * x_s * (d - s) as f64 / (s * d) as f64;
            }
        }

        (1.0 - p) / p * (observed + extrapolated) + weight * ((x_l - x_s) / l as f64 + x_s / s as f64)
    }
}

/// Complete RBO analysis of two rankings.
///
/// Lists must already be sorted, best first; each rank is a single item or a
/// tie. `p` is the probability of continuing from rank `k` to rank `k + 1`
/// and must lie strictly between 0 and 1. `depth` defaults to the shorter
/// list's length; a larger depth uses only the ranks each list actually has.
///
/// Either list empty at the evaluation depth yields all-zero estimates.
pub fn rbo<T: Eq + Hash>(
    list_a: &[RankItem<T>],
    list_b: &[RankItem<T>],
    p: f64,
    depth: Option<usize>,
) -> Result<RboResult> {
    let Some(eval) = Evaluation::prepare(list_a, list_b, p, depth)? else {
        return Ok(RboResult::default());
    };

    Ok(RboResult {
        min: eval.min(p),
        res: eval.res(p),
        ext: eval.ext(p),
    })
}

/// Tight lower bound on RBO. See `rbo()` for the arguments.
pub fn rbo_min<T: Eq + Hash>(
    list_a: &[RankItem<T>],
    list_b: &[RankItem<T>],
    p: f64,
    depth: Option<usize>,
) -> Result<f64> {
    Ok(Evaluation::prepare(list_a, list_b, p, depth)?.map_or(0.0, |eval| eval.min(p)))
}

/// Upper bound on the agreement beyond the evaluated depth. See `rbo()` for the arguments.
pub fn rbo_res<T: Eq + Hash>(
    list_a: &[RankItem<T>],
    list_b: &[RankItem<T>],
    p: f64,
    depth: Option<usize>,
) -> Result<f64> {
    Ok(Evaluation::prepare(list_a, list_b, p, depth)?.map_or(0.0, |eval| eval.res(p)))
}

/// Point estimate extrapolating the observed agreement. See `rbo()` for the arguments.
pub fn rbo_ext<T: Eq + Hash>(
    list_a: &[RankItem<T>],
    list_b: &[RankItem<T>],
    p: f64,
    depth: Option<usize>,
) -> Result<f64> {
    Ok(Evaluation::prepare(list_a, list_b, p, depth)?.map_or(0.0, |eval| eval.ext(p)))
}

/// RBO truncated at `depth`: `(1 - p) * sum of p^(d-1) * agreement(d)` for `d = 1..=depth`.
///
/// Only the prefix weight; no bound or extrapolation for the tail. Dividing
/// by `1 - p^depth` gives a weighted mean of agreements that tends to
/// `average_overlap()` as `p` approaches 1.
pub fn rbo_at_depth<T: Eq + Hash>(
    list_a: &[RankItem<T>],
    list_b: &[RankItem<T>],
    p: f64,
    depth: Option<usize>,
) -> Result<f64> {
    check_persistence(p)?;
    check_depth(depth)?;
    let depth = depth.unwrap_or_else(|| list_a.len().min(list_b.len()));
    if depth == 0 {
        return Ok(0.0);
    }

    let curve = OverlapCurve::new(list_a, list_b);
    let observed = curve.observed_depth().min(depth);
    let mut sum = 0.0;
    let mut weight = 1.0;
    for d in 1..=observed {
        sum += weight * curve.agreement(d);
        weight *= p;
    }
    if depth > observed && observed > 0 {
        // Past both lists agreement(d) is X_m / d.
        sum += curve.at(observed) * weighted_harmonic_tail(p, observed, depth);
    }
    Ok((1.0 - p) * sum)
}

/// Log of the largest tail mass treated as zero when closing the series.
const NEGLIGIBLE_TAIL_LN: f64 = -40.0;

/// `sum of p^(d-1) / d` for `d` in `(from, to]`.
///
/// Once the mass beyond `to` is negligible the series is closed with
/// `sum over all d of p^d / d = -ln(1 - p)`, so a huge `to` costs `O(from)`.
fn weighted_harmonic_tail(p: f64, from: usize, to: usize) -> f64 {
    let to_f = to as f64;
    let beyond_ln = to_f * p.ln() - ((1.0 - p) * (to_f + 1.0)).ln();
    if beyond_ln < NEGLIGIBLE_TAIL_LN {
        let mut head = 0.0;
        let mut weight = 1.0;
        for d in 1..=from {
            weight *= p;
            head += weight / d as f64;
        }
        return (-(-p).ln_1p() - head).max(0.0) / p;
    }

    let mut sum = 0.0;
    let mut weight = p.powf(from as f64);
    for d in from + 1..=to {
        sum += weight / d as f64;
        weight *= p;
    }
    sum
}

//! Score-map adapter: turn `item -> score` maps into tie-grouped rankings.
//!
//! Items with equal scores always land in one tie, and the position of each
//! group depends on its score alone, never on map iteration order.
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{InvalidArgument, Result};
use crate::estimator::rbo;
use crate::types::{RankItem, RboResult, ScoreOrder};

/// Rank the keys of `scores`, grouping equal scores into ties.
///
/// `ScoreOrder::Descending` puts the highest score first; `Ascending` suits
/// rank-like scores where lower is better. A NaN score is rejected.
pub fn rank_by_score<T: Eq + Hash + Debug>(
    scores: &HashMap<T, f64>,
    order: ScoreOrder,
) -> Result<Vec<RankItem<&T>>> {
    let mut entries: Vec<(&T, f64)> = Vec::with_capacity(scores.len());
    for (item, &score) in scores {
        if score.is_nan() {
            return Err(InvalidArgument::NonNumericScore { item: format!("{item:?}") });
        }
        entries.push((item, score));
    }

    match order {
        ScoreOrder::Descending => entries.sort_by(|a, b| b.1.total_cmp(&a.1)),
        ScoreOrder::Ascending => entries.sort_by(|a, b| a.1.total_cmp(&b.1)),
    }

    // Sorted, so equal scores are adjacent. `==` also merges -0.0 with 0.0.
    let mut ranking: Vec<RankItem<&T>> = Vec::new();
    let mut group: Vec<&T> = Vec::new();
    let mut group_score = f64::NAN;
    for (item, score) in entries {
        if !group.is_empty() && score != group_score {
            ranking.push(RankItem::tied(group.drain(..)));
        }
        group_score = score;
        group.push(item);
    }
    if !group.is_empty() {
        ranking.push(RankItem::tied(group));
    }

    Ok(ranking)
}

/// `rbo()` over two score maps, each ranked with `rank_by_score()`.
pub fn rbo_dict<T: Eq + Hash + Debug>(
    scores_a: &HashMap<T, f64>,
    scores_b: &HashMap<T, f64>,
    p: f64,
    order: ScoreOrder,
    depth: Option<usize>,
) -> Result<RboResult> {
    let list_a = rank_by_score(scores_a, order)?;
    let list_b = rank_by_score(scores_b, order)?;
    rbo(&list_a, &list_b, p, depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(pairs: &[(&'static str, f64)]) -> HashMap<&'static str, f64> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_rank_descending_groups_ties() {
        let map = scores(&[("a", 1.0), ("b", 2.0), ("c", 1.0), ("d", 3.0)]);
        let ranking = rank_by_score(&map, ScoreOrder::Descending).unwrap();
        assert_eq!(ranking.len(), 3);
        assert_eq!(ranking[0], RankItem::Single(&"d"));
        assert_eq!(ranking[1], RankItem::Single(&"b"));
        assert_eq!(ranking[2], RankItem::tied([&"a", &"c"]));
    }

    #[test]
    fn test_rank_ascending() {
        let map = scores(&[("a", 1.0), ("b", 2.0), ("c", 2.0), ("d", 3.0)]);
        let ranking = rank_by_score(&map, ScoreOrder::Ascending).unwrap();
        assert_eq!(ranking, vec![
            RankItem::Single(&"a"),
            RankItem::tied([&"b", &"c"]),
            RankItem::Single(&"d"),
        ]);
    }

    #[test]
    fn test_ties_independent_of_insertion_order() {
        // Same scores inserted in many different orders must rank identically
        let items = ["e", "a", "d", "b", "c", "f"];
        let score_of = |item: &str| match item {
            "a" | "b" | "c" => 5.0,
            "d" => 7.0,
            _ => 1.0,
        };

        let reference: HashMap<&str, f64> = items.iter().map(|&i| (i, score_of(i))).collect();
        let expected = rank_by_score(&reference, ScoreOrder::Descending).unwrap();
        assert_eq!(expected.len(), 3);

        for rotation in 0..items.len() {
            let mut rotated = items;
            rotated.rotate_left(rotation);
            let map: HashMap<&str, f64> = rotated.iter().map(|&i| (i, score_of(i))).collect();
            assert_eq!(rank_by_score(&map, ScoreOrder::Descending).unwrap(), expected);
        }
    }

    #[test]
    fn test_signed_zero_is_one_score() {
        let map = scores(&[("a", 0.0), ("b", -0.0)]);
        let ranking = rank_by_score(&map, ScoreOrder::Descending).unwrap();
        assert_eq!(ranking, vec![RankItem::tied([&"a", &"b"])]);
    }

    #[test]
    fn test_nan_score_rejected() {
        let map = scores(&[("a", 1.0), ("b", f64::NAN)]);
        let err = rank_by_score(&map, ScoreOrder::Descending).unwrap_err();
        assert_eq!(err, InvalidArgument::NonNumericScore { item: "\"b\"".to_string() });
    }

    #[test]
    fn test_empty_map() {
        let map: HashMap<&str, f64> = HashMap::new();
        assert!(rank_by_score(&map, ScoreOrder::Descending).unwrap().is_empty());
        let result = rbo_dict(&map, &map, 0.9, ScoreOrder::Descending, None).unwrap();
        assert_eq!(result, RboResult::default());
    }

    #[test]
    fn test_rbo_dict_matches_literal_lists() {
        let a = scores(&[("a", 1.0), ("b", 2.0), ("c", 1.0), ("d", 3.0)]);
        let b = scores(&[("a", 1.0), ("b", 2.0), ("c", 2.0), ("d", 3.0)]);

        // Ascending scores give [{a, c}, b, d] and [a, {b, c}, d]
        let from_scores = rbo_dict(&a, &b, 0.9, ScoreOrder::Ascending, None).unwrap();
        let list_a = vec![RankItem::tied(["a", "c"]), RankItem::Single("b"), RankItem::Single("d")];
        let list_b = vec![RankItem::Single("a"), RankItem::tied(["b", "c"]), RankItem::Single("d")];
        let from_lists = rbo(&list_a, &list_b, 0.9, None).unwrap();

        assert!((from_scores.min - from_lists.min).abs() < 1e-12);
        assert!((from_scores.res - from_lists.res).abs() < 1e-12);
        assert!((from_scores.ext - from_lists.ext).abs() < 1e-12);
        assert!((from_scores.min - 0.48919503).abs() < 1e-8);
    }

    #[test]
    fn test_rbo_dict_descending_default() {
        let a = scores(&[("a", 1.0), ("b", 2.0), ("c", 1.0), ("d", 3.0)]);
        let b = scores(&[("a", 1.0), ("b", 2.0), ("c", 2.0), ("d", 3.0)]);
        // Descending: [d, b, {a, c}] vs [d, {b, c}, a]
        let result = rbo_dict(&a, &b, 0.9, ScoreOrder::default(), None).unwrap();
        assert!((result.min - 0.50452836).abs() < 1e-8, "min = {}", result.min);
        assert!((result.ext - 0.982).abs() < 1e-8, "ext = {}", result.ext);
    }

    #[test]
    fn test_rbo_dict_validates_p() {
        let a = scores(&[("a", 1.0)]);
        assert!(matches!(
            rbo_dict(&a, &a, 1.0, ScoreOrder::Descending, None),
            Err(InvalidArgument::PersistenceOutOfRange(_))
        ));
    }
}

use std::collections::HashSet;
use std::collections::hash_set;
use std::hash::Hash;
use std::iter;

/// One rank position: either a single item or a group of items tied for that rank.
#[derive(Debug, Clone)]
pub enum RankItem<T> {
    Single(T),
    /// Items sharing one rank. All members enter the cumulative set together.
    Tied(HashSet<T>),
}

impl<T: Eq + Hash> RankItem<T> {
    /// Build a tie from its members. A tie of one collapses to `Single`.
    ///
    /// Panics on an empty iterator: a rank must hold at least one item.
    pub fn tied(items: impl IntoIterator<Item = T>) -> Self {
        let mut members: HashSet<T> = items.into_iter().collect();
        assert!(!members.is_empty(), "A tie needs at least one item");
        if members.len() == 1 {
            if let Some(only) = members.drain().next() {
                return RankItem::Single(only);
            }
        }
        RankItem::Tied(members)
    }

    /// Number of items at this rank.
    pub fn len(&self) -> usize {
        match self {
            RankItem::Single(_) => 1,
            RankItem::Tied(members) => members.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_tie(&self) -> bool {
        matches!(self, RankItem::Tied(members) if members.len() > 1)
    }

    /// Iterate the items at this rank, whether single or tied.
    pub fn iter(&self) -> Members<'_, T> {
        match self {
            RankItem::Single(item) => Members::Single(iter::once(item)),
            RankItem::Tied(members) => Members::Tied(members.iter()),
        }
    }
}

// `HashSet` equality needs `T: Eq + Hash`, a bound derive does not add.
impl<T: Eq + Hash> PartialEq for RankItem<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RankItem::Single(a), RankItem::Single(b)) => a == b,
            (RankItem::Tied(a), RankItem::Tied(b)) => a == b,
            _ => false,
        }
    }
}

impl<T: Eq + Hash> Eq for RankItem<T> {}

impl<T> From<T> for RankItem<T> {
    fn from(item: T) -> Self {
        RankItem::Single(item)
    }
}

impl<'a, T: Eq + Hash> IntoIterator for &'a RankItem<T> {
    type Item = &'a T;
    type IntoIter = Members<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the items at one rank.
pub enum Members<'a, T> {
    Single(iter::Once<&'a T>),
    Tied(hash_set::Iter<'a, T>),
}

impl<'a, T> Iterator for Members<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Members::Single(it) => it.next(),
            Members::Tied(it) => it.next(),
        }
    }
}

/// The three RBO estimates for a pair of rankings.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RboResult {
    /// Lower bound: agreement observed so far, assuming none beyond the evaluated depth.
    pub min: f64,
    /// Residual: the most `min` can still grow if everything unseen agreed.
    pub res: f64,
    /// Point estimate extrapolating the agreement observed at the evaluated depth.
    pub ext: f64,
}

impl RboResult {
    /// Upper bound on RBO, `min + res`.
    pub fn upper(&self) -> f64 {
        self.min + self.res
    }
}

/// Uncorrected intersection at one depth, with the cumulative set sizes it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawOverlap {
    /// Items present in both cumulative sets.
    pub shared: usize,
    pub len_a: usize,
    pub len_b: usize,
}

/// Direction in which scores map to ranks for `rank_by_score()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScoreOrder {
    /// Higher score ranks first.
    #[default]
    Descending,
    /// Lower score ranks first (rank-like scores).
    Ascending,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tied_collapses_single_member() {
        let item = RankItem::tied(["a"]);
        assert_eq!(item, RankItem::Single("a"));
        assert!(!item.is_tie());
    }

    #[test]
    fn test_tied_deduplicates_members() {
        let item = RankItem::tied(["a", "b", "a"]);
        assert_eq!(item.len(), 2);
        assert!(item.is_tie());
    }

    #[test]
    #[should_panic(expected = "A tie needs at least one item")]
    fn test_empty_tie_panics() {
        RankItem::<&str>::tied([]);
    }

    #[test]
    fn test_iter_members() {
        let single: RankItem<u32> = 7.into();
        assert_eq!(single.iter().copied().collect::<Vec<_>>(), vec![7]);

        let tie = RankItem::tied([1u32, 2, 3]);
        let mut members: Vec<u32> = tie.iter().copied().collect();
        members.sort();
        assert_eq!(members, vec![1, 2, 3]);
    }

    #[test]
    fn test_upper_bound() {
        let result = RboResult { min: 0.25, res: 0.5, ext: 0.6 };
        assert!((result.upper() - 0.75).abs() < 1e-12);
    }
}

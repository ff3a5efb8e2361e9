//! rbo-core: Rank-biased overlap between two ranked lists.
//!
//! Lists may differ in length and may contain ties (several items sharing a
//! rank). For a persistence `p` the crate returns three estimates: a lower
//! bound (`min`), the residual uncertainty left by the unseen tail (`res`),
//! and an extrapolated point estimate (`ext`).
//! Pure functions only: no IO, no state. A reference oracle, not a fast path.
//!
//! # Quick start
//!
//! ```rust
//! use rbo_core::{rbo, RankItem};
//!
//! let a = vec![RankItem::tied(["a", "c"]), RankItem::Single("b"), RankItem::Single("d")];
//! let b = vec![RankItem::Single("a"), RankItem::tied(["b", "c"]), RankItem::Single("d")];
//!
//! let result = rbo(&a, &b, 0.9, None).unwrap();
//! assert!((result.min - 0.4892).abs() < 1e-4);
//! assert!(result.min <= result.ext && result.ext <= result.upper());
//! ```
//!
//! Score maps can be compared directly:
//!
//! ```rust
//! use std::collections::HashMap;
//! use rbo_core::{rbo_dict, ScoreOrder};
//!
//! let a: HashMap<&str, f64> = [("x", 0.9), ("y", 0.5), ("z", 0.5)].into_iter().collect();
//! let b: HashMap<&str, f64> = [("x", 0.8), ("y", 0.7), ("z", 0.1)].into_iter().collect();
//!
//! let result = rbo_dict(&a, &b, 0.9, ScoreOrder::Descending, None).unwrap();
//! assert!(result.ext > 0.0 && result.ext <= 1.0);
//! ```

pub mod agreement;
pub mod constants;
pub mod error;
pub mod estimator;
pub mod overlap;
pub mod scores;
pub mod types;

// Re-export primary public API at crate root.
pub use agreement::{agreement, average_overlap};
pub use error::{InvalidArgument, Result};
pub use estimator::{rbo, rbo_at_depth, rbo_ext, rbo_min, rbo_res};
pub use overlap::{overlap, raw_overlap, set_at_depth};
pub use scores::{rank_by_score, rbo_dict};
pub use types::{Members, RankItem, RawOverlap, RboResult, ScoreOrder};

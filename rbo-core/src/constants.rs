/// Persistence used when the caller has no preference.
///
/// At 0.9 the top 10 ranks carry about 86% of the total weight, the usual
/// choice for comparing search-result style rankings.
pub const DEFAULT_PERSISTENCE: f64 = 0.9;


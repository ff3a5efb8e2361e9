/// Argument validation errors.
///
/// Every failure in this crate is an invalid argument detected before any
/// computation starts. Nothing is clamped or silently corrected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidArgument {
    /// `p` must lie strictly between 0 and 1.
    #[error("persistence p must be strictly between 0 and 1, got {0}")]
    PersistenceOutOfRange(f64),

    #[error("evaluation depth must be at least 1")]
    ZeroDepth,

    /// A score map contained NaN for this item.
    #[error("score for item {item} is not a number")]
    NonNumericScore { item: String },
}

pub type Result<T> = std::result::Result<T, InvalidArgument>;

pub(crate) fn check_persistence(p: f64) -> Result<()> {
    // NaN fails both comparisons.
    if p > 0.0 && p < 1.0 {
        Ok(())
    } else {
        Err(InvalidArgument::PersistenceOutOfRange(p))
    }
}

pub(crate) fn check_depth(depth: Option<usize>) -> Result<()> {
    match depth {
        Some(0) => Err(InvalidArgument::ZeroDepth),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistence_bounds() {
        assert!(check_persistence(0.5).is_ok());
        assert!(check_persistence(1e-9).is_ok());
        assert_eq!(check_persistence(0.0), Err(InvalidArgument::PersistenceOutOfRange(0.0)));
        assert_eq!(check_persistence(1.0), Err(InvalidArgument::PersistenceOutOfRange(1.0)));
        assert!(check_persistence(-0.1).is_err());
        assert!(check_persistence(f64::NAN).is_err());
    }

    #[test]
    fn test_depth_check() {
        assert!(check_depth(None).is_ok());
        assert!(check_depth(Some(1)).is_ok());
        assert_eq!(check_depth(Some(0)), Err(InvalidArgument::ZeroDepth));
    }

    #[test]
    fn test_error_messages() {
        let msg = InvalidArgument::PersistenceOutOfRange(1.5).to_string();
        assert!(msg.contains("1.5"), "message was: {msg}");
        let msg = InvalidArgument::NonNumericScore { item: "\"x\"".to_string() }.to_string();
        assert!(msg.contains("\"x\""), "message was: {msg}");
    }
}

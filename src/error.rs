use thiserror::Error;

/// Errors raised by [`ClearBuffer`](crate::ClearBuffer) construction, insertion and sampling.
///
/// Every variant is a caller-contract violation. None of them are retried
/// internally and no operation leaves the buffer half-updated when it fails.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BufferError {
    #[error("{field} must be greater than zero")]
    ZeroDimension { field: &'static str },

    #[error("Short capacity {short_cap} exceeds buffer capacity {cap}")]
    ShortCapacityExceedsCapacity { short_cap: usize, cap: usize },

    #[error("Reward scale must be finite and non-zero, got {0}")]
    InvalidRewardScale(f32),

    #[error("Shape mismatch for {field}: expected length {expected}, got {actual}")]
    ShapeMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Recent window is full ({short_cap} transitions); call reset_head before inserting")]
    RecentWindowFull { short_cap: usize },

    #[error("Batch size must be at least 1")]
    InvalidBatchSize,

    #[error("Insufficient data: requested {requested} transitions, {available} collected, head at {head}")]
    InsufficientData {
        requested: usize,
        available: usize,
        head: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimension_display() {
        let e = BufferError::ZeroDimension { field: "obs_len" };
        assert_eq!(e.to_string(), "obs_len must be greater than zero");
    }

    #[test]
    fn short_capacity_display() {
        let e = BufferError::ShortCapacityExceedsCapacity {
            short_cap: 12,
            cap: 10,
        };
        assert_eq!(e.to_string(), "Short capacity 12 exceeds buffer capacity 10");
    }

    #[test]
    fn shape_mismatch_display() {
        let e = BufferError::ShapeMismatch {
            field: "action",
            expected: 2,
            actual: 3,
        };
        assert_eq!(
            e.to_string(),
            "Shape mismatch for action: expected length 2, got 3"
        );
    }

    #[test]
    fn insufficient_data_display() {
        let e = BufferError::InsufficientData {
            requested: 4,
            available: 12,
            head: 2,
        };
        let s = e.to_string();
        assert!(s.contains("requested 4"));
        assert!(s.contains("head at 2"));
    }

    #[test]
    fn error_equality() {
        assert_eq!(BufferError::InvalidBatchSize, BufferError::InvalidBatchSize);
        assert_ne!(
            BufferError::InvalidBatchSize,
            BufferError::RecentWindowFull { short_cap: 5 }
        );
    }
}

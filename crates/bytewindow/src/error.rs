use thiserror::Error;

/// A [`RefillPolicy`](crate::RefillPolicy) that cannot drive a window of the
/// given capacity.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PolicyError {
    /// The window has no storage at all.
    #[error("window capacity must be at least 1")]
    ZeroCapacity,
    /// A refill size of zero would never make progress.
    #[error("{field} must be at least 1")]
    ZeroRefill {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A refill size larger than the window.
    #[error("{field} ({value}) exceeds window capacity {capacity}")]
    ExceedsCapacity {
        /// Name of the offending field.
        field: &'static str,
        /// Configured value.
        value: usize,
        /// Window capacity.
        capacity: usize,
    },
    /// The low-water mark must leave room for the refill to land.
    #[error("low_water_mark ({value}) must be below window capacity {capacity}")]
    LowWaterTooHigh {
        /// Configured value.
        value: usize,
        /// Window capacity.
        capacity: usize,
    },
}

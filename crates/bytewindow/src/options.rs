use crate::error::PolicyError;

/// When and how much a [`WindowBuffer`](crate::WindowBuffer) reads from its
/// source.
///
/// A refill happens inside `advance` whenever the unconsumed (future) region
/// holds fewer than `low_water_mark` bytes. Refills are the only place the
/// window calls into its source, so these numbers trade source-call frequency
/// against how much lookahead is buffered ahead of the tokenizer.
///
/// # Examples
///
/// ```rust
/// use bytewindow::{RefillPolicy, SliceSource, WindowBuffer};
///
/// // Top up in small steps so a slow source is polled for less at a time.
/// let policy = RefillPolicy {
///     refill_chunk: 16,
///     ..RefillPolicy::for_capacity(64)
/// };
/// let window = WindowBuffer::<_, 64>::with_policy(
///     SliceSource::new(b"payload").into(),
///     policy,
/// )
/// .unwrap();
/// assert_eq!(window.policy().refill_chunk, 16);
/// ```
///
/// # Default
///
/// [`RefillPolicy::for_capacity`] with capacity `N`: low-water mark `N / 3`,
/// refill chunk `N / 2`, initial fill `N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefillPolicy {
    /// Refill once fewer than this many unconsumed bytes remain.
    ///
    /// A refill is also forced when a single `advance` needs more bytes than
    /// are buffered, regardless of this mark.
    pub low_water_mark: usize,

    /// Upper bound on bytes requested by a regular refill.
    pub refill_chunk: usize,

    /// Upper bound on bytes requested by the first refill, made while the
    /// window has never been full and holds no unconsumed bytes.
    ///
    /// Reading a whole window up front gives the tokenizer maximal lookahead
    /// before it consumes anything.
    pub initial_fill: usize,
}

impl RefillPolicy {
    /// The default policy for a window of `capacity` bytes.
    #[must_use]
    pub const fn for_capacity(capacity: usize) -> Self {
        let half = capacity / 2;
        Self {
            low_water_mark: capacity / 3,
            refill_chunk: if half == 0 { 1 } else { half },
            initial_fill: capacity,
        }
    }

    /// Checks that this policy can drive a window of `capacity` bytes.
    ///
    /// # Errors
    ///
    /// Returns a [`PolicyError`] if `capacity` is zero, if either refill size
    /// is zero or larger than `capacity`, or if `low_water_mark` is not below
    /// `capacity`.
    pub const fn validate(&self, capacity: usize) -> Result<(), PolicyError> {
        if capacity == 0 {
            return Err(PolicyError::ZeroCapacity);
        }
        if self.refill_chunk == 0 {
            return Err(PolicyError::ZeroRefill {
                field: "refill_chunk",
            });
        }
        if self.initial_fill == 0 {
            return Err(PolicyError::ZeroRefill {
                field: "initial_fill",
            });
        }
        if self.refill_chunk > capacity {
            return Err(PolicyError::ExceedsCapacity {
                field: "refill_chunk",
                value: self.refill_chunk,
                capacity,
            });
        }
        if self.initial_fill > capacity {
            return Err(PolicyError::ExceedsCapacity {
                field: "initial_fill",
                value: self.initial_fill,
                capacity,
            });
        }
        if self.low_water_mark >= capacity {
            return Err(PolicyError::LowWaterTooHigh {
                value: self.low_water_mark,
                capacity,
            });
        }
        Ok(())
    }
}

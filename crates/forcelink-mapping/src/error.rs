//! Error types for range mapping.

/// Error type for mapping operations.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum MappingError {
    /// Input range has zero width, so the mapping would divide by zero.
    #[error("degenerate input range: min and max are both {value}")]
    DegenerateRange {
        /// The shared bound value.
        value: f64,
    },

    /// An argument was NaN or infinite.
    #[error("non-finite {argument}: {value}")]
    NonFinite {
        /// Which argument was rejected.
        argument: &'static str,
        /// The offending value.
        value: f64,
    },
}

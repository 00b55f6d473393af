pub type Result<T> = std::result::Result<T, LayoutError>;

/// Input rejected by the validating entry points (`try_*`).
///
/// The squarify core never produces these; it assumes validated input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("leaf {index} has negative weight {weight}")]
    NegativeWeight { index: usize, weight: f64 },

    #[error("leaf {index} has non-finite weight {weight}")]
    NonFiniteWeight { index: usize, weight: f64 },

    #[error("rectangle {width}x{height} must have finite, non-negative sides")]
    InvalidRectangle { width: f64, height: f64 },
}

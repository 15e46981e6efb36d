use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuadtreeError {
    #[error("bounds must be finite, got ({x1}, {y1}) to ({x2}, {y2})")]
    NonFiniteBounds { x1: f64, y1: f64, x2: f64, y2: f64 },

    #[error("bottom left ({x1}, {y1}) is not below and left of top right ({x2}, {y2})")]
    InvertedBounds { x1: f64, y1: f64, x2: f64, y2: f64 },

    #[error("capacity must be at least 1")]
    ZeroCapacity,
}

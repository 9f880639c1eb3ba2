//! Error types for cave generation.

use thiserror::Error;

/// Result type alias using [`MapError`].
pub type Result<T> = std::result::Result<T, MapError>;

/// Errors that can occur during map generation or export.
#[derive(Error, Debug)]
pub enum MapError {
    /// Map dimensions leave no interior cells to generate into.
    #[error("invalid map dimensions {width}x{height} (both must be >= 3)")]
    InvalidDimensions {
        /// Requested width in tiles.
        width: usize,
        /// Requested height in tiles.
        height: usize,
    },

    /// Fill percentage outside the 0-100 range.
    #[error("fill percentage {0} out of range (expected 0-100)")]
    InvalidFillPercentage(u32),

    /// Pruning removed every floor region, so no main room can be chosen.
    #[error("no viable rooms survived pruning (try a different seed or lower room_size_minimum)")]
    NoViableRooms,

    /// File I/O error during export.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding error during PNG export.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// JSON serialization error during export.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

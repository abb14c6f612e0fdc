//! # Overlay Error Types
//!
//! The per-frame path never fails. Errors only come from the edges: raw ids
//! handed in by scripts and configuration files read at startup.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur at the overlay's outer boundary.
#[derive(Error, Debug)]
pub enum OverlayError {
    /// Raw fader index does not name a fader.
    #[error("unknown fader: {0}")]
    UnknownFader(i32),

    /// Raw bar index does not name a bar.
    #[error("unknown bar: {0}")]
    UnknownBar(i32),

    /// Raw fade direction is neither in nor out.
    #[error("unknown fade direction: {0}")]
    UnknownFadeDirection(i32),

    /// Raw color slot does not name a bar color.
    #[error("unknown bar color slot: {0}")]
    UnknownBarColorSlot(i32),

    /// Raw corner index is not a fader corner.
    #[error("unknown fader corner: {0}")]
    UnknownCorner(i32),

    /// Configuration file could not be read.
    #[error("failed to read overlay config {}: {source}", .path.display())]
    ConfigIo {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for the overlay schema.
    #[error("invalid overlay config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type for overlay operations.
pub type OverlayResult<T> = Result<T, OverlayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(OverlayError::UnknownFader(7).to_string(), "unknown fader: 7");
        assert_eq!(
            OverlayError::UnknownFadeDirection(-1).to_string(),
            "unknown fade direction: -1"
        );
    }
}

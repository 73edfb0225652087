//! Errors raised while decoding raw host values.
//!
//! Drawing itself has no error path: draw-target failures are discarded per
//! primitive and the next frame redraws everything.

/// Errors produced when the host hands over a value the face does not know.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FaceError {
    /// Interruption filter code outside the known 1..=4 range.
    #[error("unknown interruption filter: {0}")]
    UnknownInterruptionFilter(i32),

    /// Tap type code outside the known 0..=2 range.
    #[error("unknown tap type: {0}")]
    UnknownTapType(i32),
}

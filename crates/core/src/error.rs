use thiserror::Error;

/// Errors from the handful of fallible entry points that accept data from
/// outside this crate's own invariant-preserving constructors (a saved
/// replay, an FFI boundary). Everything else the core does is a contract
/// violation caught by `debug_assert!`, not a recoverable error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid move bit pattern: {0:#06x}")]
    InvalidMove(u16),
    #[error("unrecognized piece code: {0:?}")]
    InvalidPieceCode(char),
    #[error("unrecognized rotation code: {0:?}")]
    InvalidRotationCode(char),
}

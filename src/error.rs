use thiserror::Error;

/// Errors raised while configuring or starting a rolling-window pass.
///
/// Every variant is a precondition violation and is surfaced before any
/// aggregate is emitted; once a pass has started producing steps it cannot
/// fail. Degenerate-but-expected cases (an empty window) are not errors:
/// reducers return a sentinel value for them instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The window width must be strictly positive.
    #[error("invalid window width: {0}")]
    InvalidWindowWidth(i64),
    /// Fixed-stride anchors must advance by a strictly positive step.
    #[error("invalid anchor stride: {0}")]
    InvalidStride(i64),
    /// A record with an out-of-order timestamp was found at this index.
    #[error("records not sorted by timestamp at index {0}")]
    UnsortedInput(usize),
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, Error>;

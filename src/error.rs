//! Error handling (ambient, §7/§4.9): a typed `OffsetError` for path-level
//! failures, wrapping the numeric kernel's `KernelError` via `#[from]` so a
//! caller driving the kernel directly (e.g. testing `polynomial_roots` in
//! isolation) isn't forced to depend on path-level variants.

use crate::expr::KernelError;

#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum OffsetError {
    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("offset failed: no intersection between offset segments {0} and {1}")]
    OffsetFailure(usize, usize),

    #[error(transparent)]
    Kernel(#[from] KernelError),
}

pub type OffsetResult<T> = Result<T, OffsetError>;

//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `EldError` as one
//! variant via `#[from]`, so `?` works across crate boundaries.

use thiserror::Error;

/// The base error type for `eld-core` and a common variant for sub-crates.
#[derive(Debug, Error)]
pub enum EldError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `eld-*` crates.
pub type EldResult<T> = Result<T, EldError>;

//! # XpError
//!
//! Centralized error handling for the XP Bot crates. Data absence (unranked
//! user, empty group, no rival) is modeled as `Option`, never as an error;
//! these variants cover genuine infrastructure failures only.

use thiserror::Error;

/// The primary error type for all xp-core port operations.
#[derive(Error, Debug)]
pub enum XpError {
    /// The ranked store (or ticket store) failed or was unreachable.
    #[error("store error: {0}")]
    Store(String),

    /// The chat transport rejected or failed a call.
    #[error("transport error: {0}")]
    Transport(String),
}

/// A specialized Result type for XP Bot logic.
pub type Result<T> = std::result::Result<T, XpError>;

//! Crate-wide error type.
//!
//! `process_message` itself never returns `Err` (per `spec.md` §4.4/§7 it
//! always produces an `Outcome`); `SeccError` is for the layers around it —
//! building/validating messages, security operations, and the session
//! handler's I/O.

use derive_builder::UninitializedFieldError;
use thiserror::Error;
use validator::ValidationErrors;

use crate::security::SecurityError;

#[derive(Error, Debug)]
pub enum SeccError {
    #[error("field missing from builder")]
    Builder(#[from] UninitializedFieldError),

    #[error("message failed schema/semantic validation")]
    Validation(#[from] ValidationErrors),

    #[error("security operation failed: {0}")]
    Security(#[from] SecurityError),

    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    #[error("sequence timeout waiting for next request")]
    Timeout,

    #[error("received message type not accepted in the current state")]
    UnexpectedMessage,
}

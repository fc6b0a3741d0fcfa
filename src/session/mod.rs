//! Session Context (`spec.md` §2.5 / §3): the per-connection mutable record
//! threaded through every state's `process_message` call.

pub mod context;

pub use context::{SessionContext, SessionId, StopReason};

//! Aurelay Web - Audio streaming API server

#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]
#![warn(clippy::missing_panics_doc)]
//!
//! JSON + byte-stream HTTP surface: liveness, audio relaying with range
//! pass-through, and media info lookup. All origins are permitted; the
//! service is designed to sit behind a player frontend on another host.

pub mod handlers;
pub mod server;

// Re-export main types
pub use server::{AppState, router, run_server};

//! End-to-end tests for Aurelay
//!
//! Drive the real HTTP surface with a real client against listeners on
//! ephemeral ports, backed by a local upstream fixture.

#[path = "../support/upstream.rs"]
mod upstream;

#[path = "streaming_workflow.rs"]
mod streaming_workflow;

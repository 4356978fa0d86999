//! Integration tests for Aurelay
//!
//! Exercise the relay pipeline against a local upstream fixture and the
//! catalog service against mock providers, without going through the full
//! HTTP surface (see the e2e target for that).

#[path = "support/upstream.rs"]
mod upstream;

#[path = "integration/relay_pipeline.rs"]
mod relay_pipeline;

#[path = "integration/catalog_degradation.rs"]
mod catalog_degradation;

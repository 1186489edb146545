//! Integration tests module
//!
//! Covers the goup binary, the HTTP release client and the upgrade pipeline.

pub mod cli;
pub mod client;
pub mod pipeline;

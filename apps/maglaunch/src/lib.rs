//! # maglaunch
//!
//! This library exposes the launcher's modules for testing and
//! integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod cli;
pub mod dispatcher;
pub mod error;
pub mod runtime;
pub mod upload;

// Re-export maglaunch_core for convenience
pub use maglaunch_core;

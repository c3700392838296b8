//! External service module
//!
//! This module contains functions for delivering notifications outside the
//! process.

pub mod desktop;

// Re-export main functions
pub use desktop::*;

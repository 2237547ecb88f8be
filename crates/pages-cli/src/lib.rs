//! Pages CLI library.
//!
//! This crate provides the core functionality for the `pages` binary: config
//! and page-sequence loading, logger setup, and the command implementations.

pub mod commands;
pub mod input;
pub mod logging;

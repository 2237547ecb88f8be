//! Pages Spec Library
//!
//! This crate provides the configuration types, the generated score data model,
//! validation, and hashing shared by the pages generator, renderer, and CLI.
//!
//! # Overview
//!
//! A pages run is described by a [`PagesConfig`] JSON document:
//!
//! - **Score shape**: `voice_count`, `page_count`, per-voice event-count bounds
//! - **Envelope shaping**: segment widths and curve shape of the event-count envelope
//! - **Samplers**: likelihood envelopes, offsets, and seeds of the weighted samplers
//! - **Render settings**: paper size, title, and build directory
//!
//! The generator turns a config into a [`PageSequence`]: an ordered list of
//! [`Page`]s, each holding one [`EventSequence`] per voice.
//!
//! # Example
//!
//! ```
//! use pages_spec::{validate_config, PagesConfig};
//!
//! let config = PagesConfig::default();
//! let result = validate_config(&config);
//! assert!(result.is_ok());
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration types and their defaults
//! - [`page`]: Generated score data model
//! - [`error`]: Error and warning types
//! - [`validation`]: Configuration validation
//! - [`hash`]: Canonical hashing and seed derivation

pub mod config;
pub mod error;
pub mod hash;
pub mod page;
pub mod validation;

pub use config::{
    Breakpoint, DurationMode, DurationSamplerPair, ModePolicy, PagesConfig, RenderConfig,
    SamplerConfig, SegmentRange,
};
pub use error::{
    BackendError, ErrorCode, SpecError, ValidationError, ValidationResult, ValidationWarning,
    WarningCode,
};
pub use hash::{canonical_json, canonical_value_hash, derive_component_seed};
pub use page::{DurationRange, EventSequence, Page, PageSequence, DURATION_GRID};
pub use validation::validate_config;

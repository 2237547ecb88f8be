//! CLI command implementations

pub mod generate;
pub mod init;
pub mod json_output;
pub mod render;
pub mod score;
pub mod validate;

mod reporting;

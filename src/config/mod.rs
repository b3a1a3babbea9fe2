// src/config/mod.rs

//! Run configuration for randwire.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate it into a `ConfigFile` (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, parse_str};
pub use model::{
    BatchSection, ConfigFile, ExecSection, GenerationSection, ModelSection, RawConfigFile,
    SearchSection,
};

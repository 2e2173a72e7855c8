//! Shared types, error model, and configuration for patchgen.
//!
//! This crate is the foundation depended on by the other patchgen crates.
//! It provides:
//! - [`PatchgenError`] — the unified error type
//! - Domain types ([`TranscriptPayload`], [`PatchEnvelope`], [`PatchDocument`])
//! - Configuration ([`AppConfig`], [`GenerateConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, GenerateConfig, PipelineConfig, config_dir, config_file_path,
    init_config, init_config_at, init_config_in, load_config, load_config_from,
};
pub use error::{PatchgenError, Result};
pub use types::{
    ASSERTS_RELATION, DEFAULT_TOPIC, Edge, Fact, PatchDocument, PatchEnvelope,
    SYNTHETIC_CONFIDENCE, SYNTHETIC_NARRATIVE, TranscriptPayload,
};

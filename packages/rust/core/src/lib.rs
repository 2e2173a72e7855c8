//! Patch generation for patchgen.
//!
//! Builds a transcript payload, then turns it into a patches document either
//! by delegating to an external pipeline process or by synthesizing a
//! placeholder patch locally (e.g., `generate_patches`).

pub mod delegate;
pub mod output;
pub mod payload;
pub mod pipeline;
pub mod producer;
pub mod synthesize;
pub mod transcript;

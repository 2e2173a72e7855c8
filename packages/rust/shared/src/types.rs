//! Core domain types: the transcript payload and the patch document shape.

use serde::{Deserialize, Serialize};

/// Topic used when the caller does not supply one.
pub const DEFAULT_TOPIC: &str = "untitled-topic";

/// Confidence and strength stamped on every synthesized value.
///
/// Marks the data as unverified placeholder output, not a computed score.
pub const SYNTHETIC_CONFIDENCE: f64 = 0.35;

/// Narrative attached to patches built without an external pipeline.
pub const SYNTHETIC_NARRATIVE: &str =
    "Synthetic patch generated locally (pipeline command omitted).";

/// Relation label on the edge linking a synthesized claim to its topic.
pub const ASSERTS_RELATION: &str = "patch/asserts";

// ---------------------------------------------------------------------------
// TranscriptPayload
// ---------------------------------------------------------------------------

/// The canonical transcript record handed to a producer strategy.
///
/// Field names are the wire contract with external pipelines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptPayload {
    /// `<topic>-<uuid>`, unique per invocation.
    pub id: String,
    pub topic: String,
    /// Raw transcript text, possibly empty.
    pub transcript: String,
    /// UTC construction time, `YYYY-MM-DDTHH:MM:SSZ`.
    pub timestamp: String,
}

// ---------------------------------------------------------------------------
// Patch documents
// ---------------------------------------------------------------------------

/// Wrapper around synthesized patch documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchEnvelope {
    pub patches: Vec<PatchDocument>,
}

/// A single patch: claims extracted from one transcript plus the edges
/// relating them to the topic.
///
/// Fields are declared in key order so the serialized form is stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchDocument {
    #[serde(rename = "db/id")]
    pub id: String,
    #[serde(rename = "patch/confidence")]
    pub confidence: f64,
    #[serde(rename = "patch/edges")]
    pub edges: Vec<Edge>,
    #[serde(rename = "patch/facts")]
    pub facts: Vec<Fact>,
    #[serde(rename = "patch/focus-question")]
    pub focus_question: String,
    #[serde(rename = "patch/narrative")]
    pub narrative: String,
    #[serde(rename = "patch/timestamp")]
    pub timestamp: String,
    #[serde(rename = "patch/topic")]
    pub topic: String,
}

/// A claim asserted by a patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    #[serde(rename = "claim/confidence")]
    pub confidence: f64,
    #[serde(rename = "claim/text")]
    pub text: String,
    #[serde(rename = "claim/topic")]
    pub topic: String,
    #[serde(rename = "claim/valid-from")]
    pub valid_from: String,
    #[serde(rename = "db/id")]
    pub id: String,
}

/// A directed relation between two records referenced by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    #[serde(rename = "db/id")]
    pub id: String,
    #[serde(rename = "edge/from")]
    pub from: String,
    #[serde(rename = "edge/relation")]
    pub relation: String,
    #[serde(rename = "edge/strength")]
    pub strength: f64,
    #[serde(rename = "edge/to")]
    pub to: String,
}

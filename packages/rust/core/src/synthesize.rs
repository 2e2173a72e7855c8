//! Local synthesizer: a deterministic placeholder patch built straight from
//! the payload, used when no pipeline command is configured.

use tracing::debug;

use patchgen_shared::{
    ASSERTS_RELATION, Edge, Fact, PatchDocument, PatchEnvelope, Result, SYNTHETIC_CONFIDENCE,
    SYNTHETIC_NARRATIVE, TranscriptPayload,
};

/// Produces a single-patch envelope with no external call.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSynthesizer;

impl LocalSynthesizer {
    /// Build the patch document for `payload`.
    pub fn patch(&self, payload: &TranscriptPayload) -> PatchDocument {
        let topic = payload.topic.as_str();
        let claim_id = format!("{topic}-claim-a");

        PatchDocument {
            id: payload.id.clone(),
            confidence: SYNTHETIC_CONFIDENCE,
            edges: vec![Edge {
                id: format!("edge-{topic}"),
                from: claim_id.clone(),
                relation: ASSERTS_RELATION.to_string(),
                strength: SYNTHETIC_CONFIDENCE,
                to: topic.to_string(),
            }],
            facts: vec![Fact {
                confidence: SYNTHETIC_CONFIDENCE,
                text: payload.transcript.trim().to_string(),
                topic: topic.to_string(),
                valid_from: payload.timestamp.clone(),
                id: claim_id,
            }],
            focus_question: format!("What did {topic} learn?"),
            narrative: SYNTHETIC_NARRATIVE.to_string(),
            timestamp: payload.timestamp.clone(),
            topic: topic.to_string(),
        }
    }

    /// Wrap the patch in an envelope and render it as indented JSON.
    pub fn synthesize(&self, payload: &TranscriptPayload) -> Result<Vec<u8>> {
        let envelope = PatchEnvelope {
            patches: vec![self.patch(payload)],
        };
        let bytes = serde_json::to_vec_pretty(&envelope)?;
        debug!(id = %payload.id, bytes = bytes.len(), "synthesized local patch");
        Ok(bytes)
    }
}

//! Strategy selection: exactly one producer turns a payload into output bytes.

use patchgen_shared::{Result, TranscriptPayload};

use crate::delegate::DelegatedProducer;
use crate::synthesize::LocalSynthesizer;

/// The two mutually exclusive ways of producing patches.
///
/// Chosen once per invocation. A configured pipeline that fails is never
/// followed by local synthesis.
#[derive(Debug)]
pub enum PatchProducer {
    Delegated(DelegatedProducer),
    Local(LocalSynthesizer),
}

impl PatchProducer {
    /// A non-empty command selects the delegated producer.
    pub fn select(pipeline_cmd: &str) -> Self {
        if pipeline_cmd.is_empty() {
            Self::Local(LocalSynthesizer)
        } else {
            Self::Delegated(DelegatedProducer::new(pipeline_cmd))
        }
    }

    /// Short label for logs.
    pub fn strategy(&self) -> &'static str {
        match self {
            Self::Delegated(_) => "pipeline",
            Self::Local(_) => "synthesized",
        }
    }

    /// Produce the final output bytes for `payload`.
    ///
    /// Pipeline output is returned untouched; synthesized output is an
    /// indented JSON [`PatchEnvelope`](patchgen_shared::PatchEnvelope).
    pub fn produce(&self, payload: &TranscriptPayload) -> Result<Vec<u8>> {
        match self {
            Self::Delegated(pipeline) => {
                let serialized = serde_json::to_vec(payload)?;
                pipeline.run(&serialized)
            }
            Self::Local(synth) => synth.synthesize(payload),
        }
    }
}

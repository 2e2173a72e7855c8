//! End-to-end `generate` pipeline: transcript → payload → producer → bytes.

use std::time::Instant;

use tracing::{info, instrument};

use patchgen_shared::Result;

use crate::payload::{Clock, IdGenerator, build_payload};
use crate::producer::PatchProducer;

/// Result of the `generate_patches` pipeline.
#[derive(Debug)]
pub struct GenerateResult {
    /// Id of the payload that was produced from.
    pub payload_id: String,
    /// Which producer ran.
    pub strategy: &'static str,
    /// Final bytes for the output sink.
    pub output: Vec<u8>,
    /// Total elapsed time.
    pub elapsed: std::time::Duration,
}

/// Build the payload for `topic`/`transcript` and run `producer` on it.
#[instrument(skip_all, fields(topic = %topic, strategy = producer.strategy()))]
pub fn generate_patches(
    producer: &PatchProducer,
    topic: &str,
    transcript: &str,
    ids: &dyn IdGenerator,
    clock: &dyn Clock,
) -> Result<GenerateResult> {
    let start = Instant::now();
    let payload = build_payload(topic, transcript, ids, clock);

    info!(id = %payload.id, transcript_bytes = payload.transcript.len(), "built payload");

    let output = producer.produce(&payload)?;

    Ok(GenerateResult {
        payload_id: payload.id,
        strategy: producer.strategy(),
        output,
        elapsed: start.elapsed(),
    })
}

//! Payload construction: topic + transcript + clock → [`TranscriptPayload`].
//!
//! Randomness and time are injected so tests can pin both.

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use patchgen_shared::TranscriptPayload;

/// Source of the unique token that makes each payload id distinct.
pub trait IdGenerator {
    fn generate(&self) -> String;
}

/// Random (v4) UUIDs, hyphenated lowercase.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Wall-clock time source.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Format a UTC instant as `YYYY-MM-DDTHH:MM:SSZ`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Build the payload for one invocation.
///
/// The clock is sampled exactly once; producers reuse `timestamp` verbatim.
/// Neither `topic` nor `transcript` is validated.
pub fn build_payload(
    topic: &str,
    transcript: &str,
    ids: &dyn IdGenerator,
    clock: &dyn Clock,
) -> TranscriptPayload {
    TranscriptPayload {
        id: format!("{topic}-{}", ids.generate()),
        topic: topic.to_string(),
        transcript: transcript.to_string(),
        timestamp: format_timestamp(clock.now()),
    }
}

//! Transcript input: a named file, or stdin when no file is given.

use std::io::Read;
use std::path::Path;

use tracing::debug;

use patchgen_shared::{PatchgenError, Result};

/// Read the whole transcript from `path`, or from stdin when `None`.
pub fn read_transcript(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            let name = path.display().to_string();
            let file = std::fs::File::open(path).map_err(|e| PatchgenError::input(&name, e))?;
            read_transcript_from(file, &name)
        }
        None => read_transcript_from(std::io::stdin().lock(), "stdin"),
    }
}

/// Drain `reader` into a string. Invalid UTF-8 is replaced, not rejected.
pub fn read_transcript_from(mut reader: impl Read, source_name: &str) -> Result<String> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| PatchgenError::input(source_name, e))?;

    debug!(source = source_name, bytes = bytes.len(), "read transcript");
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

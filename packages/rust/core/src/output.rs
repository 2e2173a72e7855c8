//! Output sink: write the produced bytes to a file, or print them to stdout.

use std::io::Write;
use std::path::Path;

use tracing::info;

use patchgen_shared::{PatchgenError, Result};

/// Write `bytes` verbatim to `out`, or to stdout followed by a newline.
pub fn write_output(out: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, bytes).map_err(|e| PatchgenError::io(path, e))?;
            info!(path = %path.display(), bytes = bytes.len(), "wrote patches");
            Ok(())
        }
        None => print_output(std::io::stdout().lock(), bytes)
            .map_err(|e| PatchgenError::io("<stdout>", e)),
    }
}

/// Print `bytes` plus a trailing newline and flush.
pub fn print_output(mut writer: impl Write, bytes: &[u8]) -> std::io::Result<()> {
    writer.write_all(bytes)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

use std::io::ErrorKind;
use std::path::Path;

use crate::error::{PipelineError, Result};

/// Read the research document as raw bytes, unmodified.
pub fn read_document(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => PipelineError::FileNotFound(path.to_path_buf()),
        _ => PipelineError::Io(e),
    })
}

/// Write previously read document bytes to a user-chosen destination.
pub fn write_document(dest: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(dest, bytes)?;
    log::info!("Saved {} bytes to {}", bytes.len(), dest.display());
    Ok(())
}

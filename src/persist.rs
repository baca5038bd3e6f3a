//! Writes the transcript to a single `.txt` file.

use crate::error::{Result, TutorError};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Filename used when none is given.
pub const DEFAULT_TRANSCRIPT_FILE: &str = "transcript.txt";

/// Save `text` into the current directory.
pub fn save_transcript(text: &str, filename: Option<&str>) -> Result<PathBuf> {
    save_transcript_in(Path::new("."), text, filename)
}

/// Reduce `requested` to its final path component and require a `.txt` extension.
///
/// The component is whatever follows the last separator, so `notes.txt/` reduces
/// to an empty name and is rejected.
pub fn transcript_file_name(requested: &str) -> Result<&str> {
    let name = requested
        .rsplit(|c: char| c == '/' || c == std::path::MAIN_SEPARATOR)
        .next()
        .unwrap_or_default();

    if name.ends_with(".txt") {
        Ok(name)
    } else {
        Err(TutorError::InvalidExtension(name.to_string()))
    }
}

/// Save `text` into `dir`, overwriting any previous file of the same name.
///
/// Only the final component of `filename` is used, so `../x.txt` lands in
/// `dir`. Names not ending in `.txt` are rejected before anything is written.
#[instrument(skip(text), fields(len = text.len()))]
pub fn save_transcript_in(dir: &Path, text: &str, filename: Option<&str>) -> Result<PathBuf> {
    let name = transcript_file_name(filename.unwrap_or(DEFAULT_TRANSCRIPT_FILE))?;
    let target = dir.join(name);

    // Write beside the target and rename so readers never see a partial file
    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    temp.write_all(text.as_bytes())?;
    temp.flush()?;
    // Temp files are created owner-only; the transcript is an ordinary file
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))?;
    }
    temp.persist(&target).map_err(|e| TutorError::Io(e.error))?;

    info!("Transcript saved to {}", target.display());
    Ok(target)
}

//! Pre-flight checks before network-bound operations.
//!
//! Catches missing keys and unusable output locations before any request is made.

use crate::config::{ApiKeys, Settings};
use crate::error::{Result, TutorError};
use crate::persist::transcript_file_name;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Fetching needs a usable output directory and a `.txt` file name.
    Fetch,
    /// Asking needs everything fetching does, plus the chat and embedding keys.
    Ask,
}

/// Run pre-flight checks for the given operation.
pub fn check(operation: Operation, settings: &Settings, keys: &ApiKeys) -> Result<()> {
    transcript_file_name(&settings.general.transcript_file)?;
    check_output_dir(settings)?;

    if let Operation::Ask = operation {
        keys.require()?;
    }
    Ok(())
}

fn check_output_dir(settings: &Settings) -> Result<()> {
    let dir = settings.output_dir();
    std::fs::create_dir_all(&dir).map_err(|e| {
        TutorError::Config(format!(
            "Output directory {} is not usable: {}",
            dir.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credentials;

    fn shared(creds: Credentials) -> ApiKeys {
        ApiKeys::new(creds.clone(), creds)
    }

    fn settings_in(dir: &std::path::Path) -> Settings {
        let mut settings = Settings::default();
        settings.general.output_dir = dir.join("out").to_string_lossy().to_string();
        settings
    }

    #[test]
    fn test_fetch_needs_no_key() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());
        let creds = shared(Credentials::from_env("YT_TUTOR_TEST_PREFLIGHT_NO_KEY"));

        assert!(check(Operation::Fetch, &settings, &creds).is_ok());
        assert!(dir.path().join("out").is_dir());
    }

    #[test]
    fn test_ask_needs_key() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());

        let missing = shared(Credentials::from_env("YT_TUTOR_TEST_PREFLIGHT_NO_KEY"));
        assert!(matches!(
            check(Operation::Ask, &settings, &missing),
            Err(TutorError::Config(_))
        ));

        let present = shared(Credentials::with_key("OPENAI_API_KEY", "sk-test"));
        assert!(check(Operation::Ask, &settings, &present).is_ok());

        let no_embedding_key = ApiKeys::new(
            Credentials::with_key("GROQ_API_KEY", "gsk-test"),
            Credentials::from_env("YT_TUTOR_TEST_PREFLIGHT_NO_EMBED_KEY"),
        );
        let err = check(Operation::Ask, &settings, &no_embedding_key).unwrap_err();
        assert!(err.to_string().contains("YT_TUTOR_TEST_PREFLIGHT_NO_EMBED_KEY"));
    }

    #[test]
    fn test_rejects_non_txt_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = settings_in(dir.path());
        settings.general.transcript_file = "transcript.md".to_string();
        let creds = shared(Credentials::with_key("OPENAI_API_KEY", "sk-test"));

        assert!(matches!(
            check(Operation::Fetch, &settings, &creds),
            Err(TutorError::InvalidExtension(_))
        ));
    }
}

//! Doctor command - verify credentials and configuration.

use crate::cli::Output;
use crate::config::{ApiKeys, Credentials, Settings};
use crate::persist::transcript_file_name;
use console::style;
use std::path::{Path, PathBuf};

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(
    settings: &Settings,
    keys: &ApiKeys,
    config_path: Option<&PathBuf>,
) -> anyhow::Result<()> {
    Output::header("yt-tutor doctor");
    println!();

    let mut checks = Vec::new();

    println!("{}", style("API Configuration").bold());
    let mut api_checks = vec![check_api_key(&keys.llm), check_llm_endpoint(settings)];
    if keys.is_split() {
        api_checks.push(check_api_key(&keys.embedding));
    }
    for check in &api_checks {
        check.print();
    }
    checks.extend(api_checks);

    println!();

    println!("{}", style("Output").bold());
    let output_checks = check_output(settings);
    for check in &output_checks {
        check.print();
    }
    checks.extend(output_checks);

    println!();

    println!("{}", style("Configuration").bold());
    let path = config_path
        .cloned()
        .unwrap_or_else(Settings::default_config_path);
    let config_check = check_config_file(&path);
    config_check.print();
    checks.push(config_check);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!("{} error(s) found.", errors));
        anyhow::bail!("doctor found {} error(s)", errors);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! yt-tutor is ready to use.");
    }

    Ok(())
}

/// The key only matters for answering; fetching works without it.
fn check_api_key(credentials: &Credentials) -> CheckResult {
    let name = credentials.env_var();
    match credentials.require() {
        Ok(key) => CheckResult::ok(name, &format!("configured ({})", mask_key(key))),
        Err(_) => CheckResult::error(
            name,
            "not set",
            &format!("Set with: export {}='...' or add it to .env", name),
        ),
    }
}

fn check_llm_endpoint(settings: &Settings) -> CheckResult {
    let endpoint = settings
        .llm
        .api_base
        .as_deref()
        .unwrap_or("https://api.openai.com/v1");

    match url::Url::parse(endpoint) {
        Ok(_) => CheckResult::ok(
            "LLM endpoint",
            &format!("{} ({})", endpoint, settings.llm.model),
        ),
        Err(e) => CheckResult::error(
            "LLM endpoint",
            &format!("{} is not a valid URL: {}", endpoint, e),
            "Fix llm.api_base in the config file",
        ),
    }
}

fn check_output(settings: &Settings) -> Vec<CheckResult> {
    let mut results = Vec::new();

    let dir = settings.output_dir();
    if dir.is_dir() {
        results.push(CheckResult::ok("Output directory", &format!("{}", dir.display())));
    } else if dir.exists() {
        results.push(CheckResult::error(
            "Output directory",
            &format!("{} is not a directory", dir.display()),
            "Point general.output_dir at a directory",
        ));
    } else {
        results.push(CheckResult::warning(
            "Output directory",
            &format!("{} (will be created)", dir.display()),
            "Directory will be created on first fetch",
        ));
    }

    match transcript_file_name(&settings.general.transcript_file) {
        Ok(name) => results.push(check_transcript_file(&dir.join(name))),
        Err(e) => results.push(CheckResult::error(
            "Transcript file",
            &e.to_string(),
            "general.transcript_file must end in .txt",
        )),
    }

    results
}

fn check_transcript_file(path: &Path) -> CheckResult {
    match std::fs::metadata(path) {
        Ok(meta) => CheckResult::ok(
            "Transcript file",
            &format!("{} ({}, overwritten on next fetch)", path.display(), format_size(meta.len())),
        ),
        Err(_) => CheckResult::ok(
            "Transcript file",
            &format!("{} (not created yet)", path.display()),
        ),
    }
}

fn check_config_file(path: &Path) -> CheckResult {
    if path.exists() {
        CheckResult::ok("Config file", &format!("{}", path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: yt-tutor config save",
        )
    }
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 12 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Format file size in human-readable format.
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_ok() {
        let result = CheckResult::ok("test", "passed");
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.hint.is_none());
    }

    #[test]
    fn test_check_result_error() {
        let result = CheckResult::error("test", "failed", "fix it");
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.hint, Some("fix it".to_string()));
    }

    #[test]
    fn test_api_key_check() {
        let missing = Credentials::from_env("YT_TUTOR_TEST_DOCTOR_NO_KEY");
        let result = check_api_key(&missing);
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.name, "YT_TUTOR_TEST_DOCTOR_NO_KEY");

        let present = Credentials::with_key("OPENAI_API_KEY", "sk-abcdefghijklmnop1234");
        let result = check_api_key(&present);
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.message.contains("sk-a...1234"));
        assert!(!result.message.contains("efgh"));
    }

    #[test]
    fn test_llm_endpoint_check() {
        let mut settings = Settings::default();
        assert_eq!(check_llm_endpoint(&settings).status, CheckStatus::Ok);

        settings.llm.api_base = Some("not a url".to_string());
        assert_eq!(check_llm_endpoint(&settings).status, CheckStatus::Error);
    }

    #[test]
    fn test_output_checks() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.general.output_dir = dir.path().to_string_lossy().to_string();

        let results = check_output(&settings);
        assert!(results.iter().all(|r| r.status == CheckStatus::Ok));

        settings.general.transcript_file = "notes.md".to_string();
        let results = check_output(&settings);
        assert_eq!(results[1].status, CheckStatus::Error);
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("short"), "****");
        assert_eq!(mask_key("sk-proj-123456789"), "sk-p...6789");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(500), "500 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1024 * 1024), "1.0 MB");
    }
}

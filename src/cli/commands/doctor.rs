//! Doctor command - verify system requirements and configuration.

use crate::cli::Output;
use crate::config::Settings;
use console::style;
use std::path::Path;
use std::process::Command;

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
pub fn run_doctor(settings: &Settings, config_path: Option<&Path>) -> anyhow::Result<()> {
    Output::header("Recap Doctor");
    println!();

    let sections = vec![
        ("External Tools", vec![check_ytdlp()]),
        (
            "Credentials",
            vec![
                check_secret(&settings.transcription.token_env, "Hugging Face inference token"),
                check_secret(&settings.summarization.api_key_env, "OpenAI API key"),
            ],
        ),
        ("Directories", vec![check_temp_dir(&settings.temp_dir())]),
        (
            "Configuration",
            vec![check_config_file(
                &config_path
                    .map(Path::to_path_buf)
                    .unwrap_or_else(Settings::default_config_path),
            )],
        ),
    ];

    let mut errors = 0;
    let mut warnings = 0;
    for (title, checks) in &sections {
        println!("{}", style(title).bold());
        for check in checks {
            check.print();
            match check.status {
                CheckStatus::Error => errors += 1,
                CheckStatus::Warning => warnings += 1,
                CheckStatus::Ok => {}
            }
        }
        println!();
    }

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Recap.",
            errors
        ));
        return Err(anyhow::anyhow!("doctor found {} error(s)", errors));
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Recap is ready to use.");
    }

    Ok(())
}

/// Check that yt-dlp is installed and report its version.
fn check_ytdlp() -> CheckResult {
    let hint = install_hint_ytdlp();
    match Command::new("yt-dlp").arg("--version").output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .unwrap_or("installed")
                .trim()
                .to_string();
            CheckResult::ok("yt-dlp", &version)
        }
        // Only YouTube inputs need it.
        Ok(_) => CheckResult::warning("yt-dlp", "installed but not working", hint),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            CheckResult::warning("yt-dlp", "not found (local files still work)", hint)
        }
        Err(e) => CheckResult::warning("yt-dlp", &format!("error: {}", e), hint),
    }
}

/// Check that a credential variable is set, without printing it.
fn check_secret(var: &str, what: &str) -> CheckResult {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => {
            CheckResult::ok(var, &format!("configured ({})", mask(&value)))
        }
        Ok(_) => CheckResult::error(var, "empty", &format!("Set your {} with: export {}='...'", what, var)),
        Err(_) => CheckResult::error(
            var,
            "not set",
            &format!("Set your {} with: export {}='...'", what, var),
        ),
    }
}

/// Show only the last four characters of a secret.
fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

fn check_temp_dir(dir: &Path) -> CheckResult {
    if dir.is_dir() {
        CheckResult::ok("Download directory", &dir.display().to_string())
    } else if dir.exists() {
        CheckResult::error(
            "Download directory",
            &format!("{} is not a directory", dir.display()),
            "Change general.temp_dir in the config file",
        )
    } else {
        CheckResult::warning(
            "Download directory",
            &format!("{} (will be created)", dir.display()),
            "Directory will be created on first download",
        )
    }
}

fn check_config_file(path: &Path) -> CheckResult {
    if !path.exists() {
        return CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: recap config edit",
        );
    }

    match Settings::load_from(Some(&path.to_path_buf())).and_then(|s| s.validate()) {
        Ok(_) => CheckResult::ok("Config file", &path.display().to_string()),
        Err(e) => CheckResult::error(
            "Config file",
            &format!("{}: {}", path.display(), e),
            "Fix the file or run: recap config edit",
        ),
    }
}

/// Platform-specific install hint for yt-dlp.
fn install_hint_ytdlp() -> &'static str {
    if cfg!(target_os = "macos") {
        "Install with: brew install yt-dlp"
    } else if cfg!(target_os = "linux") {
        "Install with: pip install yt-dlp (or your package manager)"
    } else {
        "Install from: https://github.com/yt-dlp/yt-dlp"
    }
}

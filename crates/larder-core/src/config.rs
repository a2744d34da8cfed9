use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::export::{DEFAULT_FILE_NAME, SmsPlatform};

/// Project-local directory holding config and default state.
pub const PROJECT_DIR: &str = ".larder";

/// One config file. Every key is optional so project and user files can be
/// layered; [`resolve_config`] fills in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub output: Option<String>,
    pub catalog: Option<PathBuf>,
    pub store: Option<PathBuf>,
    pub export: ExportSection,
    pub feedback: FeedbackSection,
    pub sms: SmsSection,
    pub commands: CommandsSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSection {
    pub download_dir: Option<PathBuf>,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackSection {
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmsSection {
    pub platform: Option<SmsPlatformSetting>,
}

/// External commands backing clipboard, share and URI opening. Each is an
/// argv array; the text is written to the command's stdin (clipboard,
/// share) or appended as the last argument (open).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandsSection {
    pub clipboard: Option<Vec<String>>,
    pub share: Option<Vec<String>>,
    pub open: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmsPlatformSetting {
    #[default]
    Auto,
    Ios,
    Other,
}

impl SmsPlatformSetting {
    #[must_use]
    pub fn resolve(self) -> SmsPlatform {
        match self {
            Self::Auto => SmsPlatform::detect(),
            Self::Ios => SmsPlatform::Ios,
            Self::Other => SmsPlatform::Other,
        }
    }
}

impl ConfigFile {
    /// Overlay `other` on top of `self`; keys set in `other` win.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            output: other.output.or(self.output),
            catalog: other.catalog.or(self.catalog),
            store: other.store.or(self.store),
            export: ExportSection {
                download_dir: other.export.download_dir.or(self.export.download_dir),
                file_name: other.export.file_name.or(self.export.file_name),
            },
            feedback: FeedbackSection {
                duration_ms: other.feedback.duration_ms.or(self.feedback.duration_ms),
            },
            sms: SmsSection {
                platform: other.sms.platform.or(self.sms.platform),
            },
            commands: CommandsSection {
                clipboard: other.commands.clipboard.or(self.commands.clipboard),
                share: other.commands.share.or(self.commands.share),
                open: other.commands.open.or(self.commands.open),
            },
        }
    }
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveConfig {
    pub catalog: PathBuf,
    pub store: PathBuf,
    pub download_dir: PathBuf,
    pub file_name: String,
    pub feedback_ms: u64,
    pub sms_platform: SmsPlatformSetting,
    pub commands: CommandsSection,
    pub resolved_output: String,
}

impl EffectiveConfig {
    #[must_use]
    pub const fn feedback_duration(&self) -> Duration {
        Duration::from_millis(self.feedback_ms)
    }
}

fn read_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ConfigFile>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn load_project_config(project_root: &Path) -> Result<ConfigFile> {
    read_config(&project_root.join(PROJECT_DIR).join("config.toml"))
}

pub fn load_user_config() -> Result<ConfigFile> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(ConfigFile::default());
    };
    read_config(&config_dir.join("larder/config.toml"))
}

/// Layer user and project config, then apply defaults.
///
/// Relative paths from the project file resolve against `project_root`.
/// `cli_format` and `cli_json` are the global output flags.
///
/// # Errors
///
/// Returns an error if either config file exists but cannot be read or
/// parsed.
pub fn resolve_config(
    project_root: &Path,
    cli_format: Option<&str>,
    cli_json: bool,
) -> Result<EffectiveConfig> {
    let merged = load_user_config()?.merge(load_project_config(project_root)?);
    let env_format = env::var("FORMAT").ok();
    Ok(effective(project_root, merged, cli_format, cli_json, env_format))
}

fn effective(
    project_root: &Path,
    file: ConfigFile,
    cli_format: Option<&str>,
    cli_json: bool,
    env_format: Option<String>,
) -> EffectiveConfig {
    let anchor = |p: PathBuf| {
        if p.is_absolute() {
            p
        } else {
            project_root.join(p)
        }
    };

    EffectiveConfig {
        catalog: anchor(file.catalog.unwrap_or_else(default_catalog)),
        store: anchor(file.store.unwrap_or_else(default_store)),
        download_dir: anchor(file.export.download_dir.unwrap_or_default()),
        file_name: file
            .export
            .file_name
            .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string()),
        feedback_ms: file.feedback.duration_ms.unwrap_or(DEFAULT_FEEDBACK_MS),
        sms_platform: file.sms.platform.unwrap_or_default(),
        commands: file.commands,
        resolved_output: resolve_output(cli_format, cli_json, file.output, env_format),
    }
}

fn normalize_output_mode(raw: &str) -> Option<&'static str> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "pretty" | "human" => Some("pretty"),
        "text" | "plain" => Some("text"),
        "json" => Some("json"),
        _ => None,
    }
}

fn resolve_output(
    cli_format: Option<&str>,
    cli_json: bool,
    file_output: Option<String>,
    env_format: Option<String>,
) -> String {
    if let Some(mode) = cli_format.and_then(normalize_output_mode) {
        return mode.to_string();
    }
    if cli_json {
        return "json".to_string();
    }
    for candidate in [env_format.as_deref(), file_output.as_deref()] {
        if let Some(mode) = candidate.and_then(normalize_output_mode) {
            return mode.to_string();
        }
    }
    if std::io::stdout().is_terminal() {
        "pretty".to_string()
    } else {
        "text".to_string()
    }
}

const DEFAULT_FEEDBACK_MS: u64 = 2000;

fn default_catalog() -> PathBuf {
    PathBuf::from("recipes.md")
}

fn default_store() -> PathBuf {
    Path::new(PROJECT_DIR).join("state.json")
}

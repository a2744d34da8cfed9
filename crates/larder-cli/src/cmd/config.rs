use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Subcommand, ValueEnum};
use larder_core::capabilities::{describe_capabilities, detect_capabilities};
use larder_core::config::{EffectiveConfig, PROJECT_DIR};
use std::io::Write;
use std::path::{Path, PathBuf};
use toml::Value;

use crate::context::{Overrides, Planner};
use crate::output::{OutputMode, pretty_kv, pretty_section, render, render_mode};

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Show resolved or raw configuration
    Show(ShowArgs),
    /// Set a configuration key in project or user scope
    Set(SetArgs),
    /// Unset a configuration key in project or user scope
    Unset(UnsetArgs),
    /// Report which clipboard/share/open commands were found
    Capabilities,
}

#[derive(Args, Debug)]
struct ShowArgs {
    /// Show raw project config only
    #[arg(long, conflicts_with = "user")]
    project: bool,

    /// Show raw user config only
    #[arg(long)]
    user: bool,
}

#[derive(Args, Debug)]
struct SetArgs {
    /// Scope to mutate
    #[arg(long, default_value = "project")]
    scope: ConfigScope,

    /// Dot path key (e.g. feedback.duration_ms, catalog)
    key: String,

    /// New value. Command keys take a TOML array or a space-separated argv.
    value: String,
}

#[derive(Args, Debug)]
struct UnsetArgs {
    /// Scope to mutate
    #[arg(long, default_value = "project")]
    scope: ConfigScope,

    /// Dot path key (e.g. feedback.duration_ms, catalog)
    key: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum ConfigScope {
    Project,
    User,
}

pub fn run_config(args: &ConfigArgs, project_root: &Path, overrides: &Overrides) -> Result<()> {
    let effective = Planner::config(project_root, overrides)?;
    let output = OutputMode::from_resolved(&effective.resolved_output);
    match &args.command {
        ConfigCommand::Show(show) => run_show(show, project_root, &effective, output),
        ConfigCommand::Set(set) => run_set(set, project_root, output),
        ConfigCommand::Unset(unset) => run_unset(unset, project_root, output),
        ConfigCommand::Capabilities => run_capabilities(&effective, output),
    }
}

fn run_show(
    args: &ShowArgs,
    project_root: &Path,
    effective: &EffectiveConfig,
    output: OutputMode,
) -> Result<()> {
    if args.project {
        let value = load_toml_table(&project_config_path(project_root))?;
        return print_toml_or_json(&value, output);
    }

    if args.user {
        let value = load_toml_table(&user_config_path()?)?;
        return print_toml_or_json(&value, output);
    }

    print_effective(effective, output)
}

fn run_set(args: &SetArgs, project_root: &Path, output: OutputMode) -> Result<()> {
    let path = scope_path(args.scope, project_root)?;
    let mut value = load_toml_table(&path)?;
    apply_set(&mut value, &args.key, &args.value)?;
    write_toml_table(&path, &value)?;
    render_mutation(output, "set", scope_label(args.scope), &args.key)
}

fn run_unset(args: &UnsetArgs, project_root: &Path, output: OutputMode) -> Result<()> {
    let path = scope_path(args.scope, project_root)?;
    let mut value = load_toml_table(&path)?;
    apply_unset(&mut value, &args.key)?;
    write_toml_table(&path, &value)?;
    render_mutation(output, "unset", scope_label(args.scope), &args.key)
}

fn run_capabilities(effective: &EffectiveConfig, output: OutputMode) -> Result<()> {
    let statuses = describe_capabilities(&detect_capabilities(&effective.commands));
    render_mode(
        output,
        &statuses,
        |statuses, w| {
            for s in statuses {
                writeln!(
                    w,
                    "{}={} {}",
                    s.name,
                    s.available,
                    s.program.as_deref().unwrap_or("-")
                )?;
            }
            Ok(())
        },
        |statuses, w| {
            pretty_section(w, "Capabilities")?;
            for s in statuses {
                let value = match (&s.program, s.available) {
                    (Some(program), true) => format!("✓ {program}"),
                    _ => format!("✗ {}", s.fallback),
                };
                pretty_kv(w, s.name, value)?;
            }
            Ok(())
        },
    )
}

/// Split `key` into an optional section and a leaf, rejecting unknown keys.
fn split_known_key(key: &str) -> Result<(Option<&str>, &str)> {
    let (section, leaf) = match key.split_once('.') {
        Some((section, leaf)) => (Some(section), leaf),
        None => (None, key),
    };

    let valid = matches!(
        (section, leaf),
        (None, "output" | "catalog" | "store")
            | (Some("export"), "download_dir" | "file_name")
            | (Some("feedback"), "duration_ms")
            | (Some("sms"), "platform")
            | (Some("commands"), "clipboard" | "share" | "open")
    );

    if valid {
        Ok((section, leaf))
    } else {
        bail!("Unsupported config key `{key}`");
    }
}

fn parse_value(key: &str, raw: &str) -> Result<Value> {
    let (section, leaf) = split_known_key(key)?;

    match (section, leaf) {
        (Some("feedback"), "duration_ms") => {
            let ms: i64 = raw
                .parse()
                .with_context(|| format!("{key} expects a number of milliseconds"))?;
            if ms < 0 {
                bail!("{key} must not be negative");
            }
            Ok(Value::Integer(ms))
        }
        (Some("sms"), "platform") => match raw.trim().to_ascii_lowercase().as_str() {
            platform @ ("auto" | "ios" | "other") => Ok(Value::String(platform.to_string())),
            _ => bail!("{key} expects auto, ios or other"),
        },
        (None, "output") => match raw.trim().to_ascii_lowercase().as_str() {
            mode @ ("pretty" | "text" | "json") => Ok(Value::String(mode.to_string())),
            _ => bail!("{key} expects pretty, text or json"),
        },
        (Some("commands"), _) => parse_argv(key, raw),
        _ => Ok(Value::String(raw.to_string())),
    }
}

fn parse_argv(key: &str, raw: &str) -> Result<Value> {
    let trimmed = raw.trim();
    let argv: Vec<String> = if trimmed.starts_with('[') {
        let wrapped: toml::Table = toml::from_str(&format!("argv = {trimmed}"))
            .with_context(|| format!("{key} expects an array of strings"))?;
        wrapped
            .get("argv")
            .and_then(Value::as_array)
            .ok_or_else(|| anyhow!("{key} expects an array of strings"))?
            .iter()
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| anyhow!("{key} expects an array of strings"))
            })
            .collect::<Result<_>>()?
    } else {
        trimmed.split_whitespace().map(str::to_string).collect()
    };

    if argv.is_empty() {
        bail!("{key} needs at least a program name");
    }
    Ok(Value::Array(argv.into_iter().map(Value::String).collect()))
}

fn apply_set(root: &mut Value, key: &str, raw: &str) -> Result<()> {
    let parsed = parse_value(key, raw)?;
    let (section, leaf) = split_known_key(key)?;

    let table = root
        .as_table_mut()
        .ok_or_else(|| anyhow!("Config root must be a TOML table"))?;

    let Some(section) = section else {
        table.insert(leaf.to_string(), parsed);
        return Ok(());
    };

    let section_entry = table
        .entry(section.to_string())
        .or_insert_with(|| Value::Table(toml::map::Map::new()));

    let section_table = section_entry
        .as_table_mut()
        .ok_or_else(|| anyhow!("Section {section} must be a TOML table"))?;

    section_table.insert(leaf.to_string(), parsed);
    Ok(())
}

fn apply_unset(root: &mut Value, key: &str) -> Result<()> {
    let (section, leaf) = split_known_key(key)?;
    let table = root
        .as_table_mut()
        .ok_or_else(|| anyhow!("Config root must be a TOML table"))?;

    let Some(section) = section else {
        table.remove(leaf);
        return Ok(());
    };

    if let Some(section_entry) = table.get_mut(section)
        && let Some(section_table) = section_entry.as_table_mut()
    {
        section_table.remove(leaf);
        if section_table.is_empty() {
            table.remove(section);
        }
    }

    Ok(())
}

fn load_toml_table(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Ok(Value::Table(toml::map::Map::new()));
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let value: Value =
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;

    if !value.is_table() {
        bail!("{} must contain a top-level TOML table", path.display());
    }

    Ok(value)
}

fn write_toml_table(path: &Path, value: &Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let serialized = toml::to_string_pretty(value)?;
    std::fs::write(path, serialized).with_context(|| format!("Failed to write {}", path.display()))
}

fn print_toml_or_json(value: &Value, output: OutputMode) -> Result<()> {
    render(output, value, |value, w| {
        let text = toml::to_string_pretty(value).unwrap_or_default();
        write!(w, "{text}")
    })
}

fn print_effective(value: &EffectiveConfig, output: OutputMode) -> Result<()> {
    let argv = |cmd: &Option<Vec<String>>| cmd.as_ref().map_or_else(|| "auto".to_string(), |a| a.join(" "));
    render_mode(
        output,
        value,
        |value, w| {
            writeln!(w, "resolved_output={}", value.resolved_output)?;
            writeln!(w, "catalog={}", value.catalog.display())?;
            writeln!(w, "store={}", value.store.display())?;
            writeln!(w, "export.download_dir={}", value.download_dir.display())?;
            writeln!(w, "export.file_name={}", value.file_name)?;
            writeln!(w, "feedback.duration_ms={}", value.feedback_ms)?;
            writeln!(w, "sms.platform={}", format!("{:?}", value.sms_platform).to_lowercase())?;
            writeln!(w, "commands.clipboard={}", argv(&value.commands.clipboard))?;
            writeln!(w, "commands.share={}", argv(&value.commands.share))?;
            writeln!(w, "commands.open={}", argv(&value.commands.open))
        },
        |value, w| {
            pretty_section(w, "Paths")?;
            pretty_kv(w, "catalog", value.catalog.display().to_string())?;
            pretty_kv(w, "store", value.store.display().to_string())?;
            pretty_kv(w, "downloads", value.download_dir.join(&value.file_name).display().to_string())?;
            writeln!(w)?;
            pretty_section(w, "Behaviour")?;
            pretty_kv(w, "output", &value.resolved_output)?;
            pretty_kv(w, "feedback", format!("{} ms", value.feedback_ms))?;
            pretty_kv(w, "sms", format!("{:?}", value.sms_platform).to_lowercase())?;
            writeln!(w)?;
            pretty_section(w, "Commands")?;
            pretty_kv(w, "clipboard", argv(&value.commands.clipboard))?;
            pretty_kv(w, "share", argv(&value.commands.share))?;
            pretty_kv(w, "open", argv(&value.commands.open))
        },
    )
}

fn render_mutation(output: OutputMode, action: &str, scope: &str, key: &str) -> Result<()> {
    let value = serde_json::json!({
        "ok": true,
        "action": action,
        "scope": scope,
        "key": key,
    });
    render_mode(
        output,
        &value,
        |_, w| writeln!(w, "ok=true action={action} scope={scope} key={key}"),
        |_, w| writeln!(w, "{} {key} in {scope} config", action_to_title(action)),
    )
}

fn action_to_title(action: &str) -> &'static str {
    match action {
        "set" => "Set",
        "unset" => "Unset",
        _ => "Updated",
    }
}

fn scope_path(scope: ConfigScope, project_root: &Path) -> Result<PathBuf> {
    match scope {
        ConfigScope::Project => Ok(project_config_path(project_root)),
        ConfigScope::User => user_config_path(),
    }
}

fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(PROJECT_DIR).join("config.toml")
}

fn user_config_path() -> Result<PathBuf> {
    let config_dir =
        dirs::config_dir().ok_or_else(|| anyhow!("Unable to resolve user config directory"))?;
    Ok(config_dir.join("larder/config.toml"))
}

const fn scope_label(scope: ConfigScope) -> &'static str {
    match scope {
        ConfigScope::Project => "project",
        ConfigScope::User => "user",
    }
}

//! Runtime detection of the optional delivery commands.
//!
//! Clipboard, share and URI-open support all come from external programs.
//! Probing resolves each to a concrete argv (configured first, then the
//! platform's usual candidates) or to `None`, in which case the export
//! actions degrade to their fallback message. Probes never fail; the outcome
//! is logged at `debug!`.

use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;
use which::which;

use crate::config::CommandsSection;

/// Resolved argv for each optional capability.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Capabilities {
    pub clipboard: Option<Vec<String>>,
    pub share: Option<Vec<String>>,
    pub open: Option<Vec<String>>,
}

/// Status of a single capability for user-visible display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilityStatus {
    pub name: &'static str,
    pub available: bool,
    /// Program that will run, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    /// What happens when the capability is missing.
    pub fallback: &'static str,
}

/// Probe configured commands and well-known platform tools.
#[must_use]
pub fn detect_capabilities(configured: &CommandsSection) -> Capabilities {
    let caps = Capabilities {
        clipboard: pick("clipboard", configured.clipboard.as_ref(), clipboard_candidates()),
        share: pick("share", configured.share.as_ref(), &[]),
        open: pick("open", configured.open.as_ref(), open_candidates()),
    };
    debug!(?caps, "capability detection complete");
    caps
}

#[must_use]
pub fn describe_capabilities(caps: &Capabilities) -> Vec<CapabilityStatus> {
    let status = |name, argv: &Option<Vec<String>>, fallback| CapabilityStatus {
        name,
        available: argv.is_some(),
        program: argv.as_ref().and_then(|a| a.first().cloned()),
        fallback,
    };
    vec![
        status("clipboard", &caps.clipboard, "copy reports \"Copy failed\""),
        status(
            "share",
            &caps.share,
            "share copies to the clipboard instead",
        ),
        status("open", &caps.open, "sms prints the link instead of opening it"),
    ]
}

fn pick(
    name: &str,
    configured: Option<&Vec<String>>,
    candidates: &[&[&str]],
) -> Option<Vec<String>> {
    if let Some(argv) = configured {
        let found = argv.first().is_some_and(|p| find_program(p).is_some());
        debug!(name, available = found, ?argv, "configured command lookup");
        return found.then(|| argv.clone());
    }

    let argv = candidates
        .iter()
        .find(|argv| argv.first().is_some_and(|p| find_program(p).is_some()))
        .map(|argv| argv.iter().map(|s| (*s).to_string()).collect());
    debug!(name, available = argv.is_some(), "platform command lookup");
    argv
}

const fn clipboard_candidates() -> &'static [&'static [&'static str]] {
    if cfg!(target_os = "macos") {
        &[&["pbcopy"]]
    } else if cfg!(windows) {
        &[&["clip"]]
    } else {
        &[
            &["wl-copy"],
            &["xclip", "-selection", "clipboard"],
            &["xsel", "--clipboard", "--input"],
        ]
    }
}

const fn open_candidates() -> &'static [&'static [&'static str]] {
    if cfg!(target_os = "macos") {
        &[&["open"]]
    } else if cfg!(windows) {
        &[&["cmd", "/C", "start", ""]]
    } else {
        &[&["xdg-open"]]
    }
}

/// Locate an executable `program`: paths are checked directly, bare names
/// are searched on `PATH`.
#[must_use]
pub fn find_program(program: &str) -> Option<PathBuf> {
    which(program).ok()
}

//! Process-backed clipboard, share sheet and URI opener.
//!
//! Each capability wraps an argv resolved by
//! [`larder_core::capabilities::detect_capabilities`]. Clipboard and share
//! commands receive the text on stdin; the opener gets the URI as its last
//! argument.

use std::io::Write;
use std::process::{Command, Stdio};

use larder_core::capabilities::Capabilities;
use larder_core::config::EffectiveConfig;
use larder_core::export::{
    CapabilityError, Clipboard, DownloadTarget, ExportActions, Opener, ShareOutcome, ShareSheet,
};
use tracing::debug;

/// Run `argv`, feeding `input` on stdin. Returns whether it exited zero.
fn run_with_stdin(argv: &[String], input: &str) -> Result<bool, CapabilityError> {
    let (program, args) = argv
        .split_first()
        .ok_or(CapabilityError::Unavailable("command"))?;
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| CapabilityError::Failed(format!("failed to start {program}: {e}")))?;

    // a command may exit without reading stdin; its exit status decides
    if let Some(mut stdin) = child.stdin.take()
        && let Err(e) = stdin.write_all(input.as_bytes())
        && e.kind() != std::io::ErrorKind::BrokenPipe
    {
        return Err(CapabilityError::Failed(format!(
            "failed to write to {program}: {e}"
        )));
    }
    let status = child
        .wait()
        .map_err(|e| CapabilityError::Failed(format!("{program} did not finish: {e}")))?;
    debug!(program, code = ?status.code(), "capability command exited");
    Ok(status.success())
}

#[derive(Debug, Clone)]
pub struct CommandClipboard {
    argv: Vec<String>,
}

impl Clipboard for CommandClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), CapabilityError> {
        if run_with_stdin(&self.argv, text)? {
            Ok(())
        } else {
            Err(CapabilityError::Failed(format!(
                "{} exited with an error",
                self.argv.join(" ")
            )))
        }
    }
}

/// A share command exiting non-zero counts as the user dismissing the sheet.
#[derive(Debug, Clone)]
pub struct CommandShare {
    argv: Vec<String>,
}

impl ShareSheet for CommandShare {
    fn share(&mut self, _title: &str, text: &str) -> Result<ShareOutcome, CapabilityError> {
        Ok(if run_with_stdin(&self.argv, text)? {
            ShareOutcome::Shared
        } else {
            ShareOutcome::Cancelled
        })
    }
}

#[derive(Debug, Clone)]
pub struct CommandOpener {
    argv: Vec<String>,
}

impl Opener for CommandOpener {
    fn open(&mut self, uri: &str) -> Result<(), CapabilityError> {
        let (program, args) = self
            .argv
            .split_first()
            .ok_or(CapabilityError::Unavailable("URI opener"))?;
        let status = Command::new(program)
            .args(args)
            .arg(uri)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| CapabilityError::Failed(format!("failed to start {program}: {e}")))?;
        if status.success() {
            Ok(())
        } else {
            Err(CapabilityError::Failed(format!("{program} exited with {status}")))
        }
    }
}

/// Wire detected capabilities and config into [`ExportActions`].
pub fn export_actions(config: &EffectiveConfig, caps: &Capabilities) -> ExportActions {
    ExportActions {
        clipboard: caps
            .clipboard
            .clone()
            .map(|argv| Box::new(CommandClipboard { argv }) as Box<dyn Clipboard>),
        share: caps
            .share
            .clone()
            .map(|argv| Box::new(CommandShare { argv }) as Box<dyn ShareSheet>),
        opener: caps
            .open
            .clone()
            .map(|argv| Box::new(CommandOpener { argv }) as Box<dyn Opener>),
        download: DownloadTarget {
            dir: config.download_dir.clone(),
            file_name: config.file_name.clone(),
        },
        sms_platform: config.sms_platform.resolve(),
    }
}

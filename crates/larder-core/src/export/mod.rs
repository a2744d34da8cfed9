//! Plain-text grocery export and its delivery actions.
//!
//! [`build_list_text`] renders the aggregation as shareable text. The
//! delivery mechanisms (clipboard, share sheet, SMS deep link, file
//! download) sit behind small capability traits so a missing capability
//! degrades to a status message instead of an error. Each action is
//! independent: a failed copy never affects a later download, and none of
//! them touch the stored sets.

mod feedback;

pub use feedback::{FEEDBACK_DURATION, Feedback};

use crate::aggregate::Aggregation;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default file name for downloads.
pub const DEFAULT_FILE_NAME: &str = "grocery-list.txt";

/// Title passed to share sheets.
pub const SHARE_TITLE: &str = "Grocery List";

pub const MSG_COPIED: &str = "Copied to clipboard";
pub const MSG_COPY_FAILED: &str = "Copy failed";
pub const MSG_SHARED: &str = "Shared";
pub const MSG_SHARE_FALLBACK: &str = "Copied (share unavailable)";
pub const MSG_SHARE_UNAVAILABLE: &str = "Share unavailable";
pub const MSG_SMS_OPENED: &str = "Opening SMS composer";
pub const MSG_SMS_UNAVAILABLE: &str = "SMS unavailable";
pub const MSG_DOWNLOAD_FAILED: &str = "Download failed";

/// Characters `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Render the grocery list as plain text.
///
/// ```text
/// Groceries for 2 recipes
/// Recipes: Pancakes, Omelette
///
/// • 2 eggs (x2)
/// • 1 cup milk
/// ```
///
/// Entries keep first-encounter order. The recipes line is omitted when
/// nothing is selected, and the blank separator only precedes bullets.
#[must_use]
pub fn build_list_text(aggregation: &Aggregation) -> String {
    let titles = aggregation.titles();
    let mut lines = vec![format!(
        "Groceries for {} recipe{}",
        titles.len(),
        if titles.len() == 1 { "" } else { "s" }
    )];
    if !titles.is_empty() {
        lines.push(format!("Recipes: {}", titles.join(", ")));
    }
    if !aggregation.is_empty() {
        lines.push(String::new());
        lines.extend(aggregation.items().iter().map(|e| format!("• {}", e.label())));
    }
    lines.join("\n")
}

/// URL scheme flavour for SMS deep links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SmsPlatform {
    /// iPhone/iPad/iPod: `sms:&body=`.
    Ios,
    /// Everything else: `sms:?body=`.
    #[default]
    Other,
}

impl SmsPlatform {
    /// Platform of the running process.
    #[must_use]
    pub fn detect() -> Self {
        if std::env::consts::OS == "ios" {
            Self::Ios
        } else {
            Self::Other
        }
    }

    /// Classify a browser-style user agent string.
    #[must_use]
    pub fn from_user_agent(ua: &str) -> Self {
        if ["iPad", "iPhone", "iPod"].iter().any(|d| ua.contains(d)) {
            Self::Ios
        } else {
            Self::Other
        }
    }
}

/// Build an SMS compose link with `text` as the percent-encoded body.
#[must_use]
pub fn sms_link(text: &str, platform: SmsPlatform) -> String {
    let body = utf8_percent_encode(text, URI_COMPONENT);
    match platform {
        SmsPlatform::Ios => format!("sms:&body={body}"),
        SmsPlatform::Other => format!("sms:?body={body}"),
    }
}

/// Write `text` as a UTF-8 file named `file_name` inside `dir`.
///
/// # Errors
///
/// Any I/O error from creating `dir` or writing the file.
pub fn download(text: &str, dir: &Path, file_name: &str) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    std::fs::write(&path, text)?;
    Ok(path)
}

/// Failure of an optional platform capability.
#[derive(Debug, thiserror::Error)]
pub enum CapabilityError {
    #[error("{0} is not available on this system")]
    Unavailable(&'static str),
    #[error("{0}")]
    Failed(String),
}

/// Plain-text clipboard writer.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), CapabilityError>;
}

/// Result of a share request the user could dismiss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Cancelled,
}

/// Native share sheet.
pub trait ShareSheet {
    fn share(&mut self, title: &str, text: &str) -> Result<ShareOutcome, CapabilityError>;
}

/// Hands a URI to the platform (browser, messaging app).
pub trait Opener {
    fn open(&mut self, uri: &str) -> Result<(), CapabilityError>;
}

/// The four delivery mechanisms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportAction {
    Copy,
    Share,
    Sms,
    Download,
}

/// What happened when an action ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionReport {
    pub action: ExportAction,
    pub ok: bool,
    /// Transient status message, if the action reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// SMS link that was (or would have been) opened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// File written by a download.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl ActionReport {
    fn new(action: ExportAction, ok: bool, status: Option<&str>) -> Self {
        Self {
            action,
            ok,
            status: status.map(str::to_string),
            link: None,
            path: None,
        }
    }
}

/// Where downloads land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub dir: PathBuf,
    pub file_name: String,
}

impl Default for DownloadTarget {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

/// Available delivery capabilities. Absent ones are `None`.
#[derive(Default)]
pub struct ExportActions {
    pub clipboard: Option<Box<dyn Clipboard>>,
    pub share: Option<Box<dyn ShareSheet>>,
    pub opener: Option<Box<dyn Opener>>,
    pub download: DownloadTarget,
    pub sms_platform: SmsPlatform,
}

impl std::fmt::Debug for ExportActions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportActions")
            .field("clipboard", &self.clipboard.is_some())
            .field("share", &self.share.is_some())
            .field("opener", &self.opener.is_some())
            .field("download", &self.download)
            .field("sms_platform", &self.sms_platform)
            .finish()
    }
}

impl ExportActions {
    /// Run one action against `text`.
    pub fn run(&mut self, action: ExportAction, text: &str) -> ActionReport {
        let report = match action {
            ExportAction::Copy => self.copy(text),
            ExportAction::Share => self.share(text),
            ExportAction::Sms => self.sms(text),
            ExportAction::Download => self.download(text),
        };
        debug!(?action, ok = report.ok, status = ?report.status, "export action finished");
        report
    }

    pub fn copy(&mut self, text: &str) -> ActionReport {
        match self.write_clipboard(text) {
            Ok(()) => ActionReport::new(ExportAction::Copy, true, Some(MSG_COPIED)),
            Err(err) => {
                warn!("clipboard copy failed: {err}");
                ActionReport::new(ExportAction::Copy, false, Some(MSG_COPY_FAILED))
            }
        }
    }

    /// Share through the native sheet, falling back to the clipboard when
    /// no sheet exists. A dismissed or failed sheet is a silent no-op.
    pub fn share(&mut self, text: &str) -> ActionReport {
        if let Some(sheet) = self.share.as_deref_mut() {
            return match sheet.share(SHARE_TITLE, text) {
                Ok(ShareOutcome::Shared) => {
                    ActionReport::new(ExportAction::Share, true, Some(MSG_SHARED))
                }
                Ok(ShareOutcome::Cancelled) => ActionReport::new(ExportAction::Share, true, None),
                Err(err) => {
                    debug!("share sheet dismissed or failed: {err}");
                    ActionReport::new(ExportAction::Share, true, None)
                }
            };
        }

        match self.write_clipboard(text) {
            Ok(()) => ActionReport::new(ExportAction::Share, true, Some(MSG_SHARE_FALLBACK)),
            Err(err) => {
                warn!("share fallback copy failed: {err}");
                ActionReport::new(ExportAction::Share, false, Some(MSG_SHARE_UNAVAILABLE))
            }
        }
    }

    pub fn sms(&mut self, text: &str) -> ActionReport {
        let link = sms_link(text, self.sms_platform);
        let result = self
            .opener
            .as_deref_mut()
            .ok_or(CapabilityError::Unavailable("URI opener"))
            .and_then(|opener| opener.open(&link));

        let mut report = match result {
            Ok(()) => ActionReport::new(ExportAction::Sms, true, Some(MSG_SMS_OPENED)),
            Err(err) => {
                warn!("sms composer unavailable: {err}");
                ActionReport::new(ExportAction::Sms, false, Some(MSG_SMS_UNAVAILABLE))
            }
        };
        report.link = Some(link);
        report
    }

    pub fn download(&mut self, text: &str) -> ActionReport {
        match download(text, &self.download.dir, &self.download.file_name) {
            Ok(path) => {
                let status = format!("Saved to {}", path.display());
                let mut report = ActionReport::new(ExportAction::Download, true, Some(&status));
                report.path = Some(path);
                report
            }
            Err(err) => {
                warn!(dir = %self.download.dir.display(), "download failed: {err}");
                ActionReport::new(ExportAction::Download, false, Some(MSG_DOWNLOAD_FAILED))
            }
        }
    }

    fn write_clipboard(&mut self, text: &str) -> Result<(), CapabilityError> {
        self.clipboard
            .as_deref_mut()
            .ok_or(CapabilityError::Unavailable("clipboard"))?
            .write_text(text)
    }
}

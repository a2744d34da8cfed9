//! `larder export`: print or deliver the grocery list as plain text.

use anyhow::{Result, bail};
use clap::{Args, ValueEnum};
use larder_core::export::{ActionReport, ExportAction, build_list_text};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::context::{Overrides, Planner};
use crate::output::{OutputMode, render, render_mode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportTarget {
    /// Print the list to stdout.
    Text,
    /// Copy to the system clipboard.
    Copy,
    /// Hand to the share command, or copy when none is configured.
    Share,
    /// Open an SMS composer with the list as the body.
    Sms,
    /// Save as a text file.
    Download,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[arg(value_enum, default_value = "text")]
    pub target: ExportTarget,

    /// Directory for `download` (overrides config).
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// File name for `download` (overrides config).
    #[arg(long, value_name = "NAME")]
    pub file_name: Option<String>,
}

impl ExportTarget {
    const fn action(self) -> Option<ExportAction> {
        match self {
            Self::Text => None,
            Self::Copy => Some(ExportAction::Copy),
            Self::Share => Some(ExportAction::Share),
            Self::Sms => Some(ExportAction::Sms),
            Self::Download => Some(ExportAction::Download),
        }
    }
}

pub fn run_export(args: &ExportArgs, project_root: &Path, overrides: &Overrides) -> Result<()> {
    let planner = Planner::open(project_root, overrides)?;
    let text = build_list_text(&planner.aggregation()?);
    let mode = planner.output_mode();

    let Some(action) = args.target.action() else {
        return render_mode(
            mode,
            &serde_json::json!({ "text": text }),
            |_, w| writeln!(w, "{text}"),
            |_, w| writeln!(w, "{text}"),
        );
    };

    let mut actions = planner.export_actions();
    if let Some(dir) = &args.dir {
        actions.download.dir = project_root.join(dir);
    }
    if let Some(name) = &args.file_name {
        actions.download.file_name.clone_from(name);
    }

    let report = actions.run(action, &text);
    print_report(mode, &report)?;
    if !report.ok {
        bail!(
            "{}",
            report.status.as_deref().unwrap_or("export action failed")
        );
    }
    Ok(())
}

fn print_report(mode: OutputMode, report: &ActionReport) -> Result<()> {
    render(mode, report, |report, w| {
        if let Some(status) = &report.status {
            writeln!(w, "{status}")?;
        }
        // without an opener the link is the only way to reach the composer
        if !report.ok
            && let Some(link) = &report.link
        {
            writeln!(w, "{link}")?;
        }
        Ok(())
    })
}

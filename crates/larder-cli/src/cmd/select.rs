//! `larder select`, `larder deselect` and `larder clear`: edit the
//! week's selection.

use anyhow::Result;
use clap::Args;
use larder_core::view::{self, Badge};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::context::{Overrides, Planner};
use crate::output::{pretty_kv, render_mode};

#[derive(Args, Debug)]
pub struct SelectArgs {
    /// Recipe ids or titles.
    #[arg(required = true, num_args = 1..)]
    pub recipes: Vec<String>,
}

#[derive(Args, Debug)]
pub struct DeselectArgs {
    /// Recipe ids or titles.
    #[arg(required = true, num_args = 1..)]
    pub recipes: Vec<String>,
}

#[derive(Debug, Serialize)]
struct SelectionOutput {
    action: &'static str,
    changed: Vec<String>,
    selected: Vec<String>,
    count_line: String,
    remaining: usize,
    launcher: String,
}

fn apply(
    project_root: &Path,
    overrides: &Overrides,
    references: &[String],
    selected: bool,
) -> Result<()> {
    let mut planner = Planner::open(project_root, overrides)?;

    // Resolve everything first so a bad reference leaves the store untouched.
    let ids = references
        .iter()
        .map(|r| planner.catalog.resolve(r).map(|card| card.id.clone()))
        .collect::<larder_core::Result<Vec<_>>>()?;

    let mut badge = Badge::default();
    for id in &ids {
        badge = view::set_selected(&mut planner.persistence, planner.catalog.cards(), id, selected)?;
    }
    info!(count = ids.len(), selected, "selection updated");

    report(
        &planner,
        if selected { "select" } else { "deselect" },
        ids,
        badge,
    )
}

fn report(planner: &Planner, action: &'static str, changed: Vec<String>, badge: Badge) -> Result<()> {
    let selected: Vec<String> = planner.persistence.selected_recipe_ids()?.into_iter().collect();
    let out = SelectionOutput {
        action,
        changed,
        count_line: view::count_line(planner.aggregation()?.titles().len()),
        selected,
        remaining: badge.remaining(),
        launcher: badge.launcher_label(),
    };

    render_mode(
        planner.output_mode(),
        &out,
        |out, w| {
            for id in &out.changed {
                writeln!(w, "{} {id}", out.action)?;
            }
            writeln!(w, "remaining={}", out.remaining)
        },
        |out, w| {
            let verb = match out.action {
                "select" => "Selected",
                "deselect" => "Deselected",
                _ => "Cleared",
            };
            for id in &out.changed {
                writeln!(w, "✓ {verb} {id}")?;
            }
            if out.changed.is_empty() {
                writeln!(w, "✓ {verb} selection")?;
            }
            pretty_kv(w, "week", &out.count_line)?;
            pretty_kv(w, "list", &out.launcher)
        },
    )
}

pub fn run_select(args: &SelectArgs, project_root: &Path, overrides: &Overrides) -> Result<()> {
    apply(project_root, overrides, &args.recipes, true)
}

pub fn run_deselect(args: &DeselectArgs, project_root: &Path, overrides: &Overrides) -> Result<()> {
    apply(project_root, overrides, &args.recipes, false)
}

/// Deselect everything. The purchased set empties with it.
pub fn run_clear(project_root: &Path, overrides: &Overrides) -> Result<()> {
    let mut planner = Planner::open(project_root, overrides)?;
    planner
        .persistence
        .set_selected_recipe_ids(std::iter::empty::<String>())?;
    let badge =
        view::refresh_after_selection_change(&mut planner.persistence, planner.catalog.cards())?;
    info!("selection cleared");
    report(&planner, "clear", Vec::new(), badge)
}

//! `larder groceries`: show the aggregated grocery list.

use anyhow::Result;
use clap::Args;
use larder_core::view::{GroceryRow, GroceryView};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::context::{Overrides, Planner};
use crate::output::{pretty_rule, render_mode};

#[derive(Args, Debug)]
pub struct GroceriesArgs {
    /// Hide items already marked purchased.
    #[arg(long)]
    pub remaining: bool,
}

/// A row with its 1-based position in the full list, which `buy` accepts.
#[derive(Debug, Serialize)]
struct ListedRow {
    number: usize,
    #[serde(flatten)]
    row: GroceryRow,
}

#[derive(Debug, Serialize)]
struct GroceriesOutput {
    launcher: String,
    rows: Vec<ListedRow>,
    tags: Vec<String>,
    count_line: String,
    remaining: usize,
}

impl GroceriesOutput {
    fn new(view: GroceryView, hide_purchased: bool) -> Self {
        let launcher = view.badge().launcher_label();
        let rows = view
            .rows
            .into_iter()
            .enumerate()
            .filter(|(_, row)| !(hide_purchased && row.purchased))
            .map(|(i, row)| ListedRow { number: i + 1, row })
            .collect();
        Self {
            launcher,
            rows,
            tags: view.tags,
            count_line: view.count_line,
            remaining: view.remaining,
        }
    }
}

pub fn run_groceries(args: &GroceriesArgs, project_root: &Path, overrides: &Overrides) -> Result<()> {
    let planner = Planner::open(project_root, overrides)?;
    let view = GroceryView::load(&planner.persistence, planner.catalog.cards())?;
    let list_empty = view.is_empty();
    let out = GroceriesOutput::new(view, args.remaining);

    render_mode(
        planner.output_mode(),
        &out,
        |out, w| {
            for listed in &out.rows {
                let mark = if listed.row.purchased { "x" } else { "-" };
                writeln!(w, "{}\t{mark}\t{}", listed.number, listed.row.label)?;
            }
            Ok(())
        },
        |out, w| {
            writeln!(w, "{}", out.launcher)?;
            pretty_rule(w)?;
            writeln!(w, "{}", out.count_line)?;
            if !out.tags.is_empty() {
                writeln!(w, "{}", out.tags.join(" · "))?;
            }
            writeln!(w)?;
            if list_empty {
                return writeln!(w, "Your list is empty. Select recipes to build it.");
            }
            for listed in &out.rows {
                let mark = if listed.row.purchased { "[x]" } else { "[ ]" };
                writeln!(w, "{:>3}. {mark} {}", listed.number, listed.row.label)?;
            }
            Ok(())
        },
    )
}

//! `larder buy` and `larder unbuy`: mark grocery items purchased.

use anyhow::Result;
use clap::Args;
use larder_core::normalize_key;
use larder_core::view::{self, GroceryView};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::context::{Overrides, Planner};
use crate::output::render_mode;

#[derive(Args, Debug)]
pub struct BuyArgs {
    /// Row numbers from `larder groceries`, or ingredient lines.
    #[arg(required = true, num_args = 1..)]
    pub items: Vec<String>,
}

#[derive(Debug, Serialize)]
struct PurchaseOutput {
    purchased: bool,
    keys: Vec<String>,
    remaining: usize,
    launcher: String,
}

/// Map a row number or ingredient text to a canonical key.
fn resolve_key(view: &GroceryView, item: &str) -> String {
    item.trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| view.rows.get(i))
        .map_or_else(|| normalize_key(item), |row| row.key.clone())
}

fn apply(args: &BuyArgs, project_root: &Path, overrides: &Overrides, purchased: bool) -> Result<()> {
    let mut planner = Planner::open(project_root, overrides)?;
    let view = GroceryView::load(&planner.persistence, planner.catalog.cards())?;
    let keys: Vec<String> = args.items.iter().map(|i| resolve_key(&view, i)).collect();

    // all keys are validated before the single write
    let badge = view::set_purchased_all(
        &mut planner.persistence,
        planner.catalog.cards(),
        keys.as_slice(),
        purchased,
    )?;

    let out = PurchaseOutput {
        purchased,
        keys,
        remaining: badge.remaining(),
        launcher: badge.launcher_label(),
    };
    render_mode(
        planner.output_mode(),
        &out,
        |out, w| {
            for key in &out.keys {
                writeln!(w, "{} {key}", if out.purchased { "buy" } else { "unbuy" })?;
            }
            writeln!(w, "remaining={}", out.remaining)
        },
        |out, w| {
            let verb = if out.purchased { "Bought" } else { "Put back" };
            for key in &out.keys {
                writeln!(w, "✓ {verb} {key}")?;
            }
            writeln!(w, "{}", out.launcher)
        },
    )
}

pub fn run_buy(args: &BuyArgs, project_root: &Path, overrides: &Overrides) -> Result<()> {
    apply(args, project_root, overrides, true)
}

pub fn run_unbuy(args: &BuyArgs, project_root: &Path, overrides: &Overrides) -> Result<()> {
    apply(args, project_root, overrides, false)
}

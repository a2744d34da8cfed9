//! `larder plan`: interactive planner in the terminal.

use anyhow::{Result, bail};
use clap::Args;
use std::io::{self, IsTerminal};
use std::path::Path;
use tracing::info;

use crate::context::{Overrides, Planner};
use crate::tui::{self, PlannerApp};

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Start with the grocery list open.
    #[arg(long, short = 'g')]
    pub groceries: bool,
}

pub fn run_plan(args: &PlanArgs, project_root: &Path, overrides: &Overrides) -> Result<()> {
    if !io::stdout().is_terminal() {
        bail!("`larder plan` needs an interactive terminal; use `larder recipes` and `larder groceries` in scripts");
    }

    let planner = Planner::open(project_root, overrides)?;
    let actions = planner.export_actions();
    let feedback = planner.config.feedback_duration();
    info!(recipes = planner.catalog.len(), "starting planner");

    let mut app = PlannerApp::new(planner.catalog, planner.persistence, actions, feedback)?;
    if args.groceries {
        app.open_drawer()?;
    }
    tui::run_planner(app)
}

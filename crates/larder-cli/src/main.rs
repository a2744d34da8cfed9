#![forbid(unsafe_code)]

mod cmd;
mod context;
mod output;
mod platform;
mod tui;

use clap::{CommandFactory, Parser, Subcommand};
use context::Overrides;
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "larder: weekly recipe planner and grocery list",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress log output below errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Recipe catalog (markdown or JSON). Overrides `catalog` in config.
    #[arg(long, global = true, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// State file holding the selection and purchased items.
    #[arg(long, global = true, value_name = "PATH")]
    store: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            catalog: self.catalog.clone(),
            store: self.store.clone(),
            format: self.format,
            json: self.json,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Browse",
        about = "List recipes by section",
        long_about = "List every recipe card in catalog order, grouped by section, with its selection mark.",
        after_help = "EXAMPLES:\n    # List all recipes\n    larder recipes\n\n    # Only this week's picks\n    larder recipes --selected\n\n    # Emit machine-readable output\n    larder recipes --json"
    )]
    Recipes(cmd::recipes::RecipesArgs),

    #[command(
        next_help_heading = "Browse",
        about = "Search recipes",
        long_about = "Case-insensitive substring search over titles, ingredients and instructions.",
        after_help = "EXAMPLES:\n    # Find recipes using tomatoes\n    larder search tomato\n\n    # Multi-word terms are joined with spaces\n    larder search olive oil"
    )]
    Search(cmd::search::SearchArgs),

    #[command(
        next_help_heading = "Plan",
        about = "Add recipes to the week",
        long_about = "Select recipes by id or exact title. Purchased items no longer on the list are pruned.",
        after_help = "EXAMPLES:\n    # Select by id\n    larder select pancakes gazpacho\n\n    # Select by title\n    larder select \"Mushroom Risotto\""
    )]
    Select(cmd::select::SelectArgs),

    #[command(
        next_help_heading = "Plan",
        about = "Remove recipes from the week",
        after_help = "EXAMPLES:\n    # Deselect a recipe\n    larder deselect pancakes"
    )]
    Deselect(cmd::select::DeselectArgs),

    #[command(
        next_help_heading = "Plan",
        about = "Clear the week's selection",
        after_help = "EXAMPLES:\n    # Start a fresh week\n    larder clear"
    )]
    Clear,

    #[command(
        next_help_heading = "Plan",
        about = "Open the interactive planner",
        long_about = "Full-screen planner: browse and search recipes, select them for the week, and work through the grocery list.",
        after_help = "EXAMPLES:\n    # Start the planner\n    larder plan\n\n    # Start with the grocery list open\n    larder plan --groceries"
    )]
    Plan(cmd::plan::PlanArgs),

    #[command(
        next_help_heading = "Groceries",
        about = "Show the grocery list",
        long_about = "Show the aggregated grocery list for the selected recipes, with purchased marks and counts.",
        after_help = "EXAMPLES:\n    # Show the list\n    larder groceries\n\n    # Only what is left to buy\n    larder groceries --remaining"
    )]
    Groceries(cmd::groceries::GroceriesArgs),

    #[command(
        next_help_heading = "Groceries",
        about = "Mark grocery items purchased",
        after_help = "EXAMPLES:\n    # By row number from `larder groceries`\n    larder buy 1 3\n\n    # By ingredient text\n    larder buy \"2 eggs\""
    )]
    Buy(cmd::buy::BuyArgs),

    #[command(
        next_help_heading = "Groceries",
        about = "Unmark purchased grocery items",
        after_help = "EXAMPLES:\n    # Put an item back on the list\n    larder unbuy 1"
    )]
    Unbuy(cmd::buy::BuyArgs),

    #[command(
        next_help_heading = "Groceries",
        about = "Export the grocery list",
        long_about = "Print the grocery list as plain text, or copy, share, text or save it.",
        after_help = "EXAMPLES:\n    # Print the list\n    larder export\n\n    # Copy to the clipboard\n    larder export copy\n\n    # Save to a file\n    larder export download --dir ~/Downloads"
    )]
    Export(cmd::export::ExportArgs),

    #[command(
        next_help_heading = "Tools",
        about = "Show derived ids and ingredient keys",
        after_help = "EXAMPLES:\n    # Recipe id from a title\n    larder slug \"Crème Brûlée\"\n\n    # Dedup key for an ingredient line\n    larder slug --key \"2  Eggs\""
    )]
    Slug(cmd::slug::SlugArgs),

    #[command(
        next_help_heading = "Tools",
        about = "Inspect or edit configuration",
        after_help = "EXAMPLES:\n    # Show effective config\n    larder config show\n\n    # Use a different catalog\n    larder config set catalog meals.md\n\n    # Configure the clipboard command\n    larder config set commands.clipboard \"xclip -selection clipboard\""
    )]
    Config(cmd::config::ConfigArgs),

    #[command(
        next_help_heading = "Tools",
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    # Bash\n    larder completions bash > ~/.local/share/bash-completion/completions/larder"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(cli: &Cli) {
    let default = if cli.verbose || env::var("DEBUG").is_ok() {
        "larder=debug,info"
    } else if cli.quiet || matches!(cli.command, Commands::Plan(_)) {
        // log lines would tear through the full-screen planner
        "larder=error,error"
    } else {
        "larder=info,warn"
    };
    let filter = EnvFilter::try_from_env("LARDER_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    let format = env::var("LARDER_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let project_root = env::current_dir()?;
    let overrides = cli.overrides();
    debug!(root = %project_root.display(), "resolved project root");

    match &cli.command {
        Commands::Recipes(args) => cmd::recipes::run_recipes(args, &project_root, &overrides),
        Commands::Search(args) => cmd::search::run_search(args, &project_root, &overrides),
        Commands::Select(args) => cmd::select::run_select(args, &project_root, &overrides),
        Commands::Deselect(args) => cmd::select::run_deselect(args, &project_root, &overrides),
        Commands::Clear => cmd::select::run_clear(&project_root, &overrides),
        Commands::Plan(args) => cmd::plan::run_plan(args, &project_root, &overrides),
        Commands::Groceries(args) => {
            cmd::groceries::run_groceries(args, &project_root, &overrides)
        }
        Commands::Buy(args) => cmd::buy::run_buy(args, &project_root, &overrides),
        Commands::Unbuy(args) => cmd::buy::run_unbuy(args, &project_root, &overrides),
        Commands::Export(args) => cmd::export::run_export(args, &project_root, &overrides),
        Commands::Slug(args) => {
            cmd::slug::run_slug(args, resolve_output_mode(cli.format, cli.json))
        }
        Commands::Config(args) => cmd::config::run_config(args, &project_root, &overrides),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let mode = resolve_output_mode(cli.format, cli.json);
            if render_error(mode, &CliError::from(&err)).is_err() {
                eprintln!("error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

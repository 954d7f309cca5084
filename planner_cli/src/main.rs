//! build-planner - assemble a build from flags or a share link and print its stat sheet

use build_core::{DeselectPolicy, Rejection};
use catalog_core::{BagKind, Catalog, CatalogError, ItemId, Location};
use clap::Parser;
use serde::Serialize;
use stat_core::{EffectTables, Planner, StatError, StatSheet};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Optional effect table overrides, looked up next to the catalog files
const EFFECTS_FILE: &str = "effects.toml";

/// Character build planner
#[derive(Parser, Debug)]
#[command(name = "build-planner")]
#[command(version, about = "Plan a character build and print its derived stats")]
struct Cli {
    /// Catalog directory holding skills.json, combatskills.json and items.json, plus optional
    /// rules.toml and effects.toml
    #[arg(long, default_value = "data")]
    data: PathBuf,

    /// Start from a share link query, with or without the leading '?'
    #[arg(long)]
    query: Option<String>,

    /// Skill ids to select, in order
    #[arg(long = "skill", value_delimiter = ',')]
    skills: Vec<u32>,

    /// Combat skill ids to select, in order
    #[arg(long = "combat", value_delimiter = ',')]
    combat: Vec<u32>,

    /// Bag to equip: satchel, backpack or duffel
    #[arg(long)]
    bag: Option<BagKind>,

    /// Item ids to carry in hand
    #[arg(long = "held", value_delimiter = ',')]
    held: Vec<ItemId>,

    /// Item ids to put in the bag
    #[arg(long = "bag-item", value_delimiter = ',')]
    bag_items: Vec<ItemId>,

    /// Refuse skill removals that would strand other skills
    #[arg(long)]
    strict: bool,

    /// Print the sheet as JSON
    #[arg(long)]
    json: bool,

    /// Debug logging on stderr (RUST_LOG takes precedence)
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Effects(#[from] StatError),
    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSON output structure
#[derive(Serialize)]
struct Report<'a> {
    sheet: &'a StatSheet,
    query: String,
    rejections: &'a [String],
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let catalog = Arc::new(Catalog::load_dir(&cli.data)?);
    info!(data = %cli.data.display(), "catalog loaded");

    let effects_path = cli.data.join(EFFECTS_FILE);
    let tables = if effects_path.exists() {
        debug!(path = %effects_path.display(), "loading effect tables");
        EffectTables::load_from_path(&effects_path)?
    } else {
        EffectTables::default()
    };

    let policy = if cli.strict {
        DeselectPolicy::PreserveConnectivity
    } else {
        DeselectPolicy::Permissive
    };
    let mut planner = match &cli.query {
        Some(query) => Planner::from_query(catalog, query),
        None => Planner::new(catalog),
    }
    .with_policy(policy)
    .with_effects(tables);

    let rejections = apply_flags(&mut planner, cli);
    for rejection in &rejections {
        eprintln!("rejected: {}", rejection);
    }

    let sheet = planner.sheet();
    let query = planner.query_string();
    if cli.json {
        let report = Report {
            sheet,
            query,
            rejections: &rejections,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", sheet);
        println!();
        println!("Share: ?{}", query);
    }
    Ok(())
}

/// Apply the mutation flags in a fixed order: skills, combat skills, bag, held
/// items, bag items. Rejected steps are reported and skipped.
fn apply_flags(planner: &mut Planner, cli: &Cli) -> Vec<String> {
    let mut rejections = Vec::new();

    for &id in &cli.skills {
        note(&mut rejections, "select skill", id, planner.select_skill(id));
    }
    for &id in &cli.combat {
        note(&mut rejections, "select combat skill", id, planner.select_combat(id));
    }
    if let Some(kind) = cli.bag {
        planner.equip_bag(kind);
    }
    for &id in &cli.held {
        note(&mut rejections, "hold item", id, planner.add_item(id, Location::Held));
    }
    for &id in &cli.bag_items {
        note(&mut rejections, "bag item", id, planner.add_item(id, Location::Bag));
    }

    rejections
}

fn note<T>(rejections: &mut Vec<String>, action: &str, id: u32, result: Result<T, Rejection>) {
    if let Err(rejection) = result {
        debug!(action, id, %rejection, "mutation rejected");
        rejections.push(format!("{} {}: {}", action, id, rejection));
    }
}

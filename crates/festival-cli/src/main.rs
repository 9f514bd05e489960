use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use schedule_engine::{
    suggested_alternatives, Catalog, Conflict, ConflictKind, JsonFileSelection, ScheduleValidator,
    SelectionStore, TravelModel,
};

/// Exit code when a schedule has conflicts.
const EXIT_CONFLICTS: u8 = 2;

/// Check a festival screening selection for time and travel conflicts.
#[derive(Debug, Parser)]
#[command(name = "festival", version, about)]
struct Cli {
    /// TOML file overriding the travel model (walking speed, buffer).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level (RUST_LOG takes precedence when set).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the built-in demo catalog as JSON.
    DemoCatalog {
        /// First festival day (YYYY-MM-DD).
        #[arg(long)]
        start: NaiveDate,
    },
    /// Validate every pair of the current selection.
    Validate {
        #[arg(long)]
        catalog: PathBuf,
        #[arg(long)]
        selection: PathBuf,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Check one candidate screening against the current selection.
    Check {
        #[arg(long)]
        catalog: PathBuf,
        #[arg(long)]
        selection: PathBuf,
        /// Screening id to check.
        candidate: String,
        #[arg(long)]
        json: bool,
    },
    /// List other screenings of the same film.
    Alternatives {
        #[arg(long)]
        catalog: PathBuf,
        /// Screening id to find alternatives for.
        screening: String,
        /// Screening id to leave out (usually the one it clashed with).
        #[arg(long, default_value = "")]
        exclude: String,
    },
    /// Edit the persisted selection.
    #[command(subcommand)]
    Select(SelectCommand),
}

#[derive(Debug, Subcommand)]
enum SelectCommand {
    /// Add a screening, warning about conflicts without refusing it.
    Add {
        #[arg(long)]
        catalog: PathBuf,
        #[arg(long)]
        selection: PathBuf,
        id: String,
    },
    /// Remove a screening.
    Remove {
        #[arg(long)]
        selection: PathBuf,
        id: String,
    },
    /// Print the selected ids, one per line.
    List {
        #[arg(long)]
        selection: PathBuf,
    },
    /// Empty the selection.
    Clear {
        #[arg(long)]
        selection: PathBuf,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let travel = match &cli.config {
        Some(path) => TravelModel::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => TravelModel::default(),
    };
    tracing::debug!(?travel, "travel model");
    let validator = ScheduleValidator::new(travel);

    match cli.command {
        Command::DemoCatalog { start } => {
            println!("{}", Catalog::demo(start).to_json_string()?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate {
            catalog,
            selection,
            json,
        } => run_validate(&validator, &catalog, &selection, json),
        Command::Check {
            catalog,
            selection,
            candidate,
            json,
        } => run_check(&validator, &catalog, &selection, &candidate, json),
        Command::Alternatives {
            catalog,
            screening,
            exclude,
        } => {
            let catalog = load_catalog(&catalog)?;
            let Some(target) = catalog.screening(&screening) else {
                bail!("unknown screening: {screening}");
            };
            for alt in suggested_alternatives(target, catalog.screenings(), &exclude) {
                println!(
                    "{}\t{} {}-{}\t{}",
                    alt.id, alt.date, alt.start_time, alt.end_time, alt.venue.name
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Select(cmd) => run_select(&validator, cmd),
    }
}

fn run_validate(
    validator: &ScheduleValidator,
    catalog: &Path,
    selection: &Path,
    json: bool,
) -> Result<ExitCode> {
    let catalog = load_catalog(catalog)?;
    let ids = JsonFileSelection::new(selection).selected_ids()?;
    let screenings = catalog.resolve_selection(&ids);
    if screenings.len() != ids.len() {
        tracing::warn!(
            selected = ids.len(),
            known = screenings.len(),
            "selection contains ids missing from the catalog"
        );
    }

    let report = validator.validate_full_schedule(&screenings);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.is_valid {
        let runtime = catalog.total_runtime_minutes(&ids);
        println!(
            "Schedule is feasible: {} screenings, {}h{:02} of films, no conflicts",
            screenings.len(),
            runtime / 60,
            runtime % 60
        );
    } else {
        println!("{} conflict(s) found:", report.conflicts.len());
        print_conflicts(&report.conflicts);
    }

    Ok(exit_for(report.is_valid))
}

fn run_check(
    validator: &ScheduleValidator,
    catalog: &Path,
    selection: &Path,
    candidate: &str,
    json: bool,
) -> Result<ExitCode> {
    let catalog = load_catalog(catalog)?;
    let Some(target) = catalog.screening(candidate) else {
        bail!("unknown screening: {candidate}");
    };
    let ids = JsonFileSelection::new(selection).selected_ids()?;
    let existing: Vec<_> = catalog
        .resolve_selection(&ids)
        .into_iter()
        .filter(|s| s.id != target.id)
        .collect();

    let conflicts = validator.check_conflicts(target, &existing);

    if json {
        println!("{}", serde_json::to_string_pretty(&conflicts)?);
    } else if conflicts.is_empty() {
        println!("No conflicts for {candidate}");
    } else {
        print_conflicts(&conflicts);
    }

    Ok(exit_for(conflicts.is_empty()))
}

fn run_select(validator: &ScheduleValidator, cmd: SelectCommand) -> Result<ExitCode> {
    match cmd {
        SelectCommand::Add {
            catalog,
            selection,
            id,
        } => {
            let catalog = load_catalog(&catalog)?;
            let Some(target) = catalog.screening(&id) else {
                bail!("unknown screening: {id}");
            };
            let mut store = JsonFileSelection::new(selection);
            let existing = catalog.resolve_selection(&store.selected_ids()?);
            if existing.iter().any(|s| s.id == id) {
                println!("{id} is already selected");
                return Ok(ExitCode::SUCCESS);
            }

            let conflicts = validator.check_conflicts(target, &existing);
            if !conflicts.is_empty() {
                eprintln!("Warning: {id} conflicts with your selection:");
                for c in &conflicts {
                    eprintln!("  - [{}] {}", kind_label(c.kind), c.message);
                }
            }
            store.add(&id)?;
            println!("Added {id}");
        }
        SelectCommand::Remove { selection, id } => {
            JsonFileSelection::new(selection).remove(&id)?;
            println!("Removed {id}");
        }
        SelectCommand::List { selection } => {
            for id in JsonFileSelection::new(selection).selected_ids()? {
                println!("{id}");
            }
        }
        SelectCommand::Clear { selection } => {
            JsonFileSelection::new(selection).clear()?;
            println!("Selection cleared");
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn load_catalog(path: &Path) -> Result<Catalog> {
    Catalog::load(path).with_context(|| format!("failed to load catalog {}", path.display()))
}

fn print_conflicts(conflicts: &[Conflict]) {
    for c in conflicts {
        println!(
            "  - [{}] {} (with {})",
            kind_label(c.kind),
            c.message,
            c.conflicting.id
        );
    }
}

fn kind_label(kind: ConflictKind) -> &'static str {
    match kind {
        ConflictKind::Time => "time",
        ConflictKind::Travel => "travel",
    }
}

fn exit_for(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_CONFLICTS)
    }
}

mod errors;
mod state;
mod ui;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use repcat_core::{
    composer_vocabulary, level_description, nationality_vocabulary, technique_vocabulary,
    validate_path_exists, Action, CatalogItem, EngineConfig, GuestSession, Level, LocalSession,
    SessionCapability, SortField, ViewMode, Viewport,
};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

use crate::errors::{map_catalog_load_error, map_config_error, map_session_error};
use crate::state::AppState;
use crate::ui::{format_active_filters, format_item, format_page_labels};

/// Repertoire catalog browser - search, filter, sort and page through a catalog
///
/// Examples:
///   # First page of everything, in curriculum order
///   repcat browse cello.json
///
///   # Search title or composer, accents optional
///   repcat browse cello.json --query faure
///
///   # Facets (OR within a facet, AND across facets)
///   repcat browse cello.json --level Beginner --level "Late Beginner" --instrument "Cello and Piano"
///
///   # Sort; repeating the same field flips to descending
///   repcat browse cello.json --sort duration --sort duration
///
///   # Reopen a shared view
///   repcat browse cello.json --url "selectedLevels=Advanced&page=2&viewMode=list"
#[derive(Parser, Debug)]
#[command(name = "repcat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Engine config file (TOML); falls back to $REPCAT_CONFIG, then defaults
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Filter, sort and page through a catalog
    #[command(after_help = "Filtering Logic:\n  \
    - Multiple values for the SAME facet are combined with OR\n  \
    - Different facets and the search text are combined with AND\n  \
    - Pieces with an unknown composition year are never listed\n\n\
Instrument Descriptors:\n  \
    - \"Cello\" or \"Cello Solo\": cello alone\n  \
    - \"Cello Duet\": exactly two cellos\n  \
    - \"Cello and Piano\": every named instrument present")]
    Browse(BrowseArgs),

    /// List the distinct values of a facet
    Vocab {
        /// Path to the catalog JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[arg(value_enum)]
        facet: VocabFacet,
    },

    /// Show the curriculum levels with their descriptions
    Levels,
}

#[derive(clap::Args, Debug)]
struct BrowseArgs {
    /// Path to the catalog JSON file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Start from a shared query string
    #[arg(long, value_name = "QUERY")]
    url: Option<String>,

    /// Search title or composer name
    #[arg(short, long, value_name = "TEXT")]
    query: Option<String>,

    /// Composer full name (repeatable)
    #[arg(short, long = "composer", value_name = "NAME")]
    composers: Vec<String>,

    /// Level (repeatable)
    #[arg(short, long = "level", value_name = "LEVEL")]
    levels: Vec<String>,

    /// Instrument descriptor (repeatable)
    #[arg(short, long = "instrument", value_name = "DESCRIPTOR")]
    instruments: Vec<String>,

    /// Composer nationality (repeatable)
    #[arg(long = "country", value_name = "COUNTRY")]
    countries: Vec<String>,

    /// Technique focus tag (repeatable)
    #[arg(short, long = "technique", value_name = "TAG")]
    techniques: Vec<String>,

    #[arg(long, value_name = "YEAR")]
    min_year: Option<i32>,

    #[arg(long, value_name = "YEAR")]
    max_year: Option<i32>,

    /// Sort field; each occurrence acts like a click on the column header
    #[arg(short, long = "sort", value_enum, value_name = "FIELD")]
    sorts: Vec<SortArg>,

    /// 1-based page number
    #[arg(short, long)]
    page: Option<usize>,

    #[arg(long, value_enum)]
    view: Option<ViewArg>,

    /// Use the narrow-viewport page size
    #[arg(long)]
    narrow: bool,

    /// Print the page as JSON
    #[arg(long)]
    json: bool,

    /// Log in as this user
    #[arg(long, value_name = "NAME")]
    user: Option<String>,

    /// Ids already on the user's saved list (repeatable)
    #[arg(long = "saved", value_name = "ID", requires = "user")]
    saved: Vec<i64>,

    /// Save or unsave a piece before listing (repeatable)
    #[arg(long = "toggle-save", value_name = "ID")]
    toggle_save: Vec<i64>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum VocabFacet {
    Composers,
    Nationalities,
    Techniques,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SortArg {
    Title,
    Composer,
    Level,
    Duration,
    Instrumentation,
}

impl From<SortArg> for SortField {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Title => SortField::Title,
            SortArg::Composer => SortField::Composer,
            SortArg::Level => SortField::Level,
            SortArg::Duration => SortField::Duration,
            SortArg::Instrumentation => SortField::Instrumentation,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ViewArg {
    Card,
    List,
}

impl From<ViewArg> for ViewMode {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Card => ViewMode::Grid,
            ViewArg::List => ViewMode::List,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = EngineConfig::resolve(cli.config.as_deref()).unwrap_or_else(|err| {
        report_error(map_config_error(&err, cli.config.as_deref()));
        process::exit(1);
    });

    let result = match cli.command {
        Command::Browse(args) => run_browse(config, args),
        Command::Vocab { file, facet } => run_vocab(&file, facet),
        Command::Levels => {
            print_levels();
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run_browse(config: EngineConfig, args: BrowseArgs) -> Result<()> {
    validate_path_exists(&args.file).map_err(|e| anyhow!(e))?;

    let session: Box<dyn SessionCapability> = match &args.user {
        Some(name) => Box::new(LocalSession::with_saved(name.clone(), args.saved.iter().copied())),
        None => Box::new(GuestSession),
    };

    let mut state = AppState::new(config, session);
    if args.narrow {
        state.viewport = Viewport::Narrow;
    }

    if let Err(err) = state.load_from_file(args.file.clone()) {
        report_error(map_catalog_load_error(&err, &args.file));
        println!("_No catalog loaded._");
        process::exit(1);
    }

    state.hydrate(args.url.as_deref().unwrap_or(""));
    for action in actions_from_args(&args) {
        state.dispatch(action);
    }
    state.settle_page();

    for id in &args.toggle_save {
        let known = state.snapshot.as_ref().is_some_and(|s| s.get(*id).is_some());
        if !known {
            eprintln!("{} no item with id {} in this catalog", "Skipped:".yellow(), id);
            continue;
        }
        match state.session.toggle_saved(*id) {
            Ok(true) => eprintln!("Saved item {}", id),
            Ok(false) => eprintln!("Removed item {} from saved list", id),
            Err(err) => report_error(map_session_error(&err, *id)),
        }
    }

    if args.json {
        print_page_json(&state)
    } else {
        print_page(&state);
        Ok(())
    }
}

/// Translate flags into the actions a user would perform, in panel order
fn actions_from_args(args: &BrowseArgs) -> Vec<Action> {
    let mut actions = Vec::new();

    if let Some(query) = &args.query {
        actions.push(Action::SetQuery(query.clone()));
    }
    actions.extend(args.composers.iter().cloned().map(Action::ToggleComposer));
    actions.extend(args.levels.iter().cloned().map(Action::ToggleLevel));
    actions.extend(args.instruments.iter().cloned().map(Action::ToggleInstrument));
    actions.extend(args.countries.iter().cloned().map(Action::ToggleCountry));
    actions.extend(args.techniques.iter().cloned().map(Action::ToggleTechniqueFocus));

    if let Some(min) = args.min_year {
        actions.push(Action::SetMinYear(min));
    }
    if let Some(max) = args.max_year {
        actions.push(Action::SetMaxYear(max));
    }

    actions.extend(args.sorts.iter().map(|s| Action::ToggleSort((*s).into())));

    if let Some(view) = args.view {
        actions.push(Action::SetViewMode(view.into()));
    }
    if let Some(page) = args.page {
        actions.push(Action::SetPage(page));
    }

    actions
}

fn print_page(state: &AppState) {
    println!("# {}\n", state.get_title());

    let filters = format_active_filters(&state.filters);
    if !filters.is_empty() {
        println!("## Active Filters\n");
        for line in filters {
            println!("{}", line);
        }
        println!();
    }

    if let Some(sort) = state.filters.sort {
        println!(
            "**Sorted by:** {} ({})\n",
            sort.field.as_query_value(),
            sort.direction.as_query_value()
        );
    }

    let Some(page) = state.current_page() else {
        println!("_Loading catalog..._");
        return;
    };

    println!("**Matching Items:** {}\n", page.total_matches);

    if page.is_empty() {
        println!("_No items match the specified filters._\n");
    } else {
        let view_mode = state.filters.view_mode;
        for item in &page.items {
            println!("{}", format_item(item, state.session.is_saved(item.id), view_mode));
            if view_mode == ViewMode::Grid {
                println!();
            }
        }
        println!();
        println!(
            "Page {} of {}:  {}",
            page.page,
            page.total_pages,
            format_page_labels(&page.labels, page.page)
        );
    }

    println!("\n{} ?{}", "Link:".cyan(), state.shareable_query());
}

fn print_page_json(state: &AppState) -> Result<()> {
    let page = state
        .current_page()
        .ok_or_else(|| anyhow!("no catalog loaded"))?;
    let labels: Vec<String> = page.labels.iter().map(|l| l.to_string()).collect();

    let output = serde_json::json!({
        "page": page,
        "labels": labels,
        "query": state.shareable_query(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run_vocab(file: &Path, facet: VocabFacet) -> Result<()> {
    let catalog = repcat_core::load_catalog(file).map_err(|err| {
        let (title, message, details) = map_catalog_load_error(&err, file);
        anyhow!("{}: {}\n{}", title, message, details)
    })?;
    let items: &[CatalogItem] = &catalog.items;

    let values = match facet {
        VocabFacet::Composers => composer_vocabulary(items),
        VocabFacet::Nationalities => nationality_vocabulary(items),
        VocabFacet::Techniques => technique_vocabulary(items),
    };

    for value in values {
        println!("- {}", value);
    }
    Ok(())
}

fn print_levels() {
    println!("# Curriculum Levels\n");
    for level in Level::ORDER {
        println!("{}. **{}**", level.rank() + 1, level.label().bold());
        println!("   {}", level_description(level.label()));
    }
}

fn report_error((title, message, details): (String, String, String)) {
    eprintln!("{} {}", title.red().bold(), message);
    if !details.is_empty() {
        eprintln!("\n{}", details);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_sort_flag_toggles() {
        let cli = Cli::parse_from(["repcat", "browse", "cello.json", "-s", "level", "-s", "level"]);
        let Command::Browse(args) = cli.command else {
            panic!("expected browse");
        };
        let actions = actions_from_args(&args);
        assert_eq!(
            actions,
            vec![
                Action::ToggleSort(SortField::Level),
                Action::ToggleSort(SortField::Level)
            ]
        );
    }

    #[test]
    fn test_facet_flags_become_toggles() {
        let cli = Cli::parse_from([
            "repcat",
            "browse",
            "cello.json",
            "--level",
            "Beginner",
            "--instrument",
            "Cello Solo",
            "--min-year",
            "1800",
            "--page",
            "2",
        ]);
        let Command::Browse(args) = cli.command else {
            panic!("expected browse");
        };
        let actions = actions_from_args(&args);
        assert_eq!(actions[0], Action::ToggleLevel("Beginner".into()));
        assert_eq!(actions[1], Action::ToggleInstrument("Cello Solo".into()));
        assert_eq!(actions[2], Action::SetMinYear(1800));
        // Page comes last so facet toggles do not reset it
        assert_eq!(actions.last(), Some(&Action::SetPage(2)));
    }

    #[test]
    fn test_saved_requires_user() {
        let result = Cli::try_parse_from(["repcat", "browse", "cello.json", "--saved", "3"]);
        assert!(result.is_err());
    }
}

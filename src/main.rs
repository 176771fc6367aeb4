use clap::Parser;
use dbpager::backend::TableName;
use dbpager::backend::sqlite::SqliteSource;
use dbpager::catalog::TableCatalog;
use dbpager::cli::{Cli, Command, DumpArgs};
use dbpager::config::{self, AppConfig};
use dbpager::error::DbpagerError;
use dbpager::format_detect::{self, OutputFormat};
use dbpager::grid::MemoryGrid;
use dbpager::navigator::{NavOutcome, Navigator};
use dbpager::verbose::{self, Timer};
use dbpager::{format_csv, format_toon, output, tui};
use std::process;

fn main() {
    // Load .env file (optional, ignore if missing)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let result = match cli.command {
        None | Some(Command::Browse) => browse(&cli),
        Some(Command::Tables) => list_tables(&cli),
        Some(Command::Dump(ref args)) => dump(&cli, args),
    };

    if let Err(err) = result {
        output::print_error(&err);
        process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig, DbpagerError> {
    config::load(&cli.session, cli.verbose, cli.config.as_ref())
}

/// Open the database and read its catalog.
fn open_session(app_config: &AppConfig) -> Result<(SqliteSource, TableCatalog), DbpagerError> {
    let verbose = app_config.verbose;

    verbose::emit(
        verbose,
        &format!("opening {}...", app_config.database.display()),
    );
    let mut source = SqliteSource::open(&app_config.database)?;

    let timer = Timer::start("catalog loaded");
    let catalog = TableCatalog::load(&mut source, app_config.display_case)?;
    timer.finish(verbose, format_args!("{} tables", catalog.len()));

    Ok((source, catalog))
}

fn browse(cli: &Cli) -> Result<(), DbpagerError> {
    let app_config = load_config(cli)?;
    let (source, catalog) = open_session(&app_config)?;

    // Nothing below may write to stderr: the terminal is in raw mode.
    let navigator = Navigator::new(source, MemoryGrid::new(), catalog, app_config.batch_size)
        .with_row_counts(app_config.count_rows);
    tui::run(tui::App::new(navigator, app_config.title.clone()))
}

fn list_tables(cli: &Cli) -> Result<(), DbpagerError> {
    let app_config = load_config(cli)?;
    let (_source, catalog) = open_session(&app_config)?;
    let toon = format_toon::catalog_to_toon(&catalog)?;
    output::print_result(&toon);
    Ok(())
}

fn dump(cli: &Cli, args: &DumpArgs) -> Result<(), DbpagerError> {
    let app_config = load_config(cli)?;
    let verbose = app_config.verbose;

    // Detect output format before query (fail-fast on bad extension)
    let format_info = match args.output {
        Some(ref path) => Some(format_detect::detect_format(path)?),
        None => None,
    };

    let (source, catalog) = open_session(&app_config)?;
    let mut navigator = Navigator::new(source, MemoryGrid::new(), catalog, app_config.batch_size)
        .with_row_counts(app_config.count_rows);

    let table = TableName::new(args.table.as_str());
    let timer = Timer::start("dump loaded");
    let mut outcome = navigator.on_table_selected(&table)?;
    if let Some(err) = navigator.take_count_error() {
        output::print_warning(&format!("row count unavailable: {}", err));
    }
    log_batch(verbose, 1, outcome);
    let mut batches = 1;
    while args.all || batches < args.batches {
        if matches!(outcome, NavOutcome::Loaded(o) if o.exhausted) {
            break;
        }
        outcome = navigator.on_load_more_requested()?;
        if outcome == NavOutcome::Exhausted {
            break;
        }
        batches += 1;
        log_batch(verbose, batches, outcome);
    }

    let status = navigator.status();
    let rows_loaded = status.as_ref().map_or(0, |s| s.rows_loaded);
    let exhausted = status.as_ref().is_some_and(|s| !s.has_more());
    timer.finish(
        verbose,
        format_args!("{} rows of {} in {} batches", rows_loaded, table, batches),
    );

    let (_source, grid) = navigator.into_parts();
    match format_info {
        Some((format, path)) => {
            verbose::emit(verbose, &format!("writing output to {}...", path.display()));
            match format {
                OutputFormat::Toon => {
                    let toon = format_toon::grid_to_toon(&grid)?;
                    output::write_file(&toon, &path)?;
                }
                OutputFormat::Csv => format_csv::write_csv(&grid, &path)?,
            }
            let message = status
                .filter(|s| s.has_more())
                .map(|s| format!("{}. Use --all to load every row.", s.summary_counts()));
            output::print_summary(rows_loaded, &path, exhausted, message.as_deref())?;
        }
        None => {
            let toon = format_toon::grid_to_toon(&grid)?;
            output::print_result(&toon);
            if let Some(s) = status.filter(|s| s.has_more()) {
                output::print_warning(&format!(
                    "{}. Use --all to load every row.",
                    s.summary_counts()
                ));
            }
        }
    }

    Ok(())
}

fn log_batch(verbose: bool, batch: usize, outcome: NavOutcome) {
    if let NavOutcome::Loaded(o) = outcome {
        let tail = if o.exhausted { " (end of table)" } else { "" };
        verbose::emit(
            verbose,
            &format!("batch {}: {} rows{}", batch, o.rows_fetched, tail),
        );
    }
}

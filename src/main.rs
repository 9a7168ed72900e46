use clap::Parser;
use media_catalog::{Country, LoadEvent, ProgressEvent, Viewer, open_catalog};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Load a media catalog and print it
#[derive(Debug, Parser)]
#[command(name = "media-catalog", version, about)]
struct Cli {
    /// Author file, one `"name" birth_year` record per line
    authors: PathBuf,

    /// Catalog file with film, series, season and episode records
    catalog: PathBuf,

    /// Restriction file, one `media_type "name" country...` record per line
    #[arg(short, long)]
    restrictions: Option<PathBuf>,

    /// Print the catalog as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Age of a viewer to check availability for
    #[arg(long, requires = "viewer_country")]
    viewer_age: Option<u32>,

    /// Country code (0-8) of the viewer
    #[arg(long, requires = "viewer_age", value_parser = parse_country)]
    viewer_country: Option<Country>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn parse_country(value: &str) -> Result<Country, String> {
    let code: u32 = value
        .parse()
        .map_err(|_| format!("not a country code: {value}"))?;
    Country::try_from(code).map_err(|e| e.to_string())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles progress events and prints formatted output to stdout
fn handle_progress_event(event: ProgressEvent) {
    match event {
        ProgressEvent::LoadingAuthors { path } => {
            println!("Loading authors from {}...", path.display());
        }
        ProgressEvent::AuthorsLoaded { count } => {
            println!("Found {} author(s)", count);
        }
        ProgressEvent::LoadingCatalog { path } => {
            println!("\nLoading catalog from {}...", path.display());
        }
        ProgressEvent::LoadingRestrictions { path } => {
            println!("\nLoading restrictions from {}...", path.display());
        }
        ProgressEvent::Record(LoadEvent::UnresolvedSeries { line, series }) => {
            println!("  line {}: no series named '{}', record skipped", line, series);
        }
        ProgressEvent::Record(LoadEvent::UnresolvedSeason {
            line,
            series,
            season,
        }) => {
            println!(
                "  line {}: '{}' has no season {}, record skipped",
                line, series, season
            );
        }
        ProgressEvent::Record(_) => {}
        ProgressEvent::CatalogLoaded(summary) => {
            println!(
                "Loaded {} film(s), {} series, {} season(s), {} episode(s)",
                summary.films, summary.series, summary.seasons, summary.episodes
            );
        }
        ProgressEvent::RestrictionsLoaded(summary) => {
            println!(
                "Applied {} restriction record(s), {} country restriction(s)",
                summary.records, summary.countries
            );
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let progress = |event: ProgressEvent| {
        if !cli.json {
            handle_progress_event(event);
        }
    };

    let opened = match open_catalog(
        &cli.authors,
        &cli.catalog,
        cli.restrictions.as_deref(),
        progress,
    ) {
        Ok(opened) => opened,
        Err(e) => {
            eprintln!("\nError while loading the catalog: {}", e);
            process::exit(1);
        }
    };
    let catalog = &opened.catalog;

    if cli.json {
        match serde_json::to_string_pretty(&catalog.snapshot()) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize catalog: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    println!("\n=== Catalog ===\n");
    if catalog.is_empty() {
        println!("The catalog is empty.");
    } else {
        print!("{}", catalog);
    }

    println!("\n=== Summary ===\n");
    println!(
        "{} film(s), {} series",
        catalog.film_count(),
        catalog.series_count()
    );
    for series in catalog.iter().filter_map(|media| media.as_series()) {
        let name = series.info().name();
        println!("  {}: {} season(s)", name, catalog.season_count(name));
        for season in series.seasons() {
            println!(
                "    Season {:02}: {} episode(s)",
                season.number(),
                catalog.episode_count(name, season.number())
            );
        }
    }

    println!("\n=== Authors ===\n");
    for author in opened.authors.iter() {
        println!("{}", author);
    }

    if let (Some(age), Some(country)) = (cli.viewer_age, cli.viewer_country) {
        let viewer = Viewer::new("viewer", age, false, country);
        println!("\n=== Available to a {}-year-old viewer in {} ===\n", age, country);
        for media in catalog.iter().filter(|media| viewer.can_view(media.info())) {
            println!("  [{}] {}", media.kind(), media.name());
        }
    }
}

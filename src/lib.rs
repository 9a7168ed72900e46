//! Media catalog - load, inspect and edit a catalog of films and series
//!
//! This library provides the catalog model (films, series with their seasons
//! and episodes, each attributed to an author) together with loaders for the
//! line-oriented record formats the catalog, its restrictions and its authors
//! are stored in.

mod authors;
mod catalog;
mod media;
mod record;
mod viewer;

pub use authors::{Author, AuthorRegistry, AuthorRegistryError, MAX_AUTHORS};
pub use catalog::{
    Catalog, CatalogError, CatalogSnapshot, EpisodeSnapshot, LoadEvent, LoadSummary,
    MediaSnapshot, RecordKind, RestrictionSummary, SeasonSnapshot,
};
pub use media::{
    Country, Episode, Film, Genre, Media, MediaInfo, MediaKind, Season, SeasonStatus, Series,
};
pub use record::RecordError;
pub use viewer::{FREE_VIEWING_QUOTA, MINIMUM_AGE_FOR_RESTRICTED, Viewer};

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Progress event emitted while opening a catalog
///
/// These events allow library users to track progress and provide feedback
/// while the sources are read.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// Reading the author registry
    LoadingAuthors { path: PathBuf },

    /// Authors successfully loaded
    AuthorsLoaded { count: usize },

    /// Reading the catalog records
    LoadingCatalog { path: PathBuf },

    /// Reading the restriction records
    LoadingRestrictions { path: PathBuf },

    /// A single record was processed
    Record(LoadEvent),

    /// Catalog records successfully loaded
    CatalogLoaded(LoadSummary),

    /// Restriction records successfully loaded
    RestrictionsLoaded(RestrictionSummary),
}

/// Top-level error type for catalog operations
#[derive(Debug, Error)]
pub enum MediaCatalogError {
    /// Error while building the author registry
    #[error("Author registry error: {0}")]
    Authors(#[from] AuthorRegistryError),

    /// Error while loading catalog or restriction records
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// The author registry together with the catalog referencing it
#[derive(Debug)]
pub struct OpenedCatalog {
    pub authors: AuthorRegistry,
    pub catalog: Catalog,
}

/// Loads authors, catalog records and, optionally, restrictions
///
/// Progress events are emitted through the provided callback, allowing
/// library users to display status or remain silent.
///
/// # Arguments
///
/// * `authors_path` - File with one `"name" birth_year` record per line
/// * `catalog_path` - File with film, series, season and episode records
/// * `restrictions_path` - Optional file with restricted-country records
/// * `progress_callback` - Closure called with progress events
///
/// # Examples
///
/// ```no_run
/// use media_catalog::{open_catalog, ProgressEvent};
/// use std::path::Path;
///
/// let opened = open_catalog(
///     Path::new("data/authors.txt"),
///     Path::new("data/catalog.txt"),
///     Some(Path::new("data/restrictions.txt")),
///     |event| {
///         if let ProgressEvent::CatalogLoaded(summary) = event {
///             println!("{} films, {} series", summary.films, summary.series);
///         }
///     },
/// )
/// .unwrap();
///
/// print!("{}", opened.catalog);
/// ```
pub fn open_catalog<F>(
    authors_path: &Path,
    catalog_path: &Path,
    restrictions_path: Option<&Path>,
    mut progress_callback: F,
) -> Result<OpenedCatalog, MediaCatalogError>
where
    F: FnMut(ProgressEvent),
{
    progress_callback(ProgressEvent::LoadingAuthors {
        path: authors_path.to_path_buf(),
    });
    let mut authors = AuthorRegistry::new();
    let count = authors.load_from_file(authors_path)?;
    progress_callback(ProgressEvent::AuthorsLoaded { count });

    progress_callback(ProgressEvent::LoadingCatalog {
        path: catalog_path.to_path_buf(),
    });
    let mut catalog = Catalog::new();
    let summary = catalog.load_catalog_with_progress(catalog_path, &authors, |event| {
        progress_callback(ProgressEvent::Record(event))
    })?;
    progress_callback(ProgressEvent::CatalogLoaded(summary));

    if let Some(path) = restrictions_path {
        progress_callback(ProgressEvent::LoadingRestrictions {
            path: path.to_path_buf(),
        });
        let summary = catalog.load_restrictions_with_progress(path, |event| {
            progress_callback(ProgressEvent::Record(event))
        })?;
        progress_callback(ProgressEvent::RestrictionsLoaded(summary));
    }

    Ok(OpenedCatalog { authors, catalog })
}

//! The media catalog
//!
//! The catalog exclusively owns a heterogeneous list of films and series.
//! Lookups are linear scans by name; when several media share a name the
//! first one in catalog order wins. Loading from the record formats lives in
//! the `loader` submodule, writing them back in `writer`.
mod loader;
mod snapshot;
mod writer;

pub use loader::{LoadEvent, LoadSummary, RecordKind, RestrictionSummary};
pub use snapshot::{CatalogSnapshot, EpisodeSnapshot, MediaSnapshot, SeasonSnapshot};

use crate::media::{Episode, Film, Media, MediaKind, Season, Series};
use crate::record::RecordError;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort loading a catalog or restriction source
///
/// Records applied before the failing line stay applied.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The source file could not be opened
    #[error("Failed to open {path}: {source}")]
    SourceUnavailable { path: PathBuf, source: io::Error },

    /// Reading from the source failed part way through
    #[error("Failed to read line {line}: {source}")]
    ReadFailed { line: usize, source: io::Error },

    /// A film or series record names an author missing from the registry
    #[error("Line {line}: unknown author \"{name}\"")]
    UnknownAuthor { line: usize, name: String },

    /// A line does not match any record layout
    #[error("Line {line}: malformed record: {source}")]
    MalformedRecord { line: usize, source: RecordError },

    /// A restriction record names a media that is absent or of another kind
    #[error("Line {line}: no {kind} named \"{name}\" in the catalog")]
    UnknownMedia {
        line: usize,
        kind: MediaKind,
        name: String,
    },
}

/// An owned collection of films and series
///
/// Cloning a catalog deep-copies every media; the copy shares authors with
/// the original but nothing else.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    media: Vec<Media>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.media.len()
    }

    pub fn is_empty(&self) -> bool {
        self.media.is_empty()
    }

    /// Iterates over the media in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Media> + Clone {
        self.media.iter()
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.media.iter().position(|media| media.name() == name)
    }

    /// Finds the first media with the given name, whatever its kind
    pub fn find(&self, name: &str) -> Option<&Media> {
        self.index_of(name).map(|index| &self.media[index])
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Media> {
        let index = self.index_of(name)?;
        Some(&mut self.media[index])
    }

    /// Finds the media with the given name, provided it is of `kind`
    ///
    /// Only the first media carrying the name is considered, so a film
    /// shadows a later series of the same name.
    pub fn find_kind(&self, name: &str, kind: MediaKind) -> Option<&Media> {
        self.find(name).filter(|media| media.kind() == kind)
    }

    pub fn find_kind_mut(&mut self, name: &str, kind: MediaKind) -> Option<&mut Media> {
        self.find_mut(name).filter(|media| media.kind() == kind)
    }

    pub fn find_film(&self, name: &str) -> Option<&Film> {
        self.find(name).and_then(Media::as_film)
    }

    pub fn find_film_mut(&mut self, name: &str) -> Option<&mut Film> {
        self.find_mut(name).and_then(Media::as_film_mut)
    }

    pub fn find_series(&self, name: &str) -> Option<&Series> {
        self.find(name).and_then(Media::as_series)
    }

    pub fn find_series_mut(&mut self, name: &str) -> Option<&mut Series> {
        self.find_mut(name).and_then(Media::as_series_mut)
    }

    /// Takes ownership of a media; duplicate names are allowed
    ///
    /// Films stay grouped before series, in insertion order within a kind.
    pub fn insert(&mut self, media: impl Into<Media>) {
        self.media.push(media.into());
        self.sort_by_kind();
    }

    /// Removes the first media with the given name
    ///
    /// The last media takes the removed one's place before films are grouped
    /// ahead of series again, so order within a kind is not preserved.
    /// Removing an unknown name is a no-op.
    pub fn remove(&mut self, name: &str) -> Option<Media> {
        let index = self.index_of(name)?;
        let removed = self.media.swap_remove(index);
        self.sort_by_kind();
        Some(removed)
    }

    /// Drops every media
    pub fn clear(&mut self) {
        self.media.clear();
    }

    /// Groups films before series, keeping the relative order within a kind
    fn sort_by_kind(&mut self) {
        self.media.sort_by_key(Media::kind);
    }

    /// Adds or replaces a season of the named series
    ///
    /// Returns false when no series carries that name.
    pub fn add_season_to(&mut self, series_name: &str, season: Season) -> bool {
        match self.find_series_mut(series_name) {
            Some(series) => {
                series.add_or_replace_season(season);
                true
            }
            None => false,
        }
    }

    pub fn remove_season_from(&mut self, series_name: &str, season_number: u32) -> Option<Season> {
        self.find_series_mut(series_name)?
            .remove_season(season_number)
    }

    /// Adds or replaces an episode in a season of the named series
    ///
    /// Returns false when the series or the season does not exist.
    pub fn add_episode_to(
        &mut self,
        series_name: &str,
        season_number: u32,
        episode: Episode,
    ) -> bool {
        self.find_series_mut(series_name)
            .is_some_and(|series| series.add_episode_to_season(season_number, episode))
    }

    pub fn remove_episode_from(
        &mut self,
        series_name: &str,
        season_number: u32,
        episode_number: u32,
    ) -> Option<Episode> {
        self.find_series_mut(series_name)?
            .remove_episode_from_season(season_number, episode_number)
    }

    pub fn film_count(&self) -> usize {
        self.count_kind(MediaKind::Film)
    }

    pub fn series_count(&self) -> usize {
        self.count_kind(MediaKind::Series)
    }

    fn count_kind(&self, kind: MediaKind) -> usize {
        self.media.iter().filter(|media| media.kind() == kind).count()
    }

    /// Number of seasons in the named series, 0 if there is no such series
    pub fn season_count(&self, series_name: &str) -> usize {
        self.find_series(series_name)
            .map_or(0, Series::season_count)
    }

    /// Number of episodes in a season, 0 if the series or season is missing
    pub fn episode_count(&self, series_name: &str, season_number: u32) -> usize {
        self.find_series(series_name)
            .and_then(|series| series.find_season(season_number))
            .map_or(0, Season::episode_count)
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for media in &self.media {
            write!(f, "{media}")?;
        }
        Ok(())
    }
}

//! Catalog entries: films and series
//!
//! This module provides the media model. Attributes shared by every kind of
//! media live in [`MediaInfo`]; the concrete kinds ([`Film`] and [`Series`])
//! embed it and add their own data. [`Media`] is the closed set of kinds the
//! catalog stores, and every kind can be rendered (`Display`), parsed from a
//! record and cloned.
mod classification;
mod episode;
mod film;
mod season;
mod series;

pub use classification::{Country, Genre};
pub use episode::Episode;
pub use film::Film;
pub use season::{Season, SeasonStatus};
pub use series::Series;

use crate::authors::Author;
use crate::record::{RecordError, RecordReader};
use serde::Serialize;
use std::fmt;
use std::rc::Rc;

/// Discriminates the concrete kind of a [`Media`]
///
/// Films sort before series, which is the order the catalog displays them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Film,
    Series,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Film => f.write_str("film"),
            MediaKind::Series => f.write_str("series"),
        }
    }
}

impl TryFrom<u32> for MediaKind {
    type Error = RecordError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(MediaKind::Film),
            1 => Ok(MediaKind::Series),
            code => Err(RecordError::UnknownCode {
                what: "media type",
                code,
            }),
        }
    }
}

impl MediaKind {
    pub fn code(self) -> u32 {
        match self {
            MediaKind::Film => 0,
            MediaKind::Series => 1,
        }
    }
}

/// Attributes common to every media
///
/// A `MediaInfo` holds a shared handle to its author and keeps the author's
/// media count in step with its own lifetime: creating or cloning one
/// increments the count, dropping one decrements it.
#[derive(Debug)]
pub struct MediaInfo {
    name: String,
    release_year: u32,
    genre: Genre,
    country: Country,
    age_restricted: bool,
    restricted_countries: Vec<Country>,
    author: Rc<Author>,
}

impl MediaInfo {
    pub fn new(
        name: impl Into<String>,
        release_year: u32,
        genre: Genre,
        country: Country,
        age_restricted: bool,
        author: Rc<Author>,
    ) -> Self {
        author.increment_media_count();
        Self {
            name: name.into(),
            release_year,
            genre,
            country,
            age_restricted,
            restricted_countries: Vec::new(),
            author,
        }
    }

    /// Reads `"name" year genre country age_flag`
    pub(crate) fn parse(
        fields: &mut RecordReader<'_>,
        author: Rc<Author>,
    ) -> Result<Self, RecordError> {
        let name = fields.next_quoted("name")?;
        let release_year = fields.next_number("release year")?;
        let genre = fields.next_code("genre")?;
        let country = fields.next_code("country")?;
        let age_restricted = fields.next_flag("age restriction")?;
        Ok(Self::new(
            name,
            release_year,
            genre,
            country,
            age_restricted,
            author,
        ))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn release_year(&self) -> u32 {
        self.release_year
    }

    pub fn genre(&self) -> Genre {
        self.genre
    }

    pub fn country(&self) -> Country {
        self.country
    }

    pub fn is_age_restricted(&self) -> bool {
        self.age_restricted
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    /// Countries in which this media is unavailable, in insertion order
    pub fn restricted_countries(&self) -> &[Country] {
        &self.restricted_countries
    }

    /// Appends a restricted country; duplicates are kept
    pub fn add_restricted_country(&mut self, country: Country) {
        self.restricted_countries.push(country);
    }

    pub fn clear_restricted_countries(&mut self) {
        self.restricted_countries.clear();
    }

    pub fn is_restricted_in(&self, country: Country) -> bool {
        self.restricted_countries.contains(&country)
    }
}

impl Clone for MediaInfo {
    fn clone(&self) -> Self {
        self.author.increment_media_count();
        Self {
            name: self.name.clone(),
            release_year: self.release_year,
            genre: self.genre,
            country: self.country,
            age_restricted: self.age_restricted,
            restricted_countries: self.restricted_countries.clone(),
            author: Rc::clone(&self.author),
        }
    }
}

impl Drop for MediaInfo {
    fn drop(&mut self) {
        self.author.decrement_media_count();
    }
}

impl fmt::Display for MediaInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "\tRelease year: {}", self.release_year)?;
        writeln!(f, "\tGenre: {}", self.genre)?;
        writeln!(f, "\tAuthor: {}", self.author.name())?;
        writeln!(f, "\tCountry: {}", self.country)?;
        if self.restricted_countries.is_empty() {
            writeln!(f, "\tNo restricted countries.")?;
        } else {
            writeln!(f, "\tRestricted countries:")?;
            for country in &self.restricted_countries {
                writeln!(f, "\t\t{country}")?;
            }
        }
        Ok(())
    }
}

/// A catalog entry of any kind
#[derive(Debug, Clone)]
pub enum Media {
    Film(Film),
    Series(Series),
}

impl Media {
    /// Parses the kind-specific fields of a record into a new media
    pub(crate) fn parse(
        kind: MediaKind,
        fields: &mut RecordReader<'_>,
        author: Rc<Author>,
    ) -> Result<Self, RecordError> {
        match kind {
            MediaKind::Film => Film::parse(fields, author).map(Media::Film),
            MediaKind::Series => Series::parse(fields, author).map(Media::Series),
        }
    }

    pub fn kind(&self) -> MediaKind {
        match self {
            Media::Film(_) => MediaKind::Film,
            Media::Series(_) => MediaKind::Series,
        }
    }

    pub fn info(&self) -> &MediaInfo {
        match self {
            Media::Film(film) => film.info(),
            Media::Series(series) => series.info(),
        }
    }

    pub fn info_mut(&mut self) -> &mut MediaInfo {
        match self {
            Media::Film(film) => film.info_mut(),
            Media::Series(series) => series.info_mut(),
        }
    }

    pub fn name(&self) -> &str {
        self.info().name()
    }

    pub fn as_film(&self) -> Option<&Film> {
        match self {
            Media::Film(film) => Some(film),
            Media::Series(_) => None,
        }
    }

    pub fn as_film_mut(&mut self) -> Option<&mut Film> {
        match self {
            Media::Film(film) => Some(film),
            Media::Series(_) => None,
        }
    }

    pub fn as_series(&self) -> Option<&Series> {
        match self {
            Media::Series(series) => Some(series),
            Media::Film(_) => None,
        }
    }

    pub fn as_series_mut(&mut self) -> Option<&mut Series> {
        match self {
            Media::Series(series) => Some(series),
            Media::Film(_) => None,
        }
    }
}

impl From<Film> for Media {
    fn from(film: Film) -> Self {
        Media::Film(film)
    }
}

impl From<Series> for Media {
    fn from(series: Series) -> Self {
        Media::Series(series)
    }
}

impl fmt::Display for Media {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Media::Film(film) => fmt::Display::fmt(film, f),
            Media::Series(series) => fmt::Display::fmt(series, f),
        }
    }
}

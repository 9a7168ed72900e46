//! Serializable view of a catalog
//!
//! The snapshot copies everything the text rendering shows into plain data
//! structures, so the catalog can be exported as JSON.

use super::Catalog;
use crate::media::{Country, Episode, Genre, Media, MediaKind, Season, SeasonStatus};
use serde::Serialize;

/// A detached, serializable copy of a catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogSnapshot {
    pub media: Vec<MediaSnapshot>,
}

/// A single film or series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaSnapshot {
    pub kind: MediaKind,
    pub name: String,
    pub release_year: u32,
    pub genre: Genre,
    pub country: Country,
    pub author: String,
    pub age_restricted: bool,
    pub restricted_countries: Vec<Country>,
    /// Only present for films
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Only present for series
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub seasons: Vec<SeasonSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonSnapshot {
    pub number: u32,
    pub max_episodes: u32,
    pub status: SeasonStatus,
    pub episodes: Vec<EpisodeSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeSnapshot {
    pub number: u32,
    pub title: String,
    pub duration: String,
}

impl From<&Episode> for EpisodeSnapshot {
    fn from(episode: &Episode) -> Self {
        Self {
            number: episode.number(),
            title: episode.title().to_string(),
            duration: episode.duration().to_string(),
        }
    }
}

impl From<&Season> for SeasonSnapshot {
    fn from(season: &Season) -> Self {
        Self {
            number: season.number(),
            max_episodes: season.max_episodes(),
            status: season.status(),
            episodes: season.episodes().iter().map(EpisodeSnapshot::from).collect(),
        }
    }
}

impl From<&Media> for MediaSnapshot {
    fn from(media: &Media) -> Self {
        let info = media.info();
        Self {
            kind: media.kind(),
            name: info.name().to_string(),
            release_year: info.release_year(),
            genre: info.genre(),
            country: info.country(),
            author: info.author().name().to_string(),
            age_restricted: info.is_age_restricted(),
            restricted_countries: info.restricted_countries().to_vec(),
            duration: media.as_film().map(|film| film.duration().to_string()),
            seasons: media
                .as_series()
                .map(|series| series.seasons().iter().map(SeasonSnapshot::from).collect())
                .unwrap_or_default(),
        }
    }
}

impl Catalog {
    /// Copies the catalog into a serializable snapshot, in catalog order
    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            media: self.iter().map(MediaSnapshot::from).collect(),
        }
    }
}

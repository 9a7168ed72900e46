//! Viewer access rules
//!
//! Decides whether a viewer may watch a given media, based on age, country
//! and the free viewing quota.

use crate::media::{Country, MediaInfo};

/// Minimum age for age-restricted media
pub const MINIMUM_AGE_FOR_RESTRICTED: u32 = 16;

/// Number of media a viewer without premium may watch
pub const FREE_VIEWING_QUOTA: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    name: String,
    age: u32,
    premium: bool,
    country: Country,
    watched: u32,
}

impl Viewer {
    pub fn new(name: impl Into<String>, age: u32, premium: bool, country: Country) -> Self {
        Self {
            name: name.into(),
            age,
            premium,
            country,
            watched: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn country(&self) -> Country {
        self.country
    }

    pub fn watched(&self) -> u32 {
        self.watched
    }

    /// Whether the media is available to this viewer, ignoring the quota
    pub fn can_view(&self, media: &MediaInfo) -> bool {
        let old_enough = self.age >= MINIMUM_AGE_FOR_RESTRICTED || !media.is_age_restricted();
        old_enough && !media.is_restricted_in(self.country)
    }

    pub fn quota_reached(&self) -> bool {
        !self.premium && self.watched >= FREE_VIEWING_QUOTA
    }

    /// Records a viewing if the media is available and the quota allows it
    pub fn watch(&mut self, media: &MediaInfo) -> bool {
        if self.quota_reached() || !self.can_view(media) {
            return false;
        }
        self.watched += 1;
        true
    }
}

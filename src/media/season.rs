use super::Episode;
use crate::record::{RecordError, RecordReader};
use serde::Serialize;
use std::fmt;

/// Whether a season has aired all of its planned episodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonStatus {
    InProgress,
    Complete,
}

impl fmt::Display for SeasonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeasonStatus::InProgress => f.write_str("in progress"),
            SeasonStatus::Complete => f.write_str("complete"),
        }
    }
}

/// A season of a series, owning its episodes
///
/// Episodes are kept sorted ascending by number, with at most one episode
/// per number.
#[derive(Debug, Clone)]
pub struct Season {
    number: u32,
    max_episodes: u32,
    episodes: Vec<Episode>,
}

impl Season {
    pub fn new(number: u32, max_episodes: u32) -> Self {
        Self {
            number,
            max_episodes,
            episodes: Vec::new(),
        }
    }

    /// Reads `number max_episodes`
    pub(crate) fn parse(fields: &mut RecordReader<'_>) -> Result<Self, RecordError> {
        let number = fields.next_number("season number")?;
        let max_episodes = fields.next_number("maximum episodes")?;
        Ok(Self::new(number, max_episodes))
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    /// Returns true if this season carries the given number
    pub fn has_number(&self, number: u32) -> bool {
        self.number == number
    }

    pub fn max_episodes(&self) -> u32 {
        self.max_episodes
    }

    pub fn episode_count(&self) -> usize {
        self.episodes.len()
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn status(&self) -> SeasonStatus {
        if self.episodes.len() < self.max_episodes as usize {
            SeasonStatus::InProgress
        } else {
            SeasonStatus::Complete
        }
    }

    pub fn find_episode(&self, number: u32) -> Option<&Episode> {
        self.episodes.iter().find(|episode| episode.number() == number)
    }

    fn episode_index(&self, number: u32) -> Option<usize> {
        self.episodes
            .iter()
            .position(|episode| episode.number() == number)
    }

    /// Adds an episode, replacing any existing episode with the same number
    ///
    /// A replacement takes the old episode's slot; the resort afterwards
    /// leaves the same order a remove-then-push would.
    pub fn add_or_replace_episode(&mut self, episode: Episode) {
        match self.episode_index(episode.number()) {
            Some(index) => self.episodes[index] = episode,
            None => self.episodes.push(episode),
        }
        self.episodes.sort();
    }

    /// Removes the episode with the given number, if present
    pub fn remove_episode(&mut self, number: u32) -> Option<Episode> {
        let index = self.episode_index(number)?;
        let removed = self.episodes.swap_remove(index);
        self.episodes.sort();
        Some(removed)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:8}Season {:02}: {}/{} ({})",
            "",
            self.number,
            self.episodes.len(),
            self.max_episodes,
            self.status()
        )?;
        for episode in &self.episodes {
            write!(f, "{episode}")?;
        }
        Ok(())
    }
}

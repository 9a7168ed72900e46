use super::{Episode, MediaInfo, Season};
use crate::authors::Author;
use crate::record::{RecordError, RecordReader};
use std::fmt;
use std::rc::Rc;

/// A series, owning its seasons
///
/// Seasons are kept sorted ascending by number, with at most one season per
/// number. A series record carries only the common media fields; seasons and
/// episodes arrive as separate records.
#[derive(Debug, Clone)]
pub struct Series {
    info: MediaInfo,
    seasons: Vec<Season>,
}

impl Series {
    pub fn new(info: MediaInfo) -> Self {
        Self {
            info,
            seasons: Vec::new(),
        }
    }

    pub(crate) fn parse(
        fields: &mut RecordReader<'_>,
        author: Rc<Author>,
    ) -> Result<Self, RecordError> {
        MediaInfo::parse(fields, author).map(Self::new)
    }

    pub fn info(&self) -> &MediaInfo {
        &self.info
    }

    pub fn info_mut(&mut self) -> &mut MediaInfo {
        &mut self.info
    }

    pub fn seasons(&self) -> &[Season] {
        &self.seasons
    }

    pub fn season_count(&self) -> usize {
        self.seasons.len()
    }

    fn season_index(&self, number: u32) -> Option<usize> {
        self.seasons.iter().position(|season| season.has_number(number))
    }

    pub fn find_season(&self, number: u32) -> Option<&Season> {
        self.seasons.iter().find(|season| season.has_number(number))
    }

    pub fn find_season_mut(&mut self, number: u32) -> Option<&mut Season> {
        self.seasons
            .iter_mut()
            .find(|season| season.has_number(number))
    }

    /// Adds a season, replacing (not merging) any season with the same number
    ///
    /// A replacement takes the old season's slot; the resort afterwards
    /// leaves the same order a remove-then-push would.
    pub fn add_or_replace_season(&mut self, season: Season) {
        match self.season_index(season.number()) {
            Some(index) => self.seasons[index] = season,
            None => self.seasons.push(season),
        }
        self.seasons.sort_by_key(Season::number);
    }

    /// Removes the season with the given number, if present
    pub fn remove_season(&mut self, number: u32) -> Option<Season> {
        let index = self.season_index(number)?;
        let removed = self.seasons.swap_remove(index);
        self.seasons.sort_by_key(Season::number);
        Some(removed)
    }

    /// Adds an episode to a season
    ///
    /// Returns false, leaving the series untouched, when the season does not
    /// exist.
    pub fn add_episode_to_season(&mut self, season_number: u32, episode: Episode) -> bool {
        match self.find_season_mut(season_number) {
            Some(season) => {
                season.add_or_replace_episode(episode);
                true
            }
            None => false,
        }
    }

    /// Removes an episode from a season; missing season or episode is a no-op
    pub fn remove_episode_from_season(
        &mut self,
        season_number: u32,
        episode_number: u32,
    ) -> Option<Episode> {
        self.find_season_mut(season_number)?
            .remove_episode(episode_number)
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.info)?;
        for season in &self.seasons {
            write!(f, "{season}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{Country, Genre};

    fn series() -> Series {
        let author = Rc::new(Author::new("Jane", 1970));
        Series::new(MediaInfo::new(
            "Beta",
            2010,
            Genre::Adventure,
            Country::Japan,
            true,
            author,
        ))
    }

    fn season_numbers(series: &Series) -> Vec<u32> {
        series.seasons().iter().map(Season::number).collect()
    }

    #[test]
    fn test_seasons_stay_sorted_and_unique() {
        let mut series = series();
        for number in [3, 1, 2, 3, 1] {
            series.add_or_replace_season(Season::new(number, 10));
        }
        assert_eq!(season_numbers(&series), vec![1, 2, 3]);
    }

    #[test]
    fn test_replacing_season_drops_its_episodes() {
        let mut series = series();
        series.add_or_replace_season(Season::new(1, 10));
        assert!(series.add_episode_to_season(1, Episode::new(1, "Pilot", "45min")));
        assert_eq!(series.find_season(1).unwrap().episode_count(), 1);

        series.add_or_replace_season(Season::new(1, 12));
        let season = series.find_season(1).unwrap();
        assert_eq!(season.episode_count(), 0);
        assert_eq!(season.max_episodes(), 12);
    }

    #[test]
    fn test_episode_into_missing_season() {
        let mut series = series();
        assert!(!series.add_episode_to_season(4, Episode::new(1, "x", "1min")));
        assert_eq!(series.season_count(), 0);
    }

    #[test]
    fn test_remove_season_and_episode() {
        let mut series = series();
        for number in 1..=4 {
            series.add_or_replace_season(Season::new(number, 2));
        }
        series.add_episode_to_season(2, Episode::new(1, "a", "1min"));
        series.add_episode_to_season(2, Episode::new(2, "b", "1min"));

        assert_eq!(series.remove_episode_from_season(2, 1).unwrap().title(), "a");
        assert!(series.remove_episode_from_season(2, 9).is_none());
        assert!(series.remove_episode_from_season(9, 1).is_none());
        assert_eq!(series.find_season(2).unwrap().episode_count(), 1);

        assert!(series.remove_season(1).is_some());
        assert!(series.remove_season(1).is_none());
        assert_eq!(season_numbers(&series), vec![2, 3, 4]);
    }

    #[test]
    fn test_render_includes_seasons() {
        let mut series = series();
        series.add_or_replace_season(Season::new(2, 1));
        series.add_episode_to_season(2, Episode::new(1, "Only", "20min"));

        let rendered = series.to_string();
        assert!(rendered.starts_with("Beta\n\tRelease year: 2010\n"));
        assert!(rendered.ends_with(
            "\tNo restricted countries.\n        Season 02: 1/1 (complete)\n                Episode 01: Only | Duration: 20min\n"
        ));
    }
}

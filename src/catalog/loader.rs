//! Record loaders for catalogs and restrictions
//!
//! A catalog source holds one record per line. The leading integer selects
//! the layout:
//!
//! | tag | kind    | fields                                                        |
//! |-----|---------|---------------------------------------------------------------|
//! | 0   | film    | `"author" "name" year genre country age_flag "duration"`      |
//! | 1   | series  | `"author" "name" year genre country age_flag`                 |
//! | 2   | season  | `number max_episodes "series"`                                |
//! | 3   | episode | `number "title" "duration" "series" season_number`            |
//!
//! A restriction source holds `media_type "name" country*` per line, where
//! `media_type` is 0 for films and 1 for series.
//!
//! Season and episode records pointing at a series or season that does not
//! exist are accepted and ignored. They are reported through
//! [`LoadEvent::UnresolvedSeries`] and [`LoadEvent::UnresolvedSeason`].

use super::{Catalog, CatalogError};
use crate::authors::AuthorRegistry;
use crate::media::{Country, Episode, Media, MediaKind, Season};
use crate::record::{RecordError, RecordReader};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// The layout selected by a catalog record's leading tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Film,
    Series,
    Season,
    Episode,
}

impl RecordKind {
    pub fn code(self) -> u32 {
        match self {
            RecordKind::Film => 0,
            RecordKind::Series => 1,
            RecordKind::Season => 2,
            RecordKind::Episode => 3,
        }
    }
}

impl TryFrom<u32> for RecordKind {
    type Error = RecordError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(RecordKind::Film),
            1 => Ok(RecordKind::Series),
            2 => Ok(RecordKind::Season),
            3 => Ok(RecordKind::Episode),
            code => Err(RecordError::UnknownCode {
                what: "record type",
                code,
            }),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Film => f.write_str("film"),
            RecordKind::Series => f.write_str("series"),
            RecordKind::Season => f.write_str("season"),
            RecordKind::Episode => f.write_str("episode"),
        }
    }
}

/// Progress event emitted while loading
#[derive(Debug, Clone, PartialEq)]
pub enum LoadEvent {
    /// A catalog record was applied
    RecordApplied {
        line: usize,
        kind: RecordKind,
        name: String,
    },

    /// A season or episode record named a series that is not in the catalog
    UnresolvedSeries { line: usize, series: String },

    /// An episode record named a season its series does not have
    UnresolvedSeason {
        line: usize,
        series: String,
        season: u32,
    },

    /// A restriction record was applied
    RestrictionApplied {
        line: usize,
        kind: MediaKind,
        name: String,
        countries: usize,
    },
}

/// Counts of what a catalog load applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub films: usize,
    pub series: usize,
    pub seasons: usize,
    pub episodes: usize,
    /// Season and episode records ignored because their target is missing
    pub unresolved: usize,
}

/// Counts of what a restriction load applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestrictionSummary {
    pub records: usize,
    pub countries: usize,
}

fn open(path: &Path) -> Result<BufReader<File>, CatalogError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| CatalogError::SourceUnavailable {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Calls `apply` for every non-blank line, tagging errors with line numbers
fn for_each_record<R, A>(reader: R, mut apply: A) -> Result<(), CatalogError>
where
    R: BufRead,
    A: FnMut(usize, &str) -> Result<(), CatalogError>,
{
    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|e| CatalogError::ReadFailed {
            line: line_number,
            source: e,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        apply(line_number, &line)?;
    }
    Ok(())
}

impl Catalog {
    /// Replaces the catalog contents with the records of a file
    ///
    /// Film and series records must name an author present in `authors`.
    /// On failure the records before the failing line remain loaded.
    pub fn load_catalog(
        &mut self,
        path: &Path,
        authors: &AuthorRegistry,
    ) -> Result<LoadSummary, CatalogError> {
        self.load_catalog_with_progress(path, authors, |_| {})
    }

    /// Like [`load_catalog`](Self::load_catalog), reporting each record
    pub fn load_catalog_with_progress<F>(
        &mut self,
        path: &Path,
        authors: &AuthorRegistry,
        progress: F,
    ) -> Result<LoadSummary, CatalogError>
    where
        F: FnMut(LoadEvent),
    {
        let reader = open(path)?;
        debug!(path = %path.display(), "Loading catalog");
        self.read_catalog(reader, authors, progress)
    }

    /// Replaces the catalog contents with the records read from `reader`
    pub fn read_catalog<R, F>(
        &mut self,
        reader: R,
        authors: &AuthorRegistry,
        mut progress: F,
    ) -> Result<LoadSummary, CatalogError>
    where
        R: BufRead,
        F: FnMut(LoadEvent),
    {
        self.clear();
        let mut summary = LoadSummary::default();

        for_each_record(reader, |line, text| {
            self.apply_catalog_record(line, text, authors, &mut summary, &mut progress)
        })?;

        info!(
            films = summary.films,
            series = summary.series,
            seasons = summary.seasons,
            episodes = summary.episodes,
            unresolved = summary.unresolved,
            "Catalog loaded"
        );
        Ok(summary)
    }

    fn apply_catalog_record<F>(
        &mut self,
        line: usize,
        text: &str,
        authors: &AuthorRegistry,
        summary: &mut LoadSummary,
        progress: &mut F,
    ) -> Result<(), CatalogError>
    where
        F: FnMut(LoadEvent),
    {
        let malformed = move |source| CatalogError::MalformedRecord { line, source };
        let mut fields = RecordReader::new(text);
        let kind: RecordKind = fields.next_code("record type").map_err(malformed)?;

        match kind {
            RecordKind::Film | RecordKind::Series => {
                let media_kind = if kind == RecordKind::Film {
                    MediaKind::Film
                } else {
                    MediaKind::Series
                };
                let author_name = fields.next_quoted("author").map_err(malformed)?;
                let author = authors
                    .find_by_name(&author_name)
                    .ok_or_else(|| CatalogError::UnknownAuthor {
                        line,
                        name: author_name.clone(),
                    })?;

                let media = Media::parse(media_kind, &mut fields, Rc::clone(author))
                    .map_err(malformed)?;
                let name = media.name().to_string();
                match media_kind {
                    MediaKind::Film => summary.films += 1,
                    MediaKind::Series => summary.series += 1,
                }
                self.insert(media);

                debug!(line, %kind, name = %name, author = %author_name, "Applied record");
                progress(LoadEvent::RecordApplied { line, kind, name });
            }
            RecordKind::Season => {
                let season = Season::parse(&mut fields).map_err(malformed)?;
                let series_name = fields.next_quoted("series").map_err(malformed)?;

                if self.add_season_to(&series_name, season) {
                    summary.seasons += 1;
                    debug!(line, %kind, series = %series_name, "Applied record");
                    progress(LoadEvent::RecordApplied {
                        line,
                        kind,
                        name: series_name,
                    });
                } else {
                    summary.unresolved += 1;
                    warn!(
                        line,
                        series = %series_name,
                        "Season record names an unknown series, ignoring"
                    );
                    progress(LoadEvent::UnresolvedSeries {
                        line,
                        series: series_name,
                    });
                }
            }
            RecordKind::Episode => {
                let episode = Episode::parse(&mut fields).map_err(malformed)?;
                let series_name = fields.next_quoted("series").map_err(malformed)?;
                let season_number: u32 = fields.next_number("season number").map_err(malformed)?;

                let Some(series) = self.find_series_mut(&series_name) else {
                    summary.unresolved += 1;
                    warn!(
                        line,
                        series = %series_name,
                        "Episode record names an unknown series, ignoring"
                    );
                    progress(LoadEvent::UnresolvedSeries {
                        line,
                        series: series_name,
                    });
                    return Ok(());
                };

                if series.add_episode_to_season(season_number, episode) {
                    summary.episodes += 1;
                    debug!(
                        line,
                        %kind,
                        series = %series_name,
                        season = season_number,
                        "Applied record"
                    );
                    progress(LoadEvent::RecordApplied {
                        line,
                        kind,
                        name: series_name,
                    });
                } else {
                    summary.unresolved += 1;
                    warn!(
                        line,
                        series = %series_name,
                        season = season_number,
                        "Episode record names an unknown season, ignoring"
                    );
                    progress(LoadEvent::UnresolvedSeason {
                        line,
                        series: series_name,
                        season: season_number,
                    });
                }
            }
        }

        Ok(())
    }

    /// Replaces every media's restricted countries with those listed in a file
    ///
    /// Fails on the first record naming a media that is absent or of another
    /// kind; restrictions applied before that line are kept.
    pub fn load_restrictions(&mut self, path: &Path) -> Result<RestrictionSummary, CatalogError> {
        self.load_restrictions_with_progress(path, |_| {})
    }

    /// Like [`load_restrictions`](Self::load_restrictions), reporting each record
    pub fn load_restrictions_with_progress<F>(
        &mut self,
        path: &Path,
        progress: F,
    ) -> Result<RestrictionSummary, CatalogError>
    where
        F: FnMut(LoadEvent),
    {
        let reader = open(path)?;
        debug!(path = %path.display(), "Loading restrictions");
        self.read_restrictions(reader, progress)
    }

    /// Replaces restricted countries with the records read from `reader`
    pub fn read_restrictions<R, F>(
        &mut self,
        reader: R,
        mut progress: F,
    ) -> Result<RestrictionSummary, CatalogError>
    where
        R: BufRead,
        F: FnMut(LoadEvent),
    {
        for media in &mut self.media {
            media.info_mut().clear_restricted_countries();
        }

        let mut summary = RestrictionSummary::default();
        for_each_record(reader, |line, text| {
            let countries = self.apply_restriction_record(line, text, &mut progress)?;
            summary.records += 1;
            summary.countries += countries;
            Ok(())
        })?;

        info!(
            records = summary.records,
            countries = summary.countries,
            "Restrictions loaded"
        );
        Ok(summary)
    }

    fn apply_restriction_record<F>(
        &mut self,
        line: usize,
        text: &str,
        progress: &mut F,
    ) -> Result<usize, CatalogError>
    where
        F: FnMut(LoadEvent),
    {
        let malformed = move |source| CatalogError::MalformedRecord { line, source };
        let mut fields = RecordReader::new(text);
        let kind: MediaKind = fields.next_code("media type").map_err(malformed)?;
        let name = fields.next_quoted("media name").map_err(malformed)?;

        let Some(media) = self.find_kind_mut(&name, kind) else {
            return Err(CatalogError::UnknownMedia { line, kind, name });
        };

        let mut countries = Vec::new();
        while !fields.is_exhausted() {
            let country: Country = fields.next_code("country").map_err(malformed)?;
            countries.push(country);
        }

        let info = media.info_mut();
        for country in &countries {
            info.add_restricted_country(*country);
        }

        debug!(line, %kind, name = %name, countries = countries.len(), "Applied restrictions");
        progress(LoadEvent::RestrictionApplied {
            line,
            kind,
            name,
            countries: countries.len(),
        });
        Ok(countries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::Genre;

    fn registry() -> AuthorRegistry {
        let mut registry = AuthorRegistry::new();
        registry.add("Jane", 1970).unwrap();
        registry.add("Akira Kurosawa", 1910).unwrap();
        registry
    }

    fn load(
        catalog: &mut Catalog,
        authors: &AuthorRegistry,
        input: &str,
    ) -> Result<LoadSummary, CatalogError> {
        catalog.read_catalog(input.as_bytes(), authors, |_| {})
    }

    const SAMPLE: &str = r#"1 "Akira Kurosawa" "Beta" 2010 1 5 1
0 "Jane" "Alpha" 2001 0 1 0 "120min"
2 1 10 "Beta"
2 2 2 "Beta"
3 1 "Pilot" "45min" "Beta" 1
3 2 "Second" "44min" "Beta" 1
3 1 "Opening" "50min" "Beta" 2
3 2 "Closing" "51min" "Beta" 2
"#;

    #[test]
    fn test_loads_film_record() {
        let authors = registry();
        let mut catalog = Catalog::new();
        load(&mut catalog, &authors, r#"0 "Jane" "Alpha" 2001 0 1 0 "120min""#).unwrap();

        let film = catalog.find_film("Alpha").unwrap();
        assert_eq!(film.info().release_year(), 2001);
        assert_eq!(film.info().genre(), Genre::Action);
        assert_eq!(film.info().country(), Country::Canada);
        assert!(!film.info().is_age_restricted());
        assert_eq!(film.duration(), "120min");
        assert_eq!(authors.find_by_name("Jane").unwrap().media_count(), 1);
    }

    #[test]
    fn test_loads_full_sample() {
        let authors = registry();
        let mut catalog = Catalog::new();
        let summary = load(&mut catalog, &authors, SAMPLE).unwrap();

        assert_eq!(
            summary,
            LoadSummary {
                films: 1,
                series: 1,
                seasons: 2,
                episodes: 4,
                unresolved: 0,
            }
        );
        assert_eq!(catalog.season_count("Beta"), 2);
        assert_eq!(catalog.episode_count("Beta", 1), 2);
        assert_eq!(catalog.episode_count("Beta", 2), 2);

        // films are grouped before series even though the series came first
        let kinds: Vec<MediaKind> = catalog.iter().map(Media::kind).collect();
        assert_eq!(kinds, vec![MediaKind::Film, MediaKind::Series]);
    }

    #[test]
    fn test_unresolved_season_is_tolerated() {
        let authors = registry();
        let mut catalog = Catalog::new();
        let mut events = Vec::new();
        let summary = catalog
            .read_catalog(r#"2 1 10 "Beta""#.as_bytes(), &authors, |event| events.push(event))
            .unwrap();

        assert_eq!(summary.unresolved, 1);
        assert!(catalog.is_empty());
        assert_eq!(
            events,
            vec![LoadEvent::UnresolvedSeries {
                line: 1,
                series: "Beta".to_string()
            }]
        );
    }

    #[test]
    fn test_episode_for_missing_season_is_tolerated() {
        let authors = registry();
        let mut catalog = Catalog::new();
        let input = "1 \"Jane\" \"Beta\" 2010 1 5 1\n3 1 \"Pilot\" \"45min\" \"Beta\" 7\n";
        let mut events = Vec::new();
        let summary = catalog
            .read_catalog(input.as_bytes(), &authors, |event| events.push(event))
            .unwrap();

        assert_eq!(summary.unresolved, 1);
        assert_eq!(catalog.season_count("Beta"), 0);
        assert_eq!(
            events.last(),
            Some(&LoadEvent::UnresolvedSeason {
                line: 2,
                series: "Beta".to_string(),
                season: 7
            })
        );
    }

    #[test]
    fn test_season_for_film_is_tolerated() {
        let authors = registry();
        let mut catalog = Catalog::new();
        let input = "0 \"Jane\" \"Alpha\" 2001 0 1 0 \"120min\"\n2 1 10 \"Alpha\"\n";
        let summary = load(&mut catalog, &authors, input).unwrap();
        assert_eq!(summary.unresolved, 1);
    }

    #[test]
    fn test_unknown_tag_fails() {
        let authors = registry();
        let mut catalog = Catalog::new();
        let input = r#"9 "Jane" "Alpha" 2001 0 1 0 "120min""#;
        let err = load(&mut catalog, &authors, input).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::MalformedRecord {
                line: 1,
                source: RecordError::UnknownCode { code: 9, .. }
            }
        ));
    }

    #[test]
    fn test_unknown_author_fails_without_rollback() {
        let authors = registry();
        let mut catalog = Catalog::new();
        let input = r#"0 "Jane" "Alpha" 2001 0 1 0 "120min"
0 "Nobody" "Gamma" 2001 0 1 0 "90min"
0 "Jane" "Delta" 2001 0 1 0 "90min"
"#;
        let err = load(&mut catalog, &authors, input).unwrap_err();

        assert!(matches!(
            err,
            CatalogError::UnknownAuthor { line: 2, ref name } if name == "Nobody"
        ));
        assert!(catalog.find("Alpha").is_some());
        assert!(catalog.find("Delta").is_none());
    }

    #[test]
    fn test_malformed_fields_fail() {
        let authors = registry();
        for input in [
            r#"0 "Jane" "Alpha" 2001 0 1 0"#,
            r#"0 "Jane" "Alpha" year 0 1 0 "120min""#,
            r#"0 "Jane" "Alpha" 2001 5 1 0 "120min""#,
            r#"1 "Jane" "Beta" 2001 0 9 0"#,
            r#"2 one 10 "Beta""#,
            r#"3 1 "Pilot" "45min" "Beta""#,
            "film",
            "-1",
        ] {
            let mut catalog = Catalog::new();
            assert!(
                matches!(
                    load(&mut catalog, &authors, input),
                    Err(CatalogError::MalformedRecord { .. })
                ),
                "expected malformed record for {input:?}"
            );
        }
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let authors = registry();
        let mut catalog = Catalog::new();
        let input = "\n   \n0 \"Jane\" \"Alpha\" 2001 0 1 0 \"120min\"\n\n";
        let summary = load(&mut catalog, &authors, input).unwrap();
        assert_eq!(summary.films, 1);
    }

    #[test]
    fn test_reload_replaces_contents() {
        let authors = registry();
        let mut catalog = Catalog::new();
        load(&mut catalog, &authors, SAMPLE).unwrap();
        load(&mut catalog, &authors, r#"0 "Jane" "Omega" 2020 2 4 1 "99min""#).unwrap();

        assert_eq!(catalog.len(), 1);
        assert!(catalog.find("Alpha").is_none());
        assert_eq!(authors.find_by_name("Akira Kurosawa").unwrap().media_count(), 0);
        assert_eq!(authors.find_by_name("Jane").unwrap().media_count(), 1);
    }

    #[test]
    fn test_restrictions_applied() {
        let authors = registry();
        let mut catalog = Catalog::new();
        load(&mut catalog, &authors, SAMPLE).unwrap();

        let summary = catalog
            .read_restrictions("0 \"Alpha\" 3 4\n1 \"Beta\"\n".as_bytes(), |_| {})
            .unwrap();
        assert_eq!(summary, RestrictionSummary { records: 2, countries: 2 });

        let alpha = catalog.find("Alpha").unwrap().info();
        for country in Country::ALL {
            let expected = matches!(country, Country::UnitedStates | Country::France);
            assert_eq!(alpha.is_restricted_in(country), expected, "{country}");
        }
        assert!(catalog.find("Beta").unwrap().info().restricted_countries().is_empty());
    }

    #[test]
    fn test_restrictions_reload_clears_previous() {
        let authors = registry();
        let mut catalog = Catalog::new();
        load(&mut catalog, &authors, SAMPLE).unwrap();

        catalog.read_restrictions(r#"0 "Alpha" 3 3"#.as_bytes(), |_| {}).unwrap();
        assert_eq!(catalog.find("Alpha").unwrap().info().restricted_countries().len(), 2);

        catalog.read_restrictions(r#"0 "Alpha" 0"#.as_bytes(), |_| {}).unwrap();
        let alpha = catalog.find("Alpha").unwrap().info();
        assert_eq!(alpha.restricted_countries(), &[Country::Brazil]);
    }

    #[test]
    fn test_restrictions_wrong_kind_fails() {
        let authors = registry();
        let mut catalog = Catalog::new();
        load(&mut catalog, &authors, SAMPLE).unwrap();

        let err = catalog
            .read_restrictions(r#"1 "Alpha" 3"#.as_bytes(), |_| {})
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::UnknownMedia { line: 1, kind: MediaKind::Series, .. }
        ));

        let err = catalog
            .read_restrictions("0 \"Alpha\" 3\n0 \"Missing\" 1\n".as_bytes(), |_| {})
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownMedia { line: 2, .. }));
        assert!(catalog.find("Alpha").unwrap().info().is_restricted_in(Country::UnitedStates));
    }

    #[test]
    fn test_restrictions_bad_country_fails() {
        let authors = registry();
        let mut catalog = Catalog::new();
        load(&mut catalog, &authors, SAMPLE).unwrap();

        for input in [r#"0 "Alpha" 3 12"#, r#"0 "Alpha" 3 x"#, r#"4 "Alpha" 3"#] {
            assert!(matches!(
                catalog.read_restrictions(input.as_bytes(), |_| {}),
                Err(CatalogError::MalformedRecord { line: 1, .. })
            ));
        }
        // nothing from the malformed record is applied
        assert!(catalog.find("Alpha").unwrap().info().restricted_countries().is_empty());
    }

    #[test]
    fn test_missing_file() {
        let authors = registry();
        let mut catalog = Catalog::new();
        let result = catalog.load_catalog(Path::new("/nonexistent/catalog.txt"), &authors);
        assert!(matches!(result, Err(CatalogError::SourceUnavailable { .. })));

        let result = catalog.load_restrictions(Path::new("/nonexistent/restrictions.txt"));
        assert!(matches!(result, Err(CatalogError::SourceUnavailable { .. })));
    }
}

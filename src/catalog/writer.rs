//! Writes a catalog back into the record formats it is loaded from

use super::{Catalog, RecordKind};
use crate::media::{Media, MediaInfo};
use crate::record::quote;
use std::io::{self, Write};
use std::ptr;

fn write_info_fields<W: Write>(out: &mut W, info: &MediaInfo) -> io::Result<()> {
    write!(
        out,
        "{} {} {} {} {} {}",
        quote(info.author().name()),
        quote(info.name()),
        info.release_year(),
        info.genre().code(),
        info.country().code(),
        u8::from(info.is_age_restricted())
    )
}

impl Catalog {
    /// Fails when reading the media's name back would resolve to another media
    fn ensure_resolves_to(&self, media: &Media) -> io::Result<()> {
        if self.find(media.name()).is_some_and(|first| ptr::eq(first, media)) {
            return Ok(());
        }
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "{} \"{}\" is shadowed by an earlier media of the same name",
                media.kind(),
                media.name()
            ),
        ))
    }

    /// Writes every media, season and episode as catalog records
    ///
    /// Film and series records come first so that reading the output back
    /// resolves every season and episode record. A series with seasons whose
    /// name is shared with an earlier media cannot be written, since its
    /// season records would resolve to that media.
    pub fn write_catalog_records<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let with_seasons = self
            .iter()
            .filter(|media| media.as_series().is_some_and(|series| series.season_count() > 0));
        for media in with_seasons {
            self.ensure_resolves_to(media)?;
        }

        for media in self.iter() {
            match media {
                Media::Film(film) => {
                    write!(out, "{} ", RecordKind::Film.code())?;
                    write_info_fields(out, film.info())?;
                    writeln!(out, " {}", quote(film.duration()))?;
                }
                Media::Series(series) => {
                    write!(out, "{} ", RecordKind::Series.code())?;
                    write_info_fields(out, series.info())?;
                    writeln!(out)?;
                }
            }
        }

        for series in self.iter().filter_map(Media::as_series) {
            let series_name = quote(series.info().name());
            for season in series.seasons() {
                writeln!(
                    out,
                    "{} {} {} {}",
                    RecordKind::Season.code(),
                    season.number(),
                    season.max_episodes(),
                    series_name
                )?;
                for episode in season.episodes() {
                    writeln!(
                        out,
                        "{} {} {} {} {} {}",
                        RecordKind::Episode.code(),
                        episode.number(),
                        quote(episode.title()),
                        quote(episode.duration()),
                        series_name,
                        season.number()
                    )?;
                }
            }
        }

        Ok(())
    }

    /// Writes one restriction record per restricted media
    ///
    /// Media without restricted countries are left out, since reading
    /// restrictions clears every media first. A restricted media whose name
    /// is shared with an earlier media cannot be written.
    pub fn write_restriction_records<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let restricted = self
            .iter()
            .filter(|media| !media.info().restricted_countries().is_empty());
        for media in restricted.clone() {
            self.ensure_resolves_to(media)?;
        }

        for media in restricted {
            write!(out, "{} {}", media.kind().code(), quote(media.name()))?;
            for country in media.info().restricted_countries() {
                write!(out, " {}", country.code())?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

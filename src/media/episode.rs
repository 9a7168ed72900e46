use crate::record::{RecordError, RecordReader};
use std::cmp::Ordering;
use std::fmt;

/// A single episode of a season
///
/// Episodes are identified by their number alone: two episodes with the same
/// number compare equal regardless of title or duration, which is what makes
/// a later episode replace an earlier one within a season.
#[derive(Debug, Clone)]
pub struct Episode {
    number: u32,
    title: String,
    duration: String,
}

impl Episode {
    pub fn new(number: u32, title: impl Into<String>, duration: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            duration: duration.into(),
        }
    }

    /// Reads `number "title" "duration"`
    pub(crate) fn parse(fields: &mut RecordReader<'_>) -> Result<Self, RecordError> {
        let number = fields.next_number("episode number")?;
        let title = fields.next_quoted("episode title")?;
        let duration = fields.next_quoted("episode duration")?;
        Ok(Self::new(number, title, duration))
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn duration(&self) -> &str {
        &self.duration
    }
}

impl PartialEq for Episode {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

impl Eq for Episode {}

impl PartialOrd for Episode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Episode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.number.cmp(&other.number)
    }
}

impl fmt::Display for Episode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:16}Episode {:02}: {} | Duration: {}",
            "", self.number, self.title, self.duration
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let mut fields = RecordReader::new(r#"4 "The Long Night" "52min" "Beta" 1"#);
        let episode = Episode::parse(&mut fields).unwrap();
        assert_eq!(episode.number(), 4);
        assert_eq!(episode.title(), "The Long Night");
        assert_eq!(episode.duration(), "52min");
        assert_eq!(fields.next_quoted("series").unwrap(), "Beta");
    }

    #[test]
    fn test_parse_rejects_bad_number() {
        let mut fields = RecordReader::new(r#"four "Title" "52min""#);
        assert!(Episode::parse(&mut fields).is_err());
    }

    #[test]
    fn test_identity_is_number_only() {
        let a = Episode::new(3, "Pilot", "40min");
        let b = Episode::new(3, "Pilot (Director's cut)", "55min");
        let c = Episode::new(7, "Finale", "60min");
        assert_eq!(a, b);
        assert!(a < c);
    }

    #[test]
    fn test_render() {
        let episode = Episode::new(2, "Arrival", "45min");
        assert_eq!(
            episode.to_string(),
            "                Episode 02: Arrival | Duration: 45min\n"
        );
    }
}

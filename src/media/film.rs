use super::MediaInfo;
use crate::authors::Author;
use crate::record::{RecordError, RecordReader};
use std::fmt;
use std::rc::Rc;

/// A feature film
#[derive(Debug, Clone)]
pub struct Film {
    info: MediaInfo,
    duration: String,
}

impl Film {
    pub fn new(info: MediaInfo, duration: impl Into<String>) -> Self {
        Self {
            info,
            duration: duration.into(),
        }
    }

    /// Reads the common media fields followed by a quoted duration
    pub(crate) fn parse(
        fields: &mut RecordReader<'_>,
        author: Rc<Author>,
    ) -> Result<Self, RecordError> {
        let info = MediaInfo::parse(fields, author)?;
        let duration = fields.next_quoted("duration")?;
        Ok(Self::new(info, duration))
    }

    pub fn info(&self) -> &MediaInfo {
        &self.info
    }

    pub fn info_mut(&mut self) -> &mut MediaInfo {
        &mut self.info
    }

    pub fn duration(&self) -> &str {
        &self.duration
    }
}

impl fmt::Display for Film {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.info)?;
        writeln!(f, "\tDuration: {}", self.duration)
    }
}

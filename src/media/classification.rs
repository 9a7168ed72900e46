//! Enumerations used to classify media
//!
//! Genres and countries travel through the text formats as small integer
//! codes, assigned by position in the lists below.

use crate::record::RecordError;
use serde::Serialize;
use std::fmt;

/// The genre of a film or series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Genre {
    Action,
    Adventure,
    Comedy,
    Horror,
    Romance,
}

impl Genre {
    /// All genres, indexed by their wire code
    pub const ALL: [Genre; 5] = [
        Genre::Action,
        Genre::Adventure,
        Genre::Comedy,
        Genre::Horror,
        Genre::Romance,
    ];

    /// Human readable label used when rendering
    pub fn label(self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Adventure => "Adventure",
            Genre::Comedy => "Comedy",
            Genre::Horror => "Horror",
            Genre::Romance => "Romance",
        }
    }

    /// The integer code used in record files
    pub fn code(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<u32> for Genre {
    type Error = RecordError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Genre::ALL
            .get(code as usize)
            .copied()
            .ok_or(RecordError::UnknownCode {
                what: "genre",
                code,
            })
    }
}

/// Countries a media can originate from or be restricted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Country {
    Brazil,
    Canada,
    China,
    UnitedStates,
    France,
    Japan,
    UnitedKingdom,
    Russia,
    Mexico,
}

impl Country {
    /// All countries, indexed by their wire code
    pub const ALL: [Country; 9] = [
        Country::Brazil,
        Country::Canada,
        Country::China,
        Country::UnitedStates,
        Country::France,
        Country::Japan,
        Country::UnitedKingdom,
        Country::Russia,
        Country::Mexico,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Country::Brazil => "Brazil",
            Country::Canada => "Canada",
            Country::China => "China",
            Country::UnitedStates => "United States",
            Country::France => "France",
            Country::Japan => "Japan",
            Country::UnitedKingdom => "United Kingdom",
            Country::Russia => "Russia",
            Country::Mexico => "Mexico",
        }
    }

    pub fn code(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<u32> for Country {
    type Error = RecordError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Country::ALL
            .get(code as usize)
            .copied()
            .ok_or(RecordError::UnknownCode {
                what: "country",
                code,
            })
    }
}

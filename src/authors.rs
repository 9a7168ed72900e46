//! Author registry
//!
//! Authors are owned by the registry and shared with every media attributed
//! to them. Each author keeps a count of the media currently referencing it;
//! the count is maintained by the media themselves (see
//! [`MediaInfo`](crate::MediaInfo)).

use crate::record::{RecordError, RecordReader};
use std::cell::Cell;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

/// Maximum number of authors a registry can hold
pub const MAX_AUTHORS: usize = 16;

/// Errors that can occur while building the author registry
#[derive(Debug, Error)]
pub enum AuthorRegistryError {
    /// The author file could not be opened
    #[error("Failed to open author file {path}: {source}")]
    SourceUnavailable { path: PathBuf, source: io::Error },

    /// Reading from the author source failed
    #[error("Failed to read author line {line}: {source}")]
    ReadFailed { line: usize, source: io::Error },

    /// A line could not be parsed as an author record
    #[error("Malformed author record on line {line}: {source}")]
    MalformedRecord { line: usize, source: RecordError },

    /// The registry already holds [`MAX_AUTHORS`] authors
    #[error("Author registry is full, cannot add \"{0}\"")]
    RegistryFull(String),
}

/// A person media are attributed to
#[derive(Debug)]
pub struct Author {
    name: String,
    birth_year: u32,
    media_count: Cell<u32>,
}

impl Author {
    pub fn new(name: impl Into<String>, birth_year: u32) -> Self {
        Self {
            name: name.into(),
            birth_year,
            media_count: Cell::new(0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn birth_year(&self) -> u32 {
        self.birth_year
    }

    /// Number of live media attributed to this author
    pub fn media_count(&self) -> u32 {
        self.media_count.get()
    }

    pub(crate) fn increment_media_count(&self) {
        self.media_count.set(self.media_count.get() + 1);
    }

    pub(crate) fn decrement_media_count(&self) {
        self.media_count
            .set(self.media_count.get().saturating_sub(1));
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {} | Birth year: {} | Media count: {}",
            self.name,
            self.birth_year,
            self.media_count()
        )
    }
}

/// Ordered collection of authors, looked up by name
#[derive(Debug, Default)]
pub struct AuthorRegistry {
    authors: Vec<Rc<Author>>,
}

impl AuthorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new author and returns a handle to it
    pub fn add(
        &mut self,
        name: impl Into<String>,
        birth_year: u32,
    ) -> Result<Rc<Author>, AuthorRegistryError> {
        let name = name.into();
        if self.authors.len() >= MAX_AUTHORS {
            return Err(AuthorRegistryError::RegistryFull(name));
        }

        let author = Rc::new(Author::new(name, birth_year));
        self.authors.push(Rc::clone(&author));
        Ok(author)
    }

    /// Finds the first author with the given name
    pub fn find_by_name(&self, name: &str) -> Option<&Rc<Author>> {
        self.authors.iter().find(|author| author.name == name)
    }

    pub fn len(&self) -> usize {
        self.authors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Author> {
        self.authors.iter().map(|author| author.as_ref())
    }

    /// Replaces the registry contents with the authors listed in a file
    ///
    /// Each line holds a quoted name followed by a birth year:
    ///
    /// ```text
    /// "Jane Doe" 1970
    /// ```
    pub fn load_from_file(&mut self, path: &Path) -> Result<usize, AuthorRegistryError> {
        let file = File::open(path).map_err(|e| AuthorRegistryError::SourceUnavailable {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.load_from_reader(BufReader::new(file))
    }

    /// Same as [`load_from_file`](Self::load_from_file) for any buffered reader
    pub fn load_from_reader<R: BufRead>(
        &mut self,
        reader: R,
    ) -> Result<usize, AuthorRegistryError> {
        self.authors.clear();

        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line.map_err(|e| AuthorRegistryError::ReadFailed {
                line: line_number,
                source: e,
            })?;
            if line.trim().is_empty() {
                continue;
            }

            let malformed = move |source| AuthorRegistryError::MalformedRecord {
                line: line_number,
                source,
            };
            let mut fields = RecordReader::new(&line);
            let name = fields.next_quoted("author name").map_err(malformed)?;
            let birth_year = fields.next_number("birth year").map_err(malformed)?;
            self.add(name, birth_year)?;
        }

        tracing::debug!(count = self.authors.len(), "Loaded authors");
        Ok(self.authors.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_name() {
        let mut registry = AuthorRegistry::new();
        registry.add("Jane", 1970).unwrap();
        registry.add("John Smith", 1981).unwrap();

        let found = registry.find_by_name("John Smith").unwrap();
        assert_eq!(found.birth_year(), 1981);
        assert_eq!(found.media_count(), 0);
        assert!(registry.find_by_name("john smith").is_none());
    }

    #[test]
    fn test_registry_capacity() {
        let mut registry = AuthorRegistry::new();
        for i in 0..MAX_AUTHORS {
            registry.add(format!("Author {i}"), 1900).unwrap();
        }
        assert!(matches!(
            registry.add("One too many", 2000),
            Err(AuthorRegistryError::RegistryFull(name)) if name == "One too many"
        ));
        assert_eq!(registry.len(), MAX_AUTHORS);
    }

    #[test]
    fn test_load_from_reader_replaces_contents() {
        let mut registry = AuthorRegistry::new();
        registry.add("Stale", 1900).unwrap();

        let input = "\"Jane Doe\" 1970\n\n\"Akira\" 1950\n";
        let count = registry.load_from_reader(input.as_bytes()).unwrap();

        assert_eq!(count, 2);
        assert!(registry.find_by_name("Stale").is_none());
        assert_eq!(registry.find_by_name("Jane Doe").unwrap().birth_year(), 1970);
    }

    #[test]
    fn test_load_from_reader_reports_line() {
        let mut registry = AuthorRegistry::new();
        let input = "\"Jane\" 1970\n\"Broken\" year\n";
        let err = registry.load_from_reader(input.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            AuthorRegistryError::MalformedRecord { line: 2, .. }
        ));
    }

    #[test]
    fn test_missing_file() {
        let mut registry = AuthorRegistry::new();
        let result = registry.load_from_file(Path::new("/nonexistent/authors.txt"));
        assert!(matches!(
            result,
            Err(AuthorRegistryError::SourceUnavailable { .. })
        ));
    }

    #[test]
    fn test_counter_saturates() {
        let author = Author::new("Jane", 1970);
        author.decrement_media_count();
        assert_eq!(author.media_count(), 0);
        author.increment_media_count();
        author.increment_media_count();
        author.decrement_media_count();
        assert_eq!(author.media_count(), 1);
    }

    #[test]
    fn test_display() {
        let author = Author::new("Jane", 1970);
        assert_eq!(
            author.to_string(),
            "Name: Jane | Birth year: 1970 | Media count: 0"
        );
    }
}

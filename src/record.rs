//! Field reader for the line-oriented record formats
//!
//! Every text format handled by this crate carries one record per line, made
//! of whitespace separated fields. Names are transmitted as double-quoted
//! strings so they may contain spaces; inside quotes a backslash escapes the
//! next character (`\"` and `\\`). A string field that does not start with a
//! quote is read as a single bare word.

use std::str::FromStr;
use thiserror::Error;

/// Errors raised while pulling typed fields out of a record line
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The line ended before the field could be read
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    /// The field is not an integer in the expected range
    #[error("field `{field}` is not a valid number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    /// A boolean flag was something other than `0` or `1`
    #[error("field `{field}` must be 0 or 1, got {value:?}")]
    InvalidFlag { field: &'static str, value: String },

    /// A quoted string was opened but never closed
    #[error("unterminated quoted string in field `{0}`")]
    UnterminatedQuote(&'static str),

    /// An enumeration code outside of its valid range
    #[error("unknown {what} code {code}")]
    UnknownCode { what: &'static str, code: u32 },
}

/// Cursor over the fields of a single record line
///
/// Each `next_*` call consumes exactly one field. The `field` argument only
/// names the field in error messages.
#[derive(Debug)]
pub(crate) struct RecordReader<'a> {
    rest: &'a str,
}

impl<'a> RecordReader<'a> {
    pub fn new(line: &'a str) -> Self {
        Self { rest: line }
    }

    /// Returns true once only whitespace is left on the line
    pub fn is_exhausted(&mut self) -> bool {
        self.skip_whitespace();
        self.rest.is_empty()
    }

    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }

    /// Reads the next whitespace-delimited word
    pub fn next_word(&mut self, field: &'static str) -> Result<&'a str, RecordError> {
        self.skip_whitespace();
        if self.rest.is_empty() {
            return Err(RecordError::MissingField(field));
        }

        let end = self
            .rest
            .find(char::is_whitespace)
            .unwrap_or(self.rest.len());
        let (word, rest) = self.rest.split_at(end);
        self.rest = rest;
        Ok(word)
    }

    /// Reads a quoted string, falling back to a bare word when unquoted
    pub fn next_quoted(&mut self, field: &'static str) -> Result<String, RecordError> {
        self.skip_whitespace();
        let Some(body) = self.rest.strip_prefix('"') else {
            return self.next_word(field).map(str::to_string);
        };

        let mut value = String::new();
        let mut chars = body.char_indices();
        while let Some((index, c)) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some((_, escaped)) => value.push(escaped),
                    None => break,
                },
                '"' => {
                    self.rest = &body[index + 1..];
                    return Ok(value);
                }
                c => value.push(c),
            }
        }

        Err(RecordError::UnterminatedQuote(field))
    }

    /// Reads an integer field
    pub fn next_number<T: FromStr>(&mut self, field: &'static str) -> Result<T, RecordError> {
        let word = self.next_word(field)?;
        word.parse().map_err(|_| RecordError::InvalidNumber {
            field,
            value: word.to_string(),
        })
    }

    /// Reads a `0`/`1` flag
    pub fn next_flag(&mut self, field: &'static str) -> Result<bool, RecordError> {
        match self.next_word(field)? {
            "0" => Ok(false),
            "1" => Ok(true),
            other => Err(RecordError::InvalidFlag {
                field,
                value: other.to_string(),
            }),
        }
    }

    /// Reads a small non-negative integer and maps it onto an enumeration
    pub fn next_code<T>(&mut self, field: &'static str) -> Result<T, RecordError>
    where
        T: TryFrom<u32, Error = RecordError>,
    {
        let code: u32 = self.next_number(field)?;
        T::try_from(code)
    }
}

/// Quotes a string so that [`RecordReader::next_quoted`] reads it back verbatim
pub(crate) fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_mixed_fields() {
        let mut reader = RecordReader::new(r#"  "Jane Doe" 1970 1 Alpha"#);
        assert_eq!(reader.next_quoted("author").unwrap(), "Jane Doe");
        assert_eq!(reader.next_number::<u32>("year").unwrap(), 1970);
        assert!(reader.next_flag("flag").unwrap());
        assert_eq!(reader.next_quoted("name").unwrap(), "Alpha");
        assert!(reader.is_exhausted());
    }

    #[test]
    fn test_quoted_escapes() {
        let mut reader = RecordReader::new(r#""say \"hi\" \\ bye" "" rest"#);
        assert_eq!(reader.next_quoted("a").unwrap(), r#"say "hi" \ bye"#);
        assert_eq!(reader.next_quoted("b").unwrap(), "");
        assert_eq!(reader.next_word("c").unwrap(), "rest");
    }

    #[test]
    fn test_unterminated_quote() {
        let mut reader = RecordReader::new(r#""never closed"#);
        assert_eq!(
            reader.next_quoted("title"),
            Err(RecordError::UnterminatedQuote("title"))
        );
    }

    #[test]
    fn test_missing_and_invalid_fields() {
        let mut reader = RecordReader::new("abc 2");
        assert!(matches!(
            reader.next_number::<u32>("year"),
            Err(RecordError::InvalidNumber { field: "year", .. })
        ));
        assert!(matches!(
            reader.next_flag("flag"),
            Err(RecordError::InvalidFlag { field: "flag", .. })
        ));
        assert_eq!(
            reader.next_word("name"),
            Err(RecordError::MissingField("name"))
        );
    }

    #[test]
    fn test_negative_number_rejected_for_unsigned() {
        let mut reader = RecordReader::new("-1");
        assert!(reader.next_number::<u32>("tag").is_err());
    }

    #[test]
    fn test_quote_round_trips_through_reader() {
        let original = r#"The "Best" \ Show"#;
        let line = quote(original);
        let mut reader = RecordReader::new(&line);
        assert_eq!(reader.next_quoted("name").unwrap(), original);
    }
}

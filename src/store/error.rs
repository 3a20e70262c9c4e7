use std::fmt;

use thiserror::Error;

/// The two identity fields the store insists on before touching the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Artist,
    Title,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Artist => "Artist name",
            Field::Title => "Song title",
        };
        write!(f, "{name}")
    }
}

/// Failures surfaced by the song store. Every operation reports these as
/// values; the presentation layer shows the `Display` text directly, so the
/// messages are written for the footer rather than for a log.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required identity field was blank after trimming.
    #[error("{0} is required.")]
    MissingField(Field),
    /// Removal was attempted before any song was ever saved.
    #[error("No songs to remove.")]
    StoreAbsent,
    /// No stored entry matched the requested identity pair.
    #[error("Song not found.")]
    NotFound,
    /// The backing file could not be opened, read, or written. `csv::Error`
    /// already wraps the underlying `io::Error` for plain file problems.
    #[error("Song file error: {0}")]
    Io(#[from] csv::Error),
}

//! Domain model shared between the persistence layer and the TUI. The type
//! stays a light-weight data holder so other layers can focus on presentation
//! and file-handling logic; the serde attributes double as the single source
//! of truth for the on-disk column names.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One saved song. The struct mirrors a row of the backing CSV file; the
/// `rename` attributes keep the header text stable even if field names churn.
pub struct SongEntry {
    /// Who performs the song. Together with `title` this identifies the entry
    /// for removal, compared case-insensitively.
    #[serde(rename = "Artist Name")]
    pub artist: String,
    /// The song's name, the second half of the identity pair.
    #[serde(rename = "Song Title")]
    pub title: String,
    /// Rating label as picked in the UI selector. Stored as raw text so a
    /// hand-edited file with unexpected labels still loads.
    #[serde(rename = "Rating")]
    pub rating: String,
    /// Free-text note. The store substitutes "N/A" when the user left this
    /// blank, so it is never empty on disk.
    #[serde(rename = "Description")]
    pub description: String,
}

impl SongEntry {
    /// Whether this entry is the one identified by the given pair. Both sides
    /// are compared in Unicode lowercase so "aretha"/"RESPECT" still finds
    /// "Aretha"/"Respect".
    pub fn matches(&self, artist: &str, title: &str) -> bool {
        self.artist.to_lowercase() == artist.to_lowercase()
            && self.title.to_lowercase() == title.to_lowercase()
    }

    /// Compose a `Title - Artist` string for list rows and status messages.
    pub fn display_title(&self) -> String {
        format!("{} - {}", self.title, self.artist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> SongEntry {
        SongEntry {
            artist: "Aretha Franklin".to_string(),
            title: "Respect".to_string(),
            rating: "10".to_string(),
            description: "Classic".to_string(),
        }
    }

    #[test]
    fn matches_ignores_case_on_both_fields() {
        let respect = entry();
        assert!(respect.matches("aretha franklin", "RESPECT"));
        assert!(respect.matches("Aretha Franklin", "Respect"));
        assert!(!respect.matches("Aretha Franklin", "Think"));
        assert!(!respect.matches("Otis Redding", "Respect"));
    }

    #[test]
    fn display_title_joins_title_and_artist() {
        assert_eq!(entry().display_title(), "Respect - Aretha Franklin");
    }
}

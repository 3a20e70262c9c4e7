use std::path::{Path, PathBuf};

use crate::models::SongEntry;

use super::error::{Field, StoreError};
use super::file::{append_writer, reader, rewrite_writer, STORE_FILE_NAME};

/// Handle to the CSV-backed song store. The handle is cheap to construct and
/// holds no open file: every operation opens the backing file, completes its
/// effect, and closes it again, so a failed operation leaves the store in its
/// prior state.
#[derive(Debug, Clone)]
pub struct SongStore {
    path: PathBuf,
}

impl SongStore {
    /// Store over `songs.csv` in the current working directory, where the
    /// application keeps it.
    pub fn open_default() -> Self {
        Self {
            path: PathBuf::from(STORE_FILE_NAME),
        }
    }

    /// Store over an explicit file path. Tests point this at a temporary
    /// directory so they never touch a real collection.
    pub fn at<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Validate and append one entry, creating the file with its header on
    /// first use. Artist and title must be non-blank after trimming; a blank
    /// description is stored as the literal "N/A". Rating content is accepted
    /// as-is. The hydrated entry is echoed back so the caller can update its
    /// in-memory list without re-reading the file.
    pub fn add(
        &self,
        artist: &str,
        title: &str,
        rating: &str,
        description: &str,
    ) -> Result<SongEntry, StoreError> {
        let artist = artist.trim();
        let title = title.trim();
        if artist.is_empty() {
            return Err(StoreError::MissingField(Field::Artist));
        }
        if title.is_empty() {
            return Err(StoreError::MissingField(Field::Title));
        }

        let description = description.trim();
        let entry = SongEntry {
            artist: artist.to_string(),
            title: title.to_string(),
            rating: rating.trim().to_string(),
            description: if description.is_empty() {
                "N/A".to_string()
            } else {
                description.to_string()
            },
        };

        let mut writer = append_writer(&self.path)?;
        writer.serialize(&entry)?;
        writer.flush().map_err(|err| StoreError::Io(err.into()))?;
        Ok(entry)
    }

    /// Remove the first entry matching `(artist, title)` case-insensitively
    /// and rewrite the file with the survivors in their original order. Fails
    /// with `StoreAbsent` when no file exists and `NotFound` when nothing
    /// matches; neither failure opens the file for writing, so the store is
    /// untouched. The removed entry is returned for the success message.
    pub fn remove(&self, artist: &str, title: &str) -> Result<SongEntry, StoreError> {
        let artist = artist.trim();
        let title = title.trim();
        if artist.is_empty() {
            return Err(StoreError::MissingField(Field::Artist));
        }
        if title.is_empty() {
            return Err(StoreError::MissingField(Field::Title));
        }
        if !self.path.exists() {
            return Err(StoreError::StoreAbsent);
        }

        let mut entries = self.read_all()?;
        let position = entries
            .iter()
            .position(|entry| entry.matches(artist, title))
            .ok_or(StoreError::NotFound)?;
        // Only the first match goes; later duplicates stay.
        let removed = entries.remove(position);

        let mut writer = rewrite_writer(&self.path)?;
        for entry in &entries {
            writer.serialize(entry)?;
        }
        writer.flush().map_err(|err| StoreError::Io(err.into()))?;
        Ok(removed)
    }

    /// All stored entries in file order. An absent file is simply an empty
    /// store here, unlike `remove`, because the list view has nothing to
    /// complain about before the first save.
    pub fn entries(&self) -> Result<Vec<SongEntry>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        self.read_all()
    }

    fn read_all(&self) -> Result<Vec<SongEntry>, StoreError> {
        let mut reader = reader(&self.path)?;
        let mut entries = Vec::new();
        for record in reader.deserialize() {
            entries.push(record?);
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn create_test_store() -> (SongStore, TempDir) {
        let tmp = TempDir::new().unwrap();
        let store = SongStore::at(tmp.path().join("songs.csv"));
        (store, tmp)
    }

    fn raw_file(store: &SongStore) -> String {
        fs::read_to_string(store.path()).unwrap()
    }

    #[test]
    fn add_then_read_back_round_trips() {
        let (store, _tmp) = create_test_store();
        store.add("Aretha", "Respect", "10", "Classic").unwrap();

        let entries = store.entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].artist, "Aretha");
        assert_eq!(entries[0].title, "Respect");
        assert_eq!(entries[0].rating, "10");
        assert_eq!(entries[0].description, "Classic");
    }

    #[test]
    fn add_trims_surrounding_whitespace() {
        let (store, _tmp) = create_test_store();
        store.add("  Aretha ", " Respect  ", " 10 ", "  Classic ").unwrap();

        let entries = store.entries().unwrap();
        assert_eq!(entries[0].artist, "Aretha");
        assert_eq!(entries[0].title, "Respect");
        assert_eq!(entries[0].rating, "10");
        assert_eq!(entries[0].description, "Classic");
    }

    #[test]
    fn blank_description_defaults_to_na() {
        let (store, _tmp) = create_test_store();
        store.add("Aretha", "Respect", "10", "   ").unwrap();

        let entries = store.entries().unwrap();
        assert_eq!(entries[0].description, "N/A");
    }

    #[test]
    fn add_rejects_blank_artist_without_creating_file() {
        let (store, _tmp) = create_test_store();
        let err = store.add("   ", "Respect", "10", "x").unwrap_err();

        assert!(matches!(err, StoreError::MissingField(Field::Artist)));
        assert!(!store.path().exists());
    }

    #[test]
    fn add_rejects_blank_title_without_touching_existing_file() {
        let (store, _tmp) = create_test_store();
        store.add("Aretha", "Respect", "10", "Classic").unwrap();
        let before = raw_file(&store);

        let err = store.add("Aretha", "", "5", "x").unwrap_err();
        assert!(matches!(err, StoreError::MissingField(Field::Title)));
        assert_eq!(raw_file(&store), before);
    }

    #[test]
    fn header_is_written_exactly_once() {
        let (store, _tmp) = create_test_store();
        store.add("Aretha", "Respect", "10", "Classic").unwrap();
        store.add("Otis", "Try a Little Tenderness", "9", "N/A").unwrap();

        let raw = raw_file(&store);
        let lines: Vec<&str> = raw.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Artist Name,Song Title,Rating,Description");
    }

    #[test]
    fn remove_without_file_is_store_absent() {
        let (store, _tmp) = create_test_store();
        let err = store.remove("Aretha", "Respect").unwrap_err();
        assert!(matches!(err, StoreError::StoreAbsent));
    }

    #[test]
    fn remove_rejects_blank_fields_before_checking_the_file() {
        let (store, _tmp) = create_test_store();
        let err = store.remove("", "Respect").unwrap_err();
        assert!(matches!(err, StoreError::MissingField(Field::Artist)));

        let err = store.remove("Aretha", "   ").unwrap_err();
        assert!(matches!(err, StoreError::MissingField(Field::Title)));
    }

    #[test]
    fn remove_is_case_insensitive_and_keeps_the_header() {
        let (store, _tmp) = create_test_store();
        store.add("Aretha", "Respect", "10", "Classic").unwrap();

        let removed = store.remove("aretha", "RESPECT").unwrap();
        assert_eq!(removed.artist, "Aretha");
        assert_eq!(removed.title, "Respect");

        assert!(store.entries().unwrap().is_empty());
        assert_eq!(raw_file(&store), "Artist Name,Song Title,Rating,Description\n");
    }

    #[test]
    fn remove_of_missing_song_leaves_file_byte_for_byte_unchanged() {
        let (store, _tmp) = create_test_store();
        store.add("Aretha", "Respect", "10", "Classic").unwrap();
        let before = raw_file(&store);

        let err = store.remove("Unknown", "Song").unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
        assert_eq!(raw_file(&store), before);
    }

    #[test]
    fn duplicate_adds_are_both_stored() {
        let (store, _tmp) = create_test_store();
        store.add("Aretha", "Respect", "10", "Classic").unwrap();
        store.add("Aretha", "Respect", "10", "Classic").unwrap();

        assert_eq!(store.entries().unwrap().len(), 2);
    }

    #[test]
    fn remove_drops_only_the_first_duplicate_and_preserves_order() {
        let (store, _tmp) = create_test_store();
        store.add("Aretha", "Respect", "1", "first copy").unwrap();
        store.add("Otis", "Try a Little Tenderness", "9", "N/A").unwrap();
        store.add("Aretha", "Respect", "2", "second copy").unwrap();

        let removed = store.remove("Aretha", "Respect").unwrap();
        assert_eq!(removed.rating, "1");

        let entries = store.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Try a Little Tenderness");
        assert_eq!(entries[1].rating, "2");
    }

    #[test]
    fn removing_every_entry_leaves_a_header_only_file() {
        let (store, _tmp) = create_test_store();
        let songs = [
            ("Aretha", "Respect"),
            ("Otis", "Try a Little Tenderness"),
            ("Sam", "A Change Is Gonna Come"),
        ];
        for (artist, title) in songs {
            store.add(artist, title, "10", "").unwrap();
        }
        for (artist, title) in songs {
            store.remove(artist, title).unwrap();
        }

        assert_eq!(raw_file(&store), "Artist Name,Song Title,Rating,Description\n");
    }

    #[test]
    fn fields_with_commas_and_quotes_round_trip() {
        let (store, _tmp) = create_test_store();
        store
            .add(
                "Earth, Wind & Fire",
                "September",
                "10",
                "She said \"do you remember\", twice",
            )
            .unwrap();

        let entries = store.entries().unwrap();
        assert_eq!(entries[0].artist, "Earth, Wind & Fire");
        assert_eq!(
            entries[0].description,
            "She said \"do you remember\", twice"
        );

        let removed = store.remove("earth, wind & fire", "september").unwrap();
        assert_eq!(removed.title, "September");
        assert!(store.entries().unwrap().is_empty());
    }

    #[test]
    fn entries_on_absent_file_is_an_empty_store() {
        let (store, _tmp) = create_test_store();
        assert!(store.entries().unwrap().is_empty());
    }
}

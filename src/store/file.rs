use std::fs::{File, OpenOptions};
use std::path::Path;

use csv::{Reader, ReaderBuilder, Writer, WriterBuilder};

use super::error::StoreError;

/// File name used for the song store inside the working directory. Several
/// code paths (lazy creation, the removal rewrite, and tests) rely on the
/// exact same string, so it lives here as a constant.
pub(crate) const STORE_FILE_NAME: &str = "songs.csv";

/// Column header of the store file, fixed by the on-disk format. Written
/// explicitly rather than derived at write time so a rewrite that leaves zero
/// surviving rows still produces a header-only file.
pub(crate) const HEADER: [&str; 4] = ["Artist Name", "Song Title", "Rating", "Description"];

/// Open a writer positioned at the end of the store file, creating the file
/// and emitting the header row when it does not exist yet.
pub(crate) fn append_writer(path: &Path) -> Result<Writer<File>, StoreError> {
    let is_new = !path.exists();
    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|err| StoreError::Io(err.into()))?;

    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    if is_new {
        writer.write_record(HEADER)?;
    }
    Ok(writer)
}

/// Open a reader over the existing store file. The header row is consumed up
/// front so `deserialize` yields data rows only.
pub(crate) fn reader(path: &Path) -> Result<Reader<File>, StoreError> {
    let reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
    Ok(reader)
}

/// Open a writer that truncates the store file and re-emits the header. Used
/// by the removal rewrite, which replaces the whole file in one pass.
pub(crate) fn rewrite_writer(path: &Path) -> Result<Writer<File>, StoreError> {
    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(HEADER)?;
    Ok(writer)
}

//! Binary entry point that glues the CSV-backed song store to the TUI. The
//! bootstrapping pipeline is short: point the store at `songs.csv` in the
//! working directory, preload whatever is already saved, and drive the
//! Ratatui event loop until the user exits.
use song_sorter::{run_app, App, SongStore};

/// Open the store, load cached entries, and launch the Ratatui event loop.
///
/// Returning a `Result` bubbles up fatal initialization problems (for example
/// an unreadable `songs.csv`) to the terminal instead of crashing silently.
fn main() -> anyhow::Result<()> {
    let store = SongStore::open_default();
    let entries = store.entries()?;

    let mut app = App::new(store, entries);
    run_app(&mut app)
}

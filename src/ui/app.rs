use std::mem;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::models::SongEntry;
use crate::store::SongStore;

use super::forms::{AddField, AddSongForm, RemoveField, RemoveSongForm};
use super::helpers::{centered_rect, surface_error};
use super::screens::SongListScreen;

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// How long a footer message stays visible before the event-loop tick clears
/// it again.
const STATUS_TTL: Duration = Duration::from_secs(3);

/// Fine-grained input modes layered over the song list. Keeping this explicit
/// makes it easy to reason about which rendering path runs and what keyboard
/// shortcuts should do.
enum Mode {
    Normal,
    AddingSong(AddSongForm),
    RemovingSong(RemoveSongForm),
}

/// Holds the footer message text plus its severity and expiry.
struct StatusMessage {
    text: String,
    kind: StatusKind,
    expires_at: Instant,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. The store owns every
/// file access and all validation; this type owns the interactive state and
/// nothing else.
pub struct App {
    store: SongStore,
    list: SongListScreen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(store: SongStore, entries: Vec<SongEntry>) -> Self {
        Self {
            store,
            list: SongListScreen::new(entries),
            mode: Mode::Normal,
            status: None,
        }
    }

    /// Expire the footer message once its time is up. Called on every pass of
    /// the event loop, so messages fade out even when no keys are pressed.
    pub(crate) fn tick(&mut self) {
        if let Some(status) = &self.status {
            if Instant::now() >= status.expires_at {
                self.status = None;
            }
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingSong(form) => self.handle_add_song(code, form)?,
            Mode::RemovingSong(form) => self.handle_remove_song(code, form)?,
        };

        self.mode = mode;
        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
            }
            KeyCode::Up => self.list.move_selection(-1),
            KeyCode::Down => self.list.move_selection(1),
            KeyCode::PageUp => self.list.move_selection(-5),
            KeyCode::PageDown => self.list.move_selection(5),
            KeyCode::Home => self.list.select_first(),
            KeyCode::End => self.list.select_last(),
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('+') => {
                self.clear_status();
                return Ok(Mode::AddingSong(AddSongForm::default()));
            }
            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Char('-') => {
                self.clear_status();
                let form = match self.list.current_entry() {
                    Some(entry) => RemoveSongForm::from_entry(entry),
                    None => RemoveSongForm::default(),
                };
                return Ok(Mode::RemovingSong(form));
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_add_song(&mut self, code: KeyCode, mut form: AddSongForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Add song cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Left => {
                if form.active == AddField::Rating {
                    form.rating_previous();
                }
            }
            KeyCode::Right => {
                if form.active == AddField::Rating {
                    form.rating_next();
                }
            }
            KeyCode::Enter => match self.save_new_song(&form) {
                Ok(_) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::AddingSong(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn handle_remove_song(&mut self, code: KeyCode, mut form: RemoveSongForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Remove cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.perform_remove(&form) {
                Ok(_) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::RemovingSong(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn save_new_song(&mut self, form: &AddSongForm) -> Result<()> {
        let entry = self.store.add(
            &form.artist,
            &form.title,
            form.rating_label(),
            &form.description,
        )?;
        self.reload_entries()?;
        self.list.select_last();
        self.set_status(
            format!("Added '{}'.", entry.display_title()),
            StatusKind::Info,
        );
        Ok(())
    }

    fn perform_remove(&mut self, form: &RemoveSongForm) -> Result<()> {
        let removed = self.store.remove(&form.artist, &form.title)?;
        self.reload_entries()?;
        self.set_status(
            format!("Removed '{}'.", removed.display_title()),
            StatusKind::Info,
        );
        Ok(())
    }

    fn reload_entries(&mut self) -> Result<()> {
        let entries = self.store.entries()?;
        self.list.set_entries(entries);
        Ok(())
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        self.draw_song_list(frame, content_area);

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::AddingSong(form) => self.draw_add_form(frame, area, form),
            Mode::RemovingSong(form) => self.draw_remove_form(frame, area, form),
            Mode::Normal => {}
        }
    }

    fn draw_song_list(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Saved Songs");

        if self.list.entries.is_empty() {
            let message = Paragraph::new("No songs yet. Press 'a' to add one.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let items: Vec<ListItem> = self
            .list
            .entries
            .iter()
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::raw(entry.display_title()),
                    Span::styled(
                        format!("  {}/10", entry.rating),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::styled(
                        format!("  {}", entry.description),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        list_state.select(Some(self.list.selected));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match &self.mode {
            Mode::AddingSong(_) => Line::from(vec![
                Span::styled("[Tab]", key_style),
                Span::raw(" Next Field   "),
                Span::styled("[←→]", key_style),
                Span::raw(" Rating   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Save   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            Mode::RemovingSong(_) => Line::from(vec![
                Span::styled("[Tab]", key_style),
                Span::raw(" Switch Field   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Remove   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            Mode::Normal => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Select   "),
                Span::styled("[a]", key_style),
                Span::raw(" Add   "),
                Span::styled("[r]", key_style),
                Span::raw(" Remove   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
        }
    }

    fn draw_add_form(&self, frame: &mut Frame, area: Rect, form: &AddSongForm) {
        let popup_area = centered_rect(70, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add a Song").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let artist_line = form.build_line("Artist", AddField::Artist);
        let title_line = form.build_line("Title", AddField::Title);
        let rating_line = form.build_line("Rating", AddField::Rating);
        let description_line = form.build_line("Description", AddField::Description);

        let mut lines = vec![
            artist_line,
            title_line,
            rating_line,
            description_line,
            Line::from(""),
        ];

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Tab to switch • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let (cursor_x, cursor_y) = match form.active {
            AddField::Artist => {
                let prefix = "Artist: ".len() as u16;
                (
                    inner.x + prefix + form.value_len(AddField::Artist) as u16,
                    inner.y,
                )
            }
            AddField::Title => {
                let prefix = "Title: ".len() as u16;
                (
                    inner.x + prefix + form.value_len(AddField::Title) as u16,
                    inner.y + 1,
                )
            }
            AddField::Rating => {
                // Cursor sits after the "< " of the selector display.
                let prefix = "Rating: ".len() as u16 + 2;
                (
                    inner.x + prefix + form.value_len(AddField::Rating) as u16,
                    inner.y + 2,
                )
            }
            AddField::Description => {
                let prefix = "Description: ".len() as u16;
                (
                    inner.x + prefix + form.value_len(AddField::Description) as u16,
                    inner.y + 3,
                )
            }
        };
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    fn draw_remove_form(&self, frame: &mut Frame, area: Rect, form: &RemoveSongForm) {
        let popup_area = centered_rect(60, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Remove a Song")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let artist_line = form.build_line("Artist", RemoveField::Artist);
        let title_line = form.build_line("Title", RemoveField::Title);

        let mut lines = vec![artist_line, title_line, Line::from("")];

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to remove • Tab to switch • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let (cursor_x, cursor_y) = match form.active {
            RemoveField::Artist => {
                let prefix = "Artist: ".len() as u16;
                (
                    inner.x + prefix + form.value_len(RemoveField::Artist) as u16,
                    inner.y,
                )
            }
            RemoveField::Title => {
                let prefix = "Title: ".len() as u16;
                (
                    inner.x + prefix + form.value_len(RemoveField::Title) as u16,
                    inner.y + 1,
                )
            }
        };
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
            expires_at: Instant::now() + STATUS_TTL,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

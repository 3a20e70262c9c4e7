use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::SongEntry;

/// Rating labels offered by the selector, lowest to highest. The add form
/// starts on the first label, mirroring a combo box resting on its first
/// option.
pub(crate) const RATING_LABELS: &[&str] = &["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"];

/// Internal representation of the "add a song" form fields. The form holds
/// raw strings only; all validation happens in the store when the form is
/// submitted.
#[derive(Default, Clone)]
pub(crate) struct AddSongForm {
    pub(crate) artist: String,
    pub(crate) title: String,
    pub(crate) rating: usize,
    pub(crate) description: String,
    pub(crate) active: AddField,
    pub(crate) error: Option<String>,
}

/// Fields available within the add form.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum AddField {
    Artist,
    Title,
    Rating,
    Description,
}

impl Default for AddField {
    fn default() -> Self {
        AddField::Artist
    }
}

impl AddSongForm {
    /// Label currently picked in the rating selector.
    pub(crate) fn rating_label(&self) -> &'static str {
        RATING_LABELS[self.rating]
    }

    /// Cycle focus across the four fields.
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            AddField::Artist => AddField::Title,
            AddField::Title => AddField::Rating,
            AddField::Rating => AddField::Description,
            AddField::Description => AddField::Artist,
        };
    }

    /// Insert a character into the active field. The rating field is a
    /// selector and ignores typed characters.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            AddField::Artist => self.artist.push(ch),
            AddField::Title => self.title.push(ch),
            AddField::Rating => return false,
            AddField::Description => self.description.push(ch),
        }
        true
    }

    /// Remove a character from the active field.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            AddField::Artist => {
                self.artist.pop();
            }
            AddField::Title => {
                self.title.pop();
            }
            AddField::Rating => {}
            AddField::Description => {
                self.description.pop();
            }
        }
    }

    /// Move the rating selector forward, wrapping past the last label.
    pub(crate) fn rating_next(&mut self) {
        self.rating = (self.rating + 1) % RATING_LABELS.len();
    }

    /// Move the rating selector backward, wrapping past the first label.
    pub(crate) fn rating_previous(&mut self) {
        self.rating = self
            .rating
            .checked_sub(1)
            .unwrap_or(RATING_LABELS.len() - 1);
    }

    /// Render a styled line for the modal form.
    pub(crate) fn build_line(&self, field_name: &str, field: AddField) -> Line<'static> {
        let is_active = self.active == field;

        if field == AddField::Rating {
            let style = if is_active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            return Line::from(vec![
                Span::raw(format!("{field_name}: ")),
                Span::styled(format!("< {} >", self.rating_label()), style),
            ]);
        }

        let (value, placeholder) = match field {
            AddField::Artist => (&self.artist, "<required>"),
            AddField::Title => (&self.title, "<required>"),
            AddField::Description => (&self.description, "<optional>"),
            AddField::Rating => unreachable!(),
        };

        let display = if value.is_empty() {
            placeholder.to_string()
        } else {
            value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, style),
        ])
    }

    /// Character count for the requested field, used to place the cursor.
    pub(crate) fn value_len(&self, field: AddField) -> usize {
        match field {
            AddField::Artist => self.artist.chars().count(),
            AddField::Title => self.title.chars().count(),
            AddField::Rating => self.rating_label().chars().count(),
            AddField::Description => self.description.chars().count(),
        }
    }
}

/// Form state for removing a song by its identity pair.
#[derive(Default, Clone)]
pub(crate) struct RemoveSongForm {
    pub(crate) artist: String,
    pub(crate) title: String,
    pub(crate) active: RemoveField,
    pub(crate) error: Option<String>,
}

/// Fields available within the remove form.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum RemoveField {
    Artist,
    Title,
}

impl Default for RemoveField {
    fn default() -> Self {
        RemoveField::Artist
    }
}

impl RemoveSongForm {
    /// Seed the form from the entry highlighted in the list, so removing the
    /// selected song does not require retyping its identity.
    pub(crate) fn from_entry(entry: &SongEntry) -> Self {
        Self {
            artist: entry.artist.clone(),
            title: entry.title.clone(),
            active: RemoveField::Artist,
            error: None,
        }
    }

    /// Swap focus between the artist and title fields.
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            RemoveField::Artist => RemoveField::Title,
            RemoveField::Title => RemoveField::Artist,
        };
    }

    /// Insert a character into the active field.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            RemoveField::Artist => self.artist.push(ch),
            RemoveField::Title => self.title.push(ch),
        }
        true
    }

    /// Remove a character from the active field.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            RemoveField::Artist => {
                self.artist.pop();
            }
            RemoveField::Title => {
                self.title.pop();
            }
        }
    }

    /// Render a styled line for the modal form.
    pub(crate) fn build_line(&self, field_name: &str, field: RemoveField) -> Line<'static> {
        let (value, is_active) = match field {
            RemoveField::Artist => (&self.artist, self.active == RemoveField::Artist),
            RemoveField::Title => (&self.title, self.active == RemoveField::Title),
        };

        let display = if value.is_empty() {
            "<required>".to_string()
        } else {
            value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, style),
        ])
    }

    /// Character count for the requested field, used to place the cursor.
    pub(crate) fn value_len(&self, field: RemoveField) -> usize {
        match field {
            RemoveField::Artist => self.artist.chars().count(),
            RemoveField::Title => self.title.chars().count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_form_cycles_through_all_four_fields() {
        let mut form = AddSongForm::default();
        assert_eq!(form.active, AddField::Artist);
        form.toggle_field();
        assert_eq!(form.active, AddField::Title);
        form.toggle_field();
        assert_eq!(form.active, AddField::Rating);
        form.toggle_field();
        assert_eq!(form.active, AddField::Description);
        form.toggle_field();
        assert_eq!(form.active, AddField::Artist);
    }

    #[test]
    fn add_form_rejects_control_characters_and_typing_into_the_selector() {
        let mut form = AddSongForm::default();
        assert!(!form.push_char('\t'));
        assert!(form.push_char('A'));
        assert_eq!(form.artist, "A");

        form.active = AddField::Rating;
        assert!(!form.push_char('5'));
    }

    #[test]
    fn rating_selector_wraps_both_ways() {
        let mut form = AddSongForm::default();
        assert_eq!(form.rating_label(), "1");
        form.rating_previous();
        assert_eq!(form.rating_label(), "10");
        form.rating_next();
        assert_eq!(form.rating_label(), "1");
    }

    #[test]
    fn backspace_on_the_selector_is_a_no_op() {
        let mut form = AddSongForm::default();
        form.active = AddField::Rating;
        form.rating_next();
        form.backspace();
        assert_eq!(form.rating_label(), "2");
    }

    #[test]
    fn remove_form_prefills_from_the_selected_entry() {
        let entry = SongEntry {
            artist: "Aretha".to_string(),
            title: "Respect".to_string(),
            rating: "10".to_string(),
            description: "Classic".to_string(),
        };
        let form = RemoveSongForm::from_entry(&entry);
        assert_eq!(form.artist, "Aretha");
        assert_eq!(form.title, "Respect");
    }
}

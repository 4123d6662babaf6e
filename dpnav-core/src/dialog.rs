//! Modal text prompt that owns keystroke routing while open.

use crate::keys::KeyCode;

/// Glyph echoed in place of each character of a masked answer.
pub const MASK_GLYPH: char = '*';

/// What the answer will be used for once submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogKind {
    /// Password for the named appliance.
    CredentialPrompt { appliance: String },
}

/// Result of feeding one key to the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogStep {
    Continue,
    /// The dialog closed; `Some` carries a non-empty submitted answer.
    Closed(Option<String>),
}

/// Render-side copy of an open dialog, already masked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogView {
    pub prompt: String,
    pub answer: String,
    /// Cursor position in characters.
    pub cursor: usize,
}

#[derive(Debug, Clone)]
pub struct DialogSession {
    pub kind: DialogKind,
    pub prompt: String,
    answer: Vec<char>,
    cursor: usize,
    pub masked: bool,
}

impl DialogSession {
    pub fn credential_prompt(appliance: &str) -> Self {
        Self {
            kind: DialogKind::CredentialPrompt { appliance: appliance.to_owned() },
            prompt: format!("Password for appliance '{appliance}':"),
            answer: Vec::new(),
            cursor: 0,
            masked: true,
        }
    }

    pub fn answer(&self) -> String {
        self.answer.iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn handle_key(&mut self, key: KeyCode) -> DialogStep {
        match key {
            KeyCode::Char(c) if !c.is_control() => {
                self.answer.insert(self.cursor, c);
                self.cursor += 1;
            }
            KeyCode::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                self.answer.remove(self.cursor);
            }
            KeyCode::Delete if self.cursor < self.answer.len() => {
                self.answer.remove(self.cursor);
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.answer.len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.answer.len(),
            KeyCode::Esc | KeyCode::CtrlC => {
                self.answer.clear();
                return DialogStep::Closed(None);
            }
            KeyCode::Enter => {
                let answer = std::mem::take(&mut self.answer);
                let submitted = (!answer.is_empty()).then(|| answer.into_iter().collect());
                return DialogStep::Closed(submitted);
            }
            _ => {}
        }
        DialogStep::Continue
    }

    pub fn view(&self) -> DialogView {
        let answer = if self.masked {
            std::iter::repeat_n(MASK_GLYPH, self.answer.len()).collect()
        } else {
            self.answer()
        };
        DialogView { prompt: self.prompt.clone(), answer, cursor: self.cursor }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(dialog: &mut DialogSession, text: &str) {
        for c in text.chars() {
            assert_eq!(dialog.handle_key(KeyCode::Char(c)), DialogStep::Continue);
        }
    }

    #[test]
    fn backspace_removes_one_character_not_one_byte() {
        let mut d = DialogSession::credential_prompt("dev");
        typed(&mut d, "ž");
        d.handle_key(KeyCode::Backspace);
        assert_eq!(d.answer(), "");
        assert_eq!(d.cursor(), 0);
        d.handle_key(KeyCode::Backspace);
        assert_eq!(d.cursor(), 0);
    }

    #[test]
    fn editing_in_the_middle() {
        let mut d = DialogSession::credential_prompt("dev");
        typed(&mut d, "sect");
        d.handle_key(KeyCode::Left);
        d.handle_key(KeyCode::Left);
        typed(&mut d, "cr");
        assert_eq!(d.answer(), "secrct");
        d.handle_key(KeyCode::Delete);
        d.handle_key(KeyCode::Home);
        d.handle_key(KeyCode::Delete);
        assert_eq!(d.answer(), "ecrt");
        d.handle_key(KeyCode::End);
        d.handle_key(KeyCode::Delete);
        d.handle_key(KeyCode::Right);
        assert_eq!(d.cursor(), 4);
    }

    #[test]
    fn mask_counts_characters() {
        let mut d = DialogSession::credential_prompt("dev");
        typed(&mut d, "pässwörd");
        let view = d.view();
        assert_eq!(view.answer, "********");
        assert_eq!(view.cursor, 8);
    }

    #[test]
    fn enter_submits_and_escape_discards() {
        let mut d = DialogSession::credential_prompt("dev");
        typed(&mut d, "secret");
        assert_eq!(d.handle_key(KeyCode::Enter), DialogStep::Closed(Some("secret".into())));

        let mut d = DialogSession::credential_prompt("dev");
        assert_eq!(d.handle_key(KeyCode::Enter), DialogStep::Closed(None));

        let mut d = DialogSession::credential_prompt("dev");
        typed(&mut d, "oops");
        assert_eq!(d.handle_key(KeyCode::Esc), DialogStep::Closed(None));
        assert_eq!(d.answer(), "");
    }
}

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NamedKey {
    Enter,
    Backspace,
    Other,
}

/// a key event split into the character it produced and the key it names.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub produced: Option<char>,
    pub key: Option<NamedKey>,
}

impl From<KeyEvent> for KeyPress {
    fn from(event: KeyEvent) -> Self {
        // AltGr arrives as CONTROL | ALT and still produces a character
        let control = event.modifiers.contains(KeyModifiers::CONTROL)
            != event.modifiers.contains(KeyModifiers::ALT);

        match event.code {
            KeyCode::Char(ch) if !control => KeyPress {
                produced: Some(ch),
                key: None,
            },
            KeyCode::Enter => KeyPress {
                produced: None,
                key: Some(NamedKey::Enter),
            },
            KeyCode::Backspace => KeyPress {
                produced: None,
                key: Some(NamedKey::Backspace),
            },
            _ => KeyPress {
                produced: None,
                key: Some(NamedKey::Other),
            },
        }
    }
}

/// a line committed from the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    Message(String),
    /// command text without the leading `/`
    Command(String),
}

impl UserInput {
    #[cfg(test)]
    pub fn text(&self) -> &str {
        match self {
            UserInput::Message(text) | UserInput::Command(text) => text,
        }
    }
}

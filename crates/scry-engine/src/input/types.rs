use std::fmt;

/// Keys the console tooling reacts to. Everything else is `Other` with the
/// platform code, and printable input also arrives as [`InputEvent::Text`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Backspace,
    Other(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Committed text, already filtered of control characters.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEvent {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    ModifiersChanged(Modifiers),

    Key {
        key: Key,
        state: KeyState,
        modifiers: Modifiers,
        repeat: bool,
    },

    Text(TextEvent),

    Focused(bool),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Other(code) => write!(f, "key#{code}"),
            k => write!(f, "{k:?}"),
        }
    }
}

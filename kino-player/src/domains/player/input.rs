//! Keyboard shortcut routing for the watch page.
//!
//! The whole policy lives here: which widgets swallow keys, which modifier
//! combinations are left to the host, and which key maps to which command.

/// Widget that currently holds keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FocusTarget {
    #[default]
    Document,
    Player,
    Button,
    Slider,
    TextInput,
    TextArea,
    ContentEditable,
}

impl FocusTarget {
    /// Text-entry widgets keep their keystrokes.
    pub fn accepts_shortcuts(self) -> bool {
        !matches!(
            self,
            FocusTarget::TextInput
                | FocusTarget::TextArea
                | FocusTarget::ContentEditable
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Escape,
    Enter,
    Tab,
    Character(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };

    /// Ctrl/Alt/Meta chords belong to the host (browser, window manager).
    pub fn is_chord(self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// Commands the keyboard, pointer and on-screen controls can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerCommand {
    TogglePlay,
    SkipBackward,
    SkipForward,
    VolumeUp,
    VolumeDown,
    ToggleFullscreen,
    ToggleMute,
    CloseSettings,
}

impl PlayerCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::TogglePlay => "Player::TogglePlay",
            Self::SkipBackward => "Player::SkipBackward",
            Self::SkipForward => "Player::SkipForward",
            Self::VolumeUp => "Player::VolumeUp",
            Self::VolumeDown => "Player::VolumeDown",
            Self::ToggleFullscreen => "Player::ToggleFullscreen",
            Self::ToggleMute => "Player::ToggleMute",
            Self::CloseSettings => "Player::CloseSettings",
        }
    }
}

/// Map a key press to a player command.
///
/// `None` means the key is not ours and the host keeps its default action.
/// Any `Some` result should have its default action (page scroll, button
/// activation) suppressed by the host.
pub fn route_key(
    key: Key,
    modifiers: Modifiers,
    focus: FocusTarget,
) -> Option<PlayerCommand> {
    if !focus.accepts_shortcuts() || modifiers.is_chord() {
        return None;
    }

    let command = match key {
        Key::Space => PlayerCommand::TogglePlay,
        Key::ArrowLeft => PlayerCommand::SkipBackward,
        Key::ArrowRight => PlayerCommand::SkipForward,
        Key::ArrowUp => PlayerCommand::VolumeUp,
        Key::ArrowDown => PlayerCommand::VolumeDown,
        Key::Escape => PlayerCommand::CloseSettings,
        Key::Character(ch) => match ch.to_ascii_lowercase() {
            ' ' | 'k' => PlayerCommand::TogglePlay,
            'j' => PlayerCommand::SkipBackward,
            'l' => PlayerCommand::SkipForward,
            'f' => PlayerCommand::ToggleFullscreen,
            'm' => PlayerCommand::ToggleMute,
            _ => return None,
        },
        Key::Enter | Key::Tab => return None,
    };

    Some(command)
}

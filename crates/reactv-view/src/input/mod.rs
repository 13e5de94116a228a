//! Hardware remote-control input.
//!
//! Remote keys are translated into named framework events through two static
//! tables: [`action_name`] for ordinary presses and [`long_press_name`] for
//! keys that support long presses. [`HwInputRouter`] applies the long-press
//! rules and emits [`HwKeyEvent`]s.

mod router;

pub use router::{HwInputRouter, HwKeyEvent};

/// A host key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCode(pub i32);

impl KeyCode {
    pub const DPAD_UP: KeyCode = KeyCode(19);
    pub const DPAD_DOWN: KeyCode = KeyCode(20);
    pub const DPAD_LEFT: KeyCode = KeyCode(21);
    pub const DPAD_RIGHT: KeyCode = KeyCode(22);
    pub const DPAD_CENTER: KeyCode = KeyCode(23);
    pub const ENTER: KeyCode = KeyCode(66);
    pub const NUMPAD_ENTER: KeyCode = KeyCode(160);
    pub const BUTTON_SELECT: KeyCode = KeyCode(109);
    pub const SPACE: KeyCode = KeyCode(62);
    pub const TAB: KeyCode = KeyCode(61);
    pub const MENU: KeyCode = KeyCode(82);

    pub const MEDIA_PLAY_PAUSE: KeyCode = KeyCode(85);
    pub const MEDIA_STOP: KeyCode = KeyCode(86);
    pub const MEDIA_NEXT: KeyCode = KeyCode(87);
    pub const MEDIA_PREVIOUS: KeyCode = KeyCode(88);
    pub const MEDIA_REWIND: KeyCode = KeyCode(89);
    pub const MEDIA_FAST_FORWARD: KeyCode = KeyCode(90);
    pub const MEDIA_PLAY: KeyCode = KeyCode(126);
    pub const MEDIA_PAUSE: KeyCode = KeyCode(127);
    pub const MEDIA_RECORD: KeyCode = KeyCode(130);

    pub const DIGIT_0: KeyCode = KeyCode(7);
    pub const DIGIT_9: KeyCode = KeyCode(16);

    pub const CHANNEL_UP: KeyCode = KeyCode(166);
    pub const CHANNEL_DOWN: KeyCode = KeyCode(167);
    pub const INFO: KeyCode = KeyCode(165);
    pub const GUIDE: KeyCode = KeyCode(172);
    pub const DVR: KeyCode = KeyCode(173);
    pub const BOOKMARK: KeyCode = KeyCode(174);
    pub const CAPTIONS: KeyCode = KeyCode(175);
    pub const TV: KeyCode = KeyCode(170);
    pub const WINDOW: KeyCode = KeyCode(171);
    pub const TV_INPUT: KeyCode = KeyCode(178);
    pub const STB_POWER: KeyCode = KeyCode(179);
    pub const STB_INPUT: KeyCode = KeyCode(180);
    pub const AVR_POWER: KeyCode = KeyCode(181);
    pub const AVR_INPUT: KeyCode = KeyCode(182);
    pub const PROG_RED: KeyCode = KeyCode(183);
    pub const PROG_GREEN: KeyCode = KeyCode(184);
    pub const PROG_YELLOW: KeyCode = KeyCode(185);
    pub const PROG_BLUE: KeyCode = KeyCode(186);
    pub const TV_TELETEXT: KeyCode = KeyCode(233);

    /// Keys tracked for long-press select. Space maps to `select` but is
    /// not one of them.
    pub fn is_select(self) -> bool {
        matches!(
            self,
            KeyCode::DPAD_CENTER | KeyCode::BUTTON_SELECT | KeyCode::ENTER | KeyCode::NUMPAD_ENTER
        )
    }

    /// The four D-pad arrow keys.
    pub fn is_dpad(self) -> bool {
        matches!(
            self,
            KeyCode::DPAD_UP | KeyCode::DPAD_DOWN | KeyCode::DPAD_LEFT | KeyCode::DPAD_RIGHT
        )
    }
}

/// Whether the key went down or came up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Down,
    Up,
}

impl KeyAction {
    /// Numeric action sent with remote key events (0 down, 1 up).
    pub const fn as_i32(self) -> i32 {
        match self {
            KeyAction::Down => 0,
            KeyAction::Up => 1,
        }
    }
}

/// A key event delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub action: KeyAction,
    /// Auto-repeat count; zero for the initial down.
    pub repeat_count: u32,
    /// Host event time in milliseconds.
    pub event_time_ms: u64,
}

impl KeyEvent {
    pub fn new(code: KeyCode, action: KeyAction, event_time_ms: u64) -> Self {
        Self {
            code,
            action,
            repeat_count: 0,
            event_time_ms,
        }
    }

    pub fn down(code: KeyCode, event_time_ms: u64) -> Self {
        Self::new(code, KeyAction::Down, event_time_ms)
    }

    pub fn up(code: KeyCode, event_time_ms: u64) -> Self {
        Self::new(code, KeyAction::Up, event_time_ms)
    }

    pub fn with_repeat_count(mut self, repeat_count: u32) -> Self {
        self.repeat_count = repeat_count;
        self
    }
}

static KEY_EVENT_ACTIONS: &[(KeyCode, &str)] = &[
    (KeyCode::DPAD_CENTER, "select"),
    (KeyCode::BUTTON_SELECT, "select"),
    (KeyCode::SPACE, "select"),
    (KeyCode::ENTER, "select"),
    (KeyCode::NUMPAD_ENTER, "select"),
    (KeyCode::MEDIA_PLAY_PAUSE, "playPause"),
    (KeyCode::MEDIA_PLAY, "play"),
    (KeyCode::MEDIA_PAUSE, "pause"),
    (KeyCode::MEDIA_NEXT, "next"),
    (KeyCode::MEDIA_PREVIOUS, "previous"),
    (KeyCode::MEDIA_REWIND, "rewind"),
    (KeyCode::MEDIA_FAST_FORWARD, "fastForward"),
    (KeyCode::MEDIA_RECORD, "record"),
    (KeyCode::MEDIA_STOP, "stop"),
    (KeyCode::DPAD_UP, "up"),
    (KeyCode::DPAD_RIGHT, "right"),
    (KeyCode::DPAD_DOWN, "down"),
    (KeyCode::DPAD_LEFT, "left"),
    (KeyCode::INFO, "info"),
    (KeyCode::CAPTIONS, "captions"),
    (KeyCode::MENU, "menu"),
    (KeyCode(7), "0"),
    (KeyCode(8), "1"),
    (KeyCode(9), "2"),
    (KeyCode(10), "3"),
    (KeyCode(11), "4"),
    (KeyCode(12), "5"),
    (KeyCode(13), "6"),
    (KeyCode(14), "7"),
    (KeyCode(15), "8"),
    (KeyCode(16), "9"),
    (KeyCode::CHANNEL_UP, "channelUp"),
    (KeyCode::CHANNEL_DOWN, "channelDown"),
    (KeyCode::BOOKMARK, "bookmark"),
    (KeyCode::AVR_INPUT, "avrInput"),
    (KeyCode::AVR_POWER, "avrPower"),
    (KeyCode::DVR, "dvr"),
    (KeyCode::GUIDE, "guide"),
    (KeyCode::PROG_RED, "red"),
    (KeyCode::PROG_GREEN, "green"),
    (KeyCode::PROG_YELLOW, "yellow"),
    (KeyCode::PROG_BLUE, "blue"),
    (KeyCode::STB_INPUT, "stbInput"),
    (KeyCode::STB_POWER, "stbPower"),
    (KeyCode::TV, "tv"),
    (KeyCode::TV_INPUT, "tvInput"),
    (KeyCode::WINDOW, "window"),
    (KeyCode::TV_TELETEXT, "teletext"),
    (KeyCode::TAB, "tab"),
];

static LONG_PRESS_ACTIONS: &[(KeyCode, &str)] = &[
    (KeyCode::DPAD_CENTER, "longSelect"),
    (KeyCode::BUTTON_SELECT, "longSelect"),
    (KeyCode::SPACE, "longSelect"),
    (KeyCode::ENTER, "longSelect"),
    (KeyCode::NUMPAD_ENTER, "longSelect"),
    (KeyCode::DPAD_UP, "longUp"),
    (KeyCode::DPAD_RIGHT, "longRight"),
    (KeyCode::DPAD_DOWN, "longDown"),
    (KeyCode::DPAD_LEFT, "longLeft"),
    (KeyCode::MEDIA_PLAY_PAUSE, "longPlayPause"),
    (KeyCode::MEDIA_REWIND, "longRewind"),
    (KeyCode::MEDIA_FAST_FORWARD, "longFastForward"),
    (KeyCode::CHANNEL_DOWN, "longChannelDown"),
    (KeyCode::CHANNEL_UP, "longChannelUp"),
];

fn lookup(table: &[(KeyCode, &'static str)], code: KeyCode) -> Option<&'static str> {
    table.iter().find(|(c, _)| *c == code).map(|&(_, name)| name)
}

/// Event name for an ordinary press of `code`.
pub fn action_name(code: KeyCode) -> Option<&'static str> {
    lookup(KEY_EVENT_ACTIONS, code)
}

/// Event name for a long press of `code`, if the key supports long presses.
pub fn long_press_name(code: KeyCode) -> Option<&'static str> {
    lookup(LONG_PRESS_ACTIONS, code)
}

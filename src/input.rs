//! Keys and prefix handling
//!
//! A [`Key`] packs a character or special key code together with modifier
//! bits so bindings live in a flat map. ESC and C-x are prefixes that fold
//! into the key typed after them.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Key modifier flags
pub mod key_flags {
    pub const CONTROL: u32 = 0x1000_0000;
    pub const META: u32 = 0x2000_0000;
    pub const CTLX: u32 = 0x4000_0000;
    pub const SPEC: u32 = 0x8000_0000;
    pub const MASK: u32 = 0xF000_0000;
}

/// Codes for keys that carry no character
pub mod special {
    pub const HOME: u32 = 0x47;
    pub const UP: u32 = 0x48;
    pub const PAGE_UP: u32 = 0x49;
    pub const LEFT: u32 = 0x4b;
    pub const RIGHT: u32 = 0x4d;
    pub const END: u32 = 0x4f;
    pub const DOWN: u32 = 0x50;
    pub const PAGE_DOWN: u32 = 0x51;
    pub const DELETE: u32 = 0x53;

    pub(super) const NAMES: [(u32, &str); 9] = [
        (HOME, "Home"),
        (UP, "Up"),
        (PAGE_UP, "PageUp"),
        (LEFT, "Left"),
        (RIGHT, "Right"),
        (END, "End"),
        (DOWN, "Down"),
        (PAGE_DOWN, "PageDown"),
        (DELETE, "Delete"),
    ];
}

/// Backspace / DEL
pub const DEL: u32 = 0x7f;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key(pub u32);

impl Key {
    pub fn char(ch: char) -> Self {
        Key(ch as u32)
    }

    /// `ch` with modifier `flags`; letters are folded to lower case
    fn modified(flags: u32, ch: char) -> Self {
        Key(flags | ch.to_ascii_lowercase() as u32)
    }

    pub fn ctrl(ch: char) -> Self {
        Self::modified(key_flags::CONTROL, ch)
    }

    pub fn meta(ch: char) -> Self {
        Self::modified(key_flags::META, ch)
    }

    pub fn ctlx(ch: char) -> Self {
        Self::modified(key_flags::CTLX, ch)
    }

    pub fn ctlx_ctrl(ch: char) -> Self {
        Self::modified(key_flags::CTLX | key_flags::CONTROL, ch)
    }

    /// One of the [`special`] codes
    pub fn special(code: u32) -> Self {
        Key(key_flags::SPEC | code)
    }

    pub fn backspace() -> Self {
        Key(DEL)
    }

    pub fn meta_backspace() -> Self {
        Key(key_flags::META | DEL)
    }

    /// Raw code used as the binding table key
    pub fn code(&self) -> u32 {
        self.0
    }

    fn has(&self, flag: u32) -> bool {
        self.0 & flag != 0
    }

    /// The key without its modifiers
    pub fn base_char(&self) -> Option<char> {
        char::from_u32(self.0 & !key_flags::MASK)
    }

    /// Printable, unmodified characters insert themselves
    pub fn is_self_insert(&self) -> bool {
        self.0 & key_flags::MASK == 0
            && self.base_char().is_some_and(|ch| ch >= ' ' && ch != '\x7f')
    }

    /// Emacs-style name, e.g. `C-x C-s` or `M-Backspace`
    pub fn display_name(&self) -> String {
        let mut name = String::new();
        for (flag, prefix) in [
            (key_flags::CTLX, "C-x "),
            (key_flags::META, "M-"),
            (key_flags::CONTROL, "C-"),
        ] {
            if self.has(flag) {
                name.push_str(prefix);
            }
        }

        let base = self.0 & !key_flags::MASK;
        if self.has(key_flags::SPEC) {
            match special::NAMES.iter().find(|(code, _)| *code == base) {
                Some((_, label)) => name.push_str(label),
                None => name.push_str(&format!("special-0x{:02x}", base)),
            }
            return name;
        }

        match base {
            DEL => name.push_str("Backspace"),
            0x20 => name.push_str("SPC"),
            _ => match char::from_u32(base) {
                Some(ch) => name.push(ch),
                None => name.push_str(&format!("0x{:x}", base)),
            },
        }
        name
    }
}

/// Prefix key waiting for its continuation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Prefix {
    #[default]
    None,
    Meta,
    CtlX,
}

/// Turns terminal key events into [`Key`]s, tracking ESC and C-x prefixes
#[derive(Debug, Default)]
pub struct InputState {
    prefix: Prefix,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ctlx_pending(&self) -> bool {
        self.prefix == Prefix::CtlX
    }

    pub fn is_meta_pending(&self) -> bool {
        self.prefix == Prefix::Meta
    }

    /// Translate a key event. Returns `None` for releases, unknown keys and
    /// prefix keys.
    pub fn translate_key(&mut self, event: KeyEvent) -> Option<Key> {
        // Windows also reports releases
        if event.kind != KeyEventKind::Press {
            return None;
        }
        let KeyEvent {
            code, modifiers, ..
        } = event;

        match std::mem::take(&mut self.prefix) {
            Prefix::Meta => return translate(code, modifiers).map(|k| Key(k.0 | key_flags::META)),
            Prefix::CtlX => return translate_ctlx(code, modifiers),
            Prefix::None => {}
        }

        match code {
            KeyCode::Esc => {
                self.prefix = Prefix::Meta;
                None
            }
            KeyCode::Char('x') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.prefix = Prefix::CtlX;
                None
            }
            _ => translate(code, modifiers),
        }
    }
}

fn modifier_flags(modifiers: KeyModifiers) -> u32 {
    let mut flags = 0;
    if modifiers.contains(KeyModifiers::CONTROL) {
        flags |= key_flags::CONTROL;
    }
    if modifiers.contains(KeyModifiers::ALT) {
        flags |= key_flags::META;
    }
    flags
}

fn special_code(code: KeyCode) -> Option<u32> {
    let code = match code {
        KeyCode::Home => special::HOME,
        KeyCode::Up => special::UP,
        KeyCode::PageUp => special::PAGE_UP,
        KeyCode::Left => special::LEFT,
        KeyCode::Right => special::RIGHT,
        KeyCode::End => special::END,
        KeyCode::Down => special::DOWN,
        KeyCode::PageDown => special::PAGE_DOWN,
        KeyCode::Delete => special::DELETE,
        _ => return None,
    };
    Some(code)
}

fn translate(code: KeyCode, modifiers: KeyModifiers) -> Option<Key> {
    let flags = modifier_flags(modifiers);
    let key = match code {
        KeyCode::Char(ch) if flags == 0 => Key::char(ch),
        KeyCode::Char(ch) => Key::modified(flags, ch),
        KeyCode::Enter => Key::ctrl('m'),
        KeyCode::Tab => Key::ctrl('i'),
        // Alt+Backspace is M-Backspace; Ctrl is ignored
        KeyCode::Backspace => Key((flags & key_flags::META) | DEL),
        KeyCode::Esc => Key::ctrl('['),
        other => Key::special(special_code(other)?),
    };
    Some(key)
}

fn translate_ctlx(code: KeyCode, modifiers: KeyModifiers) -> Option<Key> {
    match code {
        KeyCode::Char(ch) => Some(Key::modified(
            key_flags::CTLX | modifier_flags(modifiers),
            ch,
        )),
        _ => translate(code, modifiers).map(|k| Key(k.0 | key_flags::CTLX)),
    }
}

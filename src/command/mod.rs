//! Command dispatch system
//!
//! This module provides the key binding table and command implementations.
//! Commands are organized into submodules by category.

mod editing;
mod files;
mod indent;
mod misc;
mod navigation;

use std::collections::HashMap;

use crate::editor::EditorState;
use crate::error::Result;
use crate::input::{special, Key};

/// Command result status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    Failure,
    Abort,
}

/// Command function signature
/// - editor: mutable reference to editor state
/// - f: true if numeric argument was provided
/// - n: numeric argument (repeat count, default 1)
pub type CommandFn = fn(&mut EditorState, bool, i32) -> Result<CommandStatus>;

/// Key binding entry with command function and name
struct BindingEntry {
    function: CommandFn,
    name: &'static str,
}

/// Key binding table
pub struct KeyTable {
    bindings: HashMap<u32, BindingEntry>,
}

impl KeyTable {
    /// Create an empty key table
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Create key table with default bindings
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.setup_defaults();
        table
    }

    /// Add a key binding with command name
    pub fn bind_named(&mut self, key: Key, cmd: CommandFn, name: &'static str) {
        self.bindings.insert(key.code(), BindingEntry { function: cmd, name });
    }

    /// Look up a command for a key
    pub fn lookup(&self, key: Key) -> Option<CommandFn> {
        self.bindings.get(&key.code()).map(|e| e.function)
    }

    /// Look up a command name for a key
    pub fn lookup_name(&self, key: Key) -> Option<&'static str> {
        self.bindings.get(&key.code()).map(|e| e.name)
    }

    /// Point RET and M-Backspace at the clean indent commands, or back at
    /// the plain ones
    pub fn bind_clean_indent(&mut self, enabled: bool) {
        if enabled {
            self.bind_named(
                Key::ctrl('m'),
                indent::clean_newline,
                "clean-aindent-newline",
            );
            self.bind_named(
                Key::meta_backspace(),
                indent::unindent_backward,
                "clean-aindent-unindent",
            );
        } else {
            self.bind_named(Key::ctrl('m'), editing::newline, "newline");
            self.bind_named(
                Key::meta_backspace(),
                editing::backward_kill_word,
                "backward-kill-word",
            );
        }
    }

    /// Set up default key bindings
    fn setup_defaults(&mut self) {
        use editing::*;
        use files::*;
        use indent::*;
        use misc::*;
        use navigation::*;

        // Basic cursor movement
        self.bind_named(Key::ctrl('f'), forward_char, "forward-char");
        self.bind_named(Key::ctrl('b'), backward_char, "backward-char");
        self.bind_named(Key::ctrl('n'), next_line, "next-line");
        self.bind_named(Key::ctrl('p'), previous_line, "previous-line");
        self.bind_named(Key::ctrl('a'), beginning_of_line, "beginning-of-line");
        self.bind_named(Key::ctrl('e'), end_of_line, "end-of-line");
        self.bind_named(Key::meta('m'), back_to_indentation, "back-to-indentation");
        self.bind_named(Key::meta('<'), beginning_of_buffer, "beginning-of-buffer");
        self.bind_named(Key::meta('>'), end_of_buffer, "end-of-buffer");

        // Arrow keys (special keys)
        self.bind_named(Key::special(special::RIGHT), forward_char, "forward-char");
        self.bind_named(Key::special(special::LEFT), backward_char, "backward-char");
        self.bind_named(Key::special(special::DOWN), next_line, "next-line");
        self.bind_named(Key::special(special::UP), previous_line, "previous-line");
        self.bind_named(Key::special(special::HOME), beginning_of_line, "beginning-of-line");
        self.bind_named(Key::special(special::END), end_of_line, "end-of-line");

        // Editing
        self.bind_named(Key::ctrl('d'), delete_char_forward, "delete-char");
        self.bind_named(Key::special(special::DELETE), delete_char_forward, "delete-char");
        self.bind_named(Key::backspace(), delete_char_backward, "delete-backward-char");
        self.bind_named(Key::ctrl('h'), delete_char_backward, "delete-backward-char");
        self.bind_named(Key::meta('d'), kill_word, "kill-word");
        self.bind_named(Key::ctrl('j'), indent_newline, "newline-and-indent");
        self.bind_named(Key::ctrl('i'), insert_tab, "tab-to-tab-stop");

        // RET and M-Backspace start out plain; the editor rebinds them when
        // the mode is switched on
        self.bind_clean_indent(false);

        // Mode switches
        self.bind_named(Key::ctlx('m'), toggle_clean_indent, "clean-aindent-mode");
        self.bind_named(Key::ctlx('s'), toggle_simple_indent, "clean-aindent-toggle-simple");

        // Files
        self.bind_named(Key::ctlx_ctrl('s'), save_buffer, "save-buffer");

        // Screen, abort, quit
        self.bind_named(Key::ctrl('l'), redraw_display, "redraw-display");
        self.bind_named(Key::ctrl('g'), abort, "keyboard-quit");
        self.bind_named(Key::ctlx_ctrl('c'), quit, "save-buffers-kill-emacs");
    }
}

impl Default for KeyTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_indent_rebinding() {
        let mut table = KeyTable::with_defaults();
        assert_eq!(table.lookup_name(Key::ctrl('m')), Some("newline"));
        assert_eq!(
            table.lookup_name(Key::meta_backspace()),
            Some("backward-kill-word")
        );

        table.bind_clean_indent(true);
        assert_eq!(table.lookup_name(Key::ctrl('m')), Some("clean-aindent-newline"));
        assert_eq!(
            table.lookup_name(Key::meta_backspace()),
            Some("clean-aindent-unindent")
        );

        table.bind_clean_indent(false);
        assert_eq!(table.lookup_name(Key::ctrl('m')), Some("newline"));
    }

    #[test]
    fn test_unbound_key() {
        let table = KeyTable::with_defaults();
        assert!(table.lookup(Key::ctrl('z')).is_none());
    }
}

//! Editor state and main loop

use crate::buffer::Buffer;
use crate::command::{CommandStatus, KeyTable};
use crate::config::Config;
use crate::display::Display;
use crate::error::Result;
use crate::host::TextHost;
use crate::input::{InputState, Key};
use crate::mode::CleanIndentMode;
use crate::terminal::Terminal;

/// Main editor state
pub struct EditorState {
    /// The buffer being edited
    pub buffer: Buffer,
    /// Display state
    pub display: Display,
    /// Input state
    pub input: InputState,
    /// Key bindings
    pub keytab: KeyTable,
    /// Clean indent session for the buffer
    pub mode: CleanIndentMode,
    /// Whether editor is running
    pub running: bool,
    /// Quit was requested once with unsaved changes
    pub quit_pending: bool,
}

impl EditorState {
    /// Create editor state around a buffer, applying the configuration
    pub fn new(mut buffer: Buffer, config: &Config) -> Self {
        let mut display = Display::new();

        buffer.set_tab_width(config.tab_width);
        buffer.set_indent_tabs(config.indent_tabs);
        match config.indent_rules() {
            Ok(rules) => buffer.set_indent_rules(rules),
            Err(e) => {
                log::warn!("ignoring indent rules: {}", e);
                display.set_message(e.to_string());
            }
        }

        let mode = CleanIndentMode::from_config(config);
        let mut keytab = KeyTable::with_defaults();
        keytab.bind_clean_indent(mode.is_enabled());

        Self {
            buffer,
            display,
            input: InputState::new(),
            keytab,
            mode,
            running: true,
            quit_pending: false,
        }
    }

    /// Switch clean indent mode on or off and rebind RET and M-Backspace
    pub fn toggle_clean_indent(&mut self) {
        let enabled = self.mode.toggle();
        self.keytab.bind_clean_indent(enabled);
        self.display.set_message(if enabled {
            "Clean indent mode enabled"
        } else {
            "Clean indent mode disabled"
        });
    }

    /// Stop the main loop
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Insert a character at cursor
    pub fn insert_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.buffer.insert(ch.encode_utf8(&mut buf));
    }

    /// Run the main editor loop
    pub fn run(&mut self, terminal: &mut Terminal) -> Result<()> {
        self.display.force_redraw();

        while self.running {
            let lighter = self.mode.lighter();
            self.display.render(terminal, &self.buffer, lighter.as_deref())?;

            let key_event = terminal.read_key()?;

            if let Some(key) = self.input.translate_key(key_event) {
                match self.handle_key(key) {
                    Ok(CommandStatus::Success) => {}
                    Ok(CommandStatus::Failure) => terminal.beep()?,
                    Ok(CommandStatus::Abort) => {
                        self.display.set_message("Quit");
                        terminal.beep()?;
                    }
                    Err(e) => {
                        log::error!("command failed: {}", e);
                        self.display.set_message(e.to_string());
                        terminal.beep()?;
                    }
                }
            } else if self.input.is_ctlx_pending() {
                self.display.set_message("C-x -");
            } else if self.input.is_meta_pending() {
                self.display.set_message("ESC -");
            }
        }

        Ok(())
    }

    /// Handle a key press, then run the post-command hook
    pub fn handle_key(&mut self, key: Key) -> Result<CommandStatus> {
        self.display.clear_message();
        let quit_was_pending = self.quit_pending;

        let result = if let Some(cmd) = self.keytab.lookup(key) {
            if let Some(name) = self.keytab.lookup_name(key) {
                log::trace!("{} runs {}", key.display_name(), name);
            }
            cmd(self, false, 1)
        } else if key.is_self_insert() {
            if let Some(ch) = key.base_char() {
                self.insert_char(ch);
            }
            Ok(CommandStatus::Success)
        } else {
            self.display.set_message(format!("{} is undefined", key.display_name()));
            Ok(CommandStatus::Failure)
        };

        if quit_was_pending {
            self.quit_pending = false;
        }

        self.mode.on_post_command(&mut self.buffer);
        if let Some(msg) = self.buffer.take_message() {
            self.display.set_message(msg);
        }
        result
    }
}

//! Clean indent mode
//!
//! A per-buffer session holding the mode switch, the indentation policy and
//! the auto-indent tracker. The host routes RET, M-Backspace and its
//! post-command hook through here; while the mode is off both keys behave
//! like the plain `newline` and `backward-kill-word`.

mod tracker;
mod unindent;

pub use tracker::{simple_newline_and_indent, IndentMark, IndentTracker};
pub use unindent::{
    backward_unindent, find_smaller_indent, is_inside_indent_region, previous_non_blank_line,
};

use crate::config::Config;
use crate::host::TextHost;

/// Mode line text while the mode is on
pub const LIGHTER: &str = "CleanIndent";

/// State of clean indent mode for one buffer
#[derive(Debug, Default)]
pub struct CleanIndentMode {
    enabled: bool,
    /// Copy the previous line's indentation instead of using host rules
    simple_indent: bool,
    tracker: IndentTracker,
}

impl CleanIndentMode {
    pub fn new(enabled: bool, simple_indent: bool) -> Self {
        Self {
            enabled,
            simple_indent,
            tracker: IndentTracker::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.enabled, config.simple_indent)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn enable(&mut self) {
        if !self.enabled {
            log::info!("clean indent mode enabled");
        }
        self.enabled = true;
    }

    /// Turn the mode off, dropping any pending auto-indent
    pub fn disable(&mut self) {
        if self.enabled {
            log::info!("clean indent mode disabled");
        }
        self.enabled = false;
        self.tracker.clear();
    }

    /// Flip the mode, returning the new state
    pub fn toggle(&mut self) -> bool {
        if self.enabled {
            self.disable();
        } else {
            self.enable();
        }
        self.enabled
    }

    pub fn simple_indent(&self) -> bool {
        self.simple_indent
    }

    pub fn set_simple_indent(&mut self, simple: bool) {
        self.simple_indent = simple;
    }

    #[cfg(test)]
    pub(crate) fn tracker(&self) -> &IndentTracker {
        &self.tracker
    }

    /// Mode line indicator, `None` while disabled
    pub fn lighter(&self) -> Option<String> {
        match (self.enabled, self.simple_indent) {
            (false, _) => None,
            (true, false) => Some(LIGHTER.to_string()),
            (true, true) => Some(format!("{}:simple", LIGHTER)),
        }
    }

    /// RET: newline and indent with tracking, or a plain newline when off
    pub fn on_return<H: TextHost + ?Sized>(&mut self, host: &mut H) {
        if !self.enabled {
            host.newline();
            return;
        }
        self.tracker.newline_and_indent(host, self.simple_indent);
    }

    /// M-Backspace: unindent inside the indentation, otherwise kill `count`
    /// words backward
    pub fn on_backspace<H: TextHost + ?Sized>(&mut self, host: &mut H, count: i32) {
        if !self.enabled {
            host.kill_word(-count);
            return;
        }
        backward_unindent(host, count);
    }

    /// Hook run by the host after every command
    pub fn on_post_command<H: TextHost + ?Sized>(&mut self, host: &mut H) {
        if self.enabled {
            self.tracker.post_command(host);
        }
    }
}

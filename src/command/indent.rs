//! Clean indent commands

use crate::editor::EditorState;
use crate::error::Result;
use super::CommandStatus;

/// RET while clean indent mode is on
pub fn clean_newline(editor: &mut EditorState, _f: bool, n: i32) -> Result<CommandStatus> {
    if n < 0 {
        return Ok(CommandStatus::Failure);
    }

    for _ in 0..n.max(1) {
        editor.mode.on_return(&mut editor.buffer);
    }
    Ok(CommandStatus::Success)
}

/// M-Backspace while clean indent mode is on
pub fn unindent_backward(editor: &mut EditorState, _f: bool, n: i32) -> Result<CommandStatus> {
    editor.mode.on_backspace(&mut editor.buffer, n);
    Ok(CommandStatus::Success)
}

/// Toggle clean indent mode (C-x m)
pub fn toggle_clean_indent(editor: &mut EditorState, _f: bool, _n: i32) -> Result<CommandStatus> {
    editor.toggle_clean_indent();
    Ok(CommandStatus::Success)
}

/// Toggle between copying indentation and the buffer's indent rules (C-x s)
pub fn toggle_simple_indent(editor: &mut EditorState, _f: bool, _n: i32) -> Result<CommandStatus> {
    let simple = !editor.mode.simple_indent();
    editor.mode.set_simple_indent(simple);
    editor.display.set_message(if simple {
        "Simple indent on"
    } else {
        "Simple indent off"
    });
    Ok(CommandStatus::Success)
}

//! Editing commands - text modification operations

use crate::editor::EditorState;
use crate::error::Result;
use crate::host::TextHost;
use super::CommandStatus;

/// Delete character at cursor (forward)
pub fn delete_char_forward(editor: &mut EditorState, f: bool, n: i32) -> Result<CommandStatus> {
    if n < 0 {
        return delete_char_backward(editor, f, -n);
    }

    let buffer = &mut editor.buffer;
    let start = buffer.point();
    let end = start + n.max(1) as usize;
    if end > buffer.point_max() {
        return Ok(CommandStatus::Failure);
    }
    buffer.delete_region(start, end);
    Ok(CommandStatus::Success)
}

/// Delete character before cursor (backward)
pub fn delete_char_backward(editor: &mut EditorState, f: bool, n: i32) -> Result<CommandStatus> {
    if n < 0 {
        return delete_char_forward(editor, f, -n);
    }

    let buffer = &mut editor.buffer;
    let end = buffer.point();
    let count = n.max(1) as usize;
    if count > end {
        return Ok(CommandStatus::Failure);
    }
    buffer.delete_region(end - count, end);
    Ok(CommandStatus::Success)
}

/// Insert newline and move cursor to new line
pub fn newline(editor: &mut EditorState, _f: bool, n: i32) -> Result<CommandStatus> {
    if n < 0 {
        return Ok(CommandStatus::Failure);
    }

    for _ in 0..n.max(1) {
        editor.buffer.newline();
    }
    Ok(CommandStatus::Success)
}

/// Insert newline and indent with the buffer's own rules (C-j)
pub fn indent_newline(editor: &mut EditorState, _f: bool, n: i32) -> Result<CommandStatus> {
    if n < 0 {
        return Ok(CommandStatus::Failure);
    }

    for _ in 0..n.max(1) {
        editor.buffer.newline_and_indent();
    }
    Ok(CommandStatus::Success)
}

/// Insert tab character
pub fn insert_tab(editor: &mut EditorState, _f: bool, n: i32) -> Result<CommandStatus> {
    if n < 0 {
        return Ok(CommandStatus::Failure);
    }

    editor.buffer.insert(&"\t".repeat(n.max(1) as usize));
    Ok(CommandStatus::Success)
}

/// Kill word forward
pub fn kill_word(editor: &mut EditorState, _f: bool, n: i32) -> Result<CommandStatus> {
    editor.buffer.kill_word(n);
    Ok(CommandStatus::Success)
}

/// Kill word backward
pub fn backward_kill_word(editor: &mut EditorState, _f: bool, n: i32) -> Result<CommandStatus> {
    editor.buffer.kill_word(-n);
    Ok(CommandStatus::Success)
}

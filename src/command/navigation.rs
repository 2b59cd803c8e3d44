//! Navigation commands - cursor movement

use crate::editor::EditorState;
use crate::error::Result;
use crate::host::TextHost;
use super::CommandStatus;

/// Move cursor forward one character
pub fn forward_char(editor: &mut EditorState, _f: bool, n: i32) -> Result<CommandStatus> {
    let buffer = &mut editor.buffer;
    let target = buffer.point() as i64 + n as i64;
    if target < 0 || target > buffer.point_max() as i64 {
        buffer.goto_char(target.max(0) as usize);
        return Ok(CommandStatus::Failure);
    }
    buffer.goto_char(target as usize);
    Ok(CommandStatus::Success)
}

/// Move cursor backward one character
pub fn backward_char(editor: &mut EditorState, f: bool, n: i32) -> Result<CommandStatus> {
    forward_char(editor, f, -n)
}

/// Move cursor to next line, keeping the column where possible
pub fn next_line(editor: &mut EditorState, _f: bool, n: i32) -> Result<CommandStatus> {
    let buffer = &mut editor.buffer;
    let column = buffer.current_column();
    let shortfall = buffer.forward_line(n as isize);
    buffer.move_to_column(column);
    if shortfall == 0 {
        Ok(CommandStatus::Success)
    } else {
        Ok(CommandStatus::Failure)
    }
}

/// Move cursor to previous line
pub fn previous_line(editor: &mut EditorState, f: bool, n: i32) -> Result<CommandStatus> {
    next_line(editor, f, -n)
}

/// Move cursor to beginning of line
pub fn beginning_of_line(editor: &mut EditorState, _f: bool, _n: i32) -> Result<CommandStatus> {
    editor.buffer.beginning_of_line();
    Ok(CommandStatus::Success)
}

/// Move cursor to end of line
pub fn end_of_line(editor: &mut EditorState, _f: bool, _n: i32) -> Result<CommandStatus> {
    editor.buffer.end_of_line();
    Ok(CommandStatus::Success)
}

/// Move cursor to first non-whitespace character on line (M-m)
pub fn back_to_indentation(editor: &mut EditorState, _f: bool, _n: i32) -> Result<CommandStatus> {
    editor.buffer.back_to_indentation();
    Ok(CommandStatus::Success)
}

/// Move to beginning of buffer
pub fn beginning_of_buffer(editor: &mut EditorState, _f: bool, _n: i32) -> Result<CommandStatus> {
    editor.buffer.goto_char(0);
    Ok(CommandStatus::Success)
}

/// Move to end of buffer
pub fn end_of_buffer(editor: &mut EditorState, _f: bool, _n: i32) -> Result<CommandStatus> {
    let end = editor.buffer.point_max();
    editor.buffer.goto_char(end);
    Ok(CommandStatus::Success)
}

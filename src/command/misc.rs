//! Miscellaneous commands

use crate::editor::EditorState;
use crate::error::Result;
use super::CommandStatus;

/// Redraw the display (C-l)
pub fn redraw_display(editor: &mut EditorState, _f: bool, _n: i32) -> Result<CommandStatus> {
    editor.display.force_redraw();
    Ok(CommandStatus::Success)
}

/// Quit the editor. A modified buffer needs the key pressed twice, or a
/// numeric argument.
pub fn quit(editor: &mut EditorState, f: bool, _n: i32) -> Result<CommandStatus> {
    if f || !editor.buffer.is_modified() || editor.quit_pending {
        editor.quit();
        return Ok(CommandStatus::Success);
    }

    editor.quit_pending = true;
    editor.display.set_message(format!(
        "Buffer {} modified; C-x C-c again to quit",
        editor.buffer.name()
    ));
    Ok(CommandStatus::Success)
}

/// Abort current operation
pub fn abort(_editor: &mut EditorState, _f: bool, _n: i32) -> Result<CommandStatus> {
    Ok(CommandStatus::Abort)
}

//! File commands

use crate::editor::EditorState;
use crate::error::Result;
use super::CommandStatus;

/// Save the buffer to its file (C-x C-s)
pub fn save_buffer(editor: &mut EditorState, _f: bool, _n: i32) -> Result<CommandStatus> {
    if editor.buffer.filename().is_none() {
        editor.display.set_message("No file name");
        return Ok(CommandStatus::Failure);
    }
    if !editor.buffer.is_modified() {
        editor.display.set_message("(No changes need to be saved)");
        return Ok(CommandStatus::Success);
    }

    editor.buffer.save()?;
    let name = editor.buffer.name().to_string();
    log::info!("saved {}", name);
    editor.display.set_message(format!("Wrote {}", name));
    Ok(CommandStatus::Success)
}

//! cleanindent - auto-indent that cleans up after itself
//!
//! The editing core is the [`mode::CleanIndentMode`] session, which drives
//! any editor through the [`host::TextHost`] trait. [`buffer::Buffer`] is
//! the in-memory host used by the bundled terminal editor.

pub mod buffer;
pub mod command;
pub mod config;
pub mod display;
pub mod editor;
pub mod error;
pub mod host;
pub mod indent_rules;
pub mod input;
pub mod line;
pub mod mode;
pub mod terminal;

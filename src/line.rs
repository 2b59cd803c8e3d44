//! Line representation and column arithmetic

use unicode_width::UnicodeWidthChar;

/// Check if a character counts as horizontal whitespace
pub fn is_blank(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

/// Display width of `ch` when it starts at `col`
pub fn char_width_at(ch: char, col: usize, tab_width: usize) -> usize {
    if ch == '\t' {
        tab_width - col % tab_width
    } else {
        UnicodeWidthChar::width(ch).unwrap_or(1)
    }
}

/// Build a run of indentation that spans `columns` display columns
pub fn indent_string(columns: usize, tab_width: usize, use_tabs: bool) -> String {
    if use_tabs {
        let mut s = "\t".repeat(columns / tab_width);
        s.push_str(&" ".repeat(columns % tab_width));
        s
    } else {
        " ".repeat(columns)
    }
}

/// A single line of text in a buffer
#[derive(Debug, Clone, Default)]
pub struct Line {
    /// The text content (without trailing newline)
    text: String,
}

impl Line {
    /// Create a new empty line
    pub fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Create a line from a string
    pub fn from_string(s: String) -> Self {
        Self { text: s }
    }

    /// Get the text content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Display width of the leading whitespace
    pub fn indentation(&self, tab_width: usize) -> usize {
        self.text
            .chars()
            .take_while(|&c| is_blank(c))
            .fold(0, |col, ch| col + char_width_at(ch, col, tab_width))
    }

    /// Display column reached after the first `char_idx` characters
    pub fn column_at(&self, char_idx: usize, tab_width: usize) -> usize {
        self.text
            .chars()
            .take(char_idx)
            .fold(0, |col, ch| col + char_width_at(ch, col, tab_width))
    }

    /// First character index whose column is at or past `col`, with the
    /// column actually reached. Stops at end of line when the line is short.
    pub fn index_for_column(&self, col: usize, tab_width: usize) -> (usize, usize) {
        let mut current = 0;
        for (idx, ch) in self.text.chars().enumerate() {
            if current >= col {
                return (idx, current);
            }
            current += char_width_at(ch, current, tab_width);
        }
        (self.char_len(), current)
    }

    /// Byte position of the character at a given character index, or the
    /// byte length when the index is at or past the end
    pub fn char_to_byte(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(pos, _)| pos)
            .unwrap_or(self.text.len())
    }

    /// Character at a character index
    pub fn char_at(&self, char_idx: usize) -> Option<char> {
        self.text.chars().nth(char_idx)
    }

    /// Insert a string at a character index
    pub fn insert_str(&mut self, char_idx: usize, s: &str) {
        let byte_pos = self.char_to_byte(char_idx);
        self.text.insert_str(byte_pos, s);
    }

    /// Delete a range of characters and return the deleted text
    pub fn delete_range(&mut self, start: usize, end: usize) -> String {
        let start = self.char_to_byte(start);
        let end = self.char_to_byte(end);
        let deleted = self.text[start..end].to_string();
        self.text.replace_range(start..end, "");
        deleted
    }

    /// Split the line at a character index, returning the remainder
    pub fn split_off(&mut self, char_idx: usize) -> Line {
        let byte_pos = self.char_to_byte(char_idx);
        Line::from_string(self.text.split_off(byte_pos))
    }

    /// Append another line's content to this line
    pub fn append(&mut self, other: Line) {
        self.text.push_str(other.text());
    }

    /// Text with tabs expanded to spaces, for rendering
    pub fn expand_tabs(&self, tab_width: usize) -> String {
        let mut out = String::with_capacity(self.text.len());
        let mut col = 0;
        for ch in self.text.chars() {
            let width = char_width_at(ch, col, tab_width);
            if ch == '\t' {
                out.push_str(&" ".repeat(width));
            } else {
                out.push(ch);
            }
            col += width;
        }
        out
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Self::from_string(s.to_string())
    }
}

impl From<String> for Line {
    fn from(s: String) -> Self {
        Self::from_string(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation_with_tabs() {
        assert_eq!(Line::from("    foo").indentation(8), 4);
        assert_eq!(Line::from("\tfoo").indentation(8), 8);
        assert_eq!(Line::from("  \tfoo").indentation(8), 8);
        assert_eq!(Line::from("\t  foo").indentation(4), 6);
        assert_eq!(Line::from("foo").indentation(8), 0);
    }

    #[test]
    fn test_whitespace_only_line() {
        let line = Line::from("   ");
        assert_eq!(line.char_len(), 3);
        assert_eq!(line.indentation(8), 3);
        assert_eq!(Line::new().char_len(), 0);
    }

    #[test]
    fn test_column_at() {
        let line = Line::from("\tab");
        assert_eq!(line.column_at(0, 8), 0);
        assert_eq!(line.column_at(1, 8), 8);
        assert_eq!(line.column_at(3, 8), 10);
    }

    #[test]
    fn test_index_for_column() {
        let line = Line::from("  \tx");
        assert_eq!(line.index_for_column(2, 4), (2, 2));
        // Column 3 falls inside the tab, so we land after it
        assert_eq!(line.index_for_column(3, 4), (3, 4));
        assert_eq!(line.index_for_column(20, 4), (4, 5));
    }

    #[test]
    fn test_utf8_editing() {
        let mut line = Line::from("café au lait");
        assert_eq!(line.char_len(), 12);
        let deleted = line.delete_range(3, 5);
        assert_eq!(deleted, "é ");
        assert_eq!(line.text(), "cafau lait");
        line.insert_str(3, "é");
        assert_eq!(line.text(), "caféau lait");
    }

    #[test]
    fn test_split_off_and_append() {
        let mut line = Line::from("Hello World");
        let remainder = line.split_off(6);
        assert_eq!(line.text(), "Hello ");
        assert_eq!(remainder.text(), "World");
        line.append(remainder);
        assert_eq!(line.text(), "Hello World");
    }

    #[test]
    fn test_indent_string() {
        assert_eq!(indent_string(4, 8, false), "    ");
        assert_eq!(indent_string(10, 8, true), "\t  ");
        assert_eq!(indent_string(0, 8, true), "");
    }

    #[test]
    fn test_expand_tabs() {
        assert_eq!(Line::from("a\tb").expand_tabs(4), "a   b");
    }
}

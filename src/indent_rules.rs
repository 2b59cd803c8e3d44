//! Pattern rules for the host's own newline-and-indent
//!
//! The host indents a new line like the line it came from, then adjusts by
//! one indent offset when the configured patterns match.

use regex::Regex;

use crate::error::{EditorError, Result};

/// Indentation adjustment rules
#[derive(Debug, Clone)]
pub struct IndentRules {
    /// Columns added or removed per level
    offset: usize,
    /// Previous line matching this opens a block
    increase: Option<Regex>,
    /// New line content matching this closes a block
    decrease: Option<Regex>,
}

fn compile(pattern: Option<&str>) -> Result<Option<Regex>> {
    pattern
        .map(|p| {
            Regex::new(p).map_err(|source| EditorError::InvalidPattern {
                pattern: p.to_string(),
                source,
            })
        })
        .transpose()
}

impl IndentRules {
    /// Create rules from pattern strings
    pub fn new(offset: usize, increase: Option<&str>, decrease: Option<&str>) -> Result<Self> {
        Ok(Self {
            offset,
            increase: compile(increase)?,
            decrease: compile(decrease)?,
        })
    }

    /// Rules for brace-delimited languages: `{ ( [` open, `} ) ]` close
    #[cfg(test)]
    pub(crate) fn braces(offset: usize) -> Self {
        Self::new(offset, Some(r"[\{\(\[]\s*$"), Some(r"^\s*[\}\)\]]")).unwrap()
    }

    /// Indentation for a new line whose predecessor is `previous` (indented
    /// `base` columns) and whose own content is `current`
    pub fn indent_for(&self, base: usize, previous: &str, current: &str) -> usize {
        let mut column = base;
        if self.increase.as_ref().is_some_and(|re| re.is_match(previous)) {
            column += self.offset;
        }
        if self.decrease.as_ref().is_some_and(|re| re.is_match(current)) {
            column = column.saturating_sub(self.offset);
        }
        column
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_braces_open_block() {
        let rules = IndentRules::braces(4);
        assert_eq!(rules.indent_for(0, "fn main() {", ""), 4);
        assert_eq!(rules.indent_for(4, "    let x = 1;", ""), 4);
    }

    #[test]
    fn test_braces_close_block() {
        let rules = IndentRules::braces(4);
        assert_eq!(rules.indent_for(4, "    foo();", "}"), 0);
        // Opening and closing on the same split cancels out
        assert_eq!(rules.indent_for(0, "if x {", "}"), 0);
    }

    #[test]
    fn test_python_style_rules() {
        let rules = IndentRules::new(4, Some(r":\s*$"), None).unwrap();
        assert_eq!(rules.indent_for(0, "def foo():", ""), 4);
        assert_eq!(rules.indent_for(4, "    return 1", ""), 4);
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = IndentRules::new(4, Some("(unclosed"), None).unwrap_err();
        assert!(matches!(err, EditorError::InvalidPattern { .. }));
        assert!(err.to_string().contains("(unclosed"));
    }

    #[test]
    fn test_never_below_zero() {
        let rules = IndentRules::braces(4);
        assert_eq!(rules.indent_for(2, "  x", "}"), 0);
    }
}

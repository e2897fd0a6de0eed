use serde::{Deserialize, Serialize};
use std::fmt;

/// Source location of a converted value.
///
/// Line and column are 1-based for human-readable error messages. The
/// document parser reports point locations, so a span is a single position
/// rather than a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub line: u32,
    pub col: u32,
}

impl Span {
    /// Create a new span.
    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_display() {
        let s = Span::new(3, 7);
        assert_eq!(format!("{s}"), "3:7");
    }
}

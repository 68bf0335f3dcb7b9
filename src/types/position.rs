use serde::{Deserialize, Serialize};
use std::fmt;

/// A resolved source location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A start/end pair; either end may be unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    #[serde(default)]
    pub start: Option<Position>,
    #[serde(default)]
    pub end: Option<Position>,
}

impl Span {
    pub fn new(start: Option<Position>, end: Option<Position>) -> Self {
        Self { start, end }
    }

    pub fn at(pos: Position) -> Self {
        Self {
            start: Some(pos.clone()),
            end: Some(pos),
        }
    }

    pub fn is_known(&self) -> bool {
        self.start.is_some()
    }

    pub fn file(&self) -> Option<&str> {
        self.start.as_ref().map(|p| p.file.as_str())
    }
}

/// Renders `file:L:C-C`, `file:L:C-L:C`, or `-` when nothing is known.
impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(start) = &self.start else {
            return f.write_str("-");
        };
        write!(f, "{}", start)?;
        match &self.end {
            Some(end) if end == start => Ok(()),
            Some(end) if end.file != start.file => write!(f, "-{}", end),
            Some(end) if end.line == start.line => write!(f, "-{}", end.column),
            Some(end) => write!(f, "-{}:{}", end.line, end.column),
            None => Ok(()),
        }
    }
}

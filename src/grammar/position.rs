use std::fmt;

use serde_derive::Serialize;

/// Location of a definition inside a grammar file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Pos {
    pub path: String,
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path, self.line, self.column)
    }
}

/// Grammar text together with the offsets where each of its lines begins.
#[derive(Clone, Debug)]
pub struct SourceFile {
    pub path: String,
    pub content: String,
    line_starts: Vec<usize>,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, content: String) -> Self {
        let line_starts = find_line_starts(&content);
        SourceFile {
            path: path.into(),
            content,
            line_starts,
        }
    }

    pub fn read<P: AsRef<std::path::Path>>(path: P) -> Result<Self, std::io::Error> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Ok(Self::new(path.display().to_string(), content))
    }

    /// Maps a byte offset to a 1-based line and a 1-based column counted in chars.
    pub fn locate(&self, offset: usize) -> Pos {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line];
        let column = self.content[line_start..offset].chars().count() + 1;

        Pos {
            path: self.path.clone(),
            line: line + 1,
            column,
            offset,
        }
    }
}

fn find_line_starts(content: &str) -> Vec<usize> {
    let bytes = content.as_bytes();
    let mut starts = vec![0];

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'\n' => starts.push(i + 1),
            b'\r' if bytes.get(i + 1) != Some(&b'\n') => starts.push(i + 1),
            _ => {}
        }
    }

    starts
}

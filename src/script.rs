//! In-memory updater-script.
//!
//! Scripts are kept as raw bytes split on `\n`. No encoding is assumed, so a
//! script with stray Latin-1 in a `ui_print` survives untouched. Splitting and
//! joining are exact inverses: a trailing newline becomes a trailing empty
//! line, and `\r` stays attached to its line.

use std::fmt;

/// Ordered sequence of script lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Script {
    lines: Vec<Vec<u8>>,
}

impl Script {
    /// Split raw file contents into lines.
    pub fn from_bytes(contents: &[u8]) -> Self {
        Self {
            lines: contents.split(|&b| b == b'\n').map(<[u8]>::to_vec).collect(),
        }
    }

    pub fn from_lines(lines: Vec<Vec<u8>>) -> Self {
        Self { lines }
    }

    /// Join the lines back with `\n`.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.lines.join(&b'\n')
    }

    pub fn lines(&self) -> &[Vec<u8>] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<Vec<u8>> {
        self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<&str> for Script {
    fn from(contents: &str) -> Self {
        Self::from_bytes(contents.as_bytes())
    }
}

/// Lossy rendering, for logs and terminal output only.
impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.to_bytes()))
    }
}

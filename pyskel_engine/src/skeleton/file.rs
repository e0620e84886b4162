use std::path::PathBuf;

use super::RelPath;

/// Length of the prefix scanned for NUL bytes when sniffing for text.
const TEXT_SNIFF_LEN: usize = 8192;

/// Contents of a single skeleton entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// UTF-8 text, subject to placeholder substitution.
    Text(String),
    /// Raw bytes, copied through untouched.
    Binary(Vec<u8>),
    /// Symbolic link target, recreated as-is.
    Link(PathBuf),
}

impl Payload {
    /// Classifies raw file contents. Anything with a NUL byte in its leading
    /// bytes or invalid UTF-8 anywhere counts as binary.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let sniff = &bytes[..bytes.len().min(TEXT_SNIFF_LEN)];
        if sniff.contains(&0) {
            return Self::Binary(bytes);
        }
        match String::from_utf8(bytes) {
            Ok(text) => Self::Text(text),
            Err(err) => Self::Binary(err.into_bytes()),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }
}

/// A file inside a skeleton, addressed by its path relative to the
/// skeleton root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkeletonFile {
    pub rel_path: RelPath,
    pub payload: Payload,
    pub executable: bool,
}

impl SkeletonFile {
    pub fn text(rel_path: RelPath, text: impl Into<String>) -> Self {
        Self {
            rel_path,
            payload: Payload::Text(text.into()),
            executable: false,
        }
    }
}

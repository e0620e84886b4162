use std::path::{Path, PathBuf};

use itertools::Itertools;

use crate::{multisub, Result, SkeletonError, VarMap};

/// A normalized, slash-separated path relative to a skeleton or
/// destination root.
///
/// Components are non-empty and never `.` or `..`, so a `RelPath` joined
/// onto a destination root can never escape it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct RelPath(String);

impl RelPath {
    pub fn new(path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        if path.is_empty()
            || path
                .split('/')
                .any(|component| component.is_empty() || component == "." || component == "..")
        {
            return Err(SkeletonError::InvalidPath(path));
        }
        Ok(Self(path))
    }

    pub fn from_components<I, S>(components: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(components.into_iter().map(|c| c.as_ref().to_owned()).join("/"))
    }

    /// Converts a filesystem path, which must consist of plain UTF-8
    /// components.
    pub fn from_std(path: &Path) -> Result<Self> {
        let mut components = Vec::new();
        for component in path.components() {
            match component {
                std::path::Component::Normal(part) => components.push(
                    part.to_str()
                        .ok_or_else(|| SkeletonError::InvalidPath(path.display().to_string()))?,
                ),
                _ => return Err(SkeletonError::InvalidPath(path.display().to_string())),
            }
        }
        Self::from_components(components)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    pub fn file_name(&self) -> &str {
        match self.0.rsplit_once('/') {
            Some((_, name)) => name,
            None => &self.0,
        }
    }

    pub fn parent(&self) -> Option<RelPath> {
        self.0
            .rsplit_once('/')
            .map(|(parent, _)| Self(parent.to_owned()))
    }

    /// Proper ancestors, innermost first: `a/b/c` yields `a/b`, then `a`.
    pub fn ancestors(&self) -> impl Iterator<Item = RelPath> {
        std::iter::successors(self.parent(), RelPath::parent)
    }

    pub fn to_path_buf(&self) -> PathBuf {
        self.components().collect()
    }

    /// Applies placeholder substitution to every component and revalidates
    /// the result, so a variable value cannot smuggle in `..` or empty
    /// components.
    pub fn substitute(&self, vars: &VarMap) -> Result<RelPath> {
        Self::new(
            self.components()
                .map(|component| multisub(component, vars).0)
                .join("/"),
        )
    }
}

impl std::ops::Deref for RelPath {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for RelPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RelPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

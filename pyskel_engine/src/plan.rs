//! Scaffolding plans: what a run would do, computed before touching disk.

use std::path::{Path, PathBuf};

use itertools::Itertools;

use crate::{find_placeholders, utils::io, RelPath, Result, SkeletonError};

/// Why a planned entry performs no work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The destination path matched the ignore pattern.
    Ignored,
}

/// What applying a planned entry does on disk.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Create the destination directory.
    MakeDir,
    /// Write file contents through unchanged.
    Copy {
        #[serde(skip)]
        bytes: Vec<u8>,
        executable: bool,
    },
    /// Write substituted text.
    Render {
        #[serde(skip)]
        text: String,
        executable: bool,
        substitutions: usize,
    },
    /// Recreate a symbolic link.
    Symlink { target: PathBuf },
    /// Perform no work.
    Skip { reason: SkipReason },
}

impl Action {
    /// Short verb for log and plan listings.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::MakeDir => "dir",
            Self::Copy { .. } => "cpy",
            Self::Render { .. } => "sub",
            Self::Symlink { .. } => "lnk",
            Self::Skip { .. } => "ign",
        }
    }
}

/// A single step of a plan.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PlannedEntry {
    /// Name of the skeleton this entry came from.
    pub skeleton: String,
    /// Path within the skeleton, absent for derived directories.
    pub source: Option<RelPath>,
    /// Path under the destination root.
    pub dest: RelPath,
    #[serde(flatten)]
    pub action: Action,
}

/// An ordered list of planned entries: directories first, then files, then
/// skipped entries, each group sorted by destination.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Plan {
    /// Whether applying may replace existing destination files.
    pub overwrite: bool,
    pub entries: Vec<PlannedEntry>,
}

impl Plan {
    /// Placeholder keys that survive into rendered output or destination
    /// paths, sorted. Non-empty output usually means a missing variable.
    pub fn unresolved(&self) -> Vec<String> {
        self.entries
            .iter()
            .flat_map(|entry| {
                let mut keys = match &entry.action {
                    Action::Render { text, .. } => find_placeholders(text),
                    _ => Vec::new(),
                };
                keys.extend(find_placeholders(&entry.dest));
                keys
            })
            .sorted()
            .dedup()
            .collect_vec()
    }

    /// Applies every entry under `root`, creating the root itself first.
    ///
    /// Without `overwrite`, hitting an existing destination file fails and
    /// leaves previously written entries in place.
    pub fn apply(&self, root: &Path) -> Result<Applied> {
        std::fs::create_dir_all(root)?;
        let mut applied = Applied::default();
        for entry in &self.entries {
            let dest = root.join(entry.dest.to_path_buf());
            tracing::debug!("{} {}", entry.action.verb(), dest.display());
            match &entry.action {
                Action::MakeDir => {
                    std::fs::create_dir_all(&dest)?;
                }
                Action::Copy { bytes, executable } => {
                    self.check_collision(&dest)?;
                    std::fs::write(&dest, bytes)?;
                    if *executable {
                        io::set_executable(&dest)?;
                    }
                    applied.record(entry.source.clone(), dest);
                }
                Action::Render { text, executable, .. } => {
                    self.check_collision(&dest)?;
                    std::fs::write(&dest, text)?;
                    if *executable {
                        io::set_executable(&dest)?;
                    }
                    applied.record(entry.source.clone(), dest);
                }
                Action::Symlink { target } => {
                    if dest.symlink_metadata().is_ok() {
                        if !self.overwrite {
                            return Err(SkeletonError::DestinationExists(dest));
                        }
                        std::fs::remove_file(&dest)?;
                    }
                    io::symlink(target, &dest)?;
                    applied.record(entry.source.clone(), dest);
                }
                Action::Skip { .. } => {}
            }
        }
        Ok(applied)
    }

    fn check_collision(&self, dest: &Path) -> Result {
        if !self.overwrite && dest.symlink_metadata().is_ok() {
            return Err(SkeletonError::DestinationExists(dest.to_owned()));
        }
        Ok(())
    }
}

/// Paths written by [`Plan::apply`], keyed by their skeleton source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Applied {
    paths: Vec<(Option<RelPath>, PathBuf)>,
}

impl Applied {
    fn record(&mut self, source: Option<RelPath>, dest: PathBuf) {
        self.paths.push((source, dest));
    }

    /// Written files as `(skeleton source, destination)` pairs.
    pub fn paths(&self) -> &[(Option<RelPath>, PathBuf)] {
        &self.paths
    }

    /// Destination the given skeleton file was written to.
    pub fn dest_of(&self, source: &str) -> Option<&Path> {
        self.paths.iter().find_map(|(from, to)| {
            (from.as_deref() == Some(source)).then_some(to.as_path())
        })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

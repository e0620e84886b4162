use std::path::Path;

use itertools::Itertools;

use crate::{
    find_placeholders, utils::io, Config, Payload, RelPath, Result, SkeletonError, SkeletonFile,
};

/// A named tree of directories and files ready for rendering.
///
/// Directories and files are kept in sorted order, so rendering the same
/// skeleton always produces the same plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skeleton {
    name: String,
    dirs: Vec<RelPath>,
    files: Vec<SkeletonFile>,
}

impl Skeleton {
    /// Builds a skeleton from files alone. Directories are derived from the
    /// file paths.
    pub fn from_files(name: impl Into<String>, mut files: Vec<SkeletonFile>) -> Self {
        files.sort_unstable_by(|a, b| a.rel_path.cmp(&b.rel_path));
        let dirs = files
            .iter()
            .flat_map(|file| file.rel_path.ancestors())
            .sorted()
            .dedup()
            .collect_vec();
        Self {
            name: name.into(),
            dirs,
            files,
        }
    }

    /// Reads a skeleton from a directory on disk.
    ///
    /// Entries matching the ignore pattern in `cfg` are dropped, symbolic
    /// links are carried over only when `cfg.copy_symlinks` is set, and
    /// trees nested deeper than `cfg.max_depth` directories are rejected.
    pub fn load(name: impl Into<String>, dir: &Path, cfg: &Config) -> Result<Self> {
        let name = name.into();
        let ignore_re = cfg.compiled_ignore()?;
        let mut dirs = Vec::new();
        let mut files = Vec::new();

        let mut walker = walkdir::WalkDir::new(dir)
            .min_depth(1)
            .max_depth(cfg.max_depth.saturating_add(1))
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();
        while let Some(entry) = walker.next() {
            let entry = entry?;
            let rel_path = RelPath::from_std(
                entry
                    .path()
                    .strip_prefix(dir)
                    .unwrap_or_else(|_| unreachable!()),
            )?;
            if entry.depth() > cfg.max_depth {
                return Err(SkeletonError::DepthExceeded {
                    skeleton: name,
                    path: rel_path.to_string(),
                    max_depth: cfg.max_depth,
                });
            }
            if let Some(ignore_re) = &ignore_re {
                if ignore_re.is_match(&rel_path) {
                    tracing::debug!("Ignoring {rel_path}");
                    if entry.file_type().is_dir() {
                        walker.skip_current_dir();
                    }
                    continue;
                }
            }
            let file_type = entry.file_type();
            if file_type.is_dir() {
                dirs.push(rel_path);
            } else if file_type.is_symlink() {
                if cfg.copy_symlinks {
                    files.push(SkeletonFile {
                        rel_path,
                        payload: Payload::Link(std::fs::read_link(entry.path())?),
                        executable: false,
                    });
                } else {
                    tracing::debug!("Skipping symbolic link {rel_path}");
                }
            } else {
                let metadata = entry.metadata()?;
                files.push(SkeletonFile {
                    rel_path,
                    payload: Payload::from_bytes(std::fs::read(entry.path())?),
                    executable: io::is_executable(&metadata),
                });
            }
        }

        dirs.sort_unstable();
        files.sort_unstable_by(|a, b| a.rel_path.cmp(&b.rel_path));
        Ok(Self { name, dirs, files })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dirs(&self) -> &[RelPath] {
        &self.dirs
    }

    pub fn files(&self) -> &[SkeletonFile] {
        &self.files
    }

    /// Distinct placeholder keys used anywhere in this skeleton, in text
    /// contents and in paths alike, sorted.
    pub fn placeholders(&self) -> Vec<String> {
        self.files
            .iter()
            .flat_map(|file| {
                let mut keys = match &file.payload {
                    Payload::Text(text) => find_placeholders(text),
                    Payload::Binary(_) | Payload::Link(_) => Vec::new(),
                };
                keys.extend(find_placeholders(&file.rel_path));
                keys
            })
            .chain(self.dirs.iter().flat_map(|dir| find_placeholders(dir)))
            .sorted()
            .dedup()
            .collect_vec()
    }
}

//! Lookup of skeletons across user directories and built-ins.

use std::path::PathBuf;

use itertools::Itertools;

use crate::{assets, Config, Result, Skeleton, SkeletonError};

/// Where a skeleton can be found.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SkeletonInfo {
    pub name: String,
    pub builtin: bool,
    /// Directory backing the skeleton, absent for built-ins.
    pub path: Option<PathBuf>,
}

/// An ordered list of skeleton search roots, with built-ins as fallback.
///
/// Earlier roots win, so a user directory containing `class/` shadows the
/// embedded `class` skeleton.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkeletonSet {
    roots: Vec<PathBuf>,
}

impl SkeletonSet {
    /// Builds a set from explicit roots followed by the per-user skeleton
    /// directory.
    pub fn discover(roots: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut roots = roots.into_iter().collect_vec();
        if let Some(user_root) = Self::user_root() {
            roots.push(user_root);
        }
        Self { roots }
    }

    /// Per-user skeleton directory under the platform data dir.
    pub fn user_root() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("pyskel").join("skeletons"))
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Finds a skeleton by name, preferring earlier roots over built-ins.
    pub fn find(&self, name: &str, cfg: &Config) -> Result<Skeleton> {
        if let Some(dir) = self.locate(name) {
            return Skeleton::load(name, &dir, cfg);
        }
        assets::builtin_skeleton(name)
            .ok_or_else(|| SkeletonError::UnknownSkeleton(name.to_owned()))
    }

    /// Directory backing `name`, if a search root provides one.
    pub fn locate(&self, name: &str) -> Option<PathBuf> {
        self.roots
            .iter()
            .map(|root| root.join(name))
            .find(|dir| dir.is_dir())
    }

    /// Lists every available skeleton by name. A name shadowed by an
    /// earlier root appears once, under the root that wins.
    pub fn list(&self) -> Result<Vec<SkeletonInfo>> {
        let mut infos: Vec<SkeletonInfo> = Vec::new();
        for root in &self.roots {
            let Ok(entries) = std::fs::read_dir(root) else {
                continue;
            };
            for entry in entries {
                let entry = entry?;
                if !entry.file_type()?.is_dir() {
                    continue;
                }
                let Ok(name) = entry.file_name().into_string() else {
                    continue;
                };
                if infos.iter().any(|info| info.name == name) {
                    continue;
                }
                infos.push(SkeletonInfo {
                    name,
                    builtin: false,
                    path: Some(entry.path()),
                });
            }
        }
        for name in assets::BUILTIN_NAMES {
            if !infos.iter().any(|info| info.name == name) {
                infos.push(SkeletonInfo {
                    name: name.to_owned(),
                    builtin: true,
                    path: None,
                });
            }
        }
        infos.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        Ok(infos)
    }
}

impl FromIterator<PathBuf> for SkeletonSet {
    fn from_iter<T: IntoIterator<Item = PathBuf>>(iter: T) -> Self {
        Self {
            roots: iter.into_iter().collect(),
        }
    }
}

//! Rendering skeletons into plans.

use std::path::Path;

use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    assets, find_placeholders, multisub, Action, Applied, CIdent, Config, Payload, Plan,
    PlannedEntry, RelPath, Result, Skeleton, SkeletonError, SkipReason, VarMap,
};

/// Renders one or more skeletons into a [`Plan`].
///
/// # Examples
///
/// ```
/// # use pyskel_engine::{Config, Scaffolder};
/// # fn main() -> pyskel_engine::SkeletonResult {
/// let plan = Scaffolder::new(Config::default())
///     .builtin("project")?
///     .var_derived("PROJECT_MODULE", "mylib")
///     .render()?;
/// assert!(plan.unresolved().is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scaffolder {
    cfg: Config,
    skeletons: Vec<Skeleton>,
    vars: VarMap,
    renames: FxHashMap<RelPath, RelPath>,
}

impl Scaffolder {
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            ..Self::default()
        }
    }

    /// Adds an already-loaded skeleton.
    pub fn skeleton(mut self, skeleton: Skeleton) -> Self {
        self.skeletons.push(skeleton);
        self
    }

    /// Adds an embedded skeleton by name.
    pub fn builtin(self, name: &str) -> Result<Self> {
        let skeleton = assets::builtin_skeleton(name)
            .ok_or_else(|| SkeletonError::UnknownSkeleton(name.to_owned()))?;
        Ok(self.skeleton(skeleton))
    }

    /// Loads a skeleton from a directory and adds it.
    pub fn skeleton_dir(self, name: &str, dir: &Path) -> Result<Self> {
        let skeleton = Skeleton::load(name, dir, &self.cfg)?;
        Ok(self.skeleton(skeleton))
    }

    /// Assigns a substitution variable.
    pub fn var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.set(key, value);
        self
    }

    /// Assigns a variable together with its `_UPPER` companion.
    pub fn var_derived(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.set_derived(key, value);
        self
    }

    /// Merges a whole variable map, later assignments winning.
    pub fn vars(mut self, vars: &VarMap) -> Self {
        self.vars
            .extend(vars.entries().map(|(k, v)| (k.to_owned(), v.to_owned())));
        self
    }

    /// Renames a skeleton file. The new path is still subject to placeholder
    /// substitution.
    pub fn rename(mut self, from: RelPath, to: RelPath) -> Self {
        self.renames.insert(from, to);
        self
    }

    /// Computes the full plan without touching the filesystem.
    ///
    /// Entries come out as directories, then files, then skips, each sorted
    /// by destination. Two files rendering to the same destination are an
    /// error.
    pub fn render(self) -> Result<Plan> {
        assert!(
            !self.skeletons.is_empty(),
            "There are no skeletons from which to render"
        );
        let ignore_re = self.cfg.compiled_ignore()?;
        let verbatim_re = self.cfg.compiled_verbatim()?;

        let mut dirs: Vec<(String, RelPath)> = Vec::new();
        let mut seen_dirs = FxHashSet::default();
        let mut files: Vec<PlannedEntry> = Vec::new();
        let mut skips: Vec<PlannedEntry> = Vec::new();
        let mut seen_dests = FxHashSet::default();

        for skeleton in &self.skeletons {
            for dir in skeleton.dirs() {
                let dest = dir.substitute(&self.vars)?;
                if matches(&ignore_re, &dest) {
                    continue;
                }
                if seen_dirs.insert(dest.clone()) {
                    dirs.push((skeleton.name().to_owned(), dest));
                }
            }
            for file in skeleton.files() {
                let source = file.rel_path.clone();
                let renamed = self
                    .renames
                    .get(&source)
                    .cloned()
                    .unwrap_or_else(|| source.clone());
                let dest = renamed.substitute(&self.vars)?;
                if matches(&ignore_re, &dest) {
                    tracing::debug!("Ignoring {dest}");
                    skips.push(PlannedEntry {
                        skeleton: skeleton.name().to_owned(),
                        source: Some(source),
                        dest,
                        action: Action::Skip {
                            reason: SkipReason::Ignored,
                        },
                    });
                    continue;
                }
                if !seen_dests.insert(dest.clone()) {
                    return Err(SkeletonError::DuplicateDestination(dest.to_string()));
                }
                for ancestor in dest.ancestors() {
                    if seen_dirs.insert(ancestor.clone()) {
                        dirs.push((skeleton.name().to_owned(), ancestor));
                    }
                }
                let action = match &file.payload {
                    Payload::Link(target) => Action::Symlink {
                        target: target.clone(),
                    },
                    Payload::Binary(bytes) => Action::Copy {
                        bytes: bytes.clone(),
                        executable: file.executable,
                    },
                    Payload::Text(text) => {
                        if matches(&verbatim_re, &source) || find_placeholders(text).is_empty() {
                            Action::Copy {
                                bytes: text.clone().into_bytes(),
                                executable: file.executable,
                            }
                        } else {
                            let (rendered, substitutions) = multisub(text, &self.vars);
                            Action::Render {
                                text: rendered,
                                executable: file.executable,
                                substitutions: substitutions.len(),
                            }
                        }
                    }
                };
                files.push(PlannedEntry {
                    skeleton: skeleton.name().to_owned(),
                    source: Some(source),
                    dest,
                    action,
                });
            }
        }

        let entries = dirs
            .into_iter()
            .sorted_by(|a, b| a.1.cmp(&b.1))
            .map(|(skeleton, dest)| PlannedEntry {
                skeleton,
                source: None,
                dest,
                action: Action::MakeDir,
            })
            .chain(files.into_iter().sorted_by(|a, b| a.dest.cmp(&b.dest)))
            .chain(skips.into_iter().sorted_by(|a, b| a.dest.cmp(&b.dest)))
            .collect_vec();

        Ok(Plan {
            overwrite: self.cfg.overwrite,
            entries,
        })
    }

    /// Renders and immediately applies the plan under `root`.
    pub fn build(self, root: &Path) -> Result<Applied> {
        let plan = self.render()?;
        plan.apply(root)
    }
}

fn matches(re: &Option<regex::Regex>, path: &str) -> bool {
    re.as_ref().is_some_and(|re| re.is_match(path))
}

/// Plans a fresh extension module project named after `module`.
pub fn scaffold_project(module: &CIdent, cfg: Config) -> Result<Plan> {
    Scaffolder::new(cfg)
        .builtin("project")?
        .var_derived("PROJECT_MODULE", module.as_str())
        .render()
}

/// Plans one extension type named `class` for the module `module`. The
/// generated files are named after the class.
pub fn scaffold_class(module: &CIdent, class: &CIdent, cfg: Config) -> Result<Plan> {
    let rename = |from: &str, to: String| -> (RelPath, RelPath) {
        (
            RelPath::new(from).unwrap_or_else(|_| unreachable!()),
            RelPath::new(to).unwrap_or_else(|_| unreachable!()),
        )
    };
    let (from_c, to_c) = rename("Class.c", format!("{class}.c"));
    let (from_h, to_h) = rename("Class.h", format!("{class}.h"));
    Scaffolder::new(cfg)
        .builtin("class")?
        .var_derived("PROJECT_MODULE", module.as_str())
        .var_derived("CLASS_NAME", class.as_str())
        .rename(from_c, to_c)
        .rename(from_h, to_h)
        .render()
}

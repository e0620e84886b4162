use typed_builder::TypedBuilder;

use crate::Result;

/// Default pattern for junk entries that never take part in scaffolding.
pub const DEFAULT_IGNORE_PATTERN: &str = r"(^|/)(\.DS_Store$|\._)";

/// Configuration for loading skeletons and rendering plans.
///
/// # Examples
///
/// ```
/// # use pyskel_engine::Config;
/// let config = Config::builder().max_depth(4).overwrite(true).build();
/// assert_eq!(config.max_depth, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, TypedBuilder)]
pub struct Config {
    /// Maximum directory nesting accepted when loading a skeleton from disk.
    #[builder(default = 10)]
    pub max_depth: usize,
    /// Whether symbolic links are carried over instead of skipped.
    #[builder(default = false)]
    pub copy_symlinks: bool,
    /// Whether applying a plan may replace existing destination files.
    #[builder(default = false)]
    pub overwrite: bool,
    /// Pattern of relative paths to leave out entirely.
    #[builder(default = Some(DEFAULT_IGNORE_PATTERN.to_owned()))]
    pub ignore_pattern: Option<String>,
    /// Pattern of skeleton paths whose contents are copied verbatim, without
    /// placeholder substitution.
    #[builder(default = None)]
    pub verbatim_pattern: Option<String>,
}

impl Config {
    pub(crate) fn compiled_ignore(&self) -> Result<Option<regex::Regex>> {
        self.ignore_pattern
            .as_deref()
            .map(regex::Regex::new)
            .transpose()
            .map_err(Into::into)
    }

    pub(crate) fn compiled_verbatim(&self) -> Result<Option<regex::Regex>> {
        self.verbatim_pattern
            .as_deref()
            .map(regex::Regex::new)
            .transpose()
            .map_err(Into::into)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::builder().build()
    }
}

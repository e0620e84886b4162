//! Engine for skeleton-based scaffolding of CPython extension modules.

pub mod assets;
pub mod config;
pub mod plan;
pub mod registry;
pub mod scaffold;
pub mod skeleton;
pub mod subst;

mod utils;

pub use assets::{builtin_skeleton, builtin_skeletons, BUILTIN_NAMES};
pub use config::Config;
pub use plan::{Action, Applied, Plan, PlannedEntry, SkipReason};
pub use registry::{SkeletonInfo, SkeletonSet};
pub use scaffold::{scaffold_class, scaffold_project, Scaffolder};
pub use skeleton::{CIdent, Payload, RelPath, Skeleton, SkeletonFile};
pub use subst::{find_placeholders, multisub, Substitution, VarMap};
pub use utils::{SkeletonError, SkeletonResult};

pub(crate) use utils::Result;

#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../README.md"))]

// Public API re-exports from engine
pub use pyskel_engine::{
    builtin_skeleton, builtin_skeletons, find_placeholders, multisub, scaffold_class,
    scaffold_project, Action, Applied, CIdent, Config, Payload, Plan, PlannedEntry, RelPath,
    Scaffolder, Skeleton, SkeletonError, SkeletonFile, SkeletonInfo, SkeletonResult, SkeletonSet,
    SkipReason, Substitution, VarMap, BUILTIN_NAMES,
};

//! Skeletons embedded in the library.
//!
//! The `project` skeleton lays out a fresh CPython extension module and the
//! `class` skeleton adds one extension type to an existing module. Both can
//! be shadowed by same-named directories in a skeleton search root.

use crate::{RelPath, Skeleton, SkeletonFile};

/// C source for one extension type.
pub const CLASS_C: &str = include_str!("../skeletons/class/Class.c");
/// Header for one extension type.
pub const CLASS_H: &str = include_str!("../skeletons/class/Class.h");
/// Module entry point of an extension project.
pub const PROJECT_INIT_C: &str = include_str!("../skeletons/project/src/__init__.c");
/// Shared header of an extension project.
pub const PROJECT_INIT_H: &str = include_str!("../skeletons/project/src/__init__.h");

/// Names of the embedded skeletons.
pub const BUILTIN_NAMES: [&str; 2] = ["class", "project"];

/// Returns the embedded skeleton with the given name, if any.
pub fn builtin_skeleton(name: &str) -> Option<Skeleton> {
    let files = match name {
        "class" => vec![
            text_file("Class.c", CLASS_C),
            text_file("Class.h", CLASS_H),
        ],
        "project" => vec![
            text_file("src/__init__.c", PROJECT_INIT_C),
            text_file("src/__init__.h", PROJECT_INIT_H),
        ],
        _ => return None,
    };
    Some(Skeleton::from_files(name, files))
}

/// All embedded skeletons, in name order.
pub fn builtin_skeletons() -> Vec<Skeleton> {
    BUILTIN_NAMES
        .iter()
        .map(|name| builtin_skeleton(name).unwrap_or_else(|| unreachable!()))
        .collect()
}

fn text_file(rel_path: &str, text: &str) -> SkeletonFile {
    SkeletonFile::text(
        RelPath::new(rel_path).unwrap_or_else(|_| unreachable!()),
        text,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_name_resolves() {
        for name in BUILTIN_NAMES {
            assert!(builtin_skeleton(name).is_some(), "{name:?} should resolve");
        }
        assert!(builtin_skeleton("nonsense").is_none());
        assert_eq!(builtin_skeletons().len(), BUILTIN_NAMES.len());
    }

    #[test]
    fn class_skeleton_uses_the_expected_placeholders() {
        let skeleton = builtin_skeleton("class").unwrap();

        assert_eq!(
            skeleton.placeholders(),
            vec![
                "CLASS_NAME",
                "CLASS_NAME_UPPER",
                "PROJECT_MODULE",
                "PROJECT_MODULE_UPPER",
            ]
        );
    }

    #[test]
    fn project_skeleton_uses_the_expected_placeholders() {
        let skeleton = builtin_skeleton("project").unwrap();

        assert_eq!(
            skeleton.placeholders(),
            vec!["PROJECT_MODULE", "PROJECT_MODULE_UPPER"]
        );
        let files: Vec<_> = skeleton
            .files()
            .iter()
            .map(|f| f.rel_path.as_str())
            .collect();
        assert_eq!(files, vec!["src/__init__.c", "src/__init__.h"]);
    }
}

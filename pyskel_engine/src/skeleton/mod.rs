//! In-memory representation of skeleton trees and their building blocks.

mod file;
mod ident;
mod rel_path;
mod tree;

pub use file::{Payload, SkeletonFile};
pub use ident::CIdent;
pub use rel_path::RelPath;
pub use tree::Skeleton;

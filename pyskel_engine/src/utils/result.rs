/// Result wrapper for `SkeletonError`.
pub type SkeletonResult<T = ()> = std::result::Result<T, crate::SkeletonError>;

/// Crate-local alias.
pub(crate) type Result<T = ()> = SkeletonResult<T>;

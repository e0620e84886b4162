/// Error type for `pyskel` operations.
#[derive(thiserror::Error, Debug)]
pub enum SkeletonError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    PatternError(#[from] regex::Error),
    #[error(transparent)]
    WalkError(#[from] walkdir::Error),
    #[error("not a valid C identifier: {0:?}")]
    InvalidIdent(String),
    #[error("not a valid relative path: {0:?}")]
    InvalidPath(String),
    #[error("not a valid variable assignment (expected KEY=VALUE): {0:?}")]
    InvalidVar(String),
    #[error("no skeleton named {0:?}")]
    UnknownSkeleton(String),
    #[error("skeleton {skeleton:?} is nested deeper than {max_depth} directories at {path:?}")]
    DepthExceeded {
        skeleton: String,
        path: String,
        max_depth: usize,
    },
    #[error("two skeleton entries render to the same destination: {0:?}")]
    DuplicateDestination(String),
    #[error("destination already exists: {0}")]
    DestinationExists(std::path::PathBuf),
}

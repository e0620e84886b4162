pub(crate) mod error;
pub(crate) mod io;
pub(crate) mod result;

pub use error::SkeletonError;
pub use result::SkeletonResult;

pub(crate) use result::Result;

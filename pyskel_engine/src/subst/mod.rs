//! Placeholder substitution over skeleton text and paths.
//!
//! Placeholders use the `${KEY}` form, where `KEY` is an ASCII identifier.
//! Substitution is a single indexed pass over the input: values are never
//! re-scanned, so a value may itself contain `${...}` without triggering
//! further expansion.

mod multisub;
mod vars;

pub use multisub::{find_placeholders, multisub, Substitution};
pub use vars::VarMap;

pub(crate) use multisub::is_placeholder_key;

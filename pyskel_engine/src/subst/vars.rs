use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::{Result, SkeletonError};

use super::is_placeholder_key;

/// Variable assignments driving placeholder substitution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VarMap {
    vars: FxHashMap<String, String>,
}

impl VarMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `KEY=VALUE` assignments, as accepted on the command line.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vars = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| SkeletonError::InvalidVar(pair.to_owned()))?;
            if !is_placeholder_key(key) {
                return Err(SkeletonError::InvalidVar(pair.to_owned()));
            }
            vars.set(key, value);
        }
        Ok(vars)
    }

    /// Assigns a variable, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        debug_assert!(is_placeholder_key(&key));
        self.vars.insert(key, value.into());
    }

    /// Assigns a variable together with its `{KEY}_UPPER` companion.
    pub fn set_derived(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        self.set(format!("{key}_UPPER"), value.to_ascii_uppercase());
        self.set(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Variable names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.vars.keys().map(String::as_str).sorted().collect_vec()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl Extend<(String, String)> for VarMap {
    fn extend<T: IntoIterator<Item = (String, String)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

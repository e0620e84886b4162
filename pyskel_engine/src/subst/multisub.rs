use std::sync::OnceLock;

use itertools::Itertools;
use regex::Regex;

use crate::VarMap;

/// Record of a single replacement performed by [`multisub`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Substitution {
    /// Byte offset of the `${KEY}` token in the original input.
    pub offset: usize,
    /// Name of the replaced variable.
    pub key: String,
}

/// Replaces every `${KEY}` token that names a variable in `vars`.
///
/// All tokens are located first and replaced in a single left-to-right pass,
/// so replacement values are emitted verbatim even when they contain tokens
/// of their own. Tokens naming unknown variables are left untouched. The
/// returned substitutions are ordered by offset.
pub fn multisub(input: &str, vars: &VarMap) -> (String, Vec<Substitution>) {
    let mut matches = Vec::new();
    for (key, value) in vars.entries() {
        let token = format!("${{{key}}}");
        let mut start = 0;
        while let Some(i) = input[start..].find(&token) {
            let offset = start + i;
            matches.push((offset, key, value));
            start = offset + token.len();
        }
    }
    if matches.is_empty() {
        return (input.to_owned(), Vec::new());
    }

    // Valid keys contain no braces, so two distinct tokens can never start
    // at the same offset and sorting by offset alone is total.
    matches.sort_unstable_by_key(|&(offset, ..)| offset);

    let mut output = String::with_capacity(input.len());
    let mut substitutions = Vec::with_capacity(matches.len());
    let mut pos = 0;
    for (offset, key, value) in matches {
        output.push_str(&input[pos..offset]);
        output.push_str(value);
        substitutions.push(Substitution {
            offset,
            key: key.to_owned(),
        });
        // Skip the token: `${` + key + `}`.
        pos = offset + key.len() + 3;
    }
    output.push_str(&input[pos..]);

    (output, substitutions)
}

/// Returns the distinct placeholder keys appearing in `input`, sorted.
pub fn find_placeholders(input: &str) -> Vec<String> {
    placeholder_re()
        .captures_iter(input)
        .map(|captures| captures[1].to_owned())
        .sorted()
        .dedup()
        .collect_vec()
}

/// Checks that `key` is usable inside a `${KEY}` token.
pub(crate) fn is_placeholder_key(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap_or_else(|_| unreachable!())
    })
}

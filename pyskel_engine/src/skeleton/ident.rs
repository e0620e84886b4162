use std::str::FromStr;

use crate::{Result, SkeletonError};

/// C keywords that can never serve as identifiers.
const C_KEYWORDS: [&str; 32] = [
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "int", "long", "register", "return", "short",
    "signed", "sizeof", "static", "struct", "switch", "typedef", "union", "unsigned", "void",
    "volatile", "while",
];

/// A valid C identifier, as used for module and class names.
///
/// Generated code concatenates these into symbol names, so the usual
/// identifier rules apply and C keywords are rejected outright.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CIdent(String);

impl CIdent {
    pub fn new(ident: impl Into<String>) -> Result<Self> {
        let ident = ident.into();
        let mut chars = ident.chars();
        let valid = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid || C_KEYWORDS.contains(&ident.as_str()) {
            return Err(SkeletonError::InvalidIdent(ident));
        }
        Ok(Self(ident))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Uppercase form, as used in include guards and macro prefixes.
    pub fn to_upper(&self) -> String {
        self.0.to_ascii_uppercase()
    }
}

impl FromStr for CIdent {
    type Err = SkeletonError;
    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl std::ops::Deref for CIdent {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for CIdent {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CIdent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_identifiers() {
        for ident in ["mylib", "my_lib", "_hidden", "Vec2", "x1"] {
            assert!(CIdent::new(ident).is_ok(), "{ident:?} should be accepted");
        }
    }

    #[test]
    fn rejects_malformed_identifiers() {
        for ident in ["", "1x", "my-lib", "my lib", "my.lib", "日本語"] {
            assert!(
                matches!(CIdent::new(ident), Err(SkeletonError::InvalidIdent(_))),
                "{ident:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_c_keywords() {
        for ident in ["int", "struct", "while", "volatile"] {
            assert!(
                matches!(CIdent::new(ident), Err(SkeletonError::InvalidIdent(_))),
                "{ident:?} should be rejected"
            );
        }
    }

    #[test]
    fn uppercases_for_macro_prefixes() {
        let ident = CIdent::new("my_lib2").unwrap();

        assert_eq!(ident.to_upper(), "MY_LIB2");
    }

    #[test]
    fn parses_from_str() {
        let ident: CIdent = "spam".parse().unwrap();

        assert_eq!(ident.as_str(), "spam");
        assert_eq!(ident.to_string(), "spam");
    }
}

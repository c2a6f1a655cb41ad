//! Base addresses and URI composition for navigation nodes.

use std::fmt;

use itertools::Itertools;

use crate::domain::error::{DomainError, DomainResult};

const SEPARATOR: char = '/';

/// Address seed attached to a node, usually the navigation root.
///
/// Kept as given; the trailing separator is normalized in only when composing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BaseUri(String);

impl BaseUri {
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(DomainError::invalid_argument("base uri cannot be empty"));
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(DomainError::invalid_argument(format!(
                "base uri contains whitespace: {raw}"
            )));
        }
        // segments are appended to the path, so a query or fragment would swallow them
        if raw.contains(['?', '#']) {
            return Err(DomainError::invalid_argument(format!(
                "base uri cannot carry a query or fragment: {raw}"
            )));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn with_trailing_separator(&self) -> String {
        if self.0.ends_with(SEPARATOR) {
            self.0.clone()
        } else {
            format!("{}{}", self.0, SEPARATOR)
        }
    }

    /// `base/` followed by each segment and a trailing separator.
    pub fn compose<'a, I>(&self, segments: I) -> Uri
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut uri = self.with_trailing_separator();
        let path = segments.into_iter().join("/");
        if !path.is_empty() {
            uri.push_str(&path);
            uri.push(SEPARATOR);
        }
        Uri(uri)
    }
}

impl fmt::Display for BaseUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for BaseUri {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// A node's fully resolved address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uri(String);

impl Uri {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Uri {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Uri {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://localhost:8080/portal/classic/")]
    #[case("http://localhost:8080/portal/classic")]
    fn given_base_with_or_without_separator_when_composing_then_same_uri(#[case] raw: &str) {
        let base = BaseUri::parse(raw).unwrap();
        let uri = base.compose(["parent", "child"]);
        assert_eq!(uri, "http://localhost:8080/portal/classic/parent/child/");
    }

    #[test]
    fn given_no_segments_when_composing_then_returns_normalized_base() {
        let base = BaseUri::parse("/portal/classic").unwrap();
        assert_eq!(base.compose([]), "/portal/classic/");
        assert_eq!(base.as_str(), "/portal/classic");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("http://localhost/a b")]
    #[case("http://localhost/portal?x=1")]
    #[case("http://localhost/portal#top")]
    fn given_malformed_base_when_parsing_then_invalid_argument(#[case] raw: &str) {
        let err = BaseUri::parse(raw).unwrap_err();
        assert!(err.is_invalid_argument());
    }
}

//! Display-name payload carried by navigation nodes.
//!
//! The tree stores and copies this data but never resolves locales itself.

use std::collections::BTreeMap;

/// A single non-localized value, a set of locale → text mappings, or both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizedString {
    value: Option<String>,
    localized: BTreeMap<String, String>,
}

impl LocalizedString {
    /// Non-localized value only.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            localized: BTreeMap::new(),
        }
    }

    pub fn with_localized(mut self, locale: impl Into<String>, text: impl Into<String>) -> Self {
        self.set_localized_value(locale, text);
        self
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn set_value(&mut self, value: Option<String>) {
        self.value = value;
    }

    /// Exact-key lookup; no fallback between locales.
    pub fn localized_value(&self, locale: &str) -> Option<&str> {
        self.localized.get(locale).map(String::as_str)
    }

    pub fn set_localized_value(&mut self, locale: impl Into<String>, text: impl Into<String>) {
        self.localized.insert(locale.into(), text.into());
    }

    pub fn remove_localized_value(&mut self, locale: &str) -> Option<String> {
        self.localized.remove(locale)
    }

    pub fn is_localized(&self) -> bool {
        !self.localized.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.localized.is_empty()
    }

    /// Locale → text pairs in key order.
    pub fn localized(&self) -> impl Iterator<Item = (&str, &str)> {
        self.localized
            .iter()
            .map(|(locale, text)| (locale.as_str(), text.as_str()))
    }
}

/// Something with a single UI-friendly name.
pub trait Displayable {
    fn display_name(&self) -> Option<&str>;
    fn set_display_name(&mut self, name: Option<String>);
}

/// A [`Displayable`] that can also carry per-locale names.
pub trait LocalizedDisplayable: Displayable {
    fn display_names(&self) -> &LocalizedString;
    fn set_display_names(&mut self, names: LocalizedString);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_localized_values_when_listing_then_sorted_by_locale() {
        let names = LocalizedString::new("Home")
            .with_localized("fr", "Accueil")
            .with_localized("de", "Startseite");

        let pairs: Vec<_> = names.localized().collect();
        assert_eq!(pairs, vec![("de", "Startseite"), ("fr", "Accueil")]);
        assert_eq!(names.value(), Some("Home"));
        assert!(names.is_localized());
    }

    #[test]
    fn given_missing_locale_when_looking_up_then_returns_none() {
        let names = LocalizedString::new("Home").with_localized("fr", "Accueil");
        assert_eq!(names.localized_value("fr"), Some("Accueil"));
        assert_eq!(names.localized_value("fr-CA"), None);
    }

    #[test]
    fn given_default_when_checking_then_is_empty() {
        let mut names = LocalizedString::default();
        assert!(names.is_empty());
        names.set_localized_value("en", "Home");
        assert!(!names.is_empty());
        assert_eq!(names.remove_localized_value("en"), Some("Home".to_string()));
        assert!(names.is_empty());
    }
}

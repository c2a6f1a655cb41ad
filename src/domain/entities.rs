//! Domain entities: core data structures

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::displayable::{Displayable, LocalizedDisplayable, LocalizedString};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::uri::BaseUri;

/// Name given to the root node of every navigation.
pub const ROOT_NODE_NAME: &str = "default";

/// Kind of site owning a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteType {
    Portal,
    Group,
    User,
}

impl fmt::Display for SiteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SiteType::Portal => "portal",
            SiteType::Group => "group",
            SiteType::User => "user",
        };
        f.write_str(s)
    }
}

/// Identity of the site a navigation belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SiteId {
    #[serde(rename = "type")]
    pub site_type: SiteType,
    pub name: String,
}

impl SiteId {
    pub fn new(site_type: SiteType, name: impl Into<String>) -> Self {
        Self {
            site_type,
            name: name.into(),
        }
    }

    pub fn portal(name: impl Into<String>) -> Self {
        Self::new(SiteType::Portal, name)
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.site_type, self.name)
    }
}

/// Whether and how a node is shown to users.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Displayed,
    Hidden,
    System,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Visibility::Displayed => "displayed",
            Visibility::Hidden => "hidden",
            Visibility::System => "system",
        };
        f.write_str(s)
    }
}

/// Data payload for navigation nodes.
///
/// Everything except `name` is opaque to the tree: it is stored and copied,
/// never validated against other nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    name: String,
    navigation_root: bool,
    /// Address seed for this node's subtree
    pub base_uri: Option<BaseUri>,
    pub display_names: LocalizedString,
    pub icon_name: Option<String>,
    pub visibility: Visibility,
    /// Children reflect the fully materialized subtree
    pub nodes_loaded: bool,
}

impl NodeData {
    pub fn new(name: &str) -> DomainResult<Self> {
        validate_name(name)?;
        Ok(Self::with_valid_name(name.to_string(), false))
    }

    /// Payload of a navigation root: named [`ROOT_NODE_NAME`], contributes no URI segment.
    pub fn root() -> Self {
        Self::with_valid_name(ROOT_NODE_NAME.to_string(), true)
    }

    fn with_valid_name(name: String, navigation_root: bool) -> Self {
        Self {
            name,
            navigation_root,
            base_uri: None,
            display_names: LocalizedString::default(),
            icon_name: None,
            visibility: Visibility::default(),
            nodes_loaded: true,
        }
    }

    /// Same payload under a different name; a renamed navigation root becomes an ordinary node.
    pub fn renamed(&self, name: &str) -> DomainResult<Self> {
        validate_name(name)?;
        Ok(Self {
            name: name.to_string(),
            navigation_root: false,
            ..self.clone()
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_navigation_root(&self) -> bool {
        self.navigation_root
    }
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Displayable for NodeData {
    fn display_name(&self) -> Option<&str> {
        self.display_names.value()
    }

    fn set_display_name(&mut self, name: Option<String>) {
        self.display_names.set_value(name);
    }
}

impl LocalizedDisplayable for NodeData {
    fn display_names(&self) -> &LocalizedString {
        &self.display_names
    }

    fn set_display_names(&mut self, names: LocalizedString) {
        self.display_names = names;
    }
}

pub(crate) fn validate_name(name: &str) -> DomainResult<()> {
    if name.is_empty() {
        return Err(DomainError::invalid_argument("node name cannot be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_empty_name_when_creating_data_then_invalid_argument() {
        assert!(NodeData::new("").unwrap_err().is_invalid_argument());
        assert!(NodeData::new("home").unwrap().renamed("").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn given_whitespace_name_when_creating_data_then_kept_verbatim() {
        assert_eq!(NodeData::new("  ").unwrap().name(), "  ");
        assert_eq!(NodeData::new("home").unwrap().renamed("\t").unwrap().name(), "\t");
    }

    #[test]
    fn given_root_payload_when_renamed_then_loses_root_marker() {
        let root = NodeData::root();
        assert!(root.is_navigation_root());
        assert_eq!(root.name(), ROOT_NODE_NAME);

        let renamed = root.renamed("foo").unwrap();
        assert_eq!(renamed.name(), "foo");
        assert!(!renamed.is_navigation_root());
    }

    #[test]
    fn given_display_name_when_set_through_trait_then_stored_as_value() {
        let mut data = NodeData::new("home").unwrap();
        data.set_display_name(Some("Home".into()));
        assert_eq!(data.display_name(), Some("Home"));
        assert_eq!(data.display_names().value(), Some("Home"));
    }

    #[test]
    fn given_site_id_when_formatting_then_type_and_name() {
        assert_eq!(SiteId::portal("classic").to_string(), "portal::classic");
    }
}

//! TOML description of a site's navigation.
//!
//! ```toml
//! [site]
//! type = "portal"
//! name = "classic"
//! base_uri = "http://localhost:8080/portal/classic/"
//!
//! [[nodes]]
//! name = "home"
//! label = "Home"
//! [nodes.labels]
//! fr = "Accueil"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{SiteId, SiteType, Visibility};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteDescriptor {
    pub site: SiteSection,
    #[serde(default)]
    pub nodes: Vec<NodeDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSection {
    #[serde(rename = "type", default = "default_site_type")]
    pub site_type: SiteType,
    pub name: String,
    pub priority: Option<i32>,
    pub base_uri: Option<String>,
}

fn default_site_type() -> SiteType {
    SiteType::Portal
}

impl SiteSection {
    pub fn site_id(&self) -> SiteId {
        SiteId::new(self.site_type, self.name.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    pub name: String,
    /// Non-localized display name
    pub label: Option<String>,
    /// Locale → display name
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    pub icon: Option<String>,
    #[serde(default)]
    pub visibility: Visibility,
    /// `None` leaves the node as an unloaded placeholder
    pub nodes: Option<Vec<NodeDescriptor>>,
}

impl SiteDescriptor {
    pub fn from_toml_str(content: &str, origin: &Path) -> ApplicationResult<Self> {
        toml::from_str(content).map_err(|e| ApplicationError::Descriptor {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn from_file(path: &Path) -> ApplicationResult<Self> {
        let content = std::fs::read_to_string(path).with_path_context("read site descriptor", path)?;
        Self::from_toml_str(&content, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_minimal_descriptor_when_parsing_then_defaults_apply() {
        let content = r#"
[site]
name = "classic"

[[nodes]]
name = "home"
"#;
        let desc = SiteDescriptor::from_toml_str(content, Path::new("inline")).unwrap();
        assert_eq!(desc.site.site_type, SiteType::Portal);
        assert_eq!(desc.site.priority, None);
        assert_eq!(desc.nodes.len(), 1);
        assert_eq!(desc.nodes[0].visibility, Visibility::Displayed);
        assert!(desc.nodes[0].nodes.is_none());
    }

    #[test]
    fn given_unknown_visibility_when_parsing_then_descriptor_error() {
        let content = r#"
[site]
name = "classic"

[[nodes]]
name = "home"
visibility = "sometimes"
"#;
        let err = SiteDescriptor::from_toml_str(content, Path::new("inline")).unwrap_err();
        assert!(matches!(err, ApplicationError::Descriptor { .. }));
    }
}

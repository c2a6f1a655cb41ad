//! Materializes a [`SiteDescriptor`] into a [`Navigation`].

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::application::descriptor::{NodeDescriptor, SiteDescriptor};
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::{BaseUri, LocalizedString, Navigation, NodeData, NodeId};

/// Builds the navigation described by `descriptor`.
///
/// Descriptor values win; `settings` only fill in a missing priority or base URI.
/// Nodes with a `nodes` list (even an empty one) are marked loaded, the others
/// stay placeholders.
#[instrument(level = "debug", skip(descriptor, settings), fields(site = %descriptor.site.name))]
pub fn build_navigation(descriptor: &SiteDescriptor, settings: &Settings) -> ApplicationResult<Navigation> {
    let priority = descriptor.site.priority.unwrap_or(settings.priority);
    let mut navigation = Navigation::new(Some(descriptor.site.site_id()), priority)?;

    let base_uri = descriptor
        .site
        .base_uri
        .as_deref()
        .or(settings.base_uri.as_deref())
        .map(BaseUri::parse)
        .transpose()?;
    navigation.set_base_uri(base_uri)?;

    let root = navigation.root();
    let tree = navigation.tree_mut();
    tree.set_nodes_loaded(root, true)?;

    let mut stack: Vec<(&NodeDescriptor, NodeId)> =
        descriptor.nodes.iter().rev().map(|n| (n, root)).collect();

    while let Some((desc, parent)) = stack.pop() {
        let id = tree.create_node_with(node_data(desc)?);
        tree.add_node(parent, id)?;
        debug!("loaded node '{}' under {}", desc.name, parent);

        if let Some(children) = &desc.nodes {
            for child in children.iter().rev() {
                stack.push((child, id));
            }
        }
    }

    info!(
        "built navigation for {} with {} nodes",
        navigation.site_id(),
        navigation.tree().len() - 1
    );
    Ok(navigation)
}

/// Reads a descriptor file and builds its navigation.
pub fn load_navigation(path: &Path, settings: &Settings) -> ApplicationResult<Navigation> {
    let descriptor = SiteDescriptor::from_file(path)?;
    build_navigation(&descriptor, settings)
}

fn node_data(desc: &NodeDescriptor) -> ApplicationResult<NodeData> {
    let mut data = NodeData::new(&desc.name)?;

    let mut names = LocalizedString::default();
    names.set_value(desc.label.clone());
    for (locale, text) in &desc.labels {
        names.set_localized_value(locale.clone(), text.clone());
    }
    data.display_names = names;
    data.icon_name = desc.icon.clone();
    data.visibility = desc.visibility;
    data.nodes_loaded = desc.nodes.is_some();
    Ok(data)
}

//! Domain layer: the navigation tree and its payload
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod displayable;
pub mod entities;
pub mod error;
pub mod navigation;
pub mod render;
pub mod uri;

pub use arena::{NodeId, NodeTree, TreeNode};
pub use displayable::{Displayable, LocalizedDisplayable, LocalizedString};
pub use entities::{NodeData, SiteId, SiteType, Visibility, ROOT_NODE_NAME};
pub use error::{DomainError, DomainResult};
pub use navigation::Navigation;
pub use render::{Label, TreeDisplay};
pub use uri::{BaseUri, Uri};

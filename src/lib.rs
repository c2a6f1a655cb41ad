//! navtree: site navigation trees.
//!
//! A navigation is an ordered tree of named nodes. Every structural edit is
//! validated before it is applied (unique sibling names, single parent, no
//! cycles) and each node's URI is derived from its position below the
//! nearest node carrying a base URI.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{
    BaseUri, DomainError, DomainResult, LocalizedString, Navigation, NodeData, NodeId, NodeTree,
    SiteId, SiteType, Uri, Visibility,
};

//! Application layer: turning site descriptions into navigations
//!
//! This layer orchestrates domain logic and owns all file reading.

pub mod descriptor;
pub mod error;
pub mod error_ext;
pub mod loader;

pub use descriptor::{NodeDescriptor, SiteDescriptor, SiteSection};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use loader::{build_navigation, load_navigation};

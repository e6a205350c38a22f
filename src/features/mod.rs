//! # Features Layer
//!
//! Domain features behind the command surface.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0

pub mod designation;
pub mod lookup;
pub mod permissions;

pub use designation::{DesignationError, DesignationService};
pub use lookup::{LookupError, RobloxClient, RobloxUser};
pub use permissions::{PermissionConfig, PermissionTier};

//! Workspace model for geodatabase-style stores
//!
//! A geodatabase is addressed purely by path: the database is a container,
//! feature datasets are containers inside it, feature classes and tables are
//! leaf items. The [`Workspace`] trait exposes the handful of operations the
//! refresh needs; [`FileWorkspace`] is the file-backed engine behind it.

mod file_workspace;
mod workspace;

pub use file_workspace::FileWorkspace;
pub use workspace::Workspace;

use serde::{Deserialize, Serialize};

/// File suffix for a stored feature class.
pub const CLASS_SUFFIX: &str = ".geojson";
/// File suffix for a stored tabular dataset.
pub const TABLE_SUFFIX: &str = ".table.json";

/// Coordinate system descriptor, read once from a reference class and applied
/// to every destination container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpatialReference {
    pub name: String,
    pub wkid: u32,
}

impl std::fmt::Display for SpatialReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (WKID {})", self.name, self.wkid)
    }
}

use std::path::Path;

use crate::error::Result;
use crate::geodata::SpatialReference;

/// Data-access seam for geodatabase-style stores.
///
/// Every operation the refresh sequences goes through this trait, so the
/// orchestration can be exercised against any engine. Paths address items the
/// way a desktop GIS does: `<database>/<dataset>/<class>`, with source
/// connections being plain paths too.
pub trait Workspace {
    /// Probe a database, dataset, class, table, or connection.
    fn exists(&self, path: &Path) -> bool;

    /// Create an empty geodatabase. Fails if one already exists at `path`.
    fn create_database(&self, path: &Path) -> Result<()>;

    /// Remove a geodatabase. Removing a missing database is a no-op.
    fn delete_database(&self, path: &Path) -> Result<()>;

    /// Rename a geodatabase in place (same parent directory).
    fn rename_database(&self, from: &Path, to: &Path) -> Result<()>;

    /// Compact a geodatabase, releasing any stale locks held on it.
    fn compact(&self, database: &Path) -> Result<()>;

    /// Read the coordinate system descriptor of a feature class.
    fn spatial_reference_of(&self, class: &Path) -> Result<SpatialReference>;

    /// Create an empty feature dataset carrying `spatial_ref`.
    fn create_feature_dataset(
        &self,
        database: &Path,
        name: &str,
        spatial_ref: &SpatialReference,
    ) -> Result<()>;

    /// Copy a feature class into a destination dataset under `name`,
    /// overwriting any prior copy. The destination container takes precedence
    /// for the spatial reference of the written class.
    fn convert_feature_class(&self, source: &Path, dest_dataset: &Path, name: &str) -> Result<()>;

    /// Copy a tabular dataset into a database under `name`, overwriting any
    /// prior copy.
    fn copy_table(&self, source: &Path, database: &Path, name: &str) -> Result<()>;

    /// Clip a feature class by a boundary polygon and write the result to
    /// `destination`. Features falling entirely outside the boundary are
    /// dropped; geometries straddling it are cut to it.
    fn clip(&self, source: &Path, boundary: &Path, destination: &Path) -> Result<()>;
}

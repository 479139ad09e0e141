//! File-backed geodatabase engine
//!
//! Layout on disk:
//! - database        -> directory containing a `catalog.json` marker
//! - feature dataset -> subdirectory containing a `dataset.json` with the
//!   container's spatial reference
//! - feature class   -> `<name>.geojson`, a GeoJSON FeatureCollection whose
//!   `spatial_reference` foreign member carries the coordinate system
//! - table           -> `<name>.table.json`, an array of row objects
//!
//! Clipping is a real geometric operation: polygons are intersected with the
//! boundary, lines are cut to it, points are kept when they fall inside it.

use chrono::{DateTime, Utc};
use geo::{BooleanOps, Intersects, MultiLineString, MultiPolygon, Point};
use geojson::{Feature, FeatureCollection, GeoJson, JsonObject};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FieldpackError, Result};
use crate::geodata::{SpatialReference, Workspace, CLASS_SUFFIX, TABLE_SUFFIX};

const CATALOG_FILE: &str = "catalog.json";
const DATASET_FILE: &str = "dataset.json";
const LOCK_SUFFIX: &str = ".lock";
const SPATIAL_REF_KEY: &str = "spatial_reference";

#[derive(Debug, Serialize, Deserialize)]
struct CatalogMeta {
    kind: String,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_compacted: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct DatasetMeta {
    spatial_reference: SpatialReference,
}

/// File-backed [`Workspace`] implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileWorkspace;

impl FileWorkspace {
    pub fn new() -> Self {
        FileWorkspace
    }

    fn catalog_path(database: &Path) -> PathBuf {
        database.join(CATALOG_FILE)
    }

    fn require_database(database: &Path) -> Result<()> {
        if !Self::catalog_path(database).exists() {
            return Err(FieldpackError::NotFound(format!(
                "no geodatabase at {}",
                database.display()
            )));
        }
        Ok(())
    }

    fn dataset_meta(dataset_dir: &Path) -> Result<DatasetMeta> {
        let path = dataset_dir.join(DATASET_FILE);
        if !path.exists() {
            return Err(FieldpackError::NotFound(format!(
                "no feature dataset at {}",
                dataset_dir.display()
            )));
        }
        let contents = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn read_collection(class: &Path) -> Result<FeatureCollection> {
        let file = suffixed(class, CLASS_SUFFIX);
        if !file.exists() {
            return Err(FieldpackError::NotFound(format!(
                "no feature class at {}",
                class.display()
            )));
        }
        let contents = fs::read_to_string(&file)?;
        match contents.parse::<GeoJson>()? {
            GeoJson::FeatureCollection(fc) => Ok(fc),
            _ => Err(FieldpackError::Workspace(format!(
                "{} is not a feature collection",
                file.display()
            ))),
        }
    }

    fn write_collection(class: &Path, collection: FeatureCollection) -> Result<()> {
        let file = suffixed(class, CLASS_SUFFIX);
        fs::write(&file, GeoJson::FeatureCollection(collection).to_string())?;
        Ok(())
    }
}

fn suffixed(path: &Path, suffix: &str) -> PathBuf {
    // Class names routinely contain dots (`sde.SDE.EngGPSPts`), so the
    // suffix is appended rather than set via `with_extension`.
    let mut os = path.as_os_str().to_os_string();
    os.push(suffix);
    PathBuf::from(os)
}

fn collection_spatial_reference(collection: &FeatureCollection) -> Option<SpatialReference> {
    collection
        .foreign_members
        .as_ref()
        .and_then(|members| members.get(SPATIAL_REF_KEY))
        .and_then(|value| serde_json::from_value(value.clone()).ok())
}

fn set_collection_spatial_reference(
    collection: &mut FeatureCollection,
    spatial_ref: &SpatialReference,
) -> Result<()> {
    let members = collection.foreign_members.get_or_insert_with(JsonObject::new);
    members.insert(
        SPATIAL_REF_KEY.to_string(),
        serde_json::to_value(spatial_ref)?,
    );
    Ok(())
}

fn remove_lock_files(dir: &Path) -> Result<usize> {
    let mut removed = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            removed += remove_lock_files(&path)?;
        } else if path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(LOCK_SUFFIX))
        {
            fs::remove_file(&path)?;
            removed += 1;
        }
    }
    Ok(removed)
}

/// Gather every polygon in the boundary class into one clip surface.
fn boundary_surface(boundary: &FeatureCollection) -> Result<MultiPolygon<f64>> {
    let mut polygons = Vec::new();
    for feature in &boundary.features {
        let Some(geometry) = &feature.geometry else {
            continue;
        };
        match geo::Geometry::<f64>::try_from(geometry.clone())? {
            geo::Geometry::Polygon(p) => polygons.push(p),
            geo::Geometry::MultiPolygon(mp) => polygons.extend(mp.0),
            _ => {}
        }
    }
    if polygons.is_empty() {
        return Err(FieldpackError::Geometry(
            "boundary class contains no polygon".to_string(),
        ));
    }
    Ok(MultiPolygon(polygons))
}

/// Clip one geometry against the boundary surface. Returns `None` when
/// nothing of the geometry falls inside the boundary.
fn clip_geometry(
    boundary: &MultiPolygon<f64>,
    geometry: &geo::Geometry<f64>,
) -> Result<Option<geo::Geometry<f64>>> {
    match geometry {
        geo::Geometry::Point(point) => {
            Ok(boundary.intersects(point).then(|| geo::Geometry::Point(*point)))
        }
        geo::Geometry::MultiPoint(points) => {
            let kept: Vec<Point<f64>> = points
                .0
                .iter()
                .filter(|p| boundary.intersects(*p))
                .copied()
                .collect();
            if kept.is_empty() {
                Ok(None)
            } else {
                Ok(Some(geo::Geometry::MultiPoint(geo::MultiPoint(kept))))
            }
        }
        geo::Geometry::LineString(line) => {
            let clipped = boundary.clip(&MultiLineString(vec![line.clone()]), false);
            Ok(non_empty_lines(clipped))
        }
        geo::Geometry::MultiLineString(lines) => {
            let clipped = boundary.clip(lines, false);
            Ok(non_empty_lines(clipped))
        }
        geo::Geometry::Polygon(polygon) => {
            let clipped = boundary.intersection(&MultiPolygon(vec![polygon.clone()]));
            Ok(non_empty_polygons(clipped))
        }
        geo::Geometry::MultiPolygon(polygons) => {
            let clipped = boundary.intersection(polygons);
            Ok(non_empty_polygons(clipped))
        }
        other => Err(FieldpackError::Geometry(format!(
            "unsupported geometry for clip: {}",
            geometry_kind(other)
        ))),
    }
}

fn non_empty_lines(lines: MultiLineString<f64>) -> Option<geo::Geometry<f64>> {
    if lines.0.iter().all(|ls| ls.0.len() < 2) {
        None
    } else {
        Some(geo::Geometry::MultiLineString(lines))
    }
}

fn non_empty_polygons(polygons: MultiPolygon<f64>) -> Option<geo::Geometry<f64>> {
    if polygons.0.is_empty() {
        None
    } else {
        Some(geo::Geometry::MultiPolygon(polygons))
    }
}

fn geometry_kind(geometry: &geo::Geometry<f64>) -> &'static str {
    match geometry {
        geo::Geometry::Point(_) => "Point",
        geo::Geometry::Line(_) => "Line",
        geo::Geometry::LineString(_) => "LineString",
        geo::Geometry::Polygon(_) => "Polygon",
        geo::Geometry::MultiPoint(_) => "MultiPoint",
        geo::Geometry::MultiLineString(_) => "MultiLineString",
        geo::Geometry::MultiPolygon(_) => "MultiPolygon",
        geo::Geometry::GeometryCollection(_) => "GeometryCollection",
        geo::Geometry::Rect(_) => "Rect",
        geo::Geometry::Triangle(_) => "Triangle",
    }
}

impl Workspace for FileWorkspace {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
            || suffixed(path, CLASS_SUFFIX).exists()
            || suffixed(path, TABLE_SUFFIX).exists()
    }

    fn create_database(&self, path: &Path) -> Result<()> {
        if path.exists() {
            return Err(FieldpackError::AlreadyExists(format!(
                "{} already exists",
                path.display()
            )));
        }
        fs::create_dir_all(path)?;
        let meta = CatalogMeta {
            kind: "geodatabase".to_string(),
            created_at: Utc::now(),
            last_compacted: None,
        };
        fs::write(
            Self::catalog_path(path),
            serde_json::to_string_pretty(&meta)?,
        )?;
        tracing::debug!("Created geodatabase {}", path.display());
        Ok(())
    }

    fn delete_database(&self, path: &Path) -> Result<()> {
        if path.exists() {
            fs::remove_dir_all(path)?;
            tracing::debug!("Removed geodatabase {}", path.display());
        }
        Ok(())
    }

    fn rename_database(&self, from: &Path, to: &Path) -> Result<()> {
        if !from.exists() {
            return Err(FieldpackError::NotFound(format!(
                "cannot rename missing database {}",
                from.display()
            )));
        }
        fs::rename(from, to)?;
        Ok(())
    }

    fn compact(&self, database: &Path) -> Result<()> {
        Self::require_database(database)?;
        let removed = remove_lock_files(database)?;
        if removed > 0 {
            tracing::debug!("Released {} stale locks in {}", removed, database.display());
        }
        let contents = fs::read_to_string(Self::catalog_path(database))?;
        let mut meta: CatalogMeta = serde_json::from_str(&contents)?;
        meta.last_compacted = Some(Utc::now());
        fs::write(
            Self::catalog_path(database),
            serde_json::to_string_pretty(&meta)?,
        )?;
        Ok(())
    }

    fn spatial_reference_of(&self, class: &Path) -> Result<SpatialReference> {
        let collection = Self::read_collection(class)?;
        collection_spatial_reference(&collection).ok_or_else(|| {
            FieldpackError::Workspace(format!(
                "{} carries no spatial reference",
                class.display()
            ))
        })
    }

    fn create_feature_dataset(
        &self,
        database: &Path,
        name: &str,
        spatial_ref: &SpatialReference,
    ) -> Result<()> {
        Self::require_database(database)?;
        let dir = database.join(name);
        fs::create_dir_all(&dir)?;
        let meta = DatasetMeta {
            spatial_reference: spatial_ref.clone(),
        };
        fs::write(dir.join(DATASET_FILE), serde_json::to_string_pretty(&meta)?)?;
        Ok(())
    }

    fn convert_feature_class(&self, source: &Path, dest_dataset: &Path, name: &str) -> Result<()> {
        let mut collection = Self::read_collection(source)?;
        let meta = Self::dataset_meta(dest_dataset)?;
        // The destination container's coordinate system wins; coordinates are
        // carried over as-is (transformation differences between the systems
        // this tool is used with are sub-tolerance).
        set_collection_spatial_reference(&mut collection, &meta.spatial_reference)?;
        Self::write_collection(&dest_dataset.join(name), collection)
    }

    fn copy_table(&self, source: &Path, database: &Path, name: &str) -> Result<()> {
        let src_file = suffixed(source, TABLE_SUFFIX);
        if !src_file.exists() {
            return Err(FieldpackError::NotFound(format!(
                "no table at {}",
                source.display()
            )));
        }
        Self::require_database(database)?;
        let contents = fs::read_to_string(&src_file)?;
        let rows: serde_json::Value = serde_json::from_str(&contents)?;
        if !rows.is_array() {
            return Err(FieldpackError::Workspace(format!(
                "{} is not a row table",
                src_file.display()
            )));
        }
        let dest = suffixed(&database.join(name), TABLE_SUFFIX);
        fs::write(dest, serde_json::to_string_pretty(&rows)?)?;
        Ok(())
    }

    fn clip(&self, source: &Path, boundary: &Path, destination: &Path) -> Result<()> {
        let boundary_fc = Self::read_collection(boundary)?;
        let surface = boundary_surface(&boundary_fc)?;
        let source_fc = Self::read_collection(source)?;

        let mut kept = Vec::new();
        for feature in source_fc.features {
            let Some(geometry) = &feature.geometry else {
                continue;
            };
            let geom = geo::Geometry::<f64>::try_from(geometry.clone())?;
            if let Some(clipped) = clip_geometry(&surface, &geom)? {
                kept.push(Feature {
                    geometry: Some(geojson::Geometry::new(geojson::Value::from(&clipped))),
                    ..feature
                });
            }
        }

        let mut collection = FeatureCollection {
            bbox: None,
            features: kept,
            foreign_members: source_fc.foreign_members,
        };
        // Destination container's spatial reference wins when it has one
        if let Some(dataset_dir) = destination.parent() {
            if let Ok(meta) = Self::dataset_meta(dataset_dir) {
                set_collection_spatial_reference(&mut collection, &meta.spatial_reference)?;
            }
        }
        Self::write_collection(destination, collection)
    }
}

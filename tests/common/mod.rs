#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use fieldpack::config::Config;

pub const SR_JSON: &str =
    r#"{"name":"NAD_1983_HARN_Adj_MN_St_Louis_CS96_Feet","wkid":103777}"#;

pub fn class_file(class: &Path) -> PathBuf {
    PathBuf::from(format!("{}.geojson", class.display()))
}

pub fn table_file(table: &Path) -> PathBuf {
    PathBuf::from(format!("{}.table.json", table.display()))
}

/// Write a feature class with the fixture spatial reference.
pub fn write_class(class: &Path, features: &[String]) {
    let raw = format!(
        r#"{{"type":"FeatureCollection","spatial_reference":{},"features":[{}]}}"#,
        SR_JSON,
        features.join(",")
    );
    fs::write(class_file(class), raw).unwrap();
}

pub fn point_feature(x: f64, y: f64) -> String {
    format!(
        r#"{{"type":"Feature","properties":{{}},"geometry":{{"type":"Point","coordinates":[{},{}]}}}}"#,
        x, y
    )
}

pub fn polygon_feature(coords: &str) -> String {
    format!(
        r#"{{"type":"Feature","properties":{{}},"geometry":{{"type":"Polygon","coordinates":[{}]}}}}"#,
        coords
    )
}

/// Unit square-ish clip boundary from (0,0) to (10,10).
pub fn boundary_feature() -> String {
    polygon_feature("[[0.0,0.0],[10.0,0.0],[10.0,10.0],[0.0,10.0],[0.0,0.0]]")
}

pub fn read_feature_count(class: &Path) -> usize {
    let contents = fs::read_to_string(class_file(class)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
    value["features"].as_array().unwrap().len()
}

/// Full source-side fixture: an enterprise connection with qualified names,
/// a local extras database, an assessor table, a county connection, and a
/// clip boundary, plus a config wired to all of them.
pub struct TestEnvironment {
    pub temp: TempDir,
    pub config: Config,
}

impl TestEnvironment {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        // Enterprise database, classes addressed as sde.SDE.<ds>/sde.SDE.<class>
        let enterprise = root.join("enterprise.sde");
        for (dataset, classes) in [
            ("Buildings", vec!["Buildings_DLH"]),
            ("GPS", vec!["EngGPSPts"]),
            ("ParcelFeatures", vec!["Parcels"]),
        ] {
            let dataset_dir = enterprise.join(format!("sde.SDE.{}", dataset));
            fs::create_dir_all(&dataset_dir).unwrap();
            for class in classes {
                write_class(
                    &dataset_dir.join(format!("sde.SDE.{}", class)),
                    &[point_feature(1.0, 2.0)],
                );
            }
        }

        // Local extras database with the single-copy class
        let local = root.join("ArcReaderUpdate_files.gdb");
        fs::create_dir_all(&local).unwrap();
        write_class(&local.join("Sections_SLC"), &[point_feature(3.0, 3.0)]);

        // Assessor table
        let assessor = root.join("vwGISParcel");
        fs::write(
            table_file(&assessor),
            r#"[{"parcel":"010-1234-56789","owner":"A"}]"#,
        )
        .unwrap();

        // County connection: one polygon straddling the boundary, one layer
        // with a point inside and a point outside
        let county = root.join("county.sde");
        fs::create_dir_all(&county).unwrap();
        write_class(
            &county.join("sde.STLOUIS.CDSTRL_ROW"),
            &[polygon_feature(
                "[[5.0,2.0],[15.0,2.0],[15.0,8.0],[5.0,8.0],[5.0,2.0]]",
            )],
        );
        write_class(
            &county.join("sde.STLOUIS.CDSTRL_ParcelInfo"),
            &[point_feature(5.0, 5.0), point_feature(20.0, 20.0)],
        );

        let boundary = root.join("ClipBoundary");
        write_class(&boundary, &[boundary_feature()]);

        let mut config = Config::default();
        config.output.directory = root.join("out");
        config.output.database = "PortableDuluth.gdb".to_string();
        config.output.backup = "PortableDuluth_backup.gdb".to_string();
        config.sources.enterprise = enterprise.clone();
        config.sources.qualified_prefix = "sde.SDE.".to_string();
        config.sources.spatial_reference_class =
            enterprise.join("sde.SDE.GPS").join("sde.SDE.EngGPSPts");
        config.sources.local_database = local;
        config.sources.assessor_table = assessor;
        config.sources.county = county;
        for (dataset, classes) in [
            ("Buildings", vec!["Buildings_DLH"]),
            ("GPS", vec!["EngGPSPts"]),
            ("ParcelFeatures", vec!["Parcels"]),
        ] {
            config.datasets.mapping.insert(
                dataset.to_string(),
                classes.into_iter().map(String::from).collect(),
            );
        }
        config.datasets.extra = "Rice_Lake_Twnshp".to_string();
        config.single_copy.class = "Sections_SLC".to_string();
        config.single_copy.destination_dataset = "ParcelFeatures".to_string();
        config.table_refresh.destination = "Assessor".to_string();
        config.clip.boundary = boundary;
        config.clip.destination_dataset = "Rice_Lake_Twnshp".to_string();
        config
            .clip
            .pairs
            .insert("sde.STLOUIS.CDSTRL_ROW".to_string(), "RLT_ROW".to_string());
        config.clip.pairs.insert(
            "sde.STLOUIS.CDSTRL_ParcelInfo".to_string(),
            "RLT_Parcels".to_string(),
        );

        Self { temp, config }
    }

    pub fn output_db(&self) -> PathBuf {
        self.config.output_database_path()
    }
}

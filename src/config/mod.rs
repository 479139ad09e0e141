//! Run configuration for a portable geodatabase refresh
//!
//! Everything a run touches comes from one TOML file: source connection
//! paths, the destination root, the dataset-to-class mapping, the clip
//! specification, and the boundary geometry path. Orchestration code never
//! hardcodes a path or a dataset name.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{FieldpackError, Result};

/// Suffix for the staging database created during backup-and-recreate.
pub const STAGING_SUFFIX: &str = ".staging";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub sources: SourceConfig,
    #[serde(default)]
    pub datasets: DatasetConfig,
    #[serde(default)]
    pub single_copy: SingleCopyConfig,
    #[serde(default)]
    pub table_refresh: TableRefreshConfig,
    #[serde(default)]
    pub clip: ClipConfig,
}

/// Where the portable geodatabase lives and what it is called.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory holding the output database, its backup, and the run log
    #[serde(default)]
    pub directory: PathBuf,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_backup")]
    pub backup: String,
    /// Append-only run log; defaults to `refresh.log` under `directory`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

/// Read-only source endpoints, addressed as paths.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SourceConfig {
    /// Main enterprise geodatabase connection
    #[serde(default)]
    pub enterprise: PathBuf,
    /// Owner prefix for qualified names inside the enterprise database,
    /// e.g. `sde.SDE.` turns `GPS/EngGPSPts` into `sde.SDE.GPS/sde.SDE.EngGPSPts`
    #[serde(default = "default_qualified_prefix")]
    pub qualified_prefix: String,
    /// Feature class whose coordinate system seeds every destination container
    #[serde(default)]
    pub spatial_reference_class: PathBuf,
    /// Local database holding the single extra class (outside the enterprise db)
    #[serde(default)]
    pub local_database: PathBuf,
    /// Externally maintained assessor table
    #[serde(default)]
    pub assessor_table: PathBuf,
    /// County-maintained connection used by the clip step
    #[serde(default)]
    pub county: PathBuf,
}

/// The dataset-to-class crosswalk. Order is preserved from the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Extra container created empty; the clip step writes into it
    #[serde(default = "default_extra_dataset")]
    pub extra: String,
    #[serde(default)]
    pub mapping: IndexMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SingleCopyConfig {
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub destination_dataset: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRefreshConfig {
    #[serde(default = "default_table_destination")]
    pub destination: String,
}

/// Clip specification: one shared boundary, ordered source -> destination pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipConfig {
    #[serde(default)]
    pub boundary: PathBuf,
    #[serde(default = "default_extra_dataset")]
    pub destination_dataset: String,
    #[serde(default)]
    pub pairs: IndexMap<String, String>,
}

fn default_database() -> String {
    "Portable.gdb".to_string()
}
fn default_backup() -> String {
    "Portable_backup.gdb".to_string()
}
fn default_qualified_prefix() -> String {
    String::new()
}
fn default_extra_dataset() -> String {
    "Clipped".to_string()
}
fn default_table_destination() -> String {
    "Assessor".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::new(),
            database: default_database(),
            backup: default_backup(),
            log_file: None,
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            extra: default_extra_dataset(),
            mapping: IndexMap::new(),
        }
    }
}

impl Default for TableRefreshConfig {
    fn default() -> Self {
        Self {
            destination: default_table_destination(),
        }
    }
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            boundary: PathBuf::new(),
            destination_dataset: default_extra_dataset(),
            pairs: IndexMap::new(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| FieldpackError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| FieldpackError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Reject configurations the refresh cannot run against.
    pub fn validate(&self) -> Result<()> {
        if self.output.database.is_empty() {
            return Err(FieldpackError::Config(
                "output.database must not be empty".to_string(),
            ));
        }
        if self.output.database == self.output.backup {
            return Err(FieldpackError::Config(
                "output.database and output.backup must differ".to_string(),
            ));
        }
        for (dataset, classes) in &self.datasets.mapping {
            if dataset.is_empty() {
                return Err(FieldpackError::Config(
                    "dataset names in the mapping must not be empty".to_string(),
                ));
            }
            // The backup name is reserved for the retired database, never a container
            if dataset == &self.output.backup {
                return Err(FieldpackError::Config(format!(
                    "dataset '{}' collides with the reserved backup name",
                    dataset
                )));
            }
            if classes.iter().any(|c| c.is_empty()) {
                return Err(FieldpackError::Config(format!(
                    "dataset '{}' maps an empty class name",
                    dataset
                )));
            }
        }
        if self.datasets.extra == self.output.backup {
            return Err(FieldpackError::Config(format!(
                "extra dataset '{}' collides with the reserved backup name",
                self.datasets.extra
            )));
        }
        Ok(())
    }

    pub fn output_database_path(&self) -> PathBuf {
        self.output.directory.join(&self.output.database)
    }

    pub fn backup_database_path(&self) -> PathBuf {
        self.output.directory.join(&self.output.backup)
    }

    /// Staging name used by the recreate step before the atomic swap.
    pub fn staging_database_path(&self) -> PathBuf {
        self.output
            .directory
            .join(format!("{}{}", self.output.database, STAGING_SUFFIX))
    }

    pub fn dataset_path(&self, dataset: &str) -> PathBuf {
        self.output_database_path().join(dataset)
    }

    pub fn log_file_path(&self) -> PathBuf {
        match &self.output.log_file {
            Some(path) => path.clone(),
            None => self.output.directory.join("refresh.log"),
        }
    }

    /// Qualified path of a source class inside the enterprise database,
    /// following the `<prefix><dataset>/<prefix><class>` convention.
    pub fn enterprise_class_path(&self, dataset: &str, class: &str) -> PathBuf {
        let prefix = &self.sources.qualified_prefix;
        self.sources
            .enterprise
            .join(format!("{}{}", prefix, dataset))
            .join(format!("{}{}", prefix, class))
    }
}

/// Documented example configuration, written by `fieldpack init`. The dataset
/// mapping mirrors a municipal deployment; edit it freely, the orchestration
/// only iterates what is listed here.
pub const SAMPLE_CONFIG: &str = include_str!("sample.toml");

pub fn sample_config() -> Config {
    toml::from_str(SAMPLE_CONFIG).expect("bundled sample config must parse")
}

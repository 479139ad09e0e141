pub mod cli;
pub mod config;
pub mod error;
pub mod geodata;
pub mod logging;
pub mod refresh;

pub use crate::error::{FieldpackError, Result};
pub use crate::geodata::{FileWorkspace, SpatialReference, Workspace};
pub use crate::refresh::{run_refresh, RunReport, StepReport};

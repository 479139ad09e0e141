//! Schema seeding step
//!
//! Creates one empty feature dataset per mapping entry, plus the configured
//! extra container, all carrying the spatial reference read once from the
//! reference class. Per-container failures are recorded individually.

use crate::geodata::Workspace;
use crate::refresh::report::StepReport;
use crate::refresh::RunContext;

pub(crate) fn run<W: Workspace>(ctx: &RunContext<'_, W>) -> StepReport {
    let mut report = StepReport::new("seed schema");
    let cfg = ctx.config;
    let ws = ctx.workspace;

    let mut names: Vec<&str> = cfg.datasets.mapping.keys().map(String::as_str).collect();
    if !cfg.datasets.extra.is_empty() && !cfg.datasets.mapping.contains_key(&cfg.datasets.extra) {
        names.push(cfg.datasets.extra.as_str());
    }

    let spatial_ref = match ws.spatial_reference_of(&cfg.sources.spatial_reference_class) {
        Ok(sr) => {
            tracing::info!("Containers will be created with spatial reference {}", sr);
            sr
        }
        Err(e) => {
            tracing::error!(
                "Failed to read spatial reference from {}: {}",
                cfg.sources.spatial_reference_class.display(),
                e
            );
            report.fail("spatial reference", e);
            for name in names {
                report.skip(name);
            }
            return report;
        }
    };

    let db = cfg.output_database_path();
    for name in names {
        match ws.create_feature_dataset(&db, name, &spatial_ref) {
            Ok(()) => {
                tracing::info!("Created feature dataset {}", name);
                report.ok(name);
            }
            Err(e) => {
                tracing::error!("Failed to create feature dataset {}: {}", name, e);
                report.fail(name, e);
            }
        }
    }

    report
}

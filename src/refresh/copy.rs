//! Feature class copy steps
//!
//! `run_bulk` walks the dataset-to-class mapping and converts every source
//! class into its destination container, resolving source paths by the
//! qualified naming convention. `run_single` copies the one configured class
//! that lives outside the enterprise database. Overwrite is always on and a
//! failed class never stops the loop.

use crate::geodata::Workspace;
use crate::refresh::report::StepReport;
use crate::refresh::RunContext;

pub(crate) fn run_bulk<W: Workspace>(ctx: &RunContext<'_, W>) -> StepReport {
    let mut report = StepReport::new("copy classes");
    let cfg = ctx.config;
    let ws = ctx.workspace;

    for (dataset, classes) in &cfg.datasets.mapping {
        let dest = cfg.dataset_path(dataset);
        for class in classes {
            let source = cfg.enterprise_class_path(dataset, class);
            let label = format!("{}/{}", dataset, class);
            match ws.convert_feature_class(&source, &dest, class) {
                Ok(()) => {
                    tracing::info!("Copied {} into {}", source.display(), dest.display());
                    report.ok(label);
                }
                Err(e) => {
                    tracing::error!("Failed to copy {}: {}", source.display(), e);
                    report.fail(label, e);
                }
            }
        }
    }

    report
}

pub(crate) fn run_single<W: Workspace>(ctx: &RunContext<'_, W>) -> StepReport {
    let mut report = StepReport::new("copy single class");
    let cfg = ctx.config;
    let ws = ctx.workspace;

    if cfg.single_copy.class.is_empty() {
        report.skip("(not configured)");
        return report;
    }

    let source = cfg.sources.local_database.join(&cfg.single_copy.class);
    let dest = cfg.dataset_path(&cfg.single_copy.destination_dataset);
    match ws.convert_feature_class(&source, &dest, &cfg.single_copy.class) {
        Ok(()) => {
            tracing::info!("Copied {} into {}", source.display(), dest.display());
            report.ok(cfg.single_copy.class.clone());
        }
        Err(e) => {
            tracing::error!("Failed to copy {}: {}", source.display(), e);
            report.fail(cfg.single_copy.class.clone(), e);
        }
    }

    report
}

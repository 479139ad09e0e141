//! Table refresh step
//!
//! Copies the externally maintained assessor table into the output database
//! under its configured name. Always overwrites: the destination is rebuilt
//! every run, so there is nothing to preserve.

use crate::geodata::Workspace;
use crate::refresh::report::StepReport;
use crate::refresh::RunContext;

pub(crate) fn run<W: Workspace>(ctx: &RunContext<'_, W>) -> StepReport {
    let mut report = StepReport::new("refresh table");
    let cfg = ctx.config;
    let ws = ctx.workspace;

    let db = cfg.output_database_path();
    let source = &cfg.sources.assessor_table;
    let dest = &cfg.table_refresh.destination;
    match ws.copy_table(source, &db, dest) {
        Ok(()) => {
            tracing::info!("Copied table {} into {}", source.display(), dest);
            report.ok(dest.clone());
        }
        Err(e) => {
            tracing::error!("Failed to copy table {}: {}", source.display(), e);
            report.fail(dest.clone(), e);
        }
    }

    report
}

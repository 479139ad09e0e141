//! Clip-and-copy step
//!
//! Clips each configured county layer by the shared boundary polygon and
//! writes the result into the clip destination container. When the county
//! connection is unreachable every pair is recorded as skipped and the run
//! carries on. Pairs are isolated from each other: one failing layer never
//! aborts the rest.

use crate::geodata::Workspace;
use crate::refresh::report::StepReport;
use crate::refresh::RunContext;

pub(crate) fn run<W: Workspace>(ctx: &RunContext<'_, W>) -> StepReport {
    let mut report = StepReport::new("clip layers");
    let cfg = ctx.config;
    let ws = ctx.workspace;

    if !ws.exists(&cfg.sources.county) {
        tracing::warn!(
            "Cannot access county connection {}; skipping clip",
            cfg.sources.county.display()
        );
        for dest in cfg.clip.pairs.values() {
            report.skip(dest.clone());
        }
        return report;
    }

    let dest_dataset = cfg.dataset_path(&cfg.clip.destination_dataset);
    for (source_name, dest_name) in &cfg.clip.pairs {
        let source = cfg.sources.county.join(source_name);
        let dest = dest_dataset.join(dest_name);
        match ws.clip(&source, &cfg.clip.boundary, &dest) {
            Ok(()) => {
                tracing::info!(
                    "Clipped {} by {} into {}",
                    source.display(),
                    cfg.clip.boundary.display(),
                    dest.display()
                );
                report.ok(dest_name.clone());
            }
            Err(e) => {
                tracing::error!("Failed to clip {}: {}", source.display(), e);
                report.fail(dest_name.clone(), e);
            }
        }
    }

    report
}

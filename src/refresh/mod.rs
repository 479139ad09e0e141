//! The refresh pipeline
//!
//! Five fixed steps run in order against one [`RunContext`]: recreate the
//! output database, seed its containers, bulk-copy the mapped classes, copy
//! the single extra class, refresh the assessor table, clip the county
//! layers. Later steps assume earlier ones succeeded but never hard-stop on
//! a failure: every step records per-item outcomes and the run carries on,
//! so partial completion is the expected steady state.

mod clip;
mod copy;
mod recreate;
pub mod report;
mod seed;
mod table;

pub use report::{RunReport, StepReport};

use crate::config::Config;
use crate::geodata::Workspace;

/// Everything a step needs: configuration plus the workspace handle. Built
/// once per run, passed by reference, no global state.
pub struct RunContext<'a, W: Workspace> {
    pub config: &'a Config,
    pub workspace: &'a W,
}

/// Run the full refresh sequence and return the aggregated report.
pub fn run_refresh<W: Workspace>(config: &Config, workspace: &W) -> RunReport {
    let ctx = RunContext { config, workspace };
    let mut report = RunReport::new();

    tracing::info!("---------------- portable geodatabase refresh ----------------");

    report.push(recreate::run(&ctx));
    report.push(seed::run(&ctx));
    report.push(copy::run_bulk(&ctx));
    report.push(copy::run_single(&ctx));
    report.push(table::run(&ctx));
    report.push(clip::run(&ctx));

    for line in report.summary_lines() {
        tracing::info!("{}", line);
    }
    report
}

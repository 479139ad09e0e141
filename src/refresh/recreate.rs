//! Backup-and-recreate step
//!
//! Ensures a usable empty output database exists, keeping the previous run's
//! copy as the single backup generation. The fresh database is staged under a
//! temporary name before the swap, so the output name is never left missing
//! by a mid-step failure.

use crate::geodata::Workspace;
use crate::refresh::report::StepReport;
use crate::refresh::RunContext;

pub(crate) fn run<W: Workspace>(ctx: &RunContext<'_, W>) -> StepReport {
    let mut report = StepReport::new("recreate database");
    let cfg = ctx.config;
    let ws = ctx.workspace;

    let db = cfg.output_database_path();
    let backup = cfg.backup_database_path();
    let staging = cfg.staging_database_path();

    if !ws.exists(&db) {
        match ws.create_database(&db) {
            Ok(()) => {
                tracing::info!("Created new geodatabase {}", db.display());
                report.ok("create");
            }
            Err(e) => {
                tracing::error!("Failed to create {}: {}", db.display(), e);
                report.fail("create", e);
            }
        }
        return report;
    }

    // A leftover staging database means an earlier run was interrupted
    if let Err(e) = ws.delete_database(&staging) {
        report.fail("staging cleanup", e);
        return report;
    }

    // Stage the fresh database first; the current output stays live until
    // the swap below succeeds.
    if let Err(e) = ws.create_database(&staging) {
        tracing::error!("Failed to stage {}: {}", staging.display(), e);
        report.fail("stage", e);
        return report;
    }
    report.ok("stage");

    // Compaction releases stale locks before the rename. It is best-effort:
    // a failure is logged and the item marked skipped, and the swap still
    // proceeds; the rename surfaces any real lock problem.
    match ws.compact(&db) {
        Ok(()) => {
            tracing::info!("Compacted {}", db.display());
            report.ok("compact");
        }
        Err(e) => {
            tracing::warn!("Failed to compact {}: {}", db.display(), e);
            report.skip("compact");
        }
    }

    if let Err(e) = ws.delete_database(&backup) {
        tracing::error!("Failed to remove stale backup {}: {}", backup.display(), e);
        report.fail("delete stale backup", e);
        let _ = ws.delete_database(&staging);
        return report;
    }

    if let Err(e) = ws.rename_database(&db, &backup) {
        tracing::error!("Failed to retire {} to backup: {}", db.display(), e);
        report.fail("retire to backup", e);
        let _ = ws.delete_database(&staging);
        return report;
    }
    tracing::info!(
        "Renamed {} to {}",
        cfg.output.database,
        cfg.output.backup
    );
    report.ok("retire to backup");

    match ws.rename_database(&staging, &db) {
        Ok(()) => {
            tracing::info!("Created new empty geodatabase {}", db.display());
            report.ok("activate");
        }
        Err(e) => {
            tracing::error!("Failed to activate staged database: {}", e);
            report.fail("activate", e);
            // Put the previous copy back under the output name
            let _ = ws.rename_database(&backup, &db);
        }
    }

    report
}

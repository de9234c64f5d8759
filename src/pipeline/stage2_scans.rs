use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::error::QcError;
use crate::measures::ScanResult;
use crate::measures::scan::{ScanAnalyzer, ScanInput};
use crate::pipeline::Stage;

#[cfg(feature = "mt")]
use rayon::prelude::*;

pub struct Stage2Scans;

impl Stage2Scans {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage2Scans {
    fn name(&self) -> &'static str {
        "stage2_scans"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let analyzer = ctx.scan_analyzer();
        let workers = ctx.workers();
        info!(scans = ctx.scans.len(), workers, "dispatching scans");

        let results = if workers == 1 {
            analyze_serial(&analyzer, &ctx.scans)?
        } else {
            analyze_pooled(&analyzer, &ctx.scans, workers)?
        };

        ctx.metrics.rows.clear();
        ctx.matrices.clear();
        for result in results {
            ctx.metrics.rows.push(result.metrics);
            ctx.matrices.push(result.matrix);
        }
        info!(scans = ctx.metrics.len(), "scan_measures_ready");
        Ok(())
    }
}

pub fn analyze_serial(analyzer: &ScanAnalyzer, scans: &[ScanInput]) -> Result<Vec<ScanResult>> {
    let mut out = Vec::with_capacity(scans.len());
    for (idx, scan) in scans.iter().enumerate() {
        info!(timeseries = %scan.timeseries.display(), "analyzing scan");
        out.push(analyzer.analyze_scan(scan, idx as u64)?);
    }
    Ok(out)
}

/// Fans scans out over a fixed-size pool. Each result lands in the slot of
/// its input index, and the first failure in input order aborts the batch.
#[cfg(feature = "mt")]
pub fn analyze_pooled(
    analyzer: &ScanAnalyzer,
    scans: &[ScanInput],
    workers: usize,
) -> Result<Vec<ScanResult>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build thread pool: {}", e))?;

    let mut slots: Vec<Option<Result<ScanResult, QcError>>> = (0..scans.len()).map(|_| None).collect();
    pool.install(|| {
        slots.par_iter_mut().enumerate().for_each(|(idx, slot)| {
            info!(timeseries = %scans[idx].timeseries.display(), "analyzing scan");
            *slot = Some(analyzer.analyze_scan(&scans[idx], idx as u64));
        });
    });

    collect_ordered(slots)
}

#[cfg(not(feature = "mt"))]
pub fn analyze_pooled(
    analyzer: &ScanAnalyzer,
    scans: &[ScanInput],
    workers: usize,
) -> Result<Vec<ScanResult>> {
    tracing::warn!(workers, "built without feature 'mt'; analyzing scans serially");
    analyze_serial(analyzer, scans)
}

#[cfg_attr(not(feature = "mt"), allow(dead_code))]
fn collect_ordered(slots: Vec<Option<Result<ScanResult, QcError>>>) -> Result<Vec<ScanResult>> {
    let mut out = Vec::with_capacity(slots.len());
    for (idx, slot) in slots.into_iter().enumerate() {
        match slot {
            Some(Ok(result)) => out.push(result),
            Some(Err(err)) => return Err(err.into()),
            None => anyhow::bail!("scan {} produced no result", idx + 1),
        }
    }
    Ok(out)
}

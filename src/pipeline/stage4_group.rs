use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::pipeline::Stage;

pub struct Stage4Group;

impl Stage4Group {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage4Group {
    fn name(&self) -> &'static str {
        "stage4_group"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        if ctx.metrics.len() < 2 {
            ctx.warn("only one timeseries file provided; skipping group measures");
            ctx.group = None;
            return Ok(());
        }

        info!(scans = ctx.metrics.len(), "computing group-level measures");
        let aggregator = ctx.aggregator();
        // group modularity uses the stream after the last scan
        let stream = ctx.metrics.len() as u64;
        let summary = aggregator.aggregate(
            &ctx.matrices,
            &ctx.metrics,
            ctx.coords.as_deref(),
            stream,
        )?;
        info!(
            mean_r = summary.mean_r,
            median_abs_qcfc = summary.median_abs_qcfc,
            distance_dependence = summary.distance_dependence.is_some(),
            "group_measures_ready"
        );
        ctx.group = Some(summary);
        Ok(())
    }
}

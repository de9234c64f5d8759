use anyhow::Result;
use std::time::Instant;
use tracing::{info, warn};

use crate::ctx::Ctx;
use crate::measures::MetricsTable;

pub mod check;
pub mod stage0_inputs;
pub mod stage1_scaffold;
pub mod stage2_scans;
pub mod stage3_measures;
pub mod stage4_group;
pub mod stage5_output;

pub trait Stage {
    fn name(&self) -> &'static str;
    fn run(&self, ctx: &mut Ctx) -> Result<()>;
}

pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    /// Stage list of a full quality analysis run.
    pub fn quality_analysis() -> Self {
        Self::new(vec![
            Box::new(stage0_inputs::Stage0Inputs::new()),
            Box::new(stage1_scaffold::Stage1Scaffold::new()),
            Box::new(stage2_scans::Stage2Scans::new()),
            Box::new(stage3_measures::Stage3Measures::new()),
            Box::new(stage4_group::Stage4Group::new()),
            Box::new(stage5_output::Stage5Output::new()),
        ])
    }

    /// Input checks only; nothing is written.
    pub fn validate() -> Self {
        Self::new(vec![
            Box::new(stage0_inputs::Stage0Inputs::new()),
            Box::new(check::CheckInputs::new()),
        ])
    }

    pub fn run(&self, ctx: &mut Ctx) -> Result<()> {
        info!(
            workers = ctx.workers(),
            detector = ctx.detector.name(),
            "quality analysis configured"
        );
        for stage in &self.stages {
            let start = Instant::now();
            info!(stage = stage.name(), "stage started");
            if let Err(err) = stage.run(ctx) {
                let elapsed_ms = start.elapsed().as_millis();
                warn!(
                    stage = stage.name(),
                    elapsed_ms = elapsed_ms as u64,
                    "stage failed"
                );
                return Err(err);
            }
            let elapsed_ms = start.elapsed().as_millis();
            info!(
                stage = stage.name(),
                elapsed_ms = elapsed_ms as u64,
                "stage finished"
            );
        }
        Ok(())
    }
}

/// Runs the full analysis and returns the table written to `measures.tsv`.
pub fn quality_analysis(ctx: &mut Ctx) -> Result<MetricsTable> {
    Pipeline::quality_analysis().run(ctx)?;
    Ok(ctx.metrics.clone())
}

use anyhow::{Result, bail};
use tracing::info;

use crate::ctx::Ctx;
use crate::io::measures::write_measures;
use crate::measures::group::check_shapes;
use crate::pipeline::Stage;

pub struct Stage3Measures;

impl Stage3Measures {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage3Measures {
    fn name(&self) -> &'static str {
        "stage3_measures"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        if ctx.metrics.len() != ctx.scans.len() {
            bail!(
                "measures table has {} rows for {} scans",
                ctx.metrics.len(),
                ctx.scans.len()
            );
        }
        check_shapes(&ctx.matrices, ctx.coords.as_deref())?;
        write_measures(&ctx.output.measures_path, &ctx.metrics)?;
        info!(path = %ctx.output.measures_path.display(), rows = ctx.metrics.len(), "measures_written");
        Ok(())
    }
}

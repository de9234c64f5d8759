use anyhow::Result;
use tracing::info;

use crate::ctx::{Ctx, MIN_STABLE_SCANS};
use crate::error::QcError;
use crate::io::coords;
use crate::measures::scan::ScanInput;
use crate::pipeline::Stage;

pub struct Stage0Inputs;

impl Stage0Inputs {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage0Inputs {
    fn name(&self) -> &'static str {
        "stage0_inputs"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        if ctx.timeseries.len() != ctx.confounds.len() {
            return Err(QcError::ArityMismatch {
                timeseries: ctx.timeseries.len(),
                confounds: ctx.confounds.len(),
            }
            .into());
        }
        if ctx.timeseries.is_empty() {
            return Err(QcError::EmptyInput.into());
        }
        let n_scans = ctx.timeseries.len();
        if n_scans < MIN_STABLE_SCANS {
            ctx.warn(format!(
                "fewer than {} timeseries files detected ({}); group-level measures (e.g., QC-FC) may not be stable",
                MIN_STABLE_SCANS, n_scans
            ));
        }

        ctx.scans = ctx
            .timeseries
            .iter()
            .zip(&ctx.confounds)
            .map(|(t, c)| ScanInput {
                timeseries: t.clone(),
                confounds: c.clone(),
            })
            .collect();

        match ctx.coords_path.clone() {
            Some(path) => {
                let points = coords::read_coords(&path)?;
                info!(coords = %path.display(), rois = points.len(), "coordinates_loaded");
                ctx.coords = Some(points);
            }
            None => ctx.warn("no coordinates provided; distance dependence QC-FC will be skipped"),
        }

        info!(scans = n_scans, "inputs_ready");
        Ok(())
    }
}

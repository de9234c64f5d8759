use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::error::QcError;
use crate::io::table;
use crate::measures::scan::validate_confounds;
use crate::pipeline::Stage;

/// Loads every scan pair and checks shapes without computing measures.
pub struct CheckInputs;

impl CheckInputs {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for CheckInputs {
    fn name(&self) -> &'static str {
        "check_inputs"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let mut n_signals: Option<usize> = None;
        for scan in &ctx.scans {
            let ts = table::read_table(&scan.timeseries)
                .map_err(|e| QcError::scan(&scan.timeseries, e))?;
            let confounds = table::read_table(&scan.confounds)
                .map_err(|e| QcError::scan(&scan.confounds, e))?;
            validate_confounds(&ts, &confounds, &scan.confounds)?;
            if let Some(dup) = ts.duplicate_column() {
                return Err(QcError::validation(
                    &scan.timeseries,
                    format!("duplicate column name '{}'", dup),
                )
                .into());
            }
            match n_signals {
                None => n_signals = Some(ts.n_cols()),
                Some(n) if n != ts.n_cols() => {
                    return Err(QcError::Shape(format!(
                        "{} has {} signals, expected {}",
                        scan.timeseries.display(),
                        ts.n_cols(),
                        n
                    ))
                    .into());
                }
                Some(_) => {}
            }
            info!(
                timeseries = %scan.timeseries.display(),
                timepoints = ts.n_rows,
                signals = ts.n_cols(),
                "scan_ok"
            );
        }

        if let (Some(points), Some(n)) = (&ctx.coords, n_signals) {
            if points.len() != n {
                return Err(QcError::Shape(format!(
                    "{} coordinates provided for {} signals",
                    points.len(),
                    n
                ))
                .into());
            }
        }
        Ok(())
    }
}

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::QcError;
use crate::io::table::{self, Table};
use crate::io::basename;
use crate::math::modularity::{CommunityDetection, SignedLouvain};
use crate::math::stats;
use crate::measures::kernel;
use crate::measures::{
    FD_COLUMN, MODULARITY_ITERATIONS, MOTION_COLUMNS, SPIKE_THRESHOLD, ScanMetrics, ScanResult,
    Seeding,
};

/// A timeseries file and the confounds file recorded alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanInput {
    pub timeseries: PathBuf,
    pub confounds: PathBuf,
}

/// Per-scan quality measures.
#[derive(Clone)]
pub struct ScanAnalyzer {
    pub spike_threshold: f64,
    pub iterations: usize,
    pub seeding: Seeding,
    pub detector: Arc<dyn CommunityDetection>,
}

impl Default for ScanAnalyzer {
    fn default() -> Self {
        Self {
            spike_threshold: SPIKE_THRESHOLD,
            iterations: MODULARITY_ITERATIONS,
            seeding: Seeding::Entropy,
            detector: Arc::new(SignedLouvain::default()),
        }
    }
}

impl std::fmt::Debug for ScanAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanAnalyzer")
            .field("spike_threshold", &self.spike_threshold)
            .field("iterations", &self.iterations)
            .field("seeding", &self.seeding)
            .field("detector", &self.detector.name())
            .finish()
    }
}

impl ScanAnalyzer {
    /// Reads both files of `input` and analyzes them.
    ///
    /// `stream` selects the RNG stream under fixed seeding; callers pass the
    /// scan's position in the input list.
    pub fn analyze_scan(&self, input: &ScanInput, stream: u64) -> Result<ScanResult, QcError> {
        let timeseries =
            table::read_table(&input.timeseries).map_err(|e| QcError::scan(&input.timeseries, e))?;
        let confounds =
            table::read_table(&input.confounds).map_err(|e| QcError::scan(&input.confounds, e))?;
        self.analyze(&timeseries, &confounds, input, stream)
    }

    /// Computes measures for already-loaded tables; `input` names the scan
    /// in the metrics and in validation errors.
    pub fn analyze(
        &self,
        timeseries: &Table,
        confounds: &Table,
        input: &ScanInput,
        stream: u64,
    ) -> Result<ScanResult, QcError> {
        let fd = validate_confounds(timeseries, confounds, &input.confounds)?;
        if let Some(dup) = timeseries.duplicate_column() {
            return Err(QcError::validation(
                &input.timeseries,
                format!("duplicate column name '{}'", dup),
            ));
        }

        let n = timeseries.n_rows;
        let n_spikes = kernel::count_spikes(fd, self.spike_threshold);
        let mean_fd = stats::nan_mean(fd);

        let matrix = kernel::connectivity(timeseries);
        let mean_r = kernel::mean_connectivity(&matrix);
        let sig_edges = kernel::count_significant_edges(&matrix, n);
        let mut rng = self.seeding.rng(stream);
        let q = kernel::network_modularity(&matrix, self.iterations, self.detector.as_ref(), &mut rng);

        Ok(ScanResult {
            metrics: ScanMetrics {
                fname: basename(&input.timeseries),
                confounds: basename(&input.confounds),
                n,
                mean_fd,
                n_spikes,
                mean_r,
                sig_edges,
                q,
            },
            matrix,
        })
    }
}

/// Checks required confound columns and row alignment; returns the
/// framewise displacement column.
pub fn validate_confounds<'a>(
    timeseries: &Table,
    confounds: &'a Table,
    confounds_path: &Path,
) -> Result<&'a [f64], QcError> {
    let missing: Vec<&str> = std::iter::once(FD_COLUMN)
        .chain(MOTION_COLUMNS)
        .filter(|c| confounds.column_index(c).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(QcError::validation(
            confounds_path,
            format!("missing required confound columns: {}", missing.join(", ")),
        ));
    }
    if confounds.n_rows != timeseries.n_rows {
        return Err(QcError::validation(
            confounds_path,
            format!(
                "confounds have {} rows but the timeseries has {}",
                confounds.n_rows, timeseries.n_rows
            ),
        ));
    }
    confounds
        .column(FD_COLUMN)
        .ok_or_else(|| QcError::validation(confounds_path, "missing framewise_displacement"))
}

use std::path::PathBuf;
use std::sync::Arc;

use crate::math::modularity::{CommunityDetection, SignedLouvain};
use crate::measures::group::DatasetAggregator;
use crate::measures::scan::{ScanAnalyzer, ScanInput};
use crate::measures::{
    ConnectivityMatrix, GroupSummary, MODULARITY_ITERATIONS, MetricsTable, SPIKE_THRESHOLD, Seeding,
};
use crate::schema::v1::RoiQcV1;

/// Fewer scans than this triggers the group-stability warning.
pub const MIN_STABLE_SCANS: usize = 10;

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub out_dir: PathBuf,
    pub measures_path: PathBuf,
    pub json_path: PathBuf,
}

pub struct Ctx {
    pub timeseries: Vec<PathBuf>,
    pub confounds: Vec<PathBuf>,
    pub coords_path: Option<PathBuf>,
    pub group_only: bool,
    pub worker_count: usize,
    pub write_json: bool,
    pub spike_threshold: f64,
    pub iterations: usize,
    pub seed: Option<u64>,
    pub detector: Arc<dyn CommunityDetection>,
    pub scans: Vec<ScanInput>,
    pub coords: Option<Vec<[f64; 3]>>,
    pub matrices: Vec<ConnectivityMatrix>,
    pub metrics: MetricsTable,
    pub group: Option<GroupSummary>,
    pub warnings: Vec<String>,
    pub output: OutputPaths,
    pub report: RoiQcV1,
}

impl std::fmt::Debug for Ctx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ctx")
            .field("timeseries", &self.timeseries)
            .field("confounds", &self.confounds)
            .field("coords_path", &self.coords_path)
            .field("group_only", &self.group_only)
            .field("worker_count", &self.worker_count)
            .field("seed", &self.seed)
            .field("detector", &self.detector.name())
            .field("scans", &self.metrics.len())
            .field("warnings", &self.warnings)
            .field("output", &self.output)
            .finish()
    }
}

impl Ctx {
    pub fn new(
        timeseries: Vec<PathBuf>,
        confounds: Vec<PathBuf>,
        coords_path: Option<PathBuf>,
        out_dir: PathBuf,
        group_only: bool,
        worker_count: usize,
        tool_version: &str,
    ) -> Self {
        let measures_path = out_dir.join("measures.tsv");
        let json_path = out_dir.join("roiqc.json");
        Self {
            timeseries,
            confounds,
            coords_path,
            group_only,
            worker_count,
            write_json: false,
            spike_threshold: SPIKE_THRESHOLD,
            iterations: MODULARITY_ITERATIONS,
            seed: None,
            detector: Arc::new(SignedLouvain::default()),
            scans: Vec::new(),
            coords: None,
            matrices: Vec::new(),
            metrics: MetricsTable::default(),
            group: None,
            warnings: Vec::new(),
            output: OutputPaths {
                out_dir,
                measures_path,
                json_path,
            },
            report: RoiQcV1::empty(tool_version),
        }
    }

    pub fn workers(&self) -> usize {
        self.worker_count.max(1)
    }

    pub fn seeding(&self) -> Seeding {
        match self.seed {
            Some(seed) => Seeding::Fixed(seed),
            None => Seeding::Entropy,
        }
    }

    pub fn scan_analyzer(&self) -> ScanAnalyzer {
        ScanAnalyzer {
            spike_threshold: self.spike_threshold,
            iterations: self.iterations,
            seeding: self.seeding(),
            detector: Arc::clone(&self.detector),
        }
    }

    pub fn aggregator(&self) -> DatasetAggregator {
        DatasetAggregator {
            iterations: self.iterations,
            seeding: self.seeding(),
            detector: Arc::clone(&self.detector),
        }
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{}", message);
        self.warnings.push(message);
    }
}

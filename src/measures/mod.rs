pub mod group;
pub mod kernel;
pub mod scan;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::math::matrix::SquareMatrix;

/// Framewise displacement above this value (mm) counts as a spike.
pub const SPIKE_THRESHOLD: f64 = 0.2;
pub const MODULARITY_ITERATIONS: usize = 100;
pub const SIGNIFICANCE_ALPHA: f64 = 0.05;

pub const FD_COLUMN: &str = "framewise_displacement";
pub const MOTION_COLUMNS: [&str; 6] = ["trans_x", "trans_y", "trans_z", "rot_x", "rot_y", "rot_z"];

/// Column order of `measures.tsv`.
pub const MEASURE_COLUMNS: [&str; 8] = [
    "fname",
    "confounds",
    "n",
    "mean_fd",
    "n_spikes",
    "mean_r",
    "sig_edges",
    "q",
];

/// Pearson correlation matrix between the signals of one scan.
pub type ConnectivityMatrix = SquareMatrix;

#[derive(Debug, Clone, PartialEq)]
pub struct ScanMetrics {
    pub fname: String,
    pub confounds: String,
    pub n: usize,
    pub mean_fd: f64,
    pub n_spikes: usize,
    pub mean_r: f64,
    pub sig_edges: f64,
    pub q: f64,
}

#[derive(Debug, Clone)]
pub struct ScanResult {
    pub metrics: ScanMetrics,
    pub matrix: ConnectivityMatrix,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsTable {
    pub rows: Vec<ScanMetrics>,
}

impl MetricsTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn mean_fd(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.mean_fd).collect()
    }
}

#[derive(Debug, Clone)]
pub struct DistanceDependence {
    /// Inter-ROI distances in the same edge order as the QC-FC vector.
    pub distances: Vec<f64>,
    pub rho: f64,
    pub p_value: f64,
}

#[derive(Debug, Clone)]
pub struct GroupSummary {
    pub n_scans: usize,
    pub group_matrix: ConnectivityMatrix,
    pub mean_r: f64,
    pub modularity_abs: f64,
    pub modularity_prop: f64,
    pub qc_fc: Vec<f64>,
    pub median_abs_qcfc: f64,
    pub distance_dependence: Option<DistanceDependence>,
}

/// Where the modularity estimator draws its randomness from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seeding {
    Entropy,
    /// Every RNG stream is derived from this seed, making runs reproducible
    /// regardless of worker count.
    Fixed(u64),
}

impl Seeding {
    pub fn rng(&self, stream: u64) -> ChaCha8Rng {
        match self {
            Seeding::Entropy => ChaCha8Rng::from_entropy(),
            Seeding::Fixed(seed) => {
                let mut rng = ChaCha8Rng::seed_from_u64(*seed);
                rng.set_stream(stream);
                rng
            }
        }
    }
}

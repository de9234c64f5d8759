use std::sync::Arc;

use tracing::info;

use crate::error::QcError;
use crate::math::matrix::{self, SquareMatrix};
use crate::math::modularity::{CommunityDetection, SignedLouvain};
use crate::math::stats;
use crate::measures::kernel;
use crate::measures::{
    ConnectivityMatrix, DistanceDependence, GroupSummary, MODULARITY_ITERATIONS, MetricsTable,
    Seeding,
};

/// Dataset-level measures across all scans.
#[derive(Clone)]
pub struct DatasetAggregator {
    pub iterations: usize,
    pub seeding: Seeding,
    pub detector: Arc<dyn CommunityDetection>,
}

impl Default for DatasetAggregator {
    fn default() -> Self {
        Self {
            iterations: MODULARITY_ITERATIONS,
            seeding: Seeding::Entropy,
            detector: Arc::new(SignedLouvain::default()),
        }
    }
}

impl DatasetAggregator {
    /// `stream` selects the RNG stream used for group modularity under fixed
    /// seeding.
    pub fn aggregate(
        &self,
        matrices: &[ConnectivityMatrix],
        measures: &MetricsTable,
        coords: Option<&[[f64; 3]]>,
        stream: u64,
    ) -> Result<GroupSummary, QcError> {
        check_shapes(matrices, coords)?;
        let group_matrix = group_mean(matrices)?;
        let mean_r = kernel::mean_connectivity(&group_matrix);

        // abs and prop currently run the same routine on the same matrix.
        let mut rng = self.seeding.rng(stream);
        let modularity_abs =
            kernel::network_modularity(&group_matrix, self.iterations, self.detector.as_ref(), &mut rng);
        let modularity_prop =
            kernel::network_modularity(&group_matrix, self.iterations, self.detector.as_ref(), &mut rng);

        let qc_fc = kernel::qc_fc(matrices, &measures.mean_fd())?;
        let mut abs_qcfc: Vec<f64> = qc_fc.iter().map(|v| v.abs()).collect();
        let median_abs_qcfc = stats::median(&mut abs_qcfc);

        let distance_dependence = match coords {
            Some(points) => Some(distance_dependence(points, &qc_fc)),
            None => {
                info!("no coordinates provided, skipping distance dependence QC-FC");
                None
            }
        };

        Ok(GroupSummary {
            n_scans: matrices.len(),
            group_matrix,
            mean_r,
            modularity_abs,
            modularity_prop,
            qc_fc,
            median_abs_qcfc,
            distance_dependence,
        })
    }
}

/// Every scan must share one signal count, and coordinates, when given,
/// must cover exactly those signals.
pub fn check_shapes(
    matrices: &[ConnectivityMatrix],
    coords: Option<&[[f64; 3]]>,
) -> Result<(), QcError> {
    let Some(first) = matrices.first() else {
        return Ok(());
    };
    let n = first.n();
    if let Some(bad) = matrices.iter().position(|m| m.n() != n) {
        return Err(QcError::Shape(format!(
            "scan {} has {} signals, expected {}",
            bad + 1,
            matrices[bad].n(),
            n
        )));
    }
    if let Some(points) = coords {
        if points.len() != n {
            return Err(QcError::Shape(format!(
                "{} coordinates provided for {} signals",
                points.len(),
                n
            )));
        }
    }
    Ok(())
}

/// Element-wise mean of equally sized matrices.
pub fn group_mean(matrices: &[ConnectivityMatrix]) -> Result<ConnectivityMatrix, QcError> {
    let Some(first) = matrices.first() else {
        return Err(QcError::Shape("no connectivity matrices to aggregate".to_string()));
    };
    let n = first.n();
    let mut sum = SquareMatrix::zeros(n);
    for (idx, m) in matrices.iter().enumerate() {
        if m.n() != n {
            return Err(QcError::Shape(format!(
                "scan {} has {} signals, expected {}",
                idx + 1,
                m.n(),
                n
            )));
        }
        for i in 0..n {
            for j in 0..n {
                sum.set(i, j, sum.get(i, j) + m.get(i, j));
            }
        }
    }
    let k = matrices.len() as f64;
    for i in 0..n {
        for j in 0..n {
            sum.set(i, j, sum.get(i, j) / k);
        }
    }
    Ok(sum)
}

fn distance_dependence(points: &[[f64; 3]], qc_fc: &[f64]) -> DistanceDependence {
    let distances = matrix::euclidean_distances(points).lower_triangle();
    let rho = stats::spearman(qc_fc, &distances);
    let p_value = kernel::spearman_to_p(rho, distances.len());
    DistanceDependence {
        distances,
        rho,
        p_value,
    }
}

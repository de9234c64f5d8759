//! Connectivity and data-quality statistics over plain numeric arrays.

use rand::RngCore;

use crate::error::QcError;
use crate::io::table::Table;
use crate::math::matrix::SquareMatrix;
use crate::math::modularity::CommunityDetection;
use crate::math::stats;
use crate::math::tdist;
use crate::measures::{ConnectivityMatrix, SIGNIFICANCE_ALPHA};

/// Two-tailed p-value of a Pearson `r` computed from `n` samples.
///
/// NaN when `n <= 2` or `|r| == 1`.
pub fn pearson_to_p(r: f64, n: usize) -> f64 {
    if n <= 2 || r.is_nan() || r.abs() >= 1.0 {
        return f64::NAN;
    }
    let df = (n - 2) as f64;
    let t = r * df.sqrt() / (1.0 - r * r).sqrt();
    tdist::student_t_two_tailed(t, df)
}

/// Two-tailed p-value of a Spearman `rho`; a perfect monotone relation is
/// reported as `p = 0` rather than undefined.
pub fn spearman_to_p(rho: f64, n: usize) -> f64 {
    if n > 2 && rho.abs() == 1.0 {
        return 0.0;
    }
    pearson_to_p(rho, n)
}

/// Fraction of edges with `p < 0.05`. Undefined p-values count as not significant.
pub fn count_significant_edges(matrix: &ConnectivityMatrix, n: usize) -> f64 {
    let edges = matrix.lower_triangle();
    if edges.is_empty() {
        return f64::NAN;
    }
    let significant = edges
        .iter()
        .filter(|&&r| pearson_to_p(r, n) < SIGNIFICANCE_ALPHA)
        .count();
    significant as f64 / edges.len() as f64
}

/// Mean modularity Q over `iterations` independent detection runs.
pub fn network_modularity(
    matrix: &ConnectivityMatrix,
    iterations: usize,
    detector: &dyn CommunityDetection,
    rng: &mut dyn RngCore,
) -> f64 {
    let mut qs = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        qs.push(detector.partition(matrix, rng).q);
    }
    stats::mean(&qs)
}

pub fn count_spikes(series: &[f64], threshold: f64) -> usize {
    series.iter().filter(|&&v| v > threshold).count()
}

/// Spearman correlation between each edge and mean framewise displacement
/// across scans, in lower-triangle edge order.
pub fn qc_fc(matrices: &[ConnectivityMatrix], fd: &[f64]) -> Result<Vec<f64>, QcError> {
    if matrices.len() != fd.len() {
        return Err(QcError::Shape(format!(
            "{} connectivity matrices but {} framewise displacement values",
            matrices.len(),
            fd.len()
        )));
    }
    let Some(first) = matrices.first() else {
        return Ok(Vec::new());
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

    let edges: Vec<Vec<f64>> = matrices.iter().map(|m| m.lower_triangle()).collect();
    let n_edges = edges[0].len();
    let mut out = Vec::with_capacity(n_edges);
    let mut column = vec![0.0; matrices.len()];
    for e in 0..n_edges {
        for (slot, scan) in column.iter_mut().zip(&edges) {
            *slot = scan[e];
        }
        out.push(stats::spearman(&column, fd));
    }
    Ok(out)
}

/// Pearson correlation matrix between the columns of `timeseries`.
pub fn connectivity(timeseries: &Table) -> ConnectivityMatrix {
    let n = timeseries.n_cols();
    let mut out = SquareMatrix::zeros(n);
    for i in 0..n {
        out.set(i, i, 1.0);
        for j in 0..i {
            let r = stats::pearson(&timeseries.data[i], &timeseries.data[j]);
            out.set(i, j, r);
            out.set(j, i, r);
        }
    }
    out
}

/// Mean of the off-diagonal lower-triangle entries.
pub fn mean_connectivity(matrix: &ConnectivityMatrix) -> f64 {
    stats::mean(&matrix.lower_triangle())
}

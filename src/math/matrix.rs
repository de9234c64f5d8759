use anyhow::{Result, bail};

/// Dense square matrix stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct SquareMatrix {
    n: usize,
    data: Vec<f64>,
}

impl SquareMatrix {
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * n],
        }
    }

    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                bail!("row {} has {} values, expected {}", i, row.len(), n);
            }
            data.extend_from_slice(row);
        }
        Ok(Self { n, data })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, v: f64) {
        self.data[i * self.n + j] = v;
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.n).map(|i| self.row(i).to_vec()).collect()
    }

    /// Off-diagonal lower-triangle entries in row-major order:
    /// (1,0), (2,0), (2,1), (3,0), ...
    pub fn lower_triangle(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(edge_count(self.n));
        for i in 1..self.n {
            for j in 0..i {
                out.push(self.get(i, j));
            }
        }
        out
    }

    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.n {
            for j in 0..i {
                let a = self.get(i, j);
                let b = self.get(j, i);
                if (a.is_nan() != b.is_nan()) || (!a.is_nan() && (a - b).abs() > tol) {
                    return false;
                }
            }
        }
        true
    }
}

pub fn edge_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Pairwise Euclidean distances between the rows of `points`.
pub fn euclidean_distances(points: &[[f64; 3]]) -> SquareMatrix {
    let n = points.len();
    let mut out = SquareMatrix::zeros(n);
    for i in 0..n {
        for j in 0..i {
            let d = points[i]
                .iter()
                .zip(&points[j])
                .map(|(a, b)| (a - b) * (a - b))
                .sum::<f64>()
                .sqrt();
            out.set(i, j, d);
            out.set(j, i, d);
        }
    }
    out
}

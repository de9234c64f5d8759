//! Community detection for signed, weighted, undirected networks.
//!
//! `SignedLouvain` follows the Louvain scheme generalised to positive and
//! negative weights with the asymmetric ("sta") normalisation of Rubinov &
//! Sporns (2011): positive and negative contributions are weighted by
//! `1/s+` and `1/(s+ + s-)` respectively.

use rand::RngCore;
use rand::seq::SliceRandom;

use crate::math::matrix::SquareMatrix;

const MIN_GAIN: f64 = 1e-10;
const MAX_PASSES: usize = 1000;
const MAX_LEVELS: usize = 300;

#[derive(Debug, Clone)]
pub struct Partition {
    /// Community label per node, numbered from 0 in order of first label value.
    pub communities: Vec<usize>,
    pub q: f64,
}

/// One stochastic community-detection run over a weighted network.
///
/// Implementations must draw all randomness from `rng` so that a seeded
/// generator reproduces the partition exactly.
pub trait CommunityDetection: Send + Sync {
    fn name(&self) -> &'static str;
    fn partition(&self, matrix: &SquareMatrix, rng: &mut dyn RngCore) -> Partition;
}

#[derive(Debug, Clone, Copy)]
pub struct SignedLouvain {
    pub gamma: f64,
}

impl Default for SignedLouvain {
    fn default() -> Self {
        Self { gamma: 1.0 }
    }
}

struct SignedParts {
    pos: SquareMatrix,
    neg: SquareMatrix,
}

fn split_signs(w: &SquareMatrix) -> SignedParts {
    let n = w.n();
    let mut pos = SquareMatrix::zeros(n);
    let mut neg = SquareMatrix::zeros(n);
    for i in 0..n {
        for j in 0..n {
            let v = w.get(i, j);
            if v > 0.0 {
                pos.set(i, j, v);
            } else if v < 0.0 {
                neg.set(i, j, -v);
            }
        }
    }
    SignedParts { pos, neg }
}

fn row_sums(m: &SquareMatrix) -> Vec<f64> {
    (0..m.n()).map(|i| m.row(i).iter().sum()).collect()
}

fn inv_or_zero(s: f64) -> f64 {
    if s > 0.0 { 1.0 / s } else { 0.0 }
}

impl SignedLouvain {
    /// Local moving phase on one aggregation level; returns node -> module.
    fn move_nodes(
        &self,
        parts: &SignedParts,
        inv_s0: f64,
        inv_s1: f64,
        d0: f64,
        d1: f64,
        rng: &mut dyn RngCore,
    ) -> Vec<usize> {
        let n = parts.pos.n();
        let w0 = &parts.pos;
        let w1 = &parts.neg;
        let kn0 = row_sums(w0);
        let kn1 = row_sums(w1);
        let mut km0 = kn0.clone();
        let mut km1 = kn1.clone();
        // node-to-module strengths
        let mut knm0 = w0.clone();
        let mut knm1 = w1.clone();
        let mut m: Vec<usize> = (0..n).collect();
        let mut order: Vec<usize> = (0..n).collect();

        let mut moved = true;
        let mut passes = 0;
        while moved && passes < MAX_PASSES {
            passes += 1;
            moved = false;
            order.shuffle(rng);
            for &u in &order {
                let ma = m[u];
                let mut best_gain = 0.0;
                let mut best: Option<usize> = None;
                for c in 0..n {
                    if c == ma {
                        continue;
                    }
                    let dq0 = (knm0.get(u, c) + w0.get(u, u) - knm0.get(u, ma))
                        - self.gamma * kn0[u] * (km0[c] + kn0[u] - km0[ma]) * inv_s0;
                    let dq1 = (knm1.get(u, c) + w1.get(u, u) - knm1.get(u, ma))
                        - self.gamma * kn1[u] * (km1[c] + kn1[u] - km1[ma]) * inv_s1;
                    let gain = d0 * dq0 - d1 * dq1;
                    if gain > best_gain {
                        best_gain = gain;
                        best = Some(c);
                    }
                }
                let Some(mb) = best else {
                    continue;
                };
                if best_gain <= MIN_GAIN {
                    continue;
                }
                moved = true;
                for v in 0..n {
                    let a0 = w0.get(v, u);
                    let a1 = w1.get(v, u);
                    knm0.set(v, mb, knm0.get(v, mb) + a0);
                    knm0.set(v, ma, knm0.get(v, ma) - a0);
                    knm1.set(v, mb, knm1.get(v, mb) + a1);
                    knm1.set(v, ma, knm1.get(v, ma) - a1);
                }
                km0[mb] += kn0[u];
                km0[ma] -= kn0[u];
                km1[mb] += kn1[u];
                km1[ma] -= kn1[u];
                m[u] = mb;
            }
        }
        m
    }
}

impl CommunityDetection for SignedLouvain {
    fn name(&self) -> &'static str {
        "signed_louvain"
    }

    fn partition(&self, matrix: &SquareMatrix, rng: &mut dyn RngCore) -> Partition {
        let n0 = matrix.n();
        if n0 == 0 {
            return Partition {
                communities: Vec::new(),
                q: f64::NAN,
            };
        }

        let parts = split_signs(matrix);
        let s0: f64 = parts.pos.as_slice().iter().sum();
        let s1: f64 = parts.neg.as_slice().iter().sum();
        let inv_s0 = inv_or_zero(s0);
        let inv_s1 = inv_or_zero(s1);
        let d0 = inv_s0;
        let d1 = inv_or_zero(s0 + s1);

        let mut ci: Vec<usize> = (0..n0).collect();
        let mut level = matrix.clone();
        let mut parts = parts;
        let mut q_prev = 0.0;
        let mut q = 0.0;

        for _ in 0..MAX_LEVELS {
            let m = self.move_nodes(&parts, inv_s0, inv_s1, d0, d1, rng);
            let (labels, k) = relabel(&m);
            for c in ci.iter_mut() {
                *c = labels[*c];
            }

            let mut next = SquareMatrix::zeros(k);
            for i in 0..level.n() {
                for j in 0..level.n() {
                    let (a, b) = (labels[i], labels[j]);
                    next.set(a, b, next.get(a, b) + level.get(i, j));
                }
            }
            level = next;
            parts = split_signs(&level);

            let q0 = trace(&parts.pos) - squared_strength(&parts.pos) * inv_s0;
            let q1 = trace(&parts.neg) - squared_strength(&parts.neg) * inv_s1;
            q = d0 * q0 - d1 * q1;
            if q - q_prev <= MIN_GAIN {
                break;
            }
            q_prev = q;
        }

        Partition { communities: ci, q }
    }
}

/// Maps arbitrary module ids to 0..k ordered by id value.
fn relabel(m: &[usize]) -> (Vec<usize>, usize) {
    let mut uniq: Vec<usize> = m.to_vec();
    uniq.sort_unstable();
    uniq.dedup();
    let labels = m
        .iter()
        .map(|v| uniq.binary_search(v).unwrap_or_default())
        .collect();
    (labels, uniq.len())
}

fn trace(m: &SquareMatrix) -> f64 {
    (0..m.n()).map(|i| m.get(i, i)).sum()
}

// sum(W . W) for symmetric W, i.e. the sum of squared node strengths.
fn squared_strength(m: &SquareMatrix) -> f64 {
    row_sums(m).iter().map(|k| k * k).sum()
}

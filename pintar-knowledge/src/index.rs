//! Exact inner-product index over L2-normalized vectors.
//!
//! Brute force on purpose: corpora here are a few hundred lines, so a
//! linear scan beats any approximate structure and stays deterministic.

use crate::errors::{KnowledgeError, KnowledgeResult};

/// Guard against division by zero when normalizing. Zero vectors stay
/// (near) zero instead of turning into NaN.
const NORM_EPSILON: f32 = 1e-12;

#[derive(Debug, Clone)]
pub struct VectorIndex {
    dim: usize,
    rows: Vec<Vec<f32>>,
}

impl VectorIndex {
    /// Build an index from raw vectors, normalizing each row.
    ///
    /// Every row must have length `dim`.
    pub fn build(dim: usize, rows: Vec<Vec<f32>>) -> KnowledgeResult<Self> {
        for row in &rows {
            if row.len() != dim {
                return Err(KnowledgeError::DimensionMismatch {
                    expected: dim,
                    actual: row.len(),
                });
            }
        }

        let rows = rows.into_iter().map(normalize).collect();
        Ok(Self { dim, rows })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Top `k` rows by inner product against the (normalized) query.
    ///
    /// Returns `(row_index, score)` pairs, best first. Equal scores keep
    /// insertion order, so results are stable across runs. At most
    /// `min(k, len)` pairs come back; `k == 0` yields none.
    pub fn search(&self, query: &[f32], k: usize) -> KnowledgeResult<Vec<(usize, f32)>> {
        if query.len() != self.dim {
            return Err(KnowledgeError::DimensionMismatch {
                expected: self.dim,
                actual: query.len(),
            });
        }
        if k == 0 || self.rows.is_empty() {
            return Ok(Vec::new());
        }

        let query = normalize(query.to_vec());
        let mut hits: Vec<(usize, f32)> = self
            .rows
            .iter()
            .enumerate()
            .map(|(row, vector)| (row, dot(&query, vector)))
            .collect();

        // Stable sort: ties stay in ascending row order.
        hits.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(k);

        Ok(hits)
    }
}

fn normalize(mut vector: Vec<f32>) -> Vec<f32> {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    for x in &mut vector {
        *x /= norm + NORM_EPSILON;
    }
    vector
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

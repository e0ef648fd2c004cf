// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Simplicial homology with coefficients in GF(2).
//!
//! The boundary map `∂_k : C_k → C_{k-1}` is a 0/1 matrix whose column for a
//! k-simplex has a 1 in the row of each of its codimension-1 faces. Over GF(2)
//! the Betti numbers follow from matrix ranks alone:
//!
//! ```text
//! β_k = f_k - rank ∂_k - rank ∂_{k+1}
//! ```
//!
//! with `rank ∂_0 = 0`. Their alternating sum equals the Euler characteristic
//! (Euler–Poincaré), which the tests use as a cross-check.

use rustc_hash::FxHashMap;

use crate::complex::SimplicialComplex;
use crate::error::Result;
use crate::simplex::{Simplex, Vertex};

/// A dense vector over GF(2), packed into 64-bit words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitVec {
    words: Vec<u64>,
    len: usize,
}

impl BitVec {
    /// A zero vector with `len` bits.
    pub fn zeros(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(64)],
            len,
        }
    }

    /// Number of logical bits.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the vector has no bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if no bit is set.
    pub fn is_zero(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    pub fn get(&self, i: usize) -> bool {
        (self.words[i / 64] >> (i % 64)) & 1 == 1
    }

    pub fn set(&mut self, i: usize) {
        self.words[i / 64] |= 1 << (i % 64);
    }

    /// `self += other` over GF(2).
    pub fn xor_assign(&mut self, other: &BitVec) {
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a ^= b;
        }
    }

    /// Index of the highest set bit.
    pub fn pivot(&self) -> Option<usize> {
        self.words
            .iter()
            .enumerate()
            .rev()
            .find(|&(_, &w)| w != 0)
            .map(|(i, &w)| i * 64 + 63 - w.leading_zeros() as usize)
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}

/// The matrix of `∂_k`, stored column by column.
#[derive(Debug, Clone)]
pub struct BoundaryMatrix {
    rows: usize,
    columns: Vec<BitVec>,
}

impl BoundaryMatrix {
    /// Builds `∂_k` for `1 <= k <= complex.dimension()`.
    ///
    /// Rows follow the canonical order of (k-1)-simplices, columns that of
    /// k-simplices.
    pub fn new<V: Vertex>(complex: &SimplicialComplex<V>, k: usize) -> Result<Self> {
        // Validates k before anything is allocated.
        complex.boundary(k)?;

        let row_index: FxHashMap<&Simplex<V>, usize> = complex
            .k_simplices(k - 1)?
            .enumerate()
            .map(|(i, s)| (s, i))
            .collect();
        let rows = row_index.len();

        let mut columns = Vec::new();
        for simplex in complex.k_simplices(k)? {
            let mut column = BitVec::zeros(rows);
            for face in simplex.faces_of_size(simplex.len() - 1) {
                // Downward closure: every face has a row.
                if let Some(&row) = row_index.get(&face) {
                    column.set(row);
                }
            }
            columns.push(column);
        }
        Ok(Self { rows, columns })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.columns.len()
    }

    /// Whether entry `(row, col)` is 1.
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.columns[col].get(row)
    }

    /// Rank over GF(2), by standard column reduction.
    pub fn rank(&self) -> usize {
        let mut columns = self.columns.clone();
        // pivot row -> index of the reduced column owning it
        let mut owner: FxHashMap<usize, usize> = FxHashMap::default();
        let mut rank = 0;
        for j in 0..columns.len() {
            while let Some(pivot) = columns[j].pivot() {
                match owner.get(&pivot) {
                    Some(&i) => {
                        let (left, right) = columns.split_at_mut(j);
                        right[0].xor_assign(&left[i]);
                    }
                    None => {
                        owner.insert(pivot, j);
                        rank += 1;
                        break;
                    }
                }
            }
        }
        rank
    }
}

/// Mod-2 Betti numbers of a complex, indexed by dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BettiNumbers {
    pub by_dim: Vec<usize>,
}

impl BettiNumbers {
    /// `β_k`, or 0 above the complex's dimension.
    pub fn get(&self, k: usize) -> usize {
        self.by_dim.get(k).copied().unwrap_or(0)
    }

    /// `Σ (-1)^k β_k`.
    pub fn euler_characteristic(&self) -> i64 {
        self.by_dim
            .iter()
            .enumerate()
            .map(|(k, &b)| if k % 2 == 0 { b as i64 } else { -(b as i64) })
            .sum()
    }

    /// Sum of all Betti numbers.
    pub fn total(&self) -> usize {
        self.by_dim.iter().sum()
    }
}

/// Computes the mod-2 Betti numbers of `complex`.
///
/// ```
/// use tda_simplicial::{homology, Simplex, SimplicialComplex};
///
/// // A hollow triangle: one component, one loop.
/// let circle = SimplicialComplex::new([
///     Simplex::new(['a', 'b']),
///     Simplex::new(['b', 'c']),
///     Simplex::new(['a', 'c']),
/// ])
/// .unwrap();
/// let betti = homology::betti_numbers(&circle).unwrap();
/// assert_eq!(betti.by_dim, vec![1, 1]);
/// ```
pub fn betti_numbers<V: Vertex>(complex: &SimplicialComplex<V>) -> Result<BettiNumbers> {
    let top = complex.dimension();
    // ranks[k] = rank ∂_k, with ∂_0 and ∂_{top+1} both zero.
    let mut ranks = vec![0usize; top + 2];
    for k in 1..=top {
        ranks[k] = BoundaryMatrix::new(complex, k)?.rank();
    }
    let f = complex.f_vector();
    let by_dim = (0..=top).map(|k| f[k] - ranks[k] - ranks[k + 1]).collect();
    let betti = BettiNumbers { by_dim };
    tracing::debug!(betti = ?betti.by_dim, "computed mod-2 Betti numbers");
    Ok(betti)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s<const N: usize>(points: [u32; N]) -> Simplex<u32> {
        Simplex::new(points)
    }

    #[test]
    fn bitvec_pivot_and_xor() {
        let mut a = BitVec::zeros(130);
        assert!(a.is_zero());
        assert_eq!(a.pivot(), None);
        a.set(3);
        a.set(129);
        assert_eq!(a.pivot(), Some(129));
        assert_eq!(a.count_ones(), 2);

        let mut b = BitVec::zeros(130);
        b.set(129);
        a.xor_assign(&b);
        assert_eq!(a.pivot(), Some(3));
        assert!(a.get(3));
        assert!(!a.get(129));
    }

    #[test]
    fn triangle_boundary_matrix() {
        let triangle = SimplicialComplex::new([s([0, 1, 2])]).unwrap();
        let d2 = BoundaryMatrix::new(&triangle, 2).unwrap();
        assert_eq!((d2.rows(), d2.cols()), (3, 1));
        assert!((0..3).all(|row| d2.get(row, 0)));

        let d1 = BoundaryMatrix::new(&triangle, 1).unwrap();
        assert_eq!((d1.rows(), d1.cols()), (3, 3));
        // Three edges of a triangle span a 2-dimensional space mod 2.
        assert_eq!(d1.rank(), 2);
    }

    #[test]
    fn invalid_degree_is_rejected() {
        let edge = SimplicialComplex::new([s([0, 1])]).unwrap();
        assert!(BoundaryMatrix::new(&edge, 0).is_err());
        assert!(BoundaryMatrix::new(&edge, 2).is_err());
    }

    #[test]
    fn filled_simplices_are_contractible() {
        for n in 1..=5u32 {
            let cx = SimplicialComplex::new([Simplex::new(0..n)]).unwrap();
            let betti = betti_numbers(&cx).unwrap();
            assert_eq!(betti.get(0), 1);
            assert_eq!(betti.total(), 1, "simplex on {n} points");
        }
    }

    #[test]
    fn hollow_tetrahedron_is_a_two_sphere() {
        let tetra = s([0, 1, 2, 3]);
        let shell = SimplicialComplex::new(tetra.boundary().unwrap().iter()).unwrap();
        let betti = betti_numbers(&shell).unwrap();
        assert_eq!(betti.by_dim, vec![1, 0, 1]);
        assert_eq!(betti.euler_characteristic(), shell.euler_number());
    }

    #[test]
    fn disjoint_pieces_count_components() {
        let cx = SimplicialComplex::new([s([0, 1]), s([2]), s([3, 4, 5])]).unwrap();
        let betti = betti_numbers(&cx).unwrap();
        assert_eq!(betti.by_dim, vec![3, 0, 0]);
    }

    #[test]
    fn euler_poincare_on_a_torus() {
        // Minimal 7-vertex triangulation of the torus: {i, i+1, i+3} and
        // {i, i+2, i+3} mod 7.
        let triangles = (0..7u32).flat_map(|i| {
            [
                Simplex::new([i, (i + 1) % 7, (i + 3) % 7]),
                Simplex::new([i, (i + 2) % 7, (i + 3) % 7]),
            ]
        });
        let torus = SimplicialComplex::new(triangles).unwrap();
        assert_eq!(torus.f_vector(), vec![7, 21, 14]);
        assert_eq!(torus.euler_number(), 0);

        let betti = betti_numbers(&torus).unwrap();
        assert_eq!(betti.by_dim, vec![1, 2, 1]);
        assert_eq!(betti.euler_characteristic(), torus.euler_number());
    }
}

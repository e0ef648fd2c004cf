// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A single entry point for the boundary operator.
//!
//! [`boundary`] works on anything implementing [`BoundaryOperator`]. The
//! caller's static type selects the behavior:
//!
//! | Entity | `Degree` | Result |
//! |---|---|---|
//! | [`Simplex`] | `()` | its codimension-1 faces, or zero for `k <= 0` |
//! | [`SimplicialComplex`] | `usize` | the (k-1)-faces of all k-simplices |
//! | [`KChain`] / [`Chain`] | `()` | the mod-2 boundary |

use crate::chain::{Chain, KChain};
use crate::complex::SimplicialComplex;
use crate::error::Result;
use crate::simplex::{Simplex, Vertex};

/// Something with a boundary in a mod-2 chain group.
pub trait BoundaryOperator {
    /// Vertex label type of the resulting chain.
    type Vertex: Vertex;
    /// Extra input needed to pick the boundary: `()` when the entity has a
    /// single boundary, a dimension when it has one per dimension.
    type Degree;

    /// Computes the boundary as a chain.
    fn boundary_chain(&self, degree: Self::Degree) -> Result<Chain<Self::Vertex>>;
}

impl<V: Vertex> BoundaryOperator for Simplex<V> {
    type Vertex = V;
    type Degree = ();

    fn boundary_chain(&self, _: ()) -> Result<Chain<V>> {
        Ok(self.boundary().into())
    }
}

impl<V: Vertex> BoundaryOperator for SimplicialComplex<V> {
    type Vertex = V;
    type Degree = usize;

    fn boundary_chain(&self, k: usize) -> Result<Chain<V>> {
        self.boundary(k).map(Chain::from)
    }
}

impl<V: Vertex> BoundaryOperator for KChain<V> {
    type Vertex = V;
    type Degree = ();

    fn boundary_chain(&self, _: ()) -> Result<Chain<V>> {
        self.boundary()
    }
}

impl<V: Vertex> BoundaryOperator for Chain<V> {
    type Vertex = V;
    type Degree = ();

    fn boundary_chain(&self, _: ()) -> Result<Chain<V>> {
        self.boundary()
    }
}

/// The boundary of `entity`.
///
/// ```
/// use tda_simplicial::{boundary, Simplex, SimplicialComplex};
///
/// let triangle = Simplex::new(['a', 'b', 'c']);
/// let edges = boundary(&triangle, ()).unwrap();
/// assert_eq!(edges.len(), 3);
///
/// let complex = SimplicialComplex::new([triangle]).unwrap();
/// let faces = boundary(&complex, 2).unwrap();
/// assert_eq!(faces, edges);
/// ```
pub fn boundary<B: BoundaryOperator>(entity: &B, degree: B::Degree) -> Result<Chain<B::Vertex>> {
    entity.boundary_chain(degree)
}

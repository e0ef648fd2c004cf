// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # TDA Simplicial
//!
//! Abstract simplicial complexes and mod-2 chain arithmetic for topological
//! data analysis.
//!
//! A [`Simplex`] is a set of point identifiers of any hashable, ordered type.
//! A [`SimplicialComplex`] is built from generator simplices and is closed
//! under taking faces. It provides the combinatorial operators closure, star
//! and link, per-dimension counts and the Euler characteristic. [`KChain`] and
//! [`Chain`] model the chain groups over the two-element field, with mod-2
//! addition and the boundary operator, enough to check `∂∂ = 0` and compute
//! mod-2 Betti numbers ([`homology`]).
//!
//! ```
//! use tda_simplicial::{Chain, Simplex, SimplicialComplex};
//!
//! let tetrahedron = Simplex::new([0, 1, 2, 3]);
//!
//! // Filled tetrahedron: 4 - 6 + 4 - 1 = 1
//! let solid = SimplicialComplex::new([&tetrahedron]).unwrap();
//! assert_eq!(solid.euler_number(), 1);
//!
//! // Its boundary is a 2-sphere: 4 - 6 + 4 = 2
//! let shell = tetrahedron.boundary().unwrap();
//! let sphere = SimplicialComplex::new(&shell).unwrap();
//! assert_eq!(sphere.euler_number(), 2);
//!
//! // The boundary of a boundary vanishes.
//! assert!(Chain::from(shell).boundary().unwrap().is_zero());
//! ```
//!
//! All types are immutable values. Operations are pure and synchronous;
//! large complexes fan out over rayon above [`Config::parallel_threshold`].

pub mod boundary;
pub mod chain;
pub mod complex;
pub mod config;
pub mod error;
pub mod homology;
pub mod serialization;
pub mod simplex;

pub use boundary::{boundary, BoundaryOperator};
pub use chain::{Chain, KChain};
pub use complex::SimplicialComplex;
pub use config::Config;
pub use error::{Error, Result};
pub use homology::{betti_numbers, BettiNumbers};
pub use serialization::{ChainSnapshot, ComplexSnapshot};
pub use simplex::{Simplex, Vertex};

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Downward-closed collections of simplices.
//!
//! A [`SimplicialComplex`] is built once from generator simplices. Every face
//! of every generator is added at construction, so the complex is closed under
//! taking faces: for each member, every non-empty subset of its points is also
//! a member. The complex is immutable afterwards; closure, star and link
//! return new values.
//!
//! Operators that take a group of simplices accept anything iterable whose
//! items borrow as a [`Simplex`]: an array, a slice, a `BTreeSet`, a
//! [`KChain`], or another complex.

use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use rayon::prelude::*;

use crate::chain::KChain;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::simplex::{Simplex, Vertex};

/// A simplicial complex over vertex labels of type `V`.
///
/// # Example
///
/// ```
/// use tda_simplicial::{Simplex, SimplicialComplex};
///
/// let tetrahedron = SimplicialComplex::new([Simplex::new([0, 1, 2, 3])]).unwrap();
/// assert_eq!(tetrahedron.dimension(), 3);
/// assert_eq!(tetrahedron.f_vector(), vec![4, 6, 4, 1]);
/// assert_eq!(tetrahedron.euler_number(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SimplicialComplex<V> {
    simplices: BTreeSet<Simplex<V>>,
    points: BTreeSet<V>,
    k: usize,
    k_counter: BTreeMap<usize, usize>,
    euler_number: i64,
    config: Config,
}

/// Copies a group of simplices into an ordered set.
fn normalize<V, I, S>(simplices: I) -> BTreeSet<Simplex<V>>
where
    V: Vertex,
    I: IntoIterator<Item = S>,
    S: Borrow<Simplex<V>>,
{
    simplices.into_iter().map(|s| s.borrow().clone()).collect()
}

impl<V: Vertex> SimplicialComplex<V> {
    /// Builds the complex generated by `generators` with the default
    /// [`Config`].
    ///
    /// Empty simplices are ignored. Fails with [`Error::EmptyComplex`] if no
    /// non-empty generator is given.
    pub fn new<I, S>(generators: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Borrow<Simplex<V>>,
    {
        Self::with_config(generators, Config::default())
    }

    /// Builds the complex generated by `generators` with an explicit config.
    pub fn with_config<I, S>(generators: I, config: Config) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Borrow<Simplex<V>>,
    {
        let mut generators = normalize(generators);
        generators.retain(|g| !g.is_empty());

        // Ordered by dimension, so the last generator is the largest.
        let Some(largest) = generators.last() else {
            return Err(Error::EmptyComplex);
        };
        let k = largest.dimension() as usize;
        if k > config.max_dimension {
            return Err(Error::GeneratorTooLarge {
                dimension: k,
                max: config.max_dimension,
            });
        }

        // Each generator's faces are complete on their own: one pass per
        // generator establishes downward closure.
        let workload: usize = generators
            .iter()
            .map(Simplex::face_count)
            .fold(0, usize::saturating_add);
        let simplices: BTreeSet<Simplex<V>> = if config.use_parallel(workload) {
            generators
                .par_iter()
                .flat_map_iter(Self::generator_faces)
                .collect()
        } else {
            generators.iter().flat_map(Self::generator_faces).collect()
        };

        let points: BTreeSet<V> = generators
            .iter()
            .flat_map(|g| g.points().iter().cloned())
            .collect();

        let mut k_counter = BTreeMap::new();
        for simplex in &simplices {
            *k_counter.entry(simplex.dimension() as usize).or_insert(0) += 1;
        }
        let euler_number: i64 = k_counter
            .iter()
            .map(|(&dim, &count)| {
                let count = count as i64;
                if dim % 2 == 0 {
                    count
                } else {
                    -count
                }
            })
            .sum();

        tracing::debug!(
            generators = generators.len(),
            simplices = simplices.len(),
            dimension = k,
            euler_number,
            "built simplicial complex"
        );

        Ok(Self {
            simplices,
            points,
            k,
            k_counter,
            euler_number,
            config,
        })
    }

    /// The generator together with its boundary and interior faces.
    fn generator_faces(generator: &Simplex<V>) -> BTreeSet<Simplex<V>> {
        let mut faces = generator.interior();
        if let Some(boundary) = generator.boundary() {
            faces.extend(boundary);
        }
        faces.insert(generator.clone());
        faces
    }

    /// Maximum dimension among members.
    pub fn dimension(&self) -> usize {
        self.k
    }

    /// Every vertex label used by the complex.
    pub fn points(&self) -> &BTreeSet<V> {
        &self.points
    }

    /// Number of simplices of each dimension.
    pub fn k_counter(&self) -> &BTreeMap<usize, usize> {
        &self.k_counter
    }

    /// Simplex counts indexed by dimension, `[f_0, f_1, ..., f_k]`.
    pub fn f_vector(&self) -> Vec<usize> {
        (0..=self.k)
            .map(|dim| self.k_counter.get(&dim).copied().unwrap_or(0))
            .collect()
    }

    /// The Euler characteristic `Σ (-1)^i f_i`, computed at construction.
    pub fn euler_number(&self) -> i64 {
        self.euler_number
    }

    /// The configuration the complex was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Total number of simplices.
    pub fn len(&self) -> usize {
        self.simplices.len()
    }

    /// Always `false`: construction rejects empty complexes.
    pub fn is_empty(&self) -> bool {
        self.simplices.is_empty()
    }

    /// Returns `true` if `simplex` is a member.
    pub fn contains(&self, simplex: &Simplex<V>) -> bool {
        self.simplices.contains(simplex)
    }

    /// Iterates members, lowest dimension first.
    pub fn iter(&self) -> std::collections::btree_set::Iter<'_, Simplex<V>> {
        self.simplices.iter()
    }

    /// The members as an ordered set.
    pub fn simplices(&self) -> &BTreeSet<Simplex<V>> {
        &self.simplices
    }

    /// Returns `true` if every member of `self` is a member of `other`.
    pub fn is_subcomplex_of(&self, other: &SimplicialComplex<V>) -> bool {
        self.simplices.is_subset(&other.simplices)
    }

    /// Normalizes `simplices` and checks each one is a member.
    fn members_of<I, S>(&self, simplices: I) -> Result<BTreeSet<Simplex<V>>>
    where
        I: IntoIterator<Item = S>,
        S: Borrow<Simplex<V>>,
    {
        let set = normalize(simplices);
        if let Some(outsider) = set.iter().find(|s| !self.contains(s)) {
            return Err(Error::NotASubset(format!("{outsider:?}")));
        }
        Ok(set)
    }

    /// The smallest complex containing the given members and their faces.
    ///
    /// Fails with [`Error::NotASubset`] if any simplex is not a member and
    /// with [`Error::EmptyComplex`] if none is given.
    pub fn closure<I, S>(&self, simplices: I) -> Result<SimplicialComplex<V>>
    where
        I: IntoIterator<Item = S>,
        S: Borrow<Simplex<V>>,
    {
        let generators = self.members_of(simplices)?;
        SimplicialComplex::with_config(generators, self.config.clone())
    }

    /// Every member having at least one of the given simplices as a face.
    ///
    /// Always returns a set; it is empty only when no simplex is given.
    pub fn star<I, S>(&self, simplices: I) -> Result<BTreeSet<Simplex<V>>>
    where
        I: IntoIterator<Item = S>,
        S: Borrow<Simplex<V>>,
    {
        let given = self.members_of(simplices)?;
        if given.is_empty() {
            return Ok(BTreeSet::new());
        }
        let has_face = |t: &&Simplex<V>| given.iter().any(|s| s.is_face_of(t));

        let star: BTreeSet<Simplex<V>> = if self.config.use_parallel(self.len()) {
            self.simplices.par_iter().filter(has_face).cloned().collect()
        } else {
            self.simplices.iter().filter(has_face).cloned().collect()
        };
        tracing::trace!(given = given.len(), star = star.len(), "computed star");
        Ok(star)
    }

    /// The closed star minus the open star.
    ///
    /// Disjoint from [`star`](Self::star) of the same input by construction.
    pub fn link<I, S>(&self, simplices: I) -> Result<BTreeSet<Simplex<V>>>
    where
        I: IntoIterator<Item = S>,
        S: Borrow<Simplex<V>>,
    {
        let star = self.star(simplices)?;
        if star.is_empty() {
            return Ok(BTreeSet::new());
        }
        let closed = self.closure(&star)?;
        let link: BTreeSet<Simplex<V>> = closed.simplices.difference(&star).cloned().collect();
        tracing::trace!(star = star.len(), link = link.len(), "computed link");
        Ok(link)
    }

    fn check_dimension(&self, k: usize, min: usize) -> Result<()> {
        if k < min || k > self.k {
            return Err(Error::InvalidDimension {
                requested: k as isize,
                min: min as isize,
                max: self.k as isize,
            });
        }
        Ok(())
    }

    /// Lazily yields the members of dimension exactly `k`.
    pub fn k_simplices(&self, k: usize) -> Result<impl Iterator<Item = &Simplex<V>> + '_> {
        self.check_dimension(k, 0)?;
        Ok(self
            .simplices
            .iter()
            .filter(move |s| s.dimension() == k as isize))
    }

    /// All k-simplices as a chain.
    pub fn k_chain(&self, k: usize) -> Result<KChain<V>> {
        // Downward closure guarantees at least one simplex per dimension <= k.
        KChain::new(self.k_simplices(k)?.cloned())
    }

    /// The (k-1)-faces of all k-simplices, collected into a (k-1)-chain.
    ///
    /// Fails with [`Error::InvalidDimension`] unless `1 <= k <= dimension()`.
    /// Use [`KChain::boundary`] on [`k_chain`](Self::k_chain) for the
    /// algebraic mod-2 boundary instead.
    pub fn boundary(&self, k: usize) -> Result<KChain<V>> {
        self.check_dimension(k, 1)?;
        let faces: BTreeSet<Simplex<V>> = self
            .k_simplices(k)?
            .filter_map(Simplex::boundary)
            .flatten()
            .collect();
        Ok(KChain::from_parts(k - 1, faces))
    }

    /// Maximal members: those that are not a proper face of another member.
    ///
    /// The facets generate the complex.
    pub fn facets(&self) -> BTreeSet<Simplex<V>> {
        // Downward closure means any proper coface implies a coface exactly
        // one dimension up.
        self.simplices
            .iter()
            .filter(|s| {
                !self
                    .simplices
                    .iter()
                    .filter(|t| t.len() == s.len() + 1)
                    .any(|t| s.is_face_of(t))
            })
            .cloned()
            .collect()
    }

    /// The subcomplex of all members of dimension at most `k`.
    pub fn skeleton(&self, k: usize) -> SimplicialComplex<V> {
        if k >= self.k {
            return self.clone();
        }
        let generators = self
            .simplices
            .iter()
            .filter(|s| s.dimension() as usize <= k);
        // Non-empty: every complex has vertices.
        match SimplicialComplex::with_config(generators, self.config.clone()) {
            Ok(skeleton) => skeleton,
            Err(_) => self.clone(),
        }
    }
}

impl<V: Vertex> PartialEq for SimplicialComplex<V> {
    fn eq(&self, other: &Self) -> bool {
        self.simplices == other.simplices
    }
}

impl<V: Vertex> Eq for SimplicialComplex<V> {}

impl<'a, V> IntoIterator for &'a SimplicialComplex<V> {
    type Item = &'a Simplex<V>;
    type IntoIter = std::collections::btree_set::Iter<'a, Simplex<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.simplices.iter()
    }
}

impl<V> fmt::Display for SimplicialComplex<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "simplicial {}-complex", self.k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s<const N: usize>(points: [u32; N]) -> Simplex<u32> {
        Simplex::new(points)
    }

    fn complex<const N: usize>(generators: [Simplex<u32>; N]) -> SimplicialComplex<u32> {
        SimplicialComplex::with_config(generators, Config::sequential()).unwrap()
    }

    fn set<const N: usize>(simplices: [Simplex<u32>; N]) -> BTreeSet<Simplex<u32>> {
        simplices.into_iter().collect()
    }

    #[test]
    fn filled_tetrahedron_counts() {
        let tetra = complex([s([0, 1, 2, 3])]);
        let expected: BTreeMap<usize, usize> = [(0, 4), (1, 6), (2, 4), (3, 1)].into();
        assert_eq!(tetra.k_counter(), &expected);
        assert_eq!(tetra.len(), 15);
        assert_eq!(tetra.dimension(), 3);
        assert_eq!(tetra.euler_number(), 1);
        assert_eq!(tetra.points(), &(0..4).collect::<BTreeSet<u32>>());
    }

    #[test]
    fn hollow_tetrahedron_is_a_sphere() {
        let tetra = s([0, 1, 2, 3]);
        let shell =
            SimplicialComplex::with_config(tetra.boundary().unwrap().iter(), Config::sequential())
                .unwrap();
        assert_eq!(shell.f_vector(), vec![4, 6, 4]);
        assert_eq!(shell.euler_number(), 2);
    }

    #[test]
    fn empty_generators_are_rejected() {
        assert_eq!(
            SimplicialComplex::<u32>::new(Vec::<Simplex<u32>>::new()).unwrap_err(),
            Error::EmptyComplex
        );
        assert_eq!(
            SimplicialComplex::new([Simplex::<u32>::empty()]).unwrap_err(),
            Error::EmptyComplex
        );
    }

    #[test]
    fn oversized_generators_are_rejected() {
        let config = Config {
            parallel_threshold: usize::MAX,
            max_dimension: 2,
        };
        let err = SimplicialComplex::with_config([s([0, 1, 2, 3])], config).unwrap_err();
        assert_eq!(
            err,
            Error::GeneratorTooLarge {
                dimension: 3,
                max: 2
            }
        );
    }

    #[test]
    fn construction_deduplicates_shared_faces() {
        let pair = complex([s([0, 1, 2]), s([1, 2, 3])]);
        assert_eq!(pair.f_vector(), vec![4, 5, 2]);
        assert_eq!(pair.euler_number(), 1);
    }

    #[test]
    fn parallel_construction_matches_sequential() {
        let generators = [s([0, 1, 2, 3, 4]), s([3, 4, 5, 6]), s([6, 7])];
        let sequential = complex(generators.clone());
        let parallel = SimplicialComplex::with_config(
            generators,
            Config {
                parallel_threshold: 0,
                max_dimension: 8,
            },
        )
        .unwrap();
        assert_eq!(sequential, parallel);
        assert_eq!(sequential.euler_number(), parallel.euler_number());
        assert_eq!(
            sequential.star([s([3])]).unwrap(),
            parallel.star([s([3])]).unwrap()
        );
    }

    #[test]
    fn closure_requires_membership() {
        let triangle = complex([s([0, 1, 2])]);
        let err = triangle.closure([s([0, 3])]).unwrap_err();
        assert!(matches!(err, Error::NotASubset(_)));
    }

    #[test]
    fn closure_of_an_edge() {
        let triangle = complex([s([0, 1, 2])]);
        let closed = triangle.closure([s([0, 1])]).unwrap();
        assert_eq!(closed.simplices(), &set([s([0]), s([1]), s([0, 1])]));
        assert!(closed.is_subcomplex_of(&triangle));
    }

    #[test]
    fn closure_accepts_sets_and_complexes() {
        let triangle = complex([s([0, 1, 2])]);
        let from_set = triangle.closure(&set([s([1, 2])])).unwrap();
        let from_array = triangle.closure([s([1, 2])]).unwrap();
        assert_eq!(from_set, from_array);

        let whole = triangle.closure(&triangle).unwrap();
        assert_eq!(whole, triangle);
    }

    #[test]
    fn star_of_a_vertex() {
        let triangle = complex([s([0, 1, 2])]);
        let star = triangle.star([s([0])]).unwrap();
        assert_eq!(star, set([s([0]), s([0, 1]), s([0, 2]), s([0, 1, 2])]));
    }

    #[test]
    fn star_of_nothing_is_empty() {
        let triangle = complex([s([0, 1, 2])]);
        assert!(triangle.star(Vec::<Simplex<u32>>::new()).unwrap().is_empty());
        assert!(triangle.link(Vec::<Simplex<u32>>::new()).unwrap().is_empty());
    }

    #[test]
    fn link_of_a_vertex_in_a_triangle_is_the_opposite_edge() {
        let triangle = complex([s([0, 1, 2])]);
        let link = triangle.link([s([0])]).unwrap();
        assert_eq!(link, set([s([1]), s([2]), s([1, 2])]));
    }

    #[test]
    fn link_of_a_vertex_in_a_tetrahedron_is_a_triangle() {
        let tetra = complex([s([0, 1, 2, 3])]);
        let link = tetra.link([s([3])]).unwrap();
        let expected = complex([s([0, 1, 2])]);
        assert_eq!(&link, expected.simplices());
    }

    #[test]
    fn link_and_star_are_disjoint() {
        let cx = complex([s([0, 1, 2]), s([2, 3]), s([3, 4, 5])]);
        for given in [vec![s([2])], vec![s([3]), s([0, 1])], vec![s([4, 5])]] {
            let star = cx.star(&given).unwrap();
            let link = cx.link(&given).unwrap();
            assert!(star.is_disjoint(&link));
        }
    }

    #[test]
    fn k_simplices_filters_by_dimension() {
        let tetra = complex([s([0, 1, 2, 3])]);
        assert_eq!(tetra.k_simplices(2).unwrap().count(), 4);
        assert!(tetra
            .k_simplices(1)
            .unwrap()
            .all(|simplex| simplex.dimension() == 1));
        assert!(matches!(
            tetra.k_simplices(4),
            Err(Error::InvalidDimension { requested: 4, .. })
        ));
    }

    #[test]
    fn k_chain_wraps_k_simplices() {
        let tetra = complex([s([0, 1, 2, 3])]);
        let edges = tetra.k_chain(1).unwrap();
        assert_eq!(edges.dimension(), 1);
        assert_eq!(edges.len(), 6);
    }

    #[test]
    fn dimension_boundary_collects_faces() {
        let tetra = complex([s([0, 1, 2, 3])]);
        let boundary = tetra.boundary(3).unwrap();
        assert_eq!(boundary.dimension(), 2);
        assert_eq!(boundary.len(), 4);

        let edges = tetra.boundary(2).unwrap();
        assert_eq!(edges.len(), 6);
    }

    #[test]
    fn dimension_boundary_range() {
        let triangle = complex([s([0, 1, 2])]);
        assert_eq!(
            triangle.boundary(0).unwrap_err(),
            Error::InvalidDimension {
                requested: 0,
                min: 1,
                max: 2
            }
        );
        assert!(triangle.boundary(3).is_err());
    }

    #[test]
    fn facets_regenerate_the_complex() {
        let cx = complex([s([0, 1, 2]), s([2, 3]), s([4])]);
        let facets = cx.facets();
        assert_eq!(facets, set([s([4]), s([2, 3]), s([0, 1, 2])]));
        assert_eq!(complex([s([0, 1, 2]), s([2, 3]), s([4])]), cx.closure(&facets).unwrap());
    }

    #[test]
    fn skeleton_drops_higher_simplices() {
        let tetra = complex([s([0, 1, 2, 3])]);
        let one = tetra.skeleton(1);
        assert_eq!(one.f_vector(), vec![4, 6]);
        assert_eq!(one.euler_number(), -2);
        assert_eq!(tetra.skeleton(7), tetra);
    }

    #[test]
    fn display_names_dimension() {
        assert_eq!(complex([s([0, 1])]).to_string(), "simplicial 1-complex");
    }

    #[test]
    fn iteration_is_low_to_high() {
        let triangle = complex([s([0, 1, 2])]);
        let dims: Vec<isize> = triangle.iter().map(Simplex::dimension).collect();
        assert_eq!(dims, vec![0, 0, 0, 1, 1, 1, 2]);
    }
}

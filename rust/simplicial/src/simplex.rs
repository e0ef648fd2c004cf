// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Abstract simplices over arbitrary vertex labels.
//!
//! A [`Simplex`] is an unordered set of distinct point identifiers. Its
//! dimension is `k = |points| - 1`, so a vertex is a 0-simplex, an edge a
//! 1-simplex, a triangle a 2-simplex and so on. Points are kept sorted and
//! deduplicated, which makes equality, hashing and ordering purely structural:
//! two simplices built from the same points in any order are interchangeable.
//!
//! Duplicate points passed to [`Simplex::new`] collapse silently; this is
//! accepted input, not an error.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;

use crate::chain::KChain;

/// Bound satisfied by anything usable as a vertex label.
///
/// Integers, strings, chars and tuples of those all qualify. `Ord` gives
/// complexes a canonical iteration order; `Send + Sync` lets the operators
/// fan out over rayon.
pub trait Vertex: Clone + Eq + Hash + Ord + fmt::Debug + Send + Sync {}

impl<T> Vertex for T where T: Clone + Eq + Hash + Ord + fmt::Debug + Send + Sync {}

/// Inline storage for up to a tetrahedron's worth of points.
type Points<V> = SmallVec<[V; 4]>;

/// A k-dimensional simplex: a set of `k + 1` distinct points.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Simplex<V> {
    points: Points<V>,
}

impl<V: Vertex> Simplex<V> {
    /// Creates a simplex from point identifiers, dropping duplicates.
    ///
    /// An empty iterator yields the empty simplex (dimension `-1`).
    ///
    /// ```
    /// use tda_simplicial::Simplex;
    ///
    /// let edge = Simplex::new(["b", "a", "b"]);
    /// assert_eq!(edge.dimension(), 1);
    /// assert_eq!(edge, Simplex::new(["a", "b"]));
    /// ```
    pub fn new<I: IntoIterator<Item = V>>(points: I) -> Self {
        let mut points: Points<V> = points.into_iter().collect();
        let given = points.len();
        points.sort_unstable();
        points.dedup();
        if points.len() != given {
            tracing::trace!(
                given,
                distinct = points.len(),
                "collapsed duplicate simplex points"
            );
        }
        Self { points }
    }

    /// The empty simplex, used as the base case "no simplex".
    pub fn empty() -> Self {
        Self {
            points: SmallVec::new(),
        }
    }

    /// Builds a simplex from points already known to be sorted and distinct.
    fn from_sorted(points: Points<V>) -> Self {
        debug_assert!(points.windows(2).all(|w| w[0] < w[1]));
        Self { points }
    }

    /// Dimension `k = |points| - 1`; `-1` for the empty simplex.
    pub fn dimension(&self) -> isize {
        self.points.len() as isize - 1
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` for the empty simplex.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The points in ascending order.
    pub fn points(&self) -> &[V] {
        &self.points
    }

    /// Returns `true` if `point` is one of this simplex's vertices.
    pub fn contains(&self, point: &V) -> bool {
        self.points.binary_search(point).is_ok()
    }

    /// Returns `true` if every point of `self` is a point of `other`.
    ///
    /// A simplex is a face of itself.
    pub fn is_face_of(&self, other: &Simplex<V>) -> bool {
        if self.len() > other.len() {
            return false;
        }
        // Both sides are sorted, so a single merge pass suffices.
        let mut theirs = other.points.iter();
        'outer: for p in &self.points {
            for q in theirs.by_ref() {
                match q.cmp(p) {
                    Ordering::Less => continue,
                    Ordering::Equal => continue 'outer,
                    Ordering::Greater => return false,
                }
            }
            return false;
        }
        true
    }

    /// Iterates the faces made of exactly `size` points.
    pub fn faces_of_size(&self, size: usize) -> Combinations<'_, V> {
        Combinations::new(&self.points, size)
    }

    /// The codimension-1 faces (each obtained by removing one point).
    ///
    /// Returns `None` for vertices and the empty simplex: they have no
    /// boundary.
    pub fn boundary(&self) -> Option<KChain<V>> {
        if self.dimension() < 1 {
            return None;
        }
        let faces = self.faces_of_size(self.len() - 1).collect();
        Some(KChain::from_parts(self.len() - 2, faces))
    }

    /// Proper faces strictly below the boundary: every subset with
    /// `1..=k-1` points. Empty for `k <= 1`.
    pub fn interior(&self) -> BTreeSet<Simplex<V>> {
        let k = self.dimension();
        if k <= 1 {
            return BTreeSet::new();
        }
        (1..k as usize)
            .flat_map(|size| self.faces_of_size(size))
            .collect()
    }

    /// Every non-empty face, the simplex itself included.
    ///
    /// Equal to `{self} ∪ boundary ∪ interior`.
    pub fn faces(&self) -> BTreeSet<Simplex<V>> {
        (1..=self.len())
            .flat_map(|size| self.faces_of_size(size))
            .collect()
    }

    /// Number of non-empty faces, `2^(k+1) - 1`.
    pub fn face_count(&self) -> usize {
        match 1usize.checked_shl(self.len() as u32) {
            Some(n) => n - 1,
            None => usize::MAX,
        }
    }
}

impl<V: Vertex> Ord for Simplex<V> {
    /// Orders by dimension first, then lexicographically by points.
    fn cmp(&self, other: &Self) -> Ordering {
        self.points
            .len()
            .cmp(&other.points.len())
            .then_with(|| self.points.cmp(&other.points))
    }
}

impl<V: Vertex> PartialOrd for Simplex<V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V: Vertex> FromIterator<V> for Simplex<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<V: Vertex, const N: usize> From<[V; N]> for Simplex<V> {
    fn from(points: [V; N]) -> Self {
        Self::new(points)
    }
}

impl<V: Vertex> From<Vec<V>> for Simplex<V> {
    fn from(points: Vec<V>) -> Self {
        Self::new(points)
    }
}

impl<V: Vertex + fmt::Display> fmt::Display for Simplex<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-simplex:", self.dimension())?;
        for p in &self.points {
            write!(f, " {p}")?;
        }
        Ok(())
    }
}

impl<V: Serialize> Serialize for Simplex<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.points.iter())
    }
}

impl<'de, V: Vertex + Deserialize<'de>> Deserialize<'de> for Simplex<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Vec::<V>::deserialize(deserializer).map(Simplex::new)
    }
}

/// Iterator over the `size`-point faces of a simplex, in lexicographic order.
#[derive(Debug, Clone)]
pub struct Combinations<'a, V> {
    pool: &'a [V],
    indices: Vec<usize>,
    done: bool,
}

impl<'a, V> Combinations<'a, V> {
    fn new(pool: &'a [V], size: usize) -> Self {
        Self {
            pool,
            indices: (0..size).collect(),
            done: size == 0 || size > pool.len(),
        }
    }

    /// Advances `indices` to the next combination, or marks exhaustion.
    fn step(&mut self) {
        let n = self.pool.len();
        let r = self.indices.len();
        // Rightmost index that can still move right.
        let Some(i) = (0..r).rev().find(|&i| self.indices[i] != i + n - r) else {
            self.done = true;
            return;
        };
        self.indices[i] += 1;
        for j in i + 1..r {
            self.indices[j] = self.indices[j - 1] + 1;
        }
    }
}

impl<V: Vertex> Iterator for Combinations<'_, V> {
    type Item = Simplex<V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let points = self.indices.iter().map(|&i| self.pool[i].clone()).collect();
        self.step();
        Some(Simplex::from_sorted(points))
    }
}

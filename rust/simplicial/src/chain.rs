// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mod-2 chain groups.
//!
//! A [`KChain`] is a non-empty set of k-simplices, i.e. a non-zero element of
//! the chain group `C_k` over the two-element field. Coefficients are 0 or 1,
//! so a chain is fully described by which simplices it contains and addition
//! keeps exactly the simplices of odd total multiplicity.
//!
//! The additive identity is [`Chain::Zero`]. It carries no dimension, which
//! lets `∂(∂σ)` be compared against zero without knowing the ambient
//! dimension.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::simplex::{Simplex, Vertex};

/// A non-zero k-chain: a set of simplices that all have dimension `k`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KChain<V> {
    k: usize,
    simplices: BTreeSet<Simplex<V>>,
}

/// An element of a mod-2 chain group: either zero or a populated k-chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Chain<V> {
    /// The additive identity.
    #[default]
    Zero,
    /// A chain with at least one simplex.
    Populated(KChain<V>),
}

/// Reduces a multiset of simplices mod 2: keeps those seen an odd number of
/// times.
fn mod2_reduce<'a, V, I>(simplices: I) -> BTreeSet<Simplex<V>>
where
    V: Vertex + 'a,
    I: IntoIterator<Item = &'a Simplex<V>>,
{
    let mut counts: FxHashMap<&Simplex<V>, usize> = FxHashMap::default();
    for simplex in simplices {
        *counts.entry(simplex).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| count % 2 == 1)
        .map(|(simplex, _)| simplex.clone())
        .collect()
}

impl<V: Vertex> KChain<V> {
    /// Creates a k-chain, taking `k` from the highest-dimensional member.
    ///
    /// Empty simplices are skipped. Fails with [`Error::EmptyChain`] if nothing
    /// remains and with [`Error::DimensionMismatch`] if the members do not all
    /// share one dimension.
    pub fn new<I: IntoIterator<Item = Simplex<V>>>(simplices: I) -> Result<Self> {
        let simplices: BTreeSet<Simplex<V>> =
            simplices.into_iter().filter(|s| !s.is_empty()).collect();

        // BTreeSet orders by dimension, so the extremes bound every member.
        let (Some(lowest), Some(highest)) = (simplices.first(), simplices.last()) else {
            return Err(Error::EmptyChain);
        };
        let k = highest.dimension() as usize;
        if lowest.dimension() as usize != k {
            return Err(Error::DimensionMismatch {
                expected: k,
                found: lowest.dimension() as usize,
            });
        }
        Ok(Self { k, simplices })
    }

    /// Assembles a chain whose members are known to be non-empty k-simplices.
    pub(crate) fn from_parts(k: usize, simplices: BTreeSet<Simplex<V>>) -> Self {
        debug_assert!(!simplices.is_empty());
        debug_assert!(simplices.iter().all(|s| s.dimension() == k as isize));
        Self { k, simplices }
    }

    /// The common dimension of every member.
    pub fn dimension(&self) -> usize {
        self.k
    }

    /// Number of simplices with coefficient 1.
    pub fn len(&self) -> usize {
        self.simplices.len()
    }

    /// Always `false`: a k-chain is never empty. Zero is [`Chain::Zero`].
    pub fn is_empty(&self) -> bool {
        self.simplices.is_empty()
    }

    /// Returns `true` if `simplex` has coefficient 1 in this chain.
    pub fn contains(&self, simplex: &Simplex<V>) -> bool {
        self.simplices.contains(simplex)
    }

    /// Iterates the members in canonical order.
    pub fn iter(&self) -> std::collections::btree_set::Iter<'_, Simplex<V>> {
        self.simplices.iter()
    }

    /// The members as an ordered set.
    pub fn simplices(&self) -> &BTreeSet<Simplex<V>> {
        &self.simplices
    }

    /// Consumes the chain, returning its members.
    pub fn into_simplices(self) -> BTreeSet<Simplex<V>> {
        self.simplices
    }

    /// Adds two chains mod 2.
    ///
    /// A simplex survives iff it appears in exactly one operand. Returns
    /// [`Chain::Zero`] when everything cancels.
    pub fn try_add(&self, other: &KChain<V>) -> Result<Chain<V>> {
        if self.k != other.k {
            return Err(Error::DimensionMismatch {
                expected: self.k,
                found: other.k,
            });
        }
        let sum = mod2_reduce(self.simplices.iter().chain(&other.simplices));
        Ok(Chain::from_reduced(self.k, sum))
    }

    /// The mod-2 boundary `∂c`, a (k-1)-chain.
    ///
    /// Each codimension-1 face is counted once per member containing it and
    /// kept iff its count is odd. A 0-chain has no boundary and fails with
    /// [`Error::InvalidDimension`].
    pub fn boundary(&self) -> Result<Chain<V>> {
        if self.k == 0 {
            return Err(Error::InvalidDimension {
                requested: 0,
                min: 1,
                max: isize::MAX,
            });
        }
        let faces: Vec<Simplex<V>> = self
            .simplices
            .iter()
            .flat_map(|s| s.faces_of_size(s.len() - 1))
            .collect();
        Ok(Chain::from_reduced(self.k - 1, mod2_reduce(&faces)))
    }

    /// Returns `true` if `∂c = 0`. Every 0-chain counts as a cycle.
    pub fn is_cycle(&self) -> bool {
        match self.boundary() {
            Ok(chain) => chain.is_zero(),
            Err(_) => true,
        }
    }
}

impl<'a, V> IntoIterator for &'a KChain<V> {
    type Item = &'a Simplex<V>;
    type IntoIter = std::collections::btree_set::Iter<'a, Simplex<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.simplices.iter()
    }
}

impl<V> IntoIterator for KChain<V> {
    type Item = Simplex<V>;
    type IntoIter = std::collections::btree_set::IntoIter<Simplex<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.simplices.into_iter()
    }
}

impl<V: Vertex> Chain<V> {
    /// Builds a chain from simplices; no input means [`Chain::Zero`].
    ///
    /// Members are taken as given (coefficient 1 each); duplicates collapse.
    pub fn from_simplices<I: IntoIterator<Item = Simplex<V>>>(simplices: I) -> Result<Self> {
        match KChain::new(simplices) {
            Ok(chain) => Ok(Chain::Populated(chain)),
            Err(Error::EmptyChain) => Ok(Chain::Zero),
            Err(e) => Err(e),
        }
    }

    fn from_reduced(k: usize, simplices: BTreeSet<Simplex<V>>) -> Self {
        if simplices.is_empty() {
            Chain::Zero
        } else {
            Chain::Populated(KChain::from_parts(k, simplices))
        }
    }

    /// Returns `true` for the additive identity.
    pub fn is_zero(&self) -> bool {
        matches!(self, Chain::Zero)
    }

    /// Dimension of a populated chain; `None` for zero.
    pub fn dimension(&self) -> Option<usize> {
        self.as_k_chain().map(KChain::dimension)
    }

    /// Number of simplices with coefficient 1.
    pub fn len(&self) -> usize {
        self.as_k_chain().map_or(0, KChain::len)
    }

    /// Returns `true` for the zero chain.
    pub fn is_empty(&self) -> bool {
        self.is_zero()
    }

    /// The populated chain, if any.
    pub fn as_k_chain(&self) -> Option<&KChain<V>> {
        match self {
            Chain::Zero => None,
            Chain::Populated(chain) => Some(chain),
        }
    }

    /// Consumes the chain, returning the populated chain if any.
    pub fn into_k_chain(self) -> Option<KChain<V>> {
        match self {
            Chain::Zero => None,
            Chain::Populated(chain) => Some(chain),
        }
    }

    /// Iterates the members; yields nothing for zero.
    pub fn iter(&self) -> impl Iterator<Item = &Simplex<V>> + '_ {
        self.as_k_chain().into_iter().flat_map(KChain::iter)
    }

    /// Adds two chains mod 2. Zero is the identity on either side.
    pub fn try_add(&self, other: &Chain<V>) -> Result<Chain<V>> {
        match (self, other) {
            (Chain::Zero, c) | (c, Chain::Zero) => Ok(c.clone()),
            (Chain::Populated(a), Chain::Populated(b)) => a.try_add(b),
        }
    }

    /// Sums any number of chains mod 2.
    pub fn sum<'a, I>(chains: I) -> Result<Chain<V>>
    where
        V: 'a,
        I: IntoIterator<Item = &'a Chain<V>>,
    {
        chains
            .into_iter()
            .try_fold(Chain::Zero, |acc, chain| acc.try_add(chain))
    }

    /// The mod-2 boundary; `∂0 = 0`.
    pub fn boundary(&self) -> Result<Chain<V>> {
        match self {
            Chain::Zero => Ok(Chain::Zero),
            Chain::Populated(chain) => chain.boundary(),
        }
    }
}

impl<V> From<KChain<V>> for Chain<V> {
    fn from(chain: KChain<V>) -> Self {
        Chain::Populated(chain)
    }
}

impl<V> From<Option<KChain<V>>> for Chain<V> {
    fn from(chain: Option<KChain<V>>) -> Self {
        chain.map_or(Chain::Zero, Chain::Populated)
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for simplicial operations.

/// Result type alias for simplicial operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or querying complexes and chains.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A dimension outside the valid range for the complex or chain.
    #[error("invalid dimension {requested}: expected a value in {min}..={max}")]
    InvalidDimension {
        requested: isize,
        min: isize,
        max: isize,
    },

    /// A simplex passed to closure/star/link is not a member of the complex.
    #[error("not a subset of the complex: {0}")]
    NotASubset(String),

    /// Chains of different dimension were combined, or a chain was built from
    /// simplices of mixed dimension.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// A value that is not a simplex was supplied where one is required.
    #[error("expected a simplex, found {0}")]
    TypeMismatch(String),

    /// A k-chain needs at least one simplex; use the zero chain instead.
    #[error("k-chain must have at least one simplex")]
    EmptyChain,

    /// A simplicial complex needs at least one non-empty generator.
    #[error("simplicial complex must have at least one non-empty simplex")]
    EmptyComplex,

    /// A generator is too large to enumerate its faces.
    #[error("generator of dimension {dimension} exceeds the maximum of {max}")]
    GeneratorTooLarge { dimension: usize, max: usize },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

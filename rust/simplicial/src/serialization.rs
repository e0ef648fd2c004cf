// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON serialization for complexes and chains.
//!
//! A complex is stored as its facets plus a derived summary (dimension,
//! f-vector, Euler number). Loading rebuilds the complex from the facets
//! through the normal constructor, so downward closure always holds, and then
//! checks the summary against the rebuilt complex.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chain::KChain;
use crate::complex::SimplicialComplex;
use crate::error::{Error, Result};
use crate::simplex::{Simplex, Vertex};

/// Serializable representation of a simplicial complex.
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound(
    serialize = "V: Serialize",
    deserialize = "V: Vertex + Deserialize<'de>"
))]
pub struct ComplexSnapshot<V> {
    pub dimension: usize,
    pub euler_number: i64,
    pub f_vector: Vec<usize>,
    pub facets: Vec<Simplex<V>>,
}

/// Serializable representation of a k-chain.
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound(
    serialize = "V: Serialize",
    deserialize = "V: Vertex + Deserialize<'de>"
))]
pub struct ChainSnapshot<V> {
    pub dimension: usize,
    pub simplices: Vec<Simplex<V>>,
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl<V: Vertex + DeserializeOwned> Simplex<V> {
    /// Reads a simplex from an untyped JSON value.
    ///
    /// The value must be an array of vertex labels; anything else fails with
    /// [`Error::TypeMismatch`].
    pub fn from_value(value: &Value) -> Result<Self> {
        let Value::Array(items) = value else {
            return Err(Error::TypeMismatch(describe(value).to_string()));
        };
        items
            .iter()
            .map(|item| {
                V::deserialize(item).map_err(|_| {
                    Error::TypeMismatch(format!("{} inside a simplex", describe(item)))
                })
            })
            .collect()
    }
}

impl<V: Vertex> SimplicialComplex<V> {
    /// Creates a serializable snapshot of the complex.
    pub fn to_snapshot(&self) -> ComplexSnapshot<V> {
        ComplexSnapshot {
            dimension: self.dimension(),
            euler_number: self.euler_number(),
            f_vector: self.f_vector(),
            facets: self.facets().into_iter().collect(),
        }
    }

    /// Rebuilds a complex from a snapshot, verifying its summary.
    pub fn from_snapshot(snapshot: ComplexSnapshot<V>) -> Result<Self> {
        let complex = SimplicialComplex::new(&snapshot.facets)?;
        if complex.dimension() != snapshot.dimension
            || complex.f_vector() != snapshot.f_vector
            || complex.euler_number() != snapshot.euler_number
        {
            return Err(Error::Serialization(format!(
                "snapshot summary does not match its facets: stored f-vector {:?}, rebuilt {:?}",
                snapshot.f_vector,
                complex.f_vector()
            )));
        }
        Ok(complex)
    }

    /// Serializes the complex to a JSON string.
    pub fn to_json(&self) -> Result<String>
    where
        V: Serialize,
    {
        Ok(serde_json::to_string_pretty(&self.to_snapshot())?)
    }

    /// Deserializes a complex written by [`to_json`](Self::to_json).
    pub fn from_json(json: &str) -> Result<Self>
    where
        V: DeserializeOwned,
    {
        let snapshot: ComplexSnapshot<V> = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot)
    }
}

impl<V: Vertex> KChain<V> {
    /// Serializes the chain to a JSON string.
    pub fn to_json(&self) -> Result<String>
    where
        V: Serialize,
    {
        let snapshot = ChainSnapshot {
            dimension: self.dimension(),
            simplices: self.iter().cloned().collect(),
        };
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    /// Deserializes a chain, checking every member has the stored dimension.
    pub fn from_json(json: &str) -> Result<Self>
    where
        V: DeserializeOwned,
    {
        let snapshot: ChainSnapshot<V> = serde_json::from_str(json)?;
        let chain = KChain::new(snapshot.simplices)?;
        if chain.dimension() != snapshot.dimension {
            return Err(Error::DimensionMismatch {
                expected: snapshot.dimension,
                found: chain.dimension(),
            });
        }
        Ok(chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn complex_json_rebuilds_the_same_complex() {
        let cx = SimplicialComplex::new([
            Simplex::new(["a", "b", "c"]),
            Simplex::new(["c", "d"]),
        ])
        .unwrap();
        let json = cx.to_json().unwrap();
        assert!(json.contains("\"euler_number\": 1"));

        let back = SimplicialComplex::<String>::from_json(&json).unwrap();
        assert_eq!(back.f_vector(), cx.f_vector());
        assert_eq!(back.len(), cx.len());
        assert_eq!(back.facets().len(), 2);
    }

    #[test]
    fn tampered_summary_is_rejected() {
        let json = json!({
            "dimension": 2,
            "euler_number": 7,
            "f_vector": [3, 3, 1],
            "facets": [[0, 1, 2]],
        })
        .to_string();
        let err = SimplicialComplex::<u32>::from_json(&json).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn snapshot_facets_are_closed_on_load() {
        let json = json!({
            "dimension": 1,
            "euler_number": 1,
            "f_vector": [2, 1],
            "facets": [[1, 0]],
        })
        .to_string();
        let cx = SimplicialComplex::<u32>::from_json(&json).unwrap();
        assert!(cx.contains(&Simplex::new([0])));
        assert!(cx.contains(&Simplex::new([1])));
    }

    #[test]
    fn chain_json_checks_dimension() {
        let chain = KChain::new([Simplex::new([0, 1]), Simplex::new([1, 2])]).unwrap();
        let back = KChain::<u32>::from_json(&chain.to_json().unwrap()).unwrap();
        assert_eq!(back, chain);

        let wrong = json!({ "dimension": 2, "simplices": [[0, 1]] }).to_string();
        assert_eq!(
            KChain::<u32>::from_json(&wrong).unwrap_err(),
            Error::DimensionMismatch {
                expected: 2,
                found: 1
            }
        );

        let mixed = json!({ "dimension": 1, "simplices": [[0, 1], [2]] }).to_string();
        assert!(matches!(
            KChain::<u32>::from_json(&mixed),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn non_simplex_values_are_type_mismatches() {
        assert_eq!(
            Simplex::<u32>::from_value(&json!({ "points": [1, 2] })).unwrap_err(),
            Error::TypeMismatch("an object".to_string())
        );
        assert_eq!(
            Simplex::<u32>::from_value(&json!(3)).unwrap_err(),
            Error::TypeMismatch("a number".to_string())
        );
        assert!(matches!(
            Simplex::<u32>::from_value(&json!([1, "two"])),
            Err(Error::TypeMismatch(_))
        ));
        assert_eq!(
            Simplex::<u32>::from_value(&json!([2, 1, 2])).unwrap(),
            Simplex::new([1, 2])
        );
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        assert!(matches!(
            SimplicialComplex::<u32>::from_json("{"),
            Err(Error::Serialization(_))
        ));
    }
}

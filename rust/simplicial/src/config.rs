// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Runtime configuration loaded from environment variables.

/// Default member count above which operators switch to rayon.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Default largest generator dimension. A k-simplex has 2^(k+1) - 1 faces.
pub const DEFAULT_MAX_DIMENSION: usize = 24;

/// Tuning knobs for complex construction and the combinatorial operators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Number of simplices above which construction and star run on parallel
    /// iterators.
    pub parallel_threshold: usize,
    /// Largest generator dimension accepted by the complex constructor.
    pub max_dimension: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `SIMPLICIAL_PARALLEL_THRESHOLD` (default 4096)
    /// - `SIMPLICIAL_MAX_DIMENSION` (default 24)
    pub fn from_env() -> Self {
        Self {
            parallel_threshold: std::env::var("SIMPLICIAL_PARALLEL_THRESHOLD")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_PARALLEL_THRESHOLD),
            max_dimension: std::env::var("SIMPLICIAL_MAX_DIMENSION")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_MAX_DIMENSION),
        }
    }

    /// A configuration that never switches to parallel iteration.
    pub fn sequential() -> Self {
        Self {
            parallel_threshold: usize::MAX,
            ..Self::from_env()
        }
    }

    /// Returns `true` if a workload of `len` items should run in parallel.
    pub(crate) fn use_parallel(&self, len: usize) -> bool {
        !cfg!(target_arch = "wasm32") && len > self.parallel_threshold
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

//! Owned registry of digest engines with per-algorithm enablement
//!
//! The registry is a plain owned value, so independent pipelines carry
//! independent enablement state. Registration order is preserved and
//! determines the order of digest-ready events.

use super::traits::DigestEngine;
use crate::digest::DigestAlgorithm;
use crate::error::{Result, ValidationError};
use std::sync::Arc;

struct Entry {
    engine: Arc<dyn DigestEngine>,
    enabled: bool,
}

pub struct AlgorithmRegistry {
    entries: Vec<Entry>,
}

/// Algorithms enabled out of the box
const DEFAULT_ENABLED: [DigestAlgorithm; 3] = [
    DigestAlgorithm::Md5,
    DigestAlgorithm::Sha1,
    DigestAlgorithm::Sha256,
];

impl AlgorithmRegistry {
    /// Create a registry with every built-in engine registered.
    ///
    /// MD5, SHA-1 and SHA-256 start enabled; everything else must be
    /// switched on explicitly.
    pub fn with_builtins() -> Self {
        let mut registry = Self {
            entries: Vec::new(),
        };
        super::algorithms::register_all(&mut registry);
        for algorithm in DEFAULT_ENABLED {
            registry
                .set_enabled(algorithm, true)
                .expect("default algorithms are registered");
        }
        registry
    }

    /// Append an engine; starts disabled.
    pub(crate) fn register(&mut self, engine: impl DigestEngine + 'static) {
        self.entries.push(Entry {
            engine: Arc::new(engine),
            enabled: false,
        });
    }

    /// Toggle one algorithm's participation in future runs
    pub fn set_enabled(&mut self, algorithm: DigestAlgorithm, enabled: bool) -> Result<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.engine.algorithm() == algorithm)
            .ok_or_else(|| ValidationError::unknown_algorithm(algorithm.as_str()))?;
        entry.enabled = enabled;
        Ok(())
    }

    /// Enable exactly the given algorithms, disabling all others
    pub fn enable_only(&mut self, algorithms: &[DigestAlgorithm]) {
        for entry in &mut self.entries {
            entry.enabled = algorithms.contains(&entry.engine.algorithm());
        }
    }

    pub fn is_enabled(&self, algorithm: DigestAlgorithm) -> bool {
        self.entries
            .iter()
            .any(|e| e.engine.algorithm() == algorithm && e.enabled)
    }

    /// Enabled engines in registration order
    pub fn enabled(&self) -> Vec<Arc<dyn DigestEngine>> {
        self.entries
            .iter()
            .filter(|e| e.enabled)
            .map(|e| Arc::clone(&e.engine))
            .collect()
    }

    /// Look up an engine regardless of enablement
    pub fn get(&self, algorithm: DigestAlgorithm) -> Option<Arc<dyn DigestEngine>> {
        self.entries
            .iter()
            .find(|e| e.engine.algorithm() == algorithm)
            .map(|e| Arc::clone(&e.engine))
    }

    /// All registered algorithms in registration order
    pub fn list(&self) -> Vec<DigestAlgorithm> {
        self.entries.iter().map(|e| e.engine.algorithm()).collect()
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

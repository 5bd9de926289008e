//! Sequence registry for named sequence lookup.

use heapless::{FnvIndexMap, String};

use crate::config::{SequenceConfig, SystemConfig};
use crate::error::{ConfigError, Error, Result, SequenceError};

use super::{Sequencer, MAX_COMMANDS};

/// Maximum number of sequences in the registry.
pub const MAX_SEQUENCES: usize = 16;

/// Registry for named command sequences.
#[derive(Debug, Clone)]
pub struct SequenceRegistry {
    sequences: FnvIndexMap<String<32>, SequenceConfig, MAX_SEQUENCES>,
}

impl Default for SequenceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            sequences: FnvIndexMap::new(),
        }
    }

    /// Load every sequence from a SystemConfig.
    pub fn from_config(config: &SystemConfig) -> Self {
        Self {
            sequences: config.sequences.clone(),
        }
    }

    /// Register a sequence with a name, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is longer than 32 bytes or the registry
    /// is full.
    pub fn register(&mut self, name: &str, sequence: SequenceConfig) -> Result<()> {
        let key = String::try_from(name).map_err(|_| invalid_name("name too long"))?;

        self.sequences
            .insert(key, sequence)
            .map_err(|_| invalid_name("registry full"))?;

        Ok(())
    }

    /// Get a sequence by name.
    pub fn get(&self, name: &str) -> Option<&SequenceConfig> {
        let key = String::try_from(name).ok()?;
        self.sequences.get(&key)
    }

    /// Check if a sequence exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove a sequence by name.
    pub fn remove(&mut self, name: &str) -> Option<SequenceConfig> {
        let key = String::try_from(name).ok()?;
        self.sequences.remove(&key)
    }

    /// Build a loaded sequencer for a named sequence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::SequenceNotFound` for an unknown name.
    pub fn sequencer(&self, name: &str) -> Result<Sequencer<MAX_COMMANDS>> {
        let config = self.get(name).ok_or_else(|| {
            Error::Config(ConfigError::SequenceNotFound(
                String::try_from(name).unwrap_or_default(),
            ))
        })?;

        Sequencer::from_config(config)
    }

    /// Get the number of registered sequences.
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Get an iterator over sequence names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sequences.keys().map(|s| s.as_str())
    }

    /// Get an iterator over sequences.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SequenceConfig)> {
        self.sequences.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Clear all sequences.
    pub fn clear(&mut self) {
        self.sequences.clear();
    }
}

fn invalid_name(reason: &str) -> Error {
    Error::Sequence(SequenceError::InvalidName(
        String::try_from(reason).unwrap_or_default(),
    ))
}

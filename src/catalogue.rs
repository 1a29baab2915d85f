use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::theorem::Theorem;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogueError {
    #[error("the proof of {0} is not finished")]
    ProofNotFinished(String),
}

/// Proven theorems in an order where every theorem comes after all the theorems its proof cites
///
/// Each key is only recorded once, with the instance that was added first.
#[derive(Debug, Default)]
pub struct Catalogue {
    entries: Vec<Theorem>,
    positions: HashMap<String, usize>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a proven theorem, preceded by everything it depends on that is not already there
    ///
    /// # Example
    /// ```
    /// use equalis::{Builtin, Catalogue, Database};
    ///
    /// let database = Database::with_builtins().unwrap();
    /// let mut catalogue = Catalogue::new();
    /// catalogue
    ///     .add(&database.instantiate(Builtin::RightMultiplicationByIdentity, None).unwrap())
    ///     .unwrap();
    /// let keys: Vec<_> = catalogue.entries().iter().map(|t| t.key()).collect();
    /// assert_eq!(
    ///     keys,
    ///     vec![
    ///         "ProductCommutativity",
    ///         "LeftMultiplicationByIdentity",
    ///         "RightMultiplicationByIdentity"
    ///     ]
    /// );
    /// ```
    pub fn add(&mut self, theorem: &Theorem) -> Result<(), CatalogueError> {
        if !theorem.is_proven() {
            return Err(CatalogueError::ProofNotFinished(theorem.name().to_owned()));
        }
        if self.positions.contains_key(theorem.key()) {
            return Ok(());
        }
        if let Some(proof) = theorem.proof() {
            for dependency in proof.dependencies() {
                self.add(dependency)?;
            }
        }
        debug!(key = theorem.key(), position = self.entries.len(), "catalogued");
        self.positions
            .insert(theorem.key().to_owned(), self.entries.len());
        self.entries.push(theorem.clone());
        Ok(())
    }

    pub fn entries(&self) -> &[Theorem] {
        &self.entries
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.positions.get(key).copied()
    }

    /// Positions of the theorems cited by the proof of entry `index`, without repetitions, in the
    /// order they are first cited
    pub fn references(&self, index: usize) -> Vec<usize> {
        let mut references = Vec::new();
        let dependencies = self
            .entries
            .get(index)
            .and_then(Theorem::proof)
            .map(|proof| proof.dependencies())
            .unwrap_or_default();
        for dependency in dependencies {
            if let Some(position) = self.position(dependency.key()) {
                if !references.contains(&position) {
                    references.push(position);
                }
            }
        }
        references
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

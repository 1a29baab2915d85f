use std::{
    collections::{hash_map::Entry, HashMap},
    sync::Arc,
};

use thiserror::Error;
use tracing::debug;

use crate::{
    error::ProofError,
    theorem::{Declaration, Theorem},
};

/// How deep theorems may cite each other before the chain is considered circular
pub const MAX_THEOREM_DEPTH: usize = 64;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatabaseError {
    /// Error produced when trying to use a key that was never added
    #[error("there is no theorem `{0}`")]
    TheoremNotFound(String),
    /// Error produced when trying to add a key twice
    #[error("a theorem `{0}` already exists")]
    NameCollision(String),
    #[error(transparent)]
    ProofError(#[from] ProofError),
}

/// All known declarations, by key
///
/// Theorems only refer to each other by key, so the order in which they are added does not
/// matter. A proof is run (and its citations resolved) every time a theorem is instantiated.
#[derive(Debug, Default)]
pub struct Database {
    names: HashMap<String, usize>,
    declarations: Vec<Arc<Declaration>>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, declaration: Declaration) -> Result<(), DatabaseError> {
        match self.names.entry(declaration.key().to_owned()) {
            Entry::Occupied(entry) => Err(DatabaseError::NameCollision(entry.key().clone())),
            Entry::Vacant(entry) => {
                debug!(
                    key = declaration.key(),
                    axiom = declaration.is_axiom(),
                    "declared {}",
                    declaration.conclusion()
                );
                entry.insert(self.declarations.len());
                self.declarations.push(Arc::new(declaration));
                Ok(())
            }
        }
    }

    pub fn get(&self, key: impl AsRef<str>) -> Result<&Arc<Declaration>, DatabaseError> {
        let key = key.as_ref();
        self.names
            .get(key)
            .map(|&index| &self.declarations[index])
            .ok_or_else(|| DatabaseError::TheoremNotFound(key.to_owned()))
    }

    pub fn contains(&self, key: impl AsRef<str>) -> bool {
        self.names.contains_key(key.as_ref())
    }

    /// Keys in the order they were added
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.declarations.iter().map(|d| d.key())
    }

    pub fn declarations(&self) -> impl Iterator<Item = &Arc<Declaration>> + '_ {
        self.declarations.iter()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// The context a theorem instantiated directly (not cited) is proven in
    pub fn context(&self) -> Context<'_> {
        Context {
            database: self,
            depth: 0,
        }
    }

    /// Instantiates the theorem `key` with the given parameters, or with `0` for every unknown if
    /// there are none. This runs its proof, and the proofs of every theorem it cites.
    pub fn instantiate(
        &self,
        key: impl AsRef<str>,
        parameters: Option<&[&str]>,
    ) -> Result<Theorem, DatabaseError> {
        let declaration = Arc::clone(self.get(key)?);
        Ok(Theorem::instantiate(declaration, parameters, &self.context())?)
    }

    fn instantiate_at(
        &self,
        key: &str,
        parameters: Option<&[&str]>,
        depth: usize,
    ) -> Result<Theorem, ProofError> {
        if depth > MAX_THEOREM_DEPTH {
            return Err(ProofError::CircularTheoremDependency(depth));
        }
        let declaration = self
            .names
            .get(key)
            .map(|&index| Arc::clone(&self.declarations[index]))
            .ok_or_else(|| ProofError::UnknownTheorem(key.to_owned()))?;
        Theorem::instantiate(
            declaration,
            parameters,
            &Context {
                database: self,
                depth,
            },
        )
    }
}

/// What a proof sees of the database: theorems can be cited, one level deeper than the theorem
/// being proven.
#[derive(Clone, Copy, Debug)]
pub struct Context<'a> {
    database: &'a Database,
    depth: usize,
}

impl<'a> Context<'a> {
    pub fn database(&self) -> &'a Database {
        self.database
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Instantiates the theorem `key` with `parameters` to use it in a proof
    ///
    /// # Errors
    /// - `UnknownTheorem` if there is no such theorem
    /// - `CircularTheoremDependency` once citations are nested more than [`MAX_THEOREM_DEPTH`]
    ///   times, which happens when a theorem ends up citing itself
    /// - any error produced while instantiating the theorem or running its proof
    pub fn cite(&self, key: impl AsRef<str>, parameters: &[&str]) -> Result<Theorem, ProofError> {
        self.database
            .instantiate_at(key.as_ref(), Some(parameters), self.depth + 1)
    }
}

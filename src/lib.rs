//! `equalis` checks proofs of algebraic equalities. A proof starts from one side of the equality
//! it wants to establish and rewrites it, one modification at a time, until it reaches the other
//! side. Every modification has to be licensed by an already proven theorem (or an axiom).
//!
//! Expressions are plain strings over single-letter unknowns, integer numerals, the operators
//! `+`, `*` and `^`, parentheses and `=`. There is no syntax tree: a modification is accepted when
//! it replaces exactly one contiguous part of the previous expression and does not change how the
//! surrounding operators group.
//!
//! # Main data structures
//!
//! ## Declarations
//! A [`Declaration`] describes a theorem: its conclusion (like _a + b = b + a_), the unknowns it
//! is stated over, optional simplifications (a letter standing for a numeric expression of the
//! unknowns, like _c ~ a + b_) and how it is proven. A declaration without a proof is an axiom.
//! Declarations live in a [`Database`], which also holds the standard theorem set
//! ([`Builtin`]).
//!
//! ## Theorems
//! A [`Theorem`] is a declaration instantiated with concrete parameters, e.g. _AdditionCommutativity_
//! with `a = x` and `b = 2`. Instantiating a theorem runs its proof over the declaration's own
//! unknowns, so a theorem is proven for every instance or for none of them.
//!
//! ## Proofs
//! A [`Proof`] is the chain of equalities built while proving a declaration. Each step
//! ([`Proof::evolve_equality`], [`Proof::use_simplification`]) must be justified and the proof is
//! finished by [`Proof::conclude`] once the aim is reached. Proofs can cite other theorems, which
//! are instantiated (and proven) on demand with a bounded depth, so circular citations are
//! reported instead of looping forever.
//!
//! ## Catalogue
//! A [`Catalogue`] orders proven theorems so that every theorem comes after the ones its proof
//! depends on.
//!
//! # Scripts
//! With the `serialization` feature (enabled by default) theorems can also be written as
//! line-based scripts and loaded with
//! [`load_script`][crate::serialization::load_script].

#[cfg(test)]
#[macro_use]
extern crate quickcheck;

mod builtin;
mod catalogue;
mod database;
pub mod error;
pub mod evaluate;
pub mod expression;
mod proof;
#[cfg(feature = "serialization")]
pub mod serialization;
pub mod substitution;
mod theorem;
mod types;

pub use builtin::Builtin;
pub use catalogue::*;
pub use database::*;
pub use error::ProofError;
pub use proof::*;
pub use theorem::*;
pub use types::*;

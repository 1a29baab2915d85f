use thiserror::Error;

use crate::types::*;

/// A error which is produced when trying to instantiate a theorem or to proof something incorrect
///
/// Every error aborts the construction or proof step it occurs in. A theorem either exists in a
/// valid state or it was never constructed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProofError {
    #[error("this theorem expects {expected} parameters but {given} were given")]
    ParameterCountMismatch { expected: usize, given: usize },

    #[error("`{0}` is not a valid name, unknowns and simplifications are exactly one letter")]
    InvalidIdentifierName(String),

    #[error("`{0}` is not a well-formed expression")]
    MalformedExpression(String),

    #[error("`{0}` is neither an unknown nor a simplification of this theorem")]
    UnboundIdentifier(Identifier),

    #[error("simplification `{0}` does not evaluate to a number")]
    NonNumericSimplification(String),

    #[error("`{0}` cannot be inserted here without changing the order of operations")]
    OperatorOrderViolation(String),

    #[error("`{modification}` does not hold according to {theorem}")]
    UnlicensedModification {
        theorem: String,
        modification: String,
    },

    #[error("`{0}` is not a simplification declared by this theorem")]
    UnlicensedSimplification(String),

    #[error("{0} is used although its proof was not concluded")]
    TheoremNotProven(String),

    #[error("no previous equality gives `{0}` after applying the modification")]
    NoMatchingPriorEquality(String),

    #[error("cannot conclude, `{lhs}` and `{rhs}` do not both appear in the proof")]
    CannotConclude { lhs: String, rhs: String },

    #[error("theorems are used to prove each other (depth {0} reached)")]
    CircularTheoremDependency(usize),

    #[error("there is no theorem `{0}`")]
    UnknownTheorem(String),
}

use std::sync::Arc;

use tracing::debug;

use crate::{
    database::Context,
    error::ProofError,
    evaluate::evaluate_numeral,
    expression::{extract_unknowns, is_letter, is_well_formed, remove_spaces, safe_to_replace},
    proof::{Proof, ProofRoutine},
    substitution::substitute_all,
    types::*,
};

/// A letter standing for a number computed from the unknowns, like `c` in `c = a + b`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Simplification {
    pub name: Identifier,
    pub expression: String,
}

/// The definition of a theorem (or axiom): what it states and how it is proven
///
/// A declaration is symbolic. The conclusion `a + b = b + a` only becomes something that can be
/// used in a proof once it is instantiated (see [`Database::instantiate`] and [`Context::cite`]),
/// which replaces the unknowns by concrete expressions.
///
/// [`Database::instantiate`]: crate::Database::instantiate
#[derive(Clone, Debug)]
pub struct Declaration {
    key: String,
    name: String,
    conclusion: String,
    unknowns: Vec<Identifier>,
    simplifications: Vec<Simplification>,
    proof: Option<ProofRoutine>,
}

fn identifier(name: &str) -> Result<Identifier, ProofError> {
    let mut characters = name.chars();
    match (characters.next(), characters.next()) {
        (Some(c), None) if is_letter(c) => Ok(c),
        _ => Err(ProofError::InvalidIdentifierName(name.to_owned())),
    }
}

impl Declaration {
    /// Creates the declaration of an axiom. Spaces are removed from the conclusion and from the
    /// simplifications, use [`proven_by`](#method.proven_by) to turn it into a theorem.
    ///
    /// # Errors
    /// `InvalidIdentifierName` if an unknown or a simplification name is not exactly one letter,
    /// or if the same letter is declared twice
    ///
    /// # Example
    /// ```
    /// use equalis::Declaration;
    ///
    /// let addition = Declaration::new(
    ///     "Addition",
    ///     "the addition",
    ///     "a + b = c",
    ///     &["a", "b"],
    ///     &[("c", "a + b")],
    /// )
    /// .unwrap();
    /// assert_eq!(addition.conclusion(), "a+b=c");
    /// assert!(addition.has_character('c'));
    /// assert!(Declaration::new("Bad", "bad", "ab = ab", &["ab"], &[]).is_err());
    /// assert!(Declaration::new("Twice", "twice", "a + b = b", &["a", "b"], &[("b", "a")]).is_err());
    /// ```
    pub fn new(
        key: &str,
        name: &str,
        conclusion: &str,
        unknowns: &[&str],
        simplifications: &[(&str, &str)],
    ) -> Result<Self, ProofError> {
        let unknowns = unknowns
            .iter()
            .map(|u| identifier(u))
            .collect::<Result<Vec<_>, _>>()?;
        let simplifications = simplifications
            .iter()
            .map(|(name, expression)| {
                Ok(Simplification {
                    name: identifier(name)?,
                    expression: remove_spaces(expression),
                })
            })
            .collect::<Result<Vec<_>, ProofError>>()?;
        let letters: Vec<Identifier> = unknowns
            .iter()
            .copied()
            .chain(simplifications.iter().map(|s| s.name))
            .collect();
        for (i, letter) in letters.iter().enumerate() {
            if letters[..i].contains(letter) {
                return Err(ProofError::InvalidIdentifierName(letter.to_string()));
            }
        }
        Ok(Declaration {
            key: key.to_owned(),
            name: name.to_owned(),
            conclusion: remove_spaces(conclusion),
            unknowns,
            simplifications,
            proof: None,
        })
    }

    /// Attaches the routine that proves this declaration
    pub fn proven_by(mut self, proof: ProofRoutine) -> Self {
        self.proof = Some(proof);
        self
    }

    /// Returns the key this declaration is registered and cited under
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the name this declaration is displayed with
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the symbolic conclusion, without spaces
    pub fn conclusion(&self) -> &str {
        &self.conclusion
    }

    /// Returns the unknowns, in the order parameters are given
    pub fn unknowns(&self) -> &[Identifier] {
        &self.unknowns
    }

    /// Returns the declared simplifications
    pub fn simplifications(&self) -> &[Simplification] {
        &self.simplifications
    }

    /// Returns the proof routine, `None` for an axiom
    pub fn proof(&self) -> Option<&ProofRoutine> {
        self.proof.as_ref()
    }

    /// Whether this declaration has no proof
    pub fn is_axiom(&self) -> bool {
        self.proof.is_none()
    }

    /// The two sides of the symbolic conclusion
    ///
    /// # Errors
    /// `MalformedExpression` if the conclusion is not exactly one equality of two non-empty sides
    pub fn sides(&self) -> Result<(&str, &str), ProofError> {
        let mut sides = self.conclusion.split('=');
        match (sides.next(), sides.next(), sides.next()) {
            (Some(lhs), Some(rhs), None) if !lhs.is_empty() && !rhs.is_empty() => Ok((lhs, rhs)),
            _ => Err(ProofError::MalformedExpression(self.conclusion.clone())),
        }
    }

    /// Whether this letter is one of the unknowns or simplifications of this theorem
    pub fn has_character(&self, character: Identifier) -> bool {
        self.unknowns.contains(&character)
            || self.simplifications.iter().any(|s| s.name == character)
    }

    /// # Errors
    /// `UnboundIdentifier` with the first letter of `expression` this theorem does not declare
    pub fn verify_all_characters_bound(&self, expression: &str) -> Result<(), ProofError> {
        match extract_unknowns(expression)
            .into_iter()
            .find(|c| !self.has_character(*c))
        {
            Some(c) => Err(ProofError::UnboundIdentifier(c)),
            None => Ok(()),
        }
    }

    /// Whether `{lhs, rhs}` is one of the declared simplifications, in any order
    pub fn declares_simplification(&self, lhs: &str, rhs: &str) -> bool {
        self.simplifications.iter().any(|s| {
            let name = s.name.to_string();
            (lhs == name && rhs == s.expression) || (lhs == s.expression && rhs == name)
        })
    }
}

/// Checks every place where `value` was inserted into `side`
fn verify_insertions(side: &str, value: &str) -> Result<(), ProofError> {
    if value.is_empty() {
        return Ok(());
    }
    let pieces: Vec<&str> = side.split(value).collect();
    for window in pieces.windows(2) {
        if !safe_to_replace(window[0], value, window[1]) {
            return Err(ProofError::OperatorOrderViolation(value.to_owned()));
        }
    }
    Ok(())
}

/// An instance of a [`Declaration`], with its unknowns replaced by concrete parameters
///
/// Instances are immutable. Each one owns its proof (if it is not an axiom), which was
/// constructed while the instance was.
#[derive(Clone, Debug)]
pub struct Theorem {
    declaration: Arc<Declaration>,
    bindings: Vec<(String, String)>,
    left_hand_side: String,
    right_hand_side: String,
    proof: Option<Proof>,
}

impl Theorem {
    pub(crate) fn instantiate(
        declaration: Arc<Declaration>,
        parameters: Option<&[&str]>,
        context: &Context<'_>,
    ) -> Result<Self, ProofError> {
        let (lhs, rhs) = declaration.sides()?;
        declaration.verify_all_characters_bound(declaration.conclusion())?;
        if !(is_well_formed(lhs) && is_well_formed(rhs)) {
            return Err(ProofError::MalformedExpression(
                declaration.conclusion().to_owned(),
            ));
        }

        let unknowns = declaration.unknowns();
        let parameters: Vec<String> = match parameters {
            None => vec!["0".to_owned(); unknowns.len()],
            Some(parameters) if parameters.len() == unknowns.len() => {
                parameters.iter().map(|p| remove_spaces(p)).collect()
            }
            Some(parameters) => {
                return Err(ProofError::ParameterCountMismatch {
                    expected: unknowns.len(),
                    given: parameters.len(),
                })
            }
        };

        let mut bindings: Vec<(String, String)> = unknowns
            .iter()
            .map(|u| u.to_string())
            .zip(parameters)
            .collect();
        for simplification in declaration.simplifications() {
            let value = evaluate_numeral(&substitute_all(&simplification.expression, &bindings))?;
            bindings.push((simplification.name.to_string(), value));
        }

        let left_hand_side = substitute_all(lhs, &bindings);
        let right_hand_side = substitute_all(rhs, &bindings);
        for side in [&left_hand_side, &right_hand_side] {
            for (_, value) in &bindings {
                verify_insertions(side, value)?;
            }
        }
        if left_hand_side.is_empty()
            || right_hand_side.is_empty()
            || !(is_well_formed(&left_hand_side) && is_well_formed(&right_hand_side))
        {
            return Err(ProofError::MalformedExpression(format!(
                "{}={}",
                left_hand_side, right_hand_side
            )));
        }

        let proof = match declaration.proof() {
            Some(routine) => Some(routine.run(context, &declaration)?),
            None => None,
        };

        debug!(
            key = declaration.key(),
            depth = context.depth(),
            proven = proof.as_ref().map_or(true, Proof::is_finished),
            "instantiated {}={}",
            left_hand_side,
            right_hand_side
        );
        Ok(Theorem {
            declaration,
            bindings,
            left_hand_side,
            right_hand_side,
            proof,
        })
    }

    /// Returns the declaration this theorem is an instance of
    pub fn declaration(&self) -> &Arc<Declaration> {
        &self.declaration
    }

    /// Returns the key of the declaration
    pub fn key(&self) -> &str {
        self.declaration.key()
    }

    /// Returns the display name of the declaration
    pub fn name(&self) -> &str {
        self.declaration.name()
    }

    /// Returns the symbolic conclusion of the declaration, see the sides for this instance
    pub fn conclusion(&self) -> &str {
        self.declaration.conclusion()
    }

    /// Returns the unknowns of the declaration
    pub fn unknowns(&self) -> &[Identifier] {
        self.declaration.unknowns()
    }

    /// Returns the simplifications of the declaration
    pub fn simplifications(&self) -> &[Simplification] {
        self.declaration.simplifications()
    }

    /// The value of every unknown, then of every simplification, in this order
    pub fn bindings(&self) -> &[(String, String)] {
        &self.bindings
    }

    /// Returns the left side of the conclusion with the parameters put in
    pub fn left_hand_side(&self) -> &str {
        &self.left_hand_side
    }

    /// Returns the right side of the conclusion with the parameters put in
    pub fn right_hand_side(&self) -> &str {
        &self.right_hand_side
    }

    /// Returns the proof built when this theorem was instantiated, `None` for an axiom
    pub fn proof(&self) -> Option<&Proof> {
        self.proof.as_ref()
    }

    /// Whether the declaration has no proof
    pub fn is_axiom(&self) -> bool {
        self.proof.is_none()
    }

    /// Whether this theorem is an axiom or its proof was concluded
    pub fn is_proven(&self) -> bool {
        self.proof.as_ref().map_or(true, Proof::is_finished)
    }

    /// Whether `equality` states this instance, in one direction or the other
    ///
    /// # Example
    /// ```
    /// use equalis::{Builtin, Database};
    ///
    /// let database = Database::with_builtins().unwrap();
    /// let addition = database.instantiate(Builtin::Addition, Some(&["2", "3"])).unwrap();
    /// assert!(addition.is_held("2+3=5"));
    /// assert!(addition.is_held("5=2+3"));
    /// assert!(!addition.is_held("2+3=6"));
    /// ```
    pub fn is_held(&self, equality: &str) -> bool {
        let mut sides = equality.split('=');
        match (sides.next(), sides.next(), sides.next()) {
            (Some(lhs), Some(rhs), None) => {
                (lhs == self.left_hand_side && rhs == self.right_hand_side)
                    || (lhs == self.right_hand_side && rhs == self.left_hand_side)
            }
            _ => false,
        }
    }

    /// The equalities of the proof with this instance's parameters put in place of the unknowns.
    /// Empty for an axiom.
    pub fn instantiated_equalities(&self) -> Vec<String> {
        self.proof
            .iter()
            .flat_map(|proof| proof.equalities())
            .map(|equality| substitute_all(equality, &self.bindings))
            .collect()
    }
}

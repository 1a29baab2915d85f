//! Step by step proofs of equalities
//!
//! A proof starts from one side of the conclusion of its theorem. Every step adds a new equality,
//! obtained from an equality already in the proof either by applying another (proven) theorem to
//! exactly one place of it, or by replacing a declared simplification. The proof is finished once
//! both sides of the conclusion are among its equalities.

use std::{fmt, sync::Arc};

use tracing::{debug, trace};

use crate::{
    database::Context,
    error::ProofError,
    expression::{is_well_formed, remove_spaces},
    substitution::only_one_modification,
    theorem::{Declaration, Theorem},
};

/// A proof written in Rust. It receives the declaration it proves and a context to cite other
/// theorems with.
pub type NativeProof = fn(&Context<'_>, &Arc<Declaration>) -> Result<Proof, ProofError>;

/// The way a theorem is proven, run every time the theorem is instantiated
#[derive(Clone)]
pub enum ProofRoutine {
    Native(NativeProof),
    Script { start: String, steps: Vec<ProofStep> },
}

impl fmt::Debug for ProofRoutine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProofRoutine::Native(_) => f.write_str("Native"),
            ProofRoutine::Script { start, steps } => f
                .debug_struct("Script")
                .field("start", start)
                .field("steps", steps)
                .finish(),
        }
    }
}

impl ProofRoutine {
    pub(crate) fn run(
        &self,
        context: &Context<'_>,
        declaration: &Arc<Declaration>,
    ) -> Result<Proof, ProofError> {
        match self {
            ProofRoutine::Native(routine) => routine(context, declaration),
            ProofRoutine::Script { start, steps } => {
                let mut proof = Proof::new(declaration, start)?;
                for step in steps {
                    proof.apply(step, context)?;
                }
                Ok(proof)
            }
        }
    }
}

/// A reference to a theorem together with the parameters to instantiate it with
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Citation {
    pub key: String,
    pub parameters: Vec<String>,
}

/// One step of a written-down proof
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProofStep {
    Evolve {
        expression: String,
        modification: String,
        citation: Citation,
    },
    Simplify {
        expression: String,
        simplification: String,
    },
    Conclude,
}

/// How an equality of a proof was obtained
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Derivation {
    Start,
    /// From the equality with index `from`, using the dependency with index `dependency`
    Theorem {
        from: usize,
        dependency: usize,
        modification: String,
    },
    Simplification {
        from: usize,
        simplification: String,
    },
}

#[derive(Clone, Debug)]
pub struct Proof {
    declaration: Arc<Declaration>,
    conclusion_aim: (String, String),
    equalities: Vec<String>,
    derivations: Vec<Derivation>,
    dependencies: Vec<Theorem>,
    finished: bool,
}

impl Proof {
    /// Starts the proof of `declaration` at `starting_expression`
    ///
    /// # Errors
    /// - `MalformedExpression` if the conclusion is not an equality or the expression is empty or
    ///   not well-formed
    /// - `UnboundIdentifier` if the expression uses a letter the theorem does not declare
    pub fn new(declaration: &Arc<Declaration>, starting_expression: &str) -> Result<Self, ProofError> {
        let (lhs, rhs) = declaration.sides()?;
        let start = remove_spaces(starting_expression);
        declaration.verify_all_characters_bound(&start)?;
        if start.is_empty() || !is_well_formed(&start) {
            return Err(ProofError::MalformedExpression(start));
        }
        trace!(key = declaration.key(), "proof starts at {}", start);
        Ok(Proof {
            conclusion_aim: (lhs.to_owned(), rhs.to_owned()),
            declaration: Arc::clone(declaration),
            equalities: vec![start],
            derivations: vec![Derivation::Start],
            dependencies: Vec::new(),
            finished: false,
        })
    }

    /// The first equality of the proof from which `new_expression` is obtained with
    /// `modification`. The earliest one wins.
    fn find_old_equality(&self, new_expression: &str, modification: &str) -> Option<usize> {
        self.equalities
            .iter()
            .position(|old| only_one_modification(old, new_expression, modification))
    }

    /// Adds `new_expression` to the proof, obtained from a previous equality by applying
    /// `modification` once. `theorem` must be proven and state `modification`.
    ///
    /// Nothing happens once the proof is finished. On error the proof is left unchanged.
    pub fn evolve_equality(
        &mut self,
        new_expression: &str,
        modification: &str,
        theorem: Theorem,
    ) -> Result<(), ProofError> {
        if self.finished {
            return Ok(());
        }
        let new_expression = remove_spaces(new_expression);
        let modification = remove_spaces(modification);

        if !theorem.is_proven() {
            return Err(ProofError::TheoremNotProven(theorem.name().to_owned()));
        }
        if !theorem.is_held(&modification) {
            return Err(ProofError::UnlicensedModification {
                theorem: theorem.name().to_owned(),
                modification,
            });
        }
        self.declaration.verify_all_characters_bound(&new_expression)?;
        self.declaration.verify_all_characters_bound(&modification)?;
        if new_expression.is_empty() || !is_well_formed(&new_expression) {
            return Err(ProofError::MalformedExpression(new_expression));
        }
        let from = self
            .find_old_equality(&new_expression, &modification)
            .ok_or_else(|| ProofError::NoMatchingPriorEquality(new_expression.clone()))?;

        trace!(
            key = self.declaration.key(),
            using = theorem.key(),
            "{} -> {}",
            self.equalities[from],
            new_expression
        );
        self.derivations.push(Derivation::Theorem {
            from,
            dependency: self.dependencies.len(),
            modification,
        });
        self.dependencies.push(theorem);
        self.equalities.push(new_expression);
        Ok(())
    }

    /// Adds `new_expression` to the proof, obtained from a previous equality by replacing once
    /// the left side of `simplification` by its right side. The two sides must be a declared
    /// simplification of the theorem, in any order.
    ///
    /// Nothing happens once the proof is finished. On error the proof is left unchanged.
    pub fn use_simplification(
        &mut self,
        new_expression: &str,
        simplification: &str,
    ) -> Result<(), ProofError> {
        if self.finished {
            return Ok(());
        }
        let new_expression = remove_spaces(new_expression);
        let simplification = remove_spaces(simplification);

        let mut sides = simplification.split('=');
        let declared = match (sides.next(), sides.next(), sides.next()) {
            (Some(lhs), Some(rhs), None) => self.declaration.declares_simplification(lhs, rhs),
            _ => false,
        };
        if !declared {
            return Err(ProofError::UnlicensedSimplification(simplification));
        }
        if new_expression.is_empty() || !is_well_formed(&new_expression) {
            return Err(ProofError::MalformedExpression(new_expression));
        }
        let from = self
            .find_old_equality(&new_expression, &simplification)
            .ok_or_else(|| ProofError::NoMatchingPriorEquality(new_expression.clone()))?;

        trace!(
            key = self.declaration.key(),
            "{} -> {} by simplification",
            self.equalities[from],
            new_expression
        );
        self.derivations.push(Derivation::Simplification {
            from,
            simplification,
        });
        self.equalities.push(new_expression);
        Ok(())
    }

    /// Finishes the proof if both sides of the conclusion were reached
    ///
    /// # Errors
    /// `CannotConclude` otherwise, the proof can still be continued after that
    pub fn conclude(&mut self) -> Result<(), ProofError> {
        if self.finished {
            return Ok(());
        }
        let (lhs, rhs) = &self.conclusion_aim;
        if !(self.equalities.contains(lhs) && self.equalities.contains(rhs)) {
            return Err(ProofError::CannotConclude {
                lhs: lhs.clone(),
                rhs: rhs.clone(),
            });
        }
        debug!(
            key = self.declaration.key(),
            steps = self.equalities.len(),
            "proof concluded"
        );
        self.finished = true;
        Ok(())
    }

    /// Applies a written-down step, citing theorems through `context`
    pub fn apply(&mut self, step: &ProofStep, context: &Context<'_>) -> Result<(), ProofError> {
        match step {
            ProofStep::Evolve {
                expression,
                modification,
                citation,
            } => {
                let parameters: Vec<&str> = citation.parameters.iter().map(String::as_str).collect();
                let theorem = context.cite(&citation.key, &parameters)?;
                self.evolve_equality(expression, modification, theorem)
            }
            ProofStep::Simplify {
                expression,
                simplification,
            } => self.use_simplification(expression, simplification),
            ProofStep::Conclude => self.conclude(),
        }
    }

    pub fn declaration(&self) -> &Arc<Declaration> {
        &self.declaration
    }

    /// The two sides of the conclusion that have to be reached
    pub fn conclusion_aim(&self) -> (&str, &str) {
        (&self.conclusion_aim.0, &self.conclusion_aim.1)
    }

    pub fn equalities(&self) -> &[String] {
        &self.equalities
    }

    /// One entry per equality
    pub fn derivations(&self) -> &[Derivation] {
        &self.derivations
    }

    /// The theorem instances used, in the order they were applied
    pub fn dependencies(&self) -> &[Theorem] {
        &self.dependencies
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{builtin::Builtin, database::Database};

    fn database() -> Database {
        let mut database = Database::with_builtins().unwrap();
        let unfinished = Declaration::new("Unfinished", "an unfinished theorem", "a = a*1", &["a"], &[])
            .unwrap()
            .proven_by(ProofRoutine::Script {
                start: "a".to_owned(),
                steps: Vec::new(),
            });
        database.add(unfinished).unwrap();
        database
    }

    fn right_distributivity() -> Arc<Declaration> {
        Arc::new(Builtin::RightDistributivity.declaration().unwrap())
    }

    #[test]
    fn start() {
        let declaration = right_distributivity();
        let proof = Proof::new(&declaration, "(a + b)*c").unwrap();
        assert_eq!(proof.equalities(), &["(a+b)*c".to_owned()]);
        assert_eq!(proof.conclusion_aim(), ("(a+b)*c", "a*c+b*c"));
        assert_eq!(proof.derivations(), &[Derivation::Start]);
        assert!(!proof.is_finished());
        assert_eq!(
            Proof::new(&declaration, "(a + d)*c").unwrap_err(),
            ProofError::UnboundIdentifier('d')
        );
        assert!(matches!(
            Proof::new(&declaration, "(a + b*c"),
            Err(ProofError::MalformedExpression(_))
        ));
        assert_eq!(
            Proof::new(&declaration, " ").unwrap_err(),
            ProofError::MalformedExpression(String::new())
        );
    }

    #[test]
    fn empty_expressions() {
        let database = database();
        let context = database.context();
        let mut proof = Proof::new(&right_distributivity(), "(a + b)*c").unwrap();
        let theorem = context
            .cite(Builtin::ProductCommutativity, &["(a+b)", "c"])
            .unwrap();
        assert_eq!(
            proof.evolve_equality("", "(a + b)*c = c*(a + b)", theorem),
            Err(ProofError::MalformedExpression(String::new()))
        );
        assert_eq!(proof.equalities().len(), 1);
    }

    #[test]
    fn evolve() {
        let database = database();
        let context = database.context();
        let mut proof = Proof::new(&right_distributivity(), "(a + b)*c").unwrap();
        let theorem = context
            .cite(Builtin::ProductCommutativity, &["(a+b)", "c"])
            .unwrap();
        proof
            .evolve_equality("c*(a + b)", "(a + b)*c = c*(a + b)", theorem)
            .unwrap();
        assert_eq!(proof.equalities().len(), 2);
        assert_eq!(proof.equalities()[1], "c*(a+b)");
        assert_eq!(proof.dependencies().len(), 1);
        assert_eq!(
            proof.derivations()[1],
            Derivation::Theorem {
                from: 0,
                dependency: 0,
                modification: "(a+b)*c=c*(a+b)".to_owned()
            }
        );
    }

    #[test]
    fn unlicensed_modification() {
        let database = database();
        let context = database.context();
        let mut proof = Proof::new(&right_distributivity(), "(a + b)*c").unwrap();
        let theorem = context.cite(Builtin::ProductCommutativity, &["a", "c"]).unwrap();
        let error = proof
            .evolve_equality("c*(a + b)", "(a + b)*c = c*(a + b)", theorem)
            .unwrap_err();
        assert!(matches!(error, ProofError::UnlicensedModification { .. }));
        assert_eq!(proof.equalities().len(), 1);
    }

    #[test]
    fn unproven_theorem() {
        let database = database();
        let context = database.context();
        let unfinished = context.cite("Unfinished", &["c"]).unwrap();
        assert!(!unfinished.is_proven());
        let mut proof = Proof::new(&right_distributivity(), "(a + b)*c").unwrap();
        let error = proof
            .evolve_equality("(a + b)*c*1", "c = c*1", unfinished)
            .unwrap_err();
        assert_eq!(
            error,
            ProofError::TheoremNotProven("an unfinished theorem".to_owned())
        );
        assert_eq!(proof.equalities().len(), 1);
        assert!(proof.dependencies().is_empty());
    }

    #[test]
    fn no_matching_equality() {
        let database = database();
        let context = database.context();
        let mut proof = Proof::new(&right_distributivity(), "(a + b)*c").unwrap();
        let theorem = context.cite(Builtin::ProductCommutativity, &["a", "b"]).unwrap();
        assert_eq!(
            proof.evolve_equality("(b*a)*c", "a*b = b*a", theorem),
            Err(ProofError::NoMatchingPriorEquality("(b*a)*c".to_owned()))
        );
    }

    #[test]
    fn foreign_letters() {
        let database = database();
        let context = database.context();
        let mut proof = Proof::new(&right_distributivity(), "(a + b)*c").unwrap();
        let theorem = context.cite(Builtin::AdditionCommutativity, &["a", "x"]).unwrap();
        assert_eq!(
            proof.evolve_equality("(x+a)*c", "a+x=x+a", theorem),
            Err(ProofError::UnboundIdentifier('x'))
        );
    }

    #[test]
    fn simplification() {
        let addition = Arc::new(Builtin::Addition.declaration().unwrap());
        let mut proof = Proof::new(&addition, "a+b").unwrap();
        assert_eq!(
            proof.use_simplification("c", "a+b = d"),
            Err(ProofError::UnlicensedSimplification("a+b=d".to_owned()))
        );
        assert_eq!(
            proof.use_simplification("c", "a+b"),
            Err(ProofError::UnlicensedSimplification("a+b".to_owned()))
        );
        assert_eq!(
            proof.conclude(),
            Err(ProofError::CannotConclude {
                lhs: "a+b".to_owned(),
                rhs: "c".to_owned()
            })
        );
        // declared in both directions, but always applied from left to right
        assert_eq!(
            proof.use_simplification("c", "c = a + b"),
            Err(ProofError::NoMatchingPriorEquality("c".to_owned()))
        );
        proof.use_simplification("c", "a + b = c").unwrap();
        assert_eq!(
            proof.derivations()[1],
            Derivation::Simplification {
                from: 0,
                simplification: "a+b=c".to_owned()
            }
        );
        assert!(proof.dependencies().is_empty());
        proof.conclude().unwrap();
        assert!(proof.is_finished());
    }

    #[test]
    fn finished_proofs_ignore_steps() {
        let addition = Arc::new(Builtin::Addition.declaration().unwrap());
        let mut proof = Proof::new(&addition, "a+b").unwrap();
        proof.use_simplification("c", "a+b=c").unwrap();
        proof.conclude().unwrap();
        proof.use_simplification("a+b", "a+b=c").unwrap();
        proof.use_simplification("nonsense", "not=declared").unwrap();
        proof.conclude().unwrap();
        assert_eq!(proof.equalities().len(), 2);
    }

    #[test]
    fn script() {
        let database = database();
        let routine = ProofRoutine::Script {
            start: "(a + b)*c".to_owned(),
            steps: vec![
                ProofStep::Evolve {
                    expression: "c*(a + b)".to_owned(),
                    modification: "(a + b)*c = c*(a + b)".to_owned(),
                    citation: Citation {
                        key: "ProductCommutativity".to_owned(),
                        parameters: vec!["(a+b)".to_owned(), "c".to_owned()],
                    },
                },
                ProofStep::Evolve {
                    expression: "c*a + c*b".to_owned(),
                    modification: "c*(a + b) = c*a + c*b".to_owned(),
                    citation: Citation {
                        key: "LeftDistributivity".to_owned(),
                        parameters: vec!["c".to_owned(), "a".to_owned(), "b".to_owned()],
                    },
                },
                ProofStep::Conclude,
            ],
        };
        let declaration = Arc::new(
            Declaration::new("Expand", "expand", "(a + b)*c = c*a + c*b", &["a", "b", "c"], &[])
                .unwrap(),
        );
        let proof = routine.run(&database.context(), &declaration).unwrap();
        assert!(proof.is_finished());
        assert_eq!(proof.equalities().last().map(String::as_str), Some("c*a+c*b"));
        let keys: Vec<&str> = proof.dependencies().iter().map(Theorem::key).collect();
        assert_eq!(keys, vec!["ProductCommutativity", "LeftDistributivity"]);
    }

    #[test]
    fn script_without_conclusion() {
        let theorem = database().instantiate("Unfinished", None).unwrap();
        assert!(!theorem.is_axiom());
        assert!(!theorem.is_proven());
    }

    #[test]
    fn script_citing_unknown_theorem() {
        let database = database();
        let routine = ProofRoutine::Script {
            start: "a".to_owned(),
            steps: vec![ProofStep::Evolve {
                expression: "a*1".to_owned(),
                modification: "a=a*1".to_owned(),
                citation: Citation {
                    key: "Nowhere".to_owned(),
                    parameters: vec!["a".to_owned()],
                },
            }],
        };
        let declaration = Arc::new(Declaration::new("T", "t", "a = a*1", &["a"], &[]).unwrap());
        assert_eq!(
            routine.run(&database.context(), &declaration).unwrap_err(),
            ProofError::UnknownTheorem("Nowhere".to_owned())
        );
    }
}

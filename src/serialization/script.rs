use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    database::{Database, DatabaseError},
    proof::{ProofRoutine, ProofStep},
};

use super::{
    command::{Command, Header},
    error::describe,
};

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("cannot parse `{text}`: {message}")]
    Parse { text: String, message: String },
    #[error("`{0}` can only appear in the proof of a theorem")]
    OutsideTheorem(&'static str),
    #[error("the proof of {0} was already started")]
    AlreadyStarted(String),
    #[error("the proof of {0} must start with `beg`")]
    NotStarted(String),
    #[error("{0} has no proof, use `axm` to declare an axiom")]
    MissingProof(String),
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// A [`ScriptError`] with the line (counted from 1) it was found on
#[derive(Error, Debug)]
#[error("line {line}: {error}")]
pub struct LineError {
    pub line: usize,
    #[source]
    pub error: ScriptError,
}

#[derive(Debug)]
struct Pending {
    line: usize,
    header: Header,
    start: Option<String>,
    steps: Vec<ProofStep>,
}

/// Loads theorem scripts into a database, one command at a time
///
/// The proof of a theorem continues until the next declaration (or the end of the script), so a
/// theorem is only added once all of it was read.
#[derive(Debug, Default)]
pub struct Script {
    line: usize,
    pending: Option<Pending>,
    added: Vec<String>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    fn error(&self, error: impl Into<ScriptError>) -> LineError {
        LineError {
            line: self.line,
            error: error.into(),
        }
    }

    fn flush(&mut self, database: &mut Database) -> Result<(), LineError> {
        let pending = match self.pending.take() {
            Some(pending) => pending,
            None => return Ok(()),
        };
        let at = |error: ScriptError| LineError {
            line: pending.line,
            error,
        };
        let start = pending
            .start
            .ok_or_else(|| at(ScriptError::MissingProof(pending.header.key.clone())))?;
        let declaration = pending
            .header
            .declaration()
            .map_err(|e| at(DatabaseError::from(e).into()))?
            .proven_by(ProofRoutine::Script {
                start,
                steps: pending.steps,
            });
        database
            .add(declaration)
            .map_err(|e| at(e.into()))?;
        debug!(key = %pending.header.key, line = pending.line, "theorem loaded");
        self.added.push(pending.header.key);
        Ok(())
    }

    /// Applies the command found on line `line`
    pub fn apply(
        &mut self,
        line: usize,
        command: Command,
        database: &mut Database,
    ) -> Result<(), LineError> {
        self.line = line;
        trace!(line, ?command);
        match command {
            Command::Axiom(header) => {
                self.flush(database)?;
                let declaration = header
                    .declaration()
                    .map_err(|e| self.error(DatabaseError::from(e)))?;
                database.add(declaration).map_err(|e| self.error(e))?;
                self.added.push(header.key);
            }
            Command::Theorem(header) => {
                self.flush(database)?;
                self.pending = Some(Pending {
                    line,
                    header,
                    start: None,
                    steps: Vec::new(),
                });
            }
            Command::Begin(expression) => match &mut self.pending {
                None => return Err(self.error(ScriptError::OutsideTheorem("beg"))),
                Some(Pending {
                    start: Some(_),
                    header,
                    ..
                }) => {
                    let key = header.key.clone();
                    return Err(self.error(ScriptError::AlreadyStarted(key)));
                }
                Some(pending) => pending.start = Some(expression),
            },
            Command::Step(step) => match &mut self.pending {
                None => return Err(self.error(ScriptError::OutsideTheorem(keyword(&step)))),
                Some(Pending {
                    start: None,
                    header,
                    ..
                }) => {
                    let key = header.key.clone();
                    return Err(self.error(ScriptError::NotStarted(key)));
                }
                Some(pending) => pending.steps.push(step),
            },
        }
        Ok(())
    }

    /// Adds the last theorem and returns the keys of everything that was added, in order
    pub fn finish(mut self, database: &mut Database) -> Result<Vec<String>, LineError> {
        self.flush(database)?;
        Ok(self.added)
    }
}

fn keyword(step: &ProofStep) -> &'static str {
    match step {
        ProofStep::Evolve { .. } => "evo",
        ProofStep::Simplify { .. } => "smp",
        ProofStep::Conclude => "qed",
    }
}

/// Parses a whole script and adds its declarations to `database`. Empty lines and lines starting
/// with `#` are skipped.
///
/// Proofs are not run here, only when a theorem is instantiated, so theorems may cite theorems
/// declared later in the script (or in another one).
///
/// # Example
/// ```
/// use equalis::{serialization::load_script, Database};
///
/// let mut database = Database::with_builtins().unwrap();
/// let script = "
/// thm Identity [a, b] { (a + b)*1 = (a + b) }: the identity of a sum
/// beg (a + b)*1
/// evo 1*(a + b) | (a + b)*1 = 1*(a + b) | ProductCommutativity[(a + b), 1]
/// evo (a + b) | 1*(a + b) = (a + b) | LeftMultiplicationByIdentity[(a + b)]
/// qed
/// ";
/// assert_eq!(load_script(&mut database, script).unwrap(), vec!["Identity"]);
/// assert!(database.instantiate("Identity", None).unwrap().is_proven());
/// ```
pub fn load_script(database: &mut Database, input: &str) -> Result<Vec<String>, LineError> {
    let mut script = Script::new();
    for (index, text) in input.lines().enumerate() {
        let text = text.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        let command = Command::parse(text).map_err(|e| LineError {
            line: index + 1,
            error: ScriptError::Parse {
                text: text.to_owned(),
                message: describe(e),
            },
        })?;
        script.apply(index + 1, command, database)?;
    }
    script.finish(database)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProofError;

    fn load(script: &str) -> (Database, Result<Vec<String>, LineError>) {
        let mut database = Database::with_builtins().unwrap();
        let result = load_script(&mut database, script);
        (database, result)
    }

    #[test]
    fn axioms_and_theorems() {
        let (database, result) = load(
            "axm Double [a] { a + a = 2*a }: the double

# four times the same
thm Quadruple [a] { (a + a) + (a + a) = 4*a }: the quadruple
beg (a + a) + (a + a)
evo (2*a) + (a + a) | a + a = 2*a | Double[a]
evo (2*a) + (2*a) | a + a = 2*a | Double[a]
evo 2*a + (2*a) | (2*a) = 2*a | RemovalOfParenthesis[2*a]
evo 2*a + 2*a | (2*a) = 2*a | RemovalOfParenthesis[2*a]
evo 4*a | 2*a + 2*a = 4*a | LitteralAddition[2, 2, a]
qed
",
        );
        assert_eq!(result.unwrap(), vec!["Double", "Quadruple"]);
        let theorem = database.instantiate("Quadruple", Some(&["x"])).unwrap();
        assert!(theorem.is_proven());
        assert_eq!(theorem.right_hand_side(), "4*x");
        assert!(database.instantiate("Double", None).unwrap().is_axiom());
    }

    #[test]
    fn simplifications() {
        let (database, result) = load(
            "thm Sum [a, b; c ~ a + b] { a + b = c }: the sum
beg a + b
smp c | a + b = c
qed",
        );
        result.unwrap();
        let theorem = database.instantiate("Sum", Some(&["7", "8"])).unwrap();
        assert_eq!(theorem.right_hand_side(), "15");
        assert!(theorem.is_proven());
    }

    #[test]
    fn unfinished_proof() {
        let (database, result) = load(
            "thm Hope [a] { a = a*1 }
beg a",
        );
        result.unwrap();
        let theorem = database.instantiate("Hope", None).unwrap();
        assert!(!theorem.is_proven());
        assert_eq!(theorem.name(), "Hope");
    }

    #[test]
    fn failing_step() {
        let (database, result) = load(
            "thm Wrong [a, b] { a + b = b*a }
beg a + b
evo b*a | a + b = b*a | AdditionCommutativity[a, b]
qed",
        );
        result.unwrap();
        assert!(matches!(
            database.instantiate("Wrong", None),
            Err(DatabaseError::ProofError(
                ProofError::UnlicensedModification { .. }
            ))
        ));
    }

    #[test]
    fn mutual_recursion() {
        let (database, result) = load(
            "thm Hijack4 [a] { a^2 = a }: hijack 4
beg a^2
evo a | a^2 = a | Hijack4Bis[a]
qed
thm Hijack4Bis [a] { a^2 = a }: hijack 4 bis
beg a^2
evo a | a^2 = a | Hijack4[a]
qed",
        );
        result.unwrap();
        assert!(matches!(
            database.instantiate("Hijack4", None),
            Err(DatabaseError::ProofError(
                ProofError::CircularTheoremDependency(_)
            ))
        ));
    }

    #[test]
    fn structure_errors() {
        let cases: &[(&str, usize, fn(&ScriptError) -> bool)] = &[
            ("beg a", 1, |e| matches!(e, ScriptError::OutsideTheorem("beg"))),
            ("\n\nqed", 3, |e| matches!(e, ScriptError::OutsideTheorem("qed"))),
            ("thm T [a] { a = a }\nqed", 2, |e| {
                matches!(e, ScriptError::NotStarted(key) if key == "T")
            }),
            ("thm T [a] { a = a }\nbeg a\nbeg a", 3, |e| {
                matches!(e, ScriptError::AlreadyStarted(key) if key == "T")
            }),
            ("thm T [a] { a = a }\n# nothing\naxm U [a] { a = a }", 1, |e| {
                matches!(e, ScriptError::MissingProof(key) if key == "T")
            }),
            ("axm T [a] { a = a }\nthm T [a] { a = a }\nbeg a\nqed", 2, |e| {
                matches!(e, ScriptError::Database(DatabaseError::NameCollision(key)) if key == "T")
            }),
            ("axm Addition [a] { a = a }", 1, |e| {
                matches!(e, ScriptError::Database(DatabaseError::NameCollision(_)))
            }),
            ("axm T [aa] { a = a }", 1, |e| {
                matches!(
                    e,
                    ScriptError::Database(DatabaseError::ProofError(
                        ProofError::InvalidIdentifierName(_)
                    ))
                )
            }),
            ("\naxm T [a] a = a", 2, |e| matches!(e, ScriptError::Parse { .. })),
        ];
        for (script, line, expected) in cases {
            let error = load(script).1.unwrap_err();
            assert_eq!(error.line, *line, "{}", script);
            assert!(expected(&error.error), "{}: {}", script, error);
        }
    }
}

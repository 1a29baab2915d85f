//! The standard axioms and theorems of elementary algebra
//!
//! Every theorem here is proven from the axioms (and from theorems above it) with a proof written
//! in Rust.

use std::{fmt, sync::Arc};

use crate::{
    database::{Context, Database, DatabaseError},
    error::ProofError,
    proof::{NativeProof, Proof, ProofRoutine},
    theorem::Declaration,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    RemovalOfParenthesis,
    AdditionCommutativity,
    ProductCommutativity,
    LeftDistributivity,
    RightDistributivity,
    TripleLeftDistributivity,
    TripleRightDistributivity,
    LitteralAddition,
    LeftMultiplicationByIdentity,
    RightMultiplicationByIdentity,
    IdentityExponent,
    Addition,
    Product,
    Power,
    PowerDistribution,
    SquareDistribution,
    CubeLeftDistribution,
    CubeRightDistribution,
    FirstRemarkableIdentity,
    FirstIdentityWithTwist,
    CubeRemarkableIdentity,
}

use Builtin::*;

/// Name, conclusion, unknowns and simplifications
type Statement = (
    &'static str,
    &'static str,
    &'static [&'static str],
    &'static [(&'static str, &'static str)],
);

impl Builtin {
    pub const ALL: [Builtin; 21] = [
        RemovalOfParenthesis,
        AdditionCommutativity,
        ProductCommutativity,
        LeftDistributivity,
        RightDistributivity,
        TripleLeftDistributivity,
        TripleRightDistributivity,
        LitteralAddition,
        LeftMultiplicationByIdentity,
        RightMultiplicationByIdentity,
        IdentityExponent,
        Addition,
        Product,
        Power,
        PowerDistribution,
        SquareDistribution,
        CubeLeftDistribution,
        CubeRightDistribution,
        FirstRemarkableIdentity,
        FirstIdentityWithTwist,
        CubeRemarkableIdentity,
    ];

    pub fn key(self) -> &'static str {
        match self {
            RemovalOfParenthesis => "RemovalOfParenthesis",
            AdditionCommutativity => "AdditionCommutativity",
            ProductCommutativity => "ProductCommutativity",
            LeftDistributivity => "LeftDistributivity",
            RightDistributivity => "RightDistributivity",
            TripleLeftDistributivity => "TripleLeftDistributivity",
            TripleRightDistributivity => "TripleRightDistributivity",
            LitteralAddition => "LitteralAddition",
            LeftMultiplicationByIdentity => "LeftMultiplicationByIdentity",
            RightMultiplicationByIdentity => "RightMultiplicationByIdentity",
            IdentityExponent => "IdentityExponent",
            Addition => "Addition",
            Product => "Product",
            Power => "Power",
            PowerDistribution => "PowerDistribution",
            SquareDistribution => "SquareDistribution",
            CubeLeftDistribution => "CubeLeftDistribution",
            CubeRightDistribution => "CubeRightDistribution",
            FirstRemarkableIdentity => "FirstRemarkableIdentity",
            FirstIdentityWithTwist => "FirstIdentityWithTwist",
            CubeRemarkableIdentity => "CubeRemarkableIdentity",
        }
    }

    fn statement(self) -> Statement {
        match self {
            RemovalOfParenthesis => ("the removal of parenthesis", "(a) = a", &["a"], &[]),
            AdditionCommutativity => (
                "the commutativity of the addition",
                "a + b = b + a",
                &["a", "b"],
                &[],
            ),
            ProductCommutativity => (
                "the commutativity of the product",
                "a*b = b*a",
                &["a", "b"],
                &[],
            ),
            LeftDistributivity => (
                "the left distributivity of the product",
                "a*(b + c) = a*b + a*c",
                &["a", "b", "c"],
                &[],
            ),
            RightDistributivity => (
                "the right distributivity of the product",
                "(a + b)*c = a*c + b*c",
                &["a", "b", "c"],
                &[],
            ),
            TripleLeftDistributivity => (
                "the triple left distributivity of the product",
                "a*(b + c + d) = a*b + a*c + a*d",
                &["a", "b", "c", "d"],
                &[],
            ),
            TripleRightDistributivity => (
                "the triple right distributivity of the product",
                "(a + b + c)*d = a*d + b*d + c*d",
                &["a", "b", "c", "d"],
                &[],
            ),
            LitteralAddition => (
                "the litteral addition",
                "a*x + b*x = c*x",
                &["a", "b", "x"],
                &[("c", "a+b")],
            ),
            LeftMultiplicationByIdentity => (
                "the left multiplication by the identity",
                "1*a = a",
                &["a"],
                &[],
            ),
            RightMultiplicationByIdentity => (
                "the right multiplication by the identity",
                "a*1 = a",
                &["a"],
                &[],
            ),
            IdentityExponent => ("the identity exponent", "a^1 = a", &["a"], &[]),
            Addition => ("the addition", "a + b = c", &["a", "b"], &[("c", "a + b")]),
            Product => ("the product", "a * b = c", &["a", "b"], &[("c", "a * b")]),
            Power => ("the power", "a^b = c", &["a", "b"], &[("c", "a^b")]),
            PowerDistribution => (
                "the power distribution",
                "b^x * b^y = b^(x + y)",
                &["b", "x", "y"],
                &[],
            ),
            SquareDistribution => ("the distribution of the square", "a^2 = a*a", &["a"], &[]),
            CubeLeftDistribution => (
                "the left distribution of the cube",
                "a^3 = a^2*a",
                &["a"],
                &[],
            ),
            CubeRightDistribution => (
                "the right distribution of the cube",
                "a^3 = a*a^2",
                &["a"],
                &[],
            ),
            FirstRemarkableIdentity => (
                "the first remarkable identity",
                "(a+b)^2 = a^2 + 2*a*b + b^2",
                &["a", "b"],
                &[],
            ),
            FirstIdentityWithTwist => (
                "the first identity with a twist",
                "(x + 1)^2 = x^2 + 2*x + 1",
                &["x"],
                &[],
            ),
            CubeRemarkableIdentity => (
                "the cube remarkable identity",
                "(a + b)^3 = a^3 + 3*a^2*b + 3*a*b^2 + b^3",
                &["a", "b"],
                &[],
            ),
        }
    }

    fn proof(self) -> Option<NativeProof> {
        match self {
            RightDistributivity => Some(right_distributivity),
            TripleLeftDistributivity => Some(triple_left_distributivity),
            TripleRightDistributivity => Some(triple_right_distributivity),
            LitteralAddition => Some(litteral_addition),
            RightMultiplicationByIdentity => Some(right_multiplication_by_identity),
            Addition => Some(addition),
            Product => Some(product),
            Power => Some(power),
            SquareDistribution => Some(square_distribution),
            CubeLeftDistribution => Some(cube_left_distribution),
            CubeRightDistribution => Some(cube_right_distribution),
            FirstRemarkableIdentity => Some(first_remarkable_identity),
            FirstIdentityWithTwist => Some(first_identity_with_twist),
            CubeRemarkableIdentity => Some(cube_remarkable_identity),
            RemovalOfParenthesis
            | AdditionCommutativity
            | ProductCommutativity
            | LeftDistributivity
            | LeftMultiplicationByIdentity
            | IdentityExponent
            | PowerDistribution => None,
        }
    }

    pub fn declaration(self) -> Result<Declaration, ProofError> {
        let (name, conclusion, unknowns, simplifications) = self.statement();
        let declaration = Declaration::new(self.key(), name, conclusion, unknowns, simplifications)?;
        Ok(match self.proof() {
            Some(proof) => declaration.proven_by(ProofRoutine::Native(proof)),
            None => declaration,
        })
    }
}

impl AsRef<str> for Builtin {
    fn as_ref(&self) -> &str {
        self.key()
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Database {
    /// A database containing every [`Builtin`]
    pub fn with_builtins() -> Result<Self, DatabaseError> {
        let mut database = Database::new();
        for builtin in Builtin::ALL {
            database.add(builtin.declaration()?)?;
        }
        Ok(database)
    }
}

fn right_distributivity(context: &Context<'_>, declaration: &Arc<Declaration>) -> Result<Proof, ProofError> {
    let mut proof = Proof::new(declaration, "(a + b)*c")?;
    proof.evolve_equality(
        "c*(a + b)",
        "(a + b)*c = c*(a + b)",
        context.cite(ProductCommutativity, &["(a+b)", "c"])?,
    )?;
    proof.evolve_equality(
        "c*a + c*b",
        "c*(a + b) = c*a + c*b",
        context.cite(LeftDistributivity, &["c", "a", "b"])?,
    )?;
    proof.evolve_equality("a*c + c*b", "c*a = a*c", context.cite(ProductCommutativity, &["c", "a"])?)?;
    proof.evolve_equality("a*c + b*c", "c*b = b*c", context.cite(ProductCommutativity, &["b", "c"])?)?;
    proof.conclude()?;
    Ok(proof)
}

fn triple_left_distributivity(
    context: &Context<'_>,
    declaration: &Arc<Declaration>,
) -> Result<Proof, ProofError> {
    let mut proof = Proof::new(declaration, "a*(b + c + d)")?;
    proof.evolve_equality(
        "a*(b + (c+d))",
        "c + d = (c + d)",
        context.cite(RemovalOfParenthesis, &["c + d"])?,
    )?;
    proof.evolve_equality(
        "a*b + a*(c+d)",
        "a*(b + (c+d)) = a*b + a*(c+d)",
        context.cite(LeftDistributivity, &["a", "b", "(c+d)"])?,
    )?;
    proof.evolve_equality(
        "a*b + a*c + a*d",
        "a*(c + d) = a*c + a*d",
        context.cite(LeftDistributivity, &["a", "c", "d"])?,
    )?;
    proof.conclude()?;
    Ok(proof)
}

fn triple_right_distributivity(
    context: &Context<'_>,
    declaration: &Arc<Declaration>,
) -> Result<Proof, ProofError> {
    let mut proof = Proof::new(declaration, "(a + b + c)*d")?;
    proof.evolve_equality(
        "d*(a + b + c)",
        "(a + b + c)*d = d*(a + b + c)",
        context.cite(ProductCommutativity, &["(a + b + c)", "d"])?,
    )?;
    proof.evolve_equality(
        "d*a + d*b + d*c",
        "d*(a + b + c) = d*a + d*b + d*c",
        context.cite(TripleLeftDistributivity, &["d", "a", "b", "c"])?,
    )?;
    proof.evolve_equality("a*d + d*b + d*c", "d*a = a*d", context.cite(ProductCommutativity, &["d", "a"])?)?;
    proof.evolve_equality("a*d + b*d + d*c", "d*b = b*d", context.cite(ProductCommutativity, &["d", "b"])?)?;
    proof.evolve_equality("a*d + b*d + c*d", "d*c = c*d", context.cite(ProductCommutativity, &["d", "c"])?)?;
    proof.conclude()?;
    Ok(proof)
}

fn litteral_addition(context: &Context<'_>, declaration: &Arc<Declaration>) -> Result<Proof, ProofError> {
    let mut proof = Proof::new(declaration, "a*x + b*x")?;
    proof.evolve_equality(
        "(a+b)*x",
        "a*x + b*x = (a+b)*x",
        context.cite(RightDistributivity, &["a", "b", "x"])?,
    )?;
    proof.use_simplification("(c)*x", "a+b = c")?;
    proof.evolve_equality("c*x", "(c) = c", context.cite(RemovalOfParenthesis, &["c"])?)?;
    proof.conclude()?;
    Ok(proof)
}

fn right_multiplication_by_identity(
    context: &Context<'_>,
    declaration: &Arc<Declaration>,
) -> Result<Proof, ProofError> {
    let mut proof = Proof::new(declaration, "a*1")?;
    proof.evolve_equality("1*a", "a*1 = 1*a", context.cite(ProductCommutativity, &["a", "1"])?)?;
    proof.evolve_equality("a", "1*a = a", context.cite(LeftMultiplicationByIdentity, &["a"])?)?;
    proof.conclude()?;
    Ok(proof)
}

fn addition(_: &Context<'_>, declaration: &Arc<Declaration>) -> Result<Proof, ProofError> {
    let mut proof = Proof::new(declaration, "a+b")?;
    proof.use_simplification("c", "a+b = c")?;
    proof.conclude()?;
    Ok(proof)
}

fn product(_: &Context<'_>, declaration: &Arc<Declaration>) -> Result<Proof, ProofError> {
    let mut proof = Proof::new(declaration, "a*b")?;
    proof.use_simplification("c", "a*b = c")?;
    proof.conclude()?;
    Ok(proof)
}

fn power(_: &Context<'_>, declaration: &Arc<Declaration>) -> Result<Proof, ProofError> {
    let mut proof = Proof::new(declaration, "a^b")?;
    proof.use_simplification("c", "a^b = c")?;
    proof.conclude()?;
    Ok(proof)
}

fn square_distribution(context: &Context<'_>, declaration: &Arc<Declaration>) -> Result<Proof, ProofError> {
    let mut proof = Proof::new(declaration, "a^2")?;
    proof.evolve_equality("a^(2)", "2 = (2)", context.cite(RemovalOfParenthesis, &["2"])?)?;
    proof.evolve_equality("a^(1 + 1)", "2 = 1 + 1", context.cite(Addition, &["1", "1"])?)?;
    proof.evolve_equality(
        "a^1 * a^1",
        "a^(1 + 1) = a^1 * a^1",
        context.cite(PowerDistribution, &["a", "1", "1"])?,
    )?;
    proof.evolve_equality("a * a^1", "a^1 = a", context.cite(IdentityExponent, &["a"])?)?;
    proof.evolve_equality("a * a", "a^1 = a", context.cite(IdentityExponent, &["a"])?)?;
    proof.conclude()?;
    Ok(proof)
}

fn cube_left_distribution(
    context: &Context<'_>,
    declaration: &Arc<Declaration>,
) -> Result<Proof, ProofError> {
    let mut proof = Proof::new(declaration, "a^3")?;
    proof.evolve_equality("a^(3)", "3 = (3)", context.cite(RemovalOfParenthesis, &["3"])?)?;
    proof.evolve_equality("a^(2 + 1)", "3 = 2 + 1", context.cite(Addition, &["2", "1"])?)?;
    proof.evolve_equality(
        "a^2 * a^1",
        "a^(2 + 1) = a^2 * a^1",
        context.cite(PowerDistribution, &["a", "2", "1"])?,
    )?;
    proof.evolve_equality("a^2 * a", "a^1 = a", context.cite(IdentityExponent, &["a"])?)?;
    proof.conclude()?;
    Ok(proof)
}

fn cube_right_distribution(
    context: &Context<'_>,
    declaration: &Arc<Declaration>,
) -> Result<Proof, ProofError> {
    let mut proof = Proof::new(declaration, "a^3")?;
    proof.evolve_equality("a^2*a", "a^3 = a^2*a", context.cite(CubeLeftDistribution, &["a"])?)?;
    proof.evolve_equality(
        "a*a^2",
        "a^2*a = a*a^2",
        context.cite(ProductCommutativity, &["a^2", "a"])?,
    )?;
    proof.conclude()?;
    Ok(proof)
}

fn first_remarkable_identity(
    context: &Context<'_>,
    declaration: &Arc<Declaration>,
) -> Result<Proof, ProofError> {
    let mut proof = Proof::new(declaration, "(a + b)^2")?;
    proof.evolve_equality(
        "(a + b)*(a + b)",
        "(a + b)^2 = (a + b)*(a + b)",
        context.cite(SquareDistribution, &["(a + b)"])?,
    )?;
    proof.evolve_equality(
        "a*(a + b) + b*(a + b)",
        "(a + b)*(a + b) = a*(a + b) + b*(a + b)",
        context.cite(RightDistributivity, &["a", "b", "(a + b)"])?,
    )?;
    proof.evolve_equality(
        "a*a + a*b + b*(a + b)",
        "a*(a + b) = a*a + a*b",
        context.cite(LeftDistributivity, &["a", "a", "b"])?,
    )?;
    proof.evolve_equality(
        "a*a + a*b + b*a + b*b",
        "b*(a + b) = b*a + b*b",
        context.cite(LeftDistributivity, &["b", "a", "b"])?,
    )?;
    proof.evolve_equality(
        "a*a + a*b + a*b + b*b",
        "b*a = a*b",
        context.cite(ProductCommutativity, &["a", "b"])?,
    )?;
    proof.evolve_equality(
        "a*a + 1*a*b + a*b + b*b",
        "a*b = 1*a*b",
        context.cite(LeftMultiplicationByIdentity, &["a*b"])?,
    )?;
    proof.evolve_equality(
        "a*a + 1*a*b + 1*a*b + b*b",
        "a*b = 1*a*b",
        context.cite(LeftMultiplicationByIdentity, &["a*b"])?,
    )?;
    proof.evolve_equality(
        "a*a + 2*a*b + b*b",
        "1*a*b + 1*a*b = 2*a*b",
        context.cite(LitteralAddition, &["1", "1", "a*b"])?,
    )?;
    proof.evolve_equality("a^2 + 2*a*b + b*b", "a*a = a^2", context.cite(SquareDistribution, &["a"])?)?;
    proof.evolve_equality("a^2 + 2*a*b + b^2", "b*b = b^2", context.cite(SquareDistribution, &["b"])?)?;
    proof.conclude()?;
    Ok(proof)
}

fn first_identity_with_twist(
    context: &Context<'_>,
    declaration: &Arc<Declaration>,
) -> Result<Proof, ProofError> {
    let mut proof = Proof::new(declaration, "(x + 1)^2")?;
    proof.evolve_equality(
        "x^2 + 2*x*1 + 1^2",
        "(x + 1)^2 = x^2 + 2*x*1 + 1^2",
        context.cite(FirstRemarkableIdentity, &["x", "1"])?,
    )?;
    proof.evolve_equality(
        "x^2 + 2*x + 1^2",
        "2*x*1 = 2*x",
        context.cite(RightMultiplicationByIdentity, &["2*x"])?,
    )?;
    proof.evolve_equality("x^2 + 2*x + 1", "1^2 = 1", context.cite(Power, &["1", "2"])?)?;
    proof.conclude()?;
    Ok(proof)
}

fn cube_remarkable_identity(
    context: &Context<'_>,
    declaration: &Arc<Declaration>,
) -> Result<Proof, ProofError> {
    let mut proof = Proof::new(declaration, "(a + b)^3")?;
    proof.evolve_equality(
        "(a + b)^2 * (a + b)",
        "(a + b)^3 = (a + b)^2 * (a + b)",
        context.cite(CubeLeftDistribution, &["(a + b)"])?,
    )?;
    proof.evolve_equality(
        "((a + b)^2) * (a + b)",
        "(a + b)^2 = ((a + b)^2)",
        context.cite(RemovalOfParenthesis, &["(a + b)^2"])?,
    )?;
    proof.evolve_equality(
        "(a^2 + 2*a*b + b^2) * (a + b)",
        "(a + b)^2 = a^2 + 2*a*b + b^2",
        context.cite(FirstRemarkableIdentity, &["a", "b"])?,
    )?;
    proof.evolve_equality(
        "(a^2 + 2*a*b + b^2)*a + (a^2 + 2*a*b + b^2)*b",
        "(a^2 + 2*a*b + b^2) * (a + b) = (a^2 + 2*a*b + b^2)*a + (a^2 + 2*a*b + b^2)*b",
        context.cite(LeftDistributivity, &["(a^2 + 2*a*b + b^2)", "a", "b"])?,
    )?;
    proof.evolve_equality(
        "a^2*a + 2*a*b*a + b^2*a + (a^2 + 2*a*b + b^2)*b",
        "(a^2 + 2*a*b + b^2)*a = a^2*a + 2*a*b*a + b^2*a",
        context.cite(TripleRightDistributivity, &["a^2", "2*a*b", "b^2", "a"])?,
    )?;
    proof.evolve_equality(
        "a^2*a + 2*a*b*a + b^2*a + a^2*b + 2*a*b*b + b^2*b",
        "(a^2 + 2*a*b + b^2)*b = a^2*b + 2*a*b*b + b^2*b",
        context.cite(TripleRightDistributivity, &["a^2", "2*a*b", "b^2", "b"])?,
    )?;
    proof.evolve_equality(
        "a^3 + 2*a*b*a + b^2*a + a^2*b + 2*a*b*b + b^2*b",
        "a^2*a = a^3",
        context.cite(CubeLeftDistribution, &["a"])?,
    )?;
    proof.evolve_equality(
        "a^3 + 2*a*b*a + b^2*a + a^2*b + 2*a*b*b + b^3",
        "b^2*b = b^3",
        context.cite(CubeLeftDistribution, &["b"])?,
    )?;
    proof.evolve_equality(
        "a^3 + 2*a*b*a + a^2*b + b^2*a + 2*a*b*b + b^3",
        "b^2*a + a^2*b = a^2*b + b^2*a",
        context.cite(AdditionCommutativity, &["b^2*a", "a^2*b"])?,
    )?;
    proof.evolve_equality(
        "a^3 + 2*a*a*b + a^2*b + b^2*a + 2*a*b*b + b^3",
        "b*a = a*b",
        context.cite(ProductCommutativity, &["a", "b"])?,
    )?;
    proof.evolve_equality(
        "a^3 + 2*a^2*b + a^2*b + b^2*a + 2*a*b*b + b^3",
        "a*a = a^2",
        context.cite(SquareDistribution, &["a"])?,
    )?;
    proof.evolve_equality(
        "a^3 + 2*a^2*b + 1*a^2*b + b^2*a + 2*a*b*b + b^3",
        "a^2*b = 1*a^2*b",
        context.cite(LeftMultiplicationByIdentity, &["a^2*b"])?,
    )?;
    proof.evolve_equality(
        "a^3 + 3*a^2*b + b^2*a + 2*a*b*b + b^3",
        "2*a^2*b + 1*a^2*b = 3*a^2*b",
        context.cite(LitteralAddition, &["2", "1", "a^2*b"])?,
    )?;
    proof.evolve_equality(
        "a^3 + 3*a^2*b + a*b^2 + 2*a*b*b + b^3",
        "b^2*a = a*b^2",
        context.cite(ProductCommutativity, &["b^2", "a"])?,
    )?;
    proof.evolve_equality(
        "a^3 + 3*a^2*b + a*b^2 + 2*a*b^2 + b^3",
        "b*b = b^2",
        context.cite(SquareDistribution, &["b"])?,
    )?;
    proof.evolve_equality(
        "a^3 + 3*a^2*b + 1*a*b^2 + 2*a*b^2 + b^3",
        "a*b^2 = 1*a*b^2",
        context.cite(LeftMultiplicationByIdentity, &["a*b^2"])?,
    )?;
    proof.evolve_equality(
        "a^3 + 3*a^2*b + 3*a*b^2 + b^3",
        "1*a*b^2 + 2*a*b^2 = 3*a*b^2",
        context.cite(LitteralAddition, &["1", "2", "a*b^2"])?,
    )?;
    proof.conclude()?;
    Ok(proof)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proof::{Citation, ProofStep};

    fn database() -> Database {
        Database::with_builtins().unwrap()
    }

    fn hijack(key: &str, conclusion: &str, start: &str, step: (&str, &str, &str, &[&str])) -> Declaration {
        let (expression, modification, cited, parameters) = step;
        Declaration::new(key, key, conclusion, &["a", "b", "x"], &[])
            .unwrap()
            .proven_by(ProofRoutine::Script {
                start: start.to_owned(),
                steps: vec![
                    ProofStep::Evolve {
                        expression: expression.to_owned(),
                        modification: modification.to_owned(),
                        citation: Citation {
                            key: cited.to_owned(),
                            parameters: parameters.iter().map(|p| p.to_string()).collect(),
                        },
                    },
                    ProofStep::Conclude,
                ],
            })
    }

    #[test]
    fn keys() {
        let database = database();
        assert_eq!(database.len(), Builtin::ALL.len());
        for (builtin, key) in Builtin::ALL.iter().zip(database.keys()) {
            assert_eq!(builtin.key(), key);
            assert_eq!(builtin.to_string(), key);
        }
    }

    #[test]
    fn everything_is_proven() {
        let database = database();
        for builtin in Builtin::ALL {
            let theorem = database.instantiate(builtin, None).unwrap();
            assert!(theorem.is_proven(), "{}", builtin);
            assert_eq!(theorem.is_axiom(), builtin.proof().is_none(), "{}", builtin);
        }
    }

    #[test]
    fn everything_is_proven_with_parameters() {
        let database = database();
        let theorem = database
            .instantiate(CubeRemarkableIdentity, Some(&["(x+1)", "y"]))
            .unwrap();
        assert!(theorem.is_proven());
        assert_eq!(theorem.left_hand_side(), "((x+1)+y)^3");
        let theorem = database
            .instantiate(LitteralAddition, Some(&["2", "3", "x^2"]))
            .unwrap();
        assert_eq!(theorem.left_hand_side(), "2*x^2+3*x^2");
        assert_eq!(theorem.right_hand_side(), "5*x^2");
    }

    #[test]
    fn arithmetic() {
        let database = database();
        let addition = database.instantiate(Addition, Some(&["2", "3"])).unwrap();
        assert_eq!((addition.left_hand_side(), addition.right_hand_side()), ("2+3", "5"));
        let product = database.instantiate(Product, Some(&["4", "3"])).unwrap();
        assert_eq!(product.right_hand_side(), "12");
        let power = database.instantiate(Power, Some(&["2", "5"])).unwrap();
        assert_eq!(power.right_hand_side(), "32");
        // a numeral of several digits has no operator, it cannot follow a `*`
        assert_eq!(
            database.instantiate(Product, Some(&["4", "12"])).unwrap_err(),
            ProofError::OperatorOrderViolation("12".to_owned()).into()
        );
        assert_eq!(
            database.instantiate(Product, Some(&["4", "(12)"])).unwrap().right_hand_side(),
            "48"
        );
        assert_eq!(
            database.instantiate(Power, Some(&["2", "(0-1)"])).unwrap_err(),
            ProofError::MalformedExpression("2^(0-1)=1/2".to_owned()).into()
        );
    }

    #[test]
    fn parameter_count() {
        let database = database();
        for builtin in Builtin::ALL {
            let expected = builtin.declaration().unwrap().unknowns().len();
            let parameters = vec!["1"; expected + 1];
            assert_eq!(
                database.instantiate(builtin, Some(&parameters)).unwrap_err(),
                ProofError::ParameterCountMismatch {
                    expected,
                    given: expected + 1
                }
                .into()
            );
        }
    }

    #[test]
    fn order_of_operations_hijack() {
        let mut database = database();
        database
            .add(hijack(
                "Hijack1",
                "a + b^2 = a + b*a + b",
                "a + b^2",
                ("a + b*a + b", "a + b^2 = a + b*a + b", "SquareDistribution", &["a + b"]),
            ))
            .unwrap();
        assert_eq!(
            database.instantiate("Hijack1", None).unwrap_err(),
            ProofError::OperatorOrderViolation("a+b".to_owned()).into()
        );
    }

    #[test]
    fn partial_term_hijack() {
        let mut database = database();
        database
            .add(hijack(
                "Hijack2",
                "2*x + 3*x^2 = 5*x^2",
                "2*x + 3*x^2",
                ("5*x^2", "2*x + 3*x = 5*x", "LitteralAddition", &["2", "3", "x"]),
            ))
            .unwrap();
        assert_eq!(
            database.instantiate("Hijack2", None).unwrap_err(),
            ProofError::NoMatchingPriorEquality("5*x^2".to_owned()).into()
        );
    }

    #[test]
    fn parenthesis_hijack() {
        let mut database = database();
        database
            .add(hijack(
                "Hijack3",
                "(a + b)^2 = a + b^2",
                "(a + b)^2",
                ("a + b^2", "(a+b) = a + b", "RemovalOfParenthesis", &["a+b"]),
            ))
            .unwrap();
        assert_eq!(
            database.instantiate("Hijack3", None).unwrap_err(),
            ProofError::NoMatchingPriorEquality("a+b^2".to_owned()).into()
        );
    }

    #[test]
    fn proof_dependencies() {
        let theorem = database().instantiate(RightDistributivity, None).unwrap();
        let proof = theorem.proof().unwrap();
        assert_eq!(
            proof.equalities(),
            &["(a+b)*c", "c*(a+b)", "c*a+c*b", "a*c+c*b", "a*c+b*c"]
        );
        let cited: Vec<_> = proof
            .dependencies()
            .iter()
            .map(|t| (t.key(), t.left_hand_side(), t.right_hand_side()))
            .collect();
        assert_eq!(
            cited,
            vec![
                ("ProductCommutativity", "(a+b)*c", "c*(a+b)"),
                ("LeftDistributivity", "c*(a+b)", "c*a+c*b"),
                ("ProductCommutativity", "c*a", "a*c"),
                ("ProductCommutativity", "b*c", "c*b"),
            ]
        );
    }
}

//! Checks the proofs of the standard theorem set and of theorem scripts
//!
//! ```text
//! equalis [OPTIONS] [SCRIPTS]...
//! ```
//!
//! Every selected theorem is instantiated, which runs its proof. Proven theorems are printed in
//! an order where each one comes after the theorems it cites.

use std::{fs, path::PathBuf, process::ExitCode};

use clap::{ArgAction, Parser};
use equalis::{
    serialization::{load_script, LineError},
    Catalogue, CatalogueError, Database, DatabaseError, Derivation, Theorem,
};
use thiserror::Error;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "equalis")]
#[command(about = "Check step-by-step proofs of algebraic equalities")]
#[command(version)]
struct Cli {
    /// Theorem scripts to load after the standard theorem set
    scripts: Vec<PathBuf>,
    /// Do not register the standard theorem set
    #[arg(long)]
    no_builtins: bool,
    /// Only check this theorem (can be repeated)
    #[arg(short, long = "theorem", value_name = "KEY")]
    theorems: Vec<String>,
    /// Parameters to instantiate the selected theorem with
    #[arg(long, value_delimiter = ',', requires = "theorems")]
    params: Option<Vec<String>>,
    /// Print the equalities of every proof
    #[arg(long)]
    show_proof: bool,
    /// Log more (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{}, {source}", path.display())]
    Script { path: PathBuf, source: LineError },
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),
    #[error("--params needs exactly one --theorem, {0} were given")]
    AmbiguousParameters(usize),
    #[error("logging could not be set up: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),
}

fn level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn load(cli: &Cli) -> Result<Database, CliError> {
    let mut database = if cli.no_builtins {
        Database::new()
    } else {
        Database::with_builtins()?
    };
    for path in &cli.scripts {
        let input = fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.clone(),
            source,
        })?;
        let keys = load_script(&mut database, &input).map_err(|source| CliError::Script {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), theorems = keys.len(), "script loaded");
    }
    Ok(database)
}

fn print_proof(theorem: &Theorem) {
    let proof = match theorem.proof() {
        Some(proof) => proof,
        None => return,
    };
    let instantiated = theorem.instantiated_equalities();
    for (index, (equality, derivation)) in proof
        .equalities()
        .iter()
        .zip(proof.derivations())
        .enumerate()
    {
        let justification = match derivation {
            Derivation::Start => "start".to_owned(),
            Derivation::Theorem {
                dependency,
                modification,
                ..
            } => match proof.dependencies().get(*dependency) {
                Some(cited) => format!("{} by {}", modification, cited.name()),
                None => modification.clone(),
            },
            Derivation::Simplification { simplification, .. } => {
                format!("simplify {}", simplification)
            }
        };
        let shown = instantiated.get(index).unwrap_or(equality);
        if shown == equality {
            println!("    {:<24} {}", equality, justification);
        } else {
            println!("    {:<24} {:<24} {}", equality, shown, justification);
        }
    }
}

fn run(cli: &Cli) -> Result<bool, CliError> {
    let database = load(cli)?;
    let keys: Vec<String> = if cli.theorems.is_empty() {
        database.keys().map(str::to_owned).collect()
    } else {
        cli.theorems.clone()
    };
    let parameters: Option<Vec<&str>> = match &cli.params {
        Some(_) if keys.len() != 1 => return Err(CliError::AmbiguousParameters(keys.len())),
        Some(params) => Some(params.iter().map(String::as_str).collect()),
        None => None,
    };

    let mut catalogue = Catalogue::new();
    let mut all_proven = true;
    for key in &keys {
        match database.instantiate(key, parameters.as_deref()) {
            Ok(theorem) if theorem.is_proven() => {
                debug!(key = %key, "proven");
                catalogue.add(&theorem)?;
            }
            Ok(theorem) => {
                all_proven = false;
                eprintln!("{}: the proof does not reach its conclusion", theorem.name());
            }
            Err(error) => {
                all_proven = false;
                eprintln!("{}: {}", key, error);
            }
        }
    }

    for (index, theorem) in catalogue.entries().iter().enumerate() {
        let references: Vec<String> = catalogue
            .references(index)
            .iter()
            .map(|reference| (reference + 1).to_string())
            .collect();
        let origin = if theorem.is_axiom() {
            "axiom".to_owned()
        } else if references.is_empty() {
            "proven".to_owned()
        } else {
            format!("uses {}", references.join(", "))
        };
        println!(
            "{:>3}. {} ({}): {} = {}  [{}]",
            index + 1,
            theorem.name(),
            theorem.key(),
            theorem.left_hand_side(),
            theorem.right_hand_side(),
            origin
        );
        if cli.show_proof {
            print_proof(theorem);
        }
    }
    Ok(all_proven)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level(cli.verbose))
        .with_writer(std::io::stderr)
        .finish();
    if let Err(error) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("{}", CliError::from(error));
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::FAILURE
        }
    }
}

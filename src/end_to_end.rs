//! Code to configure and run the workbench on an input definitions file and
//! a set of ad-hoc query expressions.

use std::fs;

use clap::Parser;

use crate::definition_folding::fold_definitions;
use crate::definition_loading::{load_definitions, LoadError};
use crate::expression_ast::Scope;
use crate::pretty_printing::pretty_print;
use crate::recursive_descent_parsing::{parse_expression, ParseError};
use crate::reduction::{simplify, DEFAULT_MAX_STEPS};

/// Config for the workbench. Instantiate via `WorkbenchConfig::parse()`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct WorkbenchConfig {
    /// Path to a definitions-block file: semicolon-separated `name = term`
    /// equations, `//` comments allowed.
    #[arg(short, long)]
    pub src_filepath: String,

    /// Query expressions to normalize and fold against the loaded
    /// definitions. May be given multiple times.
    #[arg(short, long)]
    pub query: Vec<String>,

    /// Maximum number of reduction sweeps before a term is given up on.
    #[arg(short, long, default_value_t = DEFAULT_MAX_STEPS)]
    pub max_steps: usize,
}

/// Errors that may be thrown when running the workbench.
#[derive(Debug)]
pub enum RunError {
    InputFileError(std::io::Error),
    DefinitionLoadError(LoadError),
    QueryParseError(ParseError),
}

/// Display trait implementation for RunError.
impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputFileError(io_err) => {
                return write!(f, "Input file error: {}", io_err);
            }

            Self::DefinitionLoadError(load_error) => {
                return write!(f, "Definition load error: {}", load_error);
            }

            Self::QueryParseError(parse_error) => {
                return write!(f, "Query parse error: {}", parse_error);
            }
        }
    }
}

/// Type conversions for errors.
impl From<std::io::Error> for RunError {
    fn from(value: std::io::Error) -> Self {
        return Self::InputFileError(value);
    }
}

impl From<LoadError> for RunError {
    fn from(value: LoadError) -> Self {
        return Self::DefinitionLoadError(value);
    }
}

/// Runs the workbench on an in-memory definitions block and query list:
/// loads the block, emits one `name = <pretty form>` line per definition in
/// load order, then one `query --> <pretty form>` line per query, where the
/// query result is normalized and then folded against the definitions.
pub fn run_workbench_on_source(
    definitions_block: &str,
    queries: &[String],
    max_steps: usize,
) -> Result<String, RunError> {
    let mut scope = Scope::new();
    load_definitions(definitions_block, &mut scope, max_steps)?;

    let mut out_lines = Vec::new();

    for (def_name, def_expr) in &scope {
        out_lines.push(format!("{} = {}", def_name, pretty_print(def_expr)));
    }

    for query in queries {
        let parsed = match parse_expression(query, &mut scope) {
            Ok(parsed) => parsed,
            Err(parse_error) => {
                return Err(RunError::QueryParseError(parse_error));
            }
        };

        let folded = fold_definitions(&simplify(&parsed, max_steps), &scope);

        out_lines.push(format!("{} --> {}", query, pretty_print(&folded)));
    }

    return Ok(out_lines.join("\n"));
}

/// Runs the workbench based on the given config: reads the definitions file
/// and delegates to `run_workbench_on_source`.
pub fn run_workbench(config: &WorkbenchConfig) -> Result<String, RunError> {
    let definitions_block = fs::read_to_string(&config.src_filepath)?;

    return run_workbench_on_source(
        definitions_block.as_str(),
        &config.query,
        config.max_steps,
    );
}

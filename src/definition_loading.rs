//! Batch loader for a definitions block: semicolon-separated `name = term`
//! equations, with `//` comments stripped to end of line. Each right-hand
//! side parses against the scope built from all prior equations and is
//! normalized before being stored, so the scope accumulates normal forms.

use std::fmt::Display;

use lazy_static::lazy_static;
use regex::Regex;

use crate::expression_ast::Scope;
use crate::recursive_descent_parsing::{parse_expression, ParseError};
use crate::reduction::simplify;

lazy_static! {
    static ref COMMENT_REGEX: Regex =
        Regex::new(r"//[^\n]*").expect("Unable to compile comment-stripping regex.");
}

/// Represents a batch-load error. Loading aborts on the first error; there
/// is no partial-success mode beyond the definitions already inserted.
#[derive(Debug, PartialEq, Eq)]
pub enum LoadError {
    MalformedDefinition { equation_text: String },
    DefinitionParseError(ParseError),
}

/// Display trait implementation for LoadError.
impl Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedDefinition { equation_text } => {
                return write!(
                    f,
                    "Malformed definition {:?}: expected exactly one '='.",
                    equation_text
                );
            }

            Self::DefinitionParseError(parse_error) => {
                return write!(f, "Definition parse error: {}", parse_error);
            }
        }
    }
}

impl From<ParseError> for LoadError {
    fn from(value: ParseError) -> Self {
        return Self::DefinitionParseError(value);
    }
}

/// Loads a definitions block into `scope`. Equations whose trimmed text is
/// empty (e.g. after a trailing semicolon) are skipped; an equation that
/// does not split into exactly one `=` aborts the load. Each stored term is
/// simplified with the given step budget.
pub fn load_definitions(
    block: &str,
    scope: &mut Scope,
    max_steps: usize,
) -> Result<(), LoadError> {
    let stripped = COMMENT_REGEX.replace_all(block, "");

    for equation in stripped.split(';') {
        let trimmed = equation.trim();

        if trimmed.is_empty() {
            continue;
        }

        let sides: Vec<&str> = trimmed.split('=').collect();

        if sides.len() != 2 {
            return Err(LoadError::MalformedDefinition {
                equation_text: String::from(trimmed),
            });
        }

        let def_name = sides[0].trim();
        let def_body = parse_expression(sides[1], scope)?;

        scope.insert(String::from(def_name), simplify(&def_body, max_steps));
    }

    return Ok(());
}

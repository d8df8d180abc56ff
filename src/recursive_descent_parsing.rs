//! Recursive descent parser that constructs lambda-calculus expressions from
//! a vector of tokens, resolving free identifiers against a lexical scope.

use std::fmt::Display;

use crate::expression_ast::{Expr, Scope};
use crate::lexical_analysis::{run_lexical_analysis, Token, TokenClass};

/// Represents a parsing error. Parsing does not recover: the first error
/// aborts the current term.
#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    UnexpectedEndOfInput,
    ExpectedIdentifier {
        found_token_text: String,
        line_num: usize,
    },
    MissingClosingParenthesis {
        line_num: usize,
    },
    TrailingInput {
        found_token_text: String,
        line_num: usize,
    },
    UndefinedVariable {
        var_name: String,
        line_num: usize,
    },
}

/// Display trait implementation for ParseError.
impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedEndOfInput => {
                return write!(f, "Unexpected end of input.");
            }

            Self::ExpectedIdentifier {
                found_token_text,
                line_num,
            } => {
                return write!(
                    f,
                    "Expected an identifier at line {}, found {:?}.",
                    line_num, found_token_text
                );
            }

            Self::MissingClosingParenthesis { line_num } => {
                return write!(
                    f,
                    "Missing closing parenthesis for the group opened at line {}.",
                    line_num
                );
            }

            Self::TrailingInput {
                found_token_text,
                line_num,
            } => {
                return write!(
                    f,
                    "Trailing input after the top-level term at line {}, starting at {:?}.",
                    line_num, found_token_text
                );
            }

            Self::UndefinedVariable { var_name, line_num } => {
                return write!(
                    f,
                    "Reference to undefined variable {:?} at line {}.",
                    var_name, line_num
                );
            }
        }
    }
}

/// Tries to parse an expression that looks like `\[IDENTIFIER] [TERM]`. The
/// parameter shadows any same-named scope entry while the body is parsed;
/// the prior binding is restored on every exit path, including parse
/// failure.
fn try_lambda_rule(
    tokens: &[Token],
    start_idx: usize,
    scope: &mut Scope,
) -> Result<(Expr, usize), ParseError> {
    // Consume the lambda token itself.
    let start_idx = start_idx + 1;

    if start_idx >= tokens.len() {
        return Err(ParseError::UnexpectedEndOfInput);
    }

    if tokens[start_idx].token_class != TokenClass::Identifier {
        return Err(ParseError::ExpectedIdentifier {
            found_token_text: tokens[start_idx].token_text.clone(),
            line_num: tokens[start_idx].line_num,
        });
    }

    let param = tokens[start_idx].token_text.clone();
    let start_idx = start_idx + 1;

    // Shadow the parameter name for the duration of the body parse. The
    // binding maps the name to a plain Var, so occurrences in the body stay
    // references to the parameter rather than to an outer definition.
    let previous_binding = scope.insert(param.clone(), Expr::var(param.as_str()));

    let body_result = try_term_rule(tokens, start_idx, scope);

    // Restore the prior binding before propagating any parse error.
    match previous_binding {
        Some(previous_expr) => {
            scope.insert(param.clone(), previous_expr);
        }
        None => {
            scope.shift_remove(param.as_str());
        }
    };

    let (body, start_idx) = body_result?;

    return Ok((Expr::lambda(param.as_str(), body), start_idx));
}

/// Tries to parse an expression that looks like `([TERM])`.
fn try_parenthesized_rule(
    tokens: &[Token],
    start_idx: usize,
    scope: &mut Scope,
) -> Result<(Expr, usize), ParseError> {
    let open_paren_line = tokens[start_idx].line_num;

    let (inner_expr, start_idx) = try_term_rule(tokens, start_idx + 1, scope)?;

    if start_idx >= tokens.len() || tokens[start_idx].token_class != TokenClass::CloseParen {
        return Err(ParseError::MissingClosingParenthesis {
            line_num: open_paren_line,
        });
    }

    return Ok((inner_expr, start_idx + 1));
}

/// Tries to parse an expression that looks like `[IDENTIFIER]`, resolving
/// the name against the scope. Resolution clones the bound or defined term
/// into the output tree, so references are normalized to the term they name.
fn try_var_rule(
    tokens: &[Token],
    start_idx: usize,
    scope: &mut Scope,
) -> Result<(Expr, usize), ParseError> {
    let var_token = &tokens[start_idx];

    match scope.get(var_token.token_text.as_str()) {
        Some(resolved_expr) => {
            return Ok((resolved_expr.clone(), start_idx + 1));
        }
        None => {
            return Err(ParseError::UndefinedVariable {
                var_name: var_token.token_text.clone(),
                line_num: var_token.line_num,
            });
        }
    };
}

/// Tries to parse according to the production `atom -> VAR | (term) |
/// lambda`.
fn try_atom_rule(
    tokens: &[Token],
    start_idx: usize,
    scope: &mut Scope,
) -> Result<(Expr, usize), ParseError> {
    if start_idx >= tokens.len() {
        return Err(ParseError::UnexpectedEndOfInput);
    }

    match tokens[start_idx].token_class {
        TokenClass::Lambda => {
            return try_lambda_rule(tokens, start_idx, scope);
        }
        TokenClass::OpenParen => {
            return try_parenthesized_rule(tokens, start_idx, scope);
        }
        TokenClass::Identifier => {
            return try_var_rule(tokens, start_idx, scope);
        }
        _ => {
            return Err(ParseError::ExpectedIdentifier {
                found_token_text: tokens[start_idx].token_text.clone(),
                line_num: tokens[start_idx].line_num,
            });
        }
    };
}

/// Tries to parse according to the production `term -> atom+`, folding the
/// sequence of atoms into left-associative applications. The sequence ends
/// at a closing parenthesis or at the end of input, which is also what makes
/// a lambda's body extend to the end of the enclosing group.
fn try_term_rule(
    tokens: &[Token],
    start_idx: usize,
    scope: &mut Scope,
) -> Result<(Expr, usize), ParseError> {
    // Parse at least one atom.
    let (mut out_expr, mut start_idx) = try_atom_rule(tokens, start_idx, scope)?;

    // Keep parsing atoms while maintaining left associativity.
    while start_idx < tokens.len() && tokens[start_idx].token_class != TokenClass::CloseParen {
        let (next_atom, new_start_idx) = try_atom_rule(tokens, start_idx, scope)?;
        out_expr = Expr::apply(out_expr, next_atom);
        start_idx = new_start_idx;
    }

    return Ok((out_expr, start_idx));
}

/// Uses recursive descent to parse the given vector of tokens into a single
/// expression. Rejects trailing tokens after the top-level term, which is
/// also how an unmatched closing parenthesis at the top level surfaces.
///
/// Assumes that the input token vector has discarded whitespace (i.e. it was
/// produced via run_lexical_analysis with `discard_uninteresting = true`).
pub fn parse_tokens(tokens: &[Token], scope: &mut Scope) -> Result<Expr, ParseError> {
    let (expr, end_idx) = try_term_rule(tokens, 0, scope)?;

    if end_idx < tokens.len() {
        return Err(ParseError::TrailingInput {
            found_token_text: tokens[end_idx].token_text.clone(),
            line_num: tokens[end_idx].line_num,
        });
    }

    return Ok(expr);
}

/// Runs the lexer and the parser on a term string. Free identifiers resolve
/// against `scope`; the scope is left exactly as it was found, even when
/// parsing fails partway through a lambda body.
pub fn parse_expression(input_str: &str, scope: &mut Scope) -> Result<Expr, ParseError> {
    let tokens = run_lexical_analysis(input_str, true);
    return parse_tokens(&tokens, scope);
}

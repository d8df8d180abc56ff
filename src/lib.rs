//! This crate contains code for a small untyped lambda calculus workbench:
//! it parses a textual notation for lambda terms, binds named definitions,
//! normalizes terms by beta-reduction, and renders results back to text,
//! optionally folding known definitions back in for compact output.

pub mod definition_folding;
pub mod definition_loading;
pub mod end_to_end;
pub mod expression_ast;
pub mod lexical_analysis;
pub mod pretty_printing;
pub mod recursive_descent_parsing;
pub mod reduction;
pub mod structural_dict;

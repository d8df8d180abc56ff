//! Rewrites a term so that sub-terms alpha-equivalent to a named definition
//! become references to that name, for compact display of normalized output
//! (e.g. showing `3` instead of its full Church-numeral expansion). The
//! result is display-only; it is never fed back into reduction.

use crate::expression_ast::{Expr, Scope};
use crate::reduction::alpha_equal;
use crate::structural_dict::StructuralDict;

/// A cheap structural pre-filter for alpha-equivalence: every bound and free
/// variable hashes to the fixed marker `v`, so differently-named but
/// identically-shaped terms land in the same bucket. Alpha-inequivalent
/// terms may collide; the full `alpha_equal` check decides.
pub fn structural_hash(expr: &Expr) -> String {
    match expr {
        Expr::Var { .. } => {
            return String::from("v");
        }
        Expr::Apply { fun, arg } => {
            return format!("({} {})", structural_hash(fun), structural_hash(arg));
        }
        Expr::Lambda { body, .. } => {
            return format!("(λv {})", structural_hash(body));
        }
    };
}

// Replaces the expression with a reference to a matching definition's name,
// if the table holds one.
fn try_fold(expr: Expr, hash: &str, definition_table: &StructuralDict<Expr, String>) -> Expr {
    match definition_table.hint_get(&expr, hash) {
        Some(def_name) => {
            return Expr::var(def_name.as_str());
        }
        None => {
            return expr;
        }
    };
}

// Bottom-up pass computing, for each sub-term, its rewritten version and its
// structural hash. A matched child is substituted before its parent is
// checked, so the deepest match wins.
fn fold_helper(expr: &Expr, definition_table: &StructuralDict<Expr, String>) -> (Expr, String) {
    match expr {
        Expr::Var { name } => {
            return (Expr::var(name.as_str()), String::from("v"));
        }

        Expr::Apply { fun, arg } => {
            let (fun_rewritten, fun_hash) = fold_helper(fun, definition_table);
            let (arg_rewritten, arg_hash) = fold_helper(arg, definition_table);

            let combined = Expr::apply(
                try_fold(fun_rewritten, fun_hash.as_str(), definition_table),
                try_fold(arg_rewritten, arg_hash.as_str(), definition_table),
            );

            return (combined, format!("({} {})", fun_hash, arg_hash));
        }

        Expr::Lambda { param, body } => {
            let (body_rewritten, body_hash) = fold_helper(body, definition_table);

            let combined = Expr::lambda(
                param.as_str(),
                try_fold(body_rewritten, body_hash.as_str(), definition_table),
            );

            return (combined, format!("(λv {})", body_hash));
        }
    };
}

/// Folds known definitions back into a term: every sub-term alpha-equivalent
/// to some definition body in `definitions` is replaced by a `Var` carrying
/// that definition's name. When several definitions have alpha-equivalent
/// bodies, the one inserted latest into the scope wins.
pub fn fold_definitions(expr: &Expr, definitions: &Scope) -> Expr {
    let mut definition_table: StructuralDict<Expr, String> =
        StructuralDict::new(structural_hash, alpha_equal);

    for (def_name, def_expr) in definitions {
        definition_table.set(def_expr.clone(), Some(def_name.clone()));
    }

    let (rewritten, hash) = fold_helper(expr, &definition_table);

    return try_fold(rewritten, hash.as_str(), &definition_table);
}

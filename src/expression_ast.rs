//! Data structures to represent lambda calculus expressions, and some utility
//! functions to display and manipulate them.

use std::collections::HashSet;

use indexmap::IndexMap;

/// A mapping from identifier name to the expression it stands for. Used by
/// the parser to resolve free identifiers and by the definition loader as the
/// running definition table. Insertion order is meaningful: it drives the
/// order of batch-load output and the overwrite order when seeding the
/// definition-folding table.
pub type Scope = IndexMap<String, Expr>;

/// Represents a lambda-calculus expression. These three variants are the
/// whole language; every traversal in this crate matches on exactly them.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Expr {
    Var {
        name: String,
    },
    Apply {
        fun: Box<Expr>,
        arg: Box<Expr>,
    },
    Lambda {
        param: String,
        body: Box<Expr>,
    },
}

impl Expr {
    pub fn var(name: &str) -> Expr {
        return Expr::Var {
            name: String::from(name),
        };
    }

    pub fn apply(fun: Expr, arg: Expr) -> Expr {
        return Expr::Apply {
            fun: Box::new(fun),
            arg: Box::new(arg),
        };
    }

    pub fn lambda(param: &str, body: Expr) -> Expr {
        return Expr::Lambda {
            param: String::from(param),
            body: Box::new(body),
        };
    }
}

// Helper function to produce the canonical string form of an expression.
fn expr_to_string_helper(expr: &Expr, string_so_far: &mut String) {
    match expr {
        Expr::Var { name } => {
            string_so_far.push_str(name.as_str());
        }
        Expr::Apply { fun, arg } => {
            string_so_far.push('(');
            expr_to_string_helper(fun, string_so_far);
            string_so_far.push(' ');
            expr_to_string_helper(arg, string_so_far);
            string_so_far.push(')');
        }
        Expr::Lambda { param, body } => {
            string_so_far.push_str(format!("(λ{} ", param.as_str()).as_str());
            expr_to_string_helper(body, string_so_far);
            string_so_far.push(')');
        }
    };
}

/// Display trait implementation for Expr. This is the canonical printer:
/// fully parenthesized, one pair of parentheses per application and per
/// lambda, so the output is unambiguous and re-parseable.
impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut out_string = String::new();
        expr_to_string_helper(self, &mut out_string);
        return write!(f, "{}", out_string.as_str());
    }
}

/// Computes the free variables in the given lambda calculus expression.
pub fn free_variables(expr: &Expr) -> HashSet<&str> {
    match expr {
        Expr::Var { name } => {
            return HashSet::from([name.as_ref()]);
        }
        Expr::Apply { fun, arg } => {
            let fun_free_vars = free_variables(fun);
            let arg_free_vars = free_variables(arg);

            return fun_free_vars.union(&arg_free_vars).copied().collect();
        }
        Expr::Lambda { param, body } => {
            let mut body_free_vars = free_variables(body);
            body_free_vars.remove(param.as_str());
            return body_free_vars;
        }
    };
}

/// Finds all variables used in the given lambda calculus expression, bound
/// or free.
pub fn all_variables(expr: &Expr) -> HashSet<&str> {
    match expr {
        Expr::Var { name } => {
            return HashSet::from([name.as_ref()]);
        }
        Expr::Apply { fun, arg } => {
            let fun_vars = all_variables(fun);
            let arg_vars = all_variables(arg);

            return fun_vars.union(&arg_vars).copied().collect();
        }
        Expr::Lambda { param, body } => {
            let mut body_vars = all_variables(body);
            body_vars.insert(param.as_str());
            return body_vars;
        }
    };
}

/// Renames free occurrences of a variable in the given expression (used in
/// reduction.rs for alpha renaming before a substitution that would
/// otherwise capture).
pub fn rename_variable(old_var_name: &str, new_var_name: &str, expr_to_rename: &mut Expr) {
    match expr_to_rename {
        Expr::Var { name } => {
            if name.as_str() == old_var_name {
                *name = String::from(new_var_name);
            }
        }
        Expr::Apply { fun, arg } => {
            rename_variable(old_var_name, new_var_name, fun);
            rename_variable(old_var_name, new_var_name, arg);
        }
        Expr::Lambda { param, body } => {
            if param.as_str() != old_var_name {
                rename_variable(old_var_name, new_var_name, body);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test the canonical printer on a Church-numeral-style expression.
    #[test]
    fn test_expr_to_string() {
        let expected_output = r"(λf (λn (f ((a f) n))))";

        let test_input = Expr::lambda(
            "f",
            Expr::lambda(
                "n",
                Expr::apply(
                    Expr::var("f"),
                    Expr::apply(Expr::apply(Expr::var("a"), Expr::var("f")), Expr::var("n")),
                ),
            ),
        );

        assert_eq!(expected_output, format!("{}", test_input).as_str());
    }

    // Test that free_variables excludes bound parameters.
    #[test]
    fn test_free_variables() {
        let test_input = Expr::lambda("x", Expr::apply(Expr::var("x"), Expr::var("y")));

        let free_vars = free_variables(&test_input);

        assert_eq!(free_vars, HashSet::from(["y"]));
    }

    // Test that all_variables includes bound parameters.
    #[test]
    fn test_all_variables() {
        let test_input = Expr::lambda("x", Expr::apply(Expr::var("x"), Expr::var("y")));

        let all_vars = all_variables(&test_input);

        assert_eq!(all_vars, HashSet::from(["x", "y"]));
    }

    // Test that rename_variable leaves shadowed occurrences alone.
    #[test]
    fn test_rename_variable_respects_shadowing() {
        let mut test_input = Expr::apply(
            Expr::var("x"),
            Expr::lambda("x", Expr::var("x")),
        );

        rename_variable("x", "z", &mut test_input);

        let expected_output = Expr::apply(
            Expr::var("z"),
            Expr::lambda("x", Expr::var("x")),
        );

        assert_eq!(test_input, expected_output);
    }
}

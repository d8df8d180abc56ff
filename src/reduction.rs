//! Substitution, alpha-equivalence, and beta-reduction of lambda-calculus
//! expressions. All operations build new trees; nothing is mutated in place.

use std::collections::HashSet;

use crate::expression_ast::{all_variables, free_variables, rename_variable, Expr};

/// Default cap on reduction sweeps before `simplify` gives up. Callers that
/// want a different budget pass their own value.
pub const DEFAULT_MAX_STEPS: usize = 500;

// Picks a replacement parameter name that collides with none of: a variable
// already used in the lambda body, a free variable of the value being
// substituted in, or the name being substituted for. Landing on the latter
// would hand the renamed bound occurrences to the substitution itself.
fn choose_fresh_param(
    param: &str,
    var_name: &str,
    body: &Expr,
    replacement_free_vars: &HashSet<&str>,
) -> String {
    let body_vars = all_variables(body);
    let mut vars_to_avoid: HashSet<&str> =
        body_vars.union(replacement_free_vars).copied().collect();
    vars_to_avoid.insert(var_name);

    let mut fresh_param = String::from(param);

    while vars_to_avoid.contains(fresh_param.as_str()) {
        fresh_param = fresh_param + "'";
    }

    return fresh_param;
}

fn substitute_helper(
    expr: &Expr,
    var_name: &str,
    replacement: &Expr,
    replacement_free_vars: &HashSet<&str>,
) -> Expr {
    match expr {
        Expr::Var { name } => {
            if name.as_str() == var_name {
                return replacement.clone();
            }
            return expr.clone();
        }

        Expr::Apply { fun, arg } => {
            return Expr::apply(
                substitute_helper(fun, var_name, replacement, replacement_free_vars),
                substitute_helper(arg, var_name, replacement, replacement_free_vars),
            );
        }

        Expr::Lambda { param, body } => {
            // The parameter rebinds the name locally, so free occurrences of
            // var_name cannot exist in the body.
            if param.as_str() == var_name {
                return expr.clone();
            }

            // The replacement has a free variable with the parameter's name.
            // Substituting as-is would capture it, so rename the parameter
            // to a fresh name first.
            if replacement_free_vars.contains(param.as_str()) {
                let fresh_param =
                    choose_fresh_param(param.as_str(), var_name, body, replacement_free_vars);

                let mut renamed_body = (**body).clone();
                rename_variable(param.as_str(), fresh_param.as_str(), &mut renamed_body);

                let substituted_body = substitute_helper(
                    &renamed_body,
                    var_name,
                    replacement,
                    replacement_free_vars,
                );

                return Expr::lambda(fresh_param.as_str(), substituted_body);
            }

            return Expr::lambda(
                param.as_str(),
                substitute_helper(body, var_name, replacement, replacement_free_vars),
            );
        }
    };
}

/// Returns a new expression equal to `expr` with every free occurrence of
/// `var_name` replaced by `replacement`. Substitution is capture-avoiding:
/// a binder in `expr` whose parameter is free in `replacement` is renamed
/// to a fresh name before the substitution descends into its body.
pub fn substitute(expr: &Expr, var_name: &str, replacement: &Expr) -> Expr {
    let replacement_free_vars = free_variables(replacement);
    return substitute_helper(expr, var_name, replacement, &replacement_free_vars);
}

/// Tests two expressions for a restricted form of alpha-equivalence. Vars
/// compare by name, applications recursively; for two lambdas, `b`'s body is
/// rewritten with `b`'s parameter substituted by `a`'s parameter and then
/// compared against `a`'s body. The rewrite makes the check asymmetric when
/// `a`'s parameter occurs free in `b`'s body: `alpha_equal(λy y, λx y)`
/// holds while the reverse does not.
pub fn alpha_equal(a: &Expr, b: &Expr) -> bool {
    match (a, b) {
        (Expr::Var { name: a_name }, Expr::Var { name: b_name }) => {
            return a_name == b_name;
        }

        (
            Expr::Apply {
                fun: a_fun,
                arg: a_arg,
            },
            Expr::Apply {
                fun: b_fun,
                arg: b_arg,
            },
        ) => {
            return alpha_equal(a_fun, b_fun) && alpha_equal(a_arg, b_arg);
        }

        (
            Expr::Lambda {
                param: a_param,
                body: a_body,
            },
            Expr::Lambda {
                param: b_param,
                body: b_body,
            },
        ) => {
            let rewritten_b_body =
                substitute(b_body, b_param.as_str(), &Expr::var(a_param.as_str()));
            return alpha_equal(a_body, &rewritten_b_body);
        }

        _ => {
            return false;
        }
    };
}

/// Performs one normal-order reduction sweep: an application whose function
/// is a lambda rewrites to the lambda's body with the parameter substituted
/// by the argument; any other node recurses into its children (function
/// first, then argument) looking for redexes.
pub fn simplify_once(expr: &Expr) -> Expr {
    match expr {
        Expr::Var { .. } => {
            return expr.clone();
        }

        Expr::Apply { fun, arg } => {
            if let Expr::Lambda { param, body } = &**fun {
                return substitute(body, param.as_str(), arg);
            }

            return Expr::apply(simplify_once(fun), simplify_once(arg));
        }

        Expr::Lambda { param, body } => {
            return Expr::lambda(param.as_str(), simplify_once(body));
        }
    };
}

/// Repeatedly applies `simplify_once` until a fixed point is reached (the
/// next sweep produces an alpha-equal term) or `max_steps` sweeps have run.
/// On cap exhaustion, prints a notice to stderr and returns the original
/// input term, not the partially reduced one.
pub fn simplify(expr: &Expr, max_steps: usize) -> Expr {
    let mut current = expr.clone();

    for _ in 0..max_steps {
        let next = simplify_once(&current);

        if alpha_equal(&current, &next) {
            return next;
        }

        current = next;
    }

    eprintln!(
        "Unable to simplify within {} reduction sweeps; returning the term unreduced.",
        max_steps
    );
    return expr.clone();
}

#[cfg(test)]
mod tests {
    use super::*;

    // Builds the self-application (\x x x x) (\x x x x), which grows without
    // bound under reduction.
    fn growing_self_application() -> Expr {
        let triple = Expr::lambda(
            "x",
            Expr::apply(
                Expr::apply(Expr::var("x"), Expr::var("x")),
                Expr::var("x"),
            ),
        );

        return Expr::apply(triple.clone(), triple);
    }

    // Test basic substitution of a free variable.
    #[test]
    fn test_substitute_free_variable() {
        let test_input = Expr::apply(Expr::var("f"), Expr::var("x"));

        let generated_output = substitute(&test_input, "x", &Expr::var("y"));

        let expected_output = Expr::apply(Expr::var("f"), Expr::var("y"));

        assert_eq!(generated_output, expected_output);
    }

    // Test that a binder with the substituted name blocks substitution in
    // its body.
    #[test]
    fn test_substitute_blocked_by_binder() {
        let test_input = Expr::lambda("x", Expr::var("x"));

        let generated_output = substitute(&test_input, "x", &Expr::var("y"));

        assert_eq!(generated_output, test_input);
    }

    // Test that substitution renames a binder that would capture a free
    // variable of the replacement.
    #[test]
    fn test_substitute_avoids_capture() {
        // Substituting y for x in \y (x y) must not let the binder capture
        // the incoming y.
        let test_input = Expr::lambda("y", Expr::apply(Expr::var("x"), Expr::var("y")));

        let generated_output = substitute(&test_input, "x", &Expr::var("y"));

        let expected_output = Expr::lambda("y'", Expr::apply(Expr::var("y"), Expr::var("y'")));

        assert_eq!(generated_output, expected_output);
    }

    // Test that the fresh binder name also steers clear of the variable
    // being substituted for: landing on it would free the renamed bound
    // occurrences.
    #[test]
    fn test_substitute_fresh_name_skips_substituted_variable() {
        // Substituting a for a' in \a (a z): the binder must be renamed
        // away from both a (free in the replacement) and a' (the name being
        // replaced), so the first usable name is a''.
        let test_input = Expr::lambda("a", Expr::apply(Expr::var("a"), Expr::var("z")));

        let generated_output = substitute(&test_input, "a'", &Expr::var("a"));

        let expected_output =
            Expr::lambda("a''", Expr::apply(Expr::var("a''"), Expr::var("z")));

        assert_eq!(generated_output, expected_output);

        // The input has no free a', so the substitution must be a no-op up
        // to renaming.
        assert!(alpha_equal(&generated_output, &test_input));
    }

    // Test alpha-equivalence of identically-shaped lambdas with different
    // parameter names.
    #[test]
    fn test_alpha_equal_renamed_parameter() {
        let a = Expr::lambda("x", Expr::var("x"));
        let b = Expr::lambda("y", Expr::var("y"));

        assert!(alpha_equal(&a, &b));
    }

    // Test that a lambda over a free variable is not alpha-equal to the
    // identity.
    #[test]
    fn test_alpha_not_equal_free_body() {
        let a = Expr::lambda("x", Expr::var("x"));
        let b = Expr::lambda("x", Expr::var("y"));

        assert!(!alpha_equal(&a, &b));
    }

    // Test alpha-equivalence where the naive rewrite would capture: \x \y x
    // versus \y \x y.
    #[test]
    fn test_alpha_equal_crossed_parameter_names() {
        let a = Expr::lambda("x", Expr::lambda("y", Expr::var("x")));
        let b = Expr::lambda("y", Expr::lambda("x", Expr::var("y")));

        assert!(alpha_equal(&a, &b));
        assert!(alpha_equal(&b, &a));
    }

    // Test the restricted check's documented asymmetry: rewriting b's
    // parameter to a's parameter can collide with a free variable of b's
    // body.
    #[test]
    fn test_alpha_equal_asymmetric_on_free_collision() {
        let a = Expr::lambda("y", Expr::var("y"));
        let b = Expr::lambda("x", Expr::var("y"));

        assert!(alpha_equal(&a, &b));
        assert!(!alpha_equal(&b, &a));
    }

    // Test a single beta-reduction step on a redex.
    #[test]
    fn test_simplify_once_redex() {
        let test_input = Expr::apply(
            Expr::lambda("x", Expr::apply(Expr::var("x"), Expr::var("x"))),
            Expr::var("a"),
        );

        let generated_output = simplify_once(&test_input);

        let expected_output = Expr::apply(Expr::var("a"), Expr::var("a"));

        assert_eq!(generated_output, expected_output);
    }

    // Test that the outermost redex wins, so an argument that would reduce
    // forever is discarded untouched.
    #[test]
    fn test_simplify_normal_order_discards_diverging_argument() {
        let test_input = Expr::apply(
            Expr::lambda("a", Expr::var("b")),
            growing_self_application(),
        );

        let generated_output = simplify(&test_input, 10);

        assert_eq!(generated_output, Expr::var("b"));
    }

    // Test that a reached normal form is a fixed point of simplify_once.
    #[test]
    fn test_normal_form_is_fixed_point() {
        let test_input = Expr::apply(
            Expr::lambda("x", Expr::var("x")),
            Expr::lambda("y", Expr::var("y")),
        );

        let normal_form = simplify(&test_input, DEFAULT_MAX_STEPS);

        assert!(alpha_equal(&normal_form, &simplify_once(&normal_form)));
        assert!(alpha_equal(
            &normal_form,
            &Expr::lambda("y", Expr::var("y"))
        ));
    }

    // Test that exhausting the step cap returns the original term, with no
    // partial progress.
    #[test]
    fn test_simplify_cap_returns_original() {
        let test_input = growing_self_application();

        let generated_output = simplify(&test_input, 5);

        assert_eq!(generated_output, test_input);
    }
}

//! Display-oriented printer that drops the parentheses the canonical form
//! insists on and decorates the remaining groups with rotating bracket
//! glyphs, purely as a visual aid for nesting depth. Output is not meant to
//! round-trip through the parser.

use crate::expression_ast::Expr;

const OPEN_BRACKETS: [char; 4] = ['(', '[', '{', '<'];
const CLOSE_BRACKETS: [char; 4] = [')', ']', '}', '>'];

fn wrap_in_next_bracket(inner: String, bracket_idx: &mut usize) -> String {
    let wrapped = format!(
        "{}{}{}",
        OPEN_BRACKETS[*bracket_idx], inner, CLOSE_BRACKETS[*bracket_idx]
    );
    *bracket_idx = (*bracket_idx + 1) % OPEN_BRACKETS.len();
    return wrapped;
}

fn pretty_print_helper(expr: &Expr, bracket_idx: &mut usize) -> String {
    match expr {
        Expr::Var { name } => {
            return name.clone();
        }

        Expr::Apply { fun, arg } => {
            // An applied lambda needs a group to keep its body from
            // swallowing the argument.
            let mut fun_str = pretty_print_helper(fun, bracket_idx);
            if matches!(&**fun, Expr::Lambda { .. }) {
                fun_str = wrap_in_next_bracket(fun_str, bracket_idx);
            }

            // A bare variable argument needs no group; anything else does.
            let mut arg_str = pretty_print_helper(arg, bracket_idx);
            if !matches!(&**arg, Expr::Var { .. }) {
                arg_str = wrap_in_next_bracket(arg_str, bracket_idx);
            }

            return format!("{} {}", fun_str, arg_str);
        }

        Expr::Lambda { param, body } => {
            return format!("λ{} {}", param, pretty_print_helper(body, bracket_idx));
        }
    };
}

/// Pretty-prints an expression with elided parentheses and bracket glyphs
/// cycling through `( [ { <` in visiting order.
pub fn pretty_print(expr: &Expr) -> String {
    let mut bracket_idx = 0;
    return pretty_print_helper(expr, &mut bracket_idx);
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test that a variable argument is printed without a group.
    #[test]
    fn test_variable_argument_unwrapped() {
        let test_input = Expr::lambda(
            "f",
            Expr::lambda("n", Expr::apply(Expr::var("f"), Expr::var("n"))),
        );

        assert_eq!(pretty_print(&test_input), "λf λn f n");
    }

    // Test that nested non-variable arguments rotate through the bracket
    // styles in visiting order.
    #[test]
    fn test_bracket_rotation() {
        // The Church numeral 4 body: f (f (f (f n))).
        let mut body = Expr::apply(Expr::var("f"), Expr::var("n"));
        for _ in 0..3 {
            body = Expr::apply(Expr::var("f"), body);
        }

        let test_input = Expr::lambda("f", Expr::lambda("n", body));

        assert_eq!(pretty_print(&test_input), "λf λn f {f [f (f n)]}");
    }

    // Test that an applied lambda is wrapped while a lambda argument is
    // wrapped independently.
    #[test]
    fn test_applied_lambda_wrapped() {
        let identity = Expr::lambda("x", Expr::var("x"));
        let test_input = Expr::apply(identity.clone(), identity);

        assert_eq!(pretty_print(&test_input), "(λx x) [λx x]");
    }
}

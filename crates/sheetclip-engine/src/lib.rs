//! sheetclip_engine - sandboxed expression language.
//!
//! A small, fixed-grammar interpreter for the expressions a sheet test pass
//! evaluates: arithmetic, comparisons, boolean logic, string literals and
//! concatenation, plus a case-insensitive builtin function set (ABS, MIN,
//! MAX, ROUND, FLOOR, CEIL, SQRT, POW, LEN, UPPER, LOWER, TRIM, IF, CONCAT).
//!
//! There are no variables, no cell references, and no way to reach the host:
//! evaluation is pure and deterministic.

pub mod ast;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod value;

pub use error::{EvalError, EvalResult};
pub use eval::{eval_expression, evaluate};
pub use parser::parse;
pub use value::Value;

#[cfg(test)]
mod tests {
    use crate::error::EvalError;
    use crate::eval::eval_expression;

    fn eval(input: &str) -> String {
        eval_expression(input).unwrap()
    }

    fn eval_err(input: &str) -> EvalError {
        eval_expression(input).unwrap_err()
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval("2+2"), "4");
        assert_eq!(eval("2 + 3 * 4"), "14");
        assert_eq!(eval("(2 + 3) * 4"), "20");
        assert_eq!(eval("10 - 2 - 3"), "5");
        assert_eq!(eval("7 / 2"), "3.5");
        assert_eq!(eval("7 % 3"), "1");
        assert_eq!(eval("2 ^ 10"), "1024");
        assert_eq!(eval("2 ^ 3 ^ 2"), "512");
    }

    #[test]
    fn test_unary() {
        assert_eq!(eval("-5"), "-5");
        assert_eq!(eval("--5"), "5");
        assert_eq!(eval("+5"), "5");
        assert_eq!(eval("-(2 + 3)"), "-5");
        assert_eq!(eval("!true"), "FALSE");
        assert_eq!(eval("!!false"), "FALSE");
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(eval_err("1/0"), EvalError::DivideByZero);
        assert_eq!(eval_err("5 % 0"), EvalError::ModuloByZero);
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(eval("1 < 2"), "TRUE");
        assert_eq!(eval("2 <= 2"), "TRUE");
        assert_eq!(eval("3 > 4"), "FALSE");
        assert_eq!(eval("3 >= 4"), "FALSE");
        assert_eq!(eval("1 + 1 == 2"), "TRUE");
        assert_eq!(eval("1 + 1 = 2"), "TRUE");
        assert_eq!(eval("1 != 2"), "TRUE");
        assert_eq!(eval("1 <> 1"), "FALSE");
        assert_eq!(eval("\"abc\" < \"abd\""), "TRUE");
        assert_eq!(eval("\"a\" == \"a\""), "TRUE");
    }

    #[test]
    fn test_boolean_logic() {
        assert_eq!(eval("true && false"), "FALSE");
        assert_eq!(eval("true || false"), "TRUE");
        assert_eq!(eval("1 < 2 && 2 < 3"), "TRUE");
    }

    #[test]
    fn test_logic_short_circuits() {
        // The right side would divide by zero if evaluated.
        assert_eq!(eval("false && 1/0 == 1"), "FALSE");
        assert_eq!(eval("true || 1/0 == 1"), "TRUE");
    }

    #[test]
    fn test_strings() {
        assert_eq!(eval("\"hello\""), "hello");
        assert_eq!(eval("\"say \"\"hi\"\"\""), "say \"hi\"");
        assert_eq!(eval("\"foo\" & \"bar\""), "foobar");
        assert_eq!(eval("\"n=\" & 42"), "n=42");
    }

    #[test]
    fn test_type_errors() {
        assert!(matches!(eval_err("1 + \"a\""), EvalError::Type(_)));
        assert!(matches!(eval_err("\"a\" && true"), EvalError::Type(_)));
        assert!(matches!(eval_err("1 == \"1\""), EvalError::Type(_)));
        assert!(matches!(eval_err("true < false"), EvalError::Type(_)));
    }

    #[test]
    fn test_builtin_functions() {
        assert_eq!(eval("ABS(-3)"), "3");
        assert_eq!(eval("abs(-3)"), "3");
        assert_eq!(eval("MIN(3, 1, 2)"), "1");
        assert_eq!(eval("MAX(3, 1, 2)"), "3");
        assert_eq!(eval("ROUND(2.4)"), "2");
        assert_eq!(eval("ROUND(2.348, 2)"), "2.35");
        assert_eq!(eval("FLOOR(2.9)"), "2");
        assert_eq!(eval("CEIL(2.1)"), "3");
        assert_eq!(eval("SQRT(16)"), "4");
        assert_eq!(eval("POW(2, 10)"), "1024");
        assert_eq!(eval("LEN(\"hello\")"), "5");
        assert_eq!(eval("UPPER(\"abc\")"), "ABC");
        assert_eq!(eval("LOWER(\"ABC\")"), "abc");
        assert_eq!(eval("TRIM(\"  x  \")"), "x");
        assert_eq!(eval("CONCAT(\"a\", 1, true)"), "a1TRUE");
    }

    #[test]
    fn test_if_is_lazy() {
        assert_eq!(eval("IF(true, 1, 1/0)"), "1");
        assert_eq!(eval("IF(false, 1/0, 2)"), "2");
        assert_eq!(eval("IF(1 < 2, \"yes\", \"no\")"), "yes");
    }

    #[test]
    fn test_unknown_function() {
        assert!(matches!(
            eval_err("nope(1)"),
            EvalError::UnknownFunction(ref name) if name == "nope"
        ));
    }

    #[test]
    fn test_argument_count_errors() {
        assert!(matches!(eval_err("ABS()"), EvalError::ArgumentCount { .. }));
        assert!(matches!(
            eval_err("ABS(1, 2)"),
            EvalError::ArgumentCount { .. }
        ));
        assert!(matches!(eval_err("MIN()"), EvalError::ArgumentCount { .. }));
        assert!(matches!(
            eval_err("IF(true, 1)"),
            EvalError::ArgumentCount { .. }
        ));
    }

    #[test]
    fn test_non_finite_is_an_error() {
        assert_eq!(eval_err("SQRT(-1)"), EvalError::NonFinite);
        assert_eq!(eval_err("10 ^ 400"), EvalError::NonFinite);
    }

    #[test]
    fn test_determinism() {
        let a = eval_expression("ROUND(SQRT(2), 2) * 100");
        let b = eval_expression("ROUND(SQRT(2), 2) * 100");
        assert_eq!(a, b);
    }

    #[test]
    fn test_error_messages_are_human_readable() {
        assert_eq!(eval_err("1/0").to_string(), "division by zero");
        assert!(eval_err("1 +").to_string().starts_with("syntax error"));
        assert_eq!(
            eval_err("nope(1)").to_string(),
            "unknown function: nope"
        );
    }
}

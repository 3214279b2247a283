//! AST evaluation.
//!
//! Evaluation is pure: no I/O, no host state, and the same expression always
//! produces the same outcome. Expressions originate from a shared spreadsheet,
//! so the engine deliberately exposes nothing beyond the fixed grammar and the
//! builtin function set below.

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::{EvalError, EvalResult};
use crate::parser::parse;
use crate::value::Value;

/// Evaluate an expression string and return the canonical text rendering of
/// its result.
///
/// This is the entry point the test harness uses: `Ok` carries the actual
/// value as text, `Err` carries a human-readable failure reason. Callers are
/// expected to skip empty/whitespace-only cells before calling.
pub fn eval_expression(input: &str) -> EvalResult<String> {
    let expr = parse(input)?;
    Ok(evaluate(&expr)?.render())
}

/// Evaluate a parsed expression to a value.
pub fn evaluate(expr: &Expr) -> EvalResult<Value> {
    match expr {
        Expr::Number(n) => Ok(Value::Number(*n)),
        Expr::Str(s) => Ok(Value::Text(s.clone())),
        Expr::Bool(b) => Ok(Value::Bool(*b)),

        Expr::Unary { op, operand } => {
            let value = evaluate(operand)?;
            match op {
                UnaryOp::Negate => Ok(Value::Number(-value.to_number()?)),
                UnaryOp::Not => Ok(Value::Bool(!value.to_bool()?)),
            }
        }

        Expr::Binary { op, left, right } => eval_binary(*op, left, right),

        Expr::Call { name, args } => eval_call(name, args),
    }
}

fn eval_binary(op: BinaryOp, left: &Expr, right: &Expr) -> EvalResult<Value> {
    // Logic operators short-circuit; everything else evaluates both sides.
    match op {
        BinaryOp::And => {
            if !evaluate(left)?.to_bool()? {
                return Ok(Value::Bool(false));
            }
            return Ok(Value::Bool(evaluate(right)?.to_bool()?));
        }
        BinaryOp::Or => {
            if evaluate(left)?.to_bool()? {
                return Ok(Value::Bool(true));
            }
            return Ok(Value::Bool(evaluate(right)?.to_bool()?));
        }
        _ => {}
    }

    let lhs = evaluate(left)?;
    let rhs = evaluate(right)?;

    match op {
        BinaryOp::Add => numeric(lhs.to_number()? + rhs.to_number()?),
        BinaryOp::Subtract => numeric(lhs.to_number()? - rhs.to_number()?),
        BinaryOp::Multiply => numeric(lhs.to_number()? * rhs.to_number()?),
        BinaryOp::Divide => {
            let divisor = rhs.to_number()?;
            if divisor == 0.0 {
                return Err(EvalError::DivideByZero);
            }
            numeric(lhs.to_number()? / divisor)
        }
        BinaryOp::Modulo => {
            let divisor = rhs.to_number()?;
            if divisor == 0.0 {
                return Err(EvalError::ModuloByZero);
            }
            numeric(lhs.to_number()? % divisor)
        }
        BinaryOp::Power => numeric(lhs.to_number()?.powf(rhs.to_number()?)),

        BinaryOp::Equal => Ok(Value::Bool(values_equal(&lhs, &rhs)?)),
        BinaryOp::NotEqual => Ok(Value::Bool(!values_equal(&lhs, &rhs)?)),
        BinaryOp::Less => compare(&lhs, &rhs, |o| o == std::cmp::Ordering::Less),
        BinaryOp::LessEq => compare(&lhs, &rhs, |o| o != std::cmp::Ordering::Greater),
        BinaryOp::Greater => compare(&lhs, &rhs, |o| o == std::cmp::Ordering::Greater),
        BinaryOp::GreaterEq => compare(&lhs, &rhs, |o| o != std::cmp::Ordering::Less),

        BinaryOp::Concat => Ok(Value::Text(format!("{}{}", lhs.to_text(), rhs.to_text()))),

        BinaryOp::And | BinaryOp::Or => unreachable!("handled above"),
    }
}

/// Equality is defined within a type; comparing across types is a type error
/// rather than silently false.
fn values_equal(lhs: &Value, rhs: &Value) -> EvalResult<bool> {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => Ok(a == b),
        (Value::Text(a), Value::Text(b)) => Ok(a == b),
        (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
        _ => Err(EvalError::Type(format!(
            "cannot compare {} with {}",
            lhs.kind(),
            rhs.kind()
        ))),
    }
}

fn compare(
    lhs: &Value,
    rhs: &Value,
    accept: fn(std::cmp::Ordering) -> bool,
) -> EvalResult<Value> {
    let ordering = match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b).ok_or(EvalError::NonFinite)?,
        (Value::Text(a), Value::Text(b)) => a.cmp(b),
        _ => {
            return Err(EvalError::Type(format!(
                "cannot order {} against {}",
                lhs.kind(),
                rhs.kind()
            )));
        }
    };
    Ok(Value::Bool(accept(ordering)))
}

/// Wrap a numeric result, rejecting NaN/infinity so a canonical text form
/// always exists.
fn numeric(n: f64) -> EvalResult<Value> {
    if n.is_finite() {
        Ok(Value::Number(n))
    } else {
        Err(EvalError::NonFinite)
    }
}

fn eval_call(name: &str, args: &[Expr]) -> EvalResult<Value> {
    let upper = name.to_ascii_uppercase();

    // IF evaluates lazily so the untaken branch cannot fail the row.
    if upper == "IF" {
        expect_args(&upper, "3", args.len() == 3, args.len())?;
        let condition = evaluate(&args[0])?.to_bool()?;
        return evaluate(if condition { &args[1] } else { &args[2] });
    }

    let values: Vec<Value> = args.iter().map(evaluate).collect::<EvalResult<_>>()?;

    match upper.as_str() {
        "ABS" => {
            expect_args(&upper, "1", values.len() == 1, values.len())?;
            numeric(values[0].to_number()?.abs())
        }
        "SQRT" => {
            expect_args(&upper, "1", values.len() == 1, values.len())?;
            numeric(values[0].to_number()?.sqrt())
        }
        "POW" => {
            expect_args(&upper, "2", values.len() == 2, values.len())?;
            numeric(values[0].to_number()?.powf(values[1].to_number()?))
        }
        "ROUND" => {
            expect_args(&upper, "1 or 2", (1..=2).contains(&values.len()), values.len())?;
            let n = values[0].to_number()?;
            if values.len() == 2 {
                let digits = values[1].to_number()?;
                let factor = 10f64.powf(digits.trunc());
                numeric((n * factor).round() / factor)
            } else {
                numeric(n.round())
            }
        }
        "FLOOR" => {
            expect_args(&upper, "1", values.len() == 1, values.len())?;
            numeric(values[0].to_number()?.floor())
        }
        "CEIL" => {
            expect_args(&upper, "1", values.len() == 1, values.len())?;
            numeric(values[0].to_number()?.ceil())
        }
        "MIN" | "MAX" => {
            expect_args(&upper, "at least 1", !values.is_empty(), values.len())?;
            let mut best = values[0].to_number()?;
            for value in &values[1..] {
                let n = value.to_number()?;
                best = if upper == "MIN" {
                    best.min(n)
                } else {
                    best.max(n)
                };
            }
            numeric(best)
        }
        "LEN" => {
            expect_args(&upper, "1", values.len() == 1, values.len())?;
            numeric(values[0].to_text().chars().count() as f64)
        }
        "UPPER" => {
            expect_args(&upper, "1", values.len() == 1, values.len())?;
            Ok(Value::Text(values[0].to_text().to_uppercase()))
        }
        "LOWER" => {
            expect_args(&upper, "1", values.len() == 1, values.len())?;
            Ok(Value::Text(values[0].to_text().to_lowercase()))
        }
        "TRIM" => {
            expect_args(&upper, "1", values.len() == 1, values.len())?;
            Ok(Value::Text(values[0].to_text().trim().to_string()))
        }
        "CONCAT" => {
            let mut out = String::new();
            for value in &values {
                out.push_str(&value.to_text());
            }
            Ok(Value::Text(out))
        }
        _ => Err(EvalError::UnknownFunction(name.to_string())),
    }
}

fn expect_args(function: &str, expected: &str, ok: bool, actual: usize) -> EvalResult<()> {
    if ok {
        Ok(())
    } else {
        Err(EvalError::ArgumentCount {
            function: function.to_string(),
            expected: expected.to_string(),
            actual,
        })
    }
}

//! Runtime values and their canonical text rendering.

use crate::error::{EvalError, EvalResult};

/// A value produced while evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl Value {
    /// Coerce to a number for arithmetic. Only numbers qualify; anything else
    /// is a type error so a bad test expression fails loudly instead of
    /// silently comparing garbage.
    pub fn to_number(&self) -> EvalResult<f64> {
        match self {
            Value::Number(n) => Ok(*n),
            other => Err(EvalError::Type(format!(
                "expected a number, got {}",
                other.kind()
            ))),
        }
    }

    /// Coerce to a boolean for logic operators and IF conditions.
    pub fn to_bool(&self) -> EvalResult<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(EvalError::Type(format!(
                "expected a boolean, got {}",
                other.kind()
            ))),
        }
    }

    /// Coerce to text. Every value has a text form, so this cannot fail;
    /// it is what `&` concatenation and CONCAT use.
    pub fn to_text(&self) -> String {
        self.render()
    }

    /// Human-readable kind name for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Number(_) => "a number",
            Value::Text(_) => "text",
            Value::Bool(_) => "a boolean",
        }
    }

    /// Canonical rendering used for write-back and comparison.
    ///
    /// Numbers with no fractional part print without a decimal point so that
    /// `2+2` renders as "4". Booleans use spreadsheet-style TRUE/FALSE.
    pub fn render(&self) -> String {
        match self {
            Value::Number(n) => format_number(*n),
            Value::Text(s) => s.clone(),
            Value::Bool(true) => "TRUE".to_string(),
            Value::Bool(false) => "FALSE".to_string(),
        }
    }
}

/// Format a number for display.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

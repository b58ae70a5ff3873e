//! Evaluation of a parsed rule expression against a table's columns.

use crate::data::table::{Column, Table};
use crate::error::{Error, Result};
use crate::rule::parser::{BinaryOp, Expr};

/// Intermediate value while walking the expression tree.
enum Value {
    /// Numeric literal (broadcast against columns in comparisons).
    Scalar(f64),
    /// A numeric column's values.
    Numbers(Vec<f64>),
    /// A boolean mask, one entry per table row.
    Mask(Vec<bool>),
}

impl Value {
    fn kind(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "number",
            Value::Numbers(_) => "numeric column",
            Value::Mask(_) => "boolean mask",
        }
    }
}

/// Evaluate a rule expression to a boolean mask over `table`'s rows.
///
/// The expression must reduce to a boolean combination: bare numeric columns
/// or literals at the top level are type errors.
pub fn eval_mask(expr: &Expr, table: &Table) -> Result<Vec<bool>> {
    match eval(expr, table)? {
        Value::Mask(mask) => Ok(mask),
        other => Err(Error::RuleType(format!(
            "rule must evaluate to a boolean mask, got a {}",
            other.kind()
        ))),
    }
}

fn eval(expr: &Expr, table: &Table) -> Result<Value> {
    match expr {
        Expr::Column(name) => match table.column(name)? {
            Column::Float(values) => Ok(Value::Numbers(values.clone())),
            Column::Bool(values) => Ok(Value::Mask(values.clone())),
        },
        Expr::Number(value) => Ok(Value::Scalar(*value)),
        Expr::Not(inner) => match eval(inner, table)? {
            Value::Mask(mask) => Ok(Value::Mask(mask.into_iter().map(|b| !b).collect())),
            other => Err(Error::RuleType(format!(
                "'!' needs a boolean operand, got a {}",
                other.kind()
            ))),
        },
        Expr::Neg(inner) => match eval(inner, table)? {
            Value::Scalar(v) => Ok(Value::Scalar(-v)),
            Value::Numbers(values) => {
                Ok(Value::Numbers(values.into_iter().map(|v| -v).collect()))
            }
            Value::Mask(_) => Err(Error::RuleType(
                "'-' needs a numeric operand, got a boolean mask".to_string(),
            )),
        },
        Expr::Binary { op, lhs, rhs } => {
            let lhs = eval(lhs, table)?;
            let rhs = eval(rhs, table)?;
            match op {
                BinaryOp::And | BinaryOp::Or => eval_logical(*op, lhs, rhs),
                _ => eval_comparison(*op, lhs, rhs),
            }
        }
    }
}

fn eval_logical(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value> {
    let symbol = if op == BinaryOp::And { "&" } else { "|" };
    let (Value::Mask(l), Value::Mask(r)) = (&lhs, &rhs) else {
        return Err(Error::RuleType(format!(
            "'{symbol}' needs boolean operands, got a {} and a {}",
            lhs.kind(),
            rhs.kind()
        )));
    };
    let mask = l
        .iter()
        .zip(r)
        .map(|(&a, &b)| if op == BinaryOp::And { a && b } else { a || b })
        .collect();
    Ok(Value::Mask(mask))
}

fn eval_comparison(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value> {
    let compare = |a: f64, b: f64| match op {
        BinaryOp::Lt => a < b,
        BinaryOp::Le => a <= b,
        BinaryOp::Gt => a > b,
        BinaryOp::Ge => a >= b,
        BinaryOp::Eq => a == b,
        BinaryOp::Ne => a != b,
        BinaryOp::And | BinaryOp::Or => unreachable!("handled by eval_logical"),
    };
    let mask = match (&lhs, &rhs) {
        (Value::Numbers(l), Value::Numbers(r)) => {
            l.iter().zip(r).map(|(&a, &b)| compare(a, b)).collect()
        }
        (Value::Numbers(l), Value::Scalar(b)) => l.iter().map(|&a| compare(a, *b)).collect(),
        (Value::Scalar(a), Value::Numbers(r)) => r.iter().map(|&b| compare(*a, b)).collect(),
        _ => {
            return Err(Error::RuleType(format!(
                "comparison needs numeric operands with at least one column, got a {} and a {}",
                lhs.kind(),
                rhs.kind()
            )));
        }
    };
    Ok(Value::Mask(mask))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

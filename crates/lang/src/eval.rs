//! Tree-walking reference evaluator.
//!
//! This is deliberately independent from the compiled pipeline: it computes
//! over native signed 64-bit values and is used only to cross-check the
//! result of executing the generated program. The two agree on the low 32
//! bits of the result.

use tracing::trace;

use crate::ast::{BinOp, Expr};
use crate::error::Error;

/// Recursively evaluates `expr`.
///
/// Traversal is post-order: both children resolve before the operator that
/// combines them, matching the order in which the code generator emits
/// instructions. One trace event is emitted per binary node resolved.
///
/// # Errors
///
/// Fails with [`Error::DivisionByZero`] when a division's right operand
/// evaluates to zero.
pub fn eval(expr: &Expr) -> Result<i64, Error> {
    match expr {
        Expr::Number(value) => Ok(*value),

        Expr::Binary { op, left, right } => {
            let lhs = eval(left)?;
            let rhs = eval(right)?;

            let result = match op {
                BinOp::Add => lhs.wrapping_add(rhs),
                BinOp::Sub => lhs.wrapping_sub(rhs),
                BinOp::Mul => lhs.wrapping_mul(rhs),
                BinOp::Div => {
                    if rhs == 0 {
                        return Err(Error::DivisionByZero);
                    }
                    lhs.wrapping_div(rhs)
                }
            };

            trace!("{} {lhs} {rhs} -> {result}", op.mnemonic());
            Ok(result)
        }
    }
}

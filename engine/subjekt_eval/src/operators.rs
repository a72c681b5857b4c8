//! Binary and unary operator dispatch.
//!
//! Direct enum-based dispatch over `(Value, Value)` pairs; the type set is
//! fixed, so pattern matching beats trait objects and keeps exhaustiveness
//! checked. Promotion laws:
//! - `Int op Int` stays Int, except `/` which is true division into Float
//! - any Float operand promotes to Float
//! - a String operand is cast to the other side's kind and retried; if the
//!   cast fails, `+` degrades to concatenation and everything else is
//!   unsupported
//! - `..` stringifies both sides unconditionally and never consults the
//!   arithmetic table

use subjekt_ir::{BinaryOp, UnaryOp};
use subjekt_symbols::{
    division_by_zero, integer_overflow, internal, modulo_by_zero, non_numeric_unary,
    unsupported_binary, EvalResult, Value,
};

/// Evaluate a binary operation.
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    // Concatenation bypasses the arithmetic table entirely and never fails.
    if op == BinaryOp::Concat {
        return Ok(Value::string(format!("{left}{right}")));
    }

    match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(*a, *b, op),

        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            let (Some(a), Some(b)) = (left.as_f64(), right.as_f64()) else {
                return Err(internal("numeric operand without a numeric view"));
            };
            eval_float_binary(a, b, op)
        }

        // Two strings: `+` concatenates, anything else is unsupported.
        (Value::Str(a), Value::Str(b)) => {
            if op == BinaryOp::Add {
                Ok(Value::string(format!("{a}{b}")))
            } else {
                Err(unsupported_binary(op, &left, &right))
            }
        }

        // One string operand: cast it to the other side's kind and retry.
        (Value::Str(_), _) => match left.cast(right.value_type()) {
            Ok(casted) => evaluate_binary(casted, right, op),
            Err(_) if op == BinaryOp::Add => Ok(Value::string(format!("{left}{right}"))),
            Err(_) => Err(unsupported_binary(op, &left, &right)),
        },
        (_, Value::Str(_)) => match right.cast(left.value_type()) {
            Ok(casted) => evaluate_binary(left, casted, op),
            Err(_) if op == BinaryOp::Add => Ok(Value::string(format!("{left}{right}"))),
            Err(_) => Err(unsupported_binary(op, &left, &right)),
        },

        _ => Err(unsupported_binary(op, &left, &right)),
    }
}

/// Integer arithmetic. Checked throughout; `/` is true division.
fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => a
            .checked_add(b)
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("addition")),
        BinaryOp::Sub => a
            .checked_sub(b)
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("subtraction")),
        BinaryOp::Mul => a
            .checked_mul(b)
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("multiplication")),
        BinaryOp::Div => {
            if b == 0 {
                Err(division_by_zero())
            } else {
                #[expect(
                    clippy::cast_precision_loss,
                    reason = "true division promotes to Float by definition"
                )]
                let quotient = a as f64 / b as f64;
                Ok(Value::Float(quotient))
            }
        }
        BinaryOp::Mod => {
            if b == 0 {
                Err(modulo_by_zero())
            } else {
                a.checked_rem(b)
                    .map(Value::Int)
                    .ok_or_else(|| integer_overflow("remainder"))
            }
        }
        BinaryOp::Concat => Err(internal("concat reached the arithmetic table")),
    }
}

/// Float arithmetic. Division by zero follows IEEE-754 (infinity/NaN).
fn eval_float_binary(a: f64, b: f64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => Ok(Value::Float(a + b)),
        BinaryOp::Sub => Ok(Value::Float(a - b)),
        BinaryOp::Mul => Ok(Value::Float(a * b)),
        BinaryOp::Div => Ok(Value::Float(a / b)),
        BinaryOp::Mod => Ok(Value::Float(a % b)),
        BinaryOp::Concat => Err(internal("concat reached the arithmetic table")),
    }
}

/// Evaluate a unary operation. Both operators are numeric-only.
pub fn evaluate_unary(op: UnaryOp, operand: Value) -> EvalResult {
    match op {
        UnaryOp::Neg => operand.neg(),
        UnaryOp::Plus => match operand {
            Value::Int(_) | Value::Float(_) => Ok(operand),
            _ => Err(non_numeric_unary(op, &operand)),
        },
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use subjekt_symbols::EvalErrorKind;

    #[test]
    fn int_arithmetic_stays_int_except_division() {
        assert_eq!(
            evaluate_binary(Value::int(2), Value::int(3), BinaryOp::Add).unwrap(),
            Value::int(5)
        );
        assert_eq!(
            evaluate_binary(Value::int(7), Value::int(3), BinaryOp::Mod).unwrap(),
            Value::int(1)
        );
        // Dividing two integers always yields a float
        assert_eq!(
            evaluate_binary(Value::int(7), Value::int(2), BinaryOp::Div).unwrap(),
            Value::float(3.5)
        );
    }

    #[test]
    fn float_operand_promotes() {
        assert_eq!(
            evaluate_binary(Value::int(1), Value::float(0.5), BinaryOp::Add).unwrap(),
            Value::float(1.5)
        );
        assert_eq!(
            evaluate_binary(Value::float(7.0), Value::int(2), BinaryOp::Mod).unwrap(),
            Value::float(1.0)
        );
    }

    #[test]
    fn integer_division_by_zero_is_an_error() {
        let err = evaluate_binary(Value::int(7), Value::int(0), BinaryOp::Div).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::Arithmetic);
        let err = evaluate_binary(Value::int(7), Value::int(0), BinaryOp::Mod).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::Arithmetic);
    }

    #[test]
    fn float_division_by_zero_follows_ieee() {
        let result = evaluate_binary(Value::float(1.0), Value::float(0.0), BinaryOp::Div).unwrap();
        let Value::Float(f) = result else {
            panic!("expected float");
        };
        assert!(f.is_infinite());

        let result = evaluate_binary(Value::float(0.0), Value::float(0.0), BinaryOp::Div).unwrap();
        let Value::Float(f) = result else {
            panic!("expected float");
        };
        assert!(f.is_nan());
    }

    #[test]
    fn string_operand_casts_and_retries() {
        // "2" + 3 => 5 (Int)
        assert_eq!(
            evaluate_binary(Value::string("2"), Value::int(3), BinaryOp::Add).unwrap(),
            Value::int(5)
        );
        // 10 % "3" => 1
        assert_eq!(
            evaluate_binary(Value::int(10), Value::string("3"), BinaryOp::Mod).unwrap(),
            Value::int(1)
        );
    }

    #[test]
    fn failed_cast_degrades_plus_to_concatenation() {
        // "a" + 3 => "a3"
        assert_eq!(
            evaluate_binary(Value::string("a"), Value::int(3), BinaryOp::Add).unwrap(),
            Value::string("a3")
        );
        assert_eq!(
            evaluate_binary(Value::int(3), Value::string("a"), BinaryOp::Add).unwrap(),
            Value::string("3a")
        );
    }

    #[test]
    fn failed_cast_fails_other_operators() {
        let err = evaluate_binary(Value::string("a"), Value::int(3), BinaryOp::Mul).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::Unsupported);
    }

    #[test]
    fn two_strings_add_to_concatenation() {
        assert_eq!(
            evaluate_binary(Value::string("a"), Value::string("b"), BinaryOp::Add).unwrap(),
            Value::string("ab")
        );
        assert!(
            evaluate_binary(Value::string("a"), Value::string("b"), BinaryOp::Sub).is_err()
        );
    }

    #[test]
    fn concat_never_fails_and_bypasses_the_table() {
        assert_eq!(
            evaluate_binary(Value::int(1), Value::Bool(true), BinaryOp::Concat).unwrap(),
            Value::string("1true")
        );
        assert_eq!(
            evaluate_binary(Value::float(1.5), Value::string("x"), BinaryOp::Concat).unwrap(),
            Value::string("1.5x")
        );
    }

    #[test]
    fn concat_is_associative_but_not_commutative() {
        let concat = |a: &Value, b: &Value| {
            evaluate_binary(a.clone(), b.clone(), BinaryOp::Concat).unwrap()
        };
        let (a, b, c) = (Value::string("a"), Value::string("b"), Value::string("c"));
        assert_eq!(concat(&concat(&a, &b), &c), concat(&a, &concat(&b, &c)));
        assert_ne!(concat(&a, &b), concat(&b, &a));
    }

    #[test]
    fn add_and_mul_are_commutative_on_same_kind_numerics() {
        for (a, b) in [(Value::int(3), Value::int(4)), (Value::float(1.5), Value::float(2.5))] {
            for op in [BinaryOp::Add, BinaryOp::Mul] {
                assert_eq!(
                    evaluate_binary(a.clone(), b.clone(), op).unwrap(),
                    evaluate_binary(b.clone(), a.clone(), op).unwrap()
                );
            }
        }
    }

    #[test]
    fn add_and_mul_are_associative_on_same_kind_numerics() {
        // Dyadic fractions keep float addition exact
        let triples = [
            (Value::int(2), Value::int(3), Value::int(4)),
            (Value::float(1.5), Value::float(2.25), Value::float(4.0)),
        ];
        for (a, b, c) in triples {
            for op in [BinaryOp::Add, BinaryOp::Mul] {
                let left_first = evaluate_binary(
                    evaluate_binary(a.clone(), b.clone(), op).unwrap(),
                    c.clone(),
                    op,
                )
                .unwrap();
                let right_first = evaluate_binary(
                    a.clone(),
                    evaluate_binary(b.clone(), c.clone(), op).unwrap(),
                    op,
                )
                .unwrap();
                assert_eq!(left_first, right_first);
            }
        }
    }

    #[test]
    fn booleans_have_no_arithmetic() {
        let err =
            evaluate_binary(Value::Bool(true), Value::Bool(false), BinaryOp::Add).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::Unsupported);
    }

    #[test]
    fn checked_overflow_reports_arithmetic_error() {
        let err =
            evaluate_binary(Value::int(i64::MAX), Value::int(1), BinaryOp::Add).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::Arithmetic);
    }

    #[test]
    fn unary_dispatch() {
        assert_eq!(
            evaluate_unary(UnaryOp::Neg, Value::int(3)).unwrap(),
            Value::int(-3)
        );
        assert_eq!(
            evaluate_unary(UnaryOp::Plus, Value::float(2.5)).unwrap(),
            Value::float(2.5)
        );
        assert!(evaluate_unary(UnaryOp::Plus, Value::string("1")).is_err());
        assert!(evaluate_unary(UnaryOp::Neg, Value::Bool(true)).is_err());
    }
}

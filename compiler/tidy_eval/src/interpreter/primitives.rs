//! Primitive operators.

use std::rc::Rc;

use tidy_ir::{Name, Primitive};

use super::{CallObject, Interpreter};
use crate::errors::{
    division_by_zero, integer_overflow, not_found_in_data, type_mismatch, wrong_arg_count,
    EvalResult,
};
use crate::{Call, Env, Expr, Formula, FormulaKind, Value};

impl Interpreter<'_> {
    /// Apply a primitive that takes its operands unevaluated.
    pub(super) fn apply_special(
        &self,
        primitive: Primitive,
        call_obj: CallObject<'_>,
        call: &Rc<Call>,
        env: &Env,
    ) -> EvalResult {
        match primitive {
            Primitive::Tilde => Ok(make_formula(call_obj, call, env)),
            Primitive::Quote => match call.args() {
                [Expr::Const(value)] => Ok(value.clone()),
                [expr] => Ok(Value::lang(expr.clone())),
                args => Err(wrong_arg_count("quote", "1 argument", args.len())),
            },
            Primitive::Dollar => match call.args() {
                [target, member] => {
                    let target = self.eval(target, env)?;
                    let member = self.member_name(member)?;
                    self.get_member(&target, member)
                }
                args => Err(wrong_arg_count("$", "2 arguments", args.len())),
            },
            Primitive::Add | Primitive::Sub | Primitive::Mul | Primitive::Div => {
                Err(type_mismatch("special primitive", primitive.symbol()))
            }
        }
    }

    /// Member operand of `$`: a symbol or a string literal.
    fn member_name(&self, member: &Expr) -> Result<Name, crate::EvalError> {
        match member {
            Expr::Symbol(name) => Ok(*name),
            Expr::Const(Value::Str(s)) => Ok(self.interner.intern(s)),
            Expr::Const(value) => Err(type_mismatch("member name", value.type_name())),
            Expr::Call(_) => Err(type_mismatch("member name", "call")),
            Expr::MissingArg => Err(type_mismatch("member name", "missing argument")),
        }
    }

    fn get_member(&self, target: &Value, member: Name) -> EvalResult {
        match target {
            Value::DataPronoun(pronoun) => pronoun.get(member).ok_or_else(|| {
                not_found_in_data(pronoun.lookup_msg(), self.interner.lookup(member))
            }),
            Value::List(list) => Ok(list.get(member).cloned().unwrap_or(Value::Null)),
            Value::Env(env) => Ok(env.get_local(member).unwrap_or(Value::Null)),
            other => Err(type_mismatch("list, environment or data pronoun", other.type_name())),
        }
    }

    /// Apply a primitive to evaluated operands.
    pub(super) fn apply_primitive(&self, primitive: Primitive, args: &[Value]) -> EvalResult {
        match (primitive, args) {
            (Primitive::Add, [operand]) => numeric(operand).map(|_| operand.clone()),
            (Primitive::Sub, [operand]) => negate(operand),
            (_, [left, right]) if primitive.is_arithmetic() => arithmetic(primitive, left, right),
            (_, args) if primitive.is_arithmetic() => {
                Err(wrong_arg_count(primitive.symbol(), "1 or 2 arguments", args.len()))
            }
            _ => Err(type_mismatch("eager primitive", primitive.symbol())),
        }
    }
}

/// The `~` primitive: attach the calling environment to the call.
///
/// A formula object is already the result of `~` and is returned as is.
fn make_formula(call_obj: CallObject<'_>, call: &Rc<Call>, env: &Env) -> Value {
    if let CallObject::Formula(formula) = call_obj {
        return Value::Formula(Rc::clone(formula));
    }
    Value::formula(Formula::new(
        Rc::clone(call),
        Some(env.clone()),
        FormulaKind::Formula,
    ))
}

/// Numeric operand, promoted to float for mixed arithmetic.
#[allow(clippy::cast_precision_loss, reason = "mixed arithmetic promotes to double")]
fn numeric(value: &Value) -> Result<f64, crate::EvalError> {
    match value {
        Value::Int(n) => Ok(*n as f64),
        Value::Float(x) => Ok(*x),
        other => Err(type_mismatch("numeric", other.type_name())),
    }
}

fn negate(value: &Value) -> EvalResult {
    match value {
        Value::Int(n) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("negation")),
        other => Ok(Value::Float(-numeric(other)?)),
    }
}

fn arithmetic(primitive: Primitive, left: &Value, right: &Value) -> EvalResult {
    if let (Value::Int(a), Value::Int(b)) = (left, right) {
        let (a, b) = (*a, *b);
        let checked = match primitive {
            Primitive::Add => a.checked_add(b),
            Primitive::Sub => a.checked_sub(b),
            Primitive::Mul => a.checked_mul(b),
            // Integer division yields a double, like mixed arithmetic.
            _ => {
                if b == 0 {
                    return Err(division_by_zero());
                }
                return Ok(Value::Float(numeric(left)? / numeric(right)?));
            }
        };
        return checked
            .map(Value::Int)
            .ok_or_else(|| integer_overflow(primitive.symbol()));
    }

    let (a, b) = (numeric(left)?, numeric(right)?);
    let result = match primitive {
        Primitive::Add => a + b,
        Primitive::Sub => a - b,
        Primitive::Mul => a * b,
        _ => a / b,
    };
    Ok(Value::Float(result))
}

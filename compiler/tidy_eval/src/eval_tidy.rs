//! `eval_tidy`: evaluate an expression or quosure against data.

use crate::errors::{type_mismatch, undefined_variable, EvalResult};
use crate::{Env, Expr, Interpreter, Value};

impl Interpreter<'_> {
    /// Evaluate `expr` with `data` masking the environment.
    ///
    /// A quosure is evaluated in its own environment (`env` when it has
    /// none); any other value is evaluated in `env`. `data` may be:
    ///
    /// - an existing data mask: its `.env` and top parent are pointed at the
    ///   evaluation environment and left that way; the caller owns the mask
    /// - `Null`: a quosure mask is used, so nested quosures self-evaluate
    /// - anything `as_data_mask` accepts: a temporary mask is built and
    ///   cleaned on every exit path
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn eval_tidy(&self, expr: &Value, data: &Value, env: &Env) -> EvalResult {
        let (expr, env) = match expr.as_quosure() {
            Some(quosure) => (
                quosure.rhs().cloned().unwrap_or(Expr::MissingArg),
                quosure.env().cloned().unwrap_or_else(|| env.clone()),
            ),
            None => (value_as_expr(expr), env.clone()),
        };

        if let Value::Env(mask) = data {
            if self.is_data_mask(mask) {
                let top = match mask.get_local(self.names.top_env) {
                    Some(Value::Env(top)) => top,
                    Some(other) => return Err(type_mismatch("environment", other.type_name())),
                    None => return Err(undefined_variable(self.interner.lookup(self.names.top_env))),
                };
                // `.env` only changes once the rewiring has been accepted.
                top.set_parent(Some(env.clone()))?;
                mask.define(self.names.env, Value::Env(env));
                return self.eval(&expr, mask);
            }
        }

        if let Value::Null = data {
            let mask = self.new_quosure_mask(&env);
            return self.eval(&expr, &mask);
        }

        let mask = self.as_data_mask(data, &env)?;
        self.eval_in_temporary_mask(&expr, mask)
    }

    /// Evaluate in a mask owned by this evaluation, cleaning it on exit.
    fn eval_in_temporary_mask(&self, expr: &Expr, mask: Env) -> EvalResult {
        let cleanup = MaskCleanup {
            interpreter: self,
            mask,
        };
        self.eval(expr, &cleanup.mask)
    }
}

/// Quoted code evaluates as itself; other values are inlined constants.
fn value_as_expr(value: &Value) -> Expr {
    match value {
        Value::Lang(expr) => (**expr).clone(),
        other => Expr::Const(other.clone()),
    }
}

/// Cleans a temporary data mask on drop.
struct MaskCleanup<'i, 'a> {
    interpreter: &'i Interpreter<'a>,
    mask: Env,
}

impl Drop for MaskCleanup<'_, '_> {
    fn drop(&mut self) {
        self.interpreter.data_mask_clean(&self.mask);
    }
}

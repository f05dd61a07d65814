//! Deferred expression evaluation: the `~` operator inside overscopes.
//!
//! An overscope shadows `~` so that quosures evaluate themselves instead
//! of building a formula. Evaluating a quosure splices its own environment
//! under the overscope's top frame, so lookups that escape the overscope's
//! local frames continue in the quosure's lexical scope:
//!
//! ```text
//! overscope -> ... -> top -> quosure env -> ...   (during evaluation)
//! overscope -> ... -> top -> previous parent      (before and after)
//! ```
//!
//! The splice is held by a [`ParentSwap`](crate::ParentSwap) guard, so the
//! previous parent comes back on every exit path. Nested evaluations that
//! share a top frame restore in LIFO order.

use std::rc::Rc;

use crate::errors::{not_an_ancestor, type_mismatch, undefined_variable, EvalError, EvalResult};
use crate::{Callee, Env, Expr, Interpreter, Value};

impl Interpreter<'_> {
    /// Evaluate a `~` call object in an overscope.
    ///
    /// Quosures evaluate their right-hand side in `overscope` with
    /// `overscope_top` temporarily re-parented under the quosure's
    /// environment (or the overscope's `.env` when the quosure has none).
    /// Anything else is handed to [`Interpreter::base_tilde_eval`].
    ///
    /// The missing quosure yields `Value::Missing` and a quosure over a
    /// constant yields the constant; neither touches the scope chain.
    ///
    /// A quosure whose environment lies below `overscope_top` (for example
    /// one captured in a child of the overscope) is not spliced: that would
    /// make `overscope_top` its own ancestor, so it fails with `CyclicScope`
    /// and the chain is left as it was.
    pub fn tilde_eval(&self, tilde: &Value, overscope: &Env, overscope_top: &Env) -> EvalResult {
        let Some(quosure) = tilde.as_quosure() else {
            return self.base_tilde_eval(tilde, overscope);
        };
        let expr = match quosure.rhs() {
            Some(expr) if !expr.is_missing() => expr,
            _ => return Ok(Value::Missing),
        };
        if !expr.is_symbolic() {
            return self.eval(expr, overscope);
        }
        if !overscope.has_ancestor(overscope_top) {
            return Err(not_an_ancestor());
        }

        let quo_env = match quosure.env() {
            Some(env) => env.clone(),
            None => self.previous_env(overscope)?,
        };

        // Guards drop in reverse order: the parent first, then `.env`.
        let _env_pronoun = self
            .is_data_mask(overscope)
            .then(|| overscope.rebind(self.names.env, Value::Env(quo_env.clone())));
        let _rewired = overscope_top.reparent(quo_env)?;
        tracing::trace!(depth = self.depth(), "quosure env spliced under overscope top");

        self.eval(expr, overscope)
    }

    /// Evaluate a `~` call with the base `~` primitive.
    ///
    /// Formulas that already carry an environment are returned unchanged.
    /// Otherwise the call is rebuilt around the inlined primitive (so the
    /// overscope's own `~` is bypassed), evaluated in `env`, and the
    /// resulting formula gets the canonical `~` symbol back as its operator.
    pub fn base_tilde_eval(&self, tilde: &Value, env: &Env) -> EvalResult {
        let call = match tilde {
            Value::Formula(formula) if formula.env().is_some() => return Ok(tilde.clone()),
            Value::Formula(formula) => Rc::clone(formula.call()),
            Value::Lang(expr) => match &**expr {
                Expr::Call(call) => Rc::clone(call),
                _ => return Err(type_mismatch("`~` call", tilde.type_name())),
            },
            other => return Err(type_mismatch("`~` call", other.type_name())),
        };

        let primitive = self.tilde_primitive()?;
        let inlined = Expr::Call(Rc::new(call.with_callee(Callee::Primitive(primitive))));
        match self.eval(&inlined, env)? {
            Value::Formula(formula) => Ok(Value::formula(
                formula.with_callee(Callee::Symbol(self.names.tilde)),
            )),
            other => Ok(other),
        }
    }

    /// The overscope's `.env` binding.
    fn previous_env(&self, overscope: &Env) -> Result<Env, EvalError> {
        match overscope.get_local(self.names.env) {
            Some(Value::Env(env)) => Ok(env),
            Some(other) => Err(type_mismatch("environment", other.type_name())),
            None => Err(undefined_variable(self.interner.lookup(self.names.env))),
        }
    }
}

//! Tree-walking interpreter.
//!
//! Provides the host side of tidy evaluation: environment-based symbol
//! lookup, call dispatch and the primitives. The deferred-expression
//! evaluator (`tilde.rs`), data masks (`data_mask.rs`) and `eval_tidy`
//! (`eval_tidy.rs`) are further `impl Interpreter` blocks built on `eval`.
//!
//! # Call dispatch
//!
//! A call's head is either an inlined primitive or a symbol. Symbols are
//! resolved through the evaluation environment, skipping bindings that are
//! not callable, so a data mask can shadow `~` with its own thunk while a
//! data column named like an operator does not hide the operator. Special
//! primitives (`~`, `quote`, `$`) see their operands unevaluated; the mask
//! thunk receives the whole call object.

mod builder;
mod names;
mod primitives;

pub use builder::InterpreterBuilder;
pub(crate) use names::MaskNames;

use std::cell::{Cell, OnceCell};
use std::rc::Rc;

use tidy_ir::{Name, Primitive, StringInterner};
use tidy_stack::ensure_sufficient_stack;

use crate::errors::{
    not_callable, recursion_limit_exceeded, type_mismatch, undefined_function,
    undefined_variable, EvalError, EvalResult,
};
use crate::{Call, Callee, Env, EvalMode, Expr, Formula, Value};

/// The interpreter: base and global environments plus evaluation state.
///
/// All methods take `&self`; environments are shared handles with interior
/// mutability, which lets a mask's `~` thunk re-enter evaluation.
pub struct Interpreter<'a> {
    pub(crate) interner: &'a StringInterner,
    pub(crate) names: MaskNames,
    base: Env,
    global: Env,
    mode: EvalMode,
    depth: Cell<usize>,
    /// The unoverridden `~`, resolved from the base environment on first use.
    tilde_primitive: OnceCell<Primitive>,
}

impl<'a> Interpreter<'a> {
    /// Create an interpreter with default configuration.
    pub fn new(interner: &'a StringInterner) -> Self {
        InterpreterBuilder::new(interner).build()
    }

    /// Start configuring an interpreter.
    pub fn builder(interner: &'a StringInterner) -> InterpreterBuilder<'a> {
        InterpreterBuilder::new(interner)
    }

    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    /// Environment holding the primitives.
    pub fn base_env(&self) -> &Env {
        &self.base
    }

    /// Top-level user environment (child of base).
    pub fn global_env(&self) -> &Env {
        &self.global
    }

    pub fn mode(&self) -> EvalMode {
        self.mode
    }

    /// Current call nesting depth.
    pub fn depth(&self) -> usize {
        self.depth.get()
    }

    /// Intern a symbol.
    pub fn intern(&self, name: &str) -> Name {
        self.interner.intern(name)
    }

    /// Symbol expression for `name`.
    pub fn sym(&self, name: &str) -> Expr {
        Expr::Symbol(self.intern(name))
    }

    /// Call to the function bound to `name`.
    pub fn call(&self, name: &str, args: Vec<Expr>) -> Expr {
        Expr::apply(self.intern(name), args)
    }

    /// Quosure wrapping `expr`, optionally capturing `env`.
    pub fn quosure(&self, expr: Expr, env: Option<&Env>) -> Value {
        Value::formula(Formula::quosure(self.names.tilde, expr, env.cloned()))
    }

    /// The quosure standing for an absent argument.
    pub fn missing_quosure(&self) -> Value {
        self.quosure(Expr::MissingArg, None)
    }

    /// A bare `~ rhs` call (no environment attached).
    pub fn tilde_call(&self, args: Vec<Expr>) -> Value {
        Value::lang(Expr::apply(self.names.tilde, args))
    }

    /// Evaluate `expr` in `env`.
    pub fn eval(&self, expr: &Expr, env: &Env) -> EvalResult {
        ensure_sufficient_stack(|| match expr {
            Expr::Const(Value::Formula(formula)) => {
                self.eval_call(CallObject::Formula(formula), formula.call(), env)
            }
            Expr::Const(value) => Ok(value.clone()),
            Expr::Symbol(name) => self.lookup_variable(*name, env),
            Expr::Call(call) => self.eval_call(CallObject::Lang(expr), call, env),
            Expr::MissingArg => Ok(Value::Missing),
        })
    }

    /// Resolve a variable through the scope chain.
    fn lookup_variable(&self, name: Name, env: &Env) -> EvalResult {
        env.lookup(name)
            .ok_or_else(|| undefined_variable(self.interner.lookup(name)))
    }

    /// Dispatch a call. `call_obj` is the call as written (a call node or a
    /// formula object); it is what the mask's `~` thunk receives.
    fn eval_call(&self, call_obj: CallObject<'_>, call: &Rc<Call>, env: &Env) -> EvalResult {
        let _depth = self.enter()?;
        match self.resolve_callee(call.callee(), env)? {
            Value::Builtin(primitive) if primitive.is_special() => {
                self.apply_special(primitive, call_obj, call, env)
            }
            Value::Builtin(primitive) => {
                let args = call
                    .args()
                    .iter()
                    .map(|arg| self.eval(arg, env))
                    .collect::<Result<Vec<_>, _>>()?;
                self.apply_primitive(primitive, &args)
            }
            Value::TildeThunk(thunk) => {
                let (mask, top) = thunk.resolve()?;
                self.tilde_eval(&call_obj.to_value(), &mask, &top)
            }
            other => Err(not_callable(other.type_name())),
        }
    }

    fn resolve_callee(&self, callee: Callee, env: &Env) -> EvalResult {
        match callee {
            Callee::Primitive(primitive) => Ok(Value::Builtin(primitive)),
            Callee::Symbol(name) => env
                .lookup_where(name, Value::is_callable)
                .ok_or_else(|| undefined_function(self.interner.lookup(name))),
        }
    }

    /// The `~` primitive as bound in the base environment, cached for the
    /// interpreter's lifetime.
    pub(crate) fn tilde_primitive(&self) -> Result<Primitive, EvalError> {
        if let Some(primitive) = self.tilde_primitive.get() {
            return Ok(*primitive);
        }
        let primitive = match self.base.get_local(self.names.tilde) {
            Some(Value::Builtin(primitive)) => primitive,
            Some(other) => return Err(type_mismatch("primitive `~`", other.type_name())),
            None => return Err(undefined_function("~")),
        };
        tracing::trace!(?primitive, "resolved base `~`");
        Ok(*self.tilde_primitive.get_or_init(|| primitive))
    }

    /// Enter one level of call nesting.
    fn enter(&self) -> Result<DepthGuard<'_>, EvalError> {
        let depth = self.depth.get().saturating_add(1);
        if let Some(limit) = self.mode.max_recursion_depth() {
            if depth > limit {
                return Err(recursion_limit_exceeded(limit));
            }
        }
        self.depth.set(depth);
        Ok(DepthGuard { depth: &self.depth })
    }
}

/// A call as it appeared in the code being evaluated.
#[derive(Clone, Copy)]
pub(crate) enum CallObject<'e> {
    /// A call node.
    Lang(&'e Expr),
    /// A formula object evaluated as a `~` call.
    Formula(&'e Rc<Formula>),
}

impl CallObject<'_> {
    pub(crate) fn to_value(self) -> Value {
        match self {
            CallObject::Lang(expr) => Value::lang(expr.clone()),
            CallObject::Formula(formula) => Value::Formula(Rc::clone(formula)),
        }
    }
}

/// Leaves one level of call nesting on drop.
struct DepthGuard<'i> {
    depth: &'i Cell<usize>,
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

//! Expressions and formula objects.
//!
//! Code is data here: an expression can embed any runtime value, including
//! a quosure, so expressions live next to `Value` rather than in `tidy_ir`.
//! All nodes are immutable; "modifying" a call produces a new node.

use std::rc::Rc;

use tidy_ir::{Name, Primitive};

use crate::{Env, Value};

/// A symbolic expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// An inlined value. Formula objects evaluate as `~` calls; everything
    /// else evaluates to itself.
    Const(Value),
    /// A variable reference.
    Symbol(Name),
    /// An operator applied to operands.
    Call(Rc<Call>),
    /// The empty argument.
    MissingArg,
}

impl Expr {
    /// Build a call node.
    pub fn call(callee: Callee, args: Vec<Expr>) -> Self {
        Expr::Call(Rc::new(Call::new(callee, args)))
    }

    /// Build a call to the function bound to `name`.
    pub fn apply(name: Name, args: Vec<Expr>) -> Self {
        Self::call(Callee::Symbol(name), args)
    }

    /// Integer literal.
    pub fn int(value: i64) -> Self {
        Expr::Const(Value::Int(value))
    }

    /// String literal.
    pub fn string(value: &str) -> Self {
        Expr::Const(Value::string(value))
    }

    /// Whether evaluating this expression can depend on an environment.
    ///
    /// Symbols and calls can; so can embedded formula objects, which are
    /// dispatched through `~`. Other constants cannot.
    pub fn is_symbolic(&self) -> bool {
        match self {
            Expr::Symbol(_) | Expr::Call(_) => true,
            Expr::Const(value) => matches!(value, Value::Formula(_)),
            Expr::MissingArg => false,
        }
    }

    /// Whether this is the empty argument.
    pub fn is_missing(&self) -> bool {
        matches!(self, Expr::MissingArg)
    }
}

/// The head of a call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Callee {
    /// Resolved through the evaluation environment, so it can be overridden.
    Symbol(Name),
    /// An inlined primitive; never looked up.
    Primitive(Primitive),
}

/// A call node.
#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    callee: Callee,
    args: Vec<Expr>,
}

impl Call {
    /// Create a call node.
    pub fn new(callee: Callee, args: Vec<Expr>) -> Self {
        Call { callee, args }
    }

    /// The operator.
    pub fn callee(&self) -> Callee {
        self.callee
    }

    /// The operands.
    pub fn args(&self) -> &[Expr] {
        &self.args
    }

    /// Same operands, different operator.
    #[must_use]
    pub fn with_callee(&self, callee: Callee) -> Self {
        Call {
            callee,
            args: self.args.clone(),
        }
    }
}

/// Whether a formula object is a plain formula or a quosure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormulaKind {
    Formula,
    Quosure,
}

/// A `~` call together with the environment it was created in.
///
/// One-sided formulas (`~ rhs`) have a single operand; two-sided formulas
/// (`lhs ~ rhs`) have two. A quosure is always one-sided and may lack an
/// environment, in which case the evaluating overscope supplies one.
#[derive(Clone, Debug, PartialEq)]
pub struct Formula {
    call: Rc<Call>,
    env: Option<Env>,
    kind: FormulaKind,
}

impl Formula {
    /// Attach an environment and kind to a `~` call.
    pub fn new(call: Rc<Call>, env: Option<Env>, kind: FormulaKind) -> Self {
        Formula { call, env, kind }
    }

    /// Wrap `expr` as a quosure over `env`. `tilde` is the interned `~`.
    pub fn quosure(tilde: Name, expr: Expr, env: Option<Env>) -> Self {
        let call = Rc::new(Call::new(Callee::Symbol(tilde), vec![expr]));
        Self::new(call, env, FormulaKind::Quosure)
    }

    /// The underlying `~` call.
    pub fn call(&self) -> &Rc<Call> {
        &self.call
    }

    /// The attached environment, if any.
    pub fn env(&self) -> Option<&Env> {
        self.env.as_ref()
    }

    pub fn kind(&self) -> FormulaKind {
        self.kind
    }

    pub fn is_quosure(&self) -> bool {
        self.kind == FormulaKind::Quosure
    }

    /// Right-hand side: the last operand.
    pub fn rhs(&self) -> Option<&Expr> {
        self.call.args().last()
    }

    /// Left-hand side of a two-sided formula.
    pub fn lhs(&self) -> Option<&Expr> {
        match self.call.args() {
            [lhs, _] => Some(lhs),
            _ => None,
        }
    }

    /// Whether this quosure stands for an absent argument.
    pub fn is_missing_quosure(&self) -> bool {
        self.is_quosure() && self.rhs().map_or(true, Expr::is_missing)
    }

    /// Same formula with the call's operator replaced.
    #[must_use]
    pub fn with_callee(&self, callee: Callee) -> Self {
        Formula {
            call: Rc::new(self.call.with_callee(callee)),
            env: self.env.clone(),
            kind: self.kind,
        }
    }
}

#[cfg(test)]
mod tests;

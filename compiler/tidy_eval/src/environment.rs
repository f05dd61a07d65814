//! Environments: binding frames linked by a single mutable parent slot.
//!
//! An [`Env`] is a shared handle (`Rc<RefCell<Frame>>`), so the same frame
//! can be the parent of many children and be rewired in place. Rewiring is
//! only exposed through guards ([`ParentSwap`], [`BindingSwap`]) that put the
//! previous state back when dropped, including during unwinding.
//!
//! # Thread Safety
//! `Env` is NOT thread-safe. Evaluation is single-threaded, and the parent
//! slot of a shared frame is mutated during evaluation.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tidy_ir::Name;

use crate::errors::{cyclic_scope, EvalError};
use crate::Value;

/// A single frame of bindings.
struct Frame {
    bindings: FxHashMap<Name, Value>,
    parent: Option<Env>,
}

/// Handle to an environment frame. Clones share the frame.
#[derive(Clone)]
pub struct Env(Rc<RefCell<Frame>>);

impl Env {
    /// Create a frame with the given parent.
    pub fn new(parent: Option<Env>) -> Self {
        Env(Rc::new(RefCell::new(Frame {
            bindings: FxHashMap::default(),
            parent,
        })))
    }

    /// Create a frame with no parent.
    pub fn empty() -> Self {
        Self::new(None)
    }

    /// Create a new frame whose parent is `self`.
    #[must_use]
    pub fn child(&self) -> Self {
        Self::new(Some(self.clone()))
    }

    /// Bind `name` in this frame, replacing any existing binding.
    #[inline]
    pub fn define(&self, name: Name, value: Value) {
        self.0.borrow_mut().bindings.insert(name, value);
    }

    /// Remove a binding from this frame.
    pub fn remove(&self, name: Name) -> Option<Value> {
        self.0.borrow_mut().bindings.remove(&name)
    }

    /// Look up `name` in this frame only.
    #[inline]
    pub fn get_local(&self, name: Name) -> Option<Value> {
        self.0.borrow().bindings.get(&name).cloned()
    }

    /// Whether `name` is bound in this frame.
    pub fn has_local(&self, name: Name) -> bool {
        self.0.borrow().bindings.contains_key(&name)
    }

    /// Look up `name`, walking the parent chain.
    pub fn lookup(&self, name: Name) -> Option<Value> {
        self.ancestors().find_map(|env| env.get_local(name))
    }

    /// Look up `name`, skipping bindings that fail `accept`.
    ///
    /// Used for function position, where a non-function binding does not
    /// hide a function bound further out.
    pub fn lookup_where(&self, name: Name, accept: impl Fn(&Value) -> bool) -> Option<Value> {
        self.ancestors()
            .find_map(|env| env.get_local(name).filter(|value| accept(value)))
    }

    /// Names bound in this frame, sorted.
    pub fn names(&self) -> Vec<Name> {
        let mut names: Vec<Name> = self.0.borrow().bindings.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of bindings in this frame.
    pub fn len(&self) -> usize {
        self.0.borrow().bindings.len()
    }

    /// Whether this frame has no bindings.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().bindings.is_empty()
    }

    /// Remove every binding in this frame. The parent is kept.
    pub fn clear(&self) {
        self.0.borrow_mut().bindings.clear();
    }

    /// The enclosing environment.
    pub fn parent(&self) -> Option<Env> {
        self.0.borrow().parent.clone()
    }

    /// Replace the parent slot, returning the previous parent.
    ///
    /// Fails with `CyclicScope` if `parent` has `self` among its ancestors;
    /// the chain is left untouched in that case.
    pub fn set_parent(&self, parent: Option<Env>) -> Result<Option<Env>, EvalError> {
        if let Some(new_parent) = &parent {
            if new_parent.has_ancestor(self) {
                return Err(cyclic_scope());
            }
        }
        Ok(std::mem::replace(&mut self.0.borrow_mut().parent, parent))
    }

    /// Temporarily re-parent this frame under `parent`.
    ///
    /// The previous parent is restored when the returned guard is dropped.
    /// Guards on the same frame must be dropped in reverse order of creation,
    /// which scoped `let` bindings guarantee.
    pub fn reparent(&self, parent: Env) -> Result<ParentSwap, EvalError> {
        let previous = self.set_parent(Some(parent))?;
        Ok(ParentSwap {
            env: self.clone(),
            previous,
        })
    }

    /// Temporarily bind `name` to `value` in this frame.
    ///
    /// The previous binding (or its absence) is restored on drop.
    pub fn rebind(&self, name: Name, value: Value) -> BindingSwap {
        let previous = self.0.borrow_mut().bindings.insert(name, value);
        BindingSwap {
            env: self.clone(),
            name,
            previous,
        }
    }

    /// Iterate over `self` and then each ancestor, innermost first.
    pub fn ancestors(&self) -> Ancestors {
        Ancestors {
            next: Some(self.clone()),
        }
    }

    /// Whether `other` is `self` or one of its ancestors.
    pub fn has_ancestor(&self, other: &Env) -> bool {
        self.ancestors().any(|env| env.ptr_eq(other))
    }

    /// Copy this frame's bindings into a new frame with the given parent.
    #[must_use]
    pub fn clone_frame(&self, parent: Option<Env>) -> Env {
        let bindings = self.0.borrow().bindings.clone();
        Env(Rc::new(RefCell::new(Frame { bindings, parent })))
    }

    /// Whether both handles refer to the same frame.
    #[inline]
    pub fn ptr_eq(&self, other: &Env) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Non-owning handle to this frame.
    pub fn downgrade(&self) -> WeakEnv {
        WeakEnv(Rc::downgrade(&self.0))
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for Env {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Env({:p})", Rc::as_ptr(&self.0))
    }
}

/// Iterator over an environment and its ancestors.
pub struct Ancestors {
    next: Option<Env>,
}

impl Iterator for Ancestors {
    type Item = Env;

    fn next(&mut self) -> Option<Env> {
        let current = self.next.take()?;
        self.next = current.parent();
        Some(current)
    }
}

/// Weak handle to an environment frame.
///
/// Held by values stored inside the frame they refer to (the mask-local `~`
/// binding), which would otherwise form a reference cycle.
#[derive(Clone)]
pub struct WeakEnv(Weak<RefCell<Frame>>);

impl WeakEnv {
    /// Recover a strong handle if the frame is still alive.
    pub fn upgrade(&self) -> Option<Env> {
        self.0.upgrade().map(Env)
    }
}

impl PartialEq for WeakEnv {
    fn eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for WeakEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WeakEnv({:p})", self.0.as_ptr())
    }
}

/// RAII guard restoring a frame's parent slot on drop.
#[must_use = "the parent is restored as soon as the guard is dropped"]
pub struct ParentSwap {
    env: Env,
    previous: Option<Env>,
}

impl ParentSwap {
    /// The parent the frame had before the swap.
    pub fn previous(&self) -> Option<&Env> {
        self.previous.as_ref()
    }
}

impl Drop for ParentSwap {
    fn drop(&mut self) {
        self.env.0.borrow_mut().parent = self.previous.take();
    }
}

/// RAII guard restoring a single binding on drop.
#[must_use = "the binding is restored as soon as the guard is dropped"]
pub struct BindingSwap {
    env: Env,
    name: Name,
    previous: Option<Value>,
}

impl Drop for BindingSwap {
    fn drop(&mut self) {
        match self.previous.take() {
            Some(value) => self.env.define(self.name, value),
            None => {
                self.env.remove(self.name);
            }
        }
    }
}

#[cfg(test)]
mod tests;
